//! Arguments

// Imports
use std::path::PathBuf;

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Duration of each busy period, in milliseconds (0 to spin without resting)
	#[clap(long = "busyduration", default_value_t = 0)]
	pub busy_duration_ms: u64,

	/// Pid of the process to spin on, via `/proc/<pid>/smaps`
	///
	/// Defaults to this process, which spins indefinitely.
	#[clap(long = "pid")]
	pub pid: Option<u32>,
}

#[cfg(test)]
mod tests {
	use {super::*, clap::Parser};

	#[test]
	fn verify_args() {
		use clap::CommandFactory;
		Args::command().debug_assert();
	}

	#[test]
	fn defaults() {
		let args = Args::parse_from(["busywait"]);
		assert_eq!(args.busy_duration_ms, 0);
		assert_eq!(args.pid, None);
	}

	#[test]
	fn rejects_negative_values() {
		assert!(Args::try_parse_from(["busywait", "--busyduration", "-1"]).is_err());
		assert!(Args::try_parse_from(["busywait", "--pid", "-1"]).is_err());
	}
}
