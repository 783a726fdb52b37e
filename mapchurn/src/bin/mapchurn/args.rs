//! Arguments

// Imports
use {nix::errno::Errno, std::path::PathBuf};

/// Default region size (128 MiB).
///
/// Raise `vm.max_map_count` before going much larger.
pub const DEFAULT_REGION_SIZE: usize = 128 * 1024 * 1024;

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

	/// Duration of the test, in seconds
	#[clap(long = "duration", default_value_t = 10)]
	pub duration_secs: u64,

	/// Region size, in gigabytes
	#[clap(long = "gb")]
	pub region_gb: Option<u64>,

	/// Region size, in megabytes (default 128)
	#[clap(long = "mb")]
	pub region_mb: Option<u64>,

	/// Gate file to wait on before starting
	///
	/// The test doesn't start until this path no longer exists.
	#[clap(long = "waitfile")]
	pub wait_file: Option<PathBuf>,

	/// Pause between operations, in microseconds (default none)
	#[clap(long = "pause-us")]
	pub pause_us: Option<u64>,
}

impl Args {
	/// Returns the configured region size, in bytes.
	///
	/// `--gb` and `--mb` are mutually exclusive, configuring both is a
	/// usage error.
	pub fn region_size(&self) -> Result<usize, anyhow::Error> {
		match (self.region_gb, self.region_mb) {
			(Some(_), Some(_)) =>
				Err(anyhow::Error::new(Errno::EINVAL).context("Only one of --gb and --mb may be specified")),
			(Some(gb), None) => gb
				.checked_mul(1024 * 1024 * 1024)
				.and_then(|size| usize::try_from(size).ok())
				.ok_or_else(|| anyhow::Error::new(Errno::EINVAL).context("--gb value is too large for the address space")),
			(None, Some(mb)) => mb
				.checked_mul(1024 * 1024)
				.and_then(|size| usize::try_from(size).ok())
				.ok_or_else(|| anyhow::Error::new(Errno::EINVAL).context("--mb value is too large for the address space")),
			(None, None) => Ok(DEFAULT_REGION_SIZE),
		}
	}
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
	fn default_region_size() {
		let args = Args::parse_from(["mapchurn"]);
		assert_eq!(args.region_size().expect("Unable to get region size"), DEFAULT_REGION_SIZE);
		assert_eq!(args.duration_secs, 10);
	}

	#[test]
	fn region_size_units() {
		let args = Args::parse_from(["mapchurn", "--mb", "10"]);
		assert_eq!(args.region_size().expect("Unable to get region size"), 10 * 1024 * 1024);

		let args = Args::parse_from(["mapchurn", "--gb", "1"]);
		assert_eq!(
			args.region_size().expect("Unable to get region size"),
			1024 * 1024 * 1024
		);
	}

	#[test]
	fn region_size_units_conflict() {
		let args = Args::parse_from(["mapchurn", "--gb", "1", "--mb", "10"]);
		let err = args.region_size().expect_err("Conflicting units were accepted");
		assert_eq!(err.downcast_ref::<Errno>(), Some(&Errno::EINVAL));
	}

	#[test]
	fn region_size_overflow() {
		let args = Args::parse_from(["mapchurn", "--gb", &u64::MAX.to_string()]);
		let err = args.region_size().expect_err("Overflowing size was accepted");
		assert_eq!(err.downcast_ref::<Errno>(), Some(&Errno::EINVAL));
	}
}
