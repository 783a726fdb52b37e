//! Busy-wait companion tool (`busywait`).
//!
//! Spins issuing liveness probes against a target process's
//! `/proc/<pid>/smaps`, simulating a metadata scan, and exits the
//! moment the target disappears. With `--busyduration` set, rests for
//! a millisecond between busy periods.

// Modules
mod args;

// Imports
use {
	self::args::Args,
	anyhow::Context,
	clap::Parser,
	mapchurn::{exit, BusyLoop, ProcProbe},
	mapchurn_util::logger,
	std::{process, process::ExitCode, time::Duration},
};

fn main() -> ExitCode {
	// Get arguments
	let args = match Args::try_parse() {
		Ok(args) => args,
		Err(err) => return exit::usage(err),
	};
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Then run, turning any error into its exit code
	match self::run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			tracing::error!("Error: {err:?}");
			exit::fatal(&err)
		},
	}
}

/// Runs the busy-waiter
fn run(args: &Args) -> Result<(), anyhow::Error> {
	// Note: With no target configured we probe ourselves, which spins
	//       until killed.
	let pid = args.pid.unwrap_or_else(process::id);
	let probe = ProcProbe::new(pid);
	tracing::info!(pid, path = ?probe.path(), "Probing target");

	let busy_period = (args.busy_duration_ms != 0).then(|| Duration::from_millis(args.busy_duration_ms));
	BusyLoop::new(probe, busy_period)
		.run()
		.context("Unable to probe target")?;

	Ok(())
}
