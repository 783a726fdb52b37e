//! Memory-mapping churn tool (`mapchurn`).
//!
//! Reserves one large anonymous region, then randomly remaps and
//! unmaps single pages within it until a deadline, timing each
//! operation. Run `busywait` against this process's pid to check
//! whether `/proc` scans stall the mapping operations.

// Modules
mod args;

// Imports
use {
	self::args::Args,
	anyhow::Context,
	clap::Parser,
	mapchurn::{churn, exit, Gate, Region},
	mapchurn_util::{logger, DurationExt},
	std::{process::ExitCode, time::Duration},
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

/// Runs the mapper
fn run(args: &Args) -> Result<(), anyhow::Error> {
	// Reserve the region.
	// Note: Any usage error must surface before we reserve anything.
	let region_size = args.region_size()?;
	let mut region = Region::reserve(region_size).context("Unable to reserve initial region")?;
	tracing::info!(
		duration_secs = args.duration_secs,
		region_pages = region.page_count(),
		"Reserved region"
	);

	// Wait on the gate, if any
	if let Some(wait_file) = &args.wait_file {
		tracing::info!(path = ?wait_file, "Waiting on gate file");
		Gate::new(wait_file).wait();
	}

	// Then churn pages until the deadline
	let config = churn::Config {
		duration: Duration::from_secs(args.duration_secs),
		pause:    args.pause_us.map(Duration::from_micros),
	};
	let report = churn::run(&mut region, &mut rand::thread_rng(), &config)?;

	println!(
		"mapchurn: Map region: {:#x} duration: {} nmaps: {} nunmaps: {} max: {:.3}ms avg: {:.3}ms",
		region.base_addr(),
		args.duration_secs,
		report.remaps,
		report.unmaps,
		report.latency.max().as_millis_f64(),
		report.latency.avg().as_millis_f64(),
	);

	Ok(())
}
