//! Timed remap/unmap loop

// Imports
use {
	crate::{region::Region, stats::LatencyStats},
	anyhow::Context,
	rand::Rng,
	std::{
		thread,
		time::{Duration, Instant},
	},
};

/// Churn loop configuration
#[derive(Clone, Copy, Debug)]
pub struct Config {
	/// Total run duration
	pub duration: Duration,

	/// Pause after each iteration, if any
	pub pause: Option<Duration>,
}

/// Churn loop report
#[derive(Clone, Copy, Debug, Default)]
pub struct Report {
	/// Successful remaps
	pub remaps: u64,

	/// Successful unmaps
	pub unmaps: u64,

	/// Per-operation latency
	pub latency: LatencyStats,
}

/// Action chosen for a single iteration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
	Remap,
	Unmap,
}

/// Repeatedly perturbs one random page of `region` until `config.duration` elapses.
///
/// Each iteration picks a page uniformly at random and, with even odds,
/// either installs a fresh fixed-address anonymous mapping over it or
/// releases it, timing the operation. The deadline is computed once at
/// entry and rechecked before each iteration, so a zero duration
/// performs no operations.
///
/// Any mapping failure is propagated immediately, these tools exist to
/// detect mapping anomalies, not to tolerate them.
pub fn run<R: Rng>(region: &mut Region, rng: &mut R, config: &Config) -> Result<Report, anyhow::Error> {
	let stop_time = Instant::now() + config.duration;

	let mut report = Report::default();
	while Instant::now() < stop_time {
		let offset = self::random_page_offset(rng, region.page_count(), region.page_size());
		let action = match rng.gen::<bool>() {
			true => Action::Remap,
			false => Action::Unmap,
		};

		let start_time = Instant::now();
		match action {
			Action::Remap => region.remap_page(offset).context("Unable to remap page")?,
			Action::Unmap => region.unmap_page(offset).context("Unable to unmap page")?,
		}
		report.latency.record(start_time.elapsed());

		match action {
			Action::Remap => report.remaps += 1,
			Action::Unmap => report.unmaps += 1,
		}

		if let Some(pause) = config.pause {
			thread::sleep(pause);
		}
	}

	Ok(report)
}

/// Picks a uniformly random page-aligned offset within a region of `page_count` pages
fn random_page_offset<R: Rng>(rng: &mut R, page_count: usize, page_size: usize) -> usize {
	rng.gen_range(0..page_count) * page_size
}

#[cfg(test)]
mod tests {
	use {
		super::*,
		crate::region,
		rand::{rngs::StdRng, SeedableRng},
	};

	#[test]
	fn zero_duration_terminates_promptly() {
		let page_size = region::page_size().expect("Unable to get page size");
		let mut region = Region::reserve(4 * page_size).expect("Unable to reserve region");
		let mut rng = StdRng::seed_from_u64(0);

		let config = Config {
			duration: Duration::ZERO,
			pause:    None,
		};
		let start_time = Instant::now();
		let report = self::run(&mut region, &mut rng, &config).expect("Unable to run churn loop");

		assert!(start_time.elapsed() < Duration::from_secs(1));
		assert_eq!(report.remaps, 0);
		assert_eq!(report.unmaps, 0);
		assert_eq!(report.latency.count(), 0);
	}

	#[test]
	fn runtime_is_at_least_the_duration() {
		let page_size = region::page_size().expect("Unable to get page size");
		let mut region = Region::reserve(16 * page_size).expect("Unable to reserve region");
		let mut rng = StdRng::seed_from_u64(0);

		let duration = Duration::from_millis(50);
		let config = Config { duration, pause: None };
		let start_time = Instant::now();
		let report = self::run(&mut region, &mut rng, &config).expect("Unable to run churn loop");

		assert!(start_time.elapsed() >= duration);
		assert_eq!(report.remaps + report.unmaps, report.latency.count());
		assert_ne!(report.latency.count(), 0);
	}

	#[test]
	fn offsets_are_page_aligned_and_in_bounds() {
		let mut rng = StdRng::seed_from_u64(0);
		let page_size = 4096;
		let page_count = 13;

		for _ in 0..10_000 {
			let offset = self::random_page_offset(&mut rng, page_count, page_size);
			assert_eq!(offset % page_size, 0);
			assert!(offset < page_count * page_size);
		}
	}
}
