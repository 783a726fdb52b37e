//! Latency statistics

// Imports
use std::time::Duration;

/// Running latency aggregates.
///
/// Samples are folded in as they arrive and then discarded, only the
/// maximum, the total and the count are kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct LatencyStats {
	/// Maximum sample
	max: Duration,

	/// Sum of all samples
	total: Duration,

	/// Number of samples
	count: u64,
}

impl LatencyStats {
	/// Creates empty stats
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a single sample
	pub fn record(&mut self, sample: Duration) {
		self.max = self.max.max(sample);
		self.total += sample;
		self.count += 1;
	}

	/// Returns the maximum recorded sample
	pub fn max(&self) -> Duration {
		self.max
	}

	/// Returns the number of recorded samples
	pub fn count(&self) -> u64 {
		self.count
	}

	/// Returns the average across all samples, zero if none were recorded
	pub fn avg(&self) -> Duration {
		match self.count {
			0 => Duration::ZERO,
			count => Duration::from_secs_f64(self.total.as_secs_f64() / count as f64),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty() {
		let stats = LatencyStats::new();
		assert_eq!(stats.count(), 0);
		assert_eq!(stats.max(), Duration::ZERO);
		assert_eq!(stats.avg(), Duration::ZERO);
	}

	#[test]
	fn aggregates() {
		let mut stats = LatencyStats::new();
		stats.record(Duration::from_millis(1));
		stats.record(Duration::from_millis(5));
		stats.record(Duration::from_millis(3));

		assert_eq!(stats.count(), 3);
		assert_eq!(stats.max(), Duration::from_millis(5));
		assert_eq!(stats.avg(), Duration::from_millis(3));
	}
}
