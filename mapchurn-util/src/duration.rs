//! Duration helpers

// Imports
use std::time::Duration;

/// Extension trait for [`Duration`] to format in fractional milliseconds
#[extend::ext(name = DurationExt)]
pub impl Duration {
	/// Returns this duration as fractional milliseconds.
	fn as_millis_f64(&self) -> f64 {
		self.as_secs_f64() * 1000.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn as_millis_f64() {
		assert_eq!(Duration::ZERO.as_millis_f64(), 0.0);
		assert_eq!(Duration::from_millis(1500).as_millis_f64(), 1500.0);
		assert_eq!(Duration::from_micros(1500).as_millis_f64(), 1.5);
	}
}
