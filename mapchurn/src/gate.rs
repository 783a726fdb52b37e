//! Pre-run gate

// Imports
use std::{
	path::{Path, PathBuf},
	thread,
	time::Duration,
};

/// One-shot start gate.
///
/// Blocks until an externally managed path stops existing, so an
/// outside script can line up several cooperating processes before
/// releasing them at once. The path is only ever existence-tested,
/// never read.
#[derive(Clone, Debug)]
pub struct Gate {
	/// Gate file path
	path: PathBuf,

	/// Poll interval
	poll_interval: Duration,
}

impl Gate {
	/// Default poll interval
	pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

	/// Creates a gate on `path` with the default poll interval
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self::with_poll_interval(path, Self::DEFAULT_POLL_INTERVAL)
	}

	/// Creates a gate on `path` polling every `poll_interval`
	pub fn with_poll_interval(path: impl Into<PathBuf>, poll_interval: Duration) -> Self {
		Self {
			path: path.into(),
			poll_interval,
		}
	}

	/// Returns the gate file path
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Blocks until the gate file no longer exists.
	///
	/// Returns immediately if it never existed.
	pub fn wait(&self) {
		while self.path.exists() {
			tracing::debug!(path = ?self.path, "Waiting on gate file");
			thread::sleep(self.poll_interval);
		}
	}
}
