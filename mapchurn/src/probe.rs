//! Process liveness probe and busy loop

// Imports
use {
	nix::{errno::Errno, sys::stat},
	std::{
		path::{Path, PathBuf},
		thread,
		time::{Duration, Instant},
	},
};

/// Liveness probe against a process's `/proc` mapping metadata.
///
/// The probe only checks existence of `/proc/<pid>/smaps`, it never
/// reads the file. Its disappearance signals process exit.
#[derive(Clone, Debug)]
pub struct ProcProbe {
	/// Probed path
	path: PathBuf,
}

impl ProcProbe {
	/// Creates a probe for `pid`
	pub fn new(pid: u32) -> Self {
		Self {
			path: PathBuf::from(format!("/proc/{pid}/smaps")),
		}
	}

	/// Returns the probed path
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Returns whether the target process still exists.
	///
	/// `ENOENT` means the target is gone. Any other probe failure is
	/// returned to the caller, these probes have no business failing
	/// otherwise.
	pub fn target_alive(&self) -> Result<bool, Errno> {
		match stat::stat(self.path.as_path()) {
			Ok(_) => Ok(true),
			Err(Errno::ENOENT) => Ok(false),
			Err(errno) => Err(errno),
		}
	}
}

/// Busy/probe loop.
///
/// Spins issuing back-to-back liveness probes for each busy period,
/// resting briefly in between. With no busy period configured the loop
/// never rests.
#[derive(Clone, Debug)]
pub struct BusyLoop {
	/// Target probe
	probe: ProcProbe,

	/// Length of each busy period, `None` to spin without resting
	busy_period: Option<Duration>,

	/// Rest between busy periods
	rest: Duration,
}

impl BusyLoop {
	/// Default rest between busy periods
	pub const DEFAULT_REST: Duration = Duration::from_millis(1);

	/// Creates a busy loop probing `probe`
	pub fn new(probe: ProcProbe, busy_period: Option<Duration>) -> Self {
		Self {
			probe,
			busy_period,
			rest: Self::DEFAULT_REST,
		}
	}

	/// Spins probing the target until it disappears, then returns.
	pub fn run(&self) -> Result<(), Errno> {
		loop {
			let period_end = self.busy_period.map(|period| Instant::now() + period);
			loop {
				if !self.probe.target_alive()? {
					return Ok(());
				}
				match period_end {
					Some(end) if Instant::now() >= end => break,
					_ => (),
				}
			}
			thread::sleep(self.rest);
		}
	}
}

#[cfg(test)]
mod tests {
	use {
		super::*,
		std::process::{self, Command},
	};

	#[test]
	fn own_process_is_alive() {
		let probe = ProcProbe::new(process::id());
		assert_eq!(probe.target_alive(), Ok(true));
	}

	#[test]
	fn unused_pid_is_gone() {
		// Maximum pid on linux is well below `u32::MAX`
		let probe = ProcProbe::new(u32::MAX);
		assert_eq!(probe.target_alive(), Ok(false));
	}

	#[test]
	fn exits_when_target_disappears() {
		let mut child = Command::new("true").spawn().expect("Unable to spawn child");
		let pid = child.id();

		// Reap the child in the background so its `/proc` entry goes away
		let reaper = thread::spawn(move || child.wait().expect("Unable to wait for child"));

		let busy_loop = BusyLoop::new(ProcProbe::new(pid), Some(Duration::from_millis(10)));
		busy_loop.run().expect("Unable to run busy loop");

		let status = reaper.join().expect("Reaper thread panicked");
		assert!(status.success());
	}
}
