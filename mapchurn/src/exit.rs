//! Exit codes.
//!
//! Both tools exit with 0 on success, with `EINVAL` on usage errors
//! and with the failing syscall's errno on fatal failures. Anything
//! without an underlying errno, such as a remap address mismatch,
//! exits with 1.

// Imports
use {nix::errno::Errno, std::process::ExitCode};

/// Reports an argument-parsing error and returns the exit code for it.
///
/// Help and version output aren't usage errors and exit successfully.
pub fn usage(err: clap::Error) -> ExitCode {
	let _ = err.print();
	match err.kind() {
		clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => ExitCode::SUCCESS,
		_ => ExitCode::from(Errno::EINVAL as u8),
	}
}

/// Returns the exit code for a fatal error
pub fn fatal(err: &anyhow::Error) -> ExitCode {
	ExitCode::from(self::fatal_code(err))
}

/// Returns the numeric exit code for a fatal error
fn fatal_code(err: &anyhow::Error) -> u8 {
	match err.downcast_ref::<Errno>() {
		Some(&errno) => errno as u8,
		None => 1,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fatal_extracts_errno() {
		let err = anyhow::Error::new(Errno::ENOMEM).context("Unable to reserve region");
		assert_eq!(self::fatal_code(&err), Errno::ENOMEM as u8);
	}

	#[test]
	fn fatal_without_errno_is_one() {
		let err = anyhow::anyhow!("Remap address mismatch");
		assert_eq!(self::fatal_code(&err), 1);
	}
}
