//! Memory-mapping churn tools.
//!
//! Small stress utilities for checking whether scans of a process's
//! `/proc` mapping metadata can interfere with concurrent mapping
//! operations: a mapper that churns pages of a reserved region while
//! timing each operation, and a busy-waiter that spins probing another
//! process's metadata.

// Modules
pub mod churn;
pub mod exit;
pub mod gate;
pub mod probe;
pub mod region;
pub mod stats;

// Exports
pub use self::{
	gate::Gate,
	probe::{BusyLoop, ProcProbe},
	region::Region,
	stats::LatencyStats,
};
