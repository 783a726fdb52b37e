//! Utilities

// Modules
pub mod duration;
pub mod logger;

// Exports
pub use duration::DurationExt;
