//! Logger

// Imports
use {
	std::{fs, io, path::Path, sync::Arc},
	tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter},
};

/// Pre-initialization logging.
///
/// Messages emitted before [`init`] are buffered and flushed
/// once the subscriber is installed.
pub mod pre_init {
	// Imports
	use std::sync::Mutex;

	/// Buffered messages
	static MESSAGES: Mutex<Vec<String>> = Mutex::new(Vec::new());

	/// Buffers a debug message to be emitted once the logger is initialized
	pub fn debug(msg: impl Into<String>) {
		let mut messages = MESSAGES.lock().expect("Poisoned");
		messages.push(msg.into());
	}

	/// Drains all buffered messages
	pub(super) fn drain() -> Vec<String> {
		let mut messages = MESSAGES.lock().expect("Poisoned");
		std::mem::take(&mut *messages)
	}
}

/// Initializes the logger.
///
/// Logs to stderr, filtered by `RUST_LOG` (`info` by default).
/// If `log_file` is given, additionally logs to it, filtered by `RUST_LOG_FILE`.
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	let stderr_layer = tracing_subscriber::fmt::layer()
		.with_writer(io::stderr)
		.with_filter(
			EnvFilter::builder()
				.with_default_directive(LevelFilter::INFO.into())
				.from_env_lossy(),
		);

	let file_layer = log_file.and_then(|path| {
		let mut options = fs::OpenOptions::new();
		options.create(true);
		match log_file_append {
			true => options.append(true),
			false => options.write(true).truncate(true),
		};
		let file = match options.open(path) {
			Ok(file) => file,
			Err(err) => {
				eprintln!("Unable to open log file {path:?}: {err}");
				return None;
			},
		};

		let layer = tracing_subscriber::fmt::layer()
			.with_ansi(false)
			.with_writer(Arc::new(file))
			.with_filter(
				EnvFilter::builder()
					.with_env_var("RUST_LOG_FILE")
					.with_default_directive(LevelFilter::DEBUG.into())
					.from_env_lossy(),
			);
		Some(layer)
	});

	tracing_subscriber::registry()
		.with(stderr_layer)
		.with(file_layer)
		.init();

	// Then flush anything emitted before we were initialized
	for msg in pre_init::drain() {
		tracing::debug!("{msg}");
	}
}
