// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use reqlog_core::{LogLevel, ShopEnvironment};
use reqlog_correlation::sanitize_file_component;
use reqlog_settings::{keys, ModuleSettings};
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::dir::{ensure_log_dir, request_log_dir};
use crate::entry::LogEntry;
use crate::error::LogWriteResult;

/// Appends JSON-lines entries for one request to its own file.
///
/// A writer that could not set up its file is disabled: every write is a
/// no-op and the failure has already been reported through the host logger.
#[derive(Debug)]
pub struct RequestLogWriter {
	correlation_id: String,
	min_level: LogLevel,
	path: Option<PathBuf>,
	file: Option<File>,
}

impl RequestLogWriter {
	/// Open `{log_dir}/{log_subdirectory}/{prefix}-{id}.log` for appending,
	/// creating the directory if needed. A subdirectory that would leave
	/// `log_dir` is replaced by the default one.
	pub fn open(env: &dyn ShopEnvironment, settings: &ModuleSettings, correlation_id: &str) -> Self {
		let min_level = LogLevel::parse_or_default(
			&settings.string_or(keys::LOG_LEVEL, keys::DEFAULT_LOG_LEVEL),
		);
		let dir = request_log_dir(env.log_dir(), settings);

		if let Err(e) = ensure_log_dir(&dir) {
			let message = format!("could not create request log directory {}: {e}", dir.display());
			env.logger().error(&message);
			error!(dir = %dir.display(), error = %e, "request logging disabled");
			return Self::disabled(correlation_id);
		}

		let path = dir.join(file_name(
			&settings.string_or(keys::LOG_FILE_PREFIX, keys::DEFAULT_LOG_FILE_PREFIX),
			correlation_id,
		));

		match OpenOptions::new().create(true).append(true).open(&path) {
			Ok(file) => {
				debug!(path = %path.display(), "request log opened");
				Self {
					correlation_id: correlation_id.to_string(),
					min_level,
					path: Some(path),
					file: Some(file),
				}
			}
			Err(e) => {
				let message = format!("could not open request log {}: {e}", path.display());
				env.logger().error(&message);
				error!(path = %path.display(), error = %e, "request logging disabled");
				Self::disabled(correlation_id)
			}
		}
	}

	/// A writer that discards everything.
	pub fn disabled(correlation_id: &str) -> Self {
		Self {
			correlation_id: correlation_id.to_string(),
			min_level: LogLevel::default(),
			path: None,
			file: None,
		}
	}

	pub fn correlation_id(&self) -> &str {
		&self.correlation_id
	}

	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	pub fn is_enabled(&self) -> bool {
		self.file.is_some()
	}

	pub fn min_level(&self) -> LogLevel {
		self.min_level
	}

	/// Write an entry at `level` unless it is below the configured minimum.
	pub fn log(
		&mut self,
		level: LogLevel,
		message: &str,
		context: Map<String, Value>,
	) -> LogWriteResult<()> {
		if level < self.min_level {
			return Ok(());
		}
		self.write(LogEntry::new(level, message, context))
	}

	/// Write `entry` as is, apart from the correlation id.
	pub fn write(&mut self, entry: LogEntry) -> LogWriteResult<()> {
		let Some(file) = self.file.as_mut() else {
			return Ok(());
		};
		let line = entry.with_correlation_id(&self.correlation_id).to_json_line()?;
		file.write_all(line.as_bytes())?;
		file.flush()?;
		Ok(())
	}
}

/// `{prefix}-{id}.log` with both parts made safe for a file name. A prefix
/// with nothing usable in it falls back to the default prefix.
fn file_name(prefix: &str, correlation_id: &str) -> String {
	let usable = prefix
		.chars()
		.any(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
	let prefix = if usable {
		sanitize_file_component(prefix)
	} else {
		keys::DEFAULT_LOG_FILE_PREFIX.to_string()
	};
	format!("{prefix}-{}.log", sanitize_file_component(correlation_id))
}
