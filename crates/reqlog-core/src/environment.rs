// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Host facade: paths, request metadata and a leveled logger sink.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::level::LogLevel;

/// Leveled logging sink provided by the host.
pub trait HostLogger: Send + Sync {
	fn log(&self, level: LogLevel, message: &str);

	fn error(&self, message: &str) {
		self.log(LogLevel::Error, message);
	}

	fn warn(&self, message: &str) {
		self.log(LogLevel::Warn, message);
	}

	fn info(&self, message: &str) {
		self.log(LogLevel::Info, message);
	}

	fn debug(&self, message: &str) {
		self.log(LogLevel::Debug, message);
	}
}

/// [`HostLogger`] that forwards to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl HostLogger for TracingLogger {
	fn log(&self, level: LogLevel, message: &str) {
		match level {
			LogLevel::Trace => tracing::trace!(target: "reqlog::host", "{message}"),
			LogLevel::Debug => tracing::debug!(target: "reqlog::host", "{message}"),
			LogLevel::Info => tracing::info!(target: "reqlog::host", "{message}"),
			LogLevel::Warn => tracing::warn!(target: "reqlog::host", "{message}"),
			LogLevel::Error => tracing::error!(target: "reqlog::host", "{message}"),
		}
	}
}

/// Read-only view of the shop installation.
pub trait ShopEnvironment: Send + Sync {
	/// Base directory for log files.
	fn log_dir(&self) -> &Path;

	/// Whether the current request is served in the admin context.
	fn is_admin(&self) -> bool;

	fn logger(&self) -> &dyn HostLogger;
}

/// A fixed [`ShopEnvironment`], built from configuration.
#[derive(Clone)]
pub struct StaticEnvironment {
	log_dir: PathBuf,
	admin: bool,
	logger: Arc<dyn HostLogger>,
}

impl StaticEnvironment {
	pub fn new(log_dir: impl Into<PathBuf>) -> Self {
		Self {
			log_dir: log_dir.into(),
			admin: false,
			logger: Arc::new(TracingLogger),
		}
	}

	pub fn with_admin(mut self, admin: bool) -> Self {
		self.admin = admin;
		self
	}

	pub fn with_logger(mut self, logger: Arc<dyn HostLogger>) -> Self {
		self.logger = logger;
		self
	}
}

impl std::fmt::Debug for StaticEnvironment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StaticEnvironment")
			.field("log_dir", &self.log_dir)
			.field("admin", &self.admin)
			.finish_non_exhaustive()
	}
}

impl ShopEnvironment for StaticEnvironment {
	fn log_dir(&self) -> &Path {
		&self.log_dir
	}

	fn is_admin(&self) -> bool {
		self.admin
	}

	fn logger(&self) -> &dyn HostLogger {
		self.logger.as_ref()
	}
}
