// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use reqlog_core::{LogPathProvider, PathDescriptor};
use reqlog_settings::{keys, ModuleSettings};
use std::path::PathBuf;

use crate::dir::request_log_dir;

/// Exposes the request log directory as a log source.
///
/// Active while request logging is switched on. The single directory path
/// carries the `{prefix}-*.log` pattern so only request log files are listed.
#[derive(Debug, Clone)]
pub struct RequestLogProvider {
	log_dir: PathBuf,
	settings: ModuleSettings,
}

impl RequestLogProvider {
	pub const ID: &'static str = "request_logs";

	pub fn new(log_dir: impl Into<PathBuf>, settings: ModuleSettings) -> Self {
		Self {
			log_dir: log_dir.into(),
			settings,
		}
	}
}

impl LogPathProvider for RequestLogProvider {
	fn provider_id(&self) -> &str {
		Self::ID
	}

	fn provider_name(&self) -> &str {
		"Request logs"
	}

	fn provider_description(&self) -> Option<&str> {
		Some("One file per request, named after its correlation id")
	}

	fn is_active(&self) -> bool {
		self
			.settings
			.bool_or(keys::REQUEST_LOGGER_ACTIVE, keys::DEFAULT_REQUEST_LOGGER_ACTIVE)
	}

	fn log_paths(&self) -> Vec<PathDescriptor> {
		let prefix = self
			.settings
			.string_or(keys::LOG_FILE_PREFIX, keys::DEFAULT_LOG_FILE_PREFIX);

		vec![PathDescriptor::directory(request_log_dir(&self.log_dir, &self.settings))
			.with_name(self.provider_name())
			.with_pattern(format!("{prefix}-*.log"))]
	}
}
