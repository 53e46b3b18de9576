// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use reqlog_settings::{keys, ModuleSettings};
use tracing::warn;

/// Directory request logs are written to: the configured subdirectory of
/// `log_dir`.
///
/// The subdirectory must be relative and must not climb out of `log_dir`;
/// anything else falls back to [`keys::DEFAULT_LOG_SUBDIRECTORY`].
pub fn request_log_dir(log_dir: &Path, settings: &ModuleSettings) -> PathBuf {
	let subdirectory = settings.string_or(keys::LOG_SUBDIRECTORY, keys::DEFAULT_LOG_SUBDIRECTORY);
	if is_contained_subdirectory(&subdirectory) {
		return log_dir.join(subdirectory);
	}

	warn!(
		subdirectory = %subdirectory,
		fallback = keys::DEFAULT_LOG_SUBDIRECTORY,
		"log subdirectory escapes the log directory, using default"
	);
	log_dir.join(keys::DEFAULT_LOG_SUBDIRECTORY)
}

/// True for a non-empty path made only of plain names, e.g. `reqlog` or
/// `shop/requests`.
pub fn is_contained_subdirectory(subdirectory: &str) -> bool {
	let path = Path::new(subdirectory);
	path.components().next().is_some()
		&& path
			.components()
			.all(|component| matches!(component, Component::Normal(_)))
}

/// Create `dir` (and parents) unless it already exists.
///
/// A failed create is re-checked: if another request created the directory
/// concurrently, that counts as success.
pub fn ensure_log_dir(dir: &Path) -> io::Result<()> {
	if dir.is_dir() {
		return Ok(());
	}

	match fs::create_dir_all(dir) {
		Ok(()) => Ok(()),
		Err(_) if dir.is_dir() => Ok(()),
		Err(e) => Err(e),
	}
}
