// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Directory listing and file metadata.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use glob::{MatchOptions, Pattern};
use serde::Serialize;

use crate::error::{ReaderError, ReaderResult};

/// Maximum number of entries returned by a listing.
pub const MAX_LISTED_FILES: usize = 1000;

const MATCH_ALL: &str = "*";

/// One regular file in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
	pub name: String,
	pub path: PathBuf,
	pub size: u64,
	/// Modification time, seconds since the Unix epoch.
	pub modified: i64,
}

/// Metadata for a single path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
	pub name: String,
	pub path: PathBuf,
	pub size: u64,
	pub modified: i64,
	pub readable: bool,
}

pub(crate) fn modified_secs(metadata: &fs::Metadata) -> i64 {
	metadata
		.modified()
		.map(|t| DateTime::<Utc>::from(t).timestamp())
		.unwrap_or(0)
}

fn file_name(path: &Path) -> String {
	path
		.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.unwrap_or_default()
}

fn compile(pattern: &str) -> ReaderResult<Pattern> {
	Pattern::new(pattern).map_err(|e| ReaderError::InvalidPattern {
		pattern: pattern.to_string(),
		message: e.to_string(),
	})
}

pub(crate) fn list_files(directory: &Path, pattern: Option<&str>) -> ReaderResult<Vec<FileEntry>> {
	let not_found = || ReaderError::NotFound(directory.to_path_buf());

	let metadata = fs::metadata(directory).map_err(|_| not_found())?;
	if !metadata.is_dir() {
		return Err(not_found());
	}

	let matcher = compile(pattern.unwrap_or(MATCH_ALL))?;
	let options = MatchOptions {
		require_literal_leading_dot: true,
		..MatchOptions::new()
	};

	let mut entries: Vec<FileEntry> = fs::read_dir(directory)
		.map_err(|_| not_found())?
		.filter_map(Result::ok)
		.filter_map(|entry| {
			let name = entry.file_name().to_string_lossy().into_owned();
			if !matcher.matches_with(&name, options) {
				return None;
			}
			let path = entry.path();
			let metadata = fs::metadata(&path).ok()?;
			if !metadata.is_file() {
				return None;
			}
			Some(FileEntry {
				name,
				path,
				size: metadata.len(),
				modified: modified_secs(&metadata),
			})
		})
		.collect();

	entries.sort_by(|a, b| b.modified.cmp(&a.modified));
	entries.truncate(MAX_LISTED_FILES);

	tracing::debug!(
		directory = %directory.display(),
		count = entries.len(),
		"listed log directory"
	);

	Ok(entries)
}

pub(crate) fn file_info(path: &Path) -> ReaderResult<FileInfo> {
	let metadata = fs::metadata(path).map_err(|_| ReaderError::NotFound(path.to_path_buf()))?;
	let readable = if metadata.is_dir() {
		fs::read_dir(path).is_ok()
	} else {
		fs::File::open(path).is_ok()
	};

	Ok(FileInfo {
		name: file_name(path),
		path: path.to_path_buf(),
		size: metadata.len(),
		modified: modified_secs(&metadata),
		readable,
	})
}
