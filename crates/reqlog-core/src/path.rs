// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Filesystem locations watched by a log source.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Whether a descriptor points at a single file or a directory of files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
	File,
	Directory,
}

impl PathKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			PathKind::File => "file",
			PathKind::Directory => "directory",
		}
	}

	/// Parse the `type` field of a static path record. Matching is exact.
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"file" => Some(PathKind::File),
			"directory" => Some(PathKind::Directory),
			_ => None,
		}
	}
}

impl fmt::Display for PathKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Outcome of checking a descriptor against the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathValidation {
	#[serde(rename = "ok")]
	Ok,
	#[serde(rename = "PATH_NOT_FOUND")]
	PathNotFound,
	#[serde(rename = "NOT_READABLE")]
	NotReadable,
	#[serde(rename = "CANNOT_LIST_DIRECTORY")]
	CannotListDirectory,
}

impl PathValidation {
	pub fn as_str(&self) -> &'static str {
		match self {
			PathValidation::Ok => "ok",
			PathValidation::PathNotFound => "PATH_NOT_FOUND",
			PathValidation::NotReadable => "NOT_READABLE",
			PathValidation::CannotListDirectory => "CANNOT_LIST_DIRECTORY",
		}
	}

	pub fn is_ok(&self) -> bool {
		matches!(self, PathValidation::Ok)
	}
}

impl fmt::Display for PathValidation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One filesystem location to watch.
///
/// The kind is fixed at construction. Existence and readability are
/// computed on every call and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathDescriptor {
	path: PathBuf,
	kind: PathKind,
	name: String,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pattern: Option<String>,
}

impl PathDescriptor {
	/// Create a descriptor whose display name is the basename of `path`.
	pub fn new(path: impl Into<PathBuf>, kind: PathKind) -> Self {
		let path = path.into();
		let name = basename(&path);
		Self {
			path,
			kind,
			name,
			description: None,
			pattern: None,
		}
	}

	pub fn file(path: impl Into<PathBuf>) -> Self {
		Self::new(path, PathKind::File)
	}

	pub fn directory(path: impl Into<PathBuf>) -> Self {
		Self::new(path, PathKind::Directory)
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Set the glob pattern used when listing a directory. Ignored for files.
	pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
		if self.kind == PathKind::Directory {
			self.pattern = Some(pattern.into());
		}
		self
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn kind(&self) -> PathKind {
		self.kind
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	pub fn pattern(&self) -> Option<&str> {
		self.pattern.as_deref()
	}

	pub fn is_file(&self) -> bool {
		self.kind == PathKind::File
	}

	pub fn is_directory(&self) -> bool {
		self.kind == PathKind::Directory
	}

	pub fn exists(&self) -> bool {
		self.path.exists()
	}

	pub fn is_readable(&self) -> bool {
		match self.kind {
			PathKind::File => fs::File::open(&self.path).is_ok(),
			PathKind::Directory => fs::read_dir(&self.path).is_ok(),
		}
	}

	/// Check the descriptor against the filesystem right now.
	pub fn validate(&self) -> PathValidation {
		let metadata = match fs::metadata(&self.path) {
			Ok(metadata) => metadata,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return PathValidation::PathNotFound
			}
			Err(_) => return PathValidation::NotReadable,
		};

		match self.kind {
			PathKind::File => {
				if !metadata.is_file() || fs::File::open(&self.path).is_err() {
					return PathValidation::NotReadable;
				}
			}
			PathKind::Directory => {
				if !metadata.is_dir() {
					return PathValidation::NotReadable;
				}
				if fs::read_dir(&self.path).is_err() {
					return PathValidation::CannotListDirectory;
				}
			}
		}

		PathValidation::Ok
	}
}

fn basename(path: &Path) -> String {
	path
		.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.unwrap_or_else(|| path.to_string_lossy().into_owned())
}
