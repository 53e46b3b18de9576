// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use thiserror::Error;

pub type ReaderResult<T> = Result<T, ReaderError>;

#[derive(Error, Debug)]
pub enum ReaderError {
	/// Missing, unreadable, or not of the expected kind.
	#[error("path not found or not readable: {0}")]
	NotFound(PathBuf),

	#[error("invalid file pattern '{pattern}': {message}")]
	InvalidPattern { pattern: String, message: String },

	#[error("IO error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

impl ReaderError {
	pub fn is_not_found(&self) -> bool {
		matches!(self, ReaderError::NotFound(_))
	}

	pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
		ReaderError::Io {
			path: path.to_path_buf(),
			source,
		}
	}
}
