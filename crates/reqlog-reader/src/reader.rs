// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ReaderError, ReaderResult};
use crate::listing::{self, FileEntry, FileInfo};
use crate::tail::{self, CHUNK_SIZE};

/// Default number of lines returned by [`LogFileReader::tail`].
pub const DEFAULT_TAIL_LINES: usize = 100;

/// Default byte limit for [`LogFileReader::read_file`] (1MB).
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;

/// Prefix added when `read_file` returns only the end of a file.
pub const TRUNCATION_MARKER: &str = "[...truncated...]\n";

/// Bounded, read-only access to log files.
#[derive(Debug, Clone)]
pub struct LogFileReader {
	chunk_size: usize,
}

impl LogFileReader {
	pub fn new() -> Self {
		Self {
			chunk_size: CHUNK_SIZE,
		}
	}

	/// Use a different backwards-scan chunk size for `tail`.
	pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
		self.chunk_size = chunk_size.max(1);
		self
	}

	/// Return the last `lines` lines of `path`, terminators included.
	///
	/// The file is scanned backwards in chunks; only the returned lines are
	/// held in memory. Bytes are returned as stored on disk.
	pub fn tail(&self, path: &Path, lines: usize) -> ReaderResult<Vec<u8>> {
		let (mut file, len) = open_regular_file(path)?;
		if len == 0 {
			return Ok(Vec::new());
		}

		let start = tail::tail_start(&mut file, len, lines, self.chunk_size)
			.map_err(|e| ReaderError::io(path, e))?;
		let bytes = tail::read_from(&mut file, start, len).map_err(|e| ReaderError::io(path, e))?;

		debug!(
			path = %path.display(),
			lines = lines,
			bytes_read = bytes.len(),
			"tailed log file"
		);

		Ok(bytes)
	}

	/// Return the whole file if it fits in `max_bytes`, otherwise
	/// [`TRUNCATION_MARKER`] followed by exactly the last `max_bytes` bytes,
	/// even when the cut lands inside a multibyte character.
	pub fn read_file(&self, path: &Path, max_bytes: u64) -> ReaderResult<Vec<u8>> {
		let (mut file, len) = open_regular_file(path)?;
		if len == 0 {
			return Ok(Vec::new());
		}

		if len <= max_bytes {
			let mut bytes = Vec::with_capacity(len as usize);
			file
				.read_to_end(&mut bytes)
				.map_err(|e| ReaderError::io(path, e))?;
			return Ok(bytes);
		}

		info!(
			path = %path.display(),
			file_size = len,
			max_bytes = max_bytes,
			"file truncated due to size limit"
		);

		file
			.seek(SeekFrom::Start(len - max_bytes))
			.map_err(|e| ReaderError::io(path, e))?;
		let mut bytes = Vec::with_capacity(TRUNCATION_MARKER.len() + max_bytes as usize);
		bytes.extend_from_slice(TRUNCATION_MARKER.as_bytes());
		file
			.take(max_bytes)
			.read_to_end(&mut bytes)
			.map_err(|e| ReaderError::io(path, e))?;
		Ok(bytes)
	}

	/// Regular files directly inside `directory` whose names match `pattern`
	/// (default `*`), newest first, at most [`crate::MAX_LISTED_FILES`].
	pub fn list_files(&self, directory: &Path, pattern: Option<&str>) -> ReaderResult<Vec<FileEntry>> {
		listing::list_files(directory, pattern)
	}

	pub fn get_file_info(&self, path: &Path) -> ReaderResult<FileInfo> {
		listing::file_info(path)
	}
}

impl Default for LogFileReader {
	fn default() -> Self {
		Self::new()
	}
}

fn open_regular_file(path: &Path) -> ReaderResult<(File, u64)> {
	let not_found = || ReaderError::NotFound(path.to_path_buf());

	let file = File::open(path).map_err(|_| not_found())?;
	let metadata = file.metadata().map_err(|_| not_found())?;
	if !metadata.is_file() {
		return Err(not_found());
	}
	Ok((file, metadata.len()))
}
