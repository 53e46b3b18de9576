// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Backwards newline scan used by `tail`.

use std::io::{self, Read, Seek, SeekFrom};

/// Bytes read per backwards step.
pub(crate) const CHUNK_SIZE: usize = 8 * 1024;

/// Find the byte offset where the last `lines` lines of a `len`-byte stream
/// begin.
///
/// A newline as the very last byte terminates the final line and does not
/// start an empty one. Only `chunk_size` bytes are held in memory at a time.
pub(crate) fn tail_start<R: Read + Seek>(
	reader: &mut R,
	len: u64,
	lines: usize,
	chunk_size: usize,
) -> io::Result<u64> {
	if lines == 0 || len == 0 {
		return Ok(len);
	}

	let chunk_size = chunk_size.max(1);
	let mut buf = vec![0u8; chunk_size];
	let mut remaining = lines;
	let mut pos = len;

	while pos > 0 {
		let read_len = (chunk_size as u64).min(pos) as usize;
		pos -= read_len as u64;

		reader.seek(SeekFrom::Start(pos))?;
		let chunk = &mut buf[..read_len];
		reader.read_exact(chunk)?;

		for (i, byte) in chunk.iter().enumerate().rev() {
			let offset = pos + i as u64;
			if *byte != b'\n' || offset == len - 1 {
				continue;
			}
			remaining -= 1;
			if remaining == 0 {
				return Ok(offset + 1);
			}
		}
	}

	Ok(0)
}

/// Read everything from `start` to the end of the stream.
pub(crate) fn read_from<R: Read + Seek>(reader: &mut R, start: u64, len: u64) -> io::Result<Vec<u8>> {
	reader.seek(SeekFrom::Start(start))?;
	let mut out = Vec::with_capacity(len.saturating_sub(start) as usize);
	reader.take(len.saturating_sub(start)).read_to_end(&mut out)?;
	Ok(out)
}
