// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Bounded access to log files.
//!
//! [`LogFileReader`] reads the tail of a file by seeking from the end, reads
//! whole files up to a byte limit, and lists directories newest first.

mod error;
mod listing;
mod reader;
mod tail;

pub use error::{ReaderError, ReaderResult};
pub use listing::{FileEntry, FileInfo, MAX_LISTED_FILES};
pub use reader::{LogFileReader, DEFAULT_MAX_BYTES, DEFAULT_TAIL_LINES, TRUNCATION_MARKER};
