// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use thiserror::Error;

pub type LogWriteResult<T> = Result<T, LogWriteError>;

#[derive(Error, Debug)]
pub enum LogWriteError {
	#[error("failed to write request log: {0}")]
	Io(#[from] std::io::Error),

	#[error("failed to serialize log entry: {0}")]
	Serialize(#[from] serde_json::Error),
}
