// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request log files.
//!
//! This crate provides:
//! - [`LogEntry`] - one JSON line with timestamp, level, message and context
//! - [`RequestLogWriter`] - appends entries to `{prefix}-{id}.log` under the
//!   shop log directory, tagging each with the request's correlation id
//! - [`RequestLogger`] / [`RequestLogSession`] - start and finish entries for
//!   one request, with redacted parameters and URLs
//! - [`RequestLogProvider`] - the request log directory as a log source
//!
//! # Usage
//!
//! ```ignore
//! use reqlog_logs::{RequestInfo, RequestLogger};
//!
//! let logger = RequestLogger::from_settings(env, settings);
//! let mut session = logger.begin(&RequestInfo::from_http(&request, params), &mut response_headers);
//! session.log(LogLevel::Info, "basket updated", Map::new());
//! session.finish(200);
//! ```

mod dir;
mod entry;
mod error;
mod logger;
mod provider;
mod request;
mod writer;

pub use dir::{ensure_log_dir, is_contained_subdirectory, request_log_dir};
pub use entry::{LogEntry, CORRELATION_ID_KEY};
pub use error::{LogWriteError, LogWriteResult};
pub use logger::{RequestLogSession, RequestLogger, REQUEST_FINISH, REQUEST_START};
pub use provider::RequestLogProvider;
pub use request::RequestInfo;
pub use writer::RequestLogWriter;
