// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Setting names and their defaults.

/// Module id under which all reqlog settings are stored.
pub const MODULE_ID: &str = "reqlog";

/// bool: whether request start/finish entries are written.
pub const REQUEST_LOGGER_ACTIVE: &str = "request_logger_active";
pub const DEFAULT_REQUEST_LOGGER_ACTIVE: bool = true;

/// string: minimum level written to request log files.
pub const LOG_LEVEL: &str = "log_level";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// string: file name prefix, `{prefix}-{correlation-id}.log`.
pub const LOG_FILE_PREFIX: &str = "log_file_prefix";
pub const DEFAULT_LOG_FILE_PREFIX: &str = "request";

/// string: subdirectory of the shop log directory holding request logs.
pub const LOG_SUBDIRECTORY: &str = "log_subdirectory";
pub const DEFAULT_LOG_SUBDIRECTORY: &str = "reqlog";

/// bool: replace every parameter value except routing parameters.
pub const REDACT_ALL_VALUES: &str = "redact_all_values";
pub const DEFAULT_REDACT_ALL_VALUES: bool = false;

/// collection of strings: parameter names redacted in blocklist mode.
pub const REDACTION_BLOCKLIST: &str = "redaction_blocklist";

/// collection of records: `{path, type, name?, description?, pattern?}`.
pub const STATIC_PATHS: &str = "static_paths";

/// collection of strings: source ids exposed for remote inspection.
pub const ENABLED_SOURCES: &str = "enabled_sources";

/// string: cookie carrying the correlation id.
pub const CORRELATION_COOKIE_NAME: &str = "correlation_cookie_name";
pub const DEFAULT_CORRELATION_COOKIE_NAME: &str = "reqlog_correlation_id";

/// string: header carrying the correlation id.
pub const CORRELATION_HEADER_NAME: &str = "correlation_header_name";
pub const DEFAULT_CORRELATION_HEADER_NAME: &str = "X-Correlation-Id";
