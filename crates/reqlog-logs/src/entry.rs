// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use reqlog_core::LogLevel;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Context key carrying the request's correlation id.
pub const CORRELATION_ID_KEY: &str = "correlationId";

/// A single line of a request log file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
	pub timestamp: DateTime<Utc>,
	pub level: LogLevel,
	pub message: String,
	#[serde(default)]
	pub context: Map<String, Value>,
}

impl LogEntry {
	pub fn new(level: LogLevel, message: impl Into<String>, context: Map<String, Value>) -> Self {
		Self {
			timestamp: Utc::now(),
			level,
			message: message.into(),
			context,
		}
	}

	/// Tag the entry with `id`, replacing any existing value.
	pub fn with_correlation_id(mut self, id: &str) -> Self {
		self
			.context
			.insert(CORRELATION_ID_KEY.to_string(), Value::String(id.to_string()));
		self
	}

	pub fn correlation_id(&self) -> Option<&str> {
		self.context.get(CORRELATION_ID_KEY).and_then(Value::as_str)
	}

	/// Compact JSON followed by a newline.
	pub fn to_json_line(&self) -> serde_json::Result<String> {
		let mut line = serde_json::to_string(self)?;
		line.push('\n');
		Ok(line)
	}
}
