// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::sync::Arc;
use std::time::Instant;

use http::HeaderMap;
use reqlog_core::{LogLevel, ShopEnvironment};
use reqlog_correlation::CorrelationIdPipeline;
use reqlog_redact::{redact_url, SensitiveDataRedactor};
use reqlog_settings::{keys, ModuleSettings};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::request::RequestInfo;
use crate::writer::RequestLogWriter;

/// Message of the entry written when a request starts.
pub const REQUEST_START: &str = "request.start";

/// Message of the entry written when a request finishes.
pub const REQUEST_FINISH: &str = "request.finish";

/// Starts a [`RequestLogSession`] per request.
pub struct RequestLogger {
	env: Arc<dyn ShopEnvironment>,
	settings: ModuleSettings,
	pipeline: CorrelationIdPipeline,
	redactor: SensitiveDataRedactor,
}

impl RequestLogger {
	pub fn new(
		env: Arc<dyn ShopEnvironment>,
		settings: ModuleSettings,
		pipeline: CorrelationIdPipeline,
		redactor: SensitiveDataRedactor,
	) -> Self {
		Self {
			env,
			settings,
			pipeline,
			redactor,
		}
	}

	/// Correlation and redaction both configured from `settings`.
	pub fn from_settings(env: Arc<dyn ShopEnvironment>, settings: ModuleSettings) -> Self {
		let pipeline = CorrelationIdPipeline::from_settings(&settings);
		let redactor = SensitiveDataRedactor::from_settings(&settings);
		Self::new(env, settings, pipeline, redactor)
	}

	pub fn is_active(&self) -> bool {
		self
			.settings
			.bool_or(keys::REQUEST_LOGGER_ACTIVE, keys::DEFAULT_REQUEST_LOGGER_ACTIVE)
	}

	/// Resolve the request's correlation id, emit it on `response`, and write
	/// the start entry.
	///
	/// When the logger is inactive the id is still resolved and emitted, but
	/// nothing is written.
	pub fn begin(&self, request: &RequestInfo, response: &mut HeaderMap) -> RequestLogSession {
		let correlation_id = self
			.pipeline
			.process(&request.headers, response, request.secure);

		let writer = if self.is_active() {
			RequestLogWriter::open(self.env.as_ref(), &self.settings, &correlation_id)
		} else {
			RequestLogWriter::disabled(&correlation_id)
		};

		let mut session = RequestLogSession {
			writer,
			started: Instant::now(),
		};
		session.log(LogLevel::Info, REQUEST_START, self.start_context(request));
		session
	}

	fn start_context(&self, request: &RequestInfo) -> Map<String, Value> {
		let mut context = Map::new();
		context.insert("method".into(), json!(request.method));
		context.insert("uri".into(), json!(redact_url(Some(request.uri.as_str()))));
		context.insert("referer".into(), json!(redact_url(request.referer())));
		context.insert("user_agent".into(), json!(request.user_agent()));
		context.insert("admin".into(), json!(self.env.is_admin()));
		context.insert(
			"params".into(),
			Value::Object(self.redactor.redact(&request.params)),
		);
		context
	}
}

impl std::fmt::Debug for RequestLogger {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RequestLogger")
			.field("pipeline", &self.pipeline)
			.field("redactor", &self.redactor)
			.finish_non_exhaustive()
	}
}

/// Logging for one in-flight request.
///
/// Write failures are reported through `tracing` and never reach the caller.
#[derive(Debug)]
pub struct RequestLogSession {
	writer: RequestLogWriter,
	started: Instant,
}

impl RequestLogSession {
	pub fn correlation_id(&self) -> &str {
		self.writer.correlation_id()
	}

	pub fn writer(&self) -> &RequestLogWriter {
		&self.writer
	}

	pub fn log(&mut self, level: LogLevel, message: &str, context: Map<String, Value>) {
		if let Err(e) = self.writer.log(level, message, context) {
			warn!(
				correlation_id = %self.writer.correlation_id(),
				error = %e,
				"request log entry dropped"
			);
		}
	}

	/// Write the finish entry with the response status and elapsed time.
	pub fn finish(mut self, status: u16) {
		let duration_ms = self.started.elapsed().as_millis() as u64;
		let mut context = Map::new();
		context.insert("status".into(), json!(status));
		context.insert("duration_ms".into(), json!(duration_ms));
		self.log(LogLevel::Info, REQUEST_FINISH, context);
	}
}
