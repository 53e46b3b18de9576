// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use http::{HeaderMap, HeaderName};
use reqlog_settings::{keys, ModuleSettings};
use tracing::{debug, warn};

use crate::emitter::{CookieEmitter, HeaderEmitter, IdEmitter};
use crate::generator::{IdGenerator, RandomIdGenerator};
use crate::resolver::{CookieResolver, HeaderResolver, IdResolver};

/// Lowercase form of [`keys::DEFAULT_CORRELATION_HEADER_NAME`].
const DEFAULT_HEADER: &str = "x-correlation-id";

/// Resolve, generate if needed, then emit. One pass per request.
pub struct CorrelationIdPipeline {
	generator: Box<dyn IdGenerator>,
	resolvers: Vec<Box<dyn IdResolver>>,
	emitters: Vec<Box<dyn IdEmitter>>,
}

impl CorrelationIdPipeline {
	/// A pipeline with no resolvers or emitters.
	pub fn new(generator: Box<dyn IdGenerator>) -> Self {
		Self {
			generator,
			resolvers: Vec::new(),
			emitters: Vec::new(),
		}
	}

	pub fn with_resolver(mut self, resolver: Box<dyn IdResolver>) -> Self {
		self.resolvers.push(resolver);
		self
	}

	pub fn with_emitter(mut self, emitter: Box<dyn IdEmitter>) -> Self {
		self.emitters.push(emitter);
		self
	}

	/// Cookie then header resolution, cookie and header emission, using the
	/// configured names. An invalid header name falls back to the default.
	pub fn from_settings(settings: &ModuleSettings) -> Self {
		let cookie_name = settings.string_or(
			keys::CORRELATION_COOKIE_NAME,
			keys::DEFAULT_CORRELATION_COOKIE_NAME,
		);
		let header_name = settings.string_or(
			keys::CORRELATION_HEADER_NAME,
			keys::DEFAULT_CORRELATION_HEADER_NAME,
		);

		let header = HeaderName::from_bytes(header_name.as_bytes()).unwrap_or_else(|e| {
			warn!(header = %header_name, error = %e, "invalid correlation header name, using default");
			HeaderName::from_static(DEFAULT_HEADER)
		});

		Self::standard(cookie_name, header)
	}

	fn standard(cookie_name: String, header: HeaderName) -> Self {
		Self::new(Box::new(RandomIdGenerator))
			.with_resolver(Box::new(CookieResolver::new(cookie_name.clone())))
			.with_resolver(Box::new(HeaderResolver::from_header_name(header.clone())))
			.with_emitter(Box::new(CookieEmitter::new(cookie_name)))
			.with_emitter(Box::new(HeaderEmitter::from_header_name(header)))
	}

	/// First non-empty id offered by the resolver chain.
	pub fn resolve(&self, request: &HeaderMap) -> Option<String> {
		self.resolvers.iter().find_map(|resolver| {
			let id = resolver.resolve(request)?;
			debug!(resolver = resolver.name(), "correlation id resolved");
			Some(id)
		})
	}

	/// Resolve or generate the request's id and emit it on `response`.
	///
	/// The id is emitted even when it was resolved. The returned value is not
	/// sanitized; pass it through [`crate::sanitize_file_component`] before
	/// using it in a path.
	pub fn process(&self, request: &HeaderMap, response: &mut HeaderMap, secure: bool) -> String {
		let id = self.resolve(request).unwrap_or_else(|| {
			let id = self.generator.generate();
			debug!("correlation id generated");
			id
		});

		for emitter in &self.emitters {
			emitter.emit(&id, response, secure);
		}

		id
	}
}

impl Default for CorrelationIdPipeline {
	fn default() -> Self {
		Self::standard(
			keys::DEFAULT_CORRELATION_COOKIE_NAME.to_string(),
			HeaderName::from_static(DEFAULT_HEADER),
		)
	}
}

impl std::fmt::Debug for CorrelationIdPipeline {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CorrelationIdPipeline")
			.field(
				"resolvers",
				&self.resolvers.iter().map(|r| r.name()).collect::<Vec<_>>(),
			)
			.field(
				"emitters",
				&self.emitters.iter().map(|e| e.name()).collect::<Vec<_>>(),
			)
			.finish_non_exhaustive()
	}
}
