// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use http::header::{FORWARDED, REFERER, USER_AGENT};
use http::uri::Scheme;
use http::HeaderMap;
use serde_json::{Map, Value};

/// What the request logger needs to know about an inbound request.
#[derive(Debug, Clone, Default)]
pub struct RequestInfo {
	pub method: String,
	pub uri: String,
	pub headers: HeaderMap,
	/// Query and body parameters, before redaction.
	pub params: Map<String, Value>,
	/// Whether the request arrived over HTTPS, directly or behind a
	/// TLS-terminating proxy.
	pub secure: bool,
}

impl RequestInfo {
	pub fn from_http<T>(request: &http::Request<T>, params: Map<String, Value>) -> Self {
		let uri = request.uri();
		let headers = request.headers();
		Self {
			method: request.method().to_string(),
			uri: uri.to_string(),
			headers: headers.clone(),
			params,
			secure: uri.scheme() == Some(&Scheme::HTTPS) || forwarded_https(headers),
		}
	}

	/// Override transport detection when the host knows the connection
	/// state better than the request does.
	pub fn with_secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}

	pub fn referer(&self) -> Option<&str> {
		self.header(REFERER.as_str())
	}

	pub fn user_agent(&self) -> Option<&str> {
		self.header(USER_AGENT.as_str())
	}

	fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}
}

/// `X-Forwarded-Proto: https` (first hop) or `Forwarded: proto=https`.
fn forwarded_https(headers: &HeaderMap) -> bool {
	let is_https = |proto: &str| proto.trim().trim_matches('"').eq_ignore_ascii_case("https");

	let x_forwarded = headers
		.get("x-forwarded-proto")
		.and_then(|v| v.to_str().ok())
		.and_then(|v| v.split(',').next())
		.is_some_and(is_https);
	if x_forwarded {
		return true;
	}

	headers
		.get(FORWARDED)
		.and_then(|v| v.to_str().ok())
		.and_then(|v| v.split(',').next())
		.is_some_and(|element| {
			element.split(';').any(|pair| {
				pair
					.split_once('=')
					.is_some_and(|(name, value)| name.trim().eq_ignore_ascii_case("proto") && is_https(value))
			})
		})
}
