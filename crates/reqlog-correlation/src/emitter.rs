// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use http::header::{InvalidHeaderName, SET_COOKIE};
use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

/// Writes the correlation id onto an outbound response.
pub trait IdEmitter: Send + Sync {
	fn name(&self) -> &'static str;

	/// `secure` is true when the request arrived over HTTPS.
	fn emit(&self, id: &str, response: &mut HeaderMap, secure: bool);
}

/// Sets an `HttpOnly`, `SameSite=Lax` cookie on path `/`, `Secure` over HTTPS.
///
/// The id is percent-encoded so it can never add cookie attributes.
#[derive(Debug, Clone)]
pub struct CookieEmitter {
	cookie_name: String,
}

impl CookieEmitter {
	pub fn new(cookie_name: impl Into<String>) -> Self {
		Self {
			cookie_name: cookie_name.into(),
		}
	}

	fn cookie(&self, id: &str, secure: bool) -> String {
		let mut cookie = format!(
			"{}={}; Path=/; HttpOnly; SameSite=Lax",
			self.cookie_name,
			urlencoding::encode(id)
		);
		if secure {
			cookie.push_str("; Secure");
		}
		cookie
	}
}

impl IdEmitter for CookieEmitter {
	fn name(&self) -> &'static str {
		"cookie"
	}

	fn emit(&self, id: &str, response: &mut HeaderMap, secure: bool) {
		match HeaderValue::from_str(&self.cookie(id, secure)) {
			Ok(value) => {
				response.append(SET_COOKIE, value);
			}
			Err(e) => warn!(cookie = %self.cookie_name, error = %e, "correlation id not emitted as cookie"),
		}
	}
}

/// Sets a response header carrying the id.
#[derive(Debug, Clone)]
pub struct HeaderEmitter {
	header: HeaderName,
}

impl HeaderEmitter {
	pub fn new(header: &str) -> Result<Self, InvalidHeaderName> {
		Ok(Self {
			header: HeaderName::from_bytes(header.as_bytes())?,
		})
	}

	pub fn from_header_name(header: HeaderName) -> Self {
		Self { header }
	}
}

impl IdEmitter for HeaderEmitter {
	fn name(&self) -> &'static str {
		"header"
	}

	fn emit(&self, id: &str, response: &mut HeaderMap, _secure: bool) {
		match HeaderValue::from_str(id) {
			Ok(value) => {
				response.insert(self.header.clone(), value);
			}
			Err(e) => warn!(header = %self.header, error = %e, "correlation id not emitted as header"),
		}
	}
}
