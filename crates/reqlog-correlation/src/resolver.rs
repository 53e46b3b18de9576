// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use http::header::{InvalidHeaderName, COOKIE};
use http::{HeaderMap, HeaderName};

/// Looks up an existing correlation id on an inbound request.
///
/// Header values are returned verbatim and cookie values are percent-decoded.
/// An empty value counts as absent; a whitespace-only value does not.
pub trait IdResolver: Send + Sync {
	fn name(&self) -> &'static str;

	fn resolve(&self, headers: &HeaderMap) -> Option<String>;
}

/// Reads the id from a named cookie.
#[derive(Debug, Clone)]
pub struct CookieResolver {
	cookie_name: String,
}

impl CookieResolver {
	pub fn new(cookie_name: impl Into<String>) -> Self {
		Self {
			cookie_name: cookie_name.into(),
		}
	}
}

impl IdResolver for CookieResolver {
	fn name(&self) -> &'static str {
		"cookie"
	}

	fn resolve(&self, headers: &HeaderMap) -> Option<String> {
		headers
			.get_all(COOKIE)
			.iter()
			.filter_map(|value| value.to_str().ok())
			.flat_map(|value| value.split(';'))
			.find_map(|cookie| {
				let (name, value) = cookie.trim_start().split_once('=')?;
				if name != self.cookie_name || value.is_empty() {
					return None;
				}
				Some(
					urlencoding::decode(value)
						.map(|decoded| decoded.into_owned())
						.unwrap_or_else(|_| value.to_string()),
				)
			})
	}
}

/// Reads the id from a request header.
#[derive(Debug, Clone)]
pub struct HeaderResolver {
	header: HeaderName,
}

impl HeaderResolver {
	pub fn new(header: &str) -> Result<Self, InvalidHeaderName> {
		Ok(Self {
			header: HeaderName::from_bytes(header.as_bytes())?,
		})
	}

	pub fn from_header_name(header: HeaderName) -> Self {
		Self { header }
	}
}

impl IdResolver for HeaderResolver {
	fn name(&self) -> &'static str {
		"header"
	}

	fn resolve(&self, headers: &HeaderMap) -> Option<String> {
		let value = headers.get(&self.header)?.to_str().ok()?;
		if value.is_empty() {
			None
		} else {
			Some(value.to_string())
		}
	}
}
