// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Query-string redaction for request URIs and referers.

use url::form_urlencoded;

use crate::REDACTED;

/// Query parameters kept verbatim by [`redact_url`].
pub const URL_PRESERVED_KEYS: &[&str] = &["cl", "fnc", "item"];

/// Replace every query parameter value with [`REDACTED`], except
/// [`URL_PRESERVED_KEYS`].
///
/// Everything outside the query (scheme, host, port, path, fragment) is kept
/// byte for byte. A URL without a query string is returned unchanged.
/// Relative URLs are accepted.
///
/// Keys are compared after form-urlencoded decoding, so `%63l` is `cl`. The
/// rebuilt query is re-encoded from the decoded pairs.
pub fn redact_url(url: Option<&str>) -> Option<String> {
	let url = url?;

	let (before_fragment, fragment) = match url.find('#') {
		Some(idx) => (&url[..idx], Some(&url[idx..])),
		None => (url, None),
	};

	let Some((base, query)) = before_fragment.split_once('?') else {
		return Some(url.to_string());
	};

	if query.is_empty() {
		return Some(url.to_string());
	}

	let redacted: Vec<String> = form_urlencoded::parse(query.as_bytes())
		.map(|(key, value)| redact_pair(&key, &value))
		.collect();

	let mut out = String::with_capacity(url.len());
	out.push_str(base);
	out.push('?');
	out.push_str(&redacted.join("&"));
	if let Some(fragment) = fragment {
		out.push_str(fragment);
	}
	Some(out)
}

fn redact_pair(key: &str, value: &str) -> String {
	let encoded_key: String = form_urlencoded::byte_serialize(key.as_bytes()).collect();
	if URL_PRESERVED_KEYS.contains(&key) {
		let encoded_value: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
		return format!("{encoded_key}={encoded_value}");
	}
	format!("{encoded_key}={REDACTED}")
}
