// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};
use reqlog_correlation::{
	sanitize_file_component, CookieEmitter, CookieResolver, CorrelationIdPipeline, IdGenerator,
	ID_LENGTH,
};
use reqlog_settings::{keys, MemorySettingsStore, ModuleSettings, SettingValue, SettingsStore};

struct FixedGenerator(&'static str);

impl IdGenerator for FixedGenerator {
	fn generate(&self) -> String {
		self.0.to_string()
	}
}

fn request(pairs: &[(&'static str, &str)]) -> HeaderMap {
	let mut headers = HeaderMap::new();
	for (name, value) in pairs {
		headers.append(*name, HeaderValue::from_str(value).unwrap());
	}
	headers
}

fn set_cookies(response: &HeaderMap) -> Vec<&str> {
	response
		.get_all(SET_COOKIE)
		.iter()
		.map(|v| v.to_str().unwrap())
		.collect()
}

#[test]
fn test_resolved_cookie_is_reused_and_reemitted() {
	let pipeline = CorrelationIdPipeline::default();
	let req = request(&[("cookie", "theme=dark; reqlog_correlation_id=abc123")]);
	let mut resp = HeaderMap::new();

	let id = pipeline.process(&req, &mut resp, false);

	assert_eq!(id, "abc123");
	assert_eq!(
		set_cookies(&resp),
		vec!["reqlog_correlation_id=abc123; Path=/; HttpOnly; SameSite=Lax"]
	);
	assert_eq!(resp.get("x-correlation-id").unwrap(), "abc123");
}

#[test]
fn test_cookie_wins_over_header() {
	let pipeline = CorrelationIdPipeline::default();
	let req = request(&[
		("x-correlation-id", "from-header"),
		("cookie", "reqlog_correlation_id=from-cookie"),
	]);
	assert_eq!(pipeline.resolve(&req).as_deref(), Some("from-cookie"));
}

#[test]
fn test_header_is_used_without_cookie() {
	let pipeline = CorrelationIdPipeline::default();
	let req = request(&[("x-correlation-id", "from-header")]);
	let mut resp = HeaderMap::new();
	assert_eq!(pipeline.process(&req, &mut resp, true), "from-header");
	assert_eq!(
		set_cookies(&resp),
		vec!["reqlog_correlation_id=from-header; Path=/; HttpOnly; SameSite=Lax; Secure"]
	);
}

#[test]
fn test_empty_cookie_value_falls_through_to_generation() {
	let pipeline = CorrelationIdPipeline::default();
	let req = request(&[("cookie", "reqlog_correlation_id=")]);
	let mut resp = HeaderMap::new();

	let id = pipeline.process(&req, &mut resp, false);
	assert_eq!(id.len(), ID_LENGTH);
	assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
	assert_eq!(resp.get("x-correlation-id").unwrap(), id.as_str());
}

#[test]
fn test_generated_ids_differ_between_requests() {
	let pipeline = CorrelationIdPipeline::default();
	let first = pipeline.process(&HeaderMap::new(), &mut HeaderMap::new(), false);
	let second = pipeline.process(&HeaderMap::new(), &mut HeaderMap::new(), false);
	assert_ne!(first, second);
}

#[test]
fn test_custom_chain() {
	let pipeline = CorrelationIdPipeline::new(Box::new(FixedGenerator("fixed")))
		.with_resolver(Box::new(CookieResolver::new("cid")))
		.with_emitter(Box::new(CookieEmitter::new("cid")));

	let mut resp = HeaderMap::new();
	assert_eq!(pipeline.process(&HeaderMap::new(), &mut resp, false), "fixed");
	assert_eq!(set_cookies(&resp).len(), 1);
	assert!(resp.get("x-correlation-id").is_none());
}

#[test]
fn test_no_resolvers_always_generates() {
	let pipeline = CorrelationIdPipeline::new(Box::new(FixedGenerator("new-id")));
	let req = request(&[("cookie", "reqlog_correlation_id=old")]);
	assert_eq!(pipeline.process(&req, &mut HeaderMap::new(), false), "new-id");
}

#[test]
fn test_from_settings_uses_configured_names() {
	let store = Arc::new(MemorySettingsStore::new());
	store
		.set(
			keys::MODULE_ID,
			keys::CORRELATION_COOKIE_NAME,
			SettingValue::String("trace".into()),
		)
		.unwrap();
	store
		.set(
			keys::MODULE_ID,
			keys::CORRELATION_HEADER_NAME,
			SettingValue::String("X-Trace".into()),
		)
		.unwrap();
	let pipeline = CorrelationIdPipeline::from_settings(&ModuleSettings::new(store, keys::MODULE_ID));

	let req = request(&[("x-trace", "t-1")]);
	let mut resp = HeaderMap::new();
	assert_eq!(pipeline.process(&req, &mut resp, false), "t-1");
	assert_eq!(resp.get("x-trace").unwrap(), "t-1");
	assert!(set_cookies(&resp)[0].starts_with("trace=t-1;"));
}

#[test]
fn test_from_settings_invalid_header_name_falls_back() {
	let store = Arc::new(MemorySettingsStore::new());
	store
		.set(
			keys::MODULE_ID,
			keys::CORRELATION_HEADER_NAME,
			SettingValue::String("bad header".into()),
		)
		.unwrap();
	let pipeline = CorrelationIdPipeline::from_settings(&ModuleSettings::new(store, keys::MODULE_ID));

	let req = request(&[("x-correlation-id", "kept")]);
	let mut resp = HeaderMap::new();
	assert_eq!(pipeline.process(&req, &mut resp, false), "kept");
	assert_eq!(resp.get("x-correlation-id").unwrap(), "kept");
}

#[test]
fn test_hostile_id_is_made_safe_for_file_names() {
	let pipeline = CorrelationIdPipeline::default();
	let req = request(&[("cookie", "reqlog_correlation_id=../../etc/passwd")]);
	let id = pipeline.process(&req, &mut HeaderMap::new(), false);
	assert_eq!(id, "../../etc/passwd");
	assert_eq!(sanitize_file_component(&id), "etcpasswd");
}

#[test]
fn test_multiple_cookie_headers_are_searched() {
	let pipeline = CorrelationIdPipeline::default();
	let mut req = HeaderMap::new();
	req.append(COOKIE, HeaderValue::from_static("a=1"));
	req.append(COOKIE, HeaderValue::from_static("reqlog_correlation_id=second"));
	assert_eq!(pipeline.resolve(&req).as_deref(), Some("second"));
}

#[test]
fn test_header_id_cannot_add_cookie_attributes() {
	let pipeline = CorrelationIdPipeline::default();
	let hostile = "abc; Domain=.evil.example; Max-Age=315360000";
	let req = request(&[("x-correlation-id", hostile)]);
	let mut resp = HeaderMap::new();

	assert_eq!(pipeline.process(&req, &mut resp, false), hostile);
	assert_eq!(
		set_cookies(&resp),
		vec![
			"reqlog_correlation_id=abc%3B%20Domain%3D.evil.example%3B%20Max-Age%3D315360000; Path=/; HttpOnly; SameSite=Lax"
		]
	);
}

#[test]
fn test_emitted_cookie_resolves_to_same_id() {
	let pipeline = CorrelationIdPipeline::default();
	let mut first = HeaderMap::new();
	let id = pipeline.process(&request(&[("x-correlation-id", "a b;c")]), &mut first, false);

	let cookie = set_cookies(&first)[0].split(';').next().unwrap().to_string();
	let next = request(&[("cookie", cookie.as_str())]);
	assert_eq!(pipeline.resolve(&next).as_deref(), Some(id.as_str()));
}
