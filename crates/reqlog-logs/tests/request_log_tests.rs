// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use http::HeaderMap;
use reqlog_core::{HostLogger, LogLevel, StaticEnvironment};
use reqlog_logs::{RequestInfo, RequestLogWriter, RequestLogger, REQUEST_FINISH, REQUEST_START};
use reqlog_settings::{keys, MemorySettingsStore, ModuleSettings};
use serde_json::{json, Map, Value};

#[derive(Default)]
struct RecordingLogger {
	lines: Mutex<Vec<(LogLevel, String)>>,
}

impl HostLogger for RecordingLogger {
	fn log(&self, level: LogLevel, message: &str) {
		self.lines.lock().unwrap().push((level, message.to_string()));
	}
}

fn settings() -> ModuleSettings {
	ModuleSettings::new(Arc::new(MemorySettingsStore::new()), keys::MODULE_ID)
}

fn read_entries(path: &Path) -> Vec<Value> {
	fs::read_to_string(path)
		.unwrap()
		.lines()
		.map(|line| serde_json::from_str(line).unwrap())
		.collect()
}

fn params(value: Value) -> Map<String, Value> {
	match value {
		Value::Object(map) => map,
		_ => panic!("expected an object"),
	}
}

#[test]
fn test_writer_creates_directory_and_names_file() {
	let tmp = tempfile::tempdir().unwrap();
	let env = StaticEnvironment::new(tmp.path());

	let mut writer = RequestLogWriter::open(&env, &settings(), "abc123");
	assert!(writer.is_enabled());
	let path = writer.path().unwrap().to_path_buf();
	assert_eq!(path, tmp.path().join("reqlog").join("request-abc123.log"));

	writer
		.log(LogLevel::Info, "hello", params(json!({"correlationId": "spoofed", "n": 1})))
		.unwrap();

	let entries = read_entries(&path);
	assert_eq!(entries.len(), 1);
	assert_eq!(entries[0]["message"], json!("hello"));
	assert_eq!(entries[0]["context"]["correlationId"], json!("abc123"));
	assert_eq!(entries[0]["context"]["n"], json!(1));
}

#[test]
fn test_writer_appends_to_existing_file() {
	let tmp = tempfile::tempdir().unwrap();
	let env = StaticEnvironment::new(tmp.path());

	for message in ["first", "second"] {
		let mut writer = RequestLogWriter::open(&env, &settings(), "same-id");
		writer.log(LogLevel::Info, message, Map::new()).unwrap();
	}

	let path = tmp.path().join("reqlog").join("request-same-id.log");
	let messages: Vec<Value> = read_entries(&path)
		.into_iter()
		.map(|e| e["message"].clone())
		.collect();
	assert_eq!(messages, vec![json!("first"), json!("second")]);
}

#[test]
fn test_hostile_id_stays_inside_log_directory() {
	let tmp = tempfile::tempdir().unwrap();
	let env = StaticEnvironment::new(tmp.path().join("log"));

	let writer = RequestLogWriter::open(&env, &settings(), "../../../etc/passwd");
	assert_eq!(
		writer.path().unwrap(),
		tmp.path().join("log").join("reqlog").join("request-etcpasswd.log")
	);
	assert_eq!(writer.correlation_id(), "../../../etc/passwd");
}

#[test]
fn test_escaping_subdirectory_stays_inside_log_directory() {
	let tmp = tempfile::tempdir().unwrap();
	let log_dir = tmp.path().join("log");
	let env = StaticEnvironment::new(log_dir.clone());
	let settings = settings();

	for subdirectory in ["../../tmp", "/tmp", ".."] {
		settings.set_string(keys::LOG_SUBDIRECTORY, subdirectory).unwrap();
		let writer = RequestLogWriter::open(&env, &settings, "abc");
		assert_eq!(
			writer.path().unwrap(),
			log_dir.join("reqlog").join("request-abc.log"),
			"{subdirectory} escaped"
		);
	}
	assert!(!tmp.path().join("tmp").exists());
}

#[test]
fn test_origin_form_request_behind_tls_proxy_gets_secure_cookie() {
	let tmp = tempfile::tempdir().unwrap();
	let logger = RequestLogger::from_settings(Arc::new(StaticEnvironment::new(tmp.path())), settings());
	let request = http::Request::builder()
		.uri("/index.php?cl=account")
		.header("x-forwarded-proto", "https")
		.body(())
		.unwrap();

	let mut response = HeaderMap::new();
	let session = logger.begin(&RequestInfo::from_http(&request, Map::new()), &mut response);
	assert!(response
		.get("set-cookie")
		.unwrap()
		.to_str()
		.unwrap()
		.ends_with("; Secure"));
	session.finish(200);
}

#[test]
fn test_configured_prefix_subdirectory_and_level() {
	let tmp = tempfile::tempdir().unwrap();
	let env = StaticEnvironment::new(tmp.path());
	let settings = settings();
	settings.set_string(keys::LOG_FILE_PREFIX, "shop").unwrap();
	settings.set_string(keys::LOG_SUBDIRECTORY, "requests").unwrap();
	settings.set_string(keys::LOG_LEVEL, "warn").unwrap();

	let mut writer = RequestLogWriter::open(&env, &settings, "id1");
	assert_eq!(writer.min_level(), LogLevel::Warn);
	writer.log(LogLevel::Info, "skipped", Map::new()).unwrap();
	writer.log(LogLevel::Error, "kept", Map::new()).unwrap();

	let entries = read_entries(&tmp.path().join("requests").join("shop-id1.log"));
	assert_eq!(entries.len(), 1);
	assert_eq!(entries[0]["level"], json!("error"));
}

#[test]
fn test_unknown_level_falls_back_to_info() {
	let tmp = tempfile::tempdir().unwrap();
	let settings = settings();
	settings.set_string(keys::LOG_LEVEL, "loud").unwrap();
	let writer = RequestLogWriter::open(&StaticEnvironment::new(tmp.path()), &settings, "id");
	assert_eq!(writer.min_level(), LogLevel::Info);
}

#[test]
fn test_directory_failure_is_reported_and_disables_writer() {
	let tmp = tempfile::tempdir().unwrap();
	fs::write(tmp.path().join("reqlog"), "not a directory").unwrap();
	let logger = Arc::new(RecordingLogger::default());
	let env = StaticEnvironment::new(tmp.path()).with_logger(logger.clone());

	let mut writer = RequestLogWriter::open(&env, &settings(), "abc");
	assert!(!writer.is_enabled());
	writer.log(LogLevel::Error, "dropped", Map::new()).unwrap();

	let lines = logger.lines.lock().unwrap();
	assert_eq!(lines.len(), 1);
	assert_eq!(lines[0].0, LogLevel::Error);
	assert!(lines[0].1.contains("could not create request log directory"));
}

#[test]
fn test_session_writes_start_and_finish() {
	let tmp = tempfile::tempdir().unwrap();
	let env = Arc::new(StaticEnvironment::new(tmp.path()).with_admin(true));
	let logger = RequestLogger::from_settings(env, settings());

	let request = http::Request::builder()
		.method("POST")
		.uri("https://shop.example.com/index.php?cl=account&fnc=login&lgn_pwd=hunter2")
		.header("cookie", "reqlog_correlation_id=cafe01")
		.header("referer", "https://shop.example.com/?token=xyz&cl=start")
		.header("user-agent", "curl/8.0")
		.body(())
		.unwrap();
	let info = RequestInfo::from_http(
		&request,
		params(json!({"cl": "account", "lgn_usr": "jane", "lgn_pwd": "hunter2", "sku": ["a", "b"]})),
	);

	let mut response = HeaderMap::new();
	let mut session = logger.begin(&info, &mut response);
	assert_eq!(session.correlation_id(), "cafe01");
	assert_eq!(response.get("x-correlation-id").unwrap(), "cafe01");
	assert!(response
		.get("set-cookie")
		.unwrap()
		.to_str()
		.unwrap()
		.ends_with("; Secure"));

	session.log(LogLevel::Debug, "below threshold", Map::new());
	session.log(LogLevel::Info, "basket updated", Map::new());
	let path = session.writer().path().unwrap().to_path_buf();
	session.finish(302);

	let entries = read_entries(&path);
	let messages: Vec<&str> = entries.iter().map(|e| e["message"].as_str().unwrap()).collect();
	assert_eq!(messages, vec![REQUEST_START, "basket updated", REQUEST_FINISH]);
	assert!(entries.iter().all(|e| e["context"]["correlationId"] == json!("cafe01")));

	let start = &entries[0]["context"];
	assert_eq!(start["method"], json!("POST"));
	assert_eq!(
		start["uri"],
		json!("https://shop.example.com/index.php?cl=account&fnc=login&lgn_pwd=[redacted]")
	);
	assert_eq!(start["referer"], json!("https://shop.example.com/?token=[redacted]&cl=start"));
	assert_eq!(start["user_agent"], json!("curl/8.0"));
	assert_eq!(start["admin"], json!(true));
	assert_eq!(start["params"]["cl"], json!("account"));
	assert_eq!(start["params"]["lgn_usr"], json!("jane"));
	assert_eq!(start["params"]["lgn_pwd"], json!("[redacted]"));
	assert_eq!(start["params"]["sku"], json!(r#"["a","b"]"#));

	let finish = &entries[2]["context"];
	assert_eq!(finish["status"], json!(302));
	assert!(finish["duration_ms"].is_u64());
}

#[test]
fn test_session_generates_id_without_cookie() {
	let tmp = tempfile::tempdir().unwrap();
	let logger = RequestLogger::from_settings(Arc::new(StaticEnvironment::new(tmp.path())), settings());

	let mut response = HeaderMap::new();
	let session = logger.begin(&RequestInfo::default(), &mut response);
	let id = session.correlation_id().to_string();
	assert_eq!(id.len(), 32);
	assert_eq!(
		session.writer().path().unwrap(),
		tmp.path().join("reqlog").join(format!("request-{id}.log"))
	);
	session.finish(200);
}

#[test]
fn test_inactive_logger_emits_id_but_writes_nothing() {
	let tmp = tempfile::tempdir().unwrap();
	let settings = settings();
	settings
		.set_bool(keys::REQUEST_LOGGER_ACTIVE, false)
		.unwrap();
	let logger = RequestLogger::from_settings(Arc::new(StaticEnvironment::new(tmp.path())), settings);
	assert!(!logger.is_active());

	let mut response = HeaderMap::new();
	let session = logger.begin(&RequestInfo::default(), &mut response);
	assert!(response.get("x-correlation-id").is_some());
	assert!(!session.writer().is_enabled());
	session.finish(200);

	assert!(!tmp.path().join("reqlog").exists());
}

#[test]
fn test_all_values_mode_from_settings() {
	let tmp = tempfile::tempdir().unwrap();
	let settings = settings();
	settings.set_bool(keys::REDACT_ALL_VALUES, true).unwrap();
	let logger = RequestLogger::from_settings(Arc::new(StaticEnvironment::new(tmp.path())), settings);

	let info = RequestInfo {
		method: "GET".into(),
		uri: "/index.php?cl=search&searchparam=shoes".into(),
		params: params(json!({"cl": "search", "searchparam": "shoes"})),
		..Default::default()
	};
	let session = logger.begin(&info, &mut HeaderMap::new());
	let path = session.writer().path().unwrap().to_path_buf();
	session.finish(200);

	let start = &read_entries(&path)[0]["context"];
	assert_eq!(start["params"]["cl"], json!("search"));
	assert_eq!(start["params"]["searchparam"], json!("[redacted]"));
	assert_eq!(start["uri"], json!("/index.php?cl=search&searchparam=[redacted]"));
	assert_eq!(start["referer"], Value::Null);
}
