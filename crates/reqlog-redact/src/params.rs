// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::HashSet;

use reqlog_settings::{keys, ModuleSettings};
use serde_json::{Map, Value};

use crate::REDACTED;

/// Routing parameters kept verbatim in [`RedactionMode::AllValues`]. Matched
/// case-sensitively.
pub const ALWAYS_PRESERVED_KEYS: &[&str] = &["cl", "fnc"];

/// Blocklist used when none is configured.
pub const DEFAULT_BLOCKLIST: &[&str] = &[
	"password",
	"passwd",
	"pwd",
	"lgn_pwd",
	"lgn_pwd2",
	"password_new",
	"password_old",
	"token",
	"api_key",
	"apikey",
	"secret",
	"stoken",
	"creditcard",
	"cc_number",
	"cvv",
	"iban",
];

/// How parameter values are sanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedactionMode {
	/// Redact every value except [`ALWAYS_PRESERVED_KEYS`].
	AllValues,
	/// Redact values of the listed keys (stored lowercased, matched
	/// case-insensitively). Other non-scalar values become compact JSON.
	Blocklist(HashSet<String>),
}

/// Sanitizes a flat parameter map before it is logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveDataRedactor {
	mode: RedactionMode,
}

impl SensitiveDataRedactor {
	pub fn all_values() -> Self {
		Self {
			mode: RedactionMode::AllValues,
		}
	}

	pub fn blocklist<I, S>(keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let keys = keys
			.into_iter()
			.map(|k| k.as_ref().to_lowercase())
			.collect();
		Self {
			mode: RedactionMode::Blocklist(keys),
		}
	}

	/// Build from the `redact_all_values` flag and the configured blocklist.
	/// Unreadable settings fall back to blocklist mode with
	/// [`DEFAULT_BLOCKLIST`].
	pub fn from_settings(settings: &ModuleSettings) -> Self {
		if settings.bool_or(keys::REDACT_ALL_VALUES, keys::DEFAULT_REDACT_ALL_VALUES) {
			tracing::debug!("parameter redaction: all values");
			return Self::all_values();
		}

		let blocklist = settings.string_list_or(keys::REDACTION_BLOCKLIST, DEFAULT_BLOCKLIST);
		tracing::debug!(keys = blocklist.len(), "parameter redaction: blocklist");
		Self::blocklist(blocklist)
	}

	pub fn mode(&self) -> &RedactionMode {
		&self.mode
	}

	/// Whether the value under `key` would be replaced with the marker.
	pub fn is_redacted_key(&self, key: &str) -> bool {
		match &self.mode {
			RedactionMode::AllValues => !ALWAYS_PRESERVED_KEYS.contains(&key),
			RedactionMode::Blocklist(keys) => keys.contains(&key.to_lowercase()),
		}
	}

	/// Sanitize `params`. Keys are always kept; only values change.
	pub fn redact(&self, params: &Map<String, Value>) -> Map<String, Value> {
		params
			.iter()
			.map(|(key, value)| (key.clone(), self.redact_value(key, value)))
			.collect()
	}

	fn redact_value(&self, key: &str, value: &Value) -> Value {
		if self.is_redacted_key(key) {
			return Value::String(REDACTED.to_string());
		}

		match (&self.mode, value) {
			(RedactionMode::Blocklist(_), Value::Array(_) | Value::Object(_)) => {
				Value::String(value.to_string())
			}
			_ => value.clone(),
		}
	}
}

impl Default for SensitiveDataRedactor {
	fn default() -> Self {
		Self::blocklist(DEFAULT_BLOCKLIST)
	}
}
