// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Typed access to one module's settings.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::error::{SettingsError, SettingsResult};
use crate::store::{SettingValue, SettingsStore};

/// Settings bound to a single module id.
///
/// The `get_*` methods surface store failures and type mismatches. The
/// `*_or` methods log them and fall back to the given default.
#[derive(Clone)]
pub struct ModuleSettings {
	store: Arc<dyn SettingsStore>,
	module_id: String,
}

impl ModuleSettings {
	pub fn new(store: Arc<dyn SettingsStore>, module_id: impl Into<String>) -> Self {
		Self {
			store,
			module_id: module_id.into(),
		}
	}

	pub fn module_id(&self) -> &str {
		&self.module_id
	}

	pub fn get(&self, name: &str) -> SettingsResult<Option<SettingValue>> {
		self.store.get(&self.module_id, name)
	}

	pub fn get_bool(&self, name: &str) -> SettingsResult<Option<bool>> {
		match self.get(name)? {
			None => Ok(None),
			Some(SettingValue::Bool(b)) => Ok(Some(b)),
			Some(_) => Err(mismatch(name, "bool")),
		}
	}

	pub fn get_string(&self, name: &str) -> SettingsResult<Option<String>> {
		match self.get(name)? {
			None => Ok(None),
			Some(SettingValue::String(s)) => Ok(Some(s)),
			Some(_) => Err(mismatch(name, "string")),
		}
	}

	pub fn get_collection(&self, name: &str) -> SettingsResult<Option<Vec<Value>>> {
		match self.get(name)? {
			None => Ok(None),
			Some(SettingValue::Collection(items)) => Ok(Some(items)),
			Some(_) => Err(mismatch(name, "collection")),
		}
	}

	/// A collection of strings. Non-string items are dropped.
	pub fn get_string_list(&self, name: &str) -> SettingsResult<Option<Vec<String>>> {
		Ok(self.get_collection(name)?.map(|items| {
			items
				.into_iter()
				.filter_map(|item| match item {
					Value::String(s) => Some(s),
					_ => None,
				})
				.collect()
		}))
	}

	pub fn bool_or(&self, name: &str, default: bool) -> bool {
		self.or_default(name, self.get_bool(name), default)
	}

	pub fn string_or(&self, name: &str, default: &str) -> String {
		self.or_default(name, self.get_string(name), default.to_string())
	}

	pub fn string_list_or(&self, name: &str, default: &[&str]) -> Vec<String> {
		self.or_default(
			name,
			self.get_string_list(name),
			default.iter().map(|s| s.to_string()).collect(),
		)
	}

	fn or_default<T>(&self, name: &str, result: SettingsResult<Option<T>>, default: T) -> T {
		match result {
			Ok(Some(value)) => value,
			Ok(None) => default,
			Err(e) => {
				warn!(module = %self.module_id, setting = name, error = %e, "falling back to default setting");
				default
			}
		}
	}

	pub fn set_bool(&self, name: &str, value: bool) -> SettingsResult<()> {
		self.store.set(&self.module_id, name, SettingValue::Bool(value))
	}

	pub fn set_string(&self, name: &str, value: impl Into<String>) -> SettingsResult<()> {
		self
			.store
			.set(&self.module_id, name, SettingValue::String(value.into()))
	}

	pub fn set_collection(&self, name: &str, items: Vec<Value>) -> SettingsResult<()> {
		self
			.store
			.set(&self.module_id, name, SettingValue::Collection(items))
	}

	/// Operator-facing mutation: accept only a JSON array.
	pub fn set_collection_json(&self, name: &str, json: &str) -> SettingsResult<()> {
		let items = parse_collection_json(name, json)?;
		self.set_collection(name, items)
	}
}

impl std::fmt::Debug for ModuleSettings {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ModuleSettings")
			.field("module_id", &self.module_id)
			.finish_non_exhaustive()
	}
}

/// Parse operator input that must be a JSON list.
pub fn parse_collection_json(name: &str, json: &str) -> SettingsResult<Vec<Value>> {
	let value: Value = serde_json::from_str(json)
		.map_err(|e| SettingsError::validation(name, format!("invalid JSON: {e}")))?;

	match value {
		Value::Array(items) => Ok(items),
		other => Err(SettingsError::validation(
			name,
			format!("must be a list, not {}", describe(&other)),
		)),
	}
}

fn describe(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "a list",
		Value::Object(_) => "an object",
	}
}

fn mismatch(name: &str, expected: &'static str) -> SettingsError {
	SettingsError::TypeMismatch {
		key: name.to_string(),
		expected,
	}
}
