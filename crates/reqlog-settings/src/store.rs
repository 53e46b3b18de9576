// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Settings storage keyed by `(module_id, name)`.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::SettingsResult;

/// A typed setting value.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
	Bool(bool),
	String(String),
	/// Ordered list of strings or small records.
	Collection(Vec<Value>),
}

impl SettingValue {
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::Bool(_) => "bool",
			SettingValue::String(_) => "string",
			SettingValue::Collection(_) => "collection",
		}
	}

	/// Build a collection from plain strings.
	pub fn strings<I, S>(items: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		SettingValue::Collection(items.into_iter().map(|s| Value::String(s.into())).collect())
	}
}

/// Backend holding module settings.
///
/// Implementations may fail (a database-backed store, for example); callers
/// decide whether a failure is fatal.
pub trait SettingsStore: Send + Sync {
	fn get(&self, module_id: &str, name: &str) -> SettingsResult<Option<SettingValue>>;

	fn set(&self, module_id: &str, name: &str, value: SettingValue) -> SettingsResult<()>;
}

/// In-process settings store.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
	values: RwLock<HashMap<(String, String), SettingValue>>,
}

impl MemorySettingsStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.values.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.read().is_empty()
	}

	pub fn remove(&self, module_id: &str, name: &str) -> Option<SettingValue> {
		self
			.values
			.write()
			.remove(&(module_id.to_string(), name.to_string()))
	}
}

impl SettingsStore for MemorySettingsStore {
	fn get(&self, module_id: &str, name: &str) -> SettingsResult<Option<SettingValue>> {
		Ok(self
			.values
			.read()
			.get(&(module_id.to_string(), name.to_string()))
			.cloned())
	}

	fn set(&self, module_id: &str, name: &str, value: SettingValue) -> SettingsResult<()> {
		self
			.values
			.write()
			.insert((module_id.to_string(), name.to_string()), value);
		Ok(())
	}
}
