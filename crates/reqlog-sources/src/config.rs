// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The persisted static path record.

use reqlog_core::{PathDescriptor, PathKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the `static_paths` setting:
/// `{path, type: "file"|"directory", name?, description?, pattern?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPathConfig {
	pub path: String,
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pattern: Option<String>,
}

impl StaticPathConfig {
	/// Parse and check one raw record. The error names the first problem.
	///
	/// Only `path` and `type` are checked. Optional fields of the wrong
	/// type are treated as absent.
	pub fn from_value(value: &Value) -> Result<Self, String> {
		let Value::Object(fields) = value else {
			return Err("must be an object".to_string());
		};

		let path = match fields.get("path") {
			Some(Value::String(path)) if !path.is_empty() => path,
			Some(Value::String(_)) | None | Some(Value::Null) => {
				return Err("missing path".to_string())
			}
			Some(_) => return Err("path must be a string".to_string()),
		};
		let kind = match fields.get("type") {
			Some(Value::String(kind)) if PathKind::parse(kind).is_some() => kind,
			None | Some(Value::Null) => return Err("missing type".to_string()),
			Some(_) => return Err("type must be 'file' or 'directory'".to_string()),
		};
		let optional = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

		Ok(Self {
			path: path.clone(),
			kind: kind.clone(),
			name: optional("name"),
			description: optional("description"),
			pattern: optional("pattern"),
		})
	}

	/// The descriptor for this record. `None` when the kind is not
	/// recognised.
	pub fn to_descriptor(&self) -> Option<PathDescriptor> {
		let kind = PathKind::parse(&self.kind)?;
		let mut descriptor = PathDescriptor::new(&self.path, kind);
		if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
			descriptor = descriptor.with_name(name);
		}
		if let Some(description) = &self.description {
			descriptor = descriptor.with_description(description);
		}
		if let Some(pattern) = self.pattern.as_deref().filter(|p| !p.is_empty()) {
			descriptor = descriptor.with_pattern(pattern);
		}
		Some(descriptor)
	}
}
