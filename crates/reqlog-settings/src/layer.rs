// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Partial configuration layers merged from each source.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SettingsResult;
use crate::keys;
use crate::store::{SettingValue, SettingsStore};

/// One source's view of the configuration. `None` means "not set here".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SettingsLayer {
	pub shop: Option<ShopLayer>,
	pub logging: Option<LoggingLayer>,
	pub redaction: Option<RedactionLayer>,
	pub correlation: Option<CorrelationLayer>,
	pub sources: Option<SourcesLayer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShopLayer {
	pub log_dir: Option<PathBuf>,
	pub admin: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoggingLayer {
	pub active: Option<bool>,
	pub level: Option<String>,
	pub file_prefix: Option<String>,
	pub subdirectory: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RedactionLayer {
	pub redact_all_values: Option<bool>,
	pub blocklist: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CorrelationLayer {
	pub cookie_name: Option<String>,
	pub header_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SourcesLayer {
	/// Kept as raw records; malformed entries are filtered by the aggregator.
	pub static_paths: Option<Vec<Value>>,
	pub enabled: Option<Vec<String>>,
}

macro_rules! merge_fields {
	($self:ident, $other:ident, $($field:ident),+) => {
		$(
			if $other.$field.is_some() {
				$self.$field = $other.$field;
			}
		)+
	};
}

impl ShopLayer {
	pub fn merge(&mut self, other: Self) {
		merge_fields!(self, other, log_dir, admin);
	}
}

impl LoggingLayer {
	pub fn merge(&mut self, other: Self) {
		merge_fields!(self, other, active, level, file_prefix, subdirectory);
	}
}

impl RedactionLayer {
	pub fn merge(&mut self, other: Self) {
		merge_fields!(self, other, redact_all_values, blocklist);
	}
}

impl CorrelationLayer {
	pub fn merge(&mut self, other: Self) {
		merge_fields!(self, other, cookie_name, header_name);
	}
}

impl SourcesLayer {
	pub fn merge(&mut self, other: Self) {
		merge_fields!(self, other, static_paths, enabled);
	}
}

fn merge_section<T: Default>(target: &mut Option<T>, other: Option<T>, merge: impl FnOnce(&mut T, T)) {
	if let Some(other) = other {
		merge(target.get_or_insert_with(T::default), other);
	}
}

impl SettingsLayer {
	/// Overlay `other` on top of `self`, field by field.
	pub fn merge(&mut self, other: Self) {
		merge_section(&mut self.shop, other.shop, ShopLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingLayer::merge);
		merge_section(&mut self.redaction, other.redaction, RedactionLayer::merge);
		merge_section(&mut self.correlation, other.correlation, CorrelationLayer::merge);
		merge_section(&mut self.sources, other.sources, SourcesLayer::merge);
	}

	/// Write every value set in this layer into `store`.
	pub fn apply(&self, store: &dyn SettingsStore, module_id: &str) -> SettingsResult<()> {
		let mut values: Vec<(&str, SettingValue)> = Vec::new();

		if let Some(logging) = &self.logging {
			if let Some(active) = logging.active {
				values.push((keys::REQUEST_LOGGER_ACTIVE, SettingValue::Bool(active)));
			}
			if let Some(level) = &logging.level {
				values.push((keys::LOG_LEVEL, SettingValue::String(level.clone())));
			}
			if let Some(prefix) = &logging.file_prefix {
				values.push((keys::LOG_FILE_PREFIX, SettingValue::String(prefix.clone())));
			}
			if let Some(subdirectory) = &logging.subdirectory {
				values.push((keys::LOG_SUBDIRECTORY, SettingValue::String(subdirectory.clone())));
			}
		}

		if let Some(redaction) = &self.redaction {
			if let Some(all) = redaction.redact_all_values {
				values.push((keys::REDACT_ALL_VALUES, SettingValue::Bool(all)));
			}
			if let Some(blocklist) = &redaction.blocklist {
				values.push((keys::REDACTION_BLOCKLIST, SettingValue::strings(blocklist.clone())));
			}
		}

		if let Some(correlation) = &self.correlation {
			if let Some(cookie) = &correlation.cookie_name {
				values.push((keys::CORRELATION_COOKIE_NAME, SettingValue::String(cookie.clone())));
			}
			if let Some(header) = &correlation.header_name {
				values.push((keys::CORRELATION_HEADER_NAME, SettingValue::String(header.clone())));
			}
		}

		if let Some(sources) = &self.sources {
			if let Some(static_paths) = &sources.static_paths {
				values.push((keys::STATIC_PATHS, SettingValue::Collection(static_paths.clone())));
			}
			if let Some(enabled) = &sources.enabled {
				values.push((keys::ENABLED_SOURCES, SettingValue::strings(enabled.clone())));
			}
		}

		for (name, value) in values {
			store.set(module_id, name, value)?;
		}
		Ok(())
	}
}
