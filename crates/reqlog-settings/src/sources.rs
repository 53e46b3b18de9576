// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::SettingsError;
use crate::layer::{
	CorrelationLayer, LoggingLayer, RedactionLayer, SettingsLayer, ShopLayer, SourcesLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<SettingsLayer, SettingsError>;
}

/// Built-in defaults source. Defaults are applied by the typed accessors, so
/// this layer is empty.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<SettingsLayer, SettingsError> {
		debug!("loading defaults");
		Ok(SettingsLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<SettingsLayer, SettingsError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(SettingsLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| SettingsError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: SettingsLayer = toml::from_str(&content).map_err(|e| SettingsError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: REQLOG_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<SettingsLayer, SettingsError> {
		debug!("loading environment variables");
		load_from(|name| std::env::var(name).ok())
	}
}

/// Build a layer from an arbitrary variable lookup.
fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<SettingsLayer, SettingsError> {
	let var = |name: &str| lookup(name).filter(|s| !s.is_empty());
	let bool_var = |name: &str| -> Result<Option<bool>, SettingsError> {
		match var(name) {
			Some(v) => parse_bool(&v).map(Some).ok_or_else(|| SettingsError::InvalidEnv {
				key: name.to_string(),
				message: format!("invalid boolean value '{v}'"),
			}),
			None => Ok(None),
		}
	};

	Ok(SettingsLayer {
		shop: Some(ShopLayer {
			log_dir: var("REQLOG_LOG_DIR").map(PathBuf::from),
			admin: bool_var("REQLOG_ADMIN")?,
		}),
		logging: Some(LoggingLayer {
			active: bool_var("REQLOG_REQUEST_LOGGER_ACTIVE")?,
			level: var("REQLOG_LOG_LEVEL"),
			file_prefix: var("REQLOG_LOG_FILE_PREFIX"),
			subdirectory: var("REQLOG_LOG_SUBDIRECTORY"),
		}),
		redaction: Some(RedactionLayer {
			redact_all_values: bool_var("REQLOG_REDACT_ALL_VALUES")?,
			blocklist: var("REQLOG_REDACTION_BLOCKLIST").map(|v| split_list(&v)),
		}),
		correlation: Some(CorrelationLayer {
			cookie_name: var("REQLOG_CORRELATION_COOKIE"),
			header_name: var("REQLOG_CORRELATION_HEADER"),
		}),
		sources: Some(SourcesLayer {
			static_paths: None,
			enabled: var("REQLOG_ENABLED_SOURCES").map(|v| split_list(&v)),
		}),
	})
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Some(true),
		"0" | "false" | "no" | "off" => Some(false),
		_ => None,
	}
}

fn split_list(value: &str) -> Vec<String> {
	value
		.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_string)
		.collect()
}
