// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Module settings for reqlog.
//!
//! This crate provides:
//! - A [`SettingsStore`] trait keyed by `(module_id, name)` with typed values
//! - [`ModuleSettings`], typed accessors with defaults and operator-facing
//!   validation
//! - Layered configuration from multiple sources (defaults, TOML file,
//!   environment) written into a [`MemorySettingsStore`]
//!
//! # Usage
//!
//! ```ignore
//! use reqlog_settings::{keys, load_config};
//!
//! let config = load_config(Some("/etc/reqlog/config.toml".into()))?;
//! let level = config.settings().string_or(keys::LOG_LEVEL, keys::DEFAULT_LOG_LEVEL);
//! ```

pub mod error;
pub mod keys;
pub mod layer;
pub mod module;
pub mod sources;
pub mod store;

pub use error::{SettingsError, SettingsResult};
pub use layer::{
	CorrelationLayer, LoggingLayer, RedactionLayer, SettingsLayer, ShopLayer, SourcesLayer,
};
pub use module::ModuleSettings;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};
pub use store::{MemorySettingsStore, SettingValue, SettingsStore};

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

/// Default base directory for request log files.
pub const DEFAULT_LOG_DIR: &str = "log";

/// Shop environment values resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
	pub log_dir: PathBuf,
	pub admin: bool,
}

/// Fully resolved configuration: a populated settings store plus the shop
/// environment section.
#[derive(Clone)]
pub struct LoadedConfig {
	pub shop: ShopConfig,
	store: Arc<MemorySettingsStore>,
}

impl LoadedConfig {
	pub fn store(&self) -> Arc<MemorySettingsStore> {
		self.store.clone()
	}

	/// Settings bound to the reqlog module id.
	pub fn settings(&self) -> ModuleSettings {
		ModuleSettings::new(self.store.clone(), keys::MODULE_ID)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`REQLOG_*`)
/// 2. Config file (when given)
/// 3. Built-in defaults
pub fn load_config(config_path: Option<PathBuf>) -> SettingsResult<LoadedConfig> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(DefaultsSource), Box::new(EnvSource)];
	if let Some(path) = config_path {
		sources.push(Box::new(TomlSource::new(path)));
	}

	sources.sort_by_key(|s| s.precedence());

	let mut merged = SettingsLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

/// Build a configuration from an explicit layer (for tests and embedding).
pub fn finalize(layer: SettingsLayer) -> SettingsResult<LoadedConfig> {
	let shop = layer.shop.clone().unwrap_or_default();
	let shop = ShopConfig {
		log_dir: shop
			.log_dir
			.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
		admin: shop.admin.unwrap_or(false),
	};

	let store = Arc::new(MemorySettingsStore::new());
	layer.apply(store.as_ref(), keys::MODULE_ID)?;

	info!(
		log_dir = %shop.log_dir.display(),
		admin = shop.admin,
		settings = store.len(),
		"reqlog configuration loaded"
	);

	Ok(LoadedConfig { shop, store })
}
