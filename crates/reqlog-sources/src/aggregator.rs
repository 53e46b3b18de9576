// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::collections::HashSet;

use reqlog_core::{LogPathProvider, LogSource, PathDescriptor};
use reqlog_settings::{keys, module::parse_collection_json, ModuleSettings, SettingsError};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::StaticPathConfig;
use crate::error::{SourceError, SourceResult};

/// Combines static configuration and registered providers into log sources.
///
/// Static sources come first, in configuration order, with id
/// `static_<index>` where `index` is the entry's position in the stored
/// list (malformed entries are skipped but still consume their index).
/// Provider sources follow in registration order with id
/// `provider_<provider_id>`.
pub struct SourceAggregator {
	settings: ModuleSettings,
	providers: Vec<Box<dyn LogPathProvider>>,
}

impl SourceAggregator {
	pub fn new(settings: ModuleSettings, providers: Vec<Box<dyn LogPathProvider>>) -> Self {
		Self {
			settings,
			providers,
		}
	}

	pub fn register(&mut self, provider: Box<dyn LogPathProvider>) {
		debug!(provider_id = provider.provider_id(), "registering log path provider");
		self.providers.push(provider);
	}

	/// Every known source, rebuilt from settings and providers on each call.
	pub fn list_sources(&self) -> Vec<LogSource> {
		let mut sources: Vec<LogSource> = self
			.indexed_static_paths()
			.into_iter()
			.map(|(index, path)| LogSource::from_static(index, path))
			.collect();

		for provider in &self.providers {
			if !provider.is_active() {
				debug!(provider_id = provider.provider_id(), "skipping inactive provider");
				continue;
			}
			sources.push(LogSource::from_provider(
				provider.provider_id(),
				provider.provider_name(),
				provider.provider_description().map(str::to_string),
				provider.log_paths(),
			));
		}

		debug!(count = sources.len(), "log sources aggregated");
		sources
	}

	pub fn get_source_by_id(&self, id: &str) -> SourceResult<LogSource> {
		self
			.list_sources()
			.into_iter()
			.find(|source| source.id() == id)
			.ok_or_else(|| SourceError::NotFound(id.to_string()))
	}

	/// Descriptors for the well-formed static entries, in configuration order.
	pub fn get_static_paths(&self) -> Vec<PathDescriptor> {
		self
			.indexed_static_paths()
			.into_iter()
			.map(|(_, path)| path)
			.collect()
	}

	/// Sources whose ids are listed in the `enabled_sources` setting. Unset
	/// means none.
	pub fn list_enabled_sources(&self) -> Vec<LogSource> {
		let enabled: HashSet<String> = self
			.settings
			.string_list_or(keys::ENABLED_SOURCES, &[])
			.into_iter()
			.collect();
		if enabled.is_empty() {
			return Vec::new();
		}

		self
			.list_sources()
			.into_iter()
			.filter(|source| enabled.contains(source.id()))
			.collect()
	}

	/// Replace the static path list from operator-supplied JSON.
	///
	/// The input must be a JSON array of well-formed records; the first
	/// offending entry is named in the error and nothing is stored.
	pub fn set_static_paths_json(&self, json: &str) -> SourceResult<()> {
		let items = parse_collection_json(keys::STATIC_PATHS, json)?;
		for (index, item) in items.iter().enumerate() {
			StaticPathConfig::from_value(item).map_err(|message| {
				SettingsError::validation(keys::STATIC_PATHS, format!("entry {index}: {message}"))
			})?;
		}
		self.settings.set_collection(keys::STATIC_PATHS, items)?;
		Ok(())
	}

	/// Replace the enabled source list.
	pub fn set_enabled_sources<I, S>(&self, ids: I) -> SourceResult<()>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let items = ids.into_iter().map(|id| Value::String(id.into())).collect();
		self.settings.set_collection(keys::ENABLED_SOURCES, items)?;
		Ok(())
	}

	fn indexed_static_paths(&self) -> Vec<(usize, PathDescriptor)> {
		let entries = match self.settings.get_collection(keys::STATIC_PATHS) {
			Ok(entries) => entries.unwrap_or_default(),
			Err(e) => {
				warn!(error = %e, "could not read static paths, ignoring them");
				return Vec::new();
			}
		};

		entries
			.iter()
			.enumerate()
			.filter_map(|(index, entry)| {
				let descriptor = StaticPathConfig::from_value(entry)
					.ok()
					.and_then(|config| config.to_descriptor());
				if descriptor.is_none() {
					debug!(index, "skipping malformed static path entry");
				}
				descriptor.map(|d| (index, d))
			})
			.collect()
	}
}

impl std::fmt::Debug for SourceAggregator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SourceAggregator")
			.field("settings", &self.settings)
			.field(
				"providers",
				&self.providers.iter().map(|p| p.provider_id()).collect::<Vec<_>>(),
			)
			.finish()
	}
}
