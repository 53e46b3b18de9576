// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Named log sources built from static configuration or providers.

use serde::{Deserialize, Serialize};

use crate::path::{PathDescriptor, PathValidation};

/// Where a source came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOrigin {
	Static,
	Provider,
}

impl SourceOrigin {
	pub fn as_str(&self) -> &'static str {
		match self {
			SourceOrigin::Static => "static",
			SourceOrigin::Provider => "provider",
		}
	}
}

/// A named group of paths.
///
/// Availability is computed once, when the source is built, and is true iff
/// the source has at least one path and every path exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSource {
	id: String,
	name: String,
	description: Option<String>,
	origin: SourceOrigin,
	provider_id: Option<String>,
	paths: Vec<PathDescriptor>,
	available: bool,
}

impl LogSource {
	/// Build the source for the static configuration entry at `index`.
	pub fn from_static(index: usize, path: PathDescriptor) -> Self {
		let id = format!("static_{index}");
		let name = path.name().to_string();
		let description = path.description().map(str::to_string);
		Self::build(id, name, description, SourceOrigin::Static, None, vec![path])
	}

	/// Build the source for one active provider.
	pub fn from_provider(
		provider_id: impl Into<String>,
		name: impl Into<String>,
		description: Option<String>,
		paths: Vec<PathDescriptor>,
	) -> Self {
		let provider_id = provider_id.into();
		Self::build(
			format!("provider_{provider_id}"),
			name.into(),
			description,
			SourceOrigin::Provider,
			Some(provider_id),
			paths,
		)
	}

	fn build(
		id: String,
		name: String,
		description: Option<String>,
		origin: SourceOrigin,
		provider_id: Option<String>,
		paths: Vec<PathDescriptor>,
	) -> Self {
		let available = !paths.is_empty() && paths.iter().all(PathDescriptor::exists);
		Self {
			id,
			name,
			description,
			origin,
			provider_id,
			paths,
			available,
		}
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	pub fn origin(&self) -> SourceOrigin {
		self.origin
	}

	pub fn provider_id(&self) -> Option<&str> {
		self.provider_id.as_deref()
	}

	pub fn paths(&self) -> &[PathDescriptor] {
		&self.paths
	}

	pub fn is_available(&self) -> bool {
		self.available
	}

	/// Per-path validation, re-checked against the filesystem now.
	pub fn validation(&self) -> Vec<(&PathDescriptor, PathValidation)> {
		self.paths.iter().map(|p| (p, p.validate())).collect()
	}
}
