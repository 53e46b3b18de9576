// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use crate::path::PathDescriptor;

/// A pluggable contributor of log paths.
///
/// Implementations are registered explicitly, as an ordered list handed to
/// the aggregator at startup. Registration order is the output order of
/// provider sources.
pub trait LogPathProvider: Send + Sync {
	/// Stable identifier, used to build the source id `provider_<id>`.
	fn provider_id(&self) -> &str;

	fn provider_name(&self) -> &str;

	fn provider_description(&self) -> Option<&str> {
		None
	}

	/// Inactive providers contribute no source at all.
	fn is_active(&self) -> bool {
		true
	}

	/// Paths contributed right now. An empty list marks the source unavailable.
	fn log_paths(&self) -> Vec<PathDescriptor>;
}
