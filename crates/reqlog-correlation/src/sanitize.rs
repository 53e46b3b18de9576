// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::Utc;

/// Maximum length of a sanitized file name component.
pub const MAX_FILE_COMPONENT_LEN: usize = 64;

/// Make `value` safe to embed in a file name.
///
/// Traversal sequences and separators are stripped first, then anything
/// outside `[A-Za-z0-9_-]` is dropped. An empty result becomes
/// `fallback-<unix-timestamp>`. The output is at most
/// [`MAX_FILE_COMPONENT_LEN`] characters.
pub fn sanitize_file_component(value: &str) -> String {
	let stripped = value
		.replace("../", "")
		.replace("..\\", "")
		.replace('/', "")
		.replace('\\', "");

	let mut cleaned: String = stripped
		.chars()
		.filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
		.collect();

	if cleaned.is_empty() {
		cleaned = format!("fallback-{}", Utc::now().timestamp());
	}

	// ASCII only at this point, so byte truncation is char-safe.
	cleaned.truncate(MAX_FILE_COMPONENT_LEN);
	cleaned
}
