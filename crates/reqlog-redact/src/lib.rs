// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sanitizes request parameters and URLs before they are written to a log.
//!
//! Redacted values are replaced with the literal [`REDACTED`] marker.

mod params;
mod query;

pub use params::{RedactionMode, SensitiveDataRedactor, ALWAYS_PRESERVED_KEYS, DEFAULT_BLOCKLIST};
pub use query::{redact_url, URL_PRESERVED_KEYS};

/// Replacement for every redacted value.
pub const REDACTED: &str = "[redacted]";
