// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Log source aggregation.
//!
//! [`SourceAggregator`] merges the configured static paths with whatever the
//! registered [`LogPathProvider`](reqlog_core::LogPathProvider)s report, and
//! hands back a fresh, ordered list of [`LogSource`](reqlog_core::LogSource)s
//! on every call. Nothing is cached between calls.

mod aggregator;
mod config;
mod error;

pub use aggregator::SourceAggregator;
pub use config::StaticPathConfig;
pub use error::{SourceError, SourceResult};
