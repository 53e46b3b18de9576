// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared types for request log inspection.
//!
//! This crate provides:
//! - [`PathDescriptor`] - one watched file or directory
//! - [`LogSource`] - a named group of paths with an availability flag
//! - [`LogPathProvider`] - capability trait for pluggable path providers
//! - [`ShopEnvironment`] / [`HostLogger`] - the host facade consumed by the
//!   request logger

pub mod environment;
pub mod level;
pub mod path;
pub mod provider;
pub mod source;

pub use environment::{HostLogger, ShopEnvironment, StaticEnvironment, TracingLogger};
pub use level::LogLevel;
pub use path::{PathDescriptor, PathKind, PathValidation};
pub use provider::LogPathProvider;
pub use source::{LogSource, SourceOrigin};
