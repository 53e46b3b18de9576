// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-request correlation ids.
//!
//! A [`CorrelationIdPipeline`] resolves an inbound id from a cookie or
//! header, generates a fresh one when none is present, and emits the result
//! back to the client. The id names the request's log file (after
//! [`sanitize_file_component`]) and tags every entry written for it.
//!
//! ```text
//! request headers ─► resolvers (cookie, header) ─┬─► id ─► emitters (Set-Cookie, header)
//!                                                └─ none ─► generator
//! ```

mod emitter;
mod generator;
mod pipeline;
mod resolver;
mod sanitize;

pub use emitter::{CookieEmitter, HeaderEmitter, IdEmitter};
pub use generator::{IdGenerator, RandomIdGenerator, ID_LENGTH};
pub use pipeline::CorrelationIdPipeline;
pub use resolver::{CookieResolver, HeaderResolver, IdResolver};
pub use sanitize::{sanitize_file_component, MAX_FILE_COMPONENT_LEN};
