// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use reqlog_settings::SettingsError;
use thiserror::Error;

pub type SourceResult<T> = Result<T, SourceError>;

#[derive(Error, Debug)]
pub enum SourceError {
	#[error("log source not found: {0}")]
	NotFound(String),

	#[error(transparent)]
	Settings(#[from] SettingsError),
}

impl SourceError {
	pub fn is_not_found(&self) -> bool {
		matches!(self, SourceError::NotFound(_))
	}
}
