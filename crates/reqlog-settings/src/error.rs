// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use thiserror::Error;

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Error, Debug)]
pub enum SettingsError {
	#[error("settings backend error: {0}")]
	Backend(String),

	#[error("setting '{key}' has unexpected type: expected {expected}")]
	TypeMismatch { key: String, expected: &'static str },

	#[error("invalid value for '{key}': {message}")]
	Validation { key: String, message: String },

	#[error("failed to read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("invalid environment value for {key}: {message}")]
	InvalidEnv { key: String, message: String },
}

impl SettingsError {
	pub fn validation(key: impl Into<String>, message: impl Into<String>) -> Self {
		SettingsError::Validation {
			key: key.into(),
			message: message.into(),
		}
	}
}
