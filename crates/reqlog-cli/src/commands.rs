// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use chrono::DateTime;
use reqlog_core::{LogSource, PathDescriptor};
use reqlog_logs::RequestLogProvider;
use reqlog_reader::LogFileReader;
use reqlog_redact::SensitiveDataRedactor;
use reqlog_settings::{LoadedConfig, ModuleSettings};
use reqlog_sources::SourceAggregator;
use serde_json::Value;

pub struct App {
	settings: ModuleSettings,
	aggregator: SourceAggregator,
	reader: LogFileReader,
}

impl App {
	pub fn new(config: LoadedConfig) -> Self {
		let settings = config.settings();
		let provider = RequestLogProvider::new(config.shop.log_dir.clone(), settings.clone());
		Self {
			aggregator: SourceAggregator::new(settings.clone(), vec![Box::new(provider)]),
			settings,
			reader: LogFileReader::new(),
		}
	}

	pub fn sources(&self, out: &mut impl Write, enabled_only: bool) -> Result<()> {
		let sources = if enabled_only {
			self.aggregator.list_enabled_sources()
		} else {
			self.aggregator.list_sources()
		};

		for source in &sources {
			let paths: Vec<String> = source
				.paths()
				.iter()
				.map(|p| p.path().display().to_string())
				.collect();
			writeln!(
				out,
				"{:<24} {:<11} {:<8} {:<24} {}",
				source.id(),
				if source.is_available() {
					"available"
				} else {
					"unavailable"
				},
				source.origin().as_str(),
				source.name(),
				paths.join(", ")
			)?;
			if !source.is_available() {
				for (path, validation) in source.validation() {
					if !validation.is_ok() {
						writeln!(out, "  {} {}", validation.as_str(), path.path().display())?;
					}
				}
			}
		}
		Ok(())
	}

	pub fn tail(
		&self,
		out: &mut impl Write,
		source_id: &str,
		file: Option<&str>,
		lines: usize,
	) -> Result<()> {
		let path = self.target_file(source_id, file)?;
		let content = self
			.reader
			.tail(&path, lines)
			.with_context(|| format!("cannot tail source {source_id}"))?;
		out.write_all(&content)?;
		Ok(())
	}

	pub fn read(
		&self,
		out: &mut impl Write,
		source_id: &str,
		file: Option<&str>,
		max_bytes: u64,
	) -> Result<()> {
		let path = self.target_file(source_id, file)?;
		let content = self
			.reader
			.read_file(&path, max_bytes)
			.with_context(|| format!("cannot read source {source_id}"))?;
		out.write_all(&content)?;
		Ok(())
	}

	pub fn ls(&self, out: &mut impl Write, source_id: &str, pattern: Option<&str>) -> Result<()> {
		let source = self.aggregator.get_source_by_id(source_id)?;
		let directory = first_directory(&source)?;
		let pattern = pattern.or(directory.pattern());

		let files = self
			.reader
			.list_files(directory.path(), pattern)
			.with_context(|| format!("cannot list source {source_id}"))?;
		for file in files {
			writeln!(
				out,
				"{:>10} {} {}",
				file.size,
				format_timestamp(file.modified),
				file.name
			)?;
		}
		Ok(())
	}

	pub fn info(&self, out: &mut impl Write, path: &Path) -> Result<()> {
		let info = self.reader.get_file_info(path)?;
		writeln!(out, "name:     {}", info.name)?;
		writeln!(out, "path:     {}", info.path.display())?;
		writeln!(out, "size:     {}", info.size)?;
		writeln!(out, "modified: {}", format_timestamp(info.modified))?;
		writeln!(out, "readable: {}", info.readable)?;
		Ok(())
	}

	pub fn redact(&self, out: &mut impl Write, input: &str) -> Result<()> {
		let params = match serde_json::from_str::<Value>(input).context("invalid JSON input")? {
			Value::Object(params) => params,
			_ => bail!("input must be a JSON object"),
		};
		let redacted = SensitiveDataRedactor::from_settings(&self.settings).redact(&params);
		writeln!(out, "{}", serde_json::to_string_pretty(&redacted)?)?;
		Ok(())
	}

	/// The file a tail or read addresses: the source's file path, or `file`
	/// inside its directory path.
	fn target_file(&self, source_id: &str, file: Option<&str>) -> Result<PathBuf> {
		let source = self.aggregator.get_source_by_id(source_id)?;
		match file {
			Some(name) => {
				check_file_name(name)?;
				Ok(first_directory(&source)?.path().join(name))
			}
			None => source
				.paths()
				.iter()
				.find(|p| p.is_file())
				.map(|p| p.path().to_path_buf())
				.ok_or_else(|| {
					anyhow!("source {source_id} has no file path, pass --file to pick one from its directory")
				}),
		}
	}
}

fn first_directory(source: &LogSource) -> Result<&PathDescriptor> {
	source
		.paths()
		.iter()
		.find(|p| p.is_directory())
		.ok_or_else(|| anyhow!("source {} has no directory path", source.id()))
}

/// Only a bare file name may be joined onto a source directory.
fn check_file_name(name: &str) -> Result<()> {
	let mut components = Path::new(name).components();
	match (components.next(), components.next()) {
		(Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
		_ => bail!("invalid file name: {name}"),
	}
}

fn format_timestamp(secs: i64) -> String {
	DateTime::from_timestamp(secs, 0)
		.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
		.unwrap_or_else(|| secs.to_string())
}
