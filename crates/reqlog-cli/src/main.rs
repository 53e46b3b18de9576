// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod commands;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqlog_reader::{DEFAULT_MAX_BYTES, DEFAULT_TAIL_LINES};
use reqlog_settings::load_config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::App;

/// reqlog - inspect configured log sources
#[derive(Parser, Debug)]
#[command(name = "reqlog", version, about, long_about = None)]
struct Args {
	/// Path to configuration file (defaults to the user config directory)
	#[arg(short, long, env = "REQLOG_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// List log sources
	Sources {
		/// Only sources enabled for remote inspection
		#[arg(long)]
		enabled: bool,
	},
	/// Print the last lines of a source's file
	Tail {
		source_id: String,
		/// File inside a directory source
		#[arg(long)]
		file: Option<String>,
		/// Number of lines
		#[arg(short = 'n', long, default_value_t = DEFAULT_TAIL_LINES)]
		lines: usize,
	},
	/// Print a source's file, keeping only the end of large files
	Read {
		source_id: String,
		/// File inside a directory source
		#[arg(long)]
		file: Option<String>,
		/// Byte limit
		#[arg(long, default_value_t = DEFAULT_MAX_BYTES)]
		max_bytes: u64,
	},
	/// List files of a directory source, newest first
	Ls {
		source_id: String,
		/// Glob pattern (defaults to the source's configured pattern)
		#[arg(long)]
		pattern: Option<String>,
	},
	/// Show metadata for a path
	Info { path: PathBuf },
	/// Redact a JSON object of request parameters read from stdin
	Redact,
}

fn default_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("reqlog").join("config.toml"))
}

fn init_tracing() {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.with_writer(io::stderr)
		.init();
}

fn run(args: Args) -> Result<()> {
	let config_path = args.config.or_else(default_config_path);
	debug!(config = ?config_path, "loading configuration");
	let config = load_config(config_path).context("failed to load configuration")?;
	let app = App::new(config);

	let mut out = io::stdout().lock();
	match args.command {
		Command::Sources { enabled } => app.sources(&mut out, enabled),
		Command::Tail {
			source_id,
			file,
			lines,
		} => app.tail(&mut out, &source_id, file.as_deref(), lines),
		Command::Read {
			source_id,
			file,
			max_bytes,
		} => app.read(&mut out, &source_id, file.as_deref(), max_bytes),
		Command::Ls { source_id, pattern } => app.ls(&mut out, &source_id, pattern.as_deref()),
		Command::Info { path } => app.info(&mut out, &path),
		Command::Redact => {
			let mut input = String::new();
			io::stdin()
				.read_to_string(&mut input)
				.context("failed to read stdin")?;
			app.redact(&mut out, &input)
		}
	}
}

fn main() {
	let args = Args::parse();
	init_tracing();

	if let Err(e) = run(args) {
		eprintln!("error: {e:#}");
		std::process::exit(1);
	}
}
