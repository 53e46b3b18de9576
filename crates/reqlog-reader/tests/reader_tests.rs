// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use reqlog_reader::{LogFileReader, ReaderError, MAX_LISTED_FILES, TRUNCATION_MARKER};

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
	let path = dir.join(name);
	fs::write(&path, content).unwrap();
	path
}

fn set_mtime(path: &Path, secs: u64) {
	let file = fs::File::options().write(true).open(path).unwrap();
	file
		.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
		.unwrap();
}

#[test]
fn test_tail_missing_file_is_not_found() {
	let tmp = tempfile::tempdir().unwrap();
	let err = LogFileReader::new()
		.tail(&tmp.path().join("missing.log"), 10)
		.unwrap_err();
	assert!(err.is_not_found(), "unexpected error: {err}");
}

#[test]
fn test_tail_directory_is_not_found() {
	let tmp = tempfile::tempdir().unwrap();
	let err = LogFileReader::new().tail(tmp.path(), 10).unwrap_err();
	assert!(matches!(err, ReaderError::NotFound(_)));
}

#[test]
fn test_tail_empty_file() {
	let tmp = tempfile::tempdir().unwrap();
	let path = write(tmp.path(), "empty.log", "");
	assert!(LogFileReader::new().tail(&path, 100).unwrap().is_empty());
}

#[test]
fn test_tail_fewer_lines_than_requested_returns_everything() {
	let tmp = tempfile::tempdir().unwrap();
	let content = "first\nsecond\nthird\n";
	let path = write(tmp.path(), "app.log", content);
	assert_eq!(LogFileReader::new().tail(&path, 100).unwrap(), content.as_bytes());
}

#[test]
fn test_tail_large_file_across_chunks() {
	let tmp = tempfile::tempdir().unwrap();
	let content: String = (0..5000).map(|i| format!("line {i}\n")).collect();
	let path = write(tmp.path(), "big.log", &content);

	let tail = LogFileReader::new().tail(&path, 3).unwrap();
	assert_eq!(tail, b"line 4997\nline 4998\nline 4999\n");

	let tail = LogFileReader::new()
		.with_chunk_size(7)
		.tail(&path, 2)
		.unwrap();
	assert_eq!(tail, b"line 4998\nline 4999\n");
}

#[test]
fn test_read_file_under_limit_is_unchanged() {
	let tmp = tempfile::tempdir().unwrap();
	let path = write(tmp.path(), "app.log", "hello world");
	assert_eq!(
		LogFileReader::new().read_file(&path, 1024).unwrap(),
		b"hello world"
	);
}

#[test]
fn test_read_file_exactly_at_limit_is_unchanged() {
	let tmp = tempfile::tempdir().unwrap();
	let path = write(tmp.path(), "app.log", "0123456789");
	assert_eq!(
		LogFileReader::new().read_file(&path, 10).unwrap(),
		b"0123456789"
	);
}

#[test]
fn test_read_file_over_limit_keeps_last_bytes() {
	let tmp = tempfile::tempdir().unwrap();
	let path = write(tmp.path(), "app.log", "abcdefghij\nklmnopqrst");

	let result = LogFileReader::new().read_file(&path, 5).unwrap();
	assert!(result.starts_with(TRUNCATION_MARKER.as_bytes()));
	assert_eq!(&result[TRUNCATION_MARKER.len()..], b"pqrst");
	assert_eq!(result.len(), TRUNCATION_MARKER.len() + 5);
}

#[test]
fn test_read_file_cut_inside_multibyte_character_keeps_exact_bytes() {
	let tmp = tempfile::tempdir().unwrap();
	let content = "xx\u{e9}\u{20ac}end";
	let path = write(tmp.path(), "utf8.log", content);

	let result = LogFileReader::new().read_file(&path, 5).unwrap();
	let tail = &content.as_bytes()[content.len() - 5..];
	assert_eq!(result.len(), TRUNCATION_MARKER.len() + 5);
	assert_eq!(&result[..TRUNCATION_MARKER.len()], TRUNCATION_MARKER.as_bytes());
	assert_eq!(&result[TRUNCATION_MARKER.len()..], tail);
}

#[test]
fn test_tail_returns_invalid_utf8_untouched() {
	let tmp = tempfile::tempdir().unwrap();
	let path = tmp.path().join("raw.log");
	fs::write(&path, b"ok\n\xff\xfe bad\n").unwrap();
	assert_eq!(
		LogFileReader::new().tail(&path, 1).unwrap(),
		b"\xff\xfe bad\n"
	);
}

#[test]
fn test_read_file_empty_and_missing() {
	let tmp = tempfile::tempdir().unwrap();
	let path = write(tmp.path(), "empty.log", "");
	assert!(LogFileReader::new().read_file(&path, 5).unwrap().is_empty());

	let err = LogFileReader::new()
		.read_file(&tmp.path().join("nope.log"), 5)
		.unwrap_err();
	assert!(err.is_not_found());
}

#[test]
fn test_list_files_missing_directory() {
	let tmp = tempfile::tempdir().unwrap();
	let err = LogFileReader::new()
		.list_files(&tmp.path().join("absent"), None)
		.unwrap_err();
	assert!(err.is_not_found());
}

#[test]
fn test_list_files_newest_first_and_excludes_directories() {
	let tmp = tempfile::tempdir().unwrap();
	let old = write(tmp.path(), "old.log", "o");
	let new = write(tmp.path(), "new.log", "new");
	let mid = write(tmp.path(), "mid.log", "mi");
	set_mtime(&old, 1_000);
	set_mtime(&mid, 2_000);
	set_mtime(&new, 3_000);
	fs::create_dir(tmp.path().join("archive.log")).unwrap();

	let files = LogFileReader::new().list_files(tmp.path(), None).unwrap();
	let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
	assert_eq!(names, vec!["new.log", "mid.log", "old.log"]);

	assert_eq!(files[0].size, 3);
	assert_eq!(files[0].modified, 3_000);
	assert_eq!(files[0].path, new);
}

#[test]
fn test_list_files_applies_pattern() {
	let tmp = tempfile::tempdir().unwrap();
	write(tmp.path(), "request-abc.log", "");
	write(tmp.path(), "request-def.log", "");
	write(tmp.path(), "exception.txt", "");

	let files = LogFileReader::new()
		.list_files(tmp.path(), Some("request-*.log"))
		.unwrap();
	assert_eq!(files.len(), 2);
	assert!(files.iter().all(|f| f.name.starts_with("request-")));
}

#[test]
fn test_list_files_invalid_pattern() {
	let tmp = tempfile::tempdir().unwrap();
	let err = LogFileReader::new()
		.list_files(tmp.path(), Some("[unclosed"))
		.unwrap_err();
	assert!(matches!(err, ReaderError::InvalidPattern { .. }));
}

#[test]
fn test_list_files_is_capped() {
	let tmp = tempfile::tempdir().unwrap();
	for i in 0..(MAX_LISTED_FILES + 5) {
		write(tmp.path(), &format!("f{i}.log"), "");
	}
	let files = LogFileReader::new().list_files(tmp.path(), None).unwrap();
	assert_eq!(files.len(), MAX_LISTED_FILES);
}

#[test]
fn test_get_file_info() {
	let tmp = tempfile::tempdir().unwrap();
	let path = write(tmp.path(), "app.log", "12345");
	set_mtime(&path, 42);

	let info = LogFileReader::new().get_file_info(&path).unwrap();
	assert_eq!(info.name, "app.log");
	assert_eq!(info.size, 5);
	assert_eq!(info.modified, 42);
	assert!(info.readable);

	let err = LogFileReader::new()
		.get_file_info(&tmp.path().join("gone.log"))
		.unwrap_err();
	assert!(err.is_not_found());
}
