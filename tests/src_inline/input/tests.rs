use super::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("struc_score_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

#[test]
fn test_read_lines_strips_terminators() {
    let dir = make_temp_dir();
    let path = dir.join("list.txt");
    fs::write(&path, "a.vasp\r\nb.vasp\n  c.vasp  \nlast").unwrap();

    let lines = read_lines(&path).unwrap();
    assert_eq!(lines, vec!["a.vasp", "b.vasp", "  c.vasp  ", "last"]);
}

#[test]
fn test_read_lines_gz() {
    let dir = make_temp_dir();
    let path = dir.join("list.txt.gz");
    write_gz(&path, "x\ny\n");

    let lines = read_lines(&path).unwrap();
    assert_eq!(lines, vec!["x", "y"]);
}

#[test]
fn test_missing_file_reports_path() {
    let dir = make_temp_dir();
    let path = dir.join("absent.txt");

    let err = read_lines(&path).unwrap_err();
    assert!(matches!(err, InputError::Io { .. }));
    assert!(err.to_string().contains("absent.txt"));
}

#[test]
fn test_corrupt_gz_is_io_error() {
    let dir = make_temp_dir();
    let path = dir.join("broken.vasp.gz");
    fs::write(&path, b"this is not gzip data\n").unwrap();

    let err = read_lines(&path).unwrap_err();
    assert!(matches!(err, InputError::Io { .. }));
    assert!(err.to_string().contains("broken.vasp.gz"));
}

#[test]
fn test_non_utf8_is_io_error() {
    let dir = make_temp_dir();
    let path = dir.join("latin1.txt");
    fs::write(&path, [b'a', 0xff, 0xfe, b'\n']).unwrap();

    let err = read_lines(&path).unwrap_err();
    assert!(matches!(err, InputError::Io { .. }));
}
