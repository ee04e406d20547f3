use super::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_ckdrisk_store_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

const ARTIFACT: &str =
    r#"{"model_name":"store_test","features":["Age"],"intercept":0.0,"coefficients":[0.01]}"#;

#[test]
fn test_store_caches_first_successful_load() {
    let dir = make_temp_dir();
    let path = dir.join("model.json");
    write_file(&path, ARTIFACT);

    let store = ModelStore::new();
    assert!(!store.is_loaded());
    let first = store.get_or_load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    let second = store.get_or_load(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.name, "store_test");
}

#[test]
fn test_store_reports_unavailable_and_retries() {
    let dir = make_temp_dir();
    let path = dir.join("model.json");

    let store = ModelStore::new();
    match store.get_or_load(&path) {
        Err(RiskError::ModelUnavailable { path: p, reason }) => {
            assert_eq!(p, path);
            assert!(reason.contains("cannot read artifact"));
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(!store.is_loaded());

    write_file(&path, "{ broken");
    assert!(matches!(
        store.get_or_load(&path),
        Err(RiskError::ModelUnavailable { .. })
    ));

    write_file(&path, ARTIFACT);
    assert!(store.get_or_load(&path).is_ok());
    assert!(store.is_loaded());
}

#[test]
fn test_store_refuses_second_artifact_path() {
    let dir = make_temp_dir();
    let first = dir.join("first.json");
    let other = dir.join("other.json");
    write_file(&first, ARTIFACT);
    write_file(&other, ARTIFACT);

    let store = ModelStore::new();
    store.get_or_load(&first).unwrap();
    match store.get_or_load(&other) {
        Err(RiskError::ModelMismatch { loaded, requested }) => {
            assert_eq!(loaded, first);
            assert_eq!(requested, other);
        }
        unexpected => panic!("unexpected: {unexpected:?}"),
    }
    assert!(store.get_or_load(&first).is_ok());
}
