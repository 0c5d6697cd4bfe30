//! Integration tests for model verification and installation.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use image_qa_adapters::{install_model, model_path_in, sha256_file, verify_model};
use image_qa_test_support::model::{write_constant_model, BAD_BIAS, GOOD_BIAS};
use tempfile::TempDir;

#[test]
fn test_verify_valid_model() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("weights.safetensors");
    write_constant_model(&path, GOOD_BIAS).unwrap();

    let report = verify_model(&path).expect("model should verify");
    assert_eq!(report.path, path);
    assert_eq!(report.sha256.len(), 64);
    assert!(report.size > 0);
}

#[test]
fn test_verify_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("weights.safetensors");
    std::fs::write(&path, b"not safetensors").unwrap();

    assert!(verify_model(&path).is_err());
}

#[test]
fn test_install_copies_into_models_dir() {
    let src_dir = TempDir::new().unwrap();
    let models = TempDir::new().unwrap();
    let models_dir = models.path().join("nested").join("models");

    let src = src_dir.path().join("downloaded.safetensors");
    write_constant_model(&src, GOOD_BIAS).unwrap();

    let report = install_model(&src, &models_dir).expect("install should succeed");
    assert_eq!(report.path, model_path_in(&models_dir));
    assert!(report.path.is_file());
    assert_eq!(report.sha256, sha256_file(&src).unwrap());
}

#[test]
fn test_install_rejects_invalid_without_copying() {
    let src_dir = TempDir::new().unwrap();
    let models = TempDir::new().unwrap();

    let src = src_dir.path().join("bad.safetensors");
    std::fs::write(&src, b"garbage").unwrap();

    assert!(install_model(&src, models.path()).is_err());
    assert!(!model_path_in(models.path()).exists());
}

#[test]
fn test_sha256_known_value() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("abc.txt");
    std::fs::write(&path, b"abc").unwrap();

    assert_eq!(
        sha256_file(&path).unwrap(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_reinstall_from_installed_path_keeps_weights() {
    let models = TempDir::new().unwrap();
    let src_dir = TempDir::new().unwrap();
    let src = src_dir.path().join("weights.safetensors");
    write_constant_model(&src, GOOD_BIAS).unwrap();

    let first = install_model(&src, models.path()).unwrap();
    let installed = model_path_in(models.path());

    let again = install_model(&installed, models.path()).expect("reinstall should succeed");
    assert_eq!(again.sha256, first.sha256);
    assert_eq!(again.size, first.size);
    assert_eq!(std::fs::metadata(&installed).unwrap().len(), first.size);
}

#[test]
fn test_install_replaces_existing_model() {
    let models = TempDir::new().unwrap();
    let src_dir = TempDir::new().unwrap();
    let good = src_dir.path().join("good.safetensors");
    let bad = src_dir.path().join("bad.safetensors");
    write_constant_model(&good, GOOD_BIAS).unwrap();
    write_constant_model(&bad, BAD_BIAS).unwrap();

    install_model(&good, models.path()).unwrap();
    let report = install_model(&bad, models.path()).unwrap();

    assert_eq!(report.sha256, sha256_file(&bad).unwrap());
    let leftovers: Vec<_> = std::fs::read_dir(models.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1, "unexpected files: {leftovers:?}");
}
