//! Unit tests for CLI commands.

use super::*;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

fn create_test_context(temp_dir: &TempDir) -> CommandContext {
    CommandContext {
        cwd: temp_dir.path().to_path_buf(),
        output: crate::output::OutputHandler::new(),
    }
}

fn write_app_json(dir: &std::path::Path, contents: &str) {
    fs::write(dir.join("app.json"), contents).unwrap();
}

const APP_JSON: &str = r#"{
    "id": "x", "publisher": "Acme", "name": "App", "application": "22.0",
    "dependencies": [
        {"publisher": "Acme", "name": "Lib", "id": "y", "version": "1.0"}
    ]
}"#;

fn archive(manifest_json: &str) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (name, contents) in [
        ("symbols.app", b"payload".as_slice()),
        ("manifest.json", manifest_json.as_bytes()),
    ] {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, contents).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

async fn mount_package(server: &MockServer, key: &str, versions: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/index.json", key)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "versions": versions
        })))
        .mount(server)
        .await;
    for version in versions {
        Mock::given(method("GET"))
            .and(path(format!("/{}/{}/content", key, version)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(archive("{}")))
            .mount(server)
            .await;
    }
}

#[test]
fn test_app_dir_resolution() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    // Default is the working directory
    let dir = ctx.app_dir(None).unwrap();
    assert_eq!(dir.as_std_path(), temp_dir.path());

    // A relative argument is joined onto it
    let dir = ctx.app_dir(Some("sub".into())).unwrap();
    assert_eq!(dir.as_std_path(), temp_dir.path().join("sub"));

    // An absolute argument is taken as-is
    let dir = ctx.app_dir(Some(temp_dir.path().join("abs"))).unwrap();
    assert_eq!(dir.as_std_path(), temp_dir.path().join("abs"));
}

#[test]
fn test_effective_cache_root_override() {
    let temp_dir = create_temp_dir();
    let root = effective_cache_root(Some(temp_dir.path().to_path_buf())).unwrap();
    assert_eq!(root, temp_dir.path());
}

#[tokio::test]
async fn test_download_command_end_to_end() {
    let server = MockServer::start().await;
    mount_package(&server, "acme.lib.symbols.y", &["1.0", "1.5"]).await;
    mount_package(&server, "microsoft.application.symbols", &["22.0"]).await;

    let app_dir = create_temp_dir();
    write_app_json(app_dir.path(), APP_JSON);
    let cache_dir = create_temp_dir();
    let ctx = create_test_context(&app_dir);

    download::execute(
        None,
        vec![server.uri()],
        Some(cache_dir.path().to_path_buf()),
        &ctx,
    )
    .await
    .unwrap();

    let app_cache = cache_dir.path().join("Acme").join("App").join("x");
    assert!(app_cache.join(alsym_cache::LOCK_FILE).is_file());
    assert!(app_cache.join("Acme.Lib.symbols.y.1.5.app").is_file());
}

#[tokio::test]
async fn test_download_fails_without_feeds() {
    let app_dir = create_temp_dir();
    write_app_json(app_dir.path(), APP_JSON);
    let cache_dir = create_temp_dir();
    let ctx = create_test_context(&app_dir);

    let result = download::execute(
        None,
        Vec::new(),
        Some(cache_dir.path().to_path_buf()),
        &ctx,
    )
    .await;

    assert!(matches!(
        result,
        Err(AlsymError::ConfigValidation { .. })
    ));
}

#[tokio::test]
async fn test_show_lock_without_lockfile_succeeds() {
    let app_dir = create_temp_dir();
    write_app_json(app_dir.path(), APP_JSON);
    let cache_dir = create_temp_dir();
    let ctx = create_test_context(&app_dir);

    show_lock::execute(None, Some(cache_dir.path().to_path_buf()), &ctx)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_clean_removes_app_cache() {
    let app_dir = create_temp_dir();
    write_app_json(app_dir.path(), APP_JSON);
    let cache_dir = create_temp_dir();
    let ctx = create_test_context(&app_dir);

    let app_cache = cache_dir.path().join("Acme").join("App").join("x");
    fs::create_dir_all(&app_cache).unwrap();
    fs::write(app_cache.join("Acme.Lib.symbols.y.1.5.app"), b"payload").unwrap();

    clean::execute(None, false, Some(cache_dir.path().to_path_buf()), &ctx)
        .await
        .unwrap();

    assert!(!app_cache.exists());
    assert!(cache_dir.path().exists());
}

#[tokio::test]
async fn test_clean_all_removes_root() {
    let app_dir = create_temp_dir();
    let root_parent = create_temp_dir();
    let cache_root = root_parent.path().join("alsym-cache");
    fs::create_dir_all(cache_root.join("Acme")).unwrap();
    let ctx = create_test_context(&app_dir);

    clean::execute(None, true, Some(cache_root.clone()), &ctx)
        .await
        .unwrap();

    assert!(!cache_root.exists());
}

#[tokio::test]
async fn test_download_missing_manifest_is_config_error() {
    let app_dir = create_temp_dir();
    let ctx = create_test_context(&app_dir);

    let result = download::execute(
        None,
        vec!["https://feed.example.com".to_string()],
        Some(app_dir.path().to_path_buf()),
        &ctx,
    )
    .await;

    assert!(result.is_err());
}
