use std::fs;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use scout_core::{RunConfig, SeenUrls};
use scout_engine::{DirObjectStore, ObjectStore, StateStore, StoreError};
use serde_json::json;

fn init_logging() {
    scout_logging::initialize_for_tests();
}

#[tokio::test]
async fn save_then_get_round_trips_deep_equal() {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let store = DirObjectStore::new(dir.path().to_path_buf());
    let value = json!({"urls": ["https://a", "https://b"], "nested": {"count": 2}});

    store
        .save_json("probe-state", "doc.json", &value)
        .await
        .expect("save");
    let loaded = store
        .get_json("probe-state", "doc.json")
        .await
        .expect("get");

    assert_eq!(loaded, Some(value));
}

#[tokio::test]
async fn absent_key_is_none_not_an_error() {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let store = DirObjectStore::new(dir.path().to_path_buf());
    store.ensure_bucket("probe-state").await.expect("bucket");

    let loaded = store
        .get_json("probe-state", "missing.json")
        .await
        .expect("get");
    assert_eq!(loaded, None);
}

#[tokio::test]
async fn ensure_bucket_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = DirObjectStore::new(dir.path().to_path_buf());

    store.ensure_bucket("probe-state").await.expect("first");
    store.ensure_bucket("probe-state").await.expect("second");
    assert!(dir.path().join("probe-state").is_dir());
}

#[tokio::test]
async fn save_overwrites_existing_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = DirObjectStore::new(dir.path().to_path_buf());

    store
        .save_json("probe-state", "doc.json", &json!({"version": 1}))
        .await
        .expect("first save");
    store
        .save_json("probe-state", "doc.json", &json!({"version": 2}))
        .await
        .expect("second save");

    let loaded = store
        .get_json("probe-state", "doc.json")
        .await
        .expect("get");
    assert_eq!(loaded, Some(json!({"version": 2})));
}

#[tokio::test]
async fn malformed_document_is_an_error_not_absent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = DirObjectStore::new(dir.path().to_path_buf());
    store.ensure_bucket("probe-state").await.expect("bucket");
    fs::write(dir.path().join("probe-state/doc.json"), "not json {").expect("write garbage");

    let err = store
        .get_json("probe-state", "doc.json")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Malformed { .. }));
}

#[tokio::test]
async fn state_store_round_trips_typed_documents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = StateStore::new(
        Arc::new(DirObjectStore::new(dir.path().to_path_buf())),
        "probe-state",
        "config.json",
        "seen_urls.json",
    );

    let config = RunConfig {
        url_template: "https://example.com/{}".to_string(),
        start_value: 14831,
        look_ahead: 6,
        slide_window: true,
        email_subject: "new urls".to_string(),
        from_email: "scout@example.com".to_string(),
        to_email: "operator@example.com".to_string(),
    };
    let seen: SeenUrls = ["https://example.com/14831"].into_iter().collect();

    store.save_config(&config).await.expect("save config");
    store.save_seen(&seen).await.expect("save seen");

    assert_eq!(store.load_config().await.expect("load config"), Some(config));
    assert_eq!(store.load_seen().await.expect("load seen"), Some(seen));
}

#[tokio::test]
async fn state_store_reports_absent_documents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = StateStore::new(
        Arc::new(DirObjectStore::new(dir.path().to_path_buf())),
        "probe-state",
        "config.json",
        "seen_urls.json",
    );
    store.ensure_bucket().await.expect("bucket");

    assert_eq!(store.load_config().await.expect("load"), None);
    assert_eq!(store.load_seen().await.expect("load"), None);
}
