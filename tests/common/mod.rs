use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tempfile::TempDir;

use datadash::api::transport::http::HttpTransport;
use datadash::store::MemorySessionRepository;
use datadash::AppContext;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Successful envelope around `data`
#[allow(dead_code)]
pub fn ok_envelope(data: Value) -> Value {
    json!({"code": 200, "data": data, "message": "ok", "success": true})
}

/// Failed envelope with no data
#[allow(dead_code)]
pub fn error_envelope(code: i64, message: &str) -> Value {
    json!({"code": code, "data": null, "message": message, "success": false})
}

/// Context talking HTTP to `base_url` with in-memory session storage
#[allow(dead_code)]
pub fn http_context(base_url: &str, token: Option<&str>) -> AppContext {
    let transport = HttpTransport::new(
        url::Url::parse(base_url).expect("valid url"),
        token,
        Duration::from_secs(5),
    )
    .expect("failed to build transport");
    AppContext::with_parts(
        Arc::new(transport),
        Arc::new(MemorySessionRepository::new()),
    )
}
