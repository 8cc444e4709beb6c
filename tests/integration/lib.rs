//! Shared helpers for the integration tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::path::PathBuf;
use std::process::Command;
use tower::ServiceExt;

/// Send one request through `router` and decode the JSON response.
pub async fn call(
    router: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response")
    };
    (status, json)
}

/// Locate the compiled `cipherh` binary in the workspace target directory.
///
/// Returns `None` when the binary has not been built, e.g. when only this
/// package is being tested.
pub fn cipherh_bin() -> Option<PathBuf> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> workspace root
    let workspace_root = manifest_dir.parent()?.parent()?;
    let bin = workspace_root.join("target").join("debug").join("cipherh");
    bin.exists().then_some(bin)
}

/// A `cipherh` command with a private config location and no inherited
/// credentials, or `None` when the binary is missing.
pub fn cipherh_cmd() -> Option<Command> {
    let Some(bin) = cipherh_bin() else {
        eprintln!("cipherh binary not built; run `cargo build -p cipherh-cli` first");
        return None;
    };
    let mut cmd = Command::new(bin);
    for var in [
        "CIPHERH_CONFIG",
        "CIPHERH_PORT",
        "FACEBOOK_ACCESS_TOKEN",
        "FACEBOOK_PAGE_ID",
        "TIKTOK_ACCESS_TOKEN",
        "ZALO_APP_ID",
        "ZALO_APP_SECRET",
        "TELEGRAM_BOT_TOKEN",
        "SMTP_HOST",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    Some(cmd)
}
