//! End-to-end dispatch tests: HTTP gateway, channel registry and file store
//! wired together the way `cipherh serve` wires them.

use cipherh_channels::{ChannelError, ChannelRegistry};
use cipherh_cli::commands::serve::restore_platforms;
use cipherh_core::config::GatewayConfig;
use cipherh_core::ChannelId;
use cipherh_gateway::{AppState, Gateway};
use cipherh_integration_tests::call;
use cipherh_store::{FileStore, Store};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn gateway(store_path: &Path) -> Gateway {
    let store = FileStore::open(store_path).unwrap();
    let state = AppState::new(Arc::new(ChannelRegistry::new()), Arc::new(store));
    let config = GatewayConfig {
        public_url: Some("https://bot.example.vn".to_string()),
        ..GatewayConfig::default()
    };
    Gateway::new(config, state)
}

#[test]
fn test_registry_scenarios() {
    let registry = ChannelRegistry::new();

    let formatted = registry.format("telegram", &"A".repeat(5000), None).unwrap();
    assert_eq!(formatted.text.chars().count(), 4096);
    assert!(formatted.text.ends_with("..."));

    let err = registry.send("zalo", "", "hello", None).unwrap_err();
    assert!(matches!(err, ChannelError::InvalidRecipient { .. }));
    assert!(!registry.get_all_statuses()[&ChannelId::Zalo].active);

    assert!(registry.activate("facebook", None));
    assert!(registry.get_all_statuses()[&ChannelId::Facebook].active);
    assert!(registry.deactivate("facebook"));
    assert!(!registry.get_all_statuses()[&ChannelId::Facebook].active);

    let err = registry.send("unknown_channel", "u1", "hi", None).unwrap_err();
    assert!(matches!(err, ChannelError::UnknownChannel(_)));
    assert_eq!(registry.get_all_statuses().len(), 5);
}

#[tokio::test]
async fn test_toggle_survives_restart() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("store.json");

    {
        let gateway = gateway(&store_path);
        let mut store_record = cipherh_store::PlatformConfig::new(ChannelId::Telegram, false);
        store_record.credentials = Some(json!({"bot_token": "123456:abc"}));
        gateway
            .state()
            .store
            .upsert_platform_config(store_record)
            .await
            .unwrap();

        let (status, body) = call(
            gateway.router(),
            "POST",
            "/admin/api/platform/telegram/toggle",
            None,
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["active"], true);
    }

    // A fresh process: new registry, same store file.
    let store = FileStore::open(&store_path).unwrap();
    let registry = ChannelRegistry::new();
    assert!(!registry.get_all_statuses()[&ChannelId::Telegram].active);

    let restored = restore_platforms(&registry, &store).await.unwrap();
    assert_eq!(restored, 1);
    let telegram = &registry.get_all_statuses()[&ChannelId::Telegram];
    assert!(telegram.active);
    assert!(telegram.has_credentials);

    let state = AppState::new(Arc::new(registry), Arc::new(store));
    let gateway = Gateway::new(
        GatewayConfig {
            public_url: Some("https://bot.example.vn".to_string()),
            ..GatewayConfig::default()
        },
        state,
    );
    let (status, body) = call(gateway.router(), "GET", "/api/platforms", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["telegram"]["active"], true);
    assert_eq!(body["telegram"]["active_db"], true);
    assert_eq!(
        body["telegram"]["webhook_url"],
        "https://bot.example.vn/api/webhook/telegram"
    );
    assert_eq!(body["facebook"]["configured"], false);
}

#[tokio::test]
async fn test_conversation_history_persists() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("store.json");

    {
        let router = gateway(&store_path).router();
        for message in ["xin chào", "cảm ơn"] {
            let body = json!({"message": message, "user_id": 7788, "platform": "zalo"});
            let (status, _) = call(router.clone(), "POST", "/api/conversation", Some(body)).await;
            assert_eq!(status, 200);
        }
    }

    let router = gateway(&store_path).router();
    let (status, body) = call(router.clone(), "GET", "/api/users/zalo/7788/history", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["user"]["interaction_count"], 2);
    let history = body["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["message"], "cảm ơn");

    let (status, _) = call(router, "GET", "/api/users/zalo/nobody/history", None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_webhook_and_send_over_http() {
    let dir = TempDir::new().unwrap();
    let router = gateway(&dir.path().join("store.json")).router();

    let (status, body) = call(
        router.clone(),
        "POST",
        "/api/webhook/facebook",
        Some(json!({"object": "page", "entry": [{"id": "1"}]})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "processed");
    assert_eq!(body["result"]["processed"], true);
    assert_eq!(body["result"]["data"]["object"], "page");

    let (status, body) =
        call(router.clone(), "POST", "/api/webhook/facebook", Some(json!({}))).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Empty data received");

    let (status, _) =
        call(router.clone(), "POST", "/api/webhook/myspace", Some(json!({"a": 1}))).await;
    assert_eq!(status, 400);

    let (status, body) = call(
        router.clone(),
        "POST",
        "/api/platforms/email/send",
        Some(json!({"recipient_id": "khach@example.vn", "message": "Đơn hàng đã giao"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["result"]["status"], "prepared");
    assert!(body["result"]["message"]
        .as_str()
        .unwrap()
        .contains("Đơn hàng đã giao"));

    let (status, _) = call(
        router.clone(),
        "POST",
        "/api/platforms/email/send",
        Some(json!({"recipient_id": "not-an-address", "message": "hi"})),
    )
    .await;
    assert_eq!(status, 500);

    let (status, body) = call(router, "GET", "/api/health", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["components"]["store"]["kind"], "file");
}

#[tokio::test]
async fn test_failed_toggle_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let router = gateway(&blocker.join("store.json")).router();

    let (status, _) = call(
        router.clone(),
        "POST",
        "/admin/api/platform/telegram/toggle",
        None,
    )
    .await;
    assert_eq!(status, 500);

    let (status, body) = call(router.clone(), "GET", "/api/platforms", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["telegram"]["active"], false);
    assert_eq!(body["telegram"]["configured"], false);
    assert!(body["telegram"].get("active_db").is_none());

    let (_, body) = call(router, "GET", "/api/health", None).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["components"]["store"]["status"], "unhealthy");
}
