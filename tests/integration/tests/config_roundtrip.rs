//! Config save/load roundtrip integration tests.
//!
//! These tests verify that configuration, credentials included, survives a
//! write to disk and that the loaded config drives the channel registry.

use cipherh_channels::ChannelRegistry;
use cipherh_core::config::{BindMode, Config, SmtpConfig};
use cipherh_core::{ChannelId, SecretString};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cipherh.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.gateway.port, config.gateway.port);
    assert_eq!(loaded.gateway.bind, config.gateway.bind);
    assert_eq!(loaded.logging.level, "cipherh=info");
    assert!(loaded.store.path.is_none());
}

#[test]
fn test_credentials_survive_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cipherh.json5");

    let mut config = Config::default();
    config.gateway.bind = BindMode::Lan;
    config.gateway.port = 9090;
    config.channels.facebook.access_token = Some(SecretString::new("EAAB-page-token"));
    config.channels.facebook.page_id = Some("1029384756".to_string());
    config.channels.email.smtp = Some(SmtpConfig {
        host: "smtp.example.vn".to_string(),
        port: 465,
        username: Some("bot".to_string()),
        password: Some(SecretString::new("hunter22")),
        from: Some("bot@example.vn".to_string()),
    });
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.gateway.bind, BindMode::Lan);
    assert_eq!(loaded.gateway.port, 9090);
    assert_eq!(loaded.channels.facebook, config.channels.facebook);
    assert_eq!(loaded.channels.email, config.channels.email);
    assert!(loaded.validate().is_ok());

    let registry = ChannelRegistry::from_config(&loaded.channels);
    let statuses = registry.get_all_statuses();
    assert!(statuses[&ChannelId::Facebook].has_credentials);
    assert!(statuses[&ChannelId::Email].has_credentials);
    assert!(!statuses[&ChannelId::Telegram].has_credentials);
    assert!(statuses.values().all(|s| !s.active));
}

#[test]
fn test_handwritten_json5() {
    let config = Config::parse(
        r#"{
            // dashboard on the LAN
            gateway: { bind: 'lan', cors: false, public_url: 'https://bot.example.vn' },
            channels: {
                telegram: { bot_token: '123456:abc' },
                zalo: { app_id: '4321', app_secret: 'zsecret' },
            },
            store: { path: '/var/lib/cipherh/store.json' },
            logging: { json: true },
        }"#,
    )
    .unwrap();

    assert_eq!(config.gateway.bind, BindMode::Lan);
    assert_eq!(config.gateway.port, 5000);
    assert!(!config.gateway.cors);
    assert!(config.channels.telegram.is_complete());
    assert!(config.channels.zalo.is_complete());
    assert!(!config.channels.tiktok.is_complete());
    assert!(config.logging.json);
    assert_eq!(config.logging.level, "cipherh=info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/cipherh.json5"));
    assert!(result.is_err());

    let defaults = Config::load_or_default(Path::new("/nonexistent/cipherh.json5")).unwrap();
    assert_eq!(defaults.gateway.port, 5000);
}

#[test]
fn test_config_parse_invalid() {
    assert!(Config::parse("not valid json").is_err());
    assert!(Config::parse("{ gateway: { port: 'eighty' } }").is_err());
}
