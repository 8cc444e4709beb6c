//! Configuration loading and persistence.

use super::{Config, SmtpConfig};
use crate::env;
use crate::error::ConfigError;
use crate::paths;
use crate::secret::SecretString;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(ConfigError::NotFound(_)) => {
                debug!("No configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 has no serializer; plain JSON is valid JSON5.
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Overlay credentials and settings from environment variables.
    ///
    /// Only variables that are set and non-empty override the file values.
    pub fn apply_env_overrides(&mut self) {
        let channels = &mut self.channels;

        if let Some(token) = env::get_var("FACEBOOK_ACCESS_TOKEN") {
            channels.facebook.access_token = Some(SecretString::new(token));
        }
        if let Some(page_id) = env::get_var("FACEBOOK_PAGE_ID") {
            channels.facebook.page_id = Some(page_id);
        }
        if let Some(token) = env::get_var("TIKTOK_ACCESS_TOKEN") {
            channels.tiktok.access_token = Some(SecretString::new(token));
        }
        if let Some(app_id) = env::get_var("ZALO_APP_ID") {
            channels.zalo.app_id = Some(app_id);
        }
        if let Some(secret) = env::get_var("ZALO_APP_SECRET") {
            channels.zalo.app_secret = Some(SecretString::new(secret));
        }
        if let Some(token) = env::get_var("TELEGRAM_BOT_TOKEN") {
            channels.telegram.bot_token = Some(SecretString::new(token));
        }
        if let Some(host) = env::get_var("SMTP_HOST") {
            let smtp = channels.email.smtp.get_or_insert_with(|| SmtpConfig {
                host: String::new(),
                port: 587,
                username: None,
                password: None,
                from: None,
            });
            smtp.host = host;
            if let Some(port) = env::get_u16("SMTP_PORT") {
                smtp.port = port;
            }
        }

        if let Some(port) = env::get_u16("CIPHERH_PORT") {
            self.gateway.port = port;
        }
        if env::get_bool("CIPHERH_LOG_JSON") {
            self.logging.json = true;
        }
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.gateway.port == 0 {
            errors.push("Gateway port cannot be 0".to_string());
        }

        if let Some(url) = &self.gateway.public_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(format!("Gateway public_url must be http(s), got '{}'", url));
            }
        }

        let facebook = &self.channels.facebook;
        if facebook.access_token.is_some() && facebook.page_id.is_none() {
            errors.push("Facebook access_token is set but page_id is missing".to_string());
        }

        let zalo = &self.channels.zalo;
        if zalo.app_id.is_some() != zalo.app_secret.is_some() {
            errors.push("Zalo requires both app_id and app_secret".to_string());
        }

        if let Some(smtp) = &self.channels.email.smtp {
            if smtp.host.trim().is_empty() {
                errors.push("Email SMTP host cannot be empty".to_string());
            }
            if smtp.port == 0 {
                errors.push("Email SMTP port cannot be 0".to_string());
            }
        }

        if self.logging.level.trim().is_empty() {
            errors.push("Logging level cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BindMode;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config.gateway.port, 5000);
        assert_eq!(config.gateway.bind, BindMode::Loopback);
        assert!(config.gateway.cors);
        assert!(config.store.path.is_none());
        assert_eq!(config.logging.level, "cipherh=info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_json5_with_channels() {
        let config = Config::parse(
            r#"{
                // JSON5 allows comments and trailing commas
                gateway: { port: 8080, bind: "lan" },
                channels: {
                    facebook: { access_token: "EAAB", page_id: "1234" },
                    telegram: { bot_token: "123:abc" },
                    email: { smtp: { host: "smtp.example.com" } },
                },
            }"#,
        )
        .unwrap();

        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.gateway.bind, BindMode::Lan);
        assert!(config.channels.facebook.is_complete());
        assert!(config.channels.telegram.is_complete());
        assert!(!config.channels.tiktok.is_complete());
        assert_eq!(config.channels.email.smtp.as_ref().unwrap().port, 587);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("{ gateway: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json5(_)));
    }

    #[test]
    fn test_parse_rejects_unknown_credential_keys() {
        let err = Config::parse("{ channels: { telegram: { bot_tokn: '123:abc' } } }").unwrap_err();
        assert!(err.to_string().contains("bot_tokn"));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = Config::default();
        config.gateway.port = 0;
        config.channels.facebook.access_token = Some(SecretString::new("token"));
        config.channels.zalo.app_id = Some("app".to_string());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("port cannot be 0"));
        assert!(err.contains("page_id is missing"));
        assert!(err.contains("app_id and app_secret"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cipherh.json5");

        let mut config = Config::default();
        config.gateway.port = 7000;
        config.channels.telegram.bot_token = Some(SecretString::new("123:abc"));
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.gateway.port, 7000);
        assert_eq!(
            loaded.channels.telegram.bot_token,
            Some(SecretString::new("123:abc"))
        );
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.json5")).unwrap();
        assert_eq!(config.gateway.port, 5000);

        let err = Config::load(&dir.path().join("missing.json5")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("TIKTOK_ACCESS_TOKEN", "tt-token");
        std::env::set_var("ZALO_APP_ID", "zalo-app");
        std::env::set_var("ZALO_APP_SECRET", "zalo-secret");

        let mut config = Config::default();
        config.apply_env_overrides();

        std::env::remove_var("TIKTOK_ACCESS_TOKEN");
        std::env::remove_var("ZALO_APP_ID");
        std::env::remove_var("ZALO_APP_SECRET");

        assert!(config.channels.tiktok.is_complete());
        assert!(config.channels.zalo.is_complete());
        assert_eq!(config.channels.zalo.app_id.as_deref(), Some("zalo-app"));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let mut config = Config::default();
        config.channels.telegram.bot_token = Some(SecretString::new("very-secret-token"));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("very-secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
