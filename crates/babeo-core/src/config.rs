use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::chat::gemini::GEMINI_API_BASE;
use super::platform;

/// Environment variable that supplies the chat API key. Takes precedence
/// over `chat.api_key` in the config file.
pub const API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_http_enabled")]
    pub enabled: bool,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Where site content comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content file that replaces the builtin fixtures when it exists.
    /// Defaults to `$XDG_CONFIG_HOME/babeo/content.toml`.
    #[serde(default = "default_content_toml")]
    pub content_toml: PathBuf,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            enabled: default_http_enabled(),
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            content_toml: default_content_toml(),
        }
    }
}

impl ChatConfig {
    /// API key from the environment, falling back to the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        pick_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }
}

fn pick_api_key(env: Option<String>, file: Option<&str>) -> Option<String> {
    env.filter(|k| !k.trim().is_empty())
        .or_else(|| file.filter(|k| !k.trim().is_empty()).map(str::to_string))
}

fn default_http_enabled() -> bool {
    true
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8990
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_base_url() -> String {
    GEMINI_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_content_toml() -> PathBuf {
    platform::config_dir().join("content.toml")
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.http.enabled);
        assert_eq!(config.http.port, 8990);
        assert_eq!(config.http.bind_address, "127.0.0.1");
        assert_eq!(config.chat.model, "gemini-3-flash-preview");
        assert!(config.chat.base_url.starts_with("https://"));
        assert!(config.chat.api_key.is_none());
        assert!(config.content.content_toml.ends_with("babeo/content.toml"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [chat]
            model = "gemini-test"

            [http]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.chat.model, "gemini-test");
        assert_eq!(config.chat.timeout_secs, 30);
        assert!(!config.http.enabled);
        assert_eq!(config.http.port, 8990);
    }

    #[test]
    fn api_key_is_not_written_when_absent() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(!text.contains("api_key"));
    }

    #[test]
    fn env_key_wins_over_file_and_blanks_are_ignored() {
        assert_eq!(
            pick_api_key(Some("env".into()), Some("file")),
            Some("env".into())
        );
        assert_eq!(pick_api_key(Some("  ".into()), Some("file")), Some("file".into()));
        assert_eq!(pick_api_key(None, Some("")), None);
        assert_eq!(pick_api_key(None, None), None);
    }
}
