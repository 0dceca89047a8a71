use crate::error::{config_error, env_error, AppResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Default path of the optional configuration overlay
pub const CONFIG_FILE: &str = "config/assistant.toml";

/// Default locale for assistant replies
pub const DEFAULT_LOCALE: &str = "en";

/// Main configuration structure for the assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the web server binds to
    pub host: String,
    /// Port the web server listens on
    pub port: u16,
    /// Base URL of a calendar endpoint that chat messages are forwarded to.
    /// When unset, chat dispatches to the in-process calendar service.
    pub calendar_forward_url: Option<String>,
    /// Base URL the terminal client talks to
    pub assistant_url: Option<String>,
    /// Locale used for assistant replies
    pub locale: String,
    /// Open the UI in a browser after startup
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            calendar_forward_url: None,
            assistant_url: None,
            locale: DEFAULT_LOCALE.to_string(),
            open_browser: false,
        }
    }
}

/// Partial configuration read from the TOML overlay
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    calendar_forward_url: Option<String>,
    assistant_url: Option<String>,
    locale: Option<String>,
    open_browser: Option<bool>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_env()?;

        if Path::new(CONFIG_FILE).exists() {
            let content = fs::read_to_string(CONFIG_FILE)?;
            config.merge_toml(&content)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from environment variables on top of the defaults
    fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }

        if let Ok(port) = env::var("PORT") {
            config.port = port.parse::<u16>().map_err(|_| env_error("PORT"))?;
        }

        config.calendar_forward_url = env::var("CALENDAR_FORWARD_URL").ok();
        config.assistant_url = env::var("ASSISTANT_URL").ok();

        if let Ok(locale) = env::var("ASSISTANT_LOCALE") {
            config.locale = locale;
        }

        if let Ok(open) = env::var("OPEN_BROWSER") {
            config.open_browser = parse_flag(&open).ok_or_else(|| env_error("OPEN_BROWSER"))?;
        }

        Ok(config)
    }

    /// Apply values from a TOML document; keys present in the file win
    pub fn merge_toml(&mut self, content: &str) -> AppResult<()> {
        let file: FileConfig = toml::from_str(content)?;

        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if file.calendar_forward_url.is_some() {
            self.calendar_forward_url = file.calendar_forward_url;
        }
        if file.assistant_url.is_some() {
            self.assistant_url = file.assistant_url;
        }
        if let Some(locale) = file.locale {
            self.locale = locale;
        }
        if let Some(open) = file.open_browser {
            self.open_browser = open;
        }

        Ok(())
    }

    /// Reject values that would only fail later at bind or request time
    pub fn validate(&self) -> AppResult<()> {
        if self.host.trim().is_empty() {
            return Err(config_error("host must not be empty"));
        }
        for url in [&self.calendar_forward_url, &self.assistant_url]
            .into_iter()
            .flatten()
        {
            url::Url::parse(url)?;
        }
        Ok(())
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL clients should use to reach the server
    pub fn public_url(&self) -> String {
        self.assistant_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", self.bind_address()))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.public_url(), "http://127.0.0.1:3000");
        assert!(config.calendar_forward_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_toml_overrides_present_keys_only() {
        let mut config = Config::default();
        config
            .merge_toml("port = 8080\nlocale = \"fi\"\n")
            .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.locale, "fi");
        assert_eq!(config.host, "127.0.0.1");
        assert!(!config.open_browser);
    }

    #[test]
    fn test_merge_toml_rejects_bad_types() {
        let mut config = Config::default();
        assert!(config.merge_toml("port = \"eighty\"").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_forward_url() {
        let config = Config {
            calendar_forward_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
