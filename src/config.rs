use std::path::PathBuf;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::article::GeneratorConfig;

const DEFAULT_MODEL: &str = "claude-sonnet-4-6";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub default_lang: Option<String>,
    pub default_model: Option<String>,
    pub bind: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub api_base: Option<String>,
}

impl Config {
    /// Load config from ~/.config/yt2article/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    /// Resolve generator settings, overlaying credentials from the
    /// environment once so nothing downstream reads process state.
    pub fn generator_config(&self, model_override: Option<&str>) -> GeneratorConfig {
        let model = model_override
            .map(str::to_string)
            .or_else(|| self.default_model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        GeneratorConfig {
            openai_api_key: env_key("OPENAI_API_KEY"),
            anthropic_api_key: env_key("ANTHROPIC_API_KEY"),
            model,
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            api_base: self.api_base.clone(),
        }
    }
}

fn env_key(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("yt2article")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
default_lang = "es"
default_model = "gpt-4o"
bind = "0.0.0.0:9000"
max_tokens = 2048
temperature = 0.2
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_lang.as_deref(), Some("es"));
        assert_eq!(config.default_model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.bind.as_deref(), Some("0.0.0.0:9000"));
        assert_eq!(config.max_tokens, Some(2048));
        assert_eq!(config.temperature, Some(0.2));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.default_lang.is_none());
        assert!(config.default_model.is_none());
        assert!(config.bind.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(r#"default_lang = "fr""#).unwrap();
        assert_eq!(config.default_lang.as_deref(), Some("fr"));
        assert!(config.max_tokens.is_none());
    }

    #[test]
    fn test_generator_config_defaults() {
        let config = Config::default();
        let generator = config.generator_config(None);
        assert_eq!(generator.model, DEFAULT_MODEL);
        assert_eq!(generator.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(generator.temperature, DEFAULT_TEMPERATURE);
        assert!(generator.api_base.is_none());
    }

    #[test]
    fn test_api_base_passed_through() {
        let config = Config {
            api_base: Some("http://localhost:9999".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.generator_config(None).api_base.as_deref(),
            Some("http://localhost:9999")
        );
    }

    #[test]
    fn test_generator_config_override_wins() {
        let config = Config {
            default_model: Some("gpt-4o".to_string()),
            ..Default::default()
        };
        assert_eq!(config.generator_config(Some("gpt-4o-mini")).model, "gpt-4o-mini");
        assert_eq!(config.generator_config(None).model, "gpt-4o");
    }
}
