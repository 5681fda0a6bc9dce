//! Configuration loading for the EVH OI server.
//! Reads evh-oi.toml from the current directory or the path in EVH_OI_CONFIG.
//! A missing file is not fatal: every section has defaults.

use std::path::Path;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

pub const CONFIG_ENV: &str = "EVH_OI_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "evh-oi.toml";
const API_KEY_ENVS: [&str; 2] = ["EVH_OI_OPENAI_API_KEY", "OPENAI_API_KEY"];

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Request body cap. Uploads arrive base64-encoded inside JSON, so this
    /// sits above the 10MB PDF limit shown on the upload page.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host()             -> String { "127.0.0.1".to_string() }
fn default_port()             -> u16    { 3000 }
fn default_static_dir()       -> String { "crates/evh-oi-web/static".to_string() }
fn default_max_upload_bytes() -> usize  { 16 * 1024 * 1024 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    Openai,
    OpenaiCompatible,
}

#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: LlmProvider,
    #[serde(default = "default_model")]
    pub model: String,
    /// Required for `openai_compatible`; ignored for `openai`.
    pub base_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider()          -> LlmProvider { LlmProvider::Openai }
fn default_model()             -> String { "gpt-4o".to_string() }
fn default_temperature()       -> f32 { 0.3 }
fn default_max_output_tokens() -> u32 { 1000 }
fn default_timeout_secs()      -> u64 { 60 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
            api_key: None,
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// The configured key, else the first non-empty key environment variable.
    pub fn resolve_api_key(&self) -> Option<SecretString> {
        if let Some(key) = &self.api_key {
            return Some(SecretString::from(key.expose_secret().to_string()));
        }
        API_KEY_ENVS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|v| !v.trim().is_empty())
            .map(SecretString::from)
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(SecretString::from))
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Extract text from uploaded PDFs instead of using the placeholder body.
    #[serde(default)]
    pub extract_pdf_text: bool,
    #[serde(default = "default_max_document_chars")]
    pub max_document_chars: usize,
}

fn default_max_document_chars() -> usize { 60_000 }

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { extract_pdf_text: false, max_document_chars: default_max_document_chars() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    #[serde(default = "default_audit_capacity")]
    pub capacity: usize,
}

fn default_audit_capacity() -> usize { 200 }

impl Default for AuditConfig {
    fn default() -> Self {
        Self { capacity: default_audit_capacity() }
    }
}

impl Config {
    /// Load configuration from evh-oi.toml.
    /// Checks EVH_OI_CONFIG first, then the current directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        if !Path::new(&path).exists() {
            tracing::warn!(
                "Config file not found: {path}. Using defaults; copy evh-oi.example.toml to evh-oi.toml to customise."
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path, "Configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.llm.provider == LlmProvider::OpenaiCompatible && config.llm.base_url.is_none() {
            anyhow::bail!("llm.base_url is required when llm.provider = \"openai_compatible\"");
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.llm.provider, LlmProvider::Openai);
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.temperature, 0.3);
        assert_eq!(config.llm.max_output_tokens, 1000);
        assert!(!config.analysis.extract_pdf_text);
        assert_eq!(config.audit.capacity, 200);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config = Config::from_toml_str(
            r#"
            [server]
            port = 8088

            [llm]
            model = "gpt-4o-mini"
            api_key = "sk-from-file"

            [analysis]
            extract_pdf_text = true
            "#,
        )
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8088");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.timeout_secs, 60);
        assert_eq!(config.analysis.max_document_chars, 60_000);
        let key = config.llm.resolve_api_key().unwrap();
        assert_eq!(key.expose_secret(), "sk-from-file");
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let config = Config::from_toml_str("[llm]\napi_key = \"  \"\n").unwrap();
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_compatible_provider_requires_base_url() {
        let err = Config::from_toml_str("[llm]\nprovider = \"openai_compatible\"\n");
        assert!(err.is_err());
        let ok = Config::from_toml_str(
            "[llm]\nprovider = \"openai_compatible\"\nbase_url = \"http://localhost:8000\"\n",
        )
        .unwrap();
        assert_eq!(ok.llm.base_url.as_deref(), Some("http://localhost:8000"));
    }

    #[test]
    fn test_debug_output_redacts_key() {
        let config = Config::from_toml_str("[llm]\napi_key = \"sk-secret\"\n").unwrap();
        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
