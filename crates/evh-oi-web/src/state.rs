//! Shared application state for the web server.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use evh_oi_common::Catalog;
use evh_oi_llm::audit::AuditLog;
use evh_oi_llm::backend::{LlmBackend, LlmError, OpenAiBackend, OpenAiCompatibleBackend, UnavailableBackend};
use evh_oi_llm::nda::ChatSettings;

use crate::config::{Config, LlmConfig, LlmProvider};

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub catalog: Catalog,
    pub llm: Arc<dyn LlmBackend>,
    pub config: Config,
    pub audit: AuditLog,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config, llm: Arc<dyn LlmBackend>) -> Self {
        let audit = AuditLog::new(config.audit.capacity);
        Self {
            catalog: Catalog::seeded(),
            llm,
            config,
            audit,
            started_at: Utc::now(),
        }
    }

    /// Build state with the backend described by `config.llm`.
    pub fn from_config(config: Config) -> Result<Self, LlmError> {
        let llm = build_backend(&config.llm)?;
        Ok(Self::new(config, llm))
    }

    pub fn chat_settings(&self) -> ChatSettings {
        ChatSettings {
            temperature: self.config.llm.temperature,
            max_output_tokens: self.config.llm.max_output_tokens,
        }
    }
}

pub type SharedState = Arc<AppState>;

/// Pick the completion backend. Without a key the OpenAI provider falls
/// back to `UnavailableBackend` so the pages still serve.
pub fn build_backend(llm: &LlmConfig) -> Result<Arc<dyn LlmBackend>, LlmError> {
    let api_key = llm.resolve_api_key();
    match llm.provider {
        LlmProvider::Openai => match api_key {
            Some(key) => {
                let backend = OpenAiBackend::new(key, llm.model.clone()).with_timeout(llm.timeout())?;
                Ok(Arc::new(backend))
            }
            None => {
                tracing::warn!(
                    "OpenAI configured but no API key found (set llm.api_key, EVH_OI_OPENAI_API_KEY or OPENAI_API_KEY)"
                );
                Ok(Arc::new(UnavailableBackend::new("no OpenAI API key configured")))
            }
        },
        LlmProvider::OpenaiCompatible => {
            let base_url = llm.base_url.clone().unwrap_or_default();
            let backend = OpenAiCompatibleBackend::new(base_url, llm.model.clone(), api_key)
                .with_timeout(llm.timeout())?;
            Ok(Arc::new(backend))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatible_backend_without_key_is_built() {
        let config = Config::from_toml_str(
            "[llm]\nprovider = \"openai_compatible\"\nbase_url = \"http://localhost:8000\"\nmodel = \"qwen\"\n",
        )
        .unwrap();
        let backend = build_backend(&config.llm).unwrap();
        assert_eq!(backend.backend_name(), "openai_compatible");
        assert_eq!(backend.model_id(), "qwen");
    }

    #[test]
    fn test_state_seeds_catalog_and_chat_settings() {
        let state = AppState::new(Config::default(), Arc::new(UnavailableBackend::new("test")));
        assert_eq!(state.catalog.filings.len(), 6);
        assert_eq!(state.chat_settings(), ChatSettings::default());
        assert_eq!(state.audit.capacity(), 200);
    }
}
