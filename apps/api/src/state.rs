use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::rate_limit::SlidingWindowLimiter;
use crate::render::TemplateRenderer;
use crate::suggestions::SuggestionBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Handlebars registry with helpers registered once at startup.
    pub renderer: Arc<TemplateRenderer>,
    /// Pluggable suggestion backend. Default: LlmSuggestionBackend over the shared LLM client.
    pub suggester: Arc<dyn SuggestionBackend>,
    pub request_limiter: Arc<SlidingWindowLimiter>,
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;

    use super::*;
    use crate::config::test_config;
    use crate::llm_client::LlmError;

    struct OfflineBackend;

    #[async_trait]
    impl SuggestionBackend for OfflineBackend {
        async fn complete(&self, _prompt: &str, _system: &str) -> Result<Value, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    /// State for extractor and handler tests. The pool never connects unless a query runs.
    pub(crate) fn test_state() -> AppState {
        let config = test_config();
        AppState {
            db: PgPoolOptions::new()
                .connect_lazy(&config.database_url)
                .unwrap(),
            config,
            renderer: Arc::new(TemplateRenderer::new()),
            suggester: Arc::new(OfflineBackend),
            request_limiter: Arc::new(SlidingWindowLimiter::new(Duration::from_secs(60), 60)),
        }
    }
}
