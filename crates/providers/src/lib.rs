//! Model gateway implementations for Promptsmith.
//!
//! One concrete gateway ships today: the Anthropic Messages API. Tests
//! elsewhere in the workspace substitute scripted mock providers through
//! the `Provider` trait.

pub mod anthropic;

pub use anthropic::AnthropicProvider;

use promptsmith_config::AppConfig;
use promptsmith_core::error::ProviderError;
use promptsmith_core::provider::Provider;
use std::sync::Arc;

/// Build the configured gateway from the application config.
///
/// Fails with `NotConfigured` when no API key is available from the
/// config file or the environment.
pub fn build_provider(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        ProviderError::NotConfigured(
            "No API key configured. Set ANTHROPIC_API_KEY or add api_key to config.toml".into(),
        )
    })?;

    Ok(Arc::new(AnthropicProvider::new(api_key)))
}
