//! Built-in tool implementations for Promptsmith.
//!
//! A single tool ships today: `generate_prompt`, which re-invokes the
//! model gateway under the fixed meta-prompt template. The registry is
//! built once at startup and is immutable during a turn.

pub mod generate_prompt;
pub mod meta_prompt;

pub use generate_prompt::GeneratePromptTool;

use promptsmith_core::provider::Provider;
use promptsmith_core::tool::ToolRegistry;
use std::sync::Arc;

/// Create the default tool registry with all built-in tools.
pub fn default_registry(
    provider: Arc<dyn Provider>,
    model: impl Into<String>,
    temperature: f32,
    max_tokens: u32,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(
        GeneratePromptTool::new(provider, model, temperature).with_max_tokens(max_tokens),
    ));
    registry
}
