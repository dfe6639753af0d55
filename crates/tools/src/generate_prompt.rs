//! The `generate_prompt` tool.
//!
//! Takes the accumulated wizard parameters and the user's clarifying
//! answers, re-invokes the model gateway with the fixed meta-prompt
//! template, and returns the completion text. Gateway failures surface
//! as `ToolError::ExecutionFailed` — nothing else crosses the boundary.

use crate::meta_prompt;
use async_trait::async_trait;
use promptsmith_core::error::ToolError;
use promptsmith_core::message::Message;
use promptsmith_core::provider::{Provider, ProviderRequest};
use promptsmith_core::tool::Tool;
use std::sync::Arc;
use tracing::debug;

pub struct GeneratePromptTool {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl GeneratePromptTool {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
        }
    }

    /// Set the max tokens for the generation call.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }
}

#[async_trait]
impl Tool for GeneratePromptTool {
    fn name(&self) -> &str {
        "generate_prompt"
    }

    fn description(&self) -> &str {
        "Generate a comprehensive prompt based on user parameters and clarifying answers."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "parameters": {
                    "type": "string",
                    "description": "The application parameters collected from the user"
                },
                "clarifying_answers": {
                    "type": "string",
                    "description": "The user's answers to the clarifying questions"
                }
            },
            "required": ["parameters", "clarifying_answers"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<String, ToolError> {
        let parameters = arguments["parameters"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'parameters' argument".into()))?;
        let clarifying_answers = arguments["clarifying_answers"].as_str().ok_or_else(|| {
            ToolError::InvalidArguments("Missing 'clarifying_answers' argument".into())
        })?;

        let request = ProviderRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(meta_prompt::SYSTEM_TEMPLATE),
                Message::user(meta_prompt::final_input(parameters, clarifying_answers)),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            tools: vec![],
        };

        debug!(model = %self.model, "generate_prompt invoking gateway");

        let response =
            self.provider
                .complete(request)
                .await
                .map_err(|e| ToolError::ExecutionFailed {
                    tool_name: "generate_prompt".into(),
                    reason: e.to_string(),
                })?;

        Ok(response.message.content)
    }
}
