//! Events surfaced while a turn runs, one per appended message.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEvent {
    /// Terminal assistant text.
    AssistantMessage { content: String },
    /// The assistant asked for a tool.
    ToolCallRequested {
        id: String,
        name: String,
        arguments: String,
    },
    /// A tool ran and produced output.
    ToolResult {
        id: String,
        name: String,
        output: String,
    },
}

impl TurnEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            TurnEvent::AssistantMessage { .. } => "assistant_message",
            TurnEvent::ToolCallRequested { .. } => "tool_call_requested",
            TurnEvent::ToolResult { .. } => "tool_result",
        }
    }
}
