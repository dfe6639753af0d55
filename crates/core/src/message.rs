//! Message and Conversation domain types.
//!
//! These are the value objects the orchestration core operates on:
//! the user submits a message → the turn machine calls the model gateway →
//! the response is either terminal assistant text or a tool-call request
//! whose result is fed back as a tool message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a conversation (one wizard session).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The model
    Assistant,
    /// The fixed meta-prompt template (sent ahead of the history)
    System,
    /// Tool execution result
    Tool,
}

/// A tool-call request embedded in an assistant message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Opaque call ID assigned by the model
    pub id: String,

    /// Name of the tool to invoke (must exist in the registry)
    pub name: String,

    /// Arguments as a serialized JSON object
    pub arguments: String,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Tool-call requests carried by an assistant message (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,

    /// For a tool-result message, the call id it answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// For a tool-result message, the name of the tool that produced it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn base(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            tool_name: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::base(Role::User, content)
    }

    /// Create a new assistant message with plain text content.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::base(Role::Assistant, content)
    }

    /// Create an assistant message carrying tool-call requests.
    pub fn assistant_with_tools(
        content: impl Into<String>,
        tool_calls: Vec<ToolCallRequest>,
    ) -> Self {
        let mut msg = Self::base(Role::Assistant, content);
        msg.tool_calls = tool_calls;
        msg
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::base(Role::System, content)
    }

    /// Create a tool-result message answering the given call.
    pub fn tool_result(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let mut msg = Self::base(Role::Tool, content);
        msg.tool_call_id = Some(tool_call_id.into());
        msg.tool_name = Some(tool_name.into());
        msg
    }

    /// Whether this assistant message ends a turn (text only, no pending
    /// tool-call requests).
    pub fn is_terminal(&self) -> bool {
        self.role == Role::Assistant && self.tool_calls.is_empty()
    }
}

/// An ordered, append-only sequence of messages.
///
/// Insertion order is the only order: no reordering, no deletion. The
/// hosting application owns the lifecycle — create on session start,
/// discard on reset. Exactly one message is appended per state-machine
/// transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation ID
    pub id: ConversationId,

    /// Ordered messages
    pub messages: Vec<Message>,

    /// When this conversation was created
    pub created_at: DateTime<Utc>,

    /// When the last message was appended
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::new(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message to the conversation.
    pub fn push(&mut self, message: Message) {
        self.updated_at = Utc::now();
        self.messages.push(message);
    }

    /// The most recently appended message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Tool-call requests pending on the most recent message.
    ///
    /// Non-empty only when the last message is an assistant message that
    /// asked for tool execution.
    pub fn pending_tool_calls(&self) -> &[ToolCallRequest] {
        match self.messages.last() {
            Some(msg) if msg.role == Role::Assistant => &msg.tool_calls,
            _ => &[],
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("Build me an app");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Build me an app");
        assert!(msg.tool_calls.is_empty());
    }

    #[test]
    fn terminal_vs_pending_assistant() {
        let text = Message::assistant("Here are your clarifying questions");
        assert!(text.is_terminal());

        let pending = Message::assistant_with_tools(
            "",
            vec![ToolCallRequest {
                id: "call_1".into(),
                name: "generate_prompt".into(),
                arguments: "{}".into(),
            }],
        );
        assert!(!pending.is_terminal());
    }

    #[test]
    fn tool_result_references_call() {
        let msg = Message::tool_result("call_1", "generate_prompt", "the prompt");
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(msg.tool_name.as_deref(), Some("generate_prompt"));
    }

    #[test]
    fn conversation_tracks_updates() {
        let mut conv = Conversation::new();
        let created = conv.created_at;

        conv.push(Message::user("First message"));
        assert_eq!(conv.messages.len(), 1);
        assert!(conv.updated_at >= created);
    }

    #[test]
    fn pending_tool_calls_only_from_last_assistant() {
        let mut conv = Conversation::new();
        assert!(conv.pending_tool_calls().is_empty());

        conv.push(Message::assistant_with_tools(
            "",
            vec![ToolCallRequest {
                id: "call_1".into(),
                name: "generate_prompt".into(),
                arguments: "{}".into(),
            }],
        ));
        assert_eq!(conv.pending_tool_calls().len(), 1);

        conv.push(Message::tool_result("call_1", "generate_prompt", "done"));
        assert!(conv.pending_tool_calls().is_empty());
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::user("Test message");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.content, "Test message");
        assert_eq!(deserialized.role, Role::User);
    }
}
