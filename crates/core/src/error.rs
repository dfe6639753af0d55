//! Error types for the Promptsmith domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Each bounded context
//! has its own error enum; every error aborts the current turn (there is
//! no automatic retry anywhere in the core — retry means the hosting
//! application re-issues the same user message).

use thiserror::Error;

/// The top-level error type for all Promptsmith operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Model gateway errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Turn orchestration errors ---
    #[error("Turn error: {0}")]
    Turn(#[from] TurnError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors from the model gateway (opaque external collaborator).
///
/// These propagate unmodified to the caller; the turn machine never
/// retries a failed gateway call.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Errors raised at the tool dispatch boundary.
///
/// All three variants are fatal to the turn in progress: no tool-result
/// message is appended when dispatch fails.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The model requested a tool that is not in the registry.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The registered tool function failed during execution.
    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    /// The tool-call argument payload could not be decoded.
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

/// Errors from the turn state machine itself.
#[derive(Debug, Error)]
pub enum TurnError {
    /// The machine is in the dispatching state but the most recent
    /// assistant message carries no tool-call requests.
    #[error("No pending tool call to dispatch")]
    NoPendingToolCall,

    /// The per-turn transition cap was hit before a terminal assistant
    /// message was produced.
    #[error("Turn exceeded the step limit of {limit} transitions")]
    StepLimitExceeded { limit: u32 },

    /// A new turn was started on a conversation whose last assistant
    /// message still carries undispatched tool-call requests (e.g. after
    /// a declined dispatch). Sending such a history to the gateway would
    /// be rejected.
    #[error("Conversation has unresolved tool-call requests")]
    UnresolvedToolCalls,
}
