//! # Promptsmith Core
//!
//! Domain types, traits, and error definitions for Promptsmith, a guided
//! prompt-construction assistant. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! The model gateway and the tools are defined as traits here.
//! Implementations live in their respective crates. This enables:
//! - Swapping the gateway for a scripted mock in tests
//! - Startup-only tool registration with no runtime reflection
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result, ToolError, TurnError};
pub use message::{Conversation, ConversationId, Message, Role, ToolCallRequest};
pub use provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition, Usage};
pub use tool::{Tool, ToolCall, ToolRegistry};
