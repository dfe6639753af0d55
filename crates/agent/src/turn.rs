//! The three-state turn machine.
//!
//! `TurnMachine::step` performs exactly one transition and appends at
//! most one message to the conversation. A failed transition appends
//! nothing, so the history never records a half-finished step.

use promptsmith_core::error::{Error, Result, ToolError, TurnError};
use promptsmith_core::message::{Conversation, Message};
use promptsmith_core::provider::{Provider, ProviderRequest};
use promptsmith_core::tool::{ToolCall, ToolRegistry};
use std::sync::Arc;
use tracing::{debug, info};

/// Where the machine is within the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// The next transition sends the history to the model gateway.
    AwaitingModel,
    /// The last assistant message requested tools; the next transition
    /// executes the first one.
    DispatchingTool,
    /// The turn has ended with assistant text.
    Done,
}

/// What a single transition produced.
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// Terminal assistant text was appended; the turn is over.
    AssistantText(Message),
    /// An assistant message with tool-call requests was appended.
    ToolCallPending(Message),
    /// A tool result was appended; control returns to the model.
    ToolDispatched(Message),
    /// The machine was already done; nothing happened.
    Idle,
}

/// Drives one conversation turn: model call, optional tool dispatch,
/// back to the model, until the assistant answers in plain text.
pub struct TurnMachine {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    tools: Arc<ToolRegistry>,
    system_prompt: Option<String>,
    state: TurnState,
}

impl TurnMachine {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            system_prompt: None,
            state: TurnState::Done,
        }
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Fixed system template prepended to every gateway request. It is
    /// never stored in the conversation itself.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == TurnState::Done
    }

    /// Append the user's message and arm the machine for a new turn.
    pub fn begin_turn(&mut self, conversation: &mut Conversation, input: impl Into<String>) {
        conversation.push(Message::user(input));
        self.state = TurnState::AwaitingModel;
    }

    /// Perform one transition. Appends at most one message; on error the
    /// conversation is untouched and the turn is abandoned.
    pub async fn step(&mut self, conversation: &mut Conversation) -> Result<StepOutcome> {
        match self.state {
            TurnState::AwaitingModel => self.call_model(conversation).await,
            TurnState::DispatchingTool => self.dispatch_tool(conversation).await,
            TurnState::Done => Ok(StepOutcome::Idle),
        }
    }

    async fn call_model(&mut self, conversation: &mut Conversation) -> Result<StepOutcome> {
        let mut messages = Vec::with_capacity(conversation.messages.len() + 1);
        if let Some(prompt) = &self.system_prompt {
            messages.push(Message::system(prompt));
        }
        messages.extend(conversation.messages.iter().cloned());

        let request = ProviderRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            tools: self.tools.definitions(),
        };

        debug!(
            provider = self.provider.name(),
            model = %self.model,
            history_len = conversation.messages.len(),
            "sending conversation to gateway"
        );

        let response = self.provider.complete(request).await?;
        let message = response.message;

        if message.tool_calls.is_empty() {
            info!(conversation = %conversation.id, "turn complete");
            conversation.push(message.clone());
            self.state = TurnState::Done;
            Ok(StepOutcome::AssistantText(message))
        } else {
            debug!(
                requested = message.tool_calls.len(),
                first = %message.tool_calls[0].name,
                "assistant requested tool calls"
            );
            conversation.push(message.clone());
            self.state = TurnState::DispatchingTool;
            Ok(StepOutcome::ToolCallPending(message))
        }
    }

    async fn dispatch_tool(&mut self, conversation: &mut Conversation) -> Result<StepOutcome> {
        // Only the first requested call is dispatched per transition.
        let request = conversation
            .pending_tool_calls()
            .first()
            .cloned()
            .ok_or(Error::Turn(TurnError::NoPendingToolCall))?;

        let arguments: serde_json::Value = serde_json::from_str(&request.arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let call = ToolCall {
            id: request.id.clone(),
            name: request.name.clone(),
            arguments,
        };

        info!(tool = %call.name, call_id = %call.id, "dispatching tool");
        let output = self.tools.execute(&call).await?;

        let message = Message::tool_result(&request.id, &request.name, output);
        conversation.push(message.clone());
        self.state = TurnState::AwaitingModel;
        Ok(StepOutcome::ToolDispatched(message))
    }
}
