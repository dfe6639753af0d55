//! Runs a [`TurnMachine`] to completion.
//!
//! The driver loops the machine, relays each appended message as a
//! [`TurnEvent`], and pauses before tool dispatch when an approval gate
//! is installed. A declined dispatch ends the turn with the pending
//! assistant message so the caller can show what was refused.

use crate::turn::{StepOutcome, TurnMachine};
use crate::turn_event::TurnEvent;
use async_trait::async_trait;
use promptsmith_core::error::{Error, Result, TurnError};
use promptsmith_core::message::{Conversation, Message, ToolCallRequest};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Human-in-the-loop review of a pending tool dispatch.
#[async_trait]
pub trait ApprovalGate: Send + Sync {
    /// Return `true` to let the dispatch proceed.
    async fn review(&self, calls: &[ToolCallRequest]) -> bool;
}

/// How a driven turn ended.
#[derive(Debug)]
pub enum TurnOutcome {
    /// The assistant answered in plain text.
    Completed(String),
    /// The approval gate refused the pending tool calls.
    Declined(Message),
}

pub struct TurnDriver {
    machine: TurnMachine,
    gate: Option<Arc<dyn ApprovalGate>>,
    events: Option<mpsc::Sender<TurnEvent>>,
    max_steps: u32,
}

impl TurnDriver {
    pub fn new(machine: TurnMachine) -> Self {
        Self {
            machine,
            gate: None,
            events: None,
            max_steps: 16,
        }
    }

    pub fn with_approval_gate(mut self, gate: Arc<dyn ApprovalGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Channel receiving a [`TurnEvent`] per appended message.
    pub fn with_event_sink(mut self, sink: mpsc::Sender<TurnEvent>) -> Self {
        self.events = Some(sink);
        self
    }

    /// Cap on transitions per turn; exceeding it is an error.
    pub fn with_max_steps(mut self, max: u32) -> Self {
        self.max_steps = max;
        self
    }

    /// Run one full turn for `input`, returning the terminal outcome.
    ///
    /// Refuses to start when the conversation still carries undispatched
    /// tool-call requests (a prior turn was declined or aborted); the
    /// gateway rejects a `tool_use` block with no matching result.
    pub async fn run_turn(
        &mut self,
        conversation: &mut Conversation,
        input: impl Into<String>,
    ) -> Result<TurnOutcome> {
        if !conversation.pending_tool_calls().is_empty() {
            return Err(Error::Turn(TurnError::UnresolvedToolCalls));
        }
        self.machine.begin_turn(conversation, input);

        let mut steps = 0u32;
        loop {
            if steps >= self.max_steps {
                warn!(limit = self.max_steps, "turn exceeded step limit");
                return Err(Error::Turn(TurnError::StepLimitExceeded {
                    limit: self.max_steps,
                }));
            }
            steps += 1;

            match self.machine.step(conversation).await? {
                StepOutcome::AssistantText(message) => {
                    self.emit(TurnEvent::AssistantMessage {
                        content: message.content.clone(),
                    })
                    .await;
                    return Ok(TurnOutcome::Completed(message.content));
                }
                StepOutcome::ToolCallPending(message) => {
                    for call in &message.tool_calls {
                        self.emit(TurnEvent::ToolCallRequested {
                            id: call.id.clone(),
                            name: call.name.clone(),
                            arguments: call.arguments.clone(),
                        })
                        .await;
                    }
                    if let Some(gate) = &self.gate {
                        if !gate.review(&message.tool_calls).await {
                            info!("tool dispatch declined by reviewer");
                            return Ok(TurnOutcome::Declined(message));
                        }
                    }
                }
                StepOutcome::ToolDispatched(message) => {
                    self.emit(TurnEvent::ToolResult {
                        id: message.tool_call_id.clone().unwrap_or_default(),
                        name: message.tool_name.clone().unwrap_or_default(),
                        output: message.content.clone(),
                    })
                    .await;
                }
                StepOutcome::Idle => {
                    return Err(Error::Internal("turn machine idle mid-turn".into()));
                }
            }
        }
    }

    async fn emit(&self, event: TurnEvent) {
        if let Some(sink) = &self.events {
            let _ = sink.send(event).await;
        }
    }
}
