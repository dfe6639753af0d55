//! The conversation orchestration core — the heart of Promptsmith.
//!
//! A turn runs as an explicit three-state machine:
//!
//! 1. **AwaitingModel** — the full history goes to the model gateway.
//!    Plain text ends the turn; tool-call requests move to dispatch.
//! 2. **DispatchingTool** — the *first* pending tool-call request is
//!    resolved in the registry and executed synchronously; its result is
//!    appended and the machine returns to AwaitingModel.
//! 3. **Done** — terminal. Nothing happens until the next user message.
//!
//! The [`TurnDriver`] iterates the machine to completion, surfacing each
//! produced message as a [`TurnEvent`] and optionally pausing for human
//! approval before any tool dispatch.

pub mod driver;
pub mod turn;
pub mod turn_event;

pub use driver::{ApprovalGate, TurnDriver, TurnOutcome};
pub use turn::{StepOutcome, TurnMachine, TurnState};
pub use turn_event::TurnEvent;
