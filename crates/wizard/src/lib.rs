//! The three-step guided prompt-construction session.
//!
//! Step 1 collects the application parameters, step 2 lets the model ask
//! clarifying questions, step 3 produces the comprehensive build prompt
//! (the model invokes `generate_prompt` for this). The finished prompt
//! can be exported to a markdown file, and `reset` starts over from a
//! blank session.

use promptsmith_agent::{TurnDriver, TurnOutcome};
use promptsmith_core::message::Conversation;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("step out of order: {action} is not valid while in {step:?}")]
    OutOfOrder {
        action: &'static str,
        step: WizardStep,
    },

    #[error("no final prompt to export yet")]
    NothingToExport,

    #[error("failed to write export file: {0}")]
    ExportFailed(#[from] std::io::Error),

    #[error(transparent)]
    Turn(#[from] promptsmith_core::error::Error),
}

/// Where the session is in the wizard flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Collecting the application parameters.
    Parameters,
    /// The model asks clarifying questions; the user answers.
    Clarify,
    /// The comprehensive prompt is generated.
    Final,
    /// The prompt is ready for export.
    Complete,
}

/// The parameters collected in step 1.
#[derive(Debug, Clone, Default)]
pub struct WizardParameters {
    pub project_description: String,
    pub key_features: String,
    pub technical_requirements: String,
}

impl WizardParameters {
    /// Render as the labelled block the meta-prompt template expects.
    pub fn formatted(&self) -> String {
        format!(
            "{{project description}}: {}\n\n{{key features}}: {}\n\n{{technical requirements}}: {}",
            self.project_description, self.key_features, self.technical_requirements
        )
    }
}

/// One guided prompt-construction session.
///
/// Owns the conversation; every model-facing step runs one full turn
/// through the given [`TurnDriver`].
pub struct WizardSession {
    step: WizardStep,
    conversation: Conversation,
    user_parameters: String,
    clarifying_questions: String,
    user_answers: String,
    final_prompt: String,
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Parameters,
            conversation: Conversation::new(),
            user_parameters: String::new(),
            clarifying_questions: String::new(),
            user_answers: String::new(),
            final_prompt: String::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn clarifying_questions(&self) -> &str {
        &self.clarifying_questions
    }

    pub fn final_prompt(&self) -> &str {
        &self.final_prompt
    }

    /// Step 1: record the collected parameters and move to clarification.
    pub fn submit_parameters(&mut self, parameters: &WizardParameters) -> Result<(), WizardError> {
        if self.step != WizardStep::Parameters {
            return Err(WizardError::OutOfOrder {
                action: "submit_parameters",
                step: self.step,
            });
        }
        self.user_parameters = parameters.formatted();
        self.step = WizardStep::Clarify;
        debug!("parameters recorded, moving to clarification");
        Ok(())
    }

    /// Step 2 (model side): send the parameters and collect the model's
    /// clarifying questions.
    ///
    /// A failed turn rolls the conversation back to its pre-turn state so
    /// the step can simply be retried; the collected parameters are kept.
    pub async fn request_clarifying_questions(
        &mut self,
        driver: &mut TurnDriver,
    ) -> Result<TurnOutcome, WizardError> {
        if self.step != WizardStep::Clarify || !self.clarifying_questions.is_empty() {
            return Err(WizardError::OutOfOrder {
                action: "request_clarifying_questions",
                step: self.step,
            });
        }
        let input = self.user_parameters.clone();
        let outcome = self.run_step(driver, input).await?;
        if let TurnOutcome::Completed(text) = &outcome {
            self.clarifying_questions = text.clone();
            info!(conversation = %self.conversation.id, "clarifying questions received");
        }
        Ok(outcome)
    }

    /// Step 2 (user side): record the answers and move to generation.
    pub fn submit_answers(&mut self, answers: impl Into<String>) -> Result<(), WizardError> {
        if self.step != WizardStep::Clarify || self.clarifying_questions.is_empty() {
            return Err(WizardError::OutOfOrder {
                action: "submit_answers",
                step: self.step,
            });
        }
        self.user_answers = answers.into();
        self.step = WizardStep::Final;
        Ok(())
    }

    /// Everything gathered so far, as the step-3 user message.
    pub fn combined_input(&self) -> String {
        format!(
            "User Parameters:\n{}\n\nClarifying Questions and Answers:\n{}\n\nUser Answers:\n{}",
            self.user_parameters, self.clarifying_questions, self.user_answers
        )
    }

    /// Step 3: run the generation turn and record the final prompt.
    ///
    /// Like step 2, a failed turn leaves the session ready for a retry.
    pub async fn generate_final_prompt(
        &mut self,
        driver: &mut TurnDriver,
    ) -> Result<TurnOutcome, WizardError> {
        if self.step != WizardStep::Final {
            return Err(WizardError::OutOfOrder {
                action: "generate_final_prompt",
                step: self.step,
            });
        }
        let input = self.combined_input();
        let outcome = self.run_step(driver, input).await?;
        if let TurnOutcome::Completed(text) = &outcome {
            self.final_prompt = text.clone();
            self.step = WizardStep::Complete;
            info!(conversation = %self.conversation.id, "final prompt generated");
        }
        Ok(outcome)
    }

    /// Run one turn, undoing any messages it appended if it fails.
    async fn run_step(
        &mut self,
        driver: &mut TurnDriver,
        input: String,
    ) -> Result<TurnOutcome, WizardError> {
        let checkpoint = self.conversation.messages.len();
        match driver.run_turn(&mut self.conversation, input).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.conversation.messages.truncate(checkpoint);
                Err(e.into())
            }
        }
    }

    /// Write the final prompt to a markdown file.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<PathBuf, WizardError> {
        if self.final_prompt.is_empty() {
            return Err(WizardError::NothingToExport);
        }
        let path = path.as_ref();
        std::fs::write(path, &self.final_prompt)?;
        info!(path = %path.display(), "final prompt exported");
        Ok(path.to_path_buf())
    }

    /// Discard everything and return to step 1 with a fresh conversation.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use promptsmith_agent::TurnMachine;
    use promptsmith_core::error::ProviderError;
    use promptsmith_core::message::{Message, Role};
    use promptsmith_core::provider::{Provider, ProviderRequest, ProviderResponse};
    use promptsmith_core::tool::ToolRegistry;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<Message, ProviderError>>>,
    }

    impl ScriptedProvider {
        fn new(script: Vec<Result<Message, ProviderError>>) -> Self {
            Self {
                responses: Mutex::new(script.into()),
            }
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            _request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            let message = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::Network("script exhausted".into())))?;
            Ok(ProviderResponse {
                message,
                usage: None,
                model: "mock-model".into(),
            })
        }
    }

    fn driver_with(script: Vec<Result<Message, ProviderError>>) -> TurnDriver {
        let provider = Arc::new(ScriptedProvider::new(script));
        let machine = TurnMachine::new(
            provider,
            "mock-model",
            0.7,
            Arc::new(ToolRegistry::new()),
        );
        TurnDriver::new(machine)
    }

    fn sample_parameters() -> WizardParameters {
        WizardParameters {
            project_description: "A recipe sharing site".into(),
            key_features: "Search, favorites".into(),
            technical_requirements: "REST API".into(),
        }
    }

    #[test]
    fn parameters_format_as_labelled_block() {
        let block = sample_parameters().formatted();
        assert!(block.starts_with("{project description}: A recipe sharing site"));
        assert!(block.contains("{key features}: Search, favorites"));
        assert!(block.contains("{technical requirements}: REST API"));
    }

    #[tokio::test]
    async fn full_wizard_flow() {
        let mut session = WizardSession::new();
        session.submit_parameters(&sample_parameters()).unwrap();
        assert_eq!(session.step(), WizardStep::Clarify);

        let mut driver = driver_with(vec![
            Ok(Message::assistant("1. Who are the users? 2. Mobile or web?")),
            Ok(Message::assistant("Here is your comprehensive prompt.")),
        ]);

        session
            .request_clarifying_questions(&mut driver)
            .await
            .unwrap();
        assert_eq!(
            session.clarifying_questions(),
            "1. Who are the users? 2. Mobile or web?"
        );

        session.submit_answers("Home cooks; web only.").unwrap();
        assert_eq!(session.step(), WizardStep::Final);

        let combined = session.combined_input();
        assert!(combined.starts_with("User Parameters:\n"));
        assert!(combined.contains("Clarifying Questions and Answers:\n1. Who are the users?"));
        assert!(combined.ends_with("User Answers:\nHome cooks; web only."));

        session.generate_final_prompt(&mut driver).await.unwrap();
        assert_eq!(session.step(), WizardStep::Complete);
        assert_eq!(session.final_prompt(), "Here is your comprehensive prompt.");

        // user, assistant, user, assistant
        let roles: Vec<Role> = session
            .conversation()
            .messages
            .iter()
            .map(|m| m.role.clone())
            .collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
    }

    #[tokio::test]
    async fn failed_turn_can_be_retried_without_losing_parameters() {
        let mut session = WizardSession::new();
        session.submit_parameters(&sample_parameters()).unwrap();

        let mut driver = driver_with(vec![
            Err(ProviderError::Network("connection refused".into())),
            Ok(Message::assistant("1. Who are the users?")),
        ]);

        let err = session
            .request_clarifying_questions(&mut driver)
            .await
            .unwrap_err();
        assert!(matches!(err, WizardError::Turn(_)));

        // The step is still Clarify, the parameters are kept, and the
        // failed turn left nothing in the conversation.
        assert_eq!(session.step(), WizardStep::Clarify);
        assert!(session.conversation().messages.is_empty());

        session
            .request_clarifying_questions(&mut driver)
            .await
            .unwrap();
        assert_eq!(session.clarifying_questions(), "1. Who are the users?");
        assert_eq!(session.conversation().messages.len(), 2);
    }

    #[tokio::test]
    async fn steps_reject_out_of_order_calls() {
        let mut session = WizardSession::new();

        let err = session.submit_answers("too early").unwrap_err();
        assert!(matches!(err, WizardError::OutOfOrder { .. }));

        let mut driver = driver_with(vec![]);
        let err = session
            .request_clarifying_questions(&mut driver)
            .await
            .unwrap_err();
        assert!(matches!(err, WizardError::OutOfOrder { .. }));
    }

    #[test]
    fn export_requires_a_prompt() {
        let session = WizardSession::new();
        let err = session.export("unused.md").unwrap_err();
        assert!(matches!(err, WizardError::NothingToExport));
    }

    #[tokio::test]
    async fn export_writes_markdown_file() {
        let mut session = WizardSession::new();
        session.submit_parameters(&sample_parameters()).unwrap();

        let mut driver = driver_with(vec![
            Ok(Message::assistant("Questions?")),
            Ok(Message::assistant("# Build Prompt\n\nDo the thing.")),
        ]);
        session
            .request_clarifying_questions(&mut driver)
            .await
            .unwrap();
        session.submit_answers("Answers.").unwrap();
        session.generate_final_prompt(&mut driver).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("final_prompt.md");
        session.export(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "# Build Prompt\n\nDo the thing.");
    }

    #[tokio::test]
    async fn reset_returns_to_step_one() {
        let mut session = WizardSession::new();
        session.submit_parameters(&sample_parameters()).unwrap();

        let mut driver = driver_with(vec![Ok(Message::assistant("Questions?"))]);
        session
            .request_clarifying_questions(&mut driver)
            .await
            .unwrap();

        session.reset();
        assert_eq!(session.step(), WizardStep::Parameters);
        assert!(session.conversation().messages.is_empty());
        assert!(session.clarifying_questions().is_empty());
        assert!(session.final_prompt().is_empty());
    }
}
