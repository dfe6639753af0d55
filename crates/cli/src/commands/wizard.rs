//! `promptsmith wizard` — the interactive guided prompt builder.

use crate::auth;
use crate::term::{self, SharedPrompt};
use async_trait::async_trait;
use promptsmith_agent::{ApprovalGate, TurnDriver, TurnEvent, TurnMachine, TurnOutcome};
use promptsmith_config::AppConfig;
use promptsmith_core::message::ToolCallRequest;
use promptsmith_tools::meta_prompt;
use promptsmith_wizard::{WizardError, WizardParameters, WizardSession};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Asks the user before any tool runs. Only the exact token `y` approves.
struct TerminalApprovalGate {
    prompt: SharedPrompt,
}

#[async_trait]
impl ApprovalGate for TerminalApprovalGate {
    async fn review(&self, calls: &[ToolCallRequest]) -> bool {
        let serialized = serde_json::to_string_pretty(calls).unwrap_or_default();
        println!("\n  I plan to invoke the following tools, do you approve?");
        println!("  Type 'y' if you do, anything else to stop.\n");
        for line in serialized.lines() {
            println!("  {line}");
        }
        println!();
        let mut prompt = self.prompt.lock().await;
        matches!(prompt.line("  Approve? ").await.as_deref(), Ok("y"))
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    ANTHROPIC_API_KEY=sk-ant-...");
        eprintln!("    PROMPTSMITH_API_KEY=sk-ant-...");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let prompt = term::shared();

    if config.login_required() {
        println!("\n  Promptsmith — Log in to continue\n");
        auth::login(&config.credentials, &prompt).await?;
    }

    let provider = promptsmith_providers::build_provider(&config)?;
    let registry = promptsmith_tools::default_registry(
        provider.clone(),
        &config.default_model,
        config.default_temperature,
        config.default_max_tokens,
    );

    let machine = TurnMachine::new(
        provider,
        &config.default_model,
        config.default_temperature,
        Arc::new(registry),
    )
    .with_max_tokens(config.default_max_tokens)
    .with_system_prompt(meta_prompt::SYSTEM_TEMPLATE);

    let (tx, mut rx) = mpsc::channel::<TurnEvent>(32);
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                TurnEvent::ToolCallRequested { name, .. } => {
                    println!("  [tool requested: {name}]");
                }
                TurnEvent::ToolResult { name, .. } => {
                    println!("  [tool finished: {name}]");
                }
                TurnEvent::AssistantMessage { .. } => {}
            }
        }
    });

    let mut driver = TurnDriver::new(machine)
        .with_max_steps(config.max_turn_steps)
        .with_event_sink(tx);
    if config.require_approval {
        driver = driver.with_approval_gate(Arc::new(TerminalApprovalGate {
            prompt: prompt.clone(),
        }));
    }

    println!();
    println!("  Promptsmith — Guided Prompt Builder");
    println!("  ===================================");
    println!();
    println!("  Model: {}", config.default_model);
    println!();
    println!("  1. Provide initial parameters");
    println!("  2. Answer clarifying questions");
    println!("  3. Receive your comprehensive prompt");
    println!();

    'session: loop {
        let mut session = WizardSession::new();

        // Step 1: collect parameters
        println!("  Step 1: Provide Application Parameters\n");
        let parameters = {
            let mut prompt = prompt.lock().await;
            WizardParameters {
                project_description: prompt.required("  Project description: ").await?,
                key_features: prompt.required("  Key features: ").await?,
                technical_requirements: prompt.required("  Technical requirements: ").await?,
            }
        };
        session.submit_parameters(&parameters)?;

        // Step 2: clarifying questions. A failed turn keeps the collected
        // parameters; offer to retry the step instead of bailing out.
        println!("\n  Step 2: Clarifying Questions\n");
        let outcome = loop {
            eprintln!("  Generating clarifying questions...");
            match session.request_clarifying_questions(&mut driver).await {
                Ok(outcome) => break outcome,
                Err(err @ WizardError::Turn(_)) => {
                    if !retry_step(&prompt, &err).await? {
                        break 'session;
                    }
                }
                Err(err) => return Err(err.into()),
            }
        };
        match outcome {
            TurnOutcome::Completed(_) => {
                println!();
                for line in session.clarifying_questions().lines() {
                    println!("  {line}");
                }
                println!();
            }
            TurnOutcome::Declined(message) => {
                print_declined(&message.content);
                if !start_over(&prompt).await? {
                    break;
                }
                continue;
            }
        }

        let answers = prompt.lock().await.required("  Your answers: ").await?;
        session.submit_answers(answers)?;

        // Step 3: the comprehensive prompt, same retry convention.
        println!("\n  Step 3: Generated Comprehensive Prompt\n");
        let outcome = loop {
            eprintln!("  Generating the comprehensive prompt...");
            match session.generate_final_prompt(&mut driver).await {
                Ok(outcome) => break outcome,
                Err(err @ WizardError::Turn(_)) => {
                    if !retry_step(&prompt, &err).await? {
                        break 'session;
                    }
                }
                Err(err) => return Err(err.into()),
            }
        };
        match outcome {
            TurnOutcome::Completed(_) => {
                println!();
                for line in session.final_prompt().lines() {
                    println!("  {line}");
                }
                println!();

                let path = session.export(&config.export_path)?;
                println!("  Saved to: {}\n", path.display());
            }
            TurnOutcome::Declined(message) => {
                print_declined(&message.content);
            }
        }

        if !start_over(&prompt).await? {
            break;
        }
        println!();
    }

    println!("\n  Goodbye!\n");
    Ok(())
}

fn print_declined(content: &str) {
    println!("\n  Tool dispatch declined; stopping this turn.");
    if !content.is_empty() {
        for line in content.lines() {
            println!("  {line}");
        }
    }
    println!();
}

async fn retry_step(
    prompt: &SharedPrompt,
    err: &WizardError,
) -> Result<bool, Box<dyn std::error::Error>> {
    eprintln!("\n  Error: {err}\n");
    let answer = prompt.lock().await.line("  Retry this step? (y/N) ").await?;
    Ok(answer == "y")
}

async fn start_over(prompt: &SharedPrompt) -> Result<bool, Box<dyn std::error::Error>> {
    let answer = prompt.lock().await.line("  Start over? (y/N) ").await?;
    Ok(answer == "y")
}
