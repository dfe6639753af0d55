//! Terminal login gate.
//!
//! The config's `[credentials]` table maps usernames to sha256 password
//! digests (lowercase hex). An empty table disables the gate.

use crate::term::SharedPrompt;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::warn;

const MAX_ATTEMPTS: u32 = 3;

/// Check a username/password pair against the stored digests.
pub fn verify(credentials: &HashMap<String, String>, username: &str, password: &str) -> bool {
    let Some(stored) = credentials.get(username) else {
        return false;
    };
    let digest = hex::encode(Sha256::digest(password.as_bytes()));
    if stored.len() != digest.len() {
        return false;
    }
    stored
        .bytes()
        .zip(digest.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Prompt for credentials until verified or attempts run out.
pub async fn login(
    credentials: &HashMap<String, String>,
    prompt: &SharedPrompt,
) -> Result<(), Box<dyn std::error::Error>> {
    for attempt in 1..=MAX_ATTEMPTS {
        let (username, password) = {
            let mut prompt = prompt.lock().await;
            (
                prompt.required("  Username: ").await?,
                prompt.required("  Password: ").await?,
            )
        };

        if verify(credentials, &username, &password) {
            println!("\n  Welcome, {username}!\n");
            return Ok(());
        }

        warn!(attempt, "failed login attempt");
        eprintln!(
            "  User not known or password incorrect ({attempt}/{MAX_ATTEMPTS} attempts)\n"
        );
    }

    Err("too many failed login attempts".into())
}
