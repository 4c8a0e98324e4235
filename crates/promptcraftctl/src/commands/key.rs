//! API key management

use crate::cli::KeyCommands;
use crate::output;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use promptcraft_common::{mask_key, CredentialStore};

pub fn run(action: KeyCommands, store: &mut CredentialStore) -> Result<()> {
    match action {
        KeyCommands::Set { key } => {
            let key = key.trim();
            if key.is_empty() {
                anyhow::bail!("API key must not be empty");
            }
            store
                .set_api_key(key)
                .with_context(|| format!("Failed to write {}", store.path().display()))?;
            println!("{} API key saved to {}", "[OK]".bright_green(), store.path().display());
        }
        KeyCommands::Show => match store.api_key() {
            Some(key) => println!("{}", mask_key(key)),
            None => {
                output::display_error("No API key set.");
                println!("1. Go to https://openrouter.ai/keys");
                println!("2. Sign in and click \"Create Key\"");
                println!("3. Run: promptcraftctl key set <KEY>");
            }
        },
        KeyCommands::Clear => {
            store
                .clear_api_key()
                .with_context(|| format!("Failed to write {}", store.path().display()))?;
            println!("{} API key removed", "[OK]".bright_green());
        }
    }
    Ok(())
}
