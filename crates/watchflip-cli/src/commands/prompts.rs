use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::{Confirm, Password};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Prompts only make sense when someone is at the keyboard
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Prompt for a password (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| eyre!("Failed to read input: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| eyre!("Failed to read confirmation: {}", e))
}

/// Ask for a TMDB key until a non-empty one is entered
pub fn prompt_api_key(output: &Output) -> Result<String> {
    loop {
        let input = prompt_password("TMDB API key")?;
        let key = input.trim();

        if key.is_empty() {
            output.error("API key cannot be empty");
            continue;
        }

        // v3 keys are 32 hex chars; v4 tokens are much longer
        if key.len() < 16 {
            output.warn("That key looks too short. Please verify it's correct.");
            if !prompt_yes_no("Use this key anyway?", Some(false))? {
                continue;
            }
        }

        return Ok(key.to_string());
    }
}

/// First-run setup: explain what is needed and ask for the key, or fail with
/// instructions when nobody can answer
pub fn prompt_first_run_api_key(output: &Output) -> Result<String> {
    if !is_interactive() {
        return Err(eyre!(
            "No TMDB API key configured. Run `watchflip config set-key <KEY>` or set {}.",
            crate::context::API_KEY_ENV
        ));
    }

    eprintln!();
    eprintln!("{}", "TMDB API Setup".bold().bright_cyan());
    eprintln!("{}", "─".repeat("TMDB API Setup".len()).bright_cyan());
    eprintln!("watchflip looks movies up on The Movie Database and needs an API key:");
    eprintln!("  1. Create a free account at https://www.themoviedb.org/signup");
    eprintln!("  2. Request a key under Settings → API");
    eprintln!("  3. Paste the API key (v3) or read access token (v4) below");
    eprintln!();

    prompt_api_key(output)
}
