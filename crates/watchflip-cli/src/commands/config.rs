use super::prompts;
use crate::context::{AppContext, API_KEY_ENV};
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: crate::ConfigCommands, ctx: &AppContext, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::SetKey { key } => set_key(key, ctx, output),
        crate::ConfigCommands::UnsetKey => unset_key(ctx, output),
        crate::ConfigCommands::Show { full } => show_config(full, ctx, output),
    }
}

fn set_key(key_arg: Option<String>, ctx: &AppContext, output: &Output) -> Result<()> {
    let key = match key_arg {
        Some(key) => key.trim().to_string(),
        None => {
            if !prompts::is_interactive() {
                return Err(eyre!("No key given. Usage: watchflip config set-key <KEY>"));
            }
            prompts::prompt_api_key(output)?
        }
    };

    if key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    let mut list = ctx.load_list()?;
    list.settings_mut().set_api_key(key);
    ctx.save_list(&list)?;

    output.success(format!("Saved TMDB API key to {}", ctx.store().path().display()));
    Ok(())
}

fn unset_key(ctx: &AppContext, output: &Output) -> Result<()> {
    let mut list = ctx.load_list()?;

    if list.settings_mut().unset_api_key().is_some() {
        ctx.save_list(&list)?;
        output.success("Removed saved TMDB API key");
    } else {
        output.info("No TMDB API key was saved");
    }

    Ok(())
}

fn show_config(full: bool, ctx: &AppContext, output: &Output) -> Result<()> {
    let list = ctx.load_list()?;
    let settings = ctx.settings();
    let from_env = std::env::var(API_KEY_ENV).map(|v| !v.trim().is_empty()).unwrap_or(false);

    let key_display = match ctx.api_key(&list) {
        Some(key) if full => key,
        Some(key) => mask_string(&key),
        None => "<not set>".to_string(),
    };
    let key_source = if from_env { API_KEY_ENV } else { "list file" };

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            let mut files = Table::new();
            files.set_header(vec![
                Cell::new("Files").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold)
            ]);
            files.add_row(vec![Cell::new("List"), Cell::new(ctx.store().path().display().to_string())]);
            files.add_row(vec![Cell::new("Settings"), Cell::new(ctx.paths().config_file().display().to_string())]);
            files.load_preset(comfy_table::presets::UTF8_FULL);
            files.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", files);
            println!();

            let mut tmdb = Table::new();
            tmdb.set_header(vec![
                Cell::new("TMDB").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold)
            ]);
            let key_cell = if ctx.api_key(&list).is_some() {
                format!("{} ({})", key_display, key_source)
            } else {
                key_display.red().to_string()
            };
            tmdb.add_row(vec![Cell::new("API Key"), Cell::new(key_cell)]);
            tmdb.add_row(vec![Cell::new("Base URL"), Cell::new(&settings.tmdb.base_url)]);
            tmdb.add_row(vec![
                Cell::new("Language"),
                Cell::new(settings.tmdb.language.as_deref().unwrap_or("<service default>")),
            ]);
            tmdb.add_row(vec![Cell::new("Timeout"), Cell::new(format!("{}s", settings.tmdb.timeout_seconds))]);
            tmdb.load_preset(comfy_table::presets::UTF8_FULL);
            tmdb.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", tmdb);
            println!();

            let mut summary = Table::new();
            summary.set_header(vec![
                Cell::new("List").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold)
            ]);
            summary.add_row(vec![Cell::new("Unwatched"), Cell::new(list.queued().count())]);
            summary.add_row(vec![Cell::new("Watched"), Cell::new(list.completed().count())]);
            summary.add_row(vec![Cell::new("Log level"), Cell::new(&settings.logging.level)]);
            summary.load_preset(comfy_table::presets::UTF8_FULL);
            summary.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", summary);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "list_file": ctx.store().path().display().to_string(),
                "settings_file": ctx.paths().config_file().display().to_string(),
                "tmdb": {
                    "api_key": ctx.api_key(&list).map(|_| key_display.clone()),
                    "api_key_source": ctx.api_key(&list).map(|_| key_source),
                    "base_url": settings.tmdb.base_url,
                    "language": settings.tmdb.language,
                    "timeout_seconds": settings.tmdb.timeout_seconds,
                },
                "movies": {
                    "unwatched": list.queued().count(),
                    "watched": list.completed().count(),
                },
            }));
        }
    }

    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    format!(
        "{}***{}",
        chars[..2].iter().collect::<String>(),
        chars[chars.len() - 2..].iter().collect::<String>()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("0123456789abcdef"), "01***ef");
        // Counted in chars, not bytes
        assert_eq!(mask_string("ééé"), "***");
        assert_eq!(mask_string("éabcdé"), "éa***dé");
    }
}
