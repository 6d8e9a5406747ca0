use crate::context::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use media_list_core::IdentifierKind;
use media_list_models::Entry;
use owo_colors::OwoColorize;
use serde_json::json;
use tracing::debug;

pub async fn run_add(ctx: &AppContext, identifier: &str, output: &Output) -> Result<()> {
    let list = ctx.load_list()?;
    let mut manager = ctx.manager(list, true, output)?;

    let entry = manager.add(identifier).await?;
    ctx.save_list(manager.list())?;

    report(output, "added", &entry, format!("Added {} to your list", entry.display_name()));
    Ok(())
}

pub async fn run_delete(ctx: &AppContext, identifier: &str, output: &Output) -> Result<()> {
    let list = ctx.load_list()?;
    let needs_lookup = IdentifierKind::classify(identifier).needs_lookup();
    let mut manager = ctx.manager(list, needs_lookup, output)?;

    let entry = manager.remove(identifier).await?;
    ctx.save_list(manager.list())?;

    report(output, "deleted", &entry, format!("Removed {} from your list", entry.display_name()));
    Ok(())
}

/// `watched = true` for `watch`, `false` for `unwatch`
pub async fn run_watch(ctx: &AppContext, identifier: &str, watched: bool, output: &Output) -> Result<()> {
    let list = ctx.load_list()?;
    let needs_lookup = IdentifierKind::classify(identifier).needs_lookup();
    let mut manager = ctx.manager(list, needs_lookup, output)?;

    let entry = if watched {
        manager.complete(identifier).await?
    } else {
        manager.uncomplete(identifier).await?
    };
    ctx.save_list(manager.list())?;

    let (action, message) = if watched {
        ("watched", format!("Marked {} as watched", entry.display_name()))
    } else {
        ("unwatched", format!("Marked {} as unwatched", entry.display_name()))
    };
    report(output, action, &entry, message);
    Ok(())
}

/// The flip never needs the metadata service, so it works on the list directly
pub fn run_flip(ctx: &AppContext, output: &Output) -> Result<()> {
    let mut list = ctx.load_list()?;
    debug!("Flipping among {} unwatched movies", list.queued().count());

    let entry = list.flip()?.clone();
    ctx.save_list(&list)?;

    match output.format() {
        OutputFormat::Human => {
            if !output.is_quiet() {
                println!(
                    "Your movie is {} ({})",
                    entry.title.bold().yellow(),
                    entry.year
                );
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({ "type": "flip", "movie": entry }));
        }
    }
    Ok(())
}

fn report(output: &Output, action: &str, entry: &Entry, message: String) {
    match output.format() {
        OutputFormat::Human => output.success(message),
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({ "type": action, "movie": entry }));
        }
    }
}
