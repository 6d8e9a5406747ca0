use crate::context::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Cell, Color, Table};
use media_list_core::MediaList;
use media_list_models::Entry;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_list(ctx: &AppContext, output: &Output) -> Result<()> {
    let list = ctx.load_list()?;
    let (unwatched, watched) = sorted_sections(&list);

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            if unwatched.is_empty() {
                println!("No unwatched movies. Add one with `watchflip add <movie>`.");
            } else {
                println!("{}", movie_table(&unwatched));
            }
            println!("({} unwatched movies)", unwatched.len());

            if !watched.is_empty() {
                println!();
                println!("{}", "Already Watched:".red().bold());
                println!("{}", movie_table(&watched));
                println!("({} watched movies)", watched.len());
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "unwatched": unwatched,
                "watched": watched,
            }));
        }
    }

    Ok(())
}

/// Both sections ordered by TMDB id
fn sorted_sections(list: &MediaList) -> (Vec<&Entry>, Vec<&Entry>) {
    let mut unwatched: Vec<&Entry> = list.queued().collect();
    let mut watched: Vec<&Entry> = list.completed().collect();
    unwatched.sort_by_key(|e| e.tmdb_id);
    watched.sort_by_key(|e| e.tmdb_id);
    (unwatched, watched)
}

fn movie_table(entries: &[&Entry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("TMDB ID").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
    ]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.tmdb_id).fg(Color::Green),
            Cell::new(&entry.title).fg(Color::Yellow),
            Cell::new(format!("({})", entry.year)),
        ]);
    }

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_split_and_sorted_by_id() {
        let mut list = MediaList::new();
        list.insert(Entry::new(680, "Pulp Fiction", 1994, 8.5)).unwrap();
        list.insert(Entry::new(603, "The Matrix", 1999, 7.6)).unwrap();
        list.insert(Entry::new(11, "Star Wars", 1977, 8.2)).unwrap();
        list.set_completed(680, true).unwrap();

        let (unwatched, watched) = sorted_sections(&list);
        let ids: Vec<u64> = unwatched.iter().map(|e| e.tmdb_id).collect();
        assert_eq!(ids, vec![11, 603]);
        assert_eq!(watched.len(), 1);
        assert_eq!(watched[0].tmdb_id, 680);
    }

    #[test]
    fn test_table_contains_rows() {
        let entry = Entry::new(603, "The Matrix", 1999, 7.6);
        let rendered = movie_table(&[&entry]).to_string();
        assert!(rendered.contains("603"));
        assert!(rendered.contains("The Matrix"));
        assert!(rendered.contains("(1999)"));
    }
}
