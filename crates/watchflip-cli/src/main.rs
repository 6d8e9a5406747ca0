use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{config, list, movies};
use context::AppContext;
use media_list_config::{Config, PathManager};
use std::path::PathBuf;

mod commands;
mod context;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchflip")]
#[command(about = "watchflip - Semi-randomly pick a movie to watch from your list")]
#[command(long_about = "Keep a list of movies you want to see and let a weighted coin flip pick the next one. Movies with a higher TMDB vote average are more likely to come up. Every command can be shortened to a unique prefix (e.g. `a` for `add`, `f` for `flip`).")]
#[command(version, infer_subcommands = true)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Use this list file instead of the one in the config directory
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a movie to your list
    #[command(long_about = "Add the movie indicated by IDENTIFIER to your list. IDENTIFIER can be a TMDB id (603), an IMDb id (tt0133093), or a partial or full title (\"the matrix\"); titles use TMDB's best match.")]
    Add {
        identifier: String,
    },
    /// Remove a movie from your list
    Delete {
        identifier: String,
    },
    /// Semi-randomly select a movie from your list to watch
    #[command(long_about = "Pick one unwatched movie at random, weighted by its TMDB vote average, and mark it as watched.")]
    Flip,
    /// Mark a movie as watched
    Watch {
        identifier: String,
    },
    /// Mark a movie as unwatched
    Unwatch {
        identifier: String,
    },
    /// Show your list of movies
    List,
    /// Manage the TMDB API key and show settings
    #[command(long_about = "Manage the TMDB API key stored with your list and display the current settings. Running without a subcommand shows the settings.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Save a TMDB API key (v3 key or v4 read access token)
    SetKey {
        /// The key; prompts with hidden input when omitted
        key: Option<String>,
    },
    /// Remove the saved TMDB API key
    UnsetKey,
    /// Show current settings (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let verbose = cli.verbose;
    let output = output::Output::new(cli.output, cli.quiet);

    if let Err(report) = run(cli, &output).await {
        output.error(error_message(&report));
        if verbose > 0 {
            eprintln!("{:?}", report);
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli, output: &output::Output) -> color_eyre::Result<()> {
    let paths = PathManager::default();
    let mut settings = Config::load_or_default(&paths.config_file()).map_err(|e| {
        eyre!("Failed to load settings from {}: {}", paths.config_file().display(), e)
    })?;
    settings.logging.file = settings.logging.file.map(|file| paths.log_file(&file));

    logging::init_logging(cli.verbose, cli.quiet, &settings.logging)
        .map_err(|e| eyre!("Failed to set up logging: {}", e))?;

    let ctx = AppContext::new(paths, settings, cli.file);

    match cli.command {
        Commands::Add { identifier } => movies::run_add(&ctx, &identifier, output).await,
        Commands::Delete { identifier } => movies::run_delete(&ctx, &identifier, output).await,
        Commands::Flip => movies::run_flip(&ctx, output),
        Commands::Watch { identifier } => movies::run_watch(&ctx, &identifier, true, output).await,
        Commands::Unwatch { identifier } => movies::run_watch(&ctx, &identifier, false, output).await,
        Commands::List => list::run_list(&ctx, output),
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &ctx, output)
        }
    }
}

/// One line for the user: the message and its causes, no backtrace.
/// Causes already spelled out by the message before them are skipped.
fn error_message(report: &color_eyre::Report) -> String {
    let mut message = String::new();
    for cause in report.chain() {
        let text = cause.to_string();
        if message.contains(&text) {
            continue;
        }
        if !message.is_empty() {
            message.push_str(": ");
        }
        message.push_str(&text);
    }
    message
}
