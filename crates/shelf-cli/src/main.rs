//! SHELF CLI
//!
//! Command-line interface for SHELF - bookmarks and categories management.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use shelf_core::{BookmarkContext, BookmarkError, Config, LoadStatus};

mod commands;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "SHELF - Local bookmark manager")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage bookmarks
    #[command(alias = "b")]
    Bookmark {
        #[command(subcommand)]
        command: BookmarkCommands,
    },
    /// Manage categories
    #[command(alias = "c")]
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// List all tags
    Tags,
    /// Show storage location and counts
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum BookmarkCommands {
    /// Save a new bookmark
    #[command(alias = "create")]
    Add(commands::bookmark::AddArgs),
    /// List bookmarks
    #[command(alias = "ls")]
    List(commands::bookmark::ListArgs),
    /// Show bookmark details
    Show {
        /// Bookmark ID (full id or prefix)
        id: String,
    },
    /// Edit a bookmark
    Edit(commands::bookmark::EditArgs),
    /// Archive a bookmark
    Archive {
        /// Bookmark ID (full id or prefix)
        id: String,
        /// Unarchive instead
        #[arg(long)]
        undo: bool,
    },
    /// Count a visit and print the URL
    Visit {
        /// Bookmark ID (full id or prefix)
        id: String,
    },
    /// Delete a bookmark
    #[command(alias = "rm")]
    Delete {
        /// Bookmark ID (full id or prefix)
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Create a new category
    #[command(alias = "create")]
    Add(commands::category::AddArgs),
    /// List categories with bookmark counts
    #[command(alias = "ls")]
    List,
    /// Edit a category
    Edit(commands::category::EditArgs),
    /// Delete a category no bookmark belongs to
    #[command(alias = "rm")]
    Delete {
        /// Category ID, prefix or name
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_level)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(hint) = e
                .downcast_ref::<BookmarkError>()
                .and_then(BookmarkError::recovery_suggestion)
            {
                eprintln!("Hint: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return match command {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, &output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key.clone(), value.clone(), config_path, &output)
            }
        };
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    init_logging(&config);

    let context = open_context(&config).await?;

    match cli.command {
        Commands::Bookmark { command } => handle_bookmark_command(command, &context, &output).await,
        Commands::Category { command } => handle_category_command(command, &context, &output).await,
        Commands::Tags => commands::tag::list(&context, &output),
        Commands::Status => commands::status::show(&context, &config, &output).await,
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

/// Open the store under the configured data directory and load it
async fn open_context(config: &Config) -> Result<BookmarkContext> {
    let context = BookmarkContext::from_adapter(config.storage_adapter());

    if context.load().await == LoadStatus::Failed {
        let message = match context.error() {
            Some(error) => {
                if let Some(hint) = error.recovery_suggestion() {
                    eprintln!("Hint: {}", hint);
                }
                describe_chain(error.as_ref())
            }
            None => "unknown error".to_string(),
        };
        anyhow::bail!(
            "Failed to load bookmarks from {}: {}",
            config.data_dir.display(),
            message
        );
    }

    debug!(
        "Opened {} with {} bookmarks",
        config.data_dir.display(),
        context.bookmarks().len()
    );
    Ok(context)
}

/// Render an error followed by each of its causes
fn describe_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Log to stderr when a level is configured (SHELF_LOG or config `log_level`)
fn init_logging(config: &Config) {
    let Some(ref level) = config.log_level else {
        return;
    };

    let env_filter = EnvFilter::new(log_directives(level));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// A bare level applies to this app's crates; anything else is a full filter
fn log_directives(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("shelf_core={0},shelf={0}", level)
    }
}

async fn handle_bookmark_command(
    command: BookmarkCommands,
    context: &BookmarkContext,
    output: &Output,
) -> Result<()> {
    use commands::bookmark;

    match command {
        BookmarkCommands::Add(args) => bookmark::add(context, args, output).await,
        BookmarkCommands::List(args) => bookmark::list(context, args, output),
        BookmarkCommands::Show { id } => bookmark::show(context, id, output),
        BookmarkCommands::Edit(args) => bookmark::edit(context, args, output).await,
        BookmarkCommands::Archive { id, undo } => bookmark::archive(context, id, undo, output).await,
        BookmarkCommands::Visit { id } => bookmark::visit(context, id, output).await,
        BookmarkCommands::Delete { id, yes } => bookmark::delete(context, id, yes, output).await,
    }
}

async fn handle_category_command(
    command: CategoryCommands,
    context: &BookmarkContext,
    output: &Output,
) -> Result<()> {
    use commands::category;

    match command {
        CategoryCommands::Add(args) => category::add(context, args, output).await,
        CategoryCommands::List => category::list(context, output),
        CategoryCommands::Edit(args) => category::edit(context, args, output).await,
        CategoryCommands::Delete { id, yes } => category::delete(context, id, yes, output).await,
    }
}
