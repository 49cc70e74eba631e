//! Savings CLI
//!
//! Command-line interface for a running Savings Calculator server.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use savings_client::{SavingsClient, client::DEFAULT_BASE_URL};
use tracing_subscriber::EnvFilter;

use crate::commands::{Output, ProjectFields};

/// Savings CLI - automation savings from the command line
#[derive(Parser, Debug)]
#[command(name = "savings")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server base URL
    #[arg(short, long, env = "SAVINGS_SERVER", default_value = DEFAULT_BASE_URL)]
    server: String,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hourly rates
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Project records
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },
    /// Savings summed over every project
    Summary,
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    /// Show the current rates
    Show,
    /// Change one or both rates
    Set {
        /// IT hourly rate
        #[arg(long)]
        it_rate: Option<f64>,
        /// Business hourly rate
        #[arg(long)]
        business_rate: Option<f64>,
    },
}

#[derive(Subcommand, Debug)]
enum ProjectsAction {
    /// List projects with their savings
    List,
    /// Add a project; the id is derived from the name unless given
    Add {
        /// Display name
        name: String,
        /// Explicit id
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Change fields of an existing project
    Set {
        /// Project id
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Delete a project
    Remove {
        /// Project id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let client = SavingsClient::new(&args.server)?;
    let output = if args.json { Output::Json } else { Output::Table };

    let rendered = match args.command {
        Command::Settings { action } => match action {
            SettingsAction::Show => commands::settings_show(&client, output).await?,
            SettingsAction::Set {
                it_rate,
                business_rate,
            } => commands::settings_set(&client, it_rate, business_rate, output).await?,
        },
        Command::Projects { action } => match action {
            ProjectsAction::List => commands::projects_list(&client, output).await?,
            ProjectsAction::Add { name, id, fields } => {
                commands::projects_add(&client, name, id, fields, output).await?
            }
            ProjectsAction::Set { id, name, fields } => {
                commands::projects_set(&client, &id, name, fields, output).await?
            }
            ProjectsAction::Remove { id } => commands::projects_remove(&client, &id).await?,
        },
        Command::Summary => commands::summary(&client, output).await?,
    };

    println!("{rendered}");
    Ok(())
}
