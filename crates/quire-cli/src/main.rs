//! Quire CLI.
//!
//! Evaluates and inspects access policy for the departmental document
//! library.
//!
//! # Quick Start
//!
//! ```bash
//! # Can a level-1 CS student download a level-2 CS material?
//! quire check --role student --department CS --level 1 \
//!     --material-department CS --material-level 2 --visibility department \
//!     --action download
//!
//! # Every action at once
//! quire matrix --role librarian --department CS --material-department CS
//!
//! # Browse a seeded catalog as a given user
//! quire shelf --seed library.toml --user student-cs-1
//! ```

mod commands;
mod table;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use quire_config::{ConfigLoader, QuireConfig};
use quire_types::{Action, Role, VisibilityScope};
use tracing_subscriber::EnvFilter;

/// Quire - attribute-based access control for a departmental document library.
#[derive(Parser)]
#[command(name = "quire")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Additional configuration file, merged over quire.toml and quire.local.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Project directory holding quire.toml.
    #[arg(long, global = true, default_value = ".")]
    project: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// Evaluate a single access request. Exits 0 on allow, 2 on deny.
    Check {
        #[command(flatten)]
        request: RequestArgs,

        /// Action to evaluate.
        #[arg(short, long)]
        action: Action,

        /// Print the decision as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Evaluate every action for one subject and material.
    Matrix {
        #[command(flatten)]
        request: RequestArgs,

        /// Print the decisions as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the user's shelf: own department, own level.
    Shelf {
        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// List a department's library grouped by level.
    Library {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Department to browse (defaults to the user's own).
        #[arg(short, long)]
        department: Option<String>,
    },

    /// Configuration management.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the merged configuration.
    Show {
        /// Output format: text, json, or toml.
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

/// Subject and material attributes for an ad-hoc evaluation.
#[derive(Args, Clone)]
pub(crate) struct RequestArgs {
    /// Identifier recorded for the subject.
    #[arg(long, default_value = "cli")]
    pub user: String,

    /// Subject role: student, librarian, or admin.
    #[arg(short, long)]
    pub role: Role,

    /// Subject department.
    #[arg(short, long)]
    pub department: String,

    /// Subject academic level.
    #[arg(short, long, default_value_t = 0)]
    pub level: u32,

    /// Department owning the material.
    #[arg(long)]
    pub material_department: String,

    /// Academic level of the material.
    #[arg(long, default_value_t = 0)]
    pub material_level: u32,

    /// Material visibility: level-only, department, or global-searchable.
    #[arg(long, default_value = "department")]
    pub visibility: VisibilityScope,
}

/// Where the catalog comes from and who is browsing it.
#[derive(Args, Clone)]
pub(crate) struct CatalogArgs {
    /// Seed file (defaults to catalog.seed, then the built-in bootstrap set).
    #[arg(short, long)]
    pub seed: Option<PathBuf>,

    /// Identity of the browsing user.
    #[arg(short, long)]
    pub user: String,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    init_tracing(&config);

    match cli.command {
        Commands::Version => {
            commands::version::run();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check {
            request,
            action,
            json,
        } => commands::check::run(&request, action, json, &config),
        Commands::Matrix { request, json } => commands::check::matrix(&request, json, &config),
        Commands::Shelf { catalog } => commands::catalog::shelf(&catalog, &config),
        Commands::Library {
            catalog,
            department,
        } => commands::catalog::library(&catalog, department.as_deref(), &config),
        Commands::Config { command } => match command {
            ConfigCommands::Show { format } => {
                commands::config::show(&config, &format)?;
                Ok(ExitCode::SUCCESS)
            }
        },
    }
}

fn load_config(cli: &Cli) -> Result<QuireConfig> {
    let mut loader = ConfigLoader::new().with_project_dir(&cli.project);
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    loader.load().context("Failed to load configuration")
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(config: &QuireConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
