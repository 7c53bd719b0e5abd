//! crdform CLI - Manage Kubernetes custom resources with server-side apply

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use crdform_core::ProviderConfig;

mod commands;
mod display;
mod error;
mod exit_codes;
mod input;

use display::OutputFormat;
use error::Result;
use input::KindArgs;

#[derive(Parser)]
#[command(name = "crdform")]
#[command(author = "crdform Contributors")]
#[command(version)]
#[command(about = "Manage Kubernetes custom resources with server-side apply and wait conditions", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Provider configuration file (default: ~/.config/crdform/config.yaml)
    #[arg(long, global = true, env = "CRDFORM_CONFIG")]
    config: Option<PathBuf>,

    /// Field manager used for server-side apply
    #[arg(long, global = true, env = "CRDFORM_FIELD_MANAGER")]
    field_manager: Option<String>,

    /// Take ownership of conflicting fields (`--force-conflicts=false` turns
    /// off a value set in the config file)
    #[arg(
        long,
        global = true,
        env = "CRDFORM_FORCE_CONFLICTS",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    force_conflicts: Option<bool>,

    /// Never contact a cluster
    #[arg(long, global = true, env = "CRDFORM_OFFLINE")]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a resource file as YAML without contacting the cluster
    Manifest {
        /// Resource file
        file: PathBuf,
    },

    /// Apply a resource file and wait for its conditions
    Create {
        /// Resource file
        file: PathBuf,

        /// State output format
        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Re-apply a resource file on top of existing state
    Update {
        /// State printed by a previous create or update
        #[arg(long)]
        state: PathBuf,

        /// Resource file
        file: PathBuf,

        /// State output format
        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Refresh state from the cluster
    Read {
        /// State file
        state: PathBuf,

        /// State output format
        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Delete the object described by a state file
    Delete {
        /// State file
        state: PathBuf,
    },

    /// Import an existing object by id (name or namespace/name)
    Import {
        #[command(flatten)]
        kind: KindArgs,

        /// Import id
        id: String,

        /// State output format
        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Read a live object (metadata and spec only)
    Get {
        #[command(flatten)]
        kind: KindArgs,

        /// Object name
        name: String,

        /// Object namespace
        #[arg(short, long)]
        namespace: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Show the Terraform entities a kind exposes
    Schema {
        #[command(flatten)]
        kind: KindArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let env = std::env::var("CRDFORM_LOG").unwrap_or_else(|_| default.to_string());
    let filter = tracing_subscriber::EnvFilter::from_str(&env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .init();
}

/// Load provider configuration, then apply flag and env overrides
fn load_config(cli: &Cli) -> Result<ProviderConfig> {
    let mut config = match &cli.config {
        Some(path) => ProviderConfig::load_from(path)?,
        None => ProviderConfig::load()?,
    };

    if let Some(field_manager) = &cli.field_manager {
        config.field_manager = field_manager.clone();
    }
    if let Some(force_conflicts) = cli.force_conflicts {
        config.force_conflicts = force_conflicts;
    }
    config.offline |= cli.offline;

    config.validate()?;
    tracing::debug!(?config, "provider configuration");
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Manifest { file } => commands::manifest::run(&file),

        Commands::Schema { kind, json } => commands::schema::run(&config, &kind, json),

        Commands::Create { file, output } => commands::create::run(config, &file, output).await,

        Commands::Update {
            state,
            file,
            output,
        } => commands::update::run(config, &state, &file, output).await,

        Commands::Read { state, output } => commands::read::run(config, &state, output).await,

        Commands::Delete { state } => commands::delete::run(config, &state).await,

        Commands::Import { kind, id, output } => {
            commands::import::run(config, &kind, &id, output).await
        }

        Commands::Get {
            kind,
            name,
            namespace,
            output,
        } => commands::get::run(config, &kind, namespace.as_deref(), &name, output).await,
    }
}

#[tokio::main]
async fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
