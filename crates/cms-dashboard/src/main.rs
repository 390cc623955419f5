//! `cmsd` - command-line access to the CMS dashboard store.

mod commands;

use clap::{Parser, Subcommand};
use cms_dashboard::config::{
    default, error::ConfigError, loader::ConfigLoader, schema::Config, xdg,
};
use cms_dashboard::logging;
use commands::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use widget_schema::WidgetCatalog;

/// CMS dashboard store and widget tool
#[derive(Parser)]
#[command(name = "cmsd")]
#[command(version, about = "CMS dashboard store and widget tool")]
struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/cms-dashboard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store file, overriding the configured backend
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the cmsd CLI
#[derive(Subcommand)]
enum Commands {
    /// Print the JSON value stored under a key
    Get {
        key: String,
    },

    /// Store a JSON value under a key
    Set {
        key: String,
        /// JSON text, e.g. '{"theme":"dark"}' or '"plain string"'
        json: String,
    },

    /// Remove a key (no-op if absent)
    Rm {
        key: String,
    },

    /// Check whether a key exists (exit code 0 if it does)
    Exists {
        key: String,
    },

    /// List every key
    Keys,

    /// Delete every entry
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Write a backup of every entry as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Restore entries from a backup file
    Import {
        file: PathBuf,
    },

    /// Manage widgets
    Widgets {
        #[command(subcommand)]
        action: WidgetsAction,
    },

    /// List registered widget types
    Types {
        /// Only types in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `widgets` subcommand.
#[derive(Subcommand)]
enum WidgetsAction {
    /// List widgets
    List {
        /// Only widgets in this position, in render order
        #[arg(long)]
        position: Option<String>,
    },
    /// Create a widget from a registered type
    Add {
        /// Widget type id (see `cmsd types`)
        widget_type: String,
        title: String,
        /// Layout slot, e.g. "sidebar"
        #[arg(long)]
        position: String,
    },
    /// Remove a widget
    Rm {
        id: String,
    },
    /// Set the render order of a position
    Reorder {
        #[arg(long)]
        position: String,
        /// Widget ids, first to last
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Check a widget's settings against its type
    Validate {
        id: String,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Commands::Config { action } = &cli.command {
        logging::init(Default::default());
        return run_config_command(action, cli.config.as_deref());
    }

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.log.level);

    let service = match config.store.open_service(cli.store.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Store error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if kv_store::init_global(service).is_err() {
        tracing::warn!("Global store already initialized, using existing instance");
    }
    let store = kv_store::global();
    let catalog = WidgetCatalog::builtin();

    match cli.command {
        Commands::Get { key } => run_get_command(store, &key),
        Commands::Set { key, json } => run_set_command(store, &key, &json),
        Commands::Rm { key } => run_rm_command(store, &key),
        Commands::Exists { key } => run_exists_command(store, &key),
        Commands::Keys => run_keys_command(store),
        Commands::Clear { yes } => run_clear_command(store, yes),
        Commands::Export { output } => run_export_command(store, output.as_deref()),
        Commands::Import { file } => run_import_command(store, &file),
        Commands::Widgets { action } => match action {
            WidgetsAction::List { position } => {
                run_widgets_list_command(store, catalog, position.as_deref())
            }
            WidgetsAction::Add {
                widget_type,
                title,
                position,
            } => run_widgets_add_command(store, catalog, &widget_type, &title, &position),
            WidgetsAction::Rm { id } => run_widgets_rm_command(store, catalog, &id),
            WidgetsAction::Reorder { position, ids } => {
                run_widgets_reorder_command(store, catalog, &position, &ids)
            }
            WidgetsAction::Validate { id } => run_widgets_validate_command(store, catalog, &id),
        },
        Commands::Types { category } => run_types_command(catalog, category.as_deref()),
        Commands::Config { .. } => ExitCode::SUCCESS,
    }
}

/// Handles `config init|path|validate` against `explicit` or the XDG path.
fn run_config_command(action: &ConfigAction, explicit: Option<&Path>) -> ExitCode {
    let path = explicit.map(Path::to_path_buf).unwrap_or_else(xdg::config_path);
    let result: Result<(), ConfigError> = match action {
        ConfigAction::Init { force } => {
            default::create_default_config_at(&path, *force).map(|()| {
                println!("Created configuration at {}", path.display());
            })
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Validate => ConfigLoader::load(explicit).map(|config: Config| {
            println!("Configuration is valid");
            println!("{config:#?}");
        }),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Config error: {e}");
            ExitCode::FAILURE
        }
    }
}
