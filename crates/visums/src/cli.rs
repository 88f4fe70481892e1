use std::path::PathBuf;

use clap::{Parser, Subcommand};
use visums_core::kernel::constants;

/// Visums: env-file settings and named service components
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Base settings file
    #[arg(long = "env", value_name = "FILE", default_value = constants::BASE_ENV_FILE)]
    pub env_file: PathBuf,

    /// Local override settings file (optional on disk)
    #[arg(long = "local", value_name = "FILE", default_value = constants::LOCAL_ENV_FILE)]
    pub local_file: PathBuf,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one setting
    Get {
        /// Setting name
        key: String,
    },
    /// Print every setting
    Dump {
        /// Output format: json, yaml or toml
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Run a statement on the `db` component and print the resulting rows
    Query {
        /// SQL text, with `?1`, `?2`... placeholders
        sql: String,
        /// Positional parameters; JSON literals are bound as such, anything else as text
        #[arg(allow_hyphen_values = true)]
        params: Vec<String>,
    },
    /// Write the settings back to an env file
    Save {
        /// Target file
        file: PathBuf,
    },
}
