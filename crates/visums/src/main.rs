mod cli;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use log::{debug, error};
use serde_json::Value;
use visums_core::{Application, ConfigFormat, ConfigStore, Result};

use cli::{CliArgs, Commands};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("{}", e);
    }

    let config = ConfigStore::with_files(&args.env_file, &args.local_file);
    let app = Application::with_config(config);

    match run(&app, args.command) {
        Ok(code) => code,
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(app: &Application, command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Get { key } => match app.value(&key)? {
            Some(value) => {
                println!("{}", value);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("'{}' is not set", key);
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::Dump { format } => {
            let format: ConfigFormat = format.parse()?;
            let rendered = app.config().export(format)?;
            println!("{}", rendered.trim_end());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Query { sql, params } => {
            let params: Vec<Value> = params.iter().map(|p| parse_param(p)).collect();
            debug!("Binding {} parameter(s)", params.len());

            let db = app.db()?;
            db.query(&sql, &params)?;
            for row in db.fetch_all()? {
                println!("{}", Value::Object(row));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Save { file } => {
            app.config().save_env_file(&file)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// JSON literals (`42`, `true`, `null`, `"x"`) keep their type; anything else is text.
fn parse_param(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
