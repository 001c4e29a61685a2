pub mod commands;

use clap::{Parser, Subcommand};
use laprec_core::config::{ConfigOverrides, LoadOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "laprec",
    about = "Laprec operator CLI",
    long_about = "Inspect configuration, check catalog readiness, and run recommendation queries offline.",
    after_help = "Examples:\n  laprec doctor --json\n  laprec config\n  laprec recommend --budget 75000 --type gaming"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Config file to load; it must exist")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Catalog JSON file, overriding config and env")]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides { catalog_path: self.catalog.clone() },
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
    #[command(about = "Validate config and catalog readiness checks")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Rank catalog laptops for a budget and use case without starting the server")]
    Recommend {
        #[arg(long, allow_negative_numbers = true, help = "Maximum price to consider")]
        budget: i64,
        #[arg(long = "type", help = "Use case to match, case-insensitive")]
        use_case: String,
        #[arg(long, help = "Emit the JSON response body instead of a table")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let result = execute(Cli::parse());

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

pub fn execute(cli: Cli) -> commands::CommandResult {
    let options = cli.load_options();

    match cli.command {
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run(options) }
        }
        Command::Doctor { json } => commands::doctor::run(options, json),
        Command::Recommend { budget, use_case, json } => {
            commands::recommend::run(options, budget, &use_case, json)
        }
    }
}
