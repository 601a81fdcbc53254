use std::path::Path;

use clap::Parser;

use veo_studio::cli::{self, Args, Command, ConfigAction};
use veo_studio::config::{self, Config};

/// Environment variables checked for the API key, in order.
const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Load environment variables from .env file if present.
fn load_env() {
    // Existing env vars win; a missing .env is fine.
    if let Err(e) = dotenv::dotenv() {
        log::debug!("No .env loaded: {}", e);
    }
}

/// The API key from the environment, if set. Blank variables are skipped.
fn env_api_key() -> Option<String> {
    config::first_api_key(API_KEY_ENV_VARS.iter().map(|name| std::env::var(name).ok()))
}

fn exit_on_error(result: Result<(), String>) {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Load the config file, exiting on failure.
///
/// If --config is specified, the file must exist. Otherwise, fall back to
/// defaults if the default config is not found.
fn load_config(path: Option<&Path>) -> Config {
    match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Load .env file before anything else reads the environment
    load_env();

    let args = Args::parse();

    match args.command {
        Command::Generate(generate) => {
            let config = load_config(args.config.as_deref());
            exit_on_error(cli::run_generate(generate, &config, env_api_key()).map(|_| ()));
        }
        Command::Build { doc, format } => exit_on_error(cli::run_build(&doc, format)),
        Command::BuildInit { path, force } => exit_on_error(cli::run_build_init(&path, force)),
        Command::Decompile { file } => exit_on_error(cli::run_decompile(&file)),
        Command::Config { action } => {
            // `init` creates the file, so it must not require it to exist.
            let config = match action {
                ConfigAction::Init => Config::default(),
                ConfigAction::Show => load_config(args.config.as_deref()),
            };
            exit_on_error(cli::handle_config_action(
                action,
                args.config.as_deref(),
                &config,
                env_api_key(),
            ));
        }
    }
}
