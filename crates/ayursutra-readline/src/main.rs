use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use ayursutra_application::{AuthOutcome, Portal, SubmitOutcome};
use ayursutra_core::auth::{AuthField, AuthMode};
use ayursutra_core::config::PortalConfig;
use ayursutra_core::consultation::ConsultationField;
use ayursutra_infrastructure::AyurPaths;
use ayursutra_infrastructure::storage::ConfigStorage;

mod command;
mod helper;
mod render;

use command::Command;
use helper::CliHelper;

#[derive(Parser)]
#[command(name = "ayursutra")]
#[command(about = "AyurSutra - AI-powered Panchakarma consultation client", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/ayursutra/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides config and environment
    #[arg(long)]
    base_url: Option<String>,

    /// Fail submissions whose response lacks a field instead of using fallback text
    #[arg(long)]
    strict: bool,

    /// Run without the login/signup flow
    #[arg(long)]
    no_auth: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => AyurPaths::config_file()?,
    };
    let storage = ConfigStorage::new(config_path);

    if let Some(Commands::Config { action }) = &cli.command {
        return run_config_command(&storage, action);
    }

    let mut config = storage
        .load_with_env()
        .with_context(|| format!("Failed to load {}", storage.path().display()))?;
    apply_cli_overrides(&mut config, &cli);
    init_tracing(&config.log_level);

    tracing::debug!(base_url = %config.api.base_url, "Starting portal");
    let portal = Arc::new(Portal::from_config(&config)?);
    portal.start().await;

    run_repl(portal).await
}

fn apply_cli_overrides(config: &mut PortalConfig, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if cli.strict {
        config.features.strict_responses = true;
    }
    if cli.no_auth {
        config.features.auth_enabled = false;
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_config_command(storage: &ConfigStorage, action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            if storage.ensure_exists()? {
                println!("Created {}", storage.path().display());
            } else {
                println!("{} already exists", storage.path().display());
            }
        }
        ConfigAction::Show => {
            let config = storage.load_with_env()?;
            print!("{}", toml_string(&config)?);
        }
    }
    Ok(())
}

fn toml_string(config: &PortalConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

async fn run_repl(portal: Arc<Portal>) -> Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    render::banner();
    if let Some(auth) = portal.auth() {
        render::whoami(&auth.view().await);
    }

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let Some(command) = Command::parse(&line) else {
                    continue;
                };
                let _ = rl.add_history_entry(line.as_str());

                if command == Command::Quit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                handle(&portal, command).await;

                for notice in portal.notices().drain().await {
                    render::notice(&notice);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                render::error(format!("{:?}", err));
                break;
            }
        }
    }

    Ok(())
}

async fn handle(portal: &Arc<Portal>, command: Command) {
    let consultation = portal.consultation();

    match command {
        Command::Name(value) => set_consultation(portal, ConsultationField::Name, &value).await,
        Command::Problem(value) => set_consultation(portal, ConsultationField::Problem, &value).await,
        Command::Priority(value) => {
            set_consultation(portal, ConsultationField::Priority, &value).await
        }
        Command::Form => render::form(&consultation.view().await),
        Command::Submit => {
            if consultation.can_submit().await {
                render::submitting();
            }
            match consultation.submit().await {
                SubmitOutcome::Completed(rec) => render::recommendation(&rec),
                SubmitOutcome::Rejected(missing) => {
                    let names: Vec<String> = missing.iter().map(|f| f.to_string()).collect();
                    println!("{}", format!("Please fill in: {}", names.join(", ")).yellow());
                }
                SubmitOutcome::AlreadyInFlight => {
                    println!("{}", "A request is already in progress".yellow())
                }
                // Reported through the notice log.
                SubmitOutcome::Failed(_) => {}
            }
        }
        Command::Sessions => render::sessions(&consultation.view().await),
        Command::Login => submit_auth(portal, AuthMode::Login).await,
        Command::Signup => submit_auth(portal, AuthMode::Signup).await,
        Command::Mode => {
            if let Some(auth) = require_auth(portal) {
                auth.open_modal().await;
                auth.toggle_mode().await;
                render::auth(&auth.view().await);
            }
        }
        Command::Auth { field, value } => {
            let Some(auth) = require_auth(portal) else {
                return;
            };
            let field = match AuthField::from_str(&field) {
                Ok(field) => field,
                Err(_) => {
                    render::error(format!("Unknown auth field '{}'", field));
                    return;
                }
            };
            auth.open_modal().await;
            if let Err(err) = auth.set_field(field, &value).await {
                render::error(err);
            }
        }
        Command::Logout { forget } => {
            let Some(auth) = require_auth(portal) else {
                return;
            };
            if forget {
                if let Err(err) = auth.logout_and_forget().await {
                    render::error(err);
                }
            } else {
                auth.logout().await;
            }
            println!("{}", "Logged out".bright_black());
        }
        Command::Whoami => {
            if let Some(auth) = require_auth(portal) {
                render::whoami(&auth.view().await);
            }
        }
        Command::Help => render::help(),
        Command::Invalid(message) => println!("{}", message.bright_black()),
        Command::Quit => {}
    }
}

async fn set_consultation(portal: &Portal, field: ConsultationField, value: &str) {
    if let Err(err) = portal.consultation().set_field(field, value).await {
        render::error(err);
    }
}

fn require_auth(portal: &Portal) -> Option<&ayursutra_application::AuthViewModel> {
    let auth = portal.auth();
    if auth.is_none() {
        println!("{}", "Login is disabled in this configuration".bright_black());
    }
    auth
}

async fn submit_auth(portal: &Portal, mode: AuthMode) {
    let Some(auth) = require_auth(portal) else {
        return;
    };
    auth.open_modal().await;
    if auth.mode().await != mode {
        auth.toggle_mode().await;
    }

    match auth.submit().await {
        AuthOutcome::LoggedIn(user) => {
            println!("{}", format!("Welcome, {}", user.display_name()).green())
        }
        AuthOutcome::Registered(_) => render::auth(&auth.view().await),
        AuthOutcome::AlreadyInFlight => {
            println!("{}", "A request is already in progress".yellow())
        }
        AuthOutcome::Failed(_) => {}
    }
}
