//! Painel CLI
//!
//! Terminal host for the dashboard:
//! - Show the revenue cards, alerts and billing panel
//! - Refresh a single panel
//! - Talk to the assistant, once or interactively
//! - Generate a default config file
//!
//! # Configuration
//!
//! Config file (`--config`, `~/.config/painel/config.toml` or
//! `./painel.toml`), then `PAINEL_*` environment variables, then flags.
//! `RUST_LOG` overrides the configured log level.

use clap::{Parser, Subcommand};
use painel::{
    App, Author, Command, Config, Control, HttpApi, Input, LoggingConfig, MemoryDocument, Region,
    Trigger,
};
use std::path::PathBuf;
use std::rc::Rc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "painel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MEI revenue, billing and assistant dashboard for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// User to show the dashboard for
    #[arg(short, long, global = true)]
    pub user_id: Option<u64>,

    /// Reach all three services through one base URL (a reverse proxy that serves all three paths)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and print every panel (default)
    Show,

    /// Refresh and print the revenue cards and alerts
    Dashboard,

    /// Refresh and print the billing panel
    Billing,

    /// Send one message to the assistant
    Chat {
        /// Message text
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Interactive session: chat and refresh panels
    Shell,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        let content = painel::generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(user_id) = cli.user_id {
        config.user.id = user_id;
    }
    if let Some(base_url) = &cli.base_url {
        config.api.limits_url = base_url.clone();
        config.api.billing_url = base_url.clone();
        config.api.assistant_url = base_url.clone();
    }

    init_logging(&config.logging);
    tracing::debug!(?config, "Configuration resolved");

    let endpoints = config.api.endpoints();
    let api = match config.api.request_timeout() {
        Some(timeout) => HttpApi::with_timeout(endpoints, timeout)?,
        None => HttpApi::new(endpoints),
    };

    let document = Rc::new(MemoryDocument::new());
    let app = App::new(Rc::new(api), document.clone(), config.user.id);

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => {
            app.startup().await;
            print_panels(&document, &Region::ALL[..3]);
        }
        Commands::Dashboard => {
            app.dispatch(Command::RefreshDashboard).await;
            print_panels(&document, &[Region::CardGrid, Region::Alerts]);
        }
        Commands::Billing => {
            app.dispatch(Command::RefreshBilling).await;
            print_panels(&document, &[Region::BillingPanel]);
        }
        Commands::Chat { message } => {
            document.set_input(Input::ChatMessage, &message.join(" "));
            app.dispatch(Command::SendChat).await;
            print_messages(&app, 0);
        }
        Commands::Shell => run_shell(&app, &document).await?,
        Commands::Config { .. } => unreachable!("handled before config loading"),
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("painel={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run_shell(app: &App, document: &MemoryDocument) -> anyhow::Result<()> {
    app.startup().await;
    print_panels(document, &Region::ALL[..3]);
    print_shell_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":q" | ":quit" => break,
            ":h" | ":help" => print_shell_help(),
            ":d" | ":dashboard" => {
                app.handle(&Trigger::Click(Control::RefreshDashboardButton)).await;
                print_panels(document, &[Region::CardGrid, Region::Alerts]);
            }
            ":b" | ":billing" => {
                app.handle(&Trigger::Click(Control::RefreshBillingButton)).await;
                print_panels(document, &[Region::BillingPanel]);
            }
            _ => {
                let seen = app.chat().len();
                document.set_input(Input::ChatMessage, &line);
                app.handle(&Trigger::key(Control::ChatInput, "Enter")).await;
                print_messages(app, seen);
            }
        }
    }

    Ok(())
}

fn print_shell_help() {
    println!("Type a message to ask the assistant.");
    println!("  :dashboard (:d)  refresh revenue cards and alerts");
    println!("  :billing   (:b)  refresh plan and usage");
    println!("  :quit      (:q)  leave");
    println!();
}

fn print_panels(document: &MemoryDocument, regions: &[Region]) {
    for region in regions {
        // The alerts panel renders its own header
        let title = match region {
            Region::CardGrid => Some("Resumo"),
            Region::Alerts => None,
            Region::BillingPanel => Some("Plano e consumo"),
            Region::ChatLog => Some("Assistente"),
        };
        if let Some(title) = title {
            println!("== {} ==", title);
        }
        print!("{}", document.render_text(*region));
        println!();
    }
}

fn print_messages(app: &App, skip: usize) {
    for message in app.chat().messages().into_iter().skip(skip) {
        let who = match message.author {
            Author::User => "você",
            Author::Assistant => "assistente",
        };
        println!("{}> {}", who, message.text);
        println!();
    }
}
