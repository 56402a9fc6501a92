//! Coffee Society CLI - drive the Haifa coffee community client from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (logs in on success)
//! coffee register -u noa -e noa@example.com -p secret
//!
//! # Log in / out
//! coffee login -e noa@example.com -p secret
//! coffee logout
//!
//! # Browse
//! coffee cafes
//! coffee cafe 64f1c0ffee
//!
//! # Record a visit, rate a cafe
//! coffee scan 64f1c0ffee
//! coffee rate 64f1c0ffee --stars 5 --comment "Best cortado in town"
//!
//! # Interactive session
//! coffee shell
//!
//! # JSON logs on stderr
//! coffee --log-json cafes
//! ```
//!
//! Every invocation restores the session from the stored credential (see
//! `COFFEE_DATA_DIR`), runs the command and prints the screen the session
//! ends up on.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod app;
mod commands;
mod render;

use app::App;
use commands::Command;

const DEFAULT_FILTER: &str = "coffee_society_client=info,coffee_society_cli=info";
const VERBOSE_FILTER: &str = "coffee_society_client=debug,coffee_society_cli=debug";

#[derive(Parser)]
#[command(name = "coffee")]
#[command(author, version, about = "Coffee Society Haifa client")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Run(Command),
    /// Start an interactive session
    Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over `--verbose`. Logs go to stderr so screens stay on stdout.
fn init_tracing(verbose: bool, json: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::from_env()?;

    match cli.command {
        Commands::Run(command) => {
            commands::execute(&mut app, command).await?;
            render::current_screen(&app).await?;
        }
        Commands::Shell => commands::shell::run(&mut app).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_flags_are_global() {
        let cli = Cli::try_parse_from(["coffee", "cafes", "--log-json", "-v"]);
        let Ok(cli) = cli else {
            panic!("flags should parse after the subcommand");
        };
        assert!(cli.log_json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Run(Command::Cafes)));
    }

    #[test]
    fn test_text_logs_by_default() {
        let Ok(cli) = Cli::try_parse_from(["coffee", "shell"]) else {
            panic!("shell should parse");
        };
        assert!(!cli.log_json);
        assert!(matches!(cli.command, Commands::Shell));
    }
}
