//! CLI commands.
//!
//! One-shot invocations and the interactive shell share [`Command`] and
//! [`execute`]; the shell adds screen switching on top.

pub mod auth;
pub mod shell;
pub mod visit;

use clap::Subcommand;

use coffee_society_core::{CafeId, Screen, ScreenParams};

use crate::app::{App, CliError};

#[derive(Subcommand)]
pub enum Command {
    /// Create an account and log in
    Register {
        /// Display name
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log in
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log out and forget the stored credential
    Logout,
    /// Show who is logged in
    Whoami,
    /// List coffee shops
    Cafes,
    /// Show a coffee shop and its baristas
    Cafe {
        /// Coffee shop id
        cafe_id: CafeId,
    },
    /// Record a visit to a coffee shop
    Scan {
        /// Coffee shop id
        cafe_id: CafeId,
    },
    /// Rate a coffee shop
    Rate {
        /// Coffee shop id
        cafe_id: CafeId,

        /// Stars, 1 to 5
        #[arg(short, long)]
        stars: u8,

        /// Optional comment
        #[arg(short, long, default_value = "")]
        comment: String,
    },
}

/// Run one command against the session.
///
/// Browsing commands only move the session; the caller renders the screen
/// it ends up on.
pub async fn execute(app: &mut App, command: Command) -> Result<(), CliError> {
    match command {
        Command::Register {
            username,
            email,
            password,
        } => auth::register(app, username, email, password).await?,
        Command::Login { email, password } => auth::login(app, email, password).await?,
        Command::Logout => auth::logout(app)?,
        Command::Whoami => auth::whoami(app),
        Command::Cafes => app.session.navigate(Screen::CafeList, ScreenParams::default()),
        Command::Cafe { cafe_id } => app
            .session
            .navigate(Screen::CafeDetail, ScreenParams::cafe(cafe_id)),
        Command::Scan { cafe_id } => visit::scan(app, cafe_id).await?,
        Command::Rate {
            cafe_id,
            stars,
            comment,
        } => visit::rate(app, cafe_id, stars, comment).await?,
    }
    Ok(())
}
