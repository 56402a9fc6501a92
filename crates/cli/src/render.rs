//! Terminal rendering of screens and messages.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::Write;

use coffee_society_client::api::{Barista, Cafe};
use coffee_society_client::screens::{self, CafeDetail, HomeView, ScreenError, ScreenView};
use coffee_society_client::session::NavItem;
use coffee_society_client::SessionController;
use coffee_society_core::{Identity, Screen};

use crate::app::App;

/// Load and print whatever screen the session is on.
pub async fn current_screen(app: &App) -> Result<(), ScreenError> {
    let view = screens::load(&app.session, &app.api).await?;
    header(&app.session);
    screen(&view);
    Ok(())
}

/// A one-line confirmation.
pub fn notice(message: &str) {
    println!("{message}");
}

/// An inline failure.
pub fn failure(error: &dyn std::fmt::Display) {
    eprintln!("✗ {error}");
}

pub fn prompt(screen: Screen) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    write!(out, "coffee:{screen}> ")?;
    out.flush()
}

pub fn whoami(session: &SessionController) {
    let (Some(identity), Some(claims)) = (session.identity(), session.claims()) else {
        println!("Not logged in.");
        return;
    };
    println!("{} ({})", identity.display_name, identity.subject_id);
    if let Some(role) = &claims.role {
        println!("  role:    {role}");
    }
    if let Some(issued) = claims.issued_at() {
        println!("  issued:  {issued}");
    }
    if let Some(expires) = claims.expires_at() {
        println!("  expires: {expires}");
    }
}

fn header(session: &SessionController) {
    if let Some(error) = session.fatal_error() {
        eprintln!("! {error}");
    }
    let nav = session.nav_items();
    if nav.is_empty() {
        return;
    }
    if let Some(greeting) = greeting(session.identity()) {
        println!("{greeting}");
    }
    let bar: Vec<String> = nav
        .iter()
        .map(|item| match item {
            NavItem::Go { label, screen } => format!("[{label}: go {screen}]"),
            NavItem::Logout => format!("[{}: logout]", item.label()),
        })
        .collect();
    println!("{}", bar.join(" "));
    println!();
}

/// Nav bar greeting for a logged-in user.
fn greeting(identity: Option<&Identity>) -> Option<String> {
    let identity = identity?;
    let name = identity.display_name.trim();
    let name = if name.is_empty() { "User" } else { name };
    Some(format!("Hello, {name}!"))
}

fn screen(view: &ScreenView) {
    match view {
        ScreenView::Home(home) => home_screen(home),
        ScreenView::Login => {
            println!("Login");
            println!("  login -e <email> -p <password>");
            println!("  No account yet? go register");
        }
        ScreenView::Register => {
            println!("Register");
            println!("  register -u <username> -e <email> -p <password>");
            println!("  Already a member? go login");
        }
        ScreenView::CafeList(cafes) => {
            println!("Coffee Shops in Haifa");
            if cafes.is_empty() {
                println!("  No coffee shops yet.");
            }
            for cafe in cafes {
                cafe_summary(cafe);
            }
        }
        ScreenView::CafeDetail(detail) => cafe_detail(detail),
        ScreenView::ScanQr(cafes) => {
            println!("Scan QR");
            choices(cafes);
            println!("  scan <cafe-id>");
        }
        ScreenView::RateCafe(cafes) => {
            println!("Rate a Coffee Shop");
            choices(cafes);
            println!("  rate <cafe-id> --stars <1-5> [--comment <text>]");
        }
    }
}

fn home_screen(home: &HomeView) {
    println!("Coffee Society Haifa");
    if let Some(name) = &home.display_name {
        println!("Hello, {name}!");
    }
    println!("{}", home.welcome);
    println!();
    let action = home.call_to_action;
    println!("→ {} (go {})", action.label, action.target);
}

fn cafe_summary(cafe: &Cafe) {
    let partner = if cafe.is_community_partner {
        " · Community Partner"
    } else {
        ""
    };
    println!();
    println!("  {}  ★ {:.1}{partner}", cafe.name, cafe.rating_or_zero());
    if let Some(address) = &cafe.address {
        println!("    {address}");
    }
    println!("    cafe {}", cafe.id);
}

fn cafe_detail(detail: &CafeDetail) {
    let cafe = &detail.cafe;
    println!("{}  ★ {:.1}", cafe.name, cafe.rating_or_zero());
    if cafe.is_community_partner {
        println!("Community Partner");
    }
    if let Some(address) = &cafe.address {
        println!("{address}");
    }
    if let Some(description) = &cafe.description {
        println!();
        println!("{description}");
    }
    println!("Image: {}", cafe.image_url_or_placeholder());

    if let Some(menu) = cafe.menu.as_ref().filter(|menu| !menu.is_empty()) {
        println!();
        println!("Menu");
        for (item, price) in menu {
            println!("  {item:<24} {price}");
        }
    }

    println!();
    println!("Our Baristas");
    if detail.baristas.is_empty() {
        println!("  No baristas listed.");
    }
    for barista in &detail.baristas {
        barista_line(barista);
    }
}

fn barista_line(barista: &Barista) {
    let initial = barista.initial().unwrap_or('?');
    let specialty = barista.specialty.as_deref().unwrap_or("Barista");
    match barista.rating {
        Some(rating) => println!("  ({initial}) {} - {specialty}  ★ {rating:.1}", barista.name),
        None => println!("  ({initial}) {} - {specialty}", barista.name),
    }
}

fn choices(cafes: &[Cafe]) {
    if cafes.is_empty() {
        println!("  No coffee shops available.");
    }
    for cafe in cafes {
        println!("  {:<26} {}", cafe.id.as_str(), cafe.name);
    }
}
