//! Interactive shell.
//!
//! Reads one command per line, runs it against the same session and prints
//! the screen the session is on afterwards. Failures are shown inline and do
//! not end the shell.

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use coffee_society_core::{CafeId, Screen, ScreenParams};

use super::Command;
use crate::app::{App, CliError};
use crate::render;

#[derive(Parser)]
#[command(name = "coffee", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    #[command(flatten)]
    Run(Command),
    /// Switch to a screen (home, login, register, cafeList, cafeDetail, scanQr, rateCafe)
    Go {
        screen: Screen,
        /// Coffee shop id, for cafeDetail
        cafe_id: Option<CafeId>,
    },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

pub async fn run(app: &mut App) -> Result<(), CliError> {
    if let Err(e) = render::current_screen(app).await {
        render::failure(&e);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        render::prompt(app.session.current_screen())?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let words = match split_words(&line) {
            Ok(words) if words.is_empty() => continue,
            Ok(words) => words,
            Err(e) => {
                render::failure(&e);
                continue;
            }
        };

        let command = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                // Also covers `help`.
                e.print()?;
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Go { screen, cafe_id } => {
                let params = cafe_id.map_or_else(ScreenParams::default, ScreenParams::cafe);
                app.session.navigate(screen, params);
            }
            ShellCommand::Run(command) => {
                if let Err(e) = super::execute(app, command).await {
                    render::failure(&e);
                    continue;
                }
            }
        }

        if let Err(e) = render::current_screen(app).await {
            render::failure(&e);
        }
    }
    Ok(())
}

/// Split a line into words, honoring single and double quotes.
fn split_words(line: &str) -> Result<Vec<String>, &'static str> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err("Unterminated quote.");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn parse(line: &str) -> Result<ShellCommand, clap::Error> {
        ShellLine::try_parse_from(split_words(line).unwrap()).map(|parsed| parsed.command)
    }

    #[test]
    fn test_split_words_handles_quotes() {
        assert_eq!(
            split_words(r#"rate c1 --stars 5 --comment "great 'flat' white""#).unwrap(),
            vec!["rate", "c1", "--stars", "5", "--comment", "great 'flat' white"]
        );
        assert_eq!(split_words("  ").unwrap(), Vec::<String>::new());
        assert_eq!(split_words("login ''").unwrap(), vec!["login", ""]);
        assert!(split_words("rate c1 -c 'oops").is_err());
    }

    #[test]
    fn test_go_parses_screen_and_cafe() {
        match parse("go cafeDetail c1").unwrap() {
            ShellCommand::Go { screen, cafe_id } => {
                assert_eq!(screen, Screen::CafeDetail);
                assert_eq!(cafe_id, Some(CafeId::new("c1")));
            }
            _ => panic!("expected go"),
        }
        assert!(matches!(
            parse("go home").unwrap(),
            ShellCommand::Go {
                screen: Screen::Home,
                cafe_id: None
            }
        ));
    }

    #[test]
    fn test_go_rejects_unknown_screen() {
        let err = parse("go settings").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_commands_are_shared_with_cli() {
        match parse("rate c1 --stars 4 --comment 'nice crema'").unwrap() {
            ShellCommand::Run(Command::Rate {
                cafe_id,
                stars,
                comment,
            }) => {
                assert_eq!(cafe_id.as_str(), "c1");
                assert_eq!(stars, 4);
                assert_eq!(comment, "nice crema");
            }
            _ => panic!("expected rate"),
        }
        assert!(matches!(
            parse("login -e noa@example.com -p secret").unwrap(),
            ShellCommand::Run(Command::Login { .. })
        ));
    }

    #[test]
    fn test_quit_help_and_unknown() {
        assert!(matches!(parse("quit").unwrap(), ShellCommand::Quit));
        assert!(matches!(parse("exit").unwrap(), ShellCommand::Quit));
        assert_eq!(parse("help").err().unwrap().kind(), ErrorKind::DisplayHelp);
        assert_eq!(
            parse("brew espresso").err().unwrap().kind(),
            ErrorKind::InvalidSubcommand
        );
    }
}
