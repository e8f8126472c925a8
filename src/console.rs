use std::io::IsTerminal;
use std::str::FromStr;
use std::sync::Arc;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};

use crate::error::{Error, Result};
use crate::render::{format_modal, render, Report};
use crate::session::{AnalysisOutcome, SessionController};

pub const HELP: &str = "\
Commands:
  login <username>     connect to GitHub (asks for an optional token)
  logout               discard the current profile
  refresh              fetch the profile again with the same token
  show                 print the profile, language chart and repositories
  analyze              AI analysis of the whole profile
  analyze-repo <name>  AI review of one repository
  close                close the analysis result
  help                 show this list
  quit                 exit";

const TOKEN_PROMPT: &str = "Token (leave empty for anonymous access): ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login(String),
    Logout,
    Refresh,
    Show,
    Analyze,
    AnalyzeRepo(String),
    Close,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err("Empty command".to_string());
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("login", [username]) => Command::Login(username.to_string()),
            ("login", []) => return Err("Usage: login <username>".to_string()),
            ("login", _) => {
                return Err(
                    "Usage: login <username> (the token is asked for separately)".to_string(),
                )
            }
            ("logout", []) => Command::Logout,
            ("refresh", []) => Command::Refresh,
            ("show" | "status", []) => Command::Show,
            ("analyze", []) => Command::Analyze,
            ("analyze-repo", [repo]) => Command::AnalyzeRepo(repo.to_string()),
            ("analyze-repo", _) => return Err("Usage: analyze-repo <name>".to_string()),
            ("close", []) => Command::Close,
            ("logout" | "refresh" | "show" | "status" | "analyze" | "close", _) => {
                return Err(format!("'{}' takes no arguments", name))
            }
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            (other, _) => {
                return Err(format!(
                    "Unknown command '{}'. Type 'help' for the list of commands.",
                    other
                ))
            }
        };
        Ok(command)
    }
}

/// Answer to the token prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenInput {
    Provided(String),
    /// Empty entry: log in without a credential.
    Skipped,
    /// Escape, Ctrl-C or end of input.
    Cancelled,
}

impl TokenInput {
    fn from_entry(entry: Option<String>) -> Self {
        match entry {
            None => TokenInput::Cancelled,
            Some(entry) => match entry.trim() {
                "" => TokenInput::Skipped,
                token => TokenInput::Provided(token.to_string()),
            },
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Submit,
    Cancel,
}

/// Applies one key press to the hidden entry buffer. Nothing is echoed.
fn apply_key(buffer: &mut String, key: KeyEvent) -> KeyOutcome {
    if key.kind == KeyEventKind::Release {
        return KeyOutcome::Continue;
    }
    match key.code {
        KeyCode::Enter => KeyOutcome::Submit,
        KeyCode::Esc => KeyOutcome::Cancel,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyOutcome::Cancel,
        KeyCode::Backspace => {
            buffer.pop();
            KeyOutcome::Continue
        }
        KeyCode::Char(c) => {
            buffer.push(c);
            KeyOutcome::Continue
        }
        _ => KeyOutcome::Continue,
    }
}

/// Reads one line from the terminal in raw mode so the typed token is not echoed.
fn read_hidden_line() -> std::io::Result<Option<String>> {
    terminal::enable_raw_mode()?;
    let mut buffer = String::new();
    let entry = loop {
        match event::read() {
            Ok(Event::Key(key)) => match apply_key(&mut buffer, key) {
                KeyOutcome::Continue => {}
                KeyOutcome::Submit => break Ok(Some(buffer)),
                KeyOutcome::Cancel => break Ok(None),
            },
            Ok(_) => {}
            Err(e) => break Err(e),
        }
    };
    let restored = terminal::disable_raw_mode();
    let entry = entry?;
    restored?;
    Ok(entry)
}

/// Asks for the GitHub token. With `hidden` the terminal is read directly
/// without echo; otherwise the next input line is taken, which keeps piped
/// sessions working.
async fn read_token<R>(lines: &mut Lines<R>, hidden: bool) -> Result<TokenInput>
where
    R: AsyncBufRead + Unpin,
{
    write_flush(TOKEN_PROMPT).await?;
    let entry = if hidden {
        let entry = tokio::task::spawn_blocking(read_hidden_line)
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))??;
        println!();
        entry
    } else {
        lines.next_line().await?
    };
    Ok(TokenInput::from_entry(entry))
}

/// Reads commands from stdin until `quit` or end of input.
///
/// Analyses run as background tasks so `close` and other commands stay
/// available while a request is in flight.
pub async fn run_interactive(controller: Arc<SessionController>, format: String) -> Result<()> {
    let hidden = std::io::stdin().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", HELP);
    write_flush("> ").await?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => execute(&controller, command, &format, &mut lines, hidden).await?,
                Err(message) => println!("{}", message),
            }
        }
        write_flush("> ").await?;
    }

    Ok(())
}

async fn write_flush(text: &str) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

async fn execute<R>(
    controller: &Arc<SessionController>,
    command: Command,
    format: &str,
    lines: &mut Lines<R>,
    hidden: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    match command {
        Command::Login(username) => {
            let token = match read_token(lines, hidden).await? {
                TokenInput::Provided(token) => Some(token),
                TokenInput::Skipped => None,
                TokenInput::Cancelled => {
                    println!("Login cancelled.");
                    return Ok(());
                }
            };
            match controller.login(&username, token.as_deref()).await {
                Ok(()) => show(controller, format).await?,
                Err(e) => println!("Login failed: {}", e),
            }
        }
        Command::Logout => {
            controller.logout().await;
            println!("Logged out.");
        }
        Command::Refresh => match controller.refresh().await {
            Ok(()) => show(controller, format).await?,
            Err(e) => println!("Refresh failed: {}", e),
        },
        Command::Show => show(controller, format).await?,
        Command::Analyze => spawn_analysis(controller.clone(), None),
        Command::AnalyzeRepo(name) => spawn_analysis(controller.clone(), Some(name)),
        Command::Close => controller.close_modal().await,
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}

async fn show(controller: &SessionController, format: &str) -> Result<()> {
    let state = controller.snapshot().await;
    match state.session() {
        Some(session) => {
            let report = Report {
                dashboard: session.dashboard(),
                analyses: Vec::new(),
            };
            println!("{}", render(&report, format)?);
        }
        None => match state.login_error {
            Some(ref error) => println!("Not logged in. Last error: {}", error),
            None => println!("Not logged in."),
        },
    }
    print!("{}", format_modal(&state.modal));
    Ok(())
}

fn spawn_analysis(controller: Arc<SessionController>, repo: Option<String>) {
    tokio::spawn(async move {
        let outcome = match repo {
            Some(ref name) => controller.analyze_repo(name).await,
            None => controller.analyze_profile().await,
        };
        match outcome {
            Ok(AnalysisOutcome::Displayed(_)) => {
                print!("{}", format_modal(&controller.snapshot().await.modal));
            }
            Ok(AnalysisOutcome::Discarded) => {}
            Ok(AnalysisOutcome::Skipped) => println!("No repositories to analyze."),
            Err(e) => println!("{}", e),
        }
    });
    println!("Analyzing... (type 'close' to dismiss)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login() {
        assert_eq!(
            "LOGIN octocat".parse::<Command>(),
            Ok(Command::Login("octocat".to_string()))
        );
        assert!("login".parse::<Command>().unwrap_err().starts_with("Usage"));
        assert!("login a b c".parse::<Command>().is_err());
    }

    #[test]
    fn test_login_rejects_token_argument() {
        let err = "login octocat ghp_secret".parse::<Command>().unwrap_err();
        assert!(err.contains("asked for separately"));
        assert!(!err.contains("ghp_secret"));
    }

    #[tokio::test]
    async fn test_read_token_from_piped_input() {
        let mut lines = BufReader::new(&b"  ghp_secret  \nshow\n"[..]).lines();
        assert_eq!(
            read_token(&mut lines, false).await.unwrap(),
            TokenInput::Provided("ghp_secret".to_string())
        );
        // the following command line is left for the command loop
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("show"));

        let mut lines = BufReader::new(&b"\n"[..]).lines();
        assert_eq!(read_token(&mut lines, false).await.unwrap(), TokenInput::Skipped);

        let mut lines = BufReader::new(&b""[..]).lines();
        assert_eq!(read_token(&mut lines, false).await.unwrap(), TokenInput::Cancelled);
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_hidden_entry_keys() {
        let mut buffer = String::new();
        for c in "ghp_xy".chars() {
            assert_eq!(apply_key(&mut buffer, press(KeyCode::Char(c))), KeyOutcome::Continue);
        }
        apply_key(&mut buffer, press(KeyCode::Backspace));
        apply_key(
            &mut buffer,
            KeyEvent::new_with_kind(KeyCode::Char('z'), KeyModifiers::NONE, KeyEventKind::Release),
        );
        assert_eq!(apply_key(&mut buffer, press(KeyCode::Enter)), KeyOutcome::Submit);
        assert_eq!(buffer, "ghp_x");
    }

    #[test]
    fn test_hidden_entry_cancel() {
        let mut buffer = String::from("ghp");
        assert_eq!(apply_key(&mut buffer, press(KeyCode::Esc)), KeyOutcome::Cancel);
        assert_eq!(
            apply_key(
                &mut buffer,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            KeyOutcome::Cancel
        );
        assert_eq!(buffer, "ghp");
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("analyze".parse::<Command>(), Ok(Command::Analyze));
        assert_eq!(
            "analyze-repo lens".parse::<Command>(),
            Ok(Command::AnalyzeRepo("lens".to_string()))
        );
        assert_eq!("  close ".parse::<Command>(), Ok(Command::Close));
        assert_eq!("status".parse::<Command>(), Ok(Command::Show));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<Command>().is_err());
        assert_eq!(
            "logout now".parse::<Command>().unwrap_err(),
            "'logout' takes no arguments"
        );
        assert!("frobnicate"
            .parse::<Command>()
            .unwrap_err()
            .contains("Unknown command 'frobnicate'"));
    }
}
