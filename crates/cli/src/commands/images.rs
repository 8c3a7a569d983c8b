//! Interactive store image browser.
//!
//! # Usage
//!
//! ```bash
//! il-cli images browse --admin-url http://127.0.0.1:3001
//! ```
//!
//! Commands at the prompt:
//!
//! - `n` - next page
//! - `p` - previous page
//! - `s <id>` - toggle selection of an image
//! - `t` - translate selected images
//! - `q` - quit

use tokio::io::{AsyncBufReadExt, BufReader};

use super::CliError;
use crate::browser::{BrowserSession, FetchOutcome, HttpPageSource, ImageBrowser};

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Next,
    Prev,
    Select(String),
    Translate,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;

    Some(match head {
        "n" | "next" => Command::Next,
        "p" | "prev" => Command::Prev,
        "s" | "select" => match parts.next() {
            Some(id) => Command::Select(id.to_string()),
            None => Command::Unknown(line.trim().to_string()),
        },
        "t" | "translate" => Command::Translate,
        "q" | "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    })
}

/// Browse store images page by page.
pub async fn browse(admin_url: &str, page_size: u32) -> Result<(), CliError> {
    let source = HttpPageSource::new(admin_url)?;
    tracing::info!(action_url = %source.action_url(), "Browsing store images");

    let mut session = BrowserSession::new(ImageBrowser::with_page_size(page_size), source);

    let outcome = session.start().await;
    render(session.browser(), Some(outcome));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            continue;
        };

        match command {
            Command::Next => {
                let outcome = session.next_page().await;
                render(session.browser(), outcome);
            }
            Command::Prev => {
                let outcome = session.prev_page().await;
                render(session.browser(), outcome);
            }
            Command::Select(id) => {
                if session.browser().images().iter().any(|i| i.id == id) {
                    session.browser_mut().toggle_selection(&id);
                } else {
                    tracing::warn!(%id, "Not on this page");
                }
                render(session.browser(), None);
            }
            Command::Translate => match session.browser().translate_selected() {
                Some(ids) => announce_translate(&ids),
                None => tracing::info!("Nothing selected"),
            },
            Command::Quit => break,
            Command::Unknown(input) => {
                tracing::warn!(%input, "Unknown command (n, p, s <id>, t, q)");
            }
        }
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
fn announce_translate(ids: &[String]) {
    println!("Translate requested for: {}", ids.join(", "));
}

#[allow(clippy::print_stdout)]
fn render(browser: &ImageBrowser, outcome: Option<FetchOutcome>) {
    tracing::debug!(
        generation = browser.generation(),
        loading = browser.is_loading(),
        start = %browser.cursor().start,
        end = %browser.cursor().end,
        "Rendering image page"
    );

    if outcome == Some(FetchOutcome::Failed)
        && let Some(error) = browser.last_error()
    {
        println!("Failed to load images: {error}");
    }

    println!();
    println!("{:<3} {:<45} {:<12} URL", "", "ID", "SECTION");
    for image in browser.images() {
        let mark = if browser.selection().contains(&image.id) {
            "[x]"
        } else {
            "[ ]"
        };
        println!(
            "{mark:<3} {:<45} {:<12} {}",
            image.id,
            image.section(),
            image.url().unwrap_or("-")
        );
    }
    println!(
        "{} images, {} selected | prev: {} next: {}",
        browser.images().len(),
        browser.selection().len(),
        if browser.has_prev() { "yes" } else { "no" },
        if browser.has_more() { "yes" } else { "no" },
    );
}
