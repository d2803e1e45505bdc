//! Interactive result pager
//!
//! One command per prompt; each runs to completion before the next prompt.
//! Paging works on the held result set and never re-runs the search.

use crate::config::Config;
use crate::error::{Result, SearchError};
use crate::export::write_export;
use crate::render::render_page;
use crate::session::Session;
use dialoguer::Input;
use std::path::PathBuf;

/// Pager commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerAction {
    Next,
    Previous,
    /// Change the number of rows per page
    PageSize(usize),
    /// Jump to a page
    GoTo(usize),
    /// Write the full result set; `None` uses the configured file name
    Export(Option<PathBuf>),
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "Polecenia: [Enter]/n następna  p poprzednia  r N rekordów na stronie  s N strona  e [plik] eksport  ? pomoc  q koniec";

pub fn parse_action(input: &str) -> PagerAction {
    let input = input.trim();
    let (command, arg) = match input.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (input, ""),
    };

    let number = || arg.parse::<usize>().ok();

    match command {
        "" | "n" | ">" => PagerAction::Next,
        "p" | "<" => PagerAction::Previous,
        "r" => number().map(PagerAction::PageSize).unwrap_or_else(|| PagerAction::Unknown(input.to_string())),
        "s" => number().map(PagerAction::GoTo).unwrap_or_else(|| PagerAction::Unknown(input.to_string())),
        "e" if arg.is_empty() => PagerAction::Export(None),
        "e" => PagerAction::Export(Some(PathBuf::from(arg))),
        "?" | "h" => PagerAction::Help,
        "q" | "Q" => PagerAction::Quit,
        _ => PagerAction::Unknown(input.to_string()),
    }
}

/// Apply one action. Returns `false` when the pager should stop.
pub fn apply_action(session: &mut Session, config: &Config, action: PagerAction) -> Result<bool> {
    match action {
        PagerAction::Next => {
            if session.pager().is_last() {
                println!("  → to jest ostatnia strona");
            } else {
                session.next_page();
            }
        }
        PagerAction::Previous => {
            if session.pager().is_first() {
                println!("  → to jest pierwsza strona");
            } else {
                session.previous_page();
            }
        }
        PagerAction::PageSize(n) => {
            let applied = session.set_page_size(n);
            println!("  → rekordów na stronie: {}", applied);
        }
        PagerAction::GoTo(page) => {
            session.go_to_page(page);
        }
        PagerAction::Export(target) => {
            let buffer = session.export_bytes()?;
            let target = target.unwrap_or_else(|| PathBuf::from("."));
            let path = write_export(&buffer, &target, &config.export_file_name)?;
            println!("✔ Zapisano: {}", path.display());
        }
        PagerAction::Help => println!("{}", HELP),
        PagerAction::Quit => return Ok(false),
        PagerAction::Unknown(input) => {
            println!("  → nieznane polecenie: {}", input);
            println!("{}", HELP);
        }
    }
    Ok(true)
}

/// Prompt loop over the current result set
pub fn run_interactive_pager(session: &mut Session, config: &Config) -> Result<()> {
    println!("{}\n", HELP);

    loop {
        let results = session.results().ok_or(SearchError::NoResults)?;
        println!("{}", render_page(results, session.pager()));

        let input: String = Input::new()
            .with_prompt("Polecenie")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| SearchError::Prompt(e.to_string()))?;

        if !apply_action(session, config, parse_action(&input))? {
            break;
        }
    }

    Ok(())
}
