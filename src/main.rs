use anyhow::Context;
use clap::Parser;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use pszl_common::pesel;
use pszl_search::cli::{Cli, Commands, OutputFormat};
use pszl_search::config::Config;
use pszl_search::error::SearchError;
use pszl_search::session::{SearchOutcome, Session};
use pszl_search::{audit, export, interactive, render};
use std::io::{IsTerminal, Read};
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Non-interactive password input
const SESSION_PASSWORD_ENV: &str = "PSZL_PASSWORD";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Search {
            file,
            pesel,
            pesel_file,
            page_size,
            page,
            export: export_target,
            format,
            interactive: interactive_mode,
        } => {
            println!("📄 pszl - wyszukiwanie zwolnień lekarskich\n");

            let mut session = Session::from_config(&config);
            login(&mut session, &config)?;

            if let Some(path) = &file {
                let bytes = read_workbook(path)?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                session.upload(name, bytes);
            }

            let raw_identifiers = collect_identifiers(&pesel, pesel_file.as_deref())?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner());
            spinner.set_message("Przetwarzanie...");
            spinner.enable_steady_tick(Duration::from_millis(100));
            let outcome = session.search(&raw_identifiers);
            spinner.finish_and_clear();

            match outcome? {
                SearchOutcome::NoValidIdentifiers { invalid } => {
                    if let Some(warning) = pesel::invalid_warning(&invalid) {
                        println!("⚠ {}", warning);
                    }
                    println!("⚠ Brak poprawnych numerów PESEL - wyszukiwanie nie zostało uruchomione");
                    return Ok(());
                }
                SearchOutcome::Completed(summary) => {
                    if let Some(warning) = pesel::invalid_warning(&summary.invalid) {
                        println!("⚠ {}", warning);
                    }
                    if !summary.sheets_skipped.is_empty() {
                        println!(
                            "- Pominięte arkusze (brak kolumny {}): {}",
                            config.columns.insured_column,
                            summary.sheets_skipped.join(", ")
                        );
                    }
                    if let Some(warning) = &summary.audit_warning {
                        println!("⚠ {}", warning);
                    }
                    match session.current_upload() {
                        Some(upload) => println!("✔ {} ({})\n", summary.message(), upload.name),
                        None => println!("✔ {}\n", summary.message()),
                    }
                }
            }

            if let Some(size) = page_size {
                session.set_page_size(size);
            }
            session.go_to_page(page);

            if let Some(target) = export_target {
                let buffer = session.export_bytes()?;
                let path = export::write_export(&buffer, &target, &config.export_file_name)?;
                println!("✔ Zapisano wyniki: {}\n", path.display());
            }

            if interactive_mode {
                interactive::run_interactive_pager(&mut session, &config)?;
            } else {
                let results = session.results().ok_or(SearchError::NoResults)?;
                match format {
                    OutputFormat::Table => println!("{}", render::render_page(results, session.pager())),
                    OutputFormat::Json => println!("{}", render::render_page_json(results, session.pager())?),
                }
            }
        }

        Commands::Validate { pesel: values } => {
            let mut invalid = 0;
            for value in &values {
                let value = value.trim();
                if pesel::validate(value) {
                    println!("✔ {}", value);
                } else {
                    invalid += 1;
                    println!("✘ {}", value);
                }
            }
            if invalid > 0 {
                println!("\nNieprawidłowe: {} z {}", invalid, values.len());
            }
        }

        Commands::Audit { tail } => {
            let mut session = Session::from_config(&config);
            login(&mut session, &config)?;

            let log = audit::AuditLog::new(&config.audit_log);
            let entries = log.tail(tail)?;
            if entries.is_empty() {
                println!("Log zapytań jest pusty: {}", log.path().display());
            }
            for entry in entries {
                println!(
                    "{}  {:>4}  {}",
                    entry.timestamp.format(audit::TIMESTAMP_FORMAT),
                    entry.match_count,
                    entry.identifiers.join(",")
                );
            }
        }

        Commands::Config { set_password, show } => {
            let mut config = config;

            if set_password {
                let secret = Password::new()
                    .with_prompt("Nowe hasło")
                    .with_confirmation("Powtórz hasło", "Hasła nie są zgodne")
                    .interact()
                    .map_err(|e| SearchError::Prompt(e.to_string()))?;
                config.set_password(&secret)?;
                println!("✔ Hasło zostało ustawione");
            }

            if show || !set_password {
                println!("Konfiguracja ({}):", Config::config_path()?.display());
                println!("  Log zapytań: {}", config.audit_log.display());
                println!("  Rekordów na stronie: {}", config.default_page_size);
                println!("  Plik eksportu: {}", config.export_file_name);
                println!("  Kolumna ubezpieczonego: {}", config.columns.insured_column);
                println!(
                    "  Hasło: {}",
                    if config.credential().is_ok() { "ustawione" } else { "nieustawione" }
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn login(session: &mut Session, config: &Config) -> pszl_search::Result<()> {
    let credential = config.credential()?;

    let candidate = match std::env::var(SESSION_PASSWORD_ENV) {
        Ok(secret) => secret,
        Err(_) => Password::new()
            .with_prompt("🔒 Hasło")
            .interact()
            .map_err(|e| SearchError::Prompt(e.to_string()))?,
    };

    session.login(&candidate, &credential)?;
    println!("✔ Pomyślnie zalogowano\n");
    Ok(())
}

fn read_workbook(path: &Path) -> anyhow::Result<Vec<u8>> {
    if !path.exists() {
        return Err(SearchError::FileNotFound(path.display().to_string()).into());
    }
    std::fs::read(path).with_context(|| format!("read {}", path.display()))
}

/// Newline-separated identifier text from flags, a file, or stdin
fn collect_identifiers(flags: &[String], file: Option<&Path>) -> anyhow::Result<String> {
    let mut lines: Vec<String> = flags.to_vec();

    if let Some(path) = file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        lines.extend(content.lines().map(str::to_string));
    }

    if lines.is_empty() {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            let input: String = Input::new()
                .with_prompt("Numery PESEL (oddzielone spacją)")
                .allow_empty(true)
                .interact_text()
                .map_err(|e| SearchError::Prompt(e.to_string()))?;
            lines.extend(input.split(|c: char| c.is_whitespace() || c == ',').map(str::to_string));
        } else {
            let mut content = String::new();
            stdin.lock().read_to_string(&mut content)?;
            lines.extend(content.lines().map(str::to_string));
        }
    }

    Ok(lines.join("\n"))
}
