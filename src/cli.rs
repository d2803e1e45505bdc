use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pszl")]
#[command(about = "Wyszukiwanie zwolnień lekarskich w pliku PSZL.xlsx po numerach PESEL", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Szczegółowe logi
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Wyszukaj rekordy po numerach PESEL
    Search {
        /// Plik PSZL.xlsx
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Numer PESEL (można podać wielokrotnie)
        #[arg(short, long = "pesel")]
        pesel: Vec<String>,

        /// Plik z numerami PESEL, po jednym w wierszu
        #[arg(long)]
        pesel_file: Option<PathBuf>,

        /// Rekordów na stronie (5-100, domyślnie z konfiguracji)
        #[arg(long)]
        page_size: Option<usize>,

        /// Strona do wyświetlenia
        #[arg(long, default_value = "1")]
        page: usize,

        /// Zapisz wszystkie wyniki do pliku Excel (plik lub katalog)
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Format wyjścia (table/json)
        #[arg(long, default_value = "table")]
        format: OutputFormat,

        /// Przeglądaj wyniki interaktywnie
        #[arg(short, long)]
        interactive: bool,
    },

    /// Sprawdź poprawność numerów PESEL
    Validate {
        #[arg(required = true)]
        pesel: Vec<String>,
    },

    /// Pokaż ostatnie wpisy logu zapytań
    Audit {
        /// Liczba wpisów
        #[arg(short = 'n', long, default_value = "20")]
        tail: usize,
    },

    /// Pokaż/edytuj konfigurację
    Config {
        /// Ustaw hasło administratora (zapisywany jest tylko skrót SHA-256)
        #[arg(long)]
        set_password: bool,

        /// Pokaż konfigurację
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "tabela" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Nieznany format: {}. Użyj table lub json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
