use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Błąd konfiguracji: {0}")]
    Config(String),

    #[error("Brak skonfigurowanego hasła administratora. Ustaw zmienną PSZL_ADMIN_PASSWORD lub uruchom `pszl config --set-password`")]
    MissingCredential,

    #[error("Nieprawidłowe hasło")]
    Unauthorized,

    #[error("Brak danych wejściowych: {0}")]
    MissingInput(String),

    #[error("Nie można odczytać pliku Excel: {0}")]
    Parse(String),

    #[error("Brak wyników do wyświetlenia. Najpierw uruchom wyszukiwanie")]
    NoResults,

    #[error("Plik nie istnieje: {0}")]
    FileNotFound(String),

    #[error("Błąd eksportu: {0}")]
    Export(#[from] pszl_common::Error),

    #[error("Błąd interakcji: {0}")]
    Prompt(String),

    #[error("Błąd JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Błąd wejścia/wyjścia: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
