use rust_bert::RustBertError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Model error: {0}")]
    Model(#[from] RustBertError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scrape error: {0}")]
    Scrape(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model returned no output for {0}")]
    EmptyModelOutput(&'static str),
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(e: reqwest::Error) -> Self {
        AnalyzerError::Scrape(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
