//! Ошибки конвейера предобработки

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PrepError>;

#[derive(Error, Debug)]
pub enum PrepError {
    /// Входной файл не найден
    #[error("input file not found: {path}")]
    FileNotFound { path: String },

    /// Файл есть, но не читается как таблица
    #[error("failed to load data: {0}")]
    DataLoad(String),

    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Любой другой сбой на этапах обработки или записи
    #[error("computation error: {0}")]
    Computation(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for PrepError {
    fn from(err: csv::Error) -> Self {
        PrepError::DataLoad(err.to_string())
    }
}

impl From<serde_json::Error> for PrepError {
    fn from(err: serde_json::Error) -> Self {
        PrepError::Config(err.to_string())
    }
}
