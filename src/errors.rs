//! Unified application error type.
//! All modules (store, core, service, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Authorization required")]
    Auth,

    #[error("Wrong password")]
    WrongPassword,

    #[error("No log entry to undo")]
    EmptyLog,

    #[error("Cannot read the meal log: {0}")]
    ReadLog(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Message shown to clients of the action endpoint.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Auth => "認証が必要です",
            AppError::WrongPassword => "パスワードが正しくありません",
            AppError::EmptyLog => "取り消すログがありません",
            AppError::Io(_) | AppError::Csv(_) => "ログの書き込みに失敗しました",
            AppError::ReadLog(_) => "ログの読み込みに失敗しました",
            _ => "内部エラーが発生しました",
        }
    }
}

impl AppError {
    /// Reclassify an I/O or CSV failure as a failed read of the log.
    pub fn reading(self) -> Self {
        match self {
            AppError::Io(_) | AppError::Csv(_) => AppError::ReadLog(self.to_string()),
            other => other,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
