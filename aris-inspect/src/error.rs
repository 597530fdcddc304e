use std::path::PathBuf;

use aris_types::{ArisError, ErrorCode};
use thiserror::Error;

pub type InspectResult<T> = std::result::Result<T, InspectError>;

#[derive(Debug, Error)]
pub enum InspectError {
    /// Ошибка чтения записи ARIS
    #[error(transparent)]
    Aris(#[from] ArisError),

    /// Не удалось записать выходной файл
    #[error("Can't write output {path:?}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Ошибка сериализации отчёта
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Неверные аргументы
    #[error("Invalid argument: {0}")]
    Config(String),
}

impl InspectError {
    /// Стабильный код ошибки, если он есть.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            InspectError::Aris(e) => Some(e.code()),
            InspectError::Output { .. } => Some(ErrorCode::CantOpenOutput),
            InspectError::Json(_) | InspectError::Config(_) => None,
        }
    }

    /// Код завершения процесса: модуль [`ErrorCode`] или 1.
    pub fn exit_status(&self) -> i32 {
        self.code().map(|c| c.exit_status()).unwrap_or(1)
    }
}
