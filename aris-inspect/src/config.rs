use aris_core::{FrameCountMode, ReaderOptions};
use serde::Serialize;

/// Формат вывода отчётов.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OutputFormat {
    /// Читаемый текст
    #[default]
    Text,
    /// Однострочный JSON
    Json,
    /// JSON с отступами
    JsonPretty,
}

/// Настройки запуска aris-inspect.
#[derive(Debug, Clone, Default)]
pub struct InspectConfig {
    /// Формат вывода
    pub format: OutputFormat,
    /// Подсчёт кадров
    pub frame_count_mode: FrameCountMode,
    /// Сверять геометрию каждого кадра с кадром 0
    pub verify_geometry: bool,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl InspectConfig {
    pub fn reader_options(&self) -> ReaderOptions {
        ReaderOptions {
            frame_count_mode: self.frame_count_mode,
            verify_geometry: self.verify_geometry,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для OutputFormat
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for OutputFormat {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::JsonPretty => write!(f, "json-pretty"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "json-pretty" | "pretty" => Ok(OutputFormat::JsonPretty),
            _ => Err(format!(
                "Unknown output format: '{s}'. Use: text, json, json-pretty"
            )),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
