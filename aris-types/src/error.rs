use std::path::PathBuf;

use thiserror::Error;

/// Результат для операций ARIS
pub type ArisResult<T> = std::result::Result<T, ArisError>;

/// Стабильные целочисленные коды ошибок.
///
/// Значения совпадают с теми, что ожидают внешние вызывающие стороны
/// (скриптовые обвязки), поэтому менять их нельзя.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    /// Входной файл не открывается
    CantOpenInput = -2,
    /// Выходной файл не открывается (зарезервировано)
    CantOpenOutput = -3,
    /// Сигнатура не совпала, это не ARIS файл
    NotArisFile = -4,
    /// Заголовок или данные кадра не дочитываются
    CorruptArisFile = -5,
    /// Прочие ошибки ввода/вывода
    IoError = -6,
}

/// Три класса отказов, на которые делятся все ошибки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Файл не открыть или не узнать его размер
    IoUnavailable,
    /// Сигнатура не совпадает с магической константой
    InvalidFormat,
    /// Файл похож на ARIS, но данные по ожидаемому смещению не читаются
    CorruptFile,
}

/// Типы ошибок чтения ARIS.
#[derive(Debug, Error)]
pub enum ArisError {
    /// Не удалось открыть входной файл
    #[error("Can't open input {path:?}: {source}")]
    CantOpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Неправильная сигнатура файла
    #[error("Invalid file signature: found {found:#010x}, expected {expected:#010x}")]
    InvalidSignature { found: u32, expected: u32 },

    /// Файл не является ARIS записью
    #[error("Not an ARIS file: {0}")]
    InvalidFormat(String),

    /// Код ping mode вне таблицы
    #[error("Unknown ping mode: {0}")]
    UnknownPingMode(u32),

    /// Повреждённый кадр (короткое чтение, неверные поля)
    #[error("Corrupt ARIS file at frame {frame}: {reason}")]
    Corrupt { frame: u32, reason: String },

    /// Геометрия кадра отличается от геометрии первого кадра
    #[error("Geometry mismatch at frame {frame}: {field} = {found}, frame 0 has {expected}")]
    GeometryMismatch {
        frame: u32,
        field: &'static str,
        expected: u32,
        found: u32,
    },
}

impl ErrorCode {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub fn from_i32(v: i32) -> Option<Self> {
        match v {
            -2 => Some(ErrorCode::CantOpenInput),
            -3 => Some(ErrorCode::CantOpenOutput),
            -4 => Some(ErrorCode::NotArisFile),
            -5 => Some(ErrorCode::CorruptArisFile),
            -6 => Some(ErrorCode::IoError),
            _ => None,
        }
    }

    /// Код завершения процесса (положительный, 2..=6).
    pub fn exit_status(&self) -> i32 {
        -self.as_i32()
    }
}

impl ArisError {
    /// Удобные конструкторы
    pub fn invalid_format<S: Into<String>>(s: S) -> Self {
        Self::InvalidFormat(s.into())
    }

    pub fn corrupt<S: Into<String>>(
        frame: u32,
        reason: S,
    ) -> Self {
        Self::Corrupt {
            frame,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ArisError::CantOpenInput { .. } | ArisError::Io(_) => ErrorKind::IoUnavailable,
            ArisError::InvalidSignature { .. } | ArisError::InvalidFormat(_) => {
                ErrorKind::InvalidFormat
            }
            ArisError::UnknownPingMode(_)
            | ArisError::Corrupt { .. }
            | ArisError::GeometryMismatch { .. } => ErrorKind::CorruptFile,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ArisError::CantOpenInput { .. } => ErrorCode::CantOpenInput,
            ArisError::Io(_) => ErrorCode::IoError,
            ArisError::InvalidSignature { .. } | ArisError::InvalidFormat(_) => {
                ErrorCode::NotArisFile
            }
            ArisError::UnknownPingMode(_)
            | ArisError::Corrupt { .. }
            | ArisError::GeometryMismatch { .. } => ErrorCode::CorruptArisFile,
        }
    }

    /// Индекс кадра, на котором произошла ошибка (если известен).
    pub fn frame(&self) -> Option<u32> {
        match self {
            ArisError::Corrupt { frame, .. } | ArisError::GeometryMismatch { frame, .. } => {
                Some(*frame)
            }
            _ => None,
        }
    }
}
