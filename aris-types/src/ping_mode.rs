use crate::{ArisError, ArisResult};

/// Режим пинга сонара (код 1..=12), определяет число лучей.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PingMode(u32);

/// Результат поиска числа лучей по коду ping mode.
///
/// Нераспознанный код никогда не превращается в "0 лучей".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeamLookup {
    /// Код есть в таблице
    Resolved(u32),
    /// Код вне таблицы
    Unrecognized(u32),
}

impl PingMode {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 12;

    pub fn from_u32(v: u32) -> ArisResult<Self> {
        match v {
            Self::MIN..=Self::MAX => Ok(PingMode(v)),
            _ => Err(ArisError::UnknownPingMode(v)),
        }
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Число лучей для режима
    pub fn beam_count(&self) -> u32 {
        match self.0 {
            1 | 2 => 48,
            3..=5 => 96,
            6..=8 => 64,
            // 9..=12, другие коды сюда не попадают через from_u32
            _ => 128,
        }
    }

    pub fn lookup(code: u32) -> BeamLookup {
        match Self::from_u32(code) {
            Ok(mode) => BeamLookup::Resolved(mode.beam_count()),
            Err(_) => BeamLookup::Unrecognized(code),
        }
    }
}

impl TryFrom<u32> for PingMode {
    type Error = ArisError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        Self::from_u32(v)
    }
}

impl BeamLookup {
    pub fn beams(&self) -> Option<u32> {
        match self {
            BeamLookup::Resolved(n) => Some(*n),
            BeamLookup::Unrecognized(_) => None,
        }
    }
}
