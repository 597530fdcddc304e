use serde::Serialize;

/// Способ подсчёта кадров в файле.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameCountMode {
    /// `data_region / (1024 + beams * samples)`: каждая запись содержит
    /// заголовок кадра.
    #[default]
    Corrected,
    /// `data_region / (beams * samples)`: делитель без заголовка кадра.
    /// Даёт завышенное число кадров, совместимо со старыми потребителями.
    Legacy,
}

/// Настройки открытия файла.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReaderOptions {
    /// Подсчёт кадров
    pub frame_count_mode: FrameCountMode,
    /// Сверять ping mode и samples_per_beam каждого кадра с кадром 0
    pub verify_geometry: bool,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl FrameCountMode {
    /// Делитель для подсчёта кадров.
    pub fn divisor(
        &self,
        frame_record_size: u64,
        sample_data_size: u64,
    ) -> u64 {
        match self {
            FrameCountMode::Corrected => frame_record_size,
            FrameCountMode::Legacy => sample_data_size,
        }
    }
}

impl ReaderOptions {
    pub fn legacy() -> Self {
        Self {
            frame_count_mode: FrameCountMode::Legacy,
            ..Self::default()
        }
    }

    pub fn verified() -> Self {
        Self {
            verify_geometry: true,
            ..Self::default()
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для FrameCountMode
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for FrameCountMode {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            FrameCountMode::Corrected => write!(f, "corrected"),
            FrameCountMode::Legacy => write!(f, "legacy"),
        }
    }
}

impl std::str::FromStr for FrameCountMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "corrected" | "record" => Ok(FrameCountMode::Corrected),
            "legacy" | "samples" => Ok(FrameCountMode::Legacy),
            _ => Err(format!(
                "Unknown frame count mode: '{s}'. Use: corrected, legacy"
            )),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let o = ReaderOptions::default();

        assert_eq!(o.frame_count_mode, FrameCountMode::Corrected);
        assert!(!o.verify_geometry);
        assert_eq!(ReaderOptions::legacy().frame_count_mode, FrameCountMode::Legacy);
        assert!(ReaderOptions::verified().verify_geometry);
    }

    #[test]
    fn test_frame_count_mode_fromstr() {
        assert_eq!(
            "corrected".parse::<FrameCountMode>().unwrap(),
            FrameCountMode::Corrected
        );
        assert_eq!(
            "LEGACY".parse::<FrameCountMode>().unwrap(),
            FrameCountMode::Legacy
        );
        assert!("bogus".parse::<FrameCountMode>().is_err());
        assert_eq!(FrameCountMode::Legacy.to_string(), "legacy");
    }

    #[test]
    fn test_divisor() {
        assert_eq!(FrameCountMode::Corrected.divisor(25_024, 24_000), 25_024);
        assert_eq!(FrameCountMode::Legacy.divisor(25_024, 24_000), 24_000);
    }
}
