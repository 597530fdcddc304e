use serde::Serialize;

use crate::ARIS_HEADER_SIZE;

/// Геометрия записи, вычисленная один раз при открытии файла.
///
/// Все кадры файла имеют одинаковый размер записи:
/// ```text
/// [0..1024)                    FileHeader
/// [1024..1024 + R)             кадр 0: FrameHeader (1024) + отсчёты
/// [1024 + i*R..1024 + (i+1)*R) кадр i
/// ```
/// где `R = frame_record_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    /// Число лучей (из ping mode первого кадра)
    pub beam_count: u32,
    /// Отсчётов на луч (из первого кадра)
    pub samples_per_beam: u32,
    /// Заголовок кадра + данные отсчётов, байт
    pub frame_record_size: u64,
    /// Размер файла минус заголовок файла, байт
    pub data_region_size: u64,
    /// Количество кадров, доступных для чтения
    pub frame_count: u32,
}

impl Geometry {
    /// Размер буфера отсчётов одного кадра (1 байт на отсчёт).
    pub fn sample_data_size(&self) -> u64 {
        self.beam_count as u64 * self.samples_per_beam as u64
    }

    /// Абсолютное смещение заголовка кадра `index`.
    pub fn frame_offset(
        &self,
        index: u32,
    ) -> u64 {
        ARIS_HEADER_SIZE as u64 + index as u64 * self.frame_record_size
    }

    /// Абсолютное смещение данных отсчётов кадра `index`.
    pub fn sample_data_offset(
        &self,
        index: u32,
    ) -> u64 {
        self.frame_offset(index) + ARIS_HEADER_SIZE as u64
    }

    pub fn contains(
        &self,
        index: u32,
    ) -> bool {
        index < self.frame_count
    }

    /// Байты усечённого последнего кадра (0 если файл ровный).
    pub fn trailing_bytes(&self) -> u64 {
        if self.frame_record_size == 0 {
            return 0;
        }
        self.data_region_size % self.frame_record_size
    }
}
