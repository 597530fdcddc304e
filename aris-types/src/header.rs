use crate::{ArisResult, PingMode};

/// Размер заголовка файла и заголовка кадра (1024 байта)
pub const ARIS_HEADER_SIZE: usize = 1024;

/// Заголовок ARIS файла (фиксированный размер 1024 байта, смещение 0).
///
/// Типизированы только поля, нужные ядру. Остальные ~40 полей доступны по
/// имени через таблицу разметки (`aris_core::layout`) поверх `raw`.
#[derive(Clone)]
pub struct FileHeader {
    /// Версия формата, должна совпадать с сигнатурой DDF_05
    pub version: u32,
    /// Записанное количество кадров. Только справочно, читатель пересчитывает
    pub frame_count: u32,
    /// OBSOLETE: см. заголовок кадра
    pub frame_rate: u32,
    /// Число лучей, записанное писателем. Читатель берёт его из кадра
    pub num_raw_beams: u32,
    /// Число отсчётов на луч, записанное писателем
    pub samples_per_channel: u32,
    /// Серийный номер сонара
    pub serial_number: u32,
    /// Исходные байты заголовка
    pub raw: Box<[u8; ARIS_HEADER_SIZE]>,
}

/// Заголовок кадра (1024 байта перед данными каждого кадра).
#[derive(Clone)]
pub struct FrameHeader {
    /// Номер кадра в файле
    pub frame_index: u32,
    /// Метка времени ПК, микросекунды с эпохи
    pub frame_time: u64,
    /// Версия формата
    pub version: u32,
    /// Код режима пинга (1..=12)
    pub ping_mode: u32,
    /// Отсчётов дальности на луч
    pub samples_per_beam: u32,
    /// Задержка начала выборки, мкс
    pub sample_start_delay: u32,
    /// Период выборки, мкс
    pub sample_period: u32,
    /// Скорость звука, м/с
    pub sound_speed: f32,
    pub frame_rate: f32,
    /// Начало окна, м (как записано сонаром)
    pub window_start: f32,
    /// Длина окна, м (как записано сонаром)
    pub window_length: f32,
    /// Исходные байты заголовка
    pub raw: Box<[u8; ARIS_HEADER_SIZE]>,
}

impl FrameHeader {
    pub fn ping_mode(&self) -> ArisResult<PingMode> {
        PingMode::from_u32(self.ping_mode)
    }

    /// Длина одного отсчёта по дальности, м.
    pub fn sample_length_m(&self) -> f64 {
        self.sample_period as f64 * 1e-6 * self.sound_speed as f64 / 2.0
    }

    /// Начало окна дальности, вычисленное из задержки и скорости звука, м.
    pub fn window_start_m(&self) -> f64 {
        self.sample_start_delay as f64 * 1e-6 * self.sound_speed as f64 / 2.0
    }

    /// Длина окна дальности, м.
    pub fn window_length_m(&self) -> f64 {
        self.sample_length_m() * self.samples_per_beam as f64
    }

    /// Дальность до переднего края отсчёта `sample`, м.
    pub fn sample_range_m(
        &self,
        sample: u32,
    ) -> f64 {
        self.window_start_m() + self.sample_length_m() * sample as f64
    }
}

////////////////////////////////////////////////////////////////////////////////
// Debug без дампа 1024 байт
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Debug for FileHeader {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("FileHeader")
            .field("version", &format_args!("{:#010x}", self.version))
            .field("frame_count", &self.frame_count)
            .field("frame_rate", &self.frame_rate)
            .field("num_raw_beams", &self.num_raw_beams)
            .field("samples_per_channel", &self.samples_per_channel)
            .field("serial_number", &self.serial_number)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for FrameHeader {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("FrameHeader")
            .field("frame_index", &self.frame_index)
            .field("frame_time", &self.frame_time)
            .field("ping_mode", &self.ping_mode)
            .field("samples_per_beam", &self.samples_per_beam)
            .field("sample_start_delay", &self.sample_start_delay)
            .field("sample_period", &self.sample_period)
            .field("sound_speed", &self.sound_speed)
            .finish_non_exhaustive()
    }
}
