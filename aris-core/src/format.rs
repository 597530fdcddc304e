//! Спецификация формата файлов ARIS (DDF_05)
//!
//! Бинарное представление записей сонара ARIS. Все многобайтовые числа
//! хранятся в порядке little-endian, без выравнивания.
//!
//! ```text
//! [0..1024)          ArisFileHeader
//! [1024..2048)       ArisFrameHeader кадра 0
//! [2048..2048 + N)   отсчёты кадра 0, N = beams * samples_per_beam
//! ...                далее FrameHeader + отсчёты, размер одинаков для всего файла
//! ```

pub use aris_types::ARIS_HEADER_SIZE;
use aris_types::{ArisError, ArisResult, FileHeader, FrameHeader};

use crate::{
    binary::{read_f32_le, read_u32_le, read_u64_le},
    layout::{FieldSpec, FieldValue, FILE_HEADER_LAYOUT, FRAME_HEADER_LAYOUT},
};

/// Сигнатура файла: "DDF" + версия 5, `b"DDF\x05"` в little-endian.
pub const ARIS_FILE_SIGNATURE: u32 = 0x0546_4444;

/// Сигнатура (поле Version) в заголовке кадра.
pub const ARIS_FRAME_SIGNATURE: u32 = 0x0546_4444;

// Смещения типизированных полей, должны совпадать с таблицами layout
const FILE_VERSION: usize = 0;
const FILE_FRAME_COUNT: usize = 4;
const FILE_FRAME_RATE: usize = 8;
const FILE_NUM_RAW_BEAMS: usize = 16;
const FILE_SAMPLES_PER_CHANNEL: usize = 24;
const FILE_SN: usize = 44;

const FRAME_INDEX: usize = 0;
const FRAME_TIME: usize = 4;
const FRAME_VERSION: usize = 12;
const FRAME_WINDOW_START: usize = 52;
const FRAME_WINDOW_LENGTH: usize = 56;
const FRAME_PING_MODE: usize = 436;
const FRAME_SAMPLE_PERIOD: usize = 452;
const FRAME_FRAME_RATE: usize = 460;
const FRAME_SOUND_SPEED: usize = 464;
const FRAME_SAMPLES_PER_BEAM: usize = 468;
const FRAME_SAMPLE_START_DELAY: usize = 476;

/// Декодирование заголовка файла.
pub trait FileHeaderExt: Sized {
    /// Десериализация из 1024 байт. Проверяет сигнатуру.
    fn deserialize(buf: &[u8; ARIS_HEADER_SIZE]) -> ArisResult<Self>;

    /// Значение любого документированного поля по имени.
    fn field(
        &self,
        name: &str,
    ) -> Option<FieldValue>;

    /// Все поля, кроме padding.
    fn fields(&self) -> Vec<(&'static FieldSpec, FieldValue)>;
}

/// Декодирование заголовка кадра.
pub trait FrameHeaderExt: Sized {
    /// Десериализация из 1024 байт. Любые байты дают корректный заголовок,
    /// смысловая проверка (ping mode и т.п.) выполняется выше.
    fn deserialize(buf: &[u8; ARIS_HEADER_SIZE]) -> Self;

    fn field(
        &self,
        name: &str,
    ) -> Option<FieldValue>;

    fn fields(&self) -> Vec<(&'static FieldSpec, FieldValue)>;

    /// `true` если поле Version кадра содержит сигнатуру DDF_05.
    fn has_frame_signature(&self) -> bool;
}

impl FileHeaderExt for FileHeader {
    fn deserialize(buf: &[u8; ARIS_HEADER_SIZE]) -> ArisResult<Self> {
        let version = read_u32_le(buf, FILE_VERSION);

        if version != ARIS_FILE_SIGNATURE {
            return Err(ArisError::InvalidSignature {
                found: version,
                expected: ARIS_FILE_SIGNATURE,
            });
        }

        Ok(FileHeader {
            version,
            frame_count: read_u32_le(buf, FILE_FRAME_COUNT),
            frame_rate: read_u32_le(buf, FILE_FRAME_RATE),
            num_raw_beams: read_u32_le(buf, FILE_NUM_RAW_BEAMS),
            samples_per_channel: read_u32_le(buf, FILE_SAMPLES_PER_CHANNEL),
            serial_number: read_u32_le(buf, FILE_SN),
            raw: Box::new(*buf),
        })
    }

    fn field(
        &self,
        name: &str,
    ) -> Option<FieldValue> {
        FILE_HEADER_LAYOUT.decode(name, &self.raw[..])
    }

    fn fields(&self) -> Vec<(&'static FieldSpec, FieldValue)> {
        FILE_HEADER_LAYOUT.decode_all(&self.raw[..])
    }
}

impl FrameHeaderExt for FrameHeader {
    fn deserialize(buf: &[u8; ARIS_HEADER_SIZE]) -> Self {
        FrameHeader {
            frame_index: read_u32_le(buf, FRAME_INDEX),
            frame_time: read_u64_le(buf, FRAME_TIME),
            version: read_u32_le(buf, FRAME_VERSION),
            ping_mode: read_u32_le(buf, FRAME_PING_MODE),
            samples_per_beam: read_u32_le(buf, FRAME_SAMPLES_PER_BEAM),
            sample_start_delay: read_u32_le(buf, FRAME_SAMPLE_START_DELAY),
            sample_period: read_u32_le(buf, FRAME_SAMPLE_PERIOD),
            sound_speed: read_f32_le(buf, FRAME_SOUND_SPEED),
            frame_rate: read_f32_le(buf, FRAME_FRAME_RATE),
            window_start: read_f32_le(buf, FRAME_WINDOW_START),
            window_length: read_f32_le(buf, FRAME_WINDOW_LENGTH),
            raw: Box::new(*buf),
        }
    }

    fn field(
        &self,
        name: &str,
    ) -> Option<FieldValue> {
        FRAME_HEADER_LAYOUT.decode(name, &self.raw[..])
    }

    fn fields(&self) -> Vec<(&'static FieldSpec, FieldValue)> {
        FRAME_HEADER_LAYOUT.decode_all(&self.raw[..])
    }

    fn has_frame_signature(&self) -> bool {
        self.version == ARIS_FRAME_SIGNATURE
    }
}
