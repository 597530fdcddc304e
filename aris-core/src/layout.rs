//! Разметка заголовков ARIS.
//!
//! Таблицы (имя, смещение, ширина, кодировка) для 1024-байтных заголовков
//! файла и кадра. Значения извлекаются явным декодером из среза байт, без
//! наложения упакованных структур. Все числа little-endian.

use std::ops::Range;

use aris_types::ARIS_HEADER_SIZE;
use serde::Serialize;

use crate::binary::{read_f32_le, read_f64_le, read_i32_le, read_u16_le, read_u32_le, read_u64_le};

/// Кодировка поля
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U16,
    U32,
    I32,
    U64,
    F32,
    F64,
    /// Массив f32 (матрица преобразования и т.п.)
    F32Array(usize),
    /// C-строка фиксированной длины, дополненная нулями
    Text(usize),
    /// Непрозрачные байты (padding)
    Bytes(usize),
}

/// Описание одного поля заголовка.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: usize,
    pub kind: FieldKind,
    /// Поле устарело, актуальное значение в заголовке кадра
    pub obsolete: bool,
}

/// Декодированное значение поля.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    U16(u16),
    U32(u32),
    I32(i32),
    U64(u64),
    F32(f32),
    F64(f64),
    F32Array(Vec<f32>),
    Text(String),
    Bytes(Vec<u8>),
}

/// Разметка 1024-байтной записи.
#[derive(Debug, Clone, Copy)]
pub struct HeaderLayout {
    pub name: &'static str,
    pub size: usize,
    pub fields: &'static [FieldSpec],
}

/// Разметка заголовка файла.
pub const FILE_HEADER_LAYOUT: HeaderLayout = HeaderLayout {
    name: "ArisFileHeader",
    size: ARIS_HEADER_SIZE,
    fields: FILE_HEADER_FIELDS,
};

/// Разметка заголовка кадра.
pub const FRAME_HEADER_LAYOUT: HeaderLayout = HeaderLayout {
    name: "ArisFrameHeader",
    size: ARIS_HEADER_SIZE,
    fields: FRAME_HEADER_FIELDS,
};

impl FieldKind {
    /// Ширина поля в байтах
    pub const fn width(&self) -> usize {
        match self {
            FieldKind::U16 => 2,
            FieldKind::U32 | FieldKind::I32 | FieldKind::F32 => 4,
            FieldKind::U64 | FieldKind::F64 => 8,
            FieldKind::F32Array(n) => 4 * *n,
            FieldKind::Text(n) | FieldKind::Bytes(n) => *n,
        }
    }
}

impl FieldSpec {
    pub const fn width(&self) -> usize {
        self.kind.width()
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.width()
    }

    pub fn is_padding(&self) -> bool {
        matches!(self.kind, FieldKind::Bytes(_))
    }

    /// Извлекает значение из `buf`. `None` если буфер короче поля.
    pub fn decode(
        &self,
        buf: &[u8],
    ) -> Option<FieldValue> {
        let bytes = buf.get(self.range())?;

        let value = match self.kind {
            FieldKind::U16 => FieldValue::U16(read_u16_le(bytes, 0)),
            FieldKind::U32 => FieldValue::U32(read_u32_le(bytes, 0)),
            FieldKind::I32 => FieldValue::I32(read_i32_le(bytes, 0)),
            FieldKind::U64 => FieldValue::U64(read_u64_le(bytes, 0)),
            FieldKind::F32 => FieldValue::F32(read_f32_le(bytes, 0)),
            FieldKind::F64 => FieldValue::F64(read_f64_le(bytes, 0)),
            FieldKind::F32Array(n) => {
                FieldValue::F32Array((0..n).map(|i| read_f32_le(bytes, i * 4)).collect())
            }
            FieldKind::Text(_) => {
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                FieldValue::Text(String::from_utf8_lossy(&bytes[..end]).into_owned())
            }
            FieldKind::Bytes(_) => FieldValue::Bytes(bytes.to_vec()),
        };

        Some(value)
    }
}

impl FieldValue {
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            FieldValue::U16(v) => Some(*v as u32),
            FieldValue::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::U16(v) => Some(*v as f64),
            FieldValue::U32(v) => Some(*v as f64),
            FieldValue::I32(v) => Some(*v as f64),
            FieldValue::U64(v) => Some(*v as f64),
            FieldValue::F32(v) => Some(*v as f64),
            FieldValue::F64(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            FieldValue::U16(v) => write!(f, "{v}"),
            FieldValue::U32(v) => write!(f, "{v}"),
            FieldValue::I32(v) => write!(f, "{v}"),
            FieldValue::U64(v) => write!(f, "{v}"),
            FieldValue::F32(v) => write!(f, "{v}"),
            FieldValue::F64(v) => write!(f, "{v}"),
            FieldValue::F32Array(v) => write!(f, "{v:?}"),
            FieldValue::Text(s) => write!(f, "{s:?}"),
            FieldValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl HeaderLayout {
    /// Поиск поля по имени (как в исходной схеме, с учётом регистра).
    pub fn field(
        &self,
        name: &str,
    ) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Декодирует поле `name` из записи `buf`.
    pub fn decode(
        &self,
        name: &str,
        buf: &[u8],
    ) -> Option<FieldValue> {
        self.field(name)?.decode(buf)
    }

    /// Все документированные поля записи, кроме padding, в порядке смещений.
    pub fn decode_all(
        &self,
        buf: &[u8],
    ) -> Vec<(&'static FieldSpec, FieldValue)> {
        self.fields
            .iter()
            .filter(|f| !f.is_padding())
            .filter_map(|f| f.decode(buf).map(|v| (f, v)))
            .collect()
    }
}

const fn field(
    name: &'static str,
    offset: usize,
    kind: FieldKind,
) -> FieldSpec {
    FieldSpec {
        name,
        offset,
        kind,
        obsolete: false,
    }
}

const fn obsolete(
    name: &'static str,
    offset: usize,
    kind: FieldKind,
) -> FieldSpec {
    FieldSpec {
        name,
        offset,
        kind,
        obsolete: true,
    }
}

////////////////////////////////////////////////////////////////////////////////
// Таблицы
////////////////////////////////////////////////////////////////////////////////

const FILE_HEADER_FIELDS: &[FieldSpec] = &[
    field("Version", 0, FieldKind::U32),
    field("FrameCount", 4, FieldKind::U32),
    obsolete("FrameRate", 8, FieldKind::U32),
    obsolete("HighResolution", 12, FieldKind::U32),
    field("NumRawBeams", 16, FieldKind::U32),
    obsolete("SampleRate", 20, FieldKind::F32),
    field("SamplesPerChannel", 24, FieldKind::U32),
    obsolete("ReceiverGain", 28, FieldKind::U32),
    obsolete("WindowStart", 32, FieldKind::F32),
    obsolete("WindowLength", 36, FieldKind::F32),
    obsolete("Reverse", 40, FieldKind::U32),
    field("SN", 44, FieldKind::U32),
    field("strDate", 48, FieldKind::Text(32)),
    field("strHeaderID", 80, FieldKind::Text(256)),
    field("UserID1", 336, FieldKind::I32),
    field("UserID2", 340, FieldKind::I32),
    field("UserID3", 344, FieldKind::I32),
    field("UserID4", 348, FieldKind::I32),
    field("StartFrame", 352, FieldKind::U32),
    field("EndFrame", 356, FieldKind::U32),
    field("TimeLapse", 360, FieldKind::U32),
    field("RecordInterval", 364, FieldKind::U32),
    field("RadioSeconds", 368, FieldKind::U32),
    field("FrameInterval", 372, FieldKind::U32),
    obsolete("Flags", 376, FieldKind::U32),
    field("AuxFlags", 380, FieldKind::U32),
    obsolete("Sspd", 384, FieldKind::U32),
    field("Flags3D", 388, FieldKind::U32),
    field("SoftwareVersion", 392, FieldKind::U32),
    field("WaterTemp", 396, FieldKind::U32),
    field("Salinity", 400, FieldKind::U32),
    field("PulseLength", 404, FieldKind::U32),
    field("TxMode", 408, FieldKind::U32),
    field("VersionFGPA", 412, FieldKind::U32),
    field("VersionPSuC", 416, FieldKind::U32),
    field("ThumbnailFI", 420, FieldKind::U32),
    obsolete("FileSize", 424, FieldKind::U64),
    obsolete("OptionalHeaderSize", 432, FieldKind::U64),
    obsolete("OptionalTailSize", 440, FieldKind::U64),
    obsolete("VersionMinor", 448, FieldKind::U32),
    obsolete("LargeLens", 452, FieldKind::U32),
    field("padding", 456, FieldKind::Bytes(568)),
];

const FRAME_HEADER_FIELDS: &[FieldSpec] = &[
    field("FrameIndex", 0, FieldKind::U32),
    field("FrameTime", 4, FieldKind::U64),
    field("Version", 12, FieldKind::U32),
    field("Status", 16, FieldKind::U32),
    field("sonarTimeStamp", 20, FieldKind::U64),
    field("TS_Day", 28, FieldKind::U32),
    field("TS_Hour", 32, FieldKind::U32),
    field("TS_Minute", 36, FieldKind::U32),
    field("TS_Second", 40, FieldKind::U32),
    field("TS_Hsecond", 44, FieldKind::U32),
    field("TransmitMode", 48, FieldKind::U32),
    field("WindowStart", 52, FieldKind::F32),
    field("WindowLength", 56, FieldKind::F32),
    field("Threshold", 60, FieldKind::U32),
    field("Intensity", 64, FieldKind::I32),
    field("ReceiverGain", 68, FieldKind::U32),
    field("DegC1", 72, FieldKind::U32),
    field("DegC2", 76, FieldKind::U32),
    field("Humidity", 80, FieldKind::U32),
    field("Focus", 84, FieldKind::U32),
    obsolete("Battery", 88, FieldKind::U32),
    field("UserValue1", 92, FieldKind::F32),
    field("UserValue2", 96, FieldKind::F32),
    field("UserValue3", 100, FieldKind::F32),
    field("UserValue4", 104, FieldKind::F32),
    field("UserValue5", 108, FieldKind::F32),
    field("UserValue6", 112, FieldKind::F32),
    field("UserValue7", 116, FieldKind::F32),
    field("UserValue8", 120, FieldKind::F32),
    field("Velocity", 124, FieldKind::F32),
    field("Depth", 128, FieldKind::F32),
    field("Altitude", 132, FieldKind::F32),
    field("Pitch", 136, FieldKind::F32),
    field("PitchRate", 140, FieldKind::F32),
    field("Roll", 144, FieldKind::F32),
    field("RollRate", 148, FieldKind::F32),
    field("Heading", 152, FieldKind::F32),
    field("HeadingRate", 156, FieldKind::F32),
    field("CompassHeading", 160, FieldKind::F32),
    field("CompassPitch", 164, FieldKind::F32),
    field("CompassRoll", 168, FieldKind::F32),
    field("Latitude", 172, FieldKind::F64),
    field("Longitude", 180, FieldKind::F64),
    field("SonarPosition", 188, FieldKind::F32),
    field("ConfigFlags", 192, FieldKind::U32),
    field("BeamTilt", 196, FieldKind::F32),
    field("TargetRange", 200, FieldKind::F32),
    field("TargetBearing", 204, FieldKind::F32),
    field("TargetPresent", 208, FieldKind::U32),
    obsolete("FirmwareRevision", 212, FieldKind::U32),
    field("Flags", 216, FieldKind::U32),
    field("SourceFrame", 220, FieldKind::U32),
    field("WaterTemp", 224, FieldKind::F32),
    field("TimerPeriod", 228, FieldKind::U32),
    field("SonarX", 232, FieldKind::F32),
    field("SonarY", 236, FieldKind::F32),
    field("SonarZ", 240, FieldKind::F32),
    field("SonarPan", 244, FieldKind::F32),
    field("SonarTilt", 248, FieldKind::F32),
    field("SonarRoll", 252, FieldKind::F32),
    field("PanPNNL", 256, FieldKind::F32),
    field("TiltPNNL", 260, FieldKind::F32),
    field("RollPNNL", 264, FieldKind::F32),
    field("VehicleTime", 268, FieldKind::F64),
    field("TimeGGK", 276, FieldKind::F32),
    field("DateGGK", 280, FieldKind::U32),
    field("QualityGGK", 284, FieldKind::U32),
    field("NumSatsGGK", 288, FieldKind::U32),
    field("DOPGGK", 292, FieldKind::F32),
    field("EHTGGK", 296, FieldKind::F32),
    field("HeaveTSS", 300, FieldKind::F32),
    field("YearGPS", 304, FieldKind::U32),
    field("MonthGPS", 308, FieldKind::U32),
    field("DayGPS", 312, FieldKind::U32),
    field("HourGPS", 316, FieldKind::U32),
    field("MinuteGPS", 320, FieldKind::U32),
    field("SecondGPS", 324, FieldKind::U32),
    field("HSecondGPS", 328, FieldKind::U32),
    field("SonarPanOffset", 332, FieldKind::F32),
    field("SonarTiltOffset", 336, FieldKind::F32),
    field("SonarRollOffset", 340, FieldKind::F32),
    field("SonarXOffset", 344, FieldKind::F32),
    field("SonarYOffset", 348, FieldKind::F32),
    field("SonarZOffset", 352, FieldKind::F32),
    field("Tmatrix", 356, FieldKind::F32Array(16)),
    field("SampleRate", 420, FieldKind::F32),
    field("AccellX", 424, FieldKind::F32),
    field("AccellY", 428, FieldKind::F32),
    field("AccellZ", 432, FieldKind::F32),
    field("PingMode", 436, FieldKind::U32),
    field("FrequencyHiLow", 440, FieldKind::U32),
    field("PulseWidth", 444, FieldKind::U32),
    field("CyclePeriod", 448, FieldKind::U32),
    field("SamplePeriod", 452, FieldKind::U32),
    field("TransmitEnable", 456, FieldKind::U32),
    field("FrameRate", 460, FieldKind::F32),
    field("SoundSpeed", 464, FieldKind::F32),
    field("SamplesPerBeam", 468, FieldKind::U32),
    field("Enable150V", 472, FieldKind::U32),
    field("SampleStartDelay", 476, FieldKind::U32),
    field("LargeLens", 480, FieldKind::U32),
    field("TheSystemType", 484, FieldKind::U32),
    field("SonarSerialNumber", 488, FieldKind::U32),
    obsolete("ReservedEK", 492, FieldKind::U64),
    field("ArisErrorFlagsUint", 500, FieldKind::U32),
    field("MissedPackets", 504, FieldKind::U32),
    field("ArisAppVersion", 508, FieldKind::U32),
    field("Available2", 512, FieldKind::U32),
    field("ReorderedSamples", 516, FieldKind::U32),
    field("Salinity", 520, FieldKind::U32),
    field("Pressure", 524, FieldKind::F32),
    field("BatteryVoltage", 528, FieldKind::F32),
    field("MainVoltage", 532, FieldKind::F32),
    field("SwitchVoltage", 536, FieldKind::F32),
    field("FocusMotorMoving", 540, FieldKind::U32),
    field("VoltageChanging", 544, FieldKind::U32),
    field("FocusTimeoutFault", 548, FieldKind::U32),
    field("FocusOverCurrentFault", 552, FieldKind::U32),
    field("FocusNotFoundFault", 556, FieldKind::U32),
    field("FocusStalledFault", 560, FieldKind::U32),
    field("FPGATimeoutFault", 564, FieldKind::U32),
    field("FPGABusyFault", 568, FieldKind::U32),
    field("FPGAStuckFault", 572, FieldKind::U32),
    field("CPUTempFault", 576, FieldKind::U32),
    field("PSUTempFault", 580, FieldKind::U32),
    field("WaterTempFault", 584, FieldKind::U32),
    field("HumidityFault", 588, FieldKind::U32),
    field("PressureFault", 592, FieldKind::U32),
    field("VoltageReadFault", 596, FieldKind::U32),
    field("VoltageWriteFault", 600, FieldKind::U32),
    field("FocusCurrentPosition", 604, FieldKind::U32),
    field("TargetPan", 608, FieldKind::F32),
    field("TargetTilt", 612, FieldKind::F32),
    field("TargetRoll", 616, FieldKind::F32),
    field("PanMotorErrorCode", 620, FieldKind::U32),
    field("TiltMotorErrorCode", 624, FieldKind::U32),
    field("RollMotorErrorCode", 628, FieldKind::U32),
    field("PanAbsPosition", 632, FieldKind::F32),
    field("TiltAbsPosition", 636, FieldKind::F32),
    field("RollAbsPosition", 640, FieldKind::F32),
    field("PanAccelX", 644, FieldKind::F32),
    field("PanAccelY", 648, FieldKind::F32),
    field("PanAccelZ", 652, FieldKind::F32),
    field("TiltAccelX", 656, FieldKind::F32),
    field("TiltAccelY", 660, FieldKind::F32),
    field("TiltAccelZ", 664, FieldKind::F32),
    field("RollAccelX", 668, FieldKind::F32),
    field("RollAccelY", 672, FieldKind::F32),
    field("RollAccelZ", 676, FieldKind::F32),
    field("AppliedSettings", 680, FieldKind::U32),
    field("ConstrainedSettings", 684, FieldKind::U32),
    field("InvalidSettings", 688, FieldKind::U32),
    field("EnableInterpacketDelay", 692, FieldKind::U32),
    field("InterpacketDelayPeriod", 696, FieldKind::U32),
    field("Uptime", 700, FieldKind::U32),
    field("ArisAppVersionMajor", 704, FieldKind::U16),
    field("ArisAppVersionMinor", 706, FieldKind::U16),
    field("GoTime", 708, FieldKind::U64),
    field("PanVelocity", 716, FieldKind::F32),
    field("TiltVelocity", 720, FieldKind::F32),
    field("RollVelocity", 724, FieldKind::F32),
    field("GpsTimeAge", 728, FieldKind::U32),
    field("SystemVariant", 732, FieldKind::U32),
    field("padding", 736, FieldKind::Bytes(288)),
];

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
