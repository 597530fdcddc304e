use std::path::{Path, PathBuf};

use aris_core::{ArisReader, FieldSpec, FieldValue, FrameCountMode};
use aris_types::Frame;
use serde::Serialize;

/// Сводка по записи (команда `stats`).
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub path: PathBuf,
    pub samples_per_beam: u32,
    pub num_beams: u32,
    pub num_frames: u32,
    pub frame_record_size: u64,
    /// Значение FrameCount из заголовка файла, справочное
    pub recorded_frame_count: u32,
    pub trailing_bytes: u64,
    pub frame_count_mode: FrameCountMode,
}

/// Параметры одного кадра (команда `frame`).
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub index: u32,
    pub frame_index: u32,
    pub frame_time: u64,
    pub num_beams: u32,
    pub samples_per_beam: u32,
    pub sample_start_delay: u32,
    pub sound_speed: f32,
    pub sample_period: u32,
    pub window_start_m: f64,
    pub window_length_m: f64,
    pub min_sample: u8,
    pub max_sample: u8,
    pub mean_sample: f64,
    /// Куда записаны отсчёты, если запрошено
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

/// Одно поле заголовка.
#[derive(Debug, Clone, Serialize)]
pub struct FieldEntry {
    pub name: &'static str,
    pub offset: usize,
    pub obsolete: bool,
    pub value: FieldValue,
}

/// Дамп заголовка (команда `header`).
#[derive(Debug, Clone, Serialize)]
pub struct HeaderReport {
    pub header: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<u32>,
    pub fields: Vec<FieldEntry>,
}

////////////////////////////////////////////////////////////////////////////////
// Построение отчётов
////////////////////////////////////////////////////////////////////////////////

impl StatsReport {
    pub fn from_reader<R: std::io::Read + std::io::Seek>(
        path: &Path,
        reader: &ArisReader<R>,
    ) -> Self {
        let g = reader.geometry();

        Self {
            path: path.to_path_buf(),
            samples_per_beam: g.samples_per_beam,
            num_beams: g.beam_count,
            num_frames: g.frame_count,
            frame_record_size: g.frame_record_size,
            recorded_frame_count: reader.file_header().frame_count,
            trailing_bytes: g.trailing_bytes(),
            frame_count_mode: reader.options().frame_count_mode,
        }
    }
}

impl FrameReport {
    pub fn from_frame(frame: &Frame) -> Self {
        let h = &frame.header;
        let (min, max, sum) = frame
            .samples
            .iter()
            .fold((u8::MAX, u8::MIN, 0u64), |(lo, hi, sum), &s| {
                (lo.min(s), hi.max(s), sum + s as u64)
            });
        let n = frame.samples.len();

        Self {
            index: frame.index,
            frame_index: h.frame_index,
            frame_time: h.frame_time,
            num_beams: frame.beam_count,
            samples_per_beam: frame.samples_per_beam(),
            sample_start_delay: h.sample_start_delay,
            sound_speed: h.sound_speed,
            sample_period: h.sample_period,
            window_start_m: h.window_start_m(),
            window_length_m: h.window_length_m(),
            min_sample: if n == 0 { 0 } else { min },
            max_sample: max,
            mean_sample: if n == 0 { 0.0 } else { sum as f64 / n as f64 },
            output: None,
        }
    }
}

impl HeaderReport {
    pub fn new(
        header: &'static str,
        frame: Option<u32>,
        fields: Vec<(&'static FieldSpec, FieldValue)>,
    ) -> Self {
        Self {
            header,
            frame,
            fields: fields
                .into_iter()
                .map(|(spec, value)| FieldEntry {
                    name: spec.name,
                    offset: spec.offset,
                    obsolete: spec.obsolete,
                    value,
                })
                .collect(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Текстовый вывод
////////////////////////////////////////////////////////////////////////////////

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

impl std::fmt::Display for StatsReport {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "  File             : {}", self.path.display())?;
        writeln!(f, "  Samples per beam : {}", self.samples_per_beam)?;
        writeln!(f, "  Beams            : {}", self.num_beams)?;
        writeln!(
            f,
            "  Frames           : {} ({})",
            self.num_frames, self.frame_count_mode
        )?;
        writeln!(f, "  Frame record     : {} B", self.frame_record_size)?;
        writeln!(f, "  Recorded frames  : {}", self.recorded_frame_count)?;
        if self.trailing_bytes > 0 {
            writeln!(f, "  Trailing bytes   : {}", self.trailing_bytes)?;
        }
        write!(f, "{RULE}")
    }
}

impl std::fmt::Display for FrameReport {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "  Frame            : {} (FrameIndex {})",
            self.index, self.frame_index
        )?;
        writeln!(f, "  Frame time       : {} us", self.frame_time)?;
        writeln!(
            f,
            "  Samples          : {} beams x {}",
            self.num_beams, self.samples_per_beam
        )?;
        writeln!(f, "  Start delay      : {} us", self.sample_start_delay)?;
        writeln!(f, "  Sample period    : {} us", self.sample_period)?;
        writeln!(f, "  Sound speed      : {:.1} m/s", self.sound_speed)?;
        writeln!(
            f,
            "  Window           : {:.3} m + {:.3} m",
            self.window_start_m, self.window_length_m
        )?;
        writeln!(
            f,
            "  Amplitude        : min {} / max {} / mean {:.1}",
            self.min_sample, self.max_sample, self.mean_sample
        )?;
        if let Some(out) = &self.output {
            writeln!(f, "  Written to       : {}", out.display())?;
        }
        write!(f, "{RULE}")
    }
}

impl std::fmt::Display for HeaderReport {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self.frame {
            Some(i) => writeln!(f, "{} (frame {i})", self.header)?,
            None => writeln!(f, "{}", self.header)?,
        }

        for e in &self.fields {
            let mark = if e.obsolete { " (obsolete)" } else { "" };
            writeln!(f, "  {:>4}  {:<28} {}{mark}", e.offset, e.name, e.value)?;
        }

        Ok(())
    }
}
