//! Функции верхнего уровня по пути к файлу.
//!
//! Каждый вызов открывает собственный дескриптор и закрывает его на выходе,
//! так что функции можно звать из разных потоков независимо.

use std::path::Path;

use aris_types::{ArisResult, Frame};
use serde::Serialize;

use crate::{config::ReaderOptions, reader::ArisReader};

/// Сводка по записи.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VideoStats {
    pub samples_per_beam: u32,
    pub num_beams: u32,
    pub num_frames: u32,
}

/// Данные одного кадра и параметры, нужные для пересчёта в дальность.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    /// `num_beams * samples_per_beam` байт
    pub samples: Vec<u8>,
    /// мкс
    pub sample_start_delay: u32,
    /// м/с
    pub sound_speed: f32,
    /// мкс
    pub sample_period: u32,
}

impl From<Frame> for FrameData {
    fn from(frame: Frame) -> Self {
        FrameData {
            sample_start_delay: frame.sample_start_delay(),
            sound_speed: frame.sound_speed(),
            sample_period: frame.sample_period(),
            samples: frame.samples,
        }
    }
}

pub fn get_video_stats<P: AsRef<Path>>(path: P) -> ArisResult<VideoStats> {
    get_video_stats_with(path, ReaderOptions::default())
}

pub fn get_video_stats_with<P: AsRef<Path>>(
    path: P,
    options: ReaderOptions,
) -> ArisResult<VideoStats> {
    let reader = ArisReader::open_with(path, options)?;
    let g = reader.geometry();

    Ok(VideoStats {
        samples_per_beam: g.samples_per_beam,
        num_beams: g.beam_count,
        num_frames: g.frame_count,
    })
}

pub fn get_frame_data<P: AsRef<Path>>(
    path: P,
    frame_index: u32,
) -> ArisResult<FrameData> {
    get_frame_data_with(path, frame_index, ReaderOptions::default())
}

pub fn get_frame_data_with<P: AsRef<Path>>(
    path: P,
    frame_index: u32,
    options: ReaderOptions,
) -> ArisResult<FrameData> {
    let mut reader = ArisReader::open_with(path, options)?;
    let frame = reader.get_frame(frame_index)?;

    Ok(frame.into())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use aris_types::{ArisError, ErrorCode};
    use tempfile::NamedTempFile;

    use super::*;
    use crate::testing::RecordingBuilder;

    fn temp_recording(b: &RecordingBuilder) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(&b.build()).unwrap();
        tmp.flush().unwrap();
        tmp
    }

    #[test]
    fn test_video_stats() {
        let tmp = temp_recording(&RecordingBuilder::new(1, 500).frames(1));

        let stats = get_video_stats(tmp.path()).unwrap();

        assert_eq!(
            stats,
            VideoStats {
                samples_per_beam: 500,
                num_beams: 48,
                num_frames: 1,
            }
        );
    }

    #[test]
    fn test_frame_data() {
        let b = RecordingBuilder::new(1, 500)
            .frames(1)
            .sample_start_delay(1_234)
            .sound_speed(1_500.5)
            .sample_period(8);
        let tmp = temp_recording(&b);

        let data = get_frame_data(tmp.path(), 0).unwrap();

        assert_eq!(data.samples.len(), 24_000);
        assert_eq!(data.samples, b.frame_samples(0));
        assert_eq!(data.sample_start_delay, 1_234);
        assert_eq!(data.sound_speed, 1_500.5);
        assert_eq!(data.sample_period, 8);
    }

    #[test]
    fn test_error_codes() {
        let err = get_video_stats("/nonexistent/recording.aris").unwrap_err();
        assert_eq!(err.code(), ErrorCode::CantOpenInput);

        let mut raw = RecordingBuilder::new(1, 10).build();
        raw[3] = 0x04;
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(&raw).unwrap();
        let err = get_video_stats(tmp.path()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotArisFile);

        let tmp = temp_recording(&RecordingBuilder::new(1, 10).frames(1));
        let err = get_frame_data(tmp.path(), 1).unwrap_err();
        assert!(matches!(err, ArisError::Corrupt { frame: 1, .. }));
        assert_eq!(err.code(), ErrorCode::CorruptArisFile);
    }
}
