//! Вычисление геометрии записи по заголовку файла и первому кадру.

use std::io::{Read, Seek, SeekFrom};

use aris_types::{ArisError, ArisResult, FileHeader, FrameHeader, Geometry, ARIS_HEADER_SIZE};
use log::{debug, warn};

use crate::{
    binary::read_record,
    config::{FrameCountMode, ReaderOptions},
    format::{FileHeaderExt, FrameHeaderExt},
};

/// Результат разбора начала файла.
#[derive(Debug, Clone)]
pub struct ResolvedGeometry {
    pub geometry: Geometry,
    /// Заголовок файла (справочно)
    pub file_header: FileHeader,
    /// Заголовок кадра 0, переиспользуется при чтении кадра 0
    pub first_frame: FrameHeader,
}

/// Читает заголовок файла и первый заголовок кадра, вычисляет геометрию.
///
/// После успешного вызова курсор `inner` стоит на начале отсчётов кадра 0.
pub fn resolve_geometry<R: Read + Seek>(
    inner: &mut R,
    options: &ReaderOptions,
) -> ArisResult<ResolvedGeometry> {
    let file_size = inner.seek(SeekFrom::End(0))?;
    inner.seek(SeekFrom::Start(0))?;

    let mut buf = [0u8; ARIS_HEADER_SIZE];

    read_record(inner, &mut buf, || {
        ArisError::invalid_format(format!(
            "couldn't read complete file header ({file_size} bytes in file)"
        ))
    })?;

    let file_header = FileHeader::deserialize(&buf)?;

    read_record(inner, &mut buf, || {
        ArisError::corrupt(0, "couldn't read first frame header")
    })?;

    let first_frame = FrameHeader::deserialize(&buf);
    let geometry = compute_geometry(&first_frame, file_size, options.frame_count_mode)?;

    debug!(
        "Resolved geometry: {} beams x {} samples, record={} B, frames={} ({})",
        geometry.beam_count,
        geometry.samples_per_beam,
        geometry.frame_record_size,
        geometry.frame_count,
        options.frame_count_mode,
    );

    if file_header.frame_count != geometry.frame_count {
        warn!(
            "Recorded FrameCount={} differs from computed {}",
            file_header.frame_count, geometry.frame_count
        );
    }

    if geometry.trailing_bytes() != 0 && options.frame_count_mode == FrameCountMode::Corrected {
        debug!(
            "Truncated trailing frame: {} extra bytes after frame {}",
            geometry.trailing_bytes(),
            geometry.frame_count,
        );
    }

    Ok(ResolvedGeometry {
        geometry,
        file_header,
        first_frame,
    })
}

/// Геометрия по первому кадру и размеру файла.
pub fn compute_geometry(
    first_frame: &FrameHeader,
    file_size: u64,
    mode: FrameCountMode,
) -> ArisResult<Geometry> {
    let beam_count = first_frame
        .ping_mode()
        .map_err(|e| ArisError::corrupt(0, e.to_string()))?
        .beam_count();

    let samples_per_beam = first_frame.samples_per_beam;

    if samples_per_beam == 0 {
        return Err(ArisError::corrupt(0, "SamplesPerBeam is 0"));
    }

    let sample_data_size = beam_count as u64 * samples_per_beam as u64;
    let frame_record_size = ARIS_HEADER_SIZE as u64 + sample_data_size;
    let data_region_size = file_size.saturating_sub(ARIS_HEADER_SIZE as u64);

    let frames = data_region_size / mode.divisor(frame_record_size, sample_data_size);

    Ok(Geometry {
        beam_count,
        samples_per_beam,
        frame_record_size,
        data_region_size,
        frame_count: u32::try_from(frames).unwrap_or(u32::MAX),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::testing::RecordingBuilder;

    #[test]
    fn test_resolve_single_frame() {
        let raw = RecordingBuilder::new(1, 500).frames(1).build();
        let mut cur = Cursor::new(raw);

        let r = resolve_geometry(&mut cur, &ReaderOptions::default()).unwrap();

        assert_eq!(r.geometry.beam_count, 48);
        assert_eq!(r.geometry.samples_per_beam, 500);
        assert_eq!(r.geometry.frame_record_size, 1024 + 24_000);
        assert_eq!(r.geometry.data_region_size, 1024 + 24_000);
        assert_eq!(r.geometry.frame_count, 1);
        // курсор на начале отсчётов кадра 0
        assert_eq!(cur.position(), 2048);
    }

    #[test]
    fn test_resolve_bad_signature() {
        let mut raw = RecordingBuilder::new(1, 10).frames(2).build();
        raw[0..4].copy_from_slice(b"GLOS");

        let err = resolve_geometry(&mut Cursor::new(raw), &ReaderOptions::default()).unwrap_err();
        assert_eq!(err.kind(), aris_types::ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_resolve_short_file_header() {
        let raw = vec![0x44u8; 100];

        let err = resolve_geometry(&mut Cursor::new(raw), &ReaderOptions::default()).unwrap_err();
        assert!(matches!(err, ArisError::InvalidFormat(_)), "{err}");
    }

    #[test]
    fn test_resolve_short_first_frame_header() {
        let mut raw = RecordingBuilder::new(1, 10).frames(1).build();
        raw.truncate(1024 + 512);

        let err = resolve_geometry(&mut Cursor::new(raw), &ReaderOptions::default()).unwrap_err();
        assert_eq!(err.kind(), aris_types::ErrorKind::CorruptFile);
        assert_eq!(err.frame(), Some(0));
    }

    #[test]
    fn test_resolve_unknown_ping_mode() {
        let raw = RecordingBuilder::new(13, 10).frames(1).build();

        let err = resolve_geometry(&mut Cursor::new(raw), &ReaderOptions::default()).unwrap_err();
        assert_eq!(err.kind(), aris_types::ErrorKind::CorruptFile);
        assert!(err.to_string().contains("ping mode"), "{err}");
    }

    #[test]
    fn test_zero_samples_per_beam_is_corrupt() {
        let raw = RecordingBuilder::new(1, 0).frames(1).build();

        let err = resolve_geometry(&mut Cursor::new(raw), &ReaderOptions::default()).unwrap_err();
        assert!(err.to_string().contains("SamplesPerBeam"), "{err}");
    }

    #[test]
    fn test_truncated_trailing_frame_floors() {
        let mut raw = RecordingBuilder::new(6, 100).frames(3).build();
        raw.truncate(raw.len() - 10);

        let r = resolve_geometry(&mut Cursor::new(raw), &ReaderOptions::default()).unwrap();
        assert_eq!(r.geometry.frame_count, 2);
        assert_eq!(r.geometry.trailing_bytes(), 1024 + 6_400 - 10);
    }

    #[test]
    fn test_legacy_divisor_inflates_count() {
        // 1 кадр: data = 1024 + 24000, делитель 24000 → 1 (floor 1.04)
        let raw = RecordingBuilder::new(1, 500).frames(1).build();
        let r = resolve_geometry(&mut Cursor::new(raw), &ReaderOptions::legacy()).unwrap();
        assert_eq!(r.geometry.frame_count, 1);

        // 10 кадров по 48x10: data = 10 * (1024 + 480), делитель 480 → 31
        let raw = RecordingBuilder::new(1, 10).frames(10).build();
        let legacy = resolve_geometry(&mut Cursor::new(raw.clone()), &ReaderOptions::legacy())
            .unwrap()
            .geometry;
        let corrected = resolve_geometry(&mut Cursor::new(raw), &ReaderOptions::default())
            .unwrap()
            .geometry;

        assert_eq!(corrected.frame_count, 10);
        assert_eq!(legacy.frame_count, 31);
    }

    #[test]
    fn test_recorded_frame_count_is_ignored() {
        let raw = RecordingBuilder::new(9, 20)
            .frames(4)
            .recorded_frame_count(1000)
            .build();

        let r = resolve_geometry(&mut Cursor::new(raw), &ReaderOptions::default()).unwrap();
        assert_eq!(r.file_header.frame_count, 1000);
        assert_eq!(r.geometry.frame_count, 4);
        assert_eq!(r.geometry.beam_count, 128);
    }
}
