use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
};

use aris_types::{
    ArisError, ArisResult, FileHeader, Frame, FrameHeader, Geometry, ARIS_HEADER_SIZE,
};
use log::{debug, trace};

use crate::{
    binary::read_record,
    config::ReaderOptions,
    format::FrameHeaderExt,
    geometry::{resolve_geometry, ResolvedGeometry},
};

/// Читатель кадров ARIS с произвольным доступом.
///
/// Геометрия вычисляется один раз в конструкторе, после чего любой кадр
/// читается одним seek и двумя чтениями. Все операции чтения берут
/// `&mut self`: у дескриптора один курсор.
pub struct ArisReader<R: Read + Seek> {
    inner: R,
    options: ReaderOptions,
    geometry: Geometry,
    file_header: FileHeader,
    first_frame: FrameHeader,
}

/// Итератор по всем кадрам. Останавливается после первой ошибки.
pub struct Frames<'a, R: Read + Seek> {
    reader: &'a mut ArisReader<R>,
    next: u32,
    failed: bool,
}

impl ArisReader<BufReader<File>> {
    /// Открывает файл с настройками по умолчанию.
    pub fn open<P: AsRef<Path>>(path: P) -> ArisResult<Self> {
        Self::open_with(path, ReaderOptions::default())
    }

    pub fn open_with<P: AsRef<Path>>(
        path: P,
        options: ReaderOptions,
    ) -> ArisResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ArisError::CantOpenInput {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Opened {}", path.display());

        Self::with_options(BufReader::new(file), options)
    }
}

impl<R: Read + Seek> ArisReader<R> {
    pub fn new(inner: R) -> ArisResult<Self> {
        Self::with_options(inner, ReaderOptions::default())
    }

    /// Читает заголовок файла и первого кадра, вычисляет геометрию.
    pub fn with_options(
        mut inner: R,
        options: ReaderOptions,
    ) -> ArisResult<Self> {
        let ResolvedGeometry {
            geometry,
            file_header,
            first_frame,
        } = resolve_geometry(&mut inner, &options)?;

        Ok(Self {
            inner,
            options,
            geometry,
            file_header,
            first_frame,
        })
    }

    /// Читает кадр `index`. Каждый вызов возвращает новый буфер.
    pub fn get_frame(
        &mut self,
        index: u32,
    ) -> ArisResult<Frame> {
        if !self.geometry.contains(index) {
            return Err(ArisError::corrupt(
                index,
                format!(
                    "frame index out of range (file has {} frames)",
                    self.geometry.frame_count
                ),
            ));
        }

        let header = if index == 0 {
            // заголовок кадра 0 уже прочитан при открытии
            self.seek(self.geometry.sample_data_offset(0))?;
            self.first_frame.clone()
        } else {
            self.seek(self.geometry.frame_offset(index))?;
            self.read_frame_header(index)?
        };

        if self.options.verify_geometry {
            self.check_geometry(index, &header)?;
        }

        let size = usize::try_from(self.geometry.sample_data_size())
            .map_err(|_| ArisError::corrupt(index, "sample buffer too large"))?;
        let mut samples = vec![0u8; size];

        read_record(&mut self.inner, &mut samples, || {
            ArisError::corrupt(index, "couldn't read frame samples")
        })?;

        Ok(Frame::new(index, header, self.geometry.beam_count, samples))
    }

    pub fn frames(&mut self) -> Frames<'_, R> {
        Frames {
            reader: self,
            next: 0,
            failed: false,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn frame_count(&self) -> u32 {
        self.geometry.frame_count
    }

    /// Заголовок файла. Поле FrameCount в нём справочное.
    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn first_frame_header(&self) -> &FrameHeader {
        &self.first_frame
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn seek(
        &mut self,
        offset: u64,
    ) -> ArisResult<()> {
        trace!("Seek to {offset}");
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    fn read_frame_header(
        &mut self,
        index: u32,
    ) -> ArisResult<FrameHeader> {
        let mut buf = [0u8; ARIS_HEADER_SIZE];

        read_record(&mut self.inner, &mut buf, || {
            ArisError::corrupt(index, "couldn't read frame header")
        })?;

        let header = FrameHeader::deserialize(&buf);

        debug!(
            "Frame {index}: FrameIndex={}, SamplePeriod={}",
            header.frame_index, header.sample_period
        );

        Ok(header)
    }

    fn check_geometry(
        &self,
        index: u32,
        header: &FrameHeader,
    ) -> ArisResult<()> {
        let expected = &self.first_frame;

        if header.ping_mode != expected.ping_mode {
            return Err(ArisError::GeometryMismatch {
                frame: index,
                field: "PingMode",
                expected: expected.ping_mode,
                found: header.ping_mode,
            });
        }

        if header.samples_per_beam != expected.samples_per_beam {
            return Err(ArisError::GeometryMismatch {
                frame: index,
                field: "SamplesPerBeam",
                expected: expected.samples_per_beam,
                found: header.samples_per_beam,
            });
        }

        Ok(())
    }
}

impl<R: Read + Seek> Iterator for Frames<'_, R> {
    type Item = ArisResult<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next >= self.reader.frame_count() {
            return None;
        }

        let res = self.reader.get_frame(self.next);
        self.next += 1;
        self.failed = res.is_err();

        Some(res)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.reader.frame_count().saturating_sub(self.next) as usize;
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(left))
        }
    }
}

impl<R: Read + Seek> std::fmt::Debug for ArisReader<R> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("ArisReader")
            .field("options", &self.options)
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use aris_types::ErrorKind;

    use super::*;
    use crate::testing::{sample_value, RecordingBuilder};

    fn reader(b: &RecordingBuilder) -> ArisReader<Cursor<Vec<u8>>> {
        ArisReader::new(Cursor::new(b.build())).unwrap()
    }

    #[test]
    fn test_get_frame_zero_reuses_first_header() {
        let b = RecordingBuilder::new(1, 500).frames(1);
        let mut r = reader(&b);

        let f = r.get_frame(0).unwrap();

        assert_eq!(f.samples.len(), 48 * 500);
        assert_eq!(f.beam_count, 48);
        assert_eq!(f.samples_per_beam(), 500);
        assert_eq!(f.header.frame_index, r.first_frame_header().frame_index);
        assert_eq!(f.samples[..], b.frame_samples(0)[..]);
    }

    #[test]
    fn test_get_frame_each_index() {
        let b = RecordingBuilder::new(3, 40).frames(5).sample_period(10);
        let mut r = reader(&b);

        assert_eq!(r.frame_count(), 5);

        for i in 0..5 {
            let f = r.get_frame(i).unwrap();

            assert_eq!(f.index, i);
            assert_eq!(f.header.frame_index, i);
            assert_eq!(f.sample_period(), 10 + i);
            assert_eq!(f.samples.len(), 96 * 40);
            assert_eq!(f.samples[17], sample_value(i, 17));
        }
    }

    #[test]
    fn test_out_of_range() {
        let mut r = reader(&RecordingBuilder::new(1, 10).frames(2));

        let err = r.get_frame(2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptFile);
        assert_eq!(err.frame(), Some(2));

        // после ошибки читатель остаётся рабочим
        assert!(r.get_frame(1).is_ok());
    }

    #[test]
    fn test_repeated_reads_identical() {
        let mut r = reader(&RecordingBuilder::new(9, 16).frames(3));

        let a = r.get_frame(2).unwrap();
        let _ = r.get_frame(0).unwrap();
        let b = r.get_frame(2).unwrap();

        assert_eq!(a.samples, b.samples);
        assert_eq!(a.header.sample_period, b.header.sample_period);
    }

    #[test]
    fn test_legacy_count_overruns_into_corrupt() {
        let b = RecordingBuilder::new(1, 10).frames(10);
        let mut r = ArisReader::with_options(Cursor::new(b.build()), ReaderOptions::legacy())
            .unwrap();

        assert_eq!(r.frame_count(), 31);
        assert!(r.get_frame(9).is_ok());

        let err = r.get_frame(10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptFile);
        assert_eq!(err.frame(), Some(10));
    }

    #[test]
    fn test_verify_geometry() {
        let b = RecordingBuilder::new(1, 10)
            .frames(3)
            .frame_u32(2, 436, 3);

        // без проверки кадр читается с геометрией кадра 0
        let mut r = reader(&b);
        assert_eq!(r.get_frame(2).unwrap().header.ping_mode, 3);

        let mut r =
            ArisReader::with_options(Cursor::new(b.build()), ReaderOptions::verified()).unwrap();
        assert!(r.get_frame(1).is_ok());

        let err = r.get_frame(2).unwrap_err();
        assert!(
            matches!(
                err,
                ArisError::GeometryMismatch {
                    frame: 2,
                    field: "PingMode",
                    ..
                }
            ),
            "неожиданная ошибка: {err}"
        );
        assert_eq!(err.kind(), ErrorKind::CorruptFile);
    }

    #[test]
    fn test_frames_iterator() {
        let mut r = reader(&RecordingBuilder::new(6, 8).frames(4));

        let periods: Vec<u32> = r
            .frames()
            .map(|f| f.unwrap().sample_period())
            .collect();

        assert_eq!(periods, vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_frames_iterator_stops_after_error() {
        let b = RecordingBuilder::new(1, 10).frames(10);
        let mut r = ArisReader::with_options(Cursor::new(b.build()), ReaderOptions::legacy())
            .unwrap();

        let items: Vec<_> = r.frames().collect();

        assert_eq!(items.len(), 11);
        assert!(items[..10].iter().all(|f| f.is_ok()));
        assert!(items[10].is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let err = ArisReader::open("/nonexistent/path/to/file.aris").unwrap_err();

        assert!(matches!(err, ArisError::CantOpenInput { .. }));
        assert_eq!(err.kind(), ErrorKind::IoUnavailable);
    }
}
