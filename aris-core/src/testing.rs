//! Построение синтетических записей ARIS для тестов и бенчмарков.
//!
//! Доступно в `#[cfg(test)]` и при включённой фиче `testing`.

use std::io::Write;

use aris_types::{PingMode, ARIS_HEADER_SIZE};
use byteorder::{ByteOrder, LittleEndian};

use crate::format::{ARIS_FILE_SIGNATURE, ARIS_FRAME_SIGNATURE};

/// Значение отсчёта `offset` в кадре `frame`.
pub fn sample_value(
    frame: u32,
    offset: usize,
) -> u8 {
    (frame as usize).wrapping_mul(31).wrapping_add(offset) as u8
}

/// Построитель файла: заголовок файла и `frames` одинаковых по размеру кадров.
///
/// Кадр `i` получает `FrameIndex = i`, `SamplePeriod = sample_period + i`
/// и отсчёты [`sample_value`].
#[derive(Debug, Clone)]
pub struct RecordingBuilder {
    ping_mode: u32,
    samples_per_beam: u32,
    frames: u32,
    recorded_frame_count: Option<u32>,
    sample_start_delay: u32,
    sample_period: u32,
    sound_speed: f32,
    overrides: Vec<(u32, usize, u32)>,
}

impl RecordingBuilder {
    pub fn new(
        ping_mode: u32,
        samples_per_beam: u32,
    ) -> Self {
        Self {
            ping_mode,
            samples_per_beam,
            frames: 1,
            recorded_frame_count: None,
            sample_start_delay: 2_000,
            sample_period: 4,
            sound_speed: 1_480.0,
            overrides: Vec::new(),
        }
    }

    pub fn frames(
        mut self,
        n: u32,
    ) -> Self {
        self.frames = n;
        self
    }

    /// Значение поля FrameCount в заголовке файла (по умолчанию `frames`).
    pub fn recorded_frame_count(
        mut self,
        n: u32,
    ) -> Self {
        self.recorded_frame_count = Some(n);
        self
    }

    pub fn sample_start_delay(
        mut self,
        us: u32,
    ) -> Self {
        self.sample_start_delay = us;
        self
    }

    pub fn sample_period(
        mut self,
        us: u32,
    ) -> Self {
        self.sample_period = us;
        self
    }

    pub fn sound_speed(
        mut self,
        mps: f32,
    ) -> Self {
        self.sound_speed = mps;
        self
    }

    /// Перезаписывает u32 поле заголовка кадра `frame` по смещению `offset`.
    pub fn frame_u32(
        mut self,
        frame: u32,
        offset: usize,
        value: u32,
    ) -> Self {
        self.overrides.push((frame, offset, value));
        self
    }

    /// Число лучей для размера данных. Неизвестный ping mode даёт 48,
    /// чтобы файл оставался правильной длины.
    pub fn beam_count(&self) -> u32 {
        PingMode::lookup(self.ping_mode).beams().unwrap_or(48)
    }

    pub fn sample_data_size(&self) -> usize {
        self.beam_count() as usize * self.samples_per_beam as usize
    }

    pub fn frame_record_size(&self) -> usize {
        ARIS_HEADER_SIZE + self.sample_data_size()
    }

    pub fn file_header(&self) -> [u8; ARIS_HEADER_SIZE] {
        let mut buf = [0u8; ARIS_HEADER_SIZE];

        LittleEndian::write_u32(&mut buf[0..], ARIS_FILE_SIGNATURE);
        LittleEndian::write_u32(
            &mut buf[4..],
            self.recorded_frame_count.unwrap_or(self.frames),
        );
        LittleEndian::write_u32(&mut buf[16..], self.beam_count());
        LittleEndian::write_u32(&mut buf[24..], self.samples_per_beam);
        LittleEndian::write_u32(&mut buf[44..], 1234);

        buf
    }

    pub fn frame_header(
        &self,
        index: u32,
    ) -> [u8; ARIS_HEADER_SIZE] {
        let mut buf = [0u8; ARIS_HEADER_SIZE];

        LittleEndian::write_u32(&mut buf[0..], index);
        LittleEndian::write_u64(&mut buf[4..], 1_700_000_000_000_000 + index as u64 * 66_666);
        LittleEndian::write_u32(&mut buf[12..], ARIS_FRAME_SIGNATURE);
        LittleEndian::write_u32(&mut buf[436..], self.ping_mode);
        LittleEndian::write_u32(&mut buf[452..], self.sample_period + index);
        LittleEndian::write_f32(&mut buf[460..], 15.0);
        LittleEndian::write_f32(&mut buf[464..], self.sound_speed);
        LittleEndian::write_u32(&mut buf[468..], self.samples_per_beam);
        LittleEndian::write_u32(&mut buf[476..], self.sample_start_delay);

        for &(frame, offset, value) in &self.overrides {
            if frame == index {
                LittleEndian::write_u32(&mut buf[offset..], value);
            }
        }

        buf
    }

    pub fn frame_samples(
        &self,
        index: u32,
    ) -> Vec<u8> {
        (0..self.sample_data_size())
            .map(|off| sample_value(index, off))
            .collect()
    }

    pub fn write_to<W: Write>(
        &self,
        w: &mut W,
    ) -> std::io::Result<()> {
        w.write_all(&self.file_header())?;

        for i in 0..self.frames {
            w.write_all(&self.frame_header(i))?;
            w.write_all(&self.frame_samples(i))?;
        }

        Ok(())
    }

    pub fn build(&self) -> Vec<u8> {
        let mut raw =
            Vec::with_capacity(ARIS_HEADER_SIZE + self.frames as usize * self.frame_record_size());

        raw.extend_from_slice(&self.file_header());
        for i in 0..self.frames {
            raw.extend_from_slice(&self.frame_header(i));
            raw.extend_from_slice(&self.frame_samples(i));
        }

        raw
    }
}
