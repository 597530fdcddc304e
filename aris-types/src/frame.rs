use crate::FrameHeader;

/// Кадр: заголовок и сырой буфер 8-битных амплитуд.
///
/// Буфер хранится построчно по дальности: строка `s` содержит по одному
/// байту на каждый луч, `samples.len() == beam_count * samples_per_beam`.
/// Кадр создаётся заново на каждый запрос и принадлежит вызывающему.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Индекс кадра в файле
    pub index: u32,
    /// Заголовок кадра
    pub header: FrameHeader,
    /// Число лучей (из геометрии файла)
    pub beam_count: u32,
    /// Отсчёты
    pub samples: Vec<u8>,
}

impl Frame {
    pub fn new(
        index: u32,
        header: FrameHeader,
        beam_count: u32,
        samples: Vec<u8>,
    ) -> Self {
        Frame {
            index,
            header,
            beam_count,
            samples,
        }
    }

    pub fn samples_per_beam(&self) -> u32 {
        if self.beam_count == 0 {
            return 0;
        }
        (self.samples.len() / self.beam_count as usize) as u32
    }

    /// Амплитуда отсчёта `sample` луча `beam`.
    pub fn sample(
        &self,
        sample: u32,
        beam: u32,
    ) -> Option<u8> {
        if beam >= self.beam_count {
            return None;
        }
        let idx = sample as usize * self.beam_count as usize + beam as usize;
        self.samples.get(idx).copied()
    }

    /// Строки по дальности, каждая длиной `beam_count`.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.samples.chunks_exact(self.beam_count.max(1) as usize)
    }

    pub fn sample_start_delay(&self) -> u32 {
        self.header.sample_start_delay
    }

    pub fn sound_speed(&self) -> f32 {
        self.header.sound_speed
    }

    pub fn sample_period(&self) -> u32 {
        self.header.sample_period
    }
}
