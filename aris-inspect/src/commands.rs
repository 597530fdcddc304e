use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use aris_core::{
    ArisReader, FileHeaderExt, FrameHeaderExt, FILE_HEADER_LAYOUT, FRAME_HEADER_LAYOUT,
};
use log::{debug, info};
use serde::Serialize;

use crate::{
    config::{InspectConfig, OutputFormat},
    error::{InspectError, InspectResult},
    report::{FrameReport, HeaderReport, StatsReport},
};

/// Геометрия и число кадров.
pub fn run_stats(
    path: &Path,
    config: &InspectConfig,
) -> InspectResult<StatsReport> {
    let reader = ArisReader::open_with(path, config.reader_options())?;

    Ok(StatsReport::from_reader(path, &reader))
}

/// Параметры кадра `index`, при `output` отсчёты пишутся в файл как есть.
pub fn run_frame(
    path: &Path,
    index: u32,
    output: Option<&Path>,
    config: &InspectConfig,
) -> InspectResult<FrameReport> {
    let mut reader = ArisReader::open_with(path, config.reader_options())?;
    let frame = reader.get_frame(index)?;

    let mut report = FrameReport::from_frame(&frame);

    if let Some(out) = output {
        write_samples(out, &frame.samples)?;
        info!("{} bytes of frame {index} written to {}", frame.samples.len(), out.display());
        report.output = Some(out.to_path_buf());
    }

    Ok(report)
}

/// Все поля заголовка файла или, при `frame`, заголовка кадра.
pub fn run_header(
    path: &Path,
    frame: Option<u32>,
    config: &InspectConfig,
) -> InspectResult<HeaderReport> {
    let mut reader = ArisReader::open_with(path, config.reader_options())?;

    let report = match frame {
        None => HeaderReport::new(
            FILE_HEADER_LAYOUT.name,
            None,
            reader.file_header().fields(),
        ),
        Some(i) => {
            let f = reader.get_frame(i)?;
            if !f.header.has_frame_signature() {
                debug!("Frame {i}: Version field is {:#010x}", f.header.version);
            }
            HeaderReport::new(FRAME_HEADER_LAYOUT.name, Some(i), f.header.fields())
        }
    };

    Ok(report)
}

/// Отчёт в выбранном формате.
pub fn render<T: Serialize + std::fmt::Display>(
    report: &T,
    format: OutputFormat,
) -> InspectResult<String> {
    let s = match format {
        OutputFormat::Text => report.to_string(),
        OutputFormat::Json => serde_json::to_string(report)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(report)?,
    };

    Ok(s)
}

fn write_samples(
    out: &Path,
    samples: &[u8],
) -> InspectResult<()> {
    let to_err = |source| InspectError::Output {
        path: out.to_path_buf(),
        source,
    };

    let file = File::create(out).map_err(to_err)?;
    let mut w = BufWriter::new(file);

    w.write_all(samples).map_err(to_err)?;
    w.flush().map_err(to_err)?;

    Ok(())
}
