//! Пример: чтение записи ARIS через ArisReader
//!
//! Демонстрирует:
//! - открытие файла и вычисление геометрии
//! - чтение кадров с пересчётом окна в метры
//! - доступ к произвольным полям заголовка по имени

use aris_core::{ArisReader, FileHeaderExt, FrameHeaderExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "recording.aris".to_string());

    let mut reader = match ArisReader::open(&input_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("✗ {input_path}: {e} (code {})", e.code().as_i32());
            return Err(Box::new(e));
        }
    };

    let g = *reader.geometry();
    println!("✓ Geometry resolved");
    println!("  Beams            : {}", g.beam_count);
    println!("  Samples per beam : {}", g.samples_per_beam);
    println!("  Frame record     : {} B", g.frame_record_size);
    println!("  Frames           : {}", g.frame_count);
    println!("  Recorded frames  : {}", reader.file_header().frame_count);

    if let Some(sn) = reader.file_header().field("SN") {
        println!("  Serial number    : {sn}");
    }

    println!("\nFirst frames:");
    for frame in reader.frames().take(3) {
        let frame = frame?;
        let h = &frame.header;
        println!(
            "  [{}] window {:.2}..{:.2} m, c={} m/s, temp={}",
            frame.index,
            h.window_start_m(),
            h.window_start_m() + h.window_length_m(),
            h.sound_speed,
            h.field("WaterTemp")
                .map(|v| v.to_string())
                .unwrap_or_default(),
        );
    }

    Ok(())
}
