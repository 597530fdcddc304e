//! Чтение записей сонара ARIS (формат DDF_05)
//!
//! Файл состоит из заголовка файла (1024 байта) и последовательности кадров
//! одинакового размера: заголовок кадра (1024 байта) и
//! `beams * samples_per_beam` байт амплитуд. Геометрия вычисляется один раз по
//! первому кадру и размеру файла, дальше любой кадр читается по смещению.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use aris_core::{get_video_stats, ArisReader};
//!
//! let stats = get_video_stats("recording.aris")?;
//! println!("{} beams x {} samples, {} frames",
//!     stats.num_beams, stats.samples_per_beam, stats.num_frames);
//!
//! let mut reader = ArisReader::open("recording.aris")?;
//! let frame = reader.get_frame(0)?;
//! println!("window start {:.2} m", frame.header.window_start_m());
//! # Ok::<(), aris_types::ArisError>(())
//! ```

pub mod api;
pub mod binary;
pub mod config;
pub mod format;
pub mod geometry;
pub mod layout;
pub mod reader;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::*;
pub use binary::*;
pub use config::*;
pub use format::*;
pub use geometry::*;
pub use layout::*;
pub use reader::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
