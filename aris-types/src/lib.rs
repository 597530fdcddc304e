pub mod error;
pub mod frame;
pub mod geometry;
pub mod header;
pub mod ping_mode;

pub use error::*;
pub use frame::*;
pub use geometry::*;
pub use header::*;
pub use ping_mode::*;
