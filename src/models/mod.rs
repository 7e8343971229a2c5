pub mod display;
pub mod generation;
pub mod image;
pub mod prompt;

pub use display::*;
pub use generation::*;
pub use image::*;
pub use prompt::*;
