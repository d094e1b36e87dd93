// src/render/mod.rs

//! Everything between a formatted equation and pixels on screen.

pub mod pixmap;
pub mod font;
pub mod text;
pub mod compositor;
pub mod app;

pub use app::{run_with_state, AppConfig, AppState};
pub use compositor::{Compositor, Layout, Scene};
pub use pixmap::{Pixmap, Rgba};
pub use text::{GlyphRasterizer, Rasterizer, TextStyle, REQUIRED_CHARS};
