//! Equation text to pixels.
//!
//! [`Rasterizer`] is the seam between the compositor and whatever turns a
//! string into an image. [`GlyphRasterizer`] is the production implementation:
//! - one face resolved up front from [`TextStyle::families`],
//! - one line, no shaping, pen advanced by each glyph's horizontal advance,
//! - text centred horizontally and vertically in the requested box,
//! - outlines filled by `tiny-skia` with the non-zero rule.
//!
//! A character the face cannot draw is an error, never a placeholder box.

use ttf_parser::GlyphId;

use super::font::{glyph_path, FontError, FontSystem, ResolvedFace};
use super::pixmap::{Pixmap, Rgba};
use crate::core::VizError;

/// Turns a line of text into an image of exactly `width` x `height` pixels.
///
/// Pixels not covered by text are transparent so the result can be blitted
/// over any background.
pub trait Rasterizer {
    fn rasterize(&self, text: &str, width: u32, height: u32) -> Result<Pixmap, VizError>;
}

/// Font and colour of rasterized text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font families in priority order. `serif`, `sans-serif` and `monospace`
    /// name the generic families.
    pub families: Vec<String>,
    /// Pixels per em.
    pub font_size: f32,
    pub color: Rgba,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            families: vec![
                "CMU Serif".to_string(),
                "Latin Modern Roman".to_string(),
                "DejaVu Serif".to_string(),
                "Liberation Serif".to_string(),
                "serif".to_string(),
            ],
            font_size: 28.0,
            color: Rgba::BLACK,
        }
    }
}

/// Every character an equation or gate label can contain. Face resolution
/// skips faces that miss any of them.
pub const REQUIRED_CHARS: &str = "|ψ⟩= +-.()i0123456789HXYZSTPIM";

/// A positioned glyph: id plus pen x in pixels.
struct PlacedGlyph {
    id: GlyphId,
    x: f32,
}

/// Rasterizes text with one system font.
pub struct GlyphRasterizer {
    face: ResolvedFace,
    style: TextStyle,
}

impl GlyphRasterizer {
    /// Loads system fonts and resolves `style.families`.
    ///
    /// # Errors
    /// `VizError::Font` when no system font can be found or parsed.
    pub fn new(style: TextStyle) -> Result<Self, VizError> {
        let fonts = FontSystem::new()?;
        Self::with_font_system(&fonts, style)
    }

    /// Resolves `style.families` against an existing font database, keeping
    /// only faces that cover [`REQUIRED_CHARS`].
    pub fn with_font_system(fonts: &FontSystem, style: TextStyle) -> Result<Self, VizError> {
        if style.font_size.is_nan() || style.font_size <= 0.0 {
            return Err(VizError::Display {
                message: format!("font size must be positive, got {}", style.font_size),
            });
        }
        let face = fonts.resolve(&style.families, REQUIRED_CHARS)?;
        Ok(Self { face, style })
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Glyph ids with pen positions relative to the line start, plus the
    /// total advance.
    fn layout(
        &self,
        face: &ttf_parser::Face<'_>,
        text: &str,
        scale: f32,
    ) -> Result<(Vec<PlacedGlyph>, f32), FontError> {
        let mut pen = 0.0f32;
        let mut glyphs = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let id = face.glyph_index(ch).ok_or(FontError::MissingGlyph(ch))?;
            glyphs.push(PlacedGlyph { id, x: pen });
            pen += face.glyph_hor_advance(id).unwrap_or(0) as f32 * scale;
        }
        Ok((glyphs, pen))
    }
}

impl Rasterizer for GlyphRasterizer {
    fn rasterize(&self, text: &str, width: u32, height: u32) -> Result<Pixmap, VizError> {
        if width == 0 || height == 0 {
            return Err(VizError::Display {
                message: format!("cannot rasterize into a {}x{} image", width, height),
            });
        }
        let face = self.face.parse()?;
        let scale = self.face.scale_for(self.style.font_size);
        let (glyphs, advance) = self.layout(&face, text, scale)?;

        let metrics = self.face.v_metrics;
        let left = (width as f32 - advance) / 2.0;
        // Centre the ascender..descender band; the descender is negative.
        let baseline = height as f32 / 2.0 + (metrics.ascender + metrics.descender) / 2.0 * scale;

        let mut image = Pixmap::new(width, height)?;
        for glyph in &glyphs {
            if let Some(path) = glyph_path(&face, glyph.id, scale, (left + glyph.x, baseline)) {
                image.fill_path(&path, self.style.color);
            }
        }
        Ok(image)
    }
}
