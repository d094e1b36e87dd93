//! CPU frame buffer for the circuit diagram, backed by `tiny-skia`.
//!
//! Coordinates are in pixels with `(0, 0)` at the top-left corner. All shapes
//! are anti-aliased and blended source-over.

use std::fmt;

use tiny_skia::{
    Color, ColorU8, FillRule, LineCap, Paint, Path, PathBuilder, PixmapPaint, Rect, Stroke,
    Transform,
};

use crate::core::VizError;

/// An RGBA8 colour with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::rgba(0, 0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);

    /// Opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `0x00RRGGBB`, the layout softbuffer presents. Alpha is dropped.
    #[inline]
    pub fn to_xrgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    fn to_color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    fn paint(self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(self.r, self.g, self.b, self.a);
        paint.anti_alias = true;
        paint
    }
}

impl From<ColorU8> for Rgba {
    fn from(c: ColorU8) -> Self {
        Rgba::rgba(c.red(), c.green(), c.blue(), c.alpha())
    }
}

/// A fixed-size image.
#[derive(Clone, PartialEq)]
pub struct Pixmap {
    inner: tiny_skia::Pixmap,
}

impl fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pixmap[{}x{}]", self.width(), self.height())
    }
}

impl Pixmap {
    /// A fully transparent image.
    ///
    /// # Errors
    /// `VizError::Display` for a zero or oversized dimension.
    pub fn new(width: u32, height: u32) -> Result<Self, VizError> {
        tiny_skia::Pixmap::new(width, height)
            .map(|inner| Self { inner })
            .ok_or_else(|| VizError::Display {
                message: format!("cannot allocate a {}x{} pixmap", width, height),
            })
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Result<Self, VizError> {
        let mut pixmap = Self::new(width, height)?;
        pixmap.fill(color);
        Ok(pixmap)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// The pixel at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.inner.pixel(x, y).map(|p| Rgba::from(p.demultiply()))
    }

    /// Row-major pixel colours.
    pub fn colors(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.inner.pixels().iter().map(|p| Rgba::from(p.demultiply()))
    }

    pub fn fill(&mut self, color: Rgba) {
        self.inner.fill(color.to_color());
    }

    /// Fills an arbitrary path with the non-zero rule.
    pub fn fill_path(&mut self, path: &Path, color: Rgba) {
        self.inner
            .fill_path(path, &color.paint(), FillRule::Winding, Transform::identity(), None);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            self.inner.fill_rect(rect, &color.paint(), Transform::identity(), None);
        }
    }

    /// Rectangle outline centred on the rectangle's edges.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32, color: Rgba) {
        let mut pb = PathBuilder::new();
        pb.move_to(x, y);
        pb.line_to(x + w, y);
        pb.line_to(x + w, y + h);
        pb.line_to(x, y + h);
        pb.close();
        self.stroke(pb.finish(), thickness, color);
    }

    /// Line segment with round caps.
    pub fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, thickness: f32, color: Rgba) {
        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        pb.line_to(x1, y1);
        self.stroke(pb.finish(), thickness, color);
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
            self.fill_path(&path, color);
        }
    }

    pub fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, thickness: f32, color: Rgba) {
        self.stroke(PathBuilder::from_circle(cx, cy, radius), thickness, color);
    }

    /// Source-over copy of `src` with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, src: &Pixmap, x: i32, y: i32) {
        self.inner.draw_pixmap(
            x,
            y,
            src.inner.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Copies the image into a `0x00RRGGBB` buffer of `out_width` x `out_height`,
    /// cropping or padding with `pad` as needed.
    pub fn write_xrgb(&self, out: &mut [u32], out_width: u32, out_height: u32, pad: Rgba) {
        let pad = pad.to_xrgb();
        for y in 0..out_height {
            for x in 0..out_width {
                let idx = (y * out_width + x) as usize;
                if idx >= out.len() {
                    return;
                }
                out[idx] = self.get(x, y).map(Rgba::to_xrgb).unwrap_or(pad);
            }
        }
    }

    // Degenerate paths (zero length, zero radius) come in as `None` and draw nothing.
    fn stroke(&mut self, path: Option<Path>, thickness: f32, color: Rgba) {
        let Some(path) = path else { return };
        let stroke = Stroke {
            width: thickness,
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        self.inner
            .stroke_path(&path, &color.paint(), &stroke, Transform::identity(), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mostly(px: Option<Rgba>, expected: Rgba) -> bool {
        let Some(px) = px else { return false };
        let close = |a: u8, b: u8| (a as i16 - b as i16).abs() <= 8;
        close(px.r, expected.r) && close(px.g, expected.g) && close(px.b, expected.b)
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(Pixmap::new(0, 10), Err(VizError::Display { .. })));
    }

    #[test]
    fn test_get_outside_is_none() -> Result<(), VizError> {
        let p = Pixmap::filled(2, 2, Rgba::WHITE)?;
        assert_eq!(p.get(1, 1), Some(Rgba::WHITE));
        assert_eq!(p.get(2, 0), None);
        Ok(())
    }

    #[test]
    fn test_horizontal_line_covers_its_row() -> Result<(), VizError> {
        let mut p = Pixmap::filled(20, 10, Rgba::WHITE)?;
        p.draw_line(2.0, 5.0, 18.0, 5.0, 2.0, Rgba::BLACK);
        assert_eq!(p.get(10, 4), Some(Rgba::BLACK));
        assert_eq!(p.get(10, 5), Some(Rgba::BLACK));
        assert_eq!(p.get(10, 0), Some(Rgba::WHITE));
        Ok(())
    }

    #[test]
    fn test_filled_circle_centre_and_outside() -> Result<(), VizError> {
        let mut p = Pixmap::filled(40, 40, Rgba::WHITE)?;
        p.fill_circle(20.0, 20.0, 8.0, Rgba::BLUE);
        assert_eq!(p.get(20, 20), Some(Rgba::BLUE));
        assert_eq!(p.get(2, 2), Some(Rgba::WHITE));
        Ok(())
    }

    #[test]
    fn test_stroked_circle_leaves_centre_untouched() -> Result<(), VizError> {
        let mut p = Pixmap::filled(60, 60, Rgba::WHITE)?;
        p.stroke_circle(30.0, 30.0, 20.0, 2.0, Rgba::BLUE);
        assert_eq!(p.get(30, 30), Some(Rgba::WHITE));
        assert!(mostly(p.get(49, 29), Rgba::BLUE), "{:?}", p.get(49, 29));
        Ok(())
    }

    #[test]
    fn test_nested_contours_fill_non_zero() -> Result<(), VizError> {
        // Both squares wind the same way, so the inner one stays filled.
        let mut pb = PathBuilder::new();
        for (x0, y0, x1, y1) in [(0.0, 0.0, 10.0, 10.0), (3.0, 3.0, 7.0, 7.0)] {
            pb.move_to(x0, y0);
            pb.line_to(x1, y0);
            pb.line_to(x1, y1);
            pb.line_to(x0, y1);
            pb.close();
        }
        let path = pb.finish().ok_or_else(|| VizError::Display { message: "empty".into() })?;
        let mut p = Pixmap::filled(10, 10, Rgba::WHITE)?;
        p.fill_path(&path, Rgba::BLACK);
        assert_eq!(p.get(5, 5), Some(Rgba::BLACK));
        Ok(())
    }

    #[test]
    fn test_blit_skips_transparent_pixels() -> Result<(), VizError> {
        let mut dst = Pixmap::filled(4, 4, Rgba::WHITE)?;
        let mut src = Pixmap::new(2, 2)?;
        src.fill_rect(0.0, 0.0, 1.0, 1.0, Rgba::BLACK);
        dst.blit(&src, 1, 1);
        assert_eq!(dst.get(1, 1), Some(Rgba::BLACK));
        assert_eq!(dst.get(2, 2), Some(Rgba::WHITE));
        Ok(())
    }

    #[test]
    fn test_write_xrgb_pads_outside() -> Result<(), VizError> {
        let p = Pixmap::filled(1, 1, Rgba::rgb(0x12, 0x34, 0x56))?;
        let mut out = vec![0u32; 4];
        p.write_xrgb(&mut out, 2, 2, Rgba::WHITE);
        assert_eq!(out, vec![0x123456, 0xFFFFFF, 0xFFFFFF, 0xFFFFFF]);
        Ok(())
    }
}
