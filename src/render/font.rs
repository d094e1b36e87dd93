//! Font discovery and glyph outlines.
//!
//! - Discover system fonts with `fontdb`.
//! - Resolve a family list to one concrete face that has every glyph the
//!   caller needs.
//! - Extract glyph outlines through `ttf-parser` into `tiny-skia` paths,
//!   already scaled and flipped into pixel space (y down).

use std::sync::Arc;

use fontdb::{Database, Family, Query, Style, Weight};
use tiny_skia::{Path, PathBuilder};

/// Errors produced by the font subsystem.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FontError {
    #[error("no fonts found on this system")]
    NoFontsAvailable,

    #[error("failed to resolve a font face for families {0:?}")]
    ResolveFailed(Vec<String>),

    #[error("failed to parse font face")]
    ParseFailed,

    #[error("font has no glyph for {0:?}")]
    MissingGlyph(char),
}

/// Vertical metrics in font units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontVMetrics {
    pub units_per_em: f32,
    pub ascender: f32,
    pub descender: f32,
}

/// A resolved face: the font file bytes plus the face index within it.
#[derive(Debug, Clone)]
pub struct ResolvedFace {
    pub bytes: Arc<[u8]>,
    pub index: u32,
    pub v_metrics: FontVMetrics,
}

impl ResolvedFace {
    /// Parses the face. Cheap: `ttf-parser` only reads table headers here.
    pub fn parse(&self) -> Result<ttf_parser::Face<'_>, FontError> {
        ttf_parser::Face::parse(&self.bytes, self.index).map_err(|_| FontError::ParseFailed)
    }

    /// Factor mapping font units to pixels at `font_size` px per em.
    #[inline]
    pub fn scale_for(&self, font_size: f32) -> f32 {
        font_size / self.v_metrics.units_per_em
    }
}

/// Owns the font database.
pub struct FontSystem {
    db: Database,
}

impl FontSystem {
    /// Create a new font system and load system fonts.
    pub fn new() -> Result<Self, FontError> {
        let mut db = Database::new();
        db.load_system_fonts();
        Self::from_database(db)
    }

    /// Wraps an already populated database.
    pub fn from_database(db: Database) -> Result<Self, FontError> {
        if db.faces().next().is_none() {
            return Err(FontError::NoFontsAvailable);
        }
        log::debug!("font database holds {} faces", db.len());
        Ok(Self { db })
    }

    /// Resolve a family list (in priority order) to a regular-weight upright
    /// face with a glyph for every character of `required`.
    ///
    /// `serif`, `sans-serif` and `monospace` map to the generic families. When
    /// no listed family covers `required`, the generic serif family is tried,
    /// then every face in the database in load order.
    pub fn resolve(&self, families: &[String], required: &str) -> Result<ResolvedFace, FontError> {
        let mut query_families: Vec<Family<'_>> = Vec::new();
        for f in families {
            let s = f.trim();
            if s.eq_ignore_ascii_case("serif") {
                query_families.push(Family::Serif);
            } else if s.eq_ignore_ascii_case("sans-serif") || s.eq_ignore_ascii_case("sans") {
                query_families.push(Family::SansSerif);
            } else if s.eq_ignore_ascii_case("monospace") || s.eq_ignore_ascii_case("mono") {
                query_families.push(Family::Monospace);
            } else if !s.is_empty() {
                query_families.push(Family::Name(s));
            }
        }
        query_families.push(Family::Serif);

        let id = query_families
            .iter()
            .filter_map(|family| self.query_id(std::slice::from_ref(family)))
            .chain(self.db.faces().map(|face| face.id))
            .find(|id| self.covers(*id, required))
            .ok_or_else(|| FontError::ResolveFailed(families.to_vec()))?;

        let (bytes, index) = self
            .db
            .with_face_data(id, |data, index| (Arc::<[u8]>::from(data), index))
            .ok_or_else(|| FontError::ResolveFailed(families.to_vec()))?;

        let parsed = ttf_parser::Face::parse(&bytes, index).map_err(|_| FontError::ParseFailed)?;
        let v_metrics = FontVMetrics {
            units_per_em: parsed.units_per_em() as f32,
            ascender: parsed.ascender() as f32,
            descender: parsed.descender() as f32,
        };
        if let Some(face) = self.db.face(id) {
            log::info!("equation font: {:?}", face.families.first().map(|(name, _)| name));
        }

        Ok(ResolvedFace { bytes, index, v_metrics })
    }

    /// Whether face `id` parses and maps every character of `required`.
    fn covers(&self, id: fontdb::ID, required: &str) -> bool {
        let covered = self.db.with_face_data(id, |data, index| {
            ttf_parser::Face::parse(data, index)
                .is_ok_and(|face| required.chars().all(|ch| face.glyph_index(ch).is_some()))
        });
        if covered == Some(false) {
            log::debug!("face {:?} lacks glyphs for {:?}", id, required);
        }
        covered.unwrap_or(false)
    }

    fn query_id(&self, families: &[Family<'_>]) -> Option<fontdb::ID> {
        self.db.query(&Query {
            families,
            weight: Weight::NORMAL,
            style: Style::Normal,
            stretch: fontdb::Stretch::Normal,
        })
    }
}

/// Glyph outline in pixel space.
///
/// `origin` is the pen position on the baseline; font units are multiplied by
/// `scale` and the y axis is flipped.
pub fn glyph_path(
    face: &ttf_parser::Face<'_>,
    glyph: ttf_parser::GlyphId,
    scale: f32,
    origin: (f32, f32),
) -> Option<Path> {
    let mut builder = PixelOutlineBuilder::new(scale, origin);
    // `outline_glyph` returns None for glyphs without outline (e.g. space).
    face.outline_glyph(glyph, &mut builder)?;
    builder.build()
}

/// Convert `ttf-parser` outline callbacks into a `tiny_skia::Path`.
///
/// A glyph may contain multiple contours. `move_to` starts a new contour.
struct PixelOutlineBuilder {
    builder: PathBuilder,
    scale: f32,
    origin: (f32, f32),
}

impl PixelOutlineBuilder {
    fn new(scale: f32, origin: (f32, f32)) -> Self {
        Self {
            builder: PathBuilder::new(),
            scale,
            origin,
        }
    }

    #[inline]
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin.0 + x * self.scale, self.origin.1 - y * self.scale)
    }

    fn build(self) -> Option<Path> {
        self.builder.finish()
    }
}

impl ttf_parser::OutlineBuilder for PixelOutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (px, py) = self.map(x, y);
        self.builder.move_to(px, py);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (px, py) = self.map(x, y);
        self.builder.line_to(px, py);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let ((cx, cy), (px, py)) = (self.map(x1, y1), self.map(x, y));
        self.builder.quad_to(cx, cy, px, py);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let ((c1x, c1y), (c2x, c2y), (px, py)) = (self.map(x1, y1), self.map(x2, y2), self.map(x, y));
        self.builder.cubic_to(c1x, c1y, c2x, c2y, px, py);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
