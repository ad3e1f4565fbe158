// Debug font: parsing and glyph atlas generation

use super::atlas::{AtlasBuilder, AtlasRegion};
use super::AssetError;
use fontdue::{Font, FontSettings};
use glam::Vec2;
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Width of every glyph atlas; the height grows to fit
pub const ATLAS_WIDTH: u32 = 256;
const MAX_ATLAS_HEIGHT: u32 = 4096;

/// Characters baked into the atlas
pub const PRINTABLE_ASCII: RangeInclusive<char> = ' '..='~';

/// Substitute for characters missing from the atlas
pub const FALLBACK_GLYPH: char = '?';

/// Vertical metrics of a line of text, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from the top of the line to the baseline
    pub ascent: f32,
    /// Distance between consecutive baselines
    pub line_height: f32,
}

/// A single rasterised glyph before packing
#[derive(Debug, Clone)]
pub struct GlyphBitmap {
    pub ch: char,
    pub width: u32,
    pub height: u32,
    /// Left bearing
    pub xmin: f32,
    /// Bottom edge relative to the baseline, positive up
    pub ymin: f32,
    pub advance: f32,
    /// Row-major coverage, `width * height` bytes
    pub coverage: Vec<u8>,
}

/// A packed glyph
#[derive(Debug, Clone, Copy)]
pub struct Glyph {
    pub region: AtlasRegion,
    /// Top-left corner relative to the pen position on the baseline (y down)
    pub offset: Vec2,
    pub advance: f32,
}

/// Single-channel coverage atlas for one font size
#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    pub width: u32,
    pub height: u32,
    /// Row-major R8 coverage
    pub pixels: Vec<u8>,
    pub line: LineMetrics,
    glyphs: HashMap<char, Glyph>,
}

impl GlyphAtlas {
    /// Pack rasterised glyphs into the smallest power-of-two height that fits
    pub fn pack(bitmaps: Vec<GlyphBitmap>, line: LineMetrics) -> Result<Self, AssetError> {
        let mut height = 64;
        let regions = loop {
            let mut builder = AtlasBuilder::new(ATLAS_WIDTH, height);
            let fits = bitmaps
                .iter()
                .all(|bitmap| builder.add(bitmap.ch, bitmap.width, bitmap.height).is_some());
            if fits {
                break builder.build();
            }
            if height >= MAX_ATLAS_HEIGHT {
                return Err(AssetError::AtlasFull {
                    glyphs: bitmaps.len(),
                    width: ATLAS_WIDTH,
                    height: MAX_ATLAS_HEIGHT,
                });
            }
            height *= 2;
        };

        let mut pixels = vec![0u8; (ATLAS_WIDTH * height) as usize];
        let mut glyphs = HashMap::with_capacity(bitmaps.len());

        for (bitmap, region) in bitmaps.into_iter().zip(regions) {
            let row_len = bitmap.width as usize;
            if row_len > 0 {
                for (row, coverage) in bitmap.coverage.chunks_exact(row_len).enumerate() {
                    let start = (region.y as usize + row) * ATLAS_WIDTH as usize + region.x as usize;
                    pixels[start..start + row_len].copy_from_slice(coverage);
                }
            }

            let offset = Vec2::new(bitmap.xmin, -(bitmap.ymin + bitmap.height as f32));
            glyphs.insert(
                bitmap.ch,
                Glyph {
                    region,
                    offset,
                    advance: bitmap.advance,
                },
            );
        }

        log::debug!(
            "Packed {} glyphs into a {}x{} atlas",
            glyphs.len(),
            ATLAS_WIDTH,
            height
        );

        Ok(Self {
            width: ATLAS_WIDTH,
            height,
            pixels,
            line,
            glyphs,
        })
    }

    /// Look up a glyph, falling back to `?` for characters not in the atlas
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs
            .get(&ch)
            .or_else(|| self.glyphs.get(&FALLBACK_GLYPH))
    }

    /// Number of glyphs in the atlas
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

/// TrueType/OpenType font used for the HUD
pub struct DebugFont {
    font: Font,
}

impl DebugFont {
    /// Parse font bytes. Fails on anything that is not a readable font.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AssetError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| AssetError::InvalidFont(e.to_string()))?;
        Ok(Self { font })
    }

    /// Rasterise one character at `px` pixels
    pub fn rasterize(&self, ch: char, px: f32) -> GlyphBitmap {
        let (metrics, coverage) = self.font.rasterize(ch, px);
        GlyphBitmap {
            ch,
            width: metrics.width as u32,
            height: metrics.height as u32,
            xmin: metrics.xmin as f32,
            ymin: metrics.ymin as f32,
            advance: metrics.advance_width,
            coverage,
        }
    }

    /// Line metrics at `px` pixels
    pub fn line_metrics(&self, px: f32) -> LineMetrics {
        match self.font.horizontal_line_metrics(px) {
            Some(metrics) => LineMetrics {
                ascent: metrics.ascent,
                line_height: metrics.new_line_size,
            },
            None => LineMetrics {
                ascent: px,
                line_height: px,
            },
        }
    }

    /// Rasterise printable ASCII into an atlas
    pub fn atlas(&self, px: f32) -> Result<GlyphAtlas, AssetError> {
        let bitmaps = PRINTABLE_ASCII.map(|ch| self.rasterize(ch, px)).collect();
        GlyphAtlas::pack(bitmaps, self.line_metrics(px))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Solid square bitmaps standing in for a real font
    pub(crate) fn square_bitmap(ch: char, size: u32) -> GlyphBitmap {
        GlyphBitmap {
            ch,
            width: size,
            height: size,
            xmin: 1.0,
            ymin: 0.0,
            advance: size as f32 + 2.0,
            coverage: vec![255; (size * size) as usize],
        }
    }

    pub(crate) fn test_atlas() -> GlyphAtlas {
        let mut bitmaps: Vec<_> = ('!'..='~').map(|ch| square_bitmap(ch, 8)).collect();
        bitmaps.push(GlyphBitmap {
            ch: ' ',
            width: 0,
            height: 0,
            xmin: 0.0,
            ymin: 0.0,
            advance: 10.0,
            coverage: Vec::new(),
        });
        let line = LineMetrics {
            ascent: 12.0,
            line_height: 16.0,
        };
        GlyphAtlas::pack(bitmaps, line).unwrap()
    }

    #[test]
    fn test_invalid_font_bytes() {
        let result = DebugFont::from_bytes(vec![0u8; 64]);
        assert!(matches!(result, Err(AssetError::InvalidFont(_))));
    }

    #[test]
    fn test_empty_font_bytes() {
        assert!(DebugFont::from_bytes(Vec::new()).is_err());
    }

    #[test]
    fn test_pack_printable_ascii() {
        let atlas = test_atlas();
        assert_eq!(atlas.glyph_count(), 95);
        assert_eq!(atlas.width, ATLAS_WIDTH);
        assert_eq!(atlas.pixels.len(), (atlas.width * atlas.height) as usize);
    }

    #[test]
    fn test_pack_copies_coverage() {
        let atlas = test_atlas();
        let region = atlas.glyph('A').unwrap().region;
        let index = (region.y * atlas.width + region.x) as usize;
        assert_eq!(atlas.pixels[index], 255);
        // Padding column right of the glyph stays empty
        assert_eq!(atlas.pixels[index + region.width as usize], 0);
    }

    #[test]
    fn test_glyph_offset_is_above_baseline() {
        let atlas = test_atlas();
        let glyph = atlas.glyph('x').unwrap();
        assert_eq!(glyph.offset, Vec2::new(1.0, -8.0));
        assert_eq!(glyph.advance, 10.0);
    }

    #[test]
    fn test_missing_glyph_falls_back() {
        let atlas = test_atlas();
        let fallback = atlas.glyph('?').unwrap().region;
        assert_eq!(atlas.glyph('é').unwrap().region, fallback);
    }

    #[test]
    fn test_atlas_grows_to_fit() {
        let bitmaps: Vec<_> = ('a'..='z').map(|ch| square_bitmap(ch, 40)).collect();
        let line = LineMetrics {
            ascent: 40.0,
            line_height: 48.0,
        };
        let atlas = GlyphAtlas::pack(bitmaps, line).unwrap();
        // 6 per row, 5 rows of 41 pixels
        assert_eq!(atlas.height, 256);
    }

    #[test]
    fn test_atlas_full() {
        let bitmaps: Vec<_> = ('a'..='z').map(|ch| square_bitmap(ch, 250)).collect();
        let line = LineMetrics {
            ascent: 250.0,
            line_height: 260.0,
        };
        assert!(matches!(
            GlyphAtlas::pack(bitmaps, line),
            Err(AssetError::AtlasFull { .. })
        ));
    }
}
