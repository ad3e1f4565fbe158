// Row packing for glyph atlases

use glam::{UVec2, Vec2};

/// Where one glyph lives in the atlas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasRegion {
    pub key: char,
    /// Top-left corner in pixels
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Normalised corners for sampling
    pub uv_min: Vec2,
    pub uv_max: Vec2,
}

impl AtlasRegion {
    pub fn new(key: char, origin: UVec2, size: UVec2, atlas_size: UVec2) -> Self {
        let scale = atlas_size.as_vec2().recip();

        Self {
            key,
            x: origin.x,
            y: origin.y,
            width: size.x,
            height: size.y,
            uv_min: origin.as_vec2() * scale,
            uv_max: (origin + size).as_vec2() * scale,
        }
    }

    /// Zero-area regions (the space glyph) carry metrics but no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Places rectangles left to right, starting a new row when one runs out of
/// width. Rows are as tall as their tallest entry.
pub struct AtlasBuilder {
    size: UVec2,
    padding: u32,
    cursor: UVec2,
    row_height: u32,
    regions: Vec<AtlasRegion>,
}

impl AtlasBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: UVec2::new(width, height),
            padding: 1,
            cursor: UVec2::ZERO,
            row_height: 0,
            regions: Vec::new(),
        }
    }

    /// Gap left between neighbours so sampling never bleeds across glyphs
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Reserve room for a `width` x `height` glyph, `None` once the atlas is full
    pub fn add(&mut self, key: char, width: u32, height: u32) -> Option<AtlasRegion> {
        if width > self.size.x {
            return None;
        }

        if self.cursor.x + width > self.size.x {
            self.cursor = UVec2::new(0, self.cursor.y + self.row_height + self.padding);
            self.row_height = 0;
        }

        if self.cursor.y + height > self.size.y {
            return None;
        }

        let region = AtlasRegion::new(key, self.cursor, UVec2::new(width, height), self.size);
        self.regions.push(region);

        self.cursor.x += width + self.padding;
        self.row_height = self.row_height.max(height);

        Some(region)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.size.x, self.size.y)
    }

    /// Regions in insertion order
    pub fn build(self) -> Vec<AtlasRegion> {
        self.regions
    }
}
