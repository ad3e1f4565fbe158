// Asset loading
//
// Fonts arrive as raw bytes: from disk through `AssetLoader` natively, or
// handed over by the host page on the web. `DebugFont` parses them and bakes
// a `GlyphAtlas` for the HUD.

mod atlas;
mod font;
#[cfg(not(target_arch = "wasm32"))]
mod loader;

pub use atlas::{AtlasBuilder, AtlasRegion};
pub use font::{
    DebugFont, Glyph, GlyphAtlas, GlyphBitmap, LineMetrics, FALLBACK_GLYPH, PRINTABLE_ASCII,
};
#[cfg(not(target_arch = "wasm32"))]
pub use loader::AssetLoader;

#[cfg(test)]
pub(crate) use font::tests::test_atlas;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid font data: {0}")]
    InvalidFont(String),

    #[error("{glyphs} glyphs do not fit in a {width}x{height} atlas")]
    AtlasFull {
        glyphs: usize,
        width: u32,
        height: u32,
    },

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
