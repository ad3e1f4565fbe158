// Asset loading from disk (native only)

use super::AssetError;
use std::path::{Path, PathBuf};

const FONT_DIRECTORY: &str = "fonts";
const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];

/// Asset loader responsible for finding and reading asset files
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Full path of a font in the fonts directory
    pub fn font_path(&self, name: &str) -> PathBuf {
        self.base_path.join(FONT_DIRECTORY).join(name)
    }

    /// Read a font from the fonts directory
    pub fn load_font(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        Self::load_bytes(&self.font_path(name))
    }

    /// Read any file
    pub fn load_bytes(path: &Path) -> Result<Vec<u8>, AssetError> {
        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        std::fs::read(path).map_err(|e| {
            AssetError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    /// List the font files available in the fonts directory
    pub fn list_fonts(&self) -> Result<Vec<String>, AssetError> {
        let dir = self.base_path.join(FONT_DIRECTORY);

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut fonts = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();

            let is_font = path
                .extension()
                .map(|ext| FONT_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()))
                .unwrap_or(false);

            if path.is_file() && is_font {
                if let Some(name) = path.file_name() {
                    fonts.push(name.to_string_lossy().to_string());
                }
            }
        }
        fonts.sort();

        Ok(fonts)
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.font_path("Inconsolata-Regular.ttf");

        assert_eq!(
            path,
            PathBuf::from("/game/assets/fonts/Inconsolata-Regular.ttf")
        );
    }

    #[test]
    fn test_missing_font() {
        let loader = AssetLoader::new("/definitely/not/here");
        assert!(matches!(
            loader.load_font("missing.ttf"),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_fonts_filters_extensions() {
        let dir = std::env::temp_dir().join(format!("sculptbox-fonts-{}", std::process::id()));
        let fonts = dir.join(FONT_DIRECTORY);
        std::fs::create_dir_all(&fonts).unwrap();
        std::fs::write(fonts.join("b.otf"), b"x").unwrap();
        std::fs::write(fonts.join("a.ttf"), b"x").unwrap();
        std::fs::write(fonts.join("notes.txt"), b"x").unwrap();

        let loader = AssetLoader::new(&dir);
        assert_eq!(loader.list_fonts().unwrap(), vec!["a.ttf", "b.otf"]);
        assert_eq!(loader.load_font("a.ttf").unwrap(), b"x");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_list_fonts_without_directory() {
        let loader = AssetLoader::new("/definitely/not/here");
        assert!(loader.list_fonts().unwrap().is_empty());
    }
}
