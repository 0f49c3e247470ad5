//! Icon loading utilities for Inkpanel
//!
//! Decodes PNG files into the window icon and into textures for control
//! bar buttons with configured icon overrides.

use eframe::egui;
use image::GenericImageView;
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load icon data from PNG bytes.
///
/// Returns `None` if the PNG couldn't be decoded.
pub fn load_icon_from_png(png_data: &[u8]) -> Option<egui::IconData> {
    let image = image::load_from_memory(png_data).ok()?;
    let rgba = image.to_rgba8();
    let (width, height) = image.dimensions();

    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}

/// Load icon from a file path.
pub fn load_icon_from_file(path: &Path) -> Option<egui::IconData> {
    let data = std::fs::read(path).ok()?;
    load_icon_from_png(&data)
}

/// Get the application icon for the native window, if one ships next to
/// the binary's working directory.
pub fn get_app_icon() -> Option<Arc<egui::IconData>> {
    let icon_paths = [
        "assets/icons/icon_256.png",
        "assets/icons/icon_128.png",
        "assets/icons/icon_64.png",
    ];

    for path in &icon_paths {
        let path = Path::new(path);
        if path.exists() {
            if let Some(icon) = load_icon_from_file(path) {
                info!("Loaded application icon from: {}", path.display());
                return Some(Arc::new(icon));
            }
        }
    }

    debug!("No application icon found, using default");
    None
}

/// Decode a PNG file into an egui image.
pub fn load_color_image(path: &Path) -> Option<egui::ColorImage> {
    let icon = load_icon_from_file(path)?;
    Some(egui::ColorImage::from_rgba_unmultiplied(
        [icon.width as usize, icon.height as usize],
        &icon.rgba,
    ))
}

// ─────────────────────────────────────────────────────────────────────────────
// Button Icons
// ─────────────────────────────────────────────────────────────────────────────

/// Lazily loaded textures for button icon overrides.
///
/// Each path is decoded once; a file that fails to load is remembered so
/// the button keeps its text label without retrying every frame.
#[derive(Default)]
pub struct ButtonIcons {
    paths: BTreeMap<String, PathBuf>,
    textures: HashMap<String, Option<egui::TextureHandle>>,
}

impl ButtonIcons {
    pub fn new(paths: BTreeMap<String, PathBuf>) -> Self {
        Self {
            paths,
            textures: HashMap::new(),
        }
    }

    pub fn has_override(&self, id: &str) -> bool {
        self.paths.contains_key(id)
    }

    /// Texture for a button identifier, loading it on first use.
    pub fn get(&mut self, ctx: &egui::Context, id: &str) -> Option<egui::TextureHandle> {
        let path = self.paths.get(id)?;
        self.textures
            .entry(id.to_string())
            .or_insert_with(|| match load_color_image(path) {
                Some(image) => {
                    debug!("Loaded button icon '{}' from {}", id, path.display());
                    Some(ctx.load_texture(
                        format!("button-icon-{}", id),
                        image,
                        egui::TextureOptions::LINEAR,
                    ))
                }
                None => {
                    warn!("Failed to load icon for '{}' from {}", id, path.display());
                    None
                }
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_png(path: &Path) {
        let image = image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]));
        image.save(path).unwrap();
    }

    #[test]
    fn test_load_icon_from_png_invalid_data() {
        assert!(load_icon_from_png(b"not a png file").is_none());
    }

    #[test]
    fn test_load_icon_from_file_nonexistent() {
        assert!(load_icon_from_file(Path::new("nonexistent_icon.png")).is_none());
    }

    #[test]
    fn test_load_color_image_dimensions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bold.png");
        write_png(&path);

        let image = load_color_image(&path).unwrap();
        assert_eq!(image.size, [2, 3]);
    }

    #[test]
    fn test_button_icons_load_once() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("bold.png");
        write_png(&good);
        let bad = dir.path().join("italic.png");
        fs::write(&bad, b"garbage").unwrap();

        let mut paths = BTreeMap::new();
        paths.insert("bold".to_string(), good);
        paths.insert("italic".to_string(), bad);
        let mut icons = ButtonIcons::new(paths);
        let ctx = egui::Context::default();

        assert!(icons.has_override("bold"));
        assert!(icons.get(&ctx, "bold").is_some());
        assert!(icons.get(&ctx, "italic").is_none());
        assert!(icons.get(&ctx, "underline").is_none());
        assert_eq!(icons.textures.len(), 2);
    }
}
