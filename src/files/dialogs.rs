//! Native file dialog integration using the rfd crate
//!
//! Pickers for uploading media, saving and opening drafts, and choosing an
//! HTML export location.

use rfd::FileDialog;
use std::path::PathBuf;

/// File extension filters for supported file types.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "ogg"];
const DRAFT_EXTENSIONS: &[&str] = &["json"];
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// Pick one or more pictures to embed. Empty if cancelled.
pub fn pick_pictures_dialog(initial_dir: Option<&PathBuf>) -> Vec<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Insert Pictures")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_files().unwrap_or_default()
}

/// Pick a single video to embed.
pub fn pick_video_dialog(initial_dir: Option<&PathBuf>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Insert Video")
        .add_filter("Videos", VIDEO_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_file()
}

/// Choose where to save a draft.
pub fn save_draft_dialog(initial_dir: Option<&PathBuf>, default_name: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save Draft")
        .add_filter("Drafts", DRAFT_EXTENSIONS)
        .set_file_name(default_name);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}

/// Choose a draft to open.
pub fn open_draft_dialog(initial_dir: Option<&PathBuf>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Open Draft")
        .add_filter("Drafts", DRAFT_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_file()
}

/// Choose where to write exported HTML.
pub fn export_html_dialog(initial_dir: Option<&PathBuf>, default_name: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Export as HTML")
        .add_filter("HTML Files", HTML_EXTENSIONS)
        .set_file_name(default_name);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}
