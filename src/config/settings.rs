//! User settings and preferences for Inkpanel
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

#![allow(dead_code)]

use crate::editor::{EditorProps, ShowNotification, DEFAULT_MAX_LIST_DEPTH};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    /// Follow the operating system preference
    System,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark, Theme::System]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position, restored on startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 720.0,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Editor Panel Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Control bar layout used when none is configured.
pub const DEFAULT_BUTTON_ITEMS: &[&str] = &[
    "bold",
    "italic",
    "underline",
    "strikethrough",
    "code",
    "header-one",
    "header-two",
    "blockquote",
    "code-block",
    "unordered-list-item",
    "ordered-list-item",
    "link",
    "picture",
    "video",
    "media-url",
    "dash",
    "soft-newline",
    "preface",
    "save",
    "export-html",
    "copy-html",
];

/// Initial values for the editor panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub title: String,
    pub summary: String,
    pub placeholder: String,
    pub title_placeholder: String,
    /// Control bar button ids, in display order
    pub button_items: Vec<String>,
    /// PNG icon per button id; buttons without one show a text label
    pub button_icons: BTreeMap<String, PathBuf>,
    pub max_list_depth: u8,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            title: String::new(),
            summary: String::new(),
            placeholder: "Write something...".to_string(),
            title_placeholder: "Title".to_string(),
            button_items: DEFAULT_BUTTON_ITEMS.iter().map(|s| s.to_string()).collect(),
            button_icons: BTreeMap::new(),
            max_list_depth: DEFAULT_MAX_LIST_DEPTH,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// Main application settings structure.
///
/// Missing fields fall back to their defaults when loading, so older or
/// partial config files keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Appearance
    // ─────────────────────────────────────────────────────────────────────────
    pub theme: Theme,

    /// Body text size in points
    pub font_size: f32,

    // ─────────────────────────────────────────────────────────────────────────
    // Editor Panel
    // ─────────────────────────────────────────────────────────────────────────
    pub editor: EditorSettings,

    // ─────────────────────────────────────────────────────────────────────────
    // Drafts & Export
    // ─────────────────────────────────────────────────────────────────────────
    pub recent_drafts: Vec<PathBuf>,

    pub max_recent_drafts: usize,

    pub last_draft_directory: Option<PathBuf>,

    pub last_export_directory: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────────────────
    // Window State
    // ─────────────────────────────────────────────────────────────────────────
    pub window_size: WindowSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_size: 15.0,
            editor: EditorSettings::default(),
            recent_drafts: Vec::new(),
            max_recent_drafts: 10,
            last_draft_directory: None,
            last_export_directory: None,
            window_size: WindowSize::default(),
        }
    }
}

impl Settings {
    /// Add a draft to the recent list, most recent first.
    pub fn add_recent_draft(&mut self, path: PathBuf) {
        self.recent_drafts.retain(|p| p != &path);
        self.recent_drafts.insert(0, path);
        self.recent_drafts.truncate(self.max_recent_drafts);
    }

    /// Panel props built from these settings.
    pub fn editor_props(&self, show_notification: Option<ShowNotification>) -> EditorProps {
        EditorProps {
            title: self.editor.title.clone(),
            summary: self.editor.summary.clone(),
            placeholder: self.editor.placeholder.clone(),
            title_placeholder: self.editor.title_placeholder.clone(),
            button_items: self.editor.button_items.clone(),
            button_icons: self.editor.button_icons.clone(),
            max_list_depth: self.editor.max_list_depth,
            show_notification,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    pub const MIN_FONT_SIZE: f32 = 8.0;
    pub const MAX_FONT_SIZE: f32 = 48.0;
    pub const MIN_WINDOW_SIZE: f32 = 320.0;
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;
    pub const MAX_LIST_DEPTH: u8 = 8;

    /// Clamp out-of-range values loaded from disk.
    pub fn sanitize(&mut self) {
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);

        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        self.editor.max_list_depth = self.editor.max_list_depth.min(Self::MAX_LIST_DEPTH);

        // Blank and repeated button ids
        let mut seen = Vec::new();
        self.editor.button_items.retain(|id| {
            let id = id.trim();
            if id.is_empty() || seen.iter().any(|s: &String| s == id) {
                return false;
            }
            seen.push(id.to_string());
            true
        });

        if self.max_recent_drafts == 0 {
            self.max_recent_drafts = 10;
        } else if self.max_recent_drafts > 100 {
            self.max_recent_drafts = 100;
        }
        self.recent_drafts.truncate(self.max_recent_drafts);
    }

    /// Parse settings from JSON and sanitize them.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.editor.max_list_depth, 4);
        assert_eq!(settings.editor.button_items.len(), DEFAULT_BUTTON_ITEMS.len());
        assert!(settings.editor.button_icons.is_empty());
    }

    #[test]
    fn test_theme_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let theme: Theme = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(theme, Theme::System);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"theme": "dark", "editor": {"title_placeholder": "Headline"}}"#;
        let settings = Settings::from_json_sanitized(json).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.editor.title_placeholder, "Headline");
        assert_eq!(settings.editor.placeholder, "Write something...");
        assert_eq!(settings.font_size, 15.0);
    }

    #[test]
    fn test_sanitize_clamps_values() {
        let mut settings = Settings {
            font_size: 200.0,
            window_size: WindowSize {
                width: 10.0,
                height: 50000.0,
                maximized: false,
            },
            max_recent_drafts: 0,
            ..Settings::default()
        };
        settings.editor.max_list_depth = 40;
        settings.sanitize();

        assert_eq!(settings.font_size, Settings::MAX_FONT_SIZE);
        assert_eq!(settings.window_size.width, Settings::MIN_WINDOW_SIZE);
        assert_eq!(settings.window_size.height, Settings::MAX_WINDOW_SIZE);
        assert_eq!(settings.editor.max_list_depth, Settings::MAX_LIST_DEPTH);
        assert_eq!(settings.max_recent_drafts, 10);
    }

    #[test]
    fn test_sanitize_drops_blank_and_repeated_buttons() {
        let mut settings = Settings::default();
        settings.editor.button_items =
            vec!["bold".into(), "".into(), "bold".into(), "italic".into()];
        settings.sanitize();
        assert_eq!(settings.editor.button_items, vec!["bold", "italic"]);
    }

    #[test]
    fn test_add_recent_draft() {
        let mut settings = Settings {
            max_recent_drafts: 2,
            ..Settings::default()
        };
        settings.add_recent_draft(PathBuf::from("a.json"));
        settings.add_recent_draft(PathBuf::from("b.json"));
        settings.add_recent_draft(PathBuf::from("a.json"));
        settings.add_recent_draft(PathBuf::from("c.json"));
        assert_eq!(
            settings.recent_drafts,
            vec![PathBuf::from("c.json"), PathBuf::from("a.json")]
        );
    }

    #[test]
    fn test_editor_props_copy_settings() {
        let mut settings = Settings::default();
        settings.editor.title = "Draft".into();
        settings
            .editor
            .button_icons
            .insert("bold".into(), PathBuf::from("icons/bold.png"));
        let props = settings.editor_props(None);
        assert_eq!(props.title, "Draft");
        assert_eq!(props.max_list_depth, 4);
        assert_eq!(
            props.button_icons.get("bold"),
            Some(&PathBuf::from("icons/bold.png"))
        );
        assert!(props.show_notification.is_none());
    }
}
