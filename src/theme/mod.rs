//! Theme System for Inkpanel
//!
//! Colors for the window chrome and for the document surface's block
//! classes. The `Theme` setting (Light/Dark/System) selects the palette at
//! runtime; `ThemeManager` applies it to the egui context.
//!
//! # Usage
//!
//! ```ignore
//! use crate::theme::ThemeColors;
//! use crate::config::Theme;
//!
//! let colors = ThemeColors::from_theme(Theme::Dark, &ctx.style().visuals);
//! ui.label(RichText::new("quoted").color(colors.document.quote_text));
//! ```

#![allow(dead_code)]

pub mod manager;
mod visuals;

pub use manager::ThemeManager;
pub use visuals::create_visuals;

use crate::config::Theme;
use crate::editor::{BlockStyleClass, NotificationKind};
use eframe::egui::{Color32, Visuals};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// All colors used by the application.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    pub base: BaseColors,
    pub text: TextColors,
    /// Document surface colors
    pub document: DocumentColors,
    pub ui: UiColors,
}

impl ThemeColors {
    /// Palette for a theme setting; `System` follows the current visuals.
    pub fn from_theme(theme: Theme, visuals: &Visuals) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
            Theme::System => {
                if visuals.dark_mode {
                    Self::dark()
                } else {
                    Self::light()
                }
            }
        }
    }

    pub fn light() -> Self {
        Self {
            base: BaseColors::light(),
            text: TextColors::light(),
            document: DocumentColors::light(),
            ui: UiColors::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            base: BaseColors::dark(),
            text: TextColors::dark(),
            document: DocumentColors::dark(),
            ui: UiColors::dark(),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.base.background.r() < 128
    }

    pub fn to_visuals(&self) -> Visuals {
        create_visuals(self)
    }

    /// Text and background colors for a block class.
    pub fn block_colors(&self, class: BlockStyleClass) -> (Color32, Option<Color32>) {
        match class {
            BlockStyleClass::Code => (self.text.code, Some(self.document.code_block_bg)),
            BlockStyleClass::Quote => (self.document.quote_text, None),
            BlockStyleClass::Atomic => (self.text.secondary, Some(self.document.media_bg)),
            BlockStyleClass::Paragraph => (self.text.primary, None),
        }
    }

    /// Status bar text color for a notification.
    pub fn notification_color(&self, kind: NotificationKind) -> Color32 {
        match kind {
            NotificationKind::Info => self.ui.info,
            NotificationKind::Success => self.ui.success,
            NotificationKind::Warning => self.ui.warning,
            NotificationKind::Error => self.ui.error,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Base Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Backgrounds and borders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColors {
    pub background: Color32,
    /// Panels and the control bar
    pub background_secondary: Color32,
    /// Inputs
    pub background_tertiary: Color32,
    pub border: Color32,
    pub border_subtle: Color32,
    pub hover: Color32,
    pub selected: Color32,
}

impl BaseColors {
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(255, 255, 255),
            background_secondary: Color32::from_rgb(248, 248, 246),
            background_tertiary: Color32::from_rgb(242, 242, 240),
            border: Color32::from_rgb(208, 208, 204),
            border_subtle: Color32::from_rgb(232, 232, 228),
            hover: Color32::from_rgb(238, 238, 234),
            selected: Color32::from_rgb(222, 238, 226),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(28, 29, 31),
            background_secondary: Color32::from_rgb(36, 37, 40),
            background_tertiary: Color32::from_rgb(44, 45, 48),
            border: Color32::from_rgb(62, 63, 66),
            border_subtle: Color32::from_rgb(50, 51, 54),
            hover: Color32::from_rgb(52, 53, 56),
            selected: Color32::from_rgb(38, 66, 50),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Colors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColors {
    pub primary: Color32,
    pub secondary: Color32,
    /// Placeholders and hints
    pub muted: Color32,
    pub link: Color32,
    pub code: Color32,
}

impl TextColors {
    pub fn light() -> Self {
        Self {
            primary: Color32::from_rgb(17, 17, 17),
            secondary: Color32::from_rgb(85, 85, 85),
            muted: Color32::from_rgb(150, 150, 150),
            link: Color32::from_rgb(51, 119, 170),
            code: Color32::from_rgb(160, 50, 60),
        }
    }

    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(228, 228, 228),
            secondary: Color32::from_rgb(170, 170, 170),
            muted: Color32::from_rgb(112, 112, 112),
            link: Color32::from_rgb(110, 175, 230),
            code: Color32::from_rgb(236, 130, 140),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Colors of the document surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentColors {
    pub quote_border: Color32,
    pub quote_text: Color32,
    pub code_block_bg: Color32,
    pub code_block_border: Color32,
    /// Dash line divider
    pub divider: Color32,
    /// Frame behind embedded media
    pub media_bg: Color32,
    pub cursor: Color32,
    pub selection: Color32,
    pub list_marker: Color32,
}

impl DocumentColors {
    pub fn light() -> Self {
        Self {
            quote_border: Color32::from_rgb(200, 200, 196),
            quote_text: Color32::from_rgb(102, 102, 102),
            code_block_bg: Color32::from_rgb(246, 246, 244),
            code_block_border: Color32::from_rgb(226, 226, 222),
            divider: Color32::from_rgb(190, 190, 186),
            media_bg: Color32::from_rgb(240, 240, 238),
            cursor: Color32::from_rgb(17, 17, 17),
            selection: Color32::from_rgba_unmultiplied(66, 189, 86, 70),
            list_marker: Color32::from_rgb(120, 120, 120),
        }
    }

    pub fn dark() -> Self {
        Self {
            quote_border: Color32::from_rgb(90, 90, 94),
            quote_text: Color32::from_rgb(165, 165, 168),
            code_block_bg: Color32::from_rgb(40, 41, 44),
            code_block_border: Color32::from_rgb(58, 59, 62),
            divider: Color32::from_rgb(88, 88, 92),
            media_bg: Color32::from_rgb(44, 45, 48),
            cursor: Color32::from_rgb(228, 228, 228),
            selection: Color32::from_rgba_unmultiplied(66, 189, 86, 90),
            list_marker: Color32::from_rgb(150, 150, 150),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UI Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Accent and feedback colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiColors {
    pub accent: Color32,
    pub accent_hover: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub info: Color32,
}

impl UiColors {
    pub fn light() -> Self {
        Self {
            accent: Color32::from_rgb(46, 150, 70),
            accent_hover: Color32::from_rgb(36, 128, 58),
            success: Color32::from_rgb(40, 167, 69),
            warning: Color32::from_rgb(230, 170, 20),
            error: Color32::from_rgb(220, 53, 69),
            info: Color32::from_rgb(23, 140, 170),
        }
    }

    pub fn dark() -> Self {
        Self {
            accent: Color32::from_rgb(90, 200, 115),
            accent_hover: Color32::from_rgb(120, 220, 140),
            success: Color32::from_rgb(75, 210, 100),
            warning: Color32::from_rgb(255, 210, 50),
            error: Color32::from_rgb(255, 100, 100),
            info: Color32::from_rgb(80, 200, 220),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
