//! Control Bar UI Component
//!
//! A single row of formatting and insertion buttons built from the
//! configured button identifiers. Buttons reflect the inline styles and
//! block type at the cursor; a click is reported as a `ControlAction` for
//! the app to dispatch.

use super::icons::ButtonIcons;
use crate::document::{BlockType, InlineStyle, StyleSet};
use crate::theme::ThemeColors;
use eframe::egui::{self, Color32, Response, RichText, Ui, Vec2};
use log::warn;

/// Height of the control bar.
const CONTROL_BAR_HEIGHT: f32 = 34.0;

/// Size of a button.
const BUTTON_SIZE: Vec2 = Vec2::new(28.0, 24.0);

/// Side length of icon images inside a button.
const ICON_SIZE: f32 = 16.0;

// ─────────────────────────────────────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────────────────────────────────────

/// Actions that can be triggered from the control bar.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlAction {
    ToggleInlineStyle(InlineStyle),
    ToggleBlockType(BlockType),
    /// Open the link dialog seeded from the selection
    Link,
    /// Pick pictures from disk
    Picture,
    /// Pick a video from disk
    Video,
    /// Prompt for a media URL
    MediaUrl,
    Dash,
    SoftNewline,
    Preface,
    /// Save the draft
    Save,
    ExportHtml,
    CopyHtml,
    CycleTheme,
}

// ─────────────────────────────────────────────────────────────────────────────
// Button Items
// ─────────────────────────────────────────────────────────────────────────────

/// A configurable control bar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonItem {
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    Blockquote,
    CodeBlock,
    UnorderedList,
    OrderedList,
    Link,
    Picture,
    Video,
    MediaUrl,
    Dash,
    SoftNewline,
    Preface,
    Save,
    ExportHtml,
    CopyHtml,
}

impl ButtonItem {
    pub fn all() -> &'static [ButtonItem] {
        &[
            ButtonItem::Bold,
            ButtonItem::Italic,
            ButtonItem::Underline,
            ButtonItem::Code,
            ButtonItem::Strikethrough,
            ButtonItem::HeaderOne,
            ButtonItem::HeaderTwo,
            ButtonItem::HeaderThree,
            ButtonItem::Blockquote,
            ButtonItem::CodeBlock,
            ButtonItem::UnorderedList,
            ButtonItem::OrderedList,
            ButtonItem::Link,
            ButtonItem::Picture,
            ButtonItem::Video,
            ButtonItem::MediaUrl,
            ButtonItem::Dash,
            ButtonItem::SoftNewline,
            ButtonItem::Preface,
            ButtonItem::Save,
            ButtonItem::ExportHtml,
            ButtonItem::CopyHtml,
        ]
    }

    /// Identifier used in configuration.
    pub fn id(&self) -> &'static str {
        match self {
            ButtonItem::Bold => "bold",
            ButtonItem::Italic => "italic",
            ButtonItem::Underline => "underline",
            ButtonItem::Code => "code",
            ButtonItem::Strikethrough => "strikethrough",
            ButtonItem::HeaderOne => "header-one",
            ButtonItem::HeaderTwo => "header-two",
            ButtonItem::HeaderThree => "header-three",
            ButtonItem::Blockquote => "blockquote",
            ButtonItem::CodeBlock => "code-block",
            ButtonItem::UnorderedList => "unordered-list-item",
            ButtonItem::OrderedList => "ordered-list-item",
            ButtonItem::Link => "link",
            ButtonItem::Picture => "picture",
            ButtonItem::Video => "video",
            ButtonItem::MediaUrl => "media-url",
            ButtonItem::Dash => "dash",
            ButtonItem::SoftNewline => "soft-newline",
            ButtonItem::Preface => "preface",
            ButtonItem::Save => "save",
            ButtonItem::ExportHtml => "export-html",
            ButtonItem::CopyHtml => "copy-html",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|item| item.id() == id)
    }

    /// Text shown when no icon is configured.
    pub fn label(&self) -> &'static str {
        match self {
            ButtonItem::Bold => "B",
            ButtonItem::Italic => "I",
            ButtonItem::Underline => "U",
            ButtonItem::Code => "<>",
            ButtonItem::Strikethrough => "S",
            ButtonItem::HeaderOne => "H1",
            ButtonItem::HeaderTwo => "H2",
            ButtonItem::HeaderThree => "H3",
            ButtonItem::Blockquote => "❝",
            ButtonItem::CodeBlock => "{}",
            ButtonItem::UnorderedList => "•",
            ButtonItem::OrderedList => "1.",
            ButtonItem::Link => "🔗",
            ButtonItem::Picture => "🖼",
            ButtonItem::Video => "🎞",
            ButtonItem::MediaUrl => "🌐",
            ButtonItem::Dash => "—",
            ButtonItem::SoftNewline => "↵",
            ButtonItem::Preface => "¶",
            ButtonItem::Save => "💾",
            ButtonItem::ExportHtml => "📤",
            ButtonItem::CopyHtml => "📋",
        }
    }

    pub fn tooltip(&self) -> &'static str {
        match self {
            ButtonItem::Bold => "Bold (Ctrl+B)",
            ButtonItem::Italic => "Italic (Ctrl+I)",
            ButtonItem::Underline => "Underline (Ctrl+U)",
            ButtonItem::Code => "Inline code (Ctrl+J)",
            ButtonItem::Strikethrough => "Strikethrough (Ctrl+Shift+X)",
            ButtonItem::HeaderOne => "Heading 1",
            ButtonItem::HeaderTwo => "Heading 2",
            ButtonItem::HeaderThree => "Heading 3",
            ButtonItem::Blockquote => "Quote",
            ButtonItem::CodeBlock => "Code block",
            ButtonItem::UnorderedList => "Bulleted list",
            ButtonItem::OrderedList => "Numbered list",
            ButtonItem::Link => "Link (Ctrl+K)",
            ButtonItem::Picture => "Insert pictures",
            ButtonItem::Video => "Insert video",
            ButtonItem::MediaUrl => "Insert media from URL",
            ButtonItem::Dash => "Divider",
            ButtonItem::SoftNewline => "Line break (Shift+Enter)",
            ButtonItem::Preface => "Toggle preface",
            ButtonItem::Save => "Save draft (Ctrl+S)",
            ButtonItem::ExportHtml => "Export as HTML",
            ButtonItem::CopyHtml => "Copy as HTML",
        }
    }

    pub fn action(&self) -> ControlAction {
        match self {
            ButtonItem::Bold => ControlAction::ToggleInlineStyle(InlineStyle::Bold),
            ButtonItem::Italic => ControlAction::ToggleInlineStyle(InlineStyle::Italic),
            ButtonItem::Underline => ControlAction::ToggleInlineStyle(InlineStyle::Underline),
            ButtonItem::Code => ControlAction::ToggleInlineStyle(InlineStyle::Code),
            ButtonItem::Strikethrough => {
                ControlAction::ToggleInlineStyle(InlineStyle::Strikethrough)
            }
            ButtonItem::HeaderOne => ControlAction::ToggleBlockType(BlockType::HeaderOne),
            ButtonItem::HeaderTwo => ControlAction::ToggleBlockType(BlockType::HeaderTwo),
            ButtonItem::HeaderThree => ControlAction::ToggleBlockType(BlockType::HeaderThree),
            ButtonItem::Blockquote => ControlAction::ToggleBlockType(BlockType::Blockquote),
            ButtonItem::CodeBlock => ControlAction::ToggleBlockType(BlockType::CodeBlock),
            ButtonItem::UnorderedList => {
                ControlAction::ToggleBlockType(BlockType::UnorderedListItem)
            }
            ButtonItem::OrderedList => ControlAction::ToggleBlockType(BlockType::OrderedListItem),
            ButtonItem::Link => ControlAction::Link,
            ButtonItem::Picture => ControlAction::Picture,
            ButtonItem::Video => ControlAction::Video,
            ButtonItem::MediaUrl => ControlAction::MediaUrl,
            ButtonItem::Dash => ControlAction::Dash,
            ButtonItem::SoftNewline => ControlAction::SoftNewline,
            ButtonItem::Preface => ControlAction::Preface,
            ButtonItem::Save => ControlAction::Save,
            ButtonItem::ExportHtml => ControlAction::ExportHtml,
            ButtonItem::CopyHtml => ControlAction::CopyHtml,
        }
    }

    /// Whether the button should be highlighted for the cursor's state.
    pub fn is_active(&self, state: &ToolbarState) -> bool {
        match self.action() {
            ControlAction::ToggleInlineStyle(style) => state.inline_style.contains(&style),
            ControlAction::ToggleBlockType(block_type) => state.block_type == block_type,
            ControlAction::Preface => state.preface_visible,
            ControlAction::Link => state.link_dialog_open,
            _ => false,
        }
    }

    /// Buttons that edit the document, disabled while a modal is open.
    fn edits_document(&self) -> bool {
        !matches!(
            self,
            ButtonItem::Preface | ButtonItem::Save | ButtonItem::ExportHtml | ButtonItem::CopyHtml
        )
    }
}

/// Cursor state the control bar highlights from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolbarState {
    pub inline_style: StyleSet,
    pub block_type: BlockType,
    pub preface_visible: bool,
    pub link_dialog_open: bool,
    /// A modal (link dialog or URL prompt) has the keyboard
    pub modal_open: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Control Bar
// ─────────────────────────────────────────────────────────────────────────────

/// Control bar state and rendering.
#[derive(Debug, Clone, Default)]
pub struct ControlBar {
    items: Vec<ButtonItem>,
}

impl ControlBar {
    /// Build from configured identifiers; unknown ones are skipped.
    pub fn new(ids: &[String]) -> Self {
        let items = ids
            .iter()
            .filter_map(|id| {
                let item = ButtonItem::from_id(id);
                if item.is_none() {
                    warn!("Ignoring unknown control bar button: {}", id);
                }
                item
            })
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[ButtonItem] {
        &self.items
    }

    pub fn height(&self) -> f32 {
        CONTROL_BAR_HEIGHT
    }

    /// Render the control bar and return any triggered action.
    pub fn show(
        &self,
        ui: &mut Ui,
        theme_colors: &ThemeColors,
        state: &ToolbarState,
        icons: &mut ButtonIcons,
    ) -> Option<ControlAction> {
        let mut action: Option<ControlAction> = None;

        ui.painter().rect_filled(
            ui.available_rect_before_wrap(),
            0.0,
            theme_colors.base.background_secondary,
        );

        ui.horizontal(|ui| {
            ui.set_height(self.height());
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.add_space(6.0);

            let mut previous: Option<ButtonItem> = None;
            for item in &self.items {
                if previous.map_or(false, |prev| group_of(prev) != group_of(*item)) {
                    ui.add_space(3.0);
                    vertical_separator(ui, theme_colors.base.border, self.height() - 12.0);
                    ui.add_space(3.0);
                }
                previous = Some(*item);

                let enabled = !(state.modal_open && item.edits_document());
                let texture = icons.get(ui.ctx(), item.id());
                if control_button(
                    ui,
                    *item,
                    texture.as_ref(),
                    enabled,
                    item.is_active(state),
                    theme_colors,
                )
                .clicked()
                {
                    action = Some(item.action());
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(6.0);
                let theme_btn = ui
                    .add(egui::Button::new(RichText::new("🎨").size(14.0)).frame(false))
                    .on_hover_text("Change theme");
                if theme_btn.clicked() {
                    action = Some(ControlAction::CycleTheme);
                }
            });
        });

        let rect = ui.min_rect();
        ui.painter().line_segment(
            [
                egui::pos2(rect.min.x, rect.max.y),
                egui::pos2(rect.max.x, rect.max.y),
            ],
            egui::Stroke::new(1.0, theme_colors.base.border_subtle),
        );

        action
    }
}

/// Adjacent buttons of different groups get a separator between them.
fn group_of(item: ButtonItem) -> u8 {
    match item.action() {
        ControlAction::ToggleInlineStyle(_) => 0,
        ControlAction::ToggleBlockType(_) => 1,
        ControlAction::Link
        | ControlAction::Picture
        | ControlAction::Video
        | ControlAction::MediaUrl
        | ControlAction::Dash
        | ControlAction::SoftNewline => 2,
        ControlAction::Preface => 3,
        _ => 4,
    }
}

/// Render a button with active state highlighting.
fn control_button(
    ui: &mut Ui,
    item: ButtonItem,
    icon: Option<&egui::TextureHandle>,
    enabled: bool,
    active: bool,
    colors: &ThemeColors,
) -> Response {
    let text_color = if enabled {
        colors.text.primary
    } else {
        colors.text.muted
    };

    let (rect, response) = ui.allocate_exact_size(BUTTON_SIZE, egui::Sense::click());
    let response = if enabled {
        response
    } else {
        // Disabled buttons swallow clicks
        ui.interact(rect, response.id.with("disabled"), egui::Sense::hover())
    };

    let bg = if active && enabled {
        Some(colors.base.selected)
    } else if response.hovered() && enabled {
        Some(colors.base.hover)
    } else {
        None
    };
    if let Some(bg) = bg {
        ui.painter().rect_filled(rect, egui::Rounding::same(3.0), bg);
    }

    match icon {
        Some(texture) => {
            let icon_rect = egui::Rect::from_center_size(rect.center(), Vec2::splat(ICON_SIZE));
            let tint = if enabled {
                Color32::WHITE
            } else {
                Color32::from_white_alpha(100)
            };
            ui.painter().image(
                texture.id(),
                icon_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                tint,
            );
        }
        None => {
            let font = match item {
                ButtonItem::Bold => egui::FontId::proportional(14.0),
                _ => egui::FontId::proportional(13.0),
            };
            let galley = ui.painter().layout_no_wrap(item.label().to_string(), font, text_color);
            let pos = rect.center() - galley.size() / 2.0;
            ui.painter().galley(pos, galley.clone(), text_color);
            if item == ButtonItem::Underline {
                let y = pos.y + galley.size().y - 1.0;
                ui.painter().line_segment(
                    [egui::pos2(pos.x, y), egui::pos2(pos.x + galley.size().x, y)],
                    egui::Stroke::new(1.0, text_color),
                );
            } else if item == ButtonItem::Strikethrough {
                let y = rect.center().y;
                ui.painter().line_segment(
                    [egui::pos2(pos.x - 1.0, y), egui::pos2(pos.x + galley.size().x + 1.0, y)],
                    egui::Stroke::new(1.0, text_color),
                );
            }
        }
    }

    response.on_hover_text(item.tooltip())
}

/// Draw a vertical separator line.
fn vertical_separator(ui: &mut Ui, color: Color32, height: f32) {
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(1.0, height), egui::Sense::hover());
    ui.painter().line_segment(
        [rect.center_top(), rect.center_bottom()],
        egui::Stroke::new(1.0, color),
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
