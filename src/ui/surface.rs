//! Document Surface
//!
//! Renders the editor panel's document snapshot: one laid-out galley per
//! text block, styled by block class, inline styles and link decorations,
//! and a media frame per atomic block. Keyboard and pointer input on the
//! surface is forwarded to the panel as `SurfaceEvent`s.

use super::icons::load_color_image;
use crate::document::{
    BlockKey, BlockType, ContentBlock, ContentState, DecoratedRange, DecorationKind,
    DocumentModel, InlineStyle, KeyCommand, Selection, SelectionPoint,
};
use crate::editor::{
    block_style_class, media_block_for, surface_events, BlockStyleClass, EditorPanel, MediaBlock,
    SurfaceEvent,
};
use crate::error::Error;
use crate::theme::ThemeColors;
use eframe::egui::{
    self,
    text::{CCursor, LayoutJob, TextFormat},
    Color32, FontId, Galley, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2,
};
use log::{debug, warn};
use std::collections::HashMap;
use std::hash::Hash;
use std::path::Path;
use std::sync::Arc;

/// Vertical gap between blocks.
const BLOCK_SPACING: f32 = 8.0;

/// Indent per list depth level.
const LIST_INDENT: f32 = 24.0;

/// Inner padding of code blocks and quotes.
const BLOCK_PADDING: f32 = 8.0;

/// Height of the frame drawn for an embedded picture or video.
const MEDIA_HEIGHT: f32 = 160.0;

/// Height reserved for a divider.
const DIVIDER_HEIGHT: f32 = 20.0;

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

/// Where a block landed on screen in the last frame.
#[derive(Debug, Clone)]
struct BlockLayout {
    key: BlockKey,
    /// Full block area, including padding
    rect: Rect,
    /// Top-left of the text galley; `None` for atomic blocks
    text_origin: Option<Pos2>,
    galley: Option<Arc<Galley>>,
    len: usize,
}

impl BlockLayout {
    /// Character offset nearest to `pos`.
    fn offset_at(&self, pos: Pos2) -> usize {
        match (&self.galley, self.text_origin) {
            (Some(galley), Some(origin)) => {
                let cursor = galley.cursor_from_pos(pos - origin);
                cursor.ccursor.index.min(self.len)
            }
            _ => {
                if pos.x > self.rect.center().x {
                    self.len
                } else {
                    0
                }
            }
        }
    }
}

/// Font size for a block, scaled for headings.
fn block_font_size(block_type: &BlockType, base: f32) -> f32 {
    match block_type.heading_level() {
        Some(1) => base * 1.75,
        Some(2) => base * 1.5,
        Some(3) => base * 1.3,
        Some(4) => base * 1.15,
        Some(_) => base * 1.05,
        None => base,
    }
}

/// Lay out a text block's characters as a styled job.
fn block_job(
    block: &ContentBlock,
    decorations: &[DecoratedRange],
    colors: &ThemeColors,
    font_size: f32,
    wrap_width: f32,
) -> LayoutJob {
    let class = block_style_class(block.block_type());
    let (base_color, _) = colors.block_colors(class);
    let size = block_font_size(block.block_type(), font_size);
    let heading = block.block_type().heading_level().is_some();

    let mut boundaries: Vec<usize> = block
        .style_runs()
        .iter()
        .flat_map(|(start, end, _)| [*start, *end])
        .chain(decorations.iter().flat_map(|d| [d.start, d.end]))
        .filter(|offset| *offset <= block.len())
        .collect();
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;

    for pair in boundaries.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        if start == end {
            continue;
        }
        let meta = &block.chars()[start];
        let linked = decorations
            .iter()
            .any(|d| d.kind == DecorationKind::Link && d.start <= start && start < d.end);

        let monospace =
            class == BlockStyleClass::Code || meta.style.contains(&InlineStyle::Code);
        let font_id = if monospace {
            FontId::monospace(size * 0.92)
        } else {
            FontId::proportional(size)
        };

        let mut color = base_color;
        if meta.style.contains(&InlineStyle::Bold) || heading {
            color = strong_color(colors);
        }
        if linked {
            color = colors.text.link;
        }

        let mut format = TextFormat {
            font_id,
            color,
            italics: meta.style.contains(&InlineStyle::Italic),
            ..Default::default()
        };
        if meta.style.contains(&InlineStyle::Code) && class != BlockStyleClass::Code {
            format.color = colors.text.code;
            format.background = colors.document.code_block_bg;
        }
        if linked || meta.style.contains(&InlineStyle::Underline) {
            format.underline = Stroke::new(1.0, color);
        }
        if meta.style.contains(&InlineStyle::Strikethrough) {
            format.strikethrough = Stroke::new(1.0, color);
        }
        job.append(block.slice(start, end), 0.0, format);
    }

    if job.text.is_empty() {
        // Empty blocks still need a row of the right height
        let font_id = if class == BlockStyleClass::Code {
            FontId::monospace(size * 0.92)
        } else {
            FontId::proportional(size)
        };
        job.append(
            "",
            0.0,
            TextFormat {
                font_id,
                color: base_color,
                ..Default::default()
            },
        );
    }
    job
}

/// Bold text has no separate face; it is drawn in the strongest text color.
fn strong_color(colors: &ThemeColors) -> Color32 {
    if colors.is_dark() {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}

/// List marker for a block, numbered per run of ordered items at a depth.
fn list_marker(blocks: &[ContentBlock], index: usize) -> Option<String> {
    let block = &blocks[index];
    match block.block_type() {
        BlockType::UnorderedListItem => Some(
            match block.depth() % 3 {
                0 => "•",
                1 => "◦",
                _ => "▪",
            }
            .to_string(),
        ),
        BlockType::OrderedListItem => {
            let mut number = 1;
            for previous in blocks[..index].iter().rev() {
                if !previous.block_type().is_list_item() || previous.depth() < block.depth() {
                    break;
                }
                if previous.depth() == block.depth() {
                    if *previous.block_type() != BlockType::OrderedListItem {
                        break;
                    }
                    number += 1;
                }
            }
            Some(format!("{}.", number))
        }
        _ => None,
    }
}

/// Character range of `block` covered by `selection`, if any.
fn selected_range(
    content: &ContentState,
    selection: &Selection,
    block: &ContentBlock,
) -> Option<(usize, usize)> {
    let start = selection.start();
    let end = selection.end();
    let index = content.block_index(block.key())?;
    let start_index = content.block_index(&start.key)?;
    let end_index = content.block_index(&end.key)?;
    if index < start_index || index > end_index {
        return None;
    }
    let from = if index == start_index { start.offset } else { 0 };
    let to = if index == end_index {
        end.offset
    } else {
        block.len()
    };
    Some((from.min(block.len()), to.min(block.len())))
}

// ─────────────────────────────────────────────────────────────────────────────
// Document Surface
// ─────────────────────────────────────────────────────────────────────────────

/// Rendering and input state of the document surface.
pub struct DocumentSurface {
    id: egui::Id,
    layouts: Vec<BlockLayout>,
    media_textures: HashMap<String, Option<egui::TextureHandle>>,
    reported_revision: Option<u64>,
    had_focus: bool,
}

impl DocumentSurface {
    pub fn new(id_source: impl Hash) -> Self {
        Self {
            id: egui::Id::new(id_source),
            layouts: Vec::new(),
            media_textures: HashMap::new(),
            reported_revision: None,
            had_focus: false,
        }
    }

    pub fn id(&self) -> egui::Id {
        self.id
    }

    pub fn request_focus(&self, ctx: &egui::Context) {
        ctx.memory_mut(|m| m.request_focus(self.id));
    }

    pub fn has_focus(&self, ctx: &egui::Context) -> bool {
        ctx.memory(|m| m.has_focus(self.id))
    }

    /// Render the surface and apply this frame's input to `panel`.
    pub fn show<M: DocumentModel>(
        &mut self,
        ui: &mut Ui,
        panel: &mut EditorPanel<M>,
        colors: &ThemeColors,
        font_size: f32,
    ) -> Response {
        let focused = self.has_focus(ui.ctx());
        if focused != self.had_focus {
            self.had_focus = focused;
            panel.apply_surface_event(if focused {
                SurfaceEvent::Focus
            } else {
                SurfaceEvent::Blur
            });
        }
        if focused {
            ui.memory_mut(|m| {
                m.set_focus_lock_filter(
                    self.id,
                    egui::EventFilter {
                        tab: true,
                        horizontal_arrows: true,
                        vertical_arrows: true,
                        escape: false,
                    },
                )
            });
            self.handle_keyboard(ui, panel);
        }

        let errors = self.paint(ui, panel.document(), panel.placeholder(), colors, font_size, focused);
        if !errors.is_empty() && self.reported_revision != Some(panel.revision()) {
            self.reported_revision = Some(panel.revision());
            for error in &errors {
                panel.report(error);
            }
        }

        let rect = self
            .layouts
            .iter()
            .fold(Rect::NOTHING, |acc, layout| acc.union(layout.rect))
            .expand2(Vec2::new(0.0, BLOCK_SPACING));
        let rect = Rect::from_min_max(rect.min, Pos2::new(ui.max_rect().max.x, rect.max.y));
        let response = ui.interact(rect, self.id, Sense::click_and_drag());
        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Text);
        }
        self.handle_pointer(ui, &response, panel);
        response
    }

    fn handle_keyboard<M: DocumentModel>(&self, ui: &Ui, panel: &mut EditorPanel<M>) {
        let (events, copy, cut) = ui.input(|i| {
            let copy = i.events.iter().any(|e| matches!(e, egui::Event::Copy));
            let cut = i.events.iter().any(|e| matches!(e, egui::Event::Cut));
            (surface_events(i), copy, cut)
        });

        if copy || cut {
            let text = panel.document().selected_text();
            if !text.is_empty() {
                ui.ctx().output_mut(|o| o.copied_text = text);
            }
            if cut {
                panel.apply_key_command(&KeyCommand::Delete);
            }
        }

        if !events.is_empty() {
            debug!("Surface input: {} event(s)", events.len());
        }
        for event in events {
            panel.apply_surface_event(event);
        }
    }

    fn handle_pointer<M: DocumentModel>(
        &self,
        ui: &Ui,
        response: &Response,
        panel: &mut EditorPanel<M>,
    ) {
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        let Some(point) = self.point_at(pos) else {
            return;
        };
        let (pressed, shift) = ui.input(|i| (i.pointer.primary_pressed(), i.modifiers.shift));
        if pressed {
            self.request_focus(ui.ctx());
            panel.apply_surface_event(SurfaceEvent::Click {
                point,
                extend: shift,
            });
        } else if response.dragged() {
            let current = panel.document().current_selection().focus().clone();
            if current != point {
                panel.apply_surface_event(SurfaceEvent::Drag(point));
            }
        }
    }

    /// Selection point under a screen position, clamped to the nearest
    /// block vertically.
    fn point_at(&self, pos: Pos2) -> Option<SelectionPoint> {
        let layout = self
            .layouts
            .iter()
            .find(|layout| pos.y <= layout.rect.max.y)
            .or_else(|| self.layouts.last())?;
        Some(SelectionPoint::new(layout.key.clone(), layout.offset_at(pos)))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Painting
    // ─────────────────────────────────────────────────────────────────────────

    /// Lay out and paint every block. Returns the errors met on the way;
    /// the affected blocks are drawn in a degraded form.
    fn paint<M: DocumentModel>(
        &mut self,
        ui: &mut Ui,
        document: &M,
        placeholder: &str,
        colors: &ThemeColors,
        font_size: f32,
        focused: bool,
    ) -> Vec<Error> {
        let content = document.view();
        let selection = document.current_selection();
        let width = ui.available_width().max(1.0);
        let origin = ui.cursor().min;
        let painter = ui.painter().clone();
        let mut errors = Vec::new();
        let mut layouts = Vec::with_capacity(content.blocks().len());
        let mut y = origin.y;

        for (index, block) in content.blocks().iter().enumerate() {
            let class = block_style_class(block.block_type());
            let range = selected_range(content, selection, block);

            if class == BlockStyleClass::Atomic {
                let media = match media_block_for(content, block) {
                    Ok(media) => media,
                    Err(e) => {
                        errors.push(e);
                        None
                    }
                };
                let height = match media {
                    Some(MediaBlock::Divider) => DIVIDER_HEIGHT,
                    _ => MEDIA_HEIGHT,
                };
                let rect = Rect::from_min_size(Pos2::new(origin.x, y), Vec2::new(width, height));
                self.paint_media(ui, &painter, rect, media.as_ref(), colors);
                if range.is_some() && !selection.is_collapsed() {
                    painter.rect_stroke(rect, 4.0, Stroke::new(2.0, colors.ui.accent));
                } else if focused && range.is_some() {
                    painter.rect_stroke(rect, 4.0, Stroke::new(1.0, colors.document.cursor));
                }
                layouts.push(BlockLayout {
                    key: block.key().clone(),
                    rect,
                    text_origin: None,
                    galley: None,
                    len: block.len(),
                });
                y = rect.max.y + BLOCK_SPACING;
                continue;
            }

            let decorations = match document.decorate(block.key()) {
                Ok(decorations) => decorations,
                Err(e) => {
                    errors.push(e);
                    Vec::new()
                }
            };

            let indent = match block.block_type() {
                t if t.is_list_item() => LIST_INDENT * (f32::from(block.depth()) + 1.0),
                BlockType::Blockquote => BLOCK_PADDING * 2.0,
                BlockType::CodeBlock => BLOCK_PADDING,
                _ => 0.0,
            };
            let padding = if class == BlockStyleClass::Code {
                BLOCK_PADDING
            } else {
                0.0
            };
            let wrap_width = (width - indent - padding).max(1.0);
            let job = block_job(block, &decorations, colors, font_size, wrap_width);
            let galley = ui.fonts(|f| f.layout_job(job));

            let text_origin = Pos2::new(origin.x + indent, y + padding);
            let rect = Rect::from_min_max(
                Pos2::new(origin.x, y),
                Pos2::new(origin.x + width, text_origin.y + galley.size().y + padding),
            );

            // Backgrounds
            let (_, background) = colors.block_colors(class);
            if let Some(bg) = background {
                painter.rect_filled(rect, 4.0, bg);
                painter.rect_stroke(rect, 4.0, Stroke::new(1.0, colors.document.code_block_border));
            }
            if *block.block_type() == BlockType::Blockquote {
                painter.line_segment(
                    [
                        Pos2::new(origin.x + 2.0, rect.min.y),
                        Pos2::new(origin.x + 2.0, rect.max.y),
                    ],
                    Stroke::new(3.0, colors.document.quote_border),
                );
            }
            if let Some(marker) = list_marker(content.blocks(), index) {
                let first_row_height = galley.rows.first().map_or(font_size, |r| r.rect.height());
                painter.text(
                    Pos2::new(text_origin.x - 6.0, text_origin.y + first_row_height / 2.0),
                    egui::Align2::RIGHT_CENTER,
                    marker,
                    FontId::proportional(font_size),
                    colors.document.list_marker,
                );
            }

            if let Some((from, to)) = range {
                if from < to {
                    paint_selection(&painter, &galley, text_origin, from, to, colors.document.selection);
                }
            }

            painter.galley(text_origin, galley.clone(), colors.text.primary);

            if focused && selection.is_collapsed() && selection.focus().key == *block.key() {
                let offset = selection.focus().offset.min(block.len());
                let cursor_rect = galley
                    .pos_from_ccursor(CCursor::new(offset))
                    .translate(text_origin.to_vec2());
                painter.line_segment(
                    [cursor_rect.center_top(), cursor_rect.center_bottom()],
                    Stroke::new(1.5, colors.document.cursor),
                );
            }

            layouts.push(BlockLayout {
                key: block.key().clone(),
                rect,
                text_origin: Some(text_origin),
                galley: Some(galley),
                len: block.len(),
            });
            y = rect.max.y + BLOCK_SPACING;
        }

        if !content.has_text() && content.blocks().len() == 1 && !focused {
            if let Some(first) = layouts.first() {
                painter.text(
                    first.text_origin.unwrap_or(first.rect.min),
                    egui::Align2::LEFT_TOP,
                    placeholder,
                    FontId::proportional(font_size),
                    colors.text.muted,
                );
            }
        }

        ui.allocate_rect(
            Rect::from_min_max(origin, Pos2::new(origin.x + width, y)),
            Sense::hover(),
        );
        self.layouts = layouts;
        errors
    }

    fn paint_media(
        &mut self,
        ui: &Ui,
        painter: &egui::Painter,
        rect: Rect,
        media: Option<&MediaBlock>,
        colors: &ThemeColors,
    ) {
        let (label, src) = match media {
            Some(MediaBlock::Divider) => {
                painter.hline(
                    rect.x_range(),
                    rect.center().y,
                    Stroke::new(1.0, colors.document.divider),
                );
                return;
            }
            Some(MediaBlock::Image { src, .. }) => ("🖼", Some(src.as_str())),
            Some(MediaBlock::Video { src, .. }) => ("🎞", Some(src.as_str())),
            Some(MediaBlock::Embed { src, .. }) => ("🌐", src.as_deref()),
            None => ("⚠", None),
        };

        painter.rect_filled(rect, 4.0, colors.document.media_bg);

        let texture = match (media, src) {
            (Some(MediaBlock::Image { .. }), Some(src)) => self.thumbnail(ui.ctx(), src),
            _ => None,
        };
        if let Some(texture) = texture {
            let size = texture.size_vec2();
            let scale = (rect.height() - 8.0) / size.y.max(1.0);
            let scale = scale.min((rect.width() - 8.0) / size.x.max(1.0));
            let image_rect = Rect::from_center_size(rect.center(), size * scale);
            painter.image(
                texture.id(),
                image_rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
            return;
        }

        let caption = match src {
            Some(src) => format!("{}  {}", label, src),
            None => format!("{}  Missing media", label),
        };
        let color = if media.is_some() {
            colors.text.secondary
        } else {
            colors.ui.error
        };
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            caption,
            FontId::proportional(13.0),
            color,
        );
    }

    /// Texture for a local `file://` thumbnail, decoded once.
    fn thumbnail(&mut self, ctx: &egui::Context, src: &str) -> Option<egui::TextureHandle> {
        let path = src.strip_prefix("file://")?;
        self.media_textures
            .entry(src.to_string())
            .or_insert_with(|| match load_color_image(Path::new(path)) {
                Some(image) => Some(ctx.load_texture(
                    format!("thumbnail-{}", path),
                    image,
                    egui::TextureOptions::LINEAR,
                )),
                None => {
                    warn!("Could not decode thumbnail {}", path);
                    None
                }
            })
            .clone()
    }
}

/// Highlight characters `from..to` of a galley.
fn paint_selection(
    painter: &egui::Painter,
    galley: &Galley,
    origin: Pos2,
    from: usize,
    to: usize,
    color: Color32,
) {
    let mut row_start = 0;
    for row in &galley.rows {
        let row_len = row.char_count_excluding_newline();
        let row_end = row_start + row_len;
        let a = from.max(row_start);
        let b = to.min(row_end);
        if a < b || (a == b && from <= row_start && to > row_end) {
            let left = row.x_offset(a - row_start);
            let right = row.x_offset(b - row_start).max(left + 4.0);
            let rect = Rect::from_min_max(
                Pos2::new(left, row.rect.min.y),
                Pos2::new(right, row.rect.max.y),
            )
            .translate(origin.to_vec2());
            painter.rect_filled(rect, 0.0, color);
        }
        row_start += row.char_count_including_newline();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CompositeDecorator, DocumentState};
    use crate::editor::{EditorProps, MediaDescriptor};

    fn panel(text: &str) -> EditorPanel {
        let document = DocumentState::create_with_content(
            ContentState::from_text(text),
            Arc::new(CompositeDecorator::with_links()),
        );
        EditorPanel::new(EditorProps::default(), document)
    }

    fn render(surface: &mut DocumentSurface, panel: &mut EditorPanel) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                surface.show(ui, panel, &ThemeColors::light(), 15.0);
            });
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layout helpers
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_heading_sizes_decrease() {
        let base = 15.0;
        assert!(block_font_size(&BlockType::HeaderOne, base) > block_font_size(&BlockType::HeaderTwo, base));
        assert!(block_font_size(&BlockType::HeaderThree, base) > base);
        assert_eq!(block_font_size(&BlockType::Unstyled, base), base);
    }

    #[test]
    fn test_job_text_matches_block() {
        let content = ContentState::from_text("hello world");
        let block = &content.blocks()[0];
        let job = block_job(block, &[], &ThemeColors::light(), 15.0, 400.0);
        assert_eq!(job.text, "hello world");
    }

    #[test]
    fn test_job_splits_on_link_decoration() {
        let content = ContentState::from_text("hello world");
        let block = &content.blocks()[0];
        let decorations = vec![DecoratedRange {
            start: 0,
            end: 5,
            kind: DecorationKind::Link,
            entity: None,
        }];
        let colors = ThemeColors::light();
        let job = block_job(block, &decorations, &colors, 15.0, 400.0);
        assert_eq!(job.sections.len(), 2);
        assert_eq!(job.sections[0].format.color, colors.text.link);
        assert_ne!(job.sections[0].format.underline, Stroke::NONE);
        assert_eq!(job.sections[1].format.underline, Stroke::NONE);
    }

    #[test]
    fn test_job_code_block_is_monospace() {
        let state = panel("let x = 1;");
        let next = state.document().toggle_block_type(&BlockType::CodeBlock);
        let block = &next.content().blocks()[0];
        let job = block_job(block, &[], &ThemeColors::light(), 15.0, 400.0);
        assert_eq!(job.sections[0].format.font_id.family, egui::FontFamily::Monospace);
    }

    #[test]
    fn test_job_italic_style() {
        let mut panel = panel("abc");
        let selection = panel.document().content().select(
            SelectionPoint::new(panel.document().content().blocks()[0].key().clone(), 0),
            SelectionPoint::new(panel.document().content().blocks()[0].key().clone(), 3),
        );
        let next = panel.document().with_selection(selection);
        panel.on_change(next);
        panel.toggle_inline_style(InlineStyle::Italic);
        let block = &panel.document().content().blocks()[0];
        let job = block_job(block, &[], &ThemeColors::light(), 15.0, 400.0);
        assert!(job.sections.iter().all(|s| s.format.italics));
    }

    #[test]
    fn test_empty_block_has_row() {
        let content = ContentState::from_text("");
        let job = block_job(&content.blocks()[0], &[], &ThemeColors::light(), 15.0, 400.0);
        assert_eq!(job.sections.len(), 1);
    }

    #[test]
    fn test_ordered_list_numbering() {
        let content = ContentState::from_text("a\nb\nc");
        let mut blocks = content.blocks().to_vec();
        for block in &mut blocks {
            block.set_block_type(BlockType::OrderedListItem);
        }
        assert_eq!(list_marker(&blocks, 0).as_deref(), Some("1."));
        assert_eq!(list_marker(&blocks, 2).as_deref(), Some("3."));
        blocks[1].set_depth(1);
        assert_eq!(list_marker(&blocks, 1).as_deref(), Some("1."));
        assert_eq!(list_marker(&blocks, 2).as_deref(), Some("2."));
    }

    #[test]
    fn test_selected_range_spans_blocks() {
        let content = ContentState::from_text("abc\ndef\nghi");
        let blocks = content.blocks();
        let selection = content.select(
            SelectionPoint::new(blocks[0].key().clone(), 1),
            SelectionPoint::new(blocks[2].key().clone(), 2),
        );
        assert_eq!(selected_range(&content, &selection, &blocks[0]), Some((1, 3)));
        assert_eq!(selected_range(&content, &selection, &blocks[1]), Some((0, 3)));
        assert_eq!(selected_range(&content, &selection, &blocks[2]), Some((0, 2)));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_records_layout_per_block() {
        let mut surface = DocumentSurface::new("surface");
        let mut panel = panel("one\ntwo\nthree");
        render(&mut surface, &mut panel);
        assert_eq!(surface.layouts.len(), 3);
        assert!(surface.layouts[0].rect.max.y <= surface.layouts[1].rect.min.y);
    }

    #[test]
    fn test_point_below_content_hits_last_block() {
        let mut surface = DocumentSurface::new("surface");
        let mut panel = panel("one\ntwo");
        render(&mut surface, &mut panel);
        let point = surface.point_at(Pos2::new(10_000.0, 10_000.0)).unwrap();
        assert_eq!(point.key, *panel.document().content().blocks()[1].key());
        assert_eq!(point.offset, 3);
    }

    #[test]
    fn test_render_media_blocks() {
        let mut surface = DocumentSurface::new("surface");
        let mut panel = panel("");
        panel.insert_picture(&[MediaDescriptor::new("https://cdn.test/t.png", "t.png")]);
        panel.insert_dash_line();
        render(&mut surface, &mut panel);
        assert!(surface.layouts.iter().any(|l| l.galley.is_none()));
    }
}
