//! Title field and preface panel shown above the control bar.

use crate::document::DocumentModel;
use crate::editor::EditorPanel;
use crate::theme::ThemeColors;
use eframe::egui::{self, FontId, Response, Ui};

/// Rows of the preface text area.
const PREFACE_ROWS: usize = 3;

/// Render the title input. Returns its response; edits go through
/// `handle_title_change`.
pub fn title_field<M: DocumentModel>(
    ui: &mut Ui,
    panel: &mut EditorPanel<M>,
    font_size: f32,
    request_focus: bool,
) -> Response {
    let mut title = panel.title().to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut title)
            .hint_text(panel.title_placeholder())
            .font(FontId::proportional(font_size * 1.8))
            .frame(false)
            .desired_width(f32::INFINITY),
    );
    if request_focus {
        response.request_focus();
    }
    if response.changed() {
        panel.handle_title_change(title);
    }
    response
}

/// Render the preface area when it is visible.
pub fn preface_panel<M: DocumentModel>(
    ui: &mut Ui,
    panel: &mut EditorPanel<M>,
    colors: &ThemeColors,
    font_size: f32,
) -> Option<Response> {
    if !panel.is_preface_visible() {
        return None;
    }

    let frame = egui::Frame::none()
        .fill(colors.base.background_secondary)
        .stroke(egui::Stroke::new(1.0, colors.base.border_subtle))
        .rounding(4.0)
        .inner_margin(egui::Margin::symmetric(8.0, 6.0));
    let inner = frame.show(ui, |ui| {
        ui.add(
            egui::TextEdit::multiline(panel.summary_mut())
                .hint_text("Preface")
                .font(FontId::proportional(font_size * 0.95))
                .text_color(colors.text.secondary)
                .frame(false)
                .desired_rows(PREFACE_ROWS)
                .desired_width(f32::INFINITY),
        )
    });
    Some(inner.inner)
}
