//! Modal dialogs for the editor panel.
//!
//! The link dialog edits a `LinkDescriptor`; the URL prompt collects a
//! media URL. Both draw from state owned by the panel and report what the
//! user did so the app can call the matching panel handler.

use crate::document::EntityType;
use crate::editor::{LinkDialog, PromptKey, UrlPrompt};
use crate::theme::ThemeColors;
use eframe::egui::{self, Key, RichText};

/// Result from showing the link dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDialogResult {
    /// Still open, nothing decided
    None,
    Confirmed,
    Cancelled,
}

/// What the user did in the URL prompt this frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlPromptOutput {
    /// New input value, when edited
    pub value: Option<String>,
    pub key: Option<PromptKey>,
}

fn dialog_frame(ctx: &egui::Context, colors: &ThemeColors) -> egui::Frame {
    egui::Frame::window(&ctx.style())
        .fill(colors.base.background)
        .stroke(egui::Stroke::new(1.0, colors.base.border))
        .rounding(8.0)
}

/// Show the link dialog if it is open.
pub fn show_link_dialog(
    ctx: &egui::Context,
    dialog: &mut LinkDialog,
    colors: &ThemeColors,
    focus_url: bool,
) -> LinkDialogResult {
    if !dialog.is_open() {
        return LinkDialogResult::None;
    }
    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        return LinkDialogResult::Cancelled;
    }

    let mut result = LinkDialogResult::None;
    let error = dialog.error().map(str::to_string);
    let disabled = dialog.form().disabled;

    egui::Window::new("🔗 Link")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(dialog_frame(ctx, colors))
        .show(ctx, |ui| {
            ui.set_min_width(360.0);
            ui.add_space(8.0);

            ui.label("Text");
            let form = dialog.form_mut();
            ui.add(
                egui::TextEdit::singleline(&mut form.text)
                    .hint_text("Link text")
                    .interactive(!disabled)
                    .desired_width(340.0),
            );

            ui.add_space(6.0);
            ui.label("URL");
            let url_response = ui.add(
                egui::TextEdit::singleline(&mut form.link)
                    .hint_text("https://")
                    .desired_width(340.0),
            );
            if focus_url {
                url_response.request_focus();
            }

            if let Some(error) = &error {
                ui.add_space(4.0);
                ui.colored_label(colors.ui.error, error.as_str());
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let submit =
                        url_response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                    if ui.button("Insert").clicked() || submit {
                        result = LinkDialogResult::Confirmed;
                    }
                    ui.add_space(8.0);
                    if ui.button("Cancel").clicked() {
                        result = LinkDialogResult::Cancelled;
                    }
                });
            });
            ui.add_space(4.0);
        });

    result
}

/// Show the media URL prompt if it is visible.
pub fn show_url_prompt(
    ctx: &egui::Context,
    prompt: &UrlPrompt,
    colors: &ThemeColors,
    focus_input: bool,
) -> UrlPromptOutput {
    let mut output = UrlPromptOutput::default();
    let Some((kind, value)) = prompt.pending() else {
        return output;
    };
    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        output.key = Some(PromptKey::Escape);
        return output;
    }

    let mut input = value.to_string();
    let title = match kind {
        EntityType::Image => "🖼 Picture URL".to_string(),
        EntityType::Video => "🎞 Video URL".to_string(),
        other => format!("🌐 {} URL", other.as_str()),
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(dialog_frame(ctx, colors))
        .show(ctx, |ui| {
            ui.set_min_width(360.0);
            ui.add_space(8.0);

            let response = ui.add(
                egui::TextEdit::singleline(&mut input)
                    .hint_text("https://")
                    .desired_width(340.0),
            );
            if focus_input {
                response.request_focus();
            }
            if response.changed() {
                output.value = Some(input.clone());
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                output.key = Some(PromptKey::Enter);
            }

            ui.add_space(6.0);
            ui.label(
                RichText::new("Press Enter to insert, Escape to cancel")
                    .small()
                    .color(colors.text.muted),
            );

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Insert").clicked() {
                        output.key = Some(PromptKey::Enter);
                    }
                    ui.add_space(8.0);
                    if ui.button("Cancel").clicked() {
                        output.key = Some(PromptKey::Escape);
                    }
                });
            });
            ui.add_space(4.0);
        });

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::LinkDescriptor;

    fn run<R>(f: impl FnOnce(&egui::Context) -> R) -> R {
        let ctx = egui::Context::default();
        let mut out = None;
        let mut f = Some(f);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            if let Some(f) = f.take() {
                out = Some(f(ctx));
            }
        });
        out.unwrap()
    }

    #[test]
    fn test_closed_link_dialog_shows_nothing() {
        let mut dialog = LinkDialog::new();
        let result = run(|ctx| show_link_dialog(ctx, &mut dialog, &ThemeColors::light(), false));
        assert_eq!(result, LinkDialogResult::None);
    }

    #[test]
    fn test_open_link_dialog_waits_for_input() {
        let mut dialog = LinkDialog::new();
        dialog.open(LinkDescriptor::new("hello", "https://x.test"));
        let result = run(|ctx| show_link_dialog(ctx, &mut dialog, &ThemeColors::dark(), true));
        assert_eq!(result, LinkDialogResult::None);
        assert!(dialog.is_open());
        assert_eq!(dialog.form().text, "hello");
    }

    #[test]
    fn test_hidden_prompt_reports_nothing() {
        let prompt = UrlPrompt::default();
        let output = run(|ctx| show_url_prompt(ctx, &prompt, &ThemeColors::light(), false));
        assert_eq!(output, UrlPromptOutput::default());
    }

    #[test]
    fn test_visible_prompt_without_input() {
        let mut prompt = UrlPrompt::default();
        prompt.prompt(EntityType::Image);
        let output = run(|ctx| show_url_prompt(ctx, &prompt, &ThemeColors::light(), true));
        assert!(output.value.is_none());
        assert!(output.key.is_none());
    }
}
