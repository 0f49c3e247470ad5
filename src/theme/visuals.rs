//! egui `Visuals` built from a palette.

use super::ThemeColors;
use eframe::egui::{self, Color32, Rounding, Stroke, Visuals};

const ROUNDING: f32 = 4.0;

/// Create egui visuals for `colors`, starting from egui's light or dark
/// defaults to match.
pub fn create_visuals(colors: &ThemeColors) -> Visuals {
    let dark = colors.is_dark();
    let mut visuals = if dark { Visuals::dark() } else { Visuals::light() };

    // Window & Panel Background
    visuals.panel_fill = colors.base.background;
    visuals.window_fill = colors.base.background;
    visuals.extreme_bg_color = colors.base.background_tertiary;
    visuals.faint_bg_color = colors.base.background_secondary;
    visuals.code_bg_color = colors.document.code_block_bg;

    // Text
    visuals.override_text_color = None;
    visuals.warn_fg_color = colors.ui.warning;
    visuals.error_fg_color = colors.ui.error;
    visuals.hyperlink_color = colors.text.link;

    visuals.selection.bg_fill = colors.base.selected;
    visuals.selection.stroke = Stroke::new(1.0, colors.ui.accent);

    // Widgets
    let widgets = &mut visuals.widgets;
    widgets.noninteractive.bg_fill = colors.base.background_secondary;
    widgets.noninteractive.weak_bg_fill = colors.base.background_tertiary;
    widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors.base.border_subtle);
    widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.text.primary);

    widgets.inactive.bg_fill = colors.base.background_secondary;
    widgets.inactive.weak_bg_fill = colors.base.background_secondary;
    widgets.inactive.bg_stroke = Stroke::new(1.0, colors.base.border);
    widgets.inactive.fg_stroke = Stroke::new(1.0, colors.text.secondary);

    widgets.hovered.bg_fill = colors.base.hover;
    widgets.hovered.weak_bg_fill = colors.base.hover;
    widgets.hovered.bg_stroke = Stroke::new(1.0, colors.ui.accent);
    widgets.hovered.fg_stroke = Stroke::new(1.5, colors.text.primary);

    widgets.active.bg_fill = colors.ui.accent;
    widgets.active.weak_bg_fill = colors.base.selected;
    widgets.active.bg_stroke = Stroke::new(1.0, colors.ui.accent_hover);
    widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);

    widgets.open.bg_fill = colors.base.selected;
    widgets.open.weak_bg_fill = colors.base.selected;
    widgets.open.bg_stroke = Stroke::new(1.0, colors.ui.accent);
    widgets.open.fg_stroke = Stroke::new(1.0, colors.text.primary);

    for state in [
        &mut widgets.noninteractive,
        &mut widgets.inactive,
        &mut widgets.hovered,
        &mut widgets.active,
        &mut widgets.open,
    ] {
        state.rounding = Rounding::same(ROUNDING);
    }

    // Windows & popups
    visuals.window_rounding = Rounding::same(ROUNDING * 2.0);
    visuals.window_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 2.0),
        blur: 8.0,
        spread: 0.0,
        color: Color32::from_black_alpha(if dark { 60 } else { 25 }),
    };
    visuals.window_stroke = Stroke::new(1.0, colors.base.border);
    visuals.menu_rounding = Rounding::same(ROUNDING);

    visuals.button_frame = true;
    visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);
    visuals.dark_mode = dark;

    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_visuals() {
        let colors = ThemeColors::light();
        let visuals = create_visuals(&colors);
        assert!(!visuals.dark_mode);
        assert!(visuals.panel_fill.r() > 200);
        assert_eq!(
            visuals.widgets.noninteractive.fg_stroke.color,
            colors.text.primary
        );
    }

    #[test]
    fn test_dark_visuals() {
        let visuals = create_visuals(&ThemeColors::dark());
        assert!(visuals.dark_mode);
        assert!(visuals.panel_fill.r() < 60);
        assert_ne!(visuals.selection.bg_fill, visuals.panel_fill);
    }
}
