//! Runtime theme switching.
//!
//! `ThemeManager` remembers the selected theme, rebuilds visuals when it
//! changes, and re-applies them when a `System` theme sees the OS flip
//! between light and dark.

use super::ThemeColors;
use crate::config::Theme;
use eframe::egui::{Context, Visuals};
use log::{debug, info};

#[derive(Debug, Clone)]
pub struct ThemeManager {
    current_theme: Theme,
    cached_visuals: Option<Visuals>,
    needs_apply: bool,
    last_system_dark_mode: Option<bool>,
}

impl ThemeManager {
    pub fn new(theme: Theme) -> Self {
        info!("ThemeManager initialized with theme: {:?}", theme);
        Self {
            current_theme: theme,
            cached_visuals: None,
            needs_apply: true,
            last_system_dark_mode: None,
        }
    }

    pub fn current_theme(&self) -> Theme {
        self.current_theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.current_theme != theme {
            info!("Theme changed from {:?} to {:?}", self.current_theme, theme);
            self.current_theme = theme;
            self.cached_visuals = None;
            self.needs_apply = true;
        }
    }

    /// Light → Dark → System → Light.
    pub fn cycle(&mut self) -> Theme {
        let next = match self.current_theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::System,
            Theme::System => Theme::Light,
        };
        self.set_theme(next);
        next
    }

    pub fn needs_apply(&self) -> bool {
        self.needs_apply
    }

    /// Apply visuals if the theme or, for `System`, the OS mode changed.
    /// Returns whether anything was applied.
    pub fn apply_if_needed(&mut self, ctx: &Context) -> bool {
        if self.current_theme == Theme::System {
            let system_dark = ctx.style().visuals.dark_mode;
            if self.last_system_dark_mode != Some(system_dark) {
                self.last_system_dark_mode = Some(system_dark);
                self.cached_visuals = None;
                self.needs_apply = true;
                debug!("System dark mode changed to: {}", system_dark);
            }
        }

        if !self.needs_apply {
            return false;
        }
        let visuals = match &self.cached_visuals {
            Some(visuals) => visuals.clone(),
            None => {
                let visuals = self.colors(ctx).to_visuals();
                self.cached_visuals = Some(visuals.clone());
                visuals
            }
        };
        ctx.set_visuals(visuals);
        self.needs_apply = false;
        debug!("Applied theme: {:?}", self.current_theme);
        true
    }

    /// Palette for the effective theme.
    pub fn colors(&self, ctx: &Context) -> ThemeColors {
        ThemeColors::from_theme(self.current_theme, &ctx.style().visuals)
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_needs_apply() {
        let manager = ThemeManager::new(Theme::Dark);
        assert_eq!(manager.current_theme(), Theme::Dark);
        assert!(manager.needs_apply());
    }

    #[test]
    fn test_cycle_visits_every_theme() {
        let mut manager = ThemeManager::new(Theme::Light);
        assert_eq!(manager.cycle(), Theme::Dark);
        assert_eq!(manager.cycle(), Theme::System);
        assert_eq!(manager.cycle(), Theme::Light);
    }

    #[test]
    fn test_apply_clears_flag() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Dark);
        assert!(manager.apply_if_needed(&ctx));
        assert!(!manager.needs_apply());
        assert!(!manager.apply_if_needed(&ctx));
        assert!(ctx.style().visuals.dark_mode);
    }

    #[test]
    fn test_set_same_theme_is_noop() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Light);
        manager.apply_if_needed(&ctx);
        manager.set_theme(Theme::Light);
        assert!(!manager.needs_apply());
    }
}
