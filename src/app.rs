//! Main application module for Inkpanel
//!
//! This module implements the eframe App trait: it lays out the title,
//! preface, control bar and document surface around one `EditorPanel`,
//! dispatches control bar and keyboard actions to the panel, and runs the
//! panel's after-render work once each frame is drawn.

use crate::config::{save_config_silent, Settings, WindowSize};
use crate::document::{DocumentModel, EntityType};
use crate::editor::{
    EditorHandle, EditorPanel, FocusTarget, MediaDescriptor, Notification, NotificationKind,
    ShowNotification,
};
use crate::export::{copy_html_to_clipboard, export_to_html_file, generate_html_document};
use crate::files::dialogs::{
    export_html_dialog, open_draft_dialog, pick_pictures_dialog, pick_video_dialog,
    save_draft_dialog,
};
use crate::files::{load_draft, save_draft, Draft};
use crate::theme::{ThemeColors, ThemeManager};
use crate::ui::{
    preface_panel, show_link_dialog, show_url_prompt, title_field, ButtonIcons, ControlAction,
    ControlBar, DocumentSurface, LinkDialogResult, ToolbarState,
};
use eframe::egui;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

const APP_NAME: &str = "Inkpanel";

/// How long a toast stays visible, in seconds.
const TOAST_SECONDS: f64 = 3.0;

/// Error toasts stay a little longer.
const ERROR_TOAST_SECONDS: f64 = 5.0;

/// Keyboard shortcut actions that need to be deferred.
///
/// These actions are detected in the input handling closure and executed
/// afterwards to avoid borrow conflicts.
#[derive(Debug, Clone, Copy)]
enum KeyboardAction {
    /// Save draft (Ctrl+S)
    Save,
    /// Save draft to a new file (Ctrl+Shift+S)
    SaveAs,
    /// Open draft (Ctrl+O)
    Open,
    /// New empty draft (Ctrl+N)
    New,
    /// Toggle link dialog (Ctrl+K)
    ToggleLink,
    /// Toggle preface (Ctrl+Shift+P)
    TogglePreface,
    /// Cycle theme (Ctrl+Shift+T)
    CycleTheme,
    /// Export as HTML (Ctrl+Shift+E)
    ExportHtml,
}

/// A message shown in the status bar until it expires.
#[derive(Debug, Clone)]
struct Toast {
    notification: Notification,
    expires_at: f64,
}

/// The main application struct that holds all state and implements eframe::App.
pub struct InkpanelApp {
    settings: Settings,
    settings_dirty: bool,
    panel: EditorPanel,
    theme_manager: ThemeManager,
    control_bar: ControlBar,
    button_icons: ButtonIcons,
    surface: DocumentSurface,
    /// Messages from the panel's notification hook
    notifications: Receiver<Notification>,
    toast: Option<Toast>,
    /// File the current draft was loaded from or saved to
    draft_path: Option<PathBuf>,
    /// Panel revision at the last save or load
    saved_revision: u64,
    last_window_size: Option<egui::Vec2>,
    start_time: std::time::Instant,
}

impl InkpanelApp {
    /// Create a new InkpanelApp from loaded settings.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        info!("Initializing {}", APP_NAME);

        let mut theme_manager = ThemeManager::new(settings.theme);
        theme_manager.apply_if_needed(&cc.egui_ctx);

        let (sender, notifications) = channel::<Notification>();
        let hook: ShowNotification = Box::new(move |kind, message| {
            if sender.send(Notification::new(kind, message)).is_err() {
                debug!("Notification dropped: {}", message);
            }
        });
        let panel = EditorPanel::new(settings.editor_props(Some(hook)), Default::default());

        let control_bar = ControlBar::new(&settings.editor.button_items);
        let button_icons = ButtonIcons::new(settings.editor.button_icons.clone());
        let saved_revision = panel.revision();

        Self {
            settings,
            settings_dirty: false,
            panel,
            theme_manager,
            control_bar,
            button_icons,
            surface: DocumentSurface::new("document_surface"),
            notifications,
            toast: None,
            draft_path: None,
            saved_revision,
            last_window_size: None,
            start_time: std::time::Instant::now(),
        }
    }

    /// Get elapsed time since app start in seconds.
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    fn is_modified(&self) -> bool {
        self.panel.revision() != self.saved_revision
    }

    /// "● Title - Inkpanel", with the dot only when modified.
    fn window_title(&self) -> String {
        let title = if self.panel.title().trim().is_empty() {
            "Untitled"
        } else {
            self.panel.title()
        };
        let marker = if self.is_modified() { "● " } else { "" };
        format!("{}{} - {}", marker, title, APP_NAME)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────

    fn show_toast(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let duration = if kind == NotificationKind::Error {
            ERROR_TOAST_SECONDS
        } else {
            TOAST_SECONDS
        };
        self.toast = Some(Toast {
            notification: Notification::new(kind, message),
            expires_at: self.get_app_time() + duration,
        });
    }

    /// Move pending panel notifications into the toast and expire old ones.
    fn update_toast(&mut self) {
        while let Ok(notification) = self.notifications.try_recv() {
            self.show_toast(notification.kind, notification.message);
        }
        let now = self.get_app_time();
        if self.toast.as_ref().map_or(false, |t| now >= t.expires_at) {
            self.toast = None;
        }
    }

    /// Track window size changes for persistence.
    fn update_window_state(&mut self, ctx: &egui::Context) {
        let (size, maximized) = ctx.input(|i| {
            let viewport = i.viewport();
            (
                viewport.inner_rect.map(|r| r.size()),
                viewport.maximized.unwrap_or(false),
            )
        });
        let Some(size) = size else {
            return;
        };
        let changed = self
            .last_window_size
            .map_or(true, |s| (s - size).length() > 1.0);
        if changed {
            self.last_window_size = Some(size);
            self.settings.window_size = WindowSize {
                width: size.x,
                height: size.y,
                maximized,
            };
            self.settings_dirty = true;
            debug!("Window size updated: {}x{}, maximized: {}", size.x, size.y, maximized);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn render_ui(&mut self, ctx: &egui::Context) -> Option<ControlAction> {
        let colors = self.theme_manager.colors(ctx);
        let font_size = self.settings.font_size;
        let focus = self.panel.take_focus_request();
        if focus == Some(FocusTarget::Surface) {
            self.surface.request_focus(ctx);
        }

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(toast) = &self.toast {
                    let color = colors.notification_color(toast.notification.kind);
                    ui.label(egui::RichText::new(&toast.notification.message).color(color));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let text = self.panel.document().view().plain_text();
                    ui.label(
                        egui::RichText::new(format!(
                            "{} words, {} chars",
                            text.split_whitespace().count(),
                            text.chars().filter(|c| *c != '\n').count()
                        ))
                        .small()
                        .color(colors.text.muted),
                    );
                    ui.label(
                        egui::RichText::new(self.theme_manager.current_theme().label())
                            .small()
                            .color(colors.text.muted),
                    );
                });
            });
        });

        // Title and preface
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(colors.base.background)
                    .inner_margin(egui::Margin::symmetric(24.0, 12.0)),
            )
            .show_separator_line(false)
            .show(ctx, |ui| {
                title_field(ui, &mut self.panel, font_size, focus == Some(FocusTarget::Title));
                ui.add_space(6.0);
                preface_panel(ui, &mut self.panel, &colors, font_size);
            });

        // Control bar
        let toolbar_state = ToolbarState {
            inline_style: self.panel.document().current_inline_style(),
            block_type: self.panel.document().current_block_type(),
            preface_visible: self.panel.is_preface_visible(),
            link_dialog_open: self.panel.link_dialog().is_open(),
            modal_open: self.panel.link_dialog().is_open() || self.panel.url_prompt().is_visible(),
        };
        let mut action = None;
        egui::TopBottomPanel::top("control_bar")
            .frame(egui::Frame::none().inner_margin(egui::Margin::ZERO))
            .show_separator_line(false)
            .show(ctx, |ui| {
                action = self
                    .control_bar
                    .show(ui, &colors, &toolbar_state, &mut self.button_icons);
            });

        // Document surface
        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(colors.base.background)
                    .inner_margin(egui::Margin::symmetric(24.0, 16.0)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.surface.show(ui, &mut self.panel, &colors, font_size);
                    });
            });

        self.render_dialogs(ctx, &colors, focus);
        action
    }

    fn render_dialogs(
        &mut self,
        ctx: &egui::Context,
        colors: &ThemeColors,
        focus: Option<FocusTarget>,
    ) {
        match show_link_dialog(
            ctx,
            self.panel.link_dialog_mut(),
            colors,
            focus == Some(FocusTarget::LinkDialog),
        ) {
            LinkDialogResult::Confirmed => {
                if let Err(e) = self.panel.confirm_link_dialog() {
                    debug!("Link rejected: {}", e);
                }
            }
            LinkDialogResult::Cancelled => self.panel.cancel_link_dialog(),
            LinkDialogResult::None => {}
        }

        let output = show_url_prompt(
            ctx,
            self.panel.url_prompt(),
            colors,
            focus == Some(FocusTarget::UrlInput),
        );
        if let Some(value) = output.value {
            self.panel.on_url_change(value);
        }
        if let Some(key) = output.key {
            if let Err(e) = self.panel.on_url_input_key(key) {
                debug!("Media URL rejected: {}", e);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_control_action(&mut self, action: ControlAction, ctx: &egui::Context) {
        debug!("Control bar action: {:?}", action);
        match action {
            ControlAction::ToggleInlineStyle(style) => self.panel.toggle_inline_style(style),
            ControlAction::ToggleBlockType(block_type) => {
                self.panel.toggle_block_type(&block_type)
            }
            ControlAction::Link => self.panel.toggle_link_dialog(),
            ControlAction::Picture => self.handle_insert_pictures(),
            ControlAction::Video => self.handle_insert_video(),
            ControlAction::MediaUrl => self.panel.prompt_for_media(EntityType::Image),
            ControlAction::Dash => self.panel.insert_dash_line(),
            ControlAction::SoftNewline => self.panel.insert_soft_newline(),
            ControlAction::Preface => self.panel.toggle_preface(),
            ControlAction::Save => self.handle_save_draft(false),
            ControlAction::ExportHtml => self.handle_export_html(ctx),
            ControlAction::CopyHtml => self.handle_copy_as_html(),
            ControlAction::CycleTheme => self.handle_cycle_theme(ctx),
        }
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let action = ctx.input(|i| {
            let ctrl = i.modifiers.command;
            let shift = i.modifiers.shift;

            if ctrl && shift && i.key_pressed(egui::Key::S) {
                debug!("Keyboard shortcut: Ctrl+Shift+S (Save As)");
                return Some(KeyboardAction::SaveAs);
            }
            if ctrl && !shift && i.key_pressed(egui::Key::S) {
                debug!("Keyboard shortcut: Ctrl+S (Save)");
                return Some(KeyboardAction::Save);
            }
            if ctrl && i.key_pressed(egui::Key::O) {
                debug!("Keyboard shortcut: Ctrl+O (Open)");
                return Some(KeyboardAction::Open);
            }
            if ctrl && i.key_pressed(egui::Key::N) {
                debug!("Keyboard shortcut: Ctrl+N (New)");
                return Some(KeyboardAction::New);
            }
            if ctrl && i.key_pressed(egui::Key::K) {
                debug!("Keyboard shortcut: Ctrl+K (Link)");
                return Some(KeyboardAction::ToggleLink);
            }
            if ctrl && shift && i.key_pressed(egui::Key::P) {
                debug!("Keyboard shortcut: Ctrl+Shift+P (Preface)");
                return Some(KeyboardAction::TogglePreface);
            }
            if ctrl && shift && i.key_pressed(egui::Key::T) {
                debug!("Keyboard shortcut: Ctrl+Shift+T (Cycle Theme)");
                return Some(KeyboardAction::CycleTheme);
            }
            if ctrl && shift && i.key_pressed(egui::Key::E) {
                debug!("Keyboard shortcut: Ctrl+Shift+E (Export HTML)");
                return Some(KeyboardAction::ExportHtml);
            }
            None
        });

        match action {
            Some(KeyboardAction::Save) => self.handle_save_draft(false),
            Some(KeyboardAction::SaveAs) => self.handle_save_draft(true),
            Some(KeyboardAction::Open) => self.handle_open_draft(),
            Some(KeyboardAction::New) => self.handle_new_draft(),
            Some(KeyboardAction::ToggleLink) => self.panel.toggle_link_dialog(),
            Some(KeyboardAction::TogglePreface) => self.panel.toggle_preface(),
            Some(KeyboardAction::CycleTheme) => self.handle_cycle_theme(ctx),
            Some(KeyboardAction::ExportHtml) => self.handle_export_html(ctx),
            None => {}
        }
    }

    fn handle_insert_pictures(&mut self) {
        let paths = pick_pictures_dialog(self.settings.last_draft_directory.as_ref());
        if paths.is_empty() {
            return;
        }
        let pictures: Vec<MediaDescriptor> =
            paths.iter().map(|p| MediaDescriptor::from_path(p)).collect();
        let inserted = self.panel.insert_picture(&pictures);
        info!("Inserted {} of {} pictures", inserted, pictures.len());
    }

    fn handle_insert_video(&mut self) {
        let Some(path) = pick_video_dialog(self.settings.last_draft_directory.as_ref()) else {
            return;
        };
        let video = MediaDescriptor::from_path(&path);
        if let Err(e) = self.panel.insert_video(&video) {
            self.panel.report(&e);
        }
    }

    fn handle_new_draft(&mut self) {
        self.panel
            .load_draft(String::new(), String::new(), Default::default());
        self.draft_path = None;
        self.saved_revision = self.panel.revision();
        info!("Started a new draft");
    }

    /// Save to the current draft file, asking for a path when there is none
    /// or `save_as` is set.
    fn handle_save_draft(&mut self, save_as: bool) {
        let draft = Draft::from_panel(&self.panel);
        let path = match (&self.draft_path, save_as) {
            (Some(path), false) => Some(path.clone()),
            _ => save_draft_dialog(
                self.settings.last_draft_directory.as_ref(),
                &draft.suggested_file_name(),
            ),
        };
        let Some(path) = path else {
            return;
        };

        match save_draft(&path, &draft) {
            Ok(()) => {
                self.remember_draft(&path);
                self.saved_revision = self.panel.revision();
                self.panel
                    .notify(NotificationKind::Success, &format!("Saved {}", path.display()));
            }
            Err(e) => {
                warn!("Failed to save draft: {}", e);
                self.panel.report(&e);
            }
        }
    }

    fn handle_open_draft(&mut self) {
        let Some(path) = open_draft_dialog(self.settings.last_draft_directory.as_ref()) else {
            return;
        };
        let opened = load_draft(&path).and_then(|draft| {
            let document = draft.to_document()?;
            Ok((draft, document))
        });
        match opened {
            Ok((draft, document)) => {
                self.panel.load_draft(draft.title, draft.summary, document);
                self.remember_draft(&path);
                self.saved_revision = self.panel.revision();
                info!("Opened draft: {}", path.display());
            }
            Err(e) => {
                warn!("Failed to open draft: {}", e);
                self.panel.report(&e);
            }
        }
    }

    fn remember_draft(&mut self, path: &std::path::Path) {
        self.draft_path = Some(path.to_path_buf());
        self.settings.add_recent_draft(path.to_path_buf());
        if let Some(parent) = path.parent() {
            self.settings.last_draft_directory = Some(parent.to_path_buf());
        }
        self.settings_dirty = true;
    }

    fn handle_export_html(&mut self, ctx: &egui::Context) {
        let theme_colors = self.theme_manager.colors(ctx);
        let html = match generate_html_document(
            self.panel.document().view(),
            self.panel.title(),
            self.panel.summary(),
            &theme_colors,
        ) {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to generate HTML: {}", e);
                self.panel.report(&e);
                return;
            }
        };

        let default_name = Draft::from_panel(&self.panel)
            .suggested_file_name()
            .replace(".json", ".html");
        let initial_dir = self
            .settings
            .last_export_directory
            .clone()
            .or_else(|| self.settings.last_draft_directory.clone());
        let Some(path) = export_html_dialog(initial_dir.as_ref(), &default_name) else {
            return;
        };

        match export_to_html_file(&html, &path) {
            Ok(()) => {
                if let Some(parent) = path.parent() {
                    self.settings.last_export_directory = Some(parent.to_path_buf());
                    self.settings_dirty = true;
                }
                self.panel
                    .notify(NotificationKind::Success, &format!("Exported to {}", path.display()));
            }
            Err(e) => {
                warn!("Failed to write HTML file: {}", e);
                self.panel.report(&e);
            }
        }
    }

    fn handle_copy_as_html(&mut self) {
        match copy_html_to_clipboard(self.panel.document().view()) {
            Ok(()) => {
                info!("Copied HTML to clipboard");
                self.panel
                    .notify(NotificationKind::Success, "HTML copied to clipboard");
            }
            Err(e) => {
                warn!("Failed to copy HTML to clipboard: {}", e);
                self.panel.report(&e);
            }
        }
    }

    fn handle_cycle_theme(&mut self, ctx: &egui::Context) {
        let theme = self.theme_manager.cycle();
        self.theme_manager.apply_if_needed(ctx);
        self.settings.theme = theme;
        self.settings_dirty = true;
        self.show_toast(NotificationKind::Info, format!("Theme: {}", theme.label()));
    }

    fn save_settings_if_dirty(&mut self) {
        if self.settings_dirty && save_config_silent(&self.settings) {
            self.settings_dirty = false;
        }
    }
}

impl eframe::App for InkpanelApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.panel.begin_frame();

        // Apply theme if needed (handles System theme changes)
        self.theme_manager.apply_if_needed(ctx);

        self.update_toast();
        self.update_window_state(ctx);
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.window_title()));

        self.handle_keyboard_shortcuts(ctx);

        if let Some(action) = self.render_ui(ctx) {
            self.handle_control_action(action, ctx);
        }

        // Deferred work runs once this frame is drawn
        if self.panel.run_after_render() || self.toast.is_some() {
            ctx.request_repaint();
        }
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.panel.shutdown();
        self.save_settings_if_dirty();
    }

    /// Save persistent state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        debug!("Saving application state");
        self.save_settings_if_dirty();
    }

    /// Auto-save interval in seconds.
    fn auto_save_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(30)
    }
}
