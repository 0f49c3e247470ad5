//! The editor panel: title, optional preface, document surface and the
//! dialogs hanging off them.
//!
//! `EditorPanel` owns the current document snapshot and routes every user
//! action through the `DocumentModel` interface. Handlers that can fail
//! report through the host's notification hook and also return the error,
//! so callers and tests can inspect it.

use super::handle::EditorHandle;
use super::input::SurfaceEvent;
use super::link::{validate_link_url, LinkDescriptor, LinkDialog};
use super::media::{MediaDescriptor, PromptKey, UrlPrompt};
use super::notify::{NotificationKind, ShowNotification};
use super::schedule::{AfterRender, DeferredTask, FocusTarget};
use crate::document::{
    BlockType, DocumentModel, DocumentState, EntityData, EntityType, HandleResult, InlineStyle,
    KeyCommand, Mutability, Selection, SelectionPoint,
};
use crate::error::{Error, Result};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Deepest list nesting reachable with Tab.
pub const DEFAULT_MAX_LIST_DEPTH: u8 = 4;

/// Atomic blocks carry a single placeholder character.
const ATOMIC_CHARACTER: &str = " ";

// ─────────────────────────────────────────────────────────────────────────────
// Props
// ─────────────────────────────────────────────────────────────────────────────

/// Host-supplied configuration for a panel.
pub struct EditorProps {
    pub title: String,
    pub summary: String,
    pub placeholder: String,
    pub title_placeholder: String,
    /// Control bar button ids, in display order
    pub button_items: Vec<String>,
    /// Icon image per button id
    pub button_icons: BTreeMap<String, PathBuf>,
    pub max_list_depth: u8,
    pub show_notification: Option<ShowNotification>,
}

impl Default for EditorProps {
    fn default() -> Self {
        Self {
            title: String::new(),
            summary: String::new(),
            placeholder: "Write something...".to_string(),
            title_placeholder: "Title".to_string(),
            button_items: Vec::new(),
            button_icons: BTreeMap::new(),
            max_list_depth: DEFAULT_MAX_LIST_DEPTH,
            show_notification: None,
        }
    }
}

impl fmt::Debug for EditorProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorProps")
            .field("title", &self.title)
            .field("summary", &self.summary)
            .field("placeholder", &self.placeholder)
            .field("title_placeholder", &self.title_placeholder)
            .field("button_items", &self.button_items)
            .field("button_icons", &self.button_icons)
            .field("max_list_depth", &self.max_list_depth)
            .field("show_notification", &self.show_notification.is_some())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Panel
// ─────────────────────────────────────────────────────────────────────────────

/// A rich-text editor panel over any `DocumentModel`.
pub struct EditorPanel<M: DocumentModel = DocumentState> {
    document: M,
    title: String,
    summary: String,
    placeholder: String,
    title_placeholder: String,
    button_items: Vec<String>,
    button_icons: BTreeMap<String, PathBuf>,
    max_list_depth: u8,
    notifier: Option<ShowNotification>,

    preface_visible: bool,
    focused: bool,
    focus_request: Option<FocusTarget>,
    link_dialog: LinkDialog,
    url_prompt: UrlPrompt,
    scheduler: AfterRender<DeferredTask>,
    /// Bumped on every document change
    revision: u64,
}

impl<M: DocumentModel> EditorPanel<M> {
    pub fn new(props: EditorProps, document: M) -> Self {
        Self {
            document,
            title: props.title,
            summary: props.summary,
            placeholder: props.placeholder,
            title_placeholder: props.title_placeholder,
            button_items: props.button_items,
            button_icons: props.button_icons,
            max_list_depth: props.max_list_depth,
            notifier: props.show_notification,
            preface_visible: false,
            focused: false,
            focus_request: None,
            link_dialog: LinkDialog::new(),
            url_prompt: UrlPrompt::default(),
            scheduler: AfterRender::new(),
            revision: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn document(&self) -> &M {
        &self.document
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn summary_mut(&mut self) -> &mut String {
        &mut self.summary
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn title_placeholder(&self) -> &str {
        &self.title_placeholder
    }

    pub fn button_items(&self) -> &[String] {
        &self.button_items
    }

    pub fn button_icons(&self) -> &BTreeMap<String, PathBuf> {
        &self.button_icons
    }

    pub fn is_preface_visible(&self) -> bool {
        self.preface_visible
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn link_dialog(&self) -> &LinkDialog {
        &self.link_dialog
    }

    pub fn link_dialog_mut(&mut self) -> &mut LinkDialog {
        &mut self.link_dialog
    }

    pub fn url_prompt(&self) -> &UrlPrompt {
        &self.url_prompt
    }

    /// Focus the UI should move this frame, consumed on read.
    pub fn take_focus_request(&mut self) -> Option<FocusTarget> {
        self.focus_request.take()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────

    /// Surface a message through the host's notification hook.
    pub fn notify(&self, kind: NotificationKind, message: &str) {
        match &self.notifier {
            Some(show) => show(kind, message),
            None => debug!("No notification hook for {} message: {}", kind, message),
        }
    }

    /// Log and surface an error.
    pub fn report(&self, error: &Error) {
        warn!("Editor operation failed ({}): {}", error.kind(), error);
        self.notify(NotificationKind::Error, &error.to_string());
    }

    fn reported(&self, result: Result<()>) -> Result<()> {
        if let Err(e) = &result {
            self.report(e);
        }
        result
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document Changes
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the current snapshot.
    pub fn on_change(&mut self, document: M) {
        self.document = document;
        self.revision += 1;
    }

    /// Run a named key command. Soft enter is always handled here; other
    /// commands go to the rich-editing handler.
    pub fn handle_key_command(&mut self, command: &KeyCommand) -> HandleResult {
        let next = match command {
            KeyCommand::SoftEnter => Some(self.document.insert_soft_newline()),
            other => self.document.handle_key_command(other),
        };
        match next {
            Some(document) => {
                self.on_change(document);
                HandleResult::Handled
            }
            None => HandleResult::NotHandled,
        }
    }

    /// Key command with the default editing behaviour as fallback.
    pub fn apply_key_command(&mut self, command: &KeyCommand) {
        if self.handle_key_command(command) == HandleResult::NotHandled {
            let next = self.document.apply_default_command(command);
            self.on_change(next);
        }
    }

    /// Indent (or with `shift`, outdent) list items.
    pub fn on_tab(&mut self, shift: bool) {
        let next = self.document.on_tab(shift, self.max_list_depth);
        self.on_change(next);
    }

    pub fn on_focus(&mut self) {
        if !self.focused {
            debug!("Editor surface focused");
        }
        self.focused = true;
    }

    pub fn on_blur(&mut self) {
        if self.focused {
            debug!("Editor surface blurred");
        }
        self.focused = false;
    }

    pub fn toggle_block_type(&mut self, block_type: &BlockType) {
        let next = self.document.toggle_block_type(block_type);
        self.on_change(next);
    }

    pub fn toggle_inline_style(&mut self, style: InlineStyle) {
        let next = self.document.toggle_inline_style(style);
        self.on_change(next);
    }

    pub fn insert_soft_newline(&mut self) {
        let next = self.document.insert_soft_newline();
        self.on_change(next);
        self.schedule_focus(FocusTarget::Surface);
    }

    /// Apply input forwarded by the document surface.
    pub fn apply_surface_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Text(text) => {
                let next = self.document.insert_characters(&text);
                self.on_change(next);
            }
            SurfaceEvent::Command(command) => self.apply_key_command(&command),
            SurfaceEvent::Tab { shift } => self.on_tab(shift),
            SurfaceEvent::Move { motion, extend } => {
                let next = self.document.move_selection(motion, extend);
                self.on_change(next);
            }
            SurfaceEvent::SelectAll => {
                let content = self.document.view();
                let selection = content.select(
                    content.selection_at_start().anchor().clone(),
                    content.selection_at_end().focus().clone(),
                );
                let next = self.document.with_selection(selection);
                self.on_change(next);
            }
            SurfaceEvent::Click { point, extend } => {
                let selection = if extend {
                    let anchor = self.document.current_selection().anchor().clone();
                    self.document.view().select(anchor, point)
                } else {
                    Selection::collapsed(point.key, point.offset)
                };
                let next = self.document.with_selection(selection);
                self.on_change(next);
            }
            SurfaceEvent::Drag(point) => {
                let anchor = self.document.current_selection().anchor().clone();
                let selection = self.document.view().select(anchor, point);
                let next = self.document.with_selection(selection);
                self.on_change(next);
            }
            SurfaceEvent::Focus => self.on_focus(),
            SurfaceEvent::Blur => self.on_blur(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Media
    // ─────────────────────────────────────────────────────────────────────────

    /// Embed each uploaded picture as its own atomic block, in order.
    /// Malformed descriptors are reported and skipped. Returns how many were
    /// inserted.
    pub fn insert_picture(&mut self, pictures: &[MediaDescriptor]) -> usize {
        let mut inserted = 0;
        for picture in pictures {
            if let Err(e) = picture.validate() {
                self.report(&e);
                continue;
            }
            self.embed(EntityType::Image, picture.entity_data());
            inserted += 1;
        }
        if inserted > 0 {
            info!("Inserted {} picture(s)", inserted);
            self.schedule_focus(FocusTarget::Surface);
        }
        inserted
    }

    /// Embed an uploaded video as an atomic block.
    pub fn insert_video(&mut self, video: &MediaDescriptor) -> Result<()> {
        let result = video.validate().map(|()| {
            self.embed(EntityType::Video, video.entity_data());
            self.schedule_focus(FocusTarget::Surface);
        });
        self.reported(result)
    }

    /// Insert a horizontal divider.
    pub fn insert_dash_line(&mut self) {
        self.embed(EntityType::Dash, EntityData::empty());
        self.schedule_focus(FocusTarget::Surface);
    }

    fn embed(&mut self, kind: EntityType, data: EntityData) {
        let (with_entity, key) = self
            .document
            .create_entity(kind, Mutability::Immutable, data);
        let next = with_entity.insert_atomic_block(key, ATOMIC_CHARACTER);
        self.on_change(next);
    }

    /// Show the URL prompt for embedding media of `kind` by address.
    pub fn prompt_for_media(&mut self, kind: EntityType) {
        debug!("Prompting for {} URL", kind.as_str());
        self.url_prompt.prompt(kind);
        self.schedule_focus(FocusTarget::UrlInput);
    }

    pub fn on_url_change(&mut self, value: impl Into<String>) {
        self.url_prompt.set_value(value);
    }

    /// Enter confirms, Escape cancels.
    pub fn on_url_input_key(&mut self, key: PromptKey) -> Result<()> {
        match key {
            PromptKey::Enter => self.confirm_media(),
            PromptKey::Escape => {
                self.cancel_media();
                Ok(())
            }
            PromptKey::Other => Ok(()),
        }
    }

    /// Embed the prompted URL and hide the prompt. An empty URL keeps the
    /// prompt open.
    pub fn confirm_media(&mut self) -> Result<()> {
        let result = self.try_confirm_media();
        self.reported(result)
    }

    fn try_confirm_media(&mut self) -> Result<()> {
        let Some((_, value)) = self.url_prompt.pending() else {
            return Ok(());
        };
        if value.trim().is_empty() {
            return Err(Error::MalformedUpload("media URL is empty".to_string()));
        }
        let Some((kind, value)) = self.url_prompt.take() else {
            return Ok(());
        };
        self.embed(
            kind,
            EntityData::Media {
                src: value.trim().to_string(),
                file: None,
            },
        );
        self.schedule_focus(FocusTarget::Surface);
        Ok(())
    }

    pub fn cancel_media(&mut self) {
        self.url_prompt.cancel();
        self.schedule_focus(FocusTarget::Surface);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Links
    // ─────────────────────────────────────────────────────────────────────────

    /// Descriptor for the link under the current selection.
    ///
    /// A range yields its text, the URL of a link starting it, and a locked
    /// text field. A cursor yields an empty editable text and the link
    /// stored on its block or under it.
    pub fn link_descriptor(&self) -> LinkDescriptor {
        let selection = self.document.current_selection();
        let start = selection.start();

        if !selection.is_collapsed() {
            return LinkDescriptor {
                text: self.document.selected_text(),
                link: self.link_url_at(start).unwrap_or_default(),
                disabled: true,
            };
        }

        let link = self
            .document
            .block_data(&start.key, "link")
            .map(str::to_string)
            .or_else(|| self.link_url_at(start))
            .or_else(|| {
                let before = start.offset.checked_sub(1)?;
                self.link_url_at(&SelectionPoint::new(start.key.clone(), before))
            })
            .unwrap_or_default();
        LinkDescriptor {
            text: String::new(),
            link,
            disabled: false,
        }
    }

    fn link_url_at(&self, point: &SelectionPoint) -> Option<String> {
        let key = self.document.entity_at(point)?;
        let entity = self.document.entity(key)?;
        if !entity.is_link() {
            return None;
        }
        entity.data.url().map(str::to_string)
    }

    /// Open the link dialog seeded from the current selection.
    pub fn show_link_dialog(&mut self) {
        let link = self.link_descriptor();
        debug!("Opening link dialog (disabled: {})", link.disabled);
        self.link_dialog.open(link);
        self.schedule_focus(FocusTarget::LinkDialog);
    }

    /// Apply a link: over a range the range becomes the link; at a cursor
    /// the descriptor's text is inserted as the link.
    pub fn insert_link(&mut self, link: &LinkDescriptor) -> Result<()> {
        let result = self.try_insert_link(link);
        self.reported(result)
    }

    fn try_insert_link(&mut self, link: &LinkDescriptor) -> Result<()> {
        validate_link_url(&link.link)?;
        let selection = self.document.current_selection().clone();
        if !self.document.is_valid_selection(&selection) {
            return Err(Error::InvalidSelection(
                "selection does not resolve against the document".to_string(),
            ));
        }
        if selection.is_collapsed() && link.text.is_empty() {
            return Err(Error::InvalidSelection(
                "a link at the cursor needs text".to_string(),
            ));
        }

        let (with_entity, key) = self.document.create_entity(
            EntityType::Link,
            Mutability::Mutable,
            EntityData::link(link.link.trim()),
        );
        let next = if selection.is_collapsed() {
            with_entity.insert_text(&link.text, Some(key))
        } else {
            with_entity.apply_entity(Some(key))
        };
        self.on_change(next);
        self.schedule_focus(FocusTarget::Surface);
        Ok(())
    }

    /// Confirm the open link dialog. A rejected link keeps the dialog open
    /// with the error shown.
    pub fn confirm_link_dialog(&mut self) -> Result<()> {
        let Some(link) = self.link_dialog.confirm() else {
            return Ok(());
        };
        let result = self.insert_link(&link);
        if let Err(e) = &result {
            self.link_dialog.open(link);
            self.link_dialog.set_error(e.to_string());
        }
        result
    }

    pub fn cancel_link_dialog(&mut self) {
        self.link_dialog.cancel();
        self.schedule_focus(FocusTarget::Surface);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Title and Preface
    // ─────────────────────────────────────────────────────────────────────────

    pub fn handle_title_change(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace title, summary and document, as when a draft is opened.
    /// Open dialogs are closed and the preface shows if there is a summary.
    /// Focus goes to the title while it is empty, otherwise to the surface.
    pub fn load_draft(&mut self, title: String, summary: String, document: M) {
        let target = if title.trim().is_empty() {
            FocusTarget::Title
        } else {
            FocusTarget::Surface
        };
        self.title = title;
        self.preface_visible = !summary.is_empty();
        self.summary = summary;
        self.link_dialog.cancel();
        self.url_prompt.cancel();
        self.on_change(document);
        self.schedule_focus(target);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // After-Render Work
    // ─────────────────────────────────────────────────────────────────────────

    fn schedule_focus(&mut self, target: FocusTarget) {
        if self.scheduler.schedule(DeferredTask::Focus(target)).is_none() {
            debug!("Focus request for {:?} dropped after shutdown", target);
        }
    }

    /// Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.scheduler.begin_frame();
    }

    /// Call once the frame is drawn. Runs deferred work whose render has
    /// completed. Returns whether work is still waiting for another frame.
    pub fn run_after_render(&mut self) -> bool {
        for task in self.scheduler.take_due() {
            match task {
                DeferredTask::Focus(FocusTarget::Surface) => self.focus(),
                DeferredTask::Focus(target) => self.focus_request = Some(target),
            }
        }
        self.scheduler.has_pending()
    }

    /// Cancel deferred work. The panel stays usable but schedules nothing
    /// further.
    pub fn shutdown(&mut self) {
        self.scheduler.shutdown();
    }
}

impl<M: DocumentModel> EditorHandle for EditorPanel<M> {
    fn focus(&mut self) {
        self.focus_request = Some(FocusTarget::Surface);
    }

    fn toggle_link_dialog(&mut self) {
        if self.link_dialog.is_open() {
            self.link_dialog.toggle();
        } else {
            self.show_link_dialog();
        }
    }

    fn toggle_preface(&mut self) {
        self.preface_visible = !self.preface_visible;
    }
}

impl<M: DocumentModel> Drop for EditorPanel<M> {
    fn drop(&mut self) {
        self.scheduler.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CompositeDecorator, ContentState};
    use crate::editor::block_style::{block_style_class, BlockStyleClass};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn panel_with(text: &str) -> EditorPanel {
        let document = DocumentState::create_with_content(
            ContentState::from_text(text),
            Arc::new(CompositeDecorator::with_links()),
        );
        EditorPanel::new(EditorProps::default(), document)
    }

    fn select(panel: &mut EditorPanel, start: usize, end: usize) {
        let key = panel.document().content().first_block().key().clone();
        let selection = panel.document().content().select(
            SelectionPoint::new(key.clone(), start),
            SelectionPoint::new(key, end),
        );
        let next = panel.document().with_selection(selection);
        panel.on_change(next);
    }

    fn recording_panel(text: &str) -> (EditorPanel, Rc<RefCell<Vec<(NotificationKind, String)>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let props = EditorProps {
            show_notification: Some(Box::new(move |kind, message| {
                sink.borrow_mut().push((kind, message.to_string()))
            })),
            ..EditorProps::default()
        };
        let document = DocumentState::create_with_content(
            ContentState::from_text(text),
            Arc::new(CompositeDecorator::with_links()),
        );
        (EditorPanel::new(props, document), seen)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Style toggles
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_inline_style_toggle_twice_restores_styles() {
        let mut panel = panel_with("hello world");
        select(&mut panel, 0, 5);
        let before = panel.document().content().clone();

        panel.toggle_inline_style(InlineStyle::Bold);
        assert!(panel.document().content().first_block().style_at(0).contains(&InlineStyle::Bold));

        panel.toggle_inline_style(InlineStyle::Bold);
        assert_eq!(panel.document().content(), &before);
    }

    #[test]
    fn test_block_type_toggle_twice_restores_type() {
        let mut panel = panel_with("quote me");
        panel.toggle_block_type(&BlockType::Blockquote);
        assert_eq!(panel.document().current_block_type(), BlockType::Blockquote);
        panel.toggle_block_type(&BlockType::Blockquote);
        assert_eq!(panel.document().current_block_type(), BlockType::Unstyled);
    }

    #[test]
    fn test_code_block_classification() {
        let mut panel = panel_with("let x = 1;");
        panel.toggle_block_type(&BlockType::CodeBlock);
        let block = panel.document().content().first_block();
        assert_eq!(block_style_class(block.block_type()), BlockStyleClass::Code);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Key commands
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_soft_enter_always_handled() {
        let mut panel = panel_with("line");
        select(&mut panel, 4, 4);
        let revision = panel.revision();

        assert_eq!(
            panel.handle_key_command(&KeyCommand::SoftEnter),
            HandleResult::Handled
        );
        assert_eq!(panel.document().content().first_block().text(), "line\n");
        assert!(panel.revision() > revision);

        // Even on an empty document
        let mut empty = panel_with("");
        assert_eq!(
            empty.handle_key_command(&KeyCommand::SoftEnter),
            HandleResult::Handled
        );
    }

    #[test]
    fn test_unknown_command_not_handled() {
        let mut panel = panel_with("text");
        assert_eq!(
            panel.handle_key_command(&KeyCommand::Custom("noop".into())),
            HandleResult::NotHandled
        );
    }

    #[test]
    fn test_apply_key_command_falls_back_to_default() {
        let mut panel = panel_with("ab");
        select(&mut panel, 2, 2);
        panel.apply_key_command(&KeyCommand::Backspace);
        assert_eq!(panel.document().content().plain_text(), "a");
    }

    #[test]
    fn test_tab_respects_max_depth() {
        let mut panel = panel_with("one\ntwo");
        let second = panel.document().content().blocks()[1].key().clone();
        panel.apply_surface_event(SurfaceEvent::SelectAll);
        panel.toggle_block_type(&BlockType::UnorderedListItem);
        let next = panel
            .document()
            .with_selection(Selection::collapsed(second.clone(), 0));
        panel.on_change(next);

        for _ in 0..10 {
            panel.on_tab(false);
        }
        let depth = panel.document().content().block_for_key(&second).map(|b| b.depth());
        assert_eq!(depth, Some(1));
        panel.on_tab(true);
        let depth = panel.document().content().block_for_key(&second).map(|b| b.depth());
        assert_eq!(depth, Some(0));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Media
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_insert_two_pictures_in_order() {
        let mut panel = panel_with("");
        let pictures = [
            MediaDescriptor::new("t1.png", "s1.png"),
            MediaDescriptor::new("t2.png", "s2.png"),
        ];
        assert_eq!(panel.insert_picture(&pictures), 2);

        let content = panel.document().content();
        let atomics: Vec<_> = content
            .blocks()
            .iter()
            .filter(|b| *b.block_type() == BlockType::Atomic)
            .collect();
        assert_eq!(atomics.len(), 2);

        for (block, picture) in atomics.iter().zip(pictures.iter()) {
            let entity = block.entity_at(0).and_then(|k| content.entity(k)).unwrap();
            assert_eq!(entity.entity_type, EntityType::Image);
            assert_eq!(entity.mutability, Mutability::Immutable);
            assert_eq!(entity.data, picture.entity_data());
        }
    }

    #[test]
    fn test_malformed_picture_is_skipped_and_reported() {
        let (mut panel, seen) = recording_panel("");
        let pictures = [
            MediaDescriptor::new("", "s1.png"),
            MediaDescriptor::new("t2.png", "s2.png"),
        ];
        assert_eq!(panel.insert_picture(&pictures), 1);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, NotificationKind::Error);
    }

    #[test]
    fn test_insert_video_and_dash() {
        let mut panel = panel_with("");
        panel
            .insert_video(&MediaDescriptor::new("v.jpg", "v.mp4"))
            .unwrap();
        panel.insert_dash_line();

        let content = panel.document().content();
        let kinds: Vec<_> = content
            .blocks()
            .iter()
            .filter_map(|b| b.entity_at(0))
            .filter_map(|k| content.entity(k))
            .map(|e| e.entity_type.clone())
            .collect();
        assert_eq!(kinds, vec![EntityType::Video, EntityType::Dash]);
    }

    #[test]
    fn test_insert_with_cursor_on_picture_keeps_picture_atomic() {
        let mut panel = panel_with("text");
        panel.insert_picture(&[MediaDescriptor::new("t1.png", "s1.png")]);
        let picture_key = panel
            .document()
            .content()
            .blocks()
            .iter()
            .find(|b| *b.block_type() == BlockType::Atomic)
            .map(|b| b.key().clone())
            .unwrap();

        panel.apply_surface_event(SurfaceEvent::Click {
            point: SelectionPoint::new(picture_key.clone(), 0),
            extend: false,
        });
        panel.insert_dash_line();

        let content = panel.document().content();
        let kinds: Vec<_> = content
            .blocks()
            .iter()
            .filter_map(|b| {
                let entity = b.entity_at(0).and_then(|k| content.entity(k))?;
                Some((b.block_type().clone(), entity.entity_type.clone()))
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                (BlockType::Atomic, EntityType::Dash),
                (BlockType::Atomic, EntityType::Image),
            ]
        );
        let picture = content.block_for_key(&picture_key).unwrap();
        assert_eq!(picture.block_type(), &BlockType::Atomic);
        assert_eq!(picture.text(), ATOMIC_CHARACTER);
        assert_eq!(content.blocks().last().unwrap().text(), "text");
    }

    #[test]
    fn test_url_prompt_confirm_embeds_media() {
        let mut panel = panel_with("");
        panel.prompt_for_media(EntityType::Image);
        assert!(panel.url_prompt().is_visible());

        panel.on_url_change("https://cdn.test/p.png");
        panel.on_url_input_key(PromptKey::Enter).unwrap();
        assert!(!panel.url_prompt().is_visible());

        let content = panel.document().content();
        let entity = content
            .blocks()
            .iter()
            .find(|b| *b.block_type() == BlockType::Atomic)
            .and_then(|b| b.entity_at(0))
            .and_then(|k| content.entity(k))
            .unwrap();
        assert_eq!(entity.data.src(), Some("https://cdn.test/p.png"));
    }

    #[test]
    fn test_url_prompt_empty_value_stays_open() {
        let (mut panel, seen) = recording_panel("");
        panel.prompt_for_media(EntityType::Video);
        assert!(panel.confirm_media().is_err());
        assert!(panel.url_prompt().is_visible());
        assert_eq!(seen.borrow().len(), 1);

        panel.on_url_input_key(PromptKey::Escape).unwrap();
        assert!(!panel.url_prompt().is_visible());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Links
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_link_descriptor_for_linked_range() {
        let mut panel = panel_with("hello world");
        select(&mut panel, 0, 5);
        panel
            .insert_link(&LinkDescriptor::new("", "https://x.test"))
            .unwrap();
        select(&mut panel, 0, 5);

        assert_eq!(
            panel.link_descriptor(),
            LinkDescriptor {
                text: "hello".into(),
                link: "https://x.test".into(),
                disabled: true,
            }
        );
    }

    #[test]
    fn test_link_descriptor_at_cursor_is_editable() {
        let mut panel = panel_with("plain");
        select(&mut panel, 2, 2);
        let link = panel.link_descriptor();
        assert_eq!(link.text, "");
        assert_eq!(link.link, "");
        assert!(!link.disabled);
    }

    #[test]
    fn test_insert_link_over_range() {
        let mut panel = panel_with("hello world");
        select(&mut panel, 6, 11);
        panel
            .insert_link(&LinkDescriptor::new("", "https://y.test"))
            .unwrap();

        let content = panel.document().content();
        let block = content.first_block();
        assert_eq!(block.text(), "hello world");
        let ranges = block.find_entity_ranges(|meta| meta.entity.is_some());
        assert_eq!(ranges, vec![(6, 11)]);
        let entity = block.entity_at(6).and_then(|k| content.entity(k)).unwrap();
        assert!(entity.is_link());
        assert_eq!(entity.mutability, Mutability::Mutable);
        assert_eq!(entity.data.url(), Some("https://y.test"));
    }

    #[test]
    fn test_insert_link_at_cursor_inserts_text() {
        let mut panel = panel_with("ab");
        select(&mut panel, 1, 1);
        panel
            .insert_link(&LinkDescriptor::new("new", "https://z.test"))
            .unwrap();

        let content = panel.document().content();
        let block = content.first_block();
        assert_eq!(block.text(), "anewb");
        let ranges = block.find_entity_ranges(|meta| meta.entity.is_some());
        assert_eq!(ranges, vec![(1, 4)]);
        let entity = block.entity_at(1).and_then(|k| content.entity(k)).unwrap();
        assert!(entity.is_link());
        assert_eq!(entity.mutability, Mutability::Mutable);
        assert_eq!(entity.data.url(), Some("https://z.test"));
    }

    #[test]
    fn test_insert_link_rejects_bad_url() {
        let (mut panel, seen) = recording_panel("text");
        select(&mut panel, 0, 4);
        let before = panel.document().clone();
        let result = panel.insert_link(&LinkDescriptor::new("", "nope nope"));
        assert!(matches!(result, Err(Error::InvalidLink(_))));
        assert_eq!(panel.document(), &before);
        assert_eq!(seen.borrow()[0].0, NotificationKind::Error);
    }

    #[test]
    fn test_link_dialog_round_trip() {
        let mut panel = panel_with("hello");
        select(&mut panel, 0, 5);
        panel.toggle_link_dialog();
        assert!(panel.link_dialog().is_open());
        assert!(panel.link_dialog().form().disabled);

        panel.link_dialog_mut().form_mut().link = "https://x.test".into();
        panel.confirm_link_dialog().unwrap();
        assert!(!panel.link_dialog().is_open());
        assert!(panel.document().content().first_block().entity_at(0).is_some());
    }

    #[test]
    fn test_link_dialog_keeps_open_on_error() {
        let mut panel = panel_with("hello");
        select(&mut panel, 0, 5);
        panel.show_link_dialog();
        assert!(panel.confirm_link_dialog().is_err());
        assert!(panel.link_dialog().is_open());
        assert!(panel.link_dialog().error().is_some());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Focus, preface and deferred work
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_focus_is_deferred_until_after_render() {
        let mut panel = panel_with("");
        panel.insert_dash_line();
        panel.run_after_render();
        assert_eq!(panel.take_focus_request(), None);

        panel.begin_frame();
        assert!(!panel.run_after_render());
        assert_eq!(panel.take_focus_request(), Some(FocusTarget::Surface));
    }

    #[test]
    fn test_load_draft_focuses_empty_title() {
        let mut panel = panel_with("old");
        panel.load_draft(String::new(), String::new(), panel_with("").document().clone());
        panel.begin_frame();
        panel.run_after_render();
        assert_eq!(panel.take_focus_request(), Some(FocusTarget::Title));

        panel.load_draft(
            "Notes".to_string(),
            "intro".to_string(),
            panel_with("body").document().clone(),
        );
        panel.begin_frame();
        panel.run_after_render();
        assert_eq!(panel.take_focus_request(), Some(FocusTarget::Surface));
        assert_eq!(panel.title(), "Notes");
        assert!(panel.is_preface_visible());
    }

    #[test]
    fn test_shutdown_cancels_pending_focus() {
        let mut panel = panel_with("");
        panel.prompt_for_media(EntityType::Image);
        panel.shutdown();
        panel.begin_frame();
        panel.run_after_render();
        assert_eq!(panel.take_focus_request(), None);
    }

    #[test]
    fn test_preface_and_title() {
        let mut panel = panel_with("");
        assert!(!panel.is_preface_visible());
        panel.toggle_preface();
        assert!(panel.is_preface_visible());
        panel.summary_mut().push_str("short summary");
        assert_eq!(panel.summary(), "short summary");

        panel.handle_title_change("A title");
        assert_eq!(panel.title(), "A title");
    }

    #[test]
    fn test_focus_blur() {
        let mut panel = panel_with("");
        panel.apply_surface_event(SurfaceEvent::Focus);
        assert!(panel.is_focused());
        panel.apply_surface_event(SurfaceEvent::Blur);
        assert!(!panel.is_focused());
    }
}
