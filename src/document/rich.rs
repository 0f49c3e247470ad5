//! Rich-editing transforms on snapshots: style toggles, links, soft
//! newlines, key commands and list indentation.
//!
//! Each function takes the current snapshot and returns the next one. An
//! invalid selection leaves the snapshot unchanged.

use super::block::{BlockType, InlineStyle};
use super::command::KeyCommand;
use super::entity::EntityKey;
use super::modifier;
use super::selection::Selection;
use super::state::{ChangeType, DocumentState};
use log::debug;

/// Toggle `style` on the selection.
///
/// A collapsed selection toggles the pending style for the next typed
/// characters. A range gains the style unless every character already has
/// it, in which case the style is removed.
pub fn toggle_inline_style(state: &DocumentState, style: InlineStyle) -> DocumentState {
    if !state.has_valid_selection() {
        debug!("toggle_inline_style({:?}) ignored: invalid selection", style);
        return state.clone();
    }
    let selection = state.selection();
    if selection.is_collapsed() {
        let mut current = state.current_inline_style();
        if !current.remove(&style) {
            current.insert(style);
        }
        return state.with_style_override(current);
    }

    let mut content = state.content().clone();
    let has_style = modifier::range_has_style(&content, selection, style);
    modifier::apply_inline_style(&mut content, selection, style, !has_style);
    state.push(content, selection.clone(), ChangeType::ChangeInlineStyle)
}

/// Toggle the type of the selected blocks between `block_type` and
/// unstyled. Selections touching an atomic block are left alone.
pub fn toggle_block_type(state: &DocumentState, block_type: &BlockType) -> DocumentState {
    if !state.has_valid_selection() {
        debug!("toggle_block_type({}) ignored: invalid selection", block_type);
        return state.clone();
    }
    let content = state.content();
    let selection = state.selection();
    let (Some(si), Some(ei)) = (
        content.block_index(&selection.start().key),
        content.block_index(&selection.end().key),
    ) else {
        return state.clone();
    };
    if content.blocks()[si..=ei]
        .iter()
        .any(|b| *b.block_type() == BlockType::Atomic)
    {
        return state.clone();
    }

    let target = if content.blocks()[si].block_type() == block_type {
        BlockType::Unstyled
    } else {
        block_type.clone()
    };
    let mut next = content.clone();
    modifier::set_block_type(&mut next, selection, &target);
    state.push(next, selection.clone(), ChangeType::ChangeBlockType)
}

/// Attach `entity` to the characters of `selection` (or detach with `None`).
pub fn toggle_link(
    state: &DocumentState,
    selection: &Selection,
    entity: Option<EntityKey>,
) -> DocumentState {
    if !state.content().is_valid_selection(selection) {
        return state.clone();
    }
    let mut content = state.content().clone();
    modifier::apply_entity(&mut content, selection, entity);
    state.push(content, state.selection().clone(), ChangeType::ApplyEntity)
}

/// Insert a line break inside the current block.
pub fn insert_soft_newline(state: &DocumentState) -> DocumentState {
    if !state.has_valid_selection() {
        return state.clone();
    }
    let style = state.current_inline_style();
    let mut content = state.content().clone();
    let at = modifier::remove_range(&mut content, state.selection());
    let after = modifier::insert_text(&mut content, &at, "\n", &style, None);
    state.push(
        content,
        Selection::collapsed(after.key, after.offset),
        ChangeType::InsertCharacters,
    )
}

/// Rich handling for a key command. `None` means the command should fall
/// through to plain editing.
pub fn handle_key_command(state: &DocumentState, command: &KeyCommand) -> Option<DocumentState> {
    if !state.has_valid_selection() {
        return None;
    }
    match command {
        KeyCommand::Bold => Some(toggle_inline_style(state, InlineStyle::Bold)),
        KeyCommand::Italic => Some(toggle_inline_style(state, InlineStyle::Italic)),
        KeyCommand::Underline => Some(toggle_inline_style(state, InlineStyle::Underline)),
        KeyCommand::Code => Some(toggle_inline_style(state, InlineStyle::Code)),
        KeyCommand::Strikethrough => Some(toggle_inline_style(state, InlineStyle::Strikethrough)),
        KeyCommand::Backspace | KeyCommand::BackspaceWord => on_backspace(state),
        KeyCommand::Delete => on_delete(state),
        KeyCommand::SoftEnter | KeyCommand::SplitBlock | KeyCommand::Custom(_) => None,
    }
}

/// Backspace at the start of a block: drop an atomic block above, or reset
/// a styled block to a paragraph.
fn on_backspace(state: &DocumentState) -> Option<DocumentState> {
    let selection = state.selection();
    if !selection.is_collapsed() || selection.start().offset != 0 {
        return None;
    }
    let content = state.content();
    let key = &selection.start().key;
    let index = content.block_index(key)?;
    let block = &content.blocks()[index];

    if let Some(above) = content.block_before(key) {
        if *above.block_type() == BlockType::Atomic {
            let mut next = content.clone();
            modifier::remove_block(&mut next, index - 1);
            return Some(state.push(next, selection.clone(), ChangeType::RemoveRange));
        }
    }

    if !block.is_empty() && index != 0 {
        return None;
    }
    if *block.block_type() == BlockType::CodeBlock {
        if let Some(above) = content.block_before(key) {
            if *above.block_type() == BlockType::CodeBlock && !above.is_empty() {
                return None;
            }
        }
    }
    if *block.block_type() == BlockType::Unstyled {
        return None;
    }

    let mut next = content.clone();
    modifier::set_block_type(&mut next, selection, &BlockType::Unstyled);
    Some(state.push(next, selection.clone(), ChangeType::ChangeBlockType))
}

/// Delete at the end of a block directly above an atomic block removes it.
fn on_delete(state: &DocumentState) -> Option<DocumentState> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return None;
    }
    let content = state.content();
    let key = &selection.start().key;
    let index = content.block_index(key)?;
    if selection.start().offset != content.blocks()[index].len() {
        return None;
    }
    let below = content.block_after(key)?;
    if *below.block_type() != BlockType::Atomic {
        return None;
    }
    let mut next = content.clone();
    modifier::remove_block(&mut next, index + 1);
    Some(state.push(next, selection.clone(), ChangeType::RemoveRange))
}

/// Indent (or outdent with `shift`) list items, up to `max_depth`.
pub fn on_tab(state: &DocumentState, shift: bool, max_depth: u8) -> DocumentState {
    if !state.has_valid_selection() {
        return state.clone();
    }
    let mut content = state.content().clone();
    let delta = if shift { -1 } else { 1 };
    if modifier::adjust_depth(&mut content, state.selection(), delta, max_depth) {
        state.push(content, state.selection().clone(), ChangeType::AdjustDepth)
    } else {
        state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::content::ContentState;
    use crate::document::decorator::CompositeDecorator;
    use crate::document::entity::{EntityData, EntityType, Mutability};
    use crate::document::selection::SelectionPoint;
    use std::sync::Arc;

    fn state_from(text: &str) -> DocumentState {
        DocumentState::create_with_content(
            ContentState::from_text(text),
            Arc::new(CompositeDecorator::with_links()),
        )
    }

    fn select(state: &DocumentState, block: usize, from: usize, to: usize) -> DocumentState {
        let key = state.content().blocks()[block].key().clone();
        let sel = state.content().select(
            SelectionPoint::new(key.clone(), from),
            SelectionPoint::new(key, to),
        );
        state.force_selection(sel)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inline Styles
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_toggle_inline_style_twice_on_collapsed_cursor() {
        let state = select(&state_from("hello"), 0, 3, 3);
        let original = state.current_inline_style();
        let once = toggle_inline_style(&state, InlineStyle::Italic);
        assert!(once.current_inline_style().contains(&InlineStyle::Italic));
        let twice = toggle_inline_style(&once, InlineStyle::Italic);
        assert_eq!(twice.current_inline_style(), original);
    }

    #[test]
    fn test_toggle_inline_style_twice_on_range() {
        let state = select(&state_from("hello"), 0, 1, 4);
        let once = toggle_inline_style(&state, InlineStyle::Bold);
        assert!(once.content().first_block().style_at(2).contains(&InlineStyle::Bold));
        assert!(!once.content().first_block().style_at(0).contains(&InlineStyle::Bold));
        let twice = toggle_inline_style(&once, InlineStyle::Bold);
        assert_eq!(twice.content(), state.content());
    }

    #[test]
    fn test_toggle_inline_style_invalid_selection_is_noop() {
        let state = state_from("hello")
            .force_selection(Selection::collapsed(crate::document::block::BlockKey::new("gone"), 0));
        let next = toggle_inline_style(&state, InlineStyle::Bold);
        assert_eq!(next, state);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Block Types
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_toggle_block_type_on_and_off() {
        let state = state_from("quote me");
        let quoted = toggle_block_type(&state, &BlockType::Blockquote);
        assert_eq!(quoted.current_block_type(), BlockType::Blockquote);
        let plain = toggle_block_type(&quoted, &BlockType::Blockquote);
        assert_eq!(plain.current_block_type(), BlockType::Unstyled);
    }

    #[test]
    fn test_toggle_block_type_skips_atomic() {
        let state = state_from("x");
        let (content, key) = state
            .content()
            .create_entity(EntityType::Dash, Mutability::Immutable, EntityData::empty());
        let mut content = content;
        let at = state.selection().start().clone();
        modifier::insert_atomic_block(&mut content, &at, key, " ");
        let atomic_key = content.blocks()[1].key().clone();
        let state = state.push(content, Selection::collapsed(atomic_key, 0), ChangeType::InsertFragment);

        let next = toggle_block_type(&state, &BlockType::HeaderOne);
        assert_eq!(next, state);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Key Commands
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_soft_newline_stays_in_block() {
        let state = select(&state_from("ab"), 0, 1, 1);
        let next = insert_soft_newline(&state);
        assert_eq!(next.content().blocks().len(), 1);
        assert_eq!(next.content().first_block().text(), "a\nb");
        assert_eq!(next.selection().start().offset, 2);
    }

    #[test]
    fn test_backspace_resets_heading_at_start() {
        let state = toggle_block_type(&state_from("title"), &BlockType::HeaderTwo);
        let next = handle_key_command(&state, &KeyCommand::Backspace).unwrap();
        assert_eq!(next.current_block_type(), BlockType::Unstyled);
        assert_eq!(next.content().first_block().text(), "title");
    }

    #[test]
    fn test_backspace_mid_text_falls_through() {
        let state = select(&state_from("abc"), 0, 2, 2);
        assert!(handle_key_command(&state, &KeyCommand::Backspace).is_none());
        assert!(handle_key_command(&state, &KeyCommand::SplitBlock).is_none());
        assert!(handle_key_command(&state, &KeyCommand::Custom("noop".into())).is_none());
    }

    #[test]
    fn test_backspace_removes_atomic_block_above() {
        let state = state_from("");
        let (mut content, key) = state
            .content()
            .create_entity(EntityType::Dash, Mutability::Immutable, EntityData::empty());
        let after = modifier::insert_atomic_block(&mut content, state.selection().start(), key, " ");
        let state = state.push(content, Selection::collapsed(after.key, 0), ChangeType::InsertFragment);
        assert_eq!(state.content().blocks().len(), 3);

        let next = handle_key_command(&state, &KeyCommand::Backspace).unwrap();
        assert_eq!(next.content().blocks().len(), 2);
        assert!(next
            .content()
            .blocks()
            .iter()
            .all(|b| *b.block_type() != BlockType::Atomic));
    }

    #[test]
    fn test_bold_command_toggles_style() {
        let state = select(&state_from("word"), 0, 0, 4);
        let next = handle_key_command(&state, &KeyCommand::Bold).unwrap();
        assert!(next.content().first_block().style_at(0).contains(&InlineStyle::Bold));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Links and Tabs
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_toggle_link_keeps_text() {
        let state = select(&state_from("hello"), 0, 0, 5);
        let (content, key) = state.content().create_entity(
            EntityType::Link,
            Mutability::Mutable,
            EntityData::link("https://x.test"),
        );
        let with_entity = state.push(content, state.selection().clone(), ChangeType::ApplyEntity);
        let linked = toggle_link(&with_entity, with_entity.selection(), Some(key));
        assert_eq!(linked.content().first_block().text(), "hello");
        assert_eq!(linked.content().first_block().entity_at(4), Some(key));
    }

    #[test]
    fn test_on_tab_only_affects_list_items() {
        let state = state_from("one\ntwo");
        let second = select(&state, 1, 0, 0);
        assert_eq!(on_tab(&second, false, 4), second);

        let all = state.force_selection(state.content().select(
            SelectionPoint::new(state.content().blocks()[0].key().clone(), 0),
            SelectionPoint::new(state.content().blocks()[1].key().clone(), 0),
        ));
        let listed = toggle_block_type(&all, &BlockType::OrderedListItem);
        let second = select(&listed, 1, 0, 0);
        let indented = on_tab(&second, false, 4);
        assert_eq!(indented.content().blocks()[1].depth(), 1);
        let outdented = on_tab(&indented, true, 4);
        assert_eq!(outdented.content().blocks()[1].depth(), 0);
    }
}
