//! Plain editing: typing, deletion, block splitting and cursor motion.
//!
//! These run when a key command is not consumed by the rich handlers.

use super::command::{KeyCommand, Motion};
use super::modifier;
use super::rich;
use super::selection::{Selection, SelectionPoint};
use super::state::{ChangeType, DocumentState};

/// Type `text` at the selection, replacing any selected range.
pub fn insert_characters(state: &DocumentState, text: &str) -> DocumentState {
    if !state.has_valid_selection() || text.is_empty() {
        return state.clone();
    }
    let style = state.current_inline_style();
    let mut content = state.content().clone();
    let at = modifier::remove_range(&mut content, state.selection());
    let after = modifier::insert_text(&mut content, &at, text, &style, None);
    state.push(
        content,
        Selection::collapsed(after.key, after.offset),
        ChangeType::InsertCharacters,
    )
}

/// Default behaviour for a key command.
pub fn apply_default_command(state: &DocumentState, command: &KeyCommand) -> DocumentState {
    if !state.has_valid_selection() {
        return state.clone();
    }
    match command {
        KeyCommand::SplitBlock => split_block(state),
        KeyCommand::Backspace => backspace(state, false),
        KeyCommand::BackspaceWord => backspace(state, true),
        KeyCommand::Delete => delete_forward(state),
        KeyCommand::SoftEnter => rich::insert_soft_newline(state),
        other => rich::handle_key_command(state, other).unwrap_or_else(|| state.clone()),
    }
}

fn remove_selection(state: &DocumentState) -> DocumentState {
    let mut content = state.content().clone();
    let at = modifier::remove_range(&mut content, state.selection());
    state.push(
        content,
        Selection::collapsed(at.key, at.offset),
        ChangeType::RemoveRange,
    )
}

fn split_block(state: &DocumentState) -> DocumentState {
    let mut content = state.content().clone();
    let at = modifier::remove_range(&mut content, state.selection());
    let after = modifier::split_block(&mut content, &at);
    state.push(
        content,
        Selection::collapsed(after.key, after.offset),
        ChangeType::SplitBlock,
    )
}

/// Offset where a word-wise backspace from `offset` stops.
fn word_start(text: &str, offset: usize) -> usize {
    let chars: Vec<char> = text.chars().take(offset).collect();
    let mut i = chars.len();
    while i > 0 && chars[i - 1].is_whitespace() {
        i -= 1;
    }
    while i > 0 && !chars[i - 1].is_whitespace() {
        i -= 1;
    }
    i
}

fn backspace(state: &DocumentState, by_word: bool) -> DocumentState {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return remove_selection(state);
    }
    let content = state.content();
    let point = selection.start();
    let Some(index) = content.block_index(&point.key) else {
        return state.clone();
    };

    if point.offset == 0 {
        let mut next = content.clone();
        return match modifier::merge_with_previous(&mut next, index) {
            Some(join) => state.push(
                next,
                Selection::collapsed(join.key, join.offset),
                ChangeType::BackspaceCharacter,
            ),
            None => state.clone(),
        };
    }

    let block = &content.blocks()[index];
    let from = if by_word {
        word_start(block.text(), point.offset)
    } else {
        point.offset - 1
    };
    let range = Selection::range(
        SelectionPoint::new(point.key.clone(), from),
        point.clone(),
        false,
    );
    let mut next = content.clone();
    let at = modifier::remove_range(&mut next, &range);
    state.push(
        next,
        Selection::collapsed(at.key, at.offset),
        ChangeType::BackspaceCharacter,
    )
}

fn delete_forward(state: &DocumentState) -> DocumentState {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return remove_selection(state);
    }
    let content = state.content();
    let point = selection.start();
    let Some(index) = content.block_index(&point.key) else {
        return state.clone();
    };
    let block = &content.blocks()[index];

    let mut next = content.clone();
    if point.offset < block.len() {
        let range = Selection::range(
            point.clone(),
            SelectionPoint::new(point.key.clone(), point.offset + 1),
            false,
        );
        modifier::remove_range(&mut next, &range);
    } else if modifier::merge_with_previous(&mut next, index + 1).is_none() {
        return state.clone();
    }
    state.push(next, selection.clone(), ChangeType::DeleteCharacter)
}

/// Move the cursor, or extend the selection when `extend` is set.
pub fn move_selection(state: &DocumentState, motion: Motion, extend: bool) -> DocumentState {
    if !state.has_valid_selection() {
        let reset = state.content().selection_at_end();
        return state.force_selection(reset);
    }
    let content = state.content();
    let selection = state.selection();

    if !extend && !selection.is_collapsed() {
        match motion {
            Motion::Left | Motion::Up => return state.force_selection(selection.collapse_to_start()),
            Motion::Right | Motion::Down => return state.force_selection(selection.collapse_to_end()),
            _ => {}
        }
    }

    let focus = selection.focus();
    let Some(index) = content.block_index(&focus.key) else {
        return state.clone();
    };
    let blocks = content.blocks();
    let block = &blocks[index];
    let target = match motion {
        Motion::Left if focus.offset > 0 => SelectionPoint::new(focus.key.clone(), focus.offset - 1),
        Motion::Left => match index.checked_sub(1) {
            Some(i) => SelectionPoint::new(blocks[i].key().clone(), blocks[i].len()),
            None => focus.clone(),
        },
        Motion::Right if focus.offset < block.len() => {
            SelectionPoint::new(focus.key.clone(), focus.offset + 1)
        }
        Motion::Right => match blocks.get(index + 1) {
            Some(b) => SelectionPoint::new(b.key().clone(), 0),
            None => focus.clone(),
        },
        Motion::Up => match index.checked_sub(1) {
            Some(i) => SelectionPoint::new(blocks[i].key().clone(), focus.offset.min(blocks[i].len())),
            None => SelectionPoint::new(focus.key.clone(), 0),
        },
        Motion::Down => match blocks.get(index + 1) {
            Some(b) => SelectionPoint::new(b.key().clone(), focus.offset.min(b.len())),
            None => SelectionPoint::new(focus.key.clone(), block.len()),
        },
        Motion::BlockStart => SelectionPoint::new(focus.key.clone(), 0),
        Motion::BlockEnd => SelectionPoint::new(focus.key.clone(), block.len()),
        Motion::DocumentStart => SelectionPoint::new(content.first_block().key().clone(), 0),
        Motion::DocumentEnd => {
            let last = content.last_block();
            SelectionPoint::new(last.key().clone(), last.len())
        }
    };

    let next = if extend {
        content.select(selection.anchor().clone(), target)
    } else {
        Selection::collapsed(target.key, target.offset)
    };
    state.force_selection(next)
}

/// Select the whole document.
pub fn select_all(state: &DocumentState) -> DocumentState {
    let content = state.content();
    let last = content.last_block();
    let selection = content.select(
        SelectionPoint::new(content.first_block().key().clone(), 0),
        SelectionPoint::new(last.key().clone(), last.len()),
    );
    state.force_selection(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::block::InlineStyle;
    use crate::document::content::ContentState;
    use crate::document::decorator::CompositeDecorator;
    use std::sync::Arc;

    fn state_from(text: &str) -> DocumentState {
        let content = ContentState::from_text(text);
        let end = content.selection_at_end();
        DocumentState::create_with_content(content, Arc::new(CompositeDecorator::with_links()))
            .force_selection(end)
    }

    #[test]
    fn test_typing_uses_pending_style() {
        let state = state_from("ab");
        let bold = rich::toggle_inline_style(&state, InlineStyle::Bold);
        let typed = insert_characters(&bold, "cd");
        let block = typed.content().first_block();
        assert_eq!(block.text(), "abcd");
        assert!(block.style_at(2).contains(&InlineStyle::Bold));
        assert!(!block.style_at(1).contains(&InlineStyle::Bold));
        assert_eq!(typed.selection().start().offset, 4);
    }

    #[test]
    fn test_split_block_default() {
        let state = state_from("abc");
        let left = move_selection(&state, Motion::Left, false);
        let split = apply_default_command(&left, &KeyCommand::SplitBlock);
        assert_eq!(split.content().plain_text(), "ab\nc");
        assert_eq!(split.selection().start().offset, 0);
    }

    #[test]
    fn test_backspace_joins_blocks() {
        let state = state_from("ab\ncd");
        let start_of_second = move_selection(&state, Motion::BlockStart, false);
        let joined = apply_default_command(&start_of_second, &KeyCommand::Backspace);
        assert_eq!(joined.content().plain_text(), "abcd");
        assert_eq!(joined.selection().start().offset, 2);
    }

    #[test]
    fn test_backspace_word() {
        let state = state_from("hello big world");
        let next = apply_default_command(&state, &KeyCommand::BackspaceWord);
        assert_eq!(next.content().plain_text(), "hello big ");
    }

    #[test]
    fn test_delete_forward_at_block_end_joins() {
        let state = state_from("ab\ncd");
        let up = move_selection(&state, Motion::Up, false);
        let end = move_selection(&up, Motion::BlockEnd, false);
        let next = apply_default_command(&end, &KeyCommand::Delete);
        assert_eq!(next.content().plain_text(), "abcd");
    }

    #[test]
    fn test_extend_selection_left() {
        let state = state_from("hello");
        let mut next = state.clone();
        for _ in 0..3 {
            next = move_selection(&next, Motion::Left, true);
        }
        assert!(next.selection().is_backward());
        assert_eq!(next.content().text_in_range(next.selection()), "llo");
        let collapsed = move_selection(&next, Motion::Left, false);
        assert_eq!(collapsed.selection().start().offset, 2);
        assert!(collapsed.selection().is_collapsed());
    }

    #[test]
    fn test_select_all_then_type_replaces() {
        let state = select_all(&state_from("one\ntwo"));
        let next = insert_characters(&state, "x");
        assert_eq!(next.content().plain_text(), "x");
    }
}
