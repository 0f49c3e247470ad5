//! Low-level content transforms.
//!
//! Every function here edits a `ContentState` that the caller has already
//! cloned out of a snapshot, and expects a selection that was validated
//! against that content.

use super::block::{BlockType, CharMeta, ContentBlock, InlineStyle, StyleSet};
use super::content::ContentState;
use super::entity::EntityKey;
use super::selection::{Selection, SelectionPoint};
use crate::string_utils::{char_count, split_at_char, splice_chars};
use std::collections::BTreeMap;

/// Character ranges covered by `selection`, one per block: `(block index, start, end)`.
fn block_ranges(content: &ContentState, selection: &Selection) -> Vec<(usize, usize, usize)> {
    let (Some(si), Some(ei)) = (
        content.block_index(&selection.start().key),
        content.block_index(&selection.end().key),
    ) else {
        return Vec::new();
    };
    (si..=ei)
        .map(|i| {
            let block = &content.blocks()[i];
            let from = if i == si { selection.start().offset } else { 0 };
            let to = if i == ei {
                selection.end().offset
            } else {
                block.len()
            };
            (i, from.min(block.len()), to.min(block.len()))
        })
        .collect()
}

/// Delete the selected range, joining the first and last block.
pub(crate) fn remove_range(content: &mut ContentState, selection: &Selection) -> SelectionPoint {
    let start = selection.start().clone();
    if selection.is_collapsed() {
        return start;
    }
    let (Some(si), Some(ei)) = (
        content.block_index(&start.key),
        content.block_index(&selection.end().key),
    ) else {
        return start;
    };
    let end_offset = selection.end().offset;

    let blocks = content.blocks_mut();
    let mut text = blocks[si].slice(0, start.offset).to_string();
    text.push_str(blocks[ei].slice(end_offset, blocks[ei].len()));
    let mut chars: Vec<CharMeta> = blocks[si].chars()[..start.offset].to_vec();
    chars.extend_from_slice(&blocks[ei].chars()[end_offset..]);

    blocks[si].set_content(text, chars);
    if ei > si {
        blocks.drain(si + 1..=ei);
    }
    start
}

/// Insert `text` at `at`, every new character carrying `style` and `entity`.
pub(crate) fn insert_text(
    content: &mut ContentState,
    at: &SelectionPoint,
    text: &str,
    style: &StyleSet,
    entity: Option<EntityKey>,
) -> SelectionPoint {
    let Some(index) = content.block_index(&at.key) else {
        return at.clone();
    };
    let inserted = char_count(text);
    let block = &mut content.blocks_mut()[index];
    let offset = at.offset.min(block.len());

    let new_text = splice_chars(block.text(), offset, offset, text);
    let mut chars = block.chars().to_vec();
    chars.splice(
        offset..offset,
        std::iter::repeat(CharMeta::new(style.clone(), entity)).take(inserted),
    );
    block.set_content(new_text, chars);

    SelectionPoint::new(at.key.clone(), offset + inserted)
}

/// Attach `entity` (or detach with `None`) to every selected character.
pub(crate) fn apply_entity(
    content: &mut ContentState,
    selection: &Selection,
    entity: Option<EntityKey>,
) {
    for (index, from, to) in block_ranges(content, selection) {
        let chars = content.blocks_mut()[index].chars_mut();
        for meta in &mut chars[from..to] {
            meta.entity = entity;
        }
    }
}

/// Add or remove `style` on every selected character.
pub(crate) fn apply_inline_style(
    content: &mut ContentState,
    selection: &Selection,
    style: InlineStyle,
    add: bool,
) {
    for (index, from, to) in block_ranges(content, selection) {
        let chars = content.blocks_mut()[index].chars_mut();
        for meta in &mut chars[from..to] {
            if add {
                meta.style.insert(style);
            } else {
                meta.style.remove(&style);
            }
        }
    }
}

/// Whether every selected character carries `style`.
pub(crate) fn range_has_style(
    content: &ContentState,
    selection: &Selection,
    style: InlineStyle,
) -> bool {
    block_ranges(content, selection)
        .into_iter()
        .all(|(index, from, to)| {
            content.blocks()[index].chars()[from..to]
                .iter()
                .all(|meta| meta.style.contains(&style))
        })
}

/// Set the type of every block touched by `selection`.
pub(crate) fn set_block_type(
    content: &mut ContentState,
    selection: &Selection,
    block_type: &BlockType,
) {
    for (index, _, _) in block_ranges(content, selection) {
        let block = &mut content.blocks_mut()[index];
        block.set_block_type(block_type.clone());
        if !block_type.is_list_item() {
            block.set_depth(0);
        }
    }
}

/// Split the block at `at`. The tail keeps the block's type and depth.
pub(crate) fn split_block(content: &mut ContentState, at: &SelectionPoint) -> SelectionPoint {
    let Some(index) = content.block_index(&at.key) else {
        return at.clone();
    };
    let new_key = content.fresh_block_key();
    let block = &mut content.blocks_mut()[index];
    let offset = at.offset.min(block.len());

    let (head_text, tail_text) = split_at_char(block.text(), offset);
    let (head_text, tail_text) = (head_text.to_string(), tail_text.to_string());
    let tail_chars = block.chars()[offset..].to_vec();
    let head_chars = block.chars()[..offset].to_vec();

    let mut tail = ContentBlock::with_chars(
        new_key.clone(),
        block.block_type().clone(),
        tail_text,
        tail_chars,
    );
    tail.set_depth(block.depth());
    block.set_content(head_text, head_chars);

    content.blocks_mut().insert(index + 1, tail);
    SelectionPoint::new(new_key, 0)
}

/// Insert an atomic block carrying `entity` at `at`.
///
/// The block at `at` is split; the atomic block goes between the two halves
/// and the tail becomes a plain paragraph. An atomic block at `at` is never
/// split: the new block goes before it at offset 0 and after it otherwise.
/// Returns the start of the block following the new one.
pub(crate) fn insert_atomic_block(
    content: &mut ContentState,
    at: &SelectionPoint,
    entity: EntityKey,
    character: &str,
) -> SelectionPoint {
    let atomic_key = content.fresh_block_key();
    let chars = vec![CharMeta::new(StyleSet::new(), Some(entity)); char_count(character)];
    let atomic = ContentBlock::with_chars(atomic_key, BlockType::Atomic, character, chars);

    if let Some(index) = content.block_index(&at.key) {
        if content.blocks()[index].block_type() == &BlockType::Atomic {
            return insert_beside_atomic(content, index, at.offset, atomic);
        }
    }

    let after = split_block(content, at);
    let Some(after_index) = content.block_index(&after.key) else {
        return after;
    };
    {
        let tail = &mut content.blocks_mut()[after_index];
        tail.set_block_type(BlockType::Unstyled);
        tail.set_depth(0);
        tail.set_data(BTreeMap::new());
    }

    content.blocks_mut().insert(after_index, atomic);
    after
}

fn insert_beside_atomic(
    content: &mut ContentState,
    index: usize,
    offset: usize,
    atomic: ContentBlock,
) -> SelectionPoint {
    if offset == 0 {
        let existing = content.blocks()[index].key().clone();
        content.blocks_mut().insert(index, atomic);
        return SelectionPoint::new(existing, 0);
    }

    content.blocks_mut().insert(index + 1, atomic);
    if let Some(next) = content.blocks().get(index + 2) {
        return SelectionPoint::new(next.key().clone(), 0);
    }
    let key = content.fresh_block_key();
    content
        .blocks_mut()
        .push(ContentBlock::new(key.clone(), BlockType::Unstyled, ""));
    SelectionPoint::new(key, 0)
}

/// Remove the block at `index`, keeping at least one block in the document.
pub(crate) fn remove_block(content: &mut ContentState, index: usize) {
    if content.blocks().len() > 1 {
        content.blocks_mut().remove(index);
    } else {
        let key = content.blocks()[0].key().clone();
        content.blocks_mut()[0] = ContentBlock::new(key, BlockType::Unstyled, "");
    }
}

/// Append block `index` onto the block before it. Returns the join point.
pub(crate) fn merge_with_previous(content: &mut ContentState, index: usize) -> Option<SelectionPoint> {
    if index == 0 || index >= content.blocks().len() {
        return None;
    }
    let removed = content.blocks_mut().remove(index);
    let previous = &mut content.blocks_mut()[index - 1];
    let join = SelectionPoint::new(previous.key().clone(), previous.len());

    let mut text = previous.text().to_string();
    text.push_str(removed.text());
    let mut chars = previous.chars().to_vec();
    chars.extend_from_slice(removed.chars());
    previous.set_content(text, chars);
    Some(join)
}

/// Shift list-item depth by `delta` within `0..=max_depth`.
///
/// A block never becomes more than one level deeper than the block above it.
pub(crate) fn adjust_depth(
    content: &mut ContentState,
    selection: &Selection,
    delta: i8,
    max_depth: u8,
) -> bool {
    let mut changed = false;
    for (index, _, _) in block_ranges(content, selection) {
        let limit = if index == 0 {
            0
        } else {
            let above = &content.blocks()[index - 1];
            if above.block_type().is_list_item() {
                (above.depth() + 1).min(max_depth)
            } else {
                0
            }
        };
        let block = &mut content.blocks_mut()[index];
        if !block.block_type().is_list_item() {
            continue;
        }
        let target = (i16::from(block.depth()) + i16::from(delta)).clamp(0, i16::from(limit)) as u8;
        if target != block.depth() {
            block.set_depth(target);
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::entity::{EntityData, EntityType, Mutability};

    fn point(content: &ContentState, block: usize, offset: usize) -> SelectionPoint {
        SelectionPoint::new(content.blocks()[block].key().clone(), offset)
    }

    #[test]
    fn test_remove_range_across_blocks() {
        let mut content = ContentState::from_text("hello\nbig\nworld");
        let sel = content.select(point(&content, 0, 2), point(&content, 2, 3));
        let at = remove_range(&mut content, &sel);
        assert_eq!(content.plain_text(), "held");
        assert_eq!(at.offset, 2);
    }

    #[test]
    fn test_insert_text_with_entity() {
        let mut content = ContentState::from_text("ab");
        let (mut content2, key) = content.create_entity(
            EntityType::Link,
            Mutability::Mutable,
            EntityData::link("https://y.test"),
        );
        let at = point(&content2, 0, 1);
        let after = insert_text(&mut content2, &at, "new", &StyleSet::new(), Some(key));
        assert_eq!(content2.blocks()[0].text(), "anewb");
        assert_eq!(after.offset, 4);
        assert_eq!(content2.blocks()[0].find_entity_ranges(|m| m.entity.is_some()), vec![(1, 4)]);

        // Original untouched
        let at = point(&content, 0, 0);
        insert_text(&mut content, &at, "x", &StyleSet::new(), None);
        assert_eq!(content.blocks()[0].text(), "xab");
    }

    #[test]
    fn test_split_block_keeps_type() {
        let mut content = ContentState::from_text("heading");
        let sel = content.selection_at_start();
        set_block_type(&mut content, &sel, &BlockType::HeaderOne);
        let at = point(&content, 0, 4);
        let after = split_block(&mut content, &at);
        assert_eq!(content.blocks().len(), 2);
        assert_eq!(content.blocks()[0].text(), "head");
        assert_eq!(content.blocks()[1].text(), "ing");
        assert_eq!(content.blocks()[1].block_type(), &BlockType::HeaderOne);
        assert_eq!(&after.key, content.blocks()[1].key());
    }

    #[test]
    fn test_insert_atomic_block_between_halves() {
        let content = ContentState::from_text("beforeafter");
        let (mut content, key) =
            content.create_entity(EntityType::Dash, Mutability::Immutable, EntityData::empty());
        let at = point(&content, 0, 6);
        let after = insert_atomic_block(&mut content, &at, key, " ");
        let blocks = content.blocks();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].text(), "before");
        assert_eq!(blocks[1].block_type(), &BlockType::Atomic);
        assert_eq!(blocks[1].entity_at(0), Some(key));
        assert_eq!(blocks[2].text(), "after");
        assert_eq!(&after.key, blocks[2].key());
    }

    #[test]
    fn test_insert_atomic_block_beside_atomic() {
        let content = ContentState::from_text("text");
        let (mut content, first) =
            content.create_entity(EntityType::Dash, Mutability::Immutable, EntityData::empty());
        let at = point(&content, 0, 0);
        insert_atomic_block(&mut content, &at, first, " ");
        let existing = content.blocks()[1].key().clone();

        let (mut content, before) =
            content.create_entity(EntityType::Dash, Mutability::Immutable, EntityData::empty());
        let at = SelectionPoint::new(existing.clone(), 0);
        let after = insert_atomic_block(&mut content, &at, before, " ");
        assert_eq!(after.key, existing);
        assert_eq!(content.blocks()[1].entity_at(0), Some(before));
        assert_eq!(content.blocks()[2].entity_at(0), Some(first));

        let (mut content, behind) =
            content.create_entity(EntityType::Dash, Mutability::Immutable, EntityData::empty());
        insert_atomic_block(&mut content, &SelectionPoint::new(existing, 1), behind, " ");
        let blocks = content.blocks();
        assert_eq!(blocks.len(), 5);
        assert!(blocks[1..4].iter().all(|b| b.block_type() == &BlockType::Atomic));
        assert_eq!(blocks[2].entity_at(0), Some(first));
        assert_eq!(blocks[3].entity_at(0), Some(behind));
        assert_eq!(blocks[4].text(), "text");
    }

    #[test]
    fn test_merge_with_previous() {
        let mut content = ContentState::from_text("ab\ncd");
        let join = merge_with_previous(&mut content, 1).unwrap();
        assert_eq!(content.plain_text(), "abcd");
        assert_eq!(join.offset, 2);
        assert!(merge_with_previous(&mut content, 0).is_none());
    }

    #[test]
    fn test_adjust_depth_limited_by_block_above() {
        let mut content = ContentState::from_text("one\ntwo");
        let all = content.select(point(&content, 0, 0), point(&content, 1, 0));
        set_block_type(&mut content, &all, &BlockType::UnorderedListItem);

        let second = Selection::collapsed(content.blocks()[1].key().clone(), 0);
        assert!(adjust_depth(&mut content, &second, 1, 4));
        assert_eq!(content.blocks()[1].depth(), 1);
        // Already one deeper than the block above
        assert!(!adjust_depth(&mut content, &second, 1, 4));
        assert!(adjust_depth(&mut content, &second, -1, 4));
        assert_eq!(content.blocks()[1].depth(), 0);
    }

    #[test]
    fn test_range_has_style() {
        let mut content = ContentState::from_text("bold");
        let sel = content.select(point(&content, 0, 0), point(&content, 0, 4));
        assert!(!range_has_style(&content, &sel, InlineStyle::Bold));
        apply_inline_style(&mut content, &sel, InlineStyle::Bold, true);
        assert!(range_has_style(&content, &sel, InlineStyle::Bold));
    }
}
