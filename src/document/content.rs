//! Content state: the ordered block list plus the entity table.

use super::block::{BlockKey, BlockType, ContentBlock};
use super::entity::{Entity, EntityData, EntityKey, EntityType, Mutability};
use super::selection::{Selection, SelectionPoint};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Blocks and entities of one document snapshot.
///
/// A `ContentState` is never edited once it is shared by a snapshot; edits
/// clone it and build a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentState {
    blocks: Vec<ContentBlock>,
    entities: BTreeMap<EntityKey, Entity>,
    next_entity: u64,
    next_block: u64,
}

impl Default for ContentState {
    fn default() -> Self {
        Self::empty()
    }
}

impl ContentState {
    /// A document with a single empty paragraph.
    pub fn empty() -> Self {
        let mut content = Self {
            blocks: Vec::new(),
            entities: BTreeMap::new(),
            next_entity: 0,
            next_block: 0,
        };
        let key = content.fresh_block_key();
        content
            .blocks
            .push(ContentBlock::new(key, BlockType::Unstyled, ""));
        content
    }

    /// One unstyled block per line of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut content = Self::empty();
        content.blocks.clear();
        for line in text.split('\n') {
            let key = content.fresh_block_key();
            content
                .blocks
                .push(ContentBlock::new(key, BlockType::Unstyled, line));
        }
        content
    }

    /// Assemble content from existing blocks and entities.
    ///
    /// An empty block list becomes a single empty paragraph.
    pub fn from_parts(blocks: Vec<ContentBlock>, entities: BTreeMap<EntityKey, Entity>) -> Self {
        let next_entity = entities.keys().map(|k| k.raw() + 1).max().unwrap_or(0);
        let mut content = Self {
            blocks,
            entities,
            next_entity,
            next_block: 0,
        };
        if content.blocks.is_empty() {
            let key = content.fresh_block_key();
            content
                .blocks
                .push(ContentBlock::new(key, BlockType::Unstyled, ""));
        }
        content
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Block Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn block_for_key(&self, key: &BlockKey) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.key() == key)
    }

    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| b.key() == key)
    }

    pub fn first_block(&self) -> &ContentBlock {
        &self.blocks[0]
    }

    pub fn last_block(&self) -> &ContentBlock {
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn block_before(&self, key: &BlockKey) -> Option<&ContentBlock> {
        let index = self.block_index(key)?;
        index.checked_sub(1).map(|i| &self.blocks[i])
    }

    pub fn block_after(&self, key: &BlockKey) -> Option<&ContentBlock> {
        let index = self.block_index(key)?;
        self.blocks.get(index + 1)
    }

    /// All block texts joined with newlines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_text(&self) -> bool {
        self.blocks.len() > 1 || !self.blocks[0].is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Entities
    // ─────────────────────────────────────────────────────────────────────────

    pub fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(&key)
    }

    pub fn entities(&self) -> &BTreeMap<EntityKey, Entity> {
        &self.entities
    }

    /// Return a copy of this content with a new entity in its table.
    pub fn create_entity(
        &self,
        entity_type: EntityType,
        mutability: Mutability,
        data: EntityData,
    ) -> (Self, EntityKey) {
        let mut next = self.clone();
        let key = next.insert_entity(Entity::new(entity_type, mutability, data));
        (next, key)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Document order of two points. Unknown keys sort last.
    pub fn compare_points(&self, a: &SelectionPoint, b: &SelectionPoint) -> Ordering {
        let ia = self.block_index(&a.key).unwrap_or(usize::MAX);
        let ib = self.block_index(&b.key).unwrap_or(usize::MAX);
        ia.cmp(&ib).then(a.offset.cmp(&b.offset))
    }

    /// Build a selection from anchor to focus, working out its direction.
    pub fn select(&self, anchor: SelectionPoint, focus: SelectionPoint) -> Selection {
        let backward = self.compare_points(&focus, &anchor) == Ordering::Less;
        Selection::range(anchor, focus, backward)
    }

    /// Both points resolve to blocks, offsets are in range and the
    /// direction flag matches document order.
    pub fn is_valid_selection(&self, selection: &Selection) -> bool {
        let resolves = |point: &SelectionPoint| {
            self.block_for_key(&point.key)
                .map(|b| point.offset <= b.len())
                .unwrap_or(false)
        };
        if !resolves(selection.anchor()) || !resolves(selection.focus()) {
            return false;
        }
        self.compare_points(selection.start(), selection.end()) != Ordering::Greater
    }

    /// Cursor at the end of the last block.
    pub fn selection_at_end(&self) -> Selection {
        let last = self.last_block();
        Selection::collapsed(last.key().clone(), last.len())
    }

    /// Cursor at the start of the first block.
    pub fn selection_at_start(&self) -> Selection {
        Selection::collapsed(self.first_block().key().clone(), 0)
    }

    /// Text covered by `selection`, blocks joined with newlines.
    pub fn text_in_range(&self, selection: &Selection) -> String {
        let (Some(si), Some(ei)) = (
            self.block_index(&selection.start().key),
            self.block_index(&selection.end().key),
        ) else {
            return String::new();
        };
        let mut parts = Vec::new();
        for (i, block) in self.blocks.iter().enumerate().take(ei + 1).skip(si) {
            let from = if i == si { selection.start().offset } else { 0 };
            let to = if i == ei {
                selection.end().offset
            } else {
                block.len()
            };
            parts.push(block.slice(from, to));
        }
        parts.join("\n")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal Builders
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<ContentBlock> {
        &mut self.blocks
    }

    pub(crate) fn insert_entity(&mut self, entity: Entity) -> EntityKey {
        let key = EntityKey::new(self.next_entity);
        self.next_entity += 1;
        self.entities.insert(key, entity);
        key
    }

    /// A block key not used by any block of this content.
    pub(crate) fn fresh_block_key(&mut self) -> BlockKey {
        loop {
            let key = BlockKey::new(format!("b{}", self.next_block));
            self.next_block += 1;
            if self.block_for_key(&key).is_none() {
                return key;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_has_one_block() {
        let content = ContentState::empty();
        assert_eq!(content.blocks().len(), 1);
        assert!(!content.has_text());
    }

    #[test]
    fn test_from_text_splits_lines() {
        let content = ContentState::from_text("one\ntwo\nthree");
        assert_eq!(content.blocks().len(), 3);
        assert_eq!(content.blocks()[1].text(), "two");
        assert_eq!(content.plain_text(), "one\ntwo\nthree");
    }

    #[test]
    fn test_create_entity_leaves_original_untouched() {
        let content = ContentState::empty();
        let (next, key) = content.create_entity(
            EntityType::Dash,
            Mutability::Immutable,
            EntityData::empty(),
        );
        assert!(content.entity(key).is_none());
        assert_eq!(next.entity(key).map(|e| &e.entity_type), Some(&EntityType::Dash));
    }

    #[test]
    fn test_select_computes_direction() {
        let content = ContentState::from_text("abc\ndef");
        let a = content.blocks()[0].key().clone();
        let b = content.blocks()[1].key().clone();
        let sel = content.select(SelectionPoint::new(b, 1), SelectionPoint::new(a, 2));
        assert!(sel.is_backward());
        assert!(content.is_valid_selection(&sel));
        assert_eq!(content.text_in_range(&sel), "c\nd");
    }

    #[test]
    fn test_invalid_selection_detection() {
        let content = ContentState::from_text("abc");
        let key = content.blocks()[0].key().clone();
        assert!(!content.is_valid_selection(&Selection::collapsed(key.clone(), 4)));
        assert!(!content.is_valid_selection(&Selection::collapsed(BlockKey::new("zz"), 0)));
        // Forward flag on a range that actually runs backward
        let wrong = Selection::range(
            SelectionPoint::new(key.clone(), 3),
            SelectionPoint::new(key, 1),
            false,
        );
        assert!(!content.is_valid_selection(&wrong));
    }

    #[test]
    fn test_from_parts_continues_entity_numbering() {
        let content = ContentState::empty();
        let (content, first) = content.create_entity(
            EntityType::Link,
            Mutability::Mutable,
            EntityData::link("https://a.test"),
        );
        let rebuilt =
            ContentState::from_parts(content.blocks().to_vec(), content.entities().clone());
        let (_, second) = rebuilt.create_entity(
            EntityType::Link,
            Mutability::Mutable,
            EntityData::link("https://b.test"),
        );
        assert_ne!(first, second);
    }
}
