//! Document snapshots.

use super::block::{BlockType, StyleSet};
use super::content::ContentState;
use super::decorator::CompositeDecorator;
use super::selection::Selection;
use std::sync::Arc;

/// The kind of edit that produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    InsertCharacters,
    InsertFragment,
    ApplyEntity,
    ChangeInlineStyle,
    ChangeBlockType,
    SplitBlock,
    RemoveRange,
    BackspaceCharacter,
    DeleteCharacter,
    AdjustDepth,
}

/// An immutable document snapshot: content, selection and the pending
/// inline style for the next typed characters.
///
/// Every edit builds a new `DocumentState`; content is shared between
/// snapshots that did not change it.
#[derive(Debug, Clone)]
pub struct DocumentState {
    content: Arc<ContentState>,
    selection: Selection,
    style_override: Option<StyleSet>,
    last_change: Option<ChangeType>,
    decorator: Arc<CompositeDecorator>,
}

impl PartialEq for DocumentState {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
            && self.selection == other.selection
            && self.style_override == other.style_override
    }
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::create_empty(Arc::new(CompositeDecorator::with_links()))
    }
}

impl DocumentState {
    /// An empty document with the cursor in its only block.
    pub fn create_empty(decorator: Arc<CompositeDecorator>) -> Self {
        Self::create_with_content(ContentState::empty(), decorator)
    }

    /// A document with the given content and the cursor at its start.
    pub fn create_with_content(content: ContentState, decorator: Arc<CompositeDecorator>) -> Self {
        let selection = content.selection_at_start();
        Self {
            content: Arc::new(content),
            selection,
            style_override: None,
            last_change: None,
            decorator,
        }
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn style_override(&self) -> Option<&StyleSet> {
        self.style_override.as_ref()
    }

    pub fn last_change(&self) -> Option<ChangeType> {
        self.last_change
    }

    pub fn decorator(&self) -> &CompositeDecorator {
        &self.decorator
    }

    /// Whether two snapshots share the same content allocation.
    pub fn shares_content_with(&self, other: &DocumentState) -> bool {
        Arc::ptr_eq(&self.content, &other.content)
    }

    pub fn has_valid_selection(&self) -> bool {
        self.content.is_valid_selection(&self.selection)
    }

    /// New snapshot with a different selection. Drops any pending style.
    pub fn force_selection(&self, selection: Selection) -> Self {
        Self {
            content: Arc::clone(&self.content),
            selection,
            style_override: None,
            last_change: self.last_change,
            decorator: Arc::clone(&self.decorator),
        }
    }

    /// New snapshot with a pending inline style for the next insertion.
    pub fn with_style_override(&self, style: StyleSet) -> Self {
        Self {
            content: Arc::clone(&self.content),
            selection: self.selection.clone(),
            style_override: Some(style),
            last_change: self.last_change,
            decorator: Arc::clone(&self.decorator),
        }
    }

    /// New snapshot carrying edited content.
    pub fn push(&self, content: ContentState, selection: Selection, change: ChangeType) -> Self {
        Self {
            content: Arc::new(content),
            selection,
            style_override: None,
            last_change: Some(change),
            decorator: Arc::clone(&self.decorator),
        }
    }

    /// Inline styles that the next typed character would get.
    pub fn current_inline_style(&self) -> StyleSet {
        if let Some(style) = &self.style_override {
            return style.clone();
        }
        let start = self.selection.start();
        let Some(block) = self.content.block_for_key(&start.key) else {
            return StyleSet::new();
        };
        if !self.selection.is_collapsed() {
            return block.style_at(start.offset);
        }
        if start.offset > 0 {
            block.style_at(start.offset - 1)
        } else if !block.is_empty() {
            block.style_at(0)
        } else {
            StyleSet::new()
        }
    }

    /// Type of the block holding the selection start.
    pub fn current_block_type(&self) -> BlockType {
        self.content
            .block_for_key(&self.selection.start().key)
            .map(|b| b.block_type().clone())
            .unwrap_or(BlockType::Unstyled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::block::InlineStyle;

    #[test]
    fn test_empty_state_has_valid_cursor() {
        let state = DocumentState::default();
        assert!(state.selection().is_collapsed());
        assert!(state.has_valid_selection());
        assert_eq!(state.current_block_type(), BlockType::Unstyled);
    }

    #[test]
    fn test_force_selection_shares_content() {
        let state = DocumentState::create_with_content(
            ContentState::from_text("abc"),
            Arc::new(CompositeDecorator::with_links()),
        );
        let key = state.content().first_block().key().clone();
        let moved = state.force_selection(Selection::collapsed(key, 2));
        assert!(moved.shares_content_with(&state));
        assert_ne!(moved, state);
    }

    #[test]
    fn test_push_replaces_content_and_clears_override() {
        let state = DocumentState::default()
            .with_style_override([InlineStyle::Bold].into_iter().collect());
        assert!(state.style_override().is_some());
        let next = state.push(
            ContentState::from_text("x"),
            ContentState::from_text("x").selection_at_end(),
            ChangeType::InsertCharacters,
        );
        assert!(!next.shares_content_with(&state));
        assert!(next.style_override().is_none());
        assert_eq!(next.last_change(), Some(ChangeType::InsertCharacters));
    }
}
