//! The document-model capability interface.
//!
//! The editor panel only talks to its document through this trait, so any
//! snapshot type offering these operations can back the panel.
//! `DocumentState` is the in-crate implementation.

use super::block::{BlockKey, BlockType, InlineStyle, StyleSet};
use super::command::{KeyCommand, Motion};
use super::content::ContentState;
use super::decorator::DecoratedRange;
use super::entity::{Entity, EntityData, EntityKey, EntityType, Mutability};
use super::selection::{Selection, SelectionPoint};
use super::state::{ChangeType, DocumentState};
use super::{editing, modifier, rich};
use crate::error::{Error, Result};

/// Operations the editor panel needs from a document snapshot.
///
/// Every method that edits returns a new snapshot; `&self` is never
/// changed.
pub trait DocumentModel: Clone {
    /// Read-only view of the content, for rendering and export.
    fn view(&self) -> &ContentState;

    // Selection
    fn current_selection(&self) -> &Selection;
    fn with_selection(&self, selection: Selection) -> Self;
    fn is_valid_selection(&self, selection: &Selection) -> bool;
    fn selected_text(&self) -> String;

    // Entities
    fn create_entity(
        &self,
        entity_type: EntityType,
        mutability: Mutability,
        data: EntityData,
    ) -> (Self, EntityKey);
    fn entity(&self, key: EntityKey) -> Option<&Entity>;
    fn entity_at(&self, point: &SelectionPoint) -> Option<EntityKey>;
    fn block_data(&self, key: &BlockKey, field: &str) -> Option<&str>;

    // Content edits
    fn insert_atomic_block(&self, entity: EntityKey, character: &str) -> Self;
    fn insert_text(&self, text: &str, entity: Option<EntityKey>) -> Self;
    fn apply_entity(&self, entity: Option<EntityKey>) -> Self;
    fn insert_characters(&self, text: &str) -> Self;
    fn insert_soft_newline(&self) -> Self;

    // Styles
    fn toggle_inline_style(&self, style: InlineStyle) -> Self;
    fn toggle_block_type(&self, block_type: &BlockType) -> Self;
    fn current_inline_style(&self) -> StyleSet;
    fn current_block_type(&self) -> BlockType;

    // Keys and motion
    fn handle_key_command(&self, command: &KeyCommand) -> Option<Self>;
    fn apply_default_command(&self, command: &KeyCommand) -> Self;
    fn on_tab(&self, shift: bool, max_depth: u8) -> Self;
    fn move_selection(&self, motion: Motion, extend: bool) -> Self;

    // Decoration
    fn decorate(&self, block: &BlockKey) -> Result<Vec<DecoratedRange>>;
}

impl DocumentModel for DocumentState {
    fn view(&self) -> &ContentState {
        self.content()
    }

    fn current_selection(&self) -> &Selection {
        self.selection()
    }

    fn with_selection(&self, selection: Selection) -> Self {
        self.force_selection(selection)
    }

    fn is_valid_selection(&self, selection: &Selection) -> bool {
        self.content().is_valid_selection(selection)
    }

    fn selected_text(&self) -> String {
        self.content().text_in_range(self.selection())
    }

    fn create_entity(
        &self,
        entity_type: EntityType,
        mutability: Mutability,
        data: EntityData,
    ) -> (Self, EntityKey) {
        let (content, key) = self.content().create_entity(entity_type, mutability, data);
        let last_change = self.last_change().unwrap_or(ChangeType::ApplyEntity);
        (self.push(content, self.selection().clone(), last_change), key)
    }

    fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.content().entity(key)
    }

    fn entity_at(&self, point: &SelectionPoint) -> Option<EntityKey> {
        self.content()
            .block_for_key(&point.key)
            .and_then(|block| block.entity_at(point.offset))
    }

    fn block_data(&self, key: &BlockKey, field: &str) -> Option<&str> {
        self.content()
            .block_for_key(key)
            .and_then(|block| block.data().get(field))
            .map(String::as_str)
    }

    fn insert_atomic_block(&self, entity: EntityKey, character: &str) -> Self {
        if !self.has_valid_selection() {
            return self.clone();
        }
        let mut content = self.content().clone();
        let at = modifier::remove_range(&mut content, self.selection());
        let after = modifier::insert_atomic_block(&mut content, &at, entity, character);
        self.push(
            content,
            Selection::collapsed(after.key, after.offset),
            ChangeType::InsertFragment,
        )
    }

    fn insert_text(&self, text: &str, entity: Option<EntityKey>) -> Self {
        if !self.has_valid_selection() {
            return self.clone();
        }
        let mut content = self.content().clone();
        let at = modifier::remove_range(&mut content, self.selection());
        let after = modifier::insert_text(&mut content, &at, text, &StyleSet::new(), entity);
        self.push(
            content,
            Selection::collapsed(after.key, after.offset),
            ChangeType::InsertCharacters,
        )
    }

    fn apply_entity(&self, entity: Option<EntityKey>) -> Self {
        rich::toggle_link(self, self.selection(), entity)
    }

    fn insert_characters(&self, text: &str) -> Self {
        editing::insert_characters(self, text)
    }

    fn insert_soft_newline(&self) -> Self {
        rich::insert_soft_newline(self)
    }

    fn toggle_inline_style(&self, style: InlineStyle) -> Self {
        rich::toggle_inline_style(self, style)
    }

    fn toggle_block_type(&self, block_type: &BlockType) -> Self {
        rich::toggle_block_type(self, block_type)
    }

    fn current_inline_style(&self) -> StyleSet {
        DocumentState::current_inline_style(self)
    }

    fn current_block_type(&self) -> BlockType {
        DocumentState::current_block_type(self)
    }

    fn handle_key_command(&self, command: &KeyCommand) -> Option<Self> {
        rich::handle_key_command(self, command)
    }

    fn apply_default_command(&self, command: &KeyCommand) -> Self {
        editing::apply_default_command(self, command)
    }

    fn on_tab(&self, shift: bool, max_depth: u8) -> Self {
        rich::on_tab(self, shift, max_depth)
    }

    fn move_selection(&self, motion: Motion, extend: bool) -> Self {
        editing::move_selection(self, motion, extend)
    }

    fn decorate(&self, block: &BlockKey) -> Result<Vec<DecoratedRange>> {
        let content = self.content();
        let block = content
            .block_for_key(block)
            .ok_or_else(|| Error::InvalidSelection(format!("no block with key '{}'", block)))?;
        self.decorator().decorate(block, content)
    }
}
