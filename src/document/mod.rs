//! Rich-text document model
//!
//! This module provides the document model the editor panel works
//! against: immutable snapshots of block content, selection and an entity
//! table, plus the transforms that produce new snapshots.
//!
//! # Layout
//! - `block`, `entity`, `selection`, `content`: the data model
//! - `modifier`: low-level content transforms
//! - `rich`, `editing`: snapshot-level editing (style toggles, key commands,
//!   typing, motion)
//! - `decorator`: range-matching strategies for link decoration
//! - `raw`: JSON form of the content
//! - `model`: the `DocumentModel` trait the panel is generic over
//!
//! # Example
//! ```ignore
//! use crate::document::{DocumentModel, DocumentState, InlineStyle};
//!
//! let state = DocumentState::default().insert_characters("Hello");
//! let state = state.toggle_inline_style(InlineStyle::Bold);
//! ```

mod block;
mod command;
mod content;
mod decorator;
mod editing;
mod entity;
mod model;
mod modifier;
pub mod raw;
mod rich;
mod selection;
mod state;

pub use block::{BlockKey, BlockType, CharMeta, ContentBlock, InlineStyle, StyleSet};
pub use command::{HandleResult, KeyCommand, Motion};
pub use content::ContentState;
pub use decorator::{
    find_link_entities, CompositeDecorator, DecoratedRange, DecorationKind, DecoratorStrategy,
};
pub use editing::select_all;
pub use entity::{Entity, EntityData, EntityKey, EntityType, Mutability};
pub use model::DocumentModel;
pub use selection::{Selection, SelectionPoint};
pub use state::{ChangeType, DocumentState};
