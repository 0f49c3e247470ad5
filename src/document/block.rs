//! Content blocks and per-character metadata.

use super::entity::EntityKey;
use crate::string_utils::{char_count, char_slice};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Block Keys and Types
// ─────────────────────────────────────────────────────────────────────────────

/// Stable identifier of a block within a content state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Block type. Unknown names are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Unstyled,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    HeaderFour,
    HeaderFive,
    HeaderSix,
    Blockquote,
    CodeBlock,
    UnorderedListItem,
    OrderedListItem,
    /// A single indivisible unit embedding one entity
    Atomic,
    Custom(String),
}

impl Default for BlockType {
    fn default() -> Self {
        BlockType::Unstyled
    }
}

impl BlockType {
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Unstyled => "unstyled",
            BlockType::HeaderOne => "header-one",
            BlockType::HeaderTwo => "header-two",
            BlockType::HeaderThree => "header-three",
            BlockType::HeaderFour => "header-four",
            BlockType::HeaderFive => "header-five",
            BlockType::HeaderSix => "header-six",
            BlockType::Blockquote => "blockquote",
            BlockType::CodeBlock => "code-block",
            BlockType::UnorderedListItem => "unordered-list-item",
            BlockType::OrderedListItem => "ordered-list-item",
            BlockType::Atomic => "atomic",
            BlockType::Custom(name) => name,
        }
    }

    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            BlockType::UnorderedListItem | BlockType::OrderedListItem
        )
    }

    /// Heading level 1-6, if this is a header block.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            BlockType::HeaderOne => Some(1),
            BlockType::HeaderTwo => Some(2),
            BlockType::HeaderThree => Some(3),
            BlockType::HeaderFour => Some(4),
            BlockType::HeaderFive => Some(5),
            BlockType::HeaderSix => Some(6),
            _ => None,
        }
    }
}

impl From<&str> for BlockType {
    fn from(name: &str) -> Self {
        match name {
            "unstyled" => BlockType::Unstyled,
            "header-one" => BlockType::HeaderOne,
            "header-two" => BlockType::HeaderTwo,
            "header-three" => BlockType::HeaderThree,
            "header-four" => BlockType::HeaderFour,
            "header-five" => BlockType::HeaderFive,
            "header-six" => BlockType::HeaderSix,
            "blockquote" => BlockType::Blockquote,
            "code-block" => BlockType::CodeBlock,
            "unordered-list-item" => BlockType::UnorderedListItem,
            "ordered-list-item" => BlockType::OrderedListItem,
            "atomic" => BlockType::Atomic,
            other => BlockType::Custom(other.to_string()),
        }
    }
}

impl From<String> for BlockType {
    fn from(name: String) -> Self {
        BlockType::from(name.as_str())
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        block_type.as_str().to_string()
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Styles
// ─────────────────────────────────────────────────────────────────────────────

/// Character-level style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
}

impl InlineStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            InlineStyle::Bold => "BOLD",
            InlineStyle::Italic => "ITALIC",
            InlineStyle::Underline => "UNDERLINE",
            InlineStyle::Code => "CODE",
            InlineStyle::Strikethrough => "STRIKETHROUGH",
        }
    }

    pub fn all() -> &'static [InlineStyle] {
        &[
            InlineStyle::Bold,
            InlineStyle::Italic,
            InlineStyle::Underline,
            InlineStyle::Code,
            InlineStyle::Strikethrough,
        ]
    }
}

/// Set of inline styles active on a character.
pub type StyleSet = BTreeSet<InlineStyle>;

/// Metadata stored for every character of a block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharMeta {
    pub style: StyleSet,
    pub entity: Option<EntityKey>,
}

impl CharMeta {
    pub fn new(style: StyleSet, entity: Option<EntityKey>) -> Self {
        Self { style, entity }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Content Block
// ─────────────────────────────────────────────────────────────────────────────

/// A paragraph-level unit of content.
///
/// `chars` always holds exactly one entry per character of `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    key: BlockKey,
    block_type: BlockType,
    text: String,
    chars: Vec<CharMeta>,
    depth: u8,
    data: BTreeMap<String, String>,
}

impl ContentBlock {
    /// Create a block with unstyled, entity-free characters.
    pub fn new(key: BlockKey, block_type: BlockType, text: impl Into<String>) -> Self {
        let text = text.into();
        let chars = vec![CharMeta::default(); char_count(&text)];
        Self {
            key,
            block_type,
            text,
            chars,
            depth: 0,
            data: BTreeMap::new(),
        }
    }

    /// Create a block from text and explicit metadata.
    ///
    /// Metadata is padded or truncated to match the character count.
    pub fn with_chars(
        key: BlockKey,
        block_type: BlockType,
        text: impl Into<String>,
        mut chars: Vec<CharMeta>,
    ) -> Self {
        let text = text.into();
        chars.resize(char_count(&text), CharMeta::default());
        Self {
            key,
            block_type,
            text,
            chars,
            depth: 0,
            data: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn block_type(&self) -> &BlockType {
        &self.block_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> &[CharMeta] {
        &self.chars
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn data(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Text between two character offsets.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        char_slice(&self.text, start, end)
    }

    pub fn entity_at(&self, offset: usize) -> Option<EntityKey> {
        self.chars.get(offset).and_then(|meta| meta.entity)
    }

    pub fn style_at(&self, offset: usize) -> StyleSet {
        self.chars
            .get(offset)
            .map(|meta| meta.style.clone())
            .unwrap_or_default()
    }

    /// Find maximal runs of characters that satisfy `predicate` and share
    /// the same entity.
    ///
    /// Returns `(start, end)` character ranges, end exclusive.
    pub fn find_entity_ranges<F>(&self, mut predicate: F) -> Vec<(usize, usize)>
    where
        F: FnMut(&CharMeta) -> bool,
    {
        let mut ranges = Vec::new();
        let mut run: Option<(usize, Option<EntityKey>)> = None;

        for (i, meta) in self.chars.iter().enumerate() {
            let matches = predicate(meta);
            if let Some((start, entity)) = run {
                if matches && entity == meta.entity {
                    continue;
                }
                ranges.push((start, i));
                run = None;
            }
            if matches {
                run = Some((i, meta.entity));
            }
        }
        if let Some((start, _)) = run {
            ranges.push((start, self.chars.len()));
        }
        ranges
    }

    /// Runs of characters sharing identical style and entity.
    pub fn style_runs(&self) -> Vec<(usize, usize, &CharMeta)> {
        let mut runs = Vec::new();
        let mut start = 0;
        for i in 1..=self.chars.len() {
            if i == self.chars.len() || self.chars[i] != self.chars[start] {
                runs.push((start, i, &self.chars[start]));
                start = i;
            }
        }
        runs
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Copy-on-write builders used by the modifier functions
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn set_key(&mut self, key: BlockKey) {
        self.key = key;
    }

    pub(crate) fn set_block_type(&mut self, block_type: BlockType) {
        self.block_type = block_type;
    }

    pub(crate) fn set_depth(&mut self, depth: u8) {
        self.depth = depth;
    }

    pub(crate) fn set_data(&mut self, data: BTreeMap<String, String>) {
        self.data = data;
    }

    pub(crate) fn chars_mut(&mut self) -> &mut Vec<CharMeta> {
        &mut self.chars
    }

    /// Replace text and metadata together, keeping them in step.
    pub(crate) fn set_content(&mut self, text: String, chars: Vec<CharMeta>) {
        debug_assert_eq!(char_count(&text), chars.len());
        self.text = text;
        self.chars = chars;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linked_block() -> ContentBlock {
        let link = EntityKey::new(1);
        let mut chars = vec![CharMeta::default(); 11];
        for meta in &mut chars[6..11] {
            meta.entity = Some(link);
        }
        ContentBlock::with_chars(
            BlockKey::new("a"),
            BlockType::Unstyled,
            "hello world",
            chars,
        )
    }

    #[test]
    fn test_block_type_round_trip_names() {
        assert_eq!(BlockType::from("code-block"), BlockType::CodeBlock);
        assert_eq!(BlockType::CodeBlock.as_str(), "code-block");
        assert_eq!(
            BlockType::from("pull-quote"),
            BlockType::Custom("pull-quote".to_string())
        );
        assert_eq!(BlockType::from("pull-quote").as_str(), "pull-quote");
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(BlockType::HeaderThree.heading_level(), Some(3));
        assert_eq!(BlockType::Blockquote.heading_level(), None);
    }

    #[test]
    fn test_new_block_has_meta_per_char() {
        let block = ContentBlock::new(BlockKey::new("k"), BlockType::Unstyled, "på");
        assert_eq!(block.len(), 2);
        assert!(block.chars().iter().all(|m| m.entity.is_none()));
    }

    #[test]
    fn test_find_entity_ranges() {
        let block = linked_block();
        let ranges = block.find_entity_ranges(|meta| meta.entity.is_some());
        assert_eq!(ranges, vec![(6, 11)]);
    }

    #[test]
    fn test_find_entity_ranges_splits_adjacent_entities() {
        let mut chars = vec![CharMeta::default(); 4];
        chars[0].entity = Some(EntityKey::new(1));
        chars[1].entity = Some(EntityKey::new(1));
        chars[2].entity = Some(EntityKey::new(2));
        chars[3].entity = Some(EntityKey::new(2));
        let block = ContentBlock::with_chars(BlockKey::new("b"), BlockType::Unstyled, "abcd", chars);
        let ranges = block.find_entity_ranges(|meta| meta.entity.is_some());
        assert_eq!(ranges, vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn test_style_runs() {
        let block = linked_block();
        let runs: Vec<(usize, usize)> = block.style_runs().iter().map(|r| (r.0, r.1)).collect();
        assert_eq!(runs, vec![(0, 6), (6, 11)]);
    }

    #[test]
    fn test_with_chars_pads_metadata() {
        let block = ContentBlock::with_chars(
            BlockKey::new("c"),
            BlockType::Unstyled,
            "abc",
            vec![CharMeta::default()],
        );
        assert_eq!(block.chars().len(), 3);
    }
}
