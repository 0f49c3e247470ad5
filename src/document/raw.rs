//! Raw JSON form of a document's content.
//!
//! Blocks carry their inline styles and entities as offset/length ranges;
//! the entity table is keyed by the entity's numeric key rendered as a
//! string.

use super::block::{BlockKey, BlockType, CharMeta, ContentBlock, InlineStyle};
use super::content::ContentState;
use super::entity::{Entity, EntityKey};
use crate::error::{Error, Result};
use crate::string_utils::char_count;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInlineStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: InlineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntityRange {
    pub offset: usize,
    pub length: usize,
    pub key: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub key: String,
    pub text: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default)]
    pub depth: u8,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawInlineStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<RawEntityRange>,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContent {
    pub blocks: Vec<RawBlock>,
    #[serde(default)]
    pub entity_map: BTreeMap<String, Entity>,
}

/// Convert content into its raw form.
pub fn to_raw(content: &ContentState) -> RawContent {
    let blocks = content
        .blocks()
        .iter()
        .map(|block| {
            let mut inline_style_ranges = Vec::new();
            for style in InlineStyle::all() {
                for (start, end) in block.find_entity_ranges(|meta| meta.style.contains(style)) {
                    inline_style_ranges.push(RawInlineStyleRange {
                        offset: start,
                        length: end - start,
                        style: *style,
                    });
                }
            }
            // Style runs were split on entity changes too; merge touching runs.
            inline_style_ranges = merge_style_ranges(inline_style_ranges);

            let entity_ranges = block
                .find_entity_ranges(|meta| meta.entity.is_some())
                .into_iter()
                .filter_map(|(start, end)| {
                    block.entity_at(start).map(|key| RawEntityRange {
                        offset: start,
                        length: end - start,
                        key: key.raw(),
                    })
                })
                .collect();

            RawBlock {
                key: block.key().to_string(),
                text: block.text().to_string(),
                block_type: block.block_type().clone(),
                depth: block.depth(),
                inline_style_ranges,
                entity_ranges,
                data: block.data().clone(),
            }
        })
        .collect();

    let entity_map = content
        .entities()
        .iter()
        .map(|(key, entity)| (key.to_string(), entity.clone()))
        .collect();

    RawContent { blocks, entity_map }
}

fn merge_style_ranges(mut ranges: Vec<RawInlineStyleRange>) -> Vec<RawInlineStyleRange> {
    ranges.sort_by_key(|r| (r.style, r.offset));
    let mut merged: Vec<RawInlineStyleRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if last.style == range.style && last.offset + last.length == range.offset => {
                last.length += range.length;
            }
            _ => merged.push(range),
        }
    }
    merged.sort_by_key(|r| (r.offset, r.style));
    merged
}

/// Rebuild content from its raw form.
///
/// Entity ranges must reference entries of the entity map.
pub fn from_raw(raw: &RawContent) -> Result<ContentState> {
    let mut entities = BTreeMap::new();
    for (key, entity) in &raw.entity_map {
        let parsed: u64 = key
            .parse()
            .map_err(|_| Error::InvalidDraft(format!("entity key '{}' is not a number", key)))?;
        entities.insert(EntityKey::new(parsed), entity.clone());
    }

    let mut blocks = Vec::with_capacity(raw.blocks.len());
    for raw_block in &raw.blocks {
        let len = char_count(&raw_block.text);
        let mut chars = vec![CharMeta::default(); len];

        for range in &raw_block.inline_style_ranges {
            let end = range.offset.saturating_add(range.length).min(len);
            for meta in chars.iter_mut().take(end).skip(range.offset) {
                meta.style.insert(range.style);
            }
        }
        for range in &raw_block.entity_ranges {
            let key = EntityKey::new(range.key);
            if !entities.contains_key(&key) {
                return Err(Error::MissingEntity {
                    key: key.to_string(),
                });
            }
            let end = range.offset.saturating_add(range.length).min(len);
            for meta in chars.iter_mut().take(end).skip(range.offset) {
                meta.entity = Some(key);
            }
        }

        let mut block = ContentBlock::with_chars(
            BlockKey::new(raw_block.key.clone()),
            raw_block.block_type.clone(),
            raw_block.text.clone(),
            chars,
        );
        block.set_depth(raw_block.depth);
        block.set_data(raw_block.data.clone());
        blocks.push(block);
    }

    Ok(ContentState::from_parts(blocks, entities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::entity::{EntityData, EntityType, Mutability};
    use crate::document::modifier;
    use crate::document::selection::SelectionPoint;

    fn sample() -> ContentState {
        let content = ContentState::from_text("hello world");
        let (mut content, link) = content.create_entity(
            EntityType::Link,
            Mutability::Mutable,
            EntityData::link("https://x.test"),
        );
        let key = content.first_block().key().clone();
        let sel = content.select(
            SelectionPoint::new(key.clone(), 0),
            SelectionPoint::new(key.clone(), 5),
        );
        modifier::apply_inline_style(&mut content, &sel, InlineStyle::Bold, true);
        let tail = content.select(SelectionPoint::new(key.clone(), 6), SelectionPoint::new(key, 11));
        modifier::apply_entity(&mut content, &tail, Some(link));
        content
    }

    #[test]
    fn test_to_raw_shape() {
        let raw = to_raw(&sample());
        let json = serde_json::to_value(&raw).unwrap();
        let block = &json["blocks"][0];
        assert_eq!(block["type"], "unstyled");
        assert_eq!(block["inlineStyleRanges"][0]["style"], "BOLD");
        assert_eq!(block["inlineStyleRanges"][0]["length"], 5);
        assert_eq!(block["entityRanges"][0]["offset"], 6);
        assert_eq!(json["entityMap"]["0"]["type"], "LINK");
        assert_eq!(json["entityMap"]["0"]["data"]["url"], "https://x.test");
    }

    #[test]
    fn test_from_raw_restores_content() {
        let original = sample();
        let restored = from_raw(&to_raw(&original)).unwrap();
        assert_eq!(restored.blocks(), original.blocks());
        assert_eq!(restored.entities(), original.entities());
    }

    #[test]
    fn test_style_range_spanning_entity_boundary_is_merged() {
        let mut content = sample();
        let key = content.first_block().key().clone();
        let all = content.select(SelectionPoint::new(key.clone(), 0), SelectionPoint::new(key, 11));
        modifier::apply_inline_style(&mut content, &all, InlineStyle::Italic, true);
        let raw = to_raw(&content);
        let italic: Vec<_> = raw.blocks[0]
            .inline_style_ranges
            .iter()
            .filter(|r| r.style == InlineStyle::Italic)
            .collect();
        assert_eq!(italic.len(), 1);
        assert_eq!(italic[0].length, 11);
    }

    #[test]
    fn test_from_raw_rejects_unknown_entity() {
        let raw: RawContent = serde_json::from_str(
            r#"{"blocks":[{"key":"a","text":"hi","type":"unstyled",
                "entityRanges":[{"offset":0,"length":2,"key":3}]}],"entityMap":{}}"#,
        )
        .unwrap();
        assert!(matches!(from_raw(&raw), Err(Error::MissingEntity { .. })));
    }

    #[test]
    fn test_from_raw_ignores_ranges_past_block_end() {
        let mut raw: RawContent = serde_json::from_str(
            r#"{"blocks":[{"key":"a","text":"hi","type":"unstyled",
                "inlineStyleRanges":[{"offset":0,"length":2,"style":"BOLD"}],
                "entityRanges":[{"offset":0,"length":2,"key":0}]}],
                "entityMap":{"0":{"type":"LINK","mutability":"MUTABLE","data":{"url":"https://x.test"}}}}"#,
        )
        .unwrap();
        raw.blocks[0].inline_style_ranges[0].offset = usize::MAX;
        raw.blocks[0].entity_ranges[0].offset = usize::MAX;

        let content = from_raw(&raw).unwrap();
        let block = content.first_block();
        assert_eq!(block.text(), "hi");
        assert!(block.chars().iter().all(|c| c.style.is_empty() && c.entity.is_none()));
    }

    #[test]
    fn test_from_raw_keeps_unknown_block_type() {
        let raw: RawContent = serde_json::from_str(
            r#"{"blocks":[{"key":"a","text":"hi","type":"pull-quote"}]}"#,
        )
        .unwrap();
        let content = from_raw(&raw).unwrap();
        assert_eq!(
            content.first_block().block_type(),
            &BlockType::Custom("pull-quote".into())
        );
    }
}
