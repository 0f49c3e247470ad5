//! Decorations: strategies that scan a block for ranges needing special
//! presentation.

use super::block::ContentBlock;
use super::content::ContentState;
use super::entity::EntityKey;
use crate::error::{Error, Result};
use std::fmt;

/// What a decorated range should render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationKind {
    Link,
}

/// A character range of a block matched by a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedRange {
    pub start: usize,
    pub end: usize,
    pub kind: DecorationKind,
    pub entity: Option<EntityKey>,
}

/// A range-matching rule.
pub trait DecoratorStrategy: fmt::Debug + Send + Sync {
    fn kind(&self) -> DecorationKind;

    /// Ranges of `block` this strategy claims.
    fn find_ranges(&self, block: &ContentBlock, content: &ContentState) -> Result<Vec<(usize, usize)>>;
}

/// Flags ranges whose entity is a LINK.
///
/// A character pointing at an entity missing from the table is an error
/// rather than a silent non-match.
pub fn find_link_entities(block: &ContentBlock, content: &ContentState) -> Result<Vec<(usize, usize)>> {
    if let Some(missing) = block
        .chars()
        .iter()
        .filter_map(|meta| meta.entity)
        .find(|key| content.entity(*key).is_none())
    {
        return Err(Error::MissingEntity {
            key: missing.to_string(),
        });
    }

    Ok(block.find_entity_ranges(|meta| {
        meta.entity
            .and_then(|key| content.entity(key))
            .map(|entity| entity.is_link())
            .unwrap_or(false)
    }))
}

#[derive(Debug, Default)]
pub struct LinkStrategy;

impl DecoratorStrategy for LinkStrategy {
    fn kind(&self) -> DecorationKind {
        DecorationKind::Link
    }

    fn find_ranges(&self, block: &ContentBlock, content: &ContentState) -> Result<Vec<(usize, usize)>> {
        find_link_entities(block, content)
    }
}

/// Ordered list of strategies. Earlier strategies win when ranges overlap.
#[derive(Debug, Default)]
pub struct CompositeDecorator {
    strategies: Vec<Box<dyn DecoratorStrategy>>,
}

impl CompositeDecorator {
    pub fn new(strategies: Vec<Box<dyn DecoratorStrategy>>) -> Self {
        Self { strategies }
    }

    /// The decorator used by the editor: links only.
    pub fn with_links() -> Self {
        Self::new(vec![Box::new(LinkStrategy)])
    }

    pub fn decorate(&self, block: &ContentBlock, content: &ContentState) -> Result<Vec<DecoratedRange>> {
        let mut claimed = vec![false; block.len()];
        let mut ranges = Vec::new();

        for strategy in &self.strategies {
            for (start, end) in strategy.find_ranges(block, content)? {
                let end = end.min(block.len());
                if start >= end || claimed[start..end].iter().any(|c| *c) {
                    continue;
                }
                claimed[start..end].iter_mut().for_each(|c| *c = true);
                ranges.push(DecoratedRange {
                    start,
                    end,
                    kind: strategy.kind(),
                    entity: block.entity_at(start),
                });
            }
        }
        ranges.sort_by_key(|r| r.start);
        Ok(ranges)
    }
}
