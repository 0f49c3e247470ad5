//! Entities: typed records attached to character ranges or atomic blocks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque key into a content's entity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(u64);

impl EntityKey {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub(crate) fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entity type tag.
///
/// Custom tags come from the media URL prompt, where the caller picks the
/// kind of embed by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    Image,
    Video,
    /// Thematic break
    Dash,
    Link,
    Other(String),
}

impl EntityType {
    pub fn as_str(&self) -> &str {
        match self {
            EntityType::Image => "image",
            EntityType::Video => "video",
            EntityType::Dash => "dash",
            EntityType::Link => "LINK",
            EntityType::Other(name) => name,
        }
    }
}

impl From<&str> for EntityType {
    fn from(name: &str) -> Self {
        match name {
            "image" => EntityType::Image,
            "video" => EntityType::Video,
            "dash" => EntityType::Dash,
            "LINK" => EntityType::Link,
            other => EntityType::Other(other.to_string()),
        }
    }
}

impl From<String> for EntityType {
    fn from(name: String) -> Self {
        EntityType::from(name.as_str())
    }
}

impl From<EntityType> for String {
    fn from(entity_type: EntityType) -> Self {
        entity_type.as_str().to_string()
    }
}

/// Whether an entity's backing data may be edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mutability {
    Mutable,
    Immutable,
}

/// Data carried by an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityData {
    Link {
        url: String,
    },
    Media {
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<String>,
    },
    Empty {},
}

impl EntityData {
    pub fn link(url: impl Into<String>) -> Self {
        EntityData::Link { url: url.into() }
    }

    pub fn empty() -> Self {
        EntityData::Empty {}
    }

    /// URL of a link entity.
    pub fn url(&self) -> Option<&str> {
        match self {
            EntityData::Link { url } => Some(url),
            _ => None,
        }
    }

    /// Source of a media entity.
    pub fn src(&self) -> Option<&str> {
        match self {
            EntityData::Media { src, .. } => Some(src),
            _ => None,
        }
    }
}

/// An entry in the entity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub mutability: Mutability,
    pub data: EntityData,
}

impl Entity {
    pub fn new(entity_type: EntityType, mutability: Mutability, data: EntityData) -> Self {
        Self {
            entity_type,
            mutability,
            data,
        }
    }

    pub fn is_link(&self) -> bool {
        self.entity_type == EntityType::Link
    }
}
