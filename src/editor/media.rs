//! Media descriptors, the media URL prompt and the atomic-block renderer.

use crate::document::{BlockType, ContentBlock, ContentState, EntityData, EntityType};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ─────────────────────────────────────────────────────────────────────────────
// Media Descriptor
// ─────────────────────────────────────────────────────────────────────────────

/// A completed upload, ready to be embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub thumbnail_url: String,
    pub source_file: String,
}

impl MediaDescriptor {
    pub fn new(thumbnail_url: impl Into<String>, source_file: impl Into<String>) -> Self {
        Self {
            thumbnail_url: thumbnail_url.into(),
            source_file: source_file.into(),
        }
    }

    /// Descriptor for a local file, used as its own thumbnail.
    pub fn from_path(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(format!("file://{}", location), location)
    }

    pub fn validate(&self) -> Result<()> {
        if self.thumbnail_url.trim().is_empty() {
            return Err(Error::MalformedUpload(
                "descriptor has no thumbnail URL".to_string(),
            ));
        }
        if self.source_file.trim().is_empty() {
            return Err(Error::MalformedUpload(format!(
                "descriptor for '{}' has no source file",
                self.thumbnail_url
            )));
        }
        Ok(())
    }

    /// Entity data embedding this upload.
    pub fn entity_data(&self) -> EntityData {
        EntityData::Media {
            src: self.thumbnail_url.clone(),
            file: Some(self.source_file.clone()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// URL Prompt
// ─────────────────────────────────────────────────────────────────────────────

/// Keys the URL input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKey {
    Enter,
    Escape,
    Other,
}

/// Media URL prompt: hidden → prompted → editing → hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UrlPrompt {
    #[default]
    Hidden,
    Prompted {
        kind: EntityType,
    },
    Editing {
        kind: EntityType,
        value: String,
    },
}

impl UrlPrompt {
    /// Show the prompt for an embed of `kind` with an empty value.
    pub fn prompt(&mut self, kind: EntityType) {
        *self = UrlPrompt::Prompted { kind };
    }

    /// Update the typed value. Ignored while hidden.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let kind = match self {
            UrlPrompt::Hidden => return,
            UrlPrompt::Prompted { kind } | UrlPrompt::Editing { kind, .. } => kind.clone(),
        };
        *self = UrlPrompt::Editing {
            kind,
            value: value.into(),
        };
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, UrlPrompt::Hidden)
    }

    /// Kind and current value, if shown.
    pub fn pending(&self) -> Option<(&EntityType, &str)> {
        match self {
            UrlPrompt::Hidden => None,
            UrlPrompt::Prompted { kind } => Some((kind, "")),
            UrlPrompt::Editing { kind, value } => Some((kind, value.as_str())),
        }
    }

    /// Hide the prompt, returning what it held.
    pub fn take(&mut self) -> Option<(EntityType, String)> {
        match std::mem::take(self) {
            UrlPrompt::Hidden => None,
            UrlPrompt::Prompted { kind } => Some((kind, String::new())),
            UrlPrompt::Editing { kind, value } => Some((kind, value)),
        }
    }

    pub fn cancel(&mut self) {
        *self = UrlPrompt::Hidden;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Media Block Renderer
// ─────────────────────────────────────────────────────────────────────────────

/// What an atomic block displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaBlock {
    Image { src: String, file: Option<String> },
    Video { src: String, file: Option<String> },
    /// Thematic break
    Divider,
    /// Any other embed kind, shown by name
    Embed { kind: String, src: Option<String> },
}

/// Resolve the media an atomic block embeds. Non-atomic blocks yield `None`.
pub fn media_block_for(content: &ContentState, block: &ContentBlock) -> Result<Option<MediaBlock>> {
    if *block.block_type() != BlockType::Atomic {
        return Ok(None);
    }
    let key = block.entity_at(0).ok_or_else(|| Error::MissingEntity {
        key: format!("<none on atomic block {}>", block.key()),
    })?;
    let entity = content.entity(key).ok_or_else(|| Error::MissingEntity {
        key: key.to_string(),
    })?;

    let (src, file) = match &entity.data {
        EntityData::Media { src, file } => (Some(src.clone()), file.clone()),
        EntityData::Link { url } => (Some(url.clone()), None),
        EntityData::Empty {} => (None, None),
    };
    let media = match &entity.entity_type {
        EntityType::Image => MediaBlock::Image {
            src: src.unwrap_or_default(),
            file,
        },
        EntityType::Video => MediaBlock::Video {
            src: src.unwrap_or_default(),
            file,
        },
        EntityType::Dash => MediaBlock::Divider,
        other => MediaBlock::Embed {
            kind: other.as_str().to_string(),
            src,
        },
    };
    Ok(Some(media))
}
