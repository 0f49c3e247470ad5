//! Draft files: title, summary and the document in its raw JSON form.

use crate::document::raw::{from_raw, to_raw, RawContent};
use crate::document::{CompositeDecorator, DocumentModel, DocumentState};
use crate::editor::EditorPanel;
use crate::error::{Error, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Default file name offered when saving a new draft.
pub const DEFAULT_DRAFT_NAME: &str = "draft.json";

/// A saved editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub content: RawContent,
}

impl Draft {
    /// Capture the panel's title, summary and document.
    pub fn from_panel<M: DocumentModel>(panel: &EditorPanel<M>) -> Self {
        Self {
            title: panel.title().to_string(),
            summary: panel.summary().to_string(),
            content: to_raw(panel.document().view()),
        }
    }

    /// Rebuild a document snapshot with link decoration.
    pub fn to_document(&self) -> Result<DocumentState> {
        let content = from_raw(&self.content)?;
        Ok(DocumentState::create_with_content(
            content,
            Arc::new(CompositeDecorator::with_links()),
        ))
    }

    /// File name derived from the title, for save dialogs.
    pub fn suggested_file_name(&self) -> String {
        let stem: String = self
            .title
            .trim()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .split('-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();
        if stem.is_empty() {
            DEFAULT_DRAFT_NAME.to_string()
        } else {
            format!("{}.json", stem)
        }
    }
}

/// Write a draft as pretty JSON, replacing any existing file.
pub fn save_draft(path: &Path, draft: &Draft) -> Result<()> {
    let json = serde_json::to_string_pretty(draft)
        .map_err(|e| Error::InvalidDraft(format!("cannot serialize draft: {}", e)))?;

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json).map_err(|e| Error::FileWrite {
        path: temp_path.clone(),
        source: e,
    })?;
    fs::rename(&temp_path, path).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("Draft saved to {}", path.display());
    Ok(())
}

/// Read a draft written by `save_draft`.
pub fn load_draft(path: &Path) -> Result<Draft> {
    debug!("Loading draft from {}", path.display());
    let contents = fs::read_to_string(path)?;
    let draft: Draft = serde_json::from_str(&contents)
        .map_err(|e| Error::InvalidDraft(format!("{}: {}", path.display(), e)))?;
    // Reject drafts whose content does not resolve before handing them out
    from_raw(&draft.content)?;
    Ok(draft)
}
