//! File operations module for Inkpanel
//!
//! This module provides native file dialogs and the draft file format.

pub mod dialogs;
pub mod draft;

pub use draft::{load_draft, save_draft, Draft, DEFAULT_DRAFT_NAME};
