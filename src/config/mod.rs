//! Configuration module for Inkpanel
//!
//! This module handles user preferences and the editor panel's initial
//! props, including serialization to JSON and persistent storage in the
//! platform-specific config directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
