//! Named editing commands produced by key bindings.

use std::fmt;

/// A command resolved from a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCommand {
    /// Line break inside the current block
    SoftEnter,
    SplitBlock,
    Backspace,
    BackspaceWord,
    Delete,
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
    /// A name no handler knows; always left to default behaviour
    Custom(String),
}

impl KeyCommand {
    pub fn as_str(&self) -> &str {
        match self {
            KeyCommand::SoftEnter => "soft-enter",
            KeyCommand::SplitBlock => "split-block",
            KeyCommand::Backspace => "backspace",
            KeyCommand::BackspaceWord => "backspace-word",
            KeyCommand::Delete => "delete",
            KeyCommand::Bold => "bold",
            KeyCommand::Italic => "italic",
            KeyCommand::Underline => "underline",
            KeyCommand::Code => "code",
            KeyCommand::Strikethrough => "strikethrough",
            KeyCommand::Custom(name) => name,
        }
    }
}

impl From<&str> for KeyCommand {
    fn from(name: &str) -> Self {
        match name {
            "soft-enter" => KeyCommand::SoftEnter,
            "split-block" => KeyCommand::SplitBlock,
            "backspace" => KeyCommand::Backspace,
            "backspace-word" => KeyCommand::BackspaceWord,
            "delete" => KeyCommand::Delete,
            "bold" => KeyCommand::Bold,
            "italic" => KeyCommand::Italic,
            "underline" => KeyCommand::Underline,
            "code" => KeyCommand::Code,
            "strikethrough" => KeyCommand::Strikethrough,
            other => KeyCommand::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for KeyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a key command was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    Handled,
    NotHandled,
}

/// Cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    /// Previous block
    Up,
    /// Next block
    Down,
    BlockStart,
    BlockEnd,
    DocumentStart,
    DocumentEnd,
}
