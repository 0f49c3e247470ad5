//! Block presentation classes.

use crate::document::BlockType;

/// Presentation class of a block on the document surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyleClass {
    Code,
    Quote,
    /// Embedded media
    Atomic,
    /// Default paragraph style
    Paragraph,
}

impl BlockStyleClass {
    /// Class name used in HTML export.
    pub fn class_name(&self) -> &'static str {
        match self {
            BlockStyleClass::Code => "ink-code",
            BlockStyleClass::Quote => "ink-blockquote",
            BlockStyleClass::Atomic => "ink-atomic",
            BlockStyleClass::Paragraph => "ink-unstyle",
        }
    }
}

/// Classify a block by its type alone.
pub fn block_style_class(block_type: &BlockType) -> BlockStyleClass {
    match block_type {
        BlockType::CodeBlock => BlockStyleClass::Code,
        BlockType::Blockquote => BlockStyleClass::Quote,
        BlockType::Atomic => BlockStyleClass::Atomic,
        _ => BlockStyleClass::Paragraph,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_is_code() {
        assert_eq!(block_style_class(&BlockType::CodeBlock), BlockStyleClass::Code);
        assert_eq!(
            block_style_class(&BlockType::from("code-block")),
            BlockStyleClass::Code
        );
    }

    #[test]
    fn test_quote_and_atomic() {
        assert_eq!(block_style_class(&BlockType::Blockquote), BlockStyleClass::Quote);
        assert_eq!(block_style_class(&BlockType::Atomic), BlockStyleClass::Atomic);
    }

    #[test]
    fn test_everything_else_is_paragraph() {
        for name in ["unstyled", "header-one", "ordered-list-item", "pull-quote", ""] {
            assert_eq!(
                block_style_class(&BlockType::from(name)),
                BlockStyleClass::Paragraph,
                "{name}"
            );
        }
    }

    #[test]
    fn test_class_names() {
        assert_eq!(BlockStyleClass::Code.class_name(), "ink-code");
        assert_eq!(BlockStyleClass::Paragraph.class_name(), "ink-unstyle");
    }
}
