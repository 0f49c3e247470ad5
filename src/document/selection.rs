//! Selection description: anchor and focus points inside blocks.

use super::block::BlockKey;

/// A position inside a block, counted in characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionPoint {
    pub key: BlockKey,
    pub offset: usize,
}

impl SelectionPoint {
    pub fn new(key: BlockKey, offset: usize) -> Self {
        Self { key, offset }
    }
}

/// The document selection.
///
/// `anchor` is where the selection started and `focus` where it ends; when
/// `is_backward` is set the focus precedes the anchor in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    anchor: SelectionPoint,
    focus: SelectionPoint,
    is_backward: bool,
}

impl Selection {
    /// A plain cursor.
    pub fn collapsed(key: BlockKey, offset: usize) -> Self {
        let point = SelectionPoint::new(key, offset);
        Self {
            anchor: point.clone(),
            focus: point,
            is_backward: false,
        }
    }

    /// A range. Callers that know document order should pass `is_backward`;
    /// `ContentState::select` computes it.
    pub fn range(anchor: SelectionPoint, focus: SelectionPoint, is_backward: bool) -> Self {
        Self {
            anchor,
            focus,
            is_backward,
        }
    }

    pub fn anchor(&self) -> &SelectionPoint {
        &self.anchor
    }

    pub fn focus(&self) -> &SelectionPoint {
        &self.focus
    }

    pub fn is_backward(&self) -> bool {
        self.is_backward
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn start(&self) -> &SelectionPoint {
        if self.is_backward {
            &self.focus
        } else {
            &self.anchor
        }
    }

    pub fn end(&self) -> &SelectionPoint {
        if self.is_backward {
            &self.anchor
        } else {
            &self.focus
        }
    }

    /// Collapse onto the start point.
    pub fn collapse_to_start(&self) -> Self {
        Self::collapsed(self.start().key.clone(), self.start().offset)
    }

    /// Collapse onto the end point.
    pub fn collapse_to_end(&self) -> Self {
        Self::collapsed(self.end().key.clone(), self.end().offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_selection() {
        let sel = Selection::collapsed(BlockKey::new("a"), 3);
        assert!(sel.is_collapsed());
        assert_eq!(sel.start(), sel.end());
    }

    #[test]
    fn test_backward_range_orders_start_and_end() {
        let sel = Selection::range(
            SelectionPoint::new(BlockKey::new("a"), 5),
            SelectionPoint::new(BlockKey::new("a"), 1),
            true,
        );
        assert!(!sel.is_collapsed());
        assert_eq!(sel.start().offset, 1);
        assert_eq!(sel.end().offset, 5);
        assert_eq!(sel.collapse_to_start().anchor().offset, 1);
    }
}
