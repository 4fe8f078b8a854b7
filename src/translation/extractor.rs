/*!
 * Text node extraction.
 *
 * Walks a document tree in pre-order and yields one [`TranslationUnit`] per
 * text node. Structural nodes are traversed into but never emitted.
 */

use crate::document::{DocumentTree, Node, NodeId};

/// One text node queued for translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    /// Identity of the text node in its tree
    pub id: NodeId,
    /// Original text value
    pub source: String,
}

/// Lazy pre-order iterator over the text nodes of a tree
#[derive(Debug, Clone)]
pub struct TextUnits<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for TextUnits<'a> {
    type Item = TranslationUnit;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            self.stack.extend(node.children().iter().rev());
            if let Some(text) = node.value() {
                return Some(TranslationUnit {
                    id: node.id(),
                    source: text.to_string(),
                });
            }
        }
        None
    }
}

impl DocumentTree {
    /// Translation units in document order.
    ///
    /// Every call starts a fresh pass over the tree.
    pub fn text_units(&self) -> TextUnits<'_> {
        TextUnits { stack: vec![self.root()] }
    }
}
