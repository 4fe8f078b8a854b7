/*!
 * Owned document tree.
 *
 * The tree keeps the adapter's payload for every node untouched so that
 * serialization reproduces the structure; only text node values can be
 * changed, and only through [`DocumentTree::replace_text_values`].
 *
 * A text value may span soft line breaks, so it can contain `\n`.
 */

use std::collections::HashMap;
use std::fmt;

use comrak::nodes::{NodeValue, Sourcepos};

use crate::errors::DocumentError;

/// Stable identity of a node within one parsed tree
///
/// Ids are pre-order positions assigned at parse time, so they are unique
/// per tree and do not depend on node values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a node carries translatable text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Literal human-readable text
    Text,
    /// Anything else: blocks, inline containers, code, HTML
    Structural,
}

/// A node of the document tree
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    payload: NodeValue,
    sourcepos: Sourcepos,
    children: Vec<Node>,
}

impl Node {
    pub(crate) fn new(id: NodeId, payload: NodeValue, sourcepos: Sourcepos, children: Vec<Node>) -> Self {
        Self { id, payload, sourcepos, children }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        match self.payload {
            NodeValue::Text(_) => NodeKind::Text,
            _ => NodeKind::Structural,
        }
    }

    /// Text value, present only for text nodes
    pub fn value(&self) -> Option<&str> {
        match &self.payload {
            NodeValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn payload(&self) -> &NodeValue {
        &self.payload
    }

    pub(crate) fn sourcepos(&self) -> Sourcepos {
        self.sourcepos
    }

    /// Extend a text node with the following run; false for other nodes
    pub(crate) fn append_text(&mut self, value: &str, sourcepos: Sourcepos) -> bool {
        match &mut self.payload {
            NodeValue::Text(text) => {
                text.push_str(value);
                self.sourcepos.end = sourcepos.end;
                true
            }
            _ => false,
        }
    }

    fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn count(&self, predicate: &impl Fn(&Node) -> bool) -> usize {
        let own = usize::from(predicate(self));
        own + self.children.iter().map(|child| child.count(predicate)).sum::<usize>()
    }

    fn first_missing(&self, values: &HashMap<NodeId, String>) -> Option<NodeId> {
        if self.kind() == NodeKind::Text && !values.contains_key(&self.id) {
            return Some(self.id);
        }
        self.children.iter().find_map(|child| child.first_missing(values))
    }

    fn take_values(&mut self, values: &mut HashMap<NodeId, String>) -> usize {
        let mut replaced = 0;
        if let NodeValue::Text(text) = &mut self.payload {
            if let Some(value) = values.remove(&self.id) {
                *text = value;
                replaced += 1;
            }
        }
        for child in &mut self.children {
            replaced += child.take_values(values);
        }
        replaced
    }
}

/// Parsed document: an ordered, rooted tree of nodes
#[derive(Debug, Clone)]
pub struct DocumentTree {
    root: Node,
}

impl DocumentTree {
    pub(crate) fn from_root(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.root.find(id)
    }

    /// Current value of a text node
    pub fn text_value(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(Node::value)
    }

    pub fn node_count(&self) -> usize {
        self.root.count(&|_| true)
    }

    pub fn text_count(&self) -> usize {
        self.root.count(&|node| node.kind() == NodeKind::Text)
    }

    /// Replace every text node's value with the entry stored under its id.
    ///
    /// All-or-nothing: if any text node lacks an entry the tree is left
    /// untouched. Entries for ids that are not text nodes are ignored.
    /// Returns the number of replaced values.
    pub fn replace_text_values(&mut self, mut values: HashMap<NodeId, String>) -> Result<usize, DocumentError> {
        if let Some(missing) = self.root.first_missing(&values) {
            return Err(DocumentError::MissingTextValue(missing));
        }
        Ok(self.root.take_values(&mut values))
    }
}
