/*!
 * Markdown adapter: CommonMark text ⇄ owned document tree.
 *
 * Pipeline: Markdown string → Comrak AST → owned [`DocumentTree`] and back.
 * The comrak arena only lives inside `parse` and `serialize`.
 */

use std::cell::RefCell;

use comrak::nodes::{Ast, AstNode, NodeValue};
use comrak::{format_commonmark, parse_document, Arena, Options};

use super::model::{DocumentTree, Node, NodeId};
use crate::errors::DocumentError;

/// Parse Markdown source into a document tree.
///
/// CommonMark accepts any input, so parsing cannot fail.
pub fn parse(source: &str) -> DocumentTree {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);

    let mut next_id = 0;
    DocumentTree::from_root(to_owned_node(root, &mut next_id))
}

/// Render a document tree back to Markdown
pub fn serialize(tree: &DocumentTree) -> Result<String, DocumentError> {
    let arena = Arena::new();
    let root = to_comrak_node(&arena, tree.root());

    let mut output = Vec::new();
    let options = default_comrak_options();
    format_commonmark(root, &options, &mut output)
        .map_err(|e| DocumentError::Serialization(format!("Comrak serialization failed: {}", e)))?;

    String::from_utf8(output)
        .map_err(|e| DocumentError::Serialization(format!("UTF-8 conversion failed: {}", e)))
}

fn default_comrak_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    // READMEs routinely embed badges and centered blocks as raw HTML
    options.render.unsafe_ = true;
    options
}

fn to_owned_node<'a>(node: &'a AstNode<'a>, next_id: &mut usize) -> Node {
    let id = NodeId::new(*next_id);
    *next_id += 1;

    let (payload, sourcepos) = {
        let data = node.data.borrow();
        (data.value.clone(), data.sourcepos)
    };

    let children = owned_children(node, next_id);
    Node::new(id, payload, sourcepos, children)
}

/// Convert the children of `node`, folding soft line breaks into text.
///
/// A wrapped line of prose is one text value containing `\n`, so a sentence
/// spanning several source lines is translated as a whole.
fn owned_children<'a>(node: &'a AstNode<'a>, next_id: &mut usize) -> Vec<Node> {
    let siblings: Vec<&'a AstNode<'a>> = node.children().collect();
    let mut children: Vec<Node> = Vec::with_capacity(siblings.len());

    for (index, child) in siblings.iter().enumerate() {
        let (value, sourcepos) = {
            let data = child.data.borrow();
            let value = match &data.value {
                NodeValue::Text(text) => Some(text.to_string()),
                NodeValue::SoftBreak => Some("\n".to_string()),
                _ => None,
            };
            (value, data.sourcepos)
        };

        let Some(value) = value else {
            children.push(to_owned_node(child, next_id));
            continue;
        };

        if let Some(last) = children.last_mut() {
            if last.append_text(&value, sourcepos) {
                continue;
            }
        }

        // A break between two non-text siblings stays structural
        let next_is_text = siblings
            .get(index + 1)
            .is_some_and(|next| matches!(next.data.borrow().value, NodeValue::Text(_)));
        if value == "\n" && !next_is_text {
            children.push(to_owned_node(child, next_id));
            continue;
        }

        let id = NodeId::new(*next_id);
        *next_id += 1;
        children.push(Node::new(id, NodeValue::Text(value.into()), sourcepos, Vec::new()));
    }

    children
}

fn to_comrak_node<'a>(arena: &'a Arena<AstNode<'a>>, node: &Node) -> &'a AstNode<'a> {
    let mut ast = Ast::new(node.payload().clone(), node.sourcepos().start);
    ast.sourcepos = node.sourcepos();
    let comrak_node = arena.alloc(AstNode::new(RefCell::new(ast)));

    for child in node.children() {
        comrak_node.append(to_comrak_node(arena, child));
    }

    comrak_node
}
