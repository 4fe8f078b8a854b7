/*!
 * Document model for structured README representation.
 *
 * - `model`: owned document tree with stable node identities
 * - `markdown`: CommonMark parser/serializer built on comrak
 */

pub use self::model::{DocumentTree, Node, NodeId, NodeKind};

pub mod markdown;
pub mod model;
