//! Intermediate Representation shared by every dialect.
//!
//! Parsers build this tree, shared transforms rewrite it, serializers walk
//! it. Ownership is strictly hierarchical (each node owned by exactly one
//! parent); destructive passes always operate on a clone of the parsed
//! tree, never on the caller's copy.

pub mod nodes;

pub use nodes::{replace_node, splice_nodes, Node};
