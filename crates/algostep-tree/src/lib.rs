//! A binary search tree whose operations narrate themselves.
//!
//! [`Bst`] holds `i32` keys with the usual less-left/greater-right
//! discipline and no rebalancing. Insert, search and the three depth-first
//! traversals each emit a [`TreeStep`] per visited node, so a consumer can
//! replay the walk one node at a time.

mod bst;

pub use bst::{Bst, Traversal, TreeStep, TreeStepKind};
