//! Parent-linked binary search trees for Rust, with an AVL balancing layer.
//!
//! This crate provides three ordered collections built on one generic tree
//! engine:
//!
//! - [`BinarySearchTree`] - a plain binary search tree with parent-linked
//!   nodes and full successor/predecessor navigation
//! - [`AvlTree`] - the same tree with per-node height bookkeeping, kept
//!   balanced by rotation after every insertion and removal
//! - [`TreeSet`] - a set of distinct values layered over [`AvlTree`]
//!
//! # Example
//!
//! ```
//! use pavl_tree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for value in [12, 8, 4, 6, 10] {
//!     tree.insert(value, true);
//! }
//!
//! // The tree rebalances itself; iteration is sorted either way.
//! let sorted: Vec<i32> = tree.iter().copied().collect();
//! assert_eq!(sorted, vec![4, 6, 8, 10, 12]);
//!
//! // Positions navigate the tree explicitly.
//! let eight = tree.find(&8);
//! assert_eq!(tree.get(tree.successor(eight)), Some(&10));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library
//!   dependency
//! - **O(log n) operations** - The AVL balance invariant
//!   (`|height(left) - height(right)| <= 1` at every node) holds between
//!   all public calls
//! - **Position-based navigation** - [`Position`] tokens support
//!   minimum/maximum, successor/predecessor, and parent/child walks, all
//!   checked rather than undefined on misuse
//! - **Duplicate policy per insertion** - equal values can be kept (placed
//!   left) or silently refused
//!
//! # Implementation
//!
//! Nodes live in a slot arena and link to each other through stable
//! handles: two owning child slots and a non-owning parent back-reference
//! per node. All structural mutation flows through a handful of slot
//! primitives that rebind parent links and recompute node heights from the
//! mutation point up to the root, so the balancing layer reads heights but
//! never maintains them. Rebalancing itself is the classic four-case
//! (LL/LR/RL/RR) rotation table, applied once per insertion and iterated
//! per removal.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]

extern crate alloc;

mod position;
mod raw;

pub mod avl_tree;
pub mod bst;
pub mod tree_set;

pub use avl_tree::AvlTree;
pub use bst::BinarySearchTree;
pub use position::Position;
pub use tree_set::TreeSet;
