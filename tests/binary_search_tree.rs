use std::collections::BTreeSet;

use pavl_tree::{BinarySearchTree, Position};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn value_strategy() -> impl Strategy<Value = i64> {
    -500i64..500i64
}

/// Checks the structural invariants reachable through the public surface:
/// BST ordering, parent-link consistency, and node count.
fn audit<T: Ord + std::fmt::Debug>(tree: &BinarySearchTree<T>) {
    let root = tree.root();
    let mut stack: Vec<Position> = Vec::new();
    if root.valid() {
        assert!(!tree.parent(root).valid(), "root has a parent");
        stack.push(root);
    }

    let mut count = 0usize;
    while let Some(pos) = stack.pop() {
        count += 1;
        for child in [tree.left(pos), tree.right(pos)] {
            if child.valid() {
                assert_eq!(tree.parent(child), pos, "parent link out of sync");
                stack.push(child);
            }
        }
    }
    assert_eq!(count, tree.len(), "reachable nodes != len");

    let items: Vec<&T> = tree.iter().collect();
    assert!(items.windows(2).all(|w| w[0] <= w[1]), "in-order walk not sorted");
}

#[test]
fn in_order_traversal_sorts_the_input() {
    let mut tree = BinarySearchTree::new();
    for value in [6, 3, 4, 5, 2, 1, 8, 7, 9, 10] {
        assert!(tree.insert(value, true).valid());
    }

    let sorted: Vec<i32> = tree.iter().copied().collect();
    assert_eq!(sorted, (1..=10).collect::<Vec<i32>>());
    audit(&tree);

    // No balancing happened: 6 is still the root, with the walk-order
    // shape below it.
    let root = tree.root();
    assert_eq!(tree.get(root), Some(&6));
    let three = tree.left(root);
    assert_eq!(tree.get(three), Some(&3));
    assert_eq!(tree.get(tree.right(three)), Some(&4));
    assert_eq!(tree.get(tree.left(three)), Some(&2));
    assert_eq!(tree.get(tree.right(root)), Some(&8));
}

#[test]
fn duplicates_sit_in_the_left_subtree() {
    let mut tree = BinarySearchTree::new();
    let first = tree.insert(5, true);
    let second = tree.insert(5, true);

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.left(first), second);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![5, 5]);
}

#[test]
fn refused_duplicate_is_a_silent_no_op() {
    let mut tree = BinarySearchTree::new();
    assert!(tree.insert(5, false).valid());
    assert!(tree.insert(3, false).valid());

    assert!(!tree.insert(5, false).valid());
    assert!(!tree.insert(3, false).valid());
    assert_eq!(tree.len(), 2);
}

#[test]
fn successor_walk_visits_everything_in_order() {
    let tree: BinarySearchTree<i32> = [6, 3, 4, 5, 2, 1, 8, 7, 9, 10].into();

    let mut seen = Vec::new();
    let mut pos = tree.minimum();
    while pos.valid() {
        seen.push(*tree.get(pos).unwrap());
        let next = tree.successor(pos);
        if next.valid() {
            assert_eq!(tree.predecessor(next), pos);
        }
        pos = next;
    }
    assert_eq!(seen, (1..=10).collect::<Vec<i32>>());

    // And the mirror walk from the maximum.
    let mut seen_rev = Vec::new();
    let mut pos = tree.maximum();
    while pos.valid() {
        seen_rev.push(*tree.get(pos).unwrap());
        pos = tree.predecessor(pos);
    }
    seen_rev.reverse();
    assert_eq!(seen_rev, seen);
}

#[test]
fn remove_handles_all_three_shapes() {
    let mut tree: BinarySearchTree<i32> = [4, 2, 6, 1, 3, 5, 7].into();

    // Leaf.
    assert!(tree.remove(&1));
    // One child: 2 keeps only its right child 3.
    assert!(tree.remove(&2));
    assert_eq!(tree.get(tree.left(tree.root())), Some(&3));
    // Two children at the root: replaced by its in-order successor.
    assert!(tree.remove(&4));
    assert_eq!(tree.get(tree.root()), Some(&5));

    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 5, 6, 7]);
    audit(&tree);

    assert!(!tree.remove(&4));
}

#[test]
fn removing_the_root_repeatedly_empties_the_tree() {
    let mut tree: BinarySearchTree<i32> = [4, 2, 6, 1, 3, 5, 7].into();

    while tree.root().valid() {
        assert!(tree.remove_at(tree.root()));
        audit(&tree);
    }
    assert!(tree.is_empty());
    assert_eq!(tree.get(tree.minimum()), None);
}

#[test]
fn find_accepts_borrowed_keys() {
    let mut tree: BinarySearchTree<String> = BinarySearchTree::new();
    for name in ["cedar", "alder", "birch"] {
        tree.insert(name.to_owned(), false);
    }

    assert!(tree.find("alder").valid());
    assert!(!tree.contains("willow"));
    assert!(tree.remove("birch"));
    assert_eq!(tree.len(), 2);
}

#[test]
fn invalid_positions_are_checked_everywhere() {
    let mut tree: BinarySearchTree<i32> = BinarySearchTree::new();
    let null = Position::invalid();

    assert_eq!(tree.get(null), None);
    assert!(!tree.successor(null).valid());
    assert!(!tree.predecessor(null).valid());
    assert!(!tree.left(null).valid());
    assert!(!tree.right(null).valid());
    assert!(!tree.parent(null).valid());
    assert!(!tree.remove_at(null));
    assert_eq!(tree.take_at(null), None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays random insert/remove/contains (duplication disallowed)
    /// against BTreeSet.
    #[test]
    fn bst_ops_match_btreeset(ops in proptest::collection::vec(op_strategy(), TEST_SIZE)) {
        let mut tree: BinarySearchTree<i64> = BinarySearchTree::new();
        let mut model: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                Op::Insert(v) => {
                    prop_assert_eq!(tree.insert(*v, false).valid(), model.insert(*v));
                }
                Op::Remove(v) => {
                    prop_assert_eq!(tree.remove(v), model.remove(v));
                }
                Op::Contains(v) => {
                    prop_assert_eq!(tree.contains(v), model.contains(v));
                }
            }
            prop_assert_eq!(tree.len(), model.len());
        }

        audit(&tree);
        let items: Vec<i64> = tree.iter().copied().collect();
        let expected: Vec<i64> = model.iter().copied().collect();
        prop_assert_eq!(items, expected);
    }
}

#[derive(Debug, Clone)]
enum Op {
    Insert(i64),
    Remove(i64),
    Contains(i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => value_strategy().prop_map(Op::Insert),
        3 => value_strategy().prop_map(Op::Remove),
        2 => value_strategy().prop_map(Op::Contains),
    ]
}
