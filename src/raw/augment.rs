use core::cmp::max;

/// Per-node metadata summarizing a subtree, recomputed from the children.
///
/// The tree engine is written once over this trait: a plain binary search
/// tree carries [`Plain`] (nothing to maintain), the AVL tree carries
/// [`Height`]. Whenever a child slot changes, the engine recomputes the
/// metadata on every node from the mutation point up to the root, which is
/// the only mechanism keeping summaries consistent; no separate fix-up
/// pass exists.
pub(crate) trait Augment: Copy {
    /// Whether the engine needs to run the upward recomputation walk at all.
    const MAINTAINED: bool;

    /// Recomputes this node's summary from its children's summaries.
    /// Absent children are `None`.
    fn from_children(left: Option<Self>, right: Option<Self>) -> Self;
}

/// No metadata; the upward walk is compiled out.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Plain;

impl Augment for Plain {
    const MAINTAINED: bool = false;

    #[inline]
    fn from_children(_left: Option<Self>, _right: Option<Self>) -> Self {
        Plain
    }
}

/// Height of the subtree rooted at the node.
///
/// A node with no children has height 1; an absent child contributes 0, so
/// `height = 1 + max(height(left), height(right))` everywhere.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub(crate) struct Height(pub(crate) u32);

impl Height {
    #[inline]
    pub(crate) const fn get(self) -> u32 {
        self.0
    }
}

impl Augment for Height {
    const MAINTAINED: bool = true;

    #[inline]
    fn from_children(left: Option<Self>, right: Option<Self>) -> Self {
        let lh = left.map_or(0, Height::get);
        let rh = right.map_or(0, Height::get);
        Height(1 + max(lh, rh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_height_is_one() {
        assert_eq!(Height::from_children(None, None), Height(1));
    }

    #[test]
    fn height_takes_the_taller_child() {
        assert_eq!(Height::from_children(Some(Height(3)), None), Height(4));
        assert_eq!(Height::from_children(None, Some(Height(2))), Height(3));
        assert_eq!(Height::from_children(Some(Height(1)), Some(Height(5))), Height(6));
    }

    #[test]
    fn plain_is_inert() {
        assert!(!Plain::MAINTAINED);
        assert_eq!(Plain::from_children(Some(Plain), None), Plain);
    }
}
