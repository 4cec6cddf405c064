use core::borrow::Borrow;
use core::cmp::Ordering;

use smallvec::SmallVec;

use super::arena::Arena;
use super::augment::Augment;
use super::handle::Handle;
use super::node::Node;

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// The generic binary-search-tree engine backing both `BinarySearchTree`
/// and `AvlTree`.
///
/// The engine owns every node through the arena; the `left`/`right` slots
/// express the ownership tree and `parent` is a navigation aid only. All
/// structural mutation goes through the slot primitives (`set_child`,
/// `release_child`, `transplant`), which rebind parent links and recompute
/// the augmentation metadata from the mutation point up to the root, so
/// higher layers never touch bookkeeping directly.
pub(crate) struct RawTree<T, A> {
    nodes: Arena<Node<T, A>>,
    root: Option<Handle>,
    len: usize,
}

impl<T: Clone, A: Clone> Clone for RawTree<T, A> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            len: self.len,
        }
    }
}

impl<T, A: Augment> RawTree<T, A> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    // ─── Node access ────────────────────────────────────────────────────────

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T, A> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<T, A> {
        self.nodes.get_mut(handle)
    }

    /// Checked lookup for externally supplied positions: `None` for a
    /// handle whose slot has been vacated or never existed.
    #[inline]
    pub(crate) fn get_checked(&self, handle: Handle) -> Option<&Node<T, A>> {
        self.nodes.get_checked(handle)
    }

    pub(crate) fn value(&self, handle: Handle) -> Option<&T> {
        self.node(handle).value()
    }

    pub(crate) fn left(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).left()
    }

    pub(crate) fn right(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).right()
    }

    pub(crate) fn parent(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).parent()
    }

    pub(crate) fn child(&self, handle: Handle, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left(handle),
            Side::Right => self.right(handle),
        }
    }

    pub(crate) fn meta(&self, handle: Handle) -> A {
        self.node(handle).meta()
    }

    /// Which slot of `parent` holds `child`. Internal contract: `child`
    /// must actually be a child of `parent`.
    fn side_in_parent(&self, parent: Handle, child: Handle) -> Side {
        if self.left(parent) == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(self.right(parent), Some(child), "`RawTree::side_in_parent()` - not a child!");
            Side::Right
        }
    }

    // ─── Slot surgery ───────────────────────────────────────────────────────
    //
    // These primitives are the only code that rewires slots. Each one leaves
    // the parent links synchronized with the slots and the metadata correct
    // on the whole path from the mutation point to the root.

    /// Installs `child` (a detached subtree, or `None`) into a slot of
    /// `handle`. Any previous occupant of the slot is destroyed.
    pub(crate) fn set_child(&mut self, handle: Handle, side: Side, child: Option<Handle>) {
        let old = match side {
            Side::Left => {
                let old = self.node(handle).left();
                self.node_mut(handle).set_left_slot(child);
                old
            }
            Side::Right => {
                let old = self.node(handle).right();
                self.node_mut(handle).set_right_slot(child);
                old
            }
        };

        if let Some(old) = old {
            if Some(old) != child {
                self.free_subtree(old);
            }
        }
        if let Some(c) = child {
            self.node_mut(c).set_parent(Some(handle));
        }

        self.update_path(handle);
    }

    pub(crate) fn set_left(&mut self, handle: Handle, child: Option<Handle>) {
        self.set_child(handle, Side::Left, child);
    }

    pub(crate) fn set_right(&mut self, handle: Handle, child: Option<Handle>) {
        self.set_child(handle, Side::Right, child);
    }

    /// Vacates a slot of `handle` without destroying the subtree; the
    /// released root's parent link is cleared and the caller becomes
    /// responsible for reattaching it.
    pub(crate) fn release_child(&mut self, handle: Handle, side: Side) -> Option<Handle> {
        let released = match side {
            Side::Left => {
                let old = self.node(handle).left();
                self.node_mut(handle).set_left_slot(None);
                old
            }
            Side::Right => {
                let old = self.node(handle).right();
                self.node_mut(handle).set_right_slot(None);
                old
            }
        };

        if let Some(r) = released {
            self.node_mut(r).set_parent(None);
        }
        self.update_path(handle);

        released
    }

    pub(crate) fn release_left(&mut self, handle: Handle) -> Option<Handle> {
        self.release_child(handle, Side::Left)
    }

    pub(crate) fn release_right(&mut self, handle: Handle) -> Option<Handle> {
        self.release_child(handle, Side::Right)
    }

    /// Points the root slot at a detached node, returning the previous
    /// root. The previous root is left floating, not destroyed.
    pub(crate) fn replace_root(&mut self, new: Handle) -> Option<Handle> {
        let old = self.root.replace(new);
        self.node_mut(new).set_parent(None);
        old
    }

    /// Recomputes the augmentation metadata from `handle` up to the root.
    fn update_path(&mut self, mut handle: Handle) {
        if !A::MAINTAINED {
            return;
        }

        loop {
            let left = self.left(handle).map(|c| self.node(c).meta());
            let right = self.right(handle).map(|c| self.node(c).meta());
            let meta = A::from_children(left, right);
            self.node_mut(handle).set_meta(meta);

            match self.parent(handle) {
                Some(p) => handle = p,
                None => break,
            }
        }
    }

    /// Destroys a detached-or-attached subtree, slot by slot. Iterative on
    /// purpose: a degenerate tree must not overflow the stack on teardown.
    fn free_subtree(&mut self, handle: Handle) {
        let mut stack: SmallVec<[Handle; 16]> = SmallVec::new();
        stack.push(handle);

        while let Some(h) = stack.pop() {
            let node = self.nodes.take(h);
            if node.has_value() {
                self.len -= 1;
            }
            if let Some(l) = node.left() {
                stack.push(l);
            }
            if let Some(r) = node.right() {
                stack.push(r);
            }
        }
    }

    // ─── Search-tree operations ─────────────────────────────────────────────

    /// Walks from the root and attaches a new leaf holding `value`.
    ///
    /// With duplication allowed, equal values descend left (`value <= node`
    /// goes left). With duplication disallowed, an equal comparison anywhere
    /// on the walk stops silently: no node is created and `None` is
    /// returned. That silent no-op is a documented edge case, not an error.
    pub(crate) fn insert(&mut self, value: T, allow_duplication: bool) -> Option<Handle>
    where
        T: Ord,
    {
        let mut x = self.root;
        let mut y: Option<Handle> = None;
        let mut side = Side::Left;

        while let Some(h) = x {
            y = Some(h);
            let obj = self.node(h).value().expect("`RawTree::insert()` - node value vacated!");
            side = if allow_duplication {
                match value.cmp(obj) {
                    Ordering::Greater => Side::Right,
                    Ordering::Less | Ordering::Equal => Side::Left,
                }
            } else {
                match value.cmp(obj) {
                    Ordering::Less => Side::Left,
                    Ordering::Greater => Side::Right,
                    Ordering::Equal => return None,
                }
            };
            x = self.child(h, side);
        }

        let new = self.nodes.alloc(Node::new(value));
        match y {
            None => self.root = Some(new),
            Some(parent) => self.set_child(parent, side, Some(new)),
        }
        self.len += 1;

        Some(new)
    }

    /// Finds the node comparing equal to `key`.
    ///
    /// The `Borrow` bound lets callers search by the stored type or by any
    /// lighter-weight key form of it, with one walk serving both.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut x = self.root;

        while let Some(h) = x {
            let node = self.node(h);
            let obj = node.value()?;
            x = match key.cmp(obj.borrow()) {
                Ordering::Equal => return Some(h),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }

        None
    }

    pub(crate) fn subtree_minimum(&self, mut handle: Handle) -> Handle {
        while let Some(l) = self.left(handle) {
            handle = l;
        }
        handle
    }

    pub(crate) fn subtree_maximum(&self, mut handle: Handle) -> Handle {
        while let Some(r) = self.right(handle) {
            handle = r;
        }
        handle
    }

    pub(crate) fn minimum(&self) -> Option<Handle> {
        self.root.map(|r| self.subtree_minimum(r))
    }

    pub(crate) fn maximum(&self) -> Option<Handle> {
        self.root.map(|r| self.subtree_maximum(r))
    }

    /// In-order successor: minimum of the right subtree if there is one,
    /// otherwise the first ancestor reached from a left child.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(r) = self.right(handle) {
            return Some(self.subtree_minimum(r));
        }

        let mut child = handle;
        let mut parent = self.parent(handle);
        while let Some(p) = parent {
            if self.left(p) == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.parent(p);
        }

        None
    }

    /// In-order predecessor; mirror of [`Self::successor`].
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(l) = self.left(handle) {
            return Some(self.subtree_maximum(l));
        }

        let mut child = handle;
        let mut parent = self.parent(handle);
        while let Some(p) = parent {
            if self.right(p) == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.parent(p);
        }

        None
    }

    /// Which subtree of `ancestor` contains `node`, or `None` if `node` is
    /// not strictly below `ancestor`. O(h) parent-link climb.
    pub(crate) fn side_under(&self, ancestor: Handle, node: Handle) -> Option<Side> {
        let mut x = node;
        let mut y = self.parent(node);

        while let Some(p) = y {
            if p == ancestor {
                return Some(self.side_in_parent(p, x));
            }
            x = p;
            y = self.parent(p);
        }

        None
    }

    /// Replaces the occupant of the slot `(up, side)`, or the root slot
    /// when `up` is `None`, with the subtree rooted at `v`, destroying the
    /// previous occupant. `v` is first released from wherever it currently
    /// lives, so ownership never duplicates and never dangles.
    fn transplant(&mut self, v: Option<Handle>, up: Option<Handle>, side: Side) {
        if let Some(vh) = v {
            if let Some(vp) = self.parent(vh) {
                let vs = self.side_in_parent(vp, vh);
                self.release_child(vp, vs);
            }
        }

        match up {
            None => {
                if let Some(old) = self.root.take() {
                    if Some(old) != v {
                        self.free_subtree(old);
                    }
                }
                self.root = v;
                if let Some(vh) = v {
                    self.node_mut(vh).set_parent(None);
                }
            }
            Some(p) => self.set_child(p, side, v),
        }
    }

    /// Removes the node at `handle`, returning its value and the rebalance
    /// anchor: the node now occupying the removed position, or the parent
    /// of that position if it emptied, or `None` if the tree emptied.
    pub(crate) fn remove(&mut self, handle: Handle) -> (Option<T>, Option<Handle>) {
        let value = self.node_mut(handle).take_value();
        if value.is_some() {
            self.len -= 1;
        }

        let parent = self.parent(handle);
        let side = parent.map_or(Side::Left, |p| self.side_in_parent(p, handle));

        let anchor;
        if !self.node(handle).has_left() {
            // The right child (possibly absent) takes this node's place.
            anchor = self.right(handle).or(parent);
            let v = self.right(handle);
            self.transplant(v, parent, side);
        } else if !self.node(handle).has_right() {
            anchor = self.left(handle);
            let v = self.left(handle);
            self.transplant(v, parent, side);
        } else {
            let right = self.right(handle).expect("`RawTree::remove()` - right child vanished!");
            let successor = self.subtree_minimum(right);
            anchor = Some(successor);

            if Some(successor) == self.right(handle) {
                // The successor is the immediate right child: give it the
                // removed node's left subtree, then put it in place.
                let nl = self.left(handle);
                self.transplant(nl, Some(successor), Side::Left);
                self.transplant(Some(successor), parent, side);
            } else {
                // The successor sits deeper, necessarily as a left child.
                // Detach it, let its right subtree fill its old slot, hand
                // it both of the removed node's subtrees, then transplant.
                let ps = self.parent(successor).expect("`RawTree::remove()` - successor has no parent!");
                let s = self
                    .release_child(ps, Side::Left)
                    .expect("`RawTree::remove()` - successor was not a left child!");
                debug_assert_eq!(s, successor);

                let sr = self.right(s);
                self.transplant(sr, Some(ps), Side::Left);

                let nr = self.right(handle);
                self.transplant(nr, Some(s), Side::Right);
                let nl = self.left(handle);
                self.transplant(nl, Some(s), Side::Left);

                // Both subtrees and the value are gone; only the husk is
                // destroyed by the final transplant.
                debug_assert!(self.node(handle).is_vacant());
                self.transplant(Some(s), parent, side);
            }
        }

        (value, anchor)
    }
}

/// Shared in-order iteration state for the public iterator types.
///
/// Two cursors walk toward each other via successor/predecessor links; the
/// element count says when they have met, so no handle comparison against a
/// moving target is needed.
pub(crate) struct RawIter<'a, T, A> {
    tree: &'a RawTree<T, A>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<T, A: Augment> RawTree<T, A> {
    pub(crate) fn iter(&self) -> RawIter<'_, T, A> {
        RawIter {
            tree: self,
            front: self.minimum(),
            back: self.maximum(),
            remaining: self.len,
        }
    }
}

impl<'a, T, A: Augment> RawIter<'a, T, A> {
    pub(crate) fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.front?;
        let value = self.tree.value(handle);

        self.remaining -= 1;
        self.front = if self.remaining == 0 { None } else { self.tree.successor(handle) };

        value
    }

    pub(crate) fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.back?;
        let value = self.tree.value(handle);

        self.remaining -= 1;
        self.back = if self.remaining == 0 { None } else { self.tree.predecessor(handle) };

        value
    }

    pub(crate) const fn remaining(&self) -> usize {
        self.remaining
    }
}
