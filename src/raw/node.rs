use super::augment::Augment;
use super::handle::Handle;

/// A tree node: an optional contained value, two owned child slots, a
/// non-owning parent back-reference, and the augmentation metadata.
///
/// Ownership is a property of the slots, enforced by `RawTree`: a node is
/// reachable from exactly one child slot (or is the root), and its `parent`
/// field always names the node owning that slot. The value is `None` only
/// transiently, while a removal or extraction is in flight.
#[derive(Clone)]
pub(crate) struct Node<T, A> {
    value: Option<T>,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
    meta: A,
}

impl<T, A: Augment> Node<T, A> {
    /// Creates a detached leaf holding `value`.
    pub(crate) fn new(value: T) -> Self {
        Self {
            value: Some(value),
            left: None,
            right: None,
            parent: None,
            meta: A::from_children(None, None),
        }
    }

    pub(crate) fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub(crate) fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub(crate) fn take_value(&mut self) -> Option<T> {
        self.value.take()
    }

    pub(crate) fn has_left(&self) -> bool {
        self.left.is_some()
    }

    pub(crate) fn has_right(&self) -> bool {
        self.right.is_some()
    }

    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) fn set_left_slot(&mut self, child: Option<Handle>) {
        self.left = child;
    }

    pub(crate) fn set_right_slot(&mut self, child: Option<Handle>) {
        self.right = child;
    }

    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    pub(crate) fn meta(&self) -> A {
        self.meta
    }

    pub(crate) fn set_meta(&mut self, meta: A) {
        self.meta = meta;
    }

    /// True iff the node holds no value and owns no children: the
    /// transient "nil" shape that only exists mid-mutation.
    pub(crate) fn is_vacant(&self) -> bool {
        self.value.is_none() && self.left.is_none() && self.right.is_none()
    }
}
