//! Focus and containment capabilities supplied by the view layer.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

/// Opaque identifier for a node in the host view tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Something the controller can move keyboard focus to and away from.
pub trait FocusTarget {
    fn focus(&mut self);
    fn blur(&mut self);
    fn is_focused(&self) -> bool;
}

/// Shared focus flag. Clones observe the same state, so the view layer can
/// keep one handle while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct FocusHandle {
    focused: Rc<Cell<bool>>,
}

impl FocusHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record focus changes that happened outside the controller.
    pub fn set_focused(&self, focused: bool) {
        self.focused.set(focused);
    }
}

impl FocusTarget for FocusHandle {
    fn focus(&mut self) {
        self.focused.set(true);
    }

    fn blur(&mut self) {
        self.focused.set(false);
    }

    fn is_focused(&self) -> bool {
        self.focused.get()
    }
}

/// Answers whether a node lies inside the date picker's container.
pub trait Containment {
    fn contains(&self, node: NodeId) -> bool;
}

impl<F> Containment for F
where
    F: Fn(NodeId) -> bool,
{
    fn contains(&self, node: NodeId) -> bool {
        self(node)
    }
}

impl Containment for HashSet<NodeId> {
    fn contains(&self, node: NodeId) -> bool {
        HashSet::contains(self, &node)
    }
}
