//! Outside-interaction detection.
//!
//! The host forwards every document-level pointer press and focus move; the
//! detector decides whether it happened outside the picker's container.

use crate::focus::{Containment, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutsideInteraction {
    enabled: bool,
}

impl OutsideInteraction {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// True when the close handler must run for an interaction on `target`.
    ///
    /// Without a mounted container nothing counts as outside.
    pub fn should_fire(&self, container: Option<&dyn Containment>, target: NodeId) -> bool {
        if !self.enabled {
            return false;
        }
        match container {
            Some(container) => !container.contains(target),
            None => false,
        }
    }
}
