//! Event types delivered to the date picker by the view layer
//!
//! The view layer translates its native events into these plain structs and
//! hands them to the controller. Nodes are identified by [`NodeId`] so the
//! controller never touches a toolkit node type.

use crate::focus::NodeId;

/// Result of an event handling operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventResult {
    /// Event was handled and should not propagate
    Handled,
    /// Event was not handled, continue propagation
    Ignored,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Handled)
    }
}

/// Propagation flags shared by every event type
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EventFlags {
    propagation_stopped: bool,
    default_prevented: bool,
}

impl EventFlags {
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Events that can be stopped before reaching outer handlers
pub trait Propagating {
    fn flags(&self) -> &EventFlags;
    fn flags_mut(&mut self) -> &mut EventFlags;

    fn stop_propagation(&mut self) {
        self.flags_mut().stop_propagation();
    }

    fn prevent_default(&mut self) {
        self.flags_mut().prevent_default();
    }

    fn is_propagation_stopped(&self) -> bool {
        self.flags().is_propagation_stopped()
    }

    fn is_default_prevented(&self) -> bool {
        self.flags().is_default_prevented()
    }
}

macro_rules! impl_propagating {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Propagating for $ty {
                fn flags(&self) -> &EventFlags {
                    &self.flags
                }

                fn flags_mut(&mut self) -> &mut EventFlags {
                    &mut self.flags
                }
            }
        )*
    };
}

/// Mouse click on a node
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickEvent {
    /// Node the click landed on
    pub target: Option<NodeId>,
    pub flags: EventFlags,
}

impl ClickEvent {
    pub fn on(target: NodeId) -> Self {
        Self {
            target: Some(target),
            flags: EventFlags::default(),
        }
    }
}

/// Focus gained or lost
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusEvent {
    /// Node gaining (for blur) or losing (for focus) focus, if any
    pub related_target: Option<NodeId>,
    pub flags: EventFlags,
}

impl FocusEvent {
    pub fn with_related(related_target: Option<NodeId>) -> Self {
        Self {
            related_target,
            flags: EventFlags::default(),
        }
    }
}

/// Pointer pressed or focus moved somewhere in the document
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub target: NodeId,
    pub flags: EventFlags,
}

impl PointerEvent {
    pub fn on(target: NodeId) -> Self {
        Self {
            target,
            flags: EventFlags::default(),
        }
    }
}

/// Keyboard input event data
#[derive(Debug, Clone, Copy)]
pub struct KeyboardEvent {
    /// Key code
    pub key: KeyCode,
    pub flags: EventFlags,
}

impl KeyboardEvent {
    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            flags: EventFlags::default(),
        }
    }
}

/// Text field content changed
#[derive(Debug, Clone, Default)]
pub struct InputEvent {
    /// Full field text after the edit
    pub value: String,
    pub flags: EventFlags,
}

impl InputEvent {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            flags: EventFlags::default(),
        }
    }
}

impl_propagating!(ClickEvent, FocusEvent, PointerEvent, KeyboardEvent, InputEvent);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCode {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Char(char),
    Other,
}
