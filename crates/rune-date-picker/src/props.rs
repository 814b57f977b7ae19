//! Prop bundles handed to the view layer.
//!
//! Every bundle is a snapshot computed from controller state; none of them
//! carries state of its own. Handler chains inside a bundle are dispatched
//! back through the controller's `dispatch_*` methods.

use std::fmt;

use chrono::{Locale, NaiveDate};
use rune_config::Placement;

use crate::codec::DateBounds;
use crate::event_handler::{ClickEvent, FocusEvent, InputEvent, KeyboardEvent};
use crate::form_control::FormControlFlags;
use crate::handlers::{ConsumerHandler, HandlerChain};
use crate::options::{CalendarOptions, ExcludeDate};
use crate::value::DateValue;

/// Consumer callbacks merged ahead of the controller's own handlers.
#[derive(Clone, Default)]
pub struct ConsumerHandlers {
    pub on_click: Option<ConsumerHandler<ClickEvent>>,
    pub on_focus: Option<ConsumerHandler<FocusEvent>>,
    pub on_blur: Option<ConsumerHandler<FocusEvent>>,
    pub on_key_down: Option<ConsumerHandler<KeyboardEvent>>,
    pub on_change: Option<ConsumerHandler<InputEvent>>,
}

impl fmt::Debug for ConsumerHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerHandlers")
            .field("on_click", &self.on_click.is_some())
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .field("on_key_down", &self.on_key_down.is_some())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ContainerProps {
    pub flags: FormControlFlags,
    pub on_click: HandlerChain<ClickEvent>,
    pub on_focus: HandlerChain<FocusEvent>,
    pub on_blur: HandlerChain<FocusEvent>,
}

/// Props for the wrapper around the text input.
#[derive(Debug, Clone)]
pub struct FieldProps {
    pub flags: FormControlFlags,
    /// `0` when typing is disabled (the wrapper takes focus), `-1` otherwise.
    pub tab_index: i32,
    /// Mirrors the open state.
    pub active: bool,
    /// Mirrors the open state.
    pub expanded: bool,
    pub cursor: Cursor,
    pub on_key_down: HandlerChain<KeyboardEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Text,
    Pointer,
}

/// Props for the inner text input.
#[derive(Debug, Clone)]
pub struct InputProps {
    pub id: Option<String>,
    pub value: String,
    pub placeholder: Option<String>,
    pub flags: FormControlFlags,
    /// `-1` when typing is disabled, `0` otherwise.
    pub tab_index: i32,
    pub pointer_events: bool,
    pub cursor: Cursor,
    pub on_change: HandlerChain<InputEvent>,
}

/// How the popover primitive may open itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverTrigger {
    /// Only through `is_open`; the controller owns open and close.
    Never,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopoverProps {
    pub is_open: bool,
    pub placement: Placement,
    pub duration: f32,
    pub trigger: PopoverTrigger,
    pub close_on_button: bool,
}

#[derive(Clone)]
pub struct CalendarProps {
    pub value: DateValue,
    pub default_value: DateValue,
    /// Inclusive selectable range, shared with the codec.
    pub bounds: DateBounds,
    pub exclude_date: Option<ExcludeDate>,
    pub locale: Locale,
    pub options: CalendarOptions,
}

impl CalendarProps {
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.bounds.min()
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.bounds.max()
    }

    /// True when the calendar should refuse `date`.
    pub fn is_excluded(&self, date: NaiveDate) -> bool {
        !self.bounds.contains(date) || self.exclude_date.as_ref().is_some_and(|exclude| exclude(date))
    }
}

impl fmt::Debug for CalendarProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarProps")
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("bounds", &self.bounds)
            .field("exclude_date", &self.exclude_date.is_some())
            .field("locale", &self.locale)
            .field("options", &self.options)
            .finish()
    }
}
