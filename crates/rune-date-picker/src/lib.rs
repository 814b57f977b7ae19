//! Interaction controller for a date input: a text field paired with a
//! popover calendar.
//!
//! The crate is toolkit-agnostic. A view layer renders the prop bundles
//! returned by [`InteractionController`] and forwards its native events back
//! as the plain event structs in [`event_handler`].

pub mod codec;
pub mod controller;
pub mod error;
pub mod event_handler;
pub mod focus;
pub mod form_control;
pub mod handlers;
pub mod options;
pub mod outside;
pub mod props;
pub mod store;
pub mod value;

pub use codec::{DateBounds, DateParser, ValueCodec, DEFAULT_INPUT_FORMAT};
pub use controller::{InteractionController, InteractionState, LifecycleCallback};
pub use error::{DatePickerError, Result};
pub use event_handler::{
    ClickEvent, EventResult, FocusEvent, InputEvent, KeyCode, KeyboardEvent, PointerEvent, Propagating,
};
pub use focus::{Containment, FocusHandle, FocusTarget, NodeId};
pub use form_control::FormControlFlags;
pub use handlers::{ConsumerHandler, Dispatch, HandlerChain};
pub use options::{CalendarOptions, DatePickerOptions, ExcludeDate};
pub use props::{CalendarProps, ConsumerHandlers, ContainerProps, Cursor, FieldProps, InputProps, PopoverProps};
pub use store::{ChangeCallback, ControllableValueStore};
pub use value::DateValue;
