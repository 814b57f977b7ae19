//! The date picker's interaction state machine.
//!
//! The controller owns the popover's open state and the field text, and
//! routes every value change through the [`ControllableValueStore`]. All
//! handlers run to completion synchronously: text and value are both updated
//! before a handler returns.
//!
//! Field text is recomputed from the stored value whenever the value changes
//! while the field is not focused. While the user is typing, a value change
//! arriving from a controlled owner leaves the typed text alone until the
//! next blur or close.

use std::fmt;

use tracing::{debug, trace};

use crate::codec::ValueCodec;
use crate::error::Result;
use crate::event_handler::{
    ClickEvent, EventResult, FocusEvent, InputEvent, KeyCode, KeyboardEvent, PointerEvent, Propagating,
};
use crate::focus::{Containment, FocusTarget};
use crate::form_control::FormControlFlags;
use crate::handlers::{Dispatch, HandlerChain};
use crate::options::DatePickerOptions;
use crate::outside::OutsideInteraction;
use crate::props::{
    CalendarProps, ConsumerHandlers, ContainerProps, Cursor, FieldProps, InputProps, PopoverProps,
    PopoverTrigger,
};
use crate::store::ControllableValueStore;
use crate::value::DateValue;

/// Popover visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Closed,
    Open,
}

/// Fired after the popover opens or closes.
pub type LifecycleCallback = Box<dyn FnMut()>;

pub struct InteractionController {
    options: DatePickerOptions,
    codec: ValueCodec,
    store: ControllableValueStore,
    state: InteractionState,
    input_text: Option<String>,
    flags: FormControlFlags,
    field: Option<Box<dyn FocusTarget>>,
    container: Option<Box<dyn Containment>>,
    outside: OutsideInteraction,
    handlers: ConsumerHandlers,
    on_open: Option<LifecycleCallback>,
    on_close: Option<LifecycleCallback>,
}

impl fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionController")
            .field("state", &self.state)
            .field("value", &self.store.get())
            .field("input_text", &self.input_text)
            .field("flags", &self.flags)
            .field("codec", &self.codec)
            .field("field_attached", &self.field.is_some())
            .field("container_attached", &self.container.is_some())
            .finish()
    }
}

impl InteractionController {
    /// Build a controller. Fails only on misconfiguration (bad format or
    /// inverted range).
    pub fn new(options: DatePickerOptions, store: ControllableValueStore) -> Result<Self> {
        let codec = options.codec()?;
        let state = if options.default_open {
            InteractionState::Open
        } else {
            InteractionState::Closed
        };
        let input_text = codec.format(store.get());
        let outside = OutsideInteraction::new(options.close_on_blur);

        debug!(?state, controlled = store.is_controlled(), ?input_text, "date picker created");

        Ok(Self {
            options,
            codec,
            store,
            state,
            input_text,
            flags: FormControlFlags::default(),
            field: None,
            container: None,
            outside,
            handlers: ConsumerHandlers::default(),
            on_open: None,
            on_close: None,
        })
    }

    pub fn with_flags(mut self, flags: FormControlFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Handlers merged between per-call prop handlers and the controller's own.
    pub fn with_handlers(mut self, handlers: ConsumerHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn on_open(mut self, callback: LifecycleCallback) -> Self {
        self.on_open = Some(callback);
        self
    }

    pub fn on_close(mut self, callback: LifecycleCallback) -> Self {
        self.on_close = Some(callback);
        self
    }

    /// Attach the text input once the view has mounted it.
    pub fn attach_field(&mut self, field: Box<dyn FocusTarget>) {
        self.field = Some(field);
    }

    /// Attach the container hit test once the view has mounted it.
    pub fn attach_container(&mut self, container: Box<dyn Containment>) {
        self.container = Some(container);
    }

    pub fn set_flags(&mut self, flags: FormControlFlags) {
        self.flags = flags;
    }

    // ===== State =====

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == InteractionState::Open
    }

    pub fn value(&self) -> DateValue {
        self.store.get()
    }

    /// Text currently shown in the field.
    pub fn input_text(&self) -> Option<&str> {
        self.input_text.as_deref()
    }

    pub fn codec(&self) -> &ValueCodec {
        &self.codec
    }

    pub fn options(&self) -> &DatePickerOptions {
        &self.options
    }

    pub fn flags(&self) -> &FormControlFlags {
        &self.flags
    }

    pub fn is_clearable(&self) -> bool {
        self.options.clearable
    }

    pub fn is_controlled(&self) -> bool {
        self.store.is_controlled()
    }

    fn is_field_focused(&self) -> bool {
        self.field.as_ref().is_some_and(|field| field.is_focused())
    }

    fn focus_field(&mut self) {
        if !self.options.allow_input {
            return;
        }
        if let Some(field) = self.field.as_mut() {
            field.focus();
        }
    }

    fn transition(&mut self, next: InteractionState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "date picker state transition");
            self.state = next;
        }
    }

    /// Recompute field text after the stored value moved away from `previous`.
    fn after_value_change(&mut self, previous: DateValue) {
        let current = self.store.get();
        if current == previous {
            return;
        }
        if self.is_field_focused() {
            trace!(?current, "field focused, keeping typed text");
            return;
        }
        self.input_text = self.codec.format(current);
    }

    // ===== Transitions =====

    /// Open request. Ignored while disabled or read-only.
    pub fn open(&mut self) -> EventResult {
        if !self.flags.is_interactive() {
            trace!(flags = ?self.flags, "open ignored");
            return EventResult::Ignored;
        }

        if self.is_open() {
            self.focus_field();
            return EventResult::Handled;
        }

        self.transition(InteractionState::Open);
        self.focus_field();
        if let Some(on_open) = self.on_open.as_mut() {
            on_open();
        }
        EventResult::Handled
    }

    /// Close request: blur the field and resync its text with the value.
    pub fn close(&mut self) -> EventResult {
        let was_open = self.is_open();
        self.transition(InteractionState::Closed);

        if let Some(field) = self.field.as_mut() {
            if field.is_focused() {
                field.blur();
            }
        }
        self.input_text = self.codec.format(self.store.get());

        if was_open {
            if let Some(on_close) = self.on_close.as_mut() {
                on_close();
            }
        }
        EventResult::Handled
    }

    fn handle_container_click(&mut self) -> EventResult {
        if self.is_open() {
            self.focus_field();
            EventResult::Handled
        } else {
            self.open()
        }
    }

    fn handle_container_focus(&mut self) -> EventResult {
        if self.is_open() {
            EventResult::Ignored
        } else {
            self.open()
        }
    }

    fn handle_container_blur(&mut self, event: &FocusEvent) -> EventResult {
        if let (Some(container), Some(related)) = (self.container.as_ref(), event.related_target) {
            if container.contains(related) {
                trace!(?related, "blur stayed inside container");
                return EventResult::Ignored;
            }
        }

        if !self.options.close_on_blur {
            return EventResult::Ignored;
        }

        self.input_text = self.codec.format(self.store.get());
        if self.is_open() {
            self.close();
        }
        EventResult::Handled
    }

    fn handle_field_key_down(&mut self, event: &mut KeyboardEvent) -> EventResult {
        if !self.flags.is_interactive() {
            return EventResult::Ignored;
        }

        match event.key {
            KeyCode::Enter => {
                event.prevent_default();
                event.stop_propagation();
                self.close()
            }
            _ => EventResult::Ignored,
        }
    }

    /// A pointer press or focus move anywhere in the document.
    pub fn handle_outside_interaction(&mut self, event: &PointerEvent) -> EventResult {
        if self.outside.should_fire(self.container.as_deref(), event.target) {
            trace!(target = ?event.target, "outside interaction");
            self.close()
        } else {
            EventResult::Ignored
        }
    }

    /// The calendar picked `value`.
    pub fn select_date(&mut self, value: DateValue) -> EventResult {
        let previous = self.store.get();
        self.store.set(value);

        if self.options.close_on_select && value.is_date() {
            self.close();
        }
        // A controlled owner may not have fed the value back yet; show the pick.
        self.input_text = self.codec.format(value);
        self.after_value_change(previous);

        debug!(?value, open = self.is_open(), "calendar selection");
        EventResult::Handled
    }

    /// The user edited the field text.
    ///
    /// Text that does not parse commits `DateValue::Cleared`. Errors come only
    /// from a failing custom parser, in which case nothing is changed.
    pub fn input_text_changed(&mut self, raw: &str) -> Result<EventResult> {
        let filtered = self.options.filter_input(raw).into_owned();
        let parsed = self.codec.parse(&filtered)?;
        let committed = if ValueCodec::is_valid(parsed) {
            parsed
        } else {
            DateValue::Cleared
        };

        trace!(%raw, %filtered, ?committed, "field text changed");

        let previous = self.store.get();
        self.input_text = Some(filtered);
        self.store.set(committed);
        self.after_value_change(previous);
        Ok(EventResult::Handled)
    }

    /// Clear the value and text, keeping the popover as it is.
    ///
    /// Stops propagation so the container's click handler does not reopen.
    pub fn clear(&mut self, event: &mut ClickEvent) -> EventResult {
        event.stop_propagation();

        let previous = self.store.get();
        self.store.set(DateValue::Cleared);
        self.input_text = None;
        self.focus_field();
        self.after_value_change(previous);

        debug!("date picker cleared");
        EventResult::Handled
    }

    /// The controlled owner supplied a new value (or `Unset` to release control).
    pub fn set_external_value(&mut self, value: DateValue) {
        let previous = self.store.get();
        self.store.sync_external(value);
        self.after_value_change(previous);
    }

    // ===== Dispatch =====

    pub fn dispatch_container_click(&mut self, props: &ContainerProps, event: &mut ClickEvent) -> EventResult {
        let mut result = EventResult::Ignored;
        props.on_click.dispatch(event, |_| {
            result = self.handle_container_click();
            Dispatch::Continue
        });
        result
    }

    pub fn dispatch_container_focus(&mut self, props: &ContainerProps, event: &mut FocusEvent) -> EventResult {
        let mut result = EventResult::Ignored;
        props.on_focus.dispatch(event, |_| {
            result = self.handle_container_focus();
            Dispatch::Continue
        });
        result
    }

    pub fn dispatch_container_blur(&mut self, props: &ContainerProps, event: &mut FocusEvent) -> EventResult {
        let mut result = EventResult::Ignored;
        props.on_blur.dispatch(event, |event| {
            result = self.handle_container_blur(event);
            Dispatch::Continue
        });
        result
    }

    pub fn dispatch_field_key_down(&mut self, props: &FieldProps, event: &mut KeyboardEvent) -> EventResult {
        let mut result = EventResult::Ignored;
        props.on_key_down.dispatch(event, |event| {
            result = self.handle_field_key_down(event);
            Dispatch::Continue
        });
        result
    }

    pub fn dispatch_input_change(&mut self, props: &InputProps, event: &mut InputEvent) -> Result<EventResult> {
        let mut outcome = Ok(EventResult::Ignored);
        props.on_change.dispatch(event, |event| {
            outcome = self.input_text_changed(&event.value);
            if outcome.is_err() {
                Dispatch::Stop
            } else {
                Dispatch::Continue
            }
        });
        outcome
    }

    // ===== Prop getters =====

    pub fn container_props(&self, user: &ConsumerHandlers) -> ContainerProps {
        ContainerProps {
            flags: self.flags.clone(),
            on_click: HandlerChain::ending_with_controller([
                user.on_click.clone(),
                self.handlers.on_click.clone(),
            ]),
            on_focus: HandlerChain::ending_with_controller([
                user.on_focus.clone(),
                self.handlers.on_focus.clone(),
            ]),
            on_blur: HandlerChain::ending_with_controller([
                user.on_blur.clone(),
                self.handlers.on_blur.clone(),
            ]),
        }
    }

    pub fn field_props(&self, user: &ConsumerHandlers) -> FieldProps {
        let allow_input = self.options.allow_input;
        FieldProps {
            flags: self.flags.clone(),
            tab_index: if allow_input { -1 } else { 0 },
            active: self.is_open(),
            expanded: self.is_open(),
            cursor: if allow_input { Cursor::Default } else { Cursor::Pointer },
            on_key_down: HandlerChain::ending_with_controller([
                user.on_key_down.clone(),
                self.handlers.on_key_down.clone(),
            ]),
        }
    }

    pub fn input_props(&self, user: &ConsumerHandlers) -> InputProps {
        let allow_input = self.options.allow_input;
        InputProps {
            id: self.flags.id.clone(),
            value: self.input_text.clone().unwrap_or_default(),
            placeholder: self.options.placeholder.clone(),
            flags: self.flags.clone(),
            tab_index: if allow_input { 0 } else { -1 },
            pointer_events: allow_input && !self.flags.disabled,
            cursor: if self.flags.read_only {
                Cursor::Default
            } else {
                Cursor::Text
            },
            on_change: HandlerChain::ending_with_controller([user.on_change.clone()]),
        }
    }

    pub fn popover_props(&self) -> PopoverProps {
        PopoverProps {
            is_open: self.is_open(),
            placement: self.options.placement,
            duration: self.options.duration,
            trigger: PopoverTrigger::Never,
            close_on_button: false,
        }
    }

    pub fn calendar_props(&self) -> CalendarProps {
        CalendarProps {
            value: self.store.get(),
            default_value: self.store.default_value(),
            bounds: self.codec.bounds(),
            exclude_date: self.options.exclude_date.clone(),
            locale: self.options.locale,
            options: self.options.calendar.clone(),
        }
    }
}
