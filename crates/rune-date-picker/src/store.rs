//! Holds the picker's current [`DateValue`] for either an external owner
//! (controlled) or itself (uncontrolled).
//!
//! There is no mode flag: every read checks whether an external value is
//! present. Supplying one later switches the store to controlled mode;
//! doing so mid-lifecycle is the caller's business.

use std::fmt;

use crate::value::DateValue;

/// Invoked with every value committed through [`ControllableValueStore::set`].
pub type ChangeCallback = Box<dyn FnMut(DateValue)>;

pub struct ControllableValueStore {
    external: DateValue,
    internal: DateValue,
    default: DateValue,
    on_change: Option<ChangeCallback>,
}

impl fmt::Debug for ControllableValueStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllableValueStore")
            .field("external", &self.external)
            .field("internal", &self.internal)
            .field("default", &self.default)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl Default for ControllableValueStore {
    fn default() -> Self {
        Self::uncontrolled(DateValue::Unset)
    }
}

impl ControllableValueStore {
    /// `external` other than `Unset` puts the store in controlled mode.
    /// `default` seeds internal storage once.
    pub fn new(external: DateValue, default: DateValue, on_change: Option<ChangeCallback>) -> Self {
        Self {
            external,
            internal: default,
            default,
            on_change,
        }
    }

    pub fn uncontrolled(default: DateValue) -> Self {
        Self::new(DateValue::Unset, default, None)
    }

    pub fn controlled(external: DateValue, on_change: ChangeCallback) -> Self {
        Self::new(external, DateValue::Unset, Some(on_change))
    }

    pub fn with_on_change(mut self, on_change: ChangeCallback) -> Self {
        self.on_change = Some(on_change);
        self
    }

    /// The seed value, unaffected by later commits.
    pub fn default_value(&self) -> DateValue {
        self.default
    }

    pub fn is_controlled(&self) -> bool {
        !self.external.is_unset()
    }

    pub fn get(&self) -> DateValue {
        if self.is_controlled() {
            self.external
        } else {
            self.internal
        }
    }

    /// Commit `value`.
    ///
    /// Controlled stores only notify; the owner must feed the value back via
    /// [`ControllableValueStore::sync_external`]. Committing the value already
    /// read is a no-op.
    pub fn set(&mut self, value: DateValue) {
        if value == self.get() {
            return;
        }

        if !self.is_controlled() {
            self.internal = value;
        }

        if let Some(on_change) = self.on_change.as_mut() {
            on_change(value);
        }
    }

    /// Mirror the value held by the external owner. Passing `Unset` hands
    /// ownership back to internal storage.
    pub fn sync_external(&mut self, value: DateValue) {
        self.external = value;
    }
}
