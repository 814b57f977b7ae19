use chrono::NaiveDate;

/// The picker's date value.
///
/// `Unset` and `Cleared` are both "no date", but they are not the same thing:
/// a pristine picker holds `Unset`, while a user clearing the field or typing
/// text that does not parse commits `Cleared`. A controlled store treats only
/// `Unset` as "no external value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateValue {
    /// Never set.
    #[default]
    Unset,
    /// Explicitly cleared.
    Cleared,
    /// A calendar date.
    Date(NaiveDate),
}

impl DateValue {
    /// The concrete date, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DateValue::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, DateValue::Date(_))
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, DateValue::Unset)
    }

    /// True for both `Unset` and `Cleared`.
    pub fn is_absent(&self) -> bool {
        !self.is_date()
    }

    /// Apply `f` to the contained date, keeping absent values as they are.
    pub fn map_date(self, f: impl FnOnce(NaiveDate) -> NaiveDate) -> Self {
        match self {
            DateValue::Date(date) => DateValue::Date(f(date)),
            other => other,
        }
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Date(date)
    }
}

/// `None` maps to `Cleared`; use `DateValue::Unset` directly for a pristine value.
impl From<Option<NaiveDate>> for DateValue {
    fn from(date: Option<NaiveDate>) -> Self {
        match date {
            Some(date) => DateValue::Date(date),
            None => DateValue::Cleared,
        }
    }
}
