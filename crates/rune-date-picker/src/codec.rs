//! Conversion between field text and [`DateValue`].
//!
//! Both directions clamp into the configured [`DateBounds`], so a value that
//! is out of range when it is shown never renders an out-of-range string.

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::rc::Rc;

use chrono::format::{Item, StrftimeItems};
use chrono::{Locale, NaiveDate};
use tracing::warn;

use crate::error::{DatePickerError, Result};
use crate::value::DateValue;

/// Default strftime pattern for the text field.
pub const DEFAULT_INPUT_FORMAT: &str = "%Y/%m/%d";

/// Caller-supplied replacement for pattern-based parsing.
///
/// Errors are configuration bugs and propagate out of the text-input handler.
pub type DateParser = Rc<dyn Fn(&str) -> anyhow::Result<DateValue>>;

/// Resolve a locale name such as `"en_US"` or `"fr_FR"`.
pub fn parse_locale(name: &str) -> Result<Locale> {
    Locale::try_from(name).map_err(|_| DatePickerError::UnknownLocale(name.to_string()))
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateBounds {
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
}

impl DateBounds {
    pub fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Result<Self> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(DatePickerError::InvertedRange { min, max });
            }
        }
        Ok(Self { min, max })
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn min(&self) -> Option<NaiveDate> {
        self.min
    }

    pub fn max(&self) -> Option<NaiveDate> {
        self.max
    }

    /// Strictly after the max date. Always false without a max.
    pub fn is_after_max_date(&self, date: NaiveDate) -> bool {
        self.max.is_some_and(|max| date > max)
    }

    /// Strictly before the min date. Always false without a min.
    pub fn is_before_min_date(&self, date: NaiveDate) -> bool {
        self.min.is_some_and(|min| date < min)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        !self.is_after_max_date(date) && !self.is_before_min_date(date)
    }

    /// Snap `date` to the nearest bound when it lies outside the range.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        match (self.min, self.max) {
            (_, Some(max)) if date > max => max,
            (Some(min), _) if date < min => min,
            _ => date,
        }
    }
}

/// Parses and formats field text under a fixed pattern, locale and range.
#[derive(Clone)]
pub struct ValueCodec {
    input_format: String,
    locale: Locale,
    bounds: DateBounds,
    parser: Option<DateParser>,
    /// Localized month and weekday names paired with their English forms,
    /// longest first. Empty when the locale already renders English names.
    names: Vec<(String, String)>,
}

impl fmt::Debug for ValueCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueCodec")
            .field("input_format", &self.input_format)
            .field("locale", &self.locale)
            .field("bounds", &self.bounds)
            .field("custom_parser", &self.parser.is_some())
            .finish()
    }
}

impl Default for ValueCodec {
    fn default() -> Self {
        Self {
            input_format: DEFAULT_INPUT_FORMAT.to_string(),
            locale: Locale::en_US,
            bounds: DateBounds::unbounded(),
            parser: None,
            names: Vec::new(),
        }
    }
}

impl ValueCodec {
    /// Create a codec, rejecting strftime patterns chrono cannot interpret.
    pub fn new(input_format: impl Into<String>, locale: Locale, bounds: DateBounds) -> Result<Self> {
        let input_format = input_format.into();
        if StrftimeItems::new(&input_format).any(|item| matches!(item, Item::Error)) {
            return Err(DatePickerError::InvalidFormat(input_format));
        }

        Ok(Self {
            input_format,
            locale,
            bounds,
            parser: None,
            names: localized_names(locale),
        })
    }

    /// Replace pattern-based parsing with `parser`. Clamping still applies.
    pub fn with_parser(mut self, parser: DateParser) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn input_format(&self) -> &str {
        &self.input_format
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn bounds(&self) -> DateBounds {
        self.bounds
    }

    /// Parse field text.
    ///
    /// Text the pattern cannot read yields `DateValue::Cleared`; use
    /// [`ValueCodec::is_valid`] to tell a usable result apart. Only a failing
    /// custom parser returns `Err`.
    pub fn parse(&self, text: &str) -> Result<DateValue> {
        let value = match &self.parser {
            Some(parser) => parser(text)?,
            None => NaiveDate::parse_from_str(&self.to_english(text), &self.input_format)
                .map(DateValue::Date)
                .unwrap_or(DateValue::Cleared),
        };

        Ok(self.clamp(value))
    }

    /// Render `value` for the field. Absent values render as `None`.
    pub fn format(&self, value: DateValue) -> Option<String> {
        let date = self.clamp(value).date()?;

        let mut out = String::new();
        if let Err(error) = write!(out, "{}", date.format_localized(&self.input_format, self.locale)) {
            // Patterns asking for time-of-day fields cannot render a bare date.
            warn!(?error, format = %self.input_format, %date, "failed to render date");
            return None;
        }
        Some(out)
    }

    /// Swap localized month and weekday names for the English ones chrono
    /// parses. Matches are taken longest first in a single left-to-right pass.
    fn to_english<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.names.is_empty() {
            return Cow::Borrowed(text);
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        'scan: while let Some(c) = rest.chars().next() {
            for (local, english) in &self.names {
                if let Some(tail) = rest.strip_prefix(local.as_str()) {
                    out.push_str(english);
                    rest = tail;
                    continue 'scan;
                }
            }
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
        Cow::Owned(out)
    }

    pub fn clamp(&self, value: DateValue) -> DateValue {
        value.map_date(|date| self.bounds.clamp(date))
    }

    /// A parse result is usable iff it carries a concrete date.
    pub fn is_valid(value: DateValue) -> bool {
        value.is_date()
    }
}

/// Month and weekday names `locale` renders differently from English.
///
/// Built from chrono's own localized output, so anything `format` renders
/// maps back.
fn localized_names(locale: Locale) -> Vec<(String, String)> {
    let months = (1..=12).filter_map(|month| NaiveDate::from_ymd_opt(2001, month, 1));
    // 2001-01-01 is a Monday.
    let weekdays = (1..=7).filter_map(|day| NaiveDate::from_ymd_opt(2001, 1, day));

    let mut names: Vec<(String, String)> = months
        .flat_map(|date| [(date, "%B"), (date, "%b")])
        .chain(weekdays.flat_map(|date| [(date, "%A"), (date, "%a")]))
        .map(|(date, spec)| {
            (
                date.format_localized(spec, locale).to_string(),
                date.format(spec).to_string(),
            )
        })
        .filter(|(local, english)| !local.is_empty() && local != english)
        .collect();

    names.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.cmp(b)));
    names.dedup();
    names
}
