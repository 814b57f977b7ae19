//! Construction-time configuration for [`crate::InteractionController`].

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use chrono::{Locale, NaiveDate, Weekday};
use regex::Regex;
use rune_config::{DatePickerConfig, Placement};

use crate::codec::{DEFAULT_INPUT_FORMAT, DateBounds, DateParser, ValueCodec, parse_locale};
use crate::error::Result;

/// Dates the calendar refuses to offer.
pub type ExcludeDate = Rc<dyn Fn(NaiveDate) -> bool>;

/// Display settings forwarded untouched to the calendar primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarOptions {
    pub first_day_of_week: Weekday,
    pub amount_of_months: u32,
    pub paginate_by: Option<u32>,
    pub default_month: Option<NaiveDate>,
    pub with_weekdays: bool,
    pub disable_outside_days: bool,
    pub weekend_days: Vec<Weekday>,
    pub holidays: Vec<NaiveDate>,
    pub highlight_today: bool,
    pub with_header: bool,
    pub with_controls: bool,
    pub with_label: bool,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            first_day_of_week: Weekday::Mon,
            amount_of_months: 1,
            paginate_by: None,
            default_month: None,
            with_weekdays: true,
            disable_outside_days: false,
            weekend_days: vec![Weekday::Sat, Weekday::Sun],
            holidays: Vec::new(),
            highlight_today: true,
            with_header: true,
            with_controls: true,
            with_label: true,
        }
    }
}

#[derive(Clone)]
pub struct DatePickerOptions {
    pub input_format: String,
    /// Passed explicitly; there is no ambient default locale.
    pub locale: Locale,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub parse_date: Option<DateParser>,
    /// Characters matching this are stripped from typed text. `None` keeps
    /// only ASCII digits, `-` and `/`.
    pub pattern: Option<Regex>,
    pub close_on_blur: bool,
    pub close_on_select: bool,
    pub allow_input: bool,
    pub default_open: bool,
    pub clearable: bool,
    pub placement: Placement,
    pub duration: f32,
    pub placeholder: Option<String>,
    pub exclude_date: Option<ExcludeDate>,
    pub calendar: CalendarOptions,
}

impl fmt::Debug for DatePickerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePickerOptions")
            .field("input_format", &self.input_format)
            .field("locale", &self.locale)
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("parse_date", &self.parse_date.is_some())
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("close_on_blur", &self.close_on_blur)
            .field("close_on_select", &self.close_on_select)
            .field("allow_input", &self.allow_input)
            .field("default_open", &self.default_open)
            .field("clearable", &self.clearable)
            .field("placement", &self.placement)
            .field("duration", &self.duration)
            .field("placeholder", &self.placeholder)
            .field("exclude_date", &self.exclude_date.is_some())
            .field("calendar", &self.calendar)
            .finish()
    }
}

impl Default for DatePickerOptions {
    fn default() -> Self {
        Self {
            input_format: DEFAULT_INPUT_FORMAT.to_string(),
            locale: Locale::en_US,
            min_date: None,
            max_date: None,
            parse_date: None,
            pattern: None,
            close_on_blur: true,
            close_on_select: true,
            allow_input: true,
            default_open: false,
            clearable: true,
            placement: Placement::BottomStart,
            duration: 0.2,
            placeholder: None,
            exclude_date: None,
            calendar: CalendarOptions::default(),
        }
    }
}

impl DatePickerOptions {
    /// Resolve a loaded `[date_picker]` config section.
    pub fn from_config(config: &DatePickerConfig) -> Result<Self> {
        Ok(Self {
            input_format: config.input_format.clone(),
            locale: parse_locale(&config.locale)?,
            min_date: config.min_date,
            max_date: config.max_date,
            pattern: Some(Regex::new(&config.pattern)?),
            close_on_blur: config.close_on_blur,
            close_on_select: config.close_on_select,
            allow_input: config.allow_input,
            default_open: config.default_open,
            clearable: config.clearable,
            placement: config.placement,
            duration: config.duration,
            placeholder: config.placeholder.clone(),
            ..Self::default()
        })
    }

    /// Build the codec these options describe.
    pub fn codec(&self) -> Result<ValueCodec> {
        let bounds = DateBounds::new(self.min_date, self.max_date)?;
        let codec = ValueCodec::new(self.input_format.clone(), self.locale, bounds)?;
        Ok(match &self.parse_date {
            Some(parser) => codec.with_parser(parser.clone()),
            None => codec,
        })
    }

    /// Strip excluded characters from typed text.
    pub fn filter_input<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(text, ""),
            None if text.chars().all(is_default_input_char) => Cow::Borrowed(text),
            None => Cow::Owned(text.chars().filter(|c| is_default_input_char(*c)).collect()),
        }
    }
}

fn is_default_input_char(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '/'
}
