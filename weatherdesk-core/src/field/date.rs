use chrono::NaiveDate;

/// Format used to echo a calendar selection back into the text input,
/// e.g. "August 07, 2026".
pub const DISPLAY_FORMAT: &str = "%B %d, %Y";

/// Patterns accepted from typed input. Anything else is rejected rather than
/// guessed at, so a half-typed date never silently advances the draft.
const ACCEPTED_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d %B %Y",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValidation {
    Empty,
    Valid,
    InvalidFormat,
    FutureRejected,
}

impl DateValidation {
    /// Inline message for the input, `None` when there is nothing to show.
    pub fn message(self) -> Option<&'static str> {
        match self {
            DateValidation::Valid => None,
            DateValidation::Empty => Some("Date is required."),
            DateValidation::InvalidFormat => {
                Some("Enter a date like \"August 07, 2026\" or \"2026-08-07\".")
            }
            DateValidation::FutureRejected => Some("Date must not be in the future."),
        }
    }

    pub fn is_valid(self) -> bool {
        self == DateValidation::Valid
    }
}

/// Text input and calendar selection for the request date, kept in sync.
///
/// `raw` is always the last typed (or selection-derived) string; `parsed`
/// only advances when validation passes, so an invalid edit never clobbers
/// the last good date.
#[derive(Debug, Clone)]
pub struct DateField {
    raw: String,
    parsed: Option<NaiveDate>,
    validation: DateValidation,
}

impl DateField {
    /// A fresh field defaults to today's date, already valid.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            raw: display_string(today),
            parsed: Some(today),
            validation: DateValidation::Valid,
        }
    }

    /// Typed edit: reparse and revalidate against `today`.
    pub fn set_text(&mut self, text: &str, today: NaiveDate) {
        self.raw = text.to_string();

        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.validation = DateValidation::Empty;
            return;
        }

        let Some(date) = parse_human(trimmed) else {
            self.validation = DateValidation::InvalidFormat;
            return;
        };

        self.accept(date, today);
    }

    /// Calendar selection: the date is parseable by construction, so only the
    /// future check applies. The raw text is rewritten in the display format.
    pub fn select(&mut self, date: NaiveDate, today: NaiveDate) {
        self.raw = display_string(date);
        self.accept(date, today);
    }

    fn accept(&mut self, date: NaiveDate, today: NaiveDate) {
        if date > today {
            self.validation = DateValidation::FutureRejected;
        } else {
            self.parsed = Some(date);
            self.validation = DateValidation::Valid;
            tracing::debug!("date field accepted {date}");
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn parsed(&self) -> Option<NaiveDate> {
        self.parsed
    }

    pub fn validation(&self) -> DateValidation {
        self.validation
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    /// The "YYYY-MM-DD" form used in the create-request payload.
    /// Present only while the field is valid.
    pub fn iso_date(&self) -> Option<String> {
        if self.is_valid() {
            self.parsed.map(|date| date.format("%Y-%m-%d").to_string())
        } else {
            None
        }
    }
}

/// Render a date the way the text input displays it.
pub fn display_string(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

fn parse_human(text: &str) -> Option<NaiveDate> {
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}
