//! Input field state machines for the request form.
//!
//! Each field owns its own raw input, validation verdict, and inline message.
//! Transitions are pure and take "today" as an argument where validation
//! depends on it, so they are testable without touching the wall clock.

use chrono::NaiveDate;

pub mod date;
pub mod location;

pub use date::{DateField, DateValidation};
pub use location::{LocationField, LocationValidation};

/// The local calendar date, as used for future-date rejection and the
/// default value of a fresh date field.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
