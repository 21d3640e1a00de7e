//! Date normalization for birth, passing and creation dates.
//!
//! # Responsibility
//! - Accept every date shape the persistence layer emits.
//! - Normalize into one calendar date before any tree logic runs.
//! - Provide age and anniversary arithmetic for detail and birthday views.
//!
//! # Invariants
//! - Unparseable input is absence (`None`), never an error.
//! - Dates before 1800 or more than one year ahead are data-entry errors.

mod normalize;
mod source;

pub use normalize::{
    age, days_until_anniversary, format_long, format_short, next_anniversary, parse_date,
    parse_date_as_of, today, MAX_AGE_YEARS, MIN_YEAR, NOT_SET_LABEL,
};
pub use source::DateSource;
