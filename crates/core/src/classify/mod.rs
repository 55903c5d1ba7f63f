//! Pure helpers that turn raw rating/target strings into display classes.
//!
//! Every function here is total: malformed input degrades to
//! [`Classification::Neutral`], `0.0`, `"N/A"` or `"Invalid Date"`.

mod date;
mod rating;
mod target;

pub use date::{format_date, INVALID_DATE, NOT_AVAILABLE, ZERO_DATE};
pub(crate) use date::parse_timestamp;
pub use rating::{rating_class, rating_level, RatingTier};
pub use target::{calculate_target_change, parse_price, target_class};

use serde::Serialize;
use std::fmt;

/// Direction of a from/to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Improved,
    Worsened,
    Neutral,
}

impl Classification {
    fn from_ordering(ordering: Option<std::cmp::Ordering>) -> Self {
        match ordering {
            Some(std::cmp::Ordering::Greater) => Classification::Improved,
            Some(std::cmp::Ordering::Less) => Classification::Worsened,
            _ => Classification::Neutral,
        }
    }

    /// Colour class used by the web dashboard.
    pub fn css_class(self) -> &'static str {
        match self {
            Classification::Improved => "text-green-600",
            Classification::Worsened => "text-red-600",
            Classification::Neutral => "text-gray-500",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Classification::Improved => "▲",
            Classification::Worsened => "▼",
            Classification::Neutral => "=",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Improved => "improved",
            Classification::Worsened => "worsened",
            Classification::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
