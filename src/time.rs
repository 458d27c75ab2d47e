//! Temporal types for name validity.
//!
//! Every generated name variant is valid over an inclusive civil-date
//! interval. Variants with no membership-derived interval get a wide
//! default bracket so that ordinary resolution dates always fall inside.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An inclusive range of civil dates: `[from, to]`.
///
/// Used to represent when a name variant is a plausible rendering of a
/// person — typically the lifetime of the membership that produced it.
///
/// # Examples
///
/// ```
/// use namecast::ValidityWindow;
/// use chrono::NaiveDate;
///
/// let window = ValidityWindow::default_bracket();
/// let date = NaiveDate::from_ymd_opt(2010, 11, 1).unwrap();
/// assert!(window.contains(date));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidityWindow {
    /// Start of the window (inclusive).
    pub from: NaiveDate,

    /// End of the window (inclusive).
    pub to: NaiveDate,
}

impl ValidityWindow {
    /// Creates a validity window from two dates.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidValidityWindow` if `from > to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ValidationError> {
        if from > to {
            return Err(ValidationError::InvalidValidityWindow { from, to });
        }
        Ok(Self { from, to })
    }

    /// The wide default bracket applied when no membership interval is
    /// known: 2000-01-01 through 2030-01-01.
    #[must_use]
    pub fn default_bracket() -> Self {
        Self {
            from: default_from(),
            to: default_to(),
        }
    }

    /// Builds a window from optional bounds, substituting the default
    /// bracket for whichever side is absent.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidValidityWindow` if the resulting
    /// bounds are inverted.
    pub fn from_bounds(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            from.unwrap_or_else(default_from),
            to.unwrap_or_else(default_to),
        )
    }

    /// Check if a date falls within this window (both bounds inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Returns true if this window is exactly the default bracket.
    #[must_use]
    pub fn is_default_bracket(&self) -> bool {
        *self == Self::default_bracket()
    }
}

impl Default for ValidityWindow {
    fn default() -> Self {
        Self::default_bracket()
    }
}

impl std::fmt::Display for ValidityWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} .. {}]", self.from, self.to)
    }
}

fn default_from() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).expect("hard-coded calendar date")
}

fn default_to() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).expect("hard-coded calendar date")
}

/// Parses a possibly-partial ISO date string from upstream membership
/// records.
///
/// Upstream data uses `-00` as a placeholder for an unknown month or day
/// (`"2009-00-00"`); each `-00` component is normalized to `-01` before
/// parsing. Anything that still fails to parse yields `None` — an absent
/// bound, not an error.
///
/// # Examples
///
/// ```
/// use namecast::parse_partial_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_partial_date("2009-00-00"),
///     NaiveDate::from_ymd_opt(2009, 1, 1),
/// );
/// assert_eq!(parse_partial_date("not a date"), None);
/// ```
#[must_use]
pub fn parse_partial_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let normalized = value.replace("-00", "-01");
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").ok()
}
