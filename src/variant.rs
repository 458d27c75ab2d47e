//! Name variant records.
//!
//! A `NameVariant` is one candidate textual rendering of a person's name,
//! valid over a specific date window. Variants are created only by the
//! generator during a full rebuild, never mutated afterwards, and the
//! whole set is dropped and recreated on each rebuild.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::person::PersonId;
use crate::time::ValidityWindow;

/// One candidate textual rendering of a person's name.
///
/// Many variants point at one person. Duplicate texts across *different*
/// persons with overlapping windows are expected — resolution ordering,
/// not uniqueness, disambiguates them. Identical `(text, person, window)`
/// tuples collapse to a single record at indexing time.
///
/// # Examples
///
/// ```
/// use namecast::{NameVariant, PersonId, ValidityWindow};
///
/// let variant = NameVariant::new(
///     "N Mandela (ANC)",
///     PersonId::new(),
///     ValidityWindow::default_bracket(),
/// ).unwrap();
/// assert_eq!(variant.text, "N Mandela (ANC)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameVariant {
    /// The generated rendering. Never empty.
    pub text: String,

    /// The person this variant denotes.
    pub person: PersonId,

    /// Inclusive dates over which the rendering is plausible.
    pub window: ValidityWindow,
}

impl NameVariant {
    /// Creates a name variant.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyVariantText` if `text` is empty or
    /// whitespace-only.
    pub fn new(
        text: impl Into<String>,
        person: PersonId,
        window: ValidityWindow,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyVariantText);
        }
        Ok(Self {
            text,
            person,
            window,
        })
    }
}

impl std::fmt::Display for NameVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.text, self.person, self.window)
    }
}
