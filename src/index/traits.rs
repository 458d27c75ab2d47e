//! Abstract variant-index trait.
//!
//! The search backend is an external component; this trait pins down the
//! narrow contract resolution relies on: index a document, clear the
//! collection, and query by text with date containment as a hard filter.
//! Result ordering within a query is backend-defined relevance order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;
use crate::person::PersonId;
use crate::time::ValidityWindow;
use crate::variant::NameVariant;

/// Errors that can occur during index operations.
///
/// These are infrastructure errors, distinct from a query that merely
/// finds nothing. `Timeout` is special-cased by the resolver: a timed-out
/// candidate query degrades to zero results instead of aborting
/// resolution.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Backend rejected or failed the operation.
    #[error("Index backend error: {0}")]
    Backend(String),

    /// Backend could not be reached.
    #[error("Index backend unavailable: {0}")]
    Unavailable(String),

    /// The operation exceeded its time budget.
    #[error("Index operation timed out after {duration_ms}ms")]
    Timeout {
        duration_ms: u64,
    },
}

/// Contract for the external search index holding name variants.
///
/// Implementations must treat date containment as a hard filter: a
/// variant whose window does not contain the query date is never
/// returned, regardless of how well its text matches.
pub trait VariantIndex: Send + Sync {
    /// Index one variant. Identical `(text, person, window)` tuples
    /// collapse to a single document (get-or-create).
    fn index(&self, variant: &NameVariant) -> Result<(), IndexError>;

    /// Remove every document. Used at the start of a full rebuild.
    fn clear(&self) -> Result<(), IndexError>;

    /// Find variants whose text matches `text` and whose validity window
    /// contains `as_of`, in backend-defined relevance order.
    fn query(&self, text: &str, as_of: NaiveDate) -> Result<Vec<NameVariant>, IndexError>;
}

/// Wire shape of one indexed document, as external backends store it.
///
/// # Examples
///
/// ```
/// use namecast::{NameVariant, PersonId, ValidityWindow, VariantDocument};
///
/// let variant = NameVariant::new(
///     "N Mandela (ANC)",
///     PersonId::new(),
///     ValidityWindow::default_bracket(),
/// ).unwrap();
/// let doc = VariantDocument::from(&variant);
/// assert_eq!(doc.text, "N Mandela (ANC)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDocument {
    /// The variant text, the full-text-searchable field.
    pub text: String,

    /// The person the variant denotes.
    pub person_id: PersonId,

    /// Start of the validity window (inclusive).
    pub start_date: NaiveDate,

    /// End of the validity window (inclusive).
    pub end_date: NaiveDate,
}

impl From<&NameVariant> for VariantDocument {
    fn from(variant: &NameVariant) -> Self {
        Self {
            text: variant.text.clone(),
            person_id: variant.person,
            start_date: variant.window.from,
            end_date: variant.window.to,
        }
    }
}

impl VariantDocument {
    /// Converts the document back into a [`NameVariant`].
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when the document carries an empty
    /// text or an inverted date window.
    pub fn into_variant(self) -> Result<NameVariant, ValidationError> {
        let window = ValidityWindow::new(self.start_date, self.end_date)?;
        NameVariant::new(self.text, self.person_id, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test: ensure the trait is object-safe
    fn _assert_variant_index_object_safe(_: &dyn VariantIndex) {}

    #[test]
    fn test_index_error_display() {
        let err = IndexError::Backend("mapping rejected".to_string());
        assert!(err.to_string().contains("mapping rejected"));

        let err = IndexError::Timeout { duration_ms: 2500 };
        assert!(err.to_string().contains("2500ms"));
    }

    #[test]
    fn test_document_round_trip() {
        let variant = NameVariant::new(
            "J Q Smith",
            PersonId::new(),
            ValidityWindow::default_bracket(),
        )
        .unwrap();
        let doc = VariantDocument::from(&variant);
        assert_eq!(doc.person_id, variant.person);
        assert_eq!(doc.start_date, variant.window.from);
        assert_eq!(doc.into_variant().unwrap(), variant);
    }

    #[test]
    fn test_document_wire_field_names() {
        let variant = NameVariant::new(
            "J Q Smith",
            PersonId::new(),
            ValidityWindow::default_bracket(),
        )
        .unwrap();
        let json = serde_json::to_string(&VariantDocument::from(&variant)).unwrap();
        assert!(json.contains("\"text\""));
        assert!(json.contains("\"personId\""));
        assert!(json.contains("\"startDate\""));
        assert!(json.contains("\"endDate\""));
    }

    #[test]
    fn test_document_rejects_inverted_window() {
        let doc = VariantDocument {
            text: "J Q Smith".to_string(),
            person_id: PersonId::new(),
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
        };
        assert!(doc.into_variant().is_err());
    }
}
