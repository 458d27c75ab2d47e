//! Membership records linking persons to organizations over time.
//!
//! Memberships are read-only upstream data. Their date strings may be
//! partial (`-00` placeholders) or unparsable; both degrade to an absent
//! bound rather than an error. The organization is carried as an
//! already-resolved reference — variant generation must never re-look it
//! up by display string.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::organization::Organization;
use crate::person::PersonId;
use crate::time::{parse_partial_date, ValidityWindow};

/// Role pattern for numbered candidate-list memberships, e.g.
/// `"4th National Candidate"`. These produce no role-prefixed variants.
fn candidate_role_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d+.* Candidate$").expect("hard-coded pattern compiles")
    })
}

/// A person's affiliation with an organization over a time interval.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use namecast::{Membership, Organization, PersonId};
///
/// let anc = Arc::new(Organization::new("African National Congress (ANC)", "Party"));
/// let membership = Membership::new(PersonId::new())
///     .with_organization(anc)
///     .with_dates(Some("1994-05-09"), Some("1999-06-14"));
/// assert!(membership.organization.is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    /// The person this membership belongs to.
    pub person: PersonId,

    /// The organization, already resolved by the upstream registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Arc<Organization>>,

    /// Role within the organization, e.g. `"Member"` or `"Minister"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Free-text label for the membership.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Start date as a possibly-partial ISO string (`-00` placeholders).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// End date as a possibly-partial ISO string (`-00` placeholders).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Membership {
    /// Creates an empty membership for a person.
    #[must_use]
    pub fn new(person: PersonId) -> Self {
        Self {
            person,
            organization: None,
            role: None,
            label: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Sets the organization reference.
    #[must_use]
    pub fn with_organization(mut self, organization: Arc<Organization>) -> Self {
        self.organization = Some(organization);
        self
    }

    /// Sets the role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the start/end date strings.
    #[must_use]
    pub fn with_dates(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_date = start.map(str::to_string);
        self.end_date = end.map(str::to_string);
        self
    }

    /// The role, trimmed, when non-empty.
    #[must_use]
    pub fn role_text(&self) -> Option<&str> {
        non_empty(self.role.as_deref())
    }

    /// The label, trimmed, when non-empty.
    #[must_use]
    pub fn label_text(&self) -> Option<&str> {
        non_empty(self.label.as_deref())
    }

    /// The validity window this membership implies.
    ///
    /// Each side is parsed with [`parse_partial_date`]; an absent or
    /// unparsable side falls back to the default bracket side.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidValidityWindow` when the parsed
    /// bounds are inverted.
    pub fn window(&self) -> Result<ValidityWindow, ValidationError> {
        let start = self.start_date.as_deref().and_then(parse_partial_date);
        let end = self.end_date.as_deref().and_then(parse_partial_date);
        ValidityWindow::from_bounds(start, end)
    }

    /// True for an ordinary party membership: the organization is a
    /// party and the role is exactly `"Member"`.
    #[must_use]
    pub fn is_plain_party_member(&self) -> bool {
        self.organization.as_deref().is_some_and(Organization::is_party)
            && self.role_text() == Some("Member")
    }

    /// True when the role matches the numbered candidate-list pattern,
    /// e.g. `"4th National Candidate"`.
    #[must_use]
    pub fn is_candidate_list(&self) -> bool {
        self.role_text()
            .is_some_and(|role| candidate_role_pattern().is_match(role))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
