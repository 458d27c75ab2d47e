//! Organization types.
//!
//! Organizations come from the same upstream registry as persons and are
//! read-only here. The classification tag decides which variant shapes a
//! membership produces: `"party"` memberships generate parenthetical
//! party suffixes, everything else generates role-prefixed labels.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification value that marks an organization as a political party.
pub const PARTY_CLASSIFICATION: &str = "party";

/// Globally unique, stable organization identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(Uuid);

impl OrgId {
    /// Creates a new random organization ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an organization ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrgId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A canonical organization record.
///
/// # Examples
///
/// ```
/// use namecast::Organization;
///
/// let org = Organization::new("African National Congress (ANC)", "Party");
/// assert!(org.is_party());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Globally unique identifier.
    pub id: OrgId,

    /// Canonical name, possibly carrying a parenthesized abbreviation.
    pub name: String,

    /// Registered alternate names.
    #[serde(default)]
    pub other_names: Vec<String>,

    /// Classification tag, e.g. `"party"` or `"committee"`.
    pub classification: String,
}

impl Organization {
    /// Creates an organization with a fresh ID.
    #[must_use]
    pub fn new(name: impl Into<String>, classification: impl Into<String>) -> Self {
        Self {
            id: OrgId::new(),
            name: name.into(),
            other_names: Vec::new(),
            classification: classification.into(),
        }
    }

    /// Adds an alternate name.
    #[must_use]
    pub fn with_other_name(mut self, name: impl Into<String>) -> Self {
        self.other_names.push(name.into());
        self
    }

    /// Returns true if this organization is classified as a political
    /// party (case-insensitive).
    #[must_use]
    pub fn is_party(&self) -> bool {
        self.classification.eq_ignore_ascii_case(PARTY_CLASSIFICATION)
    }

    /// All names this organization is registered under: the canonical
    /// name plus alternates, deduplicated, in deterministic order.
    #[must_use]
    pub fn all_names(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        for other in &self.other_names {
            if !names.contains(&other.as_str()) {
                names.push(other.as_str());
            }
        }
        names
    }
}

impl PartialEq for Organization {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Organization {}
