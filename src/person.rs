//! Person identity types.
//!
//! A person is the stable identity that name variants point back to.
//! Person records are owned by an external registry and treated as
//! read-only here; this module only defines their shape.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Globally unique, stable person identifier.
///
/// Once created, a `PersonId` never changes. Every generated name variant
/// references exactly one `PersonId`.
///
/// # Examples
///
/// ```
/// use namecast::PersonId;
///
/// let id = PersonId::new();
/// assert!(!id.is_nil());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(Uuid);

impl PersonId {
    /// Creates a new random person ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a person ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns true if this is a nil (all zeros) UUID.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Creates a nil person ID (for testing or sentinel values).
    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PersonId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<PersonId> for Uuid {
    fn from(id: PersonId) -> Self {
        id.0
    }
}

/// A canonical person record from the upstream registry.
///
/// Only the naming fields matter here: the display name drives variant
/// generation, with the optional given/family/honorific fields refining
/// which variants can be produced.
///
/// # Examples
///
/// ```
/// use namecast::Person;
///
/// let person = Person::new("Nelson Mandela").with_given_name("Nelson");
/// assert_eq!(person.name, "Nelson Mandela");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Globally unique identifier.
    pub id: PersonId,

    /// Full display name, e.g. `"John Quentin Smith"`.
    pub name: String,

    /// Given name(s), when the registry records them separately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    /// Family name, when the registry records it separately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    /// Honorific prefix such as `"Dr"` or `"Adv"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub honorific_prefix: Option<String>,
}

impl Person {
    /// Creates a person with the given display name and a fresh ID.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(PersonId::new(), name)
    }

    /// Creates a person with a specific ID.
    ///
    /// Useful when mirroring records from an upstream registry that
    /// already assigns identifiers.
    #[must_use]
    pub fn with_id(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            given_name: None,
            family_name: None,
            honorific_prefix: None,
        }
    }

    /// Sets the given name.
    #[must_use]
    pub fn with_given_name(mut self, given_name: impl Into<String>) -> Self {
        self.given_name = Some(given_name.into());
        self
    }

    /// Sets the family name.
    #[must_use]
    pub fn with_family_name(mut self, family_name: impl Into<String>) -> Self {
        self.family_name = Some(family_name.into());
        self
    }

    /// Sets the honorific prefix.
    #[must_use]
    pub fn with_honorific_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.honorific_prefix = Some(prefix.into());
        self
    }

    /// Returns true if the display name is empty or whitespace-only.
    ///
    /// Such records are skipped entirely during variant generation.
    #[must_use]
    pub fn has_empty_name(&self) -> bool {
        self.name.trim().is_empty()
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Person {}

impl std::hash::Hash for Person {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
