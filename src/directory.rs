//! Upstream person directory.
//!
//! The canonical person/organization/membership records live in an
//! external registry; this module defines the read-only contract the
//! rebuild and resolution paths consume, plus a thread-safe in-memory
//! implementation for tests and embedded usage.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::membership::Membership;
use crate::person::{Person, PersonId};

/// Errors that can occur while reading from the person directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Key already exists.
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// Backend error.
    #[error("Directory backend error: {0}")]
    Backend(String),
}

/// Read-only access to the canonical person registry.
///
/// Implementations wrap whatever persistence layer owns the records; this
/// crate never writes through this trait.
pub trait PersonDirectory: Send + Sync {
    /// Every person in the registry, in a stable order.
    fn persons(&self) -> Result<Vec<Person>, DirectoryError>;

    /// A person's memberships. Unknown persons yield an empty list.
    fn memberships(&self, person: PersonId) -> Result<Vec<Membership>, DirectoryError>;

    /// Look up one person by ID.
    fn get(&self, id: PersonId) -> Result<Option<Person>, DirectoryError>;
}

fn lock_err(context: &'static str) -> DirectoryError {
    DirectoryError::Backend(format!("poisoned lock: {context}"))
}

#[derive(Debug, Default)]
struct DirectoryState {
    order: Vec<PersonId>,
    by_id: HashMap<PersonId, Person>,
    memberships: HashMap<PersonId, Vec<Membership>>,
}

/// Thread-safe in-memory person directory.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    state: RwLock<DirectoryState>,
}

impl InMemoryDirectory {
    /// Create a new empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a person.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Duplicate` if the ID is already present.
    pub fn add_person(&self, person: Person) -> Result<(), DirectoryError> {
        let mut state = self.state.write().map_err(|_| lock_err("directory.add_person"))?;
        if state.by_id.contains_key(&person.id) {
            return Err(DirectoryError::Duplicate(person.id.to_string()));
        }
        state.order.push(person.id);
        state.by_id.insert(person.id, person);
        Ok(())
    }

    /// Add a membership, keyed by its person.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Backend` if the directory lock is
    /// poisoned.
    pub fn add_membership(&self, membership: Membership) -> Result<(), DirectoryError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("directory.add_membership"))?;
        state
            .memberships
            .entry(membership.person)
            .or_default()
            .push(membership);
        Ok(())
    }
}

impl PersonDirectory for InMemoryDirectory {
    fn persons(&self) -> Result<Vec<Person>, DirectoryError> {
        let state = self.state.read().map_err(|_| lock_err("directory.persons"))?;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.by_id.get(id).cloned())
            .collect())
    }

    fn memberships(&self, person: PersonId) -> Result<Vec<Membership>, DirectoryError> {
        let state = self
            .state
            .read()
            .map_err(|_| lock_err("directory.memberships"))?;
        Ok(state.memberships.get(&person).cloned().unwrap_or_default())
    }

    fn get(&self, id: PersonId) -> Result<Option<Person>, DirectoryError> {
        let state = self.state.read().map_err(|_| lock_err("directory.get"))?;
        Ok(state.by_id.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test: ensure the trait is object-safe
    fn _assert_person_directory_object_safe(_: &dyn PersonDirectory) {}

    #[test]
    fn test_add_and_get_person() {
        let directory = InMemoryDirectory::new();
        let person = Person::new("Nelson Mandela");
        let id = person.id;
        directory.add_person(person).unwrap();

        let fetched = directory.get(id).unwrap().unwrap();
        assert_eq!(fetched.name, "Nelson Mandela");
        assert!(directory.get(PersonId::new()).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_person_rejected() {
        let directory = InMemoryDirectory::new();
        let person = Person::new("Nelson Mandela");
        directory.add_person(person.clone()).unwrap();

        let result = directory.add_person(person);
        assert!(matches!(result, Err(DirectoryError::Duplicate(_))));
    }

    #[test]
    fn test_persons_preserves_insertion_order() {
        let directory = InMemoryDirectory::new();
        let a = Person::new("Aaa");
        let b = Person::new("Bbb");
        directory.add_person(a.clone()).unwrap();
        directory.add_person(b.clone()).unwrap();

        let names: Vec<String> = directory
            .persons()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Aaa", "Bbb"]);
    }

    #[test]
    fn test_memberships_for_unknown_person_is_empty() {
        let directory = InMemoryDirectory::new();
        assert!(directory.memberships(PersonId::new()).unwrap().is_empty());
    }

    #[test]
    fn test_memberships_keyed_by_person() {
        let directory = InMemoryDirectory::new();
        let person = Person::new("Nelson Mandela");
        let id = person.id;
        directory.add_person(person).unwrap();
        directory
            .add_membership(Membership::new(id).with_role("Member"))
            .unwrap();
        directory
            .add_membership(Membership::new(PersonId::new()).with_role("Whip"))
            .unwrap();

        let memberships = directory.memberships(id).unwrap();
        assert_eq!(memberships.len(), 1);
        assert_eq!(memberships[0].role.as_deref(), Some("Member"));
    }
}
