//! Full index rebuild: the batch write path.
//!
//! A rebuild clears the variant collection and regenerates it from every
//! person in the upstream directory. The variant set is a derived cache,
//! not a source of truth — losing it is always recoverable by re-running
//! the rebuild.

use std::sync::Arc;

use tracing::{debug, info};

use crate::directory::PersonDirectory;
use crate::error::NamecastResult;
use crate::generate::generate_variants;
use crate::index::VariantIndex;

/// Counters reported by a completed rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildStats {
    /// Persons read from the directory.
    pub persons_seen: usize,

    /// Persons skipped for having an empty display name.
    pub persons_skipped: usize,

    /// Variant documents handed to the index (after per-person
    /// deduplication).
    pub variants_indexed: usize,
}

/// Drives full clear-then-regenerate rebuilds of the variant index.
///
/// Rebuilds are idempotent: re-running produces an index with identical
/// resolution behavior. They are **not** safe to run concurrently with
/// themselves — clear-then-repopulate is not atomic, and a reader racing
/// a rebuild can observe an empty or partial index. Callers must
/// serialize rebuilds (an external exclusive lock, or a blue/green index
/// swap).
pub struct Rebuilder {
    directory: Arc<dyn PersonDirectory>,
    index: Arc<dyn VariantIndex>,
}

impl Rebuilder {
    /// Creates a rebuilder over the given directory and index.
    #[must_use]
    pub fn new(directory: Arc<dyn PersonDirectory>, index: Arc<dyn VariantIndex>) -> Self {
        Self { directory, index }
    }

    /// Deletes every variant document without regenerating.
    ///
    /// # Errors
    ///
    /// Returns an index infrastructure error if the clear fails.
    pub fn clear(&self) -> NamecastResult<()> {
        self.index.clear()?;
        Ok(())
    }

    /// Clears the index and regenerates every person's variants.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error if the directory cannot be read
    /// or the index rejects an operation. Per-person data problems
    /// (empty names, unparsable membership dates) degrade silently and
    /// are reflected in the returned stats instead.
    pub fn rebuild(&self) -> NamecastResult<RebuildStats> {
        self.index.clear()?;

        let persons = self.directory.persons()?;
        let total = persons.len();
        let mut stats = RebuildStats::default();

        for person in &persons {
            stats.persons_seen += 1;

            if person.has_empty_name() {
                stats.persons_skipped += 1;
                continue;
            }

            let memberships = self.directory.memberships(person.id)?;
            let variants = generate_variants(person, &memberships);
            for variant in &variants {
                self.index.index(variant)?;
            }
            stats.variants_indexed += variants.len();

            debug!(
                done = stats.persons_seen,
                total,
                person = %person.id,
                variants = variants.len(),
                "indexed person"
            );
        }

        info!(
            persons = stats.persons_seen,
            skipped = stats.persons_skipped,
            variants = stats.variants_indexed,
            "variant index rebuilt"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::directory::InMemoryDirectory;
    use crate::index::InMemoryVariantIndex;
    use crate::membership::Membership;
    use crate::organization::Organization;
    use crate::person::Person;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn fixture() -> (Arc<InMemoryDirectory>, Arc<InMemoryVariantIndex>, Rebuilder) {
        let directory = Arc::new(InMemoryDirectory::new());
        let index = Arc::new(InMemoryVariantIndex::new());
        let rebuilder = Rebuilder::new(directory.clone(), index.clone());
        (directory, index, rebuilder)
    }

    #[test]
    fn test_rebuild_populates_index() {
        let (directory, index, rebuilder) = fixture();
        let mandela = Person::new("Nelson Mandela").with_given_name("Nelson");
        let mandela_id = mandela.id;
        directory.add_person(mandela).unwrap();
        let anc = Arc::new(Organization::new(
            "African National Congress (ANC)",
            "Party",
        ));
        directory
            .add_membership(Membership::new(mandela_id).with_organization(anc))
            .unwrap();

        let stats = rebuilder.rebuild().unwrap();
        assert_eq!(stats.persons_seen, 1);
        assert_eq!(stats.persons_skipped, 0);
        assert_eq!(stats.variants_indexed, 6);
        assert_eq!(index.len().unwrap(), 6);
    }

    #[test]
    fn test_rebuild_skips_empty_names() {
        let (directory, index, rebuilder) = fixture();
        directory.add_person(Person::new("")).unwrap();
        directory.add_person(Person::new("Pele")).unwrap();

        let stats = rebuilder.rebuild().unwrap();
        assert_eq!(stats.persons_seen, 2);
        assert_eq!(stats.persons_skipped, 1);
        // Pele has no initials pools: just the bare name.
        assert_eq!(index.len().unwrap(), 1);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let (directory, index, rebuilder) = fixture();
        directory
            .add_person(Person::new("John Quentin Smith"))
            .unwrap();

        let first = rebuilder.rebuild().unwrap();
        let len_after_first = index.len().unwrap();
        let first_query = index.query("J Q Smith", d(2010, 11, 1)).unwrap();

        let second = rebuilder.rebuild().unwrap();
        assert_eq!(first, second);
        assert_eq!(index.len().unwrap(), len_after_first);
        assert_eq!(
            index.query("J Q Smith", d(2010, 11, 1)).unwrap(),
            first_query,
        );
    }

    #[test]
    fn test_clear_without_regenerate() {
        let (directory, index, rebuilder) = fixture();
        directory.add_person(Person::new("Pele")).unwrap();
        rebuilder.rebuild().unwrap();
        assert!(!index.is_empty().unwrap());

        rebuilder.clear().unwrap();
        assert!(index.is_empty().unwrap());
    }
}
