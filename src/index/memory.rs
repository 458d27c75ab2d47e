//! In-memory variant index.
//!
//! Thread-safe reference implementation of [`VariantIndex`], intended for
//! tests and embedded usage. Matching is token-based: the variant must
//! contain every query token (lowercased, alphanumeric runs), so
//! coincidental substring overlaps never match. Relevance order is
//! deterministic: exact token sequences first, then variants with the
//! least unmatched text, then text and person id as tie-breakers.

use std::collections::HashSet;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::index::traits::{IndexError, VariantIndex};
use crate::person::PersonId;
use crate::variant::NameVariant;

fn lock_err(context: &'static str) -> IndexError {
    IndexError::Backend(format!("poisoned lock: {context}"))
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Thread-safe in-memory variant index.
#[derive(Debug, Default)]
pub struct InMemoryVariantIndex {
    rows: RwLock<Vec<NameVariant>>,
}

impl InMemoryVariantIndex {
    /// Create a new empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed documents.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::Backend` if the index lock is poisoned.
    pub fn len(&self) -> Result<usize, IndexError> {
        Ok(self.rows.read().map_err(|_| lock_err("index.len"))?.len())
    }

    /// True when no documents are indexed.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::Backend` if the index lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, IndexError> {
        Ok(self.len()? == 0)
    }

    /// All distinct variant texts indexed for one person, sorted.
    ///
    /// Inspection helper for tests and rebuild verification; not part of
    /// the [`VariantIndex`] contract.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::Backend` if the index lock is poisoned.
    pub fn texts_for_person(&self, person: PersonId) -> Result<Vec<String>, IndexError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| lock_err("index.texts_for_person"))?;
        let mut texts: Vec<String> = rows
            .iter()
            .filter(|v| v.person == person)
            .map(|v| v.text.clone())
            .collect();
        texts.sort();
        texts.dedup();
        Ok(texts)
    }
}

impl VariantIndex for InMemoryVariantIndex {
    fn index(&self, variant: &NameVariant) -> Result<(), IndexError> {
        let mut rows = self.rows.write().map_err(|_| lock_err("index.index"))?;
        if !rows.contains(variant) {
            rows.push(variant.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), IndexError> {
        let mut rows = self.rows.write().map_err(|_| lock_err("index.clear"))?;
        rows.clear();
        Ok(())
    }

    fn query(&self, text: &str, as_of: NaiveDate) -> Result<Vec<NameVariant>, IndexError> {
        let query_tokens = tokenize(text);
        if query_tokens.is_empty() {
            return Ok(Vec::new());
        }
        let query_set: HashSet<&str> = query_tokens.iter().map(String::as_str).collect();

        let rows = self.rows.read().map_err(|_| lock_err("index.query"))?;

        let mut scored: Vec<(bool, usize, &NameVariant)> = Vec::new();
        for variant in rows.iter() {
            if !variant.window.contains(as_of) {
                continue;
            }
            let variant_tokens = tokenize(&variant.text);
            let variant_set: HashSet<&str> =
                variant_tokens.iter().map(String::as_str).collect();
            if !query_set.iter().all(|t| variant_set.contains(t)) {
                continue;
            }
            let exact = variant_tokens == query_tokens;
            scored.push((exact, variant_tokens.len(), variant));
        }

        scored.sort_by(|(ea, la, va), (eb, lb, vb)| {
            eb.cmp(ea)
                .then_with(|| la.cmp(lb))
                .then_with(|| va.text.cmp(&vb.text))
                .then_with(|| va.person.to_string().cmp(&vb.person.to_string()))
        });

        Ok(scored.into_iter().map(|(_, _, v)| v.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::time::ValidityWindow;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn variant(text: &str, person: PersonId) -> NameVariant {
        NameVariant::new(text, person, ValidityWindow::default_bracket()).unwrap()
    }

    fn windowed(text: &str, person: PersonId, from: NaiveDate, to: NaiveDate) -> NameVariant {
        NameVariant::new(text, person, ValidityWindow::new(from, to).unwrap()).unwrap()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("N Mandela (ANC)"), vec!["n", "mandela", "anc"]);
        assert_eq!(tokenize("  "), Vec::<String>::new());
    }

    #[test]
    fn test_index_and_query_exact() {
        let index = InMemoryVariantIndex::new();
        let person = PersonId::new();
        index.index(&variant("J Q Smith", person)).unwrap();

        let results = index.query("J Q Smith", d(2010, 11, 1)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].person, person);
    }

    #[test]
    fn test_query_requires_every_token() {
        let index = InMemoryVariantIndex::new();
        index.index(&variant("John Smith", PersonId::new())).unwrap();

        assert!(index.query("John Brown", d(2010, 11, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_query_is_token_equality_not_substring() {
        let index = InMemoryVariantIndex::new();
        index.index(&variant("Johnson Smythe", PersonId::new())).unwrap();

        // "John" is a substring of "Johnson" but not a token of it.
        assert!(index.query("John", d(2010, 11, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_query_matches_superset_variants() {
        let index = InMemoryVariantIndex::new();
        let longer = PersonId::new();
        index
            .index(&variant("John Quentin Smith", longer))
            .unwrap();

        let results = index.query("John Smith", d(2010, 11, 1)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].person, longer);
    }

    #[test]
    fn test_exact_match_ranks_first() {
        let index = InMemoryVariantIndex::new();
        let exact = PersonId::new();
        let longer = PersonId::new();
        index.index(&variant("John Quentin Smith", longer)).unwrap();
        index.index(&variant("John Smith", exact)).unwrap();

        let results = index.query("John Smith", d(2010, 11, 1)).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].person, exact);
        assert_eq!(results[1].person, longer);
    }

    #[test]
    fn test_query_is_case_insensitive_and_punctuation_blind() {
        let index = InMemoryVariantIndex::new();
        let person = PersonId::new();
        index.index(&variant("N Mandela (ANC)", person)).unwrap();

        let results = index.query("n mandela anc", d(2010, 11, 1)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].person, person);
    }

    #[test]
    fn test_date_containment_is_a_hard_filter() {
        let index = InMemoryVariantIndex::new();
        let person = PersonId::new();
        index
            .index(&windowed("J Q Smith", person, d(2004, 4, 14), d(2009, 4, 22)))
            .unwrap();

        assert_eq!(index.query("J Q Smith", d(2007, 1, 1)).unwrap().len(), 1);
        assert!(index.query("J Q Smith", d(2010, 11, 1)).unwrap().is_empty());
        assert!(index.query("J Q Smith", d(2003, 1, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let index = InMemoryVariantIndex::new();
        index.index(&variant("John Smith", PersonId::new())).unwrap();
        assert!(index.query("", d(2010, 11, 1)).unwrap().is_empty());
        assert!(index.query("()", d(2010, 11, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_identical_tuples_collapse() {
        let index = InMemoryVariantIndex::new();
        let person = PersonId::new();
        let row = variant("John Smith", person);
        index.index(&row).unwrap();
        index.index(&row).unwrap();
        assert_eq!(index.len().unwrap(), 1);
    }

    #[test]
    fn test_clear() {
        let index = InMemoryVariantIndex::new();
        index.index(&variant("John Smith", PersonId::new())).unwrap();
        assert!(!index.is_empty().unwrap());

        index.clear().unwrap();
        assert!(index.is_empty().unwrap());
        assert!(index.query("John Smith", d(2010, 11, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_texts_for_person() {
        let index = InMemoryVariantIndex::new();
        let mandela = PersonId::new();
        let other = PersonId::new();
        index.index(&variant("Nelson Mandela", mandela)).unwrap();
        index.index(&variant("N Mandela", mandela)).unwrap();
        index.index(&variant("John Smith", other)).unwrap();

        assert_eq!(
            index.texts_for_person(mandela).unwrap(),
            vec!["N Mandela", "Nelson Mandela"],
        );
    }

    #[test]
    fn test_deterministic_tie_break_order() {
        let index = InMemoryVariantIndex::new();
        let a = PersonId::new();
        let b = PersonId::new();
        index.index(&variant("John Smith", a)).unwrap();
        index.index(&variant("John Smith", b)).unwrap();

        let first = index.query("John Smith", d(2010, 11, 1)).unwrap();
        let second = index.query("John Smith", d(2010, 11, 1)).unwrap();
        let order = |rs: &[NameVariant]| rs.iter().map(|v| v.person).collect::<Vec<_>>();
        assert_eq!(order(&first), order(&second));
    }
}
