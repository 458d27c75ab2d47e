//! Name resolution: the read path.
//!
//! A resolver maps a raw name string (plus optional party context) to the
//! person it denotes, as of a fixed date. The input is rewritten into an
//! ordered sequence of candidate strings, most specific first, and each
//! candidate is queried against the variant index in turn. The first
//! accepted match wins; later candidates are never queried. There is no
//! scoring and no fusion of signals — ordering *is* the disambiguation.

use std::sync::{Arc, OnceLock};

use chrono::NaiveDate;
use regex::Regex;
use tracing::warn;

use crate::cache::{ResolutionCache, DEFAULT_CACHE_CAPACITY};
use crate::directory::PersonDirectory;
use crate::error::{NamecastResult, ValidationError};
use crate::index::{IndexError, VariantIndex};
use crate::person::Person;

/// The default distinguishing qualifier word.
///
/// Search backends can weight date proximity over the presence of a word
/// like "Deputy", conflating a minister with their deputy. Results whose
/// variant text carries a qualifier word the candidate lacks are
/// discarded.
pub const DEFAULT_QUALIFIER_WORDS: &[&str] = &["Deputy"];

/// Honorific prefixes strippable during fallback matching.
fn honorific_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            "^(?:Adv|Chief|Dr|Miss|Mme|Mna|Mnr|Mnu|Moh|Moruti|Moulana|Mr|Mrs|Ms|Njing|Nkk|Nksz|Nom|P|Prince|Prof|Rev|Rre|Umntwana) ",
        )
        .expect("hard-coded pattern compiles")
    })
}

/// A name followed by a trailing parenthetical, e.g.
/// `"Tau (John Quentin Smith)"`.
fn paren_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([\w\s]+) \(([\w\s]+)\)").expect("hard-coded pattern compiles")
    })
}

/// Acceptance predicate applied to resolved persons.
///
/// Callers inject domain rules ("must currently hold a seat", "must have
/// a middle name") without the resolver knowing them. Rejected persons
/// are skipped and the search continues with the next-ranked match.
///
/// Implemented for any `Fn(&Person) -> bool`.
pub trait PersonFilter: Send + Sync {
    /// Returns true if the person is an acceptable resolution.
    fn accepts(&self, person: &Person) -> bool;
}

impl<F> PersonFilter for F
where
    F: Fn(&Person) -> bool + Send + Sync,
{
    fn accepts(&self, person: &Person) -> bool {
        self(person)
    }
}

/// Builder for [`Resolver`].
///
/// # Example
/// ```rust,ignore
/// let resolver = ResolverBuilder::new(directory, index)
///     .as_of_str("2010-11-01")
///     .build()?;
/// ```
pub struct ResolverBuilder {
    directory: Arc<dyn PersonDirectory>,
    index: Arc<dyn VariantIndex>,
    as_of: Option<NaiveDate>,
    as_of_raw: Option<String>,
    filter: Option<Box<dyn PersonFilter>>,
    cache_capacity: usize,
    qualifier_words: Vec<String>,
}

impl ResolverBuilder {
    /// Creates a builder over the given directory and index.
    #[must_use]
    pub fn new(directory: Arc<dyn PersonDirectory>, index: Arc<dyn VariantIndex>) -> Self {
        Self {
            directory,
            index,
            as_of: None,
            as_of_raw: None,
            filter: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            qualifier_words: DEFAULT_QUALIFIER_WORDS
                .iter()
                .map(|w| (*w).to_string())
                .collect(),
        }
    }

    /// Set the as-of date all resolutions are evaluated against.
    #[must_use]
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Set the as-of date from an ISO `YYYY-MM-DD` string.
    ///
    /// Parsing is deferred to [`build`](Self::build), which fails on an
    /// unparsable value.
    #[must_use]
    pub fn as_of_str(mut self, date: impl Into<String>) -> Self {
        self.as_of_raw = Some(date.into());
        self
    }

    /// Inject an acceptance predicate (default: accept everyone).
    #[must_use]
    pub fn filter(mut self, filter: impl PersonFilter + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Bound the resolution cache (default: 4096 entries; zero disables
    /// caching).
    #[must_use]
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Replace the distinguishing qualifier word list (default:
    /// `["Deputy"]`).
    #[must_use]
    pub fn qualifier_words(mut self, words: Vec<String>) -> Self {
        self.qualifier_words = words;
        self
    }

    /// Build the resolver.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingAsOfDate` when no as-of date was
    /// provided, or `ValidationError::InvalidAsOfDate` when the string
    /// form fails to parse.
    pub fn build(self) -> Result<Resolver, ValidationError> {
        let as_of = match (self.as_of, self.as_of_raw) {
            (Some(date), _) => date,
            (None, Some(raw)) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map_err(|_| ValidationError::InvalidAsOfDate { value: raw })?,
            (None, None) => return Err(ValidationError::MissingAsOfDate),
        };

        Ok(Resolver {
            directory: self.directory,
            index: self.index,
            as_of,
            filter: self.filter,
            cache: ResolutionCache::with_capacity(self.cache_capacity),
            qualifier_words: self.qualifier_words,
        })
    }
}

/// Resolves raw name strings to persons as of a fixed date.
///
/// One resolver instance may be shared across threads: it only reads
/// from the index and directory, and its cache is internally
/// synchronized.
pub struct Resolver {
    directory: Arc<dyn PersonDirectory>,
    index: Arc<dyn VariantIndex>,
    as_of: NaiveDate,
    filter: Option<Box<dyn PersonFilter>>,
    cache: ResolutionCache,
    qualifier_words: Vec<String>,
}

impl Resolver {
    /// Starts building a resolver.
    #[must_use]
    pub fn builder(
        directory: Arc<dyn PersonDirectory>,
        index: Arc<dyn VariantIndex>,
    ) -> ResolverBuilder {
        ResolverBuilder::new(directory, index)
    }

    /// The date resolutions are evaluated against.
    #[must_use]
    pub const fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Resolves a name, with an optional party-name hint.
    ///
    /// Returns `Ok(None)` when no candidate rewrite produces an accepted
    /// match — a normal outcome, not an error. Index and directory
    /// failures surface as retryable errors, except query timeouts,
    /// which degrade that one candidate to zero results.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error when the index backend or the
    /// person directory fails.
    pub fn resolve(
        &self,
        name: &str,
        party_hint: Option<&str>,
    ) -> NamecastResult<Option<Person>> {
        if let Some(person) = self.cache.get(name, party_hint) {
            return Ok(Some(person));
        }

        // First candidate with any accepted match wins; the rest are
        // never queried.
        for candidate in candidates(name, party_hint) {
            if let Some(person) = self.try_candidate(&candidate)? {
                self.cache.insert(name, party_hint, person.clone());
                return Ok(Some(person));
            }
        }
        Ok(None)
    }

    fn try_candidate(&self, candidate: &str) -> NamecastResult<Option<Person>> {
        let results = match self.index.query(candidate, self.as_of) {
            Ok(results) => results,
            Err(IndexError::Timeout { duration_ms }) => {
                // A slow backend costs this candidate its precision, not
                // the whole resolution.
                warn!(candidate, duration_ms, "index query timed out; no results for candidate");
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };

        for variant in results {
            if self.vetoed_by_qualifier(candidate, &variant.text) {
                continue;
            }

            let Some(person) = self.directory.get(variant.person)? else {
                warn!(person = %variant.person, text = %variant.text,
                    "indexed variant references unknown person");
                continue;
            };

            if self.filter.as_ref().map_or(true, |f| f.accepts(&person)) {
                return Ok(Some(person));
            }
        }
        Ok(None)
    }

    /// True when the variant text carries a qualifier word the candidate
    /// lacks — e.g. a "Deputy Minister" variant matching a plain
    /// "Minister" query.
    fn vetoed_by_qualifier(&self, candidate: &str, variant_text: &str) -> bool {
        self.qualifier_words
            .iter()
            .any(|word| !candidate.contains(word.as_str()) && variant_text.contains(word.as_str()))
    }
}

/// The ordered candidate rewrites for an input name.
///
/// A parenthetical qualifier is tried before the bare name: it carries
/// less text but more disambiguating intent. Honorific stripping is
/// lossy, so it comes last.
fn candidates(name: &str, party_hint: Option<&str>) -> Vec<String> {
    let (name_sans_paren, paren) = split_trailing_paren(name);

    let mut out = Vec::new();
    if let Some(paren) = paren {
        out.push(paren);
    }
    if let Some(hint) = party_hint {
        out.push(format!("{name} {hint}"));
    }
    out.push(name.to_string());
    if let Some(sans) = &name_sans_paren {
        out.push(sans.clone());
    }
    if let Some(stripped) = strip_honorific(name) {
        out.push(stripped);
    }
    if let Some(stripped) = name_sans_paren.as_deref().and_then(strip_honorific) {
        out.push(stripped);
    }
    out
}

/// Splits `"X (A B C)"` into `(Some("X"), Some("A B C"))` when the
/// parenthetical holds at least three whitespace-separated words;
/// otherwise both are absent.
fn split_trailing_paren(name: &str) -> (Option<String>, Option<String>) {
    let Some(caps) = paren_pattern().captures(name) else {
        return (None, None);
    };
    let paren = &caps[2];
    if paren.split_whitespace().count() >= 3 {
        (Some(caps[1].to_string()), Some(paren.to_string()))
    } else {
        (None, None)
    }
}

/// Strips a leading honorific followed by a space. `None` when nothing
/// was stripped.
fn strip_honorific(name: &str) -> Option<String> {
    let m = honorific_pattern().find(name)?;
    Some(name[m.end()..].to_string())
}
