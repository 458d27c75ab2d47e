//! # Namecast - Temporal Name Resolution
//!
//! Namecast resolves free-text personal names, as they appear in
//! legislative records, vote lists, or news text, to canonical person
//! identities — given a point in time and optional party context. Exact
//! string matches are rare in such records: they use initials,
//! honorifics, abbreviated organization names, and role-prefixed labels.
//!
//! ## Core Concepts
//!
//! - **Person**: the stable identity that name variants point back to
//! - **NameVariant**: one plausible textual rendering of a person, valid
//!   over a date window
//! - **Generation**: the batch write path producing every variant from a
//!   person record and its memberships
//! - **Resolution**: a prioritized, short-circuiting search over the
//!   variant index with first-match-wins semantics
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use namecast::{InMemoryDirectory, InMemoryVariantIndex, Rebuilder, Resolver};
//!
//! let directory = Arc::new(InMemoryDirectory::new());
//! let index = Arc::new(InMemoryVariantIndex::new());
//!
//! // Populate the variant index from the person directory.
//! Rebuilder::new(directory.clone(), index.clone()).rebuild()?;
//!
//! // Resolve a recorded name as of a sitting date.
//! let resolver = Resolver::builder(directory, index)
//!     .as_of_str("2010-11-01")
//!     .build()?;
//! let person = resolver.resolve("J Q Smith", None)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Upstream data model
pub mod membership;
pub mod organization;
pub mod person;

// Core types
pub mod error;
pub mod time;
pub mod variant;

// Write path
pub mod generate;
pub mod rebuild;

// Read path
pub mod cache;
pub mod resolve;

// Adapters
pub mod directory;
pub mod index;

// Re-export primary types at crate root for convenience
pub use cache::{ResolutionCache, DEFAULT_CACHE_CAPACITY};
pub use directory::{DirectoryError, InMemoryDirectory, PersonDirectory};
pub use error::{NamecastError, NamecastResult, ValidationError};
pub use generate::{generate_variants, party_name_variants};
pub use index::{IndexError, InMemoryVariantIndex, VariantDocument, VariantIndex};
pub use membership::Membership;
pub use organization::{OrgId, Organization, PARTY_CLASSIFICATION};
pub use person::{Person, PersonId};
pub use rebuild::{RebuildStats, Rebuilder};
pub use resolve::{PersonFilter, Resolver, ResolverBuilder, DEFAULT_QUALIFIER_WORDS};
pub use time::{parse_partial_date, ValidityWindow};
pub use variant::NameVariant;
