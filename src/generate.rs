//! Variant generation: the write path.
//!
//! Given one person record plus its memberships, produce every plausible
//! textual rendering of that person, each tagged with the date window over
//! which it is valid. The generator and the resolver are two halves of one
//! contract: whatever is produced here, resolution must be able to find in
//! priority order.

use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::membership::Membership;
use crate::person::Person;
use crate::time::ValidityWindow;
use crate::variant::NameVariant;

/// Parenthetical-abbreviation suffix on organization names,
/// e.g. `"Economic Freedom Fighters (EFF)"`.
fn party_suffix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(.*?)\s*\((.*)\)$").expect("hard-coded pattern compiles")
    })
}

/// Plausible ways of referring to an organization, from its full name.
///
/// Party names often carry a standard abbreviation in brackets. In that
/// case both the long form and the abbreviation are returned; otherwise
/// the name is returned as-is.
///
/// # Examples
///
/// ```
/// use namecast::party_name_variants;
///
/// assert_eq!(
///     party_name_variants("Economic Freedom Fighters (EFF)"),
///     vec!["Economic Freedom Fighters", "EFF"],
/// );
/// assert_eq!(
///     party_name_variants("Conservative Party"),
///     vec!["Conservative Party"],
/// );
/// ```
#[must_use]
pub fn party_name_variants(full_name: &str) -> Vec<String> {
    match party_suffix_pattern().captures(full_name) {
        Some(caps) => vec![caps[1].to_string(), caps[2].to_string()],
        None => vec![full_name.to_string()],
    }
}

/// Generates the complete variant set for one person.
///
/// Produces the base-name variants (full name and initials renderings,
/// with and without the honorific, all on the default window) plus the
/// organization-affiliated variants derived from each membership. The
/// result is deduplicated on the full `(text, person, window)` tuple.
///
/// A person with an empty display name yields no variants and no error.
#[must_use]
pub fn generate_variants(person: &Person, memberships: &[Membership]) -> Vec<NameVariant> {
    if person.has_empty_name() {
        debug!(person = %person.id, "skipping person with empty display name");
        return Vec::new();
    }

    let base_names = base_names(person);

    let mut variants = VariantSet::default();
    for base in &base_names {
        variants.push(person, base, ValidityWindow::default_bracket());
    }

    for membership in memberships {
        let Some(org) = membership.organization.as_deref() else {
            continue;
        };

        let window = match membership.window() {
            Ok(window) => window,
            Err(err) => {
                warn!(person = %person.id, organization = %org.name, %err,
                    "skipping membership with inverted validity window");
                continue;
            }
        };

        if org.is_party() {
            for base in &base_names {
                for org_name in org.all_names() {
                    for party_variant in party_name_variants(org_name) {
                        variants.push(person, &format!("{base} ({party_variant})"), window);
                    }
                }
            }
        }

        // Role-prefixed labels like "Minister of Finance National Assembly".
        // Plain party members and numbered candidate-list entries carry no
        // information beyond the party variants above.
        if !(membership.is_plain_party_member() || membership.is_candidate_list()) {
            for value in [membership.role_text(), membership.label_text()]
                .into_iter()
                .flatten()
            {
                variants.push(person, &format!("{value} {}", org.name), window);
            }
        }
    }

    variants.into_vec()
}

/// The person's base names: every honorific × (full name + each initials
/// rendering combined with the family name), exact-string deduplicated.
fn base_names(person: &Person) -> BTreeSet<String> {
    let name = person.name.trim();
    let family = family_name(person);
    let initials = possible_initials(person);

    let honorific = person
        .honorific_prefix
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty());
    let honorifics: Vec<&str> = match honorific {
        Some(h) => vec![h, ""],
        None => vec![""],
    };

    let mut names = BTreeSet::new();
    for &h in &honorifics {
        names.insert(concat_name(&[h, name]));
        for ini in &initials {
            names.insert(concat_name(&[h, ini.as_str(), family.as_str()]));
        }
    }
    names
}

/// Initials renderings from two candidate pools: the given-name tokens
/// and the full-name tokens minus the presumed family name. Each pool
/// yields spaced initials, run-together initials, the first initial
/// alone, and the second initial alone when the pool has two or more
/// tokens (records sometimes carry only the second initial).
fn possible_initials(person: &Person) -> BTreeSet<String> {
    let given: Vec<&str> = person
        .given_name
        .as_deref()
        .unwrap_or("")
        .split_whitespace()
        .collect();
    let full: Vec<&str> = person.name.split_whitespace().collect();
    let leading: &[&str] = if full.is_empty() {
        &[]
    } else {
        &full[..full.len() - 1]
    };

    let mut result = BTreeSet::new();
    for tokens in [given.as_slice(), leading] {
        if tokens.is_empty() {
            continue;
        }
        let initials: Vec<String> = tokens
            .iter()
            .filter_map(|t| t.chars().next())
            .map(String::from)
            .collect();

        result.insert(initials.join(" "));
        result.insert(initials.concat());
        if let Some(first) = initials.first() {
            result.insert(first.clone());
        }
        if initials.len() >= 2 {
            result.insert(initials[1].clone());
        }
    }
    result
}

/// Family name resolution, in priority order: the explicit family-name
/// field, the full name with its given-name prefix stripped, the last
/// whitespace-delimited token of the full name.
fn family_name(person: &Person) -> String {
    if let Some(family) = person.family_name.as_deref().filter(|f| !f.is_empty()) {
        return family.to_string();
    }

    if let Some(given) = person.given_name.as_deref().filter(|g| !g.is_empty()) {
        if let Some(rest) = person.name.strip_prefix(given) {
            return rest.trim().to_string();
        }
    }

    person
        .name
        .split_whitespace()
        .last()
        .unwrap_or("")
        .to_string()
}

fn concat_name(parts: &[&str]) -> String {
    parts
        .iter()
        .copied()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Insertion-ordered variant collection with get-or-create semantics on
/// the full `(text, person, window)` tuple.
#[derive(Default)]
struct VariantSet {
    seen: HashSet<NameVariant>,
    out: Vec<NameVariant>,
}

impl VariantSet {
    fn push(&mut self, person: &Person, text: &str, window: ValidityWindow) {
        match NameVariant::new(text, person.id, window) {
            Ok(variant) => {
                if self.seen.insert(variant.clone()) {
                    self.out.push(variant);
                }
            }
            Err(err) => {
                debug!(person = %person.id, %err, "dropping unusable variant text");
            }
        }
    }

    fn into_vec(self) -> Vec<NameVariant> {
        self.out
    }
}
