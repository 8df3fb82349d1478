//! Prefix to namespace bindings and their canonicalization.
//!
//! Parsers report the prefixes declared by each input file. Once several inputs
//! are merged, the same namespace often ends up under several prefixes
//! (`ex:` in one file, `ex1:` in another). [`NamespaceTable::canonicalize`]
//! replaces those inherited bindings by a caller supplied table of forced ones.

use crate::error::NamespaceError;
use oxiri::Iri;
use std::collections::BTreeMap;
use std::collections::btree_map;
use tracing::debug;

/// An ordered mapping from prefix names to namespace IRIs.
///
/// A namespace IRI is bound to at most one prefix.
/// Iteration is in prefix order, which keeps serialized outputs stable.
///
/// ```
/// use oxclosure::NamespaceTable;
///
/// let mut forced = NamespaceTable::new();
/// forced.bind("ex", "https://example.org/")?;
///
/// let mut inherited = NamespaceTable::new();
/// inherited.absorb("ex1", "https://example.org/");
/// inherited.absorb("foaf", "http://xmlns.com/foaf/0.1/");
///
/// let canonical = inherited.canonicalize(&forced);
/// assert_eq!(canonical.get("ex"), Some("https://example.org/"));
/// assert_eq!(canonical.get("ex1"), None);
/// assert_eq!(canonical.get("foaf"), Some("http://xmlns.com/foaf/0.1/"));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceTable {
    bindings: BTreeMap<String, String>,
}

impl NamespaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table of forced bindings.
    ///
    /// Fails if a prefix or a namespace is invalid or if two prefixes share a namespace.
    pub fn from_bindings<P: Into<String>, I: Into<String>>(
        bindings: impl IntoIterator<Item = (P, I)>,
    ) -> Result<Self, NamespaceError> {
        let mut table = Self::new();
        for (prefix, iri) in bindings {
            let (prefix, iri) = (prefix.into(), iri.into());
            validate(&prefix, &iri)?;
            if let Some(other) = table.prefix_for(&iri) {
                if other != prefix {
                    return Err(NamespaceError::ConflictingPrefixes {
                        first: other.to_owned(),
                        second: prefix,
                        iri,
                    });
                }
            }
            table.bindings.insert(prefix, iri);
        }
        Ok(table)
    }

    /// Binds `prefix` to `iri`, replacing any binding that uses the same prefix or the same namespace.
    pub fn bind(
        &mut self,
        prefix: impl Into<String>,
        iri: impl Into<String>,
    ) -> Result<(), NamespaceError> {
        let (prefix, iri) = (prefix.into(), iri.into());
        validate(&prefix, &iri)?;
        self.bindings.retain(|_, bound| *bound != iri);
        self.bindings.insert(prefix, iri);
        Ok(())
    }

    /// Adds all bindings of `other` with [`bind`](Self::bind) semantics: `other` wins on conflicts.
    pub fn overlay(&mut self, other: &Self) {
        for (prefix, iri) in other {
            self.bindings.retain(|_, bound| bound != iri);
            self.bindings.insert(prefix.to_owned(), iri.to_owned());
        }
    }

    /// Records a binding inherited from a parsed input.
    ///
    /// The first binding of a prefix wins.
    /// If the namespace is already bound, the lexicographically smallest prefix is kept.
    /// Returns `true` if the table changed.
    pub fn absorb(&mut self, prefix: impl Into<String>, iri: impl Into<String>) -> bool {
        let (prefix, iri) = (prefix.into(), iri.into());
        if self.bindings.contains_key(&prefix) {
            return false;
        }
        if let Some(existing) = self.prefix_for(&iri) {
            if existing < prefix.as_str() {
                return false;
            }
            let existing = existing.to_owned();
            self.bindings.remove(&existing);
        }
        self.bindings.insert(prefix, iri);
        true
    }

    /// Absorbs all the bindings of `other`, in prefix order.
    pub fn absorb_all(&mut self, other: &Self) {
        for (prefix, iri) in other {
            self.absorb(prefix, iri);
        }
    }

    /// Builds the canonical table: all `forced` bindings plus the bindings of `self`
    /// whose prefix and namespace both do not collide with a forced one.
    pub fn canonicalize(&self, forced: &Self) -> Self {
        let mut canonical = forced.clone();
        for (prefix, iri) in self {
            if let Some(forced_iri) = forced.get(prefix) {
                if forced_iri != iri {
                    debug!(prefix, iri, forced_iri, "dropping inherited prefix overridden by a forced one");
                }
                continue;
            }
            if let Some(forced_prefix) = forced.prefix_for(iri) {
                debug!(prefix, iri, forced_prefix, "dropping inherited alias of a forced namespace");
                continue;
            }
            canonical
                .bindings
                .insert(prefix.to_owned(), iri.to_owned());
        }
        canonical
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    /// The prefix bound to a namespace, if any.
    pub fn prefix_for(&self, iri: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find_map(|(prefix, bound)| (bound == iri).then_some(prefix.as_str()))
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.bindings.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<'a> IntoIterator for &'a NamespaceTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator on the bindings of a [`NamespaceTable`], in prefix order.
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(prefix, iri)| (prefix.as_str(), iri.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

fn validate(prefix: &str, iri: &str) -> Result<(), NamespaceError> {
    if !is_valid_prefix_name(prefix) {
        return Err(NamespaceError::InvalidPrefix(prefix.to_owned()));
    }
    Iri::parse(iri).map_err(|error| NamespaceError::InvalidIri {
        prefix: prefix.to_owned(),
        iri: iri.to_owned(),
        error,
    })?;
    Ok(())
}

/// Simplified Turtle `PN_PREFIX` check, the empty prefix is allowed.
fn is_valid_prefix_name(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    first.is_alphabetic()
        && !prefix.ends_with('.')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\u{B7}'))
}
