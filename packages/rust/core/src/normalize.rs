//! Keyword canonicalization and run-scoped deduplication.

use std::collections::HashSet;

use goldkey_shared::{Candidate, Origin, Source};

/// Keywords are shortened to their first three whitespace-delimited tokens.
pub const MAX_TOKENS: usize = 3;

/// Display form: the first [`MAX_TOKENS`] tokens joined by single spaces.
pub fn truncate_tokens(text: &str) -> String {
    text.split_whitespace()
        .take(MAX_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Identity key: the first [`MAX_TOKENS`] tokens with all whitespace removed.
pub fn canonicalize(text: &str) -> String {
    text.split_whitespace().take(MAX_TOKENS).collect()
}

/// Build a candidate from raw text. Blank text yields `None`.
pub fn normalize(text: &str, source: Source, origin: Origin) -> Option<Candidate> {
    let canonical = canonicalize(text);
    if canonical.is_empty() {
        return None;
    }
    Some(Candidate {
        text: truncate_tokens(text),
        canonical,
        source,
        origin,
    })
}

/// Canonical forms already admitted during the current run.
#[derive(Debug, Default)]
pub struct SeenSet {
    seen: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `canonical`. Returns `false` if it was already present.
    pub fn insert(&mut self, canonical: &str) -> bool {
        if self.seen.contains(canonical) {
            return false;
        }
        self.seen.insert(canonical.to_string())
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.seen.contains(canonical)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Keep candidates whose canonical form is new to `seen`, in input order.
///
/// First occurrence wins; later duplicates are dropped even when they come
/// from a different source.
pub fn dedup<I>(candidates: I, seen: &mut SeenSet) -> Vec<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    candidates
        .into_iter()
        .filter(|c| seen.insert(&c.canonical))
        .collect()
}
