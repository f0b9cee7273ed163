//! Top-N concept filtering

use std::collections::HashSet;

use tracing::debug;

use cmap_core::{ConceptTriple, RankedConcept};

/// Default number of top-ranked concepts kept in a map
pub const DEFAULT_TOP_N: usize = 15;

/// Keep triples whose two concepts both rank among the first `top_n`
/// phrases, in their original order
pub fn filter_triples(
    triples: &[ConceptTriple],
    ranked: &[RankedConcept],
    top_n: usize,
) -> Vec<ConceptTriple> {
    let allowed: HashSet<&str> = ranked
        .iter()
        .take(top_n)
        .map(|r| r.phrase.as_str())
        .collect();

    let kept: Vec<ConceptTriple> = triples
        .iter()
        .filter(|t| allowed.contains(t.concept1.as_str()) && allowed.contains(t.concept2.as_str()))
        .cloned()
        .collect();

    debug!(
        total = triples.len(),
        kept = kept.len(),
        top_n,
        "Filtered concept triples"
    );
    kept
}
