//! CMAP Extractor - Concept relation extraction
//!
//! Finds verb phrases with a POS pattern, pairs the noun phrases around
//! them and emits (concept, relation, concept) triples. Ambiguous pairs are
//! settled with the dependency roles of each verb phrase's root token.
//!
//! Author: hephaex@gmail.com

use cmap_core::{ConceptTriple, Result};
use cmap_nlp::Doc;

pub mod relation;
pub mod verb_phrase;

pub use relation::{find_candidate_links, RelationExtractor};
pub use verb_phrase::{match_verb_phrases, PatternElement, Quantifier, TokenPattern};

/// Trait for extractors turning an annotated document into triples
pub trait TripleExtractor: Send + Sync {
    fn extract(&self, doc: &Doc) -> Result<Vec<ConceptTriple>>;
}
