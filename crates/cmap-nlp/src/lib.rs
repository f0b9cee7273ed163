//! CMAP NLP - Linguistic annotation and coreference resolution
//!
//! Turns raw text into an annotated [`Doc`]: sentences, tokens with
//! Universal POS tags and lemmas, noun-phrase chunks and a dependency tree
//! per sentence. Everything downstream sees only the [`Doc`] object model,
//! so the annotator is swappable behind [`LanguageModel`].
//!
//! Author: hephaex@gmail.com

use cmap_core::Result;

pub mod chunker;
pub mod coref;
pub mod doc;
pub mod lemma;
pub mod lexicon;
pub mod model;
pub mod parser;
pub mod tagger;
pub mod tokenizer;

pub use coref::CoreferenceResolver;
pub use doc::{DepRel, Doc, PosTag, Sentence, Token};
pub use lemma::{noun_lemma, verb_lemma};
pub use model::RuleBasedModel;

/// Trait for language models producing annotated documents
///
/// Built once and shared read-only across requests.
pub trait LanguageModel: Send + Sync {
    fn annotate(&self, text: &str) -> Result<Doc>;
}
