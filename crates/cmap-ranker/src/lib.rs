//! CMAP Ranker - Concept salience ranking
//!
//! Scores candidate concept phrases against a supporting document:
//! - PDF text extraction
//! - Noun-phrase cleaning, stopword removal and lemmatization
//! - TF-IDF token scores with each phrase as one document
//! - Top-N filtering of concept triples
//!
//! Author: hephaex@gmail.com

pub mod filter;
pub mod pdf;
pub mod ranking;
pub mod stopwords;
pub mod tfidf;

pub use filter::{filter_triples, DEFAULT_TOP_N};
pub use pdf::read_pdf_text;
pub use ranking::{
    clean_noun_phrases, concept_score, preprocess_noun_phrases, score_phrases, ConceptRanker,
};
pub use stopwords::is_stopword;
pub use tfidf::TfidfVectorizer;
