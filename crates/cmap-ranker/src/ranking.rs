//! Concept ranking
//!
//! Token salience comes from a supporting document: its noun phrases are
//! cleaned, reduced to lemmatized content words and weighted with TF-IDF,
//! each phrase counting as one document. A concept phrase then scores as its
//! best token.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use cmap_core::{RankedConcept, Result, TokenScores};
use cmap_nlp::{noun_lemma, LanguageModel};

use crate::pdf::read_pdf_text;
use crate::stopwords::is_stopword;
use crate::tfidf::TfidfVectorizer;

static DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

// ============================================================================
// Phrase preprocessing
// ============================================================================

/// Strip newlines, digits and ASCII punctuation; drop phrases left with a
/// single character or less
pub fn clean_noun_phrases<S: AsRef<str>>(phrases: &[S]) -> Vec<String> {
    phrases
        .iter()
        .filter_map(|phrase| {
            let no_newlines = phrase.as_ref().replace('\n', "");
            let no_digits = DIGITS_RE.replace_all(&no_newlines, "");
            let cleaned: String = no_digits
                .chars()
                .filter(|c| !c.is_ascii_punctuation())
                .collect();
            (cleaned.chars().count() > 1).then_some(cleaned)
        })
        .collect()
}

fn content_lemmas(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| !is_stopword(word))
        .map(|word| noun_lemma(&word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop stopwords and lemmatize every remaining word as a noun; phrases with
/// nothing left are skipped
pub fn preprocess_noun_phrases<S: AsRef<str>>(phrases: &[S]) -> Vec<String> {
    phrases
        .iter()
        .map(|p| content_lemmas(p.as_ref()))
        .filter(|p| !p.is_empty())
        .collect()
}

// ============================================================================
// Scoring
// ============================================================================

/// Best token score of a phrase; 0 when none of its tokens is known
pub fn concept_score(phrase: &str, token_scores: &TokenScores) -> f64 {
    TfidfVectorizer::terms(&content_lemmas(phrase))
        .iter()
        .map(|term| token_scores.get(term).copied().unwrap_or(0.0))
        .fold(0.0, f64::max)
}

/// Score distinct phrases (first occurrence wins) and sort by descending
/// score; equal scores keep their first-occurrence order
pub fn score_phrases<S: AsRef<str>>(
    phrases: &[S],
    token_scores: &TokenScores,
) -> Vec<RankedConcept> {
    let mut seen = HashSet::new();
    let mut ranked: Vec<RankedConcept> = phrases
        .iter()
        .map(|p| p.as_ref().to_lowercase())
        .filter(|p| seen.insert(p.clone()))
        .map(|p| {
            let score = concept_score(&p, token_scores);
            RankedConcept::new(p, score)
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

// ============================================================================
// Ranker
// ============================================================================

/// Ranks concept phrases with a shared language model
#[derive(Clone)]
pub struct ConceptRanker {
    model: Arc<dyn LanguageModel>,
}

impl ConceptRanker {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Lower-cased noun phrases of `text` in document order
    pub fn noun_phrases(&self, text: &str) -> Result<Vec<String>> {
        let doc = self.model.annotate(text)?;
        Ok(doc.noun_phrases().map(|np| np.text().to_string()).collect())
    }

    /// TF-IDF salience of every content lemma in `text`
    pub fn rank_tokens(&self, text: &str) -> Result<TokenScores> {
        let phrases = self.noun_phrases(text)?;
        let documents = preprocess_noun_phrases(&clean_noun_phrases(&phrases));
        let scores = TfidfVectorizer::new().fit_transform(&documents).column_sums();

        debug!(
            phrases = phrases.len(),
            documents = documents.len(),
            vocabulary = scores.len(),
            "Ranked document tokens"
        );
        Ok(scores)
    }

    /// Distinct noun phrases of `text` ranked against `token_scores`
    pub fn rank_concepts(
        &self,
        text: &str,
        token_scores: &TokenScores,
    ) -> Result<Vec<RankedConcept>> {
        let phrases = self.noun_phrases(text)?;
        Ok(score_phrases(&phrases, token_scores))
    }

    /// Rank a document's own noun phrases against its own token scores
    pub fn rank_document(&self, path: impl AsRef<Path>) -> Result<Vec<RankedConcept>> {
        let path = path.as_ref();
        let text = read_pdf_text(path)?;
        let token_scores = self.rank_tokens(&text)?;
        let ranked = self.rank_concepts(&text, &token_scores)?;

        info!(path = %path.display(), concepts = ranked.len(), "Ranked document concepts");
        Ok(ranked)
    }
}

impl std::fmt::Debug for ConceptRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConceptRanker").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmap_nlp::RuleBasedModel;
    use proptest::prelude::*;

    fn ranker() -> ConceptRanker {
        ConceptRanker::new(Arc::new(RuleBasedModel::new()))
    }

    fn scores(items: &[(&str, f64)]) -> TokenScores {
        items.iter().map(|(t, s)| (t.to_string(), *s)).collect()
    }

    #[test]
    fn test_clean_noun_phrases() {
        let cleaned =
            clean_noun_phrases(&["the 3 cats", "a\nmodel", "(x)", "42", "well-known data"]);
        assert_eq!(cleaned, vec!["the  cats", "amodel", "wellknown data"]);
    }

    #[test]
    fn test_preprocess_noun_phrases() {
        let processed = preprocess_noun_phrases(&["the cats", "these", "an ontology of mice"]);
        assert_eq!(processed, vec!["cat", "ontology mouse"]);
    }

    #[test]
    fn test_concept_score_takes_best_token() {
        let token_scores = scores(&[("ontology", 0.5), ("matching", 1.25)]);
        assert_eq!(concept_score("the ontology matching", &token_scores), 1.25);
        assert_eq!(concept_score("the unknown", &token_scores), 0.0);
        assert_eq!(concept_score("it", &token_scores), 0.0);
    }

    #[test]
    fn test_score_phrases_dedup_and_order() {
        let token_scores = scores(&[("cat", 2.0), ("mouse", 1.0), ("cheese", 1.0)]);
        let ranked = score_phrases(
            &["The mouse", "the cat", "the cheese", "the mouse", "a dog"],
            &token_scores,
        );
        let phrases: Vec<&str> = ranked.iter().map(|r| r.phrase.as_str()).collect();
        assert_eq!(phrases, vec!["the cat", "the mouse", "the cheese", "a dog"]);
        assert_eq!(ranked[3].score, 0.0);
    }

    #[test]
    fn test_rank_tokens() {
        let token_scores = ranker()
            .rank_tokens("The cat chased the mouse. The cat ate the cheese.")
            .unwrap();

        assert_eq!(token_scores.len(), 3);
        assert!((token_scores["cat"] - 2.0).abs() < 1e-9);
        assert!((token_scores["mouse"] - 1.0).abs() < 1e-9);
        assert!((token_scores["cheese"] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_tokens_empty_text() {
        assert!(ranker().rank_tokens("").unwrap().is_empty());
    }

    #[test]
    fn test_rank_concepts() {
        let ranker = ranker();
        let text = "The cat chased the mouse. The cat ate the cheese.";
        let token_scores = ranker.rank_tokens(text).unwrap();
        let ranked = ranker.rank_concepts(text, &token_scores).unwrap();

        let phrases: Vec<&str> = ranked.iter().map(|r| r.phrase.as_str()).collect();
        assert_eq!(phrases, vec!["the cat", "the mouse", "the cheese"]);
        assert!((ranked[0].score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_document_missing_file() {
        assert!(ranker().rank_document("/nonexistent/paper.pdf").is_err());
    }

    proptest! {
        #[test]
        fn test_scores_non_increasing(
            phrases in prop::collection::vec("[a-e]{2,4}( [a-e]{2,4})?", 0..12),
            weights in prop::collection::vec(0.0f64..5.0, 5),
        ) {
            let token_scores: TokenScores = phrases
                .iter()
                .flat_map(|p| p.split_whitespace())
                .enumerate()
                .map(|(i, t)| (t.to_string(), weights[i % weights.len()]))
                .collect();

            let ranked = score_phrases(&phrases, &token_scores);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }

            let distinct: HashSet<&String> = phrases.iter().collect();
            prop_assert_eq!(ranked.len(), distinct.len());
        }
    }
}
