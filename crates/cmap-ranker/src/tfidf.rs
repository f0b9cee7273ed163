//! TF-IDF term weighting
//!
//! Tokens are runs of two or more word characters, lower-cased. Term
//! frequencies are raw counts, inverse document frequency is smoothed as
//! `ln((1 + n) / (1 + df)) + 1`, and every document row is scaled to unit
//! L2 norm. A term's salience is the sum of its column.

use std::collections::BTreeMap;

use ndarray::Array1;
use once_cell::sync::Lazy;
use regex::Regex;

use cmap_core::TokenScores;

static TERM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("term pattern is valid"));

/// Sparse TF-IDF matrix: sorted vocabulary plus (column, weight) rows
#[derive(Debug, Clone, Default)]
pub struct TfidfMatrix {
    pub vocabulary: Vec<String>,
    pub rows: Vec<Vec<(usize, f64)>>,
}

impl TfidfMatrix {
    /// Column sums keyed by term
    pub fn column_sums(&self) -> TokenScores {
        let mut sums = Array1::<f64>::zeros(self.vocabulary.len());
        for row in &self.rows {
            for &(column, weight) in row {
                sums[column] += weight;
            }
        }
        self.vocabulary
            .iter()
            .cloned()
            .zip(sums.iter().copied())
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer;

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self
    }

    pub fn terms(document: &str) -> Vec<String> {
        let lower = document.to_lowercase();
        TERM_RE
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Learn the vocabulary and idf of `documents` and weight them
    pub fn fit_transform(&self, documents: &[String]) -> TfidfMatrix {
        let counts: Vec<BTreeMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut counts = BTreeMap::new();
                for term in Self::terms(doc) {
                    *counts.entry(term).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &counts {
            for term in doc.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let vocabulary: Vec<String> = document_frequency.keys().map(|t| t.to_string()).collect();
        let column: BTreeMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let n = documents.len() as f64;
        let idf: Array1<f64> = vocabulary
            .iter()
            .map(|t| {
                let df = document_frequency[t.as_str()] as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = counts
            .iter()
            .map(|doc| {
                let mut row: Vec<(usize, f64)> = doc
                    .iter()
                    .map(|(term, &count)| {
                        let c = column[term.as_str()];
                        (c, count as f64 * idf[c])
                    })
                    .collect();
                let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|(_, w)| *w /= norm);
                }
                row
            })
            .collect();

        TfidfMatrix { vocabulary, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_terms_skip_single_characters() {
        assert_eq!(TfidfVectorizer::terms("A cat, b dog's"), vec!["cat", "dog"]);
    }

    #[test]
    fn test_column_sums() {
        let matrix = TfidfVectorizer::new().fit_transform(&docs(&["cat dog", "cat"]));
        assert_eq!(matrix.vocabulary, vec!["cat", "dog"]);

        let scores = matrix.column_sums();
        assert!((scores["cat"] - 1.579_738_671_537_665_8).abs() < 1e-9);
        assert!((scores["dog"] - 0.814_802_474_667_168_9).abs() < 1e-9);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let matrix = TfidfVectorizer::new().fit_transform(&docs(&[
            "ontology matching",
            "matching solution matching",
            "lexical information",
        ]));
        for row in &matrix.rows {
            let norm: f64 = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_documents() {
        let matrix = TfidfVectorizer::new().fit_transform(&[]);
        assert!(matrix.column_sums().is_empty());

        let matrix = TfidfVectorizer::new().fit_transform(&docs(&["a b", "x"]));
        assert!(matrix.vocabulary.is_empty());
        assert!(matrix.column_sums().is_empty());
    }
}
