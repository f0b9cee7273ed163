//! Relation extraction
//!
//! Extracts (concept, relation, concept) triples from an annotated document.
//! Every ordered noun-phrase pair of a sentence with at least one verb
//! phrase between them is a candidate link. A link with a single verb phrase
//! becomes a triple directly; with several, only verb phrases whose root
//! token governs both concepts (a subject anchored in the first concept and
//! an object anchored in the second) produce triples.

use tracing::debug;

use cmap_core::{CandidateLink, ConceptTriple, Result, VerbPhrase};
use cmap_nlp::{DepRel, Doc, Token};

use crate::verb_phrase::match_verb_phrases;
use crate::TripleExtractor;

// ============================================================================
// Candidate Links
// ============================================================================

/// Noun-phrase pairs of each sentence with the verb phrases between them
///
/// `verb_phrases` holds the accepted verb phrases per sentence, aligned with
/// `doc.sentences()`. Pairs with no verb phrase in between are skipped.
pub fn find_candidate_links(doc: &Doc, verb_phrases: &[Vec<VerbPhrase>]) -> Vec<CandidateLink> {
    let mut links = Vec::new();

    for (sentence, phrases) in doc.sentences().iter().zip(verb_phrases) {
        let nouns = &sentence.noun_phrases;
        for (i, subject) in nouns.iter().enumerate() {
            for object in &nouns[i + 1..] {
                let between: Vec<VerbPhrase> = phrases
                    .iter()
                    .filter(|vp| vp.span.lies_between(&subject.span, &object.span))
                    .cloned()
                    .collect();
                if between.is_empty() {
                    continue;
                }
                links.push(CandidateLink {
                    subject: subject.clone(),
                    object: object.clone(),
                    verb_phrases: between,
                });
            }
        }
    }

    links
}

// ============================================================================
// Role Anchors
// ============================================================================

fn occurs_in(token: &Token, concept: &str) -> bool {
    concept.contains(token.lower.as_str())
}

/// A subject-class child of `root` whose text occurs in `concept`
fn has_subject_anchor(doc: &Doc, root: &Token, concept: &str) -> bool {
    doc.children(root.index)
        .any(|child| child.dep.is_subject() && occurs_in(child, concept))
}

/// An object-class child of `root`, or the object of one of its
/// prepositions, whose text occurs in `concept`
fn has_object_anchor(doc: &Doc, root: &Token, concept: &str) -> bool {
    doc.children(root.index).any(|child| {
        if child.dep.is_object() && occurs_in(child, concept) {
            return true;
        }
        child.dep == DepRel::Prep
            && doc
                .children(child.index)
                .any(|grandchild| grandchild.dep == DepRel::Pobj && occurs_in(grandchild, concept))
    })
}

// ============================================================================
// Extractor
// ============================================================================

/// Dependency-guided relation extractor
#[derive(Debug, Clone, Default)]
pub struct RelationExtractor;

impl RelationExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Triples for one candidate link, in verb-phrase order
    pub fn resolve_link(&self, doc: &Doc, link: &CandidateLink) -> Vec<ConceptTriple> {
        let concept1 = link.subject.text();
        let concept2 = link.object.text();

        if link.is_unambiguous() {
            return vec![ConceptTriple::new(concept1, link.verb_phrases[0].text(), concept2)];
        }

        link.verb_phrases
            .iter()
            .filter(|vp| {
                doc.span_root(vp.span.start, vp.span.end)
                    .map(|root| {
                        has_subject_anchor(doc, root, concept1)
                            && has_object_anchor(doc, root, concept2)
                    })
                    .unwrap_or(false)
            })
            .map(|vp| ConceptTriple::new(concept1, vp.text(), concept2))
            .collect()
    }

    /// All triples of a document, in sentence and pair order
    pub fn extract_triples(&self, doc: &Doc) -> Vec<ConceptTriple> {
        let verb_phrases = match_verb_phrases(doc);
        let links = find_candidate_links(doc, &verb_phrases);

        let triples: Vec<ConceptTriple> = links
            .iter()
            .flat_map(|link| self.resolve_link(doc, link))
            .collect();

        debug!(
            candidate_links = links.len(),
            triples = triples.len(),
            "Extracted relations"
        );
        triples
    }
}

impl TripleExtractor for RelationExtractor {
    fn extract(&self, doc: &Doc) -> Result<Vec<ConceptTriple>> {
        Ok(self.extract_triples(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmap_nlp::{LanguageModel, RuleBasedModel};

    fn annotate(text: &str) -> Doc {
        RuleBasedModel::new().annotate(text).unwrap()
    }

    fn triples(text: &str) -> Vec<(String, String, String)> {
        RelationExtractor::new()
            .extract(&annotate(text))
            .unwrap()
            .into_iter()
            .map(|t| (t.concept1, t.relation, t.concept2))
            .collect()
    }

    fn triple(c1: &str, r: &str, c2: &str) -> (String, String, String) {
        (c1.to_string(), r.to_string(), c2.to_string())
    }

    #[test]
    fn test_single_verb_phrase() {
        assert_eq!(
            triples("The cat chased the mouse."),
            vec![triple("the cat", "chased", "the mouse")]
        );
    }

    #[test]
    fn test_relative_clause_disambiguation() {
        assert_eq!(
            triples("The cat that ate the cheese chased the mouse."),
            vec![
                triple("the cat", "ate", "the cheese"),
                triple("the cat", "chased", "the mouse"),
                triple("the cheese", "chased", "the mouse"),
            ]
        );
    }

    #[test]
    fn test_copular_relative_clause() {
        let found = triples("The cat which was hungry chased the mouse.");
        assert_eq!(found, vec![triple("the cat", "chased", "the mouse")]);
        assert!(found.iter().all(|(_, _, c2)| c2 != "hungry chased"));
    }

    #[test]
    fn test_comma_delimited_relative_clause() {
        assert_eq!(
            triples("The cat, which was big, chased the mouse that the dog saw."),
            vec![triple("the cat", "chased", "the mouse")]
        );
    }

    #[test]
    fn test_unresolved_pair_is_dropped() {
        assert!(triples("The cat quickly ran and chased the mouse.").is_empty());
    }

    #[test]
    fn test_passive_relation_text() {
        assert_eq!(
            triples("The mouse was chased by the cat."),
            vec![triple("the mouse", "was chased by", "the cat")]
        );
    }

    #[test]
    fn test_sentences_are_independent() {
        assert_eq!(
            triples("The cat slept. The dog chased the ball."),
            vec![triple("the dog", "chased", "the ball")]
        );
    }

    #[test]
    fn test_candidate_links_require_a_verb() {
        let doc = annotate("The cat and the dog.");
        let verb_phrases = match_verb_phrases(&doc);
        assert!(find_candidate_links(&doc, &verb_phrases).is_empty());
    }

    #[test]
    fn test_candidate_link_spans_are_ordered() {
        let doc = annotate("The cat that ate the cheese chased the mouse. The dog slept in the box.");
        let verb_phrases = match_verb_phrases(&doc);
        let links = find_candidate_links(&doc, &verb_phrases);

        assert!(!links.is_empty());
        for link in &links {
            assert!(link.subject.span.end <= link.object.span.start);
            for vp in &link.verb_phrases {
                assert!(vp.span.lies_between(&link.subject.span, &link.object.span));
            }
        }
    }

    #[test]
    fn test_prepositional_object_anchor() {
        let doc = annotate("The cat that sat on the mat slept on the sofa.");
        let verb_phrases = match_verb_phrases(&doc);
        let links = find_candidate_links(&doc, &verb_phrases);
        let link = links
            .iter()
            .find(|l| l.subject.text() == "the cat" && l.object.text() == "the sofa")
            .unwrap();
        assert_eq!(link.verb_phrases.len(), 2);

        let resolved = RelationExtractor::new().resolve_link(&doc, link);
        assert_eq!(resolved, vec![ConceptTriple::new("the cat", "slept on", "the sofa")]);
    }
}
