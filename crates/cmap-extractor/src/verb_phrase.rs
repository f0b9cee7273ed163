//! Verb-phrase matching
//!
//! A verb phrase is any token run matching `VERB* ADV* PART* VERB+ PART* ADP*`
//! over POS tags. Every match in a sentence is enumerated, including
//! overlapping ones; the list is ordered by start and then by length
//! (longest first) and spans are accepted greedily when they share no token
//! with an already accepted span.

use serde::{Deserialize, Serialize};
use tracing::debug;

use cmap_core::VerbPhrase;
use cmap_nlp::{Doc, PosTag};

// ============================================================================
// Token Patterns
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantifier {
    One,
    ZeroOrMore,
    OneOrMore,
}

/// One position of a token pattern: a POS tag and how often it repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternElement {
    pub pos: PosTag,
    pub quantifier: Quantifier,
}

impl PatternElement {
    pub fn new(pos: PosTag, quantifier: Quantifier) -> Self {
        Self { pos, quantifier }
    }
}

/// A sequence of quantified POS tags, matched by simulating all states at once
#[derive(Debug, Clone)]
pub struct TokenPattern {
    /// `OneOrMore` is expanded to `One` followed by `ZeroOrMore`
    states: Vec<PatternElement>,
}

impl TokenPattern {
    pub fn new(elements: &[PatternElement]) -> Self {
        let states = elements
            .iter()
            .flat_map(|e| match e.quantifier {
                Quantifier::OneOrMore => vec![
                    PatternElement::new(e.pos, Quantifier::One),
                    PatternElement::new(e.pos, Quantifier::ZeroOrMore),
                ],
                _ => vec![*e],
            })
            .collect();
        Self { states }
    }

    /// `VERB* ADV* PART* VERB+ PART* ADP*`
    pub fn verb_phrase() -> Self {
        use PosTag::*;
        use Quantifier::*;
        Self::new(&[
            PatternElement::new(Verb, ZeroOrMore),
            PatternElement::new(Adv, ZeroOrMore),
            PatternElement::new(Part, ZeroOrMore),
            PatternElement::new(Verb, OneOrMore),
            PatternElement::new(Part, ZeroOrMore),
            PatternElement::new(Adp, ZeroOrMore),
        ])
    }

    fn accept(&self) -> usize {
        self.states.len()
    }

    /// Add every state reachable without consuming a token
    fn close(&self, active: &mut [bool]) {
        for s in 0..self.states.len() {
            if active[s] && self.states[s].quantifier == Quantifier::ZeroOrMore {
                active[s + 1] = true;
            }
        }
    }

    /// End positions (exclusive) of every non-empty match starting at `start`
    pub fn match_ends(&self, tags: &[PosTag], start: usize) -> Vec<usize> {
        let mut ends = Vec::new();
        let mut active = vec![false; self.states.len() + 1];
        active[0] = true;
        self.close(&mut active);

        for (offset, &tag) in tags[start..].iter().enumerate() {
            let mut next = vec![false; active.len()];
            for (s, element) in self.states.iter().enumerate() {
                if !active[s] || element.pos != tag {
                    continue;
                }
                match element.quantifier {
                    Quantifier::ZeroOrMore => next[s] = true,
                    Quantifier::One | Quantifier::OneOrMore => next[s + 1] = true,
                }
            }
            self.close(&mut next);

            if !next.iter().any(|&on| on) {
                break;
            }
            if next[self.accept()] {
                ends.push(start + offset + 1);
            }
            active = next;
        }

        ends
    }

    /// Every match in a tag sequence as `(start, end)`, overlaps included
    pub fn find_all(&self, tags: &[PosTag]) -> Vec<(usize, usize)> {
        (0..tags.len())
            .flat_map(|start| {
                self.match_ends(tags, start)
                    .into_iter()
                    .map(move |end| (start, end))
            })
            .collect()
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Non-overlapping verb-phrase spans of one tag sequence, in order
///
/// Earlier starts win; among equal starts the longest span wins.
pub fn select_verb_phrases(pattern: &TokenPattern, tags: &[PosTag]) -> Vec<(usize, usize)> {
    let mut matches = pattern.find_all(tags);
    matches.sort_by(|a, b| a.0.cmp(&b.0).then((b.1 - b.0).cmp(&(a.1 - a.0))));

    let mut taken = vec![false; tags.len()];
    let mut accepted = Vec::new();
    for (start, end) in matches {
        if taken[start..end].iter().any(|&t| t) {
            continue;
        }
        taken[start..end].iter_mut().for_each(|t| *t = true);
        accepted.push((start, end));
    }

    accepted.sort_unstable();
    accepted
}

/// Accepted verb phrases per sentence, with document-level spans
pub fn match_verb_phrases(doc: &Doc) -> Vec<Vec<VerbPhrase>> {
    let pattern = TokenPattern::verb_phrase();

    let phrases: Vec<Vec<VerbPhrase>> = doc
        .sentences()
        .iter()
        .map(|sentence| {
            let tags: Vec<PosTag> = doc.sentence_tokens(sentence).iter().map(|t| t.pos).collect();
            select_verb_phrases(&pattern, &tags)
                .into_iter()
                .map(|(s, e)| {
                    let (start, end) = (sentence.start + s, sentence.start + e);
                    VerbPhrase::new(start, end, doc.span_text(start, end))
                })
                .collect()
        })
        .collect();

    debug!(
        verb_phrases = phrases.iter().map(Vec::len).sum::<usize>(),
        "Matched verb phrases"
    );
    phrases
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmap_nlp::{LanguageModel, RuleBasedModel};
    use proptest::prelude::*;
    use PosTag::*;

    #[test]
    fn test_match_ends_enumerates_every_length() {
        let pattern = TokenPattern::verb_phrase();
        // was chased by the cat
        let tags = [Verb, Verb, Adp, Det, Noun];
        assert_eq!(pattern.match_ends(&tags, 0), vec![1, 2, 3]);
        assert_eq!(pattern.match_ends(&tags, 1), vec![2, 3]);
        assert!(pattern.match_ends(&tags, 3).is_empty());
    }

    #[test]
    fn test_pattern_requires_a_verb() {
        let pattern = TokenPattern::verb_phrase();
        assert!(pattern.find_all(&[Adv, Part, Adp]).is_empty());
        assert_eq!(pattern.find_all(&[Adv, Verb]), vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn test_selection_prefers_earliest_then_longest() {
        let pattern = TokenPattern::verb_phrase();
        // the cat quickly ran and chased the mouse
        let tags = [Det, Noun, Adv, Verb, Cconj, Verb, Det, Noun];
        assert_eq!(select_verb_phrases(&pattern, &tags), vec![(2, 4), (5, 6)]);

        // wants to sleep on
        let tags = [Verb, Part, Verb, Adp];
        assert_eq!(select_verb_phrases(&pattern, &tags), vec![(0, 4)]);
    }

    #[test]
    fn test_match_verb_phrases_on_document() {
        let doc = RuleBasedModel::new()
            .annotate("The mouse was chased by the cat. The dog slept.")
            .unwrap();
        let phrases = match_verb_phrases(&doc);

        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases[0].len(), 1);
        assert_eq!(phrases[0][0].text(), "was chased by");
        assert_eq!((phrases[0][0].span.start, phrases[0][0].span.end), (2, 5));
        assert_eq!(phrases[1][0].text(), "slept");
        assert_eq!(phrases[1][0].span.start, 10);
    }

    fn any_tag() -> impl Strategy<Value = PosTag> {
        prop::sample::select(vec![Verb, Adv, Part, Adp, Noun, Det, Punct])
    }

    proptest! {
        #[test]
        fn test_accepted_spans_never_overlap(tags in prop::collection::vec(any_tag(), 0..40)) {
            let accepted = select_verb_phrases(&TokenPattern::verb_phrase(), &tags);
            for pair in accepted.windows(2) {
                prop_assert!(pair[0].1 <= pair[1].0);
            }
            for &(start, end) in &accepted {
                prop_assert!(start < end);
                prop_assert!(tags[start..end].contains(&Verb));
            }
        }
    }
}
