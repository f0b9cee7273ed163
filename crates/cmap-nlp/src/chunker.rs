//! Noun phrase chunking
//!
//! A noun phrase is either a lone personal pronoun or a maximal run of
//! determiners, modifiers and nouns that ends on a noun. Possessive `'s`
//! may join two runs ("the cat's tail").

use crate::doc::PosTag;
use crate::lexicon::RELATIVIZERS;

fn is_possessive_marker(lower: &str) -> bool {
    lower == "'s" || lower == "’s"
}

/// Pronouns that stand as a phrase of their own
fn is_chunk_pronoun(lower: &str) -> bool {
    !RELATIVIZERS.contains(lower) && lower != "there"
}

/// Chunk one sentence into noun phrases, returned as sentence-local
/// `[start, end)` ranges in order
pub fn chunk_noun_phrases(tags: &[PosTag], lowers: &[String]) -> Vec<(usize, usize)> {
    let n = tags.len();
    let mut chunks = Vec::new();
    let mut i = 0;

    while i < n {
        if tags[i] == PosTag::Pron {
            if is_chunk_pronoun(&lowers[i]) {
                chunks.push((i, i + 1));
            }
            i += 1;
            continue;
        }

        if !opens_phrase(tags, i) {
            i += 1;
            continue;
        }

        let mut last_nominal = None;
        let mut j = i;
        while j < n && continues_phrase(tags, lowers, i, j, last_nominal) {
            if tags[j].is_nominal() {
                last_nominal = Some(j);
            }
            j += 1;
        }

        match last_nominal {
            Some(last) => {
                chunks.push((i, last + 1));
                i = last + 1;
            }
            None => i += 1,
        }
    }

    chunks
}

fn opens_phrase(tags: &[PosTag], i: usize) -> bool {
    match tags[i] {
        PosTag::Det | PosTag::Adj | PosTag::Num | PosTag::Noun | PosTag::Propn => true,
        PosTag::Adv => matches!(tags.get(i + 1), Some(PosTag::Adj)),
        _ => false,
    }
}

fn continues_phrase(
    tags: &[PosTag],
    lowers: &[String],
    start: usize,
    j: usize,
    last_nominal: Option<usize>,
) -> bool {
    match tags[j] {
        PosTag::Det => j == start || (j > 0 && is_possessive_marker(&lowers[j - 1])),
        PosTag::Adj | PosTag::Num | PosTag::Noun | PosTag::Propn => true,
        PosTag::Part => is_possessive_marker(&lowers[j]) && last_nominal == Some(j - 1),
        PosTag::Adv => j == start && matches!(tags.get(j + 1), Some(PosTag::Adj)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PosTag::*;

    fn chunk(words: &[&str], tags: &[PosTag]) -> Vec<(usize, usize)> {
        let lowers: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        chunk_noun_phrases(tags, &lowers)
    }

    #[test]
    fn test_determiner_noun_phrases() {
        let words = ["The", "cat", "chased", "the", "small", "mouse", "."];
        let tags = [Det, Noun, Verb, Det, Adj, Noun, Punct];
        assert_eq!(chunk(&words, &tags), vec![(0, 2), (3, 6)]);
    }

    #[test]
    fn test_pronouns_and_relativizers() {
        let words = ["the", "cat", "that", "she", "saw"];
        let tags = [Det, Noun, Pron, Pron, Verb];
        assert_eq!(chunk(&words, &tags), vec![(0, 2), (3, 4)]);
    }

    #[test]
    fn test_possessive_joins_runs() {
        let words = ["the", "cat", "'s", "long", "tail"];
        let tags = [Det, Noun, Part, Adj, Noun];
        assert_eq!(chunk(&words, &tags), vec![(0, 5)]);
    }

    #[test]
    fn test_phrase_ends_on_last_noun() {
        let words = ["the", "cat", "is", "very", "happy"];
        let tags = [Det, Noun, Verb, Adv, Adj];
        assert_eq!(chunk(&words, &tags), vec![(0, 2)]);

        let words = ["four", "categories", ":", "lexical", "information"];
        let tags = [Num, Noun, Punct, Adj, Noun];
        assert_eq!(chunk(&words, &tags), vec![(0, 2), (3, 5)]);
    }

    #[test]
    fn test_second_determiner_starts_new_phrase() {
        let words = ["the", "man", "the", "book"];
        let tags = [Det, Noun, Det, Noun];
        assert_eq!(chunk(&words, &tags), vec![(0, 2), (2, 4)]);
    }
}
