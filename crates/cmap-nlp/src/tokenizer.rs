//! Tokenization and sentence segmentation
//!
//! Words, numbers and single punctuation marks become tokens; clitics such
//! as `n't` and `'s` are split off their host word. Sentences end at
//! terminal punctuation followed by a token that does not start in lower
//! case, or at a blank line.

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{N}+(?:[.,]\p{N}+)+|[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*|\S")
        .expect("token pattern is valid")
});

const CLITICS: &[&str] = &["'s", "'re", "'ve", "'ll", "'d", "'m", "’s", "’re", "’ve", "’ll", "’d", "’m"];

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "vs", "etc", "inc", "ltd", "jr", "sr", "fig", "eq",
    "al", "no", "e", "g", "i",
];

/// A token before tagging: surface text and byte offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl RawToken {
    fn new(source: &str, start: usize, end: usize) -> Self {
        Self {
            text: source[start..end].to_string(),
            start,
            end,
        }
    }
}

/// Split text into tokens with byte offsets
pub fn tokenize(text: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();

    for m in TOKEN_RE.find_iter(text) {
        let (start, end) = (m.start(), m.end());
        match split_clitic(m.as_str()) {
            Some(at) => {
                tokens.push(RawToken::new(text, start, start + at));
                tokens.push(RawToken::new(text, start + at, end));
            }
            None => tokens.push(RawToken::new(text, start, end)),
        }
    }

    tokens
}

/// Byte position where a trailing clitic starts, if any
fn split_clitic(word: &str) -> Option<usize> {
    let lower = word.to_lowercase();
    if lower.len() != word.len() {
        return None;
    }

    for negation in ["n't", "n’t"] {
        if lower.ends_with(negation) && lower.len() > negation.len() {
            return Some(word.len() - negation.len());
        }
    }

    CLITICS
        .iter()
        .find(|c| lower.ends_with(*c) && lower.len() > c.len())
        .map(|c| word.len() - c.len())
}

fn is_terminal(token: &RawToken) -> bool {
    matches!(token.text.as_str(), "." | "!" | "?" | "…")
}

fn is_closing(token: &RawToken) -> bool {
    matches!(
        token.text.as_str(),
        ")" | "]" | "}" | "\"" | "'" | "”" | "’" | "." | "!" | "?" | "…"
    )
}

/// Group tokens into sentences, returned as `[start, end)` token ranges
pub fn segment(text: &str, tokens: &[RawToken]) -> Vec<(usize, usize)> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < tokens.len() {
        let mut boundary_after = None;

        if i > start && blank_line_between(text, &tokens[i - 1], &tokens[i]) {
            sentences.push((start, i));
            start = i;
        }

        if is_terminal(&tokens[i]) && !is_abbreviation_dot(tokens, i) {
            let mut end = i + 1;
            while end < tokens.len() && is_closing(&tokens[end]) && tokens[end].start == tokens[end - 1].end {
                end += 1;
            }
            let next_starts_sentence = tokens
                .get(end)
                .and_then(|t| t.text.chars().next())
                .map_or(true, |c| !c.is_lowercase());
            if next_starts_sentence {
                boundary_after = Some(end);
            }
        }

        match boundary_after {
            Some(end) => {
                sentences.push((start, end));
                start = end;
                i = end;
            }
            None => i += 1,
        }
    }

    if start < tokens.len() {
        sentences.push((start, tokens.len()));
    }

    sentences
}

fn blank_line_between(text: &str, left: &RawToken, right: &RawToken) -> bool {
    text[left.end..right.start].matches('\n').count() >= 2
}

/// A period glued to a known abbreviation ("Dr.", "e.g.") does not end the sentence
fn is_abbreviation_dot(tokens: &[RawToken], i: usize) -> bool {
    if tokens[i].text != "." || i == 0 {
        return false;
    }
    let prev = &tokens[i - 1];
    prev.end == tokens[i].start && ABBREVIATIONS.contains(&prev.text.to_lowercase().as_str())
        && tokens.get(i + 1).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[RawToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_words_and_punctuation() {
        let tokens = tokenize("The cat chased the mouse.");
        assert_eq!(texts(&tokens), vec!["The", "cat", "chased", "the", "mouse", "."]);
        assert_eq!(tokens[2].start, 8);
        assert_eq!(tokens[2].end, 14);
    }

    #[test]
    fn test_tokenize_clitics() {
        let tokens = tokenize("The cat's toy doesn't squeak.");
        assert_eq!(
            texts(&tokens),
            vec!["The", "cat", "'s", "toy", "does", "n't", "squeak", "."]
        );
    }

    #[test]
    fn test_tokenize_numbers_and_hyphens() {
        let tokens = tokenize("Version 3.5 of state-of-the-art tools");
        assert_eq!(
            texts(&tokens),
            vec!["Version", "3.5", "of", "state-of-the-art", "tools"]
        );
    }

    #[test]
    fn test_segment_sentences() {
        let text = "The cat ran. It was fast! Was it?";
        let tokens = tokenize(text);
        let sentences = segment(text, &tokens);
        assert_eq!(sentences, vec![(0, 4), (4, 8), (8, 11)]);
    }

    #[test]
    fn test_segment_keeps_abbreviations_and_lowercase_continuations() {
        let text = "Dr. Smith met e.g. the dean. Then he left.";
        let tokens = tokenize(text);
        let sentences = segment(text, &tokens);
        assert_eq!(sentences.len(), 2);
        assert_eq!(tokens[sentences[1].0].text, "Then");
    }

    #[test]
    fn test_segment_blank_line() {
        let text = "Heading\n\nThe cat ran";
        let tokens = tokenize(text);
        assert_eq!(segment(text, &tokens), vec![(0, 1), (1, 4)]);
    }

    #[test]
    fn test_segment_empty() {
        assert!(segment("", &[]).is_empty());
    }
}
