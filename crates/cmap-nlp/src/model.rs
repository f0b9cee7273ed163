//! Built-in rule-based language model

use tracing::debug;

use cmap_core::{AnnotatorConfig, ConceptMapError, NounPhrase, Result};

use crate::chunker::chunk_noun_phrases;
use crate::doc::{Doc, PosTag, Sentence, Token};
use crate::parser::parse_sentence;
use crate::tagger::tag_sentence;
use crate::tokenizer::{segment, tokenize};
use crate::LanguageModel;

/// Default upper bound on input length, in characters
pub const DEFAULT_MAX_LENGTH: usize = 1_000_000;

/// Lexicon-driven annotator: tokenizer, tagger, chunker and dependency
/// parser chained per sentence
#[derive(Debug, Clone)]
pub struct RuleBasedModel {
    max_length: usize,
}

impl Default for RuleBasedModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBasedModel {
    pub fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn from_config(config: &AnnotatorConfig) -> Self {
        Self::new().with_max_length(config.max_length)
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn validate(&self, text: &str) -> Result<()> {
        let length = text.chars().count();
        if length > self.max_length {
            return Err(ConceptMapError::Annotation(format!(
                "text of {length} characters exceeds the maximum length of {}",
                self.max_length
            )));
        }
        if text.contains('\0') {
            return Err(ConceptMapError::Annotation(
                "text contains NUL characters".to_string(),
            ));
        }
        Ok(())
    }
}

impl LanguageModel for RuleBasedModel {
    fn annotate(&self, text: &str) -> Result<Doc> {
        self.validate(text)?;

        let raw = tokenize(text);
        let ranges = segment(text, &raw);
        let mut tokens = Vec::with_capacity(raw.len());
        let mut sentences = Vec::with_capacity(ranges.len());

        for (index, (start, end)) in ranges.into_iter().enumerate() {
            let words: Vec<&str> = raw[start..end].iter().map(|t| t.text.as_str()).collect();
            let lowers: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
            let (tags, lemmas): (Vec<PosTag>, Vec<String>) = tag_sentence(&words).into_iter().unzip();
            let chunks = chunk_noun_phrases(&tags, &lowers);
            let arcs = parse_sentence(&tags, &lowers, &lemmas, &chunks);

            for (offset, raw_token) in raw[start..end].iter().enumerate() {
                let (head, dep) = arcs[offset];
                tokens.push(Token {
                    index: start + offset,
                    text: raw_token.text.clone(),
                    lower: lowers[offset].clone(),
                    lemma: lemmas[offset].clone(),
                    pos: tags[offset],
                    dep,
                    head: start + head,
                    sentence: index,
                    char_start: raw_token.start,
                    char_end: raw_token.end,
                });
            }

            let noun_phrases = chunks
                .iter()
                .map(|&(s, e)| {
                    let surface = &text[raw[start + s].start..raw[start + e - 1].end];
                    NounPhrase::new(start + s, start + e, surface)
                })
                .collect();

            sentences.push(Sentence {
                index,
                start,
                end,
                noun_phrases,
            });
        }

        debug!(
            tokens = tokens.len(),
            sentences = sentences.len(),
            "Annotated text"
        );
        Ok(Doc::new(text, tokens, sentences))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::DepRel;

    #[test]
    fn test_annotate_simple_sentence() {
        let doc = RuleBasedModel::new()
            .annotate("The cat chased the mouse.")
            .unwrap();

        assert_eq!(doc.sentences().len(), 1);
        let phrases: Vec<&str> = doc.noun_phrases().map(|np| np.text()).collect();
        assert_eq!(phrases, vec!["the cat", "the mouse"]);

        let chased = doc.token(2);
        assert_eq!(chased.text, "chased");
        assert_eq!(chased.pos, PosTag::Verb);
        assert_eq!(chased.lemma, "chase");
        assert!(chased.is_root());

        let subjects: Vec<&str> = doc
            .children(2)
            .filter(|t| t.dep == DepRel::Nsubj)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(subjects, vec!["cat"]);
    }

    #[test]
    fn test_annotate_offsets_are_document_level() {
        let text = "The cat slept. The dog barked at the mailman.";
        let doc = RuleBasedModel::new().annotate(text).unwrap();

        assert_eq!(doc.sentences().len(), 2);
        let second = &doc.sentences()[1];
        assert_eq!(second.start, 4);
        assert_eq!(second.noun_phrases[0].span.start, 4);
        assert_eq!(second.noun_phrases[0].text(), "the dog");
        for token in doc.sentence_tokens(second) {
            assert!(second.contains_token(token.head));
            assert_eq!(&text[token.char_start..token.char_end], token.text);
        }
    }

    #[test]
    fn test_noun_phrase_keeps_source_spacing() {
        let doc = RuleBasedModel::new()
            .annotate("The cat's toy squeaked.")
            .unwrap();
        let phrases: Vec<&str> = doc.noun_phrases().map(|np| np.text()).collect();
        assert_eq!(phrases, vec!["the cat's toy"]);
    }

    #[test]
    fn test_empty_text() {
        let doc = RuleBasedModel::new().annotate("").unwrap();
        assert!(doc.is_empty());
        assert!(doc.sentences().is_empty());
    }

    #[test]
    fn test_rejects_overlong_text() {
        let model = RuleBasedModel::new().with_max_length(10);
        let err = model.annotate("The cat chased the mouse.").unwrap_err();
        assert!(matches!(err, ConceptMapError::Annotation(_)));
    }

    #[test]
    fn test_rejects_nul_characters() {
        let err = RuleBasedModel::new().annotate("The cat\0 sat.").unwrap_err();
        assert!(err.to_string().contains("NUL"));
    }
}
