//! Annotation object model
//!
//! `Doc`, `Sentence` and `Token` are the only view of a language model the
//! rest of the pipeline sees. Any `LanguageModel` implementation produces
//! them; extraction and ranking code inspects text, POS tags, dependency
//! roles and parent/child links through these types alone.

use serde::{Deserialize, Serialize};

use cmap_core::NounPhrase;

// ============================================================================
// Tag Sets
// ============================================================================

/// Universal part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl PosTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adj => "ADJ",
            Self::Adp => "ADP",
            Self::Adv => "ADV",
            Self::Aux => "AUX",
            Self::Cconj => "CCONJ",
            Self::Det => "DET",
            Self::Intj => "INTJ",
            Self::Noun => "NOUN",
            Self::Num => "NUM",
            Self::Part => "PART",
            Self::Pron => "PRON",
            Self::Propn => "PROPN",
            Self::Punct => "PUNCT",
            Self::Sconj => "SCONJ",
            Self::Sym => "SYM",
            Self::Verb => "VERB",
            Self::X => "X",
        }
    }

    /// Nouns and proper nouns
    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Noun | Self::Propn)
    }

    pub fn is_verbal(&self) -> bool {
        matches!(self, Self::Verb | Self::Aux)
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dependency relation labels (ClearNLP style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepRel {
    Root,
    // Subjects
    Nsubj,
    Nsubjpass,
    Csubj,
    Csubjpass,
    Agent,
    Expl,
    // Objects and predicates
    Dobj,
    Dative,
    Attr,
    Oprd,
    Acomp,
    // Prepositions
    Prep,
    Pobj,
    Pcomp,
    // Nominal modifiers
    Det,
    Poss,
    Case,
    Amod,
    Compound,
    Nummod,
    Appos,
    Acl,
    Relcl,
    // Verbal modifiers
    Aux,
    Auxpass,
    Neg,
    Advmod,
    Prt,
    Advcl,
    Ccomp,
    Xcomp,
    Mark,
    // Coordination
    Cc,
    Conj,
    Punct,
    Dep,
}

impl DepRel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::Nsubj => "nsubj",
            Self::Nsubjpass => "nsubjpass",
            Self::Csubj => "csubj",
            Self::Csubjpass => "csubjpass",
            Self::Agent => "agent",
            Self::Expl => "expl",
            Self::Dobj => "dobj",
            Self::Dative => "dative",
            Self::Attr => "attr",
            Self::Oprd => "oprd",
            Self::Acomp => "acomp",
            Self::Prep => "prep",
            Self::Pobj => "pobj",
            Self::Pcomp => "pcomp",
            Self::Det => "det",
            Self::Poss => "poss",
            Self::Case => "case",
            Self::Amod => "amod",
            Self::Compound => "compound",
            Self::Nummod => "nummod",
            Self::Appos => "appos",
            Self::Acl => "acl",
            Self::Relcl => "relcl",
            Self::Aux => "aux",
            Self::Auxpass => "auxpass",
            Self::Neg => "neg",
            Self::Advmod => "advmod",
            Self::Prt => "prt",
            Self::Advcl => "advcl",
            Self::Ccomp => "ccomp",
            Self::Xcomp => "xcomp",
            Self::Mark => "mark",
            Self::Cc => "cc",
            Self::Conj => "conj",
            Self::Punct => "punct",
            Self::Dep => "dep",
        }
    }

    /// Nominal/clausal subjects, passive subjects, agents and expletives
    pub fn is_subject(&self) -> bool {
        matches!(
            self,
            Self::Nsubj | Self::Nsubjpass | Self::Csubj | Self::Csubjpass | Self::Agent | Self::Expl
        )
    }

    /// Direct objects, datives, attributes and object predicates
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Dobj | Self::Dative | Self::Attr | Self::Oprd)
    }
}

impl std::fmt::Display for DepRel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tokens and Sentences
// ============================================================================

/// An annotated token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Document-level token index
    pub index: usize,

    /// Surface text
    pub text: String,

    /// Lower-cased surface text
    pub lower: String,

    /// Base form
    pub lemma: String,

    pub pos: PosTag,

    /// Role towards `head`
    pub dep: DepRel,

    /// Document-level index of the syntactic parent; equals `index` for the
    /// sentence root
    pub head: usize,

    /// Index of the containing sentence
    pub sentence: usize,

    /// Byte offsets into the source text
    pub char_start: usize,
    pub char_end: usize,
}

impl Token {
    pub fn is_root(&self) -> bool {
        self.head == self.index
    }

    pub fn is_punct(&self) -> bool {
        self.pos == PosTag::Punct
    }
}

/// A sentence: a token range plus the noun phrases chunked inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub index: usize,

    /// Document-level token range `[start, end)`
    pub start: usize,
    pub end: usize,

    pub noun_phrases: Vec<NounPhrase>,
}

impl Sentence {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains_token(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

// ============================================================================
// Document
// ============================================================================

/// A fully annotated document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    text: String,
    tokens: Vec<Token>,
    sentences: Vec<Sentence>,
}

impl Doc {
    /// Assemble a document from model output
    ///
    /// Sentences must tile the token sequence in order and every head must
    /// stay inside its own sentence.
    pub fn new(text: impl Into<String>, tokens: Vec<Token>, sentences: Vec<Sentence>) -> Self {
        debug_assert!(tokens.iter().enumerate().all(|(i, t)| t.index == i));
        debug_assert!(tokens
            .iter()
            .all(|t| sentences[t.sentence].contains_token(t.head)));
        Self {
            text: text.into(),
            tokens,
            sentences,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> &Token {
        &self.tokens[index]
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens of one sentence
    pub fn sentence_tokens(&self, sentence: &Sentence) -> &[Token] {
        &self.tokens[sentence.start..sentence.end]
    }

    /// All noun phrases in document order
    pub fn noun_phrases(&self) -> impl Iterator<Item = &NounPhrase> {
        self.sentences.iter().flat_map(|s| s.noun_phrases.iter())
    }

    /// Source text covered by the token range `[start, end)`
    pub fn span_text(&self, start: usize, end: usize) -> &str {
        if start >= end || end > self.tokens.len() {
            return "";
        }
        &self.text[self.tokens[start].char_start..self.tokens[end - 1].char_end]
    }

    /// Syntactic parent, `None` for a sentence root
    pub fn head(&self, index: usize) -> Option<&Token> {
        let token = &self.tokens[index];
        (!token.is_root()).then(|| &self.tokens[token.head])
    }

    /// Direct dependents of a token, in token order
    pub fn children(&self, index: usize) -> impl Iterator<Item = &Token> {
        let sentence = &self.sentences[self.tokens[index].sentence];
        self.tokens[sentence.start..sentence.end]
            .iter()
            .filter(move |t| t.head == index && t.index != index)
    }

    /// Number of arcs between a token and its sentence root
    pub fn depth(&self, index: usize) -> usize {
        let limit = self.sentences[self.tokens[index].sentence].len();
        let mut current = index;
        let mut depth = 0;
        while !self.tokens[current].is_root() && depth < limit {
            current = self.tokens[current].head;
            depth += 1;
        }
        depth
    }

    /// The token of `[start, end)` closest to the sentence root
    ///
    /// Ties go to the earliest token.
    pub fn span_root(&self, start: usize, end: usize) -> Option<&Token> {
        (start..end.min(self.tokens.len()))
            .min_by_key(|&i| (self.depth(i), i))
            .map(|i| &self.tokens[i])
    }

    /// Lower-cased token texts per sentence, punctuation removed
    pub fn sentence_token_texts(&self) -> Vec<Vec<String>> {
        self.sentences
            .iter()
            .map(|s| {
                self.sentence_tokens(s)
                    .iter()
                    .filter(|t| !t.is_punct())
                    .map(|t| t.lower.clone())
                    .collect()
            })
            .collect()
    }

    /// (lower-cased text, POS) pairs per sentence, punctuation removed
    pub fn sentence_pos_tags(&self) -> Vec<Vec<(String, PosTag)>> {
        self.sentences
            .iter()
            .map(|s| {
                self.sentence_tokens(s)
                    .iter()
                    .filter(|t| !t.is_punct())
                    .map(|t| (t.lower.clone(), t.pos))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(index: usize, text: &str, pos: PosTag, dep: DepRel, head: usize, at: usize) -> Token {
        Token {
            index,
            text: text.to_string(),
            lower: text.to_lowercase(),
            lemma: text.to_lowercase(),
            pos,
            dep,
            head,
            sentence: 0,
            char_start: at,
            char_end: at + text.len(),
        }
    }

    // "The cat chased the mouse."
    fn sample_doc() -> Doc {
        let tokens = vec![
            token(0, "The", PosTag::Det, DepRel::Det, 1, 0),
            token(1, "cat", PosTag::Noun, DepRel::Nsubj, 2, 4),
            token(2, "chased", PosTag::Verb, DepRel::Root, 2, 8),
            token(3, "the", PosTag::Det, DepRel::Det, 4, 15),
            token(4, "mouse", PosTag::Noun, DepRel::Dobj, 2, 19),
            token(5, ".", PosTag::Punct, DepRel::Punct, 2, 24),
        ];
        let sentences = vec![Sentence {
            index: 0,
            start: 0,
            end: 6,
            noun_phrases: vec![
                NounPhrase::new(0, 2, "The cat"),
                NounPhrase::new(3, 5, "the mouse"),
            ],
        }];
        Doc::new("The cat chased the mouse.", tokens, sentences)
    }

    #[test]
    fn test_children_and_head() {
        let doc = sample_doc();
        let children: Vec<&str> = doc.children(2).map(|t| t.text.as_str()).collect();
        assert_eq!(children, vec!["cat", "mouse", "."]);
        assert_eq!(doc.head(1).map(|t| t.index), Some(2));
        assert!(doc.head(2).is_none());
    }

    #[test]
    fn test_span_root_and_depth() {
        let doc = sample_doc();
        assert_eq!(doc.depth(2), 0);
        assert_eq!(doc.depth(0), 2);
        assert_eq!(doc.span_root(0, 2).unwrap().text, "cat");
        assert_eq!(doc.span_root(1, 5).unwrap().text, "chased");
        assert!(doc.span_root(3, 3).is_none());
    }

    #[test]
    fn test_span_text_uses_source() {
        let doc = sample_doc();
        assert_eq!(doc.span_text(0, 2), "The cat");
        assert_eq!(doc.span_text(2, 6), "chased the mouse.");
        assert_eq!(doc.span_text(4, 2), "");
    }

    #[test]
    fn test_sentence_listings_drop_punctuation() {
        let doc = sample_doc();
        assert_eq!(
            doc.sentence_token_texts(),
            vec![vec!["the", "cat", "chased", "the", "mouse"]]
        );
        assert_eq!(doc.sentence_pos_tags()[0][2], ("chased".to_string(), PosTag::Verb));
    }

    #[test]
    fn test_role_classes() {
        assert!(DepRel::Nsubjpass.is_subject());
        assert!(DepRel::Expl.is_subject());
        assert!(DepRel::Oprd.is_object());
        assert!(!DepRel::Pobj.is_object());
        assert_eq!(DepRel::Root.to_string(), "ROOT");
        assert_eq!(PosTag::Cconj.to_string(), "CCONJ");
    }
}
