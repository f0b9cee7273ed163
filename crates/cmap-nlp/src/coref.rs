//! Rule-based coreference resolution
//!
//! Third-person pronouns are linked to a preceding noun phrase that agrees
//! in number and gender, then rewritten to that phrase's surface text.
//! Candidates are ranked by sentence distance, grammatical role and
//! proximity. Text without a resolvable pronoun comes back unchanged.

use std::cmp::Reverse;

use tracing::debug;

use cmap_core::{CorefConfig, NounPhrase};

use crate::doc::{DepRel, Doc, PosTag, Token};
use crate::lexicon::{FEMININE_NOUNS, MASCULINE_NOUNS, PERSON_NOUNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Number {
    Singular,
    Plural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gender {
    Masculine,
    Feminine,
    /// Animate, either gender
    Person,
    Neuter,
    /// Proper nouns: agree with any singular pronoun
    Unknown,
}

#[derive(Debug, Clone, Copy)]
struct PronounFeatures {
    number: Number,
    gender: Gender,
    possessive: bool,
    reflexive: bool,
}

fn pronoun_features(token: &Token) -> Option<PronounFeatures> {
    use Gender::*;
    use Number::*;

    let (number, gender, possessive, reflexive) = match token.lower.as_str() {
        "he" | "him" => (Singular, Masculine, false, false),
        "himself" => (Singular, Masculine, false, true),
        "his" => (Singular, Masculine, true, false),
        "she" => (Singular, Feminine, false, false),
        "herself" => (Singular, Feminine, false, true),
        "her" => (Singular, Feminine, token.pos == PosTag::Det, false),
        "hers" => (Singular, Feminine, true, false),
        "it" => (Singular, Neuter, false, false),
        "itself" => (Singular, Neuter, false, true),
        "its" => (Singular, Neuter, true, false),
        "they" | "them" => (Plural, Neuter, false, false),
        "themselves" => (Plural, Neuter, false, true),
        "their" | "theirs" => (Plural, Neuter, true, false),
        _ => return None,
    };
    Some(PronounFeatures {
        number,
        gender,
        possessive,
        reflexive,
    })
}

/// A noun phrase eligible as antecedent
struct Mention<'d> {
    phrase: &'d NounPhrase,
    root: &'d Token,
    number: Number,
    gender: Gender,
}

impl<'d> Mention<'d> {
    fn agrees_with(&self, pronoun: &PronounFeatures) -> bool {
        if self.number != pronoun.number {
            return false;
        }
        if pronoun.number == Number::Plural {
            return true;
        }
        match (pronoun.gender, self.gender) {
            (_, Gender::Unknown) => true,
            (Gender::Masculine, Gender::Masculine | Gender::Person) => true,
            (Gender::Feminine, Gender::Feminine | Gender::Person) => true,
            (Gender::Neuter, Gender::Neuter) => true,
            _ => false,
        }
    }

    /// Subjects first, then objects, then anything else
    fn role_rank(&self) -> u8 {
        match self.root.dep {
            rel if rel.is_subject() => 0,
            rel if rel.is_object() || rel == DepRel::Pobj => 1,
            _ => 2,
        }
    }
}

/// Rewrites pronouns into their antecedent mentions
#[derive(Debug, Clone)]
pub struct CoreferenceResolver {
    enabled: bool,
    max_sentence_distance: usize,
}

impl Default for CoreferenceResolver {
    fn default() -> Self {
        Self::new(2)
    }
}

impl CoreferenceResolver {
    pub fn new(max_sentence_distance: usize) -> Self {
        Self {
            enabled: true,
            max_sentence_distance,
        }
    }

    /// A resolver that returns every text unchanged
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            max_sentence_distance: 0,
        }
    }

    pub fn from_config(config: &CorefConfig) -> Self {
        Self {
            enabled: config.enabled,
            max_sentence_distance: config.max_sentence_distance,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Resolved text of an annotated document
    pub fn resolve(&self, doc: &Doc) -> String {
        if !self.enabled {
            return doc.text().to_string();
        }

        let mentions = self.mentions(doc);
        let mut replacements: Vec<(usize, usize, String)> = Vec::new();

        for token in doc.tokens() {
            let Some(features) = pronoun_features(token) else {
                continue;
            };
            if token.lower == "it" && is_pleonastic(doc, token) {
                continue;
            }
            let Some(antecedent) = self.antecedent(doc, token, &features, &mentions) else {
                continue;
            };

            let surface = doc.span_text(antecedent.phrase.span.start, antecedent.phrase.span.end);
            let replacement = if features.possessive {
                possessive_form(surface)
            } else {
                surface.to_string()
            };
            replacements.push((token.char_start, token.char_end, replacement));
        }

        if replacements.is_empty() {
            return doc.text().to_string();
        }
        debug!(replaced = replacements.len(), "Resolved pronouns");

        let text = doc.text();
        let mut resolved = String::with_capacity(text.len());
        let mut cursor = 0;
        for (start, end, replacement) in replacements {
            resolved.push_str(&text[cursor..start]);
            resolved.push_str(&replacement);
            cursor = end;
        }
        resolved.push_str(&text[cursor..]);
        resolved
    }

    fn mentions<'d>(&self, doc: &'d Doc) -> Vec<Mention<'d>> {
        doc.noun_phrases()
            .filter_map(|phrase| {
                let root = doc.span_root(phrase.span.start, phrase.span.end)?;
                if !root.pos.is_nominal() {
                    return None;
                }
                let coordinated = doc.children(root.index).any(|c| c.dep == DepRel::Conj);
                let number = if coordinated || (root.pos == PosTag::Noun && root.lemma != root.lower) {
                    Number::Plural
                } else {
                    Number::Singular
                };
                let gender = if root.pos == PosTag::Propn {
                    Gender::Unknown
                } else if MASCULINE_NOUNS.contains(root.lemma.as_str()) {
                    Gender::Masculine
                } else if FEMININE_NOUNS.contains(root.lemma.as_str()) {
                    Gender::Feminine
                } else if PERSON_NOUNS.contains(root.lemma.as_str()) {
                    Gender::Person
                } else {
                    Gender::Neuter
                };
                Some(Mention {
                    phrase,
                    root,
                    number,
                    gender,
                })
            })
            .collect()
    }

    fn antecedent<'m, 'd>(
        &self,
        doc: &Doc,
        pronoun: &Token,
        features: &PronounFeatures,
        mentions: &'m [Mention<'d>],
    ) -> Option<&'m Mention<'d>> {
        let clause = governing_verb(doc, pronoun.index);

        mentions
            .iter()
            .filter(|m| m.phrase.span.end <= pronoun.index)
            .filter(|m| pronoun.sentence - m.root.sentence <= self.max_sentence_distance)
            .filter(|m| m.agrees_with(features))
            // A plain pronoun never refers to the subject of its own clause
            .filter(|m| {
                features.possessive
                    || features.reflexive
                    || !(m.role_rank() == 0
                        && clause.is_some()
                        && governing_verb(doc, m.root.index) == clause)
            })
            .min_by_key(|m| {
                (
                    pronoun.sentence - m.root.sentence,
                    m.role_rank(),
                    Reverse(m.phrase.span.start),
                )
            })
    }
}

/// Nearest verb above a token
fn governing_verb(doc: &Doc, index: usize) -> Option<usize> {
    let mut current = doc.head(index)?;
    for _ in 0..doc.sentences()[current.sentence].len() {
        if current.pos.is_verbal() {
            return Some(current.index);
        }
        current = doc.head(current.index)?;
    }
    None
}

/// "it is hard to say", "it seems clear that ..."
fn is_pleonastic(doc: &Doc, it: &Token) -> bool {
    let sentence = &doc.sentences()[it.sentence];
    let mut i = it.index + 1;
    if i >= sentence.end || doc.token(i).lemma != "be" {
        return false;
    }
    i += 1;
    while i < sentence.end && doc.token(i).pos == PosTag::Adv {
        i += 1;
    }
    if i >= sentence.end || doc.token(i).pos != PosTag::Adj {
        return false;
    }
    i += 1;
    i < sentence.end && matches!(doc.token(i).lower.as_str(), "to" | "that")
}

fn possessive_form(surface: &str) -> String {
    if surface.ends_with('s') {
        format!("{surface}'")
    } else {
        format!("{surface}'s")
    }
}
