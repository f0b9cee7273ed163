//! Part-of-speech tagging
//!
//! Two passes per sentence. The lexical pass classifies each word from the
//! lexicon and its suffix alone; the contextual pass settles the ambiguous
//! classes (noun/verb, participle/adjective, function words) left to right
//! using the already-resolved previous tag and the lexical class of the
//! next word.

use crate::doc::PosTag;
use crate::lemma::{noun_lemma, verb_base, verb_lemma, VerbForm};
use crate::lexicon::{
    has_adjective_suffix, is_auxiliary, is_be_form, is_ly_adverb, is_modal_or_do, ADJECTIVES,
    ADPOSITIONS, ADVERBS, COORDINATORS, DETERMINERS, ED_NON_VERBS, ING_NON_VERBS,
    IRREGULAR_VERBS, NEGATIONS, NUMBER_WORDS, POSSESSIVE_DETERMINERS, PRONOUNS,
    RELATIVIZERS, S_SINGULAR_NOUNS, SUBORDINATORS,
};

/// Word-specific rules take precedence over the lexicon for these
const SPECIAL_WORDS: &[&str] = &[
    "to", "that", "this", "these", "those", "her", "his", "'s", "’s", "there", "which", "what",
    "more", "most", "less", "least", "like",
];

/// Lexical class of a word before context is considered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lex {
    Fixed(PosTag),
    /// Unambiguous verb form
    Verb,
    /// Base or third-person form of a verb that also reads as a noun
    Ambiguous(VerbForm),
    /// -ed / -ing form that may modify a noun
    Participle(VerbForm),
    Adj { by_suffix: bool },
    Noun,
    Propn,
    Special,
}

impl Lex {
    /// Could this word sit inside a noun phrase after a determiner?
    fn continues_noun_phrase(&self) -> bool {
        matches!(
            self,
            Lex::Noun
                | Lex::Propn
                | Lex::Adj { .. }
                | Lex::Ambiguous(_)
                | Lex::Participle(_)
                | Lex::Fixed(PosTag::Num)
        )
    }

    fn is_verbal(&self) -> bool {
        matches!(self, Lex::Verb | Lex::Ambiguous(_) | Lex::Participle(_))
    }
}

/// Tag and lemmatize one sentence
pub fn tag_sentence(words: &[&str]) -> Vec<(PosTag, String)> {
    let lowers: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let lexes: Vec<Lex> = words
        .iter()
        .zip(&lowers)
        .enumerate()
        .map(|(i, (word, lower))| lexical_class(word, lower, i == 0))
        .collect();

    let mut tagger = ContextTagger {
        lowers: &lowers,
        lexes: &lexes,
        tags: Vec::with_capacity(words.len()),
    };
    for i in 0..words.len() {
        let tag = tagger.resolve(i);
        tagger.tags.push(tag);
    }

    tagger
        .tags
        .iter()
        .zip(words.iter().zip(&lowers))
        .map(|(&tag, (word, lower))| (tag, lemma_for(tag, word, lower)))
        .collect()
}

fn lemma_for(tag: PosTag, word: &str, lower: &str) -> String {
    match tag {
        PosTag::Verb | PosTag::Aux if lower == "'s" || lower == "’s" => "be".to_string(),
        PosTag::Verb | PosTag::Aux => verb_lemma(lower),
        PosTag::Noun => noun_lemma(lower),
        PosTag::Propn => word.to_string(),
        _ => lower.to_string(),
    }
}

fn lexical_class(word: &str, lower: &str, sentence_start: bool) -> Lex {
    let Some(first) = word.chars().next() else {
        return Lex::Fixed(PosTag::X);
    };

    if COORDINATORS.contains(lower) {
        return Lex::Fixed(PosTag::Cconj);
    }
    if !word.chars().any(char::is_alphanumeric) {
        return if word.chars().all(|c| "$%+=<>#@©®°€£¥|~^*/\\".contains(c)) {
            Lex::Fixed(PosTag::Sym)
        } else {
            Lex::Fixed(PosTag::Punct)
        };
    }
    if first.is_numeric() {
        return Lex::Fixed(PosTag::Num);
    }
    if SPECIAL_WORDS.contains(&lower) {
        return Lex::Special;
    }

    let closed = [
        (&*SUBORDINATORS, PosTag::Sconj),
        (&*DETERMINERS, PosTag::Det),
        (&*POSSESSIVE_DETERMINERS, PosTag::Det),
        (&*PRONOUNS, PosTag::Pron),
        (&*NEGATIONS, PosTag::Part),
        (&*ADPOSITIONS, PosTag::Adp),
        (&*NUMBER_WORDS, PosTag::Num),
        (&*ADVERBS, PosTag::Adv),
    ];
    if let Some((_, tag)) = closed.iter().find(|(words, _)| words.contains(lower)) {
        return Lex::Fixed(*tag);
    }

    if is_auxiliary(lower) {
        return Lex::Verb;
    }
    if let Some((_, participle)) = IRREGULAR_VERBS.get(lower) {
        return if *participle {
            Lex::Participle(VerbForm::PastOrParticiple)
        } else {
            Lex::Verb
        };
    }
    if ADJECTIVES.contains(lower) {
        return Lex::Adj { by_suffix: false };
    }
    match verb_base(lower) {
        Some((_, form @ (VerbForm::Base | VerbForm::ThirdPerson))) => return Lex::Ambiguous(form),
        Some((_, form @ (VerbForm::PastOrParticiple | VerbForm::Gerund | VerbForm::Participle))) => {
            return Lex::Participle(form)
        }
        Some((_, VerbForm::Past)) => return Lex::Verb,
        None => {}
    }
    if is_ly_adverb(lower) {
        return Lex::Fixed(PosTag::Adv);
    }

    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase()) {
        return Lex::Propn;
    }
    if first.is_uppercase() && !sentence_start {
        return Lex::Propn;
    }

    if lower.ends_with("ed") && lower.len() > 4 && !ED_NON_VERBS.contains(lower) {
        return Lex::Participle(VerbForm::PastOrParticiple);
    }
    if lower.ends_with("ing") && lower.len() > 5 && !ING_NON_VERBS.contains(lower) {
        return Lex::Participle(VerbForm::Gerund);
    }
    if has_adjective_suffix(lower) {
        return Lex::Adj { by_suffix: true };
    }

    Lex::Noun
}

struct ContextTagger<'a> {
    lowers: &'a [String],
    lexes: &'a [Lex],
    tags: Vec<PosTag>,
}

impl<'a> ContextTagger<'a> {
    fn resolve(&self, i: usize) -> PosTag {
        match self.lexes[i] {
            Lex::Fixed(tag) => tag,
            Lex::Verb => PosTag::Verb,
            Lex::Noun => PosTag::Noun,
            Lex::Propn => PosTag::Propn,
            Lex::Special => self.special(i),
            Lex::Ambiguous(form) => self.ambiguous(i, form),
            Lex::Participle(form) => self.participle(i, form),
            Lex::Adj { by_suffix } => self.adjective(i, by_suffix),
        }
    }

    fn prev_tag(&self, i: usize) -> Option<PosTag> {
        i.checked_sub(1).map(|p| self.tags[p])
    }

    fn prev_lower(&self, i: usize) -> Option<&str> {
        i.checked_sub(1).map(|p| self.lowers[p].as_str())
    }

    fn next_lex(&self, i: usize) -> Option<Lex> {
        self.lexes.get(i + 1).copied()
    }

    fn next_lower(&self, i: usize) -> Option<&str> {
        self.lowers.get(i + 1).map(String::as_str)
    }

    fn next_continues_noun_phrase(&self, i: usize) -> bool {
        match self.next_lex(i) {
            Some(Lex::Special) => matches!(self.next_lower(i), Some("more" | "most" | "less" | "least")),
            Some(lex) => lex.continues_noun_phrase(),
            None => false,
        }
    }

    /// Determiners, adjectives, numbers and possessive markers open a noun phrase
    fn inside_noun_phrase(&self, i: usize) -> bool {
        match self.prev_tag(i) {
            Some(PosTag::Det | PosTag::Adj | PosTag::Num) => true,
            Some(PosTag::Part) => matches!(self.prev_lower(i), Some("'s" | "’s")),
            _ => false,
        }
    }

    /// A modal or "do" before this word, looking past negations and adverbs
    fn prev_is_modal_or_do(&self, i: usize) -> bool {
        let mut p = i;
        while p > 0 {
            p -= 1;
            match self.tags[p] {
                PosTag::Adv => continue,
                PosTag::Part if NEGATIONS.contains(self.lowers[p].as_str()) => continue,
                PosTag::Verb => return is_modal_or_do(&verb_lemma(&self.lowers[p])),
                _ => return false,
            }
        }
        false
    }

    fn ambiguous(&self, i: usize, form: VerbForm) -> PosTag {
        let next = self.next_lex(i);
        let next_opens_argument = matches!(
            next,
            Some(Lex::Fixed(PosTag::Det | PosTag::Pron | PosTag::Adp | PosTag::Num | PosTag::Adv))
                | Some(Lex::Special)
        );

        match self.prev_tag(i) {
            None => {
                if form == VerbForm::Base && next_opens_argument {
                    PosTag::Verb
                } else {
                    PosTag::Noun
                }
            }
            Some(PosTag::Det | PosTag::Adj | PosTag::Num | PosTag::Adp) => PosTag::Noun,
            Some(PosTag::Part) => match self.prev_lower(i) {
                Some("'s" | "’s") => PosTag::Noun,
                _ => PosTag::Verb,
            },
            Some(PosTag::Verb) if self.prev_is_modal_or_do(i) => PosTag::Verb,
            Some(PosTag::Verb) => PosTag::Noun,
            Some(PosTag::Pron | PosTag::Adv) => PosTag::Verb,
            Some(PosTag::Noun | PosTag::Propn) => match next {
                _ if next_opens_argument => PosTag::Verb,
                Some(Lex::Verb) => PosTag::Noun,
                _ => self.agreement(i, form),
            },
            Some(PosTag::Cconj) => {
                let before = i.checked_sub(2).map(|p| self.tags[p]);
                if before == Some(PosTag::Verb) {
                    PosTag::Verb
                } else {
                    PosTag::Noun
                }
            }
            Some(PosTag::Sconj) if next_opens_argument => PosTag::Verb,
            Some(_) => PosTag::Noun,
        }
    }

    /// Verb reading when the form agrees in number with the noun before it
    fn agreement(&self, i: usize, form: VerbForm) -> PosTag {
        let subject = self.prev_lower(i).unwrap_or_default();
        let plural = subject.ends_with('s')
            && !subject.ends_with("ss")
            && !S_SINGULAR_NOUNS.contains(subject);
        match (form, plural) {
            (VerbForm::ThirdPerson, false) | (VerbForm::Base, true) => PosTag::Verb,
            _ => PosTag::Noun,
        }
    }

    /// "which was hungry" before this word: the adjective closes a relative
    /// clause rather than opening a noun phrase
    fn closes_relative_predicate(&self, i: usize) -> bool {
        let mut p = i;
        while p > 0 && matches!(self.tags[p - 1], PosTag::Adj | PosTag::Adv) {
            p -= 1;
        }
        if p == i || p < 2 {
            return false;
        }
        let copula = p - 1;
        self.tags[copula] == PosTag::Verb
            && is_be_form(&self.lowers[copula])
            && self.tags[copula - 1] == PosTag::Pron
            && RELATIVIZERS.contains(self.lowers[copula - 1].as_str())
    }

    fn participle(&self, i: usize, form: VerbForm) -> PosTag {
        let continues = self.next_continues_noun_phrase(i);

        if !continues && self.closes_relative_predicate(i) {
            return PosTag::Verb;
        }

        if self.inside_noun_phrase(i) {
            return match (continues, form) {
                (true, _) => PosTag::Adj,
                (false, _) => PosTag::Noun,
            };
        }

        match self.prev_tag(i) {
            Some(PosTag::Adp) if continues && !self.next_is_function_word(i) => PosTag::Adj,
            Some(PosTag::Noun | PosTag::Propn)
                if form == VerbForm::Gerund && self.next_lex(i) == Some(Lex::Noun) =>
            {
                PosTag::Noun
            }
            _ => PosTag::Verb,
        }
    }

    fn next_is_function_word(&self, i: usize) -> bool {
        matches!(
            self.next_lex(i),
            Some(Lex::Fixed(PosTag::Det | PosTag::Pron)) | Some(Lex::Special)
        )
    }

    fn adjective(&self, i: usize, by_suffix: bool) -> PosTag {
        if !by_suffix || self.next_continues_noun_phrase(i) {
            return PosTag::Adj;
        }
        // A suffix-guessed adjective with nothing nominal after it heads its own phrase
        match self.prev_tag(i) {
            None
            | Some(
                PosTag::Det | PosTag::Adj | PosTag::Num | PosTag::Adp | PosTag::Cconj | PosTag::Punct,
            ) => PosTag::Noun,
            Some(PosTag::Part) if matches!(self.prev_lower(i), Some("'s" | "’s")) => PosTag::Noun,
            _ => PosTag::Adj,
        }
    }

    fn special(&self, i: usize) -> PosTag {
        let word = self.lowers[i].as_str();
        let prev = self.prev_tag(i);
        let continues = self.next_continues_noun_phrase(i);

        match word {
            "to" => {
                let verb_follows = match self.next_lex(i) {
                    Some(Lex::Verb | Lex::Ambiguous(VerbForm::Base)) => true,
                    Some(Lex::Fixed(PosTag::Adv)) => self
                        .lexes
                        .get(i + 2)
                        .map(|lex| lex.is_verbal())
                        .unwrap_or(false),
                    _ => false,
                };
                if verb_follows {
                    PosTag::Part
                } else {
                    PosTag::Adp
                }
            }
            "that" => {
                let verb_follows = matches!(
                    self.next_lex(i),
                    Some(Lex::Verb | Lex::Ambiguous(_) | Lex::Participle(_) | Lex::Fixed(PosTag::Adv))
                );
                match prev {
                    Some(PosTag::Noun | PosTag::Propn | PosTag::Pron) if verb_follows => PosTag::Pron,
                    Some(PosTag::Verb) => PosTag::Sconj,
                    _ if continues => PosTag::Det,
                    None => PosTag::Pron,
                    Some(PosTag::Adv | PosTag::Adp | PosTag::Adj) => PosTag::Sconj,
                    _ => PosTag::Pron,
                }
            }
            "this" | "these" | "those" | "which" | "what" | "her" | "his" => {
                if continues {
                    PosTag::Det
                } else {
                    PosTag::Pron
                }
            }
            "'s" | "’s" => {
                let pronoun_host = prev == Some(PosTag::Pron)
                    || matches!(
                        self.prev_lower(i),
                        Some("that" | "there" | "here" | "what" | "who" | "where" | "how" | "it")
                    );
                if pronoun_host {
                    PosTag::Verb
                } else {
                    PosTag::Part
                }
            }
            "there" => match self.next_lower(i) {
                Some(next) if is_be_form(next) || next == "'s" || next == "’s" => PosTag::Pron,
                _ => PosTag::Adv,
            },
            "more" | "most" | "less" | "least" => match self.next_lex(i) {
                Some(Lex::Adj { .. } | Lex::Participle(_) | Lex::Fixed(PosTag::Adv)) => PosTag::Adv,
                _ => PosTag::Adj,
            },
            "like" => {
                let verbal_context = prev == Some(PosTag::Pron)
                    || self.prev_is_modal_or_do(i)
                    || (prev == Some(PosTag::Part) && self.prev_lower(i) == Some("to"));
                if verbal_context {
                    PosTag::Verb
                } else {
                    PosTag::Adp
                }
            }
            _ => PosTag::X,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(sentence: &str) -> Vec<PosTag> {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        tag_sentence(&words).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_simple_transitive() {
        use PosTag::*;
        assert_eq!(
            tags("The cat chased the mouse ."),
            vec![Det, Noun, Verb, Det, Noun, Punct]
        );
    }

    #[test]
    fn test_noun_verb_ambiguity() {
        use PosTag::*;
        assert_eq!(tags("The cat chases the mouse"), vec![Det, Noun, Verb, Det, Noun]);
        assert_eq!(tags("the use of tools"), vec![Det, Noun, Adp, Noun]);
        assert_eq!(tags("they use tools"), vec![Pron, Verb, Noun]);
        assert_eq!(
            tags("analysis results are discussed"),
            vec![Noun, Noun, Verb, Verb]
        );
    }

    #[test]
    fn test_participles_and_adjectives() {
        use PosTag::*;
        assert_eq!(
            tags("in existing ontology matching solutions"),
            vec![Adp, Adj, Noun, Noun, Noun]
        );
        assert_eq!(
            tags("lexical information is mainly analyzed"),
            vec![Adj, Noun, Verb, Adv, Verb]
        );
        assert_eq!(tags("The animal ran"), vec![Det, Noun, Verb]);
    }

    #[test]
    fn test_verb_after_relative_predicate() {
        use PosTag::*;
        assert_eq!(
            tags("The cat which was hungry chased the mouse ."),
            vec![Det, Noun, Pron, Verb, Adj, Verb, Det, Noun, Punct]
        );
        assert_eq!(tags("the hungry cat"), vec![Det, Adj, Noun]);
    }

    #[test]
    fn test_function_words() {
        use PosTag::*;
        assert_eq!(
            tags("The cat that ate the cheese wants to sleep"),
            vec![Det, Noun, Pron, Verb, Det, Noun, Verb, Part, Verb]
        );
        assert_eq!(tags("There is a cat"), vec![Pron, Verb, Det, Noun]);
        assert_eq!(tags("the cat 's tail"), vec![Det, Noun, Part, Noun]);
        assert_eq!(tags("it 's late"), vec![Pron, Verb, Adj]);
        assert_eq!(tags("does not like her toy"), vec![Verb, Part, Verb, Det, Noun]);
    }

    #[test]
    fn test_lemmas() {
        let words = ["The", "mice", "were", "chased"];
        let tagged = tag_sentence(&words);
        let lemmas: Vec<&str> = tagged.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(lemmas, vec!["the", "mouse", "be", "chase"]);
    }
}
