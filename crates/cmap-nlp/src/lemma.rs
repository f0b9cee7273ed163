//! Rule-based lemmatization
//!
//! Nouns are reduced to their singular form, verbs to their base form.
//! Known irregular forms come from the lexicon; everything else goes
//! through suffix rules.

use serde::{Deserialize, Serialize};

use crate::lexicon::{
    AUXILIARIES, IRREGULAR_NOUNS, IRREGULAR_VERBS, S_SINGULAR_NOUNS, VERBS,
};

/// Inflection of a recognized verb form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerbForm {
    Base,
    ThirdPerson,
    Past,
    Participle,
    PastOrParticiple,
    Gerund,
}

/// Singular form of a lower-cased noun; a trailing possessive clitic is
/// dropped first
pub fn noun_lemma(lower: &str) -> String {
    let lower = strip_possessive(lower);
    if let Some(singular) = IRREGULAR_NOUNS.get(lower) {
        return (*singular).to_string();
    }
    if lower.chars().count() <= 3 || S_SINGULAR_NOUNS.contains(lower) {
        return lower.to_string();
    }

    if let Some(stem) = lower.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = lower.strip_suffix("oes") {
        return format!("{stem}o");
    }
    for suffix in ["sses", "shes", "ches", "xes", "zzes"] {
        if lower.ends_with(suffix) {
            return lower[..lower.len() - 2].to_string();
        }
    }
    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return lower.to_string();
    }
    match lower.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => lower.to_string(),
    }
}

/// "cat's" -> "cat", "cats'" -> "cats"
fn strip_possessive(word: &str) -> &str {
    let stem = ["'s", "\u{2019}s", "'", "\u{2019}"]
        .iter()
        .find_map(|clitic| word.strip_suffix(clitic));
    match stem {
        Some(stem) if !stem.is_empty() => stem,
        _ => word,
    }
}

/// Base form and inflection of a known verb, `None` when the word is not a
/// form of any verb in the lexicon
pub fn verb_base(lower: &str) -> Option<(String, VerbForm)> {
    if let Some(lemma) = AUXILIARIES.get(lower) {
        let form = if lower.ends_with("ing") {
            VerbForm::Gerund
        } else if *lemma == lower {
            VerbForm::Base
        } else {
            VerbForm::ThirdPerson
        };
        return Some(((*lemma).to_string(), form));
    }
    if let Some((lemma, participle)) = IRREGULAR_VERBS.get(lower) {
        let form = if *participle {
            VerbForm::PastOrParticiple
        } else {
            VerbForm::Past
        };
        return Some(((*lemma).to_string(), form));
    }
    if VERBS.contains(lower) {
        return Some((lower.to_string(), VerbForm::Base));
    }

    let known = |candidate: String, form: VerbForm| {
        VERBS
            .contains(candidate.as_str())
            .then_some((candidate, form))
    };

    if let Some(stem) = lower.strip_suffix("ies") {
        return known(format!("{stem}y"), VerbForm::ThirdPerson);
    }
    if let Some(stem) = lower.strip_suffix("ied") {
        return known(format!("{stem}y"), VerbForm::PastOrParticiple);
    }
    if let Some(stem) = lower.strip_suffix("ed") {
        return known(stem.to_string(), VerbForm::PastOrParticiple)
            .or_else(|| known(format!("{stem}e"), VerbForm::PastOrParticiple))
            .or_else(|| known(undouble(stem)?, VerbForm::PastOrParticiple));
    }
    if let Some(stem) = lower.strip_suffix("ing") {
        return known(stem.to_string(), VerbForm::Gerund)
            .or_else(|| known(format!("{stem}e"), VerbForm::Gerund))
            .or_else(|| known(undouble(stem)?, VerbForm::Gerund))
            .or_else(|| known(format!("{}ie", stem.strip_suffix('y')?), VerbForm::Gerund));
    }
    if let Some(stem) = lower.strip_suffix("es") {
        if let Some(found) = known(stem.to_string(), VerbForm::ThirdPerson) {
            return Some(found);
        }
    }
    if !lower.ends_with("ss") {
        if let Some(stem) = lower.strip_suffix('s') {
            return known(stem.to_string(), VerbForm::ThirdPerson);
        }
    }

    None
}

/// Best-effort base form for any verb form, known or not
pub fn verb_lemma(lower: &str) -> String {
    if let Some((base, _)) = verb_base(lower) {
        return base;
    }

    if let Some(stem) = lower.strip_suffix("ied") {
        return format!("{stem}y");
    }
    for suffix in ["ed", "ing"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if stem.len() < 2 {
                break;
            }
            if let Some(single) = undouble(stem) {
                return single;
            }
            if needs_silent_e(stem) {
                return format!("{stem}e");
            }
            return stem.to_string();
        }
    }
    if let Some(stem) = lower.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if !lower.ends_with("ss") {
        if let Some(stem) = lower.strip_suffix('s') {
            return stem.to_string();
        }
    }
    lower.to_string()
}

/// "stopp" -> "stop"; `None` unless the stem ends in a doubled consonant
fn undouble(stem: &str) -> Option<String> {
    let mut chars = stem.chars().rev();
    let last = chars.next()?;
    let before = chars.next()?;
    let doubled = last == before && !"aeioulsfz".contains(last) && last.is_alphabetic();
    doubled.then(|| stem[..stem.len() - last.len_utf8()].to_string())
}

fn needs_silent_e(stem: &str) -> bool {
    ["iz", "is", "at", "v", "c", "g", "u", "bl", "tl", "dl", "ur", "os", "as", "ut"]
        .iter()
        .any(|s| stem.ends_with(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noun_lemma() {
        assert_eq!(noun_lemma("cats"), "cat");
        assert_eq!(noun_lemma("categories"), "category");
        assert_eq!(noun_lemma("approaches"), "approach");
        assert_eq!(noun_lemma("boxes"), "box");
        assert_eq!(noun_lemma("mice"), "mouse");
        assert_eq!(noun_lemma("analysis"), "analysis");
        assert_eq!(noun_lemma("status"), "status");
        assert_eq!(noun_lemma("information"), "information");
        assert_eq!(noun_lemma("gas"), "gas");
        assert_eq!(noun_lemma("heroes"), "hero");
        assert_eq!(noun_lemma("potatoes"), "potato");
        assert_eq!(noun_lemma("shoes"), "shoe");
    }

    #[test]
    fn test_noun_lemma_drops_possessive() {
        assert_eq!(noun_lemma("cat's"), "cat");
        assert_eq!(noun_lemma("researchers'"), "researcher");
        assert_eq!(noun_lemma("model\u{2019}s"), "model");
        assert_eq!(noun_lemma("'s"), "'s");
    }

    #[test]
    fn test_verb_base_known_forms() {
        assert_eq!(verb_base("chased"), Some(("chase".to_string(), VerbForm::PastOrParticiple)));
        assert_eq!(verb_base("chases"), Some(("chase".to_string(), VerbForm::ThirdPerson)));
        assert_eq!(verb_base("running"), Some(("run".to_string(), VerbForm::Gerund)));
        assert_eq!(verb_base("making"), Some(("make".to_string(), VerbForm::Gerund)));
        assert_eq!(verb_base("studies"), Some(("study".to_string(), VerbForm::ThirdPerson)));
        assert_eq!(verb_base("ate"), Some(("eat".to_string(), VerbForm::Past)));
        assert_eq!(verb_base("is"), Some(("be".to_string(), VerbForm::ThirdPerson)));
        assert_eq!(verb_base("cat"), None);
    }

    #[test]
    fn test_verb_lemma_guesses() {
        assert_eq!(verb_lemma("summarized"), "summarize");
        assert_eq!(verb_lemma("aggregated"), "aggregate");
        assert_eq!(verb_lemma("jogged"), "jog");
        assert_eq!(verb_lemma("walked"), "walk");
        assert_eq!(verb_lemma("went"), "go");
    }
}
