//! Heuristic dependency parsing
//!
//! The parser works over items rather than raw tokens: noun phrases from the
//! chunker, verb groups (auxiliaries, adverbs and particles around a main
//! verb) and single function words. Each verb group is classified as a
//! clause type, then subjects, objects and prepositions are attached by
//! position relative to the groups. Every token ends up with exactly one
//! head inside its sentence; the root points at itself.

use crate::doc::{DepRel, PosTag};
use crate::lemma::{verb_base, VerbForm};
use crate::lexicon::{
    is_auxiliary, is_be_form, is_copula, is_past_participle, NEGATIONS, POSSESSIVE_DETERMINERS,
    RELATIVIZERS,
};

/// Past participles, including regular forms too short for the suffix rule
fn is_participle(lower: &str) -> bool {
    is_past_participle(lower)
        || matches!(
            verb_base(lower),
            Some((_, VerbForm::PastOrParticiple | VerbForm::Participle))
        )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemKind {
    Noun,
    Verb,
    Adp,
    Cconj,
    Sconj,
    Rel,
    Punct,
    Other,
}

#[derive(Debug, Clone, Copy)]
struct Item {
    kind: ItemKind,
    start: usize,
    end: usize,
    /// Head token of the item
    head: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clause {
    Main,
    Conj,
    Advcl,
    Ccomp,
    Relcl,
    Pcomp,
    Xcomp,
    Acl,
}

impl Clause {
    fn relation(&self) -> DepRel {
        match self {
            Clause::Main => DepRel::Root,
            Clause::Conj => DepRel::Conj,
            Clause::Advcl => DepRel::Advcl,
            Clause::Ccomp => DepRel::Ccomp,
            Clause::Relcl => DepRel::Relcl,
            Clause::Pcomp => DepRel::Pcomp,
            Clause::Xcomp => DepRel::Xcomp,
            Clause::Acl => DepRel::Acl,
        }
    }
}

#[derive(Debug, Clone)]
struct Group {
    /// Index into the item list
    item: usize,
    main: usize,
    passive: bool,
    clause: Clause,
    /// Token the clause attaches to; `None` means the sentence root
    governor: Option<usize>,
    /// Function words introducing the clause with their role
    markers: Vec<(usize, usize, DepRel)>,
    acl_candidate: bool,
}

/// Parse one sentence
///
/// All slices are sentence-local and of equal length; `chunks` are the
/// noun phrase ranges from the chunker. Returns a sentence-local head and a
/// relation per token.
pub fn parse_sentence(
    tags: &[PosTag],
    lowers: &[String],
    lemmas: &[String],
    chunks: &[(usize, usize)],
) -> Vec<(usize, DepRel)> {
    if tags.is_empty() {
        return Vec::new();
    }

    let mut parser = Parser {
        tags,
        lowers,
        lemmas,
        heads: vec![None; tags.len()],
        root: 0,
    };
    let items = parser.build_items(chunks);
    let mut groups = parser.build_groups(&items);
    parser.classify(&items, &mut groups);
    parser.root = parser.choose_root(&items, &mut groups);

    for item in &items {
        match item.kind {
            ItemKind::Noun => parser.attach_noun_phrase(item),
            ItemKind::Verb => parser.attach_verb_group(item),
            _ => {}
        }
    }
    parser.attach_clauses(&groups);
    parser.attach_coordination(&items, &groups);
    parser.attach_objects(&items, &groups);
    parser.attach_subjects(&items, &groups);
    parser.attach_prepositions(&items, &groups);
    parser.attach_leftovers();

    let root = parser.root;
    parser
        .heads
        .into_iter()
        .enumerate()
        .map(|(i, arc)| match arc {
            Some(arc) => arc,
            None => (root, if i == root { DepRel::Root } else { DepRel::Dep }),
        })
        .collect()
}

struct Parser<'a> {
    tags: &'a [PosTag],
    lowers: &'a [String],
    lemmas: &'a [String],
    heads: Vec<Option<(usize, DepRel)>>,
    root: usize,
}

impl<'a> Parser<'a> {
    fn attach(&mut self, child: usize, head: usize, rel: DepRel) -> bool {
        if child == head || child == self.root || self.heads[child].is_some() {
            return false;
        }
        self.heads[child] = Some((head, rel));
        true
    }

    fn rel_of(&self, token: usize) -> Option<DepRel> {
        self.heads[token].map(|(_, rel)| rel)
    }

    fn is_assigned(&self, token: usize) -> bool {
        token == self.root || self.heads[token].is_some()
    }

    // ========================================================================
    // Items
    // ========================================================================

    fn build_items(&self, chunks: &[(usize, usize)]) -> Vec<Item> {
        let n = self.tags.len();
        let chunk_at = |i: usize| chunks.iter().find(|(s, _)| *s == i).copied();
        let mut items = Vec::new();
        let mut i = 0;

        while i < n {
            if let Some((start, end)) = chunk_at(i) {
                let head = (start..end)
                    .rev()
                    .find(|&t| self.tags[t].is_nominal() || self.tags[t] == PosTag::Pron)
                    .unwrap_or(end - 1);
                items.push(Item { kind: ItemKind::Noun, start, end, head });
                i = end;
                continue;
            }

            let starts_group = match self.tags[i] {
                PosTag::Verb | PosTag::Aux => true,
                PosTag::Adv | PosTag::Part => self.run_reaches_verb(i, &chunk_at),
                _ => false,
            };
            if starts_group {
                let end = self.group_end(i, &chunk_at);
                let main = (i..end)
                    .rev()
                    .find(|&t| self.tags[t].is_verbal())
                    .unwrap_or(end - 1);
                items.push(Item { kind: ItemKind::Verb, start: i, end, head: main });
                i = end;
                continue;
            }

            let kind = match self.tags[i] {
                PosTag::Adp => ItemKind::Adp,
                PosTag::Cconj => ItemKind::Cconj,
                PosTag::Sconj => ItemKind::Sconj,
                PosTag::Pron if RELATIVIZERS.contains(self.lowers[i].as_str()) => ItemKind::Rel,
                PosTag::Punct => ItemKind::Punct,
                _ => ItemKind::Other,
            };
            items.push(Item { kind, start: i, end: i + 1, head: i });
            i += 1;
        }

        items
    }

    fn is_possessive_marker(&self, t: usize) -> bool {
        matches!(self.lowers[t].as_str(), "'s" | "’s") && self.tags[t] == PosTag::Part
    }

    fn is_group_token(&self, t: usize) -> bool {
        matches!(self.tags[t], PosTag::Verb | PosTag::Aux | PosTag::Adv | PosTag::Part)
            && !self.is_possessive_marker(t)
    }

    fn run_reaches_verb(&self, i: usize, chunk_at: &impl Fn(usize) -> Option<(usize, usize)>) -> bool {
        let mut j = i;
        while j < self.tags.len()
            && chunk_at(j).is_none()
            && matches!(self.tags[j], PosTag::Adv | PosTag::Part)
            && !self.is_possessive_marker(j)
        {
            j += 1;
        }
        j < self.tags.len() && chunk_at(j).is_none() && self.tags[j].is_verbal()
    }

    fn group_end(&self, start: usize, chunk_at: &impl Fn(usize) -> Option<(usize, usize)>) -> usize {
        let mut has_verb = false;
        let mut last_verb_is_aux = false;
        let mut j = start;

        while j < self.tags.len() && chunk_at(j).is_none() && self.is_group_token(j) {
            let lower = self.lowers[j].as_str();
            if self.tags[j] == PosTag::Part && lower == "to" && has_verb {
                break;
            }
            if self.tags[j].is_verbal() {
                if has_verb && !last_verb_is_aux {
                    break;
                }
                has_verb = true;
                last_verb_is_aux = is_auxiliary(lower);
            } else if !has_verb && !self.run_reaches_verb(j, chunk_at) {
                break;
            }
            j += 1;
        }

        j.max(start + 1)
    }

    // ========================================================================
    // Clauses
    // ========================================================================

    fn is_passive(&self, item: &Item) -> bool {
        is_participle(&self.lowers[item.head])
            && (item.start..item.head).any(|t| self.tags[t].is_verbal() && is_be_form(&self.lowers[t]))
    }

    fn is_single_participle(&self, item: &Item) -> bool {
        let lower = self.lowers[item.head].as_str();
        item.end - item.start == 1
            && (is_participle(lower) || lower.ends_with("ing"))
    }

    /// Noun phrase item a relativizer refers back to, across an optional comma
    fn antecedent_of(&self, items: &[Item], rel: usize) -> Option<usize> {
        let mut p = rel.checked_sub(1)?;
        if items[p].kind == ItemKind::Punct && self.lowers[items[p].head] == "," {
            p = p.checked_sub(1)?;
        }
        (items[p].kind == ItemKind::Noun).then_some(p)
    }

    fn build_groups(&self, items: &[Item]) -> Vec<Group> {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.kind == ItemKind::Verb)
            .map(|(k, item)| Group {
                item: k,
                main: item.head,
                passive: self.is_passive(item),
                clause: Clause::Main,
                governor: None,
                markers: Vec::new(),
                acl_candidate: false,
            })
            .collect()
    }

    fn classify(&self, items: &[Item], groups: &mut [Group]) {
        for gi in 0..groups.len() {
            let k = groups[gi].item;
            let main = groups[gi].main;
            let prev_group = gi.checked_sub(1).map(|p| (groups[p].item, groups[p].main, groups[p].clause, groups[p].governor));
            let boundary = prev_group.map(|(pk, ..)| pk + 1).unwrap_or(0);
            let kind_at = |p: Option<usize>| p.map(|p| items[p].kind);

            // Relative clause: NP (,) which VERB / NP that NP VERB
            let before = k.checked_sub(1);
            let antecedent = before
                .filter(|&b| items[b].kind == ItemKind::Rel)
                .and_then(|b| self.antecedent_of(items, b).map(|noun| (b, noun)));
            if let Some((b, noun)) = antecedent {
                let group = &mut groups[gi];
                group.clause = Clause::Relcl;
                group.governor = Some(items[noun].head);
                let rel = if group.passive { DepRel::Nsubjpass } else { DepRel::Nsubj };
                group.markers.push((items[b].head, main, rel));
                continue;
            }
            if kind_at(before) == Some(ItemKind::Noun) && k >= 3 {
                if items[k - 2].kind == ItemKind::Rel && items[k - 3].kind == ItemKind::Noun {
                    let subject_rel = if groups[gi].passive { DepRel::Nsubjpass } else { DepRel::Nsubj };
                    let group = &mut groups[gi];
                    group.clause = Clause::Relcl;
                    group.governor = Some(items[k - 3].head);
                    group.markers.push((items[k - 2].head, main, DepRel::Dobj));
                    group.markers.push((items[k - 1].head, main, subject_rel));
                    continue;
                }
            }

            // Subordinate clause: SCONJ (NP) VERB
            let intro = (boundary..k).rev().find(|&p| {
                !matches!(items[p].kind, ItemKind::Noun | ItemKind::Other)
            });
            if let Some(p) = intro.filter(|&p| items[p].kind == ItemKind::Sconj) {
                let mark = items[p].head;
                let group = &mut groups[gi];
                group.clause = match self.lowers[mark].as_str() {
                    "that" | "whether" | "if" if prev_group.is_some() => Clause::Ccomp,
                    _ => Clause::Advcl,
                };
                group.governor = prev_group.map(|(_, pmain, ..)| pmain);
                group.markers.push((mark, main, DepRel::Mark));
                continue;
            }

            // Prepositional complement: ADP VERB-ing
            if kind_at(before) == Some(ItemKind::Adp) && self.lowers[main].ends_with("ing") {
                let adp = before.map(|b| items[b].head);
                let group = &mut groups[gi];
                group.clause = Clause::Pcomp;
                group.governor = adp;
                continue;
            }

            // Infinitival complement: VERB to VERB
            let starts_with_to = self.tags[items[k].start] == PosTag::Part
                && self.lowers[items[k].start] == "to";
            if starts_with_to {
                let group = &mut groups[gi];
                match prev_group {
                    Some((_, pmain, ..)) => {
                        group.clause = Clause::Xcomp;
                        group.governor = Some(pmain);
                    }
                    None => group.clause = Clause::Advcl,
                }
                continue;
            }

            // Coordinated clause: VERB ... CCONJ (NP) VERB
            if let Some((pk, pmain, pclause, pgovernor)) = prev_group {
                let cconj = (pk + 1..k).find(|&p| items[p].kind == ItemKind::Cconj);
                if let Some(c) = cconj {
                    let first = if pclause == Clause::Conj { pgovernor.unwrap_or(pmain) } else { pmain };
                    let group = &mut groups[gi];
                    group.clause = Clause::Conj;
                    group.governor = Some(first);
                    group.markers.push((items[c].head, first, DepRel::Cc));
                    continue;
                }
            }

            if kind_at(before) == Some(ItemKind::Noun) && self.is_single_participle(&items[k]) {
                let group = &mut groups[gi];
                group.acl_candidate = true;
                group.governor = before.map(|b| items[b].head);
            }
        }

        // A bare participle after a noun modifies it when a finite clause follows
        for gi in 0..groups.len() {
            if !groups[gi].acl_candidate || groups[gi].clause != Clause::Main {
                continue;
            }
            let later_main = groups[gi + 1..]
                .iter()
                .any(|g| g.clause == Clause::Main && !g.acl_candidate);
            if later_main {
                groups[gi].clause = Clause::Acl;
            } else {
                groups[gi].acl_candidate = false;
                groups[gi].governor = None;
            }
        }
    }

    fn choose_root(&self, items: &[Item], groups: &mut [Group]) -> usize {
        if let Some(g) = groups.iter().find(|g| g.clause == Clause::Main) {
            return g.main;
        }
        if let Some(first) = groups.first_mut() {
            first.clause = Clause::Main;
            first.governor = None;
            first.markers.retain(|(_, _, rel)| *rel == DepRel::Mark);
            return first.main;
        }
        items
            .iter()
            .find(|item| item.kind == ItemKind::Noun)
            .map(|item| item.head)
            .unwrap_or(0)
    }

    // ========================================================================
    // Attachment
    // ========================================================================

    fn modifier_relation(&self, t: usize) -> DepRel {
        match self.tags[t] {
            PosTag::Det if POSSESSIVE_DETERMINERS.contains(self.lowers[t].as_str()) => DepRel::Poss,
            PosTag::Det => DepRel::Det,
            PosTag::Adj => DepRel::Amod,
            PosTag::Num => DepRel::Nummod,
            PosTag::Noun | PosTag::Propn => DepRel::Compound,
            PosTag::Adv => DepRel::Advmod,
            _ => DepRel::Dep,
        }
    }

    fn attach_modifiers(&mut self, from: usize, to: usize, head: usize) {
        for t in from..to {
            if t != head {
                let rel = self.modifier_relation(t);
                self.attach(t, head, rel);
            }
        }
    }

    fn attach_noun_phrase(&mut self, item: &Item) {
        let marker = (item.start..item.head).find(|&t| self.is_possessive_marker(t));
        let owner = marker.and_then(|p| {
            (item.start..p)
                .rev()
                .find(|&t| self.tags[t].is_nominal() || self.tags[t] == PosTag::Pron)
                .map(|owner| (p, owner))
        });

        match owner {
            Some((p, owner)) => {
                self.attach_modifiers(item.start, p, owner);
                self.attach(p, owner, DepRel::Case);
                self.attach(owner, item.head, DepRel::Poss);
                self.attach_modifiers(p + 1, item.end, item.head);
            }
            None => self.attach_modifiers(item.start, item.end, item.head),
        }
    }

    fn attach_verb_group(&mut self, item: &Item) {
        let main = item.head;
        let participle = is_participle(&self.lowers[main]);

        for t in item.start..item.end {
            if t == main {
                continue;
            }
            let lower = self.lowers[t].as_str();
            let rel = match self.tags[t] {
                PosTag::Verb | PosTag::Aux if t < main && participle && is_be_form(lower) => {
                    DepRel::Auxpass
                }
                PosTag::Verb | PosTag::Aux => DepRel::Aux,
                PosTag::Part if NEGATIONS.contains(lower) => DepRel::Neg,
                PosTag::Part => DepRel::Aux,
                PosTag::Adv => DepRel::Advmod,
                _ => DepRel::Dep,
            };
            self.attach(t, main, rel);
        }
    }

    fn attach_clauses(&mut self, groups: &[Group]) {
        let root = self.root;
        for group in groups {
            for &(token, head, rel) in &group.markers {
                self.attach(token, head, rel);
            }
            if group.main == root {
                continue;
            }
            let (head, rel) = match (group.clause, group.governor) {
                (Clause::Main, _) if group.main > root => (root, DepRel::Ccomp),
                (Clause::Main, _) => (root, DepRel::Advcl),
                (clause, Some(governor)) => (governor, clause.relation()),
                (clause, None) => (root, clause.relation()),
            };
            self.attach(group.main, head, rel);
        }
    }

    /// NP and NP, NP, NP and NP, and NP, NP, appositions
    fn attach_coordination(&mut self, items: &[Item], groups: &[Group]) {
        let first_group_item = groups.first().map(|g| g.item);

        for k in 0..items.len() {
            if items[k].kind != ItemKind::Noun || self.rel_of(items[k].head) == Some(DepRel::Conj) {
                continue;
            }

            // Collect "NP , NP , ..." then an optional "CCONJ NP"
            let mut members = vec![k];
            let mut p = k;
            while p + 2 < items.len()
                && items[p + 1].kind == ItemKind::Punct
                && self.lowers[items[p + 1].head] == ","
                && items[p + 2].kind == ItemKind::Noun
            {
                p += 2;
                members.push(p);
            }

            let clause_follows = |q: usize| items.get(q + 1).map(|i| i.kind) == Some(ItemKind::Verb);
            let mut cconj = None;
            let mut tail = p;
            if p + 1 < items.len() && items[p + 1].kind == ItemKind::Punct && p + 2 < items.len()
                && items[p + 2].kind == ItemKind::Cconj
            {
                tail = p + 1;
            }
            if tail + 2 < items.len()
                && items[tail + 1].kind == ItemKind::Cconj
                && items[tail + 2].kind == ItemKind::Noun
            {
                let group_before = first_group_item.map(|g| g < k).unwrap_or(false);
                if !(group_before && clause_follows(tail + 2)) {
                    cconj = Some(items[tail + 1].head);
                    members.push(tail + 2);
                }
            }

            let first = items[k].head;
            if cconj.is_some() {
                for &m in &members[1..] {
                    self.attach(items[m].head, first, DepRel::Conj);
                }
                if let Some(c) = cconj {
                    self.attach(c, first, DepRel::Cc);
                }
                continue;
            }

            // "the cat , a tabby ," reads as an apposition
            let closed_by_comma = members.len() == 2
                && items.get(p + 1).map(|i| i.kind) == Some(ItemKind::Punct)
                && items
                    .get(p + 1)
                    .map(|i| self.lowers[i.head] == ",")
                    .unwrap_or(false);
            let after_adp = k > 0 && items[k - 1].kind == ItemKind::Adp;
            if closed_by_comma && !after_adp {
                self.attach(items[members[1]].head, first, DepRel::Appos);
            }
        }
    }

    fn attach_objects(&mut self, items: &[Item], groups: &[Group]) {
        for group in groups {
            let main = group.main;
            let copula = is_copula(&self.lemmas[main]);
            let Some(next) = items.get(group.item + 1) else {
                continue;
            };

            match next.kind {
                ItemKind::Noun if !self.is_assigned(next.head) => {
                    if copula {
                        self.attach(next.head, main, DepRel::Attr);
                        continue;
                    }
                    let second = items
                        .get(group.item + 2)
                        .filter(|i| i.kind == ItemKind::Noun && !self.is_assigned(i.head))
                        .copied();
                    match second {
                        Some(second) => {
                            self.attach(next.head, main, DepRel::Dative);
                            self.attach(second.head, main, DepRel::Dobj);
                        }
                        None => {
                            self.attach(next.head, main, DepRel::Dobj);
                            let predicate = items
                                .get(group.item + 2)
                                .filter(|i| i.kind == ItemKind::Other && self.tags[i.head] == PosTag::Adj);
                            if let Some(adj) = predicate {
                                self.attach(adj.head, main, DepRel::Oprd);
                            }
                        }
                    }
                }
                ItemKind::Other if self.tags[next.head] == PosTag::Adj => {
                    self.attach(next.head, main, DepRel::Acomp);
                }
                _ => {}
            }
        }
    }

    fn attach_subjects(&mut self, items: &[Item], groups: &[Group]) {
        for (gi, group) in groups.iter().enumerate() {
            if matches!(
                group.clause,
                Clause::Relcl | Clause::Xcomp | Clause::Pcomp | Clause::Acl
            ) {
                continue;
            }
            let subject_rel = if group.passive { DepRel::Nsubjpass } else { DepRel::Nsubj };

            let mut found = None;
            for p in (0..group.item).rev() {
                let item = items[p];
                match item.kind {
                    ItemKind::Noun => {
                        let after_adp = p > 0 && items[p - 1].kind == ItemKind::Adp;
                        if !self.is_assigned(item.head) && !after_adp {
                            found = Some((item.head, subject_rel));
                            break;
                        }
                    }
                    ItemKind::Other if self.lowers[item.head] == "there" && self.tags[item.head] == PosTag::Pron => {
                        found = Some((item.head, DepRel::Expl));
                        break;
                    }
                    ItemKind::Other | ItemKind::Adp | ItemKind::Punct => {}
                    ItemKind::Cconj if group.clause != Clause::Conj => {}
                    ItemKind::Cconj | ItemKind::Verb | ItemKind::Sconj | ItemKind::Rel => break,
                }
            }

            match found {
                Some((token, rel)) => {
                    self.attach(token, group.main, rel);
                }
                None if group.clause != Clause::Conj => {
                    // Subject shared with a noun modified by the preceding clause
                    let modified = gi
                        .checked_sub(1)
                        .map(|p| &groups[p])
                        .filter(|g| matches!(g.clause, Clause::Relcl | Clause::Acl))
                        .and_then(|g| g.governor);
                    if let Some(noun) = modified {
                        self.attach(noun, group.main, subject_rel);
                    }
                }
                None => {}
            }
        }
    }

    fn attach_prepositions(&mut self, items: &[Item], groups: &[Group]) {
        let root = self.root;
        for k in 0..items.len() {
            if items[k].kind != ItemKind::Adp {
                continue;
            }
            let adp = items[k].head;
            let lower = self.lowers[adp].as_str();

            let (head, rel) = match k.checked_sub(1).map(|p| items[p]) {
                Some(prev) if prev.kind == ItemKind::Noun => {
                    let governor = match self.heads[prev.head] {
                        Some((verb, DepRel::Dobj | DepRel::Attr | DepRel::Dative)) if lower != "of" => verb,
                        _ => prev.head,
                    };
                    (governor, DepRel::Prep)
                }
                Some(prev) if prev.kind == ItemKind::Verb => {
                    let passive = groups
                        .iter()
                        .any(|g| g.item == k - 1 && g.passive);
                    let rel = if passive && lower == "by" { DepRel::Agent } else { DepRel::Prep };
                    (prev.head, rel)
                }
                Some(prev) if prev.kind == ItemKind::Other && self.tags[prev.head] == PosTag::Adj => {
                    (prev.head, DepRel::Prep)
                }
                Some(prev) if prev.kind == ItemKind::Adp => (prev.head, DepRel::Prep),
                _ => (root, DepRel::Prep),
            };
            self.attach(adp, head, rel);

            if let Some(object) = items.get(k + 1).filter(|i| i.kind == ItemKind::Noun) {
                self.attach(object.head, adp, DepRel::Pobj);
            }
        }
    }

    fn attach_leftovers(&mut self) {
        let root = self.root;
        for t in 0..self.tags.len() {
            if self.is_assigned(t) {
                continue;
            }
            let rel = match self.tags[t] {
                PosTag::Punct => DepRel::Punct,
                PosTag::Cconj => DepRel::Cc,
                PosTag::Sconj => DepRel::Mark,
                PosTag::Adv => DepRel::Advmod,
                PosTag::Adj => DepRel::Acomp,
                _ => DepRel::Dep,
            };
            self.attach(t, root, rel);
        }
        self.heads[root] = Some((root, DepRel::Root));
    }
}
