//! English lexicon for the rule-based model
//!
//! Closed-class word lists, a core verb vocabulary with irregular forms,
//! common adjectives, and the gender/animacy noun lists used by the
//! coreference resolver.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

fn set(words: &'static [&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

// ============================================================================
// Closed Classes
// ============================================================================

pub static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "a", "an", "the", "this", "these", "those", "each", "every", "some", "any", "no",
        "all", "both", "either", "neither", "another", "whose",
    ])
});

pub static POSSESSIVE_DETERMINERS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["my", "your", "his", "her", "its", "our", "their"]));

pub static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "yourselves", "themselves",
        "mine", "yours", "hers", "ours", "theirs", "someone", "somebody", "something", "anyone",
        "anybody", "anything", "everyone", "everybody", "everything", "nobody", "nothing",
        "none", "who", "whom", "whoever", "whatever",
    ])
});

/// Pronouns that open a relative clause
pub static RELATIVIZERS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["who", "whom", "which", "that"]));

pub static ADPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "of", "in", "on", "at", "by", "for", "with", "from", "into", "onto", "about", "over",
        "under", "between", "through", "during", "without", "within", "across", "against",
        "among", "amongst", "around", "behind", "beyond", "toward", "towards", "upon", "via",
        "per", "despite", "throughout", "along", "inside", "outside", "near", "beside",
        "besides", "beneath", "below", "above", "after", "before", "since", "until", "till",
        "unlike", "except", "off", "up", "down", "out", "than", "as", "like",
    ])
});

pub static COORDINATORS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["and", "or", "but", "nor", "&"]));

pub static SUBORDINATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "because", "although", "though", "while", "whereas", "if", "unless", "whether",
    ])
});

pub static ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "also", "very", "too", "so", "then", "here", "now", "still", "even", "already", "just",
        "only", "always", "never", "often", "sometimes", "soon", "again", "ever", "yet",
        "however", "thus", "therefore", "moreover", "furthermore", "hence", "instead",
        "rather", "quite", "almost", "perhaps", "maybe", "well", "together", "away", "back",
        "forward", "further", "later", "ago", "else", "otherwise", "meanwhile",
        "nevertheless", "nonetheless", "indeed", "where", "when", "why", "how", "anyway",
        "everywhere", "somewhere", "anywhere", "nowhere", "elsewhere", "once", "respectively",
    ])
});

/// Words ending in -ly that are not adverbs
pub static LY_NON_ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "family", "supply", "apply", "reply", "rely", "ally", "fly", "july", "italy", "belly",
        "assembly", "anomaly", "monopoly", "butterfly", "holy", "ugly", "friendly", "likely",
        "lovely", "lonely", "early", "daily", "weekly", "monthly", "yearly", "only", "jelly",
        "bully", "lily", "rally", "tally", "comply", "multiply", "imply", "homily", "silly",
        "costly", "elderly", "orderly", "timely", "curly", "oily", "hilly", "melancholy",
    ])
});

pub static NUMBER_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
        "eighteen", "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy",
        "eighty", "ninety", "hundred", "thousand", "million", "billion", "dozen",
    ])
});

pub static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| set(&["not", "n't", "n’t"]));

// ============================================================================
// Verbs
// ============================================================================

/// Forms of "be", including clitics
pub static BE_FORMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "be", "am", "is", "are", "was", "were", "been", "being", "'re", "'m", "’re", "’m",
    ])
});

/// Auxiliaries and modals, tagged VERB like any other verb form
pub static AUXILIARIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("be", "be"), ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
        ("been", "be"), ("being", "be"), ("'re", "be"), ("'m", "be"), ("’re", "be"),
        ("’m", "be"), ("have", "have"), ("has", "have"), ("had", "have"), ("having", "have"),
        ("'ve", "have"), ("’ve", "have"), ("'d", "would"), ("’d", "would"), ("do", "do"),
        ("does", "do"), ("did", "do"), ("doing", "do"), ("done", "do"), ("can", "can"),
        ("ca", "can"), ("could", "could"), ("will", "will"), ("wo", "will"), ("'ll", "will"),
        ("’ll", "will"), ("would", "would"), ("shall", "shall"), ("should", "should"),
        ("may", "may"), ("might", "might"), ("must", "must"), ("ought", "ought"),
    ]
    .into_iter()
    .collect()
});

/// Lemmas that only ever act as auxiliaries or modals
pub static AUXILIARY_LEMMAS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "be", "have", "do", "can", "could", "will", "would", "shall", "should", "may", "might",
        "must", "ought",
    ])
});

/// Verbs that take a subject complement
pub static COPULAS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["be", "become", "seem", "remain", "appear"]));

/// Base forms of the core verb vocabulary
pub static VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "accept", "achieve", "acquire", "add", "affect", "agree", "aim", "allow", "analyse",
        "analyze", "answer", "appear", "apply", "argue", "arrive", "ask", "assess", "assume",
        "attack", "attempt", "avoid", "bark", "base", "become", "begin", "believe", "belong",
        "bite", "break", "bring", "build", "buy", "call", "carry", "catch", "cause", "change",
        "chase", "check", "choose", "claim", "classify", "climb", "close", "collect",
        "combine", "come", "compare", "complete", "compute", "concern", "conclude", "conduct",
        "connect", "consider", "consist", "constitute", "contain", "continue", "contribute",
        "control", "cover", "create", "cut", "deal", "decide", "define", "deliver",
        "demonstrate", "depend", "derive", "describe", "design", "destroy", "determine",
        "develop", "differ", "direct", "discover", "discuss", "display", "divide", "draw",
        "drink", "drive", "eat", "emerge", "employ", "enable", "encourage", "enhance",
        "ensure", "enter", "establish", "estimate", "evaluate", "examine", "exist", "expect",
        "explain", "explore", "express", "extend", "extract", "face", "fail", "fall", "feed",
        "feel", "fight", "fill", "find", "fly", "focus", "follow", "forget", "form", "found",
        "gather", "generate", "get", "give", "go", "group", "grow", "handle", "happen", "hate",
        "hear", "help", "hide", "hire", "hit", "hold", "hunt", "identify", "illustrate",
        "implement", "imply", "improve", "include", "increase", "indicate", "influence",
        "inform", "integrate", "intend", "introduce", "invent", "investigate", "involve",
        "join", "jump", "keep", "kill", "know", "lack", "lay", "lead", "learn", "leave", "let",
        "lie", "like", "limit", "link", "live", "look", "lose", "love", "maintain", "make",
        "manage", "map", "marry", "match", "mean", "measure", "meet", "mention", "move",
        "need", "note", "observe", "obtain", "occur", "offer", "open", "operate", "organize",
        "own", "pay", "perform", "place", "plan", "play", "point", "prefer", "prepare",
        "present", "prevent", "process", "produce", "propose", "protect", "prove", "provide",
        "publish", "pull", "push", "put", "reach", "read", "receive", "recognize", "record",
        "reduce", "refer", "reflect", "relate", "rely", "remain", "remember", "remove",
        "replace", "report", "represent", "require", "resolve", "respond", "result", "return",
        "reveal", "rise", "run", "say", "see", "seek", "seem", "select", "sell", "send",
        "serve", "set", "share", "show", "sing", "sit", "sleep", "solve", "speak", "specify",
        "spend", "stand", "start", "state", "stay", "stop", "study", "submit", "suggest",
        "summarize", "support", "suppose", "swim", "take", "talk", "teach", "tell", "tend",
        "test", "think", "throw", "train", "transform", "treat", "try", "turn", "understand",
        "use", "utilize", "vary", "visit", "walk", "want", "watch", "wear", "win", "work",
        "write",
    ])
});

/// Irregular verb forms: form -> (lemma, is past participle)
pub static IRREGULAR_VERBS: Lazy<HashMap<&'static str, (&'static str, bool)>> = Lazy::new(|| {
    let table: &[(&str, &[&str], &[&str])] = &[
        // (lemma, past forms, past participles)
        ("go", &["went"], &["gone"]),
        ("make", &["made"], &["made"]),
        ("take", &["took"], &["taken"]),
        ("give", &["gave"], &["given"]),
        ("get", &["got"], &["got", "gotten"]),
        ("see", &["saw"], &["seen"]),
        ("come", &["came"], &[]),
        ("know", &["knew"], &["known"]),
        ("think", &["thought"], &["thought"]),
        ("find", &["found"], &["found"]),
        ("tell", &["told"], &["told"]),
        ("say", &["said"], &["said"]),
        ("become", &["became"], &[]),
        ("leave", &["left"], &["left"]),
        ("feel", &["felt"], &["felt"]),
        ("bring", &["brought"], &["brought"]),
        ("begin", &["began"], &["begun"]),
        ("keep", &["kept"], &["kept"]),
        ("hold", &["held"], &["held"]),
        ("write", &["wrote"], &["written"]),
        ("stand", &["stood"], &["stood"]),
        ("hear", &["heard"], &["heard"]),
        ("mean", &["meant"], &["meant"]),
        ("meet", &["met"], &["met"]),
        ("run", &["ran"], &[]),
        ("pay", &["paid"], &["paid"]),
        ("sit", &["sat"], &["sat"]),
        ("speak", &["spoke"], &["spoken"]),
        ("lead", &["led"], &["led"]),
        ("grow", &["grew"], &["grown"]),
        ("lose", &["lost"], &["lost"]),
        ("fall", &["fell"], &["fallen"]),
        ("send", &["sent"], &["sent"]),
        ("build", &["built"], &["built"]),
        ("understand", &["understood"], &["understood"]),
        ("draw", &["drew"], &["drawn"]),
        ("break", &["broke"], &["broken"]),
        ("spend", &["spent"], &["spent"]),
        ("rise", &["rose"], &["risen"]),
        ("drive", &["drove"], &["driven"]),
        ("buy", &["bought"], &["bought"]),
        ("wear", &["wore"], &["worn"]),
        ("choose", &["chose"], &["chosen"]),
        ("seek", &["sought"], &["sought"]),
        ("throw", &["threw"], &["thrown"]),
        ("catch", &["caught"], &["caught"]),
        ("deal", &["dealt"], &["dealt"]),
        ("win", &["won"], &["won"]),
        ("forget", &["forgot"], &["forgotten"]),
        ("eat", &["ate"], &["eaten"]),
        ("teach", &["taught"], &["taught"]),
        ("sell", &["sold"], &["sold"]),
        ("fly", &["flew"], &["flown"]),
        ("blow", &["blew"], &["blown"]),
        ("show", &[], &["shown"]),
        ("hide", &["hid"], &["hidden"]),
        ("bite", &[], &["bitten"]),
        ("swim", &["swam"], &["swum"]),
        ("drink", &["drank"], &["drunk"]),
        ("sing", &["sang"], &["sung"]),
        ("sleep", &["slept"], &["slept"]),
        ("feed", &["fed"], &["fed"]),
        ("fight", &["fought"], &["fought"]),
        ("lie", &["lay"], &["lain"]),
        ("lay", &["laid"], &["laid"]),
    ];

    let mut forms = HashMap::new();
    for (lemma, pasts, participles) in table {
        for past in pasts.iter() {
            forms.insert(*past, (*lemma, participles.contains(past)));
        }
        for participle in participles.iter() {
            forms.insert(*participle, (*lemma, true));
        }
    }
    forms
});

/// -ed words that are not verb forms
pub static ED_NON_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "bed", "red", "seed", "need", "speed", "feed", "hundred", "shed", "sled", "bred",
        "indeed", "sacred", "naked", "wicked", "kindred", "weed", "greed", "breed", "creed",
        "steed", "reed", "deed", "embed", "shred", "wed",
    ])
});

/// -ing words that are not verb forms
pub static ING_NON_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "thing", "king", "ring", "sing", "bring", "spring", "string", "nothing", "something",
        "anything", "everything", "morning", "evening", "ceiling", "during", "wing", "swing",
        "sling", "sting", "cling", "fling", "wring", "ping", "ding", "bling", "viking",
        "pudding", "lightning", "wedding",
    ])
});

// ============================================================================
// Nouns and Adjectives
// ============================================================================

pub static ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "good", "new", "first", "last", "long", "great", "little", "own", "other", "old",
        "right", "big", "high", "different", "small", "large", "next", "early", "young",
        "important", "few", "many", "much", "several", "public", "bad", "same", "able", "late",
        "hard", "major", "better", "best", "free", "sure", "clear", "full", "special", "easy",
        "whole", "strong", "certain", "real", "low", "possible", "recent", "similar",
        "various", "main", "common", "simple", "general", "specific", "single", "key",
        "future", "previous", "current", "fast", "slow", "quick", "red", "blue", "green",
        "black", "white", "brown", "grey", "gray", "yellow", "tiny", "huge", "happy", "sad",
        "hungry", "lazy", "smart", "useful", "relevant", "additional", "more", "most", "less",
        "least", "such", "entire", "human", "social", "natural", "wild", "domestic", "cute",
        "angry", "brave", "quiet", "loud", "dark", "bright", "hot", "cold", "warm", "cool",
        "deep", "wide", "narrow", "short", "tall", "heavy", "light", "rich", "poor", "safe",
        "open", "true", "false", "likely", "unlikely", "friendly", "lovely", "daily",
    ])
});

/// Suffixes that mark an unknown word as an adjective
pub const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "al", "ic", "ical", "less", "ish",
];

pub static MASCULINE_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "man", "boy", "father", "son", "brother", "husband", "king", "prince", "uncle",
        "nephew", "grandfather", "gentleman", "sir", "lord", "monk", "actor", "waiter",
    ])
});

pub static FEMININE_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "woman", "girl", "mother", "daughter", "sister", "wife", "queen", "princess", "aunt",
        "niece", "grandmother", "lady", "madam", "nun", "actress", "waitress",
    ])
});

/// Nouns denoting people, either gender
pub static PERSON_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "person", "people", "child", "student", "teacher", "author", "researcher", "scientist",
        "doctor", "engineer", "writer", "user", "customer", "employee", "manager", "worker",
        "player", "friend", "parent", "baby", "kid", "adult", "citizen", "leader",
        "president", "professor", "developer", "founder", "owner", "member", "colleague",
        "partner", "client", "patient", "farmer", "artist", "officer", "student", "reader",
        "speaker", "expert", "analyst", "judge", "lawyer", "nurse", "ceo", "director",
    ])
});

/// Mass and plural-form nouns that read as singular despite ending in -s
pub static S_SINGULAR_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "news", "physics", "mathematics", "economics", "linguistics", "statistics", "series",
        "species", "analysis", "basis", "thesis", "crisis", "hypothesis", "synthesis",
        "diagnosis", "emphasis", "status", "bus", "virus", "corpus", "focus", "campus",
        "census", "genus", "bonus", "consensus", "gas", "lens", "atlas", "canvas", "chaos",
        "process", "class", "glass", "grass", "mass", "boss", "loss", "business",
    ])
});

/// Irregular noun plurals: plural -> singular
pub static IRREGULAR_NOUNS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("men", "man"), ("women", "woman"), ("children", "child"), ("mice", "mouse"),
        ("geese", "goose"), ("feet", "foot"), ("teeth", "tooth"), ("data", "datum"),
        ("criteria", "criterion"), ("phenomena", "phenomenon"), ("analyses", "analysis"),
        ("indices", "index"), ("matrices", "matrix"), ("theses", "thesis"),
        ("hypotheses", "hypothesis"), ("leaves", "leaf"), ("lives", "life"), ("wives", "wife"),
        ("knives", "knife"), ("halves", "half"), ("selves", "self"), ("oxen", "ox"),
        ("wolves", "wolf"), ("shelves", "shelf"), ("thieves", "thief"), ("crises", "crisis"),
        ("bases", "basis"), ("axes", "axis"), ("vertices", "vertex"), ("cacti", "cactus"),
        ("fungi", "fungus"), ("alumni", "alumnus"), ("appendices", "appendix"),
        ("shoes", "shoe"), ("toes", "toe"), ("foes", "foe"), ("hoes", "hoe"),
        ("canoes", "canoe"), ("oboes", "oboe"),
    ]
    .into_iter()
    .collect()
});

// ============================================================================
// Lookups
// ============================================================================

pub fn is_be_form(lower: &str) -> bool {
    BE_FORMS.contains(lower)
}

pub fn is_auxiliary(lower: &str) -> bool {
    AUXILIARIES.contains_key(lower)
}

pub fn is_modal_or_do(lemma: &str) -> bool {
    AUXILIARY_LEMMAS.contains(lemma) && lemma != "be" && lemma != "have"
}

pub fn is_copula(lemma: &str) -> bool {
    COPULAS.contains(lemma)
}

pub fn is_known_verb(base: &str) -> bool {
    VERBS.contains(base) || AUXILIARY_LEMMAS.contains(base)
}

/// Past participles: irregular participle forms and regular -ed forms
pub fn is_past_participle(lower: &str) -> bool {
    match IRREGULAR_VERBS.get(lower) {
        Some((_, participle)) => *participle,
        None => lower.ends_with("ed") && lower.len() > 4 && !ED_NON_VERBS.contains(lower),
    }
}

pub fn has_adjective_suffix(lower: &str) -> bool {
    lower.chars().count() >= 5 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s))
}

pub fn is_ly_adverb(lower: &str) -> bool {
    lower.len() > 4 && lower.ends_with("ly") && !LY_NON_ADVERBS.contains(lower)
}
