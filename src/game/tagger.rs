//! Part-of-speech tagging for the idiom-likeness check.
//!
//! The game only needs a coarse answer ("is there a verb? is there a noun or a
//! preposition?"), so the tagger is a trait and the built-in [LexiconTagger] is a
//! small rule-based one:
//!
//! 1. closed-class words (prepositions, determiners, pronouns, conjunctions);
//! 2. a lexicon of common verbs and nouns, including irregular verb forms;
//! 3. suffix rules (`-ing`/`-ed` verbs, `-ness`/`-tion` nouns, `-ly` adverbs, ...);
//! 4. position: an unknown first word followed by a determiner, pronoun or
//!    preposition is read as an imperative verb ("*spill* the beans"); any other
//!    unknown word is a noun.
//!
//! Extra word→tag entries can be merged in from a JSON object, e.g.
//! `{"yeet": "VERB", "zeitgeist": "NOUN"}`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::errors::DataError;

/// Universal POS tags (subset). Only `Verb`, `Noun` and `Adp` matter to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Verb,
    Noun,
    Adp,
    Det,
    Pron,
    Adj,
    Adv,
    Cconj,
    Part,
    Num,
    X,
}

impl PosTag {
    pub fn as_str(self) -> &'static str {
        match self {
            PosTag::Verb => "VERB",
            PosTag::Noun => "NOUN",
            PosTag::Adp => "ADP",
            PosTag::Det => "DET",
            PosTag::Pron => "PRON",
            PosTag::Adj => "ADJ",
            PosTag::Adv => "ADV",
            PosTag::Cconj => "CCONJ",
            PosTag::Part => "PART",
            PosTag::Num => "NUM",
            PosTag::X => "X",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedToken {
    pub text: String,
    pub tag: PosTag,
}

/// Anything that can turn a phrase into (token, tag) pairs.
pub trait PosTagger: Send + Sync {
    fn tag(&self, text: &str) -> Vec<TaggedToken>;
}

const PREPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "among", "around", "at", "before",
    "behind", "below", "beneath", "beside", "between", "beyond", "by", "down", "during", "for",
    "from", "in", "inside", "into", "like", "near", "of", "off", "on", "onto", "out", "outside",
    "over", "past", "since", "through", "throughout", "till", "to", "toward", "towards", "under",
    "until", "up", "upon", "with", "within", "without",
];

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "every", "each", "some", "any", "no",
    "all", "both", "either", "neither", "another", "such", "my", "your", "his", "her", "its",
    "our", "their", "one's",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself", "yourself",
    "himself", "herself", "itself", "ourselves", "themselves", "someone", "something", "nothing",
    "everyone", "everything", "anyone", "anything", "one", "who", "what", "which",
];

const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "so", "yet", "than", "if", "as"];

const PARTICLES: &[&str] = &["not", "n't", "'s"];

/// Common verbs: base forms plus frequent irregular inflections. Also covers
/// auxiliaries, which count as verbs for this purpose.
const VERBS: &[&str] = &[
    "add", "am", "are", "ask", "ate", "be", "bear", "beat", "became", "become", "been", "beg",
    "began", "begin", "being", "bend", "bent", "bet", "bide", "bit", "bite", "bitten", "blow",
    "blew", "bought", "break", "bring", "broke", "broken", "brought", "build", "built", "burn",
    "burst", "bury", "buy", "call", "came", "can", "carry", "cast", "catch", "caught", "change",
    "chew", "clear", "climb", "come", "could", "count", "cross", "cry", "cut", "did", "dig", "do",
    "does", "done", "drag", "draw", "drew", "drink", "drive", "drop", "drove", "eat", "eaten",
    "fall", "feed", "feel", "fell", "felt", "fight", "find", "fit", "fly", "follow", "forget",
    "fought", "found", "gave", "get", "give", "given", "go", "goes", "gone", "got", "grab", "grow",
    "had", "hang", "has", "have", "hear", "held", "hide", "hit", "hold", "hung", "is", "jump",
    "keep", "kept", "kick", "kill", "knew", "knock", "know", "known", "laid", "laugh", "lay",
    "lead", "learn", "leave", "led", "left", "let", "lie", "lift", "light", "look", "lose", "lost",
    "made", "make", "may", "might", "miss", "move", "must", "paid", "pay", "pick", "play", "pull",
    "push", "put", "raise", "ran", "reach", "read", "ride", "ring", "rise", "rock", "rode", "run",
    "said", "sat", "saw", "say", "see", "seen", "sell", "send", "sent", "set", "shake", "shall",
    "shoot", "shot", "should", "show", "sing", "sink", "sit", "sleep", "slip", "smell", "sold",
    "speak", "spend", "spent", "spill", "spilled", "spilt", "split", "spoke", "stand", "steal",
    "step", "stick", "stir", "stood", "stop", "strike", "struck", "swallow", "swim", "take",
    "taken", "talk", "taste", "teach", "tear", "tell", "think", "threw", "throw", "thrown", "tie",
    "told", "took", "tore", "touch", "turn", "wait", "wake", "walk", "want", "was", "wash",
    "watch", "wear", "went", "were", "will", "win", "wipe", "won", "wore", "would", "write",
    "wrote",
];

/// Common nouns that suffix rules would miss or mis-tag (e.g. "bucket" is not
/// a past-tense verb).
const NOUNS: &[&str] = &[
    "apple", "arm", "back", "bag", "ball", "bean", "beans", "bear", "bed", "bee", "bird", "blood",
    "boat", "bone", "book", "bridge", "bucket", "bullet", "bush", "cake", "cat", "cheese",
    "chicken", "cloud", "cow", "day", "dog", "door", "dust", "ear", "egg", "eye", "face", "fire",
    "fish", "foot", "game", "gun", "hair", "hand", "hat", "head", "heart", "horse", "house",
    "ice", "idea", "idiom", "iron", "job", "knot", "leaf", "leg", "life", "line", "lip", "man",
    "market", "milk", "mind", "money", "moon", "mouth", "nail", "name", "neck", "nose", "nut",
    "ocean", "pants", "pie", "pig", "point", "pot", "rain", "road", "rock", "roof", "rope", "rose",
    "salt", "sea", "shoe", "shoulder", "sky", "snake", "sock", "spot", "stone", "storm", "street",
    "sun", "table", "tail", "tea", "thing", "time", "toe", "tongue", "tooth", "top", "tree",
    "water", "way", "weather", "wheel", "wind", "wolf", "wood", "word", "world", "year",
];

const ADVERBS: &[&str] = &[
    "again", "always", "away", "back", "ever", "here", "never", "now", "often", "once", "still",
    "then", "there", "too", "very", "well",
];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ness", "ment", "ity", "ship", "dom", "hood", "ance", "ence", "ism",
];
const ADJ_SUFFIXES: &[&str] = &["ful", "ous", "ive", "able", "ible", "less", "ish", "ical"];

/// Rule-based tagger backed by a word lexicon.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: HashMap<String, PosTag>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        let mut lexicon = HashMap::new();
        // Later tables win on overlap, so the most specific class goes last.
        let tables: [(&[&str], PosTag); 8] = [
            (NOUNS, PosTag::Noun),
            (VERBS, PosTag::Verb),
            (ADVERBS, PosTag::Adv),
            (CONJUNCTIONS, PosTag::Cconj),
            (PARTICLES, PosTag::Part),
            (PRONOUNS, PosTag::Pron),
            (DETERMINERS, PosTag::Det),
            (PREPOSITIONS, PosTag::Adp),
        ];
        for (words, tag) in tables {
            for w in words {
                lexicon.insert((*w).to_string(), tag);
            }
        }
        LexiconTagger { lexicon }
    }
}

impl LexiconTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or override entries.
    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, PosTag)>,
        S: AsRef<str>,
    {
        for (word, tag) in entries {
            self.lexicon.insert(word.as_ref().to_lowercase(), tag);
        }
        self
    }

    /// Merge entries from a JSON object file mapping words to tag names.
    pub fn with_lexicon_file<P: AsRef<Path>>(self, path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: label.clone(),
            source,
        })?;
        let entries: HashMap<String, PosTag> =
            serde_json::from_str(&contents).map_err(|e| DataError::Lexicon {
                path: label,
                reason: e.to_string(),
            })?;
        Ok(self.with_entries(entries))
    }

    fn lookup(&self, word: &str) -> Option<PosTag> {
        if let Some(tag) = self.lexicon.get(word) {
            return Some(*tag);
        }
        if word.chars().all(|c| c.is_ascii_digit()) {
            return Some(PosTag::Num);
        }
        // Simple inflections of known words: "kicks", "kicked", "buckets".
        for suffix in ["s", "es", "ed", "d"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                match self.lexicon.get(stem) {
                    Some(PosTag::Verb) => return Some(PosTag::Verb),
                    Some(PosTag::Noun) if suffix.ends_with('s') => return Some(PosTag::Noun),
                    _ => {}
                }
            }
        }
        None
    }

    fn by_suffix(word: &str) -> Option<PosTag> {
        let long_enough = word.chars().count() > 4;
        if long_enough && (word.ends_with("ing") || word.ends_with("ed")) {
            return Some(PosTag::Verb);
        }
        if long_enough && word.ends_with("ly") {
            return Some(PosTag::Adv);
        }
        if NOUN_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return Some(PosTag::Noun);
        }
        if long_enough && ADJ_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return Some(PosTag::Adj);
        }
        None
    }
}

/// Split a phrase into lower-cased word tokens; apostrophes stay inside words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|t| t.trim_matches(|c| c == '\'' || c == '\u{2019}'))
        .filter(|t| !t.is_empty())
        .map(|t| t.replace('\u{2019}', "'").to_lowercase())
        .collect()
}

impl PosTagger for LexiconTagger {
    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let tokens = tokenize(text);
        let known: Vec<Option<PosTag>> = tokens
            .iter()
            .map(|t| self.lookup(t).or_else(|| Self::by_suffix(t)))
            .collect();

        tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let tag = known[i].unwrap_or_else(|| {
                    let next = known.get(i + 1).copied().flatten();
                    let leads_clause = matches!(
                        next,
                        Some(PosTag::Det) | Some(PosTag::Pron) | Some(PosTag::Adp)
                    );
                    let after_to = i > 0 && tokens[i - 1] == "to";
                    if (i == 0 && leads_clause) || after_to {
                        PosTag::Verb
                    } else {
                        PosTag::Noun
                    }
                });
                TaggedToken {
                    text: token.clone(),
                    tag,
                }
            })
            .collect()
    }
}
