//! Free-text intent classification.
//!
//! Every player line is sorted into one [Intent] before the session acts on it.
//! Classification is an ordered table of regex rules, first match wins; a line
//! nothing matches is an idiom attempt. Matching is case-insensitive and
//! deliberately coarse.
//!
//! Precedence of the built-in table ([DEFAULT_RULES]):
//!
//! 1. blank input → [Intent::Empty] (handled before the table)
//! 2. sentiment aimed at the bot or game → [Intent::Emotion] (negative before positive)
//! 3. hint requests → [Intent::Hint]
//! 4. skip requests → [Intent::Skip]
//! 5. quit requests → [Intent::Quit], unless the line says "never/don't give up"
//! 6. explanation requests → [Intent::Explain]
//! 7. anything else → [Intent::IdiomAttempt]
//!
//! A rule can demand a second pattern in the same line (`requires`) and can be
//! vetoed by a third (`unless`); the emotion and quit rules use these.
//!
//! Keywords match anywhere in the line. A few well-known idioms that contain a
//! command word ("a change of heart", "give up the ghost") are listed as
//! exceptions so they still reach the game.

use log::trace;
use regex::{Regex, RegexBuilder};

use crate::logutil::escape_log;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Empty,
    Emotion(Polarity),
    Hint,
    Skip,
    Quit,
    Explain,
    IdiomAttempt,
}

/// Uncompiled rule: regex sources plus the intent they produce.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub intent: Intent,
    pub pattern: &'static str,
    pub requires: Option<&'static str>,
    pub unless: Option<&'static str>,
}

const BOT_TARGET: &str =
    r"\b(you|your|you're|youre|u|bot|chatbot|idiomix|game|this|playing)\b";

const NEGATIVE: &str = r"\b(hate|hating|boring|bored|stupid|dumb|annoying|annoyed|awful|terrible|worst|sucks?|useless|frustrat\w*|tired of|sick of|(don't|dont|do not|doesn't|does not) (like|love|enjoy))\b";

const POSITIVE: &str = r"\b(love|loving|like|enjoy\w*|fun|great|awesome|amazing|cool|nice|brilliant|fantastic|clever|smart|thanks|thank you)\b";

macro_rules! quit_guard {
    () => {
        r"\b(never|don't|dont|do not|won't|wont|will not|not|shouldn't) give up\b"
    };
}

/// "never give up" and friends; vetoes quit.
pub const QUIT_GUARD: &str = quit_guard!();

const SKIP_EXCEPTIONS: &str = r"\bchange of (heart|pace|scenery|mind)\b|\bchange (your|his|her|their|my) tune\b";

const QUIT_EXCEPTIONS: &str = concat!(
    r"\bgive up the ghost\b|\bleave no stone unturned\b|\bleave (it|well enough) alone\b",
    r"|\bleave (someone|him|her|them|me) in the lurch\b|\bquit while (you're|youre|you are) ahead\b|",
    quit_guard!()
);

pub const DEFAULT_RULES: &[RuleSpec] = &[
    RuleSpec {
        intent: Intent::Emotion(Polarity::Negative),
        pattern: NEGATIVE,
        requires: Some(BOT_TARGET),
        unless: None,
    },
    RuleSpec {
        intent: Intent::Emotion(Polarity::Positive),
        pattern: POSITIVE,
        requires: Some(BOT_TARGET),
        unless: None,
    },
    RuleSpec {
        intent: Intent::Hint,
        pattern: r"\bhint\b|\bhelp me\b|\bhow to\b|\bcan you help\b|^help[.!?]*$|^\?+$",
        requires: None,
        unless: None,
    },
    RuleSpec {
        intent: Intent::Skip,
        pattern: r"\bskip\b|\bchange\b|\bmove on\b|^(next|pass)[.!]*$",
        requires: None,
        unless: Some(SKIP_EXCEPTIONS),
    },
    RuleSpec {
        intent: Intent::Quit,
        pattern: r"\bquit\b|\bgive up\b|\bstop playing\b|^stop[.!]*$|\bleave\b|^(exit|bye|goodbye)[.!]*$",
        requires: None,
        unless: Some(QUIT_EXCEPTIONS),
    },
    RuleSpec {
        intent: Intent::Explain,
        pattern: r"\bexplain\b|\bdefine\b|\bdefinition\b|\bmeaning\b|\bwhat does\b|\bwhat is\b|\bwhat's that\b",
        requires: None,
        unless: None,
    },
];

#[derive(Debug, Clone)]
pub struct IntentRule {
    pub intent: Intent,
    pattern: Regex,
    requires: Option<Regex>,
    unless: Option<Regex>,
}

fn compile(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source).case_insensitive(true).build()
}

impl IntentRule {
    pub fn compile(rule: &RuleSpec) -> Result<Self, regex::Error> {
        Ok(IntentRule {
            intent: rule.intent,
            pattern: compile(rule.pattern)?,
            requires: rule.requires.map(compile).transpose()?,
            unless: rule.unless.map(compile).transpose()?,
        })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
            && self.requires.as_ref().map_or(true, |r| r.is_match(text))
            && !self.unless.as_ref().is_some_and(|u| u.is_match(text))
    }
}

#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl IntentClassifier {
    /// Classifier with the built-in rule table.
    pub fn new() -> Self {
        Self::from_specs(DEFAULT_RULES).expect("built-in intent patterns compile")
    }

    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self, regex::Error> {
        let rules = specs
            .iter()
            .map(IntentRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Classify one line. Total: every input maps to exactly one intent.
    pub fn classify(&self, raw: &str) -> Intent {
        let text = raw.trim().replace('\u{2019}', "'");
        if text.is_empty() {
            return Intent::Empty;
        }
        for rule in &self.rules {
            if rule.matches(&text) {
                trace!("Parsed {:?} from '{}'", rule.intent, escape_log(raw));
                return rule.intent;
            }
        }
        trace!("Parsed IdiomAttempt from '{}'", escape_log(raw));
        Intent::IdiomAttempt
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}
