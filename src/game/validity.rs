//! Shallow "is this an idiom?" checks.
//!
//! A phrase is idiom-like when the tagger finds at least one verb and at least
//! one noun or preposition. This is a proxy, not a grammar: false positives and
//! negatives are expected and accepted.

use std::sync::Arc;

use super::errors::ValidationFailure;
use super::tagger::{PosTag, PosTagger};

/// First alphanumeric character of a phrase, lower-cased.
pub fn first_letter(text: &str) -> Option<char> {
    text.chars()
        .find(|c| c.is_alphanumeric())
        .and_then(|c| c.to_lowercase().next())
}

/// Last alphabetic character of a phrase, lower-cased. Trailing punctuation and
/// digits are ignored so "kick the bucket!" chains on 't'.
pub fn last_letter(text: &str) -> Option<char> {
    text.chars()
        .rev()
        .find(|c| c.is_alphabetic())
        .and_then(|c| c.to_lowercase().next())
}

pub struct ValidityChecker {
    tagger: Arc<dyn PosTagger>,
}

impl ValidityChecker {
    pub fn new(tagger: Arc<dyn PosTagger>) -> Self {
        Self { tagger }
    }

    pub fn tagger(&self) -> &dyn PosTagger {
        self.tagger.as_ref()
    }

    pub fn is_idiom_like(&self, text: &str) -> bool {
        let tokens = self.tagger.tag(text);
        let has_verb = tokens.iter().any(|t| t.tag == PosTag::Verb);
        let has_anchor = tokens
            .iter()
            .any(|t| matches!(t.tag, PosTag::Noun | PosTag::Adp));
        has_verb && has_anchor
    }

    /// Case-insensitive first-character match; `None` means no constraint.
    pub fn starts_with_required(&self, text: &str, required: Option<char>) -> bool {
        match required {
            None => true,
            Some(req) => {
                let req = req.to_lowercase().next().unwrap_or(req);
                first_letter(text) == Some(req)
            }
        }
    }

    /// Run both checks; the letter check goes first so the player hears about
    /// the chain rule before grammar.
    pub fn check(&self, text: &str, required: Option<char>) -> Result<(), ValidationFailure> {
        if !self.starts_with_required(text, required) {
            if let (Some(required), Some(found)) = (required, first_letter(text)) {
                return Err(ValidationFailure::WrongStartingLetter { required, found });
            }
            return Err(ValidationFailure::NotIdiomLike);
        }
        if !self.is_idiom_like(text) {
            return Err(ValidationFailure::NotIdiomLike);
        }
        Ok(())
    }
}
