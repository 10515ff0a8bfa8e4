use log::{debug, info};
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::sync::Arc;

use super::errors::ValidationFailure;
use super::intent::{Intent, IntentClassifier, Polarity};
use super::rating::rating;
use super::responder::ResponseGenerator;
use super::store::{normalize, IdiomBook};
use super::tagger::PosTagger;
use super::validity::{last_letter, ValidityChecker};
use crate::logutil::escape_log;
use crate::metrics;

/// # Game Session
///
/// One player's game, from greeting to farewell. The session owns its idiom
/// pool and all mutable state; the [IdiomBook] is shared read-only.
///
/// ## Phases
///
/// 1. **AwaitingRulesAnswer** - greeting shown, asked whether to explain the rules
/// 2. **Playing** - each line is classified and handled (hint, skip, quit,
///    explain, emotion, idiom attempt)
/// 3. **AwaitingContinueConfirmation** - the player sounded unhappy; a no-like
///    answer ends the game
/// 4. **Ended** - terminal; further input is ignored
///
/// ## Usage
///
/// ```rust
/// use std::sync::Arc;
/// use rand::{rngs::StdRng, SeedableRng};
/// use idiomix::game::{IdiomBook, LexiconTagger, Session, SessionSettings};
///
/// let book = Arc::new(IdiomBook::from_pairs([("tie the knot", "to marry")]));
/// let mut session = Session::new(
///     book,
///     Arc::new(LexiconTagger::default()),
///     StdRng::seed_from_u64(1),
///     SessionSettings::default(),
/// );
/// session.greeting();
/// session.handle_input("no");
/// let outcome = session.handle_input("kick the bucket");
/// assert_eq!(session.state().score, 1);
/// assert!(outcome.replies.iter().any(|l| l.contains("tie the knot")));
/// ```
pub struct Session {
    id: u64,
    book: Arc<IdiomBook>,
    classifier: IntentClassifier,
    checker: ValidityChecker,
    responder: ResponseGenerator,
    settings: SessionSettings,
    state: SessionState,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub bot_name: String,
    /// Follow every bot idiom with its meaning.
    pub show_meanings: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            bot_name: "Idiomix".to_string(),
            show_meanings: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingRulesAnswer,
    Playing,
    AwaitingContinueConfirmation,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Quit,
    PoolExhausted,
    Declined,
}

/// What a single turn did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    Reprompt,
    RulesAnswered { shown: bool },
    HintShown,
    Skipped,
    Scored,
    Explained,
    EmotionHandled(Polarity),
    Continued,
    Rejected(ValidationFailure),
    Ended(EndReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub event: TurnEvent,
    pub replies: Vec<String>,
}

impl TurnOutcome {
    fn new(event: TurnEvent, replies: Vec<String>) -> Self {
        Self { event, replies }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.event, TurnEvent::Ended(_))
    }
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub last_idiom: Option<String>,
    pub score: u32,
    pub active: bool,
    pub phase: Phase,
    pub end_reason: Option<EndReason>,
    /// Every phrase played this session by either side, normalized.
    pub played: HashSet<String>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            last_idiom: None,
            score: 0,
            active: true,
            phase: Phase::AwaitingRulesAnswer,
            end_reason: None,
            played: HashSet::new(),
        }
    }

    /// Letter the next idiom must start with; `None` before any bot idiom.
    pub fn required_letter(&self) -> Option<char> {
        self.last_idiom.as_deref().and_then(last_letter)
    }
}

const RULES: [&str; 4] = [
    "1. We take turns saying idioms. Each one must start with the last letter of the one before it.",
    "2. Say 'hint' to see which letter you need, or 'skip' if you're stuck.",
    "3. Say 'explain' and I'll tell you what my last idiom means.",
    "4. You score a point every time I answer you. Say 'quit' whenever you're done.",
];

/// Answers that mean "carry on" even though they contain a no-like word.
const KEEP_GOING: &[&str] = &[
    "never give up",
    "don't give up",
    "dont give up",
    "do not give up",
    "don't stop",
    "dont stop",
    "keep going",
    "keep playing",
];

/// Yes/no reading of a short answer; `None` if it is neither.
fn yes_no(text: &str) -> Option<bool> {
    let lowered = text.trim().to_lowercase().replace('\u{2019}', "'");
    if KEEP_GOING.iter().any(|phrase| lowered.contains(phrase)) {
        return Some(true);
    }
    let first = lowered
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())?;
    match first {
        "yes" | "y" | "yeah" | "yep" | "yup" | "sure" | "ok" | "okay" | "please" | "continue"
        | "definitely" | "absolutely" => Some(true),
        "no" | "n" | "nope" | "nah" | "stop" | "quit" => Some(false),
        _ => None,
    }
}

fn letter_label(letter: char) -> String {
    letter.to_uppercase().collect()
}

impl Session {
    pub fn new(
        book: Arc<IdiomBook>,
        tagger: Arc<dyn PosTagger>,
        rng: StdRng,
        settings: SessionSettings,
    ) -> Self {
        let id = metrics::record_session_start();
        let pool = book.new_pool(rng);
        info!(
            target: "idiomix::game",
            "session.start id={} idioms={}",
            id,
            pool.len()
        );
        Session {
            id,
            book,
            classifier: IntentClassifier::new(),
            checker: ValidityChecker::new(tagger),
            responder: ResponseGenerator::new(pool),
            settings,
            state: SessionState::new(),
        }
    }

    /// Replace the intent rule table.
    pub fn with_classifier(mut self, classifier: IntentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn pool_len(&self) -> usize {
        self.responder.pool().len()
    }

    /// Opening lines. The session starts waiting for the rules answer.
    pub fn greeting(&self) -> Vec<String> {
        vec![
            format!(
                "Hello! I'm {}. Let's play an idiom relay: you say an idiom, and I answer with one that starts with its last letter.",
                self.settings.bot_name
            ),
            "Would you like to hear the rules first? (yes/no)".to_string(),
        ]
    }

    /// Process one line of player input.
    pub fn handle_input(&mut self, text: &str) -> TurnOutcome {
        metrics::inc_turns();
        debug!(
            target: "idiomix::game",
            "session {} phase={:?} input='{}'",
            self.id,
            self.state.phase,
            escape_log(text)
        );
        match self.state.phase {
            Phase::AwaitingRulesAnswer => self.handle_rules_answer(text),
            Phase::Playing => self.handle_play(text),
            Phase::AwaitingContinueConfirmation => self.handle_confirmation(text),
            Phase::Ended => TurnOutcome::new(
                TurnEvent::Ended(self.state.end_reason.unwrap_or(EndReason::Quit)),
                Vec::new(),
            ),
        }
    }

    fn handle_rules_answer(&mut self, text: &str) -> TurnOutcome {
        if text.trim().is_empty() {
            return TurnOutcome::new(
                TurnEvent::Reprompt,
                vec!["Would you like to hear the rules? Please answer yes or no.".to_string()],
            );
        }
        // A quit request ends the game even before it starts.
        if self.classifier.classify(text) == Intent::Quit {
            self.state.phase = Phase::Playing;
            return self.handle_play(text);
        }
        match yes_no(text) {
            Some(true) => {
                self.state.phase = Phase::Playing;
                let mut replies: Vec<String> = RULES.iter().map(|r| r.to_string()).collect();
                replies.push("Go ahead, start with any idiom you like!".to_string());
                TurnOutcome::new(TurnEvent::RulesAnswered { shown: true }, replies)
            }
            Some(false) => {
                self.state.phase = Phase::Playing;
                TurnOutcome::new(
                    TurnEvent::RulesAnswered { shown: false },
                    vec!["No problem! Start with any idiom you like.".to_string()],
                )
            }
            // Anything else is an eager player: treat it as their first move.
            None => {
                self.state.phase = Phase::Playing;
                self.handle_play(text)
            }
        }
    }

    fn handle_confirmation(&mut self, text: &str) -> TurnOutcome {
        match yes_no(text) {
            Some(true) => {
                self.state.phase = Phase::Playing;
                TurnOutcome::new(
                    TurnEvent::Continued,
                    vec![format!("Great, let's keep going! {}", self.turn_prompt())],
                )
            }
            Some(false) => {
                let mut replies = vec!["Okay, let's stop here.".to_string()];
                replies.extend(self.end(EndReason::Declined));
                TurnOutcome::new(TurnEvent::Ended(EndReason::Declined), replies)
            }
            None if self.classifier.classify(text) == Intent::Quit => {
                let mut replies = vec!["You're leaving? Okay!".to_string()];
                replies.extend(self.end(EndReason::Quit));
                TurnOutcome::new(TurnEvent::Ended(EndReason::Quit), replies)
            }
            None => TurnOutcome::new(
                TurnEvent::Reprompt,
                vec!["Do you want to keep playing? Please answer yes or no.".to_string()],
            ),
        }
    }

    fn handle_play(&mut self, text: &str) -> TurnOutcome {
        let intent = self.classifier.classify(text);
        debug!(target: "idiomix::game", "session {} intent={:?}", self.id, intent);
        match intent {
            Intent::Empty => TurnOutcome::new(
                TurnEvent::Reprompt,
                vec!["Please type an idiom, or say 'hint' if you need help.".to_string()],
            ),
            Intent::Emotion(Polarity::Positive) => TurnOutcome::new(
                TurnEvent::EmotionHandled(Polarity::Positive),
                vec![format!(
                    "Aw, thank you! I'm having fun too. {}",
                    self.turn_prompt()
                )],
            ),
            Intent::Emotion(Polarity::Negative) => {
                self.state.phase = Phase::AwaitingContinueConfirmation;
                TurnOutcome::new(
                    TurnEvent::EmotionHandled(Polarity::Negative),
                    vec![
                        "I'm sorry you're not enjoying this.".to_string(),
                        "Do you want to keep playing? (yes/no)".to_string(),
                    ],
                )
            }
            Intent::Hint => {
                metrics::inc_hints();
                let line = match self.state.required_letter() {
                    Some(letter) => format!(
                        "Hint: your idiom needs to start with the letter '{}'.",
                        letter_label(letter)
                    ),
                    None => "Hint: no idiom yet, so you can start with any letter!".to_string(),
                };
                TurnOutcome::new(TurnEvent::HintShown, vec![line])
            }
            Intent::Skip => self.skip(),
            Intent::Quit => {
                let mut replies = vec!["You're leaving? Okay!".to_string()];
                replies.extend(self.end(EndReason::Quit));
                TurnOutcome::new(TurnEvent::Ended(EndReason::Quit), replies)
            }
            Intent::Explain => TurnOutcome::new(TurnEvent::Explained, vec![self.explain()]),
            Intent::IdiomAttempt => self.attempt(text),
        }
    }

    fn explain(&self) -> String {
        match self.state.last_idiom.as_deref() {
            None => "I haven't shared an idiom yet, so there's nothing to explain. Your turn!"
                .to_string(),
            Some(idiom) => match self.book.meaning(idiom).filter(|m| !m.is_empty()) {
                Some(meaning) => format!("'{}' means: {}", idiom, meaning),
                None => format!("I don't have a meaning on file for '{}'.", idiom),
            },
        }
    }

    fn skip(&mut self) -> TurnOutcome {
        metrics::inc_skips();
        let required = self.state.required_letter();
        match self.responder.respond_to(required, &mut self.state.last_idiom) {
            Some(idiom) => {
                metrics::inc_idioms_drawn();
                self.state.played.insert(idiom.clone());
                let mut replies = vec![
                    "No worries, let's skip that one.".to_string(),
                    format!("Here's another: {}", idiom),
                ];
                replies.extend(self.meaning_line(&idiom));
                replies.push(self.turn_prompt());
                TurnOutcome::new(TurnEvent::Skipped, replies)
            }
            None => {
                let mut replies = vec![self.exhausted_line(required)];
                replies.extend(self.end(EndReason::PoolExhausted));
                TurnOutcome::new(TurnEvent::Ended(EndReason::PoolExhausted), replies)
            }
        }
    }

    fn attempt(&mut self, text: &str) -> TurnOutcome {
        let phrase = normalize(text);
        let checked = if self.state.played.contains(&phrase) {
            Err(ValidationFailure::AlreadyPlayed)
        } else {
            self.checker.check(&phrase, self.state.required_letter())
        };
        let checked =
            checked.and_then(|_| last_letter(&phrase).ok_or(ValidationFailure::NotIdiomLike));
        let letter = match checked {
            Ok(letter) => letter,
            Err(failure) => {
                metrics::inc_rejections();
                debug!(
                    target: "idiomix::game",
                    "session {} rejected '{}': {}",
                    self.id,
                    escape_log(&phrase),
                    failure
                );
                let line = self.rejection_line(&failure, &phrase);
                return TurnOutcome::new(TurnEvent::Rejected(failure), vec![line]);
            }
        };

        self.state.played.insert(phrase.clone());
        self.responder.pool_mut().mark_used(&phrase);

        match self.responder.respond_to(Some(letter), &mut self.state.last_idiom) {
            Some(idiom) => {
                metrics::inc_idioms_drawn();
                self.state.score += 1;
                self.state.played.insert(idiom.clone());
                let mut replies = vec![
                    format!("Nice one! Your score is now {}.", self.state.score),
                    format!("My idiom: {}", idiom),
                ];
                replies.extend(self.meaning_line(&idiom));
                replies.push(self.turn_prompt());
                TurnOutcome::new(TurnEvent::Scored, replies)
            }
            None => {
                let mut replies = vec![self.exhausted_line(Some(letter))];
                replies.extend(self.end(EndReason::PoolExhausted));
                TurnOutcome::new(TurnEvent::Ended(EndReason::PoolExhausted), replies)
            }
        }
    }

    fn rejection_line(&self, failure: &ValidationFailure, phrase: &str) -> String {
        match failure {
            ValidationFailure::WrongStartingLetter { required, found } => format!(
                "That starts with '{}', but it needs to start with '{}'. Try again!",
                letter_label(*found),
                letter_label(*required)
            ),
            ValidationFailure::NotIdiomLike => "Hmm, that doesn't sound like an idiom. Idioms usually have an action and a thing, like 'spill the beans'. Try again!".to_string(),
            ValidationFailure::AlreadyPlayed => {
                format!("'{}' has already been played. Try a different one!", phrase)
            }
        }
    }

    fn meaning_line(&self, idiom: &str) -> Option<String> {
        if !self.settings.show_meanings {
            return None;
        }
        self.book
            .meaning(idiom)
            .filter(|m| !m.is_empty())
            .map(|m| format!("(It means: {})", m))
    }

    fn turn_prompt(&self) -> String {
        match self.state.required_letter() {
            Some(letter) => format!(
                "Your turn: give me an idiom starting with '{}'.",
                letter_label(letter)
            ),
            None => "Your turn: give me any idiom.".to_string(),
        }
    }

    fn exhausted_line(&self, letter: Option<char>) -> String {
        metrics::inc_pool_exhaustions();
        match letter {
            Some(letter) => format!(
                "Hmm, I can't think of any idiom that starts with '{}'. I give up!",
                letter_label(letter)
            ),
            None => "Hmm, I'm all out of idioms. I give up!".to_string(),
        }
    }

    /// Move to the terminal phase and return the farewell lines.
    fn end(&mut self, reason: EndReason) -> Vec<String> {
        self.state.phase = Phase::Ended;
        self.state.active = false;
        self.state.end_reason = Some(reason);
        metrics::record_session_end();
        let snap = metrics::snapshot();
        info!(
            target: "idiomix::game",
            "session.end id={} reason={:?} score={} pool_left={} sessions={}/{} turns={} drawn={} rejections={} hints={} skips={} exhaustions={}",
            self.id,
            reason,
            self.state.score,
            self.responder.pool().len(),
            snap.sessions_ended,
            snap.sessions_started,
            snap.turns,
            snap.idioms_drawn,
            snap.rejections,
            snap.hints,
            snap.skips,
            snap.pool_exhaustions
        );
        vec![
            format!(
                "Your final score is {}. {}",
                self.state.score,
                rating(self.state.score)
            ),
            "Thanks for playing. Goodbye!".to_string(),
        ]
    }
}
