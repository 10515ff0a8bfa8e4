//! # Idiom Relay Game
//!
//! The player says an idiom; the bot answers with an unused idiom starting
//! with the player's last letter; the player continues from the bot's last
//! letter, and so on until the bot runs out or the player quits.
//!
//! ## Components
//!
//! - [`store`] - CSV loading ([IdiomBook]) and the per-session pool ([IdiomPool])
//! - [`tagger`] - pluggable part-of-speech tagging ([PosTagger], [LexiconTagger])
//! - [`intent`] - first-match-wins intent rules ([IntentClassifier])
//! - [`validity`] - the verb + noun/preposition check and letter rules
//! - [`responder`] - draws the bot's reply from the pool
//! - [`rating`] - final score → rating text
//! - [`session`] - the per-player state machine ([Session])
//! - [`runner`] - async line loop over any reader/writer
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  runner         │ ← one line in, replies out
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  Session        │ ← phase, score, last idiom
//! └─────────────────┘
//!     │         │
//! ┌────────┐ ┌──────────┐ ┌───────────┐
//! │ intent │ │ validity │ │ responder │
//! └────────┘ └──────────┘ └───────────┘
//!                 │             │
//!            ┌────────┐   ┌──────────┐
//!            │ tagger │   │  store   │
//!            └────────┘   └──────────┘
//! ```

pub mod errors;
pub mod intent;
pub mod rating;
pub mod responder;
pub mod runner;
pub mod session;
pub mod store;
pub mod tagger;
pub mod validity;

pub use errors::{DataError, ValidationFailure};
pub use intent::{Intent, IntentClassifier, Polarity};
pub use runner::run_session;
pub use session::{EndReason, Phase, Session, SessionSettings, TurnEvent, TurnOutcome};
pub use store::{IdiomBook, IdiomPool};
pub use tagger::{LexiconTagger, PosTag, PosTagger, TaggedToken};
pub use validity::ValidityChecker;
