//! # Idiomix - an idiom relay chatbot
//!
//! Idiomix is a turn-based word-chaining game played over a text terminal. The player
//! enters an idiom, the bot checks that it sounds like one and answers with an unused
//! idiom starting with the player's last letter. Score and state are tracked until the
//! bot runs out of idioms or the player quits.
//!
//! ## Features
//!
//! - **Idiom Store**: CSV dataset (`idioms`, `meaning` columns) with a per-session pool where
//!   every idiom is used at most once.
//! - **Intent Classification**: ordered regex rules for hint, skip, quit, explain and
//!   emotional feedback; everything else is an idiom attempt.
//! - **Idiom-likeness Check**: a pluggable part-of-speech tagger; a phrase needs a verb and a
//!   noun or preposition.
//! - **Ratings**: Beginner / Skilled / Excellent / Grandmaster by final score.
//! - **Reproducible Games**: optional RNG seed from config or CLI.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rand::{rngs::StdRng, SeedableRng};
//! use idiomix::game::{run_session, IdiomBook, LexiconTagger, Session, SessionSettings};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let book = Arc::new(IdiomBook::load("data/english_idioms.csv")?);
//!     let mut session = Session::new(
//!         book,
//!         Arc::new(LexiconTagger::default()),
//!         StdRng::from_entropy(),
//!         SessionSettings::default(),
//!     );
//!     let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//!     let mut stdout = tokio::io::stdout();
//!     let score = run_session(&mut session, stdin, &mut stdout).await?;
//!     println!("final score: {}", score);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - the game itself: store, tagger, intents, validity, session, runner
//! - [`config`] - TOML configuration
//! - [`logutil`] - log-safe escaping of player input
//! - [`metrics`] - process-wide game counters

pub mod config;
pub mod game;
pub mod logutil;
pub mod metrics;
