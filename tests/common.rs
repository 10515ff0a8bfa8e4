//! Test utilities & fixtures.
//! Provides access to integration test data under `tests/test-data-int`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use idiomix::game::{IdiomBook, LexiconTagger, Session, SessionSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Return the path to the static integration test fixture directory.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test-data-int")
}

/// The small idiom dataset most tests play against.
#[allow(dead_code)]
pub fn fixture_book() -> Arc<IdiomBook> {
    Arc::new(IdiomBook::load(fixture_root().join("idioms.csv")).expect("fixture idioms load"))
}

/// A seeded session over `pairs`, past the rules question and ready for play.
#[allow(dead_code)]
pub fn playing_session(pairs: &[(&str, &str)], seed: u64) -> Session {
    let book = Arc::new(IdiomBook::from_pairs(pairs.iter().copied()));
    let mut session = Session::new(
        book,
        Arc::new(LexiconTagger::default()),
        StdRng::seed_from_u64(seed),
        SessionSettings::default(),
    );
    session.greeting();
    session.handle_input("no");
    session
}
