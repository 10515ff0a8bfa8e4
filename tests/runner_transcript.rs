mod common;

use std::sync::Arc;

use idiomix::game::{run_session, LexiconTagger, Session, SessionSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::BufReader;

#[tokio::test]
async fn scripted_game_transcript() {
    let mut session = Session::new(
        common::fixture_book(),
        Arc::new(LexiconTagger::default()),
        StdRng::seed_from_u64(21),
        SessionSettings::default(),
    );
    let input = "yes\nhint\nkick the bucket\nquit\nthis line is never read\n";
    let mut out = Vec::new();
    let score = run_session(&mut session, BufReader::new(input.as_bytes()), &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(score, 1);
    assert!(text.contains("Idiomix: 1. We take turns saying idioms."));
    assert!(text.contains("Idiomix: Hint: no idiom yet, so you can start with any letter!"));
    assert!(text.contains("Idiomix: Nice one! Your score is now 1."));
    assert!(text.contains("Idiomix: You're leaving? Okay!"));
    assert!(text.contains("Idiomix: Your final score is 1. Beginner player - keep practicing!"));
    assert!(text.trim_end().ends_with("Idiomix: Thanks for playing. Goodbye!"));
    assert_eq!(text.matches("You: ").count(), 4);
}

#[tokio::test]
async fn custom_bot_name_prefixes_replies() {
    let mut session = Session::new(
        common::fixture_book(),
        Arc::new(LexiconTagger::default()),
        StdRng::seed_from_u64(1),
        SessionSettings {
            bot_name: "Quill".to_string(),
            show_meanings: false,
        },
    );
    let mut out = Vec::new();
    run_session(&mut session, BufReader::new("bye\n".as_bytes()), &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Quill: Hello! I'm Quill."));
    assert!(!text.contains("Idiomix:"));
}
