mod common;

use std::collections::HashSet;
use std::sync::Arc;

use idiomix::game::validity::{first_letter, last_letter};
use idiomix::game::{
    EndReason, LexiconTagger, Phase, Polarity, Session, SessionSettings, TurnEvent,
    ValidationFailure,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn full_chain_until_bot_runs_out() {
    let mut s = common::playing_session(
        &[
            ("tie the knot", "to get married"),
            ("eat your words", "to admit you were wrong"),
        ],
        3,
    );

    let out = s.handle_input("kick the bucket");
    assert_eq!(out.event, TurnEvent::Scored);
    assert!(out.replies.contains(&"My idiom: tie the knot".to_string()));
    assert_eq!(s.state().score, 1);
    assert_eq!(s.state().required_letter(), Some('t'));

    let out = s.handle_input("spill the beans");
    assert_eq!(
        out.event,
        TurnEvent::Rejected(ValidationFailure::WrongStartingLetter {
            required: 't',
            found: 's'
        })
    );
    assert_eq!(s.state().score, 1);

    let out = s.handle_input("Tie the knot");
    assert_eq!(out.event, TurnEvent::Rejected(ValidationFailure::AlreadyPlayed));

    let out = s.handle_input("take a hike");
    assert_eq!(out.event, TurnEvent::Scored);
    assert_eq!(s.state().last_idiom.as_deref(), Some("eat your words"));
    assert_eq!(s.state().score, 2);

    let out = s.handle_input("hint");
    assert_eq!(out.event, TurnEvent::HintShown);
    assert!(out.replies[0].contains("'S'"));

    let out = s.handle_input("explain");
    assert_eq!(out.event, TurnEvent::Explained);
    assert_eq!(
        out.replies[0],
        "'eat your words' means: to admit you were wrong"
    );

    let out = s.handle_input("spill the beans");
    assert_eq!(out.event, TurnEvent::Ended(EndReason::PoolExhausted));
    assert!(out.replies[0].contains("starts with 'S'"));
    assert!(out
        .replies
        .contains(&"Your final score is 2. Beginner player - keep practicing!".to_string()));
    assert!(!s.is_active());
    assert_eq!(s.state().phase, Phase::Ended);

    // Input after the end is ignored
    let out = s.handle_input("break the ice");
    assert!(out.replies.is_empty());
    assert_eq!(s.state().score, 2);
}

#[test]
fn no_matching_idiom_ends_with_zero_score() {
    let mut s = common::playing_session(&[("spill the beans", "to reveal a secret")], 1);
    let out = s.handle_input("kick the bucket");
    assert_eq!(out.event, TurnEvent::Ended(EndReason::PoolExhausted));
    assert!(out
        .replies
        .contains(&"Your final score is 0. Beginner player - keep practicing!".to_string()));
    assert_eq!(s.state().end_reason, Some(EndReason::PoolExhausted));
}

#[test]
fn unhappy_player_can_stop() {
    let mut s = common::playing_session(&[("tie the knot", "to get married")], 2);
    let out = s.handle_input("I hate this game");
    assert_eq!(out.event, TurnEvent::EmotionHandled(Polarity::Negative));
    assert_eq!(s.state().phase, Phase::AwaitingContinueConfirmation);

    let out = s.handle_input("maybe");
    assert_eq!(out.event, TurnEvent::Reprompt);
    assert!(s.is_active());

    let out = s.handle_input("no");
    assert_eq!(out.event, TurnEvent::Ended(EndReason::Declined));
    assert!(!s.is_active());
}

#[test]
fn unhappy_player_can_keep_going() {
    let mut s = common::playing_session(&[("tie the knot", "to get married")], 2);
    s.handle_input("this game is boring");
    let out = s.handle_input("yes");
    assert_eq!(out.event, TurnEvent::Continued);
    assert_eq!(s.state().phase, Phase::Playing);
    let out = s.handle_input("kick the bucket");
    assert_eq!(out.event, TurnEvent::Scored);
}

#[test]
fn never_give_up_keeps_the_game_going() {
    let mut s = common::playing_session(&[("tie the knot", "to get married")], 2);
    s.handle_input("I hate this game");
    let out = s.handle_input("Never give up!");
    assert_eq!(out.event, TurnEvent::Continued);
    assert!(s.is_active());
    assert_eq!(s.state().phase, Phase::Playing);
}

#[test]
fn quitting_from_the_continue_prompt() {
    let mut s = common::playing_session(&[("tie the knot", "to get married")], 2);
    s.handle_input("this game is boring");
    let out = s.handle_input("I want to leave");
    assert_eq!(out.event, TurnEvent::Ended(EndReason::Quit));
    assert!(!s.is_active());
}

#[test]
fn quit_sentence_is_never_scored() {
    for text in ["should I just give up now", "I want to give up the game", "can I leave?"] {
        let mut s = common::playing_session(&[("tie the knot", "to get married")], 2);
        let out = s.handle_input(text);
        assert_eq!(out.event, TurnEvent::Ended(EndReason::Quit), "{text}");
        assert_eq!(s.state().score, 0, "{text}");
        assert_eq!(s.pool_len(), 1, "{text}");
    }
}

#[test]
fn quit_at_the_rules_question() {
    let book = Arc::new(idiomix::game::IdiomBook::from_pairs([(
        "tie the knot",
        "to get married",
    )]));
    let mut s = Session::new(
        book,
        Arc::new(LexiconTagger::default()),
        StdRng::seed_from_u64(5),
        SessionSettings::default(),
    );
    s.greeting();
    let out = s.handle_input("quit");
    assert_eq!(out.event, TurnEvent::Ended(EndReason::Quit));
    assert!(out
        .replies
        .contains(&"Your final score is 0. Beginner player - keep practicing!".to_string()));
}

#[test]
fn compliments_do_not_change_state() {
    let mut s = common::playing_session(&[("tie the knot", "to get married")], 2);
    let out = s.handle_input("I love this game");
    assert_eq!(out.event, TurnEvent::EmotionHandled(Polarity::Positive));
    assert_eq!(s.state().phase, Phase::Playing);
    assert_eq!(s.state().score, 0);
}

#[test]
fn quitting_says_goodbye() {
    let mut s = common::playing_session(&[("tie the knot", "to get married")], 2);
    let out = s.handle_input("I quit");
    assert_eq!(out.event, TurnEvent::Ended(EndReason::Quit));
    assert_eq!(out.replies[0], "You're leaving? Okay!");
    assert_eq!(out.replies.last().map(String::as_str), Some("Thanks for playing. Goodbye!"));
}

#[test]
fn nonsense_is_rejected_without_penalty() {
    let mut s = common::playing_session(&[("tie the knot", "to get married")], 2);
    let out = s.handle_input("hello world");
    assert_eq!(out.event, TurnEvent::Rejected(ValidationFailure::NotIdiomLike));
    assert!(s.is_active());
    assert_eq!(s.pool_len(), 1);
}

#[test]
fn skips_never_repeat_and_follow_the_chain() {
    let book = common::fixture_book();
    let mut s = Session::new(
        book.clone(),
        Arc::new(LexiconTagger::default()),
        StdRng::seed_from_u64(17),
        SessionSettings::default(),
    );
    s.greeting();
    s.handle_input("no");

    let mut seen = HashSet::new();
    let mut previous: Option<String> = None;
    for _ in 0..(book.len() + 2) {
        let out = s.handle_input("skip");
        if out.is_terminal() {
            assert_eq!(out.event, TurnEvent::Ended(EndReason::PoolExhausted));
            break;
        }
        assert_eq!(out.event, TurnEvent::Skipped);
        let drawn = s.state().last_idiom.clone().unwrap();
        assert!(seen.insert(drawn.clone()), "{} drawn twice", drawn);
        if let Some(prev) = &previous {
            assert_eq!(first_letter(&drawn), last_letter(prev));
        }
        previous = Some(drawn);
    }
    assert!(!s.is_active());
    assert!(!seen.is_empty());
    assert_eq!(s.state().score, 0);
}

#[test]
fn answering_with_an_idiom_skips_the_rules() {
    let book = Arc::new(idiomix::game::IdiomBook::from_pairs([(
        "tie the knot",
        "to get married",
    )]));
    let mut s = Session::new(
        book,
        Arc::new(LexiconTagger::default()),
        StdRng::seed_from_u64(5),
        SessionSettings::default(),
    );
    let out = s.handle_input("kick the bucket");
    assert_eq!(out.event, TurnEvent::Scored);
    assert_eq!(s.state().phase, Phase::Playing);
}

#[test]
fn rules_are_shown_on_request() {
    let book = common::fixture_book();
    let mut s = Session::new(
        book,
        Arc::new(LexiconTagger::default()),
        StdRng::seed_from_u64(5),
        SessionSettings::default(),
    );
    let out = s.handle_input("yes please");
    assert_eq!(out.event, TurnEvent::RulesAnswered { shown: true });
    assert!(out.replies.len() > 2);
    assert!(out.replies[0].starts_with("1."));
}

#[test]
fn meanings_follow_bot_idioms_when_enabled() {
    let book = Arc::new(idiomix::game::IdiomBook::from_pairs([(
        "tie the knot",
        "to get married",
    )]));
    let mut s = Session::new(
        book,
        Arc::new(LexiconTagger::default()),
        StdRng::seed_from_u64(5),
        SessionSettings {
            bot_name: "Quill".to_string(),
            show_meanings: true,
        },
    );
    s.handle_input("no");
    let out = s.handle_input("kick the bucket");
    assert!(out
        .replies
        .contains(&"(It means: to get married)".to_string()));
}
