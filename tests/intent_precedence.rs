use idiomix::game::intent::RuleSpec;
use idiomix::game::{Intent, IntentClassifier, Polarity};

fn classify(text: &str) -> Intent {
    IntentClassifier::new().classify(text)
}

#[test]
fn emotion_beats_commands() {
    assert_eq!(
        classify("I hate this game, I quit"),
        Intent::Emotion(Polarity::Negative)
    );
    assert_eq!(
        classify("I don\u{2019}t like this game"),
        Intent::Emotion(Polarity::Negative)
    );
    assert_eq!(
        classify("You are awesome!"),
        Intent::Emotion(Polarity::Positive)
    );
}

#[test]
fn hint_then_skip_then_quit_then_explain() {
    assert_eq!(classify("hint? or should I skip"), Intent::Hint);
    assert_eq!(classify("skip it, I give up"), Intent::Skip);
    assert_eq!(classify("I give up, what does it mean"), Intent::Quit);
    assert_eq!(classify("what does spill the beans mean"), Intent::Explain);
}

#[test]
fn give_up_guard() {
    assert_eq!(classify("never give up"), Intent::IdiomAttempt);
    assert_eq!(classify("don't give up"), Intent::IdiomAttempt);
    assert_eq!(classify("ok I give up"), Intent::Quit);
}

#[test]
fn idioms_that_look_like_commands() {
    assert_eq!(classify("give up the ghost"), Intent::IdiomAttempt);
    assert_eq!(classify("a change of heart"), Intent::IdiomAttempt);
    assert_eq!(classify("leave no stone unturned"), Intent::IdiomAttempt);
    assert_eq!(classify("kick the bucket"), Intent::IdiomAttempt);
}

#[test]
fn case_and_whitespace() {
    assert_eq!(classify("HINT"), Intent::Hint);
    assert_eq!(classify("  Skip  "), Intent::Skip);
    assert_eq!(classify(" \t "), Intent::Empty);
}

#[test]
fn custom_rule_table() {
    let classifier = IntentClassifier::from_specs(&[RuleSpec {
        intent: Intent::Hint,
        pattern: r"^\?$",
        requires: None,
        unless: None,
    }])
    .unwrap();
    assert_eq!(classifier.rules().len(), 1);
    assert_eq!(classifier.classify("?"), Intent::Hint);
    assert_eq!(classifier.classify("skip"), Intent::IdiomAttempt);

    let broken = IntentClassifier::from_specs(&[RuleSpec {
        intent: Intent::Quit,
        pattern: r"(unclosed",
        requires: None,
        unless: None,
    }]);
    assert!(broken.is_err());
}

#[test]
fn command_words_match_anywhere_in_the_line() {
    for text in ["let's change", "can we change?", "I'd rather change to another one"] {
        assert_eq!(classify(text), Intent::Skip, "{text}");
    }
    for text in [
        "I want to give up the game",
        "should I just give up now",
        "can I leave?",
        "I'd like to leave now",
    ] {
        assert_eq!(classify(text), Intent::Quit, "{text}");
    }
    assert_eq!(classify("quit while you're ahead"), Intent::IdiomAttempt);
}
