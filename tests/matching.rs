//! Reply text to clip selection

mod common;

use jansamvaad_voice::{AudioMatcher, MatchKind, MatcherConfig, PhraseAudioMap};

use common::{scenario_map, scenario_matcher};

#[test]
fn test_exact_phrase_selects_its_clip() {
    let matcher = scenario_matcher();
    assert_eq!(matcher.select_audio("ನಮಸ್ಕಾರ"), "A.mp3");
    assert_eq!(matcher.select_audio("ಧನ್ಯವಾದಗಳು"), "B.mp3");
}

#[test]
fn test_every_builtin_phrase_matches_itself() {
    let matcher = AudioMatcher::new(PhraseAudioMap::builtin(), MatcherConfig::default());
    let phrases = matcher.phrases();

    for (phrase, locator) in phrases.iter() {
        let found = matcher.find(phrase);
        assert_eq!(found.kind, MatchKind::Exact, "phrase {phrase}");
        assert_eq!(found.locator, locator);
    }
}

#[test]
fn test_unknown_text_falls_back_to_default() {
    let matcher = scenario_matcher();
    assert_eq!(matcher.select_audio("ಹಲೋ"), "D.mp3");
    assert_eq!(matcher.select_audio("Hello, how can I help?"), "D.mp3");
    assert_eq!(matcher.find("ಹಲೋ").kind, MatchKind::Default);
}

#[test]
fn test_empty_text_falls_back_to_default() {
    let matcher = scenario_matcher();
    assert_eq!(matcher.select_audio(""), "D.mp3");
    assert!(!matcher.is_target_language_text(""));
}

#[test]
fn test_short_phrase_inside_sentence_needs_lower_threshold() {
    let text = "ದಯವಿಟ್ಟು ನಮಸ್ಕಾರ ಸ್ವೀಕರಿಸಿ";

    // "ನಮಸ್ಕಾರ" is seven characters, below the default partial threshold
    let strict = scenario_matcher();
    assert_eq!(strict.select_audio(text), "D.mp3");

    let relaxed = AudioMatcher::new(
        scenario_map(),
        MatcherConfig {
            min_partial_len: 7,
            ..MatcherConfig::default()
        },
    );
    let found = relaxed.find(text);
    assert_eq!(found.locator, "A.mp3");
    assert_eq!(found.kind, MatchKind::Partial);
    assert_eq!(found.phrase, Some("ನಮಸ್ಕಾರ"));
}

#[test]
fn test_long_phrase_inside_sentence_matches() {
    let matcher = scenario_matcher();
    let found = matcher.find("ನಿಮ್ಮ ಸಹಾಯಕ್ಕೆ ಧನ್ಯವಾದಗಳು!");
    assert_eq!(found.locator, "B.mp3");
    assert_eq!(found.kind, MatchKind::Partial);
}

#[test]
fn test_longest_contained_phrase_wins() {
    let map = PhraseAudioMap::from_flat([
        ("ಧನ್ಯವಾದಗಳು", "short.mp3"),
        ("ತುಂಬಾ ಧನ್ಯವಾದಗಳು", "long.mp3"),
        ("default", "D.mp3"),
    ])
    .unwrap();
    let matcher = AudioMatcher::new(map, MatcherConfig::default());

    assert_eq!(
        matcher.select_audio("ನಿಮಗೆ ತುಂಬಾ ಧನ್ಯವಾದಗಳು ಸರ್"),
        "long.mp3"
    );
}

#[test]
fn test_equal_length_tie_goes_to_first_declared() {
    let map = PhraseAudioMap::from_flat([
        ("abcdefghijk", "first.mp3"),
        ("lmnopqrstuv", "second.mp3"),
        ("default", "D.mp3"),
    ])
    .unwrap();
    let matcher = AudioMatcher::new(map, MatcherConfig::default());

    assert_eq!(matcher.select_audio("abcdefghijk lmnopqrstuv"), "first.mp3");
}

#[test]
fn test_default_key_is_never_matched_as_a_phrase() {
    let matcher = AudioMatcher::new(
        scenario_map(),
        MatcherConfig {
            min_partial_len: 1,
            ..MatcherConfig::default()
        },
    );

    let found = matcher.find("the default answer");
    assert_eq!(found.locator, "D.mp3");
    assert_eq!(found.kind, MatchKind::Default);
}

#[test]
fn test_mostly_kannada_text_is_target_language() {
    let matcher = scenario_matcher();
    assert!(matcher.is_target_language_text("ನಿಮ್ಮ ಅರ್ಜಿ ಸ್ವೀಕರಿಸಲಾಗಿದೆ"));
    assert!(matcher.is_target_language_text("Token 42: ನಿಮ್ಮ ಅರ್ಜಿ ಸ್ವೀಕರಿಸಲಾಗಿದೆ"));
}

#[test]
fn test_mostly_english_text_is_not_target_language() {
    let matcher = scenario_matcher();
    assert!(!matcher.is_target_language_text("Your application has been received"));
    assert!(!matcher.is_target_language_text(
        "Your application has been received and will be processed soon ಸರಿ"
    ));
}

#[test]
fn test_known_phrase_is_target_language_even_when_diluted() {
    let map = PhraseAudioMap::from_flat([
        ("ತುಂಬಾ ಧನ್ಯವಾದಗಳು", "thanks.mp3"),
        ("default", "D.mp3"),
    ])
    .unwrap();
    let matcher = AudioMatcher::new(map, MatcherConfig::default());

    // Below the script ratio, but carries a known phrase longer than ten characters
    let text = "Thank you very much, we say ತುಂಬಾ ಧನ್ಯವಾದಗಳು in Kannada";
    assert!(matcher.is_target_language_text(text));

    // A ten-character phrase is not enough on its own
    let text = "Thank you very much, we say ಧನ್ಯವಾದಗಳು in Kannada today";
    assert!(!scenario_matcher().is_target_language_text(text));
}
