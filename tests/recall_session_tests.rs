use psylab::config::RecallParams;
use psylab::recall::{Condition, WordListBuilder};
use psylab::session::{generate_session_id, RecallSession, SessionState};
use psylab::stimuli::StimulusCatalog;
use regex::Regex;

fn presented_session() -> RecallSession {
    let catalog = StimulusCatalog::standard();
    let words = WordListBuilder::new(&catalog, None).fixed_list(false).unwrap();
    let mut s = RecallSession::new("P001", Condition::Mixed, RecallParams::default()).unwrap();
    s.present(words);
    s
}

#[test]
fn test_session_id_format() {
    let re = Regex::new(r"^FR_\d{8}_\d{6}_[0-9a-f]{6}$").unwrap();
    let s = RecallSession::new("P001", Condition::Mixed, RecallParams::default()).unwrap();
    assert!(re.is_match(s.session_id()), "{}", s.session_id());

    let re = Regex::new(r"^IGT_\d{8}_\d{6}_[0-9a-f]{6}$").unwrap();
    assert!(re.is_match(&generate_session_id("IGT")));
}

#[test]
fn test_ids_are_unique() {
    let ids: std::collections::HashSet<String> =
        (0..50).map(|_| generate_session_id("FR")).collect();
    assert_eq!(ids.len(), 50);
}

#[test]
fn test_state_machine() {
    let mut s = RecallSession::new("P001", Condition::Neutral, RecallParams::default()).unwrap();
    assert_eq!(s.state(), SessionState::Created);
    assert_eq!(s.params(), &RecallParams::default());
    assert!(s.end_time().is_none());
    assert!(s.elapsed_seconds().is_none());

    s.record_distractor(true);
    assert_eq!(s.state(), SessionState::InProgress);

    s.complete();
    assert_eq!(s.state(), SessionState::Completed);
    assert!(s.end_time().unwrap() >= s.start_time());
}

#[test]
fn test_record_recall_scores() {
    let mut s = presented_session();
    s.record_distractor(true);
    s.record_distractor(false);
    let new = s.record_recall(&["기쁨", "우산", "바나나"]);
    assert_eq!(new.len(), 3);

    s.complete();
    let scores = s.scores();
    assert_eq!(scores.correct_recalls, 2);
    assert_eq!(scores.intrusion_errors, 1);
    assert!((scores.distractor_accuracy - 0.5).abs() < 1e-9);
}

#[test]
fn test_recall_appends_continue_order_and_skip_repeats() {
    let mut s = presented_session();
    s.record_recall(&["고통", "책상"]);
    let second = s.record_recall(&["책상", " 사랑 ", "없는말"]);

    let words: Vec<&str> = second.iter().map(|r| r.recalled_word.as_str()).collect();
    assert_eq!(words, vec!["사랑", "없는말"]);
    let orders: Vec<usize> = s.recalled_words().iter().map(|r| r.recall_order).collect();
    assert_eq!(orders, vec![1, 2, 3, 4]);
}

#[test]
#[should_panic(expected = "cannot record recall on completed session")]
fn test_recall_after_completion_panics() {
    let mut s = presented_session();
    s.complete();
    s.record_recall(&["기쁨"]);
}

#[test]
#[should_panic(expected = "cannot present words on completed session")]
fn test_present_after_completion_panics() {
    let mut s = presented_session();
    s.complete();
    s.present(Vec::new());
}

#[test]
#[should_panic(expected = "words already presented")]
fn test_second_presentation_panics() {
    let catalog = StimulusCatalog::standard();
    let mut s = presented_session();
    let more = WordListBuilder::new(&catalog, Some(3))
        .build(Condition::Neutral, 9)
        .unwrap();
    s.present(more);
}

#[test]
#[should_panic(expected = "presentation order must run")]
fn test_out_of_order_presentation_panics() {
    let catalog = StimulusCatalog::standard();
    let mut words = WordListBuilder::new(&catalog, None).fixed_list(false).unwrap();
    words.swap(0, 1);
    let mut s = RecallSession::new("P001", Condition::Mixed, RecallParams::default()).unwrap();
    s.present(words);
}

#[test]
fn test_presented_orders_are_unique() {
    let s = presented_session();
    let orders: Vec<usize> = s
        .presented_words()
        .iter()
        .map(|w| w.presentation_order)
        .collect();
    assert_eq!(orders, (1..=15).collect::<Vec<_>>());
}

#[test]
fn test_empty_participant_rejected() {
    assert!(RecallSession::new("", Condition::Mixed, RecallParams::default()).is_err());
}

#[test]
fn test_to_value_keys() {
    let mut s = presented_session().with_processing_type("semantic");
    s.record_recall(&["기쁨"]);
    let v = s.to_value();

    assert_eq!(v["condition"], "mixed");
    assert_eq!(v["processing_type"], "semantic");
    assert_eq!(v["num_words"], 15);
    assert_eq!(v["presented_words"].as_array().unwrap().len(), 15);
    assert_eq!(v["presented_words"][0]["word"], "기쁨");
    assert_eq!(v["presented_words"][0]["category"], "positive");
    assert_eq!(v["presented_words"][0]["presentation_order"], 1);
    assert_eq!(v["recalled_words"][0]["is_correct"], true);
    assert_eq!(v["recalled_words"][0]["original_position"], 1);

    let json = s.to_json().unwrap();
    let back: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(back, v);
}
