use psylab::recall::{self, PresentedWord, RecallResponse, SerialPosition, WordListBuilder};
use psylab::stimuli::{Category, Stimulus, StimulusCatalog};
use rstest::rstest;

fn canonical() -> Vec<PresentedWord> {
    let catalog = StimulusCatalog::standard();
    WordListBuilder::new(&catalog, None).fixed_list(false).unwrap()
}

fn neutral_list(n: usize) -> Vec<PresentedWord> {
    (1..=n)
        .map(|i| PresentedWord {
            stimulus: Stimulus::new(&format!("w{}", i), 5.0, 5.0, 5.0, Category::Neutral)
                .unwrap(),
            presentation_order: i,
        })
        .collect()
}

#[test]
fn test_fifteen_word_example() {
    let presented = canonical();
    let recalled = RecallResponse::from_inputs(
        &presented,
        &["기쁨", "우산", "시계", "희망", "사랑", "바나나", "자동차"],
    );
    let s = recall::score(&presented, &recalled, 0, 0);

    assert_eq!(s.total_presented, 15);
    assert_eq!(s.total_recalled, 7);
    assert_eq!(s.correct_recalls, 5);
    assert_eq!(s.intrusion_errors, 2);
    assert!((s.recall_rate - 5.0 / 15.0).abs() < 1e-9);

    assert_eq!(s.category_recall.positive, 3);
    assert_eq!(s.category_recall.negative, 0);
    assert_eq!(s.category_recall.neutral, 2);
    assert_eq!(s.category_total.positive, 5);
    assert!((s.category_rate.positive - 0.6).abs() < 1e-9);
    assert_eq!(s.category_rate.negative, 0.0);

    // 기쁨 = 1 (primacy), 우산 = 15 (recency), 시계 = 12, 희망 = 7, 사랑 = 4
    assert_eq!(s.serial_position.primacy, 1);
    assert_eq!(s.serial_position.middle, 3);
    assert_eq!(s.serial_position.recency, 1);
}

#[rstest]
#[case(1, SerialPosition::Primacy)]
#[case(3, SerialPosition::Primacy)]
#[case(4, SerialPosition::Middle)]
#[case(6, SerialPosition::Middle)]
#[case(7, SerialPosition::Recency)]
#[case(9, SerialPosition::Recency)]
fn test_nine_word_windows(#[case] position: usize, #[case] expected: SerialPosition) {
    assert_eq!(SerialPosition::classify(position, 9), expected);
}

#[rstest]
#[case(6, 2, SerialPosition::Primacy)]
#[case(6, 3, SerialPosition::Middle)]
#[case(6, 4, SerialPosition::Middle)]
#[case(6, 5, SerialPosition::Recency)]
#[case(30, 4, SerialPosition::Middle)]
#[case(30, 27, SerialPosition::Middle)]
#[case(30, 28, SerialPosition::Recency)]
fn test_window_scales_then_caps(
    #[case] n: usize,
    #[case] position: usize,
    #[case] expected: SerialPosition,
) {
    assert_eq!(SerialPosition::classify(position, n), expected);
}

#[rstest]
#[case(1)]
#[case(2)]
fn test_short_lists_are_all_middle(#[case] n: usize) {
    let presented = neutral_list(n);
    let inputs: Vec<String> = (1..=n).map(|i| format!("w{}", i)).collect();
    let recalled = RecallResponse::from_inputs(&presented, &inputs);
    let s = recall::score(&presented, &recalled, 0, 0);

    assert_eq!(s.serial_position.primacy, 0);
    assert_eq!(s.serial_position.recency, 0);
    assert_eq!(s.serial_position.middle, n);
}

#[test]
fn test_serial_counts_never_exceed_correct() {
    let presented = neutral_list(12);
    let recalled = RecallResponse::from_inputs(&presented, &["w1", "w12", "w6", "nope", "w2"]);
    let s = recall::score(&presented, &recalled, 0, 0);
    let sp = s.serial_position;
    assert_eq!(sp.primacy + sp.middle + sp.recency, s.correct_recalls);
    assert_eq!(s.correct_recalls + s.intrusion_errors, s.total_recalled);
}

#[test]
fn test_zero_guards() {
    let s = recall::score(&[], &[], 0, 0);
    assert_eq!(s.recall_rate, 0.0);
    assert_eq!(s.distractor_accuracy, 0.0);
    assert_eq!(s.category_rate.positive, 0.0);
    assert_eq!(s.category_rate.negative, 0.0);
    assert_eq!(s.category_rate.neutral, 0.0);
}

#[test]
fn test_distractor_accuracy() {
    let s = recall::score(&neutral_list(3), &[], 3, 4);
    assert!((s.distractor_accuracy - 0.75).abs() < 1e-9);
}

#[test]
fn test_scoring_is_idempotent() {
    let presented = canonical();
    let recalled = RecallResponse::from_inputs(&presented, &["고통", "없음"]);
    assert_eq!(
        recall::score(&presented, &recalled, 1, 2),
        recall::score(&presented, &recalled, 1, 2)
    );
}

#[test]
fn test_matching_is_exact() {
    let presented = neutral_list(3);
    let r = RecallResponse::classify(&presented, "W1", 1, 0.0);
    assert!(r.is_intrusion);
    assert_eq!(r.original_position, None);

    let r = RecallResponse::classify(&presented, "w2", 2, 1.5);
    assert!(r.is_correct && !r.is_intrusion);
    assert_eq!(r.original_position, Some(2));
    assert_eq!(r.response_time, 1.5);
}

#[test]
fn test_inputs_are_trimmed_and_deduplicated() {
    let presented = neutral_list(5);
    let recalled = RecallResponse::from_inputs(&presented, &[" w3 ", "", "w3", "   ", "x", "w1"]);
    let words: Vec<&str> = recalled.iter().map(|r| r.recalled_word.as_str()).collect();
    assert_eq!(words, vec!["w3", "x", "w1"]);

    let orders: Vec<usize> = recalled.iter().map(|r| r.recall_order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
}
