use psylab::config::GambleParams;
use psylab::gamble::{Deck, DeckScheduler, DrawMode};
use psylab::recall::{self, Condition, RecallResponse, SerialPosition, WordListBuilder};
use psylab::session::GambleSession;
use psylab::stimuli::StimulusCatalog;
use proptest::prelude::*;

// --- STRATEGIES ---

fn arb_deck() -> impl Strategy<Value = Deck> {
    prop_oneof![Just(Deck::A), Just(Deck::B), Just(Deck::C), Just(Deck::D)]
}

fn arb_condition() -> impl Strategy<Value = Condition> {
    prop_oneof![
        Just(Condition::Emotional),
        Just(Condition::Neutral),
        Just(Condition::Mixed)
    ]
}

prop_compose! {
    fn arb_params()(
        total_trials in 1usize..150,
        initial_balance in -5000i64..5000
    ) -> GambleParams {
        GambleParams {
            total_trials,
            initial_balance,
            ..Default::default()
        }
    }
}

proptest! {
    #[test]
    fn prop_balance_is_running_sum(
        params in arb_params(),
        decks in proptest::collection::vec(arb_deck(), 0..200),
        probabilistic in any::<bool>(),
        seed in any::<u64>()
    ) {
        let mode = if probabilistic { DrawMode::Probabilistic } else { DrawMode::Fixed };
        let mut scheduler = DeckScheduler::new(mode, Some(seed));
        let mut session = GambleSession::new("prop", &params).unwrap();

        for d in &decks {
            if session.is_finished() {
                break;
            }
            session.choose(&mut scheduler, *d);
        }

        let mut balance = params.initial_balance;
        for t in session.trials() {
            balance += t.net_outcome;
            prop_assert_eq!(t.balance_after, balance);
        }

        let scores = session.scores();
        let c = scores.deck_counts;
        prop_assert_eq!(c.a + c.b + c.c + c.d, session.trials().len());
        prop_assert_eq!(scores.net_score, (c.c + c.d) as i64 - (c.a + c.b) as i64);
        prop_assert!((scores.net_score.unsigned_abs() as usize) <= scores.total_trials);
        prop_assert!(session.trials().len() <= params.total_trials);
        prop_assert_eq!(scores.final_balance, balance);
    }

    #[test]
    fn prop_fixed_schedule_is_periodic(deck in arb_deck(), k in 0usize..120) {
        let mut a = DeckScheduler::new(DrawMode::Fixed, None);
        let mut b = DeckScheduler::new(DrawMode::Fixed, None);
        for _ in 0..k {
            a.draw(deck);
        }
        for _ in 0..(k + 40) {
            b.draw(deck);
        }
        prop_assert_eq!(a.draw(deck), b.draw(deck));
    }

    #[test]
    fn prop_word_list_is_well_formed(
        condition in arb_condition(),
        count in 1usize..40,
        seed in any::<u64>()
    ) {
        let catalog = StimulusCatalog::standard();
        let words = WordListBuilder::new(&catalog, Some(seed)).build(condition, count).unwrap();

        prop_assert!(words.len() <= count);
        for (i, w) in words.iter().enumerate() {
            prop_assert_eq!(w.presentation_order, i + 1);
        }
        let mut seen = std::collections::HashSet::new();
        prop_assert!(words.iter().all(|w| seen.insert(w.word().to_string())));
    }

    #[test]
    fn prop_recall_score_bounds(
        count in 1usize..30,
        picks in proptest::collection::vec(0usize..40, 0..40),
        seed in any::<u64>()
    ) {
        let catalog = StimulusCatalog::standard();
        let presented = WordListBuilder::new(&catalog, Some(seed))
            .build(Condition::Mixed, count)
            .unwrap();
        let all: Vec<&str> = catalog.iter().map(|s| s.word.as_str()).collect();
        let inputs: Vec<&str> = picks.iter().map(|&i| all[i % all.len()]).collect();

        let recalled = RecallResponse::from_inputs(&presented, &inputs);
        let s = recall::score(&presented, &recalled, 0, 0);

        prop_assert!(s.correct_recalls <= s.total_presented);
        prop_assert!((0.0..=1.0).contains(&s.recall_rate));
        prop_assert_eq!(s.correct_recalls + s.intrusion_errors, s.total_recalled);
        let sp = s.serial_position;
        prop_assert_eq!(sp.primacy + sp.middle + sp.recency, s.correct_recalls);
        let cr = s.category_recall;
        prop_assert_eq!(cr.positive + cr.negative + cr.neutral, s.correct_recalls);
    }

    #[test]
    fn prop_serial_windows_are_symmetric(n in 1usize..60, p in 1usize..60) {
        prop_assume!(p <= n);
        let mirrored = n + 1 - p;
        let a = SerialPosition::classify(p, n);
        let b = SerialPosition::classify(mirrored, n);
        let expected = match a {
            SerialPosition::Primacy => SerialPosition::Recency,
            SerialPosition::Recency => SerialPosition::Primacy,
            SerialPosition::Middle => SerialPosition::Middle,
        };
        prop_assert_eq!(b, expected);
    }
}
