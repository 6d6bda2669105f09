use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use psylab::gamble::{Deck, GambleScores, Trial};
use psylab::recall::{PresentedWord, RecallResponse, RecallScores};
use psylab::stimuli::{Category, Stimulus};
use strum::IntoEnumIterator;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Positive => Color::Green,
        Category::Negative => Color::Red,
        Category::Neutral => Color::Grey,
    }
}

pub fn print_catalog<'a>(stimuli: impl Iterator<Item = &'a Stimulus>) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Word").add_attribute(Attribute::Bold),
        Cell::new("Category"),
        Cell::new("Valence"),
        Cell::new("Arousal"),
        Cell::new("Concrete"),
    ]);
    align_right(&mut table, 2..=4);

    for s in stimuli {
        table.add_row(vec![
            Cell::new(&s.word).add_attribute(Attribute::Bold),
            Cell::new(s.category).fg(category_color(s.category)),
            Cell::new(format!("{:.1}", s.valence)),
            Cell::new(format!("{:.1}", s.arousal)),
            Cell::new(format!("{:.1}", s.concreteness)),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_word_list(words: &[PresentedWord]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Word"),
        Cell::new("Category"),
    ]);
    align_right(&mut table, 0..=0);

    for w in words {
        table.add_row(vec![
            Cell::new(w.presentation_order),
            Cell::new(w.word()).add_attribute(Attribute::Bold),
            Cell::new(w.category()).fg(category_color(w.category())),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_recall_responses(responses: &[RecallResponse]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Recalled"),
        Cell::new("Result"),
        Cell::new("Position"),
    ]);

    for r in responses {
        let result = if r.is_correct {
            Cell::new("correct").fg(Color::Green)
        } else {
            Cell::new("intrusion").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(r.recall_order),
            Cell::new(&r.recalled_word).add_attribute(Attribute::Bold),
            result,
            Cell::new(
                r.original_position
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_recall_report(scores: &RecallScores) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Recall").add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    align_right(&mut table, 1..=1);

    let rows: Vec<(String, String)> = vec![
        ("Presented".into(), scores.total_presented.to_string()),
        ("Recalled".into(), scores.total_recalled.to_string()),
        ("Correct".into(), scores.correct_recalls.to_string()),
        ("Intrusions".into(), scores.intrusion_errors.to_string()),
        (
            "Recall rate".into(),
            format!("{:.1}%", scores.recall_rate * 100.0),
        ),
        (
            "Distractor accuracy".into(),
            format!("{:.1}%", scores.distractor_accuracy * 100.0),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    println!("\n{}", table);

    let mut cats = new_table();
    cats.add_row(vec![
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Recalled"),
        Cell::new("Presented"),
        Cell::new("Rate"),
    ]);
    align_right(&mut cats, 1..=3);
    for c in Category::iter() {
        cats.add_row(vec![
            Cell::new(c).fg(category_color(c)),
            Cell::new(scores.category_recall[c]),
            Cell::new(scores.category_total[c]),
            Cell::new(format!("{:.1}%", scores.category_rate[c] * 100.0)),
        ]);
    }
    println!("\n{}", cats);

    let sp = scores.serial_position;
    let mut serial = new_table();
    serial.add_row(vec![
        Cell::new("Primacy").add_attribute(Attribute::Bold),
        Cell::new("Middle").add_attribute(Attribute::Bold),
        Cell::new("Recency").add_attribute(Attribute::Bold),
    ]);
    serial.add_row(vec![
        Cell::new(sp.primacy),
        Cell::new(sp.middle),
        Cell::new(sp.recency),
    ]);
    println!("\n{}", serial);
}

pub fn print_trials(trials: &[Trial]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Trial").add_attribute(Attribute::Bold),
        Cell::new("Deck"),
        Cell::new("Reward"),
        Cell::new("Penalty"),
        Cell::new("Net"),
        Cell::new("Balance").fg(Color::Cyan),
    ]);
    align_right(&mut table, 0..=5);

    for t in trials {
        let net = Cell::new(format!("{:+}", t.net_outcome));
        let net = if t.net_outcome < 0 {
            net.fg(Color::Red)
        } else {
            net.fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(t.trial_number),
            Cell::new(t.deck_choice).add_attribute(Attribute::Bold),
            Cell::new(t.reward),
            Cell::new(t.penalty),
            net,
            Cell::new(t.balance_after).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_gamble_report(scores: &GambleScores) {
    let mut table = new_table();
    let mut header = vec![Cell::new("Metric").add_attribute(Attribute::Bold)];
    for deck in Deck::iter() {
        let cell = Cell::new(format!("Deck {}", deck));
        header.push(if deck.is_advantageous() {
            cell.fg(Color::Green)
        } else {
            cell.fg(Color::Red)
        });
    }
    table.add_row(header);
    align_right(&mut table, 1..=4);

    let mut counts = vec![Cell::new("Choices")];
    counts.extend(Deck::iter().map(|d| Cell::new(scores.deck_counts[d])));
    table.add_row(counts);
    println!("\n{}", table);

    let mut summary = new_table();
    summary.add_row(vec![
        Cell::new("Net Score").add_attribute(Attribute::Bold),
        Cell::new("Adv. Ratio"),
        Cell::new("Trials"),
        Cell::new("Final").fg(Color::Cyan),
        Cell::new("Profit"),
    ]);
    align_right(&mut summary, 0..=4);
    let profit = Cell::new(format!("{:+}", scores.profit));
    summary.add_row(vec![
        Cell::new(scores.net_score).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}%", scores.advantageous_ratio * 100.0)),
        Cell::new(scores.total_trials),
        Cell::new(scores.final_balance).fg(Color::Cyan),
        if scores.profit < 0 {
            profit.fg(Color::Red)
        } else {
            profit.fg(Color::Green)
        },
    ]);
    println!("\n{}", summary);
}

/// One row per simulated strategy.
pub struct SimulationRow {
    pub strategy: String,
    pub participants: usize,
    pub mean_net_score: f64,
    pub mean_final_balance: f64,
    pub mean_deck_share: [f64; 4],
    pub best_final_balance: i64,
    pub worst_final_balance: i64,
}

pub fn print_simulation_report(rows: &[SimulationRow]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Strategy").add_attribute(Attribute::Bold),
        Cell::new("N"),
        Cell::new("Net").fg(Color::Cyan),
        Cell::new("Balance"),
        Cell::new("A%").fg(Color::Red),
        Cell::new("B%").fg(Color::Red),
        Cell::new("C%").fg(Color::Green),
        Cell::new("D%").fg(Color::Green),
        Cell::new("Best"),
        Cell::new("Worst"),
    ]);
    align_right(&mut table, 1..=9);

    for r in rows {
        let mut cells = vec![
            Cell::new(&r.strategy).add_attribute(Attribute::Bold),
            Cell::new(r.participants),
            Cell::new(format!("{:+.1}", r.mean_net_score)).fg(Color::Cyan),
            Cell::new(format!("{:.0}", r.mean_final_balance)),
        ];
        cells.extend(
            r.mean_deck_share
                .iter()
                .map(|s| Cell::new(format!("{:.1}", s * 100.0))),
        );
        cells.push(Cell::new(r.best_final_balance));
        cells.push(Cell::new(r.worst_final_balance));
        table.add_row(cells);
    }
    println!("\n{}", table);
}
