//! Tabular flattening of scored sessions.
//!
//! Column order is shared with the spreadsheet collaborator, which maps
//! columns by position. Changing any header here is a format change.

use crate::error::PlResult;
use crate::gamble::Trial;
use crate::session::{GambleSession, RecallSession};
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub const RECALL_HEADER: [&str; 17] = [
    "session_id",
    "participant_id",
    "condition",
    "processing_type",
    "start_time",
    "end_time",
    "total_presented",
    "correct_recalls",
    "recall_rate",
    "intrusion_errors",
    "positive_recall",
    "negative_recall",
    "neutral_recall",
    "primacy",
    "middle",
    "recency",
    "distractor_accuracy",
];

pub const GAMBLE_HEADER: [&str; 9] = [
    "session_id",
    "participant_id",
    "trial",
    "deck",
    "reward",
    "penalty",
    "net_outcome",
    "balance",
    "timestamp",
];

/// Rows appended to the shared trial sheet in batches.
pub const TRIAL_LOG_HEADER: [&str; 9] = [
    "timestamp",
    "session_id",
    "participant_id",
    "trial",
    "deck",
    "reward",
    "penalty",
    "net_outcome",
    "balance",
];

pub const EVENT_LOG_HEADER: [&str; 4] = ["timestamp", "user_id", "event_type", "text"];

pub const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    fn new(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> PlResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.header)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> PlResult<()> {
        let path = path.as_ref();
        debug!("Writing {} rows to {}", self.rows.len(), path.display());
        self.write_csv(File::create(path)?)
    }
}

fn rate(value: f64) -> String {
    format!("{:.3}", value)
}

/// One summary row per recall session.
pub fn recall_table(session: &RecallSession) -> ExportTable {
    let scores = session.scores();
    let mut table = ExportTable::new(&RECALL_HEADER);
    table.rows.push(vec![
        session.session_id().to_string(),
        session.participant_id().to_string(),
        session.condition().to_string(),
        session.processing_type().to_string(),
        session.start_time().to_rfc3339(),
        session
            .end_time()
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
        scores.total_presented.to_string(),
        scores.correct_recalls.to_string(),
        rate(scores.recall_rate),
        scores.intrusion_errors.to_string(),
        scores.category_recall.positive.to_string(),
        scores.category_recall.negative.to_string(),
        scores.category_recall.neutral.to_string(),
        scores.serial_position.primacy.to_string(),
        scores.serial_position.middle.to_string(),
        scores.serial_position.recency.to_string(),
        rate(scores.distractor_accuracy),
    ]);
    table
}

/// One row per trial.
pub fn gamble_table(session: &GambleSession) -> ExportTable {
    let mut table = ExportTable::new(&GAMBLE_HEADER);
    for t in session.trials() {
        table.rows.push(vec![
            session.session_id().to_string(),
            session.participant_id().to_string(),
            t.trial_number.to_string(),
            t.deck_choice.to_string(),
            t.reward.to_string(),
            t.penalty.to_string(),
            t.net_outcome.to_string(),
            t.balance_after.to_string(),
            t.timestamp.to_rfc3339(),
        ]);
    }
    table
}

/// Batch-log rows for `trials`, all stamped with the flush time.
pub fn trial_log_rows(
    session: &GambleSession,
    trials: &[Trial],
    logged_at: DateTime<Local>,
) -> Vec<Vec<String>> {
    let stamp = logged_at.format(LOG_TIME_FORMAT).to_string();
    trials
        .iter()
        .map(|t| {
            vec![
                stamp.clone(),
                session.session_id().to_string(),
                session.participant_id().to_string(),
                t.trial_number.to_string(),
                t.deck_choice.to_string(),
                t.reward.to_string(),
                t.penalty.to_string(),
                t.net_outcome.to_string(),
                t.balance_after.to_string(),
            ]
        })
        .collect()
}
