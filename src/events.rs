//! Optional event logging for sessions.
//!
//! The core never requires a sink. [`EventLog::disabled`] turns every call into
//! a no-op, and sink failures are reported through `tracing` without touching
//! the session that produced the event.

use crate::error::PlResult;
use crate::export::{self, EVENT_LOG_HEADER, LOG_TIME_FORMAT, TRIAL_LOG_HEADER};
use crate::session::{GambleSession, RecallSession};
use crate::util::format_duration;
use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use strum_macros::Display;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EventKind {
    General,
    SessionStart,
    SessionEnd,
    EncodingStart,
    RecallStart,
    RecallEnd,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub timestamp: DateTime<Local>,
    pub user_id: String,
    pub kind: EventKind,
    pub text: String,
}

impl LogEvent {
    pub fn now(user_id: &str, kind: EventKind, text: String) -> Self {
        Self {
            timestamp: Local::now(),
            user_id: user_id.to_string(),
            kind,
            text,
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.format(LOG_TIME_FORMAT).to_string(),
            self.user_id.clone(),
            self.kind.to_string(),
            self.text.clone(),
        ]
    }
}

/// Destination for session events and trial batches.
pub trait EventSink {
    fn log_event(&mut self, event: &LogEvent) -> PlResult<()>;
    fn log_trials(&mut self, rows: &[Vec<String>]) -> PlResult<()>;
}

/// Routes events into `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn log_event(&mut self, event: &LogEvent) -> PlResult<()> {
        info!(
            user = %event.user_id,
            kind = %event.kind,
            "{}",
            event.text
        );
        Ok(())
    }

    fn log_trials(&mut self, rows: &[Vec<String>]) -> PlResult<()> {
        info!("Trial batch: {} rows", rows.len());
        Ok(())
    }
}

/// Appends events and trial rows to two CSV streams. Headers are written once,
/// before the first row of an empty stream.
pub struct CsvSink<W: Write> {
    events: csv::Writer<W>,
    trials: csv::Writer<W>,
    events_need_header: bool,
    trials_need_header: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(events: W, trials: W) -> Self {
        Self {
            events: csv::Writer::from_writer(events),
            trials: csv::Writer::from_writer(trials),
            events_need_header: true,
            trials_need_header: true,
        }
    }
}

impl CsvSink<File> {
    /// Opens `events.csv` and `trials.csv` under `dir` for appending.
    pub fn append_to_dir<P: AsRef<Path>>(dir: P) -> PlResult<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let open = |name: &str| -> PlResult<(File, bool)> {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(name))?;
            let empty = file.metadata()?.len() == 0;
            Ok((file, empty))
        };
        let (events, events_empty) = open("events.csv")?;
        let (trials, trials_empty) = open("trials.csv")?;

        let mut sink = Self::new(events, trials);
        sink.events_need_header = events_empty;
        sink.trials_need_header = trials_empty;
        Ok(sink)
    }
}

impl<W: Write> EventSink for CsvSink<W> {
    fn log_event(&mut self, event: &LogEvent) -> PlResult<()> {
        if self.events_need_header {
            self.events.write_record(EVENT_LOG_HEADER)?;
            self.events_need_header = false;
        }
        self.events.write_record(event.to_row())?;
        self.events.flush()?;
        Ok(())
    }

    fn log_trials(&mut self, rows: &[Vec<String>]) -> PlResult<()> {
        if self.trials_need_header {
            self.trials.write_record(TRIAL_LOG_HEADER)?;
            self.trials_need_header = false;
        }
        for row in rows {
            self.trials.write_record(row)?;
        }
        self.trials.flush()?;
        Ok(())
    }
}

/// Session-facing logger with an optional sink and periodic trial batching.
pub struct EventLog {
    sink: Option<Box<dyn EventSink + Send>>,
    batch_interval: usize,
    last_logged_trial: usize,
    failures: usize,
}

impl EventLog {
    pub fn disabled() -> Self {
        Self {
            sink: None,
            batch_interval: usize::MAX,
            last_logged_trial: 0,
            failures: 0,
        }
    }

    pub fn new(sink: Box<dyn EventSink + Send>, batch_interval: usize) -> Self {
        Self {
            sink: Some(sink),
            batch_interval: batch_interval.max(1),
            last_logged_trial: 0,
            failures: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Sink calls that failed so far.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Trials already handed to the sink.
    pub fn logged_trials(&self) -> usize {
        self.last_logged_trial
    }

    pub fn emit(&mut self, user_id: &str, kind: EventKind, text: String) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let event = LogEvent::now(user_id, kind, text);
        if let Err(e) = sink.log_event(&event) {
            self.failures += 1;
            warn!("Failed to log {} event: {}", kind, e);
        }
    }

    pub fn gamble_started(&mut self, session: &GambleSession) {
        self.last_logged_trial = 0;
        self.emit(
            session.participant_id(),
            EventKind::SessionStart,
            format!(
                "Session started - Initial balance: ${}",
                session.initial_balance()
            ),
        );
    }

    /// Call after every trial; flushes whenever the trial count reaches a
    /// multiple of the batch interval.
    pub fn trial_recorded(&mut self, session: &GambleSession) {
        if session.trials().len() % self.batch_interval == 0 {
            self.flush_trials(session);
        }
    }

    /// Hands every trial not yet logged to the sink. On failure the trials stay
    /// pending for the next flush.
    pub fn flush_trials(&mut self, session: &GambleSession) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let current = session.trials().len();
        if current <= self.last_logged_trial {
            return;
        }

        let pending = &session.trials()[self.last_logged_trial..current];
        let rows = export::trial_log_rows(session, pending, Local::now());
        match sink.log_trials(&rows) {
            Ok(()) => self.last_logged_trial = current,
            Err(e) => {
                self.failures += 1;
                warn!(
                    "Failed to log {} trials for {}: {}",
                    rows.len(),
                    session.session_id(),
                    e
                );
            }
        }
    }

    pub fn gamble_ended(&mut self, session: &GambleSession) {
        self.flush_trials(session);
        let scores = session.scores();
        let c = scores.deck_counts;
        let mut text = format!(
            "Session ended - Final: ${}, Net Score: {}, A:{} B:{} C:{} D:{}",
            scores.final_balance, scores.net_score, c.a, c.b, c.c, c.d
        );
        if let Some(secs) = session.elapsed_seconds() {
            text.push_str(&format!(
                ", Duration: {} ({:.1}s)",
                format_duration(secs),
                secs
            ));
        }
        self.emit(session.participant_id(), EventKind::SessionEnd, text);
    }

    pub fn recall_started(&mut self, session: &RecallSession) {
        self.emit(
            session.participant_id(),
            EventKind::RecallStart,
            format!(
                "Recall session started - {} words, {}",
                session.presented_words().len(),
                session.condition()
            ),
        );
    }

    pub fn recall_ended(&mut self, session: &RecallSession) {
        let scores = session.scores();
        let mut text = format!(
            "Recall finished - Recalled: {}, Correct: {}, Intrusions: {}, Rate: {:.3}",
            scores.total_recalled,
            scores.correct_recalls,
            scores.intrusion_errors,
            scores.recall_rate
        );
        if let Some(secs) = session.elapsed_seconds() {
            text.push_str(&format!(", Duration: {}", format_duration(secs)));
        }
        self.emit(session.participant_id(), EventKind::RecallEnd, text);
    }
}
