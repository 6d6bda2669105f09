//! Session records for both tasks.
//!
//! A session moves `Created -> InProgress -> Completed`. The first appended
//! stimulus or trial starts it, and completion stamps the end time. Appending to
//! a completed session is a caller bug and panics. A session that is abandoned
//! is simply never completed.

use crate::config::{GambleParams, RecallParams};
use crate::error::{PlResult, PsyLabError};
use crate::gamble::{self, Deck, DeckScheduler, GambleScores, Trial};
use crate::recall::{self, Condition, PresentedWord, RecallResponse, RecallScores};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;
use strum_macros::Display;
use tracing::debug;
use uuid::Uuid;

pub const RECALL_ID_PREFIX: &str = "FR";
pub const GAMBLE_ID_PREFIX: &str = "IGT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Created,
    InProgress,
    Completed,
}

/// `{prefix}_{YYYYmmdd_HHMMSS}_{6 hex chars}`
pub fn generate_session_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}",
        prefix,
        Local::now().format("%Y%m%d_%H%M%S"),
        &suffix[..6]
    )
}

fn require_participant(participant_id: &str) -> PlResult<String> {
    let id = participant_id.trim();
    if id.is_empty() {
        return Err(PsyLabError::Validation(
            "participant id must not be empty".to_string(),
        ));
    }
    Ok(id.to_string())
}

fn elapsed_seconds(start: DateTime<Local>, end: Option<DateTime<Local>>) -> Option<f64> {
    end.map(|e| (e - start).num_milliseconds() as f64 / 1000.0)
}

#[derive(Debug, Clone)]
pub struct RecallSession {
    session_id: String,
    participant_id: String,
    condition: Condition,
    processing_type: String,
    start_time: DateTime<Local>,
    end_time: Option<DateTime<Local>>,
    params: RecallParams,
    presented_words: Vec<PresentedWord>,
    recalled_words: Vec<RecallResponse>,
    distractor_correct: usize,
    distractor_total: usize,
    state: SessionState,
}

impl RecallSession {
    pub fn new(participant_id: &str, condition: Condition, params: RecallParams) -> PlResult<Self> {
        let participant_id = require_participant(participant_id)?;
        let session_id = generate_session_id(RECALL_ID_PREFIX);
        debug!(
            "Recall session {} created for {} ({})",
            session_id, participant_id, condition
        );
        Ok(Self {
            session_id,
            participant_id,
            condition,
            processing_type: "none".to_string(),
            start_time: Local::now(),
            end_time: None,
            params,
            presented_words: Vec::new(),
            recalled_words: Vec::new(),
            distractor_correct: 0,
            distractor_total: 0,
            state: SessionState::Created,
        })
    }

    /// Encoding instruction label (e.g. `semantic`, `perceptual`).
    pub fn with_processing_type(mut self, processing_type: &str) -> Self {
        self.processing_type = processing_type.to_string();
        self
    }

    fn ensure_open(&self, action: &str) {
        assert!(
            self.state != SessionState::Completed,
            "cannot {} on completed session {}",
            action,
            self.session_id
        );
    }

    fn mark_started(&mut self) {
        if self.state == SessionState::Created {
            self.state = SessionState::InProgress;
        }
    }

    /// Sets the word list once. Orders must run 1..=N in list order.
    pub fn present(&mut self, words: Vec<PresentedWord>) {
        self.ensure_open("present words");
        assert!(
            self.presented_words.is_empty(),
            "words already presented in session {}",
            self.session_id
        );
        assert!(
            words
                .iter()
                .enumerate()
                .all(|(i, w)| w.presentation_order == i + 1),
            "presentation order must run 1..={} in session {}",
            words.len(),
            self.session_id
        );
        debug!("{}: presenting {} words", self.session_id, words.len());
        self.presented_words = words;
        self.mark_started();
    }

    pub fn record_distractor(&mut self, correct: bool) {
        self.ensure_open("record a distractor answer");
        self.distractor_total += 1;
        if correct {
            self.distractor_correct += 1;
        }
        self.mark_started();
    }

    /// Appends the participant's recalled words in entry order. Words already
    /// recorded, blanks and repeats are skipped; `recall_order` continues from
    /// the previous entries.
    pub fn record_recall<S: AsRef<str>>(&mut self, inputs: &[S]) -> &[RecallResponse] {
        self.ensure_open("record recall");
        let already: HashSet<String> = self
            .recalled_words
            .iter()
            .map(|r| r.recalled_word.clone())
            .collect();
        let fresh: Vec<&str> = inputs
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|w| !already.contains(*w))
            .collect();

        let offset = self.recalled_words.len();
        self.recalled_words.extend(
            RecallResponse::from_inputs(&self.presented_words, &fresh)
                .into_iter()
                .map(|mut r| {
                    r.recall_order += offset;
                    r
                }),
        );
        self.mark_started();
        &self.recalled_words[offset..]
    }

    pub fn complete(&mut self) {
        self.ensure_open("complete");
        self.end_time = Some(Local::now());
        self.state = SessionState::Completed;
        debug!(
            "Recall session {} completed: {} presented, {} recalled",
            self.session_id,
            self.presented_words.len(),
            self.recalled_words.len()
        );
    }

    pub fn scores(&self) -> RecallScores {
        recall::score(
            &self.presented_words,
            &self.recalled_words,
            self.distractor_correct,
            self.distractor_total,
        )
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn participant_id(&self) -> &str {
        &self.participant_id
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn processing_type(&self) -> &str {
        &self.processing_type
    }

    pub fn start_time(&self) -> DateTime<Local> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Local>> {
        self.end_time
    }

    pub fn params(&self) -> &RecallParams {
        &self.params
    }

    pub fn presented_words(&self) -> &[PresentedWord] {
        &self.presented_words
    }

    pub fn recalled_words(&self) -> &[RecallResponse] {
        &self.recalled_words
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn elapsed_seconds(&self) -> Option<f64> {
        elapsed_seconds(self.start_time, self.end_time)
    }

    pub fn to_value(&self) -> Value {
        json!({
            "session_id": self.session_id,
            "participant_id": self.participant_id,
            "condition": self.condition,
            "processing_type": self.processing_type,
            "start_time": self.start_time.to_rfc3339(),
            "end_time": self.end_time.map(|t| t.to_rfc3339()),
            "num_words": self.params.num_words,
            "presentation_duration": self.params.presentation_duration,
            "distractor_duration": self.params.distractor_duration,
            "recall_duration": self.params.recall_duration,
            "presented_words": self.presented_words,
            "recalled_words": self.recalled_words,
            "distractor_correct": self.distractor_correct,
            "distractor_total": self.distractor_total,
        })
    }

    pub fn to_json(&self) -> PlResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_value())?)
    }
}

#[derive(Debug, Clone)]
pub struct GambleSession {
    session_id: String,
    participant_id: String,
    start_time: DateTime<Local>,
    end_time: Option<DateTime<Local>>,
    trials: Vec<Trial>,
    initial_balance: i64,
    current_balance: i64,
    total_trials: usize,
    state: SessionState,
}

impl GambleSession {
    pub fn new(participant_id: &str, params: &GambleParams) -> PlResult<Self> {
        let participant_id = require_participant(participant_id)?;
        if params.total_trials == 0 {
            return Err(PsyLabError::Validation(
                "total_trials must be greater than 0".to_string(),
            ));
        }
        let session_id = generate_session_id(GAMBLE_ID_PREFIX);
        debug!(
            "Gamble session {} created for {} (balance {})",
            session_id, participant_id, params.initial_balance
        );
        Ok(Self {
            session_id,
            participant_id,
            start_time: Local::now(),
            end_time: None,
            trials: Vec::new(),
            initial_balance: params.initial_balance,
            current_balance: params.initial_balance,
            total_trials: params.total_trials,
            state: SessionState::Created,
        })
    }

    fn ensure_open(&self, action: &str) {
        assert!(
            self.state != SessionState::Completed,
            "cannot {} on completed session {}",
            action,
            self.session_id
        );
    }

    /// Draws from `deck`, records the trial and completes the session once the
    /// configured number of trials is reached.
    pub fn choose(&mut self, scheduler: &mut DeckScheduler, deck: Deck) -> &Trial {
        self.ensure_open("draw a card");

        let draw = scheduler.draw(deck);
        let trial = Trial::new(self.trials.len() + 1, deck, draw, self.current_balance);
        self.current_balance = trial.balance_after;
        debug!("{}: {}", self.session_id, trial);
        self.trials.push(trial);

        if self.state == SessionState::Created {
            self.state = SessionState::InProgress;
        }
        if self.trials.len() >= self.total_trials {
            self.complete();
        }

        &self.trials[self.trials.len() - 1]
    }

    /// Like [`choose`](Self::choose) but from a raw symbol. An unknown symbol is
    /// rejected before anything is drawn or recorded.
    pub fn choose_symbol(
        &mut self,
        scheduler: &mut DeckScheduler,
        symbol: &str,
    ) -> PlResult<&Trial> {
        let deck = Deck::parse(symbol)?;
        Ok(self.choose(scheduler, deck))
    }

    pub fn complete(&mut self) {
        self.ensure_open("complete");
        self.end_time = Some(Local::now());
        self.state = SessionState::Completed;
        debug!(
            "Gamble session {} completed after {} trials, balance {}",
            self.session_id,
            self.trials.len(),
            self.current_balance
        );
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn scores(&self) -> GambleScores {
        gamble::score(&self.trials, self.initial_balance)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn participant_id(&self) -> &str {
        &self.participant_id
    }

    pub fn start_time(&self) -> DateTime<Local> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Local>> {
        self.end_time
    }

    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    pub fn initial_balance(&self) -> i64 {
        self.initial_balance
    }

    pub fn current_balance(&self) -> i64 {
        self.current_balance
    }

    pub fn total_trials(&self) -> usize {
        self.total_trials
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn elapsed_seconds(&self) -> Option<f64> {
        elapsed_seconds(self.start_time, self.end_time)
    }

    pub fn to_value(&self) -> Value {
        let trials: Vec<Value> = self
            .trials
            .iter()
            .map(|t| {
                json!({
                    "trial": t.trial_number,
                    "deck": t.deck_choice,
                    "reward": t.reward,
                    "penalty": t.penalty,
                    "net": t.net_outcome,
                    "balance": t.balance_after,
                    "time": t.timestamp.to_rfc3339(),
                })
            })
            .collect();

        json!({
            "session_id": self.session_id,
            "participant_id": self.participant_id,
            "start_time": self.start_time.to_rfc3339(),
            "end_time": self.end_time.map(|t| t.to_rfc3339()),
            "initial_balance": self.initial_balance,
            "final_balance": self.current_balance,
            "total_trials_completed": self.trials.len(),
            "trials": trials,
        })
    }

    pub fn to_json(&self) -> PlResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_value())?)
    }
}
