//! Service layer for hosts that drive several sessions at once.
//!
//! Each session sits behind its own lock, so operations on one session are
//! serialized while different sessions proceed independently.

use crate::config::Config;
use crate::error::{PlResult, PsyLabError};
use crate::events::EventLog;
use crate::gamble::{DeckScheduler, GambleScores, Trial};
use crate::recall::{Condition, RecallScores, WordListBuilder};
use crate::session::{GambleSession, RecallSession};
use crate::stimuli::StimulusCatalog;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Thread-safe map of live sessions keyed by session id.
pub struct SessionRegistry<T> {
    sessions: Mutex<HashMap<String, Arc<Mutex<T>>>>,
}

impl<T> Default for SessionRegistry<T> {
    fn default() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> PsyLabError {
    PsyLabError::Validation(format!("session lock poisoned: {}", e))
}

impl<T> SessionRegistry<T> {
    pub fn insert(&self, id: String, session: T) -> PlResult<()> {
        let mut guard = self.sessions.lock().map_err(poisoned)?;
        guard.insert(id, Arc::new(Mutex::new(session)));
        Ok(())
    }

    /// Runs `f` with exclusive access to one session. The registry lock is
    /// released before `f` runs.
    pub fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut T) -> R) -> PlResult<R> {
        let entry = {
            let guard = self.sessions.lock().map_err(poisoned)?;
            guard
                .get(id)
                .cloned()
                .ok_or_else(|| PsyLabError::UnknownSession(id.to_string()))?
        };
        let mut session = entry.lock().map_err(poisoned)?;
        Ok(f(&mut session))
    }

    pub fn discard(&self, id: &str) -> PlResult<Option<T>> {
        let removed = self.sessions.lock().map_err(poisoned)?.remove(id);
        let Some(entry) = removed else {
            return Ok(None);
        };
        match Arc::try_unwrap(entry) {
            Ok(m) => Ok(Some(m.into_inner().map_err(poisoned)?)),
            // Another caller still holds the session; it is dropped with them.
            Err(_) => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .sessions
            .lock()
            .map(|g| g.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }
}

/// A gamble session together with its deck cursors and logger.
pub struct GambleContext {
    pub session: GambleSession,
    pub scheduler: DeckScheduler,
    pub log: EventLog,
}

pub struct RecallContext {
    pub session: RecallSession,
    pub log: EventLog,
}

/// Global state for hosting both tasks.
pub struct PsyLabState {
    pub config: Config,
    pub catalog: StimulusCatalog,
    pub gamble: SessionRegistry<GambleContext>,
    pub recall: SessionRegistry<RecallContext>,
}

impl Default for PsyLabState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl PsyLabState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            catalog: StimulusCatalog::standard(),
            gamble: SessionRegistry::default(),
            recall: SessionRegistry::default(),
        }
    }
}

/// Service: open a gamble session and return its id.
pub fn start_gamble(
    state: &PsyLabState,
    participant_id: &str,
    seed: Option<u64>,
    mut log: EventLog,
) -> PlResult<String> {
    let params = &state.config.gamble;
    let session = GambleSession::new(participant_id, params)?;
    let scheduler = DeckScheduler::new(params.draw_mode, seed);
    log.gamble_started(&session);

    let id = session.session_id().to_string();
    state.gamble.insert(
        id.clone(),
        GambleContext {
            session,
            scheduler,
            log,
        },
    )?;
    info!("API: gamble session {} opened", id);
    Ok(id)
}

/// Service: record one deck choice. Fails without side effects on an unknown
/// deck symbol or an already finished session.
pub fn choose_deck(state: &PsyLabState, session_id: &str, symbol: &str) -> PlResult<Trial> {
    state.gamble.with_session(session_id, |ctx| {
        if ctx.session.is_finished() {
            return Err(PsyLabError::Validation(format!(
                "session {} is already completed",
                session_id
            )));
        }
        let trial = ctx
            .session
            .choose_symbol(&mut ctx.scheduler, symbol)?
            .clone();
        ctx.log.trial_recorded(&ctx.session);
        if ctx.session.is_finished() {
            ctx.log.gamble_ended(&ctx.session);
        }
        Ok(trial)
    })?
}

/// Service: end a gamble session early (or read the scores of a finished one).
pub fn finish_gamble(state: &PsyLabState, session_id: &str) -> PlResult<GambleScores> {
    state.gamble.with_session(session_id, |ctx| {
        if !ctx.session.is_finished() {
            ctx.session.complete();
            ctx.log.gamble_ended(&ctx.session);
        }
        ctx.session.scores()
    })
}

/// Service: open a recall session with a freshly built list. Returns the id and
/// the words in presentation order.
pub fn start_recall(
    state: &PsyLabState,
    participant_id: &str,
    condition: &str,
    seed: Option<u64>,
    mut log: EventLog,
) -> PlResult<(String, Vec<String>)> {
    let condition = Condition::parse(condition)?;
    let params = state.config.recall.clone();
    let num_words = params.num_words;

    let mut session = RecallSession::new(participant_id, condition, params)?;
    let words = WordListBuilder::new(&state.catalog, seed).build(condition, num_words)?;
    let shown: Vec<String> = words.iter().map(|w| w.word().to_string()).collect();
    session.present(words);
    log.recall_started(&session);

    let id = session.session_id().to_string();
    state.recall.insert(id.clone(), RecallContext { session, log })?;
    debug!("API: recall session {} presenting {:?}", id, shown);
    Ok((id, shown))
}

pub fn answer_distractor(state: &PsyLabState, session_id: &str, correct: bool) -> PlResult<()> {
    state.recall.with_session(session_id, |ctx| {
        if ctx.session.end_time().is_some() {
            return Err(PsyLabError::Validation(format!(
                "session {} is already completed",
                session_id
            )));
        }
        ctx.session.record_distractor(correct);
        Ok(())
    })?
}

/// Service: record the recalled words, complete the session and score it.
pub fn submit_recall(
    state: &PsyLabState,
    session_id: &str,
    inputs: &[String],
) -> PlResult<RecallScores> {
    state.recall.with_session(session_id, |ctx| {
        if ctx.session.end_time().is_some() {
            return Err(PsyLabError::Validation(format!(
                "session {} is already completed",
                session_id
            )));
        }
        ctx.session.record_recall(inputs);
        ctx.session.complete();
        ctx.log.recall_ended(&ctx.session);
        Ok(ctx.session.scores())
    })?
}
