use crate::reports;
use clap::Args;
use psylab::config::Config;
use psylab::error::PlResult;
use psylab::events::{CsvSink, EventLog, TracingSink};
use psylab::export;
use psylab::gamble::{Deck, DeckScheduler};
use psylab::session::GambleSession;
use strum::IntoEnumIterator;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct GambleArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short, long, default_value = "P001")]
    pub participant: String,

    /// Deck symbols in choice order, e.g. "AABCD". Separators are ignored.
    #[arg(long, default_value = "")]
    pub choices: String,

    /// Fill the remaining trials with random deck choices.
    #[arg(long, default_value_t = false)]
    pub fill_random: bool,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Print every trial, not just the summary.
    #[arg(long, default_value_t = false)]
    pub trials: bool,

    /// Write events and trial batches to CSV under --out.
    #[arg(long, default_value_t = false)]
    pub log_csv: bool,
}

pub fn run(args: GambleArgs, config: Config, out: Option<&str>) -> PlResult<()> {
    let params = &config.gamble;
    let mut scheduler = DeckScheduler::new(params.draw_mode, args.seed);
    let mut session = GambleSession::new(&args.participant, params)?;

    let mut log = match (args.log_csv, out) {
        (true, Some(dir)) => EventLog::new(
            Box::new(CsvSink::append_to_dir(dir)?),
            params.batch_log_interval,
        ),
        _ => EventLog::new(Box::new(TracingSink), params.batch_log_interval),
    };
    log.gamble_started(&session);

    info!(
        "🃏 Session {} ({} trials, {} mode, balance ${})",
        session.session_id(),
        session.total_trials(),
        scheduler.mode(),
        session.initial_balance()
    );

    let symbols = args
        .choices
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',');
    for symbol in symbols {
        if session.is_finished() {
            break;
        }
        match session.choose_symbol(&mut scheduler, &symbol.to_string()) {
            Ok(_) => log.trial_recorded(&session),
            Err(e) => warn!("⚠️  Skipping choice: {}", e),
        }
    }

    if args.fill_random && !session.is_finished() {
        let decks: Vec<Deck> = Deck::iter().collect();
        let mut rng = match args.seed {
            Some(s) => fastrand::Rng::with_seed(s.wrapping_add(1)),
            None => fastrand::Rng::new(),
        };
        while !session.is_finished() {
            let deck = decks[rng.usize(..decks.len())];
            session.choose(&mut scheduler, deck);
            log.trial_recorded(&session);
        }
    }

    if !session.is_finished() {
        warn!(
            "⚠️  Ending early after {} of {} trials",
            session.trials().len(),
            session.total_trials()
        );
        session.complete();
    }
    log.gamble_ended(&session);

    if args.trials {
        reports::print_trials(session.trials());
    }
    reports::print_gamble_report(&session.scores());

    if let Some(dir) = out {
        let table = export::gamble_table(&session);
        super::save_session(dir, session.session_id(), &session.to_value(), Some(&table))?;
    }
    Ok(())
}
