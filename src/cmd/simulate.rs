use crate::reports::{self, SimulationRow};
use clap::Args;
use psylab::config::{Config, GambleParams};
use psylab::error::PlResult;
use psylab::gamble::{Deck, DeckScheduler, GambleScores};
use psylab::session::GambleSession;
use rayon::prelude::*;
use std::time::Instant;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, clap::ValueEnum)]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    /// Uniform choice on every trial.
    Random,
    /// Drifts from uniform toward decks C/D as trials progress.
    Learner,
    /// Always A or B.
    Reckless,
}

impl Strategy {
    /// Probability of picking an advantageous deck at `progress` in [0, 1].
    fn advantageous_bias(self, progress: f64) -> f64 {
        match self {
            Strategy::Random => 0.5,
            Strategy::Learner => 0.5 + 0.4 * progress,
            Strategy::Reckless => 0.0,
        }
    }

    fn pick(self, rng: &mut fastrand::Rng, progress: f64) -> Deck {
        let good = rng.f64() < self.advantageous_bias(progress);
        match (good, rng.bool()) {
            (true, true) => Deck::C,
            (true, false) => Deck::D,
            (false, true) => Deck::A,
            (false, false) => Deck::B,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short = 'N', long, default_value_t = 200)]
    pub participants: usize,

    /// Strategies to compare. Defaults to all of them.
    #[arg(long, value_enum, value_delimiter = ',')]
    pub strategy: Vec<Strategy>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

fn run_participant(
    params: &GambleParams,
    strategy: Strategy,
    seed: Option<u64>,
) -> PlResult<GambleScores> {
    let mut session = GambleSession::new("SIM", params)?;
    let mut scheduler = DeckScheduler::new(params.draw_mode, seed);
    let mut rng = match seed {
        Some(s) => fastrand::Rng::with_seed(s ^ 0x5eed),
        None => fastrand::Rng::new(),
    };

    let total = session.total_trials();
    while !session.is_finished() {
        let progress = session.trials().len() as f64 / total as f64;
        session.choose(&mut scheduler, strategy.pick(&mut rng, progress));
    }
    Ok(session.scores())
}

fn summarize(strategy: Strategy, scores: &[GambleScores]) -> SimulationRow {
    let n = scores.len().max(1) as f64;
    let mut share = [0.0f64; 4];
    for s in scores {
        let total = s.total_trials.max(1) as f64;
        for (i, deck) in Deck::iter().enumerate() {
            share[i] += s.deck_counts[deck] as f64 / total;
        }
    }
    for v in share.iter_mut() {
        *v /= n;
    }

    SimulationRow {
        strategy: strategy.to_string(),
        participants: scores.len(),
        mean_net_score: scores.iter().map(|s| s.net_score as f64).sum::<f64>() / n,
        mean_final_balance: scores.iter().map(|s| s.final_balance as f64).sum::<f64>() / n,
        mean_deck_share: share,
        best_final_balance: scores.iter().map(|s| s.final_balance).max().unwrap_or(0),
        worst_final_balance: scores.iter().map(|s| s.final_balance).min().unwrap_or(0),
    }
}

pub fn run(args: SimulateArgs, config: Config) -> PlResult<()> {
    let strategies = if args.strategy.is_empty() {
        Strategy::iter().collect()
    } else {
        args.strategy.clone()
    };

    info!(
        "🔥 Simulating {} participants x {} strategies on {} threads",
        args.participants,
        strategies.len(),
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let mut rows = Vec::with_capacity(strategies.len());
    for (k, strategy) in strategies.iter().enumerate() {
        let base = args.seed.map(|s| s.wrapping_add((k as u64).wrapping_mul(1_000_003)));
        let scores = (0..args.participants)
            .into_par_iter()
            .map(|i| {
                let seed = base.map(|b| b.wrapping_add(i as u64));
                run_participant(&config.gamble, *strategy, seed)
            })
            .collect::<PlResult<Vec<_>>>()?;
        rows.push(summarize(*strategy, &scores));
    }

    info!("🏁 Done in {:.2}s", start.elapsed().as_secs_f64());
    reports::print_simulation_report(&rows);
    Ok(())
}
