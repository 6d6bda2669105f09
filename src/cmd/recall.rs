use crate::reports;
use clap::Args;
use psylab::config::Config;
use psylab::distractor::MathProblem;
use psylab::error::PlResult;
use psylab::events::{CsvSink, EventKind, EventLog, TracingSink};
use psylab::export;
use psylab::recall::{Condition, WordListBuilder};
use psylab::session::RecallSession;
use psylab::stimuli::StimulusCatalog;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct RecallArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short, long, default_value = "P001")]
    pub participant: String,

    #[arg(long, value_enum, default_value_t = Condition::Mixed)]
    pub condition: Condition,

    /// Use the canonical 15-word list instead of sampling.
    #[arg(long, default_value_t = false)]
    pub fixed: bool,

    /// With --fixed, shuffle the canonical list.
    #[arg(long, default_value_t = false)]
    pub shuffle: bool,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Encoding instruction label stored with the session.
    #[arg(long, default_value = "none")]
    pub processing_type: String,

    /// Answers to the generated math problems, in order.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub answers: Vec<i64>,

    /// Words the participant recalled, in entry order.
    #[arg(long, value_delimiter = ',')]
    pub recalled: Vec<String>,

    /// Write events to CSV under --out instead of the console log.
    #[arg(long, default_value_t = false)]
    pub log_csv: bool,
}

pub fn run(args: RecallArgs, config: Config, out: Option<&str>) -> PlResult<()> {
    let catalog = StimulusCatalog::standard();
    let params = config.recall.clone();

    let mut log = match (args.log_csv, out) {
        (true, Some(dir)) => EventLog::new(
            Box::new(CsvSink::append_to_dir(dir)?),
            config.gamble.batch_log_interval,
        ),
        _ => EventLog::new(Box::new(TracingSink), config.gamble.batch_log_interval),
    };

    let mut builder = WordListBuilder::new(&catalog, args.seed);
    let words = if args.fixed {
        builder.fixed_list(args.shuffle)?
    } else {
        builder.build(args.condition, params.num_words)?
    };

    let mut session = RecallSession::new(&args.participant, args.condition, params)?
        .with_processing_type(&args.processing_type);
    info!(
        "🧠 Session {} ({} words, {})",
        session.session_id(),
        words.len(),
        args.condition
    );

    reports::print_word_list(&words);
    session.present(words);
    log.emit(
        session.participant_id(),
        EventKind::EncodingStart,
        format!("Presenting {} words", session.presented_words().len()),
    );

    let mut rng = match args.seed {
        Some(s) => fastrand::Rng::with_seed(s.wrapping_add(1)),
        None => fastrand::Rng::new(),
    };
    for answer in &args.answers {
        let problem = MathProblem::generate(&mut rng);
        let correct = problem.check(*answer);
        info!(
            "🔢 {} -> {} ({})",
            problem.prompt,
            answer,
            if correct { "correct" } else { "wrong" }
        );
        session.record_distractor(correct);
    }

    log.recall_started(&session);
    let responses = session.record_recall(&args.recalled).to_vec();
    reports::print_recall_responses(&responses);

    session.complete();
    log.recall_ended(&session);

    let scores = session.scores();
    reports::print_recall_report(&scores);

    if let Some(dir) = out {
        let table = export::recall_table(&session);
        super::save_session(dir, session.session_id(), &session.to_value(), Some(&table))?;
    }
    Ok(())
}
