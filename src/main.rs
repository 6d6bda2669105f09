use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use psylab::config::Config;
use std::process;
use tracing::{error, info, warn};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with task parameters. Flags given on the command line win.
    #[arg(global = true, long)]
    config: Option<String>,

    /// Directory for session JSON/CSV files and event logs.
    #[arg(global = true, short, long)]
    out: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Catalog(cmd::catalog::CatalogArgs),
    Recall(cmd::recall::RecallArgs),
    Gamble(cmd::gamble::GambleArgs),
    Simulate(cmd::simulate::SimulateArgs),
}

fn resolve_config(path: &Option<String>, cli_config: &Config, sub_matches: &ArgMatches) -> Config {
    let Some(path) = path else {
        return cli_config.clone();
    };

    info!("📂 Loading config from: {}", path);
    match Config::load_from_file(path) {
        Ok(mut file_config) => {
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        Err(e) => {
            warn!("⚠️  Could not load '{}': {}. Using flags/defaults.", path, e);
            cli_config.clone()
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let (cli_config, sub_name) = match &cli.command {
        Commands::Catalog(_) => (None, "catalog"),
        Commands::Recall(args) => (Some(&args.config), "recall"),
        Commands::Gamble(args) => (Some(&args.config), "gamble"),
        Commands::Simulate(args) => (Some(&args.config), "simulate"),
    };

    let config = match (cli_config, matches.subcommand_matches(sub_name)) {
        (Some(c), Some(sub)) => resolve_config(&cli.config, c, sub),
        _ => Config::default(),
    };

    if let Err(e) = config.validate() {
        error!("❌ {}", e);
        process::exit(1);
    }

    let result = match cli.command {
        Commands::Catalog(args) => cmd::catalog::run(args),
        Commands::Recall(args) => cmd::recall::run(args, config, cli.out.as_deref()),
        Commands::Gamble(args) => cmd::gamble::run(args, config, cli.out.as_deref()),
        Commands::Simulate(args) => cmd::simulate::run(args, config),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
