use crate::error::{PlResult, PsyLabError};
use crate::gamble::DrawMode;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub recall: RecallParams,
    #[command(flatten)]
    pub gamble: GambleParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecallParams {
    #[arg(long, default_value_t = 15)]
    pub num_words: usize,
    /// Seconds each word stays on screen.
    #[arg(long, default_value_t = 2.0)]
    pub presentation_duration: f64,
    #[arg(long, default_value_t = 30)]
    pub distractor_duration: u64,
    /// 0 means the participant ends recall themselves.
    #[arg(long, default_value_t = 90)]
    pub recall_duration: u64,
}

impl Default for RecallParams {
    fn default() -> Self {
        Self {
            num_words: 15,
            presentation_duration: 2.0,
            distractor_duration: 30,
            recall_duration: 90,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GambleParams {
    #[arg(long, default_value_t = 100)]
    pub total_trials: usize,
    #[arg(long, default_value_t = 2000)]
    pub initial_balance: i64,
    /// Trials per batch handed to the event sink.
    #[arg(long, default_value_t = 100)]
    pub batch_log_interval: usize,
    #[arg(long, value_enum, default_value_t = DrawMode::Fixed)]
    pub draw_mode: DrawMode,
}

impl Default for GambleParams {
    fn default() -> Self {
        Self {
            total_trials: 100,
            initial_balance: 2000,
            batch_log_interval: 100,
            draw_mode: DrawMode::Fixed,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PlResult<Self> {
        let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PlResult<()> {
        if self.recall.num_words == 0 {
            return Err(PsyLabError::Config("num_words must be > 0".to_string()));
        }
        if !(self.recall.presentation_duration > 0.0) {
            return Err(PsyLabError::Config(
                "presentation_duration must be > 0".to_string(),
            ));
        }
        if self.gamble.total_trials == 0 {
            return Err(PsyLabError::Config("total_trials must be > 0".to_string()));
        }
        if self.gamble.batch_log_interval == 0 {
            return Err(PsyLabError::Config(
                "batch_log_interval must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlays values typed on the command line onto a file-loaded config.
    /// Flags left at their defaults do not override the file.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(recall.num_words);
        update_if_present!(recall.presentation_duration);
        update_if_present!(recall.distractor_duration);
        update_if_present!(recall.recall_duration);

        update_if_present!(gamble.total_trials);
        update_if_present!(gamble.initial_balance);
        update_if_present!(gamble.batch_log_interval);
        update_if_present!(gamble.draw_mode);
    }
}
