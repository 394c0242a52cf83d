use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "questions";
pub const DEFAULT_LOG_FILE: &str = "quiz_debug.log";

/// Practice vocabulary, cloze, reading and translation questions in the terminal.
#[derive(Debug, Clone, Parser)]
#[command(name = "question-drill", version)]
pub struct Config {
    /// Directory holding vocabulary.csv, cloze.csv, reading.csv and translation.csv
    #[arg(long, env = "QUIZ_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Append debug output to this file
    #[arg(long, env = "QUIZ_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Don't write a debug log
    #[arg(long)]
    pub no_log: bool,
}

impl Config {
    pub fn log_path(&self) -> Option<&PathBuf> {
        (!self.no_log).then_some(&self.log_file)
    }
}
