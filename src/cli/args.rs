use crate::constants::verbosity;
use crate::placeholder::WriteMode;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// CLI arguments for mcpacker.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding `build.setting.json`, `default/`, `built/` and `backup/`.
    ///
    /// Defaults to the directory containing the executable.
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Skip zip backups of `default/` and `built/`.
    #[arg(long = "no-backup")]
    pub no_backup: bool,

    /// Only match files directly inside the matching top-level folders of `built/`.
    #[arg(long)]
    pub flat: bool,

    /// When substituted files are written to disk.
    #[arg(long = "write-mode", value_enum, default_value_t = WriteMode::PerPlaceholder)]
    pub write_mode: WriteMode,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments.
pub fn get_args() -> Args {
    Args::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
