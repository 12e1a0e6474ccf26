use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use snake_session::audio::{AudioSink, Silent, TerminalBell};
use snake_session::game::GameConfig;
use snake_session::modes::HumanMode;

#[derive(Parser)]
#[command(name = "snake_session")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Grid width
    #[arg(long, default_value = "20")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "20")]
    height: usize,

    /// Where to write the log (the terminal is taken by the game)
    #[arg(long, default_value = "snake_session.log")]
    log_file: PathBuf,

    /// Log every tick and transition
    #[arg(long)]
    verbose: bool,

    /// Do not ring the terminal bell
    #[arg(long)]
    mute: bool,
}

/// File logging is best effort: the game runs without it.
fn init_logging(path: &Path, level: LevelFilter) {
    let log_file = match File::create(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!(
                "warning: cannot create log file {}: {err}; continuing without logs",
                path.display()
            );
            return;
        }
    };
    if let Err(err) = WriteLogger::init(level, Config::default(), log_file) {
        eprintln!("warning: cannot initialize logger: {err}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_logging(&cli.log_file, level);

    // Create game configuration from CLI arguments
    let config = GameConfig::new(cli.width, cli.height);
    info!(
        "starting on a {}x{} grid",
        config.grid_width, config.grid_height
    );

    let audio: Box<dyn AudioSink> = if cli.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::stderr())
    };

    let mut human_mode = HumanMode::new(config, audio)?;
    human_mode.run().await?;

    info!("bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flagless_launch_defaults() {
        let cli = Cli::parse_from(["snake_session"]);
        assert_eq!(cli.width, 20);
        assert_eq!(cli.height, 20);
        assert_eq!(cli.log_file, PathBuf::from("snake_session.log"));
        assert!(!cli.mute);
    }

    #[test]
    fn test_unwritable_log_file_is_not_fatal() {
        init_logging(
            Path::new("/nonexistent-snake-dir/nested/snake_session.log"),
            LevelFilter::Info,
        );
    }
}
