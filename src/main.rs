use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{terminal as term, tty::IsTty};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use typa_trial::config::AppConfig;
use typa_trial::passages::PassagePool;
use typa_trial::session::{self, Session, WallClock};
use typa_trial::LeaderboardStore;

#[derive(Parser, Debug)]
#[command(name = "typa-trial")]
#[command(version)]
#[command(about = "A terminal typing speed trainer with a persistent leaderboard", long_about = None)]
struct Cli {
    /// Leaderboard file to read and update (overrides the config file)
    #[arg(long, value_name = "PATH")]
    scores_file: Option<PathBuf>,

    /// Print the leaderboard for every difficulty and exit
    #[arg(long, default_value_t = false)]
    leaderboard: bool,

    /// Never clear the screen between prompts
    #[arg(long, default_value_t = false)]
    no_clear: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let app_config = AppConfig::load().unwrap_or_else(|e| {
        // a missing file is fine; this only catches unreadable or malformed ones
        warn!(error = %e, "failed to load config, using defaults");
        AppConfig::default()
    });

    let scores_file = cli.scores_file.unwrap_or(app_config.scores_file);
    let store = LeaderboardStore::new(scores_file);
    debug!(path = %store.path().display(), "using leaderboard file");

    let board = store
        .load()
        .with_context(|| format!("cannot start with leaderboard {}", store.path().display()))?;

    if cli.leaderboard {
        let mut stdout = io::stdout().lock();
        session::write_all_standings(&mut stdout, &board)?;
        writeln!(stdout)?;
        return Ok(());
    }

    let passages = PassagePool::embedded()?;
    let stdout = io::stdout();
    let clear_screen = app_config.clear_screen && !cli.no_clear && stdout.is_tty();
    let wrap_width = term::size().map(|(w, _)| w as usize).unwrap_or(80);

    let mut session = Session::new(
        io::stdin().lock(),
        stdout.lock(),
        WallClock::default(),
        passages,
        store,
        board,
    )
    .with_clear_screen(clear_screen)
    .with_wrap_width(wrap_width);

    session.run()
}
