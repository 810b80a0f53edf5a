use crate::attempt::Attempt;
use crate::leaderboard::{Leaderboard, LeaderboardStore};
use crate::models::Difficulty;
use crate::passages::PassagePool;
use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::{debug, error};

const DEFAULT_WRAP_WIDTH: usize = 80;

/// Measures the time between the start of typing and submission.
pub trait Stopwatch {
    fn start(&mut self);
    /// Seconds since the last [`Stopwatch::start`].
    fn elapsed_secs(&self) -> f64;
}

#[derive(Debug, Default)]
pub struct WallClock {
    started: Option<Instant>,
}

impl Stopwatch for WallClock {
    fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    fn elapsed_secs(&self) -> f64 {
        self.started
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MenuChoice {
    Retry,
    ViewScores,
    Exit,
}

/// The interactive prompt loop. Owns the in-memory leaderboard for the
/// lifetime of the process and is the only writer to it.
pub struct Session<R, W, S> {
    input: R,
    output: W,
    stopwatch: S,
    passages: PassagePool,
    store: LeaderboardStore,
    board: Leaderboard,
    clear_screen: bool,
    wrap_width: usize,
}

impl<R: BufRead, W: Write, S: Stopwatch> Session<R, W, S> {
    pub fn new(
        input: R,
        output: W,
        stopwatch: S,
        passages: PassagePool,
        store: LeaderboardStore,
        board: Leaderboard,
    ) -> Self {
        Self {
            input,
            output,
            stopwatch,
            passages,
            store,
            board,
            clear_screen: false,
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }

    pub fn with_clear_screen(mut self, enabled: bool) -> Self {
        self.clear_screen = enabled;
        self
    }

    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width.max(20);
        self
    }

    pub fn board(&self) -> &Leaderboard {
        &self.board
    }

    /// Runs tests until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            if self.run_test()?.is_none() {
                break;
            }

            match self.after_test_menu()? {
                Some(MenuChoice::Retry) => continue,
                Some(MenuChoice::ViewScores) => {
                    self.clear()?;
                    write_all_standings(&mut self.output, &self.board)?;
                    write!(self.output, "\nPress Enter to continue...")?;
                    self.output.flush()?;
                    if self.read_line()?.is_none() {
                        break;
                    }
                }
                Some(MenuChoice::Exit) | None => break,
            }
        }

        writeln!(self.output, "\nThanks for practicing your typing speed!")?;
        self.output.flush()?;
        Ok(())
    }

    /// One full test. `None` means input ended before the test finished.
    pub fn run_test(&mut self) -> Result<Option<Attempt>> {
        self.clear()?;
        writeln!(self.output, "Welcome to the Advanced Typing Speed Test!")?;

        let Some(difficulty) = self.choose_difficulty()? else {
            return Ok(None);
        };

        let passage = self
            .passages
            .pick(difficulty, &mut rand::rng())
            .to_string();
        debug!(%difficulty, chars = passage.chars().count(), "picked passage");

        writeln!(self.output, "\nPrepare to type the following text:\n")?;
        self.write_passage(&passage)?;
        write!(self.output, "\nPress Enter when you're ready to begin...")?;
        self.output.flush()?;
        if self.read_line()?.is_none() {
            return Ok(None);
        }

        self.clear()?;
        writeln!(self.output, "Type this text:\n")?;
        self.write_passage(&passage)?;
        writeln!(self.output)?;
        self.output.flush()?;

        self.stopwatch.start();
        let Some(typed) = self.read_line()? else {
            return Ok(None);
        };
        let elapsed = self.stopwatch.elapsed_secs();

        let attempt = Attempt::evaluate(difficulty, &passage, &typed, elapsed)
            .context("could not score the attempt")?;

        self.clear()?;
        writeln!(self.output, "\n{}", attempt)?;

        if let Err(err) = self.store.record_score(
            &mut self.board,
            difficulty,
            attempt.score,
            attempt.wpm,
            attempt.accuracy,
        ) {
            error!(error = %err, "score was not saved");
            writeln!(self.output, "\nWarning: your score was not saved: {}", err)?;
        }

        writeln!(self.output, "\n{}", self.board.render(difficulty))?;
        self.output.flush()?;

        Ok(Some(attempt))
    }

    fn choose_difficulty(&mut self) -> Result<Option<Difficulty>> {
        writeln!(self.output, "\nSelect difficulty level:")?;
        for difficulty in Difficulty::ALL {
            writeln!(
                self.output,
                "{}. {} ({}x score multiplier)",
                difficulty.menu_key(),
                difficulty.label(),
                difficulty.multiplier()
            )?;
        }

        loop {
            write!(self.output, "\nEnter your choice (1-3): ")?;
            self.output.flush()?;

            let Some(choice) = self.read_line()? else {
                return Ok(None);
            };
            if let Some(difficulty) = Difficulty::from_menu_choice(&choice) {
                return Ok(Some(difficulty));
            }
            writeln!(self.output, "Invalid choice. Please try again.")?;
        }
    }

    fn after_test_menu(&mut self) -> Result<Option<MenuChoice>> {
        writeln!(self.output, "\nWould you like to:")?;
        writeln!(self.output, "1. Try again")?;
        writeln!(self.output, "2. View high scores")?;
        writeln!(self.output, "3. Exit")?;
        write!(self.output, "\nEnter your choice (1-3): ")?;
        self.output.flush()?;

        let choice = self.read_line()?.map(|line| match line.as_str() {
            "1" => MenuChoice::Retry,
            "2" => MenuChoice::ViewScores,
            _ => MenuChoice::Exit,
        });
        Ok(choice)
    }

    fn write_passage(&mut self, passage: &str) -> io::Result<()> {
        writeln!(self.output, "{}", textwrap::fill(passage, self.wrap_width))
    }

    /// One line without its line ending, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }
}

/// Every tier's table, easiest first.
pub fn write_all_standings<W: Write>(out: &mut W, board: &Leaderboard) -> io::Result<()> {
    for difficulty in Difficulty::ALL {
        writeln!(out, "\n{}", board.render(difficulty))?;
    }
    Ok(())
}
