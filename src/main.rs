use std::{error::Error as _, io, path::PathBuf, process::ExitCode};

use clap::Parser;
use minesweeper::{
    app::App,
    settings::{Difficulty, Settings},
    Result,
};

#[derive(Parser, Debug)]
#[command(name = "minesweeper-cli", about = "Minesweeper in the terminal", version)]
struct Args {
    /// JSON settings file, applied before the flags below
    #[arg(long)]
    config: Option<PathBuf>,
    /// Board side length
    #[arg(long)]
    size: Option<usize>,
    /// Skip the difficulty menu
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,
    /// Number of mines, overrides the difficulty
    #[arg(long)]
    mines: Option<usize>,
    /// Seed for mine placement
    #[arg(long)]
    seed: Option<u64>,
    /// Refuse to reveal flagged cells
    #[arg(long)]
    protect_flags: bool,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        if let Some(size) = self.size {
            settings.size = size;
        }
        if self.difficulty.is_some() {
            settings.difficulty = self.difficulty;
        }
        if self.mines.is_some() {
            settings.mines = self.mines;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        settings.protect_flags |= self.protect_flags;

        settings.validate()?;
        Ok(settings)
    }
}

fn run(args: &Args) -> Result<()> {
    let settings = args.settings()?;
    log::debug!("{settings:?}");

    let mut rng = settings.rng();
    let mut app = App::new(settings, io::stdin().lock(), io::stdout().lock());
    app.run(&mut rng)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
