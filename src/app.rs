use std::io::{BufRead, Write};

use itertools::Itertools;
use rand::Rng;

use crate::{
    error::{Error, Result},
    session::{Game, GameState},
    settings::{Difficulty, Settings},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Action {
    Reveal,
    Flag,
}

impl Action {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "r" | "R" => Some(Self::Reveal),
            "f" | "F" => Some(Self::Flag),
            _ => None,
        }
    }
}

/// Parses `row col`, both zero-based.
fn parse_position(input: &str) -> Option<(usize, usize)> {
    let (row, col) = input.split_whitespace().collect_tuple()?;
    Some((row.parse().ok()?, col.parse().ok()?))
}

/// The text front end: asks for a difficulty if needed, then prompts for moves until the game
/// ends, the player quits, or input runs out.
pub struct App<R, W> {
    settings: Settings,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(settings: Settings, input: R, output: W) -> Self {
        Self {
            settings,
            input,
            output,
        }
    }

    /// Sets up a game from the settings and plays it. Returns None if the player quit.
    pub fn run<G: Rng + ?Sized>(&mut self, rng: &mut G) -> Result<Option<GameState>> {
        let difficulty = match self.settings.difficulty {
            Some(difficulty) => difficulty,
            None => match self.choose_difficulty()? {
                Some(difficulty) => difficulty,
                None => return Ok(None),
            },
        };

        let game = Game::new(&self.settings, difficulty, rng)?;
        self.play(game)
    }

    /// Plays `game` until it is over. Returns None if the player quit.
    pub fn play(&mut self, mut game: Game) -> Result<Option<GameState>> {
        let board = game.board();
        writeln!(
            self.output,
            "{} mines on a {}x{} board. Pick a cell as `row col`, then R to reveal it or F to \
             flag it. Enter q to quit.",
            board.mine_count(),
            board.size(),
            board.size()
        )?;

        loop {
            write!(self.output, "\n{}", game.render())?;
            writeln!(self.output, "Mines left: {}", game.board().remaining_mines())?;

            let Some(pos) = self.read_position(&game)? else {
                return Ok(None);
            };
            let Some(action) = self.read_action()? else {
                return Ok(None);
            };

            let result = match action {
                Action::Reveal => game.reveal(pos),
                Action::Flag => game.toggle_flag(pos).map(|_| game.state()),
            };
            match result {
                Ok(GameState::Playing) => {}
                Ok(GameState::Lost) => {
                    writeln!(self.output, "\nBoom! You hit a mine. Game over.")?;
                    write!(self.output, "{}", game.render())?;
                    return Ok(Some(GameState::Lost));
                }
                Ok(GameState::Won) => {
                    writeln!(self.output, "\nYou cleared the board. You win!")?;
                    write!(self.output, "{}", game.render())?;
                    return Ok(Some(GameState::Won));
                }
                Err(err @ Error::Flagged { .. }) => writeln!(self.output, "{err}")?,
                Err(err) => return Err(err),
            }
        }
    }

    fn choose_difficulty(&mut self) -> Result<Option<Difficulty>> {
        writeln!(self.output, "Choose a difficulty:")?;
        for (i, difficulty) in Difficulty::ALL.into_iter().enumerate() {
            writeln!(
                self.output,
                "{}. {} ({} mines)",
                i + 1,
                difficulty,
                self.settings.mine_count(difficulty)
            )?;
        }
        Ok(self.prompt("> ")?.map(|choice| Difficulty::from_menu_choice(&choice)))
    }

    fn read_position(&mut self, game: &Game) -> Result<Option<(usize, usize)>> {
        loop {
            let Some(line) = self.prompt("Cell (row col): ")? else {
                return Ok(None);
            };
            match parse_position(&line) {
                Some(pos) if game.board().is_valid(pos) => return Ok(Some(pos)),
                _ => writeln!(self.output, "Invalid coordinates. Try again.")?,
            }
        }
    }

    fn read_action(&mut self) -> Result<Option<Action>> {
        loop {
            let Some(line) = self.prompt("Action (R - reveal, F - flag): ")? else {
                return Ok(None);
            };
            match Action::parse(&line) {
                Some(action) => return Ok(Some(action)),
                None => writeln!(self.output, "Invalid action. Try again.")?,
            }
        }
    }

    /// Reads one trimmed line. None means end of input or a request to quit.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        Ok(Some(line.to_owned()))
    }
}
