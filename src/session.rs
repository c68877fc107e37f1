use log::info;
use rand::Rng;

use crate::{
    error::{Error, Result},
    game::{Board, Cell, Reveal},
    render::render_labeled,
    settings::{Difficulty, Settings},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Lost,
    Won,
}

impl GameState {
    pub fn is_over(self) -> bool {
        self != Self::Playing
    }
}

/// A single game from the first move until a mine goes off or the board is cleared.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    state: GameState,
    protect_flags: bool,
}

impl Game {
    /// Sets up a fresh board and plants the mines for `difficulty`, unless the settings give an
    /// explicit count.
    pub fn new<R: Rng + ?Sized>(
        settings: &Settings,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Self> {
        settings.validate()?;
        let mut board = Board::new(settings.size);
        board.plant(settings.mine_count(difficulty), rng)?;
        match settings.mines {
            Some(mines) => info!("new game: {0}x{0} board, {1} mines", board.size(), mines),
            None => info!(
                "new {} game: {}x{} board, {} mines",
                difficulty,
                board.size(),
                board.size(),
                board.mine_count()
            ),
        }
        Ok(Self::from_board(board, settings.protect_flags))
    }

    /// Starts a game on a board whose mines are already in place.
    pub fn from_board(board: Board, protect_flags: bool) -> Self {
        Self {
            board,
            state: GameState::Playing,
            protect_flags,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    fn check_move(&self, (row, col): (usize, usize)) -> Result<()> {
        if self.state.is_over() {
            return Err(Error::GameOver);
        }
        if !self.board.is_valid((row, col)) {
            return Err(Error::OutOfBounds {
                row,
                col,
                size: self.board.size(),
            });
        }
        Ok(())
    }

    /// Reveals a cell and returns the state the game is in afterwards. Losing reveals every mine
    /// so the final board can show them.
    pub fn reveal(&mut self, pos: (usize, usize)) -> Result<GameState> {
        self.check_move(pos)?;
        if self.protect_flags && self.board.cell(pos).is_some_and(Cell::is_flagged) {
            return Err(Error::Flagged {
                row: pos.0,
                col: pos.1,
            });
        }

        match self.board.reveal(pos) {
            Some(Reveal::Exploded) => {
                self.board.reveal_mines();
                self.state = GameState::Lost;
                info!("mine hit at {pos:?}, game lost");
            }
            Some(_) if self.board.has_won() => {
                self.state = GameState::Won;
                info!("board cleared, game won");
            }
            _ => {}
        }
        Ok(self.state)
    }

    /// Returns whether the cell is flagged now.
    pub fn toggle_flag(&mut self, pos: (usize, usize)) -> Result<bool> {
        self.check_move(pos)?;
        Ok(self.board.toggle_flag(pos).unwrap_or_default())
    }

    /// The board as the player should see it. Mines are shown once the game is over.
    pub fn render(&self) -> String {
        render_labeled(&self.board, self.state.is_over())
    }
}
