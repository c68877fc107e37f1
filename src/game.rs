use log::{debug, trace};
use ndarray::Array2;
use rand::{distributions::Uniform, Rng};

use crate::error::{Error, Result};

/// Side length of the board when nothing else is configured.
pub const DEFAULT_SIZE: usize = 10;

/// Largest side length a game can be set up with.
pub const MAX_SIZE: usize = 1024;

/// Row/column offsets of the eight surrounding cells.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A square minefield. Positions are `(row, col)` pairs.
///
/// Cells can only be changed through the operations below: mines are placed once, a revealed cell
/// stays revealed, and flags toggle freely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Array2<Cell>,
    mines: usize,
    planted: bool,
}

impl Board {
    /// Creates a `size` x `size` board with no mines, nothing revealed and nothing flagged.
    pub fn new(size: usize) -> Self {
        Self {
            cells: Array2::default((size, size)),
            mines: 0,
            planted: false,
        }
    }

    /// Creates a board with mines at exactly the given positions. Duplicate positions count once.
    pub fn with_mines(
        size: usize,
        positions: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self> {
        let mut board = Self::new(size);
        for (row, col) in positions {
            if !board.is_valid((row, col)) {
                return Err(Error::MineOutOfBounds { row, col, size });
            }
            let cell = &mut board.cells[(row, col)];
            if !cell.mine {
                cell.mine = true;
                board.mines += 1;
            }
        }
        board.check_mine_count(board.mines)?;
        board.planted = true;
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of mines planted on the board.
    pub fn mine_count(&self) -> usize {
        self.mines
    }

    pub fn flag_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.flagged).count()
    }

    /// Returns the number of total mines minus the number of total flags
    pub fn remaining_mines(&self) -> usize {
        self.mines.saturating_sub(self.flag_count())
    }

    pub fn is_valid(&self, (row, col): (usize, usize)) -> bool {
        row < self.size() && col < self.size()
    }

    pub fn cell(&self, pos: (usize, usize)) -> Option<&Cell> {
        self.cells.get(pos)
    }

    /// All on-board positions surrounding `pos`: 3 in a corner, 5 along an edge, 8 elsewhere.
    pub fn neighbors(
        &self,
        (row, col): (usize, usize),
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        OFFSETS
            .into_iter()
            .map(move |(dr, dc)| (row.wrapping_add_signed(dr), col.wrapping_add_signed(dc)))
            .filter(move |&pos| self.is_valid(pos))
    }

    /// Places `count` mines at uniformly random distinct positions.
    ///
    /// Fails without touching the board if mines were already planted, or if `count` would leave
    /// no free cell.
    pub fn plant<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Result<()> {
        if self.planted {
            return Err(Error::AlreadyPlanted);
        }
        self.check_mine_count(count)?;

        let dist = Uniform::new(0, self.size());
        let mut placed = 0;
        while placed < count {
            let pos = (rng.sample(dist), rng.sample(dist));
            if self.cells[pos].mine {
                continue;
            }

            self.cells[pos].mine = true;
            placed += 1;
        }

        self.mines = count;
        self.planted = true;
        debug!("planted {} mines on a {}x{} board", count, self.size(), self.size());
        Ok(())
    }

    fn check_mine_count(&self, count: usize) -> Result<()> {
        if self.size() == 0 {
            return Err(Error::EmptyBoard);
        }
        if count >= self.cell_count() {
            return Err(Error::TooManyMines {
                requested: count,
                cells: self.cell_count(),
            });
        }
        Ok(())
    }

    /// Number of mines in the cells surrounding `pos`, between 0 and 8.
    pub fn count_adjacent_mines(&self, pos: (usize, usize)) -> u8 {
        self.neighbors(pos)
            .filter(|&neighbor| self.cells[neighbor].mine)
            .count() as u8
    }

    /// Reveals the cell at `pos`. If it holds no mine and none of its neighbors do, every
    /// connected cell is revealed as well, up to and including the first numbered cells.
    ///
    /// Returns None if `pos` is off the board or the cell has already been revealed. Flags do not
    /// stop a reveal and are left as they are.
    pub fn reveal(&mut self, pos: (usize, usize)) -> Option<Reveal> {
        if self.open(pos)?.mine {
            return Some(Reveal::Exploded);
        }
        if self.count_adjacent_mines(pos) != 0 {
            return Some(Reveal::Safe);
        }

        // The revealed flag doubles as the visited set
        let mut opened = 1;
        let mut check = self.neighbors(pos).collect::<Vec<_>>();

        while let Some(next_pos) = check.pop() {
            let Some(cell) = self.open(next_pos) else {
                continue;
            };
            opened += 1;
            if !cell.mine && self.count_adjacent_mines(next_pos) == 0 {
                check.extend(self.neighbors(next_pos));
            }
        }

        trace!("cascade from {pos:?} revealed {opened} cells");
        Some(Reveal::Cascade(opened))
    }

    /// Marks the cell revealed, returning it, unless it is off the board or already revealed.
    fn open(&mut self, pos: (usize, usize)) -> Option<Cell> {
        if !self.is_valid(pos) || self.cells[pos].revealed {
            return None;
        }
        let cell = &mut self.cells[pos];
        cell.revealed = true;
        Some(*cell)
    }

    /// Reveals every mine, for showing the board after a loss. Returns how many were newly
    /// revealed.
    pub fn reveal_mines(&mut self) -> usize {
        let mut count = 0;
        for cell in self.cells.iter_mut().filter(|cell| cell.mine && !cell.revealed) {
            cell.revealed = true;
            count += 1;
        }
        count
    }

    /// Flips the flag on the cell at `pos` and returns the new flag state. Returns None if `pos` is
    /// off the board.
    pub fn toggle_flag(&mut self, pos: (usize, usize)) -> Option<bool> {
        if !self.is_valid(pos) {
            return None;
        }
        let cell = &mut self.cells[pos];
        cell.flagged = !cell.flagged;
        Some(cell.flagged)
    }

    /// The game is won when every cell without a mine has been revealed. Mines don't matter.
    pub fn has_won(&self) -> bool {
        self.cells.iter().all(|cell| cell.mine || cell.revealed)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    mine: bool,
    revealed: bool,
    flagged: bool,
}

impl Cell {
    pub fn has_mine(&self) -> bool {
        self.mine
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reveal {
    /// The cell held a mine
    Exploded,
    /// The cell borders at least one mine, nothing else was opened
    Safe,
    /// The cell had no neighboring mines; holds the number of cells opened, itself included
    Cascade(usize),
}
