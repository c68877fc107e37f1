use std::fmt;

use itertools::Itertools;

use crate::game::Board;

/// What a single cell looks like to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    Flag,
    Hidden,
    Mine,
    Count(u8),
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => f.pad("F"),
            Self::Hidden => f.pad("*"),
            Self::Mine => f.pad("X"),
            Self::Count(count) => f.pad(&count.to_string()),
        }
    }
}

/// Flags always show. Revealed mines only show with `reveal_mines`, which is meant for the board
/// at the end of a game; otherwise they look hidden. Returns None if `pos` is off the board.
pub fn glyph(board: &Board, pos: (usize, usize), reveal_mines: bool) -> Option<Glyph> {
    let cell = board.cell(pos)?;
    Some(match (cell.is_flagged(), cell.is_revealed(), cell.has_mine()) {
        (true, _, _) => Glyph::Flag,
        (false, false, _) => Glyph::Hidden,
        (false, true, true) if reveal_mines => Glyph::Mine,
        (false, true, true) => Glyph::Hidden,
        (false, true, false) => Glyph::Count(board.count_adjacent_mines(pos)),
    })
}

fn row_glyphs(board: &Board, row: usize, reveal_mines: bool) -> impl Iterator<Item = Glyph> + '_ {
    (0..board.size()).filter_map(move |col| glyph(board, (row, col), reveal_mines))
}

/// One line per row, cells separated by a space.
pub fn render(board: &Board, reveal_mines: bool) -> String {
    (0..board.size())
        .map(|row| row_glyphs(board, row, reveal_mines).join(" ") + "\n")
        .collect()
}

/// Like [`render`], with column numbers above the board and row numbers on the left.
pub fn render_labeled(board: &Board, reveal_mines: bool) -> String {
    let width = board.size().saturating_sub(1).to_string().len();

    let header = (0..board.size()).map(|col| format!("{col:>width$}")).join(" ");
    let mut out = format!("{:width$} {header}\n", "");
    for row in 0..board.size() {
        let cells = row_glyphs(board, row, reveal_mines)
            .map(|glyph| format!("{glyph:>width$}"))
            .join(" ");
        out.push_str(&format!("{row:>width$} {cells}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_policy() {
        // Mines at (0,0) and (0,2)
        let mut board = Board::with_mines(3, [(0, 0), (0, 2)]).unwrap();
        assert_eq!(glyph(&board, (1, 1), false), Some(Glyph::Hidden));

        board.toggle_flag((1, 1));
        assert_eq!(glyph(&board, (1, 1), false), Some(Glyph::Flag));
        board.reveal((1, 1));
        assert_eq!(glyph(&board, (1, 1), true), Some(Glyph::Flag));
        board.toggle_flag((1, 1));
        assert_eq!(glyph(&board, (1, 1), false), Some(Glyph::Count(2)));

        board.reveal((0, 0));
        assert_eq!(glyph(&board, (0, 0), false), Some(Glyph::Hidden));
        assert_eq!(glyph(&board, (0, 0), true), Some(Glyph::Mine));
        // Unrevealed mines stay hidden even at the end
        assert_eq!(glyph(&board, (0, 2), true), Some(Glyph::Hidden));

        assert_eq!(glyph(&board, (3, 0), true), None);
    }

    #[test]
    fn glyph_display() {
        let shown = [Glyph::Flag, Glyph::Hidden, Glyph::Mine, Glyph::Count(0), Glyph::Count(8)]
            .iter()
            .join("");
        assert_eq!(shown, "F*X08");
        assert_eq!(format!("{:>2}", Glyph::Flag), " F");
    }

    #[test]
    fn render_rows() {
        let mut board = Board::with_mines(4, [(3, 3)]).unwrap();
        board.toggle_flag((3, 3));
        board.reveal((0, 0));
        assert_eq!(
            render(&board, false),
            "0 0 0 0\n\
             0 0 0 0\n\
             0 0 1 1\n\
             0 0 1 F\n"
        );
    }

    #[test]
    fn render_shows_hidden_board() {
        let board = Board::new(2);
        assert_eq!(render(&board, true), "* *\n* *\n");
    }

    #[test]
    fn labeled_board_aligns_wide_indices() {
        let mut board = Board::with_mines(11, [(10, 10)]).unwrap();
        board.reveal((10, 10));
        let rendered = render_labeled(&board, true);
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "    0  1  2  3  4  5  6  7  8  9 10");
        assert_eq!(lines[1], " 0  *  *  *  *  *  *  *  *  *  *  *");
        assert_eq!(lines[11], "10  *  *  *  *  *  *  *  *  *  *  X");
    }

    #[test]
    fn labeled_small_board() {
        let board = Board::new(3);
        assert_eq!(render_labeled(&board, false), "  0 1 2\n0 * * *\n1 * * *\n2 * * *\n");
    }
}
