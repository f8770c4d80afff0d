//! Move legality and stone flipping.
//!
//! Every function re-walks the eight rays against the board it is given, so
//! results always reflect the position at call time.

use crate::board::{BOARD_SIZE, Board, in_bounds};
use crate::types::{CellState, Player, Position};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Returns whether `player` may place a stone at `(row, col)`.
/// Out-of-range coordinates and occupied cells are never legal.
pub fn is_valid_move(board: &Board, row: usize, col: usize, player: Player) -> bool {
    if !target_is_empty(board, row, col) {
        return false;
    }

    DIRECTIONS
        .iter()
        .any(|&dir| !bracketed_run(board, row, col, dir, player).is_empty())
}

/// Returns every opponent stone that a stone placed at `(row, col)` would flip.
/// Empty when the move is illegal.
pub fn compute_flips(board: &Board, row: usize, col: usize, player: Player) -> Vec<Position> {
    if !target_is_empty(board, row, col) {
        return Vec::new();
    }

    DIRECTIONS
        .iter()
        .flat_map(|&dir| bracketed_run(board, row, col, dir, player))
        .collect()
}

/// Places one stone and flips captured stones in all directions.
/// Returns the flipped positions. Returns an empty list and leaves the board
/// untouched when the move is illegal.
pub fn apply_move(board: &mut Board, row: usize, col: usize, player: Player) -> Vec<Position> {
    let flips = compute_flips(board, row, col, player);
    if flips.is_empty() {
        return flips;
    }

    let stone = CellState::from(player);
    let cells = std::iter::once((row, col))
        .chain(flips.iter().map(|pos| (pos.row as usize, pos.col as usize)));
    for (r, c) in cells {
        // Every coordinate was bounds-checked during the walk.
        let _ = board.set(r, c, stone);
    }

    flips
}

/// Returns whether `player` has at least one legal move anywhere.
pub fn has_valid_move(board: &Board, player: Player) -> bool {
    all_cells().any(|(row, col)| is_valid_move(board, row, col, player))
}

/// Returns every legal move for `player` in row-major order.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Position> {
    all_cells()
        .filter(|&(row, col)| is_valid_move(board, row, col, player))
        .filter_map(|(row, col)| Position::new(row as u8, col as u8))
        .collect()
}

fn all_cells() -> impl Iterator<Item = (usize, usize)> {
    (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
}

fn target_is_empty(board: &Board, row: usize, col: usize) -> bool {
    matches!(board.get(row, col), Ok(CellState::Empty))
}

/// Walks from `(row, col)` along `(dr, dc)` and returns the run of opponent
/// stones if it is closed by one of `player`'s stones, otherwise nothing.
fn bracketed_run(
    board: &Board,
    row: usize,
    col: usize,
    (dr, dc): (i32, i32),
    player: Player,
) -> Vec<Position> {
    let me = CellState::from(player);
    let opp = CellState::from(player.opponent());

    let mut r = row as i32 + dr;
    let mut c = col as i32 + dc;
    let mut line = Vec::new();

    while in_bounds(r, c) {
        let Ok(cell) = board.get(r as usize, c as usize) else {
            break;
        };
        if cell == opp {
            line.push(Position {
                row: r as u8,
                col: c as u8,
            });
        } else if cell == me {
            return line;
        } else {
            break;
        }

        r += dr;
        c += dc;
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position { row, col }
    }

    fn board(grid: &str) -> Board {
        grid.parse().expect("test grid must parse")
    }

    #[test]
    fn initial_black_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        let legal: Vec<Position> = all_cells()
            .filter(|&(r, c)| is_valid_move(&board, r, c, Player::Black))
            .map(|(r, c)| pos(r as u8, c as u8))
            .collect();

        // d3, c4, f5, e6
        assert_eq!(legal, vec![pos(2, 3), pos(3, 2), pos(4, 5), pos(5, 4)]);
        assert_eq!(legal_moves(&board, Player::Black), legal);
        for mv in legal {
            assert!((2..=5).contains(&mv.row) && (2..=5).contains(&mv.col));
            assert_eq!(
                compute_flips(&board, mv.row as usize, mv.col as usize, Player::Black).len(),
                1
            );
        }
    }

    #[test]
    fn occupied_cells_are_never_valid() {
        let board = Board::new();

        for (row, col) in all_cells() {
            if board.get(row, col).unwrap().is_empty() {
                continue;
            }
            assert!(!is_valid_move(&board, row, col, Player::Black));
            assert!(!is_valid_move(&board, row, col, Player::White));
        }
    }

    #[test]
    fn out_of_range_coordinates_are_rejected_without_panicking() {
        let board = Board::new();

        assert!(!is_valid_move(&board, 8, 3, Player::Black));
        assert!(!is_valid_move(&board, 3, usize::MAX, Player::White));
        assert!(compute_flips(&board, 64, 64, Player::Black).is_empty());
    }

    #[test]
    fn adjacent_own_stone_does_not_bracket() {
        let board = board(
            "........
             ........
             ........
             ........
             ........
             ........
             ........
             BB......",
        );

        assert!(!is_valid_move(&board, 7, 2, Player::Black));
    }

    #[test]
    fn run_ending_in_empty_or_edge_is_not_flipped() {
        // Row 0 runs into the edge, row 2 runs into an empty cell.
        let board = board(
            "WWW.....
             ........
             .WW.B...
             ........
             ........
             ........
             ........
             ........",
        );

        assert!(!is_valid_move(&board, 0, 3, Player::Black));
        assert!(compute_flips(&board, 2, 0, Player::Black).is_empty());
    }

    #[test]
    fn each_direction_is_evaluated_independently() {
        let center = (3usize, 3usize);
        for &(dr, dc) in &DIRECTIONS {
            let mut board = Board::empty();
            let opp = (center.0 as i32 + dr, center.1 as i32 + dc);
            let own = (center.0 as i32 + 2 * dr, center.1 as i32 + 2 * dc);
            board
                .set(opp.0 as usize, opp.1 as usize, CellState::White)
                .unwrap();
            board
                .set(own.0 as usize, own.1 as usize, CellState::Black)
                .unwrap();

            assert!(
                is_valid_move(&board, center.0, center.1, Player::Black),
                "direction ({dr}, {dc}) should bracket"
            );
            assert_eq!(
                compute_flips(&board, center.0, center.1, Player::Black),
                vec![pos(opp.0 as u8, opp.1 as u8)]
            );
            assert!(!is_valid_move(&board, center.0, center.1, Player::White));
        }
    }

    #[test]
    fn apply_move_flips_every_bracketed_direction_at_once() {
        let mut board = board(
            "B..B..B.
             .W.W.W..
             ..WWW...
             BWW.WWWB
             ..WWW...
             .W.W.W..
             B..B..B.
             ........",
        );

        let flips = apply_move(&mut board, 3, 3, Player::Black);

        assert_eq!(flips.len(), 17);
        assert_eq!(board.count_stones().white, 0);
        assert_eq!(board.get(3, 3), Ok(CellState::Black));
    }

    #[test]
    fn apply_move_on_illegal_cell_keeps_board_unchanged() {
        let mut board = Board::new();
        let before = board;

        let flips = apply_move(&mut board, 0, 0, Player::Black);

        assert!(flips.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn apply_move_places_stone_and_flips_single_run() {
        let mut board = Board::new();

        let flips = apply_move(&mut board, 2, 3, Player::Black); // d3

        assert_eq!(flips, vec![pos(3, 3)]);
        assert_eq!(board.get(2, 3), Ok(CellState::Black));
        assert_eq!(board.get(3, 3), Ok(CellState::Black));
        assert_eq!(board.get(4, 4), Ok(CellState::White));
        assert_eq!(board.count_stones().black, 4);
        assert_eq!(board.count_stones().white, 1);
    }

    #[test]
    fn has_valid_move_is_false_when_no_cell_brackets() {
        let board = board(
            "BBBBBBBB
             BBBBBBBB
             BBBBBBBB
             BBBBBBBB
             BBBBBBBB
             BBBBBBBB
             BBBBBBBB
             BBBBBBB.",
        );

        assert!(!has_valid_move(&board, Player::Black));
        assert!(!has_valid_move(&board, Player::White));
        assert!(has_valid_move(&Board::new(), Player::White));
    }
}
