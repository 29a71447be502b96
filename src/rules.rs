//! Win detection and game status.
//!
//! The engine and the game loop both decide game-over through this module,
//! so they can never disagree about an outcome. Overlines (six or more) win.

use crate::board::{Board, Pos};
use crate::player::Role;

pub const WIN_COUNT: usize = 5;

/// Horizontal, vertical, and the two diagonals.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  InProgress,
  Won(Role),
  Draw,
}

/// Length of the `role` run through `pos` along (dr, dc), counting `pos`
/// itself as `role` whatever it holds. Looks at most four cells each way.
pub fn count_consecutive(board: &Board, pos: Pos, (dr, dc): (isize, isize), role: Role) -> usize {
  let mut count = 1;
  for sign in [1, -1] {
    for k in 1..WIN_COUNT as isize {
      match pos.offset(dr * sign, dc * sign, k) {
        Some(p) if board.get(p).role() == Some(role) => count += 1,
        _ => break,
      }
    }
  }
  count
}

/// Would `role` have five or more in a row through `pos`?
///
/// The stone does not need to be placed yet.
pub fn wins(board: &Board, pos: Pos, role: Role) -> bool {
  DIRECTIONS
    .iter()
    .any(|&dir| count_consecutive(board, pos, dir, role) >= WIN_COUNT)
}

/// Row-major scan of every stone; first qualifying line decides.
pub fn find_winner(board: &Board) -> Option<Role> {
  for (pos, role) in board.stones() {
    if wins(board, pos, role) {
      log::debug!("five in a row for {:?} through {}", role, pos);
      return Some(role);
    }
  }
  None
}

pub fn is_full(board: &Board) -> bool {
  board.empty_cells().next().is_none()
}

pub fn outcome(board: &Board) -> Outcome {
  if let Some(role) = find_winner(board) {
    Outcome::Won(role)
  } else if is_full(board) {
    Outcome::Draw
  } else {
    Outcome::InProgress
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::board::BOARD_SIZE;

  fn board_with(stones: &[(usize, usize, Role)]) -> Board {
    let mut board = Board::new();
    for &(r, c, role) in stones {
      board.put(Pos::new(r, c), role).unwrap();
    }
    board
  }

  #[test]
  fn empty_board_has_no_winner() {
    assert_eq!(find_winner(&Board::new()), None);
    assert_eq!(outcome(&Board::new()), Outcome::InProgress);
  }

  #[test]
  fn detects_each_direction() {
    let lines: [[(usize, usize); 5]; 4] = [
      [(3, 3), (3, 4), (3, 5), (3, 6), (3, 7)],
      [(2, 9), (3, 9), (4, 9), (5, 9), (6, 9)],
      [(8, 1), (9, 2), (10, 3), (11, 4), (12, 5)],
      [(4, 14), (5, 13), (6, 12), (7, 11), (8, 10)],
    ];
    for line in lines {
      let stones: Vec<_> = line.iter().map(|&(r, c)| (r, c, Role::White)).collect();
      assert_eq!(find_winner(&board_with(&stones)), Some(Role::White), "{:?}", line);
    }
  }

  #[test]
  fn four_is_not_a_win() {
    let board = board_with(&[(0, 0, Role::Black), (0, 1, Role::Black), (0, 2, Role::Black), (0, 3, Role::Black)]);
    assert_eq!(find_winner(&board), None);
  }

  #[test]
  fn overline_counts_as_win() {
    let stones: Vec<_> = (0..6).map(|c| (10, c, Role::Black)).collect();
    assert_eq!(find_winner(&board_with(&stones)), Some(Role::Black));
  }

  #[test]
  fn wins_checks_hypothetical_stone() {
    let board = board_with(&[(7, 7, Role::Black), (7, 8, Role::Black), (7, 10, Role::Black), (7, 11, Role::Black)]);
    assert!(wins(&board, Pos::new(7, 9), Role::Black));
    assert!(!wins(&board, Pos::new(7, 9), Role::White));
    assert!(board.is_empty_at(Pos::new(7, 9)));
  }

  #[test]
  fn full_board_without_line_is_draw() {
    // Two-column stripes shifted every row never line up five.
    let mut board = Board::new();
    for pos in Board::positions() {
      let role = if (pos.col / 2 + pos.row) % 2 == 0 { Role::Black } else { Role::White };
      board.put(pos, role).unwrap();
    }
    assert_eq!(find_winner(&board), None);
    assert!(is_full(&board));
    assert_eq!(outcome(&board), Outcome::Draw);
    assert_eq!(board.move_count(), BOARD_SIZE * BOARD_SIZE);
  }
}
