//! Static evaluation over five-cell windows.
//!
//! A window scores only for a player with no opposing stone inside it; the
//! score grows with the number of own stones and with the free space left
//! around them.

use crate::board::{Board, Cell, Pos, BOARD_SIZE, CENTER};
use crate::player::Role;
use crate::rules::{count_consecutive, DIRECTIONS, WIN_COUNT};
use crate::scores::{quick, shape, BLOCK_WEIGHT, DEFENSE_WEIGHT};

const SPAN: usize = WIN_COUNT - 1;

/// Classify one five-cell window for `role`.
pub fn line_score(window: [Cell; WIN_COUNT], role: Role) -> i32 {
  let mut count = 0;
  let mut empty = 0;
  for cell in window {
    match cell.role() {
      None => empty += 1,
      Some(r) if r == role => count += 1,
      Some(_) => return shape::NONE,
    }
  }

  match (count, empty) {
    (5, _) => shape::FIVE,
    (4, 1) => shape::LIVE_FOUR,
    (3, 2) => shape::LIVE_THREE,
    (3, _) => shape::DEAD_THREE,
    (2, 3) => shape::LIVE_TWO,
    (2, _) => shape::DEAD_TWO,
    (1, 4) => shape::LIVE_ONE,
    _ => shape::NONE,
  }
}

fn window(board: &Board, start: Pos, (dr, dc): (isize, isize)) -> Option<[Cell; WIN_COUNT]> {
  // Both ends on the board means every cell in between is too.
  start.offset(dr, dc, SPAN as isize)?;
  let mut cells = [Cell::Empty; WIN_COUNT];
  for (k, cell) in cells.iter_mut().enumerate() {
    *cell = board.get(start.offset(dr, dc, k as isize)?);
  }
  Some(cells)
}

/// Sum of `line_score` over every window on the board.
pub fn windows_score(board: &Board, role: Role) -> i32 {
  let mut total = 0;
  for &dir in &DIRECTIONS {
    for start in Board::positions() {
      if let Some(cells) = window(board, start, dir) {
        total += line_score(cells, role);
      }
    }
  }
  total
}

/// Sum of `line_score` over the windows that contain `pos`.
pub fn windows_score_at(board: &Board, pos: Pos, role: Role) -> i32 {
  let mut total = 0;
  for &dir in &DIRECTIONS {
    for back in 0..=SPAN as isize {
      let Some(start) = pos.offset(dir.0, dir.1, -back) else {
        continue;
      };
      if let Some(cells) = window(board, start, dir) {
        total += line_score(cells, role);
      }
    }
  }
  total
}

/// Static score of the whole position from `role`'s side.
pub fn board_score(board: &Board, role: Role) -> i32 {
  let own = windows_score(board, role);
  let theirs = windows_score(board, role.opponent());
  (own as f64 - theirs as f64 * DEFENSE_WEIGHT) as i32
}

/// Cheap ordering key: run lengths through `pos` for both sides.
pub fn quick_move_score(board: &Board, pos: Pos, mover: Role, opponent: Role) -> i32 {
  let mut score = 0;
  for &dir in &DIRECTIONS {
    let own = count_consecutive(board, pos, dir, mover);
    let theirs = count_consecutive(board, pos, dir, opponent);
    score += if own >= WIN_COUNT {
      quick::OWN_FIVE
    } else if theirs >= WIN_COUNT {
      quick::OPP_FIVE
    } else if own == 4 {
      quick::OWN_FOUR
    } else if theirs == 4 {
      quick::OPP_FOUR
    } else {
      (own + theirs) as i32
    };
  }
  score
}

/// Centre preference, value as an attack, and value as a block.
///
/// Temporarily places stones on `pos` in the working board; the cell holds
/// whatever it held before on return.
///
/// # Panics
///
/// If `pos` is off the board.
pub fn point_score(board: &mut Board, pos: Pos, mover: Role, opponent: Role) -> i32 {
  debug_assert!(board.is_empty_at(pos), "point_score on occupied cell {}", pos);
  let previous = board.get(pos);
  let mut score = center_bonus(pos);

  board.set(pos, mover);
  score += windows_score_at(board, pos, mover);
  board.set(pos, opponent);
  let block = windows_score_at(board, pos, opponent);
  board.set_cell(pos, previous);

  (score as f64 + block as f64 * BLOCK_WEIGHT) as i32
}

fn center_bonus(pos: Pos) -> i32 {
  let half = (BOARD_SIZE / 2) as i32;
  let dr = (pos.row as i32 - CENTER.row as i32).abs();
  let dc = (pos.col as i32 - CENTER.col as i32).abs();
  (half - dr) + (half - dc)
}
