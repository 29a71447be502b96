use crate::board::{Board, Pos, BOARD_SIZE, CENTER};

/// Chebyshev radius around existing stones that is worth searching.
pub const NEIGHBOR_RADIUS: isize = 2;

/// Empty cells within `NEIGHBOR_RADIUS` of any stone, deduplicated.
///
/// Order is deterministic: stones are visited row-major and each stone's
/// neighbourhood top-left to bottom-right. An empty board yields the centre;
/// a full board yields nothing.
pub fn candidates(board: &Board) -> Vec<Pos> {
  let mut seen = [[false; BOARD_SIZE]; BOARD_SIZE];
  let mut moves = Vec::new();
  let mut any_stone = false;

  for (stone, _) in board.stones() {
    any_stone = true;
    for dr in -NEIGHBOR_RADIUS..=NEIGHBOR_RADIUS {
      for dc in -NEIGHBOR_RADIUS..=NEIGHBOR_RADIUS {
        if let Some(p) = stone.offset(dr, dc, 1) {
          if board.is_empty_at(p) && !seen[p.row][p.col] {
            seen[p.row][p.col] = true;
            moves.push(p);
          }
        }
      }
    }
  }

  if !any_stone {
    moves.push(CENTER);
  }
  moves
}
