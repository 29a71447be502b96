use crate::error::EngineError;
use crate::player::Role;
use std::fmt;

pub const BOARD_SIZE: usize = 15;
pub const CENTER: Pos = Pos { row: 7, col: 7 };

/// State of a single intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
  #[default]
  Empty,
  Black,
  White,
}

impl Cell {
  pub fn role(self) -> Option<Role> {
    match self {
      Cell::Empty => None,
      Cell::Black => Some(Role::Black),
      Cell::White => Some(Role::White),
    }
  }

  // Matrix value: 0=empty, 1=black, 2=white
  pub fn to_int(self) -> i32 {
    self.role().map_or(0, |r| r.to_int())
  }
}

impl From<Role> for Cell {
  fn from(role: Role) -> Self {
    match role {
      Role::Black => Cell::Black,
      Role::White => Cell::White,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
  pub row: usize,
  pub col: usize,
}

impl Pos {
  pub const fn new(row: usize, col: usize) -> Self {
    Self { row, col }
  }

  pub fn in_range(row: usize, col: usize) -> bool {
    row < BOARD_SIZE && col < BOARD_SIZE
  }

  /// Step `k` times along (dr, dc); `None` once we leave the board.
  pub fn offset(self, dr: isize, dc: isize, k: isize) -> Option<Pos> {
    let r = self.row as isize + dr * k;
    let c = self.col as isize + dc * k;
    if r < 0 || c < 0 || r >= BOARD_SIZE as isize || c >= BOARD_SIZE as isize {
      return None;
    }
    Some(Pos::new(r as usize, c as usize))
  }
}

impl fmt::Display for Pos {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{},{}", self.row, self.col)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
  pub pos: Pos,
  pub role: Role,
}

/// Fixed 15x15 Omok board.
///
/// `put`/`undo` are the checked helpers used by the game loop. The search
/// works on a private clone through `set`/`clear`, which skip validation and
/// history.
#[derive(Debug, Clone)]
pub struct Board {
  cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
  history: Vec<Move>,
}

impl Default for Board {
  fn default() -> Self {
    Self::new()
  }
}

impl PartialEq for Board {
  // Two boards are equal when their stones are; history is bookkeeping.
  fn eq(&self, other: &Self) -> bool {
    self.cells == other.cells
  }
}

impl Eq for Board {}

impl Board {
  // Create an empty board
  pub fn new() -> Self {
    Self {
      cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
      history: Vec::new(),
    }
  }

  /// Decode an integer matrix (0 = empty, 1 = black, 2 = white).
  ///
  /// The shape is validated before any cell is read.
  pub fn from_matrix<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, EngineError> {
    let bad_row = rows.iter().map(|r| r.as_ref().len()).find(|&len| len != BOARD_SIZE);
    if rows.len() != BOARD_SIZE || bad_row.is_some() {
      return Err(EngineError::BoardShape {
        rows: rows.len(),
        cols: bad_row.or_else(|| rows.first().map(|r| r.as_ref().len())).unwrap_or(0),
      });
    }

    let mut board = Self::new();
    for (i, row) in rows.iter().enumerate() {
      for (j, &value) in row.as_ref().iter().enumerate() {
        board.cells[i][j] = match value {
          0 => Cell::Empty,
          1 => Cell::Black,
          2 => Cell::White,
          _ => return Err(EngineError::InvalidCell { row: i, col: j, value }),
        };
      }
    }
    Ok(board)
  }

  pub fn to_matrix(&self) -> Vec<Vec<i32>> {
    self.cells.iter().map(|row| row.iter().map(|c| c.to_int()).collect()).collect()
  }

  /// # Panics
  ///
  /// If `pos` is off the board; use `Pos::in_range` or `Pos::offset` first.
  pub fn get(&self, pos: Pos) -> Cell {
    self.cells[pos.row][pos.col]
  }

  pub fn is_empty_at(&self, pos: Pos) -> bool {
    self.get(pos) == Cell::Empty
  }

  /// Place a stone, rejecting out-of-range or occupied targets.
  pub fn put(&mut self, pos: Pos, role: Role) -> Result<(), EngineError> {
    if !Pos::in_range(pos.row, pos.col) {
      return Err(EngineError::InvalidMove { row: pos.row, col: pos.col });
    }
    if !self.is_empty_at(pos) {
      return Err(EngineError::OccupiedCell { row: pos.row, col: pos.col });
    }
    self.cells[pos.row][pos.col] = Cell::from(role);
    self.history.push(Move { pos, role });
    Ok(())
  }

  // Undo the last move placed with `put`
  pub fn undo(&mut self) -> bool {
    match self.history.pop() {
      None => false,
      Some(mv) => {
        self.cells[mv.pos.row][mv.pos.col] = Cell::Empty;
        true
      }
    }
  }

  /// Copy of this board with one extra stone; the receiver is untouched.
  pub fn with_move(&self, pos: Pos, role: Role) -> Result<Board, EngineError> {
    let mut next = self.clone();
    next.put(pos, role)?;
    Ok(next)
  }

  pub(crate) fn set(&mut self, pos: Pos, role: Role) {
    self.cells[pos.row][pos.col] = Cell::from(role);
  }

  pub(crate) fn clear(&mut self, pos: Pos) {
    self.cells[pos.row][pos.col] = Cell::Empty;
  }

  pub(crate) fn set_cell(&mut self, pos: Pos, cell: Cell) {
    self.cells[pos.row][pos.col] = cell;
  }

  pub fn last_move(&self) -> Option<Move> {
    self.history.last().copied()
  }

  pub fn move_count(&self) -> usize {
    self.history.len()
  }

  /// All positions in row-major order.
  pub fn positions() -> impl Iterator<Item = Pos> {
    (0..BOARD_SIZE).flat_map(|i| (0..BOARD_SIZE).map(move |j| Pos::new(i, j)))
  }

  pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
    Self::positions().filter(move |&p| self.is_empty_at(p))
  }

  pub fn stones(&self) -> impl Iterator<Item = (Pos, Role)> + '_ {
    Self::positions().filter_map(move |p| self.get(p).role().map(|r| (p, r)))
  }
}
