use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
  #[error("Board must be 15x15, got {rows} rows (first bad row length {cols})")]
  BoardShape { rows: usize, cols: usize },
  #[error("Unexpected cell value {value} at ({row}, {col}), expected 0, 1 or 2")]
  InvalidCell { row: usize, col: usize, value: i32 },
  #[error("Move ({row}, {col}) is outside the board")]
  InvalidMove { row: usize, col: usize },
  #[error("Cell ({row}, {col}) is already occupied")]
  OccupiedCell { row: usize, col: usize },
  #[error("Cannot parse move {0:?}, expected \"row,col\"")]
  MoveFormat(String),
  #[error("No legal move left, the board is full")]
  NoLegalMove,
  #[error("Difficulty must be between 0 and 3, got {0}")]
  InvalidDifficulty(u8),
  #[error("Unknown turn indicator {0:?}, expected \"b\" or \"w\"")]
  UnknownTurn(String),
  #[error("Malformed board state: {0}")]
  Protocol(#[from] serde_json::Error),
}
