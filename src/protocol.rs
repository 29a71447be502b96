//! JSON board state exchanged with the game server:
//! `{"board": [[0, 1, 2, ...], ...], "turn": "b"}` in, `{"move": "7,7"}` out.

use crate::board::{Board, Pos, BOARD_SIZE};
use crate::error::EngineError;
use crate::player::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
  pub board: Vec<Vec<i32>>,
  pub turn: String,
}

impl BoardState {
  /// Fresh game: empty board, black to move.
  pub fn empty() -> Self {
    Self {
      board: vec![vec![0; BOARD_SIZE]; BOARD_SIZE],
      turn: Role::Black.to_code().to_string(),
    }
  }

  pub fn new(board: &Board, turn: Role) -> Self {
    Self {
      board: board.to_matrix(),
      turn: turn.to_code().to_string(),
    }
  }

  pub fn from_json(json: &str) -> Result<Self, EngineError> {
    Ok(serde_json::from_str(json)?)
  }

  pub fn to_json(&self) -> Result<String, EngineError> {
    Ok(serde_json::to_string(self)?)
  }

  /// Validated board and side to move.
  pub fn decode(&self) -> Result<(Board, Role), EngineError> {
    let board = Board::from_matrix(&self.board)?;
    let turn = Role::from_code(&self.turn)?;
    Ok((board, turn))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReply {
  #[serde(rename = "move")]
  pub mv: Option<String>,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub draw: bool,
}

impl MoveReply {
  /// Encode a decision; a full board becomes `{"move": null, "draw": true}`.
  /// Any other error is passed through.
  pub fn from_result(result: Result<Pos, EngineError>) -> Result<Self, EngineError> {
    match result {
      Ok(pos) => Ok(Self { mv: Some(pos.to_string()), draw: false }),
      Err(EngineError::NoLegalMove) => Ok(Self { mv: None, draw: true }),
      Err(err) => Err(err),
    }
  }

  /// Parse the `"row,col"` move string.
  pub fn pos(&self) -> Result<Option<Pos>, EngineError> {
    let Some(text) = &self.mv else {
      return Ok(None);
    };
    let bad = || EngineError::MoveFormat(text.clone());
    let (r, c) = text.split_once(',').ok_or_else(bad)?;
    let row: usize = r.trim().parse().map_err(|_| bad())?;
    let col: usize = c.trim().parse().map_err(|_| bad())?;
    if !Pos::in_range(row, col) {
      return Err(EngineError::InvalidMove { row, col });
    }
    Ok(Some(Pos::new(row, col)))
  }

  pub fn to_json(&self) -> Result<String, EngineError> {
    Ok(serde_json::to_string(self)?)
  }
}
