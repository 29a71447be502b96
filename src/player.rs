use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerType {
  Human,
  AI,
}

// Colour of the stone. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
  Black, // 1, 'b'
  White, // 2, 'w'
}

impl Role {
  // Get the opponent's role
  pub fn opponent(&self) -> Role {
    match self {
      Role::Black => Role::White,
      Role::White => Role::Black,
    }
  }

  // Matrix value used by the board wire format
  pub fn to_int(&self) -> i32 {
    match self {
      Role::Black => 1,
      Role::White => 2,
    }
  }

  pub fn to_code(&self) -> char {
    match self {
      Role::Black => 'b',
      Role::White => 'w',
    }
  }

  /// Parse the external turn indicator ("b" / "w").
  pub fn from_code(code: &str) -> Result<Role, EngineError> {
    match code.trim() {
      "b" | "B" => Ok(Role::Black),
      "w" | "W" => Ok(Role::White),
      other => Err(EngineError::UnknownTurn(other.to_string())),
    }
  }

  // Symbol used by the terminal board and the game record
  pub fn symbol(&self) -> &'static str {
    match self {
      Role::Black => "X",
      Role::White => "O",
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub struct Player {
  pub player_type: PlayerType,
  pub role: Role,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn opponent_flips() {
    assert_eq!(Role::Black.opponent(), Role::White);
    assert_eq!(Role::White.opponent(), Role::Black);
  }

  #[test]
  fn codes_round_trip() {
    assert_eq!(Role::from_code("b").unwrap(), Role::Black);
    assert_eq!(Role::from_code("w").unwrap(), Role::White);
    assert_eq!(Role::Black.to_code(), 'b');
    assert_eq!(Role::White.to_int(), 2);
  }

  #[test]
  fn unknown_turn_is_rejected() {
    assert!(matches!(Role::from_code("x"), Err(EngineError::UnknownTurn(_))));
  }
}
