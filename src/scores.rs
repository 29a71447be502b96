//! Heuristic weights for window scoring and move ordering.

#[rustfmt::skip]
pub mod shape {
  pub const FIVE: i32        = 100_000;
  pub const LIVE_FOUR: i32   = 10_000;
  pub const LIVE_THREE: i32  = 1_000;
  pub const DEAD_THREE: i32  = 100;
  pub const LIVE_TWO: i32    = 100;
  pub const DEAD_TWO: i32    = 10;
  pub const LIVE_ONE: i32    = 1;
  pub const NONE: i32        = 0;
}

#[rustfmt::skip]
pub mod quick {
  pub const OWN_FIVE: i32    = 10_000;
  pub const OPP_FIVE: i32    = 5_000;
  pub const OWN_FOUR: i32    = 1_000;
  pub const OPP_FOUR: i32    = 500;
}

/// Opponent patterns weigh more than our own in a static evaluation.
pub const DEFENSE_WEIGHT: f64 = 1.2;
/// Blocking value of a point relative to its attacking value.
pub const BLOCK_WEIGHT: f64 = 0.9;
