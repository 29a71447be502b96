//! Five-in-a-row (Omok) move engine.
//!
//! Given a 15x15 board, the side to move and a difficulty tier, the engine
//! plays an immediate win if one exists, otherwise blocks an immediate
//! opponent win, otherwise scores candidates greedily (tiers 0 and 1) or runs
//! an alpha-beta minimax (tiers 2 and 3).
//!
//! ```
//! use omok::{decide, Board, Difficulty, Pos, Role};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let board = Board::new();
//! let mut rng = StdRng::seed_from_u64(1);
//! let pos = decide(&board, Role::Black, Difficulty::Master, &mut rng).unwrap();
//! assert_eq!(pos, Pos::new(7, 7));
//! ```

pub mod ai;
pub mod board;
pub mod candidates;
pub mod error;
pub mod eval;
pub mod player;
pub mod protocol;
pub mod rules;
pub mod scores;

pub use ai::{decide, AIEngine, Decision, DecisionKind, Difficulty, SearchLimits};
pub use board::{Board, Cell, Move, Pos, BOARD_SIZE, CENTER};
pub use error::EngineError;
pub use player::Role;
pub use rules::{find_winner, outcome, wins, Outcome};
