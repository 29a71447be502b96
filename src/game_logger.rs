use omok::{Board, Decision, DecisionKind, Outcome, Role, BOARD_SIZE};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Plain-text record of an engine-vs-engine game.
pub struct GameLogger {
  out: BufWriter<File>,
}

impl GameLogger {
  pub fn new(path: &Path) -> std::io::Result<Self> {
    let file = File::create(path)?;
    Ok(Self { out: BufWriter::new(file) })
  }

  pub fn log_move_start(&mut self, role: Role, round: u32) -> std::io::Result<()> {
    writeln!(
      self.out,
      "\n{}\nMove #{} - Player: {:?} ({})\n{}",
      "=".repeat(60),
      round,
      role,
      role.symbol(),
      "=".repeat(60)
    )
  }

  pub fn log_board_state(&mut self, board: &Board) -> std::io::Result<()> {
    write!(self.out, "\n   ")?;
    for col in 0..BOARD_SIZE {
      write!(self.out, "{:2} ", col)?;
    }
    writeln!(self.out)?;

    for (row, cells) in board.to_matrix().iter().enumerate() {
      write!(self.out, "{:2} ", row)?;
      for &value in cells {
        let ch = match value {
          1 => Role::Black.symbol(),
          2 => Role::White.symbol(),
          _ => ".",
        };
        write!(self.out, " {} ", ch)?;
      }
      writeln!(self.out)?;
    }
    Ok(())
  }

  pub fn log_decision(&mut self, decision: &Decision, nodes: u64, aborted: bool) -> std::io::Result<()> {
    let reason = match decision.kind {
      DecisionKind::ImmediateWin => "Winning move (FIVE)",
      DecisionKind::Block => "Blocks opponent FIVE",
      DecisionKind::Greedy => "Best point score",
      DecisionKind::RandomPick => "Random pick (difficulty)",
      DecisionKind::Minimax => "Minimax search",
    };
    writeln!(self.out, "\n  Chosen move: {}", decision.pos)?;
    writeln!(self.out, "  Reason: {}", reason)?;
    if let Some(score) = decision.score {
      writeln!(self.out, "  Evaluation: {}", score)?;
    }
    if nodes > 0 {
      writeln!(self.out, "  Nodes: {}{}", nodes, if aborted { " (search limit hit)" } else { "" })?;
    }
    Ok(())
  }

  pub fn log_game_end(&mut self, outcome: Outcome, total_moves: u32) -> std::io::Result<()> {
    writeln!(self.out, "\n\n{}\nGAME OVER\n{}", "=".repeat(60), "=".repeat(60))?;
    match outcome {
      Outcome::Won(role) => writeln!(self.out, "Result: {:?} ({}) WINS!", role, role.symbol())?,
      Outcome::Draw => writeln!(self.out, "Result: DRAW")?,
      Outcome::InProgress => writeln!(self.out, "Result: UNFINISHED")?,
    }
    writeln!(self.out, "Total moves: {}", total_moves)?;
    self.out.flush()
  }
}
