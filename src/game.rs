use crate::game_logger::GameLogger;
use crate::terminal_ui::{GameAction, TerminalUI};
use log::{info, warn};
use omok::player::{Player, PlayerType};
use omok::rules::outcome;
use omok::{AIEngine, Board, Decision, EngineError, Outcome, Pos, Role, CENTER};
use rand::rngs::StdRng;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
  AIvAI,
  AIvHuman,
}

pub struct Game {
  pub board: Board,
  pub mode: GameMode,

  pub player1: Player,
  pub player2: Player,

  pub ai1: AIEngine,
  pub ai2: AIEngine,
  rng: StdRng,

  // Cursor for the human move
  pub cursor: Pos,
  pub last_stone: Option<Pos>,

  pub current_role: Role,
  pub round: u32,
}

impl Game {
  /// `player1` plays black and `ai1` serves it when it is an AI.
  pub fn new(mode: GameMode, p1: Player, p2: Player, ai1: AIEngine, ai2: AIEngine, rng: StdRng) -> Self {
    Self {
      board: Board::new(),
      mode,
      player1: p1,
      player2: p2,
      ai1,
      ai2,
      rng,
      cursor: CENTER,
      last_stone: None,
      current_role: Role::Black,
      round: 1,
    }
  }

  fn current_player(&self) -> Player {
    if self.current_role == self.player1.role {
      self.player1
    } else {
      self.player2
    }
  }

  /// Interactive game in the alternate screen.
  pub fn run(&mut self) -> io::Result<()> {
    let mut ui = TerminalUI::new();
    ui.init_screen()?;
    let result = self.run_loop(&mut ui);
    ui.restore_terminal()?;
    result
  }

  fn run_loop(&mut self, ui: &mut TerminalUI) -> io::Result<()> {
    ui.show_message("Arrows move, Enter places, u undoes, q quits")?;
    let mut game_over = false;

    loop {
      ui.draw_board(&self.board, self.cursor, self.last_stone)?;

      if game_over {
        // Wait for a final key before leaving the alternate screen
        ui.read_input()?;
        return Ok(());
      }

      match self.current_player().player_type {
        PlayerType::AI => {
          ui.show_message(&format!("AI ({:?}) is thinking...", self.current_role))?;
          match self.ai_turn() {
            Ok(decision) => {
              ui.show_message(&format!("AI ({:?}) played {} ({:?})", self.current_role.opponent(), decision.pos, decision.kind))?;
            }
            Err(err) => {
              warn!("AI could not move: {}", err);
              ui.show_message(&format!("{} - press any key", err))?;
              game_over = true;
              continue;
            }
          }
        }
        PlayerType::Human => match ui.read_input()? {
          GameAction::Quit => return Ok(()),
          GameAction::Undo => {
            // Take back the AI reply and the human move together
            if self.mode == GameMode::AIvHuman && self.board.move_count() >= 2 {
              self.board.undo();
              self.board.undo();
              self.round -= 2;
              self.last_stone = self.board.last_move().map(|m| m.pos);
            } else {
              ui.show_message("No moves to undo.")?;
            }
            continue;
          }
          GameAction::MoveLeft => self.cursor.col = self.cursor.col.saturating_sub(1),
          GameAction::MoveRight => self.cursor.col = (self.cursor.col + 1).min(omok::BOARD_SIZE - 1),
          GameAction::MoveUp => self.cursor.row = self.cursor.row.saturating_sub(1),
          GameAction::MoveDown => self.cursor.row = (self.cursor.row + 1).min(omok::BOARD_SIZE - 1),
          GameAction::PlaceStone => match self.place(self.cursor) {
            Ok(()) => info!("Human placed a stone at {}", self.cursor),
            Err(err) => ui.show_message(&err.to_string())?,
          },
          GameAction::None => continue,
        },
      }

      match outcome(&self.board) {
        Outcome::InProgress => {}
        Outcome::Won(role) => {
          ui.show_message(&format!("{} wins! Press any key.", role.symbol()))?;
          game_over = true;
        }
        Outcome::Draw => {
          ui.show_message("Game over. Draw! Press any key.")?;
          game_over = true;
        }
      }
    }
  }

  // Put a stone for the side to move and pass the turn
  fn place(&mut self, pos: Pos) -> Result<(), EngineError> {
    self.board.put(pos, self.current_role)?;
    self.last_stone = Some(pos);
    self.current_role = self.current_role.opponent();
    self.round += 1;
    Ok(())
  }

  fn ai_turn(&mut self) -> Result<Decision, EngineError> {
    let ai = if self.current_role == self.player1.role { &mut self.ai1 } else { &mut self.ai2 };
    let decision = ai.decide_with_info(&self.board, self.current_role, &mut self.rng)?;
    self.place(decision.pos)?;
    Ok(decision)
  }

  /// Engine-vs-engine game printed to stdout, optionally recorded to a file.
  pub fn run_with_logging(&mut self, record: Option<&Path>) -> io::Result<Outcome> {
    let mut logger = record.map(GameLogger::new).transpose()?;

    println!("Starting AI vs AI game");
    println!(
      "Black difficulty: {}, White difficulty: {}",
      self.ai1.difficulty.level(),
      self.ai2.difficulty.level()
    );
    if let Some(path) = record {
      println!("Record file: {}", path.display());
    }

    loop {
      let role = self.current_role;
      let round = self.round;
      if let Some(logger) = logger.as_mut() {
        logger.log_move_start(role, round)?;
        logger.log_board_state(&self.board)?;
      }

      let result = self.ai_turn();
      let (nodes, aborted) = {
        let ai = if role == self.player1.role { &self.ai1 } else { &self.ai2 };
        (ai.nodes(), ai.aborted())
      };

      let state = match result {
        Ok(decision) => {
          println!("Move #{} {:?} -> {} [{:?}]", round, role, decision.pos, decision.kind);
          if let Some(logger) = logger.as_mut() {
            logger.log_decision(&decision, nodes, aborted)?;
          }
          outcome(&self.board)
        }
        Err(EngineError::NoLegalMove) => Outcome::Draw,
        Err(err) => return Err(io::Error::new(io::ErrorKind::Other, err)),
      };

      if state != Outcome::InProgress {
        if let Some(logger) = logger.as_mut() {
          logger.log_board_state(&self.board)?;
          logger.log_game_end(state, self.board.move_count() as u32)?;
        }
        match state {
          Outcome::Won(winner) => println!("\nGame over: {:?} ({}) wins", winner, winner.symbol()),
          _ => println!("\nGame over: draw"),
        }
        println!("Total moves: {}", self.board.move_count());
        return Ok(state);
      }
    }
  }
}
