use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameModeArg {
  /// Human vs AI in the terminal
  HumanAi,
  /// AI vs AI, printed move by move
  AiAi,
  /// Read one JSON board state and print the engine's move
  Decide,
}

/// Stone colour for the human player
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
  B,
  W,
}

/// Omok (five in a row) engine
#[derive(Parser, Debug)]
#[command(name = "omok", version)]
pub struct CliArgs {
  /// Game mode
  #[arg(long, value_enum, default_value_t = GameModeArg::HumanAi)]
  pub mode: GameModeArg,

  /// AI difficulty: 0 easy, 1 normal, 2 hard, 3 master
  #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=3))]
  pub difficulty: u8,

  /// Difficulty of the second AI in ai-ai mode (defaults to --difficulty)
  #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
  pub white_difficulty: Option<u8>,

  /// Colour played by the human in human-ai mode
  #[arg(long, value_enum, default_value_t = ColorArg::B)]
  pub human: ColorArg,

  /// Seed for the engine's random choices
  #[arg(long)]
  pub seed: Option<u64>,

  /// Wall-clock limit per minimax search, in milliseconds
  #[arg(long)]
  pub time_limit_ms: Option<u64>,

  /// Maximum minimax nodes per search
  #[arg(long)]
  pub node_budget: Option<u64>,

  /// Board state JSON for decide mode (stdin when absent)
  #[arg(long)]
  pub input: Option<PathBuf>,

  /// Write a move-by-move record of an ai-ai game
  #[arg(long)]
  pub record: Option<PathBuf>,

  /// Send log output to this file
  #[arg(long)]
  pub log_file: Option<PathBuf>,

  /// Emit tracing spans to stderr
  #[arg(long)]
  pub trace: bool,
}
