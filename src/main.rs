mod cli;
mod game;
mod game_logger;
mod terminal_ui;

use crate::cli::{CliArgs, ColorArg, GameModeArg};
use crate::game::{Game, GameMode};
use clap::Parser;
use log::error;
use omok::player::{Player, PlayerType};
use omok::protocol::{BoardState, MoveReply};
use omok::{AIEngine, Difficulty, Role, SearchLimits};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::process::ExitCode;
use std::time::Duration;

fn main() -> ExitCode {
  // 1) Parse command line arguments
  let args = CliArgs::parse();

  if let Err(err) = init_logging(&args) {
    eprintln!("failed to initialise logging: {}", err);
    return ExitCode::FAILURE;
  }

  // 2) Dispatch on the mode
  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      error!("{}", err);
      eprintln!("error: {}", err);
      ExitCode::FAILURE
    }
  }
}

fn init_logging(args: &CliArgs) -> Result<(), Box<dyn Error + Send + Sync>> {
  if args.trace {
    // Also forwards `log` records through the tracing-log bridge
    tracing_subscriber::fmt()
      .with_max_level(tracing::Level::TRACE)
      .with_writer(std::io::stderr)
      .try_init()?;
  } else if let Some(path) = &args.log_file {
    simplelog::WriteLogger::init(simplelog::LevelFilter::Debug, simplelog::Config::default(), File::create(path)?)?;
  } else {
    env_logger::try_init()?;
  }
  Ok(())
}

fn run(args: &CliArgs) -> Result<(), Box<dyn Error>> {
  let difficulty = Difficulty::from_level(args.difficulty)?;
  let limits = search_limits(args);
  let rng = match args.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  };

  match args.mode {
    GameModeArg::Decide => decide_once(args, difficulty, limits, rng),
    GameModeArg::HumanAi => {
      let human = match args.human {
        ColorArg::B => Role::Black,
        ColorArg::W => Role::White,
      };
      let kind = |role: Role| if role == human { PlayerType::Human } else { PlayerType::AI };
      let black = Player { player_type: kind(Role::Black), role: Role::Black };
      let white = Player { player_type: kind(Role::White), role: Role::White };
      let ai = || AIEngine::with_limits(difficulty, limits.clone());
      let mut game = Game::new(GameMode::AIvHuman, black, white, ai(), ai(), rng);
      game.run()?;
      Ok(())
    }
    GameModeArg::AiAi => {
      let white_difficulty = match args.white_difficulty {
        Some(level) => Difficulty::from_level(level)?,
        None => difficulty,
      };
      let black = Player { player_type: PlayerType::AI, role: Role::Black };
      let white = Player { player_type: PlayerType::AI, role: Role::White };
      let mut game = Game::new(
        GameMode::AIvAI,
        black,
        white,
        AIEngine::with_limits(difficulty, limits.clone()),
        AIEngine::with_limits(white_difficulty, limits),
        rng,
      );
      game.run_with_logging(args.record.as_deref())?;
      Ok(())
    }
  }
}

fn search_limits(args: &CliArgs) -> SearchLimits {
  let mut limits = SearchLimits::unlimited();
  if let Some(ms) = args.time_limit_ms {
    limits = limits.with_time_limit(Duration::from_millis(ms));
  }
  if let Some(nodes) = args.node_budget {
    limits = limits.with_node_budget(nodes);
  }
  limits
}

// Read one board state, answer with one move reply on stdout
fn decide_once(args: &CliArgs, difficulty: Difficulty, limits: SearchLimits, mut rng: StdRng) -> Result<(), Box<dyn Error>> {
  let mut json = String::new();
  match &args.input {
    Some(path) => File::open(path)?.read_to_string(&mut json)?,
    None => std::io::stdin().read_to_string(&mut json)?,
  };

  let (board, turn) = BoardState::from_json(&json)?.decode()?;
  let mut engine = AIEngine::with_limits(difficulty, limits);
  let reply = MoveReply::from_result(engine.decide(&board, turn, &mut rng))?;
  println!("{}", reply.to_json()?);
  Ok(())
}
