use crate::board::{Board, Pos};
use crate::candidates::candidates;
use crate::error::EngineError;
use crate::eval::{board_score, point_score, quick_move_score};
use crate::player::Role;
use crate::rules::wins;
use crate::scores::shape;
use log::{debug, info, trace};
use rand::Rng;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Moves kept per node after ordering.
pub const MAX_BRANCH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
  Easy,
  Normal,
  Hard,
  Master,
}

impl Difficulty {
  pub fn from_level(level: u8) -> Result<Self, EngineError> {
    match level {
      0 => Ok(Difficulty::Easy),
      1 => Ok(Difficulty::Normal),
      2 => Ok(Difficulty::Hard),
      3 => Ok(Difficulty::Master),
      other => Err(EngineError::InvalidDifficulty(other)),
    }
  }

  pub fn level(self) -> u8 {
    self as u8
  }

  /// Minimax depth, or `None` for the greedy tiers.
  pub fn search_depth(self) -> Option<u32> {
    match self {
      Difficulty::Easy | Difficulty::Normal => None,
      Difficulty::Hard => Some(2),
      Difficulty::Master => Some(4),
    }
  }

  /// Probability of throwing away the greedy choice for a random candidate.
  pub fn blunder_chance(self) -> f64 {
    match self {
      Difficulty::Easy => 0.4,
      Difficulty::Normal => 0.2,
      Difficulty::Hard | Difficulty::Master => 0.0,
    }
  }
}

impl TryFrom<u8> for Difficulty {
  type Error = EngineError;

  fn try_from(level: u8) -> Result<Self, Self::Error> {
    Difficulty::from_level(level)
  }
}

/// Optional bounds on a minimax search. The default is unbounded.
///
/// The time limit counts from the start of each decision, so one set of
/// limits can be reused for a whole game.
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
  pub time_limit: Option<Duration>,
  pub node_budget: Option<u64>,
  pub cancel: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
  pub fn unlimited() -> Self {
    Self::default()
  }

  pub fn with_time_limit(mut self, limit: Duration) -> Self {
    self.time_limit = Some(limit);
    self
  }

  pub fn with_node_budget(mut self, nodes: u64) -> Self {
    self.node_budget = Some(nodes);
    self
  }

  pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
    self.cancel = Some(flag);
    self
  }
}

/// How the engine arrived at its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
  ImmediateWin,
  Block,
  Greedy,
  RandomPick,
  Minimax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
  pub pos: Pos,
  pub kind: DecisionKind,
  pub score: Option<i32>,
}

struct SearchResult {
  mv: Option<Pos>,
  score: i32,
}

pub struct AIEngine {
  pub difficulty: Difficulty,
  pub limits: SearchLimits,
  // Per-call counters, reset by every decision
  nodes: u64,
  aborted: bool,
  root_depth: u32,
  deadline: Option<Instant>,
}

impl AIEngine {
  pub fn new(difficulty: Difficulty) -> Self {
    Self {
      difficulty,
      limits: SearchLimits::default(),
      nodes: 0,
      aborted: false,
      root_depth: 0,
      deadline: None,
    }
  }

  pub fn with_limits(difficulty: Difficulty, limits: SearchLimits) -> Self {
    Self { limits, ..Self::new(difficulty) }
  }

  /// Nodes visited by the last minimax search.
  pub fn nodes(&self) -> u64 {
    self.nodes
  }

  /// Whether the last search stopped early on a limit.
  pub fn aborted(&self) -> bool {
    self.aborted
  }

  pub fn decide<R: Rng>(&mut self, board: &Board, role: Role, rng: &mut R) -> Result<Pos, EngineError> {
    self.decide_with_info(board, role, rng).map(|d| d.pos)
  }

  /// Pick a move for `role`. `board` is never modified; the search runs on
  /// a private copy.
  pub fn decide_with_info<R: Rng>(&mut self, board: &Board, role: Role, rng: &mut R) -> Result<Decision, EngineError> {
    let _span = tracing::debug_span!("omok::decide", role = ?role, difficulty = self.difficulty.level()).entered();
    self.nodes = 0;
    self.aborted = false;
    self.deadline = self.limits.time_limit.map(|limit| Instant::now() + limit);

    let mut work = board.clone();
    let opponent = role.opponent();

    let decision = if let Some(pos) = find_immediate_win(&work, role) {
      debug!("{:?} wins immediately at {}", role, pos);
      Decision { pos, kind: DecisionKind::ImmediateWin, score: None }
    } else if let Some(pos) = find_immediate_win(&work, opponent) {
      debug!("{:?} blocks the {:?} five at {}", role, opponent, pos);
      Decision { pos, kind: DecisionKind::Block, score: None }
    } else {
      let moves = candidates(&work);
      if moves.is_empty() {
        info!("{:?} has no legal move, board is full", role);
        return Err(EngineError::NoLegalMove);
      }
      match self.difficulty.search_depth() {
        None => self.greedy_move(&mut work, &moves, role, rng)?,
        Some(depth) => self.minimax_move(&mut work, role, depth)?,
      }
    };

    info!(
      "{:?} (difficulty {}) plays {} via {:?}",
      role,
      self.difficulty.level(),
      decision.pos,
      decision.kind
    );
    Ok(decision)
  }

  fn greedy_move<R: Rng>(&self, board: &mut Board, moves: &[Pos], role: Role, rng: &mut R) -> Result<Decision, EngineError> {
    let opponent = role.opponent();
    let scored = moves.iter().map(|&pos| (pos, point_score(board, pos, role, opponent)));
    let (best, best_score) = running_best(scored, rng).ok_or(EngineError::NoLegalMove)?;

    let chance = self.difficulty.blunder_chance();
    if chance > 0.0 && rng.gen::<f64>() < chance {
      let pos = moves[rng.gen_range(0..moves.len())];
      debug!("greedy best was {} ({}), playing random {}", best, best_score, pos);
      return Ok(Decision { pos, kind: DecisionKind::RandomPick, score: None });
    }

    Ok(Decision { pos: best, kind: DecisionKind::Greedy, score: Some(best_score) })
  }

  fn minimax_move(&mut self, board: &mut Board, role: Role, depth: u32) -> Result<Decision, EngineError> {
    self.root_depth = depth;
    let result = self.minimax(board, depth, i32::MIN, i32::MAX, true, role);
    debug!(
      "minimax depth {} score {} after {} nodes{}",
      depth,
      result.score,
      self.nodes,
      if self.aborted { " (stopped early)" } else { "" }
    );
    let pos = result.mv.ok_or(EngineError::NoLegalMove)?;
    Ok(Decision { pos, kind: DecisionKind::Minimax, score: Some(result.score) })
  }

  fn minimax(&mut self, board: &mut Board, depth: u32, mut alpha: i32, mut beta: i32, maximizing: bool, root: Role) -> SearchResult {
    if depth == 0 {
      return SearchResult { mv: None, score: board_score(board, root) };
    }

    // The root always orders its moves so a stopped search still has one.
    self.nodes += 1;
    if depth < self.root_depth && self.out_of_budget() {
      self.aborted = true;
      return SearchResult { mv: None, score: 0 };
    }

    let mut moves = candidates(board);
    if moves.is_empty() {
      return SearchResult { mv: None, score: 0 };
    }

    let (mover, other) = if maximizing { (root, root.opponent()) } else { (root.opponent(), root) };
    order_moves(board, &mut moves, mover, other);

    let mut best = SearchResult {
      mv: Some(moves[0]),
      score: if maximizing { i32::MIN } else { i32::MAX },
    };

    for &pos in &moves {
      if wins(board, pos, mover) {
        // Sooner wins and later losses score further from zero.
        let score = shape::FIVE * (depth as i32 + 1);
        return SearchResult { mv: Some(pos), score: if maximizing { score } else { -score } };
      }

      board.set(pos, mover);
      let child = self.minimax(board, depth - 1, alpha, beta, !maximizing, root);
      board.clear(pos);

      if self.aborted {
        break;
      }
      if depth == self.root_depth {
        trace!("root move {} scores {}", pos, child.score);
      }

      if maximizing {
        if child.score > best.score {
          best = SearchResult { mv: Some(pos), score: child.score };
        }
        alpha = alpha.max(child.score);
      } else {
        if child.score < best.score {
          best = SearchResult { mv: Some(pos), score: child.score };
        }
        beta = beta.min(child.score);
      }
      if beta <= alpha {
        break;
      }
    }
    best
  }

  fn out_of_budget(&self) -> bool {
    if self.aborted {
      return true;
    }
    if let Some(budget) = self.limits.node_budget {
      if self.nodes > budget {
        return true;
      }
    }
    if let Some(flag) = &self.limits.cancel {
      if flag.load(Ordering::Relaxed) {
        return true;
      }
    }
    matches!(self.deadline, Some(deadline) if Instant::now() >= deadline)
  }
}

/// Stateless entry point: a fresh engine with no search limits.
pub fn decide<R: Rng>(board: &Board, role: Role, difficulty: Difficulty, rng: &mut R) -> Result<Pos, EngineError> {
  AIEngine::new(difficulty).decide(board, role, rng)
}

/// First empty cell, row-major, where `role` completes five.
pub fn find_immediate_win(board: &Board, role: Role) -> Option<Pos> {
  board.empty_cells().find(|&pos| wins(board, pos, role))
}

// Highest score wins. Each equal newcomer replaces the current best on a
// coin flip, so among k ties the last one is kept half the time.
fn running_best<R: Rng>(scored: impl IntoIterator<Item = (Pos, i32)>, rng: &mut R) -> Option<(Pos, i32)> {
  let mut best: Option<(Pos, i32)> = None;
  for (pos, score) in scored {
    match best {
      Some((_, best_score)) if score < best_score => {}
      Some((_, best_score)) if score == best_score && !rng.gen_bool(0.5) => {}
      _ => best = Some((pos, score)),
    }
  }
  best
}

// Best-first by the quick heuristic, stable for equal keys, then truncated.
fn order_moves(board: &Board, moves: &mut Vec<Pos>, mover: Role, other: Role) {
  moves.sort_by_cached_key(|&pos| Reverse(quick_move_score(board, pos, mover, other)));
  moves.truncate(MAX_BRANCH);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::board::CENTER;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
  }

  fn board_with(stones: &[(usize, usize, Role)]) -> Board {
    let mut board = Board::new();
    for &(r, c, role) in stones {
      board.put(Pos::new(r, c), role).unwrap();
    }
    board
  }

  #[test]
  fn difficulty_levels() {
    assert_eq!(Difficulty::from_level(3).unwrap(), Difficulty::Master);
    assert_eq!(Difficulty::Hard.search_depth(), Some(2));
    assert_eq!(Difficulty::Master.search_depth(), Some(4));
    assert_eq!(Difficulty::Normal.search_depth(), None);
    assert!(matches!(Difficulty::try_from(4), Err(EngineError::InvalidDifficulty(4))));
  }

  #[test]
  fn immediate_win_is_row_major() {
    let board = board_with(&[
      (2, 1, Role::Black),
      (2, 2, Role::Black),
      (2, 3, Role::Black),
      (2, 4, Role::Black),
    ]);
    assert_eq!(find_immediate_win(&board, Role::Black), Some(Pos::new(2, 0)));
    assert_eq!(find_immediate_win(&board, Role::White), None);
  }

  #[test]
  fn win_beats_block() {
    let mut stones = Vec::new();
    for c in 0..4 {
      stones.push((0, c, Role::White));
      stones.push((5, c + 5, Role::Black));
    }
    let board = board_with(&stones);
    for level in 0..4 {
      let mut engine = AIEngine::new(Difficulty::from_level(level).unwrap());
      let decision = engine.decide_with_info(&board, Role::Black, &mut rng()).unwrap();
      assert_eq!(decision.kind, DecisionKind::ImmediateWin);
      assert!(wins(&board, decision.pos, Role::Black));
    }
  }

  #[test]
  fn blocks_single_threat() {
    let board = board_with(&[
      (3, 3, Role::White),
      (4, 4, Role::White),
      (5, 5, Role::White),
      (6, 6, Role::White),
      (2, 2, Role::Black),
      (9, 9, Role::Black),
    ]);
    for level in 0..4 {
      let pos = decide(&board, Role::Black, Difficulty::from_level(level).unwrap(), &mut rng()).unwrap();
      assert_eq!(pos, Pos::new(7, 7));
    }
  }

  #[test]
  fn empty_board_master_takes_center() {
    let pos = decide(&Board::new(), Role::Black, Difficulty::Master, &mut rng()).unwrap();
    assert_eq!(pos, CENTER);
  }

  #[test]
  fn minimax_returns_empty_cell() {
    let board = board_with(&[
      (7, 7, Role::Black),
      (7, 8, Role::White),
      (8, 7, Role::Black),
      (6, 6, Role::White),
      (8, 8, Role::Black),
    ]);
    let mut engine = AIEngine::new(Difficulty::Hard);
    let decision = engine.decide_with_info(&board, Role::White, &mut rng()).unwrap();
    assert_eq!(decision.kind, DecisionKind::Minimax);
    assert!(board.is_empty_at(decision.pos));
    assert!(engine.nodes() > 0);
    assert!(!engine.aborted());
  }

  #[test]
  fn node_budget_stops_search_with_legal_move() {
    let board = board_with(&[(7, 7, Role::Black), (7, 8, Role::White), (8, 8, Role::Black)]);
    let mut engine = AIEngine::with_limits(Difficulty::Master, SearchLimits::unlimited().with_node_budget(5));
    let pos = engine.decide(&board, Role::White, &mut rng()).unwrap();
    assert!(engine.aborted());
    assert!(board.is_empty_at(pos));
  }

  #[test]
  fn zero_time_limit_still_answers() {
    let board = board_with(&[(7, 7, Role::Black), (8, 7, Role::White)]);
    let limits = SearchLimits::unlimited().with_time_limit(Duration::ZERO);
    let mut engine = AIEngine::with_limits(Difficulty::Master, limits);
    let pos = engine.decide(&board, Role::Black, &mut rng()).unwrap();
    assert!(engine.aborted());
    assert!(board.is_empty_at(pos));
  }

  #[test]
  fn cancelled_search_still_answers() {
    let flag = Arc::new(AtomicBool::new(true));
    let board = board_with(&[(7, 7, Role::Black)]);
    let mut engine = AIEngine::with_limits(Difficulty::Master, SearchLimits::unlimited().with_cancel(flag));
    let pos = engine.decide(&board, Role::White, &mut rng()).unwrap();
    assert!(engine.aborted());
    assert!(board.is_empty_at(pos));
  }

  #[test]
  fn greedy_tiers_pick_candidates() {
    let board = board_with(&[(7, 7, Role::Black), (8, 8, Role::White)]);
    let moves = candidates(&board);
    for seed in 0..20 {
      let mut rng = StdRng::seed_from_u64(seed);
      let pos = decide(&board, Role::Black, Difficulty::Easy, &mut rng).unwrap();
      assert!(moves.contains(&pos));
    }
  }

  // No fours and no open threes for either side.
  fn quiet_board() -> Board {
    board_with(&[
      (7, 7, Role::Black),
      (7, 8, Role::White),
      (8, 8, Role::Black),
      (6, 6, Role::White),
      (8, 6, Role::Black),
      (9, 9, Role::White),
    ])
  }

  fn random_pick_rate(difficulty: Difficulty) -> f64 {
    let board = quiet_board();
    let mut engine = AIEngine::new(difficulty);
    let runs = 2000;
    let picks = (0..runs)
      .filter(|&seed| {
        let decision = engine.decide_with_info(&board, Role::Black, &mut StdRng::seed_from_u64(seed)).unwrap();
        decision.kind == DecisionKind::RandomPick
      })
      .count();
    picks as f64 / runs as f64
  }

  #[test]
  fn random_pick_rate_follows_difficulty() {
    let easy = random_pick_rate(Difficulty::Easy);
    assert!(easy > 0.35 && easy < 0.45, "easy rate {}", easy);
    let normal = random_pick_rate(Difficulty::Normal);
    assert!(normal > 0.16 && normal < 0.24, "normal rate {}", normal);
  }

  #[test]
  fn ties_go_through_running_coin_flip() {
    let tied: Vec<(Pos, i32)> = (0..4).map(|c| (Pos::new(0, c), 10)).collect();
    let runs = 2000;
    let mut counts = [0usize; 4];
    for seed in 0..runs {
      let (pos, score) = running_best(tied.iter().copied(), &mut StdRng::seed_from_u64(seed)).unwrap();
      assert_eq!(score, 10);
      counts[pos.col] += 1;
    }
    // A uniform pick would give each tie a quarter; the running flip keeps
    // the last one half the time and the first one an eighth.
    let last = counts[3] as f64 / runs as f64;
    let first = counts[0] as f64 / runs as f64;
    assert!(last > 0.45 && last < 0.55, "last {}", last);
    assert!(first > 0.09 && first < 0.16, "first {}", first);
  }

  #[test]
  fn running_best_prefers_higher_score_without_flipping() {
    let scored = [(Pos::new(0, 0), 3), (Pos::new(0, 1), 9), (Pos::new(0, 2), 4)];
    for seed in 0..10 {
      let best = running_best(scored, &mut StdRng::seed_from_u64(seed));
      assert_eq!(best, Some((Pos::new(0, 1), 9)));
    }
    assert_eq!(running_best(Vec::<(Pos, i32)>::new(), &mut rng()), None);
  }

  #[test]
  fn search_scores_win_found_two_plies_down() {
    // Extending the open three makes an open four that cannot be held.
    let board = board_with(&[
      (7, 6, Role::Black),
      (7, 7, Role::Black),
      (7, 8, Role::Black),
      (12, 12, Role::White),
      (12, 13, Role::White),
    ]);
    let mut engine = AIEngine::new(Difficulty::Master);
    let decision = engine.decide_with_info(&board, Role::Black, &mut rng()).unwrap();
    assert_eq!(decision.kind, DecisionKind::Minimax);
    assert!(decision.pos == Pos::new(7, 5) || decision.pos == Pos::new(7, 9), "played {}", decision.pos);
    // Black completes five with two plies of the four left.
    assert_eq!(decision.score, Some(shape::FIVE * 3));
  }

  #[test]
  fn search_win_score_is_signed_by_side() {
    let mut board = board_with(&[
      (3, 3, Role::Black),
      (3, 4, Role::Black),
      (3, 5, Role::Black),
      (3, 6, Role::Black),
    ]);
    let mut engine = AIEngine::new(Difficulty::Hard);
    engine.root_depth = 2;

    let max = engine.minimax(&mut board, 2, i32::MIN, i32::MAX, true, Role::Black);
    assert_eq!(max.score, shape::FIVE * 3);
    assert!(max.mv.is_some_and(|pos| wins(&board, pos, Role::Black)));

    // Same position seen from White's root with Black to reply.
    let min = engine.minimax(&mut board, 2, i32::MIN, i32::MAX, false, Role::White);
    assert_eq!(min.score, -shape::FIVE * 3);
    assert!(min.mv.is_some_and(|pos| wins(&board, pos, Role::Black)));
  }

  #[test]
  fn decision_runs_inside_named_span() {
    use std::sync::Mutex;
    use tracing::span::{Attributes, Id};
    use tracing::Subscriber;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct SpanNames(Arc<Mutex<Vec<&'static str>>>);

    impl<S: Subscriber> Layer<S> for SpanNames {
      fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        self.0.lock().unwrap().push(attrs.metadata().name());
      }
    }

    let names = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(SpanNames(names.clone()));
    tracing::subscriber::with_default(subscriber, || {
      decide(&Board::new(), Role::Black, Difficulty::Normal, &mut rng()).unwrap();
    });
    assert!(names.lock().unwrap().contains(&"omok::decide"));
  }

  #[test]
  fn search_leaves_caller_board_untouched() {
    let board = board_with(&[(7, 7, Role::Black), (7, 8, Role::White), (6, 7, Role::Black)]);
    let before = board.clone();
    for level in 0..4 {
      decide(&board, Role::White, Difficulty::from_level(level).unwrap(), &mut rng()).unwrap();
    }
    assert_eq!(board, before);
    assert_eq!(board.to_matrix(), before.to_matrix());
  }
}
