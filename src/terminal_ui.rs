use crossterm::{
  cursor::{Hide, MoveTo, Show},
  event::{read, Event, KeyCode, KeyEvent, KeyEventKind},
  execute, queue,
  style::{Color, Print, ResetColor, SetForegroundColor},
  terminal::{disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use omok::{Board, Cell, Pos, BOARD_SIZE};
use std::io::{stdout, Result as IoResult, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
  None,
  Quit,
  Undo,
  MoveLeft,
  MoveRight,
  MoveUp,
  MoveDown,
  PlaceStone,
}

pub struct TerminalUI {
  /// Bottom-line message, redrawn with every frame
  last_message: String,
}

impl TerminalUI {
  const CURSOR_COLOR: Color = Color::Rgb { r: 120, g: 255, b: 120 };
  const LAST_STONE_COLOR: Color = Color::Rgb { r: 255, g: 140, b: 140 };
  const CELL_WIDTH: u16 = 3;

  pub fn new() -> Self {
    Self { last_message: String::new() }
  }

  pub fn init_screen(&mut self) -> IoResult<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, Hide)
  }

  pub fn restore_terminal(&mut self) -> IoResult<()> {
    execute!(stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()
  }

  /// Block until a key maps to an action.
  pub fn read_input(&mut self) -> IoResult<GameAction> {
    let action = match read()? {
      Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) => match code {
        KeyCode::Esc | KeyCode::Char('q') => GameAction::Quit,
        KeyCode::Backspace | KeyCode::Char('u') => GameAction::Undo,
        KeyCode::Left => GameAction::MoveLeft,
        KeyCode::Right => GameAction::MoveRight,
        KeyCode::Up => GameAction::MoveUp,
        KeyCode::Down => GameAction::MoveDown,
        KeyCode::Enter | KeyCode::Char(' ') => GameAction::PlaceStone,
        _ => GameAction::None,
      },
      _ => GameAction::None,
    };
    Ok(action)
  }

  pub fn show_message(&mut self, msg: &str) -> IoResult<()> {
    self.last_message = msg.to_string();
    let mut out = stdout();
    self.queue_message(&mut out)?;
    out.flush()
  }

  fn queue_message(&self, out: &mut impl Write) -> IoResult<()> {
    let (cols, rows) = size().unwrap_or((80, 24));
    let y = rows.saturating_sub(2);
    let x = cols.saturating_sub(self.last_message.len() as u16) / 2;
    queue!(out, MoveTo(0, y), Clear(ClearType::CurrentLine), MoveTo(x, y), Print(&self.last_message))
  }

  /// Draw the board centred, highlighting the cursor and the last stone.
  pub fn draw_board(&mut self, board: &Board, cursor: Pos, last_stone: Option<Pos>) -> IoResult<()> {
    let (cols, rows) = size().unwrap_or((80, 24));
    let n = BOARD_SIZE as u16;
    let used_width = n * Self::CELL_WIDTH - 1;

    // Leave room for the column header and the top border.
    let offset_x = cols.saturating_sub(used_width) / 2;
    let offset_y = (rows.saturating_sub(n) / 2).max(2);

    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;

    queue!(out, MoveTo(offset_x + 1, offset_y - 2))?;
    for col in 0..BOARD_SIZE {
      queue!(out, Print(format!("{:<3}", col % 10)))?;
    }

    queue!(out, MoveTo(offset_x, offset_y - 1), Print("╔"), Print("═".repeat(used_width as usize)), Print("╗"))?;

    for row in 0..BOARD_SIZE {
      let y = offset_y + row as u16;
      queue!(out, MoveTo(offset_x.saturating_sub(3), y), Print(format!("{:>2} ║", row)))?;
      for col in 0..BOARD_SIZE {
        let pos = Pos::new(row, col);
        let is_cursor = pos == cursor;
        let is_last = last_stone == Some(pos);

        let symbol = match board.get(pos).role() {
          Some(role) => role.symbol(),
          None if is_cursor => "+",
          None => ".",
        };
        let color = if is_cursor {
          Some(Self::CURSOR_COLOR)
        } else if is_last && board.get(pos) != Cell::Empty {
          Some(Self::LAST_STONE_COLOR)
        } else {
          None
        };

        queue!(out, MoveTo(offset_x + 1 + col as u16 * Self::CELL_WIDTH, y))?;
        match color {
          Some(c) => queue!(out, SetForegroundColor(c), Print(symbol), ResetColor)?,
          None => queue!(out, Print(symbol))?,
        }
      }
      queue!(out, MoveTo(offset_x + used_width + 1, y), Print("║"))?;
    }

    queue!(out, MoveTo(offset_x, offset_y + n), Print("╚"), Print("═".repeat(used_width as usize)), Print("╝"))?;

    self.queue_message(&mut out)?;
    out.flush()
  }
}
