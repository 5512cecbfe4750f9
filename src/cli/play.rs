//! Play command implementation - interactive TUI game.

// TUI layout uses intentional casts between board and screen coordinates
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use super::CliError;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use tessera::{Board, Coord, PlayerId};

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the board parameters are rejected, the terminal is
/// too small for the board, or the TUI fails.
pub(crate) fn execute(width: u32, height: u32, players: u32, areas: u32) -> Result<(), CliError> {
    let board = Board::new(width, height, players, areas)
        .ok_or_else(|| CliError::new("invalid board parameters"))?;

    // The whole board plus a header and footer must fit on screen.
    let (cols, rows) = crossterm::terminal::size()?;
    let needed_cols = u64::from(board.width()) * u64::from(board.field_width());
    let needed_rows = u64::from(board.height()) + 6;
    if u64::from(cols) < needed_cols || u64::from(rows) < needed_rows {
        return Err(CliError::new(format!(
            "terminal too small: board needs {needed_cols}x{needed_rows}, have {cols}x{rows}"
        )));
    }

    let board = run_tui(board)?;

    // Final standings, printed on the normal screen.
    print!("{}", board.render());
    for player in 1..=board.players() {
        println!("PLAYER {player} {}", board.occupied_fields(player));
    }
    Ok(())
}

/// Restores the terminal when dropped, even on an error path.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, CliError> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// App state for the TUI.
struct App {
    board: Board,
    cursor: Coord,
    current: PlayerId,
    finished: bool,
}

impl App {
    fn new(board: Board) -> Self {
        Self {
            board,
            cursor: Coord::new(0, 0),
            current: 1,
            finished: false,
        }
    }

    /// Whether a player has any legal action left.
    fn can_act(&self, player: PlayerId) -> bool {
        self.board.free_fields(player) > 0 || self.board.golden_possible(player)
    }

    /// Hand the turn to the next player able to act, or finish the game.
    fn advance(&mut self) {
        let players = self.board.players();
        let mut next = self.current;
        for _ in 0..players {
            next = if next == players { 1 } else { next + 1 };
            if self.can_act(next) {
                self.current = next;
                return;
            }
        }
        self.finished = true;
    }

    fn move_cursor(&mut self, dx: i64, dy: i64) {
        let x = i64::from(self.cursor.x) + dx;
        let y = i64::from(self.cursor.y) + dy;
        if x >= 0 && x < i64::from(self.board.width()) {
            self.cursor.x = x as u32;
        }
        if y >= 0 && y < i64::from(self.board.height()) {
            self.cursor.y = y as u32;
        }
    }
}

fn run_tui(board: Board) -> Result<Board, CliError> {
    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = App::new(board);

    while !app.finished {
        terminal
            .draw(|f| ui(f, &app))
            .map_err(|e| CliError::new(e.to_string()))?;

        if let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Up => app.move_cursor(0, 1),
                KeyCode::Down => app.move_cursor(0, -1),
                KeyCode::Left => app.move_cursor(-1, 0),
                KeyCode::Right => app.move_cursor(1, 0),
                KeyCode::Char(' ') => {
                    if app.board.place(app.current, app.cursor) {
                        app.advance();
                    }
                }
                KeyCode::Char('g' | 'G') => {
                    if app.board.golden_move(app.current, app.cursor) {
                        app.advance();
                    }
                }
                KeyCode::Char('c' | 'C') => app.advance(),
                _ => {}
            }
        }
    }

    Ok(app.board)
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // Board
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_board(f, chunks[1], app);
    render_footer(f, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let player = app.current;
    let golden = if app.board.golden_possible(player) {
        "  golden [G]"
    } else {
        ""
    };
    let title = format!(
        " PLAYER {player}  busy {}  free {}{golden} ",
        app.board.occupied_fields(player),
        app.board.free_fields(player),
    );

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(player_color(player))
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let board = &app.board;
    let field = board.field_width() as usize;

    let mut lines: Vec<Line> = Vec::new();
    for y in (0..board.height()).rev() {
        let mut spans = Vec::new();
        for x in 0..board.width() {
            let coord = Coord::new(x, y);
            let (text, color) = match board.owner(coord) {
                Some(player) => (format!("{player:>field$}"), player_color(player)),
                None => (format!("{:>field$}", "."), Color::DarkGray),
            };
            let mut style = Style::default().fg(color);
            if coord == app.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn player_color(player: PlayerId) -> Color {
    match player % 8 {
        1 => Color::Red,
        2 => Color::Blue,
        3 => Color::Green,
        4 => Color::Yellow,
        5 => Color::Magenta,
        6 => Color::Cyan,
        7 => Color::LightRed,
        _ => Color::LightBlue,
    }
}

fn render_footer(f: &mut Frame, area: Rect) {
    let controls = " [Arrows] Move  [Space] Claim  [G] Golden  [C] Skip turn  [Esc/Ctrl-D] End ";
    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
