use std::io::{Stdout, Write};

use crossterm::{
    QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Color, StyledContent, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    config::Pacing,
    maze::{Cell, Coord, Direction, MazeEvent, MazeObserver, SearchStatus, grid::Grid},
};

/// Draws maze events in the terminal as they arrive.
///
/// The maze is laid out on a `(2 * rows + 1) x (2 * columns + 1)` grid of units: cell interiors
/// sit on odd/odd units, walls and passages between them, corners are always walls. Each unit is
/// [`Renderer::CELL_WIDTH`] characters wide.
pub struct Renderer {
    stdout: Stdout,
    /// Mirror of the maze, rebuilt from events
    shadow: Option<Grid<Cell>>,
    /// Start and goal cells, drawn on top of their search status
    endpoints: Option<(Coord, Coord)>,
    pacing: Pacing,
}

impl Renderer {
    /// The width of each unit when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
    /// Rows reserved below the maze for the status line and the final message.
    pub const NUM_LOG_ROWS: u16 = 3;

    const WALL: &'static str = "⬜";
    const START: &'static str = "🟩";
    const GOAL: &'static str = "🟥";
    const PATH: &'static str = "🟨";

    pub fn new(pacing: Pacing, endpoints: Option<(Coord, Coord)>) -> Self {
        Self {
            stdout: std::io::stdout(),
            shadow: None,
            endpoints,
            pacing,
        }
    }

    /// Terminal row right below the maze.
    pub fn log_row(rows: usize) -> u16 {
        (2 * rows + 1).min(u16::MAX as usize) as u16
    }

    fn glyph(&self, coord: Coord, cell: &Cell) -> StyledContent<&'static str> {
        match self.endpoints {
            Some((start, _)) if start == coord => return Self::START.with(Color::Green),
            Some((_, goal)) if goal == coord => return Self::GOAL.with(Color::Red),
            _ => {}
        }
        match cell.status {
            SearchStatus::Path => Self::PATH.with(Color::Yellow),
            SearchStatus::Explored => "* ".with(Color::Red),
            SearchStatus::Frontier => "+ ".with(Color::Cyan),
            SearchStatus::Unexplored if cell.visited => "  ".with(Color::Reset),
            SearchStatus::Unexplored => Self::WALL.with(Color::DarkGrey),
        }
    }

    /// Glyph of the unit between `coord` and its neighbor on side `dir`.
    fn side_glyph(
        &self,
        shadow: &Grid<Cell>,
        coord: Coord,
        dir: Direction,
    ) -> StyledContent<&'static str> {
        let cell = &shadow[coord];
        if cell.walls.has(dir) {
            return Self::WALL.with(Color::White);
        }
        let (dr, dc) = dir.offset();
        let neighbor = coord
            .0
            .checked_add_signed(dr)
            .zip(coord.1.checked_add_signed(dc))
            .filter(|&next| shadow.is_in_bounds(next))
            .map(|next| shadow[next].status);
        match (cell.status, neighbor) {
            (SearchStatus::Path, Some(SearchStatus::Path)) => Self::PATH.with(Color::Yellow),
            (SearchStatus::Explored, Some(SearchStatus::Explored)) => "* ".with(Color::Red),
            _ => "  ".with(Color::Reset),
        }
    }

    fn print_unit(
        &mut self,
        (unit_row, unit_column): (usize, usize),
        glyph: StyledContent<&'static str>,
    ) -> std::io::Result<()> {
        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                glyph.content().width(),
                Renderer::CELL_WIDTH as usize,
                "Each unit must occupy exactly two character widths."
            );
        }
        queue!(
            self.stdout,
            cursor::MoveTo(unit_column as u16 * Renderer::CELL_WIDTH, unit_row as u16),
            style::PrintStyledContent(glyph)
        )
    }

    /// Redraw a cell interior and the four units around it.
    fn draw_cell(&mut self, coord: Coord) -> std::io::Result<()> {
        let Some(shadow) = self.shadow.take() else {
            return Ok(());
        };
        let result = self.draw_cell_from(&shadow, coord);
        self.shadow = Some(shadow);
        result
    }

    fn draw_cell_from(&mut self, shadow: &Grid<Cell>, coord: Coord) -> std::io::Result<()> {
        let center = (2 * coord.0 + 1, 2 * coord.1 + 1);
        let glyph = self.glyph(coord, &shadow[coord]);
        self.print_unit(center, glyph)?;
        for dir in Direction::ALL {
            let (dr, dc) = dir.offset();
            let unit = (
                center.0.wrapping_add_signed(dr),
                center.1.wrapping_add_signed(dc),
            );
            let glyph = self.side_glyph(shadow, coord, dir);
            self.print_unit(unit, glyph)?;
        }
        Ok(())
    }

    fn draw_all(&mut self) -> std::io::Result<()> {
        let Some((rows, columns)) = self.shadow.as_ref().map(|s| (s.rows(), s.columns())) else {
            return Ok(());
        };
        self.check_size(rows, columns);
        queue!(self.stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        for _ in 0..2 * rows + 1 {
            for _ in 0..2 * columns + 1 {
                self.stdout
                    .queue(style::PrintStyledContent(Self::WALL.with(Color::White)))?;
            }
            self.stdout.queue(style::Print("\r\n"))?;
        }
        for row in 0..rows {
            for column in 0..columns {
                self.draw_cell((row, column))?;
            }
        }
        self.stdout.flush()
    }

    fn check_size(&self, rows: usize, columns: usize) {
        if let Ok((term_width, term_height)) = terminal::size() {
            let needed_width = (2 * columns + 1) * Renderer::CELL_WIDTH as usize;
            let needed_height = 2 * rows + 1 + Renderer::NUM_LOG_ROWS as usize;
            if (term_width as usize) < needed_width || (term_height as usize) < needed_height {
                tracing::warn!(
                    "[render] terminal {}x{} is smaller than the {}x{} maze needs",
                    term_width,
                    term_height,
                    needed_width,
                    needed_height
                );
            }
        }
    }

    /// Print a one-line message below the maze, cut to the terminal width.
    fn log_line(&mut self, message: &str) -> std::io::Result<()> {
        let Some(rows) = self.shadow.as_ref().map(|s| s.rows()) else {
            return Ok(());
        };
        let width = terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
        let (line, _) = message.unicode_truncate(width);
        queue!(
            self.stdout,
            cursor::MoveTo(0, Renderer::log_row(rows)),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(line.with(Color::Yellow))
        )
    }

    /// Wait according to the pacing settings after a completed step.
    fn pace(&mut self) -> std::io::Result<()> {
        if self.pacing.step_gate {
            self.wait_for_step()
        } else {
            if !self.pacing.delay.is_zero() {
                std::thread::sleep(self.pacing.delay);
            }
            Ok(())
        }
    }

    /// Block until the user advances one step.
    /// Esc drops the gate and the delay so the rest runs at full speed.
    fn wait_for_step(&mut self) -> std::io::Result<()> {
        loop {
            match event::read()? {
                event::Event::Key(event::KeyEvent { code, kind, .. })
                    if kind == event::KeyEventKind::Press =>
                {
                    match code {
                        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => return Ok(()),
                        KeyCode::Esc => {
                            tracing::debug!("[render] Esc pressed, fast-forwarding");
                            self.pacing = Pacing::default();
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                event::Event::Resize(_, _) => self.draw_all()?,
                _ => {}
            }
        }
    }

    fn handle(&mut self, event: MazeEvent) -> std::io::Result<()> {
        match event {
            MazeEvent::Initial { rows, columns } => {
                self.shadow = Some(Grid::new(rows, columns, Cell::FRESH));
                self.draw_all()?;
            }
            MazeEvent::Walls { coord, new, .. } => {
                if let Some(shadow) = self.shadow.as_mut() {
                    shadow[coord].walls = new;
                }
                self.draw_cell(coord)?;
                self.stdout.flush()?;
            }
            MazeEvent::Visit { coord } => {
                if let Some(shadow) = self.shadow.as_mut() {
                    shadow[coord].visited = true;
                }
                self.draw_cell(coord)?;
                self.stdout.flush()?;
                self.pace()?;
            }
            MazeEvent::Status { coord, new, .. } => {
                if let Some(shadow) = self.shadow.as_mut() {
                    shadow[coord].status = new;
                }
                self.draw_cell(coord)?;
                if new == SearchStatus::Explored {
                    self.log_line(&format!("expanded ({}, {})", coord.0, coord.1))?;
                }
                self.stdout.flush()?;
                if matches!(new, SearchStatus::Explored | SearchStatus::Path) {
                    self.pace()?;
                }
            }
            MazeEvent::Scores { coord, g, h } => {
                if let Some(shadow) = self.shadow.as_mut() {
                    shadow[coord].g_score = g;
                    shadow[coord].h_score = h;
                }
                if let (Some(g), Some(h)) = (g, h) {
                    self.log_line(&format!(
                        "({}, {})  g = {}  h = {}  f = {}",
                        coord.0,
                        coord.1,
                        g,
                        h,
                        g + h
                    ))?;
                    self.stdout.flush()?;
                }
            }
        }
        Ok(())
    }
}

impl MazeObserver for Renderer {
    fn notify(&mut self, event: MazeEvent) {
        if let Err(e) = self.handle(event) {
            tracing::warn!("[render] failed to draw {:?}: {}", event, e);
        }
    }
}
