//! The [`Visualizer`] model: grid editing, drawing and search outcomes.

use pathgrid_core::{CellState, Grid, Point};
use pathgrid_search::{Path, SearchError, SearchSession};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::config::VisualizerConfig;
use crate::messages::{Key, Msg, MouseAction};
use crate::screen::{Color, Glyph, Screen};

/// Terminal columns per grid cell, so cells look roughly square.
pub const CELL_WIDTH: i32 = 2;

const HELP: &str = "left: start/end/wall  right: erase  space: search  c: clear  r: random  q: quit";

/// A side-effect requested by [`Visualizer::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run the search between the current start and end.
    Search,
    /// Stop the application.
    End,
}

/// Search progress shown on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    None,
    Open,
    Closed,
    Path,
}

/// How the last search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found { path: Path, expanded: usize },
    NoPath { expanded: usize },
    Cancelled { expanded: usize },
    Failed(SearchError),
}

impl Outcome {
    fn describe(&self) -> String {
        match self {
            Self::Found { path, expanded } => format!(
                "path found: {} moves, {expanded} cells expanded",
                path.moves()
            ),
            Self::NoPath { expanded } => format!("no path ({expanded} cells expanded)"),
            Self::Cancelled { expanded } => {
                format!("search cancelled after {expanded} expansions")
            }
            Self::Failed(e) => e.to_string(),
        }
    }
}

/// Frontier and visited cells of a finished search, with its outcome.
#[derive(Debug, Clone)]
pub struct SearchTrace {
    marks: Vec<Mark>,
    pub outcome: Outcome,
}

impl SearchTrace {
    /// Snapshot a finished session and the result its run returned.
    pub fn capture(session: &SearchSession<'_>, result: Result<Path, SearchError>) -> Self {
        let grid = session.grid();
        let mut marks: Vec<Mark> = grid
            .points()
            .map(|p| session_mark(session, p))
            .collect();

        let outcome = match result {
            Ok(path) => {
                for &p in path.iter() {
                    if let Some(i) = grid.index(p) {
                        marks[i] = Mark::Path;
                    }
                }
                Outcome::Found {
                    path,
                    expanded: session.expanded(),
                }
            }
            Err(SearchError::Exhausted { expanded }) => Outcome::NoPath { expanded },
            Err(SearchError::Cancelled { expanded }) => Outcome::Cancelled { expanded },
            Err(e) => Outcome::Failed(e),
        };
        Self { marks, outcome }
    }

    fn mark(&self, grid: &Grid, p: Point) -> Mark {
        grid.index(p)
            .and_then(|i| self.marks.get(i).copied())
            .unwrap_or(Mark::None)
    }
}

fn session_mark(session: &SearchSession<'_>, p: Point) -> Mark {
    if session.is_open(p) {
        Mark::Open
    } else if session.is_closed(p) {
        Mark::Closed
    } else {
        Mark::None
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Glyph for a cell. Endpoints and barriers always win over search marks.
pub fn cell_glyph(state: CellState, mark: Mark) -> Glyph {
    let bg = match (state, mark) {
        (CellState::Start, _) => Color::START,
        (CellState::End, _) => Color::END,
        (CellState::Barrier, _) => Color::BARRIER,
        (CellState::Empty, Mark::Path) => Color::PATH,
        (CellState::Empty, Mark::Open) => Color::OPEN,
        (CellState::Empty, Mark::Closed) => Color::CLOSED,
        (CellState::Empty, Mark::None) => Color::EMPTY,
    };
    Glyph::fill(bg)
}

/// Draw every cell of `grid`, asking `mark` for each cell's search mark.
pub fn draw_grid(screen: &mut Screen, grid: &Grid, mark: impl Fn(Point) -> Mark) {
    for cell in grid.cells() {
        let glyph = cell_glyph(cell.state, mark(cell.pos));
        for dx in 0..CELL_WIDTH {
            screen.set(cell.pos.col * CELL_WIDTH + dx, cell.pos.row, glyph);
        }
    }
}

/// Draw a live search: frontier and visited cells from the running session.
pub fn draw_session(screen: &mut Screen, session: &SearchSession<'_>) {
    let grid = session.grid();
    draw_grid(screen, grid, |p| session_mark(session, p));
    screen.line(
        grid.size(),
        &format!(
            "searching: {} expanded, {} queued  (esc: cancel)",
            session.expanded(),
            session.frontier_len()
        ),
        Color::TEXT,
    );
}

/// Screen size needed for a grid of `rows` rows: the grid, a status line and
/// a help line.
pub fn screen_size(rows: i32) -> (i32, i32) {
    let width = (rows * CELL_WIDTH).max(HELP.chars().count() as i32);
    (width, rows + 2)
}

// ---------------------------------------------------------------------------
// Visualizer
// ---------------------------------------------------------------------------

/// Editable grid plus the result of the most recent search.
pub struct Visualizer {
    config: VisualizerConfig,
    grid: Grid,
    rng: StdRng,
    held: Option<MouseAction>,
    trace: Option<SearchTrace>,
    status: String,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("visualizer: {0}x{0} grid, seed {seed}", config.rows);
        Self {
            grid: Grid::new(config.rows),
            rng: StdRng::seed_from_u64(seed),
            config,
            held: None,
            trace: None,
            status: String::from("place a start and an end"),
        }
    }

    #[inline]
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Result of the last search, until the grid is edited.
    pub fn trace(&self) -> Option<&SearchTrace> {
        self.trace.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Start and end, when both are placed.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        Some((self.grid.start()?, self.grid.end()?))
    }

    /// Grid cell under terminal position `(x, y)`.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Point> {
        if x < 0 {
            return None;
        }
        let p = Point::new(y, x / CELL_WIDTH);
        self.grid.contains(p).then_some(p)
    }

    /// Process a message, optionally returning a side-effect.
    pub fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Quit | Msg::KeyDown(Key::Char('q')) => return Some(Effect::End),
            Msg::KeyDown(Key::Space) => {
                if self.endpoints().is_some() {
                    return Some(Effect::Search);
                }
                self.status = String::from("place a start and an end first");
            }
            Msg::KeyDown(Key::Char('c')) => {
                self.grid = self.grid.reset_all();
                self.trace = None;
                self.status = String::from("grid cleared");
                log::info!("grid cleared");
            }
            Msg::KeyDown(Key::Char('r')) => {
                self.trace = None;
                let added = self.grid.scatter_barriers(&mut self.rng, self.config.density);
                self.status = format!("{added} barriers added");
            }
            Msg::KeyDown(Key::Escape) => {
                self.trace = None;
            }
            Msg::Mouse { action, x, y } => self.mouse(action, x, y),
            Msg::KeyDown(_) | Msg::Resize { .. } => {}
        }
        None
    }

    fn mouse(&mut self, action: MouseAction, x: i32, y: i32) {
        let apply = match action {
            MouseAction::Main | MouseAction::Secondary => {
                self.held = Some(action);
                action
            }
            MouseAction::Move => match self.held {
                Some(held) => held,
                None => return,
            },
            MouseAction::Release => {
                self.held = None;
                return;
            }
        };
        let Some(p) = self.cell_at(x, y) else {
            log::trace!("click at ({x}, {y}) is off the grid");
            return;
        };
        let edited = if apply == MouseAction::Main {
            self.grid.paint(p)
        } else {
            self.grid.erase(p)
        };
        match edited {
            Ok(Some(_)) => self.trace = None,
            Ok(None) => {}
            Err(e) => log::warn!("ignored edit: {e}"),
        }
    }

    /// Record a finished search.
    ///
    /// Mouse input is not delivered while a search runs, so a button held
    /// when it started is treated as released.
    pub fn finish_search(&mut self, trace: SearchTrace) {
        self.held = None;
        self.status = trace.outcome.describe();
        log::info!("{}", self.status);
        self.trace = Some(trace);
    }

    /// Render the current state.
    pub fn draw(&self, screen: &mut Screen) {
        let grid = &self.grid;
        match &self.trace {
            Some(trace) => draw_grid(screen, grid, |p| trace.mark(grid, p)),
            None => draw_grid(screen, grid, |_| Mark::None),
        }
        screen.line(grid.size(), &self.status, Color::TEXT);
        screen.line(grid.size() + 1, HELP, Color::TEXT);
    }
}
