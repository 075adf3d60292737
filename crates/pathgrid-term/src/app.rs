//! The application runner: poll → update → draw → diff → flush, plus the
//! animated search loop.

use std::fmt;
use std::io;
use std::time::Duration;

use pathgrid_search::{CancelToken, SearchError, SearchObserver, SearchSession, SearchView};

use crate::driver::Driver;
use crate::messages::{Key, Msg};
use crate::model::{Effect, SearchTrace, Visualizer, draw_session, screen_size};
use crate::screen::{Screen, diff};

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Errors that stop the application.
#[derive(Debug)]
pub enum AppError {
    /// The terminal could not be read or written.
    Io(io::Error),
    /// A search could not be set up.
    Search(SearchError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "terminal error: {e}"),
            Self::Search(e) => write!(f, "search error: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Search(e) => Some(e),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

// ---------------------------------------------------------------------------
// Animator
// ---------------------------------------------------------------------------

/// Redraws the grid after every expansion and watches for cancel/quit keys.
struct Animator<'a, D: Driver> {
    driver: &'a mut D,
    prev: &'a mut Screen,
    curr: &'a mut Screen,
    delay: Duration,
    cancel: CancelToken,
    quit: bool,
    error: Option<io::Error>,
    msgs: Vec<Msg>,
}

impl<D: Driver> Animator<'_, D> {
    fn fail(&mut self, e: io::Error) {
        log::error!("aborting search: {e}");
        self.error = Some(e);
        self.cancel.cancel();
    }
}

impl<D: Driver> SearchObserver for Animator<'_, D> {
    fn on_expand(&mut self, view: &SearchView<'_>) {
        if self.error.is_some() {
            return;
        }
        draw_session(self.curr, view.session());
        let frame = diff(self.prev, self.curr);
        if !frame.is_empty() {
            if let Err(e) = self.driver.flush(&frame) {
                return self.fail(e);
            }
        }
        self.prev.copy_from(self.curr);

        // The poll timeout doubles as the animation delay.
        let mut msgs = std::mem::take(&mut self.msgs);
        if let Err(e) = self.driver.poll_msgs(self.delay, &mut msgs) {
            return self.fail(e);
        }
        for msg in msgs.drain(..) {
            match msg {
                m if m.is_quit() => {
                    self.quit = true;
                    self.cancel.cancel();
                }
                Msg::KeyDown(Key::Escape) => self.cancel.cancel(),
                Msg::Resize { .. } => self.prev.invalidate(),
                // Editing waits until the search is over.
                _ => {}
            }
        }
        self.msgs = msgs;
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Runs a [`Visualizer`] on a [`Driver`].
pub struct App<D: Driver> {
    model: Visualizer,
    driver: D,
    prev: Screen,
    curr: Screen,
    poll_timeout: Duration,
}

impl<D: Driver> App<D> {
    pub fn new(model: Visualizer, driver: D) -> Self {
        let (width, height) = screen_size(model.config().rows);
        Self {
            model,
            driver,
            prev: Screen::new(width, height),
            curr: Screen::new(width, height),
            poll_timeout: Duration::from_millis(100),
        }
    }

    pub fn model(&self) -> &Visualizer {
        &self.model
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run until the user quits. The driver is closed on every exit path.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), AppError> {
        self.prev.invalidate();
        self.redraw()?;

        let mut msgs = Vec::new();
        loop {
            msgs.clear();
            self.driver.poll_msgs(self.poll_timeout, &mut msgs)?;
            if msgs.is_empty() {
                continue;
            }
            for msg in msgs.drain(..) {
                if let Msg::Resize { .. } = msg {
                    self.prev.invalidate();
                }
                match self.model.update(msg) {
                    Some(Effect::End) => return Ok(()),
                    Some(Effect::Search) => {
                        if self.search()? {
                            return Ok(());
                        }
                    }
                    None => {}
                }
            }
            self.redraw()?;
        }
    }

    /// Draw the model and flush whatever changed.
    fn redraw(&mut self) -> Result<(), AppError> {
        self.model.draw(&mut self.curr);
        let frame = diff(&self.prev, &self.curr);
        if !frame.is_empty() {
            self.driver.flush(&frame)?;
        }
        self.prev.copy_from(&self.curr);
        Ok(())
    }

    /// Animate one search. Returns `true` if the user asked to quit.
    fn search(&mut self) -> Result<bool, AppError> {
        let Some((start, end)) = self.model.endpoints() else {
            return Ok(false);
        };

        let cancel = CancelToken::new();
        let mut animator = Animator {
            driver: &mut self.driver,
            prev: &mut self.prev,
            curr: &mut self.curr,
            delay: self.model.config().delay,
            cancel: cancel.clone(),
            quit: false,
            error: None,
            msgs: Vec::new(),
        };
        let trace = {
            let mut session = SearchSession::new(self.model.grid(), start, end)?;
            let result = session.run(&mut animator, &cancel);
            SearchTrace::capture(&session, result)
        };
        if let Some(e) = animator.error.take() {
            return Err(e.into());
        }
        let quit = animator.quit;
        self.model.finish_search(trace);
        Ok(quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VisualizerConfig;
    use crate::messages::MouseAction;
    use crate::model::{CELL_WIDTH, Outcome};
    use crate::screen::Frame;
    use pathgrid_core::{CellState, Point};
    use std::collections::VecDeque;

    /// Replays batches of messages, then asks to quit.
    #[derive(Default)]
    struct ScriptedDriver {
        batches: VecDeque<Vec<Msg>>,
        frames: Vec<Frame>,
        polls: usize,
        initialised: bool,
        closed: bool,
        fail_flush: bool,
    }

    impl ScriptedDriver {
        fn new(batches: Vec<Vec<Msg>>) -> Self {
            Self {
                batches: batches.into(),
                ..Self::default()
            }
        }
    }

    impl Driver for ScriptedDriver {
        fn init(&mut self) -> io::Result<()> {
            self.initialised = true;
            Ok(())
        }

        fn poll_msgs(&mut self, _timeout: Duration, out: &mut Vec<Msg>) -> io::Result<()> {
            self.polls += 1;
            match self.batches.pop_front() {
                Some(batch) => out.extend(batch),
                None => out.push(Msg::Quit),
            }
            Ok(())
        }

        fn flush(&mut self, frame: &Frame) -> io::Result<()> {
            if self.fail_flush && !self.frames.is_empty() {
                return Err(io::Error::other("terminal gone"));
            }
            self.frames.push(frame.clone());
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    fn visualizer(rows: i32) -> Visualizer {
        Visualizer::new(VisualizerConfig {
            rows,
            delay: Duration::ZERO,
            seed: Some(1),
            ..VisualizerConfig::default()
        })
    }

    fn click(msgs: &mut Vec<Msg>, row: i32, col: i32) {
        msgs.push(Msg::mouse(MouseAction::Main, col * CELL_WIDTH, row));
        msgs.push(Msg::mouse(MouseAction::Release, col * CELL_WIDTH, row));
    }

    #[test]
    fn animated_search_finds_path() {
        let mut setup = Vec::new();
        click(&mut setup, 0, 0);
        click(&mut setup, 0, 2);
        setup.push(Msg::KeyDown(Key::Space));
        // Two expansions, two polls. The click in the first one is ignored.
        let driver = ScriptedDriver::new(vec![
            setup,
            vec![Msg::mouse(MouseAction::Main, CELL_WIDTH, 2)],
            vec![],
        ]);

        let mut app = App::new(visualizer(3), driver);
        app.run().unwrap();

        let model = app.model();
        assert_eq!(model.status(), "path found: 2 moves, 2 cells expanded");
        assert_eq!(model.grid().state(Point::new(2, 1)), Ok(CellState::Empty));
        match &model.trace().unwrap().outcome {
            Outcome::Found { path, .. } => assert_eq!(
                path.cells(),
                &[Point::new(0, 0), Point::new(0, 1), Point::new(0, 2)]
            ),
            other => panic!("unexpected outcome {other:?}"),
        }

        let driver = app.driver();
        assert!(driver.initialised && driver.closed);
        // Initial draw, setup batch, two animation frames, final result.
        assert!(driver.frames.len() >= 4);
        assert_eq!(driver.polls, 4);
    }

    #[test]
    fn escape_cancels_running_search() {
        let mut setup = Vec::new();
        click(&mut setup, 0, 0);
        click(&mut setup, 3, 3);
        setup.push(Msg::KeyDown(Key::Space));
        let driver = ScriptedDriver::new(vec![setup, vec![Msg::KeyDown(Key::Escape)]]);

        let mut app = App::new(visualizer(4), driver);
        app.run().unwrap();

        assert_eq!(
            app.model().trace().unwrap().outcome,
            Outcome::Cancelled { expanded: 1 }
        );
        assert_eq!(app.model().status(), "search cancelled after 1 expansions");
        // The app kept running until the script ran out.
        assert_eq!(app.driver().polls, 3);
    }

    #[test]
    fn quit_during_search_exits() {
        let mut setup = Vec::new();
        click(&mut setup, 0, 0);
        click(&mut setup, 3, 3);
        setup.push(Msg::KeyDown(Key::Space));
        let driver = ScriptedDriver::new(vec![setup, vec![Msg::char('q')], vec![]]);

        let mut app = App::new(visualizer(4), driver);
        app.run().unwrap();

        assert_eq!(app.driver().polls, 2);
        assert!(app.driver().closed);
        assert_eq!(app.driver().batches.len(), 1);
    }

    #[test]
    fn button_released_during_search_stops_painting() {
        let mut setup = Vec::new();
        click(&mut setup, 0, 0);
        click(&mut setup, 0, 2);
        // Press on an empty cell and keep the button down into the search.
        setup.push(Msg::mouse(MouseAction::Main, 0, 2));
        setup.push(Msg::KeyDown(Key::Space));
        let driver = ScriptedDriver::new(vec![
            setup,
            vec![Msg::mouse(MouseAction::Release, 0, 2)],
            vec![],
            vec![Msg::mouse(MouseAction::Move, 2 * CELL_WIDTH, 2)],
        ]);

        let mut app = App::new(visualizer(3), driver);
        app.run().unwrap();

        let grid = app.model().grid();
        assert_eq!(grid.state(Point::new(2, 0)), Ok(CellState::Barrier));
        assert_eq!(grid.state(Point::new(2, 2)), Ok(CellState::Empty));
        assert_eq!(grid.barrier_count(), 1);
    }

    #[test]
    fn enclosed_start_reports_no_path() {
        let mut setup = Vec::new();
        click(&mut setup, 0, 0);
        click(&mut setup, 2, 2);
        click(&mut setup, 0, 1);
        click(&mut setup, 1, 0);
        setup.push(Msg::KeyDown(Key::Space));
        let driver = ScriptedDriver::new(vec![setup, vec![]]);

        let mut app = App::new(visualizer(3), driver);
        app.run().unwrap();

        assert_eq!(
            app.model().trace().unwrap().outcome,
            Outcome::NoPath { expanded: 1 }
        );
        assert_eq!(app.model().status(), "no path (1 cells expanded)");
    }

    #[test]
    fn flush_failure_during_search_is_reported() {
        let mut setup = Vec::new();
        click(&mut setup, 0, 0);
        click(&mut setup, 2, 2);
        setup.push(Msg::KeyDown(Key::Space));
        let mut driver = ScriptedDriver::new(vec![setup]);
        driver.fail_flush = true;

        let mut app = App::new(visualizer(3), driver);
        let err = app.run().unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert!(app.driver().closed);
        assert!(app.model().trace().is_none());
    }

    #[test]
    fn resize_repaints_everything() {
        let driver = ScriptedDriver::new(vec![vec![Msg::Resize {
            width: 80,
            height: 24,
        }]]);
        let mut app = App::new(visualizer(3), driver);
        app.run().unwrap();

        let frames = &app.driver().frames;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].glyphs.len(), frames[1].glyphs.len());
    }
}
