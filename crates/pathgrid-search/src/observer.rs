use pathgrid_core::{Grid, Point};

use crate::session::{SearchSession, SearchStatus};

/// Read-only snapshot handed to a [`SearchObserver`] after each expansion.
#[derive(Clone, Copy)]
pub struct SearchView<'a> {
    pub(crate) session: &'a SearchSession<'a>,
    pub(crate) current: Point,
}

impl<'a> SearchView<'a> {
    /// The grid being searched.
    #[inline]
    pub fn grid(&self) -> &'a Grid {
        self.session.grid()
    }

    /// The cell that was just expanded.
    #[inline]
    pub fn current(&self) -> Point {
        self.current
    }

    /// Number of cells expanded so far, `current` included.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.session.expanded()
    }

    /// Whether `p` is waiting in the frontier.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        self.session.is_open(p)
    }

    /// Whether `p` has been expanded.
    #[inline]
    pub fn is_closed(&self, p: Point) -> bool {
        self.session.is_closed(p)
    }

    /// Best known cost from the start to `p`.
    #[inline]
    pub fn g_score(&self, p: Point) -> Option<i32> {
        self.session.g_score(p)
    }

    /// The full session, for observers that need more than the above.
    #[inline]
    pub fn session(&self) -> &'a SearchSession<'a> {
        self.session
    }
}

/// Receives progress notifications from a running search.
///
/// Calls are synchronous: the search does not continue until `on_expand`
/// returns.
pub trait SearchObserver {
    /// Called once after each cell's neighbours have been processed.
    fn on_expand(&mut self, view: &SearchView<'_>);

    /// Called once when the search reaches a terminal state.
    fn on_finish(&mut self, _status: SearchStatus) {}
}

impl<F> SearchObserver for F
where
    F: FnMut(&SearchView<'_>),
{
    fn on_expand(&mut self, view: &SearchView<'_>) {
        self(view)
    }
}

/// An observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_expand(&mut self, _view: &SearchView<'_>) {}
}
