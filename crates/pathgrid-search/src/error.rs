use std::fmt;

use pathgrid_core::{GridError, Point};

/// Why a search (or one of its parts) did not produce a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The start or end coordinate is not on the grid.
    OutOfBounds(GridError),
    /// The frontier emptied without reaching the end: no path exists.
    Exhausted { expanded: usize },
    /// The cancellation token was raised before the search finished.
    Cancelled { expanded: usize },
    /// Reconstruction was asked for an end that was never reached.
    NoPath { end: Point },
    /// `pop_min` on an empty frontier.
    EmptyFrontier,
}

impl SearchError {
    /// Whether this is the ordinary "no path exists" outcome.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Whether the search was interrupted.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(e) => write!(f, "search: {e}"),
            Self::Exhausted { expanded } => {
                write!(f, "search: no path exists ({expanded} cells expanded)")
            }
            Self::Cancelled { expanded } => {
                write!(f, "search: cancelled after {expanded} expansions")
            }
            Self::NoPath { end } => write!(f, "search: {end} was never reached"),
            Self::EmptyFrontier => f.write_str("search: frontier is empty"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutOfBounds(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::OutOfBounds(e)
    }
}
