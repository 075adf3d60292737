//! A* shortest-path search over a [`pathgrid_core::Grid`].
//!
//! - [`PriorityFrontier`]: min-queue keyed by `(priority, insertion sequence)`
//! - [`SearchSession`]: the A* state machine, steppable or run to completion
//! - [`reconstruct`]: predecessor walk producing a start-to-end [`Path`]
//! - [`bfs_map`] / [`bfs_distance`]: breadth-first reference distances
//!
//! Searches are cooperative: a [`SearchObserver`] is notified synchronously
//! after every expansion and a [`CancelToken`] is checked before every pop.
//!
//! ```
//! use pathgrid_core::{Grid, Point};
//! use pathgrid_search::{CancelToken, NoopObserver, run};
//!
//! let grid = Grid::parse("S#.\n.#.\n..E").unwrap();
//! let path = run(
//!     &grid,
//!     Point::new(0, 0),
//!     Point::new(2, 2),
//!     &mut NoopObserver,
//!     &CancelToken::new(),
//! )
//! .unwrap();
//! assert_eq!(path.moves(), 4);
//! ```

mod bfs;
mod cancel;
mod distance;
mod error;
mod frontier;
mod observer;
mod path;
mod session;

pub use bfs::{bfs_distance, bfs_map};
pub use cancel::CancelToken;
pub use distance::manhattan;
pub use error::SearchError;
pub use frontier::PriorityFrontier;
pub use observer::{NoopObserver, SearchObserver, SearchView};
pub use path::{Path, PredecessorMap, reconstruct};
pub use session::{STEP_COST, SearchSession, SearchStatus, Step, UNREACHED, run};
