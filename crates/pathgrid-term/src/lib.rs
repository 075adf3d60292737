//! Interactive terminal front-end for the pathgrid shortest-path finder.
//!
//! The user paints a start, an end and barriers with the mouse, then
//! watches A* flood the grid one expansion at a time.
//!
//! * [`Visualizer`] – the model: editing, outcome reporting, drawing.
//! * [`App`] – poll → update → draw → diff → flush, and the animated search.
//! * [`Driver`] / [`CrosstermDriver`] – terminal back-ends.

pub mod app;
pub mod config;
pub mod driver;
pub mod messages;
pub mod model;
pub mod screen;

pub use app::{App, AppError};
pub use config::{Cli, VisualizerConfig};
pub use driver::{CrosstermDriver, Driver};
pub use messages::{Key, MouseAction, Msg};
pub use model::{Effect, Outcome, SearchTrace, Visualizer};
pub use screen::{Color, Frame, Glyph, Screen};
