//! Engine for cakesweeper, a 31×31 Minesweeper variant where the mines are cakes.
//!
//! The [`GameController`] owns a [`Session`] and reacts to player intents, pushing display updates through a
//! [`Renderer`] and driving the clock through a [`Ticker`]. Everything below it is plain functions over a
//! [`Board`] with an injected random source.

pub use board::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use flag::*;
pub use generator::*;
pub use render::*;
pub use session::*;
pub use types::*;

mod board;
mod difficulty;
mod engine;
mod error;
mod flag;
mod generator;
mod render;
mod session;
mod types;
