use serde::{Deserialize, Serialize};

use crate::*;

/// What a single cell looks like to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellDisplayState {
    Hidden,
    Flagged,
    RevealedNumber(u8),
    RevealedMine,
    /// Only shown after the game ends, a flag that sat on a safe cell.
    WronglyFlagged,
}

/// Display capabilities the controller needs from the UI layer.
///
/// The controller never reads anything back, it only pushes the latest values.
pub trait Renderer {
    fn render_cell(&mut self, coords: Coord2, state: CellDisplayState);

    fn render_score(&mut self, score: u32);

    fn render_timer(&mut self, elapsed_secs: u32);

    /// Mines minus flags, negative when the player placed more flags than there are mines.
    fn render_mines_remaining(&mut self, mines_remaining: i32);

    fn render_assist_count(&mut self, uses_remaining: u8);

    fn show_end_dialog(&mut self, is_win: bool, final_score: u32, final_time: u32);
}

/// Periodic one-second tick source that drives [`GameController::tick`].
pub trait Ticker {
    fn start(&mut self);

    fn stop(&mut self);
}
