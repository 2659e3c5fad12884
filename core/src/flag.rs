use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// How the remaining-mines counter moves with this outcome.
    pub const fn budget_delta(self) -> i32 {
        use FlagOutcome::*;
        match self {
            NoChange => 0,
            Flagged => -1,
            Unflagged => 1,
        }
    }
}

/// Flags a hidden cell or removes its flag, revealed cells stay untouched.
pub fn toggle_flag(board: &mut Board, coords: Coord2) -> Result<FlagOutcome> {
    use FlagOutcome::*;

    let coords = board.validate_coords(coords)?;
    let cell = &mut board[coords];

    Ok(match (cell.is_revealed, cell.is_flagged) {
        (true, _) => NoChange,
        (false, false) => {
            cell.is_flagged = true;
            Flagged
        }
        (false, true) => {
            cell.is_flagged = false;
            Unflagged
        }
    })
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssistOutcome {
    /// Tool still locked or out of uses.
    Unavailable,
    /// Every mine is already flagged or revealed, no use was spent.
    NoCandidates,
    Flagged(Coord2),
}

/// The treasure finder: flags a random hidden mine, a limited number of times per game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistTool {
    uses_remaining: u8,
    enabled: bool,
}

impl AssistTool {
    /// Starts locked, it unlocks with the first move.
    pub const fn new(uses: u8) -> Self {
        Self {
            uses_remaining: uses,
            enabled: false,
        }
    }

    pub const fn uses_remaining(&self) -> u8 {
        self.uses_remaining
    }

    pub const fn is_available(&self) -> bool {
        self.enabled && self.uses_remaining > 0
    }

    pub fn enable(&mut self) {
        self.enabled = self.uses_remaining > 0;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Mines that are neither revealed nor flagged.
    pub fn candidates(board: &Board) -> Vec<Coord2> {
        board
            .cells()
            .filter(|cell| cell.is_mine && !cell.is_revealed && !cell.is_flagged)
            .map(|cell| cell.coords)
            .collect()
    }

    pub fn invoke<R: Rng + ?Sized>(&mut self, board: &mut Board, rng: &mut R) -> Result<AssistOutcome> {
        if !self.is_available() {
            return Ok(AssistOutcome::Unavailable);
        }

        let candidates = Self::candidates(board);
        if candidates.is_empty() {
            log::debug!("Assist found no unflagged mines, keeping the use");
            return Ok(AssistOutcome::NoCandidates);
        }

        let target = candidates[rng.random_range(0..candidates.len())];
        toggle_flag(board, target)?;

        self.uses_remaining -= 1;
        if self.uses_remaining == 0 {
            self.enabled = false;
        }
        log::debug!(
            "Assist flagged {:?} out of {} candidates, {} uses left",
            target,
            candidates.len(),
            self.uses_remaining
        );
        Ok(AssistOutcome::Flagged(target))
    }
}
