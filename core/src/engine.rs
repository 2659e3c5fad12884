use std::collections::VecDeque;

use crate::*;

/// Points awarded for every safe cell that gets revealed.
pub const POINTS_PER_CELL: u32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

/// Everything a reveal changed, so the caller can update score and display incrementally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealReport {
    pub outcome: RevealOutcome,
    pub score_delta: u32,
    /// Cells whose display changed, in reveal order.
    pub changed: Vec<Coord2>,
}

impl RevealReport {
    const fn no_change() -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            score_delta: 0,
            changed: Vec::new(),
        }
    }
}

/// Reveals a cell and, when it has no mine neighbors, flood fills through every connected zero cell.
///
/// Revealed and flagged cells are left alone, which also makes the fill terminate: every step reveals a new
/// cell and the board is finite.
pub fn reveal_cell(board: &mut Board, coords: Coord2) -> Result<RevealReport> {
    let coords = board.validate_coords(coords)?;

    if !board[coords].is_revealable() {
        return Ok(RevealReport::no_change());
    }

    board[coords].is_revealed = true;
    if board[coords].is_mine {
        log::debug!("Revealed mine at {:?}", coords);
        return Ok(RevealReport {
            outcome: RevealOutcome::HitMine,
            score_delta: 0,
            changed: vec![coords],
        });
    }

    let mut changed = vec![coords];
    let mut to_visit = VecDeque::new();
    if board[coords].neighbor_mines == 0 {
        to_visit.extend(board.iter_neighbors(coords));
        log::trace!("Starting flood-fill from {:?}", coords);
    }

    while let Some(visit_coords) = to_visit.pop_front() {
        let cell = &mut board[visit_coords];
        // skip flagged or already revealed cells
        if !cell.is_revealable() {
            continue;
        }

        cell.is_revealed = true;
        let visit_count = cell.neighbor_mines;
        changed.push(visit_coords);
        log::trace!(
            "Flood revealed cell at {:?}, mine count: {}",
            visit_coords,
            visit_count
        );

        if visit_count == 0 {
            to_visit.extend(
                board
                    .iter_neighbors(visit_coords)
                    .filter(|&pos| board[pos].is_revealable()),
            );
        }
    }

    let revealed: u32 = changed.len().try_into().unwrap_or(u32::MAX);
    log::debug!("Revealed {} cells from {:?}", revealed, coords);
    Ok(RevealReport {
        outcome: RevealOutcome::Revealed,
        score_delta: revealed.saturating_mul(POINTS_PER_CELL),
        changed,
    })
}

/// Whether every safe cell has been revealed.
pub fn is_win(board: &Board, total_safe_cells: CellCount) -> bool {
    board.revealed_safe_count() == total_safe_cells
}
