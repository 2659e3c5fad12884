use ndarray::Array2;
use rand::Rng;

use super::*;

/// Scatters `mines` mines uniformly at random by rejection sampling, keeping the clamped 3×3 around `anchor`
/// mine-free, then computes the neighbor counts.
///
/// The board must not contain mines yet. Fails with [`GameError::Configuration`] before touching the board
/// when the mines would not fit outside the safe zone.
pub fn place_mines<R: Rng + ?Sized>(
    board: &mut Board,
    mines: CellCount,
    anchor: Coord2,
    rng: &mut R,
) -> Result<()> {
    let anchor = board.validate_coords(anchor)?;
    let size = board.size();

    let mut in_safe_zone: Array2<bool> = Array2::default(size.to_nd_index());
    let mut safe_zone_len: CellCount = 0;
    for coords in safe_zone(size, anchor) {
        in_safe_zone[coords.to_nd_index()] = true;
        safe_zone_len += 1;
    }

    let available = board.total_cells() - safe_zone_len;
    if mines >= available {
        log::warn!(
            "Refusing to place {} mines, only {} cells are outside the safe zone",
            mines,
            available
        );
        return Err(GameError::Configuration { mines, available });
    }

    let (rows, cols) = size;
    let mut mines_placed = 0;
    let mut draws: u32 = 0;
    while mines_placed < mines {
        let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
        draws += 1;
        if board[coords].is_mine || in_safe_zone[coords.to_nd_index()] {
            continue;
        }
        board[coords].is_mine = true;
        mines_placed += 1;
    }
    log::debug!(
        "Placed {} mines around safe anchor {:?} in {} draws",
        mines_placed,
        anchor,
        draws
    );

    compute_neighbor_counts(board);
    Ok(())
}
