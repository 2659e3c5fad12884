use rand::Rng;

use crate::*;
pub use random::*;

mod random;

/// Cells within Chebyshev distance 1 of `anchor`, clamped to the board, anchor included.
pub fn safe_zone(size: Coord2, anchor: Coord2) -> impl Iterator<Item = Coord2> {
    core::iter::once(anchor).chain(NeighborIter::new(anchor, size))
}

/// Fills in `neighbor_mines` for every safe cell from the current mine layout.
pub fn compute_neighbor_counts(board: &mut Board) {
    let (rows, cols) = board.size();
    for row in 0..rows {
        for col in 0..cols {
            let coords = (row, col);
            if board[coords].is_mine {
                continue;
            }
            let count = board.count_neighbor_mines(coords);
            board[coords].neighbor_mines = count;
        }
    }
}

/// Largest distance from the center the automatic first move may land on.
pub const fn start_radius((rows, cols): Coord2) -> Coord {
    let radius = if rows < cols { rows / 4 } else { cols / 4 };
    if radius < 5 { radius } else { 5 }
}

/// Picks the automatic first move: a uniformly random offset in `[-radius, radius]` on each axis around the
/// board center, clamped back onto the board.
pub fn pick_start_cell<R: Rng + ?Sized>(size: Coord2, rng: &mut R) -> Coord2 {
    let radius = i16::from(start_radius(size));
    let mut axis = |len: Coord| -> Coord {
        let center = i16::from(len / 2);
        let offset = rng.random_range(-radius..=radius);
        let max = i16::from(len.saturating_sub(1));
        // clamped into 0..len, which fits in a Coord
        (center + offset).clamp(0, max) as Coord
    };
    let row = axis(size.0);
    let col = axis(size.1);
    (row, col)
}
