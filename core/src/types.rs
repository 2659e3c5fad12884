use std::slice;

/// Single coordinate axis used for board height/width and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Converts an ndarray dimension back into board coordinates, saturating at `Coord::MAX`.
pub(crate) fn dim_to_coord2((rows, cols): (usize, usize)) -> Coord2 {
    (
        rows.try_into().unwrap_or(Coord::MAX),
        cols.try_into().unwrap_or(Coord::MAX),
    )
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Shifts `(row, col)` by `(d_row, d_col)`, `None` once it leaves `0..rows` or `0..cols`.
fn offset((row, col): Coord2, (d_row, d_col): (i8, i8), (rows, cols): Coord2) -> Option<Coord2> {
    let row = row.checked_add_signed(d_row).filter(|&row| row < rows)?;
    let col = col.checked_add_signed(d_col).filter(|&col| col < cols)?;
    Some((row, col))
}

/// Iterates the up-to-8 in-bounds neighbors of a cell, clamped at the board edges.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    deltas: slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            deltas: DISPLACEMENTS.iter(),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (center, bounds) = (self.center, self.bounds);
        self.deltas
            .find_map(|&delta| offset(center, delta, bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((4, 4), (9, 9)).collect();

        assert_eq!(neighbors.len(), 8);
        for pos in [(3, 3), (3, 4), (3, 5), (4, 3), (4, 5), (5, 3), (5, 4), (5, 5)] {
            assert!(neighbors.contains(&pos), "missing neighbor {:?}", pos);
        }
    }

    #[test]
    fn corner_and_edge_neighbors_are_clamped() {
        let corner: Vec<_> = NeighborIter::new((0, 0), (31, 31)).collect();
        assert_eq!(corner, vec![(0, 1), (1, 0), (1, 1)]);

        let far_corner: Vec<_> = NeighborIter::new((30, 30), (31, 31)).collect();
        assert_eq!(far_corner, vec![(29, 29), (29, 30), (30, 29)]);

        assert_eq!(NeighborIter::new((0, 15), (31, 31)).count(), 5);
        assert_eq!(NeighborIter::new((15, 30), (31, 31)).count(), 5);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(31, 31), 961);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 65025);
    }
}
