use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::types::dim_to_coord2;
use crate::*;

/// One square of the board, with its identity fixed for the lifetime of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub neighbor_mines: u8,
    pub coords: Coord2,
}

impl Cell {
    pub const fn new(coords: Coord2) -> Self {
        Self {
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            neighbor_mines: 0,
            coords,
        }
    }

    /// Whether a reveal may act on this cell.
    pub const fn is_revealable(&self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    /// What the renderer should show, `ended` enables the wrong-flag marking.
    pub const fn display_state(&self, ended: bool) -> CellDisplayState {
        use CellDisplayState::*;
        match (self.is_revealed, self.is_flagged, self.is_mine) {
            (true, _, true) => RevealedMine,
            (true, _, false) => RevealedNumber(self.neighbor_mines),
            (false, true, false) if ended => WronglyFlagged,
            (false, true, _) => Flagged,
            (false, false, _) => Hidden,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Allocates a board with every cell hidden, unflagged and mine-free.
    pub fn new((rows, cols): Coord2) -> Self {
        let cells = Array2::from_shape_fn((rows, cols).to_nd_index(), |(row, col)| {
            Cell::new(dim_to_coord2((row, col)))
        });
        Self { cells }
    }

    pub fn size(&self) -> Coord2 {
        dim_to_coord2(self.cells.dim())
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cells in row-major order, paired with their coordinates.
    pub fn indexed_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|(index, cell)| (dim_to_coord2(index), cell))
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        let count = self.cells.iter().filter(|&cell| predicate(cell)).count();
        count.try_into().unwrap_or(CellCount::MAX)
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_mine)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_flagged)
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_revealed && !cell.is_mine)
    }

    pub fn correct_flag_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_flagged && cell.is_mine)
    }

    pub fn count_neighbor_mines(&self, coords: Coord2) -> u8 {
        let count = self
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine)
            .count();
        // at most 8 neighbors
        count as u8
    }

    pub fn display_state(&self, coords: Coord2, ended: bool) -> Result<CellDisplayState> {
        Ok(self.cell(coords)?.display_state(ended))
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
