use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Where the dragons are, plus the neighbour count of every cell.
///
/// Counts are maintained incrementally as dragons are added, so they are
/// always exact for non-dragon cells. The count stored for a dragon cell is
/// the number of dragons around it, which is never displayed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragonLayout {
    dragon_mask: Array2<bool>,
    adjacent: Array2<u8>,
    dragon_count: CellCount,
}

impl DragonLayout {
    /// A dragon-free layout of `(height, width)` cells.
    pub fn empty(size: Coord2) -> Self {
        Self {
            dragon_mask: Array2::default(size.ix()),
            adjacent: Array2::zeros(size.ix()),
            dragon_count: 0,
        }
    }

    pub fn from_dragon_coords(size: Coord2, dragon_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(size);
        for &coords in dragon_coords {
            layout.validate_coords(coords)?;
            layout.add_dragon(coords);
        }
        Ok(layout)
    }

    /// Places a dragon at `coords` and bumps the counts around it.
    ///
    /// Returns `false` without changes when a dragon is already there.
    pub fn add_dragon(&mut self, coords: Coord2) -> bool {
        if self.dragon_mask[coords.ix()] {
            return false;
        }
        self.dragon_mask[coords.ix()] = true;
        self.dragon_count += 1;
        for pos in self.dragon_mask.iter_neighbors(coords) {
            self.adjacent[pos.ix()] += 1;
        }
        true
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.dragon_mask.in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        self.dragon_mask.grid_size()
    }

    pub fn total_cells(&self) -> CellCount {
        cell_count(self.size())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.dragon_count
    }

    pub fn dragon_count(&self) -> CellCount {
        self.dragon_count
    }

    pub fn is_dragon(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_dragons(&self, coords: Coord2) -> u8 {
        self.adjacent[coords.ix()]
    }

    pub fn iter_dragons(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_coords(self.size()).filter(|&coords| self[coords])
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.dragon_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for DragonLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.dragon_mask[coords.ix()]
    }
}
