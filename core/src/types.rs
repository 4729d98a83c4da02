use ndarray::Array2;

/// Single coordinate axis, used for rows, columns, width and height.
pub type Coord = u8;

/// Count type used for dragon counts and total-cell counts.
pub type CellCount = u16;

/// Grid position as `(row, col)`, row-major like the flat `row * width + col` index.
pub type Coord2 = (Coord, Coord);

/// `ndarray` index of a grid position.
pub trait GridIndex {
    fn ix(self) -> [usize; 2];
}

impl GridIndex for Coord2 {
    fn ix(self) -> [usize; 2] {
        let (row, col) = self;
        [usize::from(row), usize::from(col)]
    }
}

/// Number of cells in a `(height, width)` grid.
pub const fn cell_count((height, width): Coord2) -> CellCount {
    (height as CellCount) * (width as CellCount)
}

/// Dimensions of a grid as `(height, width)`, matching [`Coord2`] ordering.
pub trait GridSize {
    fn grid_size(&self) -> Coord2;

    fn in_bounds(&self, (row, col): Coord2) -> bool {
        let (height, width) = self.grid_size();
        row < height && col < width
    }

    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        NeighborIter {
            center,
            bounds: self.grid_size(),
            deltas: DISPLACEMENTS.iter(),
        }
    }
}

/// Every position of a `(height, width)` grid, row by row.
pub fn iter_coords((height, width): Coord2) -> impl Iterator<Item = Coord2> {
    (0..height).flat_map(move |row| (0..width).map(move |col| (row, col)))
}

impl<T> GridSize for Array2<T> {
    fn grid_size(&self) -> Coord2 {
        let (rows, cols) = self.dim();
        // grids are only ever allocated from `Coord` sized configs
        (rows as Coord, cols as Coord)
    }
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

/// Iterates the up to 8 in-bounds neighbours of a cell.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    deltas: core::slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    fn step(&self, (d_row, d_col): (i8, i8)) -> Option<Coord2> {
        let (row, col) = self.center;
        let (height, width) = self.bounds;
        let row = row.checked_add_signed(d_row).filter(|&row| row < height)?;
        let col = col.checked_add_signed(d_col).filter(|&col| col < width)?;
        Some((row, col))
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &delta = self.deltas.next()?;
            if let Some(pos) = self.step(delta) {
                return Some(pos);
            }
        }
    }
}
