/// Square N×N occupancy field.
/// Each cell is `true` when a pin sits on it. Storage is row-major: `y * size + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    size: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Allocate an empty grid. Panics if `size == 0` or `size * size` overflows.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "grid size must be positive");
        let cell_count = size
            .checked_mul(size)
            .expect("grid size squared overflows usize");
        Self {
            size,
            cells: vec![false; cell_count],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn index_of(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size && y < self.size, "cell out of range");
        y * self.size + x
    }

    pub fn coords_of(&self, index: usize) -> (usize, usize) {
        (index % self.size, index / self.size)
    }

    pub fn is_occupied_at(&self, index: usize) -> bool {
        self.cells[index]
    }

    /// Mark a cell occupied. Returns `false` if it already was.
    pub fn occupy_at(&mut self, index: usize) -> bool {
        !std::mem::replace(&mut self.cells[index], true)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_clear(&self) -> bool {
        !self.cells.contains(&true)
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Occupied cells as `(x, y)` in scan order: y outer, x inner.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(|(i, _)| self.coords_of(i))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.size)
    }
}
