use super::cell::Fill;

/// A `(row, col)` coordinate in the wall/cell matrix.
pub type Coord = (usize, usize);

/// Messages sent from the generation worker to the observer.
/// Each variant corresponds to one operation of the observer contract.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// Discard the mirrored state and rebuild it from a snapshot of the matrix.
    /// Open coordinates take `background`, closed ones take [`Fill::Wall`].
    Resize {
        rows: usize,
        cols: usize,
        open: Box<[bool]>,
        background: Fill,
    },
    /// Repaint a wall slot or post.
    Wall { coord: Coord, fill: Fill },
    /// Repaint a cell center.
    Cell { coord: Coord, fill: Fill },
    /// Repaint a coordinate only if it currently shows `only_if`.
    CellIf {
        coord: Coord,
        fill: Fill,
        only_if: Fill,
    },
}

/// Dense boolean matrix backing the maze. `true` means open.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    data: Box<[bool]>,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize, value: bool) -> Self {
        let data = vec![value; width * height].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn data(&self) -> &[bool] {
        &self.data
    }

    pub fn is_boundary(&self, coord: Coord) -> bool {
        let (row, col) = coord;
        row == 0 || col == 0 || row == self.height - 1 || col == self.width - 1
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        let (row, col) = coord;
        debug_assert!(
            row < self.height && col < self.width,
            "coordinate {:?} outside {}x{} grid",
            coord,
            self.height,
            self.width
        );
        row * self.width + col
    }

    pub fn set(&mut self, coord: Coord, open: bool) {
        let idx = self.ravel_index(coord);
        self.data[idx] = open;
    }

    /// Flips the coordinate and returns its new state.
    pub fn flip(&mut self, coord: Coord) -> bool {
        let idx = self.ravel_index(coord);
        self.data[idx] = !self.data[idx];
        self.data[idx]
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = bool;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_round_trip() {
        let mut grid = Grid::new(5, 3, false);
        assert!(grid.flip((1, 2)));
        assert!(grid[(1, 2)]);
        assert!(!grid.flip((1, 2)));
        assert!(!grid[(1, 2)]);
    }

    #[test]
    fn test_boundary() {
        let grid = Grid::new(5, 3, false);
        assert!(grid.is_boundary((0, 2)));
        assert!(grid.is_boundary((2, 4)));
        assert!(grid.is_boundary((1, 0)));
        assert!(!grid.is_boundary((1, 1)));
        assert!(!grid.is_boundary((1, 3)));
    }
}
