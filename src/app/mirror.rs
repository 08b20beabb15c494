use crate::maze::{
    Fill, Maze,
    grid::{Coord, GridEvent},
};

/// Foreground copy of what the grid looks like, rebuilt from worker events.
///
/// Tracks which coordinates changed since the last draw so the renderer can
/// repaint incrementally.
#[derive(Debug, Default)]
pub struct Mirror {
    fills: Box<[Fill]>,
    width: usize,
    height: usize,
    dirty: Vec<Coord>,
    full_redraw: bool,
}

impl Mirror {
    /// Dimensions of the mirrored matrix as `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn fill(&self, coord: Coord) -> Fill {
        self.fills[self.ravel_index(coord)]
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        coord.0 * self.width + coord.1
    }

    /// Discards all state and rebuilds from a matrix snapshot: open coordinates
    /// take `background`, closed ones are walls.
    pub fn resize(&mut self, rows: usize, cols: usize, open: &[bool], background: Fill) {
        self.width = cols * 2 + 1;
        self.height = rows * 2 + 1;
        debug_assert_eq!(open.len(), self.width * self.height);
        self.fills = open
            .iter()
            .map(|&open| if open { background } else { Fill::Wall })
            .collect();
        self.dirty.clear();
        self.full_redraw = true;
    }

    /// Resize to match `maze` as it stands now.
    pub fn resize_to(&mut self, maze: &Maze, background: Fill) {
        self.resize(maze.rows(), maze.cols(), &maze.snapshot(), background);
    }

    fn paint(&mut self, coord: Coord, fill: Fill) {
        let idx = self.ravel_index(coord);
        if self.fills[idx] != fill {
            self.fills[idx] = fill;
            self.dirty.push(coord);
        }
    }

    pub fn toggle_wall(&mut self, coord: Coord, fill: Fill) {
        self.paint(coord, fill);
    }

    pub fn toggle_cell(&mut self, coord: Coord, fill: Fill) {
        self.paint(coord, fill);
    }

    pub fn toggle_if(&mut self, coord: Coord, fill: Fill, only_if: Fill) {
        if self.fill(coord) == only_if {
            self.paint(coord, fill);
        }
    }

    pub fn apply(&mut self, event: GridEvent) {
        match event {
            GridEvent::Resize {
                rows,
                cols,
                open,
                background,
            } => self.resize(rows, cols, &open, background),
            GridEvent::Wall { coord, fill } => self.toggle_wall(coord, fill),
            GridEvent::Cell { coord, fill } => self.toggle_cell(coord, fill),
            GridEvent::CellIf {
                coord,
                fill,
                only_if,
            } => self.toggle_if(coord, fill, only_if),
        }
    }

    /// Whether everything must be repainted. Clears the flag.
    pub fn take_full_redraw(&mut self) -> bool {
        std::mem::take(&mut self.full_redraw)
    }

    /// Coordinates changed since the last call.
    pub fn take_dirty(&mut self) -> Vec<Coord> {
        std::mem::take(&mut self.dirty)
    }

    /// Iterates rows of fills, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Fill]> {
        self.fills.chunks(self.width.max(1))
    }
}
