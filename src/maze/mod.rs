pub mod cell;
pub mod grid;
pub mod notifier;

use std::{collections::VecDeque, fmt};

pub use cell::Fill;
use grid::{Coord, Grid};
pub use notifier::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in the order generators shuffle them from.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Row and column delta of one step in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
        }
    }
}

/// A maze of `rows x cols` logical cells stored as a `(2*rows+1) x (2*cols+1)`
/// wall/cell matrix.
///
/// Cell centers sit at odd/odd coordinates and are always open. Every other
/// coordinate is a wall slot (or a post, when both indices are even) and starts
/// closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Maze {
    grid: Grid,
    rows: usize,
    cols: usize,
}

impl Maze {
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut maze = Maze {
            grid: Grid::new(cols * 2 + 1, rows * 2 + 1, false),
            rows,
            cols,
        };
        maze.open_centers();
        maze
    }

    /// Reinitializes the maze with new dimensions, discarding all carved walls.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        *self = Maze::new(rows, cols);
    }

    fn open_centers(&mut self) {
        (0..self.rows).for_each(|row| {
            (0..self.cols).for_each(|col| self.grid.set(Maze::center(row, col), true));
        });
    }

    /// Returns the number of rows of logical cells.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns of logical cells.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Matrix coordinate of the center of a logical cell.
    pub fn center(row: usize, col: usize) -> Coord {
        (row * 2 + 1, col * 2 + 1)
    }

    /// Matrix coordinate of the wall slot on the `dir` side of a logical cell.
    pub fn wall_coord(row: usize, col: usize, dir: Direction) -> Coord {
        match dir {
            Direction::Up => (row * 2, col * 2 + 1),
            Direction::Down => (row * 2 + 2, col * 2 + 1),
            Direction::Left => (row * 2 + 1, col * 2),
            Direction::Right => (row * 2 + 1, col * 2 + 2),
        }
    }

    /// The logical cell next to `(row, col)` in `dir`, or `None` when that
    /// would leave the maze.
    pub fn neighbor(&self, row: usize, col: usize, dir: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = dir.offset();
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    fn has_open_wall(&self, row: usize, col: usize) -> bool {
        Direction::ALL
            .iter()
            .any(|&dir| self.grid[Maze::wall_coord(row, col, dir)])
    }

    /// Whether the neighbor of `(row, col)` in `dir` has already been carved
    /// into. Directions that leave the maze always count as visited.
    pub fn is_visited(&self, row: usize, col: usize, dir: Direction) -> bool {
        match self.neighbor(row, col, dir) {
            Some((row, col)) => self.has_open_wall(row, col),
            None => true,
        }
    }

    /// Whether `(row, col)` has at least one neighbor that is not yet visited.
    pub fn has_unvisited_neighbor(&self, row: usize, col: usize) -> bool {
        Direction::ALL
            .iter()
            .any(|&dir| !self.is_visited(row, col, dir))
    }

    /// Flips the wall between `(row, col)` and its neighbor in `dir`, and mirrors
    /// both cell centers and the wall slot to the observer.
    /// Passing `None` as the direction does nothing.
    ///
    /// # Panics
    /// If `(row, col)` is outside the maze or `dir` points across the boundary.
    pub fn toggle_wall(
        &mut self,
        row: usize,
        col: usize,
        dir: impl Into<Option<Direction>>,
        notifier: &Notifier,
        cell_fill: Fill,
        wall_fill: Fill,
    ) {
        let Some(dir) = dir.into() else {
            return;
        };
        let (far_row, far_col) = match self.neighbor(row, col, dir) {
            Some(cell) => cell,
            None => panic!("Cannot toggle the boundary wall {} of ({}, {})", dir, row, col),
        };
        let wall = Maze::wall_coord(row, col, dir);
        self.grid.flip(wall);

        notifier.toggle_cell(Maze::center(row, col), cell_fill);
        notifier.toggle_cell(Maze::center(far_row, far_col), cell_fill);
        notifier.toggle_wall(wall, wall_fill);
    }

    /// Opens the wall in `dir` using the frontier fill for the observer.
    pub fn carve(
        &mut self,
        row: usize,
        col: usize,
        dir: impl Into<Option<Direction>>,
        notifier: &Notifier,
    ) {
        self.toggle_wall(row, col, dir, notifier, Fill::Active, Fill::Active);
    }

    /// Opens every interior wall slot and post. Boundary walls are preserved.
    pub fn remove_walls(&mut self) {
        (0..self.grid.height()).for_each(|row| {
            (0..self.grid.width()).for_each(|col| {
                if !self.grid.is_boundary((row, col)) {
                    self.grid.set((row, col), true);
                }
            });
        });
    }

    /// Closes a post (an even/even coordinate) on a freshly drawn wall line.
    pub fn close_post(&mut self, coord: Coord, notifier: &Notifier) {
        self.grid.set(coord, false);
        notifier.toggle_wall(coord, Fill::Wall);
    }

    pub fn is_open(&self, coord: Coord) -> bool {
        self.grid[coord]
    }

    /// Copy of the matrix, row-major, for rebuilding an observer's mirror.
    pub fn snapshot(&self) -> Box<[bool]> {
        self.grid.data().into()
    }

    /// Number of open wall slots between pairs of logical cells.
    pub fn open_passages(&self) -> usize {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .map(|(row, col)| {
                [Direction::Down, Direction::Right]
                    .into_iter()
                    .filter(|&dir| {
                        self.neighbor(row, col, dir).is_some()
                            && self.grid[Maze::wall_coord(row, col, dir)]
                    })
                    .count()
            })
            .sum()
    }

    /// Number of logical cells reachable from `from` through open wall slots.
    pub fn reachable_cells(&self, from: (usize, usize)) -> usize {
        if self.is_empty() {
            return 0;
        }
        let mut seen = vec![false; self.rows * self.cols];
        let mut queue = VecDeque::from([from]);
        seen[from.0 * self.cols + from.1] = true;
        let mut count = 0;

        while let Some((row, col)) = queue.pop_front() {
            count += 1;
            for dir in Direction::ALL {
                let Some((next_row, next_col)) = self.neighbor(row, col, dir) else {
                    continue;
                };
                let idx = next_row * self.cols + next_col;
                if !seen[idx] && self.grid[Maze::wall_coord(row, col, dir)] {
                    seen[idx] = true;
                    queue.push_back((next_row, next_col));
                }
            }
        }
        count
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.grid.height() {
            for col in 0..self.grid.width() {
                write!(f, "{}", if self.grid[(row, col)] { ' ' } else { '#' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_maze_has_only_centers_open() {
        let maze = Maze::new(3, 4);
        assert_eq!(maze.snapshot().len(), 7 * 9);
        assert!(maze.is_open(Maze::center(2, 3)));
        assert!(!maze.is_open((1, 2)));
        assert!(!maze.is_open((2, 2)));
        assert_eq!(maze.open_passages(), 0);
    }

    #[test]
    fn test_is_visited_across_boundary() {
        let maze = Maze::new(4, 5);
        for row in 0..4 {
            for col in 0..5 {
                if row == 0 {
                    assert!(maze.is_visited(row, col, Direction::Up));
                }
                if row == 3 {
                    assert!(maze.is_visited(row, col, Direction::Down));
                }
                if col == 0 {
                    assert!(maze.is_visited(row, col, Direction::Left));
                }
                if col == 4 {
                    assert!(maze.is_visited(row, col, Direction::Right));
                }
            }
        }
        // Interior directions are unvisited on a fresh maze
        assert!(!maze.is_visited(1, 1, Direction::Up));
        assert!(!maze.is_visited(1, 1, Direction::Right));
    }

    #[test]
    fn test_toggle_wall_marks_neighbor_visited() {
        let mut maze = Maze::new(3, 3);
        let notifier = Notifier::silent();
        maze.carve(1, 1, Direction::Right, &notifier);
        assert!(maze.is_open((3, 4)));
        assert!(maze.is_visited(1, 1, Direction::Right));
        // (1, 1) itself now has an open wall, so its other neighbors see it as visited
        assert!(maze.is_visited(0, 1, Direction::Down));
        assert!(!maze.is_visited(1, 1, Direction::Up));
    }

    #[test]
    fn test_toggle_wall_is_self_inverse() {
        let mut maze = Maze::new(4, 4);
        let notifier = Notifier::silent();
        maze.carve(2, 2, Direction::Down, &notifier);
        let before = maze.clone();
        maze.carve(0, 3, Direction::Left, &notifier);
        maze.carve(0, 3, Direction::Left, &notifier);
        assert_eq!(maze, before);
    }

    #[test]
    fn test_toggle_wall_none_is_noop() {
        let mut maze = Maze::new(3, 3);
        let before = maze.clone();
        maze.toggle_wall(1, 1, None, &Notifier::silent(), Fill::Done, Fill::Done);
        assert_eq!(maze, before);
    }

    #[test]
    fn test_toggle_wall_notifies_both_cells_and_wall() {
        let (tx, rx) = std::sync::mpsc::sync_channel(8);
        let notifier = Notifier::new(tx, std::time::Duration::ZERO);
        let mut maze = Maze::new(3, 3);
        maze.toggle_wall(1, 1, Direction::Up, &notifier, Fill::Done, Fill::Wall);
        drop(notifier);
        let events = rx.iter().collect::<Vec<_>>();
        assert_eq!(
            events,
            vec![
                grid::GridEvent::Cell {
                    coord: (3, 3),
                    fill: Fill::Done
                },
                grid::GridEvent::Cell {
                    coord: (1, 3),
                    fill: Fill::Done
                },
                grid::GridEvent::Wall {
                    coord: (2, 3),
                    fill: Fill::Wall
                },
            ]
        );
    }

    #[test]
    #[should_panic]
    fn test_toggle_boundary_wall_panics() {
        let mut maze = Maze::new(3, 3);
        maze.carve(0, 0, Direction::Up, &Notifier::silent());
    }

    #[test]
    fn test_remove_walls_visits_everything() {
        let mut maze = Maze::new(5, 6);
        maze.remove_walls();
        for row in 0..5 {
            for col in 0..6 {
                for dir in Direction::ALL {
                    assert!(maze.is_visited(row, col, dir));
                }
            }
        }
        // Boundary stays closed
        assert!(!maze.is_open((0, 3)));
        assert!(!maze.is_open((10, 3)));
        assert!(!maze.is_open((3, 12)));
        // Posts are opened too
        assert!(maze.is_open((2, 2)));
        assert_eq!(maze.open_passages(), 4 * 6 + 5 * 5);
        assert_eq!(maze.reachable_cells((0, 0)), 30);
    }

    #[test]
    fn test_resize_discards_state() {
        let mut maze = Maze::new(3, 3);
        maze.remove_walls();
        maze.resize(4, 6);
        assert_eq!((maze.rows(), maze.cols()), (4, 6));
        assert_eq!(maze, Maze::new(4, 6));
    }

    #[test]
    fn test_reachable_cells_follows_open_walls() {
        let mut maze = Maze::new(3, 3);
        let notifier = Notifier::silent();
        assert_eq!(maze.reachable_cells((0, 0)), 1);
        maze.carve(0, 0, Direction::Right, &notifier);
        maze.carve(0, 1, Direction::Down, &notifier);
        assert_eq!(maze.reachable_cells((0, 0)), 3);
        assert_eq!(maze.reachable_cells((2, 2)), 1);
    }

    #[test]
    fn test_display() {
        let mut maze = Maze::new(1, 2);
        maze.carve(0, 0, Direction::Right, &Notifier::silent());
        assert_eq!(maze.to_string(), "#####\n#   #\n#####\n");
    }

    #[test]
    fn test_direction_helpers() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dr, dc) = dir.offset();
            let (or, oc) = dir.opposite().offset();
            assert_eq!((dr + or, dc + oc), (0, 0));
        }
        assert_eq!(Direction::Left.to_string(), "Left");
    }
}
