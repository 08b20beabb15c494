use crate::{
    maze::{Direction, Fill, Maze, Notifier},
    random::RandomSource,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Orientation {
    Horizontal,
    Vertical,
}

/// Recursive division: starts from an open field and adds walls.
///
/// Every division line leaves exactly one gap, so each half stays connected to
/// the other at every depth.
pub fn recursive_division(maze: &mut Maze, rng: &mut RandomSource, notifier: &mut Notifier) {
    if maze.is_empty() {
        return;
    }

    // Clear all walls in the maze, except the boundary walls
    maze.remove_walls();
    notifier.resize(maze.rows(), maze.cols(), maze.snapshot(), Fill::Done);

    // Regions are measured in interior boundaries, not cells
    let (width, height) = (maze.cols() - 1, maze.rows() - 1);
    divide(maze, (0, 0), width, height, rng, notifier);

    fn pick_orientation(width: usize, height: usize, rng: &mut RandomSource) -> Orientation {
        match width.cmp(&height) {
            std::cmp::Ordering::Less => Orientation::Vertical,
            std::cmp::Ordering::Greater => Orientation::Horizontal,
            std::cmp::Ordering::Equal => {
                if rng.coin() {
                    Orientation::Vertical
                } else {
                    Orientation::Horizontal
                }
            }
        }
    }

    fn divide(
        maze: &mut Maze,
        top_left: (usize, usize),
        width: usize,
        height: usize,
        rng: &mut RandomSource,
        notifier: &mut Notifier,
    ) {
        let (row, col) = top_left;

        match pick_orientation(width, height, rng) {
            Orientation::Vertical => {
                if width == 0 {
                    return;
                }
                // Wall goes to the right of this column, with one gap row
                let wall_col = rng.irand(col, col + width - 1);
                let gap_row = rng.irand(row, row + height);

                for r in row..=row + height {
                    if r != gap_row {
                        maze.toggle_wall(
                            r,
                            wall_col,
                            Direction::Right,
                            notifier,
                            Fill::Done,
                            Fill::Wall,
                        );
                    }
                    maze.close_post((r * 2 + 2, wall_col * 2 + 2), notifier);
                }
                notifier.step();

                let left_width = wall_col - col;
                let right_width = width - left_width - 1;

                divide(maze, (row, wall_col + 1), right_width, height, rng, notifier);
                divide(maze, (row, col), left_width, height, rng, notifier);
            }
            Orientation::Horizontal => {
                if height == 0 {
                    return;
                }
                // Wall goes below this row, with one gap column
                let wall_row = rng.irand(row, row + height - 1);
                let gap_col = rng.irand(col, col + width);

                for c in col..=col + width {
                    if c != gap_col {
                        maze.toggle_wall(
                            wall_row,
                            c,
                            Direction::Down,
                            notifier,
                            Fill::Done,
                            Fill::Wall,
                        );
                    }
                    maze.close_post((wall_row * 2 + 2, c * 2 + 2), notifier);
                }
                notifier.step();

                let upper_height = wall_row - row;
                let lower_height = height - upper_height - 1;

                divide(maze, (wall_row + 1, col), width, lower_height, rng, notifier);
                divide(maze, (row, col), width, upper_height, rng, notifier);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{DIMENSIONS, assert_perfect};

    #[test]
    fn test_connected_across_dimensions() {
        for (seed, &(rows, cols)) in DIMENSIONS.iter().enumerate() {
            let mut maze = Maze::new(rows, cols);
            recursive_division(
                &mut maze,
                &mut RandomSource::new(Some(300 + seed as u64)),
                &mut Notifier::silent(),
            );
            assert_eq!(maze.reachable_cells((0, 0)), rows * cols, "\n{}", maze);
        }
    }

    #[test]
    fn test_single_gap_leaves_no_loops() {
        for seed in 0..40 {
            let mut maze = Maze::new(7, 11);
            recursive_division(
                &mut maze,
                &mut RandomSource::new(Some(seed)),
                &mut Notifier::silent(),
            );
            assert_perfect(&maze);
        }
    }

    #[test]
    fn test_boundary_is_preserved() {
        let mut maze = Maze::new(5, 5);
        recursive_division(
            &mut maze,
            &mut RandomSource::new(Some(1)),
            &mut Notifier::silent(),
        );
        for i in 0..11 {
            assert!(!maze.is_open((0, i)));
            assert!(!maze.is_open((10, i)));
            assert!(!maze.is_open((i, 0)));
            assert!(!maze.is_open((i, 10)));
        }
    }

    #[test]
    fn test_starts_with_open_field_in_observer() {
        let (tx, rx) = std::sync::mpsc::sync_channel(4096);
        let mut notifier = Notifier::new(tx, std::time::Duration::ZERO);
        let mut maze = Maze::new(4, 4);
        recursive_division(&mut maze, &mut RandomSource::new(Some(2)), &mut notifier);
        drop(notifier);
        let first = rx.iter().next();
        assert!(matches!(
            first,
            Some(crate::maze::grid::GridEvent::Resize {
                rows: 4,
                cols: 4,
                background: Fill::Done,
                ..
            })
        ));
    }
}
