mod ellers;
mod growing_tree;
mod recur_backtrack;
mod recur_div;

pub use ellers::ellers;
pub use growing_tree::growing_tree;
pub use recur_backtrack::{recursive_backtrack, recursive_backtrack_from};
pub use recur_div::recursive_division;

use crate::{
    maze::{Direction, Fill, Maze, Notifier},
    random::RandomSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    RecursiveBacktrack,
    GrowingTree,
    Ellers,
    RecursiveDivision,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::RecursiveBacktrack,
        Algorithm::GrowingTree,
        Algorithm::Ellers,
        Algorithm::RecursiveDivision,
    ];

    /// Numeric code used by menus and run-queue files.
    pub fn code(self) -> i32 {
        match self {
            Algorithm::RecursiveBacktrack => 1,
            Algorithm::GrowingTree => 2,
            Algorithm::Ellers => 3,
            Algorithm::RecursiveDivision => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Algorithm::ALL.into_iter().find(|algo| algo.code() == code)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::RecursiveBacktrack => write!(f, "Recursive Backtrack"),
            Algorithm::GrowingTree => write!(f, "Growing Tree"),
            Algorithm::Ellers => write!(f, "Eller's Algorithm"),
            Algorithm::RecursiveDivision => write!(f, "Recursive Division"),
        }
    }
}

/// Carves `maze` with the selected algorithm. The maze is expected to be freshly
/// constructed or resized.
pub fn generate_maze(
    maze: &mut Maze,
    algorithm: Algorithm,
    rng: &mut RandomSource,
    notifier: &mut Notifier,
) {
    if maze.is_empty() {
        return;
    }
    match algorithm {
        Algorithm::RecursiveBacktrack => recursive_backtrack(maze, rng, notifier),
        Algorithm::GrowingTree => growing_tree(maze, rng, notifier),
        Algorithm::Ellers => ellers(maze, rng, notifier),
        Algorithm::RecursiveDivision => recursive_division(maze, rng, notifier),
    }
}

/// Directions in a fresh random order.
fn shuffled_directions(rng: &mut RandomSource) -> [Direction; 4] {
    let mut dirs = Direction::ALL;
    rng.shuffle(&mut dirs);
    dirs
}

/// Marks a cell as finalized in the observer, along with the wall it was
/// entered through. Only the mirror changes; the maze itself is untouched.
fn settle(row: usize, col: usize, incoming: Option<Direction>, notifier: &mut Notifier) {
    notifier.toggle_cell(Maze::center(row, col), Fill::Done);
    if let Some(dir) = incoming {
        notifier.toggle_wall(Maze::wall_coord(row, col, dir.opposite()), Fill::Done);
    }
    notifier.step();
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::maze::Maze;

    /// Dimensions covering the corners of the supported range plus some
    /// lopsided shapes.
    pub const DIMENSIONS: [(usize, usize); 12] = [
        (3, 3),
        (3, 4),
        (4, 3),
        (3, 60),
        (60, 3),
        (5, 17),
        (17, 5),
        (10, 10),
        (23, 41),
        (41, 23),
        (59, 60),
        (60, 60),
    ];

    pub fn assert_perfect(maze: &Maze) {
        let cells = maze.rows() * maze.cols();
        assert_eq!(
            maze.open_passages(),
            cells - 1,
            "a spanning tree has exactly cells - 1 passages\n{}",
            maze
        );
        assert_eq!(
            maze.reachable_cells((0, 0)),
            cells,
            "every cell must be reachable\n{}",
            maze
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_codes_round_trip() {
        for algo in Algorithm::ALL {
            assert_eq!(Algorithm::from_code(algo.code()), Some(algo));
        }
        assert_eq!(Algorithm::from_code(0), None);
        assert_eq!(Algorithm::from_code(5), None);
    }

    #[test]
    fn test_same_seed_same_topology() {
        for algo in Algorithm::ALL {
            let mut a = Maze::new(12, 9);
            let mut b = Maze::new(12, 9);
            generate_maze(
                &mut a,
                algo,
                &mut RandomSource::new(Some(99)),
                &mut Notifier::silent(),
            );
            generate_maze(
                &mut b,
                algo,
                &mut RandomSource::new(Some(99)),
                &mut Notifier::silent(),
            );
            assert_eq!(a, b, "{} is not reproducible", algo);
        }
    }

    #[test]
    fn test_every_algorithm_connects_the_maze() {
        for algo in Algorithm::ALL {
            for seed in 0..3 {
                let mut maze = Maze::new(15, 21);
                generate_maze(
                    &mut maze,
                    algo,
                    &mut RandomSource::new(Some(seed)),
                    &mut Notifier::silent(),
                );
                assert_eq!(maze.reachable_cells((14, 20)), 15 * 21, "{}", algo);
            }
        }
    }

    #[test]
    fn test_settle_paints_incoming_wall() {
        let (tx, rx) = std::sync::mpsc::sync_channel(4);
        let mut notifier = Notifier::new(tx, std::time::Duration::ZERO);
        // Entered (2, 2) by moving Up, so the wall below it is the edge back to the parent
        settle(2, 2, Some(Direction::Up), &mut notifier);
        assert_eq!(notifier.steps(), 1);
        drop(notifier);
        let events = rx.iter().collect::<Vec<_>>();
        assert_eq!(
            events[1],
            crate::maze::grid::GridEvent::Wall {
                coord: (6, 5),
                fill: Fill::Done
            }
        );
    }
}
