use std::collections::BTreeMap;

use crate::{
    maze::{Direction, Fill, Maze, Notifier},
    random::RandomSource,
};

type SetId = usize;

/// Row-local set bookkeeping.
///
/// `set_of` maps a column to its set and `members` maps a set to its columns.
/// Every assigned column appears in exactly one member list, and `merge` is the
/// only operation that moves columns between sets.
#[derive(Debug)]
struct RowSets {
    set_of: Vec<Option<SetId>>,
    members: BTreeMap<SetId, Vec<usize>>,
}

impl RowSets {
    fn new(cols: usize) -> Self {
        RowSets {
            set_of: vec![None; cols],
            members: BTreeMap::new(),
        }
    }

    fn set_of(&self, col: usize) -> Option<SetId> {
        self.set_of[col]
    }

    fn insert(&mut self, col: usize, id: SetId) {
        self.set_of[col] = Some(id);
        self.members.entry(id).or_default().push(col);
    }

    /// Moves every column of `absorbed` into `survivor` and drops `absorbed`.
    fn merge(&mut self, survivor: SetId, absorbed: SetId) {
        let Some(columns) = self.members.remove(&absorbed) else {
            return;
        };
        for &col in &columns {
            self.set_of[col] = Some(survivor);
        }
        self.members.entry(survivor).or_default().extend(columns);
    }
}

/// Eller's algorithm, one row at a time.
///
/// Adjacent cells of different sets merge with even odds (always on the last
/// row). Each set then drops between one and `|set|` connections to the next
/// row, which seed the next row's sets.
pub fn ellers(maze: &mut Maze, rng: &mut RandomSource, notifier: &mut Notifier) {
    if maze.is_empty() {
        return;
    }

    let (rows, cols) = (maze.rows(), maze.cols());
    let last_row = rows - 1;
    let mut next_id: SetId = 1;
    let mut sets = RowSets::new(cols);

    for row in 0..rows {
        // Columns not connected from above start their own set
        for col in 0..cols {
            if sets.set_of(col).is_none() {
                sets.insert(col, next_id);
                next_id += 1;
            }
        }

        for col in 0..cols - 1 {
            let (Some(left), Some(right)) = (sets.set_of(col), sets.set_of(col + 1)) else {
                continue;
            };
            if left == right {
                continue;
            }
            if row == last_row || rng.coin() {
                maze.carve(row, col, Direction::Right, notifier);
                sets.merge(left, right);
                notifier.step();
            }
        }

        if row != last_row {
            let mut below = RowSets::new(cols);
            for (&id, columns) in &sets.members {
                let connections = rng.irand(1, columns.len());
                for _ in 0..connections {
                    let col = columns[rng.irand(0, columns.len() - 1)];
                    if !maze.is_visited(row, col, Direction::Down) {
                        maze.carve(row, col, Direction::Down, notifier);
                        below.insert(col, id);
                        notifier.step();
                    }
                }
            }
            tracing::trace!(
                "[ellers] row {} done, {} sets carried down",
                row,
                below.members.len()
            );
            sets = below;
        }

        settle_row(row, rows, cols, notifier);
    }
}

/// Finalizes a completed row in the observer: cells and any passages still
/// showing the frontier fill.
fn settle_row(row: usize, rows: usize, cols: usize, notifier: &Notifier) {
    for col in 0..cols {
        notifier.toggle_cell(Maze::center(row, col), Fill::Done);
        if col != cols - 1 {
            notifier.toggle_if(
                Maze::wall_coord(row, col, Direction::Right),
                Fill::Done,
                Fill::Active,
            );
        }
        if row != rows - 1 {
            notifier.toggle_if(
                Maze::wall_coord(row, col, Direction::Down),
                Fill::Done,
                Fill::Active,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{DIMENSIONS, assert_perfect};

    #[test]
    fn test_merge_keeps_both_views_consistent() {
        let mut sets = RowSets::new(5);
        sets.insert(0, 1);
        sets.insert(1, 2);
        sets.insert(2, 2);
        sets.insert(3, 3);
        sets.insert(4, 1);
        sets.merge(1, 2);

        assert_eq!(sets.set_of(1), Some(1));
        assert_eq!(sets.set_of(2), Some(1));
        assert!(!sets.members.contains_key(&2));
        assert_eq!(sets.members[&1], vec![0, 4, 1, 2]);
        // Every column belongs to exactly one set
        for col in 0..5 {
            let owners = sets
                .members
                .values()
                .filter(|cols| cols.contains(&col))
                .count();
            assert_eq!(owners, 1);
        }
    }

    #[test]
    fn test_single_row_is_a_corridor() {
        for cols in [1, 2, 3, 17, 60] {
            let mut maze = Maze::new(1, cols);
            ellers(
                &mut maze,
                &mut RandomSource::new(Some(cols as u64)),
                &mut Notifier::silent(),
            );
            assert_eq!(maze.open_passages(), cols - 1);
            for col in 0..cols - 1 {
                assert!(maze.is_open(Maze::wall_coord(0, col, Direction::Right)));
            }
        }
    }

    #[test]
    fn test_spanning_tree_across_dimensions() {
        for (seed, &(rows, cols)) in DIMENSIONS.iter().enumerate() {
            let mut maze = Maze::new(rows, cols);
            ellers(
                &mut maze,
                &mut RandomSource::new(Some(200 + seed as u64)),
                &mut Notifier::silent(),
            );
            assert_perfect(&maze);
        }
    }

    #[test]
    fn test_many_seeds_square_maze() {
        for seed in 0..25 {
            let mut maze = Maze::new(8, 8);
            ellers(
                &mut maze,
                &mut RandomSource::new(Some(seed)),
                &mut Notifier::silent(),
            );
            assert_perfect(&maze);
        }
    }

    #[test]
    fn test_settle_row_only_touches_active_walls() {
        let (tx, rx) = std::sync::mpsc::sync_channel(64);
        let notifier = Notifier::new(tx, std::time::Duration::ZERO);
        settle_row(2, 3, 2, &notifier);
        drop(notifier);
        let events = rx.iter().collect::<Vec<_>>();
        // Last row: one cell per column plus one right wall, no down walls
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|event| match event {
            crate::maze::grid::GridEvent::CellIf { only_if, .. } => *only_if == Fill::Active,
            crate::maze::grid::GridEvent::Cell { fill, .. } => *fill == Fill::Done,
            _ => false,
        }));
    }
}
