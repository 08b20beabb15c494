use crate::{
    generators::{settle, shuffled_directions},
    maze::{Direction, Maze, Notifier},
    random::RandomSource,
};

/// Growing tree with uniform random selection from the active list.
///
/// Each pick carves at most one passage, toward the first unvisited direction
/// of a fresh shuffle. Cells without unvisited neighbors leave the list.
pub fn growing_tree(maze: &mut Maze, rng: &mut RandomSource, notifier: &mut Notifier) {
    if maze.is_empty() {
        return;
    }

    let start = (
        rng.irand(0, maze.rows() - 1),
        rng.irand(0, maze.cols() - 1),
    );
    let mut active: Vec<((usize, usize), Option<Direction>)> = vec![(start, None)];

    while !active.is_empty() {
        let idx = rng.irand(0, active.len() - 1);
        let ((row, col), incoming) = active[idx];

        if maze.has_unvisited_neighbor(row, col) {
            let carved = shuffled_directions(rng)
                .into_iter()
                .find(|&dir| !maze.is_visited(row, col, dir))
                .and_then(|dir| maze.neighbor(row, col, dir).map(|cell| (dir, cell)));

            if let Some((dir, neighbor)) = carved {
                maze.carve(row, col, dir, notifier);
                active.push((neighbor, Some(dir)));
                notifier.step();
            }
        } else {
            active.remove(idx);
            settle(row, col, incoming, notifier);
        }
    }
    tracing::trace!("[growing tree] active list exhausted");
}
