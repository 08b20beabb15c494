use crate::{
    generators::{settle, shuffled_directions},
    maze::{Direction, Maze, Notifier},
    random::RandomSource,
};

/// One pending call of the depth-first recursion.
struct Frame {
    cell: (usize, usize),
    /// Direction taken to enter this cell, `None` for the root
    incoming: Option<Direction>,
    dirs: [Direction; 4],
    next: usize,
}

pub fn recursive_backtrack(maze: &mut Maze, rng: &mut RandomSource, notifier: &mut Notifier) {
    recursive_backtrack_from(maze, (0, 0), rng, notifier);
}

/// Depth-first carving from `start`.
///
/// Runs on an explicit stack that visits cells in exactly the order the
/// recursive formulation would: each frame shuffles its directions once on
/// entry, descends into the first unvisited neighbor, and resumes with the
/// remaining directions after the child unwinds.
pub fn recursive_backtrack_from(
    maze: &mut Maze,
    start: (usize, usize),
    rng: &mut RandomSource,
    notifier: &mut Notifier,
) {
    if maze.is_empty() {
        return;
    }

    let mut stack = vec![Frame {
        cell: start,
        incoming: None,
        dirs: shuffled_directions(rng),
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let (row, col) = frame.cell;

        if frame.next == frame.dirs.len() {
            // All directions tried, unwind
            let incoming = frame.incoming;
            stack.pop();
            settle(row, col, incoming, notifier);
            continue;
        }

        let dir = frame.dirs[frame.next];
        frame.next += 1;

        if maze.is_visited(row, col, dir) {
            continue;
        }
        let Some(neighbor) = maze.neighbor(row, col, dir) else {
            continue;
        };
        maze.carve(row, col, dir, notifier);
        notifier.step();
        tracing::trace!("[backtrack] carved {} from ({}, {})", dir, row, col);

        stack.push(Frame {
            cell: neighbor,
            incoming: Some(dir),
            dirs: shuffled_directions(rng),
            next: 0,
        });
    }
}
