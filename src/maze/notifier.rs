use std::{sync::mpsc::SyncSender, time::Duration};

use super::{
    cell::Fill,
    grid::{Coord, GridEvent},
};

/// Worker-side handle to the observer.
///
/// Every mutation is forwarded as a [`GridEvent`]; [`Notifier::step`] paces the
/// worker by the configured delay. A notifier without a sender drops events,
/// which is what tests and profiling runs use.
pub struct Notifier {
    sender: Option<SyncSender<GridEvent>>,
    delay: Duration,
    steps: usize,
}

impl Notifier {
    pub fn new(sender: SyncSender<GridEvent>, delay: Duration) -> Self {
        Notifier {
            sender: Some(sender),
            delay,
            steps: 0,
        }
    }

    /// A notifier with no observer and no delay.
    pub fn silent() -> Self {
        Notifier {
            sender: None,
            delay: Duration::ZERO,
            steps: 0,
        }
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn send(&self, event: GridEvent) {
        if let Some(sender) = &self.sender {
            // The observer may already be gone when the process is shutting down.
            if sender.send(event).is_err() {
                tracing::trace!("[notifier] observer disconnected, dropping event");
            }
        }
    }

    pub fn toggle_wall(&self, coord: Coord, fill: Fill) {
        self.send(GridEvent::Wall { coord, fill });
    }

    pub fn toggle_cell(&self, coord: Coord, fill: Fill) {
        self.send(GridEvent::Cell { coord, fill });
    }

    pub fn toggle_if(&self, coord: Coord, fill: Fill, only_if: Fill) {
        self.send(GridEvent::CellIf {
            coord,
            fill,
            only_if,
        });
    }

    pub fn resize(&self, rows: usize, cols: usize, open: Box<[bool]>, background: Fill) {
        self.send(GridEvent::Resize {
            rows,
            cols,
            open,
            background,
        });
    }

    /// Ends one animation step: counts it and sleeps for the configured delay.
    pub fn step(&mut self) {
        self.steps += 1;
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_forwarded_in_order() {
        let (tx, rx) = std::sync::mpsc::sync_channel(8);
        let mut notifier = Notifier::new(tx, Duration::ZERO);
        notifier.toggle_cell((1, 1), Fill::Active);
        notifier.toggle_wall((1, 2), Fill::Active);
        notifier.step();
        drop(notifier);

        let events = rx.iter().collect::<Vec<_>>();
        assert_eq!(
            events,
            vec![
                GridEvent::Cell {
                    coord: (1, 1),
                    fill: Fill::Active
                },
                GridEvent::Wall {
                    coord: (1, 2),
                    fill: Fill::Active
                },
            ]
        );
    }

    #[test]
    fn test_disconnected_observer_is_ignored() {
        let (tx, rx) = std::sync::mpsc::sync_channel(1);
        drop(rx);
        let mut notifier = Notifier::new(tx, Duration::ZERO);
        notifier.toggle_cell((1, 1), Fill::Done);
        notifier.step();
        assert_eq!(notifier.steps(), 1);
    }
}
