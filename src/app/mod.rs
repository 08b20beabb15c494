pub mod mirror;
mod renderer;

use std::{
    io,
    sync::mpsc::{Receiver, TryRecvError},
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::{
    app::{mirror::Mirror, renderer::Renderer},
    config::{ConfigSource, RunConfig},
    error::AppError,
    generators::generate_maze,
    maze::{Fill, Maze, Notifier, grid::GridEvent},
    random::RandomSource,
};

#[derive(Debug, Clone)]
pub struct Settings {
    /// How long the foreground sleeps between polls of the worker
    pub frame_interval: Duration,
    /// Maximum number of grid events to buffer in the channel between worker and foreground
    pub channel_capacity: usize,
    /// Run without drawing to the terminal
    pub headless: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            channel_capacity: 1000,
            headless: false,
        }
    }
}

/// Outcome of one finished generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub config: RunConfig,
    /// Open walls between pairs of cells
    pub passages: usize,
    /// Cells reachable from the top-left cell
    pub reachable: usize,
    /// Notifier steps taken by the worker
    pub steps: usize,
}

/// What the worker hands back when it finishes.
struct Generation {
    maze: Maze,
    rng: RandomSource,
    steps: usize,
}

/// What the configuration fetch hands back: the next run, if any, and the
/// source so it can be asked again later.
type Fetched = (io::Result<Option<RunConfig>>, ConfigSource);

/// The foreground is always in exactly one of these states, so there is never
/// more than one worker or one fetch outstanding.
enum Phase {
    Generating {
        config: RunConfig,
        worker: JoinHandle<Generation>,
        events: Receiver<GridEvent>,
        source: ConfigSource,
    },
    Fetching {
        previous: RunConfig,
        fetch: JoinHandle<Fetched>,
        maze: Maze,
        rng: RandomSource,
    },
}

pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        App { settings }
    }

    /// Runs `first`, then every configuration `source` provides, one worker at
    /// a time. Returns a report per finished run.
    pub fn run(
        &self,
        first: RunConfig,
        source: ConfigSource,
        rng: RandomSource,
    ) -> Result<Vec<RunReport>, AppError> {
        let mut renderer = (!self.settings.headless).then(Renderer::default);
        if let Some(renderer) = renderer.as_mut() {
            renderer.setup()?;
        }

        let result = self.run_loop(first, source, rng, renderer.as_mut());

        if let Some(renderer) = renderer.as_mut() {
            renderer.restore()?;
        }
        result
    }

    /// Profiling mode: generate `config` back to back without rendering.
    pub fn profile(
        &self,
        config: RunConfig,
        iterations: usize,
        seed: Option<u64>,
    ) -> Result<Vec<RunReport>, AppError> {
        let app = App::new(Settings {
            headless: true,
            ..self.settings.clone()
        });
        let queue = std::iter::repeat_n(config, iterations.saturating_sub(1));
        app.run(config, ConfigSource::new(queue, false), RandomSource::new(seed))
    }

    fn run_loop(
        &self,
        first: RunConfig,
        source: ConfigSource,
        rng: RandomSource,
        mut renderer: Option<&mut Renderer>,
    ) -> Result<Vec<RunReport>, AppError> {
        tracing::info!("[app] started main loop");
        let mut mirror = Mirror::default();
        let maze = Maze::new(first.rows(), first.cols());
        mirror.resize_to(&maze, Fill::Idle);

        let mut reports = Vec::new();
        let mut phase = self.launch(first, maze, rng, source)?;

        loop {
            phase = match phase {
                Phase::Generating {
                    config,
                    worker,
                    events,
                    source,
                } => {
                    App::drain(&events, &mut mirror);
                    if let Some(renderer) = renderer.as_deref_mut() {
                        renderer.draw(&mut mirror)?;
                    }

                    if !worker.is_finished() {
                        thread::sleep(self.settings.frame_interval);
                        Phase::Generating {
                            config,
                            worker,
                            events,
                            source,
                        }
                    } else {
                        let Generation { maze, rng, steps } = worker
                            .join()
                            .map_err(|_| AppError::Panicked("generation"))?;
                        // The worker is gone, so this picks up its last events
                        App::drain(&events, &mut mirror);

                        let report = RunReport {
                            config,
                            passages: maze.open_passages(),
                            reachable: maze.reachable_cells((0, 0)),
                            steps,
                        };
                        tracing::info!(
                            "[app] finished {}: {} passages, {}/{} cells reachable, {} steps",
                            config,
                            report.passages,
                            report.reachable,
                            config.rows() * config.cols(),
                            report.steps
                        );
                        if let Some(renderer) = renderer.as_deref_mut() {
                            renderer.draw(&mut mirror)?;
                            renderer.status(&format!(
                                "{} finished in {} steps. Waiting for the next run...",
                                config, report.steps
                            ))?;
                        }
                        reports.push(report);

                        Phase::Fetching {
                            previous: config,
                            fetch: App::spawn_fetch(source, config)?,
                            maze,
                            rng,
                        }
                    }
                }
                Phase::Fetching {
                    previous,
                    fetch,
                    mut maze,
                    rng,
                } => {
                    if !fetch.is_finished() {
                        thread::sleep(self.settings.frame_interval);
                        Phase::Fetching {
                            previous,
                            fetch,
                            maze,
                            rng,
                        }
                    } else {
                        let (next, source) = fetch
                            .join()
                            .map_err(|_| AppError::Panicked("configuration"))?;
                        let Some(config) = next? else {
                            tracing::info!("[app] no more runs after {}", previous);
                            break;
                        };

                        maze.resize(config.rows(), config.cols());
                        mirror.resize_to(&maze, Fill::Idle);
                        self.launch(config, maze, rng, source)?
                    }
                }
            };
        }

        tracing::info!("[app] exiting main loop after {} runs", reports.len());
        Ok(reports)
    }

    /// Moves the maze and random source into a new generation worker.
    fn launch(
        &self,
        config: RunConfig,
        mut maze: Maze,
        mut rng: RandomSource,
        source: ConfigSource,
    ) -> Result<Phase, AppError> {
        let (tx, events) = std::sync::mpsc::sync_channel(self.settings.channel_capacity);
        tracing::info!("[app] launching {}", config);

        let worker = thread::Builder::new()
            .name("generator".to_string())
            .spawn(move || {
                let mut notifier = Notifier::new(tx, config.delay());
                generate_maze(&mut maze, config.algorithm(), &mut rng, &mut notifier);
                tracing::debug!("[worker] {} done", config.algorithm());
                Generation {
                    maze,
                    rng,
                    steps: notifier.steps(),
                }
                // The notifier is dropped here, as well as the grid event sender
            })?;

        Ok(Phase::Generating {
            config,
            worker,
            events,
            source,
        })
    }

    /// Fetches the next configuration off the foreground thread.
    fn spawn_fetch(
        mut source: ConfigSource,
        previous: RunConfig,
    ) -> io::Result<JoinHandle<Fetched>> {
        tracing::debug!("[app] fetching next run, {} queued", source.pending());
        thread::Builder::new()
            .name("config".to_string())
            .spawn(move || {
                let next = source.next_run(previous);
                (next, source)
            })
    }

    /// Applies every pending grid event without blocking.
    fn drain(events: &Receiver<GridEvent>, mirror: &mut Mirror) {
        loop {
            match events.try_recv() {
                Ok(event) => mirror.apply(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}
