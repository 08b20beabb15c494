use mazecarve::{
    app::{App, Settings},
    config::RunConfig,
    generators::Algorithm,
};

/// Usage: profile [algorithm code] [iterations] [rows] [cols]
fn main() -> anyhow::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let mut next_number = || args.next().and_then(|s| s.parse::<usize>().ok());

    let algorithm = next_number()
        .and_then(|code| i32::try_from(code).ok())
        .and_then(Algorithm::from_code)
        .unwrap_or(Algorithm::GrowingTree);
    let iterations = next_number().unwrap_or(10);
    let rows = next_number().unwrap_or(60);
    let cols = next_number().unwrap_or(60);

    let config = RunConfig::new(algorithm, rows, cols, 0)?;
    let started = std::time::Instant::now();
    let reports = App::new(Settings::default()).profile(config, iterations, None)?;
    let steps: usize = reports.iter().map(|r| r.steps).sum();
    println!(
        "{}: {} runs, {} steps in {:?}",
        config,
        reports.len(),
        steps,
        started.elapsed()
    );
    Ok(())
}
