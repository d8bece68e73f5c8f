use std::io::Write;

use meteo_lows::YearStatistics;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let files: Vec<String> = std::env::args().skip(1).collect();
    if files.is_empty() {
        return Err(miette::miette!(
            help = "pass one CSV export per year",
            "Usage: compute-lows <FILE>..."
        ));
    }

    // Everything is parsed before printing anything.
    let years = meteo_lows::load_years(&files)?;

    let mut stdout = std::io::stdout().lock();
    for year in &years {
        writeln!(stdout, "{}", YearStatistics::compute(year)).into_diagnostic()?;
    }

    Ok(())
}
