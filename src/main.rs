mod analysis;
mod error;
mod model;
mod nlp;
mod pipeline;
mod settings;
mod summary;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use pipeline::Pipeline;
use settings::Settings;
use summary::RunSummary;

#[derive(Parser)]
#[command(
    name = "interview_nlp",
    about = "Turn interview-experience write-ups into structured records"
)]
struct Cli {
    /// JSON array of raw experiences
    input: PathBuf,
    /// Where to write the processed array
    output: PathBuf,
    /// Print aggregate statistics after the run
    #[arg(long)]
    summary: bool,
    /// Write single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    info!(?settings, "settings loaded");

    let records = pipeline::load_records(&cli.input)?;
    if records.is_empty() {
        println!("No experiences in {}.", cli.input.display());
    }
    let pipeline = Pipeline::new(&settings)?;

    println!("Processing {} experiences...", records.len());
    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );
    let report = pipeline.run(&records, settings.chunk_size, |n| pb.inc(n as u64));
    pb.finish_and_clear();

    let pretty = settings.pretty && !cli.compact;
    pipeline::write_records(&cli.output, &report.processed, pretty)?;
    report.print();
    println!("Output saved to {}", cli.output.display());

    if cli.summary {
        RunSummary::from_records(&report.processed).print();
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::time::Duration;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_requires_both_paths() {
        assert!(Cli::try_parse_from(["interview_nlp", "in.json"]).is_err());
        assert!(Cli::try_parse_from(["interview_nlp", "a", "b", "c"]).is_err());
        let cli = Cli::try_parse_from(["interview_nlp", "in.json", "out.json", "--compact"]).unwrap();
        assert!(cli.compact);
        assert!(!cli.summary);
    }

    #[test]
    fn durations_format_by_magnitude() {
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }
}
