//! critpath CLI entry point

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, info};

use critpath::csv::{read_tasks_from_path, write_task_table, write_timeline};
use critpath::{compute_schedule, logging, CsvFormat, Timeline, TimelineSymbols};

#[derive(Parser, Debug)]
#[command(name = "critpath", version)]
#[command(about = "Compute a Critical Path Method schedule from a task CSV", long_about = None)]
struct Cli {
    /// Task file with `task,duration,dependencies` rows
    #[arg(default_value = "tasks.csv")]
    input: PathBuf,

    /// Per-task timing table
    #[arg(short, long, default_value = "output.csv")]
    output: PathBuf,

    /// Per-time-unit activity grid
    #[arg(short, long, default_value = "timeline.csv")]
    timeline: PathBuf,

    /// Column separator
    #[arg(long)]
    delimiter: Option<char>,

    /// Separator between names in the dependencies column
    #[arg(long)]
    dependency_separator: Option<char>,

    /// Treat the first line as data rather than a header
    #[arg(long)]
    no_header: bool,

    /// Increase log output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only report warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbosity = if cli.quiet {
        logging::VERBOSITY_SILENT
    } else {
        // Report completed writes unless asked to be quiet
        cli.verbose.saturating_add(logging::VERBOSITY_CHANGES)
    };
    logging::init(verbosity).context("Failed to initialize logging")?;

    let format = CsvFormat::new(
        cli.delimiter,
        cli.dependency_separator,
        cli.no_header.then_some(false),
    );

    let tasks = read_tasks_from_path(&cli.input, &format)
        .with_context(|| format!("Failed to read tasks from {}", cli.input.display()))?;
    info!("Loaded {} tasks from {}", tasks.len(), cli.input.display());
    for task in &tasks {
        debug!("{task}");
    }

    let schedule = compute_schedule(&tasks).context("Failed to compute schedule")?;
    info!(
        "Project finish: {}, critical chain: {}",
        schedule.project_finish(),
        schedule.critical_chain().join(" -> ")
    );

    let file = File::create(&cli.output)
        .with_context(|| format!("Failed to open {} for writing", cli.output.display()))?;
    write_task_table(BufWriter::new(file), &schedule, &format)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    info!("Task details written to {}", cli.output.display());

    let timeline = Timeline::from_schedule(&schedule);
    let file = File::create(&cli.timeline)
        .with_context(|| format!("Failed to open {} for writing", cli.timeline.display()))?;
    write_timeline(
        BufWriter::new(file),
        &timeline,
        &format,
        &TimelineSymbols::default(),
    )
    .with_context(|| format!("Failed to write {}", cli.timeline.display()))?;
    info!("Timeline written to {}", cli.timeline.display());

    Ok(())
}
