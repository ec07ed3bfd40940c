use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    sync::Arc,
};

use anyhow::{Context, Result};

use crate::{
    allocation::{
        AllocationEngine, AllocationReport, NarrationSink, NoopNarrationSink, StdoutNarrationSink,
    },
    cli::{Args, OutputFormat},
    config::Config,
    records::{
        ASSIGNMENTS_END_MARKER, ASSIGNMENTS_START_MARKER, read_members, read_slips,
        write_assignments_csv, write_assignments_json,
    },
};

#[tracing::instrument(name = "slipway_run", target = "slipway", skip(args, config))]
pub fn run(args: &Args, config: &Config) -> Result<()> {
    let slips = read_slips(&args.slips)
        .with_context(|| format!("failed to load slips from {}", args.slips.display()))?;
    let members = read_members(&args.members)
        .with_context(|| format!("failed to load members from {}", args.members.display()))?;
    tracing::info!(
        target: "slipway",
        slips = slips.len(),
        members = members.len(),
        "rosters_loaded"
    );

    let verbose = config.allocation.verbose;
    let narration: Arc<dyn NarrationSink> = if verbose {
        Arc::new(StdoutNarrationSink)
    } else {
        Arc::new(NoopNarrationSink)
    };
    let report = AllocationEngine::new(members, slips)
        .with_settings(config.allocation.settings())
        .with_narration(narration)
        .assign();

    match args.output.as_deref() {
        Some(path) => {
            write_report_to_file(path, args.format, &report)?;
            if verbose {
                println!("\nAssignments written to: {}", path.display());
            }
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let markers = args.format == OutputFormat::Csv && !verbose;
            if markers {
                writeln!(out, "{ASSIGNMENTS_START_MARKER}")?;
            }
            write_report(&mut out, args.format, &report)?;
            if markers {
                writeln!(out, "{ASSIGNMENTS_END_MARKER}")?;
            }
            out.flush()?;
        }
    }

    Ok(())
}

fn write_report_to_file(path: &Path, format: OutputFormat, report: &AllocationReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot open output file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_report(&mut writer, format, report)?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))
}

fn write_report<W: Write>(sink: W, format: OutputFormat, report: &AllocationReport) -> Result<()> {
    match format {
        OutputFormat::Csv => write_assignments_csv(sink, &report.assignments)?,
        OutputFormat::Json => write_assignments_json(sink, &report.assignments, &report.summary)?,
    }
    Ok(())
}
