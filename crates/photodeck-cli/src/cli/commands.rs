use super::CliError;
use super::helpers::read_json_file;
use photodeck_core::domain::{DeckError, SamplePoint};
use photodeck_core::modules::aqy::{AqyInput, compute_aqy};
use photodeck_core::modules::deck::{DeckData, compute_deck};
use photodeck_core::modules::fit::fit_linear;
use photodeck_core::modules::nav::{DEFAULT_WHEEL_COOLDOWN_MS, NavController, NavEvent};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct RenderArgs {
    /// Deck description JSON (defaults to the embedded demo deck)
    #[arg(long)]
    deck: Option<PathBuf>,

    /// Output directory for chart artifacts and the JSON report
    #[arg(long, default_value = "artifacts/deck")]
    output_dir: PathBuf,
}

pub(super) fn run_render_command(args: RenderArgs) -> Result<i32, CliError> {
    let data = match &args.deck {
        Some(path) => read_json_file::<DeckData>(path, "IO.DECK_FILE", "INPUT.DECK_FILE")?,
        None => DeckData::demo(),
    };

    tracing::info!(
        "rendering deck '{}' ({} slides)",
        data.title,
        data.slide_count
    );

    let report = compute_deck(&data);
    let written = report
        .write_all_artifacts(&args.output_dir)
        .map_err(CliError::Compute)?;

    for path in &written {
        println!("wrote {}", path.display());
    }

    let ready_count = [
        report.kinetics.is_ready(),
        report.calibration.is_ready(),
        report.spectrum.is_ready(),
        report.aqy.is_ready(),
    ]
    .iter()
    .filter(|ready| **ready)
    .count();
    println!("Widgets ready: {}/4", ready_count);

    Ok(0)
}

#[derive(clap::Args)]
pub(super) struct FitArgs {
    /// Sample pairs JSON file (array of {"x": …, "y": …})
    #[arg(long)]
    samples: PathBuf,
}

pub(super) fn run_fit_command(args: FitArgs) -> Result<i32, CliError> {
    let samples: Vec<SamplePoint> =
        read_json_file(&args.samples, "IO.SAMPLES_FILE", "INPUT.SAMPLES_FILE")?;

    let fit = fit_linear(&samples)
        .map_err(|error| CliError::Compute(DeckError::from(error)))?;
    let rendered = serde_json::to_string_pretty(&fit).map_err(anyhow::Error::from)?;
    println!("{}", rendered);

    Ok(0)
}

#[derive(clap::Args)]
pub(super) struct AqyArgs {
    /// Moles of substrate degraded
    #[arg(long)]
    moles_degraded: f64,

    /// Irradiation time in seconds
    #[arg(long)]
    irradiation_seconds: f64,

    /// Optical power at the sample in watts
    #[arg(long)]
    optical_power_watts: f64,

    /// Source wavelength in nanometers
    #[arg(long)]
    wavelength_nm: f64,
}

pub(super) fn run_aqy_command(args: AqyArgs) -> Result<i32, CliError> {
    let input = AqyInput {
        moles_degraded: args.moles_degraded,
        irradiation_seconds: args.irradiation_seconds,
        optical_power_watts: args.optical_power_watts,
        wavelength_nm: args.wavelength_nm,
    };

    let breakdown =
        compute_aqy(&input).map_err(|error| CliError::Compute(DeckError::from(error)))?;
    let rendered = serde_json::to_string_pretty(&breakdown).map_err(anyhow::Error::from)?;
    println!("{}", rendered);

    Ok(0)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TraceEvent {
    at_ms: u64,
    event: NavEvent,
}

#[derive(clap::Args)]
pub(super) struct NavTraceArgs {
    /// Navigation trace JSON file (array of {"atMs": …, "event": …})
    #[arg(long)]
    trace: PathBuf,

    /// Number of slides in the deck
    #[arg(long)]
    slides: usize,

    /// Wheel cooldown window in milliseconds
    #[arg(long, default_value_t = DEFAULT_WHEEL_COOLDOWN_MS)]
    wheel_cooldown_ms: u64,
}

pub(super) fn run_nav_trace_command(args: NavTraceArgs) -> Result<i32, CliError> {
    let trace: Vec<TraceEvent> =
        read_json_file(&args.trace, "IO.TRACE_FILE", "INPUT.TRACE_FILE")?;

    let mut controller = NavController::with_cooldown(args.slides, args.wheel_cooldown_ms)
        .map_err(|error| CliError::Compute(DeckError::from(error)))?;

    tracing::info!(
        "replaying {} navigation events over {} slides",
        trace.len(),
        args.slides
    );

    for entry in &trace {
        match controller.submit(entry.event, entry.at_ms) {
            Some(transition) => println!(
                "t={}ms slide={} changed={}",
                entry.at_ms, transition.index, transition.changed
            ),
            None => println!("t={}ms throttled", entry.at_ms),
        }
    }
    println!("Final slide: {}", controller.current_index());

    Ok(0)
}
