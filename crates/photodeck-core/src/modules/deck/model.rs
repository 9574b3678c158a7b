use crate::domain::{ChartSeries, DeckError, DeckResult, LinearFit, SamplePoint};
use crate::modules::aqy::{AqyBreakdown, AqyInput, compute_aqy};
use crate::modules::curves::{GaussianPeak, LogisticStep, SpectrumRecipe};
use crate::modules::fit::{RateFit, fit_linear, fit_rate_constant};
use crate::modules::serialization::{
    format_fixed_f64, format_scientific_f64, write_text_artifact,
};
use crate::numerics::linear_grid;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DECK_ARTIFACTS: [&str; 4] = [
    "kinetics.dat",
    "calibration.dat",
    "spectrum.dat",
    "deck-report.json",
];

const FITTED_OVERLAY_POINTS: usize = 50;

/// Deck description supplied by the presentation shell: slide count,
/// embedded measurement series, curve parameters, and the live AQY inputs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckData {
    pub title: String,
    pub slide_count: usize,
    pub kinetics: Vec<SamplePoint>,
    pub calibration: Vec<SamplePoint>,
    pub spectrum: SpectrumRecipe,
    pub aqy: AqyInput,
}

impl DeckData {
    /// The measurement set embedded in the reference presentation: methylene
    /// blue photodegradation under a 525 nm source.
    pub fn demo() -> Self {
        Self {
            title: "Visible-light photocatalytic degradation of methylene blue".to_string(),
            slide_count: 10,
            kinetics: vec![
                SamplePoint::new(0.0, 10.0),
                SamplePoint::new(10.0, 6.45),
                SamplePoint::new(20.0, 4.02),
                SamplePoint::new(30.0, 2.63),
                SamplePoint::new(40.0, 1.61),
                SamplePoint::new(50.0, 1.08),
                SamplePoint::new(60.0, 0.65),
            ],
            calibration: vec![
                SamplePoint::new(0.0, 0.002),
                SamplePoint::new(1.0, 0.189),
                SamplePoint::new(2.0, 0.374),
                SamplePoint::new(4.0, 0.752),
                SamplePoint::new(6.0, 1.128),
                SamplePoint::new(8.0, 1.495),
                SamplePoint::new(10.0, 1.871),
            ],
            spectrum: SpectrumRecipe {
                grid_start: 400.0,
                grid_end: 800.0,
                grid_points: 201,
                peaks: vec![
                    GaussianPeak {
                        center: 664.0,
                        width: 24.0,
                        amplitude: 1.2,
                    },
                    GaussianPeak {
                        center: 615.0,
                        width: 18.0,
                        amplitude: 0.55,
                    },
                ],
                valleys: vec![GaussianPeak {
                    center: 500.0,
                    width: 40.0,
                    amplitude: 0.25,
                }],
                drop_offs: vec![LogisticStep {
                    midpoint: 760.0,
                    steepness: 12.0,
                    amplitude: 0.9,
                }],
            },
            aqy: AqyInput {
                moles_degraded: 1.0e-6,
                irradiation_seconds: 3600.0,
                optical_power_watts: 0.01,
                wavelength_nm: 525.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "camelCase")]
pub enum WidgetState<T> {
    Ready(T),
    Unavailable { code: String, message: String },
}

impl<T> WidgetState<T> {
    fn from_result<E: Into<DeckError>>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(error) => {
                let error = error.into();
                Self::Unavailable {
                    code: error.code().to_string(),
                    message: error.message().to_string(),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Unavailable { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KineticsWidget {
    pub decay: ChartSeries,
    pub linearized: ChartSeries,
    pub fitted_decay: ChartSeries,
    pub fit: RateFit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationWidget {
    pub samples: ChartSeries,
    pub fitted_line: ChartSeries,
    pub fit: LinearFit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumWidget {
    pub absorbance: ChartSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckReport {
    pub title: String,
    pub slide_count: usize,
    pub kinetics: WidgetState<KineticsWidget>,
    pub calibration: WidgetState<CalibrationWidget>,
    pub spectrum: WidgetState<SpectrumWidget>,
    pub aqy: WidgetState<AqyBreakdown>,
}

/// Compute every widget of the deck. Widgets are independent: a degenerate
/// input in one lands as `Unavailable` in the report without blocking the
/// others.
pub fn compute_deck(data: &DeckData) -> DeckReport {
    DeckReport {
        title: data.title.clone(),
        slide_count: data.slide_count,
        kinetics: WidgetState::from_result(build_kinetics(&data.kinetics)),
        calibration: WidgetState::from_result(build_calibration(&data.calibration)),
        spectrum: WidgetState::from_result(build_spectrum(&data.spectrum)),
        aqy: WidgetState::from_result(compute_aqy(&data.aqy)),
    }
}

fn build_kinetics(samples: &[SamplePoint]) -> DeckResult<KineticsWidget> {
    let fit = fit_rate_constant(samples).map_err(DeckError::from)?;

    let linearized_points: Vec<SamplePoint> = samples
        .iter()
        .map(|sample| SamplePoint::new(sample.x, (fit.initial_value / sample.y).ln()))
        .collect();

    let (start, end) = sample_x_range(samples);
    let fitted_points: Vec<SamplePoint> = linear_grid(start, end, FITTED_OVERLAY_POINTS)
        .unwrap_or_else(|| vec![start, end])
        .into_iter()
        .map(|t| SamplePoint::new(t, fit.initial_value * (-fit.rate_constant * t).exp()))
        .collect();

    Ok(KineticsWidget {
        decay: ChartSeries::new("measured concentration", samples.to_vec()),
        linearized: ChartSeries::new("ln(c0/c)", linearized_points),
        fitted_decay: ChartSeries::new("first-order model", fitted_points),
        fit,
    })
}

fn build_calibration(samples: &[SamplePoint]) -> DeckResult<CalibrationWidget> {
    let fit = fit_linear(samples).map_err(DeckError::from)?;

    let (start, end) = sample_x_range(samples);
    let fitted_line = ChartSeries::new(
        "least-squares line",
        vec![
            SamplePoint::new(start, fit.predict(start)),
            SamplePoint::new(end, fit.predict(end)),
        ],
    );

    Ok(CalibrationWidget {
        samples: ChartSeries::new("calibration standards", samples.to_vec()),
        fitted_line,
        fit,
    })
}

fn build_spectrum(recipe: &SpectrumRecipe) -> DeckResult<SpectrumWidget> {
    let points = recipe.sample().map_err(DeckError::from)?;
    Ok(SpectrumWidget {
        absorbance: ChartSeries::new("synthetic absorbance", points),
    })
}

fn sample_x_range(samples: &[SamplePoint]) -> (f64, f64) {
    let mut start = f64::INFINITY;
    let mut end = f64::NEG_INFINITY;
    for sample in samples {
        start = start.min(sample.x);
        end = end.max(sample.x);
    }
    (start, end)
}

impl DeckReport {
    pub fn to_json(&self) -> DeckResult<String> {
        serde_json::to_string_pretty(self).map_err(|source| {
            DeckError::internal(
                "SYS.DECK_REPORT_JSON",
                format!("failed to serialize deck report: {source}"),
            )
        })
    }

    pub fn write_artifact(&self, artifact_name: &str, output_path: &Path) -> DeckResult<()> {
        let contents = match artifact_name {
            "kinetics.dat" => self.render_kinetics_dat(),
            "calibration.dat" => self.render_calibration_dat(),
            "spectrum.dat" => self.render_spectrum_dat(),
            "deck-report.json" => self.to_json()?,
            other => {
                return Err(DeckError::internal(
                    "SYS.DECK_OUTPUT_CONTRACT",
                    format!("unsupported deck output artifact '{}'", other),
                ));
            }
        };

        write_text_artifact(output_path, &contents).map_err(|source| {
            DeckError::io_system(
                "IO.DECK_OUTPUT_WRITE",
                format!(
                    "failed to write deck artifact '{}': {}",
                    output_path.display(),
                    source
                ),
            )
        })
    }

    pub fn write_all_artifacts(&self, output_dir: &Path) -> DeckResult<Vec<PathBuf>> {
        fs::create_dir_all(output_dir).map_err(|source| {
            DeckError::io_system(
                "IO.DECK_OUTPUT_DIR",
                format!(
                    "failed to create output directory '{}': {}",
                    output_dir.display(),
                    source
                ),
            )
        })?;

        let mut written = Vec::with_capacity(DECK_ARTIFACTS.len());
        for artifact_name in DECK_ARTIFACTS {
            let output_path = output_dir.join(artifact_name);
            self.write_artifact(artifact_name, &output_path)?;
            written.push(output_path);
        }
        Ok(written)
    }

    fn render_kinetics_dat(&self) -> String {
        let mut lines = vec![
            "# photodeck kinetics chart".to_string(),
            format!("# deck: {}", self.title),
        ];

        match &self.kinetics {
            WidgetState::Ready(widget) => {
                lines.push(
                    "# columns: time_min measured_concentration model_concentration".to_string(),
                );
                for sample in &widget.decay.points {
                    let model = widget.fit.initial_value
                        * (-widget.fit.rate_constant * sample.x).exp();
                    lines.push(format!(
                        "{} {} {}",
                        format_fixed_f64(sample.x, 10, 2),
                        format_scientific_f64(sample.y),
                        format_scientific_f64(model),
                    ));
                }
            }
            WidgetState::Unavailable { code, message } => {
                lines.push(format!("# widget unavailable: [{}] {}", code, message));
            }
        }

        lines.join("\n")
    }

    fn render_calibration_dat(&self) -> String {
        let mut lines = vec![
            "# photodeck calibration chart".to_string(),
            format!("# deck: {}", self.title),
        ];

        match &self.calibration {
            WidgetState::Ready(widget) => {
                lines.push("# columns: concentration absorbance fitted_absorbance".to_string());
                for sample in &widget.samples.points {
                    lines.push(format!(
                        "{} {} {}",
                        format_fixed_f64(sample.x, 10, 3),
                        format_scientific_f64(sample.y),
                        format_scientific_f64(widget.fit.predict(sample.x)),
                    ));
                }
            }
            WidgetState::Unavailable { code, message } => {
                lines.push(format!("# widget unavailable: [{}] {}", code, message));
            }
        }

        lines.join("\n")
    }

    fn render_spectrum_dat(&self) -> String {
        let mut lines = vec![
            "# photodeck synthetic absorbance spectrum".to_string(),
            format!("# deck: {}", self.title),
        ];

        match &self.spectrum {
            WidgetState::Ready(widget) => {
                lines.push("# columns: wavelength_nm absorbance".to_string());
                for sample in &widget.absorbance.points {
                    lines.push(format!(
                        "{} {}",
                        format_fixed_f64(sample.x, 10, 2),
                        format_scientific_f64(sample.y),
                    ));
                }
            }
            WidgetState::Unavailable { code, message } => {
                lines.push(format!("# widget unavailable: [{}] {}", code, message));
            }
        }

        lines.join("\n")
    }
}
