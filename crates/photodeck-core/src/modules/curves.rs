use crate::domain::{DeckError, SamplePoint};
use crate::numerics::linear_grid;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CurveError {
    #[error("spectrum grid needs at least two points spanning a positive range, got {points} over [{start}, {end}]")]
    InvalidGrid { start: f64, end: f64, points: usize },
    #[error("gaussian component #{index} needs a positive width, got {width}")]
    NonPositiveWidth { index: usize, width: f64 },
    #[error("logistic component #{index} needs a positive steepness, got {steepness}")]
    NonPositiveSteepness { index: usize, steepness: f64 },
}

impl CurveError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidGrid { .. } => "CURVE.INVALID_GRID",
            Self::NonPositiveWidth { .. } => "CURVE.NON_POSITIVE_WIDTH",
            Self::NonPositiveSteepness { .. } => "CURVE.NON_POSITIVE_STEEPNESS",
        }
    }
}

impl From<CurveError> for DeckError {
    fn from(error: CurveError) -> Self {
        DeckError::input_validation(error.code(), error.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaussianPeak {
    pub center: f64,
    pub width: f64,
    pub amplitude: f64,
}

impl GaussianPeak {
    pub fn evaluate(&self, x: f64) -> f64 {
        let z = (x - self.center) / self.width;
        self.amplitude * (-0.5 * z * z).exp()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticStep {
    pub midpoint: f64,
    pub steepness: f64,
    pub amplitude: f64,
}

impl LogisticStep {
    pub fn evaluate(&self, x: f64) -> f64 {
        self.amplitude / (1.0 + (-(x - self.midpoint) / self.steepness).exp())
    }
}

/// Synthetic absorbance curve: summed peaks minus valleys and drop-offs,
/// floored at zero since physical absorbance cannot be negative.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumRecipe {
    pub grid_start: f64,
    pub grid_end: f64,
    pub grid_points: usize,
    #[serde(default)]
    pub peaks: Vec<GaussianPeak>,
    #[serde(default)]
    pub valleys: Vec<GaussianPeak>,
    #[serde(default)]
    pub drop_offs: Vec<LogisticStep>,
}

impl SpectrumRecipe {
    pub fn validate(&self) -> Result<(), CurveError> {
        if self.grid_points < 2
            || !self.grid_start.is_finite()
            || !self.grid_end.is_finite()
            || self.grid_end <= self.grid_start
        {
            return Err(CurveError::InvalidGrid {
                start: self.grid_start,
                end: self.grid_end,
                points: self.grid_points,
            });
        }

        for (index, gaussian) in self.peaks.iter().chain(&self.valleys).enumerate() {
            if !gaussian.width.is_finite() || gaussian.width <= 0.0 {
                return Err(CurveError::NonPositiveWidth {
                    index,
                    width: gaussian.width,
                });
            }
        }

        for (index, step) in self.drop_offs.iter().enumerate() {
            if !step.steepness.is_finite() || step.steepness <= 0.0 {
                return Err(CurveError::NonPositiveSteepness {
                    index,
                    steepness: step.steepness,
                });
            }
        }

        Ok(())
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let mut value = 0.0;
        for peak in &self.peaks {
            value += peak.evaluate(x);
        }
        for valley in &self.valleys {
            value -= valley.evaluate(x);
        }
        for drop_off in &self.drop_offs {
            value -= drop_off.evaluate(x);
        }
        value.max(0.0)
    }

    pub fn sample(&self) -> Result<Vec<SamplePoint>, CurveError> {
        self.validate()?;
        let grid =
            linear_grid(self.grid_start, self.grid_end, self.grid_points).ok_or_else(|| {
                CurveError::InvalidGrid {
                    start: self.grid_start,
                    end: self.grid_end,
                    points: self.grid_points,
                }
            })?;

        Ok(grid
            .into_iter()
            .map(|x| SamplePoint::new(x, self.evaluate(x)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{CurveError, GaussianPeak, LogisticStep, SpectrumRecipe};

    fn recipe() -> SpectrumRecipe {
        SpectrumRecipe {
            grid_start: 400.0,
            grid_end: 800.0,
            grid_points: 81,
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
        }
    }

    #[test]
    fn gaussian_peaks_at_its_center() {
        let peak = GaussianPeak {
            center: 664.0,
            width: 24.0,
            amplitude: 1.2,
        };

        assert!((peak.evaluate(664.0) - 1.2).abs() < 1.0e-12);
        assert!(peak.evaluate(664.0) > peak.evaluate(640.0));
        // One width out, the shape drops to amplitude * exp(-1/2).
        let expected = 1.2 * (-0.5_f64).exp();
        assert!((peak.evaluate(688.0) - expected).abs() < 1.0e-12);
    }

    #[test]
    fn logistic_step_is_half_amplitude_at_midpoint() {
        let step = LogisticStep {
            midpoint: 760.0,
            steepness: 12.0,
            amplitude: 0.9,
        };

        assert!((step.evaluate(760.0) - 0.45).abs() < 1.0e-12);
        assert!(step.evaluate(700.0) < 0.01);
        assert!(step.evaluate(820.0) > 0.89);
    }

    #[test]
    fn composite_spectrum_is_clamped_at_zero() {
        let sampled = recipe().sample().expect("sampled spectrum");

        assert_eq!(sampled.len(), 81);
        assert!(sampled.iter().all(|point| point.y >= 0.0));
        // Past the drop-off the subtraction would go negative without the floor.
        let tail = sampled.last().expect("tail point");
        assert_eq!(tail.y, 0.0);
    }

    #[test]
    fn sampling_is_restartable_and_deterministic() {
        let first = recipe().sample().expect("first pass");
        let second = recipe().sample().expect("second pass");
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_grids_and_shapes_are_typed_errors() {
        let mut bad_grid = recipe();
        bad_grid.grid_points = 1;
        assert!(matches!(
            bad_grid.sample(),
            Err(CurveError::InvalidGrid { points: 1, .. })
        ));

        let mut reversed = recipe();
        reversed.grid_end = reversed.grid_start - 1.0;
        assert!(matches!(
            reversed.sample(),
            Err(CurveError::InvalidGrid { .. })
        ));

        let mut flat = recipe();
        flat.peaks[0].width = 0.0;
        assert!(matches!(
            flat.sample(),
            Err(CurveError::NonPositiveWidth { index: 0, .. })
        ));

        let mut vertical = recipe();
        vertical.drop_offs[0].steepness = 0.0;
        assert!(matches!(
            vertical.sample(),
            Err(CurveError::NonPositiveSteepness { index: 0, .. })
        ));
    }
}
