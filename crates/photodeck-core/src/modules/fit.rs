use crate::domain::{DeckError, LinearFit, SamplePoint};
use crate::numerics::stable_sum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("linear fit requires at least two sample points, got {count}")]
    InsufficientData { count: usize },
    #[error("degenerate input: zero x-variance across {count} sample points")]
    ZeroXVariance { count: usize },
    #[error("kinetics linearization requires strictly positive concentrations, sample #{index} is {value}")]
    NonPositiveConcentration { index: usize, value: f64 },
}

impl FitError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "FIT.INSUFFICIENT_DATA",
            Self::ZeroXVariance { .. } => "FIT.ZERO_X_VARIANCE",
            Self::NonPositiveConcentration { .. } => "FIT.NON_POSITIVE_CONCENTRATION",
        }
    }
}

impl From<FitError> for DeckError {
    fn from(error: FitError) -> Self {
        DeckError::input_validation(error.code(), error.to_string())
    }
}

/// Closed-form ordinary least squares over the sample pairs.
///
/// `r_squared` is fixed to `1.0` when the total y-variance is zero: a constant
/// series is reproduced exactly by the zero-slope fit, and the natural formula
/// would divide by zero.
pub fn fit_linear(points: &[SamplePoint]) -> Result<LinearFit, FitError> {
    let count = points.len();
    if count < 2 {
        return Err(FitError::InsufficientData { count });
    }

    let n = count as f64;
    let xs: Vec<f64> = points.iter().map(|point| point.x).collect();
    let ys: Vec<f64> = points.iter().map(|point| point.y).collect();
    let mean_x = stable_sum(&xs) / n;
    let mean_y = stable_sum(&ys) / n;

    let centered_xx: Vec<f64> = xs.iter().map(|x| (x - mean_x) * (x - mean_x)).collect();
    let centered_xy: Vec<f64> = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .collect();
    let s_xx = stable_sum(&centered_xx);
    let s_xy = stable_sum(&centered_xy);

    // Rounding in mean_x leaves a residual s_xx even when every x is the same
    // value, so the guard scales with the magnitude of the data.
    if s_xx <= f64::EPSILON * n * mean_x * mean_x {
        return Err(FitError::ZeroXVariance { count });
    }

    let slope = s_xy / s_xx;
    let intercept = mean_y - slope * mean_x;

    let residuals: Vec<f64> = points
        .iter()
        .map(|point| {
            let predicted = intercept + slope * point.x;
            (point.y - predicted) * (point.y - predicted)
        })
        .collect();
    let centered_yy: Vec<f64> = ys.iter().map(|y| (y - mean_y) * (y - mean_y)).collect();
    let ss_res = stable_sum(&residuals);
    let ss_tot = stable_sum(&centered_yy);

    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    };

    Ok(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateFit {
    pub rate_constant: f64,
    pub initial_value: f64,
    pub linearized: LinearFit,
}

/// Pseudo-first-order rate constant from (time, concentration) samples.
///
/// Fits `ln(c0/c)` against `t`; the slope is the apparent rate constant and
/// the first sample supplies `c0`.
pub fn fit_rate_constant(samples: &[SamplePoint]) -> Result<RateFit, FitError> {
    let count = samples.len();
    if count < 2 {
        return Err(FitError::InsufficientData { count });
    }

    for (index, sample) in samples.iter().enumerate() {
        if !sample.y.is_finite() || sample.y <= 0.0 {
            return Err(FitError::NonPositiveConcentration {
                index,
                value: sample.y,
            });
        }
    }

    let initial_value = samples[0].y;
    let linearized_points: Vec<SamplePoint> = samples
        .iter()
        .map(|sample| SamplePoint::new(sample.x, (initial_value / sample.y).ln()))
        .collect();
    let linearized = fit_linear(&linearized_points)?;

    Ok(RateFit {
        rate_constant: linearized.slope,
        initial_value,
        linearized,
    })
}
