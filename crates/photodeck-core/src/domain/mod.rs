pub mod errors;

pub use errors::{DeckError, DeckErrorCategory, DeckResult};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

impl SamplePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<SamplePoint>,
}

impl ChartSeries {
    pub fn new(label: impl Into<String>, points: Vec<SamplePoint>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartSeries, LinearFit, SamplePoint};

    #[test]
    fn linear_fit_prediction_evaluates_the_fitted_line() {
        let fit = LinearFit {
            slope: 2.0,
            intercept: 1.0,
            r_squared: 1.0,
        };

        assert_eq!(fit.predict(0.0), 1.0);
        assert_eq!(fit.predict(3.0), 7.0);
    }

    #[test]
    fn chart_series_reports_point_count() {
        let series = ChartSeries::new(
            "kinetics",
            vec![SamplePoint::new(0.0, 1.0), SamplePoint::new(1.0, 0.5)],
        );

        assert!(!series.is_empty());
        assert_eq!(series.len(), 2);
        assert_eq!(series.label, "kinetics");
    }
}
