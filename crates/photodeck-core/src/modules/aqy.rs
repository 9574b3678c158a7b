use crate::common::constants::{AVOGADRO_PER_MOL, photon_energy_joules};
use crate::domain::DeckError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AqyInput {
    pub moles_degraded: f64,
    pub irradiation_seconds: f64,
    pub optical_power_watts: f64,
    pub wavelength_nm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AqyBreakdown {
    pub photon_energy_j: f64,
    pub photons_per_second: f64,
    pub total_photons: f64,
    pub molecules_degraded: f64,
    pub aqy_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum AqyError {
    #[error("undefined AQY: wavelength must be a positive number of nanometers, got {wavelength_nm}")]
    NonPositiveWavelength { wavelength_nm: f64 },
    #[error("undefined AQY: irradiation time must be a positive number of seconds, got {seconds}")]
    NonPositiveIrradiationTime { seconds: f64 },
    #[error("undefined AQY: optical power must be a positive number of watts, got {watts}")]
    NonPositiveOpticalPower { watts: f64 },
    #[error("undefined AQY: moles degraded cannot be negative, got {moles}")]
    NegativeMolesDegraded { moles: f64 },
}

impl AqyError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NonPositiveWavelength { .. } => "AQY.NON_POSITIVE_WAVELENGTH",
            Self::NonPositiveIrradiationTime { .. } => "AQY.NON_POSITIVE_IRRADIATION_TIME",
            Self::NonPositiveOpticalPower { .. } => "AQY.NON_POSITIVE_OPTICAL_POWER",
            Self::NegativeMolesDegraded { .. } => "AQY.NEGATIVE_MOLES_DEGRADED",
        }
    }
}

impl From<AqyError> for DeckError {
    fn from(error: AqyError) -> Self {
        DeckError::computation(error.code(), error.to_string())
    }
}

/// Apparent quantum yield from the four live widget inputs.
///
/// Undefined configurations (zero or negative denominator inputs) are typed
/// errors so `Infinity`/`NaN` never reach display code.
pub fn compute_aqy(input: &AqyInput) -> Result<AqyBreakdown, AqyError> {
    if !input.wavelength_nm.is_finite() || input.wavelength_nm <= 0.0 {
        return Err(AqyError::NonPositiveWavelength {
            wavelength_nm: input.wavelength_nm,
        });
    }
    if !input.irradiation_seconds.is_finite() || input.irradiation_seconds <= 0.0 {
        return Err(AqyError::NonPositiveIrradiationTime {
            seconds: input.irradiation_seconds,
        });
    }
    if !input.optical_power_watts.is_finite() || input.optical_power_watts <= 0.0 {
        return Err(AqyError::NonPositiveOpticalPower {
            watts: input.optical_power_watts,
        });
    }
    if !input.moles_degraded.is_finite() || input.moles_degraded < 0.0 {
        return Err(AqyError::NegativeMolesDegraded {
            moles: input.moles_degraded,
        });
    }

    let photon_energy_j = photon_energy_joules(input.wavelength_nm);
    let photons_per_second = input.optical_power_watts / photon_energy_j;
    let total_photons = photons_per_second * input.irradiation_seconds;
    let molecules_degraded = input.moles_degraded * AVOGADRO_PER_MOL;
    let aqy_percent = (molecules_degraded / total_photons) * 100.0;

    Ok(AqyBreakdown {
        photon_energy_j,
        photons_per_second,
        total_photons,
        molecules_degraded,
        aqy_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::{AqyError, AqyInput, compute_aqy};

    fn reference_input() -> AqyInput {
        AqyInput {
            moles_degraded: 1.0e-6,
            irradiation_seconds: 3600.0,
            optical_power_watts: 0.01,
            wavelength_nm: 525.0,
        }
    }

    #[test]
    fn reference_case_matches_hand_computed_photon_budget() {
        let breakdown = compute_aqy(&reference_input()).expect("defined AQY");

        assert!((breakdown.photon_energy_j - 3.7837e-19).abs() / 3.7837e-19 < 1.0e-4);
        assert!((breakdown.photons_per_second - 2.6429e16).abs() / 2.6429e16 < 1.0e-4);
        assert!((breakdown.total_photons - 9.5145e19).abs() / 9.5145e19 < 1.0e-4);
        assert_eq!(breakdown.molecules_degraded, 6.02214076e17);
        assert!(breakdown.aqy_percent.is_finite());
        assert!((breakdown.aqy_percent - 0.6329).abs() < 1.0e-3);
    }

    #[test]
    fn zero_wavelength_is_undefined_never_infinity() {
        let mut input = reference_input();
        input.wavelength_nm = 0.0;

        assert_eq!(
            compute_aqy(&input),
            Err(AqyError::NonPositiveWavelength { wavelength_nm: 0.0 })
        );
    }

    #[test]
    fn non_positive_denominator_inputs_are_each_reported() {
        let mut no_time = reference_input();
        no_time.irradiation_seconds = 0.0;
        assert_eq!(
            compute_aqy(&no_time),
            Err(AqyError::NonPositiveIrradiationTime { seconds: 0.0 })
        );

        let mut no_power = reference_input();
        no_power.optical_power_watts = -0.5;
        assert_eq!(
            compute_aqy(&no_power),
            Err(AqyError::NonPositiveOpticalPower { watts: -0.5 })
        );

        let mut negative_moles = reference_input();
        negative_moles.moles_degraded = -1.0e-9;
        assert!(matches!(
            compute_aqy(&negative_moles),
            Err(AqyError::NegativeMolesDegraded { .. })
        ));
    }

    #[test]
    fn non_finite_inputs_are_rejected_up_front() {
        let mut input = reference_input();
        input.wavelength_nm = f64::NAN;
        assert!(matches!(
            compute_aqy(&input),
            Err(AqyError::NonPositiveWavelength { .. })
        ));
    }

    #[test]
    fn zero_moles_is_a_defined_zero_yield() {
        let mut input = reference_input();
        input.moles_degraded = 0.0;

        let breakdown = compute_aqy(&input).expect("defined AQY");
        assert_eq!(breakdown.aqy_percent, 0.0);
        assert_eq!(breakdown.molecules_degraded, 0.0);
    }

    #[test]
    fn error_text_reports_the_undefined_state() {
        let error = AqyError::NonPositiveWavelength { wavelength_nm: 0.0 };
        assert!(error.to_string().starts_with("undefined AQY"));
        assert_eq!(error.code(), "AQY.NON_POSITIVE_WAVELENGTH");
    }
}
