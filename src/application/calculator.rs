//! Calculator service: the narrow interface a presentation layer drives.
//!
//! Owns one `MortalityModel` for the session. A presentation layer hands it
//! raw input, gets back an estimate or an `InputError`, and asks for a reset
//! when the user starts over.

use crate::domain::{MortalityEstimate, MortalityModel};

use super::input::{InputError, PatientInput};

/// Service wrapping a single patient's model.
#[derive(Debug, Default)]
pub struct CalculatorService {
    model: MortalityModel,
}

impl CalculatorService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the model (metadata, current values).
    #[must_use]
    pub fn model(&self) -> &MortalityModel {
        &self.model
    }

    /// Apply `input` to the model and compute the mortality probability.
    ///
    /// # Errors
    /// Returns the first field that could not be parsed or was rejected.
    pub fn submit(&mut self, input: &PatientInput) -> Result<MortalityEstimate, InputError> {
        if let Err(e) = input.apply_to(&mut self.model) {
            // Field name and error kind only; never the entered value.
            tracing::warn!(
                kind = e.kind(),
                field = error_field(&e),
                "Rejected calculator input"
            );
            return Err(e);
        }

        Ok(self.calculate())
    }

    /// Compute from the values currently held by the model.
    #[must_use]
    pub fn calculate(&self) -> MortalityEstimate {
        let estimate = self.model.estimate();
        tracing::info!(
            "Mortality estimate computed: probability={:.2}%",
            estimate.percent()
        );
        estimate
    }

    /// Replace the model with a fresh default one.
    pub fn reset(&mut self) {
        tracing::debug!("Resetting calculator to defaults");
        self.model = MortalityModel::new();
    }
}

fn error_field(e: &InputError) -> &'static str {
    match e {
        InputError::Empty { field } | InputError::Unparsable { field, .. } => *field,
        InputError::Invalid(model_err) => model_err.field().unwrap_or("unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoricalVariable;

    fn sample_input() -> PatientInput {
        PatientInput {
            age: "10".into(),
            ais_severity: "3".into(),
            glasgow_coma_score: "15".into(),
            injury_severity_score: "9".into(),
            systolic_bp: "110".into(),
            pulse_rate: "88".into(),
            body_temperature: "37.0".into(),
            oxygen_saturation: "98".into(),
            race: Some("White".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_submit_returns_estimate() {
        let mut service = CalculatorService::new();
        let estimate = service.submit(&sample_input()).expect("valid input");

        assert!(estimate.probability > 0.0 && estimate.probability < 1.0);
        assert_eq!(estimate.probability, service.calculate().probability);
        assert_eq!(service.model().race(), "White");
    }

    #[test]
    fn test_failed_submit_keeps_rejected_field() {
        let mut service = CalculatorService::new();
        let mut good = sample_input();
        good.set_categorical(CategoricalVariable::Gender, "Male");
        service.submit(&good).expect("valid input");

        let mut bad = sample_input();
        bad.set_categorical(CategoricalVariable::Gender, "Unknown");
        let err = service.submit(&bad).expect_err("unknown gender");
        assert_eq!(err.kind(), "invalid");
        assert_eq!(service.model().gender(), "Male");
    }

    #[test]
    fn test_reset() {
        let mut service = CalculatorService::new();
        service.submit(&sample_input()).expect("valid input");
        service.reset();

        assert_eq!(service.model(), &MortalityModel::new());
        assert_eq!(
            service.calculate().probability,
            MortalityModel::new().compute_mortality_probability()
        );
    }
}
