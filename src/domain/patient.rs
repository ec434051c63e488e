//! Patient record for the pediatric TBI mortality model.
//!
//! Holds the 13 raw variable values plus the indicator encoding derived from
//! the categorical ones. Every continuous setter validates before storing;
//! every categorical setter recomputes its indicator family. Indicators have no
//! public setter.

use std::fmt;

use super::category::{
    DrugUse, Gender, InjuryIndicators, InjuryType, Race, RaceIndicators, SupplementalOxygen,
};
use super::error::ModelError;
use super::variables::ContinuousVariable;

/// 0/1 regressors derived from the categorical variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Indicators {
    pub is_male: u8,
    pub uses_supp_oxy: u8,
    pub uses_drug: u8,
    pub race: RaceIndicators,
    pub injury: InjuryIndicators,
}

/// Raw clinical values for one patient.
///
/// A fresh record has every continuous value at 0 and every categorical value
/// at its baseline option. Zero is outside the valid range of some scores
/// (GCS, ISS, AIS); it only marks "not yet entered" and is still a legal
/// input to the model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatientRecord {
    age: f64,
    ais_severity: i32,
    glasgow_coma_score: i32,
    injury_severity_score: i32,
    systolic_bp: f64,
    pulse_rate: f64,
    body_temperature: f64,
    oxygen_saturation: f64,

    gender: Gender,
    supplemental_oxygen: SupplementalOxygen,
    drug_use: DrugUse,
    race: Race,
    injury_type: InjuryType,

    indicators: Indicators,
}

impl PatientRecord {
    /// Create a record with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn checked(var: ContinuousVariable, value: f64) -> Result<f64, ModelError> {
        var.validate(value)?;
        Ok(value)
    }

    // === Continuous setters ===

    /// # Errors
    /// `OutOfRange` unless `0 <= value <= 14`.
    pub fn set_age(&mut self, value: f64) -> Result<(), ModelError> {
        self.age = Self::checked(ContinuousVariable::Age, value)?;
        Ok(())
    }

    /// # Errors
    /// `OutOfRange` unless `1 <= value <= 6`.
    pub fn set_ais_severity(&mut self, value: i32) -> Result<(), ModelError> {
        Self::checked(ContinuousVariable::AisSeverity, f64::from(value))?;
        self.ais_severity = value;
        Ok(())
    }

    /// # Errors
    /// `OutOfRange` unless `3 <= value <= 15`.
    pub fn set_glasgow_coma_score(&mut self, value: i32) -> Result<(), ModelError> {
        Self::checked(ContinuousVariable::GlasgowComaScore, f64::from(value))?;
        self.glasgow_coma_score = value;
        Ok(())
    }

    /// # Errors
    /// `OutOfRange` unless `3 <= value <= 75`.
    pub fn set_injury_severity_score(&mut self, value: i32) -> Result<(), ModelError> {
        Self::checked(ContinuousVariable::InjurySeverityScore, f64::from(value))?;
        self.injury_severity_score = value;
        Ok(())
    }

    /// # Errors
    /// `OutOfRange` if negative or not finite.
    pub fn set_systolic_bp(&mut self, value: f64) -> Result<(), ModelError> {
        self.systolic_bp = Self::checked(ContinuousVariable::SystolicBp, value)?;
        Ok(())
    }

    /// # Errors
    /// `OutOfRange` if negative or not finite.
    pub fn set_pulse_rate(&mut self, value: f64) -> Result<(), ModelError> {
        self.pulse_rate = Self::checked(ContinuousVariable::PulseRate, value)?;
        Ok(())
    }

    /// # Errors
    /// `OutOfRange` if negative or not finite.
    pub fn set_body_temperature(&mut self, value: f64) -> Result<(), ModelError> {
        self.body_temperature = Self::checked(ContinuousVariable::BodyTemperature, value)?;
        Ok(())
    }

    /// # Errors
    /// `OutOfRange` unless `0 <= value <= 100`.
    pub fn set_oxygen_saturation(&mut self, value: f64) -> Result<(), ModelError> {
        self.oxygen_saturation = Self::checked(ContinuousVariable::OxygenSaturation, value)?;
        Ok(())
    }

    // === Categorical setters ===

    pub fn set_gender(&mut self, value: Gender) {
        self.gender = value;
        self.indicators.is_male = value.is_male();
    }

    pub fn set_supplemental_oxygen(&mut self, value: SupplementalOxygen) {
        self.supplemental_oxygen = value;
        self.indicators.uses_supp_oxy = value.indicator();
    }

    pub fn set_drug_use(&mut self, value: DrugUse) {
        self.drug_use = value;
        self.indicators.uses_drug = value.indicator();
    }

    pub fn set_race(&mut self, value: Race) {
        self.race = value;
        self.indicators.race = value.indicators();
    }

    pub fn set_injury_type(&mut self, value: InjuryType) {
        self.injury_type = value;
        self.indicators.injury = value.indicators();
    }

    // === Getters ===

    #[must_use]
    pub fn age(&self) -> f64 {
        self.age
    }

    #[must_use]
    pub fn ais_severity(&self) -> i32 {
        self.ais_severity
    }

    #[must_use]
    pub fn glasgow_coma_score(&self) -> i32 {
        self.glasgow_coma_score
    }

    #[must_use]
    pub fn injury_severity_score(&self) -> i32 {
        self.injury_severity_score
    }

    #[must_use]
    pub fn systolic_bp(&self) -> f64 {
        self.systolic_bp
    }

    #[must_use]
    pub fn pulse_rate(&self) -> f64 {
        self.pulse_rate
    }

    #[must_use]
    pub fn body_temperature(&self) -> f64 {
        self.body_temperature
    }

    #[must_use]
    pub fn oxygen_saturation(&self) -> f64 {
        self.oxygen_saturation
    }

    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    #[must_use]
    pub fn supplemental_oxygen(&self) -> SupplementalOxygen {
        self.supplemental_oxygen
    }

    #[must_use]
    pub fn drug_use(&self) -> DrugUse {
        self.drug_use
    }

    #[must_use]
    pub fn race(&self) -> Race {
        self.race
    }

    #[must_use]
    pub fn injury_type(&self) -> InjuryType {
        self.injury_type
    }

    pub(crate) fn indicators(&self) -> Indicators {
        self.indicators
    }
}

impl fmt::Display for PatientRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Age: {}", self.age)?;
        writeln!(f, "AIS Severity: {}", self.ais_severity)?;
        writeln!(f, "GCS: {}", self.glasgow_coma_score)?;
        writeln!(f, "ISS: {}", self.injury_severity_score)?;
        writeln!(f, "SBP: {}", self.systolic_bp)?;
        writeln!(f, "Pulse Rate: {}", self.pulse_rate)?;
        writeln!(f, "Body Temp: {}", self.body_temperature)?;
        writeln!(f, "Oxygen Sat: {}", self.oxygen_saturation)?;
        writeln!(f, "Gender: {}", self.gender)?;
        writeln!(f, "Drug Use: {}", self.drug_use)?;
        writeln!(f, "Race: {}", self.race)?;
        writeln!(f, "Supplemental Oxy: {}", self.supplemental_oxygen)?;
        write!(f, "Injury Type: {}", self.injury_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::error::Bound;

    #[test]
    fn test_defaults() {
        let record = PatientRecord::new();
        assert_eq!(record.age(), 0.0);
        assert_eq!(record.glasgow_coma_score(), 0);
        assert_eq!(record.gender(), Gender::Female);
        assert_eq!(record.race(), Race::AfricanAmerican);
        assert_eq!(record.injury_type(), InjuryType::Blunt);
        assert_eq!(record.indicators(), Indicators::default());
    }

    #[test]
    fn test_boundaries_accepted() {
        let mut record = PatientRecord::new();
        record.set_age(0.0).expect("min age");
        record.set_age(14.0).expect("max age");
        record.set_ais_severity(1).expect("min ais");
        record.set_ais_severity(6).expect("max ais");
        record.set_glasgow_coma_score(3).expect("min gcs");
        record.set_glasgow_coma_score(15).expect("max gcs");
        record.set_injury_severity_score(3).expect("min iss");
        record.set_injury_severity_score(75).expect("max iss");
        record.set_systolic_bp(0.0).expect("min sbp");
        record.set_pulse_rate(0.0).expect("min pulse");
        record.set_body_temperature(0.0).expect("min temp");
        record.set_oxygen_saturation(0.0).expect("min sat");
        record.set_oxygen_saturation(100.0).expect("max sat");
    }

    #[test]
    fn test_rejection_keeps_previous_value() {
        let mut record = PatientRecord::new();
        record.set_glasgow_coma_score(12).expect("valid");

        let err = record.set_glasgow_coma_score(16).unwrap_err();
        assert_eq!(
            err,
            ModelError::OutOfRange {
                field: "Glasgow Coma Score",
                value: 16.0,
                bound: Bound::Max(15.0),
            }
        );
        assert!(record.set_glasgow_coma_score(2).is_err());
        assert_eq!(record.glasgow_coma_score(), 12);

        record.set_age(7.5).expect("valid");
        assert!(record.set_age(-1.0).is_err());
        assert!(record.set_age(15.0).is_err());
        assert!(record.set_age(f64::NAN).is_err());
        assert_eq!(record.age(), 7.5);
    }

    #[test]
    fn test_one_beyond_each_bound_rejected() {
        let mut record = PatientRecord::new();
        assert!(record.set_ais_severity(0).is_err());
        assert!(record.set_ais_severity(7).is_err());
        assert!(record.set_injury_severity_score(2).is_err());
        assert!(record.set_injury_severity_score(76).is_err());
        assert!(record.set_systolic_bp(-1.0).is_err());
        assert!(record.set_pulse_rate(-1.0).is_err());
        assert!(record.set_body_temperature(-1.0).is_err());
        assert!(record.set_oxygen_saturation(-1.0).is_err());
        assert!(record.set_oxygen_saturation(101.0).is_err());
        assert!(record.set_systolic_bp(f64::INFINITY).is_err());
        assert_eq!(record, PatientRecord::new());
    }

    #[test]
    fn test_categorical_setters_recompute_indicators() {
        let mut record = PatientRecord::new();
        record.set_race(Race::White);
        assert_eq!(record.indicators().race.white, 1);

        record.set_race(Race::Asian);
        let race = record.indicators().race;
        assert_eq!(race.white, 0);
        assert_eq!(race.asian, 1);

        record.set_race(Race::AfricanAmerican);
        assert_eq!(record.indicators().race, RaceIndicators::default());

        record.set_gender(Gender::Male);
        record.set_drug_use(DrugUse::Yes);
        record.set_supplemental_oxygen(SupplementalOxygen::Yes);
        record.set_injury_type(InjuryType::Penetrating);
        let ind = record.indicators();
        assert_eq!(
            (ind.is_male, ind.uses_drug, ind.uses_supp_oxy),
            (1, 1, 1)
        );
        assert_eq!(ind.injury.penetrating, 1);
        assert_eq!(ind.injury.other, 0);
    }

    #[test]
    fn test_categorical_setter_idempotent() {
        for race in Race::VARIANTS {
            let mut once = PatientRecord::new();
            once.set_race(*race);
            let mut twice = once.clone();
            twice.set_race(*race);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_summary_lists_values() {
        let mut record = PatientRecord::new();
        record.set_race(Race::PacificIslander);
        let summary = record.to_string();
        assert!(summary.contains("Race: Pacific Islander"));
        assert!(summary.contains("Gender: Female"));
        assert_eq!(summary.lines().count(), 13);
    }
}
