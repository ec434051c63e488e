//! Pre-fit logistic regression for pediatric TBI mortality.
//!
//! `MortalityModel` owns one `PatientRecord` and exposes the calculator
//! operations: validated setters, getters, variable metadata and the
//! probability computation. The coefficients are fixed.

use serde::{Deserialize, Serialize};

use super::category::{
    Category, DrugUse, Gender, InjuryType, Race, SupplementalOxygen,
};
use super::error::ModelError;
use super::patient::PatientRecord;
use super::variables::{
    CategoricalVariable, Variable, NUM_CATEGORICAL_VARIABLES, NUM_CONTINUOUS_VARIABLES,
    NUM_VARIABLES,
};

pub const INTERCEPT: f64 = 12.7459826;
pub const AGE_COEF: f64 = -0.0414436;
pub const AIS_SEVERITY_COEF: f64 = 0.4008520;
pub const GENDER_COEF: f64 = 0.1857815;
pub const DRUG_USE_COEF: f64 = 0.5589011;
pub const ISS_COEF: f64 = 0.1006756;
pub const SBP_COEF: f64 = -0.0135510;
pub const PULSE_COEF: f64 = -0.0018600;
pub const OXY_SAT_COEF: f64 = -0.0272553;
pub const BODY_TEMP_COEF: f64 = -0.2532920;
pub const SUPP_OXY_COEF: f64 = 0.4832936;
pub const GCS_COEF: f64 = -0.3682123;
pub const WHITE_COEF: f64 = 0.3658753;
pub const AMER_IND_COEF: f64 = 0.4280905;
pub const ASIAN_COEF: f64 = -0.3194037;
pub const PAC_ISLNDR_COEF: f64 = 0.2007908;
pub const OTHER_RACE_COEF: f64 = 0.1966492;
pub const OTHER_INJ_COEF: f64 = 1.0684514;
pub const PEN_INJ_COEF: f64 = 2.3975298;

/// Linear predictor (log-odds of mortality) for a record.
///
/// The Pacific Islander term is additive: the published model applies
/// `indicator + coefficient`, so `PAC_ISLNDR_COEF` shifts every patient and a
/// Pacific Islander patient gains a further 1.0. Changing this changes every
/// prediction.
#[must_use]
pub fn linear_predictor(record: &PatientRecord) -> f64 {
    let ind = record.indicators();
    let race = ind.race;

    INTERCEPT
        + AGE_COEF * record.age()
        + AIS_SEVERITY_COEF * f64::from(record.ais_severity())
        + GCS_COEF * f64::from(record.glasgow_coma_score())
        + ISS_COEF * f64::from(record.injury_severity_score())
        + SBP_COEF * record.systolic_bp()
        + PULSE_COEF * record.pulse_rate()
        + BODY_TEMP_COEF * record.body_temperature()
        + OXY_SAT_COEF * record.oxygen_saturation()
        + GENDER_COEF * f64::from(ind.is_male)
        + DRUG_USE_COEF * f64::from(ind.uses_drug)
        + ASIAN_COEF * f64::from(race.asian)
        + AMER_IND_COEF * f64::from(race.american_indian)
        + WHITE_COEF * f64::from(race.white)
        + OTHER_RACE_COEF * f64::from(race.other)
        + f64::from(race.pacific_islander)
        + PAC_ISLNDR_COEF
        + SUPP_OXY_COEF * f64::from(ind.uses_supp_oxy)
        + OTHER_INJ_COEF * f64::from(ind.injury.other)
        + PEN_INJ_COEF * f64::from(ind.injury.penetrating)
}

/// Logistic link.
#[must_use]
pub fn logistic(linear: f64) -> f64 {
    1.0 / (1.0 + (-linear).exp())
}

/// Result of one computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortalityEstimate {
    /// Probability of mortality in (0, 1)
    pub probability: f64,

    /// Log-odds the probability was derived from
    pub linear_predictor: f64,

    /// When the estimate was computed
    pub computed_at: chrono::DateTime<chrono::Utc>,
}

impl MortalityEstimate {
    #[must_use]
    pub fn from_record(record: &PatientRecord) -> Self {
        let linear_predictor = linear_predictor(record);
        Self {
            probability: logistic(linear_predictor),
            linear_predictor,
            computed_at: chrono::Utc::now(),
        }
    }

    /// Probability as a percentage.
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.probability * 100.0
    }
}

/// The mortality calculator for a single patient.
///
/// Construct one per session; nothing is shared between instances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MortalityModel {
    record: PatientRecord,
}

impl MortalityModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all entered values and start from defaults.
    pub fn reset(&mut self) {
        self.record = PatientRecord::new();
    }

    /// Current patient values.
    #[must_use]
    pub fn record(&self) -> &PatientRecord {
        &self.record
    }

    // === Metadata ===

    #[must_use]
    pub const fn variable_count(&self) -> usize {
        NUM_VARIABLES
    }

    #[must_use]
    pub const fn continuous_variable_count(&self) -> usize {
        NUM_CONTINUOUS_VARIABLES
    }

    #[must_use]
    pub const fn categorical_variable_count(&self) -> usize {
        NUM_CATEGORICAL_VARIABLES
    }

    /// Display label of the variable at `index` in canonical order.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `index >= 13`.
    pub fn variable_name(&self, index: usize) -> Result<&'static str, ModelError> {
        Variable::from_index(index).map(Variable::label)
    }

    /// Option labels of categorical variable `index`.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `index >= 5`.
    pub fn category_options(&self, index: usize) -> Result<&'static [&'static str], ModelError> {
        CategoricalVariable::from_index(index).map(CategoricalVariable::options)
    }

    // === Continuous variables ===

    /// # Errors
    /// `OutOfRange` unless `0 <= value <= 14`.
    pub fn set_age(&mut self, value: f64) -> Result<(), ModelError> {
        self.record.set_age(value)
    }

    /// # Errors
    /// `OutOfRange` unless `1 <= value <= 6`.
    pub fn set_ais_severity(&mut self, value: i32) -> Result<(), ModelError> {
        self.record.set_ais_severity(value)
    }

    /// # Errors
    /// `OutOfRange` unless `3 <= value <= 15`.
    pub fn set_glasgow_coma_score(&mut self, value: i32) -> Result<(), ModelError> {
        self.record.set_glasgow_coma_score(value)
    }

    /// # Errors
    /// `OutOfRange` unless `3 <= value <= 75`.
    pub fn set_injury_severity_score(&mut self, value: i32) -> Result<(), ModelError> {
        self.record.set_injury_severity_score(value)
    }

    /// # Errors
    /// `OutOfRange` if negative or not finite.
    pub fn set_systolic_bp(&mut self, value: f64) -> Result<(), ModelError> {
        self.record.set_systolic_bp(value)
    }

    /// # Errors
    /// `OutOfRange` if negative or not finite.
    pub fn set_pulse_rate(&mut self, value: f64) -> Result<(), ModelError> {
        self.record.set_pulse_rate(value)
    }

    /// # Errors
    /// `OutOfRange` if negative or not finite.
    pub fn set_body_temperature(&mut self, value: f64) -> Result<(), ModelError> {
        self.record.set_body_temperature(value)
    }

    /// # Errors
    /// `OutOfRange` unless `0 <= value <= 100`.
    pub fn set_oxygen_saturation(&mut self, value: f64) -> Result<(), ModelError> {
        self.record.set_oxygen_saturation(value)
    }

    #[must_use]
    pub fn age(&self) -> f64 {
        self.record.age()
    }

    #[must_use]
    pub fn ais_severity(&self) -> i32 {
        self.record.ais_severity()
    }

    #[must_use]
    pub fn glasgow_coma_score(&self) -> i32 {
        self.record.glasgow_coma_score()
    }

    #[must_use]
    pub fn injury_severity_score(&self) -> i32 {
        self.record.injury_severity_score()
    }

    #[must_use]
    pub fn systolic_bp(&self) -> f64 {
        self.record.systolic_bp()
    }

    #[must_use]
    pub fn pulse_rate(&self) -> f64 {
        self.record.pulse_rate()
    }

    #[must_use]
    pub fn body_temperature(&self) -> f64 {
        self.record.body_temperature()
    }

    #[must_use]
    pub fn oxygen_saturation(&self) -> f64 {
        self.record.oxygen_saturation()
    }

    // === Categorical variables (by option label) ===

    /// # Errors
    /// `InvalidCategory` unless `value` is "Female" or "Male".
    pub fn set_gender(&mut self, value: &str) -> Result<(), ModelError> {
        self.record.set_gender(Gender::parse(value)?);
        Ok(())
    }

    /// # Errors
    /// `InvalidCategory` unless `value` is "No" or "Yes".
    pub fn set_supplemental_oxygen(&mut self, value: &str) -> Result<(), ModelError> {
        self.record
            .set_supplemental_oxygen(SupplementalOxygen::parse(value)?);
        Ok(())
    }

    /// # Errors
    /// `InvalidCategory` unless `value` is "No" or "Yes".
    pub fn set_drug_use(&mut self, value: &str) -> Result<(), ModelError> {
        self.record.set_drug_use(DrugUse::parse(value)?);
        Ok(())
    }

    /// # Errors
    /// `InvalidCategory` unless `value` is one of the six race labels.
    pub fn set_race(&mut self, value: &str) -> Result<(), ModelError> {
        self.record.set_race(Race::parse(value)?);
        Ok(())
    }

    /// # Errors
    /// `InvalidCategory` unless `value` is "Blunt", "Penetrating" or "Other".
    pub fn set_injury_type(&mut self, value: &str) -> Result<(), ModelError> {
        self.record.set_injury_type(InjuryType::parse(value)?);
        Ok(())
    }

    /// Set a categorical variable by descriptor.
    ///
    /// # Errors
    /// `InvalidCategory` if `value` is not an option of `variable`.
    pub fn set_category(
        &mut self,
        variable: CategoricalVariable,
        value: &str,
    ) -> Result<(), ModelError> {
        match variable {
            CategoricalVariable::Gender => self.set_gender(value),
            CategoricalVariable::SupplementalOxygen => self.set_supplemental_oxygen(value),
            CategoricalVariable::DrugUse => self.set_drug_use(value),
            CategoricalVariable::Race => self.set_race(value),
            CategoricalVariable::InjuryType => self.set_injury_type(value),
        }
    }

    #[must_use]
    pub fn gender(&self) -> &'static str {
        self.record.gender().label()
    }

    #[must_use]
    pub fn supplemental_oxygen(&self) -> &'static str {
        self.record.supplemental_oxygen().label()
    }

    #[must_use]
    pub fn drug_use(&self) -> &'static str {
        self.record.drug_use().label()
    }

    #[must_use]
    pub fn race(&self) -> &'static str {
        self.record.race().label()
    }

    #[must_use]
    pub fn injury_type(&self) -> &'static str {
        self.record.injury_type().label()
    }

    // === Computation ===

    /// Probability of mortality for the current values.
    ///
    /// Strictly inside (0, 1) for clinically plausible values. The open-ended
    /// ranges (blood pressure, pulse, temperature) accept any finite value, and
    /// an extreme one drives the log-odds past what `f64` can carry, so the
    /// result saturates to exactly 0.0 or 1.0. `systolic_bp = 1e5` gives 0.0.
    #[must_use]
    pub fn compute_mortality_probability(&self) -> f64 {
        logistic(linear_predictor(&self.record))
    }

    /// Probability plus the linear predictor and a timestamp.
    #[must_use]
    pub fn estimate(&self) -> MortalityEstimate {
        MortalityEstimate::from_record(&self.record)
    }
}
