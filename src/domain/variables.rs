//! Variable metadata: display labels, canonical order and valid ranges.
//!
//! Canonical display order lists the categorical variables first, then the
//! continuous ones. Category option order matches `Category::LABELS`.

use super::category::{Category, DrugUse, Gender, InjuryType, Race, SupplementalOxygen};
use super::error::{Bound, ModelError};

/// Total number of model variables.
pub const NUM_VARIABLES: usize = 13;

/// Number of continuous variables.
pub const NUM_CONTINUOUS_VARIABLES: usize = 8;

/// Number of categorical variables.
pub const NUM_CATEGORICAL_VARIABLES: usize = 5;

/// Categorical variables in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoricalVariable {
    Gender,
    SupplementalOxygen,
    DrugUse,
    Race,
    InjuryType,
}

impl CategoricalVariable {
    pub const ALL: [Self; NUM_CATEGORICAL_VARIABLES] = [
        Self::Gender,
        Self::SupplementalOxygen,
        Self::DrugUse,
        Self::Race,
        Self::InjuryType,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Gender => Gender::FIELD,
            Self::SupplementalOxygen => SupplementalOxygen::FIELD,
            Self::DrugUse => DrugUse::FIELD,
            Self::Race => Race::FIELD,
            Self::InjuryType => InjuryType::FIELD,
        }
    }

    /// Allowed option labels in declared order.
    #[must_use]
    pub fn options(self) -> &'static [&'static str] {
        match self {
            Self::Gender => Gender::LABELS,
            Self::SupplementalOxygen => SupplementalOxygen::LABELS,
            Self::DrugUse => DrugUse::LABELS,
            Self::Race => Race::LABELS,
            Self::InjuryType => InjuryType::LABELS,
        }
    }

    /// Look up by position in `ALL`.
    ///
    /// # Errors
    /// Returns `ModelError::IndexOutOfRange` if `index >= 5`.
    pub fn from_index(index: usize) -> Result<Self, ModelError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ModelError::IndexOutOfRange {
                index,
                len: NUM_CATEGORICAL_VARIABLES,
            })
    }
}

/// Whether a continuous variable is recorded as an integer score or a real
/// measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Real,
}

/// Inclusive valid range of a continuous variable. `max` is `None` for
/// variables bounded only below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl ValidRange {
    const fn between(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    const fn at_least(min: f64) -> Self {
        Self { min, max: None }
    }

    /// Returns the violated bound, if any.
    #[must_use]
    pub fn violation(&self, value: f64) -> Option<Bound> {
        if !value.is_finite() {
            return Some(Bound::Finite);
        }
        if value < self.min {
            return Some(Bound::Min(self.min));
        }
        match self.max {
            Some(max) if value > max => Some(Bound::Max(max)),
            _ => None,
        }
    }
}

/// Continuous variables in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuousVariable {
    Age,
    AisSeverity,
    GlasgowComaScore,
    InjurySeverityScore,
    SystolicBp,
    PulseRate,
    BodyTemperature,
    OxygenSaturation,
}

impl ContinuousVariable {
    pub const ALL: [Self; NUM_CONTINUOUS_VARIABLES] = [
        Self::Age,
        Self::AisSeverity,
        Self::GlasgowComaScore,
        Self::InjurySeverityScore,
        Self::SystolicBp,
        Self::PulseRate,
        Self::BodyTemperature,
        Self::OxygenSaturation,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::AisSeverity => "AIS Severity",
            Self::GlasgowComaScore => "Glasgow Coma Score",
            Self::InjurySeverityScore => "Injury Severity Score",
            Self::SystolicBp => "Systolic Blood Pressure",
            Self::PulseRate => "Pulse Rate",
            Self::BodyTemperature => "Body Temperature",
            Self::OxygenSaturation => "Blood Oxygen Saturation",
        }
    }

    /// Input hint shown next to an empty field.
    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            Self::Age => "years (0-14)",
            Self::AisSeverity => "head AIS (1-6)",
            Self::GlasgowComaScore => "GCS (3-15)",
            Self::InjurySeverityScore => "ISS (3-75)",
            Self::SystolicBp => "mmHg (>= 0)",
            Self::PulseRate => "beats/min (>= 0)",
            Self::BodyTemperature => "Celsius (>= 0)",
            Self::OxygenSaturation => "% (0-100)",
        }
    }

    #[must_use]
    pub fn kind(self) -> ValueKind {
        match self {
            Self::AisSeverity | Self::GlasgowComaScore | Self::InjurySeverityScore => {
                ValueKind::Integer
            }
            _ => ValueKind::Real,
        }
    }

    #[must_use]
    pub fn range(self) -> ValidRange {
        match self {
            Self::Age => ValidRange::between(0.0, 14.0),
            Self::AisSeverity => ValidRange::between(1.0, 6.0),
            Self::GlasgowComaScore => ValidRange::between(3.0, 15.0),
            Self::InjurySeverityScore => ValidRange::between(3.0, 75.0),
            Self::SystolicBp | Self::PulseRate | Self::BodyTemperature => {
                ValidRange::at_least(0.0)
            }
            Self::OxygenSaturation => ValidRange::between(0.0, 100.0),
        }
    }

    /// Check `value` against this variable's range.
    ///
    /// # Errors
    /// Returns `ModelError::OutOfRange` naming the violated bound.
    pub fn validate(self, value: f64) -> Result<(), ModelError> {
        match self.range().violation(value) {
            Some(bound) => Err(ModelError::OutOfRange {
                field: self.label(),
                value,
                bound,
            }),
            None => Ok(()),
        }
    }
}

/// Any model variable, in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Categorical(CategoricalVariable),
    Continuous(ContinuousVariable),
}

impl Variable {
    /// Look up by canonical display index.
    ///
    /// # Errors
    /// Returns `ModelError::IndexOutOfRange` if `index >= 13`.
    pub fn from_index(index: usize) -> Result<Self, ModelError> {
        if index < NUM_CATEGORICAL_VARIABLES {
            Ok(Self::Categorical(CategoricalVariable::ALL[index]))
        } else if index < NUM_VARIABLES {
            Ok(Self::Continuous(
                ContinuousVariable::ALL[index - NUM_CATEGORICAL_VARIABLES],
            ))
        } else {
            Err(ModelError::IndexOutOfRange {
                index,
                len: NUM_VARIABLES,
            })
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Categorical(v) => v.label(),
            Self::Continuous(v) => v.label(),
        }
    }
}
