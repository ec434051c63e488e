//! Domain layer: the mortality model and its patient variables.
//!
//! Pure Rust types with no I/O and no logging. All validation happens here;
//! a value that reaches the computation is always in range.

mod category;
mod error;
mod model;
mod patient;
mod variables;

pub use category::{
    Category, DrugUse, Gender, InjuryIndicators, InjuryType, Race, RaceIndicators,
    SupplementalOxygen,
};
pub use error::{Bound, ModelError};
pub use model::{linear_predictor, logistic, MortalityEstimate, MortalityModel};
pub use patient::PatientRecord;
pub use variables::{
    CategoricalVariable, ContinuousVariable, ValidRange, ValueKind, Variable,
    NUM_CATEGORICAL_VARIABLES, NUM_CONTINUOUS_VARIABLES, NUM_VARIABLES,
};

/// Fixed regression coefficients.
pub mod coefficients {
    pub use super::model::{
        AGE_COEF, AIS_SEVERITY_COEF, AMER_IND_COEF, ASIAN_COEF, BODY_TEMP_COEF, DRUG_USE_COEF,
        GCS_COEF, GENDER_COEF, INTERCEPT, ISS_COEF, OTHER_INJ_COEF, OTHER_RACE_COEF,
        OXY_SAT_COEF, PAC_ISLNDR_COEF, PEN_INJ_COEF, PULSE_COEF, SBP_COEF, SUPP_OXY_COEF,
        WHITE_COEF,
    };
}
