//! # TBI Mortality
//!
//! Mortality risk calculator for pediatric traumatic brain injury.
//!
//! A fixed logistic regression model turns 13 clinical variables into an
//! estimated probability of mortality. The crate provides:
//! - The validated model and its patient record
//! - A calculator service that converts raw user input into model calls
//! - A terminal form and a JSON pipe mode as presentation layers
//!
//! ## Architecture
//!
//! - `domain`: Patient variables, indicator encoding, the model itself
//! - `application`: Input conversion, calculator service, pipe mode
//! - `adapters`: Log sanitization for `tracing`
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod tui;

pub use application::{CalculatorService, InputError, PatientInput};
pub use domain::{ModelError, MortalityEstimate, MortalityModel, PatientRecord};

/// Result type for calculator operations
pub type Result<T> = std::result::Result<T, TbiError>;

/// Main error type for the calculator
#[derive(Debug, thiserror::Error)]
pub enum TbiError {
    #[error("Invalid model value: {0}")]
    Model(#[from] ModelError),

    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
