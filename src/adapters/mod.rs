//! Adapters layer: integration with external libraries.
//!
//! - `sanitize`: patient-data filtering for `tracing` output

pub mod sanitize;
