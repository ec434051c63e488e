//! Application layer: the interface presentation layers call into.
//!
//! Converts raw user input into validated model calls and reports failures
//! in the two user-facing categories (unparsable input, invalid value).

mod calculator;
mod input;
pub mod pipe;

pub use calculator::CalculatorService;
pub use input::{InputError, PatientInput};
