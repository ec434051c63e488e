//! Raw calculator input as typed by a user, before conversion.
//!
//! Continuous values arrive as text and are parsed here; categorical values
//! arrive as option labels. Parse failures are reported separately from
//! values the model rejects, since the two get different user messages.

use serde::{Deserialize, Deserializer, Serialize};
use zeroize::Zeroize;

use crate::domain::{CategoricalVariable, ContinuousVariable, ModelError, MortalityModel};

const UNPARSABLE_MESSAGE: &str = "Ensure that all fields are filled and are filled properly. \
     Aside from dropdown menus, there should be no empty or string inputs!";

const INVALID_MESSAGE: &str = "Ensure that all fields have a valid entry!";

/// Errors converting raw input into model values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} is empty")]
    Empty { field: &'static str },

    #[error("{field}: \"{input}\" is not a valid {expected}")]
    Unparsable {
        field: &'static str,
        input: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Invalid(#[from] ModelError),
}

impl InputError {
    /// True for empty or non-numeric input, false for values the model rejected.
    #[must_use]
    pub fn is_unparsable(&self) -> bool {
        matches!(self, Self::Empty { .. } | Self::Unparsable { .. })
    }

    /// Short machine-readable kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        if self.is_unparsable() {
            "unparsable"
        } else {
            "invalid"
        }
    }

    /// Message shown to the user, including the specific reason.
    #[must_use]
    pub fn user_message(&self) -> String {
        let headline = if self.is_unparsable() {
            UNPARSABLE_MESSAGE
        } else {
            INVALID_MESSAGE
        };
        format!("{headline}\nERROR REASON: {self}")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
        Some(TextOrNumber::Text(s)) => s,
        Some(TextOrNumber::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

/// One patient's raw input.
///
/// Continuous fields hold text (empty when not entered). Categorical fields
/// hold an option label; `None` means the default option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatientInput {
    #[serde(default, deserialize_with = "text_or_number")]
    pub age: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub ais_severity: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub glasgow_coma_score: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub injury_severity_score: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub systolic_bp: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub pulse_rate: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub body_temperature: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub oxygen_saturation: String,

    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub supplemental_oxygen: Option<String>,
    #[serde(default)]
    pub drug_use: Option<String>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default)]
    pub injury_type: Option<String>,
}

impl PatientInput {
    #[must_use]
    pub fn continuous(&self, var: ContinuousVariable) -> &str {
        match var {
            ContinuousVariable::Age => &self.age,
            ContinuousVariable::AisSeverity => &self.ais_severity,
            ContinuousVariable::GlasgowComaScore => &self.glasgow_coma_score,
            ContinuousVariable::InjurySeverityScore => &self.injury_severity_score,
            ContinuousVariable::SystolicBp => &self.systolic_bp,
            ContinuousVariable::PulseRate => &self.pulse_rate,
            ContinuousVariable::BodyTemperature => &self.body_temperature,
            ContinuousVariable::OxygenSaturation => &self.oxygen_saturation,
        }
    }

    pub fn continuous_mut(&mut self, var: ContinuousVariable) -> &mut String {
        match var {
            ContinuousVariable::Age => &mut self.age,
            ContinuousVariable::AisSeverity => &mut self.ais_severity,
            ContinuousVariable::GlasgowComaScore => &mut self.glasgow_coma_score,
            ContinuousVariable::InjurySeverityScore => &mut self.injury_severity_score,
            ContinuousVariable::SystolicBp => &mut self.systolic_bp,
            ContinuousVariable::PulseRate => &mut self.pulse_rate,
            ContinuousVariable::BodyTemperature => &mut self.body_temperature,
            ContinuousVariable::OxygenSaturation => &mut self.oxygen_saturation,
        }
    }

    /// Selected option label, falling back to the default option.
    #[must_use]
    pub fn categorical(&self, var: CategoricalVariable) -> &str {
        let selected = match var {
            CategoricalVariable::Gender => &self.gender,
            CategoricalVariable::SupplementalOxygen => &self.supplemental_oxygen,
            CategoricalVariable::DrugUse => &self.drug_use,
            CategoricalVariable::Race => &self.race,
            CategoricalVariable::InjuryType => &self.injury_type,
        };
        selected.as_deref().unwrap_or(var.options()[0])
    }

    pub fn set_categorical(&mut self, var: CategoricalVariable, label: impl Into<String>) {
        let slot = match var {
            CategoricalVariable::Gender => &mut self.gender,
            CategoricalVariable::SupplementalOxygen => &mut self.supplemental_oxygen,
            CategoricalVariable::DrugUse => &mut self.drug_use,
            CategoricalVariable::Race => &mut self.race,
            CategoricalVariable::InjuryType => &mut self.injury_type,
        };
        *slot = Some(label.into());
    }

    /// Push every field into `model`, continuous fields first.
    ///
    /// Stops at the first failure. Fields applied before it keep their new
    /// values; the failing field keeps its previous value.
    ///
    /// # Errors
    /// `InputError::Empty`/`Unparsable` for text that is not a number of the
    /// right kind, `InputError::Invalid` for values the model rejects.
    pub fn apply_to(&self, model: &mut MortalityModel) -> Result<(), InputError> {
        for var in ContinuousVariable::ALL {
            apply_continuous(model, var, self.continuous(var))?;
        }
        for var in CategoricalVariable::ALL {
            model.set_category(var, self.categorical(var))?;
        }
        Ok(())
    }

    /// Wipe all text buffers and selections.
    pub fn clear_sensitive(&mut self) {
        for var in ContinuousVariable::ALL {
            self.continuous_mut(var).zeroize();
        }
        for selected in [
            &mut self.gender,
            &mut self.supplemental_oxygen,
            &mut self.drug_use,
            &mut self.race,
            &mut self.injury_type,
        ] {
            if let Some(label) = selected.as_mut() {
                label.zeroize();
            }
            *selected = None;
        }
    }
}

fn apply_continuous(
    model: &mut MortalityModel,
    var: ContinuousVariable,
    text: &str,
) -> Result<(), InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::Empty { field: var.label() });
    }

    let unparsable = |expected| InputError::Unparsable {
        field: var.label(),
        input: text.to_string(),
        expected,
    };

    let whole = || text.parse::<i32>().map_err(|_| unparsable("whole number"));
    let real = || text.parse::<f64>().map_err(|_| unparsable("number"));

    match var {
        ContinuousVariable::Age => model.set_age(real()?)?,
        ContinuousVariable::AisSeverity => model.set_ais_severity(whole()?)?,
        ContinuousVariable::GlasgowComaScore => model.set_glasgow_coma_score(whole()?)?,
        ContinuousVariable::InjurySeverityScore => model.set_injury_severity_score(whole()?)?,
        ContinuousVariable::SystolicBp => model.set_systolic_bp(real()?)?,
        ContinuousVariable::PulseRate => model.set_pulse_rate(real()?)?,
        ContinuousVariable::BodyTemperature => model.set_body_temperature(real()?)?,
        ContinuousVariable::OxygenSaturation => model.set_oxygen_saturation(real()?)?,
    }
    Ok(())
}
