//! Categorical patient variables and their indicator encodings.
//!
//! Each variable is a closed enumeration. The first declared option is the
//! default and the regression baseline: it encodes to all-zero indicators.

use std::fmt;
use std::str::FromStr;

use super::error::ModelError;

/// Common behaviour of the five categorical variables.
pub trait Category: Copy + Eq + Default + fmt::Debug + 'static {
    /// Display name of the variable, used in error messages.
    const FIELD: &'static str;

    /// Every option, in declared order.
    const VARIANTS: &'static [Self];

    /// Labels of `VARIANTS`, same order.
    const LABELS: &'static [&'static str];

    /// Display label of this option.
    fn label(self) -> &'static str;

    /// Parse an exact option label.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidCategory` if `label` is not one of `LABELS`.
    fn parse(label: &str) -> Result<Self, ModelError> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|v| v.label() == label)
            .ok_or_else(|| ModelError::InvalidCategory {
                field: Self::FIELD,
                value: label.to_string(),
                allowed: Self::LABELS,
            })
    }
}

macro_rules! category_traits {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl FromStr for $ty {
                type Err = ModelError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as Category>::parse(s)
                }
            }
        )*
    };
}

/// Patient gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    Female,
    Male,
}

impl Gender {
    /// `isMale` indicator.
    #[must_use]
    pub const fn is_male(self) -> u8 {
        match self {
            Self::Female => 0,
            Self::Male => 1,
        }
    }
}

impl Category for Gender {
    const FIELD: &'static str = "Gender";
    const VARIANTS: &'static [Self] = &[Self::Female, Self::Male];
    const LABELS: &'static [&'static str] = &["Female", "Male"];

    fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }
}

/// Whether the patient received supplemental oxygen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupplementalOxygen {
    #[default]
    No,
    Yes,
}

impl SupplementalOxygen {
    /// `usesSuppOxy` indicator.
    #[must_use]
    pub const fn indicator(self) -> u8 {
        match self {
            Self::No => 0,
            Self::Yes => 1,
        }
    }
}

impl Category for SupplementalOxygen {
    const FIELD: &'static str = "Supplemental Oxygen";
    const VARIANTS: &'static [Self] = &[Self::No, Self::Yes];
    const LABELS: &'static [&'static str] = &["No", "Yes"];

    fn label(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }
}

/// Whether drug use was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrugUse {
    #[default]
    No,
    Yes,
}

impl DrugUse {
    /// `usesDrug` indicator.
    #[must_use]
    pub const fn indicator(self) -> u8 {
        match self {
            Self::No => 0,
            Self::Yes => 1,
        }
    }
}

impl Category for DrugUse {
    const FIELD: &'static str = "Drug Use";
    const VARIANTS: &'static [Self] = &[Self::No, Self::Yes];
    const LABELS: &'static [&'static str] = &["No", "Yes"];

    fn label(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }
}

/// Patient race. African American is the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Race {
    #[default]
    AfricanAmerican,
    White,
    AmericanIndian,
    Asian,
    PacificIslander,
    Other,
}

/// One-hot race encoding relative to the African American baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RaceIndicators {
    pub white: u8,
    pub american_indian: u8,
    pub asian: u8,
    pub pacific_islander: u8,
    pub other: u8,
}

impl Race {
    /// Indicator set for this option.
    #[must_use]
    pub const fn indicators(self) -> RaceIndicators {
        // (white, american indian, asian, pacific islander, other)
        let (white, american_indian, asian, pacific_islander, other) = match self {
            Self::AfricanAmerican => (0, 0, 0, 0, 0),
            Self::White => (1, 0, 0, 0, 0),
            Self::AmericanIndian => (0, 1, 0, 0, 0),
            Self::Asian => (0, 0, 1, 0, 0),
            Self::PacificIslander => (0, 0, 0, 1, 0),
            Self::Other => (0, 0, 0, 0, 1),
        };
        RaceIndicators {
            white,
            american_indian,
            asian,
            pacific_islander,
            other,
        }
    }
}

impl Category for Race {
    const FIELD: &'static str = "Race";
    const VARIANTS: &'static [Self] = &[
        Self::AfricanAmerican,
        Self::White,
        Self::AmericanIndian,
        Self::Asian,
        Self::PacificIslander,
        Self::Other,
    ];
    const LABELS: &'static [&'static str] = &[
        "African American",
        "White",
        "American Indian",
        "Asian",
        "Pacific Islander",
        "Other",
    ];

    fn label(self) -> &'static str {
        match self {
            Self::AfricanAmerican => "African American",
            Self::White => "White",
            Self::AmericanIndian => "American Indian",
            Self::Asian => "Asian",
            Self::PacificIslander => "Pacific Islander",
            Self::Other => "Other",
        }
    }
}

/// Mechanism of injury. Blunt is the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InjuryType {
    #[default]
    Blunt,
    Penetrating,
    Other,
}

/// One-hot injury encoding relative to the blunt baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InjuryIndicators {
    pub penetrating: u8,
    pub other: u8,
}

impl InjuryType {
    /// Indicator set for this option.
    #[must_use]
    pub const fn indicators(self) -> InjuryIndicators {
        let (penetrating, other) = match self {
            Self::Blunt => (0, 0),
            Self::Penetrating => (1, 0),
            Self::Other => (0, 1),
        };
        InjuryIndicators { penetrating, other }
    }
}

impl Category for InjuryType {
    const FIELD: &'static str = "Type of Injury";
    const VARIANTS: &'static [Self] = &[Self::Blunt, Self::Penetrating, Self::Other];
    const LABELS: &'static [&'static str] = &["Blunt", "Penetrating", "Other"];

    fn label(self) -> &'static str {
        match self {
            Self::Blunt => "Blunt",
            Self::Penetrating => "Penetrating",
            Self::Other => "Other",
        }
    }
}

category_traits!(Gender, SupplementalOxygen, DrugUse, Race, InjuryType);
