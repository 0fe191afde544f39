use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

/// Label strings rendered next to the form fields for a unit system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitLabels {
    pub distance: &'static str,
    pub speed: &'static str,
    /// Value of the hidden `unit_system` field.
    pub system: &'static str,
}

impl UnitSystem {
    /// The unit system selected by the toggle (checked means imperial).
    pub fn from_toggle(checked: bool) -> Self {
        if checked {
            UnitSystem::Imperial
        } else {
            UnitSystem::Metric
        }
    }

    pub fn is_imperial(self) -> bool {
        self == UnitSystem::Imperial
    }

    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub fn labels(self) -> UnitLabels {
        match self {
            UnitSystem::Metric => UnitLabels {
                distance: "m",
                speed: "km/h",
                system: self.as_str(),
            },
            UnitSystem::Imperial => UnitLabels {
                distance: "ft",
                speed: "mph",
                system: self.as_str(),
            },
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown unit system `{0}` (expected `metric` or `imperial`)")]
pub struct ParseUnitSystemError(String);

impl FromStr for UnitSystem {
    type Err = ParseUnitSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("metric") => Ok(UnitSystem::Metric),
            s if s.eq_ignore_ascii_case("imperial") => Ok(UnitSystem::Imperial),
            other => Err(ParseUnitSystemError(other.to_string())),
        }
    }
}
