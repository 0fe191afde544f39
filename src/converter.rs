//! Conversion of the numeric form fields between metric and imperial units.
//!
//! Conversions are pure: they take the current field text and return the text to display
//! afterwards. Every call rounds to the display precision of the field, so converting back
//! and forth accumulates rounding drift.

use crate::units::{UnitLabels, UnitSystem};
use crate::utils::precision::Precision;
use crate::utils::{ft_to_m, kmh_to_mph, m_to_ft, mph_to_kmh};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Altitude,
    CruiseSpeed,
    Spacing,
}

impl FieldKind {
    pub const ALL: [FieldKind; 3] = [FieldKind::Altitude, FieldKind::CruiseSpeed, FieldKind::Spacing];

    /// Name of the form field holding this value.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Altitude => "custom_alt",
            FieldKind::CruiseSpeed => "cruise_speed",
            FieldKind::Spacing => "spacing",
        }
    }

    /// Number of decimals the field is displayed with.
    pub fn decimals(self) -> u32 {
        match self {
            FieldKind::CruiseSpeed => 1,
            FieldKind::Altitude | FieldKind::Spacing => 0,
        }
    }

    pub fn label(self, system: UnitSystem) -> &'static str {
        let labels = system.labels();
        match self {
            FieldKind::CruiseSpeed => labels.speed,
            FieldKind::Altitude | FieldKind::Spacing => labels.distance,
        }
    }

    fn to_imperial(self, value: f64) -> f64 {
        match self {
            FieldKind::CruiseSpeed => kmh_to_mph(value),
            FieldKind::Altitude | FieldKind::Spacing => m_to_ft(value),
        }
    }

    fn to_metric(self, value: f64) -> f64 {
        match self {
            FieldKind::CruiseSpeed => mph_to_kmh(value),
            FieldKind::Altitude | FieldKind::Spacing => ft_to_m(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not a number")]
pub struct NotANumber;

/// Parse the text of a numeric field. Empty text yields `Ok(None)`.
pub fn parse_field(text: &str) -> Result<Option<f64>, NotANumber> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(NotANumber),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The field was empty and is left untouched.
    Empty,
    /// The field could not be parsed as a number and is left untouched.
    Invalid,
    Converted(String),
}

impl FieldOutcome {
    /// The text to display afterwards, given the text displayed before.
    pub fn resolve<'a>(&'a self, previous: &'a str) -> &'a str {
        match self {
            FieldOutcome::Converted(text) => text,
            FieldOutcome::Empty | FieldOutcome::Invalid => previous,
        }
    }
}

/// Current text of the numeric fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    pub altitude: String,
    pub cruise_speed: String,
    pub spacing: String,
}

impl FieldValues {
    pub fn get(&self, kind: FieldKind) -> &str {
        match kind {
            FieldKind::Altitude => &self.altitude,
            FieldKind::CruiseSpeed => &self.cruise_speed,
            FieldKind::Spacing => &self.spacing,
        }
    }

    pub fn get_mut(&mut self, kind: FieldKind) -> &mut String {
        match kind {
            FieldKind::Altitude => &mut self.altitude,
            FieldKind::CruiseSpeed => &mut self.cruise_speed,
            FieldKind::Spacing => &mut self.spacing,
        }
    }
}

/// Result of converting all numeric fields to `system`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub system: UnitSystem,
    pub altitude: FieldOutcome,
    pub cruise_speed: FieldOutcome,
    pub spacing: FieldOutcome,
}

impl Conversion {
    pub fn outcome(&self, kind: FieldKind) -> &FieldOutcome {
        match kind {
            FieldKind::Altitude => &self.altitude,
            FieldKind::CruiseSpeed => &self.cruise_speed,
            FieldKind::Spacing => &self.spacing,
        }
    }

    pub fn labels(&self) -> UnitLabels {
        self.system.labels()
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = FieldKind> + '_ {
        FieldKind::ALL
            .into_iter()
            .filter(|kind| *self.outcome(*kind) == FieldOutcome::Invalid)
    }

    /// The field values after applying this conversion to `previous`.
    pub fn apply(&self, previous: &FieldValues) -> FieldValues {
        let mut next = previous.clone();
        for kind in FieldKind::ALL {
            let text = self.outcome(kind).resolve(previous.get(kind)).to_string();
            *next.get_mut(kind) = text;
        }
        next
    }
}

/// Convert a single field from `from` to `to`.
pub fn convert_field(kind: FieldKind, text: &str, from: UnitSystem, to: UnitSystem) -> FieldOutcome {
    let value = match parse_field(text) {
        Ok(Some(value)) => value,
        Ok(None) => return FieldOutcome::Empty,
        Err(NotANumber) => {
            tracing::warn!(field = kind.name(), text, "leaving non-numeric field unchanged");
            return FieldOutcome::Invalid;
        }
    };

    let converted = match (from, to) {
        (UnitSystem::Metric, UnitSystem::Imperial) => kind.to_imperial(value),
        (UnitSystem::Imperial, UnitSystem::Metric) => kind.to_metric(value),
        // already in the target system, only normalize the display precision
        _ => value,
    };

    if !converted.max_precision(kind.decimals()).is_finite() {
        tracing::warn!(field = kind.name(), text, "leaving field unchanged, converted value out of range");
        return FieldOutcome::Invalid;
    }

    FieldOutcome::Converted(converted.to_fixed(kind.decimals()))
}

/// Convert all numeric fields from `from` to `to`.
#[tracing::instrument(level = "debug", skip(values))]
pub fn convert(values: &FieldValues, from: UnitSystem, to: UnitSystem) -> Conversion {
    Conversion {
        system: to,
        altitude: convert_field(FieldKind::Altitude, &values.altitude, from, to),
        cruise_speed: convert_field(FieldKind::CruiseSpeed, &values.cruise_speed, from, to),
        spacing: convert_field(FieldKind::Spacing, &values.spacing, from, to),
    }
}

pub fn to_imperial(values: &FieldValues) -> Conversion {
    convert(values, UnitSystem::Metric, UnitSystem::Imperial)
}

pub fn to_metric(values: &FieldValues) -> Conversion {
    convert(values, UnitSystem::Imperial, UnitSystem::Metric)
}
