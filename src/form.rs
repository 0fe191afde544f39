use std::path::Path;

use serde::Deserialize;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::converter::{self, Conversion, FieldKind, FieldValues};
use crate::units::UnitSystem;
use crate::utils::{ft_to_m, mph_to_kmh};

pub const MISSION_EXTENSION: &str = ".mission";
pub const DEFAULT_CRUISE_SPEED: &str = "25.0";
pub const DEFAULT_SPACING: &str = "100";
pub const DEFAULT_MAX_WAYPOINTS: &str = "100";

/// Values the form starts with and is reset to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefaults {
    pub mission_name: String,
    pub cruise_speed: String,
    pub spacing: String,
    pub max_waypoints: String,
}

/// Overrides for [`FormDefaults`] as read from a JSON file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DefaultsFile {
    mission_name: Option<String>,
    cruise_speed: Option<f64>,
    spacing: Option<u32>,
    max_waypoints: Option<u32>,
}

impl FormDefaults {
    /// Defaults for a form created at `now`.
    pub fn at(now: OffsetDateTime) -> Result<Self, crate::error::Error> {
        Ok(Self {
            mission_name: default_mission_name(now)?,
            cruise_speed: DEFAULT_CRUISE_SPEED.to_string(),
            spacing: DEFAULT_SPACING.to_string(),
            max_waypoints: DEFAULT_MAX_WAYPOINTS.to_string(),
        })
    }

    pub fn from_json(json: &[u8], now: OffsetDateTime) -> Result<Self, crate::error::Error> {
        let file: DefaultsFile = serde_json::from_slice(json)?;
        let mut defaults = Self::at(now)?;
        if let Some(name) = file.mission_name.filter(|name| !name.trim().is_empty()) {
            defaults.mission_name = name;
        }
        if let Some(speed) = file.cruise_speed {
            defaults.cruise_speed = format!("{:.1}", speed);
        }
        if let Some(spacing) = file.spacing {
            defaults.spacing = spacing.to_string();
        }
        if let Some(max) = file.max_waypoints {
            defaults.max_waypoints = max.to_string();
        }
        Ok(defaults)
    }

    /// Load defaults from an optional JSON file.
    pub fn load(path: Option<&Path>, now: OffsetDateTime) -> Result<Self, crate::error::Error> {
        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading form defaults");
                Self::from_json(&std::fs::read(path)?, now)
            }
            None => Self::at(now),
        }
    }
}

/// `mission_<yyMMdd_HHmm>`
pub fn default_mission_name(now: OffsetDateTime) -> Result<String, crate::error::Error> {
    let stamp =
        now.format(format_description!("[year repr:last_two][month][day]_[hour][minute]"))?;
    Ok(format!("mission_{}", stamp))
}

/// File name shown to the user (and used for the generated mission): the trimmed mission
/// name, or `default_name` if empty, with a `.mission` extension.
pub fn display_filename(mission_name: &str, default_name: &str) -> String {
    let name = match mission_name.trim() {
        "" => default_name.trim(),
        name => name,
    };
    if name.to_ascii_lowercase().ends_with(MISSION_EXTENSION) {
        name.to_string()
    } else {
        format!("{}{}", name, MISSION_EXTENSION)
    }
}

/// State of the mission form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionFormState {
    pub mission_name: String,
    pub cruise_speed: String,
    pub spacing: String,
    pub custom_alt: String,
    pub max_waypoints: String,
    pub unit_system: UnitSystem,
}

/// Validated form values, always in metric units.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionParams {
    pub filename: String,
    pub cruise_speed_kmh: f64,
    pub spacing_m: f64,
    pub max_waypoints: usize,
    /// Overrides the logged altitude of every waypoint.
    pub altitude_m: Option<f64>,
}

impl MissionFormState {
    pub fn new(defaults: &FormDefaults) -> Self {
        Self {
            mission_name: defaults.mission_name.clone(),
            cruise_speed: defaults.cruise_speed.clone(),
            spacing: defaults.spacing.clone(),
            custom_alt: String::new(),
            max_waypoints: defaults.max_waypoints.clone(),
            unit_system: UnitSystem::Metric,
        }
    }

    pub fn reset(&mut self, defaults: &FormDefaults) {
        *self = Self::new(defaults);
    }

    pub fn field_values(&self) -> FieldValues {
        FieldValues {
            altitude: self.custom_alt.clone(),
            cruise_speed: self.cruise_speed.clone(),
            spacing: self.spacing.clone(),
        }
    }

    pub fn set_field_values(&mut self, values: FieldValues) {
        self.custom_alt = values.altitude;
        self.cruise_speed = values.cruise_speed;
        self.spacing = values.spacing;
    }

    /// Switch to `target`, converting the numeric fields from the current unit system.
    pub fn set_unit_system(&mut self, target: UnitSystem) -> Conversion {
        let values = self.field_values();
        let conversion = converter::convert(&values, self.unit_system, target);
        self.set_field_values(conversion.apply(&values));
        self.unit_system = target;
        conversion
    }

    pub fn display_filename(&self, default_name: &str) -> String {
        display_filename(&self.mission_name, default_name)
    }

    /// Parse and normalize the form to metric mission parameters.
    pub fn mission_params(&self, default_name: &str) -> Result<MissionParams, crate::error::Error> {
        let imperial = self.unit_system.is_imperial();

        let cruise_speed = required(FieldKind::CruiseSpeed.name(), &self.cruise_speed)?;
        let spacing = required(FieldKind::Spacing.name(), &self.spacing)?;
        let altitude = optional(FieldKind::Altitude.name(), &self.custom_alt)?;
        let max_waypoints = self
            .max_waypoints
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid("max_wps", &self.max_waypoints))?;

        let (cruise_speed_kmh, spacing_m, altitude_m) = if imperial {
            (mph_to_kmh(cruise_speed), ft_to_m(spacing), altitude.map(ft_to_m))
        } else {
            (cruise_speed, spacing, altitude)
        };
        if spacing_m <= 0.0 {
            return Err(invalid(FieldKind::Spacing.name(), &self.spacing));
        }

        Ok(MissionParams {
            filename: self.display_filename(default_name),
            cruise_speed_kmh,
            spacing_m,
            max_waypoints,
            altitude_m,
        })
    }
}

fn invalid(field: &'static str, value: &str) -> crate::error::Error {
    crate::error::Error::InvalidField {
        field,
        value: value.to_string(),
    }
}

fn optional(field: &'static str, text: &str) -> Result<Option<f64>, crate::error::Error> {
    converter::parse_field(text).map_err(|_| invalid(field, text))
}

fn required(field: &'static str, text: &str) -> Result<f64, crate::error::Error> {
    optional(field, text)?.ok_or_else(|| invalid(field, text))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use time::macros::datetime;

    use super::*;

    fn defaults() -> FormDefaults {
        FormDefaults::at(datetime!(2025-09-13 14:05 -4)).unwrap()
    }

    #[test]
    fn default_name_from_timestamp() {
        assert_eq!(defaults().mission_name, "mission_250913_1405");
    }

    #[test]
    fn empty_name_uses_default() {
        assert_eq!(display_filename("", "mission_250913_1405"), "mission_250913_1405.mission");
        assert_eq!(display_filename("   ", "fallback"), "fallback.mission");
    }

    #[test]
    fn existing_extension_is_kept() {
        assert_eq!(display_filename("Alpha.mission", "x"), "Alpha.mission");
        assert_eq!(display_filename("Alpha.MISSION", "x"), "Alpha.MISSION");
        assert_eq!(display_filename(" Alpha ", "x"), "Alpha.mission");
    }

    #[test]
    fn reset_restores_defaults() {
        let defaults = defaults();
        let mut form = MissionFormState::new(&defaults);
        form.mission_name = "Alpha".into();
        form.custom_alt = "120".into();
        form.set_unit_system(UnitSystem::Imperial);
        form.spacing = "5".into();

        form.reset(&defaults);
        assert_eq!(form.cruise_speed, "25.0");
        assert_eq!(form.spacing, "100");
        assert_eq!(form.custom_alt, "");
        assert_eq!(form.max_waypoints, "100");
        assert_eq!(form.mission_name, "mission_250913_1405");
        assert_eq!(form.unit_system, UnitSystem::Metric);
    }

    #[test]
    fn toggling_converts_fields() {
        let mut form = MissionFormState::new(&defaults());
        form.set_unit_system(UnitSystem::Imperial);
        assert_eq!(form.cruise_speed, "15.5");
        assert_eq!(form.spacing, "328");
        assert_eq!(form.custom_alt, "");

        form.set_unit_system(UnitSystem::Metric);
        assert_eq!(form.cruise_speed, "24.9");
        assert_eq!(form.spacing, "100");
    }

    #[test]
    fn imperial_params_are_normalized_to_metric() {
        let mut form = MissionFormState::new(&defaults());
        form.unit_system = UnitSystem::Imperial;
        form.cruise_speed = "62.1".into();
        form.spacing = "328.084".into();
        form.custom_alt = "100".into();

        let params = form.mission_params("fallback").unwrap();
        assert_relative_eq!(params.cruise_speed_kmh, 99.9403, epsilon = 1e-3);
        assert_relative_eq!(params.spacing_m, 100.0, epsilon = 1e-9);
        assert_relative_eq!(params.altitude_m.unwrap(), 30.48, epsilon = 1e-3);
        assert_eq!(params.max_waypoints, 100);
        assert_eq!(params.filename, "mission_250913_1405.mission");
    }

    #[test]
    fn invalid_fields_are_reported() {
        let mut form = MissionFormState::new(&defaults());
        form.spacing = "far".into();
        let err = form.mission_params("fallback").unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidField { field: "spacing", .. }));

        let mut form = MissionFormState::new(&defaults());
        form.cruise_speed = String::new();
        assert!(form.mission_params("fallback").is_err());
    }

    #[test]
    fn non_positive_spacing_is_rejected() {
        for spacing in ["-1e17", "0", "-5"] {
            let mut form = MissionFormState::new(&defaults());
            form.spacing = spacing.into();
            let err = form.mission_params("fallback").unwrap_err();
            assert!(
                matches!(&err, crate::error::Error::InvalidField { field: "spacing", value } if value == spacing),
                "spacing {:?} gave {:?}",
                spacing,
                err
            );
        }

        let mut form = MissionFormState::new(&defaults());
        form.set_unit_system(UnitSystem::Imperial);
        form.spacing = "-1".into();
        assert!(form.mission_params("fallback").is_err());
    }

    #[test]
    fn defaults_file_overrides() {
        let now = datetime!(2025-09-13 14:05 UTC);
        let defaults =
            FormDefaults::from_json(br#"{"cruise_speed": 40, "spacing": 150}"#, now).unwrap();
        assert_eq!(defaults.cruise_speed, "40.0");
        assert_eq!(defaults.spacing, "150");
        assert_eq!(defaults.max_waypoints, "100");
        assert_eq!(defaults.mission_name, "mission_250913_1405");

        assert!(FormDefaults::from_json(br#"{"altitude": 1}"#, now).is_err());
    }
}
