//! Boundary between the form logic and the page it is displayed on.

use std::collections::HashMap;

use serde::Serialize;

use crate::form::MissionFormState;
use crate::units::UnitSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    MissionName,
    CruiseSpeed,
    Spacing,
    CustomAlt,
    MaxWaypoints,
    /// Hidden field mirroring the unit toggle.
    UnitSystem,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::MissionName,
        Field::CruiseSpeed,
        Field::Spacing,
        Field::CustomAlt,
        Field::MaxWaypoints,
        Field::UnitSystem,
    ];

    /// The `name` attribute of the form input.
    pub fn name(self) -> &'static str {
        match self {
            Field::MissionName => "mission_name",
            Field::CruiseSpeed => "cruise_speed",
            Field::Spacing => "spacing",
            Field::CustomAlt => "custom_alt",
            Field::MaxWaypoints => "max_wps",
            Field::UnitSystem => "unit_system",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialog {
    Success,
    Error,
}

/// Read and write access to the page elements the form controller works with.
pub trait PageView {
    fn field(&self, field: Field) -> String;
    fn set_field(&mut self, field: Field, value: &str);

    fn toggle_checked(&self) -> bool;
    fn set_toggle(&mut self, checked: bool);

    fn set_distance_labels(&mut self, label: &str);
    fn set_speed_labels(&mut self, label: &str);

    fn show_overlay(&mut self);
    fn hide_overlay(&mut self);

    /// Whether the page contains the given dialog.
    fn has_dialog(&self, dialog: Dialog) -> bool;
    fn show_dialog(&mut self, dialog: Dialog);

    /// Read the whole form.
    fn read_form(&self) -> MissionFormState {
        MissionFormState {
            mission_name: self.field(Field::MissionName),
            cruise_speed: self.field(Field::CruiseSpeed),
            spacing: self.field(Field::Spacing),
            custom_alt: self.field(Field::CustomAlt),
            max_waypoints: self.field(Field::MaxWaypoints),
            // an unknown hidden value falls back to the toggle
            unit_system: self
                .field(Field::UnitSystem)
                .parse()
                .unwrap_or_else(|_| UnitSystem::from_toggle(self.toggle_checked())),
        }
    }

    /// Write the whole form including toggle and unit labels.
    fn render_form(&mut self, form: &MissionFormState) {
        self.set_field(Field::MissionName, &form.mission_name);
        self.set_field(Field::CruiseSpeed, &form.cruise_speed);
        self.set_field(Field::Spacing, &form.spacing);
        self.set_field(Field::CustomAlt, &form.custom_alt);
        self.set_field(Field::MaxWaypoints, &form.max_waypoints);
        self.render_unit_system(form.unit_system);
    }

    /// Bring toggle, hidden field and labels in line with `system`.
    fn render_unit_system(&mut self, system: UnitSystem) {
        let labels = system.labels();
        self.set_toggle(system.is_imperial());
        self.set_field(Field::UnitSystem, labels.system);
        self.set_distance_labels(labels.distance);
        self.set_speed_labels(labels.speed);
    }
}

/// In-memory page, used for tests and the command line.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    fields: HashMap<Field, String>,
    toggle: bool,
    /// One label each for altitude and spacing.
    distance_labels: [String; 2],
    speed_labels: [String; 1],
    overlay_visible: bool,
    dialogs: Vec<Dialog>,
    visible_dialogs: Vec<Dialog>,
    error_message: Option<String>,
}

impl Page {
    pub fn new(form: &MissionFormState) -> Self {
        let mut page = Self {
            fields: HashMap::new(),
            toggle: false,
            distance_labels: Default::default(),
            speed_labels: Default::default(),
            overlay_visible: false,
            dialogs: vec![Dialog::Success],
            visible_dialogs: Vec::new(),
            error_message: None,
        };
        page.render_form(form);
        page
    }

    /// A page rendered with an error dialog, e.g. after a failed conversion.
    pub fn with_error(form: &MissionFormState, message: impl Into<String>) -> Self {
        let mut page = Self::new(form);
        page.dialogs.push(Dialog::Error);
        page.error_message = Some(message.into());
        page
    }

    pub fn distance_labels(&self) -> &[String] {
        &self.distance_labels
    }

    pub fn speed_labels(&self) -> &[String] {
        &self.speed_labels
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn is_dialog_visible(&self, dialog: Dialog) -> bool {
        self.visible_dialogs.contains(&dialog)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

impl PageView for Page {
    fn field(&self, field: Field) -> String {
        self.fields.get(&field).cloned().unwrap_or_default()
    }

    fn set_field(&mut self, field: Field, value: &str) {
        self.fields.insert(field, value.to_string());
    }

    fn toggle_checked(&self) -> bool {
        self.toggle
    }

    fn set_toggle(&mut self, checked: bool) {
        self.toggle = checked;
    }

    fn set_distance_labels(&mut self, label: &str) {
        for l in &mut self.distance_labels {
            *l = label.to_string();
        }
    }

    fn set_speed_labels(&mut self, label: &str) {
        for l in &mut self.speed_labels {
            *l = label.to_string();
        }
    }

    fn show_overlay(&mut self) {
        self.overlay_visible = true;
    }

    fn hide_overlay(&mut self) {
        self.overlay_visible = false;
    }

    fn has_dialog(&self, dialog: Dialog) -> bool {
        self.dialogs.contains(&dialog)
    }

    fn show_dialog(&mut self, dialog: Dialog) {
        if self.has_dialog(dialog) && !self.is_dialog_visible(dialog) {
            self.visible_dialogs.push(dialog);
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::form::FormDefaults;

    fn form() -> MissionFormState {
        MissionFormState::new(&FormDefaults::at(datetime!(2025-09-13 14:05 UTC)).unwrap())
    }

    #[test]
    fn renders_and_reads_form() {
        let mut form = form();
        form.custom_alt = "120".into();
        form.unit_system = UnitSystem::Imperial;

        let page = Page::new(&form);
        assert_eq!(page.field(Field::UnitSystem), "imperial");
        assert!(page.toggle_checked());
        assert_eq!(page.distance_labels(), ["ft", "ft"]);
        assert_eq!(page.speed_labels(), ["mph"]);
        assert_eq!(page.read_form(), form);
    }

    #[test]
    fn unknown_hidden_value_follows_toggle() {
        let mut page = Page::new(&form());
        page.set_field(Field::UnitSystem, "");
        page.set_toggle(true);
        assert_eq!(page.read_form().unit_system, UnitSystem::Imperial);
    }

    #[test]
    fn only_present_dialogs_are_shown() {
        let mut page = Page::new(&form());
        page.show_dialog(Dialog::Error);
        assert!(!page.is_dialog_visible(Dialog::Error));
        page.show_dialog(Dialog::Success);
        assert!(page.is_dialog_visible(Dialog::Success));
    }
}
