use std::time::Duration;

use crate::converter::{Conversion, FieldKind};
use crate::form::FormDefaults;
use crate::page::{Dialog, Field, PageView};
use crate::units::UnitSystem;
use crate::utils::delay::{delay, DelayHandle, DelayOutcome, Delayed};

/// How long the loading overlay is shown after submitting.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(2500);

/// Handles the page's load, submit, unit toggle and reset events.
pub struct FormController<V> {
    view: V,
    defaults: FormDefaults,
    pending: Option<DelayHandle>,
    /// Id of the most recent submission.
    latest: u64,
}

/// A submission waiting for its loading delay to pass.
#[derive(Debug)]
pub struct PendingSubmission {
    pub id: u64,
    pub filename: String,
    pub delay: Delayed,
}

impl<V: PageView> FormController<V> {
    /// Attach to a loaded page. Shows the error dialog if the page was rendered with one.
    #[tracing::instrument(skip_all)]
    pub fn load(mut view: V, defaults: FormDefaults) -> Self {
        if view.has_dialog(Dialog::Error) {
            tracing::debug!("page contains an error, showing it");
            view.show_dialog(Dialog::Error);
        }

        Self {
            view,
            defaults,
            pending: None,
            latest: 0,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Unit toggle changed: convert the numeric fields to the unit system the toggle now
    /// selects.
    #[tracing::instrument(skip_all)]
    pub fn on_toggle(&mut self) -> Conversion {
        let mut form = self.view.read_form();
        let target = UnitSystem::from_toggle(self.view.toggle_checked());
        tracing::debug!(from = %form.unit_system, to = %target, "switching unit system");

        let previous = form.field_values();
        let conversion = form.set_unit_system(target);
        let next = form.field_values();

        for kind in FieldKind::ALL {
            if next.get(kind) != previous.get(kind) {
                self.view.set_field(field_for(kind), next.get(kind));
            }
        }
        self.view.render_unit_system(target);

        conversion
    }

    /// Reset clicked: restore all fields, the toggle and the labels to their defaults.
    #[tracing::instrument(skip_all)]
    pub fn on_reset(&mut self) {
        let mut form = self.view.read_form();
        form.reset(&self.defaults);
        self.view.render_form(&form);
        tracing::debug!("form reset");
    }

    /// Form submitted: show the loading overlay and start the loading delay.
    ///
    /// The returned delay has to be awaited and its outcome handed to
    /// [`FormController::complete_submit`] together with the submission id. A previous
    /// submission still pending is cancelled.
    #[tracing::instrument(skip_all)]
    pub fn on_submit(&mut self) -> PendingSubmission {
        let filename = self.view.read_form().display_filename(&self.defaults.mission_name);
        self.cancel_submit();
        self.latest += 1;
        tracing::debug!(id = self.latest, %filename, "submitting form");
        self.view.show_overlay();

        let (delay, handle) = delay(SUBMIT_DELAY);
        self.pending = Some(handle);

        PendingSubmission {
            id: self.latest,
            filename,
            delay,
        }
    }

    /// Cancel the pending submission, if any.
    pub fn cancel_submit(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let cancelled = handle.cancel();
                if cancelled {
                    tracing::debug!("cancelled pending submission");
                }
                cancelled
            }
            None => false,
        }
    }

    /// Hide the loading overlay and, unless cancelled, show the success dialog.
    ///
    /// Completions of submissions superseded by a newer one are ignored.
    pub fn complete_submit(&mut self, id: u64, outcome: DelayOutcome) {
        if id != self.latest {
            tracing::debug!(id, latest = self.latest, "ignoring superseded submission");
            return;
        }

        self.pending = None;
        self.view.hide_overlay();
        match outcome {
            DelayOutcome::Elapsed => self.view.show_dialog(Dialog::Success),
            DelayOutcome::Cancelled => tracing::debug!("submission cancelled"),
        }
    }

    /// Run a full submission and return the display filename.
    pub async fn submit(&mut self) -> (String, DelayOutcome) {
        let PendingSubmission {
            id,
            filename,
            delay,
        } = self.on_submit();
        let outcome = delay.await;
        self.complete_submit(id, outcome);
        (filename, outcome)
    }
}

fn field_for(kind: FieldKind) -> Field {
    match kind {
        FieldKind::Altitude => Field::CustomAlt,
        FieldKind::CruiseSpeed => Field::CruiseSpeed,
        FieldKind::Spacing => Field::Spacing,
    }
}
