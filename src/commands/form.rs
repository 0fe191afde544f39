use std::path::PathBuf;

use futures_util::future::{select, Either};
use inav_mission::controller::{FormController, PendingSubmission};
use inav_mission::form::{FormDefaults, MissionFormState};
use inav_mission::page::{Page, PageView};
use inav_mission::utils;

/// Simulate the mission form and print the resulting page state as JSON
#[derive(clap::Parser)]
pub struct Opts {
    /// JSON file overriding the form defaults
    #[clap(long, env = "INAV_MISSION_DEFAULTS")]
    defaults: Option<PathBuf>,
    /// Flip the unit toggle this many times
    #[clap(long, default_value = "0")]
    toggle: u32,
    /// Render the page with this error message
    #[clap(long)]
    error: Option<String>,
    /// Submit the form (CTRL+C cancels the pending submission)
    #[clap(long)]
    submit: bool,
    /// Reset the form before printing
    #[clap(long)]
    reset: bool,
}

pub async fn execute(opts: Opts) -> Result<(), inav_mission::Error> {
    let defaults = FormDefaults::load(opts.defaults.as_deref(), utils::now())?;
    let form = MissionFormState::new(&defaults);
    let page = match opts.error {
        Some(message) => Page::with_error(&form, message),
        None => Page::new(&form),
    };
    let mut controller = FormController::load(page, defaults);

    for _ in 0..opts.toggle {
        let checked = controller.view().toggle_checked();
        controller.view_mut().set_toggle(!checked);
        controller.on_toggle();
    }

    if opts.submit {
        let PendingSubmission {
            id,
            filename,
            delay,
        } = controller.on_submit();
        let outcome = match select(Box::pin(delay), Box::pin(tokio::signal::ctrl_c())).await {
            Either::Left((outcome, _)) => outcome,
            Either::Right((_, delay)) => {
                controller.cancel_submit();
                delay.await
            }
        };
        controller.complete_submit(id, outcome);
        tracing::info!(%filename, ?outcome, "submission finished");
    }

    if opts.reset {
        controller.on_reset();
    }

    println!("{}", serde_json::to_string_pretty(controller.view())?);

    Ok(())
}
