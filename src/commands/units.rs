use inav_mission::converter::{self, FieldKind, FieldOutcome, FieldValues};
use inav_mission::units::UnitSystem;

/// Convert altitude, speed and spacing values to another unit system
#[derive(clap::Parser)]
pub struct Opts {
    /// Target unit system (`metric` or `imperial`)
    to: UnitSystem,
    /// Unit system of the given values, defaults to the other one
    #[clap(long)]
    from: Option<UnitSystem>,
    #[clap(long, default_value = "")]
    alt: String,
    #[clap(long, default_value = "")]
    speed: String,
    #[clap(long, default_value = "")]
    spacing: String,
}

pub fn execute(opts: Opts) -> Result<(), inav_mission::Error> {
    let from = opts.from.unwrap_or_else(|| opts.to.toggled());
    let values = FieldValues {
        altitude: opts.alt,
        cruise_speed: opts.speed,
        spacing: opts.spacing,
    };

    let conversion = converter::convert(&values, from, opts.to);
    for kind in FieldKind::ALL {
        match conversion.outcome(kind) {
            FieldOutcome::Converted(value) => {
                println!("{}: {} {}", kind.name(), value, kind.label(opts.to))
            }
            FieldOutcome::Invalid => {
                println!("{}: `{}` is not a number", kind.name(), values.get(kind))
            }
            FieldOutcome::Empty => {}
        }
    }

    Ok(())
}
