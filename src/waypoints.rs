use crate::geo::Coordinate;
use crate::telemetry::LogSample;

/// Samples farther away from the first fix are considered sensor glitches.
pub const MAX_DISTANCE_FROM_START_M: f64 = 500_000.0;
/// Spacing increment when a pass yields too many waypoints.
pub const SPACING_STEP_M: f64 = 10.0;
/// Spacing after which no further increase is attempted.
pub const MAX_SPACING_M: f64 = 5000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub position: Coordinate,
    /// Altitude in meters.
    pub alt: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decimation {
    pub waypoints: Vec<Waypoint>,
    /// Spacing in meters the waypoints were selected with.
    pub spacing: f64,
}

/// Reduce a flight log to waypoints at least `spacing` meters apart, increasing the spacing
/// until at most `max_waypoints` remain (or the spacing exceeds [`MAX_SPACING_M`]).
#[tracing::instrument(skip(samples), fields(samples = samples.len()))]
pub fn decimate(samples: &[LogSample], spacing: f64, max_waypoints: usize) -> Decimation {
    // the spacing has to grow with each step for the loop to end
    let mut spacing = if spacing.is_finite() && spacing >= 0.0 {
        spacing
    } else {
        tracing::warn!(spacing_in_m = spacing, "invalid spacing, starting from 0 m");
        0.0
    };

    loop {
        let waypoints = select(samples, spacing);
        if waypoints.is_empty() {
            return Decimation { waypoints, spacing };
        }

        if waypoints.len() <= max_waypoints || spacing > MAX_SPACING_M {
            tracing::debug!(waypoints = waypoints.len(), spacing_in_m = spacing, "decimated log");
            return Decimation { waypoints, spacing };
        }

        tracing::trace!(
            waypoints = waypoints.len(),
            spacing_in_m = spacing,
            "too many waypoints, increasing spacing"
        );
        spacing += SPACING_STEP_M;
    }
}

/// A single pass selecting samples at least `spacing` meters from the previous waypoint.
fn select(samples: &[LogSample], spacing: f64) -> Vec<Waypoint> {
    let mut waypoints: Vec<Waypoint> = Vec::new();
    let mut start: Option<Coordinate> = None;

    for sample in samples {
        let start = match start {
            Some(start) => start,
            None => {
                start = Some(sample.position);
                waypoints.push(Waypoint {
                    position: sample.position,
                    alt: sample.alt,
                });
                continue;
            }
        };

        if start.distance_to(&sample.position) > MAX_DISTANCE_FROM_START_M {
            continue;
        }

        let last = waypoints.last().map(|wp| wp.position).unwrap_or(start);
        if last.distance_to(&sample.position) >= spacing {
            waypoints.push(Waypoint {
                position: sample.position,
                alt: sample.alt,
            });
        }
    }

    waypoints
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Samples heading north in steps of 0.001° (~111.2 m).
    fn northbound(n: usize) -> Vec<LogSample> {
        (0..n)
            .map(|i| LogSample {
                position: Coordinate::new(47.0 + i as f64 * 0.001, 8.5),
                alt: 10.0 + i as f64,
            })
            .collect()
    }

    #[test]
    fn keeps_samples_beyond_spacing() {
        let result = decimate(&northbound(11), 100.0, 100);
        assert_eq!(result.waypoints.len(), 11);
        assert_eq!(result.spacing, 100.0);

        let result = decimate(&northbound(11), 200.0, 100);
        let alts: Vec<f64> = result.waypoints.iter().map(|wp| wp.alt).collect();
        assert_eq!(alts, vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0]);
    }

    #[test]
    fn increases_spacing_until_limit_met() {
        let result = decimate(&northbound(11), 100.0, 5);
        assert_eq!(result.spacing, 230.0);
        let alts: Vec<f64> = result.waypoints.iter().map(|wp| wp.alt).collect();
        assert_eq!(alts, vec![10.0, 13.0, 16.0, 19.0]);
    }

    #[test]
    fn gives_up_past_max_spacing() {
        let result = decimate(&northbound(11), 5001.0, 0);
        assert_eq!(result.spacing, 5001.0);
        assert_eq!(result.waypoints.len(), 1);
    }

    #[test]
    fn negative_spacing_starts_from_zero() {
        let result = decimate(&northbound(11), -1e17, 5);
        assert_eq!(result.spacing, 230.0);
        assert_eq!(result.waypoints.len(), 4);

        let result = decimate(&northbound(11), f64::NAN, 100);
        assert_eq!(result.spacing, 0.0);
        assert_eq!(result.waypoints.len(), 11);
    }

    #[test]
    fn ignores_jumps_far_from_start() {
        let mut samples = northbound(3);
        samples.insert(
            1,
            LogSample {
                position: Coordinate::new(-33.0, 151.0),
                alt: 0.0,
            },
        );
        let result = decimate(&samples, 100.0, 100);
        assert_eq!(result.waypoints.len(), 3);
        assert!(result.waypoints.iter().all(|wp| wp.alt >= 10.0));
    }

    #[test]
    fn empty_log() {
        let result = decimate(&[], 100.0, 100);
        assert!(result.waypoints.is_empty());
    }
}
