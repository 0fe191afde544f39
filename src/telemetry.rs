//! Reader for EdgeTX telemetry logs (CSV).
//!
//! Only the `GPS` column (`"<lat> <lon>"`) and the `Alt(m)` column are used. Rows without a
//! usable GPS fix are skipped.

use std::io::Read;

use crate::geo::Coordinate;

pub const GPS_COLUMN: &str = "GPS";
pub const ALTITUDE_COLUMN: &str = "Alt(m)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogSample {
    pub position: Coordinate,
    /// Altitude in meters.
    pub alt: f64,
}

/// Read all samples with a valid GPS fix. `manual_alt` replaces the logged altitude, in which
/// case the `Alt(m)` column is not required.
#[tracing::instrument(skip(reader))]
pub fn read_samples<R: Read>(
    reader: R,
    manual_alt: Option<f64>,
) -> Result<Vec<LogSample>, crate::error::Error> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let gps_idx =
        column(&headers, GPS_COLUMN).ok_or(crate::error::Error::MissingColumn(GPS_COLUMN))?;
    let altitude = match manual_alt {
        Some(alt) => Altitude::Manual(alt),
        None => Altitude::Column(
            column(&headers, ALTITUDE_COLUMN)
                .ok_or(crate::error::Error::MissingColumn(ALTITUDE_COLUMN))?,
        ),
    };

    let mut samples = Vec::new();
    let mut skipped = 0usize;
    for (row, record) in csv.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                tracing::trace!(row, %err, "skipping malformed row");
                skipped += 1;
                continue;
            }
        };

        let position = match record.get(gps_idx).and_then(parse_gps) {
            Some(position) => position,
            None => {
                skipped += 1;
                continue;
            }
        };

        let alt = match altitude {
            Altitude::Manual(alt) => alt,
            Altitude::Column(idx) => {
                match record.get(idx).and_then(|alt| alt.trim().parse::<f64>().ok()) {
                    Some(alt) if alt.is_finite() => alt,
                    _ => {
                        tracing::trace!(row, "skipping row without altitude");
                        skipped += 1;
                        continue;
                    }
                }
            }
        };

        samples.push(LogSample { position, alt });
    }

    tracing::debug!(samples = samples.len(), skipped, "read telemetry log");

    Ok(samples)
}

#[derive(Clone, Copy)]
enum Altitude {
    Manual(f64),
    Column(usize),
}

fn column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Parse a `GPS` cell. Returns `None` for cells without a fix.
pub fn parse_gps(cell: &str) -> Option<Coordinate> {
    let cell = cell.trim().replace(',', "");
    if matches!(cell.as_str(), "" | "0" | "0 0" | "0.0 0.0") {
        return None;
    }

    let mut coords = cell.split_whitespace();
    let lat = coords.next()?.parse::<f64>().ok()?;
    let lon = coords.next()?.parse::<f64>().ok()?;

    // no fix yet
    if lat == 0.0 && lon == 0.0 {
        return None;
    }

    let position = Coordinate::new(lat, lon);
    position.is_valid().then_some(position)
}
