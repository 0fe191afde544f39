use time::OffsetDateTime;

pub mod delay;
pub mod precision;

/// Feet per meter.
pub const FT_PER_M: f64 = 3.28084;
/// Miles per hour per kilometer per hour.
pub const MPH_PER_KMH: f64 = 0.621371;

pub fn m_to_ft(m: f64) -> f64 {
    m * FT_PER_M
}

pub fn ft_to_m(ft: f64) -> f64 {
    ft / FT_PER_M
}

pub fn kmh_to_mph(kmh: f64) -> f64 {
    kmh * MPH_PER_KMH
}

pub fn mph_to_kmh(mph: f64) -> f64 {
    mph / MPH_PER_KMH
}

/// Speed in cm/s as stored in iNAV waypoints (truncated towards zero).
pub fn kmh_to_cms(kmh: f64) -> i64 {
    (kmh * 100_000.0 / 3600.0).trunc() as i64
}

/// Local wall clock time, falling back to UTC if the local offset cannot be determined.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
