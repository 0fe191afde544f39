//! iNAV waypoint missions and their XML representation as read by the iNAV configurator.

use std::fmt::Write;
use std::io::Read;

use time::macros::format_description;
use time::OffsetDateTime;

use crate::form::MissionParams;
use crate::utils::kmh_to_cms;
use crate::waypoints::{decimate, Waypoint};

pub const MISSION_VERSION: &str = "25.09.13";
pub const GENERATOR: &str = "EdgeTX-to-iNAV-Web-Dark";

#[derive(Debug, Clone, PartialEq)]
pub struct MissionItem {
    pub no: usize,
    pub lat: f64,
    pub lon: f64,
    /// Altitude in whole meters.
    pub alt: i64,
    /// Cruise speed in cm/s.
    pub speed: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    pub items: Vec<MissionItem>,
    pub saved_at: OffsetDateTime,
}

impl Mission {
    pub fn new(waypoints: &[Waypoint], cruise_speed_kmh: f64, saved_at: OffsetDateTime) -> Self {
        let speed = kmh_to_cms(cruise_speed_kmh);
        let items = waypoints
            .iter()
            .enumerate()
            .map(|(i, wp)| MissionItem {
                no: i + 1,
                lat: wp.position.lat,
                lon: wp.position.lon,
                alt: wp.alt.trunc() as i64,
                speed,
            })
            .collect();

        Self { items, saved_at }
    }

    /// Read a telemetry log and turn it into a mission according to `params`.
    #[tracing::instrument(skip(reader, params), fields(filename = %params.filename))]
    pub fn from_log<R: Read>(
        reader: R,
        params: &MissionParams,
        saved_at: OffsetDateTime,
    ) -> Result<Self, crate::error::Error> {
        let samples = crate::telemetry::read_samples(reader, params.altitude_m)?;
        let decimation = decimate(&samples, params.spacing_m, params.max_waypoints);
        if decimation.waypoints.is_empty() {
            return Err(crate::error::Error::NoGpsData);
        }

        tracing::info!(
            waypoints = decimation.waypoints.len(),
            spacing_in_m = decimation.spacing,
            "created mission"
        );

        Ok(Self::new(
            &decimation.waypoints,
            params.cruise_speed_kmh,
            saved_at,
        ))
    }

    pub fn write_xml(&self, out: &mut impl Write) -> Result<(), crate::error::Error> {
        let save_date = self.saved_at.format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory][offset_minute]"
        ))?;

        writeln!(out, r#"<?xml version="1.0" ?>"#)?;
        writeln!(out, "<mission>")?;
        writeln!(out, r#"  <version value="{}"/>"#, MISSION_VERSION)?;
        writeln!(
            out,
            r#"  <mwp save-date="{}" generator="{}"/>"#,
            save_date, GENERATOR
        )?;
        for item in &self.items {
            writeln!(
                out,
                r#"  <missionitem no="{}" action="WAYPOINT" lat="{:.7}" lon="{:.7}" alt="{}" parameter1="{}" parameter2="0" parameter3="1" flag="0"/>"#,
                item.no, item.lat, item.lon, item.alt, item.speed
            )?;
        }
        writeln!(out, "</mission>")?;

        Ok(())
    }

    pub fn to_xml(&self) -> Result<String, crate::error::Error> {
        let mut xml = String::new();
        self.write_xml(&mut xml)?;
        Ok(xml)
    }
}
