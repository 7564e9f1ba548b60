use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::angles;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeStep {
    Daily,
    Minute,
}

/// Fixed site of the sundial. Longitudes are signed degrees, west negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub std_meridian: f64,
    pub gnomon_height: f64,
    pub year: i32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            latitude: -32.883,
            longitude: -68.833,
            std_meridian: -45.0,
            gnomon_height: 1.4,
            year: 2023,
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<()> {
        angles::validate_latitude(self.latitude)?;
        angles::validate_longitude(self.longitude)?;
        angles::validate_longitude(self.std_meridian)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialConfig {
    pub outer_radius: f64,
    pub hour_steps: usize,
    pub sweep_degrees: f64,
    pub first_hour: u32,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            outer_radius: 2.0,
            hour_steps: 17,
            sweep_degrees: 120.0,
            first_hour: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EotSample {
    pub timestamp: NaiveDateTime,
    pub day_of_year: i32,
    pub declination: f64,
    pub equation_of_time: f64,
    pub standard_offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub day_of_year: i32,
    pub declination: f64,
    pub solar_time: NaiveDateTime,
    pub hour_angle: f64,
    pub shadow_height: f64,
    pub zenith_angle: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeclinationExtreme {
    pub timestamp: NaiveDateTime,
    pub declination: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeclinationExtremes {
    pub min: DeclinationExtreme,
    pub max: DeclinationExtreme,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseGeometry {
    pub latitude: f64,
    pub major_radius: f64,
    pub minor_radius: f64,
    pub focal_distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsePoint {
    pub hour: u32,
    pub t_degrees: f64,
    pub x: f64,
    pub y: f64,
}

/// A dot on the central date scale. Its position is the gnomon-scale value of
/// `date`; the labels name the dates printed beside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleMark {
    pub date: NaiveDate,
    pub left_label: Option<NaiveDate>,
    pub right_label: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMark {
    pub mark: ScaleMark,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub date: NaiveDate,
}

/// Solar-noon samples keyed by their standard-time calendar date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    pub days: BTreeMap<NaiveDate, Sample>,
}
