use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

use crate::error::{Error, Result};

pub const EARTH_AXIAL_TILT: f64 = 23.45;
pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const MINUTES_PER_DEGREE: f64 = 4.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn leap_year(year: i32) -> bool {
    (year % 400 == 0) || (year % 4 == 0 && year % 100 != 0)
}

pub fn days_in_months(year: i32) -> [u32; 12] {
    [
        31,
        if leap_year(year) { 29 } else { 28 },
        31, 30, 31, 30, 31, 31, 30, 31, 30, 31,
    ]
}

pub fn day_of_year(year: i32, month: u32, day: u32) -> i32 {
    let dim = days_in_months(year);
    let sum: u32 = dim[..(month - 1) as usize].iter().sum();
    (sum + day) as i32
}

pub fn day_of_year_at(timestamp: &NaiveDateTime) -> i32 {
    day_of_year(timestamp.year(), timestamp.month(), timestamp.day())
}

pub fn intermediate_angle_b(n: i32) -> f64 {
    deg_to_rad((n - 1) as f64 * (360.0 / 365.0))
}

/// Equation of time in minutes for day-of-year `n`.
pub fn equation_of_time(n: i32) -> f64 {
    let b = intermediate_angle_b(n);
    229.18
        * (0.000075
            + 0.001868 * b.cos()
            - 0.032077 * b.sin()
            - 0.014615 * (2.0 * b).cos()
            - 0.040849 * (2.0 * b).sin())
}

pub fn equation_of_time_at(timestamp: &NaiveDateTime) -> f64 {
    equation_of_time(day_of_year_at(timestamp))
}

/// Solar declination in degrees for day-of-year `n`.
pub fn solar_declination(n: i32) -> f64 {
    EARTH_AXIAL_TILT * deg_to_rad(360.0 * ((284 + n) as f64 / 365.0)).sin()
}

pub fn declination_at(timestamp: &NaiveDateTime) -> f64 {
    solar_declination(day_of_year_at(timestamp))
}

pub fn hour_angle(local_solar_time: f64) -> f64 {
    DEGREES_PER_HOUR * (local_solar_time - 12.0)
}

/// Hour angle in degrees at a solar time. Seconds are ignored, so the minute
/// that reads 12:00 gives exactly zero.
pub fn hour_angle_at(solar_time: &NaiveDateTime) -> f64 {
    let hours = solar_time.hour() as f64 + solar_time.minute() as f64 / 60.0;
    hour_angle(hours)
}

pub fn solar_zenith_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let cos_zenith =
        lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(cos_zenith.clamp(-1.0, 1.0).acos())
}

pub fn validate_longitude(longitude: f64) -> Result<()> {
    if !longitude.is_finite() || longitude.abs() > 180.0 {
        return Err(Error::InvalidLongitude { value: longitude });
    }
    Ok(())
}

pub fn validate_latitude(latitude: f64) -> Result<()> {
    if !latitude.is_finite() || latitude.abs() > 90.0 {
        return Err(Error::InvalidLatitude { value: latitude });
    }
    Ok(())
}

/// Maps a signed longitude onto the 0–360 scale used for meridian offsets:
/// west becomes its magnitude, east in (0, 180) is shifted by 180. Exactly 0
/// and 180 are returned unchanged.
pub fn longitude_to_360(longitude: f64) -> Result<f64> {
    validate_longitude(longitude)?;
    if longitude < 0.0 {
        Ok(longitude.abs())
    } else if longitude > 0.0 && longitude < 180.0 {
        Ok(longitude + 180.0)
    } else {
        Ok(longitude)
    }
}

pub fn meridian_displacement_minutes(longitude: f64, std_meridian: f64) -> Result<f64> {
    let lng_360 = longitude_to_360(longitude)?;
    let std_360 = longitude_to_360(std_meridian)?;
    Ok(MINUTES_PER_DEGREE * (std_360 - lng_360))
}

pub fn minutes_to_duration(minutes: f64) -> Duration {
    Duration::microseconds((minutes * 60_000_000.0).round() as i64)
}

pub fn standard_to_solar_time(
    timestamp: &NaiveDateTime,
    longitude: f64,
    std_meridian: f64,
) -> Result<NaiveDateTime> {
    let displacement = meridian_displacement_minutes(longitude, std_meridian)?;
    let eot = equation_of_time_at(timestamp);
    timestamp
        .checked_add_signed(minutes_to_duration(displacement + eot))
        .ok_or(Error::InvalidYear {
            year: timestamp.year(),
        })
}

/// Height of the point where the shadow falls for a gnomon of `gnomon_height`.
pub fn shadow_height(gnomon_height: f64, latitude: f64, declination: f64) -> f64 {
    -gnomon_height * (deg_to_rad(latitude) - deg_to_rad(declination)).tan()
}
