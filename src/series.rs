use chrono::{Duration, NaiveDate, NaiveDateTime};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::angles;
use crate::error::{Error, Result};
use crate::geometry;
use crate::types::{
    DeclinationExtreme, DeclinationExtremes, DialConfig, EotSample, Sample, SiteConfig, TimeStep,
};

impl TimeStep {
    pub fn duration(self) -> Duration {
        match self {
            TimeStep::Daily => Duration::days(1),
            TimeStep::Minute => Duration::minutes(1),
        }
    }

    pub fn steps_per_day(self) -> usize {
        match self {
            TimeStep::Daily => 1,
            TimeStep::Minute => 1440,
        }
    }
}

fn year_start(year: i32) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or(Error::InvalidYear { year })
}

/// Evenly spaced timestamps from Jan 1 00:00 up to, not including, the next Jan 1.
pub fn year_timestamps(year: i32, step: TimeStep) -> Result<Vec<NaiveDateTime>> {
    let start = year_start(year)?;
    let end = year_start(year.checked_add(1).ok_or(Error::InvalidYear { year })?)?;
    let days = if angles::leap_year(year) { 366 } else { 365 };
    let step_duration = step.duration();

    let mut timestamps = Vec::with_capacity(days * step.steps_per_day());
    let mut current = start;
    while current < end {
        timestamps.push(current);
        current = current + step_duration;
    }
    debug!(year, count = timestamps.len(), ?step, "generated timestamps");
    Ok(timestamps)
}

pub fn equation_of_time_series(
    timestamps: &[NaiveDateTime],
    site: &SiteConfig,
) -> Result<Vec<EotSample>> {
    let displacement = angles::meridian_displacement_minutes(site.longitude, site.std_meridian)?;
    let samples = timestamps
        .iter()
        .map(|ts| {
            let n = angles::day_of_year_at(ts);
            let eot = angles::equation_of_time(n);
            EotSample {
                timestamp: *ts,
                day_of_year: n,
                declination: angles::solar_declination(n),
                equation_of_time: eot,
                standard_offset: -(displacement + eot),
            }
        })
        .collect::<Vec<_>>();
    info!(
        samples = samples.len(),
        displacement_minutes = displacement,
        "computed equation-of-time series"
    );
    Ok(samples)
}

pub fn sample_at(timestamp: &NaiveDateTime, site: &SiteConfig, dial: &DialConfig) -> Result<Sample> {
    let n = angles::day_of_year_at(timestamp);
    let declination = angles::solar_declination(n);
    let solar_time = angles::standard_to_solar_time(timestamp, site.longitude, site.std_meridian)?;
    let hour_angle = angles::hour_angle_at(&solar_time);
    // Zenith follows the standard clock; only the hour angle is read on solar time.
    let clock_hour_angle = angles::hour_angle_at(timestamp);
    Ok(Sample {
        timestamp: *timestamp,
        day_of_year: n,
        declination,
        solar_time,
        hour_angle,
        shadow_height: angles::shadow_height(site.gnomon_height, site.latitude, declination),
        zenith_angle: angles::solar_zenith_angle(site.latitude, declination, clock_hour_angle),
        z: geometry::gnomon_scale(dial.outer_radius, site.latitude, declination),
    })
}

/// Per-timestamp solar geometry for the sundial. Output order matches `timestamps`.
pub fn sundial_series(
    timestamps: &[NaiveDateTime],
    site: &SiteConfig,
    dial: &DialConfig,
) -> Result<Vec<Sample>> {
    site.validate()?;
    let samples = timestamps
        .par_iter()
        .map(|ts| sample_at(ts, site, dial))
        .collect::<Result<Vec<_>>>()?;
    info!(samples = samples.len(), "computed sundial series");
    Ok(samples)
}

pub trait HasDeclination {
    fn timestamp(&self) -> NaiveDateTime;
    fn declination(&self) -> f64;
}

impl HasDeclination for Sample {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    fn declination(&self) -> f64 {
        self.declination
    }
}

impl HasDeclination for EotSample {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    fn declination(&self) -> f64 {
        self.declination
    }
}

/// Lowest and highest declination in the series; the first occurrence wins on ties.
pub fn declination_extremes<S: HasDeclination>(samples: &[S]) -> Result<DeclinationExtremes> {
    let first = samples.first().ok_or(Error::EmptySeries)?;
    let seed = DeclinationExtreme {
        timestamp: first.timestamp(),
        declination: first.declination(),
    };
    let (min, max) = samples.iter().skip(1).fold((seed, seed), |(min, max), s| {
        let d = s.declination();
        let min = if d < min.declination {
            DeclinationExtreme {
                timestamp: s.timestamp(),
                declination: d,
            }
        } else {
            min
        };
        let max = if d > max.declination {
            DeclinationExtreme {
                timestamp: s.timestamp(),
                declination: d,
            }
        } else {
            max
        };
        (min, max)
    });
    Ok(DeclinationExtremes { min, max })
}
