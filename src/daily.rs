use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{DailySeries, Highlight, ResolvedMark, Sample, ScaleMark};

pub const SOLAR_NOON_TOLERANCE: f64 = 1e-9;

impl DailySeries {
    pub fn get(&self, date: &NaiveDate) -> Option<&Sample> {
        self.days.get(date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Sample)> {
        self.days.iter()
    }

    pub fn z_range(&self) -> Option<(f64, f64)> {
        let mut values = self.days.values().map(|s| s.z);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), z| (lo.min(z), hi.max(z))))
    }

    pub fn z_at(&self, date: NaiveDate) -> Result<f64> {
        self.get(&date)
            .map(|s| s.z)
            .ok_or(Error::MissingDailySample { date })
    }
}

pub fn is_solar_noon(sample: &Sample) -> bool {
    sample.hour_angle.abs() <= SOLAR_NOON_TOLERANCE
}

/// Keeps the solar-noon sample of every day. Days whose series never lands on
/// a zero hour angle are left out.
pub fn reduce_daily(samples: &[Sample]) -> DailySeries {
    let mut daily = DailySeries::default();
    let mut seen = BTreeSet::new();
    for sample in samples {
        let date = sample.timestamp.date();
        seen.insert(date);
        if is_solar_noon(sample) {
            daily.days.entry(date).or_insert(*sample);
        }
    }
    for date in seen.iter().filter(|d| !daily.days.contains_key(*d)) {
        debug!(%date, "no solar-noon sample, day dropped");
    }
    debug!(days = daily.len(), "reduced series to solar noon");
    daily
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(Error::InvalidYear { year })
}

/// The seven dots of the central scale. Dates sharing a declination share a
/// dot: the first half of the year is labelled on the left, the second on the right.
pub fn calendar_scale_marks(year: i32) -> Result<Vec<ScaleMark>> {
    let pairs: [((u32, u32), Option<(u32, u32)>); 6] = [
        ((6, 21), None),
        ((5, 21), Some((7, 24))),
        ((4, 21), Some((8, 23))),
        ((3, 21), Some((9, 24))),
        ((2, 21), Some((10, 22))),
        ((1, 21), Some((11, 22))),
    ];

    let mut marks = Vec::with_capacity(pairs.len() + 1);
    for ((month, day), right) in pairs {
        let anchor = date(year, month, day)?;
        let right_label = match right {
            Some((m, d)) => Some(date(year, m, d)?),
            None => None,
        };
        marks.push(ScaleMark {
            date: anchor,
            left_label: Some(anchor),
            right_label,
        });
    }
    let december = date(year, 12, 21)?;
    marks.push(ScaleMark {
        date: december,
        left_label: None,
        right_label: Some(december),
    });
    Ok(marks)
}

pub fn default_highlight(year: i32) -> Result<Highlight> {
    Ok(Highlight {
        date: date(year, 4, 29)?,
    })
}

pub fn resolve_scale(daily: &DailySeries, marks: &[ScaleMark]) -> Result<Vec<ResolvedMark>> {
    marks
        .iter()
        .map(|mark| {
            Ok(ResolvedMark {
                mark: *mark,
                z: daily.z_at(mark.date)?,
            })
        })
        .collect()
}
