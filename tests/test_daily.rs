use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};

use sundial_geometry::daily::*;
use sundial_geometry::series::{sundial_series, year_timestamps};
use sundial_geometry::types::*;
use sundial_geometry::Error;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

static YEAR_SAMPLES: LazyLock<Vec<Sample>> = LazyLock::new(|| {
    let site = SiteConfig::default();
    let minutes = year_timestamps(site.year, TimeStep::Minute).unwrap();
    sundial_series(&minutes, &site, &DialConfig::default()).unwrap()
});

static DAILY: LazyLock<DailySeries> = LazyLock::new(|| reduce_daily(&YEAR_SAMPLES));

fn ymd(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, m, d).unwrap()
}

// ── Reducer ──

#[test]
fn test_one_noon_per_day() {
    assert!(DAILY.len() <= 366);
    assert_eq!(DAILY.len(), 365);
}

#[test]
fn test_retained_samples_are_solar_noon() {
    for (date, sample) in DAILY.iter() {
        assert_eq!(*date, sample.timestamp.date());
        assert!(sample.hour_angle.abs() <= SOLAR_NOON_TOLERANCE);
        assert!(is_solar_noon(sample));
    }
}

#[test]
fn test_daily_keys_follow_day_of_year() {
    for (date, sample) in DAILY.iter() {
        assert_eq!(date.ordinal() as i32, sample.day_of_year);
    }
}

#[test]
fn test_day_without_noon_is_dropped() {
    let kept: Vec<Sample> = YEAR_SAMPLES
        .iter()
        .filter(|s| !(s.timestamp.date() == ymd(3, 1) && is_solar_noon(s)))
        .copied()
        .collect();
    let daily = reduce_daily(&kept);
    assert_eq!(daily.len(), 364);
    assert!(daily.get(&ymd(3, 1)).is_none());
    assert!(matches!(
        daily.z_at(ymd(3, 1)),
        Err(Error::MissingDailySample { .. })
    ));
}

#[test]
fn test_empty_input() {
    let daily = reduce_daily(&[]);
    assert!(daily.is_empty());
    assert!(daily.z_range().is_none());
}

#[test]
fn test_z_range_spans_solstices() {
    let (lo, hi) = DAILY.z_range().unwrap();
    assert_approx!(hi, 0.7285, 1e-3);
    assert_approx!(lo, -0.7285, 1e-3);
    assert_approx!(DAILY.z_at(ymd(6, 21)).unwrap(), hi, 1e-9);
}

// ── Calendar scale ──

#[test]
fn test_calendar_marks_layout() {
    let marks = calendar_scale_marks(2023).unwrap();
    assert_eq!(marks.len(), 7);
    assert_eq!(marks[0].date, ymd(6, 21));
    assert_eq!(marks[0].left_label, Some(ymd(6, 21)));
    assert_eq!(marks[0].right_label, None);
    assert_eq!(marks[1].right_label, Some(ymd(7, 24)));
    let last = marks[6];
    assert_eq!(last.date, ymd(12, 21));
    assert_eq!(last.left_label, None);
    assert_eq!(last.right_label, Some(ymd(12, 21)));
}

#[test]
fn test_resolved_marks_use_their_own_dates() {
    let marks = calendar_scale_marks(2023).unwrap();
    let resolved = resolve_scale(&DAILY, &marks).unwrap();
    assert_eq!(resolved.len(), 7);
    for r in &resolved {
        assert_eq!(r.z, DAILY.get(&r.mark.date).unwrap().z);
    }
    let zs: Vec<f64> = resolved[..6].iter().map(|r| r.z).collect();
    for w in zs.windows(2) {
        assert!(w[0] > w[1], "{:?}", zs);
    }
}

#[test]
fn test_paired_labels_share_a_position() {
    let marks = calendar_scale_marks(2023).unwrap();
    for mark in marks.iter().filter(|m| m.left_label.is_some()) {
        if let Some(right) = mark.right_label {
            let left_z = DAILY.z_at(mark.date).unwrap();
            let right_z = DAILY.z_at(right).unwrap();
            assert_approx!(left_z, right_z, 0.04);
        }
    }
}

#[test]
fn test_resolve_scale_missing_date() {
    let marks = calendar_scale_marks(2023).unwrap();
    let result = resolve_scale(&DailySeries::default(), &marks);
    assert!(matches!(result, Err(Error::MissingDailySample { date }) if date == ymd(6, 21)));
}

#[test]
fn test_default_highlight() {
    let h = default_highlight(2023).unwrap();
    assert_eq!(h.date, ymd(4, 29));
    assert!(DAILY.get(&h.date).is_some());
}
