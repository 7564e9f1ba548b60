//! Layout of the analemmatic dial face: the hour ellipse and the central date scale.

use crate::angles::{deg_to_rad, validate_latitude};
use crate::error::Result;
use crate::types::{DialConfig, EllipseGeometry, EllipsePoint};

impl EllipseGeometry {
    pub fn new(latitude: f64, outer_radius: f64) -> Result<Self> {
        validate_latitude(latitude)?;
        let minor_radius = (outer_radius * deg_to_rad(latitude).sin()).abs();
        let focal_distance = (outer_radius.powi(2) - minor_radius.powi(2)).sqrt();
        Ok(Self {
            latitude,
            major_radius: outer_radius,
            minor_radius,
            focal_distance,
        })
    }
}

/// `steps` evenly spaced values from `-sweep` to `sweep`, both included.
pub fn sweep_angles(sweep_degrees: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = 2.0 * sweep_degrees / (steps - 1) as f64;
            (0..steps).map(|i| -sweep_degrees + step * i as f64).collect()
        }
    }
}

/// Hour marks on the ellipse. The sweep runs west to east, so hours are
/// assigned in descending order starting from the latest hour.
pub fn ellipse_points(geometry: &EllipseGeometry, dial: &DialConfig) -> Vec<EllipsePoint> {
    let sin_lat = deg_to_rad(geometry.latitude).sin();
    let last_hour = dial.first_hour + dial.hour_steps.saturating_sub(1) as u32;
    sweep_angles(dial.sweep_degrees, dial.hour_steps)
        .into_iter()
        .enumerate()
        .map(|(i, t)| {
            let t_rad = deg_to_rad(t);
            EllipsePoint {
                hour: last_hour - i as u32,
                t_degrees: t,
                x: geometry.major_radius * t_rad.sin(),
                y: geometry.major_radius * sin_lat * t_rad.cos(),
            }
        })
        .collect()
}

/// Position on the central scale where the gnomon stands on a day with the
/// given declination.
pub fn gnomon_scale(outer_radius: f64, latitude: f64, declination: f64) -> f64 {
    outer_radius * deg_to_rad(declination).tan() * deg_to_rad(latitude).cos()
}

/// The face is drawn south-up, which flips every vertical coordinate.
pub fn display_y(value: f64) -> f64 {
    -value
}
