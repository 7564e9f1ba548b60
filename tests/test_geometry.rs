use sundial_geometry::geometry::*;
use sundial_geometry::types::{DialConfig, EllipseGeometry};
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

const LAT: f64 = -32.883;

// ── Ellipse ──

#[test]
fn test_ellipse_radii_mendoza() {
    let g = EllipseGeometry::new(LAT, 2.0).unwrap();
    assert_eq!(g.major_radius, 2.0);
    assert_approx!(g.minor_radius, 1.0859, 1e-4);
    assert_approx!(g.focal_distance, 1.6796, 1e-4);
    assert_approx!(
        g.focal_distance.powi(2) + g.minor_radius.powi(2),
        g.major_radius.powi(2),
        1e-12
    );
}

#[test]
fn test_ellipse_degenerate_at_pole_and_equator() {
    let pole = EllipseGeometry::new(90.0, 2.0).unwrap();
    assert_approx!(pole.minor_radius, 2.0, 1e-12);
    assert_approx!(pole.focal_distance, 0.0, 1e-6);
    let equator = EllipseGeometry::new(0.0, 2.0).unwrap();
    assert_approx!(equator.minor_radius, 0.0, 1e-12);
}

#[test]
fn test_ellipse_rejects_bad_latitude() {
    assert!(matches!(
        EllipseGeometry::new(95.0, 2.0),
        Err(Error::InvalidLatitude { .. })
    ));
}

#[test]
fn test_sweep_angles() {
    let t = sweep_angles(120.0, 17);
    assert_eq!(t.len(), 17);
    assert_approx!(t[0], -120.0, 1e-12);
    assert_approx!(t[8], 0.0, 1e-12);
    assert_approx!(t[16], 120.0, 1e-12);
    for w in t.windows(2) {
        assert_approx!(w[1] - w[0], 15.0, 1e-12);
    }
    assert!(sweep_angles(120.0, 0).is_empty());
    assert_eq!(sweep_angles(120.0, 1), vec![0.0]);
}

#[test]
fn test_ellipse_point_at_noon() {
    let g = EllipseGeometry::new(LAT, 2.0).unwrap();
    let points = ellipse_points(&g, &DialConfig::default());
    assert_eq!(points.len(), 17);
    let noon = points[8];
    assert_eq!(noon.hour, 12);
    assert_approx!(noon.x, 0.0, 1e-12);
    assert_approx!(noon.y, -1.085, 1e-3);
}

#[test]
fn test_ellipse_hours_descend() {
    let g = EllipseGeometry::new(LAT, 2.0).unwrap();
    let hours: Vec<u32> = ellipse_points(&g, &DialConfig::default())
        .iter()
        .map(|p| p.hour)
        .collect();
    let expected: Vec<u32> = (4..=20).rev().collect();
    assert_eq!(hours, expected);
}

#[test]
fn test_ellipse_symmetric_about_noon() {
    let g = EllipseGeometry::new(LAT, 2.0).unwrap();
    let points = ellipse_points(&g, &DialConfig::default());
    for i in 0..points.len() {
        let mirror = points[points.len() - 1 - i];
        assert_approx!(points[i].x, -mirror.x, 1e-12);
        assert_approx!(points[i].y, mirror.y, 1e-12);
        assert_approx!(points[i].t_degrees, -mirror.t_degrees, 1e-12);
    }
}

#[test]
fn test_ellipse_points_lie_on_ellipse() {
    let g = EllipseGeometry::new(LAT, 2.0).unwrap();
    for p in ellipse_points(&g, &DialConfig::default()) {
        let v = (p.x / g.major_radius).powi(2) + (p.y / g.minor_radius).powi(2);
        assert_approx!(v, 1.0, 1e-12);
    }
}

// ── Gnomon scale ──

#[test]
fn test_gnomon_scale_values() {
    assert_approx!(gnomon_scale(2.0, LAT, 0.0), 0.0, 1e-12);
    assert_approx!(gnomon_scale(2.0, LAT, 23.4498), 0.7285, 1e-4);
    assert_approx!(gnomon_scale(2.0, LAT, -23.4498), -0.7285, 1e-4);
}

#[test]
fn test_gnomon_scale_monotonic_in_declination() {
    let zs: Vec<f64> = (-23..=23)
        .map(|d| gnomon_scale(2.0, LAT, d as f64))
        .collect();
    for w in zs.windows(2) {
        assert!(w[0] < w[1]);
    }
}

#[test]
fn test_display_flips_sign() {
    assert_eq!(display_y(0.5), -0.5);
    assert_eq!(display_y(-1.085), 1.085);
}
