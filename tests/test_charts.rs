use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use sundial_geometry::render::*;
use sundial_geometry::types::*;
use sundial_geometry::{
    calendar_scale_marks, default_highlight, ellipse_points, equation_of_time_series,
    reduce_daily, sundial_series, year_timestamps,
};

static EOT: LazyLock<Vec<EotSample>> = LazyLock::new(|| {
    let site = SiteConfig::default();
    let days = year_timestamps(site.year, TimeStep::Daily).unwrap();
    equation_of_time_series(&days, &site).unwrap()
});

static FACE: LazyLock<SundialFace> = LazyLock::new(|| {
    let site = SiteConfig::default();
    let dial = DialConfig::default();
    let minutes = year_timestamps(site.year, TimeStep::Minute).unwrap();
    let daily = reduce_daily(&sundial_series(&minutes, &site, &dial).unwrap());
    let geometry = EllipseGeometry::new(site.latitude, dial.outer_radius).unwrap();
    SundialFace::new(
        ellipse_points(&geometry, &dial),
        &daily,
        &calendar_scale_marks(site.year).unwrap(),
        default_highlight(site.year).unwrap(),
    )
    .unwrap()
});

fn output_path(stem: &str, format: ChartFormat) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sundial_geometry_charts_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{}.{}", stem, format.extension()));
    let _ = fs::remove_file(&path);
    path
}

fn config(format: ChartFormat) -> ChartConfig {
    ChartConfig {
        format,
        ..ChartConfig::default()
    }
}

fn assert_written(path: &PathBuf) {
    let len = fs::metadata(path).unwrap().len();
    assert!(len > 0, "{} is empty", path.display());
}

// ── Equation of time ──

#[test]
fn test_equation_of_time_chart_png() {
    let path = output_path("eot", ChartFormat::Png);
    render_equation_of_time(&path, &EOT, &config(ChartFormat::Png)).unwrap();
    assert_written(&path);
}

#[test]
fn test_equation_of_time_chart_svg() {
    let path = output_path("eot", ChartFormat::Svg);
    let english = config(ChartFormat::Svg).with_language(Language::English);
    render_equation_of_time(&path, &EOT, &english).unwrap();
    assert_written(&path);
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("01/06"), "month-start tick missing");
}

// ── Analemma ──

#[test]
fn test_analemma_chart_png() {
    let path = output_path("analemma", ChartFormat::Png);
    render_analemma(&path, &EOT, &config(ChartFormat::Png)).unwrap();
    assert_written(&path);
}

#[test]
fn test_analemma_chart_svg() {
    let path = output_path("analemma", ChartFormat::Svg);
    render_analemma(&path, &EOT, &config(ChartFormat::Svg)).unwrap();
    assert_written(&path);
}

// ── Sundial ──

#[test]
fn test_sundial_chart_png() {
    let path = output_path("sundial", ChartFormat::Png);
    render_sundial(&path, &FACE, &config(ChartFormat::Png)).unwrap();
    assert_written(&path);
}

#[test]
fn test_sundial_chart_svg() {
    let path = output_path("sundial", ChartFormat::Svg);
    render_sundial(&path, &FACE, &config(ChartFormat::Svg)).unwrap();
    assert_written(&path);
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("21 JUN"));
    assert!(svg.contains("29 ABR"));
}
