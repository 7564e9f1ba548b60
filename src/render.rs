use std::path::Path;

use chrono::{Datelike, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use plotters_backend::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use crate::angles;
use crate::daily;
use crate::error::{Error, Result};
use crate::geometry::display_y;
use crate::types::{DailySeries, EllipsePoint, EotSample, Highlight, ResolvedMark, ScaleMark};

const EOT_BLUE: RGBColor = RGBColor(45, 151, 217);
const HIGHLIGHT_RED: RGBColor = RGBColor(220, 30, 30);
const FACE_PADDING: f64 = 0.35;
const HOUR_LABEL_OFFSET: f64 = 0.08;
const SCALE_LABEL_GAP: f64 = 0.08;
const CHART_MARGIN: u32 = 25;
const CAPTION_HEIGHT: u32 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartFormat {
    Png,
    Svg,
}

impl ChartFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ChartFormat::Png => "png",
            ChartFormat::Svg => "svg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Spanish,
    English,
}

impl Language {
    pub fn month_abbrev(self, date: NaiveDate) -> &'static str {
        const ES: [&str; 12] = [
            "ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SEP", "OCT", "NOV", "DIC",
        ];
        const EN: [&str; 12] = [
            "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
        ];
        let idx = date.month0() as usize;
        match self {
            Language::Spanish => ES[idx],
            Language::English => EN[idx],
        }
    }

    fn date_axis(self) -> &'static str {
        match self {
            Language::Spanish => "Fecha",
            Language::English => "Date",
        }
    }

    fn minutes_axis(self) -> &'static str {
        match self {
            Language::Spanish => "Minutos",
            Language::English => "Minutes",
        }
    }

    fn equation_of_time(self) -> &'static str {
        match self {
            Language::Spanish => "Ecuación del tiempo",
            Language::English => "Equation of time",
        }
    }

    fn declination_axis(self) -> &'static str {
        match self {
            Language::Spanish => "Declinación (°)",
            Language::English => "Declination (°)",
        }
    }

    fn analemma(self) -> &'static str {
        match self {
            Language::Spanish => "Analema",
            Language::English => "Analemma",
        }
    }
}

/// Date formatting scoped to one chart. `%b` expands to the language's month
/// abbreviation; every other specifier is handled by chrono.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pub pattern: String,
    pub language: Language,
}

impl DateFormat {
    pub fn new(pattern: impl Into<String>, language: Language) -> Self {
        Self {
            pattern: pattern.into(),
            language,
        }
    }

    pub fn format(&self, date: NaiveDate) -> String {
        let pattern = self
            .pattern
            .replace("%b", self.language.month_abbrev(date));
        date.format(&pattern).to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub format: ChartFormat,
    pub language: Language,
    pub date_format: DateFormat,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            format: ChartFormat::Png,
            language: Language::Spanish,
            date_format: DateFormat::new("%d/%m", Language::Spanish),
            width: 1280,
            height: 760,
        }
    }
}

impl ChartConfig {
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self.date_format.language = language;
        self
    }
}

/// "21 JUN" style label used on the dial face.
pub fn dial_label(date: NaiveDate, language: Language) -> String {
    format!("{} {}", date.day(), language.month_abbrev(date))
}

/// Day-of-year of the first of every month.
pub fn month_ticks(year: i32) -> Vec<f64> {
    (1..=12)
        .map(|month| angles::day_of_year(year, month, 1) as f64)
        .collect()
}

/// Canvas size whose plotting area keeps one data unit the same length on both axes.
pub fn equal_aspect_size(x_span: f64, y_span: f64, width: u32) -> (u32, u32) {
    let plot_width = width.saturating_sub(2 * CHART_MARGIN).max(1) as f64;
    let plot_height = (plot_width * y_span / x_span).round().max(1.0) as u32;
    (width, plot_height + 2 * CHART_MARGIN)
}

/// Widens whichever range is too narrow so both axes share one scale on a
/// `plot_width` x `plot_height` pixel area.
pub fn widen_to_aspect(
    x: (f64, f64),
    y: (f64, f64),
    plot_width: f64,
    plot_height: f64,
) -> ((f64, f64), (f64, f64)) {
    let (x_span, y_span) = (x.1 - x.0, y.1 - y.0);
    if x_span / plot_width < y_span / plot_height {
        let span = y_span * plot_width / plot_height;
        let mid = (x.0 + x.1) / 2.0;
        ((mid - span / 2.0, mid + span / 2.0), y)
    } else {
        let span = x_span * plot_height / plot_width;
        let mid = (y.0 + y.1) / 2.0;
        (x, (mid - span / 2.0, mid + span / 2.0))
    }
}

/// Everything drawn on the dial face, resolved to plain numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct SundialFace {
    pub points: Vec<EllipsePoint>,
    pub marks: Vec<ResolvedMark>,
    pub scale_range: (f64, f64),
    pub highlight: Highlight,
    pub highlight_z: f64,
}

impl SundialFace {
    pub fn new(
        points: Vec<EllipsePoint>,
        daily: &DailySeries,
        marks: &[ScaleMark],
        highlight: Highlight,
    ) -> Result<Self> {
        let scale_range = daily.z_range().ok_or(Error::EmptySeries)?;
        let marks = daily::resolve_scale(daily, marks)?;
        let highlight_z = daily.z_at(highlight.date)?;
        Ok(Self {
            points,
            marks,
            scale_range,
            highlight,
            highlight_z,
        })
    }

    /// Data-space bounds of the face as drawn, south-up.
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let (lo, hi) = self.scale_range;
        let ys = self
            .points
            .iter()
            .map(|p| display_y(p.y))
            .chain([display_y(lo), display_y(hi)]);
        let (y_min, y_max) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(a, b), y| {
            (a.min(y), b.max(y))
        });
        let x_max = self
            .points
            .iter()
            .map(|p| p.x.abs())
            .fold(0.0_f64, f64::max);
        (
            (-x_max - FACE_PADDING, x_max + FACE_PADDING),
            (y_min - FACE_PADDING, y_max + FACE_PADDING),
        )
    }
}

fn font(size: f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, size, FontStyle::Normal)
}

pub fn render_equation_of_time(path: &Path, samples: &[EotSample], config: &ChartConfig) -> Result<()> {
    let first = samples.first().ok_or(Error::EmptySeries)?;
    let year = first.timestamp.year();
    let size = (config.width, config.height);
    let drawn = match config.format {
        ChartFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_equation_of_time(root, samples, year, config)
        }
        ChartFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_equation_of_time(root, samples, year, config)
        }
    };
    drawn.map_err(|e| Error::Render(format!("{e:#}")))?;
    info!("Wrote equation-of-time chart: {}", path.display());
    Ok(())
}

pub fn render_sundial(path: &Path, face: &SundialFace, config: &ChartConfig) -> Result<()> {
    let ((x0, x1), (y0, y1)) = face.bounds();
    let size = equal_aspect_size(x1 - x0, y1 - y0, config.width);
    let drawn = match config.format {
        ChartFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_sundial(root, face, config)
        }
        ChartFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_sundial(root, face, config)
        }
    };
    drawn.map_err(|e| Error::Render(format!("{e:#}")))?;
    info!("Wrote sundial chart: {}", path.display());
    Ok(())
}

pub fn render_analemma(path: &Path, samples: &[EotSample], config: &ChartConfig) -> Result<()> {
    if samples.is_empty() {
        return Err(Error::EmptySeries);
    }
    let drawn = match config.format {
        ChartFormat::Png => {
            let root = BitMapBackend::new(path, (config.height, config.height)).into_drawing_area();
            draw_analemma(root, samples, config)
        }
        ChartFormat::Svg => {
            let root = SVGBackend::new(path, (config.height, config.height)).into_drawing_area();
            draw_analemma(root, samples, config)
        }
    };
    drawn.map_err(|e| Error::Render(format!("{e:#}")))?;
    info!("Wrote analemma chart: {}", path.display());
    Ok(())
}

fn value_range(values: impl Iterator<Item = f64>, pad: f64) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(a, b), v| {
        (a.min(v), b.max(v))
    });
    (lo - pad, hi + pad)
}

fn draw_equation_of_time<DB>(
    root: DrawingArea<DB, Shift>,
    samples: &[EotSample],
    year: i32,
    config: &ChartConfig,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let area = root;
    area.fill(&WHITE)?;

    let days = if angles::leap_year(year) { 366.0 } else { 365.0 };
    let (y_min, y_max) = value_range(samples.iter().map(|s| s.equation_of_time), 2.0);
    let date_format = &config.date_format;
    let lang = config.language;

    let mut chart = ChartBuilder::on(&area)
        .margin(CHART_MARGIN)
        .set_label_area_size(LabelAreaPosition::Left, 90)
        .set_label_area_size(LabelAreaPosition::Bottom, 90)
        .build_cartesian_2d(1.0..days, y_min..y_max)?;

    // Month-start ticks are drawn by hand; the mesh only carries the y axis.
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(lang.date_axis())
        .y_desc(lang.minutes_axis())
        .axis_desc_style(font(30.0))
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|v| format!("{:.0}", v))
        .label_style(font(20.0).color(&BLACK.mix(0.85)))
        .draw()?;

    let ticks = month_ticks(year);
    chart.draw_series(ticks.iter().map(|&doy| {
        PathElement::new(vec![(doy, y_min), (doy, y_max)], BLACK.mix(0.15))
    }))?;
    let tick_style = font(20.0)
        .color(&BLACK.mix(0.85))
        .pos(Pos::new(HPos::Center, VPos::Top));
    for &doy in &ticks {
        let Some(date) = NaiveDate::from_yo_opt(year, doy as u32) else {
            continue;
        };
        let (px, py) = chart.backend_coord(&(doy, y_min));
        area.draw(&Text::new(
            date_format.format(date),
            (px, py + 8),
            tick_style.clone(),
        ))?;
    }

    let line_style = ShapeStyle {
        color: EOT_BLUE.to_rgba(),
        filled: false,
        stroke_width: 5,
    };
    chart
        .draw_series(LineSeries::new(
            samples
                .iter()
                .map(|s| (s.day_of_year as f64, s.equation_of_time)),
            line_style,
        ))?
        .label(lang.equation_of_time())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], line_style));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.7))
        .border_style(&BLACK.mix(0.3))
        .label_font(font(20.0).color(&BLACK))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    area.present()?;
    Ok(())
}

fn draw_sundial<DB>(
    root: DrawingArea<DB, Shift>,
    face: &SundialFace,
    config: &ChartConfig,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let area = root;
    area.fill(&WHITE)?;

    let ((x0, x1), (y0, y1)) = face.bounds();
    let mut chart = ChartBuilder::on(&area)
        .margin(CHART_MARGIN)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    let lang = config.language;
    let hour_style = font(28.0)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    let left_style = font(28.0)
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    let right_style = font(28.0)
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));

    chart.draw_series(
        face.points
            .iter()
            .map(|p| Circle::new((p.x, display_y(p.y)), 12, BLACK.filled())),
    )?;
    chart.draw_series(face.points.iter().map(|p| {
        Text::new(
            p.hour.to_string(),
            (p.x, display_y(p.y) + HOUR_LABEL_OFFSET),
            hour_style.clone(),
        )
    }))?;

    // Dotted central scale, drawn as short dashes between the scale limits.
    let (lo, hi) = face.scale_range;
    let (top, bottom) = (display_y(lo), display_y(hi));
    let dash = (top - bottom) / 60.0;
    let scale_style = ShapeStyle {
        color: EOT_BLUE.to_rgba(),
        filled: false,
        stroke_width: 6,
    };
    chart.draw_series((0..30).map(|i| {
        let start = bottom + 2.0 * dash * i as f64;
        PathElement::new(vec![(0.0, start), (0.0, start + dash)], scale_style)
    }))?;

    chart.draw_series(
        face.marks
            .iter()
            .map(|m| Circle::new((0.0, display_y(m.z)), 12, EOT_BLUE.filled())),
    )?;
    for resolved in &face.marks {
        let y = display_y(resolved.z);
        if let Some(date) = resolved.mark.left_label {
            chart.draw_series(std::iter::once(Text::new(
                dial_label(date, lang),
                (-SCALE_LABEL_GAP, y),
                left_style.clone(),
            )))?;
        }
        if let Some(date) = resolved.mark.right_label {
            chart.draw_series(std::iter::once(Text::new(
                dial_label(date, lang),
                (SCALE_LABEL_GAP, y),
                right_style.clone(),
            )))?;
        }
    }

    let y = display_y(face.highlight_z);
    let (tail, tip) = (-0.5, -0.1);
    let arrow_style = ShapeStyle {
        color: HIGHLIGHT_RED.to_rgba(),
        filled: true,
        stroke_width: 3,
    };
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(tail, y), (tip - 0.05, y)],
        arrow_style,
    )))?;
    chart.draw_series(std::iter::once(Polygon::new(
        vec![(tip, y), (tip - 0.06, y + 0.03), (tip - 0.06, y - 0.03)],
        arrow_style,
    )))?;
    chart.draw_series(std::iter::once(Text::new(
        dial_label(face.highlight.date, lang),
        (tail - 0.01, y),
        font(28.0)
            .color(&HIGHLIGHT_RED)
            .pos(Pos::new(HPos::Right, VPos::Center)),
    )))?;

    area.present()?;
    Ok(())
}

fn draw_analemma<DB>(
    root: DrawingArea<DB, Shift>,
    samples: &[EotSample],
    config: &ChartConfig,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let area = root;
    area.fill(&WHITE)?;

    let lang = config.language;
    let (width, height) = area.dim_in_pixel();
    let label_area = 70;
    let plot_width = width.saturating_sub(2 * CHART_MARGIN + label_area).max(1);
    let plot_height = height
        .saturating_sub(2 * CHART_MARGIN + label_area + CAPTION_HEIGHT)
        .max(1);
    let ((x_min, x_max), (y_min, y_max)) = widen_to_aspect(
        value_range(samples.iter().map(|s| s.equation_of_time), 2.0),
        value_range(samples.iter().map(|s| s.declination), 2.0),
        plot_width as f64,
        plot_height as f64,
    );

    let mut chart = ChartBuilder::on(&area)
        .margin(CHART_MARGIN)
        .caption(lang.analemma(), font(30.0))
        .set_label_area_size(LabelAreaPosition::Left, label_area)
        .set_label_area_size(LabelAreaPosition::Bottom, label_area)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(format!("{} (E)", lang.equation_of_time()))
        .y_desc(lang.declination_axis())
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .label_style(font(18.0).color(&BLACK.mix(0.85)))
        .draw()?;

    chart.draw_series(LineSeries::new(
        samples.iter().map(|s| (s.equation_of_time, s.declination)),
        &BLACK,
    ))?;

    area.present()?;
    Ok(())
}
