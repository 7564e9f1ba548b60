use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sundial_geometry::{
    calendar_scale_marks, declination_extremes, default_highlight, ellipse_points,
    equation_of_time_series, reduce_daily, render_analemma, render_equation_of_time,
    render_sundial, sundial_series, year_timestamps, ChartConfig, ChartFormat, DialConfig,
    EllipseGeometry, EotSample, Language, SiteConfig, SundialFace, TimeStep,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Equation-of-time and analemmatic sundial charts", long_about = None)]
struct Cli {
    /// Directory the charts are written to
    #[arg(short, long, default_value = ".", value_hint = ValueHint::DirPath)]
    out_dir: PathBuf,

    /// Image format of the charts
    #[arg(long, value_enum, default_value_t = FormatOpt::Png)]
    format: FormatOpt,

    /// Charts to produce; repeat the flag for several (default: eot and sundial)
    #[arg(long = "report", value_enum)]
    reports: Vec<ReportOpt>,

    /// Language of labels and month names
    #[arg(long, value_enum, default_value_t = LanguageOpt::Es)]
    language: LanguageOpt,

    /// Enable debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FormatOpt {
    Png,
    Svg,
}

impl From<FormatOpt> for ChartFormat {
    fn from(value: FormatOpt) -> Self {
        match value {
            FormatOpt::Png => ChartFormat::Png,
            FormatOpt::Svg => ChartFormat::Svg,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ReportOpt {
    Eot,
    Sundial,
    Analemma,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LanguageOpt {
    Es,
    En,
}

impl From<LanguageOpt> for Language {
    fn from(value: LanguageOpt) -> Self {
        match value {
            LanguageOpt::Es => Language::Spanish,
            LanguageOpt::En => Language::English,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let site = SiteConfig::default();
    site.validate().context("invalid site parameters")?;
    let dial = DialConfig::default();

    let mut chart = ChartConfig::default().with_language(cli.language.into());
    chart.format = cli.format.into();

    let reports = if cli.reports.is_empty() {
        vec![ReportOpt::Eot, ReportOpt::Sundial]
    } else {
        cli.reports
    };

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating output directory {}", cli.out_dir.display()))?;

    if reports.contains(&ReportOpt::Eot) || reports.contains(&ReportOpt::Analemma) {
        let days = year_timestamps(site.year, TimeStep::Daily)?;
        let eot = equation_of_time_series(&days, &site)?;
        if reports.contains(&ReportOpt::Eot) {
            let path = chart_path(&cli.out_dir, "equation_of_time", &chart);
            render_equation_of_time(&path, &eot, &chart)
                .with_context(|| format!("rendering {}", path.display()))?;
        }
        if reports.contains(&ReportOpt::Analemma) {
            let path = chart_path(&cli.out_dir, "analemma", &chart);
            render_analemma(&path, &eot, &chart)
                .with_context(|| format!("rendering {}", path.display()))?;
        }
        log_offset_range(&eot);
    }

    if reports.contains(&ReportOpt::Sundial) {
        write_sundial(&cli.out_dir, &site, &dial, &chart)?;
    }

    Ok(())
}

fn chart_path(dir: &Path, stem: &str, chart: &ChartConfig) -> PathBuf {
    dir.join(format!("{}.{}", stem, chart.format.extension()))
}

fn log_offset_range(eot: &[EotSample]) {
    let (lo, hi) = eot.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(a, b), s| {
        (a.min(s.standard_offset), b.max(s.standard_offset))
    });
    info!(
        min_minutes = lo,
        max_minutes = hi,
        "clock-to-solar offset over the year"
    );
}

fn write_sundial(
    out_dir: &Path,
    site: &SiteConfig,
    dial: &DialConfig,
    chart: &ChartConfig,
) -> Result<()> {
    let minutes = year_timestamps(site.year, TimeStep::Minute)?;
    let samples = sundial_series(&minutes, site, dial)?;

    let extremes = declination_extremes(&samples)?;
    info!(
        "Maximum declination: {:.4}° ({})",
        extremes.max.declination, extremes.max.timestamp
    );
    info!(
        "Minimum declination: {:.4}° ({})",
        extremes.min.declination, extremes.min.timestamp
    );

    let daily = reduce_daily(&samples);
    info!(days = daily.len(), "solar-noon samples");

    let geometry = EllipseGeometry::new(site.latitude, dial.outer_radius)?;
    debug!(
        major = geometry.major_radius,
        minor = geometry.minor_radius,
        focal = geometry.focal_distance,
        "dial ellipse"
    );

    let face = SundialFace::new(
        ellipse_points(&geometry, dial),
        &daily,
        &calendar_scale_marks(site.year)?,
        default_highlight(site.year)?,
    )?;

    let path = chart_path(out_dir, "sundial", chart);
    render_sundial(&path, &face, chart).with_context(|| format!("rendering {}", path.display()))?;
    Ok(())
}
