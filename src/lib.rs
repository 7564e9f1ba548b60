pub mod angles;
pub mod daily;
pub mod error;
pub mod geometry;
pub mod render;
pub mod series;
pub mod types;

pub use angles::{
    day_of_year, day_of_year_at, declination_at, deg_to_rad, equation_of_time,
    equation_of_time_at, hour_angle, hour_angle_at, intermediate_angle_b, longitude_to_360,
    meridian_displacement_minutes, rad_to_deg, shadow_height, solar_declination,
    solar_zenith_angle, standard_to_solar_time, validate_latitude, validate_longitude,
    DEGREES_PER_HOUR, EARTH_AXIAL_TILT, MINUTES_PER_DEGREE,
};

pub use daily::{
    calendar_scale_marks, default_highlight, is_solar_noon, reduce_daily, resolve_scale,
    SOLAR_NOON_TOLERANCE,
};

pub use error::{Error, Result};

pub use geometry::{display_y, ellipse_points, gnomon_scale, sweep_angles};

pub use render::{
    dial_label, equal_aspect_size, month_ticks, render_analemma, render_equation_of_time,
    render_sundial, widen_to_aspect, ChartConfig, ChartFormat, DateFormat, Language,
    SundialFace,
};

pub use series::{
    declination_extremes, equation_of_time_series, sample_at, sundial_series, year_timestamps,
    HasDeclination,
};

pub use types::{
    DailySeries, DeclinationExtreme, DeclinationExtremes, DialConfig, EllipseGeometry,
    EllipsePoint, EotSample, Highlight, ResolvedMark, Sample, ScaleMark, SiteConfig, TimeStep,
};
