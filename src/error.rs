use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid longitude {value}° (must be between -180° and +180°)")]
    InvalidLongitude { value: f64 },

    #[error("invalid latitude {value}° (must be between -90° and +90°)")]
    InvalidLatitude { value: f64 },

    #[error("year {year} is outside the supported calendar range")]
    InvalidYear { year: i32 },

    #[error("sample series is empty")]
    EmptySeries,

    #[error("no solar-noon sample for {date}")]
    MissingDailySample { date: NaiveDate },

    #[error("plotting error: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
