use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid surface size: width={width}, height={height}")]
    InvalidSurface { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("{name} must be a fraction in its allowed domain, got {value}")]
    InvalidFraction { name: &'static str, value: f64 },

    #[error("{name} must be a percentage in [0, 100], got {value}")]
    InvalidPercentage { name: &'static str, value: f64 },

    #[error("invalid zoom: {0}")]
    InvalidZoom(f64),
}
