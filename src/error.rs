use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("invalid dimension: width={width}, height={height}")]
    InvalidDimension { width: f64, height: f64 },

    #[error("host unavailable: {0}")]
    HostUnavailable(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
