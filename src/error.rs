#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
    #[error("failed to read EdgeTX log")]
    Csv(#[from] csv::Error),
    #[error("failed to parse form defaults")]
    Json(#[from] serde_json::Error),
    #[error("failed to format timestamp")]
    TimeFormat(#[from] time::error::Format),
    #[error("expected column `{0}` is missing in the log")]
    MissingColumn(&'static str),
    #[error("no valid GPS data found in log, check that the `GPS` and `Alt(m)` columns exist and contain data")]
    NoGpsData,
    #[error("invalid value `{value}` for field `{field}`")]
    InvalidField { field: &'static str, value: String },
}
