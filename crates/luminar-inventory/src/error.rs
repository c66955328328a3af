use thiserror::Error;

/// Errors opening or reading the backing inventory table.
///
/// These never abort the service: the cache degrades to an empty dataset and
/// logs the failure instead.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no inventory source configured")]
    NotConfigured,

    #[error("failed to open inventory source: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read inventory source: {0}")]
    Csv(#[from] csv::Error),
}
