use slate_aggregate::AggregateError;
use slate_match::MatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request itself is malformed; nothing was computed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// No cluster derivable from the visible tables carries the fingerprint.
    #[error("no cluster matches fingerprint {0}")]
    NotFound(String),
    /// The table store failed; propagated as-is, retry belongs to the caller.
    #[error("upstream table source failed")]
    Upstream(#[from] anyhow::Error),
    /// The caller cancelled; no partial result was produced.
    #[error("request cancelled")]
    Cancelled,
}

impl From<MatchError> for ServiceError {
    fn from(error: MatchError) -> Self {
        match error {
            MatchError::Cancelled => Self::Cancelled,
        }
    }
}

impl From<AggregateError> for ServiceError {
    fn from(error: AggregateError) -> Self {
        match error {
            AggregateError::Cancelled => Self::Cancelled,
            AggregateError::MissingMember(_) => Self::Upstream(anyhow::anyhow!(error)),
        }
    }
}
