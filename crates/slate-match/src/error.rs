use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("clustering cancelled by caller")]
    Cancelled,
}
