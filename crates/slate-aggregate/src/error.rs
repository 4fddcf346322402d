use slate_model::TableId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("aggregation cancelled by caller")]
    Cancelled,
    #[error("cluster references table {0} that was not supplied")]
    MissingMember(TableId),
}
