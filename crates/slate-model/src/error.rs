use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid file id: {0:?}")]
    InvalidFileId(String),
    #[error("invalid table id: {0:?}")]
    InvalidTableId(String),
    #[error("table {table} has an empty column set")]
    EmptyColumnSet { table: String },
}
