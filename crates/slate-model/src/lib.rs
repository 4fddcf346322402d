pub mod column;
pub mod error;
pub mod ids;
pub mod provenance;
pub mod table;
pub mod value;

pub use column::{ColumnDescriptor, ColumnType};
pub use error::ModelError;
pub use ids::{FileId, TableId};
pub use provenance::Provenance;
pub use table::{Row, Table};
pub use value::CellValue;
