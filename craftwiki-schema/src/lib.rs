pub mod category;
pub mod payload;

pub use category::{Category, ColumnDef, ColumnType, UnknownCategory};
pub use payload::{CategoryData, EntryData, ErrorPayload, InsertAck, RowCountAck, TableRow};
