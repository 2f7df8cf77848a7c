//! Table metadata: columns, table schemas and row identifying keys.
mod column;
mod primary_key;
mod table;

pub use column::Column;
pub use primary_key::{KeyOrigin, PrimaryKey};
pub use table::TableSchema;
