pub mod source;
pub mod value;

// Re-export key types for convenience
pub use source::{ColumnHints, DataSource};
pub use value::{ColumnKind, ColumnSchema, PropertyValue, Row};
