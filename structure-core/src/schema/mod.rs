mod inspector;
mod memory;
mod mysql;
mod source;
mod types;

// 重新导出公共接口
pub use inspector::SchemaInspector;
pub use memory::{MemorySchema, MemoryTable};
pub use mysql::MySqlSchema;
pub use source::SchemaSource;
pub use types::{ColumnInfo, IndexInfo};
