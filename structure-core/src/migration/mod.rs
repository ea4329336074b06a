mod matcher;
mod php;
mod repository;
mod types;


// 重新导出公共接口
pub use matcher::{classify, correlate, find_migrations_for, references_table};
pub use repository::MigrationRepository;
pub use types::{MigrationFile, MigrationKind, MigrationRecord};
