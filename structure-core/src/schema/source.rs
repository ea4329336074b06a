use super::types::{ColumnInfo, IndexInfo};
use crate::Result;

/// 数据库结构元数据来源
///
/// 每次调用都是一次独立的只读查询，不做缓存，缓存由 [`super::SchemaInspector`] 负责
#[allow(async_fn_in_trait)]
pub trait SchemaSource {
    /// 当前连接库中的所有基础表（不含视图）
    async fn list_base_tables(&self) -> Result<Vec<String>>;

    /// 指定表的列信息
    async fn columns_of(&self, table: &str) -> Result<Vec<ColumnInfo>>;

    /// 指定表的索引信息
    async fn indexes_of(&self, table: &str) -> Result<Vec<IndexInfo>>;
}
