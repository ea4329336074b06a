use super::source::SchemaSource;
use super::types::{ColumnInfo, IndexInfo};
use crate::Result;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 内存中的表定义
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub indexes: Vec<IndexInfo>,
}

impl MemoryTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn column(mut self, column: ColumnInfo) -> Self {
        self.columns.push(column);
        self
    }

    pub fn index(mut self, index: IndexInfo) -> Self {
        self.indexes.push(index);
        self
    }
}

/// 内存元数据来源 (主要用于测试，不依赖真实数据库即可驱动整个命令流程)
///
/// 表按插入顺序返回，不做排序
#[derive(Debug, Default)]
pub struct MemorySchema {
    tables: Vec<MemoryTable>,
    unavailable: Option<String>,
    table_queries: AtomicUsize,
}

impl MemorySchema {
    pub fn new(tables: Vec<MemoryTable>) -> Self {
        Self {
            tables,
            ..Default::default()
        }
    }

    /// 模拟连接不可用，所有查询都返回数据库错误
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            unavailable: Some(message.into()),
            ..Default::default()
        }
    }

    /// 表清单被查询的次数
    pub fn table_queries(&self) -> usize {
        self.table_queries.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<()> {
        match &self.unavailable {
            Some(message) => Err(sqlx::Error::Protocol(message.clone()).into()),
            None => Ok(()),
        }
    }

    fn find(&self, table: &str) -> Option<&MemoryTable> {
        self.tables.iter().find(|t| t.name == table)
    }
}

impl SchemaSource for MemorySchema {
    async fn list_base_tables(&self) -> Result<Vec<String>> {
        self.table_queries.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.tables.iter().map(|t| t.name.clone()).collect())
    }

    async fn columns_of(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        self.check_available()?;
        Ok(self
            .find(table)
            .map(|t| t.columns.clone())
            .unwrap_or_default())
    }

    async fn indexes_of(&self, table: &str) -> Result<Vec<IndexInfo>> {
        self.check_available()?;
        Ok(self
            .find(table)
            .map(|t| t.indexes.clone())
            .unwrap_or_default())
    }
}
