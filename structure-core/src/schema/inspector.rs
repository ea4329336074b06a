use super::source::SchemaSource;
use super::types::{ColumnInfo, IndexInfo};
use crate::Result;
use tokio::sync::OnceCell;
use tracing::debug;

/// 数据库结构查看器
///
/// 表清单在一次命令执行内只查询一次：命令只读，执行期间结构不会变化
#[derive(Debug)]
pub struct SchemaInspector<S> {
    source: S,
    tables: OnceCell<Vec<String>>,
}

impl<S: SchemaSource> SchemaInspector<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            tables: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 所有基础表，严格升序且无重复
    pub async fn list_tables(&self) -> Result<Vec<String>> {
        let tables = self
            .tables
            .get_or_try_init(|| async {
                let mut tables = self.source.list_base_tables().await?;
                // 数据库排序规则可能与字节序不同，这里统一成字节序
                tables.sort();
                tables.dedup();
                debug!("表清单已缓存: {} 个表", tables.len());
                Ok::<_, crate::StructureError>(tables)
            })
            .await?;
        Ok(tables.clone())
    }

    /// 表是否存在（区分大小写，与表清单精确比较）
    pub async fn table_exists(&self, name: &str) -> Result<bool> {
        let tables = self.list_tables().await?;
        Ok(tables.binary_search_by(|t| t.as_str().cmp(name)).is_ok())
    }

    pub async fn columns(&self, name: &str) -> Result<Vec<ColumnInfo>> {
        self.source.columns_of(name).await
    }

    pub async fn indexes(&self, name: &str) -> Result<Vec<IndexInfo>> {
        self.source.indexes_of(name).await
    }
}
