use super::source::SchemaSource;
use super::types::{ColumnInfo, IndexInfo};
use crate::Result;
use sqlx::Row;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::debug;

// information_schema 中的文本列在部分版本里是二进制排序规则，统一 CAST 成 CHAR 再解码
const LIST_TABLES_SQL: &str = r#"
SELECT CAST(TABLE_NAME AS CHAR) AS table_name
FROM information_schema.TABLES
WHERE TABLE_SCHEMA = DATABASE()
  AND TABLE_TYPE = 'BASE TABLE'
ORDER BY TABLE_NAME
"#;

const COLUMNS_SQL: &str = r#"
SELECT CAST(COLUMN_NAME AS CHAR) AS field,
       CAST(COLUMN_TYPE AS CHAR) AS column_type,
       CAST(IS_NULLABLE AS CHAR) AS is_nullable,
       CAST(COLUMN_KEY AS CHAR) AS column_key,
       CAST(COLUMN_DEFAULT AS CHAR) AS column_default,
       CAST(EXTRA AS CHAR) AS extra
FROM information_schema.COLUMNS
WHERE TABLE_SCHEMA = DATABASE()
  AND TABLE_NAME = ?
ORDER BY ORDINAL_POSITION
"#;

const INDEXES_SQL: &str = r#"
SELECT CAST(INDEX_NAME AS CHAR) AS key_name,
       CAST(COLUMN_NAME AS CHAR) AS column_name,
       CAST(NON_UNIQUE AS SIGNED) AS non_unique,
       CAST(INDEX_TYPE AS CHAR) AS index_type
FROM information_schema.STATISTICS
WHERE TABLE_SCHEMA = DATABASE()
  AND TABLE_NAME = ?
ORDER BY INDEX_NAME = 'PRIMARY' DESC, INDEX_NAME, SEQ_IN_INDEX
"#;

/// 基于 sqlx 的 MySQL 元数据来源
#[derive(Debug, Clone)]
pub struct MySqlSchema {
    pool: MySqlPool,
}

impl MySqlSchema {
    /// 连接到数据库
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(database_url)
            .await?;
        debug!("数据库连接成功");
        Ok(Self { pool })
    }

    /// 关闭连接池
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl SchemaSource for MySqlSchema {
    async fn list_base_tables(&self) -> Result<Vec<String>> {
        let rows = sqlx::query(LIST_TABLES_SQL).fetch_all(&self.pool).await?;

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            tables.push(row.try_get::<String, _>("table_name")?);
        }
        debug!("查询到 {} 个基础表", tables.len());
        Ok(tables)
    }

    async fn columns_of(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let rows = sqlx::query(COLUMNS_SQL)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            columns.push(ColumnInfo {
                name: row.try_get("field")?,
                column_type: row.try_get("column_type")?,
                nullable: row.try_get("is_nullable")?,
                key: row
                    .try_get::<Option<String>, _>("column_key")?
                    .unwrap_or_default(),
                default: row.try_get("column_default")?,
                extra: row
                    .try_get::<Option<String>, _>("extra")?
                    .unwrap_or_default(),
            });
        }
        debug!("表 {} 共 {} 列", table, columns.len());
        Ok(columns)
    }

    async fn indexes_of(&self, table: &str) -> Result<Vec<IndexInfo>> {
        let rows = sqlx::query(INDEXES_SQL)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        let mut indexes = Vec::with_capacity(rows.len());
        for row in rows {
            // 函数索引没有列名
            let column: Option<String> = row.try_get("column_name")?;
            let non_unique: i64 = row.try_get("non_unique")?;
            indexes.push(IndexInfo {
                name: row.try_get("key_name")?,
                column: column.unwrap_or_default(),
                unique: non_unique == 0,
                index_type: row.try_get("index_type")?,
            });
        }
        debug!("表 {} 共 {} 条索引记录", table, indexes.len());
        Ok(indexes)
    }
}
