use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StructureError>;

#[derive(Error, Debug)]
pub enum StructureError {
    #[error("Table '{0}' does not exist!")]
    TableNotFound(String),

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("目录遍历错误: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("配置错误: {0}")]
    Config(#[from] toml::de::Error),

    #[error("配置序列化错误: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("配置文件未找到: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("数据库连接地址无效: {0}")]
    InvalidDatabaseUrl(String),

    #[error("交互输入错误: {0}")]
    Prompt(String),

    #[error("自定义错误: {0}")]
    Custom(String),
}

impl StructureError {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    pub fn prompt(msg: impl Into<String>) -> Self {
        Self::Prompt(msg.into())
    }

    pub fn table_not_found(table: impl Into<String>) -> Self {
        Self::TableNotFound(table.into())
    }
}
