use crate::constants::migrations;
use chrono::NaiveDateTime;
use std::fmt;
use std::path::PathBuf;

/// 迁移文件对某个表执行的操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MigrationKind {
    CreateTable,
    AddColumns,
    DropColumnOrKey,
    ModifyColumns,
    RenameColumnOrIndex,
    AlterTableOther,
    DropTable,
    RenameTable,
    RawSql,
    Other,
}

impl MigrationKind {
    /// 终端展示用的标签
    pub fn label(&self) -> &'static str {
        match self {
            MigrationKind::CreateTable => "🆕 Create Table",
            MigrationKind::AddColumns => "➕ Add Column(s)",
            MigrationKind::DropColumnOrKey => "➖ Remove Column(s) / Key(s)",
            MigrationKind::ModifyColumns => "✏️ Modify Column(s)",
            MigrationKind::RenameColumnOrIndex => "🔄 Rename Column / Index",
            MigrationKind::AlterTableOther => "🔧 Alter Table",
            MigrationKind::DropTable => "🗑️ Drop Table",
            MigrationKind::RenameTable => "🔀 Rename Table",
            MigrationKind::RawSql => "📜 Raw SQL",
            MigrationKind::Other => "❔ Other",
        }
    }
}

impl fmt::Display for MigrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 从磁盘读取的迁移文件
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationFile {
    pub filename: String,
    pub path: PathBuf,
    pub content: String,
}

impl MigrationFile {
    pub fn new(filename: impl Into<String>, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            path: path.into(),
            content: content.into(),
        }
    }

    /// 解析文件名中的时间戳前缀，例如 2024_01_01_000000_create_orders_table.php
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_filename_timestamp(&self.filename)
    }
}

/// 与某个表关联的迁移文件
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationRecord {
    pub filename: String,
    pub path: PathBuf,
    pub content: String,
    pub kind: MigrationKind,
}

impl MigrationRecord {
    pub fn from_file(file: &MigrationFile, kind: MigrationKind) -> Self {
        Self {
            filename: file.filename.clone(),
            path: file.path.clone(),
            content: file.content.clone(),
            kind,
        }
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_filename_timestamp(&self.filename)
    }
}

fn parse_filename_timestamp(filename: &str) -> Option<NaiveDateTime> {
    let prefix = filename.get(..migrations::TIMESTAMP_LEN)?;
    NaiveDateTime::parse_from_str(prefix, migrations::TIMESTAMP_FORMAT).ok()
}
