/// 表列定义（对应 SHOW COLUMNS 的一行）
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub column_type: String,
    /// 原样保留数据库返回的 YES / NO
    pub nullable: String,
    pub key: String,
    pub default: Option<String>,
    pub extra: String,
}

/// 表索引定义（对应 SHOW INDEXES 的一行，复合索引每列一行）
#[derive(Debug, Clone, PartialEq)]
pub struct IndexInfo {
    pub name: String,
    pub column: String,
    pub unique: bool,
    pub index_type: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            nullable: "YES".to_string(),
            key: String::new(),
            default: None,
            extra: String::new(),
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = "NO".to_string();
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }
}

impl IndexInfo {
    pub fn new(
        name: impl Into<String>,
        column: impl Into<String>,
        unique: bool,
        index_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            unique,
            index_type: index_type.into(),
        }
    }
}
