use super::php;
use super::types::{MigrationFile, MigrationKind, MigrationRecord};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Schema facade 调用（可带 connection(...)->），第一个参数必须是字符串字面量
static SCHEMA_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:\\?Illuminate\\Support\\Facades\\)?\bSchema\s*::\s*(?:connection\s*\([^)]*\)\s*->\s*)?(create|table|dropIfExists|drop|rename)\s*(\()\s*(?:'([^'\\]*)'|"([^"\\]*)")\s*([,)])"#,
    )
    .expect("Valid Schema call regex pattern")
});

/// 原生 SQL 执行调用，匹配到左括号后的空白为止
static RAW_SQL_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\\?Illuminate\\Support\\Facades\\)?\bDB\s*::\s*(?:connection\s*\([^)]*\)\s*->\s*)?(?:statement|unprepared)\s*\(\s*",
    )
    .expect("Valid raw SQL call regex pattern")
});

/// SQL 中的表名：反引号、双引号、单引号包裹或裸标识符，可带库名前缀
const SQL_TABLE_NAME_PATTERN: &str = r#"(?:`[^`]+`|"[^"]+"|'[^']+'|[\w$]+)(?:\s*\.\s*(?:`[^`]+`|"[^"]+"|'[^']+'|[\w$]+))?"#;

/// SQL 文本中的 CREATE / ALTER / DROP TABLE，捕获表名列表（DROP TABLE a, b）
static SQL_TABLE_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:CREATE|ALTER|DROP)\s+(?:TEMPORARY\s+)?TABLE\s+(?:IF\s+(?:NOT\s+)?EXISTS\s+)?({name}(?:\s*,\s*{name})*)",
        name = SQL_TABLE_NAME_PATTERN
    ))
    .expect("Valid SQL table statement regex pattern")
});

static SQL_TABLE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(SQL_TABLE_NAME_PATTERN).expect("Valid SQL table name regex pattern")
});

static DROP_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)->\s*(?:dropColumn|dropForeign|dropIndex|dropPrimary|dropUnique)\s*\(")
        .expect("Valid drop call regex pattern")
});

static RENAME_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)->\s*(?:renameColumn|renameIndex)\s*\(")
        .expect("Valid rename call regex pattern")
});

/// 新增列的类型方法，`id()`、`timestamps()` 等快捷方法不计
static COLUMN_TYPE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)->\s*(?:string|integer|text|boolean|date|timestamp|json|decimal|float|bigInteger|foreignId|foreign)\s*\(",
    )
    .expect("Valid column type call regex pattern")
});

static MODIFY_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)->\s*(?:change|modify)\s*\(").expect("Valid modify call regex pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaMethod {
    Create,
    Table,
    Drop,
    Rename,
}

/// 指向目标表的一次 Schema 调用
#[derive(Debug, Clone, Copy)]
struct SchemaCall {
    method: SchemaMethod,
    open_paren: usize,
}

/// 一段源码中与目标表相关的调用
struct TableUsage<'a> {
    text: &'a str,
    calls: Vec<SchemaCall>,
    raw_sql: bool,
}

impl<'a> TableUsage<'a> {
    fn scan(text: &'a str, table: &str) -> Self {
        Self {
            text,
            calls: schema_calls(text, table),
            raw_sql: raw_sql_references(text, table),
        }
    }

    fn references(&self) -> bool {
        !self.calls.is_empty() || self.raw_sql
    }

    fn has(&self, method: SchemaMethod) -> bool {
        self.calls.iter().any(|call| call.method == method)
    }

    fn kind(&self) -> MigrationKind {
        if self.has(SchemaMethod::Create) {
            MigrationKind::CreateTable
        } else if self.has(SchemaMethod::Table) {
            let blocks: Vec<&str> = self
                .calls
                .iter()
                .filter(|call| call.method == SchemaMethod::Table)
                .map(|call| php::call_arguments(self.text, call.open_paren))
                .collect();
            classify_alteration(&blocks)
        } else if self.has(SchemaMethod::Drop) {
            MigrationKind::DropTable
        } else if self.has(SchemaMethod::Rename) {
            MigrationKind::RenameTable
        } else if self.raw_sql {
            MigrationKind::RawSql
        } else {
            MigrationKind::Other
        }
    }
}

/// 表名比较：精确匹配，忽略大小写
fn same_table(candidate: &str, table: &str) -> bool {
    candidate == table || candidate.to_lowercase() == table.to_lowercase()
}

fn schema_calls(text: &str, table: &str) -> Vec<SchemaCall> {
    let mut calls = Vec::new();
    for caps in SCHEMA_CALL.captures_iter(text) {
        let Some(name) = caps.get(3).or_else(|| caps.get(4)) else {
            continue;
        };
        if !same_table(name.as_str(), table) {
            continue;
        }

        let method_name = caps[1].to_ascii_lowercase();
        let closes_immediately = &caps[5] == ")";
        let method = match (method_name.as_str(), closes_immediately) {
            ("create", false) => SchemaMethod::Create,
            ("table", false) => SchemaMethod::Table,
            ("rename", false) => SchemaMethod::Rename,
            ("drop" | "dropifexists", true) => SchemaMethod::Drop,
            _ => continue,
        };

        let Some(open_paren) = caps.get(2) else {
            continue;
        };
        calls.push(SchemaCall {
            method,
            open_paren: open_paren.start(),
        });
    }
    calls
}

fn raw_sql_references(text: &str, table: &str) -> bool {
    RAW_SQL_CALL.find_iter(text).any(|call| {
        php::string_literal_text(text, call.end())
            .is_some_and(|sql| sql_references_table(&sql, table))
    })
}

/// SQL 文本中是否存在针对该表的 CREATE / ALTER / DROP TABLE
pub(crate) fn sql_references_table(sql: &str, table: &str) -> bool {
    SQL_TABLE_STATEMENT.captures_iter(sql).any(|caps| {
        SQL_TABLE_NAME.find_iter(&caps[1]).any(|qualified| {
            let qualified = qualified.as_str();
            let name = qualified
                .rsplit('.')
                .next()
                .unwrap_or(qualified)
                .trim()
                .trim_matches(|c| c == '`' || c == '"' || c == '\'');
            same_table(name, table)
        })
    })
}

/// 根据 Schema::table 闭包内的调用判断修改类型
///
/// 优先级：删除 > 重命名 > 新增列 > 修改列 > 其他。以 ->change() / ->modify() 结尾的
/// 列定义语句算作修改，不算新增
fn classify_alteration(blocks: &[&str]) -> MigrationKind {
    let mut drops = false;
    let mut renames = false;
    let mut adds = false;
    let mut modifies = false;

    for statement in blocks.iter().flat_map(|block| php::split_statements(block)) {
        drops |= DROP_CALL.is_match(statement);
        renames |= RENAME_CALL.is_match(statement);
        if MODIFY_CALL.is_match(statement) {
            modifies = true;
        } else if COLUMN_TYPE_CALL.is_match(statement) {
            adds = true;
        }
    }

    if drops {
        MigrationKind::DropColumnOrKey
    } else if renames {
        MigrationKind::RenameColumnOrIndex
    } else if adds {
        MigrationKind::AddColumns
    } else if modifies {
        MigrationKind::ModifyColumns
    } else {
        MigrationKind::AlterTableOther
    }
}

/// 判断迁移文件是否引用了该表，引用时返回操作类型
///
/// 注释中的调用不计。分类优先看 up() 方法，up() 中没有引用该表时再看整个文件
pub fn correlate(content: &str, table: &str) -> Option<MigrationKind> {
    let source = php::strip_comments(content);
    let whole = TableUsage::scan(&source, table);
    if !whole.references() {
        return None;
    }

    let kind = php::up_method_body(&source)
        .map(|body| TableUsage::scan(body, table))
        .filter(TableUsage::references)
        .unwrap_or(whole)
        .kind();
    Some(kind)
}

/// 迁移文件内容是否引用了该表
pub fn references_table(content: &str, table: &str) -> bool {
    correlate(content, table).is_some()
}

/// 迁移文件对该表的操作类型，未引用时为 [`MigrationKind::Other`]
pub fn classify(content: &str, table: &str) -> MigrationKind {
    correlate(content, table).unwrap_or(MigrationKind::Other)
}

/// 找出与该表相关的迁移文件，按文件名升序（即时间顺序）
pub fn find_migrations_for(table: &str, files: &[MigrationFile]) -> Vec<MigrationRecord> {
    let mut records: Vec<MigrationRecord> = files
        .iter()
        .filter_map(|file| {
            let kind = correlate(&file.content, table)?;
            debug!("迁移文件 {} 关联表 {}: {:?}", file.filename, table, kind);
            Some(MigrationRecord::from_file(file, kind))
        })
        .collect();

    records.sort_by(|a, b| a.filename.cmp(&b.filename).then_with(|| a.path.cmp(&b.path)));
    records
}
