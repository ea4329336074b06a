use super::migrations::show_related_migrations;
use crate::app::{CliApp, EXIT_FAILURE, EXIT_SUCCESS};
use crate::prompt::Prompter;
use std::io::Write;
use structure_core::{
    Result, StructureError,
    constants::display,
    schema::{ColumnInfo, IndexInfo, SchemaSource},
};
use tracing::{debug, warn};

const COLUMN_HEADERS: [&str; 6] = ["Name", "Type", "Null", "Key", "Default", "Extra"];
const INDEX_HEADERS: [&str; 4] = ["Name", "Column", "Unique", "Type"];

/// 显示单个表的结构，表不存在时返回退出码 1
pub async fn run_show_table<S, P, W>(
    app: &mut CliApp<S, P, W>,
    table: &str,
    show_migrations: bool,
) -> Result<i32>
where
    S: SchemaSource,
    P: Prompter,
    W: Write,
{
    if !app.inspector.table_exists(table).await? {
        warn!("表不存在: {}", table);
        app.console.error(&StructureError::table_not_found(table).to_string())?;
        return Ok(EXIT_FAILURE);
    }

    app.console.info(&format!("📋 Table: {table}"))?;
    app.console.new_line()?;

    let columns = app.inspector.columns(table).await?;
    debug!("表 {} 共 {} 列", table, columns.len());
    app.console.info("Columns:")?;
    let rows: Vec<Vec<String>> = columns.iter().map(column_row).collect();
    app.console.table(&COLUMN_HEADERS, &rows)?;

    let indexes = app.inspector.indexes(table).await?;
    if !indexes.is_empty() {
        app.console.new_line()?;
        app.console.info("Indexes:")?;
        let rows: Vec<Vec<String>> = indexes.iter().map(index_row).collect();
        app.console.table(&INDEX_HEADERS, &rows)?;
    }

    if show_migrations {
        app.console.new_line()?;
        show_related_migrations(app, table)?;
    }

    Ok(EXIT_SUCCESS)
}

/// 依次显示所有表，每个表后跟一条分隔线
pub async fn run_show_all<S, P, W>(app: &mut CliApp<S, P, W>, show_migrations: bool) -> Result<i32>
where
    S: SchemaSource,
    P: Prompter,
    W: Write,
{
    let tables = app.inspector.list_tables().await?;

    app.console.info("📊 Database Structure - All Tables")?;
    app.console.new_line()?;

    for table in &tables {
        run_show_table(app, table, show_migrations).await?;
        app.console.new_line()?;
        app.console.divider()?;
        app.console.new_line()?;
    }

    Ok(EXIT_SUCCESS)
}

fn column_row(column: &ColumnInfo) -> Vec<String> {
    vec![
        column.name.clone(),
        column.column_type.clone(),
        column.nullable.clone(),
        column.key.clone(),
        column
            .default
            .clone()
            .unwrap_or_else(|| display::NULL_TEXT.to_string()),
        column.extra.clone(),
    ]
}

fn index_row(index: &IndexInfo) -> Vec<String> {
    vec![
        index.name.clone(),
        index.column.clone(),
        if index.unique { "Yes" } else { "No" }.to_string(),
        index.index_type.clone(),
    ]
}
