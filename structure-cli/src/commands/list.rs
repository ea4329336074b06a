use crate::app::{CliApp, EXIT_SUCCESS};
use crate::prompt::Prompter;
use std::io::Write;
use structure_core::{Result, schema::SchemaSource};

/// 列出所有基础表
pub async fn run_list<S, P, W>(app: &mut CliApp<S, P, W>) -> Result<i32>
where
    S: SchemaSource,
    P: Prompter,
    W: Write,
{
    let tables = app.inspector.list_tables().await?;

    app.console.info("📋 Available Tables:")?;
    app.console.new_line()?;
    for (index, table) in tables.iter().enumerate() {
        app.console.line(&format!("{}. {}", index + 1, table))?;
    }
    app.console.new_line()?;
    app.console.info(&format!("Total: {} tables", tables.len()))?;

    Ok(EXIT_SUCCESS)
}
