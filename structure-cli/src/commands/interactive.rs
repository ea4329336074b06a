use super::{run_list, run_show_all, run_show_table};
use crate::app::CliApp;
use crate::project_info::metadata;
use crate::prompt::Prompter;
use std::io::Write;
use structure_core::{Result, StructureError, schema::SchemaSource};
use tracing::debug;

const MENU: [&str; 3] = [
    "Show all tables structure",
    "Show specific table structure",
    "List all tables",
];

const MIGRATIONS_QUESTION: &str = "Do you want to see related migrations?";

/// 交互模式：菜单选择后进入对应流程
pub async fn run_interactive<S, P, W>(app: &mut CliApp<S, P, W>) -> Result<i32>
where
    S: SchemaSource,
    P: Prompter,
    W: Write,
{
    app.console.info(&format!("🔍 {}", metadata::display::FRIENDLY_NAME))?;
    app.console.new_line()?;
    app.console.flush()?;

    let choice = app.prompter.choice("What would you like to do?", &MENU, Some(0))?;
    debug!("交互菜单选择: {:?}", MENU.get(choice));

    match choice {
        0 => {
            let show_migrations = app.prompter.confirm(MIGRATIONS_QUESTION, true)?;
            run_show_all(app, show_migrations).await
        }
        1 => {
            let tables = app.inspector.list_tables().await?;
            if tables.is_empty() {
                return Err(StructureError::prompt("数据库中没有可选择的表"));
            }
            let options: Vec<&str> = tables.iter().map(String::as_str).collect();
            let index = app.prompter.choice("Select a table:", &options, None)?;
            let show_migrations = app.prompter.confirm(MIGRATIONS_QUESTION, true)?;
            run_show_table(app, &tables[index], show_migrations).await
        }
        _ => run_list(app).await,
    }
}
