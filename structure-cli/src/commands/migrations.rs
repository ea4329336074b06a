use crate::app::CliApp;
use crate::prompt::Prompter;
use std::io::Write;
use structure_core::{Result, schema::SchemaSource};
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 显示与该表相关的迁移文件
///
/// 迁移目录不存在或没有匹配时只给出警告，不影响退出码
pub(crate) fn show_related_migrations<S, P, W>(app: &mut CliApp<S, P, W>, table: &str) -> Result<()>
where
    S: SchemaSource,
    P: Prompter,
    W: Write,
{
    app.console.info("🔄 Related Migrations:")?;
    app.console.new_line()?;

    let Some(records) = app.migrations.find_for(table)? else {
        let dir = app.migrations.dir().display().to_string();
        app.console.warn(&format!("Migration directory not found: {dir}"))?;
        return Ok(());
    };
    if records.is_empty() {
        app.console.warn(&format!("No migrations found for table '{table}'"))?;
        return Ok(());
    }

    for (index, record) in records.iter().enumerate() {
        app.console.line(&format!("{}. {}", index + 1, record.filename))?;
        app.console.line(&format!("   Type: {}", record.kind))?;
        if app.verbose {
            app.console.line(&format!("   Path: {}", record.path.display()))?;
            if let Some(timestamp) = record.timestamp() {
                app.console.line(&format!("   Date: {}", timestamp.format(DATE_FORMAT)))?;
            }
        }
    }
    app.console.new_line()?;
    app.console.info(&format!("Total: {} migration(s) found", records.len()))?;

    let dump = app.dump_content
        || app
            .prompter
            .confirm("Do you want to see the migration files content?", false)?;
    if !dump {
        return Ok(());
    }

    debug!("输出 {} 个迁移文件内容", records.len());
    for record in &records {
        app.console.new_line()?;
        app.console.info(&format!("📄 {}", record.filename))?;
        app.console.divider()?;
        app.console.line(&record.content)?;
    }
    Ok(())
}
