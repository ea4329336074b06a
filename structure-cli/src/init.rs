use crate::console::Console;
use std::io::Write;
use std::path::Path;
use structure_core::{Result, config::AppConfig};
use tracing::info;

/// 写入默认配置文件
///
/// 文件已存在且没有 `--force` 时不覆盖，返回 `Ok(false)`
pub fn run_init<W: Write>(console: &mut Console<W>, path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        console.warn(&format!("⚠️  Configuration file already exists: {}", path.display()))?;
        console.line("Run 'db-structure init --force' to overwrite it.")?;
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let config = AppConfig::default();
    config.save_to_file(path)?;
    info!("已创建配置文件: {}", path.display());

    console.info(&format!("✅ Created {}", path.display()))?;
    console.line("Edit [database] url and [migrations] path to match your project.")?;
    Ok(true)
}
