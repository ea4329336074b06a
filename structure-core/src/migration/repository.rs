use super::matcher::find_migrations_for;
use super::types::{MigrationFile, MigrationRecord};
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// 迁移目录
///
/// 目录只扫描一次，`show --all` 时所有表共用同一份文件列表
#[derive(Debug)]
pub struct MigrationRepository {
    dir: PathBuf,
    files: OnceLock<Option<Vec<MigrationFile>>>,
}

impl MigrationRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: OnceLock::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 加载目录下所有迁移文件（递归），按文件名排序
    ///
    /// 目录不存在时返回 `Ok(None)`；已列出的文件读取失败属于致命错误
    pub fn load(&self) -> Result<Option<&[MigrationFile]>> {
        if let Some(files) = self.files.get() {
            return Ok(files.as_deref());
        }
        let scanned = self.scan()?;
        Ok(self.files.get_or_init(|| scanned).as_deref())
    }

    /// 与该表相关的迁移记录，目录不存在时返回 `Ok(None)`
    pub fn find_for(&self, table: &str) -> Result<Option<Vec<MigrationRecord>>> {
        Ok(self
            .load()?
            .map(|files| find_migrations_for(table, files)))
    }

    fn scan(&self) -> Result<Option<Vec<MigrationFile>>> {
        if !self.dir.is_dir() {
            warn!("迁移目录不存在: {}", self.dir.display());
            return Ok(None);
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            // 非 UTF-8 文件（例如 Latin-1 编码的旧迁移）按有损方式解码，读取失败才算错误
            let bytes = fs::read(entry.path())?;
            let content = match String::from_utf8(bytes) {
                Ok(content) => content,
                Err(e) => {
                    debug!("迁移文件不是有效的 UTF-8，按有损方式解码: {}", entry.path().display());
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            files.push(MigrationFile {
                filename: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path().to_path_buf(),
                content,
            });
        }

        files.sort_by(|a, b| a.filename.cmp(&b.filename).then_with(|| a.path.cmp(&b.path)));
        debug!("迁移目录 {} 共 {} 个文件", self.dir.display(), files.len());
        Ok(Some(files))
    }
}

// 跳过隐藏文件和目录，例如 .gitkeep
fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
