use crate::project_info::{metadata, version_info};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use structure_core::constants::database;

/// 查看数据库结构并关联迁移文件
#[derive(Parser, Debug)]
#[command(name = "db-structure")]
#[command(about = metadata::PROJECT_DESCRIPTION)]
#[command(version = version_info::CLI_VERSION)]
#[command(long_about = metadata::display::DESCRIPTION_LONG)]
#[command(author = metadata::PROJECT_AUTHORS)]
pub struct Cli {
    /// 配置文件路径（默认查找 db-structure.toml / .db-structure.toml）
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 详细输出：显示迁移文件路径和日期，日志级别调为 debug
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 数据库连接地址，覆盖配置文件
    #[arg(long, env = database::URL_ENV, global = true, hide_env_values = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// structure 命令参数
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureArgs {
    /// 要查看的表名
    pub table: Option<String>,

    /// 显示所有表的结构
    #[arg(long)]
    pub all: bool,

    /// 只列出所有表名
    #[arg(long)]
    pub list: bool,

    /// 显示相关的迁移文件
    #[arg(long)]
    pub migrations: bool,

    /// 直接输出迁移文件内容，不再询问（隐含 --migrations）
    #[arg(long)]
    pub content: bool,

    /// 迁移目录，覆盖配置文件
    #[arg(long, value_name = "DIR")]
    pub migrations_path: Option<PathBuf>,

    /// 不读取标准输入，所有提问都使用默认答案
    #[arg(short = 'n', long)]
    pub no_interaction: bool,
}

impl StructureArgs {
    /// 是否显示相关迁移
    pub fn wants_migrations(&self) -> bool {
        self.migrations || self.content
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 查看表结构和相关迁移
    Structure(StructureArgs),
    /// 在当前目录创建默认配置文件
    Init {
        /// 如果配置文件已存在，强制覆盖
        #[arg(long)]
        force: bool,
    },
}
