// 私有模块声明
mod app;
mod cli;
mod commands;
mod console;
mod init;
pub mod project_info; // 公开项目信息模块
mod prompt;
mod utils;

// 通过 pub use 精确控制对外暴露的接口
pub use app::{CliApp, EXIT_FAILURE, EXIT_SUCCESS, Mode, run_structure};
pub use cli::{Cli, Commands, StructureArgs};
pub use console::Console;
pub use init::run_init;
pub use prompt::{Answer, NonInteractive, Prompter, ScriptedPrompter, TerminalPrompter};
pub use utils::{LOG_FILE_ENV, setup_logging};
