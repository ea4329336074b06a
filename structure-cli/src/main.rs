use clap::Parser;
use std::io;
use structure_cli::{Cli, Commands, Console, EXIT_FAILURE, run_init, run_structure, setup_logging};
use structure_core::{StructureError, constants::config};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // 解析命令行参数
    let cli = Cli::parse();

    // 设置日志记录
    setup_logging(cli.verbose);

    let args = match &cli.command {
        // `init` 命令是特例，它不需要预先加载配置
        Commands::Init { force } => {
            let path = cli.config.clone().unwrap_or_else(config::get_config_file_path);
            let mut console = Console::new(io::stdout());
            if let Err(e) = run_init(&mut console, &path, *force) {
                error!("❌ 初始化失败: {}", e);
                std::process::exit(EXIT_FAILURE);
            }
            return;
        }
        Commands::Structure(args) => args,
    };

    let code = match run_structure(&cli, args).await {
        Ok(code) => code,
        Err(StructureError::ConfigNotFound(path)) => {
            error!("❌ 配置文件 '{}' 未找到。", path.display());
            error!("👉 请先运行 'db-structure init' 命令来创建配置文件。");
            EXIT_FAILURE
        }
        Err(e) => {
            error!("❌ 操作失败: {}", e);
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}
