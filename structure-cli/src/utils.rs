/// 日志文件路径环境变量，设置后日志写入文件而非终端
pub const LOG_FILE_ENV: &str = "DB_STRUCTURE_LOG_FILE";

/// 设置日志记录系统
///
/// - 库代码只使用 tracing 宏记录日志，在应用入口配置输出
/// - `RUST_LOG` 优先；否则 `-v` 时为 debug，默认 warn
/// - 终端日志写 stderr，stdout 只留给命令结果
/// - 设置 `DB_STRUCTURE_LOG_FILE` 时写入文件，带模块路径和行号
pub fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Ok(log_file) = std::env::var(LOG_FILE_ENV) {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
        {
            Ok(file) => {
                fmt()
                    .with_env_filter(env_filter)
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .init();
                return;
            }
            Err(e) => eprintln!("无法打开日志文件 {log_file}: {e}，日志改为输出到终端"),
        }
    }

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false)
        .without_time()
        .compact()
        .init();
}
