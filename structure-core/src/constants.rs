/// 配置文件相关常量
pub mod config {
    use std::path::{Path, PathBuf};

    /// 默认配置文件名
    pub const CONFIG_FILE_NAME: &str = "db-structure.toml";

    /// 按优先级查找的配置文件列表
    pub const CONFIG_FILE_CANDIDATES: &[&str] = &["db-structure.toml", ".db-structure.toml"];

    /// Laravel 项目的环境变量文件
    pub const DOTENV_FILE_NAME: &str = ".env";

    /// 获取默认配置文件路径
    pub fn get_config_file_path() -> PathBuf {
        Path::new(".").join(CONFIG_FILE_NAME)
    }
}

/// 数据库相关常量
pub mod database {
    /// 默认连接地址
    pub const DEFAULT_URL: &str = "mysql://root@127.0.0.1:3306/laravel";

    /// 默认连接池大小（命令串行执行，一个连接即可）
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 1;

    /// 默认端口
    pub const DEFAULT_PORT: u16 = 3306;

    /// 支持的连接地址前缀
    pub const SUPPORTED_SCHEMES: &[&str] = &["mysql://", "mariadb://"];

    /// 连接地址环境变量
    pub const URL_ENV: &str = "DATABASE_URL";

    /// Laravel .env 中的数据库变量
    pub mod laravel_env {
        pub const HOST: &str = "DB_HOST";
        pub const PORT: &str = "DB_PORT";
        pub const DATABASE: &str = "DB_DATABASE";
        pub const USERNAME: &str = "DB_USERNAME";
        pub const PASSWORD: &str = "DB_PASSWORD";
    }
}

/// 迁移文件相关常量
pub mod migrations {
    /// 默认迁移目录（相对 Laravel 项目根目录）
    pub const DEFAULT_PATH: &str = "database/migrations";

    /// 迁移文件名时间戳前缀的格式，例如 2024_01_01_000000
    pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

    /// 时间戳前缀长度
    pub const TIMESTAMP_LEN: usize = 17;
}

/// 终端输出相关常量
pub mod display {
    /// 分隔线宽度
    pub const DIVIDER_WIDTH: usize = 80;

    /// 分隔线字符
    pub const DIVIDER_CHAR: char = '─';

    /// 空默认值的显示文本
    pub const NULL_TEXT: &str = "NULL";
}
