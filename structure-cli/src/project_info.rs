/// db-structure 项目信息模块
///
/// 面向用户的元数据统一在这里定义，structure-core 只提供技术性常量

/// 项目元数据（自动从 Cargo.toml 同步）
pub mod metadata {
    /// 项目名称
    pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");

    /// 项目描述
    pub const PROJECT_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

    /// 项目作者
    pub const PROJECT_AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

    /// 用户友好的显示名称（手动维护，用于终端显示）
    pub mod display {
        /// 交互模式标题
        pub const FRIENDLY_NAME: &str = "Database Structure Viewer";

        /// 项目详细描述
        pub const DESCRIPTION_LONG: &str = "查看 MySQL 数据库的表、列和索引结构，并找出创建或修改过这些表的 Laravel 迁移文件";
    }
}

/// 版本信息
pub mod version_info {
    /// CLI 版本（自动从 Cargo.toml 同步）
    pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// 获取版本信息字符串
pub fn get_version_string() -> String {
    format!("{} v{}", metadata::PROJECT_NAME, version_info::CLI_VERSION)
}
