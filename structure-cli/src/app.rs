use crate::cli::{Cli, StructureArgs};
use crate::commands;
use crate::console::Console;
use crate::project_info::get_version_string;
use crate::prompt::{NonInteractive, Prompter, TerminalPrompter};
use std::io::{self, Write};
use structure_core::{
    Result,
    config::AppConfig,
    migration::MigrationRepository,
    schema::{MySqlSchema, SchemaInspector, SchemaSource},
};
use tracing::debug;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// structure 命令的运行模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    List,
    ShowAll,
    ShowTable(String),
    Interactive,
}

impl Mode {
    /// 优先级：--list > --all > 表名 > 交互
    pub fn resolve(args: &StructureArgs) -> Self {
        if args.list {
            Mode::List
        } else if args.all {
            Mode::ShowAll
        } else if let Some(table) = &args.table {
            Mode::ShowTable(table.clone())
        } else {
            Mode::Interactive
        }
    }
}

/// 命令调度
///
/// 数据库来源、提问方式和输出目标都可以替换，测试中分别用
/// `MemorySchema`、`ScriptedPrompter` 和 `Vec<u8>`
pub struct CliApp<S, P, W> {
    pub(crate) inspector: SchemaInspector<S>,
    pub(crate) migrations: MigrationRepository,
    pub(crate) console: Console<W>,
    pub(crate) prompter: P,
    pub(crate) verbose: bool,
    pub(crate) dump_content: bool,
}

impl<S: SchemaSource, P: Prompter, W: Write> CliApp<S, P, W> {
    pub fn new(source: S, migrations: MigrationRepository, prompter: P, out: W) -> Self {
        Self {
            inspector: SchemaInspector::new(source),
            migrations,
            console: Console::new(out),
            prompter,
            verbose: false,
            dump_content: false,
        }
    }

    /// 显示迁移文件路径和日期
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// 直接输出迁移文件内容，不再询问
    pub fn with_content(mut self, dump_content: bool) -> Self {
        self.dump_content = dump_content;
        self
    }

    pub fn inspector(&self) -> &SchemaInspector<S> {
        &self.inspector
    }

    pub fn console(&self) -> &Console<W> {
        &self.console
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// 运行 structure 命令，返回进程退出码
    pub async fn run(&mut self, args: &StructureArgs) -> Result<i32> {
        let mode = Mode::resolve(args);
        debug!("运行模式: {:?}", mode);

        let show_migrations = args.wants_migrations();
        let code = match mode {
            Mode::List => commands::run_list(self).await?,
            Mode::ShowAll => commands::run_show_all(self, show_migrations).await?,
            Mode::ShowTable(table) => commands::run_show_table(self, &table, show_migrations).await?,
            Mode::Interactive => commands::run_interactive(self).await?,
        };
        self.console.flush()?;
        Ok(code)
    }
}

/// 根据命令行和配置文件连接数据库并运行 structure 命令
pub async fn run_structure(cli: &Cli, args: &StructureArgs) -> Result<i32> {
    debug!("{}", get_version_string());

    let config = AppConfig::find_and_load_config(cli.config.as_deref())?;
    let project_dir = std::env::current_dir()?;
    let database_url = config.resolve_database_url(cli.database_url.as_deref(), &project_dir)?;
    let migrations_dir = args
        .migrations_path
        .clone()
        .unwrap_or_else(|| config.migrations_dir());
    debug!("迁移目录: {}", migrations_dir.display());

    let source = MySqlSchema::connect(&database_url, config.database.max_connections).await?;
    let prompter: Box<dyn Prompter> = if args.no_interaction {
        Box::new(NonInteractive)
    } else {
        Box::new(TerminalPrompter::stdio())
    };

    let mut app = CliApp::new(source, MigrationRepository::new(migrations_dir), prompter, io::stdout())
        .with_verbose(cli.verbose)
        .with_content(args.content);
    let result = app.run(args).await;
    app.inspector.source().close().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Answer, ScriptedPrompter};
    use std::fs;
    use std::path::Path;
    use structure_core::StructureError;
    use structure_core::schema::{ColumnInfo, IndexInfo, MemorySchema, MemoryTable};
    use tempfile::tempdir;

    const CREATE_ORDERS: &str = "<?php\nreturn new class extends Migration {\n    public function up(): void\n    {\n        Schema::create('orders', function (Blueprint $table) {\n            $table->id();\n        });\n    }\n};\n";
    const ADD_STATUS: &str = "<?php\nSchema::table('orders', function (Blueprint $table) {\n    $table->string('status');\n});\n";
    const CREATE_USERS: &str = "<?php\nSchema::create('users', function (Blueprint $table) {\n    $table->id();\n});\n";

    const NO_ANSWERS: [Answer; 0] = [];

    fn shop_schema() -> MemorySchema {
        MemorySchema::new(vec![
            MemoryTable::new("users")
                .column(ColumnInfo::new("id", "bigint unsigned").not_null().key("PRI").extra("auto_increment"))
                .column(ColumnInfo::new("email", "varchar(255)").not_null().key("UNI"))
                .index(IndexInfo::new("PRIMARY", "id", true, "BTREE"))
                .index(IndexInfo::new("users_email_unique", "email", true, "BTREE")),
            MemoryTable::new("orders")
                .column(ColumnInfo::new("id", "bigint unsigned").not_null().key("PRI").extra("auto_increment"))
                .column(ColumnInfo::new("status", "varchar(255)").not_null().default_value("pending"))
                .column(ColumnInfo::new("note", "text")),
            MemoryTable::new("audit_log").column(ColumnInfo::new("payload", "json")),
        ])
    }

    fn write_migrations(dir: &Path) {
        fs::write(dir.join("2024_02_01_000000_add_status_to_orders_table.php"), ADD_STATUS).unwrap();
        fs::write(dir.join("2024_01_01_000000_create_orders_table.php"), CREATE_ORDERS).unwrap();
        fs::write(dir.join("2014_10_12_000000_create_users_table.php"), CREATE_USERS).unwrap();
    }

    fn app(
        dir: &Path,
        answers: impl IntoIterator<Item = Answer>,
    ) -> CliApp<MemorySchema, ScriptedPrompter, Vec<u8>> {
        CliApp::new(
            shop_schema(),
            MigrationRepository::new(dir),
            ScriptedPrompter::new(answers),
            Vec::new(),
        )
    }

    fn output<S: SchemaSource, P: Prompter>(app: &CliApp<S, P, Vec<u8>>) -> String {
        String::from_utf8(app.console().get_ref().clone()).unwrap()
    }

    fn args() -> StructureArgs {
        StructureArgs::default()
    }

    #[test]
    fn test_mode_precedence() {
        let mut a = StructureArgs {
            table: Some("orders".to_string()),
            all: true,
            list: true,
            ..args()
        };
        assert_eq!(Mode::resolve(&a), Mode::List);
        a.list = false;
        assert_eq!(Mode::resolve(&a), Mode::ShowAll);
        a.all = false;
        assert_eq!(Mode::resolve(&a), Mode::ShowTable("orders".to_string()));
        a.table = None;
        assert_eq!(Mode::resolve(&a), Mode::Interactive);
    }

    #[tokio::test]
    async fn test_list_tables() {
        let temp_dir = tempdir().unwrap();
        let mut app = app(temp_dir.path(), NO_ANSWERS);

        let code = app.run(&StructureArgs { list: true, ..args() }).await.unwrap();
        assert_eq!(code, EXIT_SUCCESS);

        let text = output(&app);
        assert!(text.contains("📋 Available Tables:"));
        let numbered: Vec<&str> = text.lines().filter(|l| l.starts_with(|c: char| c.is_ascii_digit())).collect();
        assert_eq!(numbered, vec!["1. audit_log", "2. orders", "3. users"]);
        assert!(text.contains("Total: 3 tables"));
    }

    #[tokio::test]
    async fn test_unknown_table_exits_with_failure() {
        let temp_dir = tempdir().unwrap();
        let mut app = app(temp_dir.path(), NO_ANSWERS);

        let run = StructureArgs {
            table: Some("ghost".to_string()),
            migrations: true,
            ..args()
        };
        let code = app.run(&run).await.unwrap();
        assert_eq!(code, EXIT_FAILURE);

        let text = output(&app);
        assert!(text.contains("Table 'ghost' does not exist!"));
        assert!(!text.contains("Columns:"));
        assert!(app.prompter().asked().is_empty());
    }

    #[tokio::test]
    async fn test_show_table_structure() {
        let temp_dir = tempdir().unwrap();
        let mut app = app(temp_dir.path(), NO_ANSWERS);

        let run = StructureArgs {
            table: Some("users".to_string()),
            ..args()
        };
        assert_eq!(app.run(&run).await.unwrap(), EXIT_SUCCESS);

        let text = output(&app);
        assert!(text.contains("📋 Table: users"));
        assert!(text.contains("| Name  | Type            | Null | Key | Default | Extra          |"));
        assert!(text.contains("| id    | bigint unsigned | NO   | PRI | NULL    | auto_increment |"));
        assert!(text.contains("Indexes:"));
        assert!(text.contains("| users_email_unique | email  | Yes    | BTREE |"));
        assert!(!text.contains("Related Migrations"));
    }

    #[tokio::test]
    async fn test_table_without_indexes_skips_index_section() {
        let temp_dir = tempdir().unwrap();
        let mut app = app(temp_dir.path(), NO_ANSWERS);

        let run = StructureArgs {
            table: Some("audit_log".to_string()),
            ..args()
        };
        app.run(&run).await.unwrap();

        let text = output(&app);
        assert!(text.contains("| payload | json | YES  |     | NULL    |       |"));
        assert!(!text.contains("Indexes:"));
    }

    #[tokio::test]
    async fn test_show_table_with_migrations() {
        let temp_dir = tempdir().unwrap();
        write_migrations(temp_dir.path());
        let mut app = app(temp_dir.path(), [Answer::Default]).with_verbose(true);

        let run = StructureArgs {
            table: Some("orders".to_string()),
            migrations: true,
            ..args()
        };
        assert_eq!(app.run(&run).await.unwrap(), EXIT_SUCCESS);

        let text = output(&app);
        assert!(text.contains("🔄 Related Migrations:"));
        let create = text.find("1. 2024_01_01_000000_create_orders_table.php").unwrap();
        let add = text.find("2. 2024_02_01_000000_add_status_to_orders_table.php").unwrap();
        assert!(create < add);
        assert!(text.contains("   Type: 🆕 Create Table"));
        assert!(text.contains("   Type: ➕ Add Column(s)"));
        assert!(text.contains("   Date: 2024-01-01 00:00:00"));
        assert!(text.contains(&format!(
            "   Path: {}",
            temp_dir.path().join("2024_01_01_000000_create_orders_table.php").display()
        )));
        assert!(text.contains("Total: 2 migration(s) found"));
        assert!(!text.contains("create_users_table"));

        // 默认不输出文件内容
        assert!(!text.contains("📄"));
        assert_eq!(
            app.prompter().asked(),
            ["Do you want to see the migration files content?"]
        );
    }

    #[tokio::test]
    async fn test_migration_content_dump() {
        let temp_dir = tempdir().unwrap();
        write_migrations(temp_dir.path());
        let mut app = app(temp_dir.path(), [Answer::Confirm(true)]);

        let run = StructureArgs {
            table: Some("users".to_string()),
            migrations: true,
            ..args()
        };
        app.run(&run).await.unwrap();

        let text = output(&app);
        assert!(!text.contains("   Path: "));
        assert!(text.contains("📄 2014_10_12_000000_create_users_table.php"));
        assert!(text.contains(&"─".repeat(80)));
        assert!(text.contains("Schema::create('users'"));
    }

    #[tokio::test]
    async fn test_content_flag_skips_confirmation() {
        let temp_dir = tempdir().unwrap();
        write_migrations(temp_dir.path());
        let mut app = app(temp_dir.path(), NO_ANSWERS).with_content(true);

        let run = StructureArgs {
            table: Some("orders".to_string()),
            content: true,
            ..args()
        };
        app.run(&run).await.unwrap();

        let text = output(&app);
        assert!(text.contains("📄 2024_02_01_000000_add_status_to_orders_table.php"));
        assert!(app.prompter().asked().is_empty());
    }

    #[tokio::test]
    async fn test_missing_migration_directory_is_a_warning() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("database/migrations");
        let mut app = app(&missing, NO_ANSWERS);

        let run = StructureArgs {
            table: Some("orders".to_string()),
            migrations: true,
            ..args()
        };
        assert_eq!(app.run(&run).await.unwrap(), EXIT_SUCCESS);

        let text = output(&app);
        assert!(text.contains(&format!("Migration directory not found: {}", missing.display())));
        assert!(!text.contains("Total:"));
        assert!(app.prompter().asked().is_empty());
    }

    #[tokio::test]
    async fn test_no_related_migrations() {
        let temp_dir = tempdir().unwrap();
        write_migrations(temp_dir.path());
        let mut app = app(temp_dir.path(), NO_ANSWERS);

        let run = StructureArgs {
            table: Some("audit_log".to_string()),
            migrations: true,
            ..args()
        };
        assert_eq!(app.run(&run).await.unwrap(), EXIT_SUCCESS);
        assert!(output(&app).contains("No migrations found for table 'audit_log'"));
    }

    #[tokio::test]
    async fn test_show_all_tables() {
        let temp_dir = tempdir().unwrap();
        let mut app = app(temp_dir.path(), NO_ANSWERS);

        let code = app.run(&StructureArgs { all: true, ..args() }).await.unwrap();
        assert_eq!(code, EXIT_SUCCESS);

        let text = output(&app);
        assert!(text.lines().next().unwrap().contains("📊 Database Structure - All Tables"));
        assert_eq!(text.matches(&"─".repeat(80)).count(), 3);
        let audit = text.find("📋 Table: audit_log").unwrap();
        let orders = text.find("📋 Table: orders").unwrap();
        let users = text.find("📋 Table: users").unwrap();
        assert!(audit < orders && orders < users);
        assert_eq!(app.inspector().source().table_queries(), 1);
    }

    #[tokio::test]
    async fn test_interactive_specific_table() {
        let temp_dir = tempdir().unwrap();
        write_migrations(temp_dir.path());
        // 菜单选 1，表清单 [audit_log, orders, users] 中选 1，显示迁移，不看内容
        let mut app = app(
            temp_dir.path(),
            [
                Answer::Choice(1),
                Answer::Choice(1),
                Answer::Default,
                Answer::Default,
            ],
        );

        assert_eq!(app.run(&args()).await.unwrap(), EXIT_SUCCESS);

        let text = output(&app);
        assert!(text.contains("🔍 Database Structure Viewer"));
        assert!(text.contains("📋 Table: orders"));
        assert!(text.contains("Total: 2 migration(s) found"));
        assert_eq!(
            app.prompter().asked(),
            [
                "What would you like to do?",
                "Select a table:",
                "Do you want to see related migrations?",
                "Do you want to see the migration files content?",
            ]
        );
        assert_eq!(app.prompter().remaining(), 0);
    }

    #[tokio::test]
    async fn test_interactive_list() {
        let temp_dir = tempdir().unwrap();
        let mut app = app(temp_dir.path(), [Answer::Choice(2)]);

        assert_eq!(app.run(&args()).await.unwrap(), EXIT_SUCCESS);
        assert!(output(&app).contains("Total: 3 tables"));
        assert_eq!(app.prompter().asked().len(), 1);
    }

    #[tokio::test]
    async fn test_interactive_show_all_without_migrations() {
        let temp_dir = tempdir().unwrap();
        write_migrations(temp_dir.path());
        let mut app = app(temp_dir.path(), [Answer::Default, Answer::Confirm(false)]);

        assert_eq!(app.run(&args()).await.unwrap(), EXIT_SUCCESS);

        let text = output(&app);
        assert!(text.contains("📊 Database Structure - All Tables"));
        assert!(!text.contains("Related Migrations"));
    }

    #[tokio::test]
    async fn test_interactive_without_tables_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let mut app = CliApp::new(
            MemorySchema::new(Vec::new()),
            MigrationRepository::new(temp_dir.path()),
            ScriptedPrompter::new([Answer::Choice(1)]),
            Vec::new(),
        );

        let err = app.run(&args()).await.unwrap_err();
        assert!(matches!(err, StructureError::Prompt(_)));
    }

    #[tokio::test]
    async fn test_database_unavailable_is_fatal() {
        let temp_dir = tempdir().unwrap();
        let mut app = CliApp::new(
            MemorySchema::unavailable("Connection refused"),
            MigrationRepository::new(temp_dir.path()),
            ScriptedPrompter::default(),
            Vec::new(),
        );

        let err = app.run(&StructureArgs { list: true, ..args() }).await.unwrap_err();
        assert!(matches!(err, StructureError::Database(_)));
    }

    #[tokio::test]
    async fn test_non_interactive_menu_shows_all() {
        let temp_dir = tempdir().unwrap();
        let mut app = CliApp::new(
            shop_schema(),
            MigrationRepository::new(temp_dir.path()),
            NonInteractive,
            Vec::new(),
        );

        assert_eq!(app.run(&args()).await.unwrap(), EXIT_SUCCESS);
        let text = output(&app);
        assert!(text.contains("📊 Database Structure - All Tables"));
        // 默认显示迁移，目录为空
        assert!(text.contains("No migrations found for table 'users'"));
    }
}
