// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Project automation for the canteen workspace.
//!
//! `cargo test` only ever touches in-memory `SQLite`. Everything that needs
//! a real MySQL/MariaDB server is opt-in and lives here:
//!
//! - `cargo xtask test-mariadb` starts a throwaway `MariaDB` container and
//!   runs the ignored backend validation tests of `canteen-persistence`
//!   against it.
//! - `cargo xtask verify-migrations` applies both migration trees and fails
//!   if the resulting schemas differ.
//!
//! Containers are removed when the command finishes, even on failure.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{
    collections::{BTreeMap, BTreeSet},
    io,
    process::Output,
    thread::sleep,
    time::Duration,
};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const SQLITE_MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");
const MYSQL_MIGRATIONS: EmbeddedMigrations =
    embed_migrations!("../crates/persistence/migrations_mysql");

/// Seconds to wait for a fresh `MariaDB` container to accept connections.
const MARIADB_READY_ATTEMPTS: u32 = 30;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Run `MariaDB` backend validation tests
    #[command(visible_alias = "tm")]
    TestMariadb,

    /// Verify schema parity between `SQLite` and `MySQL` migrations
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::TestMariadb => test_mariadb(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks (lint, build, test)
fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    test_mariadb()?;
    verify_migrations()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Lint formatting, typos, clippy, and docs
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without warnings for every default package
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTDOCFLAGS", "-D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Check for typos in the project using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

/// Run lib tests, then doc tests
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?;
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// A disposable `MariaDB` 11 container.
///
/// The container is stopped and removed when the guard is dropped.
struct MariaDbContainer {
    name: &'static str,
    port: u16,
    database: &'static str,
    user: &'static str,
    password: &'static str,
}

impl MariaDbContainer {
    /// Starts the container and blocks until it accepts queries.
    fn start(
        name: &'static str,
        port: u16,
        database: &'static str,
        password: &'static str,
    ) -> Result<Self> {
        cmd!("docker", "--version")
            .run_with_trace()
            .wrap_err("Docker is not available. Please install Docker.")?;

        let container = Self {
            name,
            port,
            database,
            user: "canteen",
            password,
        };
        container.remove();

        tracing::info!("Starting MariaDB container: {}", name);
        cmd!(
            "docker",
            "run",
            "--name",
            name,
            "-e",
            format!("MARIADB_DATABASE={database}"),
            "-e",
            format!("MARIADB_USER={}", container.user),
            "-e",
            format!("MARIADB_PASSWORD={password}"),
            "-e",
            "MARIADB_ROOT_PASSWORD=root_password",
            "-p",
            format!("{port}:3306"),
            "-d",
            "mariadb:11"
        )
        .run_with_trace()
        .wrap_err("Failed to start MariaDB container")?;

        container.wait_until_ready()?;
        Ok(container)
    }

    fn wait_until_ready(&self) -> Result<()> {
        tracing::info!("Waiting for MariaDB to be ready...");
        for attempt in 1..=MARIADB_READY_ATTEMPTS {
            sleep(Duration::from_secs(1));
            tracing::debug!("Connection attempt {}/{}", attempt, MARIADB_READY_ATTEMPTS);

            let probe = cmd!(
                "docker",
                "exec",
                self.name,
                "mariadb",
                "-u",
                self.user,
                format!("-p{}", self.password),
                "-e",
                "SELECT 1"
            )
            .stdout_null()
            .stderr_null()
            .run();

            if probe.is_ok() {
                tracing::info!("MariaDB is ready");
                return Ok(());
            }
        }
        Err(eyre!("MariaDB did not become ready within timeout"))
    }

    fn database_url(&self) -> String {
        format!(
            "mysql://{}:{}@127.0.0.1:{}/{}",
            self.user, self.password, self.port, self.database
        )
    }

    fn remove(&self) {
        let _ = cmd!("docker", "stop", self.name)
            .stdout_null()
            .stderr_null()
            .run();
        let _ = cmd!("docker", "rm", self.name)
            .stdout_null()
            .stderr_null()
            .run();
    }
}

impl Drop for MariaDbContainer {
    fn drop(&mut self) {
        tracing::info!("Removing MariaDB container: {}", self.name);
        self.remove();
    }
}

/// Run `MariaDB` backend validation tests
///
/// Runs the `#[ignore]`d `backend_validation_tests` of `canteen-persistence`
/// with `DATABASE_URL` pointing at a fresh container and
/// `CANTEEN_TEST_BACKEND=mariadb`. Port 3307 must be free.
fn test_mariadb() -> Result<()> {
    tracing::info!("Starting MariaDB backend validation");

    let container = MariaDbContainer::start(
        "canteen-test-mariadb",
        3307,
        "canteen_test",
        "test_password",
    )?;

    tracing::info!("Running MariaDB backend validation tests");
    cmd!(
        "cargo",
        "test",
        "--package",
        "canteen-persistence",
        "backend_validation_tests",
        "--",
        "--ignored",
        "--test-threads=1"
    )
    .env("DATABASE_URL", container.database_url())
    .env("CANTEEN_TEST_BACKEND", "mariadb")
    .run_with_trace()
    .wrap_err("MariaDB backend validation tests failed")?;

    tracing::info!("MariaDB backend validation completed successfully");
    Ok(())
}

/// Verify schema parity between `SQLite` and `MySQL` migrations
///
/// Applies `migrations/` to an in-memory `SQLite` database and
/// `migrations_mysql/` to a `MariaDB` container on port 3308, then compares
/// tables, column types, nullability, primary keys and foreign keys.
fn verify_migrations() -> Result<()> {
    tracing::info!("Starting schema parity verification");

    let container = MariaDbContainer::start(
        "canteen-verify-migrations",
        3308,
        "canteen_verify",
        "verify_password",
    )?;

    let mut sqlite_conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut sqlite_conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;
    sqlite_conn
        .run_pending_migrations(SQLITE_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply SQLite migrations: {e}"))?;
    tracing::info!("SQLite migrations applied");

    let mut mysql_conn = MysqlConnection::establish(&container.database_url())
        .wrap_err("Failed to connect to MariaDB")?;
    mysql_conn
        .run_pending_migrations(MYSQL_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply MySQL migrations: {e}"))?;
    tracing::info!("MySQL migrations applied");

    let sqlite_schema = introspect_sqlite_schema(&mut sqlite_conn)?;
    let mysql_schema = introspect_mysql_schema(&mut mysql_conn)?;

    let mismatches: Vec<String> = compare_schemas(&sqlite_schema, &mysql_schema);
    if mismatches.is_empty() {
        tracing::info!(
            tables = sqlite_schema.len(),
            "Schema parity verification passed"
        );
        Ok(())
    } else {
        for mismatch in &mismatches {
            tracing::error!("{mismatch}");
        }
        Err(eyre!(
            "Schema parity verification failed with {} mismatch(es)",
            mismatches.len()
        ))
    }
}

/// Table name to normalized table shape.
type Schema = BTreeMap<String, Table>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Table {
    /// Column name to (normalized type, nullable).
    columns: BTreeMap<String, (ColumnType, bool)>,
    primary_key: BTreeSet<String>,
    /// (column, referenced table, referenced column)
    foreign_keys: BTreeSet<(String, String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Integer,
    Text,
    Other,
}

impl ColumnType {
    fn from_sqlite(declared: &str) -> Self {
        let declared = declared.to_uppercase();
        if declared.contains("INT") {
            Self::Integer
        } else if declared.contains("TEXT") || declared.contains("CHAR") {
            Self::Text
        } else {
            Self::Other
        }
    }

    fn from_mysql(data_type: &str) -> Self {
        match data_type.to_lowercase().as_str() {
            "tinyint" | "smallint" | "mediumint" | "int" | "bigint" => Self::Integer,
            "char" | "varchar" | "tinytext" | "text" | "mediumtext" | "longtext" => Self::Text,
            _ => Self::Other,
        }
    }
}

fn is_bookkeeping_table(name: &str) -> bool {
    name.starts_with("sqlite_") || name == "__diesel_schema_migrations"
}

fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    let tables: Vec<TableName> =
        diesel::sql_query("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .load(conn)
            .wrap_err("Failed to list SQLite tables")?;

    let mut schema = Schema::new();
    for table_name in tables
        .into_iter()
        .map(|t| t.name)
        .filter(|name| !is_bookkeeping_table(name))
    {
        let mut table = Table::default();

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({table_name})"))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {table_name}"))?;
        for col in columns {
            // INTEGER PRIMARY KEY reports notnull = 0 but can never hold NULL
            let nullable = col.notnull == 0 && col.pk == 0;
            if col.pk > 0 {
                table.primary_key.insert(col.name.clone());
            }
            table
                .columns
                .insert(col.name, (ColumnType::from_sqlite(&col.r#type), nullable));
        }

        let foreign_keys: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({table_name})"))
                .load(conn)
                .wrap_err(format!("Failed to get foreign keys for table {table_name}"))?;
        for fk in foreign_keys {
            table.foreign_keys.insert((fk.from, fk.table, fk.to));
        }

        schema.insert(table_name, table);
    }

    Ok(schema)
}

fn introspect_mysql_schema(conn: &mut MysqlConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        table_name: String,
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        data_type: String,
        #[diesel(sql_type = Text)]
        is_nullable: String,
    }

    #[derive(QueryableByName)]
    struct KeyInfo {
        #[diesel(sql_type = Text)]
        table_name: String,
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        referenced_table: String,
        #[diesel(sql_type = Text)]
        referenced_column: String,
    }

    let columns: Vec<ColumnInfo> = diesel::sql_query(
        "SELECT TABLE_NAME AS table_name, COLUMN_NAME AS column_name, \
         DATA_TYPE AS data_type, IS_NULLABLE AS is_nullable \
         FROM information_schema.COLUMNS WHERE TABLE_SCHEMA = DATABASE()",
    )
    .load(conn)
    .wrap_err("Failed to list MySQL columns")?;

    let mut schema = Schema::new();
    for col in columns
        .into_iter()
        .filter(|c| !is_bookkeeping_table(&c.table_name))
    {
        schema.entry(col.table_name).or_default().columns.insert(
            col.column_name,
            (ColumnType::from_mysql(&col.data_type), col.is_nullable == "YES"),
        );
    }

    // Primary keys come back with empty referenced columns
    let keys: Vec<KeyInfo> = diesel::sql_query(
        "SELECT TABLE_NAME AS table_name, COLUMN_NAME AS column_name, \
         COALESCE(REFERENCED_TABLE_NAME, '') AS referenced_table, \
         COALESCE(REFERENCED_COLUMN_NAME, '') AS referenced_column \
         FROM information_schema.KEY_COLUMN_USAGE \
         WHERE TABLE_SCHEMA = DATABASE() \
         AND (CONSTRAINT_NAME = 'PRIMARY' OR REFERENCED_TABLE_NAME IS NOT NULL)",
    )
    .load(conn)
    .wrap_err("Failed to list MySQL keys")?;

    for key in keys {
        let Some(table) = schema.get_mut(&key.table_name) else {
            continue;
        };
        if key.referenced_table.is_empty() {
            table.primary_key.insert(key.column_name);
        } else {
            table.foreign_keys.insert((
                key.column_name,
                key.referenced_table,
                key.referenced_column,
            ));
        }
    }

    Ok(schema)
}

/// Returns one line per difference between the two schemas.
fn compare_schemas(sqlite: &Schema, mysql: &Schema) -> Vec<String> {
    let mut mismatches: Vec<String> = Vec::new();

    let sqlite_tables: BTreeSet<&String> = sqlite.keys().collect();
    let mysql_tables: BTreeSet<&String> = mysql.keys().collect();
    for missing in sqlite_tables.symmetric_difference(&mysql_tables) {
        let side = if sqlite.contains_key(*missing) {
            "MySQL"
        } else {
            "SQLite"
        };
        mismatches.push(format!("table '{missing}' is missing from {side}"));
    }

    for (name, lite) in sqlite {
        let Some(my) = mysql.get(name) else {
            continue;
        };

        for (column, lite_shape) in &lite.columns {
            match my.columns.get(column) {
                None => mismatches.push(format!("{name}.{column} is missing from MySQL")),
                Some(my_shape) if my_shape != lite_shape => mismatches.push(format!(
                    "{name}.{column}: SQLite {lite_shape:?} vs MySQL {my_shape:?}"
                )),
                Some(_) => {}
            }
        }
        for column in my.columns.keys() {
            if !lite.columns.contains_key(column) {
                mismatches.push(format!("{name}.{column} is missing from SQLite"));
            }
        }

        if lite.primary_key != my.primary_key {
            mismatches.push(format!(
                "{name} primary key: SQLite {:?} vs MySQL {:?}",
                lite.primary_key, my.primary_key
            ));
        }
        if lite.foreign_keys != my.foreign_keys {
            mismatches.push(format!(
                "{name} foreign keys: SQLite {:?} vs MySQL {:?}",
                lite.foreign_keys, my.foreign_keys
            ));
        }
    }

    mismatches
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
