use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Schema bootstrap; nested structures are stored as JSON text
const SCHEMA: &[(&str, &str)] = &[
    (
        "a001_tutor",
        r#"
        CREATE TABLE IF NOT EXISTS a001_tutor (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            email TEXT,
            proficiencies_json TEXT NOT NULL DEFAULT '{}',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a002_proficiency",
        r#"
        CREATE TABLE IF NOT EXISTS a002_proficiency (
            name TEXT PRIMARY KEY NOT NULL,
            position INTEGER NOT NULL DEFAULT 0,
            subjects_json TEXT NOT NULL DEFAULT '{}'
        );
        "#,
    ),
    (
        "a003_bundle",
        r#"
        CREATE TABLE IF NOT EXISTS a003_bundle (
            id TEXT PRIMARY KEY NOT NULL,
            tutor_id TEXT NOT NULL,
            student_id TEXT NOT NULL,
            lessons_json TEXT NOT NULL DEFAULT '[]',
            hours INTEGER NOT NULL,
            remaining_hours INTEGER NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a004_student",
        r#"
        CREATE TABLE IF NOT EXISTS a004_student (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            email TEXT,
            school_grade TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
];

/// `sqlite://` URL for a file path; relative paths resolve against the working directory
pub fn sqlite_url(db_file: &str) -> anyhow::Result<String> {
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/app.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db_url = sqlite_url(db_file)?;
    tracing::info!("Opening database {}", db_url);
    let conn = Database::connect(&db_url).await?;

    for (table, sql) in SCHEMA {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create table {}: {}", table, e))?;
    }

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
