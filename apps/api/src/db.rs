use anyhow::{bail, Context, Result};
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;
use tracing::info;

/// The SQL dialect behind a `DATABASE_URL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Sqlite,
    Postgres,
}

impl DatabaseBackend {
    pub fn from_url(database_url: &str) -> Result<Self> {
        if database_url.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else if database_url.starts_with("postgres://")
            || database_url.starts_with("postgresql://")
        {
            Ok(Self::Postgres)
        } else {
            bail!("Unsupported DATABASE_URL scheme (expected sqlite: or postgres://)")
        }
    }

    fn personas_ddl(self) -> &'static str {
        match self {
            Self::Sqlite => {
                r#"
                CREATE TABLE IF NOT EXISTS personas (
                    id            INTEGER PRIMARY KEY AUTOINCREMENT,
                    name          TEXT NOT NULL,
                    description   TEXT NOT NULL,
                    tone_of_voice TEXT NOT NULL,
                    session_id    TEXT NOT NULL,
                    created_at    BIGINT NOT NULL,
                    updated_at    BIGINT NOT NULL
                )
                "#
            }
            Self::Postgres => {
                r#"
                CREATE TABLE IF NOT EXISTS personas (
                    id            BIGSERIAL PRIMARY KEY,
                    name          TEXT NOT NULL,
                    description   TEXT NOT NULL,
                    tone_of_voice TEXT NOT NULL,
                    session_id    TEXT NOT NULL,
                    created_at    BIGINT NOT NULL,
                    updated_at    BIGINT NOT NULL
                )
                "#
            }
        }
    }
}

const PERSONA_INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_personas_session_id ON personas (session_id)",
    "CREATE INDEX IF NOT EXISTS idx_personas_name ON personas (name)",
];

/// Creates a connection pool for SQLite or PostgreSQL and ensures the schema exists.
pub async fn create_pool(database_url: &str) -> Result<AnyPool> {
    install_default_drivers();
    let backend = DatabaseBackend::from_url(database_url)?;
    info!("Connecting to {backend:?} database...");

    // Every in-memory SQLite connection is its own database, so pin the pool to one.
    let in_memory = backend == DatabaseBackend::Sqlite && database_url.contains(":memory:");
    let options = if in_memory {
        AnyPoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        AnyPoolOptions::new().max_connections(10)
    };

    let pool = options
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    run_migrations(&pool, backend).await?;

    info!("Database connection pool established");
    Ok(pool)
}

/// Creates the `personas` table and its indexes when missing.
pub async fn run_migrations(pool: &AnyPool, backend: DatabaseBackend) -> Result<()> {
    sqlx::query(backend.personas_ddl())
        .execute(pool)
        .await
        .context("Failed to create personas table")?;

    for statement in PERSONA_INDEXES {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to run migration: {statement}"))?;
    }

    Ok(())
}
