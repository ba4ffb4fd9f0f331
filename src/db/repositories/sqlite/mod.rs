//! SQLite repository implementation using Diesel.
//!
//! This module implements the repository traits against a file-backed SQLite
//! database.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Foreign-key enforcement enabled on every pooled connection
//! - Automatic retry when the database file is locked by another writer
//! - Automatic migration execution at pool creation
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DB_URI` or `DATABASE_URL`: Database path (default: `app.db`); SQLAlchemy
//!   style `sqlite:///` URLs are accepted
//! - `DB_POOL_MAX`: Maximum pool size (default: 10)
//! - `DB_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `DB_MAX_RETRIES`: Maximum retry attempts for lock contention (default: 3)
//! - `DB_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

use crate::api::{
    Mission, NewMission, NewPlanet, NewScientist, Planet, PlanetId, Scientist, ScientistId,
    ScientistPatch,
};
use crate::db::repository::{
    ErrorContext, MissionRepository, PlanetRepository, RepositoryError, RepositoryResult,
    ScientistRepository,
};

mod models;
mod schema;

use models::*;
use schema::*;

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/sqlite/migrations");

/// Configuration for connecting to SQLite.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database file path (or `:memory:`)
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Maximum number of retry attempts when the database is locked
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_url: "app.db".to_string(),
            max_pool_size: 10,
            connection_timeout_sec: 30,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl SqliteConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `DB_URI` (or `DATABASE_URL`), defaulting to the local file
    /// `app.db` when neither is set.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DB_URI")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .map(|url| normalize_database_url(&url))
            .unwrap_or_else(|_| "app.db".to_string());

        let max_pool_size = std::env::var("DB_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let connection_timeout_sec = std::env::var("DB_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let max_retries = std::env::var("DB_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(3);

        let retry_delay_ms = std::env::var("DB_RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(100);

        Self {
            database_url,
            max_pool_size,
            connection_timeout_sec,
            max_retries,
            retry_delay_ms,
        }
    }

    /// Create a new configuration with a database path.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: normalize_database_url(&database_url.into()),
            ..Default::default()
        }
    }
}

/// Strip SQLAlchemy-style scheme prefixes so `sqlite:///app.db` and a bare
/// path both work.
fn normalize_database_url(url: &str) -> String {
    url.strip_prefix("sqlite:///")
        .or_else(|| url.strip_prefix("sqlite://"))
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
        .to_string()
}

/// Per-connection pragmas.
///
/// SQLite does not enforce foreign keys unless the pragma is enabled on the
/// connection, and the mission FK constraints plus scientist cascade deletes
/// depend on it.
#[derive(Debug)]
struct ConnectionPragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Diesel-backed repository for SQLite.
#[derive(Clone, Debug)]
pub struct SqliteRepository {
    pool: SqlitePool,
    config: SqliteConfig,
}

impl SqliteRepository {
    /// Create a new repository and run pending migrations.
    ///
    /// # Errors
    /// * `ConnectionError` if the pool cannot be built
    /// * `InternalError` if migrations fail
    pub fn new(config: SqliteConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .connection_customizer(Box::new(ConnectionPragmas))
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("database_url={}", config.database_url)),
                )
            })?;

        // Run migrations once during initialization
        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool, config })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut SqliteConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a database operation on the blocking pool, retrying when the
    /// database file is locked by another writer.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2; // Exponential backoff
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1))
                                .retryable(),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        return Err(err);
                    }
                };

                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }

            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

#[async_trait]
impl ScientistRepository for SqliteRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn list_scientists(&self) -> RepositoryResult<Vec<Scientist>> {
        self.with_conn(|conn| {
            let rows = scientists::table
                .select(ScientistRow::as_select())
                .order(scientists::id.asc())
                .load::<ScientistRow>(conn)
                .map_err(map_diesel_error)?;

            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn create_scientist(&self, input: &NewScientist) -> RepositoryResult<Scientist> {
        let new_row = NewScientistRow {
            name: input.name.clone(),
            field_of_study: input.field_of_study.clone(),
        };
        self.with_conn(move |conn| {
            let inserted: ScientistRow = diesel::insert_into(scientists::table)
                .values(&new_row)
                .returning(ScientistRow::as_returning())
                .get_result(conn)
                .map_err(|e| {
                    map_diesel_error(e).with_operation("create_scientist")
                })?;

            Ok(inserted.into())
        })
        .await
    }

    async fn get_scientist(&self, id: ScientistId) -> RepositoryResult<Scientist> {
        self.with_conn(move |conn| {
            let row = scientists::table
                .filter(scientists::id.eq(id.0))
                .select(ScientistRow::as_select())
                .first::<ScientistRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .ok_or_else(|| {
                    RepositoryError::not_found_with_context(
                        "Scientist not found",
                        ErrorContext::new("get_scientist")
                            .with_entity("scientist")
                            .with_entity_id(id.0),
                    )
                })?;

            Ok(row.into())
        })
        .await
    }

    async fn update_scientist(
        &self,
        id: ScientistId,
        patch: &ScientistPatch,
    ) -> RepositoryResult<Scientist> {
        let patch = patch.clone();
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                let exists = scientists::table
                    .filter(scientists::id.eq(id.0))
                    .select(ScientistRow::as_select())
                    .first::<ScientistRow>(tx)
                    .optional()
                    .map_err(map_diesel_error)?;
                if exists.is_none() {
                    return Err(RepositoryError::not_found_with_context(
                        "Scientist not found",
                        ErrorContext::new("update_scientist")
                            .with_entity("scientist")
                            .with_entity_id(id.0),
                    ));
                }

                let changeset = ScientistChangeset {
                    name: patch.name.clone(),
                    field_of_study: patch.field_of_study.clone(),
                };
                if changeset.has_changes() {
                    diesel::update(scientists::table.filter(scientists::id.eq(id.0)))
                        .set(&changeset)
                        .execute(tx)
                        .map_err(|e| map_diesel_error(e).with_operation("update_scientist"))?;
                }

                // The primary key has no allow-list protection either; the
                // FK constraint rejects the overwrite while missions still
                // reference the old id.
                let mut current_id = id.0;
                if let Some(new_id) = patch.id {
                    if new_id != current_id {
                        diesel::update(scientists::table.filter(scientists::id.eq(current_id)))
                            .set(scientists::id.eq(new_id))
                            .execute(tx)
                            .map_err(|e| map_diesel_error(e).with_operation("update_scientist"))?;
                        current_id = new_id;
                    }
                }

                let row = scientists::table
                    .filter(scientists::id.eq(current_id))
                    .select(ScientistRow::as_select())
                    .first::<ScientistRow>(tx)
                    .map_err(map_diesel_error)?;

                Ok(row.into())
            })
        })
        .await
    }

    async fn delete_scientist(&self, id: ScientistId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            // Mission rows cascade via the foreign key.
            let deleted = diesel::delete(scientists::table.filter(scientists::id.eq(id.0)))
                .execute(conn)
                .map_err(map_diesel_error)?;

            if deleted == 0 {
                return Err(RepositoryError::not_found_with_context(
                    "Scientist not found",
                    ErrorContext::new("delete_scientist")
                        .with_entity("scientist")
                        .with_entity_id(id.0),
                ));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl PlanetRepository for SqliteRepository {
    async fn list_planets(&self) -> RepositoryResult<Vec<Planet>> {
        self.with_conn(|conn| {
            let rows = planets::table
                .select(PlanetRow::as_select())
                .order(planets::id.asc())
                .load::<PlanetRow>(conn)
                .map_err(map_diesel_error)?;

            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn create_planet(&self, input: &NewPlanet) -> RepositoryResult<Planet> {
        let new_row = NewPlanetRow {
            name: input.name.clone(),
            distance_from_earth: input.distance_from_earth,
        };
        self.with_conn(move |conn| {
            let inserted: PlanetRow = diesel::insert_into(planets::table)
                .values(&new_row)
                .returning(PlanetRow::as_returning())
                .get_result(conn)
                .map_err(|e| map_diesel_error(e).with_operation("create_planet"))?;

            Ok(inserted.into())
        })
        .await
    }

    async fn get_planet(&self, id: PlanetId) -> RepositoryResult<Planet> {
        self.with_conn(move |conn| {
            let row = planets::table
                .filter(planets::id.eq(id.0))
                .select(PlanetRow::as_select())
                .first::<PlanetRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .ok_or_else(|| {
                    RepositoryError::not_found_with_context(
                        "Planet not found",
                        ErrorContext::new("get_planet")
                            .with_entity("planet")
                            .with_entity_id(id.0),
                    )
                })?;

            Ok(row.into())
        })
        .await
    }
}

#[async_trait]
impl MissionRepository for SqliteRepository {
    async fn create_mission(&self, input: &NewMission) -> RepositoryResult<Mission> {
        let new_row = NewMissionRow {
            name: input.name.clone(),
            scientist_id: input.scientist_id.0,
            planet_id: input.planet_id.0,
        };
        self.with_conn(move |conn| {
            let inserted: MissionRow = diesel::insert_into(missions::table)
                .values(&new_row)
                .returning(MissionRow::as_returning())
                .get_result(conn)
                .map_err(|e| map_diesel_error(e).with_operation("create_mission"))?;

            Ok(inserted.into())
        })
        .await
    }

    async fn missions_for_scientist(&self, id: ScientistId) -> RepositoryResult<Vec<Mission>> {
        self.with_conn(move |conn| {
            let rows = missions::table
                .filter(missions::scientist_id.eq(id.0))
                .select(MissionRow::as_select())
                .order(missions::id.asc())
                .load::<MissionRow>(conn)
                .map_err(map_diesel_error)?;

            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_database_url_plain_path() {
        assert_eq!(normalize_database_url("app.db"), "app.db");
        assert_eq!(normalize_database_url("/data/app.db"), "/data/app.db");
    }

    #[test]
    fn test_normalize_database_url_sqlalchemy_style() {
        assert_eq!(normalize_database_url("sqlite:///app.db"), "app.db");
        assert_eq!(
            normalize_database_url("sqlite:////data/app.db"),
            "/data/app.db"
        );
        assert_eq!(normalize_database_url("sqlite::memory:"), ":memory:");
    }

    #[test]
    fn test_config_defaults() {
        let config = SqliteConfig::default();
        assert_eq!(config.database_url, "app.db");
        assert_eq!(config.max_pool_size, 10);
    }
}
