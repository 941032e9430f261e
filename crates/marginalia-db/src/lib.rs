//! # marginalia-db
//!
//! MySQL database layer for marginalia.
//!
//! This crate provides:
//! - Connection pool management
//! - The MySQL annotation repository
//! - An in-memory repository for tests and local development
//!
//! ## Example
//!
//! ```rust,ignore
//! use marginalia_core::AnnotationRepository;
//! use marginalia_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("mysql://localhost/marginalia").await?;
//!
//!     let id = db
//!         .annotations
//!         .create("/essays/on-walking", "the quick brown fox", "classic")
//!         .await?;
//!
//!     println!("Created annotation: {}", id);
//!     Ok(())
//! }
//! ```

pub mod annotations;
pub mod memory;
pub mod pool;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use marginalia_core::*;

pub use annotations::MySqlAnnotationRepository;
pub use memory::MemoryAnnotationRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};

/// Combined database context.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::MySqlPool,
    /// Annotation repository for CRUD operations.
    pub annotations: MySqlAnnotationRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::MySqlPool) -> Self {
        Self {
            annotations: MySqlAnnotationRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect with default pool configuration.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Connect with custom pool configuration.
    pub async fn connect_with_config(database_url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(database_url, config).await?;
        Ok(Self::new(pool))
    }

    /// Connect using `DATABASE_URL`, falling back to the test fixture URL.
    pub async fn connect_for_tests() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| crate::test_fixtures::DEFAULT_TEST_DATABASE_URL.to_string());
        Self::connect(&database_url).await
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::MySqlPool {
        &self.pool
    }
}
