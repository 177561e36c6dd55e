//! The database capability used to run compiled DDL.

use std::future::Future;
use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::config::DatabaseConfig;

/// A live database that DDL statements are sent to.
///
/// Implementations also carry the environment-supplied table prefix and the
/// charset/collation clause for new tables.
pub trait Database: Send + Sync {
    /// Prefix prepended to unqualified table names.
    fn table_prefix(&self) -> &str;

    /// Table options clause appended to `CREATE TABLE` statements.
    fn charset_collate(&self) -> &str;

    /// Executes a single SQL statement.
    fn execute(&self, sql: &str) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}

impl<T: Database + ?Sized> Database for &T {
    fn table_prefix(&self) -> &str {
        (**self).table_prefix()
    }

    fn charset_collate(&self) -> &str {
        (**self).charset_collate()
    }

    fn execute(&self, sql: &str) -> impl Future<Output = Result<(), sqlx::Error>> + Send {
        (**self).execute(sql)
    }
}

/// MySQL database backed by a sqlx connection pool.
#[derive(Debug, Clone)]
pub struct MySqlDatabase {
    pool: MySqlPool,
    table_prefix: String,
    charset_collate: String,
}

impl MySqlDatabase {
    /// Connects to the database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot establish a connection.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;
        Ok(Self::from_pool(pool, config))
    }

    /// Creates a pool that only connects when a statement is executed.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection URL cannot be parsed.
    pub fn connect_lazy(
        config: &DatabaseConfig,
        acquire_timeout: Duration,
    ) -> Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(&config.url)?;
        Ok(Self::from_pool(pool, config))
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn from_pool(pool: MySqlPool, config: &DatabaseConfig) -> Self {
        Self {
            pool,
            table_prefix: config.table_prefix.clone(),
            charset_collate: config.charset_collate(),
        }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

impl Database for MySqlDatabase {
    fn table_prefix(&self) -> &str {
        &self.table_prefix
    }

    fn charset_collate(&self) -> &str {
        &self.charset_collate
    }

    async fn execute(&self, sql: &str) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(sql).execute(&self.pool).await?;
        Ok(())
    }
}
