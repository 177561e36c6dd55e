//! Schema executor.
//!
//! This module applies and removes tables through a [`Database`]. Caller
//! mistakes (an invalid schema) are returned as errors; failures reported by
//! the database are logged and turned into a `false` outcome.

use tracing::{debug, info, warn};

use crate::database::Database;
use crate::error::Result;
use crate::grammar::{Grammar, MySqlGrammar};
use crate::schema::Schema;
use crate::validator::Validator;

/// Creates, drops and truncates tables described by [`Schema`]s.
#[derive(Debug, Clone)]
pub struct Executor<D: Database, G: Grammar = MySqlGrammar> {
    database: D,
    grammar: G,
}

impl<D: Database> Executor<D> {
    /// Creates an executor using the MySQL grammar.
    pub fn new(database: D) -> Self {
        Self::with_grammar(database, MySqlGrammar::new())
    }
}

impl<D: Database, G: Grammar> Executor<D, G> {
    /// Creates an executor with a specific grammar.
    pub fn with_grammar(database: D, grammar: G) -> Self {
        Self { database, grammar }
    }

    /// Returns the database statements run against.
    #[must_use]
    pub fn database(&self) -> &D {
        &self.database
    }

    /// Returns the grammar used to compile schemas.
    #[must_use]
    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    /// Starts an empty schema carrying the database's table prefix.
    #[must_use]
    pub fn schema(&self, table_name: impl Into<String>) -> Schema {
        Schema::new(table_name).with_prefix(self.database.table_prefix())
    }

    /// Builds a prefixed schema with a configuration closure.
    ///
    /// # Errors
    ///
    /// Returns whatever error `configure` returns.
    pub fn define<F>(&self, table_name: impl Into<String>, configure: F) -> Result<Schema>
    where
        F: FnOnce(&mut Schema) -> Result<()>,
    {
        Ok(Schema::define(table_name, configure)?.with_prefix(self.database.table_prefix()))
    }

    /// Validates and compiles the `CREATE TABLE` statement without running it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Validation`](crate::error::SchemaError::Validation)
    /// if the schema is structurally invalid.
    pub fn sql_for(&self, schema: &Schema) -> Result<String> {
        Validator::new(schema).validate()?;
        Ok(self
            .grammar
            .compile(schema, self.database.charset_collate()))
    }

    /// Creates the table described by `schema`.
    ///
    /// Returns `Ok(false)` when the database rejects the statement.
    ///
    /// # Errors
    ///
    /// Returns a validation error, without touching the database, if the
    /// schema is invalid.
    pub async fn create_table(&self, schema: &Schema) -> Result<bool> {
        let table = schema.table_name();
        info!(table = %table, grammar = self.grammar.name(), "Creating table");

        let sql = match self.sql_for(schema) {
            Ok(sql) => sql,
            Err(e) => {
                warn!(table = %table, error = %e, "Schema validation failed");
                return Err(e);
            }
        };

        Ok(self.run(&sql).await)
    }

    /// Drops the table described by `schema` if it exists.
    pub async fn drop_table(&self, schema: &Schema) -> bool {
        let table = schema.table_name();
        info!(table = %table, "Dropping table");
        self.run(&self.grammar.compile_drop(&table)).await
    }

    /// Empties `table_name`, resolved with the database's table prefix.
    ///
    /// Returns `false` without executing anything if the resolved name is not
    /// a plain identifier.
    pub async fn truncate_table(&self, table_name: &str) -> bool {
        let table = format!("{}{}", self.database.table_prefix(), table_name);
        info!(table = %table, "Truncating table");

        if !is_plain_identifier(&table) {
            warn!(table = %table, "Refusing to truncate: not a plain table identifier");
            return false;
        }

        self.run(&self.grammar.compile_truncate(&table)).await
    }

    async fn run(&self, sql: &str) -> bool {
        debug!(sql = %sql, "Executing SQL");
        match self.database.execute(sql).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Statement failed");
                false
            }
        }
    }
}

/// Returns whether `name` can be spliced into SQL as an unquoted identifier.
fn is_plain_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::{SchemaError, ValidationError};

    #[derive(Default)]
    struct FakeDatabase {
        statements: Mutex<Vec<String>>,
        fail: bool,
    }

    impl FakeDatabase {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn statements(&self) -> Vec<String> {
            self.statements.lock().unwrap().clone()
        }
    }

    impl Database for FakeDatabase {
        fn table_prefix(&self) -> &str {
            "wp_"
        }

        fn charset_collate(&self) -> &str {
            "DEFAULT CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci"
        }

        async fn execute(&self, sql: &str) -> std::result::Result<(), sqlx::Error> {
            self.statements.lock().unwrap().push(sql.to_string());
            if self.fail {
                Err(sqlx::Error::Protocol("rejected".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn users(executor: &Executor<&FakeDatabase>) -> Schema {
        executor
            .define("users", |table| {
                table.column("id").int(true).auto_increment(true);
                table.column("name").varchar(255);
                table.index("id", None).primary(true);
                Ok(())
            })
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_table() {
        let db = FakeDatabase::default();
        let executor = Executor::new(&db);

        assert!(executor.create_table(&users(&executor)).await.unwrap());
        assert_eq!(
            db.statements(),
            vec![
                "CREATE TABLE wp_users (\n\
                 id INT UNSIGNED NOT NULL AUTO_INCREMENT,\n\
                 name VARCHAR(255) NOT NULL,\n\
                 PRIMARY KEY (`id`)\n\
                 ) DEFAULT CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci;"
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_create_table_validation_failure_skips_database() {
        let db = FakeDatabase::default();
        let executor = Executor::new(&db);

        let mut schema = executor.schema("broken");
        schema.column("id").int(true).auto_increment(true);

        let result = executor.create_table(&schema).await;
        assert!(matches!(
            result,
            Err(SchemaError::Validation(
                ValidationError::AutoIncrementNotPrimary(_)
            ))
        ));
        assert!(db.statements().is_empty());
    }

    #[tokio::test]
    async fn test_create_table_database_failure() {
        let db = FakeDatabase::failing();
        let executor = Executor::new(&db);

        assert!(!executor.create_table(&users(&executor)).await.unwrap());
        assert_eq!(db.statements().len(), 1);
    }

    #[tokio::test]
    async fn test_drop_table() {
        let db = FakeDatabase::default();
        let executor = Executor::new(&db);

        assert!(executor.drop_table(&executor.schema("users")).await);
        assert_eq!(db.statements(), vec!["DROP TABLE IF EXISTS wp_users;"]);
    }

    #[tokio::test]
    async fn test_truncate_table() {
        let db = FakeDatabase::default();
        let executor = Executor::new(&db);

        assert!(executor.truncate_table("test_table").await);
        assert_eq!(db.statements(), vec!["TRUNCATE TABLE wp_test_table;"]);
    }

    #[tokio::test]
    async fn test_truncate_rejects_non_identifiers() {
        let db = FakeDatabase::default();
        let executor = Executor::new(&db);

        assert!(!executor.truncate_table("users; DROP TABLE x").await);
        assert!(db.statements().is_empty());
    }

    #[tokio::test]
    async fn test_drop_and_truncate_report_failure() {
        let db = FakeDatabase::failing();
        let executor = Executor::new(&db);

        assert!(!executor.drop_table(&executor.schema("users")).await);
        assert!(!executor.truncate_table("users").await);
    }

    #[test]
    fn test_sql_for_is_dry_run() {
        let db = FakeDatabase::default();
        let executor = Executor::new(&db);

        let sql = executor.sql_for(&users(&executor)).unwrap();
        assert!(sql.starts_with("CREATE TABLE wp_users ("));
        assert!(db.statements().is_empty());
    }

    #[test]
    fn test_plain_identifier() {
        assert!(is_plain_identifier("wp_users"));
        assert!(is_plain_identifier("wp$log2"));
        assert!(!is_plain_identifier(""));
        assert!(!is_plain_identifier("wp users"));
        assert!(!is_plain_identifier("`wp_users`"));
    }
}
