//! Fluent table schemas compiled to MySQL DDL.
//!
//! `oxide-schema` describes a table as in-memory objects, checks the
//! description for structural mistakes and compiles it into a single
//! `CREATE TABLE` statement:
//! - Columns, indexes and foreign keys are configured with chainable setters
//! - Validation runs before any SQL is generated and stops at the first problem
//! - Compilation is deterministic and follows column definition order
//! - Statements are executed through an injected [`Database`](database::Database)
//!
//! # Architecture
//!
//! - **Schema** - Columns, indexes and foreign keys of one table
//! - **Validator** - Ordered structural checks over a schema
//! - **Grammar** - Renders a schema into DDL text
//! - **Executor** - Validates, compiles and runs create/drop/truncate
//! - **Database** - The execution capability (sqlx MySQL pool in production)
//!
//! # Example
//!
//! ```rust
//! use oxide_schema::prelude::*;
//!
//! let schema = Schema::define("users", |table| {
//!     table.column("id").int(true).auto_increment(true);
//!     table.column("name").varchar(255);
//!     table.index("id", None).primary(true);
//!     Ok(())
//! })
//! .unwrap()
//! .with_prefix("wp_");
//!
//! Validator::new(&schema).validate().unwrap();
//!
//! let sql = MySqlGrammar::new().compile(
//!     &schema,
//!     "DEFAULT CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci",
//! );
//! assert_eq!(
//!     sql,
//!     "CREATE TABLE wp_users (\n\
//!      id INT UNSIGNED NOT NULL AUTO_INCREMENT,\n\
//!      name VARCHAR(255) NOT NULL,\n\
//!      PRIMARY KEY (`id`)\n\
//!      ) DEFAULT CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci;"
//! );
//! ```
//!
//! Against a live server:
//!
//! ```rust,ignore
//! use oxide_schema::prelude::*;
//!
//! let config = DatabaseConfig::from_json(r#"{ "url": "mysql://root@localhost/shop" }"#)?;
//! let executor = Executor::new(MySqlDatabase::connect(&config).await?);
//!
//! let mut posts = executor.schema("posts");
//! posts.column("id").bigint(true).auto_increment(true);
//! posts.column("author_id").bigint(true);
//! posts.index("id", None).primary(true);
//! posts
//!     .foreign_key("author_id", None)
//!     .reference("wp_users", "id")
//!     .on_delete(ForeignKeyAction::Cascade);
//!
//! if !executor.create_table(&posts).await? {
//!     eprintln!("the server rejected the table");
//! }
//! ```

pub mod column;
pub mod config;
pub mod database;
pub mod error;
pub mod executor;
pub mod foreign_key;
pub mod grammar;
pub mod index;
pub mod schema;
pub mod validator;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::column::{Column, ColumnType, DefaultValue, Value};
    pub use crate::config::DatabaseConfig;
    pub use crate::database::{Database, MySqlDatabase};
    pub use crate::error::{Result, SchemaError, ValidationError};
    pub use crate::executor::Executor;
    pub use crate::foreign_key::{ForeignKey, ForeignKeyAction};
    pub use crate::grammar::{Grammar, MySqlGrammar};
    pub use crate::index::{Index, IndexType};
    pub use crate::schema::Schema;
    pub use crate::validator::Validator;
}
