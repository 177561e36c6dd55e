//! Table schema description.
//!
//! A [`Schema`] aggregates the columns, indexes and foreign keys of one table.
//! It does not check itself: structural rules are enforced by the
//! [`Validator`](crate::validator::Validator) before any SQL is compiled.
//!
//! # Example
//!
//! ```rust
//! use oxide_schema::schema::Schema;
//!
//! let schema = Schema::define("users", |table| {
//!     table.column("id").int(true).auto_increment(true);
//!     table.column("email").varchar(190);
//!     table.index("id", None).primary(true);
//!     table.index("email", None).unique(true);
//!     Ok(())
//! })
//! .unwrap()
//! .with_prefix("wp_");
//!
//! assert_eq!(schema.table_name(), "wp_users");
//! assert_eq!(schema.columns().len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::error::{Result, SchemaError};
use crate::foreign_key::ForeignKey;
use crate::index::Index;

/// Complete definition of a table.
///
/// Columns are kept in definition order, which is the order they are
/// compiled in. Defining a column name twice keeps both definitions; the
/// validator reports the duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Table name without prefix.
    name: String,
    /// Prefix supplied by the hosting environment.
    #[serde(default)]
    prefix: String,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default)]
    indexes: Vec<Index>,
    #[serde(default)]
    foreign_keys: Vec<ForeignKey>,
}

impl Schema {
    /// Creates an empty schema for `table_name` with no prefix.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            name: table_name.into(),
            prefix: String::new(),
            columns: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Creates a schema and populates it with `configure` in one pass.
    ///
    /// # Errors
    ///
    /// Returns whatever error `configure` returns, such as an invalid default.
    pub fn define<F>(table_name: impl Into<String>, configure: F) -> Result<Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mut schema = Self::new(table_name);
        configure(&mut schema)?;
        Ok(schema)
    }

    /// Sets the table prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Returns the full table name, prefix included.
    #[must_use]
    pub fn table_name(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }

    /// Returns the table prefix.
    #[must_use]
    pub fn table_prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the table name without its prefix.
    #[must_use]
    pub fn table_name_without_prefix(&self) -> &str {
        &self.name
    }

    /// Defines a column and returns it for configuration.
    pub fn column(&mut self, name: impl Into<String>) -> &mut Column {
        self.columns.push(Column::new(name));
        let last = self.columns.len() - 1;
        &mut self.columns[last]
    }

    /// Defines an index on `column`, named `idx_<column>` unless `name` is given.
    pub fn index(&mut self, column: impl Into<String>, name: Option<&str>) -> &mut Index {
        self.indexes
            .push(Index::new(column, name.map(str::to_string)));
        let last = self.indexes.len() - 1;
        &mut self.indexes[last]
    }

    /// Defines a foreign key on `column`, named `fk_<column>` unless `name` is given.
    pub fn foreign_key(
        &mut self,
        column: impl Into<String>,
        name: Option<&str>,
    ) -> &mut ForeignKey {
        self.foreign_keys
            .push(ForeignKey::new(column, name.map(str::to_string)));
        let last = self.foreign_keys.len() - 1;
        &mut self.foreign_keys[last]
    }

    /// Returns the columns in definition order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the indexes in definition order.
    #[must_use]
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// Returns the foreign keys in definition order.
    #[must_use]
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Gets a column by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ColumnDoesNotExist`] if no column has that name.
    pub fn get_column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| SchemaError::ColumnDoesNotExist(name.to_string()))
    }

    /// Gets a mutable column by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ColumnDoesNotExist`] if no column has that name.
    pub fn get_column_mut(&mut self, name: &str) -> Result<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.name() == name)
            .ok_or_else(|| SchemaError::ColumnDoesNotExist(name.to_string()))
    }

    /// Returns whether a column with that name is defined.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    /// Returns whether any index covers `column`.
    #[must_use]
    pub fn has_index(&self, column: &str) -> bool {
        self.indexes.iter().any(|i| i.column() == column)
    }

    /// Returns whether any foreign key is defined.
    #[must_use]
    pub fn has_foreign_keys(&self) -> bool {
        !self.foreign_keys.is_empty()
    }

    /// Returns the first index with the primary role.
    #[must_use]
    pub fn primary_index(&self) -> Option<&Index> {
        self.indexes.iter().find(|i| i.is_primary())
    }

    /// Removes every definition of the named column.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ColumnDoesNotExist`] if no column has that name.
    pub fn remove_column(&mut self, name: &str) -> Result<&mut Self> {
        if !self.has_column(name) {
            return Err(SchemaError::ColumnDoesNotExist(name.to_string()));
        }
        self.columns.retain(|c| c.name() != name);
        Ok(self)
    }

    /// Removes the first index on `column`. Does nothing if there is none.
    pub fn remove_index(&mut self, column: &str) -> &mut Self {
        if let Some(pos) = self.indexes.iter().position(|i| i.column() == column) {
            self.indexes.remove(pos);
        }
        self
    }

    /// Loads a schema definition from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Json`] if the document is not a valid schema.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the schema definition to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
