//! Structural validation of a [`Schema`].
//!
//! Checks run in a fixed order and stop at the first violation.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::schema::Schema;

/// Result of a single validation check.
pub type ValidationResult = std::result::Result<(), ValidationError>;

/// Validates a schema snapshot before it is compiled.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    schema: &'a Schema,
}

impl<'a> Validator<'a> {
    /// Creates a validator over `schema`.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Runs every check in order, returning the first failure.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] of the first check that fails.
    pub fn validate(&self) -> ValidationResult {
        self.validate_columns()?;
        self.validate_indexes()?;
        self.validate_indexes_have_column()?;
        self.validate_primary_key()?;
        self.validate_primary_key_nullability()?;
        self.validate_auto_increment_primary_key()
    }

    /// Column names are unique and every column has a type.
    ///
    /// # Errors
    ///
    /// [`ValidationError::DuplicateColumn`] or [`ValidationError::MissingColumnType`].
    pub fn validate_columns(&self) -> ValidationResult {
        let mut seen = HashSet::new();
        for column in self.schema.columns() {
            if !seen.insert(column.name()) {
                return Err(ValidationError::DuplicateColumn(column.name().to_string()));
            }
            if column.sql_type().is_none() {
                return Err(ValidationError::MissingColumnType(
                    column.name().to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Every index names a column.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingIndexColumn`].
    pub fn validate_indexes(&self) -> ValidationResult {
        match self.schema.indexes().iter().find(|i| i.column().is_empty()) {
            Some(index) => Err(ValidationError::MissingIndexColumn(index.name().to_string())),
            None => Ok(()),
        }
    }

    /// Every index column is defined in the schema.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownIndexColumn`].
    pub fn validate_indexes_have_column(&self) -> ValidationResult {
        match self
            .schema
            .indexes()
            .iter()
            .find(|i| !self.schema.has_column(i.column()))
        {
            Some(index) => Err(ValidationError::UnknownIndexColumn(index.name().to_string())),
            None => Ok(()),
        }
    }

    /// At most one index is the primary key.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MultiplePrimaryKeys`].
    pub fn validate_primary_key(&self) -> ValidationResult {
        let primary_keys = self
            .schema
            .indexes()
            .iter()
            .filter(|i| i.is_primary())
            .count();

        if primary_keys > 1 {
            return Err(ValidationError::MultiplePrimaryKeys);
        }
        Ok(())
    }

    /// The primary key column is NOT NULL.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NullablePrimaryKey`].
    pub fn validate_primary_key_nullability(&self) -> ValidationResult {
        for index in self.schema.indexes().iter().filter(|i| i.is_primary()) {
            // Unknown columns are reported by validate_indexes_have_column.
            if let Ok(column) = self.schema.get_column(index.column()) {
                if column.is_nullable() {
                    return Err(ValidationError::NullablePrimaryKey(
                        column.name().to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// An auto-increment column must be the primary key column.
    ///
    /// # Errors
    ///
    /// [`ValidationError::AutoIncrementNotPrimary`].
    pub fn validate_auto_increment_primary_key(&self) -> ValidationResult {
        let Some(column) = self
            .schema
            .columns()
            .iter()
            .find(|c| c.is_auto_increment())
        else {
            return Ok(());
        };

        let is_primary = self
            .schema
            .indexes()
            .iter()
            .any(|i| i.is_primary() && i.column() == column.name());

        if is_primary {
            Ok(())
        } else {
            Err(ValidationError::AutoIncrementNotPrimary(
                column.name().to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users_schema() -> Schema {
        let mut schema = Schema::new("users");
        schema.column("id").int(true).auto_increment(true);
        schema.column("name").string();
        schema.index("id", None).primary(true);
        schema
    }

    #[test]
    fn test_valid_schema() {
        let schema = users_schema();
        assert_eq!(Validator::new(&schema).validate(), Ok(()));
    }

    #[test]
    fn test_empty_schema_is_valid() {
        let schema = Schema::new("empty");
        assert_eq!(Validator::new(&schema).validate(), Ok(()));
    }

    #[test]
    fn test_duplicate_column() {
        let mut schema = Schema::new("t");
        schema.column("id").int(false);
        schema.column("id").text();

        assert_eq!(
            Validator::new(&schema).validate_columns(),
            Err(ValidationError::DuplicateColumn("id".into()))
        );
    }

    #[test]
    fn test_missing_column_type() {
        let mut schema = Schema::new("t");
        schema.column("id");

        assert_eq!(
            Validator::new(&schema).validate(),
            Err(ValidationError::MissingColumnType("id".into()))
        );
    }

    #[test]
    fn test_index_without_column() {
        let mut schema = Schema::new("t");
        schema.column("id").int(false);
        schema.index("", Some("primary")).primary(true);

        assert_eq!(
            Validator::new(&schema).validate(),
            Err(ValidationError::MissingIndexColumn("primary".into()))
        );
    }

    #[test]
    fn test_index_on_unknown_column() {
        let mut schema = Schema::new("t");
        schema.column("id").int(false);
        schema.index("email", None).unique(true);

        assert_eq!(
            Validator::new(&schema).validate(),
            Err(ValidationError::UnknownIndexColumn("idx_email".into()))
        );
    }

    #[test]
    fn test_multiple_primary_keys() {
        let mut schema = Schema::new("t");
        schema.column("a").int(false);
        schema.column("b").int(false);
        schema.index("a", None).primary(true);
        schema.index("b", None).primary(true);

        assert_eq!(
            Validator::new(&schema).validate(),
            Err(ValidationError::MultiplePrimaryKeys)
        );

        // Secondary indexes do not change the outcome.
        schema.index("a", Some("a_lookup"));
        schema.index("b", Some("b_unique")).unique(true);
        assert_eq!(
            Validator::new(&schema).validate(),
            Err(ValidationError::MultiplePrimaryKeys)
        );
    }

    #[test]
    fn test_nullable_primary_key() {
        let mut schema = Schema::new("t");
        schema.column("code").varchar(10).nullable(true);
        schema.index("code", None).primary(true);

        assert_eq!(
            Validator::new(&schema).validate(),
            Err(ValidationError::NullablePrimaryKey("code".into()))
        );
    }

    #[test]
    fn test_auto_increment_without_primary_key() {
        let mut schema = Schema::new("t");
        schema.column("id").int(true).auto_increment(true);

        assert_eq!(
            Validator::new(&schema).validate(),
            Err(ValidationError::AutoIncrementNotPrimary("id".into()))
        );
    }

    #[test]
    fn test_auto_increment_on_other_column() {
        let mut schema = Schema::new("t");
        schema.column("id").int(true);
        schema.column("seq").int(true).auto_increment(true);
        schema.index("id", None).primary(true);

        assert_eq!(
            Validator::new(&schema).validate(),
            Err(ValidationError::AutoIncrementNotPrimary("seq".into()))
        );
    }

    #[test]
    fn test_checks_run_in_order() {
        // Both a missing type and a dangling index: the column check wins.
        let mut schema = Schema::new("t");
        schema.column("id");
        schema.index("ghost", None);

        assert_eq!(
            Validator::new(&schema).validate(),
            Err(ValidationError::MissingColumnType("id".into()))
        );
    }
}
