//! Error types for schema definition and validation.

/// Structural problems detected by the [`Validator`](crate::validator::Validator).
///
/// Each variant names the offending column or index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Two columns share the same name.
    #[error("Duplicate column name found: {0}")]
    DuplicateColumn(String),

    /// A column was declared without a type.
    #[error("Column type not defined for column: {0}")]
    MissingColumnType(String),

    /// An index does not reference any column.
    #[error("Index column not defined for index: {0}")]
    MissingIndexColumn(String),

    /// An index references a column the schema does not define.
    #[error("Index does not have a valid column defined: {0}")]
    UnknownIndexColumn(String),

    /// More than one index carries the primary role.
    #[error("Multiple primary keys defined.")]
    MultiplePrimaryKeys,

    /// The primary key column allows NULL.
    #[error("Primary key column cannot be nullable: {0}")]
    NullablePrimaryKey(String),

    /// An auto-increment column is not the primary key column.
    #[error("Auto-increment column is not set as primary index: {0}")]
    AutoIncrementNotPrimary(String),
}

/// Errors raised while describing or validating a table schema.
///
/// Failures of the database itself are not represented here: the
/// [`Executor`](crate::executor::Executor) reports them as `false`.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A raw SQL default expression was given a non-textual value.
    #[error("Invalid default value for column '{column}': {message}")]
    InvalidDefaultValue {
        /// Column being configured.
        column: String,
        /// What was wrong with the value.
        message: String,
    },

    /// The requested column is not part of the schema.
    #[error("The column '{0}' does not exist.")]
    ColumnDoesNotExist(String),

    /// The schema failed structural validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::DuplicateColumn("id".into()).to_string(),
            "Duplicate column name found: id"
        );
        assert_eq!(
            ValidationError::MultiplePrimaryKeys.to_string(),
            "Multiple primary keys defined."
        );
        assert_eq!(
            ValidationError::AutoIncrementNotPrimary("id".into()).to_string(),
            "Auto-increment column is not set as primary index: id"
        );
    }

    #[test]
    fn test_validation_converts_transparently() {
        let err: SchemaError = ValidationError::NullablePrimaryKey("id".into()).into();
        assert_eq!(err.to_string(), "Primary key column cannot be nullable: id");
        assert!(matches!(
            err,
            SchemaError::Validation(ValidationError::NullablePrimaryKey(_))
        ));
    }

    #[test]
    fn test_column_does_not_exist_message() {
        let err = SchemaError::ColumnDoesNotExist("email".into());
        assert_eq!(err.to_string(), "The column 'email' does not exist.");
    }
}
