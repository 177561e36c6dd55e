//! Foreign key definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Foreign key action (ON DELETE, ON UPDATE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ForeignKeyAction {
    /// No action (error if referenced row is deleted/updated).
    #[default]
    NoAction,
    /// Restrict (same as NoAction but checked immediately).
    Restrict,
    /// Cascade the delete/update to referencing rows.
    Cascade,
    /// Set the foreign key column to NULL.
    SetNull,
    /// Set the foreign key column to its default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of this action.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

impl fmt::Display for ForeignKeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Error returned when parsing an unknown referential action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown foreign key action: {0}")]
pub struct ParseActionError(String);

impl FromStr for ForeignKeyAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_ascii_uppercase().as_str() {
            "NO ACTION" => Ok(Self::NoAction),
            "RESTRICT" => Ok(Self::Restrict),
            "CASCADE" => Ok(Self::Cascade),
            "SET NULL" => Ok(Self::SetNull),
            "SET DEFAULT" => Ok(Self::SetDefault),
            _ => Err(ParseActionError(s.to_string())),
        }
    }
}

/// A referential constraint from one local column to a remote table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    name: String,
    column: String,
    #[serde(default)]
    reference_table: String,
    #[serde(default)]
    reference_column: String,
    #[serde(default)]
    on_delete: ForeignKeyAction,
    #[serde(default)]
    on_update: ForeignKeyAction,
}

impl ForeignKey {
    /// Creates a foreign key on `column`, named `fk_<column>` unless a name is given.
    #[must_use]
    pub fn new(column: impl Into<String>, name: Option<String>) -> Self {
        let column = column.into();
        Self {
            name: name.unwrap_or_else(|| format!("fk_{column}")),
            column,
            reference_table: String::new(),
            reference_column: String::new(),
            on_delete: ForeignKeyAction::NoAction,
            on_update: ForeignKeyAction::NoAction,
        }
    }

    /// Sets the referenced table and column.
    pub fn reference(
        &mut self,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> &mut Self {
        self.reference_table = table.into();
        self.reference_column = column.into();
        self
    }

    /// Sets the referenced table.
    pub fn reference_table(&mut self, table: impl Into<String>) -> &mut Self {
        self.reference_table = table.into();
        self
    }

    /// Sets the referenced column.
    pub fn reference_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.reference_column = column.into();
        self
    }

    /// Sets the action taken when the referenced row is deleted.
    pub fn on_delete(&mut self, action: ForeignKeyAction) -> &mut Self {
        self.on_delete = action;
        self
    }

    /// Sets the action taken when the referenced row is updated.
    pub fn on_update(&mut self, action: ForeignKeyAction) -> &mut Self {
        self.on_update = action;
        self
    }

    /// Returns the constraint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the referencing column.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the referenced table.
    #[must_use]
    pub fn referenced_table(&self) -> &str {
        &self.reference_table
    }

    /// Returns the referenced column.
    #[must_use]
    pub fn referenced_column(&self) -> &str {
        &self.reference_column
    }

    /// Returns the ON DELETE action.
    #[must_use]
    pub fn delete_action(&self) -> ForeignKeyAction {
        self.on_delete
    }

    /// Returns the ON UPDATE action.
    #[must_use]
    pub fn update_action(&self) -> ForeignKeyAction {
        self.on_update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let fk = ForeignKey::new("user_id", None);
        assert_eq!(fk.name(), "fk_user_id");
        assert_eq!(fk.column(), "user_id");
        assert_eq!(fk.delete_action(), ForeignKeyAction::NoAction);
        assert_eq!(fk.update_action(), ForeignKeyAction::NoAction);
    }

    #[test]
    fn test_reference_setters() {
        let mut fk = ForeignKey::new("user_id", Some("posts_author".to_string()));
        fk.reference("users", "id")
            .on_delete(ForeignKeyAction::Cascade)
            .on_update(ForeignKeyAction::SetNull);

        assert_eq!(fk.name(), "posts_author");
        assert_eq!(fk.referenced_table(), "users");
        assert_eq!(fk.referenced_column(), "id");
        assert_eq!(fk.delete_action(), ForeignKeyAction::Cascade);
        assert_eq!(fk.update_action(), ForeignKeyAction::SetNull);

        fk.reference_table("accounts").reference_column("uuid");
        assert_eq!(fk.referenced_table(), "accounts");
        assert_eq!(fk.referenced_column(), "uuid");
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(
            "cascade".parse::<ForeignKeyAction>(),
            Ok(ForeignKeyAction::Cascade)
        );
        assert_eq!(
            "SET  NULL".parse::<ForeignKeyAction>(),
            Ok(ForeignKeyAction::SetNull)
        );
        assert_eq!(
            "No Action".parse::<ForeignKeyAction>(),
            Ok(ForeignKeyAction::NoAction)
        );
        assert!("DROP".parse::<ForeignKeyAction>().is_err());
    }

    #[test]
    fn test_action_sql() {
        assert_eq!(ForeignKeyAction::Restrict.as_sql(), "RESTRICT");
        assert_eq!(ForeignKeyAction::SetDefault.to_string(), "SET DEFAULT");
    }
}
