//! Index definitions.

use serde::{Deserialize, Serialize};

/// The role an index plays, resolved from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexType {
    /// Table primary key.
    Primary,
    /// Unique index.
    Unique,
    /// Full-text index.
    FullText,
    /// Plain secondary index.
    Index,
}

impl IndexType {
    /// Returns the SQL keyword(s) for this index type.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY KEY",
            Self::Unique => "UNIQUE",
            Self::FullText => "FULLTEXT",
            Self::Index => "INDEX",
        }
    }
}

/// An index over a single column.
///
/// The `unique`, `full_text` and `primary` roles are mutually exclusive:
/// enabling one clears the other two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    name: String,
    column: String,
    #[serde(default)]
    unique: bool,
    #[serde(default)]
    full_text: bool,
    #[serde(default)]
    primary: bool,
}

impl Index {
    /// Creates a plain index. Without an explicit name it is called `idx_<column>`.
    #[must_use]
    pub fn new(column: impl Into<String>, name: Option<String>) -> Self {
        let column = column.into();
        Self {
            name: name.unwrap_or_else(|| format!("idx_{column}")),
            column,
            unique: false,
            full_text: false,
            primary: false,
        }
    }

    /// Returns the index name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the indexed column.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns whether the index is unique.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Returns whether the index is full-text.
    #[must_use]
    pub fn is_full_text(&self) -> bool {
        self.full_text
    }

    /// Returns whether the index is the primary key.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// Resolves the index type: primary, then unique, then full-text.
    #[must_use]
    pub fn index_type(&self) -> IndexType {
        if self.primary {
            IndexType::Primary
        } else if self.unique {
            IndexType::Unique
        } else if self.full_text {
            IndexType::FullText
        } else {
            IndexType::Index
        }
    }

    /// Makes the index unique.
    pub fn unique(&mut self, unique: bool) -> &mut Self {
        if unique {
            self.primary = false;
            self.full_text = false;
        }
        self.unique = unique;
        self
    }

    /// Makes the index full-text.
    pub fn full_text(&mut self, full_text: bool) -> &mut Self {
        if full_text {
            self.primary = false;
            self.unique = false;
        }
        self.full_text = full_text;
        self
    }

    /// Makes the index the primary key.
    pub fn primary(&mut self, primary: bool) -> &mut Self {
        if primary {
            self.unique = false;
            self.full_text = false;
        }
        self.primary = primary;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name() {
        let index = Index::new("email", None);
        assert_eq!(index.name(), "idx_email");
        assert_eq!(index.column(), "email");
        assert_eq!(index.index_type(), IndexType::Index);
    }

    #[test]
    fn test_explicit_name() {
        let index = Index::new("email", Some("users_email".to_string()));
        assert_eq!(index.name(), "users_email");
    }

    #[test]
    fn test_roles_are_exclusive() {
        let mut index = Index::new("id", None);

        index.unique(true);
        assert!(index.is_unique());
        assert_eq!(index.index_type(), IndexType::Unique);

        index.primary(true);
        assert!(index.is_primary());
        assert!(!index.is_unique());
        assert!(!index.is_full_text());
        assert_eq!(index.index_type(), IndexType::Primary);

        index.full_text(true);
        assert!(index.is_full_text());
        assert!(!index.is_primary());
        assert_eq!(index.index_type(), IndexType::FullText);
    }

    #[test]
    fn test_disabling_role_leaves_others() {
        let mut index = Index::new("title", None);
        index.unique(true).full_text(false);
        assert!(index.is_unique());
        assert!(!index.is_full_text());

        index.unique(false);
        assert_eq!(index.index_type(), IndexType::Index);
    }

    #[test]
    fn test_index_type_sql() {
        assert_eq!(IndexType::Primary.as_sql(), "PRIMARY KEY");
        assert_eq!(IndexType::Unique.as_sql(), "UNIQUE");
        assert_eq!(IndexType::FullText.as_sql(), "FULLTEXT");
        assert_eq!(IndexType::Index.as_sql(), "INDEX");
    }
}
