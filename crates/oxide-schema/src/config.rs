//! Connection and table-naming configuration.

use serde::{Deserialize, Serialize};

/// Settings for the MySQL execution capability.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use oxide_schema::config::DatabaseConfig;
///
/// let config = DatabaseConfig::from_json(r#"{ "table_prefix": "shop_" }"#).unwrap();
/// assert_eq!(config.table_prefix, "shop_");
/// assert_eq!(config.charset, "utf8mb4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL.
    pub url: String,
    /// Prefix prepended to every table name.
    pub table_prefix: String,
    /// Default character set for created tables.
    pub charset: String,
    /// Default collation for created tables.
    pub collate: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mysql://localhost/wordpress".to_string(),
            table_prefix: "wp_".to_string(),
            charset: "utf8mb4".to_string(),
            collate: "utf8mb4_unicode_ci".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or has wrongly
    /// typed fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builds the table options clause appended to `CREATE TABLE`,
    /// e.g. `DEFAULT CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci`.
    #[must_use]
    pub fn charset_collate(&self) -> String {
        let mut parts = Vec::new();
        if !self.charset.is_empty() {
            parts.push(format!("DEFAULT CHARACTER SET {}", self.charset));
        }
        if !self.collate.is_empty() {
            parts.push(format!("COLLATE {}", self.collate));
        }
        parts.join(" ")
    }
}
