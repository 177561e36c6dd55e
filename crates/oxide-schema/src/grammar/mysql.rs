//! MySQL grammar.
//!
//! Column names are emitted bare; index, constraint and referenced
//! identifiers are quoted with backticks.

use super::Grammar;

/// MySQL/MariaDB `CREATE TABLE` grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlGrammar;

impl MySqlGrammar {
    /// Creates a new MySQL grammar.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Grammar for MySqlGrammar {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn auto_increment_keyword(&self) -> &'static str {
        "AUTO_INCREMENT"
    }
}
