//! SQL grammar for schema compilation.
//!
//! A grammar turns a [`Schema`] into DDL text. Compilation is a pure
//! function of the schema content and its column definition order; the
//! charset/collation clause is supplied by the caller.

mod mysql;

pub use mysql::MySqlGrammar;

use crate::column::{Column, DefaultValue};
use crate::foreign_key::ForeignKey;
use crate::index::{Index, IndexType};
use crate::schema::Schema;

/// Trait for dialect-specific DDL generation.
pub trait Grammar: Send + Sync {
    /// Returns the grammar name.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn quote_char(&self) -> char;

    /// Returns the auto-increment keyword for this grammar.
    fn auto_increment_keyword(&self) -> &'static str;

    /// Quotes an identifier.
    fn quote_identifier(&self, name: &str) -> String {
        let q = self.quote_char();
        format!("{q}{name}{q}")
    }

    /// Compiles the schema into a `CREATE TABLE` statement.
    fn compile(&self, schema: &Schema, charset_collate: &str) -> String {
        let mut sql = format!("CREATE TABLE {} (\n", schema.table_name());
        sql.push_str(&self.compile_columns(schema.columns()));

        if !schema.indexes().is_empty() {
            sql.push_str(",\n");
            sql.push_str(&self.compile_indexes(schema.indexes()));
        }

        if schema.has_foreign_keys() {
            sql.push_str(",\n");
            sql.push_str(&self.compile_foreign_keys(schema.foreign_keys()));
        }

        sql.push_str("\n)");
        if !charset_collate.is_empty() {
            sql.push(' ');
            sql.push_str(charset_collate);
        }
        sql.push(';');
        sql
    }

    /// Compiles the column list, one definition per line.
    fn compile_columns(&self, columns: &[Column]) -> String {
        columns
            .iter()
            .map(|c| self.compile_column(c))
            .collect::<Vec<_>>()
            .join(",\n")
    }

    /// Compiles a single column definition.
    fn compile_column(&self, column: &Column) -> String {
        let mut sql = String::from(column.name());
        if let Some(sql_type) = column.sql_type() {
            sql.push(' ');
            sql.push_str(sql_type.as_sql());
        }
        sql.push_str(&self.column_length(column));

        if column.is_unsigned() {
            sql.push_str(" UNSIGNED");
        }
        sql.push_str(if column.is_nullable() {
            " NULL"
        } else {
            " NOT NULL"
        });
        if column.is_auto_increment() {
            sql.push(' ');
            sql.push_str(self.auto_increment_keyword());
        }

        if let Some(default) = column.default_value() {
            sql.push_str(" DEFAULT ");
            sql.push_str(&self.render_default(default));
        }

        sql
    }

    /// Renders `(precision[,scale])` for DECIMAL/FLOAT and `(length)` otherwise.
    fn column_length(&self, column: &Column) -> String {
        let uses_precision = column.sql_type().is_some_and(|t| t.uses_precision());

        if uses_precision {
            if let Some(precision) = column.precision() {
                return match column.scale() {
                    Some(scale) => format!("({precision},{scale})"),
                    None => format!("({precision})"),
                };
            }
        }

        match column.length() {
            Some(length) if length > 0 => format!("({length})"),
            _ => String::new(),
        }
    }

    /// Renders a default value: literals quoted, expressions verbatim.
    ///
    /// Backslashes and single quotes inside literals are escaped so the
    /// string always closes under MySQL's default `sql_mode`.
    fn render_default(&self, default: &DefaultValue) -> String {
        match default {
            DefaultValue::Literal(value) => format!(
                "'{}'",
                value.to_string().replace('\\', "\\\\").replace('\'', "''")
            ),
            DefaultValue::Expression(expr) => expr.clone(),
        }
    }

    /// Compiles the index clauses.
    fn compile_indexes(&self, indexes: &[Index]) -> String {
        indexes
            .iter()
            .map(|i| self.compile_index(i))
            .collect::<Vec<_>>()
            .join(",\n")
    }

    /// Compiles one index clause. Primary keys are unnamed.
    fn compile_index(&self, index: &Index) -> String {
        let column = self.quote_identifier(index.column());
        match index.index_type() {
            IndexType::Primary => format!("PRIMARY KEY ({column})"),
            other => format!(
                "{} {} ({column})",
                other.as_sql(),
                self.quote_identifier(index.name())
            ),
        }
    }

    /// Compiles the foreign key constraint clauses.
    fn compile_foreign_keys(&self, foreign_keys: &[ForeignKey]) -> String {
        foreign_keys
            .iter()
            .map(|fk| self.compile_foreign_key(fk))
            .collect::<Vec<_>>()
            .join(",\n")
    }

    /// Compiles a single foreign key constraint clause.
    fn compile_foreign_key(&self, fk: &ForeignKey) -> String {
        format!(
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE {} ON UPDATE {}",
            self.quote_identifier(fk.name()),
            self.quote_identifier(fk.column()),
            self.quote_identifier(fk.referenced_table()),
            self.quote_identifier(fk.referenced_column()),
            fk.delete_action().as_sql(),
            fk.update_action().as_sql(),
        )
    }

    /// Compiles a `DROP TABLE IF EXISTS` statement.
    fn compile_drop(&self, table: &str) -> String {
        format!("DROP TABLE IF EXISTS {table};")
    }

    /// Compiles a `TRUNCATE TABLE` statement.
    fn compile_truncate(&self, table: &str) -> String {
        format!("TRUNCATE TABLE {table};")
    }
}
