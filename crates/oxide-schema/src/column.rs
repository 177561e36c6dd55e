//! Column definitions.
//!
//! A [`Column`] is created through [`Schema::column`](crate::schema::Schema::column)
//! and configured in place with chainable setters:
//!
//! ```rust
//! use oxide_schema::schema::Schema;
//!
//! let mut schema = Schema::new("orders");
//! schema.column("total").decimal(8, 2).unsigned(true);
//! schema.column("status").varchar(20).default_literal("pending");
//! schema.column("created_at").datetime().default_expr("CURRENT_TIMESTAMP");
//!
//! let total = schema.get_column("total").unwrap();
//! assert_eq!(total.precision(), Some(8));
//! assert!(total.is_unsigned());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// Length used by [`Column::string`].
pub const DEFAULT_VARCHAR_LENGTH: u32 = 255;

/// SQL column types understood by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// Integer (32-bit).
    Int,
    /// Big integer (64-bit).
    BigInt,
    /// Medium integer (24-bit).
    MediumInt,
    /// Small integer (16-bit).
    SmallInt,
    /// Tiny integer (8-bit).
    TinyInt,
    /// Variable-length character string.
    Varchar,
    /// Fixed-length character string.
    Char,
    /// Text.
    Text,
    /// Long text.
    LongText,
    /// Boolean.
    Boolean,
    /// Date only.
    Date,
    /// Time only.
    Time,
    /// Date and time.
    DateTime,
    /// Timestamp.
    Timestamp,
    /// Floating point with optional precision and scale.
    Float,
    /// Decimal with precision and scale.
    Decimal,
    /// JSON document.
    Json,
}

impl ColumnType {
    /// Returns the SQL keyword for this type.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::BigInt => "BIGINT",
            Self::MediumInt => "MEDIUMINT",
            Self::SmallInt => "SMALLINT",
            Self::TinyInt => "TINYINT",
            Self::Varchar => "VARCHAR",
            Self::Char => "CHAR",
            Self::Text => "TEXT",
            Self::LongText => "LONGTEXT",
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::DateTime => "DATETIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Float => "FLOAT",
            Self::Decimal => "DECIMAL",
            Self::Json => "JSON",
        }
    }

    /// Returns whether the type is sized by precision/scale rather than length.
    #[must_use]
    pub fn uses_precision(self) -> bool {
        matches!(self, Self::Decimal | Self::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A value accepted as a column default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value, rendered as `1` or `0`.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => f.write_str(if *b { "1" } else { "0" }),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// Literal value, rendered quoted.
    Literal(Value),
    /// Raw SQL expression (e.g. `CURRENT_TIMESTAMP`), rendered verbatim.
    Expression(String),
}

impl DefaultValue {
    /// Returns whether this default is a raw SQL expression.
    #[must_use]
    pub fn is_expression(&self) -> bool {
        matches!(self, Self::Expression(_))
    }
}

/// A column of a table schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    sql_type: Option<ColumnType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scale: Option<u32>,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    unsigned: bool,
    #[serde(default)]
    auto_increment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<DefaultValue>,
}

impl Column {
    /// Creates an untyped, NOT NULL column.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: None,
            length: None,
            precision: None,
            scale: None,
            nullable: false,
            unsigned: false,
            auto_increment: false,
            default: None,
        }
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the SQL type, if one has been set.
    #[must_use]
    pub fn sql_type(&self) -> Option<ColumnType> {
        self.sql_type
    }

    /// Returns the length, if set.
    #[must_use]
    pub fn length(&self) -> Option<u32> {
        self.length
    }

    /// Returns the precision, if set.
    #[must_use]
    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    /// Returns the scale, if set.
    #[must_use]
    pub fn scale(&self) -> Option<u32> {
        self.scale
    }

    /// Returns whether the column accepts NULL.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns whether the column is UNSIGNED.
    #[must_use]
    pub fn is_unsigned(&self) -> bool {
        self.unsigned
    }

    /// Returns whether the column is AUTO_INCREMENT.
    #[must_use]
    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    /// Returns the default value, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Returns whether the default value is a raw SQL expression.
    #[must_use]
    pub fn is_default_expression(&self) -> bool {
        self.default.as_ref().is_some_and(DefaultValue::is_expression)
    }

    /// Sets the column type without touching length, precision or scale.
    pub fn set_type(&mut self, sql_type: ColumnType) -> &mut Self {
        self.sql_type = Some(sql_type);
        self
    }

    /// Sets the column length.
    pub fn set_length(&mut self, length: u32) -> &mut Self {
        self.length = Some(length);
        self
    }

    /// Sets the precision (total digits) for numeric columns.
    pub fn set_precision(&mut self, precision: u32) -> &mut Self {
        self.precision = Some(precision);
        self
    }

    /// Sets the scale (digits after the decimal point) for numeric columns.
    pub fn set_scale(&mut self, scale: u32) -> &mut Self {
        self.scale = Some(scale);
        self
    }

    /// Allows or forbids NULL.
    pub fn nullable(&mut self, nullable: bool) -> &mut Self {
        self.nullable = nullable;
        self
    }

    /// Marks the column UNSIGNED.
    pub fn unsigned(&mut self, unsigned: bool) -> &mut Self {
        self.unsigned = unsigned;
        self
    }

    /// Marks the column AUTO_INCREMENT.
    pub fn auto_increment(&mut self, auto_increment: bool) -> &mut Self {
        self.auto_increment = auto_increment;
        self
    }

    /// Sets the default value.
    ///
    /// When `is_expression` is true the value is emitted verbatim as SQL and
    /// must therefore be text.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDefaultValue`] if `is_expression` is true
    /// and `value` is not a string, or if `value` is a NaN or infinite float.
    pub fn default(&mut self, value: impl Into<Value>, is_expression: bool) -> Result<&mut Self> {
        let value = value.into();
        self.default = Some(match (value, is_expression) {
            (Value::Text(expr), true) => DefaultValue::Expression(expr),
            (_, true) => {
                return Err(SchemaError::InvalidDefaultValue {
                    column: self.name.clone(),
                    message: "SQL expression must be a string.".to_string(),
                });
            }
            (Value::Float(x), false) if !x.is_finite() => {
                return Err(SchemaError::InvalidDefaultValue {
                    column: self.name.clone(),
                    message: format!("{x} is not a valid numeric default."),
                });
            }
            (value, false) => DefaultValue::Literal(value),
        });
        Ok(self)
    }

    /// Sets a literal default value.
    ///
    /// Unlike [`Column::default`] this does not check the value; a NaN or
    /// infinite float renders as text that MySQL rejects for numeric columns.
    pub fn default_literal(&mut self, value: impl Into<Value>) -> &mut Self {
        self.default = Some(DefaultValue::Literal(value.into()));
        self
    }

    /// Sets a raw SQL expression as default (e.g. `CURRENT_TIMESTAMP`).
    pub fn default_expr(&mut self, expr: impl Into<String>) -> &mut Self {
        self.default = Some(DefaultValue::Expression(expr.into()));
        self
    }

    /// Removes the default value.
    pub fn clear_default(&mut self) -> &mut Self {
        self.default = None;
        self
    }

    // =========================================================================
    // Typed setters
    // =========================================================================

    /// VARCHAR with the given maximum length.
    pub fn varchar(&mut self, length: u32) -> &mut Self {
        self.sql_type = Some(ColumnType::Varchar);
        self.length = Some(length);
        self
    }

    /// VARCHAR(255).
    pub fn string(&mut self) -> &mut Self {
        self.varchar(DEFAULT_VARCHAR_LENGTH)
    }

    /// CHAR with the given length.
    pub fn char(&mut self, length: u32) -> &mut Self {
        self.sql_type = Some(ColumnType::Char);
        self.length = Some(length);
        self
    }

    /// INT, optionally unsigned.
    pub fn int(&mut self, unsigned: bool) -> &mut Self {
        self.integer_type(ColumnType::Int, unsigned)
    }

    /// TINYINT, optionally unsigned.
    pub fn tinyint(&mut self, unsigned: bool) -> &mut Self {
        self.integer_type(ColumnType::TinyInt, unsigned)
    }

    /// SMALLINT, optionally unsigned.
    pub fn smallint(&mut self, unsigned: bool) -> &mut Self {
        self.integer_type(ColumnType::SmallInt, unsigned)
    }

    /// MEDIUMINT, optionally unsigned.
    pub fn mediumint(&mut self, unsigned: bool) -> &mut Self {
        self.integer_type(ColumnType::MediumInt, unsigned)
    }

    /// BIGINT, optionally unsigned.
    pub fn bigint(&mut self, unsigned: bool) -> &mut Self {
        self.integer_type(ColumnType::BigInt, unsigned)
    }

    /// TEXT.
    pub fn text(&mut self) -> &mut Self {
        self.sql_type = Some(ColumnType::Text);
        self
    }

    /// LONGTEXT.
    pub fn longtext(&mut self) -> &mut Self {
        self.sql_type = Some(ColumnType::LongText);
        self
    }

    /// BOOLEAN.
    pub fn boolean(&mut self) -> &mut Self {
        self.sql_type = Some(ColumnType::Boolean);
        self
    }

    /// DATE.
    pub fn date(&mut self) -> &mut Self {
        self.sql_type = Some(ColumnType::Date);
        self
    }

    /// TIME.
    pub fn time(&mut self) -> &mut Self {
        self.sql_type = Some(ColumnType::Time);
        self
    }

    /// DATETIME.
    pub fn datetime(&mut self) -> &mut Self {
        self.sql_type = Some(ColumnType::DateTime);
        self
    }

    /// TIMESTAMP.
    pub fn timestamp(&mut self) -> &mut Self {
        self.sql_type = Some(ColumnType::Timestamp);
        self
    }

    /// JSON.
    pub fn json(&mut self) -> &mut Self {
        self.sql_type = Some(ColumnType::Json);
        self
    }

    /// FLOAT; `None` leaves precision or scale to the server default.
    pub fn float(&mut self, precision: Option<u32>, scale: Option<u32>) -> &mut Self {
        self.sql_type = Some(ColumnType::Float);
        self.precision = precision;
        self.scale = scale;
        self
    }

    /// DECIMAL with the given precision and scale.
    pub fn decimal(&mut self, precision: u32, scale: u32) -> &mut Self {
        self.sql_type = Some(ColumnType::Decimal);
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    fn integer_type(&mut self, sql_type: ColumnType, unsigned: bool) -> &mut Self {
        self.sql_type = Some(sql_type);
        self.unsigned = unsigned;
        self
    }
}
