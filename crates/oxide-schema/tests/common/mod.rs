#![allow(dead_code)]

use std::sync::{Mutex, Once};

use oxide_schema::database::Database;

pub const CHARSET: &str = "DEFAULT CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci";

static LOGGING: Once = Once::new();

pub fn init_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// In-memory database that records every statement it is given.
pub struct RecordingDatabase {
    prefix: String,
    statements: Mutex<Vec<String>>,
    reject: Box<dyn Fn(&str) -> bool + Send + Sync>,
}

impl RecordingDatabase {
    pub fn new(prefix: &str) -> Self {
        init_logging();
        Self {
            prefix: prefix.to_string(),
            statements: Mutex::new(Vec::new()),
            reject: Box::new(|_| false),
        }
    }

    /// Rejects statements for which `predicate` returns true.
    pub fn rejecting(prefix: &str, predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            reject: Box::new(predicate),
            ..Self::new(prefix)
        }
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

impl Database for RecordingDatabase {
    fn table_prefix(&self) -> &str {
        &self.prefix
    }

    fn charset_collate(&self) -> &str {
        CHARSET
    }

    async fn execute(&self, sql: &str) -> Result<(), sqlx::Error> {
        self.statements.lock().unwrap().push(sql.to_string());
        if (self.reject)(sql) {
            return Err(sqlx::Error::Protocol(format!("rejected: {sql}")));
        }
        Ok(())
    }
}
