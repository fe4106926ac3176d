pub mod models;
pub mod schema;

use rusqlite::types::Value;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ArchiveError, Result};
use schema::TableSchema;

pub struct Database {
    pub conn: Connection,
    pub path: PathBuf,
}

impl Database {
    /// Open (or create) the database at the given path and make sure the
    /// archive tables exist.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        let db = Database {
            conn,
            path: path.to_path_buf(),
        };
        db.ensure_archive_tables()?;

        info!("Opened database: {}", path.display());
        Ok(db)
    }

    /// In-memory database with the archive tables created.
    pub fn open_in_memory() -> Result<Self> {
        let db = Database {
            conn: Connection::open_in_memory()?,
            path: PathBuf::from(":memory:"),
        };
        db.ensure_archive_tables()?;
        Ok(db)
    }

    /// Default database path: ~/.yt-archive/archive.db
    pub fn default_db_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ArchiveError::Config("Could not determine home directory".into()))?;
        Ok(home.join(".yt-archive").join("archive.db"))
    }

    fn ensure_archive_tables(&self) -> Result<()> {
        self.ensure_table(&schema::video_info())?;
        self.ensure_table(&schema::transcription_data())?;
        Ok(())
    }

    /// Create the table if it is not already there. Existing tables are left
    /// untouched, even if their columns differ.
    pub fn ensure_table(&self, table: &TableSchema) -> Result<()> {
        let sql = table.create_statement()?;
        debug!("{sql}");
        self.conn.execute_batch(&sql)?;
        Ok(())
    }

    /// Append one row to `table` and commit it.
    ///
    /// An empty row is accepted and writes nothing.
    pub fn insert_row(&self, table: &str, row: &[Value], expected_arity: usize) -> Result<()> {
        if row.is_empty() {
            return Ok(());
        }
        if row.len() != expected_arity {
            return Err(ArchiveError::ArityMismatch {
                table: table.to_string(),
                expected: expected_arity,
                actual: row.len(),
            });
        }
        schema::check_identifier(table)?;

        let sql = format!("INSERT INTO {table} VALUES {}", placeholders(expected_arity));

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(&sql, rusqlite::params_from_iter(row.iter()))?;
        tx.commit()?;
        Ok(())
    }

    /// Number of rows currently in `table`.
    pub fn row_count(&self, table: &str) -> Result<i64> {
        schema::check_identifier(table)?;
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?;
        Ok(count)
    }

    /// Stored transcript parts for a video, ordered by part number.
    pub fn transcription_parts(&self, video_id: &str) -> Result<Vec<(i64, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT part_number, transcription_text FROM transcription_data
             WHERE id = ?1 ORDER BY part_number",
        )?;
        let rows = stmt.query_map([video_id], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let mut parts = Vec::new();
        for row in rows {
            parts.push(row?);
        }
        Ok(parts)
    }
}

/// `(?1, ?2, ..., ?n)`
fn placeholders(n: usize) -> String {
    let marks: Vec<String> = (1..=n).map(|i| format!("?{i}")).collect();
    format!("({})", marks.join(", "))
}
