use crate::error::{ArchiveError, Result};

pub const VIDEO_INFO_TABLE: &str = "video_info";
pub const TRANSCRIPTION_TABLE: &str = "transcription_data";

/// Column types understood by the store.
///
/// `Json` holds a JSON document as text; it stands in for Postgres-style
/// `text[]` and `jsonb` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
    Real,
    Json,
}

impl SqlType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Text => "text",
            SqlType::Integer => "integer",
            SqlType::Real => "real",
            SqlType::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub sql_type: SqlType,
}

impl Column {
    pub fn new(name: &str, sql_type: SqlType) -> Self {
        Self {
            name: name.to_string(),
            sql_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<Column>,
}

impl TableSchema {
    pub fn new(name: &str, columns: &[(&str, SqlType)]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns
                .iter()
                .map(|(n, t)| Column::new(n, *t))
                .collect(),
        }
    }

    /// Number of values a row for this table must carry.
    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    /// `CREATE TABLE IF NOT EXISTS` statement for this schema.
    pub fn create_statement(&self) -> Result<String> {
        check_identifier(&self.name)?;
        if self.columns.is_empty() {
            return Err(ArchiveError::EmptySchema {
                table: self.name.clone(),
            });
        }
        Ok(format!(
            "CREATE TABLE IF NOT EXISTS {} {}",
            self.name,
            column_list_to_ddl(&self.columns)?
        ))
    }
}

pub fn video_info() -> TableSchema {
    TableSchema::new(
        VIDEO_INFO_TABLE,
        &[
            ("date_posted", SqlType::Text),
            ("id", SqlType::Text),
            ("url", SqlType::Text),
            ("title", SqlType::Text),
            ("description", SqlType::Text),
            ("tags", SqlType::Json),
            ("duration", SqlType::Integer),
        ],
    )
}

pub fn transcription_data() -> TableSchema {
    TableSchema::new(
        TRANSCRIPTION_TABLE,
        &[
            ("id", SqlType::Text),
            ("part_number", SqlType::Integer),
            ("transcription_text", SqlType::Json),
        ],
    )
}

/// Build the parenthesized column-definition list, in column order.
pub fn column_list_to_ddl(columns: &[Column]) -> Result<String> {
    for col in columns {
        check_identifier(&col.name)?;
    }

    match columns {
        [] => Err(ArchiveError::EmptySchema {
            table: String::new(),
        }),
        [only] => Ok(format!("({} {})", only.name, only.sql_type.as_sql())),
        [init @ .., last] => {
            let mut ddl = String::from("(");
            for col in init {
                ddl.push_str(&format!("{} {}, ", col.name, col.sql_type.as_sql()));
            }
            ddl.push_str(&format!("{} {})", last.name, last.sql_type.as_sql()));
            Ok(ddl)
        }
    }
}

/// Allow-list for table and column names interpolated into statements.
pub fn check_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ArchiveError::InvalidIdentifier(name.to_string()))
    }
}
