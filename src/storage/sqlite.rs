use std::fs;
use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, Row, params};

use super::PasteStorage;
use super::models::{NewPaste, Paste, SearchQuery};
use super::schema;
use super::tags;
use crate::errors::{PasteError, Result};

const BASE_SELECT: &str = "
    SELECT paste.id, paste.value, paste.created_at, paste.last_used_at
    FROM paste
";

// ?1 is an escaped LIKE pattern, ?2 the row limit.
const SEARCH_SQL: &str = "
    SELECT paste.id, paste.value, paste.created_at, paste.last_used_at
    FROM paste
    WHERE paste.value LIKE ?1 ESCAPE '\\'
       OR EXISTS (
           SELECT 1 FROM paste_tag
           JOIN tag ON tag.id = paste_tag.tag_id
           WHERE paste_tag.paste_id = paste.id
             AND tag.name LIKE ?1 ESCAPE '\\'
       )
    ORDER BY paste.last_used_at DESC, paste.id DESC
    LIMIT ?2
";

pub struct SqliteStorage {
    conn: Connection,
}

fn row_to_paste(row: &Row) -> rusqlite::Result<Paste> {
    Ok(Paste {
        id: row.get(0)?,
        value: row.get(1)?,
        created_at: row.get(2)?,
        last_used_at: row.get(3)?,
        tags: Vec::new(),
    })
}

fn validate_value(value: &str) -> Result<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PasteError::Validation("paste content is empty".to_string()));
    }
    Ok(trimmed)
}

fn not_found(id: i64) -> PasteError {
    PasteError::NotFound(format!("Paste with id {} not found", id))
}

/// Builds a LIKE pattern matching `text` anywhere, with wildcards in `text`
/// taken literally.
fn substring_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl SqliteStorage {
    pub fn new(conn: Connection) -> Result<Self> {
        conn.execute_batch(schema::ENABLE_FOREIGN_KEYS)?;
        conn.execute(schema::CREATE_PASTE_TABLE, [])?;
        conn.execute(schema::CREATE_TAG_TABLE, [])?;
        conn.execute(schema::CREATE_PASTE_TAG_TABLE, [])?;
        conn.execute(schema::CREATE_INDEX_LAST_USED_AT, [])?;
        conn.execute(schema::CREATE_INDEX_TAG_ID, [])?;
        Ok(Self { conn })
    }

    /// Opens (or creates) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened paste database");
        Self::new(conn)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::new(conn)
    }

    #[cfg(test)]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn paste_exists(conn: &Connection, id: i64) -> Result<bool> {
        let exists = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM paste WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn run_search(&self, query: &SearchQuery) -> Result<Vec<Paste>> {
        let pattern = substring_pattern(query.text.trim());
        // One read transaction so pastes and their tags come from the same snapshot.
        let tx = self.conn.unchecked_transaction()?;
        let mut pastes = {
            let mut stmt = tx.prepare_cached(SEARCH_SQL)?;
            let rows = stmt
                .query_map(params![pattern, query.effective_limit()], row_to_paste)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows
        };
        for paste in &mut pastes {
            paste.tags = tags::tag_names_for(&tx, paste.id)?;
        }
        tx.commit()?;
        Ok(pastes)
    }
}

impl PasteStorage for SqliteStorage {
    fn create_paste(&self, paste: NewPaste) -> Result<Paste> {
        let value = validate_value(&paste.value)?;
        let now = Utc::now();

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO paste (value, created_at, last_used_at) VALUES (?1, ?2, ?2)",
            params![value, now],
        )?;
        let id = tx.last_insert_rowid();
        tags::replace_tags(&tx, id, paste.tags.as_slice())?;
        tx.commit()?;

        tracing::debug!(id, "created paste");
        self.get_paste(id)
    }

    fn update_paste(&self, id: i64, paste: NewPaste) -> Result<Paste> {
        let value = validate_value(&paste.value)?;

        let tx = self.conn.unchecked_transaction()?;
        let changes = tx.execute(
            "UPDATE paste SET value = ?1 WHERE id = ?2",
            params![value, id],
        )?;
        if changes == 0 {
            return Err(not_found(id));
        }
        tags::replace_tags(&tx, id, paste.tags.as_slice())?;
        tags::prune_orphans(&tx)?;
        tx.commit()?;

        tracing::debug!(id, "updated paste");
        self.get_paste(id)
    }

    fn touch_paste(&self, id: i64) -> Result<()> {
        let changes = self.conn.execute(
            "UPDATE paste SET last_used_at = MAX(?1, created_at) WHERE id = ?2",
            params![Utc::now(), id],
        )?;
        if changes == 0 {
            return Err(not_found(id));
        }
        tracing::debug!(id, "touched paste");
        Ok(())
    }

    fn delete_paste(&self, id: i64) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM paste_tag WHERE paste_id = ?1", params![id])?;
        let removed = tx.execute("DELETE FROM paste WHERE id = ?1", params![id])?;
        tags::prune_orphans(&tx)?;
        tx.commit()?;

        if removed > 0 {
            tracing::debug!(id, "deleted paste");
        }
        Ok(removed > 0)
    }

    fn get_paste(&self, id: i64) -> Result<Paste> {
        let sql = format!("{} WHERE paste.id = ?1", BASE_SELECT);
        let mut paste = self
            .conn
            .query_row(&sql, params![id], row_to_paste)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => not_found(id),
                other => PasteError::Storage(other),
            })?;
        paste.tags = tags::tag_names_for(&self.conn, id)?;
        Ok(paste)
    }

    fn tags_for(&self, id: i64) -> Result<Vec<String>> {
        if !Self::paste_exists(&self.conn, id)? {
            return Err(not_found(id));
        }
        tags::tag_names_for(&self.conn, id)
    }

    fn search(&self, query: SearchQuery) -> Result<Vec<Paste>> {
        self.run_search(&query).inspect_err(|e| {
            tracing::warn!(query = %query.text, error = %e, "paste search failed");
        })
    }

    fn list_tag_names(&self) -> Result<Vec<String>> {
        tags::all_tag_names(&self.conn)
    }
}
