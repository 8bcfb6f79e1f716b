//! Tag directory and per-paste tag sequencing.
//!
//! Every function takes a plain `Connection` so callers can pass an open
//! `Transaction` and group these statements with their own writes.

use rusqlite::{Connection, params};

use crate::errors::{PasteError, Result};

/// Tag names are compared trimmed and lowercased.
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Returns the id of the tag named `name`, creating the row if needed.
pub fn ensure_tag(conn: &Connection, name: &str) -> Result<i64> {
    let name = normalize_tag_name(name);
    if name.is_empty() {
        return Err(PasteError::Validation("tag name is empty".to_string()));
    }
    conn.prepare_cached("INSERT INTO tag (name) VALUES (?1) ON CONFLICT (name) DO NOTHING")?
        .execute(params![name])?;
    let id = conn
        .prepare_cached("SELECT id FROM tag WHERE name = ?1")?
        .query_row(params![name], |row| row.get(0))?;
    Ok(id)
}

/// Deletes every tag no paste refers to. Returns how many were removed.
pub fn prune_orphans(conn: &Connection) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM tag
         WHERE NOT EXISTS (SELECT 1 FROM paste_tag WHERE paste_tag.tag_id = tag.id)",
        [],
    )?;
    if removed > 0 {
        tracing::info!(removed, "pruned orphan tags");
    }
    Ok(removed)
}

/// Replaces the tag list of `paste_id` with `names`, in order.
///
/// Names that normalize to the same tag keep only their first position and
/// blank names are skipped, so `seq_id` always runs `0..n` without gaps.
/// Returns the stored names in `seq_id` order.
pub fn replace_tags<S: AsRef<str>>(
    conn: &Connection,
    paste_id: i64,
    names: &[S],
) -> Result<Vec<String>> {
    conn.execute("DELETE FROM paste_tag WHERE paste_id = ?1", params![paste_id])?;

    let mut insert = conn.prepare_cached(
        "INSERT INTO paste_tag (paste_id, tag_id, seq_id) VALUES (?1, ?2, ?3)
         ON CONFLICT (paste_id, tag_id) DO NOTHING",
    )?;
    let mut stored: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = normalize_tag_name(name.as_ref());
        if name.is_empty() {
            continue;
        }
        let tag_id = ensure_tag(conn, &name)?;
        let seq_id = stored.len() as i64;
        if insert.execute(params![paste_id, tag_id, seq_id])? == 1 {
            stored.push(name);
        }
    }
    tracing::debug!(paste_id, tags = stored.len(), "replaced paste tags");
    Ok(stored)
}

/// Tag names of one paste ordered by `seq_id`.
pub fn tag_names_for(conn: &Connection, paste_id: i64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT tag.name FROM paste_tag
         JOIN tag ON tag.id = paste_tag.tag_id
         WHERE paste_tag.paste_id = ?1
         ORDER BY paste_tag.seq_id ASC",
    )?;
    let names = stmt
        .query_map(params![paste_id], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(names)
}

pub fn all_tag_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare_cached("SELECT name FROM tag ORDER BY name ASC")?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(names)
}
