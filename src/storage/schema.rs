pub const ENABLE_FOREIGN_KEYS: &str = "PRAGMA foreign_keys = ON;";

pub const CREATE_PASTE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS paste (
        id INTEGER PRIMARY KEY,
        value TEXT NOT NULL,
        created_at TEXT NOT NULL,
        last_used_at TEXT NOT NULL,
        CHECK(LENGTH(value) > 0),
        CHECK(last_used_at >= created_at)
    )
";

pub const CREATE_TAG_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS tag (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        UNIQUE(name),
        CHECK(LENGTH(name) > 0)
    )
";

pub const CREATE_PASTE_TAG_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS paste_tag (
        paste_id INTEGER NOT NULL,
        tag_id INTEGER NOT NULL,
        seq_id INTEGER NOT NULL,
        PRIMARY KEY (paste_id, tag_id),
        UNIQUE(paste_id, seq_id),
        FOREIGN KEY (paste_id) REFERENCES paste(id) ON DELETE CASCADE,
        FOREIGN KEY (tag_id) REFERENCES tag(id) ON DELETE CASCADE,
        CHECK(seq_id >= 0)
    )
";

pub const CREATE_INDEX_LAST_USED_AT: &str =
    "CREATE INDEX IF NOT EXISTS idx_paste_last_used_at ON paste(last_used_at)";

pub const CREATE_INDEX_TAG_ID: &str =
    "CREATE INDEX IF NOT EXISTS idx_paste_tag_tag_id ON paste_tag(tag_id)";
