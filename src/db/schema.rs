//! Database schema and migrations.
//!
//! Migrations run in order on open; `schema_version` records which ones
//! have been applied.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: posts table
    r#"
CREATE TABLE posts (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    body            TEXT NOT NULL,
    image_filename  TEXT,                    -- stored name under the upload directory
    delete_password TEXT,                    -- Argon2 hash, NULL = not deletable
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_posts_created_at ON posts(created_at);
"#,
];
