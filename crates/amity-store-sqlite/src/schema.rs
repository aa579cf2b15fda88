//! SQL schema for the Amity SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Registered addresses. Independent of the relationship table.
CREATE TABLE IF NOT EXISTS user_account (
    user_email  TEXT PRIMARY KEY,
    created_at  TEXT NOT NULL        -- ISO 8601 UTC; server-assigned
);

-- One directed row per (requestor, target) pair.
-- Rows are never deleted; facets only ever flip from 0 to 1.
CREATE TABLE IF NOT EXISTS relationship (
    requestor         TEXT    NOT NULL,
    target            TEXT    NOT NULL,
    is_friend         INTEGER NOT NULL DEFAULT 0,
    friend_blocked    INTEGER NOT NULL DEFAULT 0,
    subscribed        INTEGER NOT NULL DEFAULT 0,   -- requestor hears target
    subscribe_blocked INTEGER NOT NULL DEFAULT 0,   -- requestor refuses target
    PRIMARY KEY (requestor, target)
);

CREATE INDEX IF NOT EXISTS relationship_target_idx ON relationship(target);

-- Friendship read symmetrically: (email, friend) for every pair where either
-- row is a friend edge and neither row hides it.
CREATE VIEW IF NOT EXISTS active_friendship AS
SELECT r.requestor AS email, r.target AS friend
  FROM relationship r
 WHERE r.is_friend = 1
   AND r.friend_blocked = 0
   AND NOT EXISTS (
         SELECT 1 FROM relationship m
          WHERE m.requestor = r.target
            AND m.target = r.requestor
            AND m.friend_blocked = 1)
UNION
SELECT r.target AS email, r.requestor AS friend
  FROM relationship r
 WHERE r.is_friend = 1
   AND r.friend_blocked = 0
   AND NOT EXISTS (
         SELECT 1 FROM relationship m
          WHERE m.requestor = r.target
            AND m.target = r.requestor
            AND m.friend_blocked = 1);

PRAGMA user_version = 1;
";
