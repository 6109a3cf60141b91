use anyhow::Context;
use rusqlite::Connection;

/// Schema steps, applied in order and recorded by name.
const MIGRATIONS: &[(&str, &str)] = &[(
    "001_create_leads.sql",
    "CREATE TABLE IF NOT EXISTS leads (
        position     INTEGER PRIMARY KEY,
        lead_id      INTEGER NOT NULL,
        phone        TEXT NOT NULL,
        name         TEXT NOT NULL DEFAULT '',
        slots        TEXT NOT NULL DEFAULT '',
        booked_slot  TEXT,
        status       TEXT NOT NULL DEFAULT '',
        booking_time TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_leads_lead_id ON leads (lead_id);",
)];

pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .context("failed to create migrations table")?;

    for (name, sql) in MIGRATIONS {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .context("failed to check migration status")?;

        if already_applied {
            continue;
        }

        conn.execute_batch(sql)
            .with_context(|| format!("failed to apply migration: {name}"))?;

        conn.execute("INSERT INTO _migrations (name) VALUES (?1)", [name])
            .with_context(|| format!("failed to record migration: {name}"))?;

        tracing::info!("applied migration: {name}");
    }

    Ok(())
}
