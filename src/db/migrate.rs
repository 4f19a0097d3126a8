use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. It doubles as the migration ledger,
/// so it is created before anything else.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250901_0001_create_time_entries",
        description: "Created time_entries table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS time_entries (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  INTEGER NOT NULL,
            clock_in     TEXT NOT NULL,
            clock_out    TEXT,
            total_hours  REAL NOT NULL DEFAULT 0 CHECK(total_hours >= 0),
            date         TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_time_entries_date ON time_entries(date);
        CREATE INDEX IF NOT EXISTS idx_time_entries_emp_date ON time_entries(employee_id, date);
        "#,
    },
    Migration {
        version: "20250901_0002_create_open_sessions",
        description: "Created open_sessions table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS open_sessions (
            employee_id  INTEGER PRIMARY KEY,
            clock_in     TEXT NOT NULL,
            date         TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250915_0003_create_leave_requests",
        description: "Created leave_requests table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS leave_requests (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_name  TEXT NOT NULL,
            leave_type     TEXT NOT NULL CHECK(leave_type IN
                ('vacation','sick','personal','maternity','paternity','emergency')),
            start_date     TEXT NOT NULL,
            end_date       TEXT NOT NULL,
            total_days     INTEGER NOT NULL,
            reason         TEXT NOT NULL,
            urgency        TEXT NOT NULL DEFAULT 'normal' CHECK(urgency IN ('low','normal','high','urgent')),
            status         TEXT NOT NULL DEFAULT 'pending' CHECK(status IN ('pending','approved','denied')),
            created_at     TEXT NOT NULL,
            manager_id     INTEGER NOT NULL DEFAULT 1,
            reviewed_at    TEXT,
            reviewed_by    TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_leave_requests_status ON leave_requests(status);
        "#,
    },
    Migration {
        version: "20251001_0004_create_directory",
        description: "Created employees and departments tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS employees (
            id                              INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name                      TEXT NOT NULL,
            last_name                       TEXT NOT NULL,
            email                           TEXT NOT NULL,
            phone                           TEXT NOT NULL,
            role                            TEXT NOT NULL,
            department                      TEXT NOT NULL,
            hire_date                       TEXT NOT NULL,
            status                          TEXT NOT NULL DEFAULT 'active'
                CHECK(status IN ('active','inactive','on-leave')),
            emergency_contact_name          TEXT NOT NULL DEFAULT '',
            emergency_contact_phone         TEXT NOT NULL DEFAULT '',
            emergency_contact_relationship  TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_employees_status ON employees(status);

        CREATE TABLE IF NOT EXISTS departments (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL UNIQUE COLLATE NOCASE,
            manager_id   INTEGER,
            description  TEXT NOT NULL DEFAULT ''
        );
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Versions not yet recorded in the log table.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations, oldest first.
/// Each migration runs in its own transaction and is recorded as a
/// `migration_applied` row in the log table, so reruns are no-ops.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}
