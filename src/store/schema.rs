//! Alerts table definition

use rusqlite::Connection;

use crate::errors::Result;

pub const CREATE_ALERTS: &str = "
    CREATE TABLE IF NOT EXISTS alerts (
        id INTEGER PRIMARY KEY,
        disaster_type TEXT,
        location TEXT,
        timestamp TEXT
    )
";

/// Create the alerts table if absent
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_ALERTS)?;
    Ok(())
}
