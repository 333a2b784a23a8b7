use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read and decode the JSON value stored under `key`. A missing key is
/// `Ok(None)`; a value that no longer decodes is an error so the caller can
/// decide whether to fall back to a default.
pub fn get_value<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Option<T>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM preferences WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .with_context(|| format!("failed to read preference {key}"))?;

    raw.map(|text| {
        serde_json::from_str(&text).with_context(|| format!("preference {key} is not valid JSON"))
    })
    .transpose()
}

/// Store `value` under `key`, replacing any previous value.
pub fn put_value<T: Serialize + ?Sized>(conn: &Connection, key: &str, value: &T) -> Result<()> {
    let text = serde_json::to_string(value)
        .with_context(|| format!("failed to encode preference {key}"))?;
    conn.execute(
        "INSERT INTO preferences (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, text],
    )
    .with_context(|| format!("failed to write preference {key}"))?;
    Ok(())
}

/// Remove `key`. Returns whether a row existed.
pub fn delete_value(conn: &Connection, key: &str) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM preferences WHERE key = ?1", params![key])
        .with_context(|| format!("failed to delete preference {key}"))?;
    Ok(deleted > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[test]
    fn round_trips_and_overwrites() {
        let conn = open_in_memory().unwrap();
        assert_eq!(get_value::<Vec<u32>>(&conn, "ids").unwrap(), None);

        put_value(&conn, "ids", &vec![3u32, 1]).unwrap();
        put_value(&conn, "ids", &vec![7u32]).unwrap();
        assert_eq!(get_value::<Vec<u32>>(&conn, "ids").unwrap(), Some(vec![7]));

        assert!(delete_value(&conn, "ids").unwrap());
        assert!(!delete_value(&conn, "ids").unwrap());
    }

    #[test]
    fn undecodable_value_is_an_error() {
        let conn = open_in_memory().unwrap();
        put_value(&conn, "ids", "not a list").unwrap();
        assert!(get_value::<Vec<u32>>(&conn, "ids").is_err());
    }
}
