use std::time::Duration;
use toml::{
    Table,
    value::{Array, Value},
};

/// Extension trait for [`Table`](toml::Table).
pub trait TomlTableExt {
    /// Extracts the boolean value corresponding to the key.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Extracts the integer value corresponding to the key and
    /// represents it as `u16` if possible.
    fn get_u16(&self, key: &str) -> Option<u16>;

    /// Extracts the integer value corresponding to the key and
    /// represents it as `usize` if possible.
    fn get_usize(&self, key: &str) -> Option<usize>;

    /// Extracts the string corresponding to the key.
    fn get_str(&self, key: &str) -> Option<&str>;

    /// Extracts the array corresponding to the key.
    fn get_array(&self, key: &str) -> Option<&Array>;

    /// Extracts the table corresponding to the key.
    fn get_table(&self, key: &str) -> Option<&Table>;

    /// Extracts the value corresponding to the key and parses it as `Duration`.
    ///
    /// Integers are treated as seconds. Strings are human-readable
    /// durations such as `500ms`, `30s`, `5m` or `1h 30m`.
    fn get_duration(&self, key: &str) -> Option<Duration>;
}

impl TomlTableExt for Table {
    #[inline]
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    #[inline]
    fn get_u16(&self, key: &str) -> Option<u16> {
        self.get(key)
            .and_then(|v| v.as_integer())
            .and_then(|i| u16::try_from(i).ok())
    }

    #[inline]
    fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key)
            .and_then(|v| v.as_integer())
            .and_then(|i| usize::try_from(i).ok())
    }

    #[inline]
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    #[inline]
    fn get_array(&self, key: &str) -> Option<&Array> {
        self.get(key).and_then(|v| v.as_array())
    }

    #[inline]
    fn get_table(&self, key: &str) -> Option<&Table> {
        self.get(key).and_then(|v| v.as_table())
    }

    fn get_duration(&self, key: &str) -> Option<Duration> {
        match self.get(key)? {
            Value::Integer(secs) => u64::try_from(*secs).ok().map(Duration::from_secs),
            Value::String(s) => humantime::parse_duration(s)
                .inspect_err(|err| tracing::warn!("invalid duration for `{key}`: {err}"))
                .ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TomlTableExt;
    use std::time::Duration;

    #[test]
    fn it_reads_table_values() -> anyhow::Result<()> {
        let table: toml::Table = toml::from_str(
            r#"
            timeout = "10s"
            poll = "1m 30s"
            delay = "500ms"
            broken = "soon"
            retries = 3
            idle = 90

            [backend]
            base-url = "https://example.com"
            "#,
        )?;
        assert_eq!(table.get_duration("timeout"), Some(Duration::from_secs(10)));
        assert_eq!(table.get_duration("idle"), Some(Duration::from_secs(90)));
        assert_eq!(table.get_duration("poll"), Some(Duration::from_secs(90)));
        assert_eq!(table.get_duration("delay"), Some(Duration::from_millis(500)));
        assert_eq!(table.get_duration("broken"), None);
        assert_eq!(table.get_duration("retries"), Some(Duration::from_secs(3)));
        assert_eq!(table.get_u16("retries"), Some(3));
        assert_eq!(table.get_bool("retries"), None);
        assert_eq!(
            table
                .get_table("backend")
                .and_then(|backend| backend.get_str("base-url")),
            Some("https://example.com")
        );
        Ok(())
    }
}
