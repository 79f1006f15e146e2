use std::collections::HashMap;

/// Tag applied to a flow whose (port, protocol) has no lookup entry.
pub const UNTAGGED: &str = "Untagged";

/// Composite key for the lookup table. The protocol component is lowercased
/// at construction, so matching is case-insensitive on protocol only; the
/// port is compared as a literal string ("080" and "80" are different keys).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    port: String,
    protocol: String,
}

impl LookupKey {
    pub fn new(port: &str, protocol: &str) -> Self {
        Self {
            port: port.to_string(),
            protocol: protocol.to_lowercase(),
        }
    }
}

/// Mapping from (port, protocol) to a user-supplied tag. Populated once by
/// the loader, read-only afterwards. Re-inserting a key overwrites it.
#[derive(Debug, Default)]
pub struct LookupTable(HashMap<LookupKey, String>);

impl LookupTable {
    pub fn insert(&mut self, key: LookupKey, tag: String) {
        self.0.insert(key, tag);
    }

    /// Resolved tag for a key, falling back to the `Untagged` sentinel.
    pub fn tag_for(&self, key: &LookupKey) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or(UNTAGGED)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// An intermediate type to leverage the serde deserialisation provided by the
/// csv crate. Fields are positional (the lookup file has no header row) and
/// deliberately loose: any strings are accepted, trimming and case folding
/// happen when the row is turned into a table entry.
#[derive(serde::Deserialize, Debug)]
pub struct LookupRowFields {
    pub dst_port: String,
    pub protocol: String,
    pub tag: String,
}

#[cfg(test)]
mod tests {
    use super::{LookupKey, LookupTable, UNTAGGED};

    #[test]
    fn test_protocol_case_insensitive() {
        assert_eq!(LookupKey::new("80", "TCP"), LookupKey::new("80", "tcp"));
        assert_eq!(LookupKey::new("80", "Tcp"), LookupKey::new("80", "tcp"));
        assert_ne!(LookupKey::new("80", "tcp"), LookupKey::new("80", "udp"));
    }

    #[test]
    fn test_port_compared_literally() {
        assert_ne!(LookupKey::new("080", "tcp"), LookupKey::new("80", "tcp"));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let mut table = LookupTable::default();
        table.insert(LookupKey::new("80", "TCP"), "web".to_string());
        table.insert(LookupKey::new("80", "tcp"), "http".to_string());

        assert_eq!(table.len(), 1);
        assert_eq!(table.tag_for(&LookupKey::new("80", "tcp")), "http");
    }

    #[test]
    fn test_missing_key_is_untagged() {
        let table = LookupTable::default();
        assert_eq!(table.tag_for(&LookupKey::new("22", "tcp")), UNTAGGED);
    }
}
