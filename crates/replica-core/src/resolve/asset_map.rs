//! Original reference → local archive path, in insertion order.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Mapping from an asset's original reference string to its archive path.
///
/// Keys are the references exactly as written in the markup; two spellings of
/// the same absolute URL are two keys. Iteration follows first insertion;
/// inserting an existing key replaces its path in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMap {
    entries: Vec<(String, String)>,
}

impl AssetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces; returns the previous path for `reference`, if any.
    pub fn insert(&mut self, reference: impl Into<String>, local_path: impl Into<String>) -> Option<String> {
        let reference = reference.into();
        let local_path = local_path.into();
        match self.entries.iter_mut().find(|(k, _)| *k == reference) {
            Some((_, existing)) => Some(std::mem::replace(existing, local_path)),
            None => {
                self.entries.push((reference, local_path));
                None
            }
        }
    }

    pub fn get(&self, reference: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == reference)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serializes as a JSON-style object in insertion order.
impl Serialize for AssetMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AssetMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AssetMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let map: AssetMap = [("s.css", "styles/s.css"), ("p.jpg", "images/p.jpg")]
            .into_iter()
            .collect();
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["s.css", "p.jpg"]);
        assert_eq!(map.get("p.jpg"), Some("images/p.jpg"));
        assert_eq!(map.get("missing.png"), None);
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut map = AssetMap::new();
        assert_eq!(map.insert("a.png", "images/a.png"), None);
        map.insert("b.png", "images/b.png");
        assert_eq!(
            map.insert("a.png", "images/image_2.jpg"),
            Some("images/a.png".to_string())
        );
        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().next(), Some(("a.png", "images/image_2.jpg")));
    }

    #[test]
    fn serializes_as_object() {
        let map: AssetMap = [("s.css", "styles/s.css"), ("p.jpg", "images/p.jpg")]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"s.css":"styles/s.css","p.jpg":"images/p.jpg"}"#
        );
    }

    #[test]
    fn distinct_spellings_are_distinct_keys() {
        let mut map = AssetMap::new();
        map.insert("./a.png", "images/a.png");
        map.insert("a.png", "images/a.png");
        assert_eq!(map.len(), 2);
    }
}
