use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::document_type::DocumentType;

/// A folder grouping documents of a pack.
///
/// Folders form a tree through `folder` (the parent id). The engine stores
/// them as-is and does not validate the tree for cycles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Parent folder id, `None` at the root.
    #[serde(default)]
    pub folder: Option<String>,
    pub sort: Number,
    #[serde(rename = "type")]
    pub kind: DocumentType,
    /// Remaining fields (`color`, `flags`, `_stats`, ...), passed through.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Folder {
    pub fn new(id: impl Into<String>, name: impl Into<String>, sort: i64, kind: DocumentType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            folder: None,
            sort: Number::from(sort),
            kind,
            extra: Map::new(),
        }
    }

    /// Numeric sort key.
    pub fn sort_key(&self) -> f64 {
        self.sort.as_f64().unwrap_or_default()
    }

    /// Read order: `sort` ascending, then `name` ascending.
    pub fn cmp_order(&self, other: &Self) -> Ordering {
        self.sort_key()
            .total_cmp(&other.sort_key())
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Sort folders into their deterministic read order.
pub fn sort_folders(folders: &mut [Folder]) {
    folders.sort_by(Folder::cmp_order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn sort_then_name() {
        let mut folders = vec![
            Folder::new("1", "B", 1, DocumentType::Item),
            Folder::new("2", "A", 1, DocumentType::Item),
            Folder::new("3", "C", 0, DocumentType::Item),
        ];
        sort_folders(&mut folders);
        let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[test]
    fn serde_roundtrip_keeps_extra_fields() {
        let value = json!({
            "_id": "f1",
            "name": "Weapons",
            "folder": null,
            "sort": 100000,
            "type": "Item",
            "color": "#ff0000",
            "flags": {}
        });
        let folder: Folder = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(folder.id, "f1");
        assert_eq!(folder.kind, DocumentType::Item);
        assert_eq!(folder.extra.get("color"), Some(&json!("#ff0000")));
        assert_eq!(serde_json::to_value(&folder).unwrap(), value);
    }

    #[test]
    fn missing_parent_defaults_to_root() {
        let folder: Folder =
            serde_json::from_value(json!({"_id": "f", "name": "n", "sort": 0, "type": "Macro"}))
                .unwrap();
        assert!(folder.folder.is_none());
    }

    proptest! {
        #[test]
        fn sorted_output_is_ordered(entries in prop::collection::vec((-5i64..5, "[A-D]{1,2}"), 0..20)) {
            let mut folders: Vec<Folder> = entries
                .iter()
                .enumerate()
                .map(|(i, (sort, name))| Folder::new(i.to_string(), name.clone(), *sort, DocumentType::Actor))
                .collect();
            sort_folders(&mut folders);
            prop_assert_eq!(folders.len(), entries.len());
            for pair in folders.windows(2) {
                prop_assert_ne!(pair[0].cmp_order(&pair[1]), Ordering::Greater);
            }
        }
    }
}
