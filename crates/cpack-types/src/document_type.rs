use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The document type stored in a pack.
///
/// The set is closed: every pack holds exactly one of these, and the type
/// alone determines the pack's on-disk key scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentType {
    Item,
    Actor,
    RollTable,
    Macro,
    JournalEntry,
}

impl DocumentType {
    /// All document types, in declaration order.
    pub const ALL: [DocumentType; 5] = [
        Self::Item,
        Self::Actor,
        Self::RollTable,
        Self::Macro,
        Self::JournalEntry,
    ];

    /// The tag as it appears in manifests and folder records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "Item",
            Self::Actor => "Actor",
            Self::RollTable => "RollTable",
            Self::Macro => "Macro",
            Self::JournalEntry => "JournalEntry",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TypeError::UnknownDocumentType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_every_tag() {
        for t in DocumentType::ALL {
            assert_eq!(t.as_str().parse::<DocumentType>().unwrap(), t);
        }
    }

    #[test]
    fn parse_unknown_tag() {
        let err = "Spell".parse::<DocumentType>().unwrap_err();
        assert_eq!(err, TypeError::UnknownDocumentType("Spell".into()));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("actor".parse::<DocumentType>().is_err());
    }

    #[test]
    fn serde_uses_tag_names() {
        let json = serde_json::to_string(&DocumentType::RollTable).unwrap();
        assert_eq!(json, "\"RollTable\"");
        let back: DocumentType = serde_json::from_str("\"JournalEntry\"").unwrap();
        assert_eq!(back, DocumentType::JournalEntry);
    }
}
