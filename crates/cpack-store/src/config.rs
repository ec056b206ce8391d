use serde::{Deserialize, Serialize};

/// What the reader does with an embedded reference it cannot resolve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Drop the reference, log a warning and record it in the read report.
    #[default]
    Tolerant,
    /// Fail the read with [`crate::PackError::MissingEmbedded`].
    Strict,
}

/// Configuration for opening and reading packs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Handling of unresolvable embedded references.
    pub resolution: ResolutionMode,
    /// Database file name inside the pack directory.
    pub file_name: String,
    /// Page cache size in bytes; `None` keeps the database default.
    pub cache_size: Option<usize>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            resolution: ResolutionMode::Tolerant,
            file_name: "pack.redb".into(),
            cache_size: None,
        }
    }
}

impl PackConfig {
    /// Default configuration with strict resolution.
    pub fn strict() -> Self {
        Self {
            resolution: ResolutionMode::Strict,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = PackConfig::default();
        assert_eq!(c.resolution, ResolutionMode::Tolerant);
        assert_eq!(c.file_name, "pack.redb");
        assert!(c.cache_size.is_none());
    }

    #[test]
    fn strict_config() {
        assert_eq!(PackConfig::strict().resolution, ResolutionMode::Strict);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: PackConfig = toml::from_str("resolution = \"strict\"").unwrap();
        assert_eq!(c.resolution, ResolutionMode::Strict);
        assert_eq!(c.file_name, "pack.redb");
    }
}
