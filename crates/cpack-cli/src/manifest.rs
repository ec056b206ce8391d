//! The module manifest (`module.json`) listing a module's packs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// One pack entry of the manifest.
#[derive(Clone, Debug, Deserialize)]
pub struct PackEntry {
    pub name: String,
    #[serde(default)]
    pub label: String,
    /// Pack location relative to the manifest, e.g. `packs/monsters.db`.
    pub path: String,
    /// Document type tag, resolved by the store.
    #[serde(rename = "type")]
    pub document_type: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub packs: Vec<PackEntry>,
    #[serde(skip)]
    root: PathBuf,
}

impl Manifest {
    /// Load a manifest; pack paths resolve against its directory.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading manifest {}", path.display()))?;
        let mut manifest: Manifest = serde_json::from_str(&raw)
            .with_context(|| format!("parsing manifest {}", path.display()))?;
        manifest.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(manifest)
    }

    /// Directory of a pack's database. A trailing `.db` is dropped.
    pub fn pack_dir(&self, pack: &PackEntry) -> PathBuf {
        let relative = pack.path.strip_suffix(".db").unwrap_or(&pack.path);
        self.root.join(relative)
    }
}
