//! Lookup table from icon keys to artwork on disk.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::IconKey;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Resolves icon keys produced by the encoder to files.
///
/// Keys without an entry resolve to `None`; what a backend draws in that case
/// (blank icon, placeholder) is its own decision.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IconCatalog {
    entries: BTreeMap<IconKey, PathBuf>,
}

impl IconCatalog {
    /// Loads the catalog described by the TOML manifest at `path`.
    ///
    /// Relative asset paths are resolved against the manifest's directory,
    /// or against its `root` entry when present.
    pub fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read icon manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        parse_manifest(&contents, &base)
    }

    /// File backing the provided key, if the catalog knows it.
    #[must_use]
    pub fn resolve(&self, key: &IconKey) -> Option<&Path> {
        self.entries.get(key).map(PathBuf::as_path)
    }

    /// Number of keys in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    version: u32,
    root: Option<PathBuf>,
    #[serde(default)]
    icons: BTreeMap<String, String>,
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<IconCatalog> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse icon manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported icon manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let base = match manifest.root {
        Some(root) => base_path.join(root),
        None => base_path.to_path_buf(),
    };

    let mut entries = BTreeMap::new();
    for (name, relative_path) in manifest.icons {
        let key = IconKey::new(name);
        if !key.is_well_formed() {
            bail!("icon manifest key `{key}` is not an icon key");
        }
        let _ = entries.insert(key, base.join(relative_path));
    }

    Ok(IconCatalog { entries })
}
