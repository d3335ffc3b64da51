//! Asset manifest handling (assets.yml / assets.json)
//!
//! The manifest maps asset names to where their bytes come from, plus any
//! descriptive fields the viewer needs. Entry order is preserved so that
//! batches run and report in the order the author wrote them.

use crate::error::{CliError, Result};
use crate::item::{validate_path_component, Item, Source};
use crate::placeholder::PlaceholderSpec;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Default manifest path when none is given
pub const DEFAULT_MANIFEST_PATH: &str = "assets.yml";

/// Default directory that receives one sub-directory per asset
pub const DEFAULT_BASE_DIR: &str = "models";

/// Default file name written inside each asset directory
pub const DEFAULT_FILENAME: &str = "scene.glb";

fn default_base_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BASE_DIR)
}

fn default_filename() -> String {
    DEFAULT_FILENAME.to_string()
}

/// Asset manifest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    #[serde(default = "default_filename")]
    pub filename: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sketchfab: Option<SketchfabSettings>,

    /// Ordered mapping from asset name to entry
    #[serde(default, with = "ordered_assets")]
    pub assets: Vec<(String, AssetEntry)>,
}

/// Sketchfab section of the manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SketchfabSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

/// One asset entry
///
/// Exactly one of `url` or `sketchfab` must be set. Unknown fields
/// (display name, scale, rotation, position, ...) land in `metadata`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssetEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sketchfab: Option<String>,

    /// Overrides the manifest-wide file name for this asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Expected SHA-256 of the downloaded bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<PlaceholderSpec>,

    #[serde(flatten)]
    pub metadata: Map<String, Value>,

    /// Why the entry could not be read; its raw fields are kept in `metadata`
    #[serde(skip)]
    pub invalid: Option<String>,
}

impl AssetEntry {
    /// Entry from a bare locator string. Sketchfab page URLs become
    /// Sketchfab entries, everything else a direct URL.
    pub fn from_locator(locator: impl Into<String>) -> Self {
        let locator = locator.into();
        let is_sketchfab = url::Url::parse(&locator)
            .ok()
            .and_then(|u| u.host_str().map(|h| h == "sketchfab.com" || h.ends_with(".sketchfab.com")))
            .unwrap_or(false);

        if is_sketchfab {
            Self {
                sketchfab: Some(locator),
                ..Self::default()
            }
        } else {
            Self {
                url: Some(locator),
                ..Self::default()
            }
        }
    }

    /// Entry from any manifest value. A value of the wrong shape still
    /// yields an entry, marked invalid with the parse error.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(locator) => Self::from_locator(locator),
            Value::Null => Self::default(),
            value => match serde_json::from_value::<AssetEntry>(value.clone()) {
                Ok(entry) => entry,
                Err(e) => Self {
                    metadata: match value {
                        Value::Object(fields) => fields,
                        _ => Map::new(),
                    },
                    invalid: Some(format!("invalid entry: {e}")),
                    ..Self::default()
                },
            },
        }
    }

    fn source(&self) -> std::result::Result<Source, String> {
        if let Some(reason) = &self.invalid {
            return Err(reason.clone());
        }
        match (self.url.as_deref(), self.sketchfab.as_deref()) {
            (Some(url), None) => Source::direct(url),
            (None, Some(model)) => Source::sketchfab(model),
            (Some(_), Some(_)) => Err("set either 'url' or 'sketchfab', not both".to_string()),
            (None, None) => Err("missing resource locator ('url' or 'sketchfab')".to_string()),
        }
    }
}

/// An entry that could not become an [`Item`]
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub name: String,
    pub reason: String,
}

/// Result of turning a manifest into work items
#[derive(Debug, Default)]
pub struct Plan {
    pub items: Vec<Item>,
    pub rejected: Vec<Rejected>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.rejected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len() + self.rejected.len()
    }
}

impl Manifest {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            filename: default_filename(),
            sketchfab: None,
            assets: Vec::new(),
        }
    }

    /// Load a manifest; `.json` files are parsed as JSON, everything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CliError::ManifestNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let manifest: Manifest = if is_json(path) {
            serde_json::from_str(&content).map_err(|e| {
                CliError::invalid_manifest(format!("{}: {e}", path.display()))
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| {
                CliError::invalid_manifest(format!("{}: {e}", path.display()))
            })?
        };

        manifest.validate()?;
        Ok(manifest)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Manifest-wide checks. Per-asset problems are left to [`Manifest::plan`].
    pub fn validate(&self) -> Result<()> {
        validate_path_component("file name", &self.filename)
            .map_err(CliError::invalid_manifest)?;
        if self.base_dir.as_os_str().is_empty() {
            return Err(CliError::invalid_manifest("base_dir cannot be empty"));
        }
        Ok(())
    }

    pub fn add_asset(&mut self, name: impl Into<String>, entry: AssetEntry) {
        let name = name.into();
        match self.assets.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = entry,
            None => self.assets.push((name, entry)),
        }
    }

    pub fn asset(&self, name: &str) -> Option<&AssetEntry> {
        self.assets.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn sketchfab_token(&self) -> Option<&str> {
        self.sketchfab.as_ref().and_then(|s| s.api_token.as_deref())
    }

    /// Build work items under `base_dir` (or the manifest's own base_dir)
    pub fn plan(&self, base_dir: Option<&Path>) -> Plan {
        let base_dir = base_dir.unwrap_or(&self.base_dir);
        let mut plan = Plan::default();

        for (name, entry) in &self.assets {
            let filename = entry.filename.as_deref().unwrap_or(&self.filename);
            let item = entry
                .source()
                .and_then(|source| Item::new(name.clone(), source, base_dir, filename));

            match item {
                Ok(item) => plan.items.push(
                    item.with_expected_sha256(entry.sha256.clone())
                        .with_placeholder(entry.placeholder.clone().unwrap_or_default())
                        .with_metadata(entry.metadata.clone()),
                ),
                Err(reason) => plan.rejected.push(Rejected {
                    name: name.clone(),
                    reason,
                }),
            }
        }

        plan
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Serde adapter keeping `assets` as an ordered list while reading and
/// writing it as a mapping.
mod ordered_assets {
    use super::AssetEntry;
    use serde::de::{Error as _, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use serde_json::Value;
    use std::fmt;

    pub fn serialize<S: Serializer>(assets: &[(String, AssetEntry)], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(assets.len()))?;
        for (name, entry) in assets {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<(String, AssetEntry)>, D::Error> {
        struct AssetsVisitor;

        impl<'de> Visitor<'de> for AssetsVisitor {
            type Value = Vec<(String, AssetEntry)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping from asset name to asset entry")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Vec::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut assets: Vec<(String, AssetEntry)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));

                // Entries are read as plain values first so that one bad
                // entry is rejected on its own instead of failing the file
                while let Some((name, raw)) = access.next_entry::<String, Value>()? {
                    if assets.iter().any(|(existing, _)| *existing == name) {
                        return Err(A::Error::custom(format!("duplicate asset name '{name}'")));
                    }
                    assets.push((name, AssetEntry::from_value(raw)));
                }

                Ok(assets)
            }
        }

        deserializer.deserialize_any(AssetsVisitor)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::placeholder::ShapeKind;
    use tempfile::TempDir;

    const YAML: &str = r#"
base_dir: out
sketchfab:
  api_token: secret
assets:
  taj_mahal:
    url: https://example.com/mirror.glb
    name: Taj Mahal
    scale: "0.5 0.5 0.5"
    placeholder:
      shape: dome
      color: [0.95, 0.95, 0.95, 1.0]
  hampi: https://sketchfab.com/3d-models/hampi-temple-abc123
  khajuraho:
    url: https://example.com/duck.glb
    filename: khajuraho.glb
    sha256: deadbeef
"#;

    #[test]
    fn test_parse_yaml_preserves_order_and_metadata() {
        let manifest: Manifest = serde_yaml::from_str(YAML).unwrap();

        let names: Vec<&str> = manifest.assets.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["taj_mahal", "hampi", "khajuraho"]);
        assert_eq!(manifest.base_dir, PathBuf::from("out"));
        assert_eq!(manifest.filename, DEFAULT_FILENAME);
        assert_eq!(manifest.sketchfab_token(), Some("secret"));

        let taj = manifest.asset("taj_mahal").unwrap();
        assert_eq!(taj.metadata["name"], "Taj Mahal");
        assert_eq!(taj.metadata["scale"], "0.5 0.5 0.5");
        assert_eq!(taj.placeholder.as_ref().unwrap().shape, ShapeKind::Dome);

        let hampi = manifest.asset("hampi").unwrap();
        assert!(hampi.url.is_none());
        assert!(hampi.sketchfab.is_some());
    }

    #[test]
    fn test_plan_builds_items_and_rejections() {
        let mut manifest: Manifest = serde_yaml::from_str(YAML).unwrap();
        manifest.add_asset("broken", AssetEntry::default());
        manifest.add_asset(
            "both",
            AssetEntry {
                url: Some("https://example.com/a.glb".to_string()),
                sketchfab: Some("abc".to_string()),
                ..AssetEntry::default()
            },
        );
        manifest.add_asset("bad/name", AssetEntry::from_locator("https://example.com/a.glb"));

        let plan = manifest.plan(Some(Path::new("/data")));
        assert_eq!(plan.len(), 6);
        assert_eq!(plan.items.len(), 3);

        assert_eq!(plan.items[0].target_path, PathBuf::from("/data/taj_mahal/scene.glb"));
        assert_eq!(
            plan.items[1].source,
            Source::Sketchfab {
                uid: "abc123".to_string()
            }
        );
        assert_eq!(plan.items[2].target_path, PathBuf::from("/data/khajuraho/khajuraho.glb"));
        assert_eq!(plan.items[2].expected_sha256.as_deref(), Some("deadbeef"));

        let rejected: Vec<&str> = plan.rejected.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(rejected, ["broken", "both", "bad/name"]);
        assert!(plan.rejected[0].reason.contains("missing resource locator"));
    }

    #[test]
    fn test_plan_uses_manifest_base_dir_by_default() {
        let manifest: Manifest = serde_yaml::from_str(YAML).unwrap();
        let plan = manifest.plan(None);
        assert_eq!(plan.items[0].target_path, PathBuf::from("out/taj_mahal/scene.glb"));
    }

    #[test]
    fn test_json_manifest_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assets.json");

        let mut manifest = Manifest::new("models");
        manifest.add_asset("b", AssetEntry::from_locator("https://example.com/b.glb"));
        manifest.add_asset("a", AssetEntry::from_locator("https://example.com/a.glb"));
        manifest.save(&path).unwrap();

        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
        assert_eq!(loaded.assets[0].0, "b");
    }

    #[test]
    fn test_empty_assets_section() {
        let manifest: Manifest = serde_yaml::from_str("assets:\n").unwrap();
        assert!(manifest.assets.is_empty());
        assert!(manifest.plan(None).is_empty());

        let manifest: Manifest = serde_yaml::from_str("base_dir: x\n").unwrap();
        assert!(manifest.assets.is_empty());
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();

        let missing = Manifest::load(dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(missing, CliError::ManifestNotFound(_)));

        let path = dir.path().join("assets.yml");
        std::fs::write(&path, "assets: [1, 2").unwrap();
        assert!(matches!(Manifest::load(&path), Err(CliError::InvalidManifest(_))));

        std::fs::write(&path, "filename: ../escape.glb\nassets: {}\n").unwrap();
        assert!(matches!(Manifest::load(&path), Err(CliError::InvalidManifest(_))));
    }

    #[test]
    fn test_badly_typed_entry_is_rejected_alone() {
        let yaml = r#"
assets:
  good: https://example.com/good.glb
  bad_hash:
    url: https://example.com/b.glb
    sha256: 1234
  bad_shape:
    url: https://example.com/c.glb
    placeholder: { shape: cube }
  empty:
  last:
    url: https://example.com/last.glb
    position: [0, 1, 2]
"#;
        let manifest: Manifest = serde_yaml::from_str(yaml).unwrap();
        let plan = manifest.plan(None);

        let items: Vec<&str> = plan.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(items, ["good", "last"]);

        let rejected: Vec<&str> = plan.rejected.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(rejected, ["bad_hash", "bad_shape", "empty"]);
        assert!(plan.rejected[0].reason.contains("invalid type"));
        assert!(plan.rejected[1].reason.contains("unknown variant"));
        assert!(plan.rejected[2].reason.contains("missing resource locator"));

        let bad = manifest.asset("bad_hash").unwrap();
        assert_eq!(bad.metadata["sha256"], 1234);
    }

    #[test]
    fn test_duplicate_names_rejected_in_json() {
        let json = r#"{"assets": {"a": "https://x/a", "a": "https://x/b"}}"#;
        let err = serde_json::from_str::<Manifest>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate asset name"));
    }
}
