//! Asset items: one validated unit of work per manifest entry

use crate::api::sketchfab::parse_sketchfab_uid;
use crate::placeholder::PlaceholderSpec;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Where an item's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Plain HTTP(S) URL serving the asset bytes
    Direct(Url),
    /// Sketchfab model, resolved to a temporary download URL at fetch time
    Sketchfab { uid: String },
}

impl Source {
    /// Parse a direct locator. Only http and https are accepted.
    pub fn direct(locator: &str) -> Result<Self, String> {
        let url = Url::parse(locator.trim())
            .map_err(|e| format!("'{locator}' is not a valid URL: {e}"))?;
        match url.scheme() {
            "http" | "https" => Ok(Source::Direct(url)),
            other => Err(format!(
                "unsupported URL scheme '{other}' in '{locator}', expected http or https"
            )),
        }
    }

    /// Parse a Sketchfab model URL or bare uid
    pub fn sketchfab(locator: &str) -> Result<Self, String> {
        parse_sketchfab_uid(locator)
            .map(|uid| Source::Sketchfab { uid })
            .ok_or_else(|| format!("could not extract a Sketchfab model id from '{locator}'"))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Source::Direct(_) => "url",
            Source::Sketchfab { .. } => "sketchfab",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Direct(url) => write!(f, "{url}"),
            Source::Sketchfab { uid } => write!(f, "sketchfab:{uid}"),
        }
    }
}

/// A validated asset, ready to fetch or synthesize
#[derive(Debug, Clone)]
pub struct Item {
    pub name: String,
    pub source: Source,
    /// `<base_dir>/<name>/<filename>`
    pub target_path: PathBuf,
    pub expected_sha256: Option<String>,
    pub placeholder: PlaceholderSpec,
    /// Descriptive fields passed through to the report untouched
    pub metadata: Map<String, Value>,
}

impl Item {
    pub fn new(name: impl Into<String>, source: Source, base_dir: &Path, filename: &str) -> Result<Self, String> {
        let name = name.into();
        validate_path_component("asset name", &name)?;
        validate_path_component("file name", filename)?;

        let target_path = base_dir.join(&name).join(filename);
        Ok(Self {
            name,
            source,
            target_path,
            expected_sha256: None,
            placeholder: PlaceholderSpec::default(),
            metadata: Map::new(),
        })
    }

    pub fn with_expected_sha256(mut self, sha256: Option<String>) -> Self {
        self.expected_sha256 = sha256;
        self
    }

    pub fn with_placeholder(mut self, placeholder: PlaceholderSpec) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Directory that holds this item's file
    pub fn directory(&self) -> &Path {
        self.target_path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Reject values that would escape or collapse the per-asset directory layout
pub fn validate_path_component(what: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{what} cannot be empty"));
    }
    if value == "." || value == ".." {
        return Err(format!("{what} '{value}' is not allowed"));
    }
    if value.contains(['/', '\\', '\0']) {
        return Err(format!("{what} '{value}' must not contain path separators"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_source() {
        let source = Source::direct("https://example.com/models/box.glb").unwrap();
        assert_eq!(source.kind(), "url");
        assert_eq!(source.to_string(), "https://example.com/models/box.glb");

        assert!(Source::direct("ftp://example.com/box.glb").is_err());
        assert!(Source::direct("box.glb").is_err());
    }

    #[test]
    fn test_sketchfab_source() {
        let source =
            Source::sketchfab("https://sketchfab.com/3d-models/konark-wheel-0a1b2c3d4e5f").unwrap();
        assert_eq!(
            source,
            Source::Sketchfab {
                uid: "0a1b2c3d4e5f".to_string()
            }
        );
        assert_eq!(source.to_string(), "sketchfab:0a1b2c3d4e5f");
    }

    #[test]
    fn test_target_path_convention() {
        let source = Source::direct("http://localhost/a.bin").unwrap();
        let item = Item::new("alpha", source, Path::new("/tmp/base"), "scene.bin").unwrap();
        assert_eq!(item.target_path, PathBuf::from("/tmp/base/alpha/scene.bin"));
        assert_eq!(item.directory(), Path::new("/tmp/base/alpha"));
    }

    #[test]
    fn test_rejects_bad_names() {
        let source = Source::direct("http://localhost/a.bin").unwrap();
        for bad in ["", "  ", ".", "..", "a/b", "a\\b"] {
            assert!(
                Item::new(bad, source.clone(), Path::new("models"), "scene.glb").is_err(),
                "{bad:?} should be rejected"
            );
        }
        assert!(Item::new("ok", source, Path::new("models"), "../scene.glb").is_err());
    }
}
