//! Placeholder asset generation
//!
//! Writes a small flat-colored GLB for every item so a viewer has something
//! to load before (or instead of) the real models.

pub mod glb;
pub mod shapes;

pub use glb::encode_glb;
pub use shapes::{Mesh, ShapeKind};

use crate::fetcher::{BatchResult, FailureKind, Outcome};
use crate::item::Item;
use modelsync_common::checksum::StreamingChecksum;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Grey used when an entry does not pick a color
pub const DEFAULT_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

/// Edge length used when no size is given
pub const DEFAULT_SIZE: f32 = 1.0;

/// Placeholder settings for one manifest entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderSpec {
    #[serde(default)]
    pub shape: ShapeKind,

    /// RGBA, each channel in `0.0..=1.0`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[f32; 4]>,
}

impl PlaceholderSpec {
    pub fn new(shape: ShapeKind) -> Self {
        Self { shape, color: None }
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = Some(color);
        self
    }

    /// Effective base color, clamped into range
    pub fn color(&self) -> [f32; 4] {
        self.color
            .unwrap_or(DEFAULT_COLOR)
            .map(|c| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) })
    }
}

/// Write a placeholder for every item to its target path
///
/// Same contract as fetching: one outcome per item, in order, and a failure
/// for one item never stops the rest.
pub fn generate_all(items: &[Item], size: f32) -> BatchResult {
    let size = if size.is_finite() && size > 0.0 { size } else { DEFAULT_SIZE };
    let mut batch = BatchResult::new();

    for item in items {
        let outcome = generate_one(item, size);
        if let Outcome::Failure { reason, .. } = &outcome {
            warn!(asset = %item.name, %reason, "Placeholder generation failed");
        }
        batch.record(item.name.clone(), outcome);
    }

    batch
}

fn generate_one(item: &Item, size: f32) -> Outcome {
    let mesh = item.placeholder.shape.build(size);
    let bytes = match encode_glb(&mesh, item.placeholder.color(), &item.name) {
        Ok(bytes) => bytes,
        Err(e) => return Outcome::failure(FailureKind::WriteFailed, format!("encoding failed: {e}")),
    };

    if let Err(e) = std::fs::create_dir_all(item.directory()) {
        return Outcome::failure(
            FailureKind::WriteFailed,
            format!("cannot create {}: {e}", item.directory().display()),
        );
    }
    if let Err(e) = std::fs::write(&item.target_path, &bytes) {
        return Outcome::failure(
            FailureKind::WriteFailed,
            format!("cannot write {}: {e}", item.target_path.display()),
        );
    }

    let mut checksum = StreamingChecksum::new();
    checksum.update(&bytes);
    debug!(
        asset = %item.name,
        shape = item.placeholder.shape.as_str(),
        triangles = mesh.triangle_count(),
        "Wrote placeholder"
    );

    Outcome::Success {
        path: item.target_path.clone(),
        bytes: checksum.bytes(),
        sha256: checksum.finalize(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::item::Source;
    use std::path::Path;
    use tempfile::TempDir;

    fn item(name: &str, base: &Path) -> Item {
        let source = Source::direct("https://example.com/model.glb").unwrap();
        Item::new(name, source, base, "scene.glb").unwrap()
    }

    #[test]
    fn test_color_defaults_and_clamps() {
        assert_eq!(PlaceholderSpec::default().color(), DEFAULT_COLOR);
        let spec = PlaceholderSpec::new(ShapeKind::Tower).with_color([1.5, -0.2, 0.5, f32::NAN]);
        assert_eq!(spec.color(), [1.0, 0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_generate_all_writes_each_item() {
        let dir = TempDir::new().unwrap();
        let items = vec![
            item("hampi", dir.path()).with_placeholder(PlaceholderSpec::new(ShapeKind::Temple)),
            item("konark", dir.path()).with_placeholder(PlaceholderSpec::new(ShapeKind::Wheel)),
        ];

        let batch = generate_all(&items, 2.0);
        assert_eq!(batch.len(), 2);
        assert!(batch.all_succeeded());

        let written = std::fs::read(dir.path().join("konark/scene.glb")).unwrap();
        assert_eq!(&written[0..4], b"glTF");
        match batch.get("konark").unwrap() {
            Outcome::Success { bytes, .. } => assert_eq!(*bytes, written.len() as u64),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_generate_all_isolates_write_failures() {
        let dir = TempDir::new().unwrap();
        // A regular file where the asset directory should be.
        std::fs::write(dir.path().join("blocked"), b"").unwrap();

        let items = vec![item("blocked", dir.path()), item("fine", dir.path())];
        let batch = generate_all(&items, 1.0);

        assert!(matches!(
            batch.get("blocked"),
            Some(Outcome::Failure {
                kind: FailureKind::WriteFailed,
                ..
            })
        ));
        assert!(batch.get("fine").unwrap().is_success());
    }

    #[test]
    fn test_generate_twice_is_identical() {
        let dir = TempDir::new().unwrap();
        let items = vec![item("dome", dir.path())];

        let first = generate_all(&items, 1.0);
        let second = generate_all(&items, 1.0);
        assert_eq!(first, second);
    }
}
