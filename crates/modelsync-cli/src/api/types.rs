//! Sketchfab API response types

use serde::{Deserialize, Serialize};

/// Response of `GET /v3/models/{uid}/download`
///
/// Each present format carries its own temporary URL. Formats other than
/// glTF and GLB are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadResponse {
    #[serde(default)]
    pub gltf: Option<DownloadLink>,
    #[serde(default)]
    pub glb: Option<DownloadLink>,
}

impl DownloadResponse {
    /// Preferred link: binary glTF when offered, otherwise the glTF archive
    pub fn preferred(&self) -> Option<&DownloadLink> {
        self.glb.as_ref().or(self.gltf.as_ref())
    }
}

/// One temporary download link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadLink {
    pub url: String,
    #[serde(default)]
    pub size: Option<u64>,
    /// Seconds until the link expires
    #[serde(default)]
    pub expires: Option<u64>,
}
