//! Sketchfab endpoint URL builders

/// Build the model download endpoint URL
pub fn model_download_url(base_url: &str, uid: &str) -> String {
    format!("{}/v3/models/{}/download", base_url.trim_end_matches('/'), uid)
}
