//! Sketchfab API access
//!
//! Sketchfab models are not served from a stable URL. The download API hands
//! out a short-lived archive URL per request, which the fetcher then streams
//! like any other direct source.

pub mod endpoints;
pub mod sketchfab;
pub mod types;

pub use sketchfab::{parse_sketchfab_uid, SketchfabClient};
pub use types::*;
