//! Catalog wire types and the normalized book summary.

use serde::{Deserialize, Serialize};

/// Author text shown when a volume lists no authors.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Cover shown when a volume has no thumbnail.
pub const DEFAULT_COVER_URL: &str = "/static/images/default-cover.svg";

/// A search hit, normalized for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub external_id: String,
    pub title: String,
    /// Authors joined with `", "`, or [`UNKNOWN_AUTHOR`].
    pub author: String,
    pub cover_url: String,
    pub publish_date: Option<String>,
    pub info_url: Option<String>,
}

// =============================================================================
// Google Books response shape (only the fields we read)
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct VolumesResponse {
    #[serde(default)]
    pub items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub published_date: Option<String>,
    pub image_links: Option<ImageLinks>,
    pub info_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
    pub small_thumbnail: Option<String>,
}
