use serde::{Deserialize, Serialize};

/// Reference to an image stored on the media host.
///
/// Stored alongside content records and echoed back to clients unmodified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    /// Public URL of the asset.
    #[schema(example = "https://media.example.org/nonprofit/blog/0190c3a1.jpg")]
    pub url: String,
    /// Host-assigned identifier used to remove the asset.
    #[serde(default)]
    #[schema(example = "nonprofit/blog/0190c3a1.jpg")]
    pub public_id: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl ImageRef {
    /// Whether the host can be asked to remove this asset.
    pub fn is_removable(&self) -> bool {
        !self.public_id.trim().is_empty()
    }
}
