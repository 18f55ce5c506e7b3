use serde::Deserialize;

/// Media host configuration (S3-compatible object storage).
#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    /// Bucket that receives uploaded images.
    pub bucket: String,
    /// Region name passed to the signer. Default: "auto".
    #[serde(default = "default_region")]
    pub region: String,
    /// Endpoint URL of the S3-compatible service.
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    /// Base URL under which stored objects are publicly reachable.
    pub public_url: String,
    /// Key prefix for uploaded images. Default: "nonprofit/blog".
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Use path-style bucket addressing. Default: true.
    #[serde(default = "default_path_style")]
    pub path_style: bool,
    /// Largest accepted upload in bytes. Default: 5 MiB.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_region() -> String {
    "auto".into()
}
fn default_folder() -> String {
    "nonprofit/blog".into()
}
fn default_path_style() -> bool {
    true
}
pub fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024
}
