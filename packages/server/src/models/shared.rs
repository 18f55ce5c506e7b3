use serde::{Deserialize, Deserializer, Serialize};

/// Plain acknowledgement body, `{"ok": true}`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct OkResponse {
    #[schema(example = true)]
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Serde helper for partial-update semantics on nullable fields.
///
/// * JSON field absent  => `None`          (keep)
/// * JSON field = null  => `Some(None)`    (clear)
/// * JSON field = value => `Some(Some(v))` (set)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Lenient integer parse for query parameters: anything unparsable counts
/// as absent so the caller's default applies.
pub fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse().ok())
}
