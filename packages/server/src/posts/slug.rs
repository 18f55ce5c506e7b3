//! Title → slug derivation and collision resolution.
//!
//! Derivation is pure; uniqueness is checked through a caller-supplied
//! predicate so the same logic works against any store.

use std::future::Future;

use slug::slugify;
use uuid::Uuid;

/// Derive a slug from a title, or `None` when no character survives.
///
/// The result only contains `[a-z0-9-]`, has no leading or trailing hyphen
/// and never contains two hyphens in a row. Non-ASCII letters are
/// transliterated first ("Café" becomes "cafe").
pub fn derive_slug(title: &str) -> Option<String> {
    let candidate = slugify(title);
    if candidate.is_empty() {
        None
    } else {
        Some(candidate)
    }
}

/// Slug for a new post: derived from the title, or `post-<id fragment>` when
/// the title has nothing to keep (e.g. only emoji or punctuation).
pub fn generate_slug(title: &str, id: &Uuid) -> String {
    derive_slug(title).unwrap_or_else(|| fallback_slug(id))
}

fn fallback_slug(id: &Uuid) -> String {
    let hex = id.simple().to_string();
    // Tail of a v7 id is the random part; the head is a millisecond clock.
    format!("post-{}", &hex[hex.len() - 12..])
}

/// Return `candidate` if it is free, otherwise the first free variant among
/// `candidate-1`, `candidate-2`, ...
///
/// `exists` must observe the same store the caller later writes to.
pub async fn resolve_unique_slug<F, Fut, E>(candidate: &str, mut exists: F) -> Result<String, E>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    if !exists(candidate.to_string()).await? {
        return Ok(candidate.to_string());
    }

    let mut suffix: u64 = 1;
    loop {
        let next = format!("{candidate}-{suffix}");
        if !exists(next.clone()).await? {
            return Ok(next);
        }
        suffix += 1;
    }
}
