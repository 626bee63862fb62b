//! Template catalog: parsing the listing response and random selection.
//!
//! The catalog is fetched once per editor lifetime and never changes
//! afterwards. Its only consumer is "get a new image", which samples a
//! uniformly random entry.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Errors from loading or sampling the template catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request failed or returned a non-success status.
    #[error("catalog request failed: {0}")]
    Http(String),

    /// The response body was not the expected JSON shape.
    #[error("malformed catalog response: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered but reported a failure.
    #[error("catalog service error: {0}")]
    Service(String),

    /// A random pick was requested while the catalog is empty.
    #[error("template catalog is empty")]
    Empty,

    /// The system random number generator failed.
    #[error("random source failed: {0}")]
    Entropy(String),
}

/// One candidate background image.
///
/// Only `url` is required; the listing service includes the rest but
/// the editor never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Service-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// Human-readable template name.
    #[serde(default)]
    pub name: String,
    /// Image location.
    pub url: String,
    /// Native width in pixels, if reported.
    #[serde(default)]
    pub width: Option<u32>,
    /// Native height in pixels, if reported.
    #[serde(default)]
    pub height: Option<u32>,
    /// Number of text boxes the template is designed for.
    #[serde(default)]
    pub box_count: Option<u32>,
}

impl Template {
    /// A template with only a URL.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            url: url.into(),
            width: None,
            height: None,
            box_count: None,
        }
    }
}

/// Ordered, immutable list of templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateCatalog(Vec<Template>);

impl TemplateCatalog {
    /// Wrap a list of templates.
    #[must_use]
    pub const fn new(templates: Vec<Template>) -> Self {
        Self(templates)
    }

    /// Returns `true` if there are no templates.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of templates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// All templates in service order.
    #[must_use]
    pub fn templates(&self) -> &[Template] {
        &self.0
    }

    /// Returns `true` if some template has exactly this URL.
    #[cfg(test)]
    pub(crate) fn contains_url(&self, url: &str) -> bool {
        self.0.iter().any(|t| t.url == url)
    }

    /// Pick a uniformly random template.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] when there is nothing to pick
    /// from, or whatever error the random source reports.
    pub fn pick(&self, rng: &mut impl IndexSource) -> Result<&Template, CatalogError> {
        let len = NonZeroUsize::new(self.0.len()).ok_or(CatalogError::Empty)?;
        let index = rng.index_below(len)?;
        self.0
            .get(index)
            .ok_or_else(|| CatalogError::Entropy(format!("index {index} out of range {len}")))
    }
}

/// Source of random indices, so selection can be driven
/// deterministically in tests.
pub trait IndexSource {
    /// Return an index in `0..bound`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Entropy`] if no randomness is available.
    fn index_below(&mut self, bound: NonZeroUsize) -> Result<usize, CatalogError>;
}

/// Operating-system (or `crypto.getRandomValues` on WASM) randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRandom;

impl SystemRandom {
    fn next_u64() -> Result<u64, CatalogError> {
        let mut buf = [0u8; 8];
        getrandom::getrandom(&mut buf).map_err(|e| CatalogError::Entropy(e.to_string()))?;
        Ok(u64::from_le_bytes(buf))
    }
}

impl IndexSource for SystemRandom {
    fn index_below(&mut self, bound: NonZeroUsize) -> Result<usize, CatalogError> {
        let bound = bound.get() as u64;
        // Reject the tail of the u64 range that would bias the modulo.
        let limit = u64::MAX - u64::MAX % bound;
        loop {
            let value = Self::next_u64()?;
            if value < limit {
                #[allow(clippy::cast_possible_truncation)]
                return Ok((value % bound) as usize);
            }
        }
    }
}

/// Envelope returned by the listing endpoint.
#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    data: Option<ListingData>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    memes: Vec<Template>,
}

const fn default_success() -> bool {
    true
}

/// Parse a `get_memes` response body:
/// `{ "success": true, "data": { "memes": [ { "url": ... }, ... ] } }`.
///
/// # Errors
///
/// Returns [`CatalogError::Json`] if the body does not have that shape
/// and [`CatalogError::Service`] if the service reported `success: false`.
pub fn parse_listing(body: &str) -> Result<TemplateCatalog, CatalogError> {
    let response: ListingResponse = serde_json::from_str(body)?;
    if !response.success {
        return Err(CatalogError::Service(
            response
                .error_message
                .unwrap_or_else(|| "unknown error".to_owned()),
        ));
    }
    let data = response
        .data
        .ok_or_else(|| CatalogError::Service("response has no data".to_owned()))?;
    log::debug!("catalog parsed: {} templates", data.memes.len());
    Ok(TemplateCatalog::new(data.memes))
}
