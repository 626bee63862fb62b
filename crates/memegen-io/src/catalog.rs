//! Template catalog fetch.
//!
//! One GET against the listing endpoint per editor lifetime. `reqwest`
//! drives the browser's `fetch` on WASM; parsing lives in
//! [`memegen_core::parse_listing`].

use memegen_core::{CatalogError, TemplateCatalog, parse_listing};

/// Fetch and parse the template listing at `url`.
///
/// # Errors
///
/// Returns [`CatalogError::Http`] if the request fails or the server
/// answers with a non-success status, and the parse errors of
/// [`parse_listing`] otherwise.
pub async fn fetch_catalog(url: &str) -> Result<TemplateCatalog, CatalogError> {
    let response = reqwest::get(url)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| CatalogError::Http(e.to_string()))?;
    let body = response
        .text()
        .await
        .map_err(|e| CatalogError::Http(e.to_string()))?;
    let catalog = parse_listing(&body)?;
    log::info!("loaded {} meme templates from {url}", catalog.len());
    Ok(catalog)
}
