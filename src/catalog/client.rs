use super::{CatalogError, Product, ProductPayload};
use crate::config::Settings;
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Stateless blocking client for the `/products` collection. Holds only
/// the API base URL; every operation is a single request with no retry
/// and no caching.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    api_base: String,
}

impl CatalogClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let api_base = std::env::var("NEXO_API_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| settings.api_base.clone());
        Self { api_base }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn collection_url(&self) -> String {
        format!("{}/products", self.api_base.trim_end_matches('/'))
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), urlencoding::encode(id))
    }

    pub fn list(&self) -> Result<Vec<Product>, CatalogError> {
        let response = ureq::get(&self.collection_url())
            .call()
            .map_err(transport_error)?;
        parse_json(response)
    }

    pub fn get(&self, id: &str) -> Result<Product, CatalogError> {
        let response = ureq::get(&self.item_url(id))
            .call()
            .map_err(|e| item_error(id, e))?;
        parse_json(response)
    }

    pub fn create(&self, payload: &ProductPayload) -> Result<Product, CatalogError> {
        let body = serde_json::to_value(payload)
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        let response = ureq::post(&self.collection_url())
            .send_json(body)
            .map_err(payload_error)?;
        parse_json(response)
    }

    /// Full replacement, not a partial patch. Every field of `payload`
    /// lands on the server as-is.
    pub fn update(&self, id: &str, payload: &ProductPayload) -> Result<Product, CatalogError> {
        let body = serde_json::to_value(payload)
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        let response = ureq::put(&self.item_url(id))
            .send_json(body)
            .map_err(|e| match e {
                ureq::Error::Status(404, _) => CatalogError::NotFound { id: id.to_string() },
                other => payload_error(other),
            })?;
        parse_json(response)
    }

    pub fn delete(&self, id: &str) -> Result<(), CatalogError> {
        ureq::delete(&self.item_url(id))
            .call()
            .map_err(|e| item_error(id, e))?;
        Ok(())
    }
}

fn parse_json<T: for<'de> Deserialize<'de>>(response: ureq::Response) -> Result<T, CatalogError> {
    response
        .into_json::<T>()
        .map_err(|e| CatalogError::Transport(format!("invalid response body: {e}")))
}

fn transport_error(err: ureq::Error) -> CatalogError {
    CatalogError::Transport(err.to_string())
}

fn item_error(id: &str, err: ureq::Error) -> CatalogError {
    match err {
        ureq::Error::Status(404, _) => CatalogError::NotFound { id: id.to_string() },
        other => CatalogError::Transport(other.to_string()),
    }
}

fn payload_error(err: ureq::Error) -> CatalogError {
    match err {
        ureq::Error::Status(400 | 422, response) => {
            CatalogError::Validation(rejection_message(response))
        }
        other => CatalogError::Transport(other.to_string()),
    }
}

fn rejection_message(response: ureq::Response) -> String {
    response
        .into_string()
        .ok()
        .map(|body| body.trim().to_string())
        .filter(|body| !body.is_empty())
        .unwrap_or_else(|| "server rejected the payload".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_url_percent_encodes_opaque_ids() {
        let client = CatalogClient::new("http://localhost:3000/");
        assert_eq!(
            client.item_url("a b/c"),
            "http://localhost:3000/products/a%20b%2Fc"
        );
    }

    #[test]
    fn collection_url_tolerates_trailing_slash() {
        let client = CatalogClient::new("http://shop.test/");
        assert_eq!(client.collection_url(), "http://shop.test/products");
    }
}
