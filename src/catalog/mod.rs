mod client;
mod types;

pub use client::{CatalogClient, DEFAULT_API_BASE};
pub use types::{Product, ProductPayload};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("product `{id}` was not found")]
    NotFound { id: String },
    #[error("catalog request failed: {0}")]
    Transport(String),
}
