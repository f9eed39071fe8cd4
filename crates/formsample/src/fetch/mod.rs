// File: src/fetch/mod.rs
// Purpose: Fetch-and-cache collaborator for the suspense page

use async_trait::async_trait;
use thiserror::Error;

pub mod cache;
pub mod post;

pub use cache::ResourceCache;
pub use post::{JsonFetcher, Post};

/// Why a remote resource could not be loaded.
///
/// `Clone` so a cached failure can be handed to every reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Loads a resource by key (its URL)
#[async_trait]
pub trait Fetcher<T>: Send + Sync {
    async fn fetch(&self, key: &str) -> Result<T, FetchError>;
}

/// What a reader sees when asking the cache for a resource
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Not resolved yet; render a placeholder
    Pending,
    Ready(T),
    Failed(FetchError),
}

impl<T> FetchState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FetchState::Ready(_))
    }
}

impl<T> From<Result<T, FetchError>> for FetchState<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => FetchState::Ready(value),
            Err(err) => FetchState::Failed(err),
        }
    }
}
