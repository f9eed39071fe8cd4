// File: src/fetch/post.rs
// Purpose: The remote post resource and the HTTP fetcher that loads JSON

use super::{FetchError, Fetcher};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A post as served by the JSONPlaceholder API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u32,
    pub id: u32,
    pub title: String,
    pub body: String,
}

/// Fetcher that GETs the key as a URL and decodes the JSON body
#[derive(Debug, Clone)]
pub struct JsonFetcher {
    client: reqwest::Client,
}

impl JsonFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T> Fetcher<T> for JsonFetcher
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch(&self, key: &str) -> Result<T, FetchError> {
        debug!(url = key, "fetching resource");

        let response = self
            .client
            .get(key)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: key.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: key.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| FetchError::Decode {
            url: key.to_string(),
            message: e.to_string(),
        })
    }
}
