//! REST Range Source
//!
//! Backend adapter for the dashboard's REST API: each collection exposes
//! `GET {base}/{prefix}/{resource}?start&end[&search]`, child scopes hang
//! under `{resource}/{id}/children`, and responses carry a camelCase
//! `{ items, totalCount }` payload.

use std::marker::PhantomData;

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::range_source::RangeSource;
use crate::config::RestConfig;
use crate::constants::API_TOKEN_ENV;
use crate::dataview::coordinator::{RangeRequest, RangeSlice};
use crate::dataview::cursor::FetchKey;
use crate::domain::resource::Resource;
use crate::error::{Error, Result};

/// Wire payload for a range response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangePayload<T> {
    items: Vec<T>,
    total_count: usize,
}

/// REST-backed source for one collection
pub struct RestSource<T> {
    client: reqwest::Client,
    config: RestConfig,
    resource: Resource,
    bearer: Option<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RestSource<T> {
    /// Create a source for a collection
    ///
    /// The bearer token is read from the environment at construction and
    /// never persisted.
    pub fn new(config: RestConfig, resource: Resource) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            config,
            resource,
            bearer: std::env::var(API_TOKEN_ENV).ok(),
            _marker: PhantomData,
        })
    }

    /// Endpoint URL for a request's scope
    fn url_for(&self, request: &RangeRequest) -> String {
        match &request.key {
            FetchKey::Root => self.config.endpoint(self.resource.path()),
            FetchKey::Node(id) => self
                .config
                .endpoint(&format!("{}/{}/children", self.resource.path(), id)),
        }
    }
}

impl<T: DeserializeOwned + Send + Sync + 'static> RangeSource<T> for RestSource<T> {
    fn fetch_range(&self, request: RangeRequest) -> BoxFuture<'static, Result<RangeSlice<T>>> {
        let url = self.url_for(&request);
        let client = self.client.clone();
        let bearer = self.bearer.clone();

        Box::pin(async move {
            let mut builder = client
                .get(&url)
                .query(&[("start", request.start), ("end", request.end)]);

            if let Some(term) = request.search.as_deref().filter(|t| !t.is_empty()) {
                builder = builder.query(&[("search", term)]);
            }
            if let Some(token) = &bearer {
                builder = builder.bearer_auth(token);
            }

            let response = builder.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(Error::Fetch {
                    message: format!("{} returned {}", url, status),
                });
            }

            let payload: RangePayload<T> = response.json().await?;
            let requested = request.end.saturating_sub(request.start);
            if payload.items.len() > requested {
                return Err(Error::Fetch {
                    message: format!(
                        "{} returned {} items for a window of {}",
                        url,
                        payload.items.len(),
                        requested
                    ),
                });
            }

            Ok(RangeSlice {
                items: payload.items,
                total_count: payload.total_count,
            })
        })
    }
}

impl<T> std::fmt::Debug for RestSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestSource")
            .field("resource", &self.resource)
            .field("base_url", &self.config.base_url)
            .field("authenticated", &self.bearer.is_some())
            .finish()
    }
}
