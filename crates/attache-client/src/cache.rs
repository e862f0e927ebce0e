//! A shared read-through cache for the reference lists.

use std::{collections::HashMap, sync::Arc};

use attache_core::reference::{ReferenceList, ReferenceOption};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::ApiClient;

/// Industries and skills, fetched once and shared by every screen.
///
/// A failed fetch yields an empty list that is not cached, so the next
/// screen to ask retries. Cloning shares the cache.
#[derive(Clone)]
pub struct ReferenceCache {
  client:  ApiClient,
  entries: Arc<RwLock<HashMap<ReferenceList, Arc<Vec<ReferenceOption>>>>>,
}

impl ReferenceCache {
  pub fn new(client: ApiClient) -> Self {
    Self { client, entries: Arc::default() }
  }

  /// The options of `list`, from the cache or the server.
  pub async fn options(&self, list: ReferenceList) -> Arc<Vec<ReferenceOption>> {
    if let Some(hit) = self.entries.read().await.get(&list) {
      return Arc::clone(hit);
    }
    match self.client.reference_list(list).await {
      Ok(options) => {
        debug!(%list, count = options.len(), "reference list loaded");
        let options = Arc::new(options);
        self.entries.write().await.insert(list, Arc::clone(&options));
        options
      }
      Err(e) => {
        warn!(%list, error = %e, "reference list unavailable");
        Arc::default()
      }
    }
  }

  /// Both lists, fetched concurrently.
  pub async fn all(&self) -> (Arc<Vec<ReferenceOption>>, Arc<Vec<ReferenceOption>>) {
    tokio::join!(
      self.options(ReferenceList::Industries),
      self.options(ReferenceList::Skills)
    )
  }

  pub async fn is_cached(&self, list: ReferenceList) -> bool {
    self.entries.read().await.contains_key(&list)
  }

  /// Drop `list` so the next read refetches it.
  pub async fn invalidate(&self, list: ReferenceList) {
    self.entries.write().await.remove(&list);
  }

  pub async fn invalidate_all(&self) { self.entries.write().await.clear(); }
}

#[cfg(test)]
mod tests {
  use httpmock::prelude::*;
  use serde_json::json;

  use super::*;
  use crate::ApiConfig;

  fn cache(server: &MockServer) -> ReferenceCache {
    let client = ApiClient::new(ApiConfig { base_url: server.base_url(), timeout: None }).unwrap();
    ReferenceCache::new(client)
  }

  #[tokio::test]
  async fn second_read_is_served_from_the_cache() {
    let server = MockServer::start();
    let industries = server.mock(|when, then| {
      when.method(GET).path("/api/industries/");
      then
        .status(200)
        .json_body(json!([{ "industry_id": "IND01", "industry_name": "Mining" }]));
    });

    let cache = cache(&server);
    let first = cache.options(ReferenceList::Industries).await;
    let second = cache.options(ReferenceList::Industries).await;

    assert_eq!(first.len(), 1);
    assert_eq!(second[0].name, "Mining");
    industries.assert_hits(1);
  }

  #[tokio::test]
  async fn failed_fetch_is_empty_and_retried() {
    let server = MockServer::start();
    let skills = server.mock(|when, then| {
      when.method(GET).path("/api/skills/");
      then.status(500);
    });

    let cache = cache(&server);
    assert!(cache.options(ReferenceList::Skills).await.is_empty());
    assert!(!cache.is_cached(ReferenceList::Skills).await);
    assert!(cache.options(ReferenceList::Skills).await.is_empty());
    skills.assert_hits(2);
  }

  #[tokio::test]
  async fn invalidate_forces_a_refetch() {
    let server = MockServer::start();
    let skills = server.mock(|when, then| {
      when.method(GET).path("/api/skills/");
      then.status(200).json_body(json!([{ "skill_id": "SK07", "name": "Python" }]));
    });

    let cache = cache(&server);
    cache.options(ReferenceList::Skills).await;
    cache.invalidate(ReferenceList::Skills).await;
    cache.options(ReferenceList::Skills).await;
    skills.assert_hits(2);
  }
}
