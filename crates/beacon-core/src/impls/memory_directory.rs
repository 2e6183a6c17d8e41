//! InMemoryEndpointDirectory - 開発・テスト用のエンドポイント台帳

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{DirectoryError, Endpoint, EndpointId};
use crate::ports::EndpointDirectory;

#[derive(Default)]
pub struct InMemoryEndpointDirectory {
    endpoints: RwLock<HashMap<EndpointId, Endpoint>>,
}

impl InMemoryEndpointDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoints(endpoints: impl IntoIterator<Item = Endpoint>) -> Self {
        let endpoints = endpoints.into_iter().map(|ep| (ep.id, ep)).collect();
        Self {
            endpoints: RwLock::new(endpoints),
        }
    }

    /// Insert or replace an endpoint.
    pub async fn upsert(&self, endpoint: Endpoint) {
        self.endpoints.write().await.insert(endpoint.id, endpoint);
    }

    pub async fn remove(&self, id: EndpointId) -> Option<Endpoint> {
        self.endpoints.write().await.remove(&id)
    }
}

#[async_trait]
impl EndpointDirectory for InMemoryEndpointDirectory {
    async fn lookup(&self, id: EndpointId) -> Result<Endpoint, DirectoryError> {
        self.endpoints
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(DirectoryError::NotFound(id))
    }
}
