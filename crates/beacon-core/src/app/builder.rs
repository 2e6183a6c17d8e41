//! ServiceBuilder - StatusUpdateService の構築とワイヤリング
//!
//! # Fail-fast 設計
//! - 必要な port（EndpointDirectory, StackStore）が揃っているかを build() でチェック
//! - 不足があれば BuildError を返す

use std::sync::Arc;

use crate::config::BeaconConfig;
use crate::domain::JournalError;
use crate::impls::{FileJournal, InMemoryStackStore, MemoryJournal};
use crate::ports::{EndpointDirectory, StackJournal, StackStore};

use super::service::StatusUpdateService;

/// ServiceBuilder は StatusUpdateService を構築
///
/// # 使用例
/// ```ignore
/// let service = ServiceBuilder::new()
///     .directory(directory)
///     .store(store)
///     .build()?;
/// ```
#[derive(Default)]
pub struct ServiceBuilder {
    directory: Option<Arc<dyn EndpointDirectory>>,
    store: Option<Arc<dyn StackStore>>,
}

/// BuildError はサービス構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing components: {0:?}. These components were expected but not provided.")]
    MissingComponents(Vec<&'static str>),

    #[error("unable to open stack journal: {0}")]
    Journal(#[from] JournalError),
}

impl ServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(mut self, directory: Arc<dyn EndpointDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn store(mut self, store: Arc<dyn StackStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Open the store described by `config`: file-backed (and restored) when a
    /// data directory is set, memory-only otherwise.
    pub async fn store_from_config(self, config: &BeaconConfig) -> Result<Self, BuildError> {
        let journal: Arc<dyn StackJournal> = match &config.data_dir {
            Some(dir) => Arc::new(FileJournal::open(dir, config.sync_writes).await?),
            None => Arc::new(MemoryJournal::new()),
        };
        let store = InMemoryStackStore::restore(journal).await?;
        Ok(self.store(Arc::new(store)))
    }

    pub fn build(self) -> Result<StatusUpdateService, BuildError> {
        let mut missing = Vec::new();
        if self.directory.is_none() {
            missing.push("endpoint directory");
        }
        if self.store.is_none() {
            missing.push("stack store");
        }
        match (self.directory, self.store) {
            (Some(directory), Some(store)) => Ok(StatusUpdateService::new(directory, store)),
            _ => Err(BuildError::MissingComponents(missing)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EdgeStack, EdgeStackId};
    use crate::impls::InMemoryEndpointDirectory;

    #[test]
    fn build_success() {
        let service = ServiceBuilder::new()
            .directory(Arc::new(InMemoryEndpointDirectory::new()))
            .store(Arc::new(InMemoryStackStore::new(Arc::new(MemoryJournal::new()))))
            .build();
        assert!(service.is_ok());
    }

    #[test]
    fn build_missing_everything() {
        let result = ServiceBuilder::new().build();
        assert!(matches!(
            result,
            Err(BuildError::MissingComponents(missing))
                if missing == vec!["endpoint directory", "stack store"]
        ));
    }

    #[test]
    fn build_missing_store() {
        let result = ServiceBuilder::new()
            .directory(Arc::new(InMemoryEndpointDirectory::new()))
            .build();
        assert!(matches!(
            result,
            Err(BuildError::MissingComponents(missing)) if missing == vec!["stack store"]
        ));
    }

    #[tokio::test]
    async fn store_from_config_restores_file_journal() {
        let dir = tempfile::tempdir().unwrap();
        let config = BeaconConfig {
            data_dir: Some(dir.path().to_path_buf()),
            sync_writes: false,
        };

        let first = ServiceBuilder::new()
            .directory(Arc::new(InMemoryEndpointDirectory::new()))
            .store_from_config(&config)
            .await
            .unwrap()
            .build()
            .unwrap();
        first
            .store()
            .create(EdgeStack::new(EdgeStackId::new(7), "web"))
            .await
            .unwrap();

        let second = ServiceBuilder::new()
            .directory(Arc::new(InMemoryEndpointDirectory::new()))
            .store_from_config(&config)
            .await
            .unwrap()
            .build()
            .unwrap();
        let stack = second.store().get(EdgeStackId::new(7)).await.unwrap();
        assert_eq!(stack.name, "web");
    }
}
