//! EndpointDirectory port - エンドポイント台帳の参照
//!
//! # 実装
//! - **InMemoryEndpointDirectory**: 開発・テスト用

use async_trait::async_trait;

use crate::domain::{DirectoryError, Endpoint, EndpointId};

/// EndpointDirectory は ID からエンドポイントを解決する
///
/// 見つからない場合は `DirectoryError::NotFound`。
/// それ以外の失敗（バックエンド障害）は `DirectoryError::Backend`。
#[async_trait]
pub trait EndpointDirectory: Send + Sync {
    async fn lookup(&self, id: EndpointId) -> Result<Endpoint, DirectoryError>;
}
