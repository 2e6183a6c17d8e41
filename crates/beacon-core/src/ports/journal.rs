//! StackJournal port - EdgeStack の永続化先
//!
//! # 実装
//! - **FileJournal**: 1 スタック 1 JSON ファイル（tmp に書いて rename）
//! - **MemoryJournal**: 開発・テスト用

use async_trait::async_trait;

use crate::domain::{EdgeStack, EdgeStackId, JournalError};

/// StackJournal はスタック全体を 1 単位として書き込む
///
/// # 設計原則
/// - `persist` が `Ok` を返した時点で書き込みは確定している
/// - 部分書き込みは観測されない（all-or-nothing）
#[async_trait]
pub trait StackJournal: Send + Sync {
    async fn persist(&self, stack: &EdgeStack) -> Result<(), JournalError>;

    async fn remove(&self, id: EdgeStackId) -> Result<(), JournalError>;

    /// 起動時の復元用
    async fn load_all(&self) -> Result<Vec<EdgeStack>, JournalError>;
}
