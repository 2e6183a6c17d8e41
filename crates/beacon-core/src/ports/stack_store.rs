//! StackStore port - EdgeStack の正本（source of truth）
//!
//! # 実装
//! - **InMemoryStackStore**: スタックごとの Mutex + StackJournal

use async_trait::async_trait;

use crate::domain::{EdgeStack, EdgeStackId, StoreError};

/// `atomic_update` に渡す変更関数。ちょうど 1 回だけ呼ばれる。
pub type StackMutator<'a> = Box<dyn FnOnce(&mut EdgeStack) + Send + 'a>;

/// StackStore は EdgeStack の保存と排他的な更新を提供する
///
/// # 設計原則
/// - 同じ stack_id への `atomic_update` は直列化される
/// - 異なる stack_id 同士は互いにブロックしない
/// - 戻り値はすべてスナップショット（live なエンティティへの参照ではない）
#[async_trait]
pub trait StackStore: Send + Sync {
    /// Register a new stack. Fails if the id is already taken.
    async fn create(&self, stack: EdgeStack) -> Result<EdgeStack, StoreError>;

    async fn get(&self, id: EdgeStackId) -> Result<EdgeStack, StoreError>;

    async fn list(&self) -> Result<Vec<EdgeStack>, StoreError>;

    /// Remove the stack and every status record it owns.
    async fn delete(&self, id: EdgeStackId) -> Result<(), StoreError>;

    /// Exclusive read-modify-write of one stack.
    ///
    /// The mutator runs against a working copy; the copy is persisted and only
    /// then becomes the live entity. On `StoreError::Persistence` nothing is
    /// committed.
    async fn atomic_update(
        &self,
        id: EdgeStackId,
        mutator: StackMutator<'_>,
    ) -> Result<EdgeStack, StoreError>;
}
