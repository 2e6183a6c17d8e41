//! InMemoryStackStore - スタックごとのロックを持つ正本

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::domain::{EdgeStack, EdgeStackId, JournalError, StoreError};
use crate::ports::{StackJournal, StackMutator, StackStore};

/// live なエンティティ + 削除済みフラグ
///
/// `removed` は `delete` がスロットのロック下で立てる。ロック待ちだった更新は
/// それを見て `NotFound` を返す。
struct StackSlot {
    stack: EdgeStack,
    removed: bool,
}

type SharedSlot = Arc<Mutex<StackSlot>>;

/// InMemoryStackStore は `StackJournal` で永続化されるメモリ上の `StackStore`
///
/// # 設計
/// - `slots`（外側のロック）はスロットの検索・追加・削除の間だけ保持する。
///   journal 書き込みやスロット待ちの間は保持しない
/// - スタックごとに async mutex を持ち、それが `atomic_update` の排他単位
/// - journal 書き込みはスロットのロック下で行い、成功して初めて
///   作業コピーが live なエンティティを置き換える
pub struct InMemoryStackStore {
    slots: RwLock<HashMap<EdgeStackId, SharedSlot>>,
    journal: Arc<dyn StackJournal>,
}

impl InMemoryStackStore {
    pub fn new(journal: Arc<dyn StackJournal>) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            journal,
        }
    }

    /// journal の内容からストアを再構築する
    pub async fn restore(journal: Arc<dyn StackJournal>) -> Result<Self, JournalError> {
        let stacks = journal.load_all().await?;
        let slots = stacks
            .into_iter()
            .map(|stack| {
                let slot = StackSlot {
                    stack,
                    removed: false,
                };
                (slot.stack.id(), Arc::new(Mutex::new(slot)))
            })
            .collect();
        Ok(Self {
            slots: RwLock::new(slots),
            journal,
        })
    }

    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }

    async fn slot(&self, id: EdgeStackId) -> Result<SharedSlot, StoreError> {
        let slots = self.slots.read().await;
        slots.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// `id` がまだ `slot` を指していれば索引から外す
    async fn unlink(&self, id: EdgeStackId, slot: &SharedSlot) {
        let mut slots = self.slots.write().await;
        if let Some(current) = slots.get(&id)
            && Arc::ptr_eq(current, slot)
        {
            slots.remove(&id);
        }
    }
}

#[async_trait]
impl StackStore for InMemoryStackStore {
    async fn create(&self, stack: EdgeStack) -> Result<EdgeStack, StoreError> {
        let id = stack.id();
        let slot = Arc::new(Mutex::new(StackSlot {
            stack,
            removed: false,
        }));

        // 公開前に新しいスロットをロックしておく（最初の書き込みが確定するまで更新させない）
        let mut guard = slot.lock().await;
        {
            let mut slots = self.slots.write().await;
            if slots.contains_key(&id) {
                return Err(StoreError::AlreadyExists(id));
            }
            slots.insert(id, Arc::clone(&slot));
        }

        if let Err(source) = self.journal.persist(&guard.stack).await {
            guard.removed = true;
            self.unlink(id, &slot).await;
            return Err(StoreError::Persistence { id, source });
        }
        Ok(guard.stack.clone())
    }

    async fn get(&self, id: EdgeStackId) -> Result<EdgeStack, StoreError> {
        let slot = self.slot(id).await?;
        let guard = slot.lock().await;
        if guard.removed {
            return Err(StoreError::NotFound(id));
        }
        Ok(guard.stack.clone())
    }

    async fn list(&self) -> Result<Vec<EdgeStack>, StoreError> {
        let slots: Vec<SharedSlot> = self.slots.read().await.values().cloned().collect();

        let mut stacks = Vec::with_capacity(slots.len());
        for slot in slots {
            let guard = slot.lock().await;
            if !guard.removed {
                stacks.push(guard.stack.clone());
            }
        }
        stacks.sort_by_key(|s| s.id());
        Ok(stacks)
    }

    async fn delete(&self, id: EdgeStackId) -> Result<(), StoreError> {
        let slot = self.slot(id).await?;
        let mut guard = slot.lock().await;
        if guard.removed {
            return Err(StoreError::NotFound(id));
        }

        self.journal
            .remove(id)
            .await
            .map_err(|source| StoreError::Persistence { id, source })?;

        guard.removed = true;
        self.unlink(id, &slot).await;
        Ok(())
    }

    async fn atomic_update(
        &self,
        id: EdgeStackId,
        mutator: StackMutator<'_>,
    ) -> Result<EdgeStack, StoreError> {
        let slot = self.slot(id).await?;
        let mut guard = slot.lock().await;
        if guard.removed {
            return Err(StoreError::NotFound(id));
        }

        let mut working = guard.stack.clone();
        mutator(&mut working);

        self.journal
            .persist(&working)
            .await
            .map_err(|source| StoreError::Persistence { id, source })?;

        guard.stack = working;
        Ok(guard.stack.clone())
    }
}
