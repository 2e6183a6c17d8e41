//! MemoryJournal - 開発・テスト用の永続化先
//!
//! 書き込みをメモリ上に保持するだけ。`set_fail_writes(true)` で
//! 永続化失敗を再現できる。

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{EdgeStack, EdgeStackId, JournalError};
use crate::ports::StackJournal;

#[derive(Default)]
pub struct MemoryJournal {
    stacks: Mutex<HashMap<EdgeStackId, EdgeStack>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `persist` fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `persist` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn stored(&self, id: EdgeStackId) -> Option<EdgeStack> {
        self.stacks.lock().await.get(&id).cloned()
    }
}

#[async_trait]
impl StackJournal for MemoryJournal {
    async fn persist(&self, stack: &EdgeStack) -> Result<(), JournalError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(JournalError::Other("write rejected".to_string()));
        }
        self.stacks.lock().await.insert(stack.id(), stack.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, id: EdgeStackId) -> Result<(), JournalError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(JournalError::Other("write rejected".to_string()));
        }
        self.stacks.lock().await.remove(&id);
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<EdgeStack>, JournalError> {
        let stacks = self.stacks.lock().await;
        Ok(stacks.values().cloned().collect())
    }
}
