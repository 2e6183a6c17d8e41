//! FileJournal - 1 スタック 1 JSON ファイルの永続化
//!
//! # 書き込み手順
//! 1. `<id>.json.tmp` に全体を書く
//! 2. `sync_writes` なら fsync
//! 3. `<id>.json` へ rename（同一ディレクトリ内なので原子的）
//! 4. `sync_writes` ならディレクトリも fsync（rename / unlink を確定させる）
//!
//! 同じスタックへの書き込みはストア側で直列化されている前提。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::{EdgeStack, EdgeStackId, JournalError};
use crate::ports::StackJournal;

const EXTENSION: &str = "json";

pub struct FileJournal {
    dir: PathBuf,
    sync_writes: bool,
}

impl FileJournal {
    /// Open (and create if needed) a journal directory.
    pub async fn open(dir: impl Into<PathBuf>, sync_writes: bool) -> Result<Self, JournalError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir, sync_writes })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: EdgeStackId) -> PathBuf {
        self.dir.join(format!("{}.{EXTENSION}", id.get()))
    }

    fn tmp_path_for(&self, id: EdgeStackId) -> PathBuf {
        self.dir.join(format!("{}.{EXTENSION}.tmp", id.get()))
    }

    /// ディレクトリエントリの変更（rename / unlink）を fsync する
    async fn sync_dir(&self) -> Result<(), JournalError> {
        if self.sync_writes {
            sync_directory(&self.dir).await?;
        }
        Ok(())
    }
}

#[cfg(unix)]
async fn sync_directory(path: &Path) -> std::io::Result<()> {
    fs::File::open(path).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_directory(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[async_trait]
impl StackJournal for FileJournal {
    async fn persist(&self, stack: &EdgeStack) -> Result<(), JournalError> {
        let bytes = serde_json::to_vec_pretty(stack)?;
        let tmp = self.tmp_path_for(stack.id());

        let mut file = fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        if self.sync_writes {
            file.sync_all().await?;
        } else {
            file.flush().await?;
        }
        drop(file);

        fs::rename(&tmp, self.path_for(stack.id())).await?;
        self.sync_dir().await
    }

    async fn remove(&self, id: EdgeStackId) -> Result<(), JournalError> {
        match fs::remove_file(self.path_for(id)).await {
            Ok(()) => self.sync_dir().await,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn load_all(&self) -> Result<Vec<EdgeStack>, JournalError> {
        let mut stacks = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            // leftover *.json.tmp files are half-written and ignored
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            let bytes = fs::read(&path).await?;
            stacks.push(serde_json::from_slice(&bytes)?);
        }
        stacks.sort_by_key(|s: &EdgeStack| s.id());
        Ok(stacks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EndpointId, StatusKind, StatusRecord};

    #[tokio::test]
    async fn persist_and_load_all() {
        let dir = tempfile::tempdir().unwrap();
        let journal = FileJournal::open(dir.path(), false).await.unwrap();

        let mut stack = EdgeStack::new(EdgeStackId::new(2), "web");
        stack.apply_status(StatusRecord::new(EndpointId::new(1), StatusKind::Error, "boot failed"));
        journal.persist(&stack).await.unwrap();
        journal
            .persist(&EdgeStack::new(EdgeStackId::new(1), "db"))
            .await
            .unwrap();

        let loaded = journal.load_all().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id(), EdgeStackId::new(1));
        assert_eq!(loaded[1], stack);
    }

    #[tokio::test]
    async fn persist_overwrites_previous_version() {
        let dir = tempfile::tempdir().unwrap();
        let journal = FileJournal::open(dir.path(), true).await.unwrap();

        let mut stack = EdgeStack::new(EdgeStackId::new(1), "web");
        journal.persist(&stack).await.unwrap();
        stack.apply_status(StatusRecord::new(EndpointId::new(3), StatusKind::Running, ""));
        journal.persist(&stack).await.unwrap();

        let loaded = journal.load_all().await.unwrap();
        assert_eq!(loaded, vec![stack]);
        assert!(!journal.tmp_path_for(EdgeStackId::new(1)).exists());
    }

    #[tokio::test]
    async fn ignores_half_written_tmp_files() {
        let dir = tempfile::tempdir().unwrap();
        let journal = FileJournal::open(dir.path(), false).await.unwrap();
        std::fs::write(dir.path().join("9.json.tmp"), b"{ not json").unwrap();

        assert!(journal.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn load_all_refuses_error_record_without_message() {
        let dir = tempfile::tempdir().unwrap();
        let journal = FileJournal::open(dir.path(), false).await.unwrap();
        let stack = EdgeStack::new(EdgeStackId::new(1), "web");
        journal.persist(&stack).await.unwrap();

        let mut v = serde_json::to_value(&stack).unwrap();
        v["status"] = serde_json::json!({ "5": { "status": "error", "endpointID": 5 } });
        std::fs::write(dir.path().join("1.json"), v.to_string()).unwrap();

        let result = journal.load_all().await;
        assert!(matches!(result, Err(JournalError::Encode(_))));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let journal = FileJournal::open(dir.path(), false).await.unwrap();
        journal
            .persist(&EdgeStack::new(EdgeStackId::new(1), "web"))
            .await
            .unwrap();

        journal.remove(EdgeStackId::new(1)).await.unwrap();
        journal.remove(EdgeStackId::new(1)).await.unwrap();
        assert!(journal.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn synced_journal_persists_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let journal = FileJournal::open(dir.path(), true).await.unwrap();
        let stack = EdgeStack::new(EdgeStackId::new(4), "web");

        journal.persist(&stack).await.unwrap();
        assert!(dir.path().join("4.json").is_file());
        assert!(!dir.path().join("4.json.tmp").exists());

        journal.remove(EdgeStackId::new(4)).await.unwrap();
        assert!(!dir.path().join("4.json").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn directory_sync_fails_when_directory_is_gone() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("journal");
        let journal = FileJournal::open(&root, true).await.unwrap();
        journal
            .persist(&EdgeStack::new(EdgeStackId::new(1), "web"))
            .await
            .unwrap();

        std::fs::remove_dir_all(&root).unwrap();
        assert!(matches!(journal.sync_dir().await, Err(JournalError::Io(_))));
    }

    #[tokio::test]
    async fn open_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let journal = FileJournal::open(&nested, false).await.unwrap();
        assert!(journal.dir().is_dir());
    }
}
