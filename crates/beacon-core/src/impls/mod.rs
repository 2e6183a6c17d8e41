//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryStackStore**: スタックごとの Mutex で排他する正本
//! - **InMemoryEndpointDirectory**: 開発・テスト用の台帳
//! - **FileJournal**: JSON ファイルへの永続化
//! - **MemoryJournal**: 開発・テスト用の永続化先（失敗注入つき）

pub mod file_journal;
pub mod memory_directory;
pub mod memory_journal;
pub mod memory_store;

pub use self::file_journal::FileJournal;
pub use self::memory_directory::InMemoryEndpointDirectory;
pub use self::memory_journal::MemoryJournal;
pub use self::memory_store::InMemoryStackStore;
