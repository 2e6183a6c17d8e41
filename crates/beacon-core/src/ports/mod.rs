//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」。外部の協調者（エンドポイント台帳、
//! エンティティストア、永続化先）へのインターフェースだけを定義する。
//!
//! # 設計原則
//! - ステータスマップへの書き込みは `StackStore::atomic_update` だけが行う
//! - 永続化（`StackJournal`）はストアのクリティカルセクション内で呼ばれる

pub mod endpoint_directory;
pub mod journal;
pub mod stack_store;

pub use self::endpoint_directory::EndpointDirectory;
pub use self::journal::StackJournal;
pub use self::stack_store::{StackMutator, StackStore};
