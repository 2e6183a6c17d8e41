//! beacon-core
//!
//! Edge stack status tracking: edge agents report per-endpoint deployment
//! status for a stack, and each report lands atomically in that stack's
//! status map.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, status, stack, endpoint, caller, report, errors）
//! - **ports**: 抽象化レイヤー（StackStore, StackJournal, EndpointDirectory）
//! - **app**: アプリケーションロジック（validator, gate, service, builder）
//! - **impls**: 実装（InMemoryStackStore, FileJournal, MemoryJournal, InMemoryEndpointDirectory）
//! - **config**: 環境変数からの設定
//! - **observability**: ステータス集計ビュー

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
