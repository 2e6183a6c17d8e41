//! App - アプリケーション層
//!
//! ports を組み合わせてステータス報告のユースケースを実装する。
//!
//! # 主要コンポーネント
//! - **StatusReportValidator**: 報告ペイロードの検証
//! - **EndpointIdentityGate**: 呼び出し元が endpoint 本人かの判定
//! - **StatusUpdateService**: validate → lookup → authorize → atomic update
//! - **ServiceBuilder**: サービスの構築とワイヤリング

pub mod builder;
pub mod gate;
pub mod service;
pub mod validator;

pub use self::builder::{BuildError, ServiceBuilder};
pub use self::gate::{AccessDecision, EndpointIdentityGate, permits};
pub use self::service::StatusUpdateService;
pub use self::validator::StatusReportValidator;
