//! StatusKind / StatusRecord - エンドポイントごとのデプロイ状態
//!
//! # 不変条件
//! - `Error` のレコードは必ず空でないメッセージを持つ
//! - それ以外の種別はメッセージを持たない
//! - `endpoint_id` は作成後に変わらない（レコードは丸ごと置き換える）

use serde::{Deserialize, Serialize};

use super::errors::RecordError;
use super::ids::EndpointId;

/// StatusKind は 1 エンドポイントが 1 スタックについて報告する状態
///
/// 典型的な遷移:
/// - Pending -> Acknowledged -> DeploymentReceived -> Deploying -> Running/Success
/// - any -> Error（メッセージ付き）
/// - Remove -> Removed（エンドポイントからの撤去）
///
/// 遷移表は強制しない。エンドポイントはいつでも任意の種別を報告できる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Pending,
    Acknowledged,
    DeploymentReceived,
    Deploying,
    Running,
    Success,
    Error,
    Remove,
    Removed,
}

impl StatusKind {
    pub const ALL: [StatusKind; 9] = [
        StatusKind::Pending,
        StatusKind::Acknowledged,
        StatusKind::DeploymentReceived,
        StatusKind::Deploying,
        StatusKind::Running,
        StatusKind::Success,
        StatusKind::Error,
        StatusKind::Remove,
        StatusKind::Removed,
    ];

    /// メッセージを持つのは `Error` だけ
    pub fn requires_message(self) -> bool {
        matches!(self, StatusKind::Error)
    }

    /// 収束済み（成功・失敗を問わない）か
    pub fn is_settled(self) -> bool {
        matches!(
            self,
            StatusKind::Running | StatusKind::Success | StatusKind::Error | StatusKind::Removed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusKind::Pending => "pending",
            StatusKind::Acknowledged => "acknowledged",
            StatusKind::DeploymentReceived => "deployment_received",
            StatusKind::Deploying => "deploying",
            StatusKind::Running => "running",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
            StatusKind::Remove => "remove",
            StatusKind::Removed => "removed",
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// StatusRecord は 1 エンドポイントの最新状態
///
/// フィールドは非公開。検証済みの報告から作られ、以後は編集されず
/// 丸ごと置き換えられるだけ。デシリアライズも `TryFrom` を経由するので、
/// journal から読んだレコードも同じ不変条件を満たす。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredStatusRecord")]
pub struct StatusRecord {
    #[serde(rename = "status")]
    kind: StatusKind,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    error: String,

    #[serde(rename = "endpointID")]
    endpoint_id: EndpointId,
}

impl StatusRecord {
    /// レコードを作る。`kind` がメッセージを持たない種別なら捨てる。
    pub fn new(endpoint_id: EndpointId, kind: StatusKind, error: impl Into<String>) -> Self {
        let error = if kind.requires_message() {
            error.into()
        } else {
            String::new()
        };
        Self {
            kind,
            error,
            endpoint_id,
        }
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn endpoint_id(&self) -> EndpointId {
        self.endpoint_id
    }
}

/// 永続化形式そのまま（未検証）のレコード
#[derive(Deserialize)]
struct StoredStatusRecord {
    status: StatusKind,
    #[serde(default)]
    error: String,
    #[serde(rename = "endpointID")]
    endpoint_id: EndpointId,
}

impl TryFrom<StoredStatusRecord> for StatusRecord {
    type Error = RecordError;

    fn try_from(stored: StoredStatusRecord) -> Result<Self, Self::Error> {
        if stored.endpoint_id.is_unset() {
            return Err(RecordError::UnsetEndpoint);
        }
        if stored.status.requires_message() && stored.error.trim().is_empty() {
            return Err(RecordError::MissingErrorMessage(stored.endpoint_id));
        }
        Ok(StatusRecord::new(
            stored.endpoint_id,
            stored.status,
            stored.error,
        ))
    }
}
