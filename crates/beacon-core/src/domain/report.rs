//! StatusReport - edge agent から届くステータス報告

use serde::{Deserialize, Serialize};

use super::ids::EndpointId;
use super::status::{StatusKind, StatusRecord};

/// StatusReport は transport からデコードしたままの報告
///
/// デコード段階ではすべて省略可能。欠けたフィールドはデコードエラーではなく
/// 検証エラーとして扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub status: Option<StatusKind>,

    #[serde(default)]
    pub error: String,

    #[serde(default, rename = "endpointID")]
    pub endpoint_id: EndpointId,
}

impl StatusReport {
    pub fn new(endpoint_id: EndpointId, status: StatusKind) -> Self {
        Self {
            status: Some(status),
            error: String::new(),
            endpoint_id,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }
}

/// ValidReport は検証を通った報告。作れるのは `StatusReportValidator` だけ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReport {
    pub(crate) endpoint_id: EndpointId,
    pub(crate) kind: StatusKind,
    pub(crate) error: String,
}

impl ValidReport {
    pub fn endpoint_id(&self) -> EndpointId {
        self.endpoint_id
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn into_record(self) -> StatusRecord {
        StatusRecord::new(self.endpoint_id, self.kind, self.error)
    }
}
