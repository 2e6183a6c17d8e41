//! EndpointIdentityGate - 「自分のステータスは自分だけが書ける」
//!
//! # 二段構成
//! - `permits`: (caller, endpoint) -> AccessDecision の純粋関数
//! - `EndpointIdentityGate::authorize`: 台帳で endpoint を解決してから `permits`
//!
//! ミューテーションより前、かつ endpoint の存在確認より後に実行される。

use std::sync::Arc;

use crate::domain::{AuthorizationError, CallerContext, DenyReason, Endpoint, EndpointId};
use crate::ports::EndpointDirectory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenyReason),
}

/// `caller` は `endpoint` の edge agent として振る舞えるか
pub fn permits(caller: &CallerContext, endpoint: &Endpoint) -> AccessDecision {
    if !endpoint.is_edge() {
        return AccessDecision::Deny(DenyReason::NotEdgeEndpoint);
    }
    let Some(expected) = endpoint.edge_id.as_deref().filter(|id| !id.is_empty()) else {
        return AccessDecision::Deny(DenyReason::EndpointNotAssociated);
    };
    match caller {
        CallerContext::EdgeAgent { edge_id } if edge_id == expected => AccessDecision::Allow,
        CallerContext::EdgeAgent { .. } => AccessDecision::Deny(DenyReason::IdentityMismatch),
        CallerContext::Anonymous | CallerContext::User { .. } => {
            AccessDecision::Deny(DenyReason::NotAnEdgeAgent)
        }
    }
}

pub struct EndpointIdentityGate {
    directory: Arc<dyn EndpointDirectory>,
}

impl EndpointIdentityGate {
    pub fn new(directory: Arc<dyn EndpointDirectory>) -> Self {
        Self { directory }
    }

    /// `endpoint_id` を解決し、`caller` が本人かを確認する
    pub async fn authorize(
        &self,
        caller: &CallerContext,
        endpoint_id: EndpointId,
    ) -> Result<Endpoint, AuthorizationError> {
        let endpoint = self.directory.lookup(endpoint_id).await?;
        match permits(caller, &endpoint) {
            AccessDecision::Allow => Ok(endpoint),
            AccessDecision::Deny(reason) => Err(AuthorizationError::Forbidden {
                endpoint_id,
                reason,
            }),
        }
    }
}
