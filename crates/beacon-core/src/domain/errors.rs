//! Errors - エラー型と分類
//!
//! レイヤーごとに enum を分け、`StatusUpdateError` に集約する。
//! transport 側は `kind()` / `http_status()` だけを見ればよい。

use thiserror::Error;

use super::ids::{EdgeStackId, EndpointId};

/// ErrorKind は呼び出し元に見せる分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    PermissionDenied,
    Internal,
}

impl ErrorKind {
    pub fn http_status(self) -> u16 {
        match self {
            ErrorKind::InvalidInput => 400,
            ErrorKind::PermissionDenied => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
        }
    }
}

/// 不正な報告。宣言順にチェックされる
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid status")]
    MissingStatus,

    #[error("invalid endpoint identifier")]
    MissingEndpoint,

    #[error("error message is mandatory when status is error")]
    MissingErrorMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("endpoint {0} not found")]
    NotFound(EndpointId),

    #[error("endpoint directory unavailable: {0}")]
    Backend(String),
}

/// gate が呼び出し元を拒否した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NotEdgeEndpoint,
    EndpointNotAssociated,
    NotAnEdgeAgent,
    IdentityMismatch,
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DenyReason::NotEdgeEndpoint => "endpoint is not an edge endpoint",
            DenyReason::EndpointNotAssociated => "endpoint has no associated edge agent",
            DenyReason::NotAnEdgeAgent => "caller is not an edge agent",
            DenyReason::IdentityMismatch => "caller does not match the endpoint identity",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("endpoint {0} not found")]
    EndpointNotFound(EndpointId),

    #[error("permission denied to access {endpoint_id}: {reason}")]
    Forbidden {
        endpoint_id: EndpointId,
        reason: DenyReason,
    },

    #[error("unable to resolve endpoint: {0}")]
    Directory(String),
}

impl From<DirectoryError> for AuthorizationError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(id) => AuthorizationError::EndpointNotFound(id),
            DirectoryError::Backend(msg) => AuthorizationError::Directory(msg),
        }
    }
}

/// 永続化済みデータの復元時に検出する不変条件違反
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("status record has no endpoint identifier")]
    UnsetEndpoint,

    #[error("error status of {0} has no message")]
    MissingErrorMessage(EndpointId),

    #[error("status record of {endpoint_id} is stored under {key}")]
    KeyMismatch {
        key: EndpointId,
        endpoint_id: EndpointId,
    },
}

/// `StackJournal` の永続化失敗
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal io: {0}")]
    Io(#[from] std::io::Error),

    #[error("journal encode: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("edge stack {0} not found")]
    NotFound(EdgeStackId),

    #[error("edge stack {0} already exists")]
    AlreadyExists(EdgeStackId),

    #[error("unable to persist edge stack {id}: {source}")]
    Persistence {
        id: EdgeStackId,
        #[source]
        source: JournalError,
    },
}

/// ステータス更新のトップレベルエラー
#[derive(Debug, Error)]
pub enum StatusUpdateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unable to find an environment with identifier {0}")]
    EndpointNotFound(EndpointId),

    #[error("permission denied to access {endpoint_id}: {reason}")]
    Forbidden {
        endpoint_id: EndpointId,
        reason: DenyReason,
    },

    #[error("unable to find edge stack {0}")]
    StackNotFound(EdgeStackId),

    #[error("unable to persist the stack changes: {0}")]
    Persistence(#[source] StoreError),

    #[error("unable to resolve endpoint: {0}")]
    Directory(String),
}

impl StatusUpdateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatusUpdateError::Validation(_) => ErrorKind::InvalidInput,
            StatusUpdateError::EndpointNotFound(_) | StatusUpdateError::StackNotFound(_) => {
                ErrorKind::NotFound
            }
            StatusUpdateError::Forbidden { .. } => ErrorKind::PermissionDenied,
            StatusUpdateError::Persistence(_) | StatusUpdateError::Directory(_) => {
                ErrorKind::Internal
            }
        }
    }

    pub fn http_status(&self) -> u16 {
        self.kind().http_status()
    }

    /// 同じ報告を再送してよいか。何もコミットされておらず、
    /// 原因がリクエスト自体にない場合だけ true
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StatusUpdateError::Persistence(_) | StatusUpdateError::Directory(_)
        )
    }
}

impl From<AuthorizationError> for StatusUpdateError {
    fn from(err: AuthorizationError) -> Self {
        match err {
            AuthorizationError::EndpointNotFound(id) => StatusUpdateError::EndpointNotFound(id),
            AuthorizationError::Forbidden {
                endpoint_id,
                reason,
            } => StatusUpdateError::Forbidden {
                endpoint_id,
                reason,
            },
            AuthorizationError::Directory(msg) => StatusUpdateError::Directory(msg),
        }
    }
}

impl From<StoreError> for StatusUpdateError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => StatusUpdateError::StackNotFound(id),
            other => StatusUpdateError::Persistence(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn persistence() -> StatusUpdateError {
        StatusUpdateError::Persistence(StoreError::Persistence {
            id: EdgeStackId::new(1),
            source: JournalError::Other("disk full".to_string()),
        })
    }

    #[rstest]
    #[case::missing_status(ValidationError::MissingStatus.into(), 400)]
    #[case::missing_endpoint(ValidationError::MissingEndpoint.into(), 400)]
    #[case::missing_message(ValidationError::MissingErrorMessage.into(), 400)]
    #[case::endpoint_not_found(StatusUpdateError::EndpointNotFound(EndpointId::new(1)), 404)]
    #[case::stack_not_found(StatusUpdateError::StackNotFound(EdgeStackId::new(1)), 404)]
    #[case::forbidden(
        StatusUpdateError::Forbidden { endpoint_id: EndpointId::new(1), reason: DenyReason::IdentityMismatch },
        403
    )]
    #[case::persistence(persistence(), 500)]
    #[case::directory(StatusUpdateError::Directory("down".to_string()), 500)]
    fn maps_to_http_status(#[case] err: StatusUpdateError, #[case] expected: u16) {
        assert_eq!(err.http_status(), expected);
    }

    #[test]
    fn only_internal_failures_are_retryable() {
        assert!(persistence().is_retryable());
        assert!(!StatusUpdateError::from(ValidationError::MissingStatus).is_retryable());
        assert!(!StatusUpdateError::StackNotFound(EdgeStackId::new(1)).is_retryable());
    }

    #[test]
    fn store_not_found_becomes_stack_not_found() {
        let err = StatusUpdateError::from(StoreError::NotFound(EdgeStackId::new(8)));
        assert!(matches!(err, StatusUpdateError::StackNotFound(id) if id == EdgeStackId::new(8)));
    }

    #[test]
    fn directory_not_found_becomes_endpoint_not_found() {
        let err = AuthorizationError::from(DirectoryError::NotFound(EndpointId::new(2)));
        assert_eq!(err, AuthorizationError::EndpointNotFound(EndpointId::new(2)));
    }

    #[test]
    fn validation_message_is_surfaced_verbatim() {
        let err = StatusUpdateError::from(ValidationError::MissingErrorMessage);
        assert_eq!(
            err.to_string(),
            "error message is mandatory when status is error"
        );
    }
}
