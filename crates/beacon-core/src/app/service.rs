//! StatusUpdateService - validator -> gate -> store
//!
//! # フロー
//! 1. StatusReportValidator::validate（エラーはそのまま返す）
//! 2. EndpointIdentityGate::authorize（台帳で解決 + 本人確認）
//! 3. StackStore::atomic_update（status[endpoint_id] を置き換え）
//! 4. 更新後のスナップショットを返す
//!
//! リトライはしない。失敗はその段階で打ち切り、呼び出し元へ返す。

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{
    CallerContext, EdgeStack, EdgeStackId, EndpointId, StatusKind, StatusReport,
    StatusUpdateError,
};
use crate::observability::StatusCounts;
use crate::ports::{EndpointDirectory, StackStore};

use super::gate::EndpointIdentityGate;
use super::validator::StatusReportValidator;

pub struct StatusUpdateService {
    validator: StatusReportValidator,
    gate: EndpointIdentityGate,
    store: Arc<dyn StackStore>,
}

impl StatusUpdateService {
    pub fn new(directory: Arc<dyn EndpointDirectory>, store: Arc<dyn StackStore>) -> Self {
        Self {
            validator: StatusReportValidator,
            gate: EndpointIdentityGate::new(directory),
            store,
        }
    }

    pub fn store(&self) -> &Arc<dyn StackStore> {
        &self.store
    }

    /// 1 エンドポイントの報告をスタックへ反映し、更新後のスナップショットを返す
    #[tracing::instrument(
        name = "report_status",
        skip(self, report, caller),
        fields(stack = %stack_id, endpoint = %report.endpoint_id, caller = caller.label())
    )]
    pub async fn report_status(
        &self,
        stack_id: EdgeStackId,
        report: StatusReport,
        caller: &CallerContext,
    ) -> Result<EdgeStack, StatusUpdateError> {
        let valid = self.validator.validate(&report).inspect_err(|err| {
            warn!(error = %err, "rejected malformed status report");
        })?;

        self.gate
            .authorize(caller, valid.endpoint_id())
            .await
            .inspect_err(|err| warn!(error = %err, "status report not authorized"))?;

        let kind = valid.kind();
        let record = valid.into_record();
        let mut previous: Option<StatusKind> = None;

        let snapshot = self
            .store
            .atomic_update(
                stack_id,
                Box::new(|stack: &mut EdgeStack| {
                    previous = stack.apply_status(record).map(|old| old.kind());
                }),
            )
            .await
            .inspect_err(|err| warn!(error = %err, "status update not committed"))?;

        debug!(from = ?previous, to = %kind, "status recorded");
        Ok(snapshot)
    }

    /// `report_status` と同じ。報告をフィールドごとに受け取る
    pub async fn update_endpoint_status(
        &self,
        stack_id: EdgeStackId,
        endpoint_id: EndpointId,
        kind: StatusKind,
        error: impl Into<String>,
        caller: &CallerContext,
    ) -> Result<EdgeStack, StatusUpdateError> {
        let report = StatusReport::new(endpoint_id, kind).with_error(error);
        self.report_status(stack_id, report, caller).await
    }

    /// 1 スタックのエンドポイント別ステータス集計
    pub async fn counts(&self, stack_id: EdgeStackId) -> Result<StatusCounts, StatusUpdateError> {
        let stack = self.store.get(stack_id).await?;
        Ok(StatusCounts::from_stack(&stack))
    }
}
