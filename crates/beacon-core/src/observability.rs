//! Observability - スタック単位のステータス集計ビュー

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{EdgeStack, StatusKind};

/// StatusCounts はスタックごとのエンドポイント状態の集計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// 1 回以上報告したエンドポイント数
    pub total: usize,
    /// 最新状態が収束済みのエンドポイント数（`StatusKind::is_settled`）
    pub settled: usize,
    pub failed: usize,
    pub by_kind: BTreeMap<StatusKind, usize>,
}

impl StatusCounts {
    pub fn from_stack(stack: &EdgeStack) -> Self {
        let mut counts = StatusCounts::default();
        for record in stack.status().values() {
            let kind = record.kind();
            counts.total += 1;
            if kind.is_settled() {
                counts.settled += 1;
            }
            if kind == StatusKind::Error {
                counts.failed += 1;
            }
            *counts.by_kind.entry(kind).or_default() += 1;
        }
        counts
    }

    pub fn count(&self, kind: StatusKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EdgeStackId, EndpointId, StatusRecord};

    #[test]
    fn empty_stack_has_zero_counts() {
        let counts = StatusCounts::from_stack(&EdgeStack::new(EdgeStackId::new(1), "web"));
        assert_eq!(counts, StatusCounts::default());
        assert_eq!(counts.count(StatusKind::Success), 0);
    }

    #[test]
    fn counts_by_kind() {
        let mut stack = EdgeStack::new(EdgeStackId::new(1), "web");
        stack.apply_status(StatusRecord::new(EndpointId::new(1), StatusKind::Success, ""));
        stack.apply_status(StatusRecord::new(EndpointId::new(2), StatusKind::Success, ""));
        stack.apply_status(StatusRecord::new(EndpointId::new(3), StatusKind::Error, "x"));
        stack.apply_status(StatusRecord::new(EndpointId::new(4), StatusKind::Pending, ""));

        let counts = StatusCounts::from_stack(&stack);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.settled, 3);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.count(StatusKind::Success), 2);

        let v = serde_json::to_value(&counts).unwrap();
        assert_eq!(v["by_kind"]["success"], 2);
    }
}
