//! StatusReportValidator - 共有状態に触る前の入力検証
//!
//! 純粋関数。副作用なし。

use crate::domain::{StatusKind, StatusReport, ValidReport, ValidationError};

#[derive(Debug, Clone, Copy, Default)]
pub struct StatusReportValidator;

impl StatusReportValidator {
    /// Checks, in order: status present, endpoint set, message present for
    /// `Error`. A whitespace-only message counts as missing; any other message
    /// is kept as submitted. Other kinds drop the message.
    pub fn validate(&self, report: &StatusReport) -> Result<ValidReport, ValidationError> {
        let kind = report.status.ok_or(ValidationError::MissingStatus)?;

        if report.endpoint_id.is_unset() {
            return Err(ValidationError::MissingEndpoint);
        }

        if kind == StatusKind::Error && report.error.trim().is_empty() {
            return Err(ValidationError::MissingErrorMessage);
        }

        Ok(ValidReport {
            endpoint_id: report.endpoint_id,
            kind,
            error: if kind.requires_message() {
                report.error.clone()
            } else {
                String::new()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EndpointId;
    use rstest::rstest;

    fn report(status: Option<StatusKind>, endpoint: u64, error: &str) -> StatusReport {
        StatusReport {
            status,
            error: error.to_string(),
            endpoint_id: EndpointId::new(endpoint),
        }
    }

    #[rstest]
    #[case::nothing(report(None, 0, ""), ValidationError::MissingStatus)]
    #[case::status_checked_first(report(None, 1, "x"), ValidationError::MissingStatus)]
    #[case::no_endpoint(report(Some(StatusKind::Success), 0, ""), ValidationError::MissingEndpoint)]
    #[case::endpoint_before_message(report(Some(StatusKind::Error), 0, ""), ValidationError::MissingEndpoint)]
    #[case::empty_message(report(Some(StatusKind::Error), 1, ""), ValidationError::MissingErrorMessage)]
    #[case::blank_message(report(Some(StatusKind::Error), 1, " \t\n"), ValidationError::MissingErrorMessage)]
    fn rejects(#[case] input: StatusReport, #[case] expected: ValidationError) {
        assert_eq!(StatusReportValidator.validate(&input), Err(expected));
    }

    #[rstest]
    #[case::pending(StatusKind::Pending)]
    #[case::acknowledged(StatusKind::Acknowledged)]
    #[case::deploying(StatusKind::Deploying)]
    #[case::success(StatusKind::Success)]
    #[case::remove(StatusKind::Remove)]
    fn accepts_without_message(#[case] kind: StatusKind) {
        let valid = StatusReportValidator
            .validate(&report(Some(kind), 3, ""))
            .unwrap();
        assert_eq!(valid.kind(), kind);
        assert_eq!(valid.endpoint_id(), EndpointId::new(3));
    }

    #[test]
    fn padded_error_message_is_kept_as_submitted() {
        let valid = StatusReportValidator
            .validate(&report(Some(StatusKind::Error), 1, "  boot failed \n"))
            .unwrap();
        assert_eq!(valid.into_record().error(), "  boot failed \n");
    }

    #[test]
    fn message_is_ignored_for_other_kinds() {
        let valid = StatusReportValidator
            .validate(&report(Some(StatusKind::Success), 1, "stale"))
            .unwrap();
        assert_eq!(valid.into_record().error(), "");
    }
}
