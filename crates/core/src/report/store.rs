//! Persistence port for reports.

use consignment_shared::types::ReportId;

use super::entity::Report;
use super::error::ReportError;

/// Unit-of-work style store for reports.
///
/// This trait is implemented by the db crate. `persist` stages a report,
/// `flush` commits what was staged. Failures are surfaced as-is; nothing is
/// retried here.
pub trait ReportStore: Send + Sync {
    /// Validates the report, assigns an identity if it has none and stages it.
    ///
    /// Persisting the same report again replaces the staged state.
    fn persist(
        &self,
        report: &mut Report,
    ) -> impl std::future::Future<Output = Result<(), ReportError>> + Send;

    /// Commits every staged report.
    fn flush(&self) -> impl std::future::Future<Output = Result<(), ReportError>> + Send;

    /// Commits only the given staged reports, leaving the rest staged.
    fn flush_only(
        &self,
        ids: &[ReportId],
    ) -> impl std::future::Future<Output = Result<(), ReportError>> + Send;

    /// Persists and then flushes.
    fn save(
        &self,
        report: &mut Report,
    ) -> impl std::future::Future<Output = Result<(), ReportError>> + Send {
        async move {
            self.persist(report).await?;
            self.flush().await
        }
    }
}
