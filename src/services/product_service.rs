//! Product Service - catalog operations spanning several rows

use serde::Serialize;

use crate::domain::{DomainError, ProductRepository, VisibilityUpdate};

/// Result of a bulk visibility change
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulkUpdateReport {
    pub updated: usize,
    pub requested: usize,
}

/// Error of a bulk update that stopped partway
#[derive(Debug)]
pub struct BulkUpdateError {
    pub updated: usize,
    pub failed_id: i32,
    pub source: DomainError,
}

impl std::fmt::Display for BulkUpdateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Visibility update stopped at product {} after {} update(s): {}",
            self.failed_id, self.updated, self.source
        )
    }
}

impl std::error::Error for BulkUpdateError {}

/// Apply the same visibility flags to every product in `ids`, one update
/// per product. Not atomic: rows updated before a failure keep the change.
pub async fn apply_visibility(
    repo: &dyn ProductRepository,
    ids: &[i32],
    update: VisibilityUpdate,
) -> Result<BulkUpdateReport, BulkUpdateError> {
    let mut report = BulkUpdateReport {
        updated: 0,
        requested: ids.len(),
    };

    if update.is_active.is_none() && update.is_featured.is_none() {
        return Ok(report);
    }

    for &id in ids {
        repo.update_visibility(id, update)
            .await
            .map_err(|source| BulkUpdateError {
                updated: report.updated,
                failed_id: id,
                source,
            })?;
        report.updated += 1;
    }

    tracing::info!(
        "Visibility updated on {}/{} product(s)",
        report.updated,
        report.requested
    );
    Ok(report)
}
