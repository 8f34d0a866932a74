use std::sync::Arc;

use crate::application::ports::remote::ReadMarkerRemote;
use crate::application::ports::repositories::ReadMarkerRepository;
use crate::shared::error::AppError;

/// User-facing read-marker actions. Marking is purely local (the sync pass
/// pushes it later); clearing is an explicit remote bulk operation, not
/// part of the per-item merge.
pub struct ReadMarkerService {
    repo: Arc<dyn ReadMarkerRepository>,
    remote: Arc<dyn ReadMarkerRemote>,
}

impl ReadMarkerService {
    pub fn new(repo: Arc<dyn ReadMarkerRepository>, remote: Arc<dyn ReadMarkerRemote>) -> Self {
        Self { repo, remote }
    }

    pub async fn mark_post_read(&self, account_id: &str, day: u32) -> Result<(), AppError> {
        let markers = self.repo.get_read_markers(account_id).await?;
        if markers.is_read(day) {
            return Ok(());
        }
        self.repo.add_pending_read_marker(account_id, day).await
    }

    pub async fn is_post_read(&self, account_id: &str, day: u32) -> Result<bool, AppError> {
        Ok(self.repo.get_read_markers(account_id).await?.is_read(day))
    }

    /// Clear everything, remote first: local state is only dropped once the
    /// server confirmed the bulk delete.
    pub async fn delete_all_read_posts(&self, account_id: &str) -> Result<(), AppError> {
        self.remote.delete_all().await.map_err(AppError::from)?;
        self.repo.clear_read_markers(account_id).await
    }
}
