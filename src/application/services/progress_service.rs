use std::sync::Arc;

use crate::application::ports::repositories::ProgressRepository;
use crate::domain::entities::{Measurements, ProgressEntry};
use crate::domain::value_objects::SlotPosition;
use crate::shared::error::AppError;

/// User-facing progress actions: measurements and the photo slots. All
/// validation errors here are user-visible and never mixed up with the
/// transport failures sync handles silently.
pub struct ProgressService {
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    pub fn new(repo: Arc<dyn ProgressRepository>) -> Self {
        Self { repo }
    }

    /// Create or update the entry for a program day.
    pub async fn save_entry(
        &self,
        account_id: &str,
        day: u32,
        measurements: Measurements,
    ) -> Result<ProgressEntry, AppError> {
        if day == 0 {
            return Err(AppError::Validation(
                "Program day must be at least 1".to_string(),
            ));
        }
        if measurements.is_empty() {
            return Err(AppError::Validation(
                "A progress entry needs at least one measurement".to_string(),
            ));
        }
        if measurements.weight.is_some_and(|w| w <= 0.0) {
            return Err(AppError::Validation(
                "Weight must be positive".to_string(),
            ));
        }

        let entry = match self.repo.get_entry(account_id, day).await? {
            Some(mut entry) => {
                entry.set_measurements(measurements);
                entry
            }
            None => ProgressEntry::new(account_id.to_string(), day, measurements),
        };
        self.repo.upsert_entry(&entry).await?;
        Ok(entry)
    }

    pub async fn set_photo(
        &self,
        account_id: &str,
        day: u32,
        position: SlotPosition,
        data: Vec<u8>,
    ) -> Result<ProgressEntry, AppError> {
        if data.is_empty() {
            return Err(AppError::Validation("Photo data is empty".to_string()));
        }
        let mut entry = self.require_entry(account_id, day).await?;
        entry.set_photo_data(position, data);
        self.repo.upsert_entry(&entry).await?;
        Ok(entry)
    }

    pub async fn delete_photo(
        &self,
        account_id: &str,
        day: u32,
        position: SlotPosition,
    ) -> Result<ProgressEntry, AppError> {
        let mut entry = self.require_entry(account_id, day).await?;
        entry.delete_photo_data(position);
        self.repo.upsert_entry(&entry).await?;
        Ok(entry)
    }

    pub async fn delete_entry(&self, account_id: &str, day: u32) -> Result<(), AppError> {
        let mut entry = self.require_entry(account_id, day).await?;
        entry.mark_deleted();
        self.repo.upsert_entry(&entry).await
    }

    pub async fn list_entries(&self, account_id: &str) -> Result<Vec<ProgressEntry>, AppError> {
        self.repo.get_active_entries(account_id).await
    }

    async fn require_entry(&self, account_id: &str, day: u32) -> Result<ProgressEntry, AppError> {
        self.repo
            .get_entry(account_id, day)
            .await?
            .filter(|e| !e.should_delete)
            .ok_or_else(|| AppError::NotFound(format!("No progress entry for day {day}")))
    }
}
