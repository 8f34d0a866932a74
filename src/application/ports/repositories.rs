use async_trait::async_trait;

use crate::domain::entities::{Account, CustomExercise, ProgressEntry, ReadMarkers};
use crate::domain::value_objects::ExerciseId;
use crate::shared::error::AppError;

/// Staged outcome of an exercise sync pass, applied in one transaction.
#[derive(Debug, Clone, Default)]
pub struct ExerciseSyncApply {
    pub upserts: Vec<CustomExercise>,
    pub deletes: Vec<ExerciseId>,
}

impl ExerciseSyncApply {
    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.deletes.is_empty()
    }
}

/// Staged outcome of a progress sync pass, applied in one transaction.
#[derive(Debug, Clone, Default)]
pub struct ProgressSyncApply {
    pub upserts: Vec<ProgressEntry>,
    pub deletes: Vec<u32>,
}

impl ProgressSyncApply {
    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.deletes.is_empty()
    }
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create_account(&self, account: &Account) -> Result<(), AppError>;
    async fn get_account(&self, id: &str) -> Result<Option<Account>, AppError>;
}

#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    async fn create_exercise(&self, exercise: &CustomExercise) -> Result<(), AppError>;
    async fn update_exercise(&self, exercise: &CustomExercise) -> Result<(), AppError>;
    async fn get_exercise(
        &self,
        account_id: &str,
        id: &ExerciseId,
    ) -> Result<Option<CustomExercise>, AppError>;
    /// Records visible to the UI: tombstoned ones are excluded.
    async fn get_active_exercises(&self, account_id: &str)
        -> Result<Vec<CustomExercise>, AppError>;
    /// Every record for the account, tombstoned ones included. Sync passes
    /// start here.
    async fn get_all_exercises(&self, account_id: &str) -> Result<Vec<CustomExercise>, AppError>;
    /// Commit a whole pass atomically: no torn state is visible mid-sync.
    async fn apply_exercise_sync(
        &self,
        account_id: &str,
        apply: ExerciseSyncApply,
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn upsert_entry(&self, entry: &ProgressEntry) -> Result<(), AppError>;
    async fn get_entry(&self, account_id: &str, day: u32)
        -> Result<Option<ProgressEntry>, AppError>;
    async fn get_active_entries(&self, account_id: &str) -> Result<Vec<ProgressEntry>, AppError>;
    async fn get_all_entries(&self, account_id: &str) -> Result<Vec<ProgressEntry>, AppError>;
    async fn apply_progress_sync(
        &self,
        account_id: &str,
        apply: ProgressSyncApply,
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait ReadMarkerRepository: Send + Sync {
    async fn get_read_markers(&self, account_id: &str) -> Result<ReadMarkers, AppError>;
    async fn add_pending_read_marker(&self, account_id: &str, day: u32) -> Result<(), AppError>;
    /// Replace both subsets with the post-pass state, atomically.
    async fn apply_read_marker_sync(
        &self,
        account_id: &str,
        markers: &ReadMarkers,
    ) -> Result<(), AppError>;
    async fn clear_read_markers(&self, account_id: &str) -> Result<(), AppError>;
}
