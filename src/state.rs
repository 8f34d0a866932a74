use std::sync::Arc;

use crate::application::ports::remote::{ExerciseRemote, ProgressRemote, ReadMarkerRemote};
use crate::application::services::sync_service::{
    ExerciseSync, ProgressSync, ReadMarkerSync, SyncParticipant,
};
use crate::application::services::{
    ExerciseService, ProgressService, ReadMarkerService, SyncService,
};
use crate::infrastructure::database::{ConnectionPool, Repository, SqliteRepository};
use crate::shared::config::AppConfig;
use crate::shared::error::AppError;

/// Fully wired application state: one store, the user-facing services and
/// the sync orchestrator. Host applications construct this once at startup
/// and hand it their remote client implementations.
pub struct AppState {
    pub repository: Arc<SqliteRepository>,
    pub exercises: ExerciseService,
    pub progress: ProgressService,
    pub read_markers: ReadMarkerService,
    pub sync: Arc<SyncService>,
}

impl AppState {
    pub async fn new(
        config: &AppConfig,
        exercise_remote: Arc<dyn ExerciseRemote>,
        progress_remote: Arc<dyn ProgressRemote>,
        read_marker_remote: Arc<dyn ReadMarkerRemote>,
    ) -> Result<Self, AppError> {
        let pool = ConnectionPool::with_max_connections(
            &config.database.url,
            config.database.max_connections,
        )
        .await?;
        let repository = Arc::new(SqliteRepository::new(pool));
        repository.initialize().await?;

        let participants: Vec<Arc<dyn SyncParticipant>> = vec![
            Arc::new(ExerciseSync::new(repository.clone(), exercise_remote)),
            Arc::new(ProgressSync::new(repository.clone(), progress_remote)),
            Arc::new(ReadMarkerSync::new(
                repository.clone(),
                read_marker_remote.clone(),
            )),
        ];
        let sync = Arc::new(SyncService::new(repository.clone(), participants));

        Ok(Self {
            exercises: ExerciseService::new(repository.clone()),
            progress: ProgressService::new(repository.clone()),
            read_markers: ReadMarkerService::new(repository.clone(), read_marker_remote),
            repository,
            sync,
        })
    }

    /// Kick off the periodic background sync for the account when the
    /// config enables it.
    pub fn start_auto_sync(&self, config: &AppConfig, account_id: &str) {
        if config.sync.auto_sync {
            self.sync
                .schedule_sync(account_id.to_string(), config.sync.sync_interval);
        }
    }
}
