use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::application::ports::repositories::AccountRepository;
use crate::shared::error::AppError;

pub mod exercises;
pub mod progress;
pub mod read_markers;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use exercises::ExerciseSync;
pub use progress::ProgressSync;
pub use read_markers::ReadMarkerSync;
pub use resolver::{resolve, Decision, LocalState, RemoteState};

/// Counts of what one pass did for one entity family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SyncOutcome {
    pub pushed: u32,
    pub pulled: u32,
    pub deleted: u32,
    pub failed: u32,
}

/// One entity family's fetch-merge-push pass.
#[async_trait]
pub trait SyncParticipant: Send + Sync {
    fn family(&self) -> &'static str;
    async fn sync_account(&self, account_id: &str) -> Result<SyncOutcome, AppError>;
}

/// Observable sync state. Deliberately carries no error message: transport
/// failures during sync are silent and retried on the next pass, so the UI
/// never shows them.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SyncStatus {
    pub is_syncing: bool,
    pub last_sync: Option<i64>,
    pub sync_errors: u32,
}

/// Per-family outcomes of one orchestrated pass.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub outcomes: Vec<(&'static str, SyncOutcome)>,
    pub failed_families: u32,
}

/// Orchestrates one sync pass across all entity families for one account.
/// Passes are serialized: a new pass waits until the previous one has
/// committed its decisions.
pub struct SyncService {
    accounts: Arc<dyn AccountRepository>,
    participants: Vec<Arc<dyn SyncParticipant>>,
    status: Arc<RwLock<SyncStatus>>,
    pass_lock: Arc<Mutex<()>>,
}

impl SyncService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        participants: Vec<Arc<dyn SyncParticipant>>,
    ) -> Self {
        Self {
            accounts,
            participants,
            status: Arc::new(RwLock::new(SyncStatus::default())),
            pass_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Run one pass for the account. Raises only when the account itself is
    /// missing; any per-family failure (including an aborted fetch) is
    /// logged, counted and left for the next pass.
    pub async fn sync_account(&self, account_id: &str) -> Result<SyncReport, AppError> {
        self.accounts
            .get_account(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No local account {account_id}")))?;

        let _pass = self.pass_lock.lock().await;
        {
            let mut status = self.status.write().await;
            status.is_syncing = true;
        }

        let mut report = SyncReport::default();
        for participant in &self.participants {
            match participant.sync_account(account_id).await {
                Ok(outcome) => {
                    tracing::debug!(
                        family = participant.family(),
                        pushed = outcome.pushed,
                        pulled = outcome.pulled,
                        deleted = outcome.deleted,
                        failed = outcome.failed,
                        "sync pass finished"
                    );
                    report.outcomes.push((participant.family(), outcome));
                }
                Err(e) => {
                    tracing::warn!(family = participant.family(), error = %e, "sync pass failed");
                    report.failed_families += 1;
                    let mut status = self.status.write().await;
                    status.sync_errors += 1;
                }
            }
        }

        let mut status = self.status.write().await;
        status.is_syncing = false;
        status.last_sync = Some(chrono::Utc::now().timestamp());

        Ok(report)
    }

    pub async fn get_status(&self) -> SyncStatus {
        self.status.read().await.clone()
    }

    /// Re-run the pass on a fixed interval. Errors only count; nothing is
    /// surfaced.
    pub fn schedule_sync(self: &Arc<Self>, account_id: String, interval_secs: u64) {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(tokio::time::Duration::from_secs(interval_secs));

            loop {
                interval.tick().await;

                if let Err(e) = service.sync_account(&account_id).await {
                    tracing::error!("Scheduled sync error: {}", e);
                    let mut status = service.status.write().await;
                    status.sync_errors += 1;
                }
            }
        });
    }
}
