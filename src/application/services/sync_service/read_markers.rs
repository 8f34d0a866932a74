use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::application::ports::remote::ReadMarkerRemote;
use crate::application::ports::repositories::ReadMarkerRepository;
use crate::shared::error::AppError;

use super::{SyncOutcome, SyncParticipant};

/// Push-then-union pass for read-post markers. Read state is monotonic, so
/// this is the reduced form of the resolver: no tombstones, no LWW clock —
/// just the union of the remote set and the successfully pushed days.
pub struct ReadMarkerSync {
    repo: Arc<dyn ReadMarkerRepository>,
    remote: Arc<dyn ReadMarkerRemote>,
}

impl ReadMarkerSync {
    pub fn new(repo: Arc<dyn ReadMarkerRepository>, remote: Arc<dyn ReadMarkerRemote>) -> Self {
        Self { repo, remote }
    }
}

#[async_trait]
impl SyncParticipant for ReadMarkerSync {
    fn family(&self) -> &'static str {
        "read_markers"
    }

    async fn sync_account(&self, account_id: &str) -> Result<SyncOutcome, AppError> {
        let mut markers = self.repo.get_read_markers(account_id).await?;
        let remote_days: BTreeSet<u32> = self
            .remote
            .list()
            .await
            .map_err(AppError::from)?
            .into_iter()
            .collect();

        let mut outcome = SyncOutcome::default();
        let mut pushed = BTreeSet::new();

        for day in markers.pending.clone() {
            if remote_days.contains(&day) {
                // The server already knows; nothing to push.
                pushed.insert(day);
                continue;
            }
            match self.remote.set_read(day).await {
                Ok(()) => {
                    pushed.insert(day);
                    outcome.pushed += 1;
                }
                Err(e) => {
                    // Stays pending for the next pass.
                    tracing::warn!(day, error = %e, "read-marker push failed");
                    outcome.failed += 1;
                }
            }
        }

        outcome.pulled = remote_days.difference(&markers.confirmed).count() as u32;
        markers.absorb_sync(remote_days, &pushed);
        self.repo.apply_read_marker_sync(account_id, &markers).await?;
        Ok(outcome)
    }
}
