use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::remote::{
    PhotoUpload, ProgressPayload, ProgressRemote, ProgressSnapshot,
};
use crate::application::ports::repositories::{ProgressRepository, ProgressSyncApply};
use crate::domain::entities::{Measurements, ProgressEntry};
use crate::domain::value_objects::SlotPosition;
use crate::shared::error::AppError;

use super::resolver::{resolve, Decision, LocalState, RemoteState};
use super::{SyncOutcome, SyncParticipant};

/// Fetch-merge-push pass for progress entries, including the per-slot photo
/// lifecycle.
pub struct ProgressSync {
    repo: Arc<dyn ProgressRepository>,
    remote: Arc<dyn ProgressRemote>,
}

fn snapshot_measurements(snapshot: &ProgressSnapshot) -> Measurements {
    Measurements {
        weight: snapshot.weight,
        pull_ups: snapshot.pull_ups,
        push_ups: snapshot.push_ups,
        squats: snapshot.squats,
    }
}

impl ProgressSync {
    pub fn new(repo: Arc<dyn ProgressRepository>, remote: Arc<dyn ProgressRemote>) -> Self {
        Self { repo, remote }
    }

    fn payload(entry: &ProgressEntry) -> ProgressPayload {
        ProgressPayload {
            weight: entry.measurements.weight,
            pull_ups: entry.measurements.pull_ups,
            push_ups: entry.measurements.push_ups,
            squats: entry.measurements.squats,
            photos: entry
                .photos
                .pending_uploads()
                .into_iter()
                .map(|(position, data)| PhotoUpload { position, data })
                .collect(),
        }
    }

    /// Push one entry: per-slot photo deletes first, then the create/update
    /// carrying scalars plus pending uploads. A same-slot delete+replace
    /// never reaches here as two operations — replacing a pending-delete
    /// slot collapses it into a single pending upload — and a pending
    /// delete on one slot never suppresses the update itself.
    async fn push(
        &self,
        mut entry: ProgressEntry,
        exists_remotely: bool,
        apply: &mut ProgressSyncApply,
        outcome: &mut SyncOutcome,
    ) {
        let mut slots_dirty = false;
        let mut delete_failed = false;

        for position in entry.photos.pending_deletes() {
            match self.remote.delete_photo(entry.day, position).await {
                Ok(()) => {
                    entry.photos.slot_mut(position).confirm_delete();
                    slots_dirty = true;
                }
                Err(e) => {
                    tracing::warn!(day = entry.day, slot = %position, error = %e,
                        "photo delete failed");
                    outcome.failed += 1;
                    delete_failed = true;
                }
            }
        }

        let payload = Self::payload(&entry);
        let result = if exists_remotely {
            self.remote.update(entry.day, payload).await
        } else {
            self.remote.create(entry.day, payload).await
        };

        match result {
            Ok(snapshot) => {
                entry.measurements = snapshot_measurements(&snapshot);
                let urls = snapshot.photo_urls();
                for (position, url) in SlotPosition::ALL.into_iter().zip(urls) {
                    let slot = entry.photos.slot_mut(position);
                    if slot.is_pending_upload() {
                        match url {
                            // Server confirmed the upload.
                            Some(url) => slot.confirm_upload(url),
                            // No URL came back; keep the bytes for retry.
                            None => {}
                        }
                    } else if !slot.is_pending_delete() {
                        slot.apply_remote_url(url);
                    }
                    // A slot whose delete failed stays tombstoned for retry.
                }
                entry.last_modified = entry.last_modified.max(snapshot.modify_date);
                entry.should_delete = false;
                entry.is_synced = !delete_failed
                    && entry.photos.pending_uploads().is_empty()
                    && entry.photos.pending_deletes().is_empty();
                apply.upserts.push(entry);
                outcome.pushed += 1;
            }
            Err(e) => {
                tracing::warn!(day = entry.day, error = %e, "progress push failed");
                outcome.failed += 1;
                // Persist confirmed photo deletes even when the update
                // failed; the entry itself stays unsynced for retry.
                if slots_dirty {
                    apply.upserts.push(entry);
                }
            }
        }
    }

    async fn delete(
        &self,
        entry: ProgressEntry,
        exists_remotely: bool,
        apply: &mut ProgressSyncApply,
        outcome: &mut SyncOutcome,
    ) {
        if exists_remotely {
            if let Err(e) = self.remote.delete(entry.day).await {
                tracing::warn!(day = entry.day, error = %e, "progress delete failed");
                outcome.failed += 1;
                return;
            }
        }
        apply.deletes.push(entry.day);
        outcome.deleted += 1;
    }
}

#[async_trait]
impl SyncParticipant for ProgressSync {
    fn family(&self) -> &'static str {
        "progress_entries"
    }

    async fn sync_account(&self, account_id: &str) -> Result<SyncOutcome, AppError> {
        let locals = self.repo.get_all_entries(account_id).await?;
        let snapshots = self.remote.list().await.map_err(AppError::from)?;

        let mut remote_map: HashMap<u32, ProgressSnapshot> =
            snapshots.into_iter().map(|s| (s.day, s)).collect();

        let mut apply = ProgressSyncApply::default();
        let mut outcome = SyncOutcome::default();

        for mut local in locals {
            let snapshot = remote_map.remove(&local.day);
            let decision = resolve(
                Some(LocalState::of(
                    local.is_synced,
                    local.should_delete,
                    local.last_modified,
                )),
                snapshot.as_ref().map(|s| RemoteState::of(s.modify_date)),
            );

            match decision {
                Decision::DeleteRemoteAndLocal => {
                    self.delete(local, snapshot.is_some(), &mut apply, &mut outcome)
                        .await;
                }
                Decision::PushLocal => {
                    self.push(local, snapshot.is_some(), &mut apply, &mut outcome)
                        .await;
                }
                Decision::KeepRemote => {
                    if let Some(snapshot) = snapshot {
                        local.apply_remote(
                            snapshot_measurements(&snapshot),
                            snapshot.photo_urls(),
                            snapshot.modify_date,
                        );
                        apply.upserts.push(local);
                        outcome.pulled += 1;
                    }
                }
                Decision::TombstoneLocal => {
                    local.mark_server_deleted();
                    apply.upserts.push(local);
                }
                Decision::KeepLocal | Decision::NoOp | Decision::CreateFromRemote => {}
            }
        }

        for (day, snapshot) in remote_map {
            apply.upserts.push(ProgressEntry::materialize(
                account_id.to_string(),
                day,
                snapshot_measurements(&snapshot),
                snapshot.photo_urls(),
                snapshot.create_date,
                snapshot.modify_date,
            ));
            outcome.pulled += 1;
        }

        self.repo.apply_progress_sync(account_id, apply).await?;
        Ok(outcome)
    }
}
