use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::remote::{ExercisePayload, ExerciseRemote, ExerciseSnapshot};
use crate::application::ports::repositories::{ExerciseRepository, ExerciseSyncApply};
use crate::domain::entities::CustomExercise;
use crate::domain::value_objects::ExerciseId;
use crate::shared::error::AppError;

use super::resolver::{resolve, Decision, LocalState, RemoteState};
use super::{SyncOutcome, SyncParticipant};

/// Fetch-merge-push pass for custom exercises.
pub struct ExerciseSync {
    repo: Arc<dyn ExerciseRepository>,
    remote: Arc<dyn ExerciseRemote>,
}

impl ExerciseSync {
    pub fn new(repo: Arc<dyn ExerciseRepository>, remote: Arc<dyn ExerciseRemote>) -> Self {
        Self { repo, remote }
    }

    fn payload(exercise: &CustomExercise) -> ExercisePayload {
        ExercisePayload {
            name: exercise.name.clone(),
            category: exercise.category.clone(),
            notes: exercise.notes.clone(),
        }
    }

    async fn push(
        &self,
        mut local: CustomExercise,
        exists_remotely: bool,
        apply: &mut ExerciseSyncApply,
        outcome: &mut SyncOutcome,
    ) {
        let payload = Self::payload(&local);
        let result = if exists_remotely {
            self.remote.update(local.id.as_str(), payload).await
        } else {
            self.remote.create(local.id.as_str(), payload).await
        };
        match result {
            Ok(snapshot) => {
                local.apply_remote(
                    snapshot.name,
                    snapshot.category,
                    snapshot.notes,
                    snapshot.modify_date,
                );
                apply.upserts.push(local);
                outcome.pushed += 1;
            }
            Err(e) => {
                // Flags stay unsynced; the next pass retries this id.
                tracing::warn!(id = %local.id, error = %e, "exercise push failed");
                outcome.failed += 1;
            }
        }
    }

    async fn delete(
        &self,
        local: CustomExercise,
        exists_remotely: bool,
        apply: &mut ExerciseSyncApply,
        outcome: &mut SyncOutcome,
    ) {
        if exists_remotely {
            if let Err(e) = self.remote.delete(local.id.as_str()).await {
                tracing::warn!(id = %local.id, error = %e, "exercise delete failed");
                outcome.failed += 1;
                return;
            }
        }
        apply.deletes.push(local.id);
        outcome.deleted += 1;
    }
}

#[async_trait]
impl SyncParticipant for ExerciseSync {
    fn family(&self) -> &'static str {
        "custom_exercises"
    }

    async fn sync_account(&self, account_id: &str) -> Result<SyncOutcome, AppError> {
        // Tombstoned records are visited too.
        let locals = self.repo.get_all_exercises(account_id).await?;
        // A failed list aborts the whole pass before anything is touched.
        let snapshots = self.remote.list().await.map_err(AppError::from)?;

        let mut remote_map: HashMap<String, ExerciseSnapshot> = snapshots
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();

        let mut apply = ExerciseSyncApply::default();
        let mut outcome = SyncOutcome::default();

        for mut local in locals {
            let snapshot = remote_map.remove(local.id.as_str());
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
                            snapshot.name,
                            snapshot.category,
                            snapshot.notes,
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

        // Ids only the server knows.
        for (_, snapshot) in remote_map {
            match ExerciseId::new(snapshot.id.clone()) {
                Ok(id) => {
                    apply.upserts.push(CustomExercise::materialize(
                        id,
                        account_id.to_string(),
                        snapshot.name,
                        snapshot.category,
                        snapshot.notes,
                        snapshot.create_date,
                        snapshot.modify_date,
                    ));
                    outcome.pulled += 1;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping remote exercise with bad id");
                    outcome.failed += 1;
                }
            }
        }

        // Single commit per pass.
        self.repo.apply_exercise_sync(account_id, apply).await?;
        Ok(outcome)
    }
}
