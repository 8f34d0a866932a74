use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::ports::remote::{
    ExercisePayload, ExerciseRemote, ExerciseSnapshot, ProgressPayload, ProgressRemote,
    ProgressSnapshot, ReadMarkerRemote, RemoteError, RemoteResult,
};
use crate::application::ports::repositories::{
    AccountRepository, ExerciseRepository, ProgressRepository, ReadMarkerRepository,
};
use crate::domain::entities::{Account, CustomExercise, Measurements, ProgressEntry};
use crate::domain::value_objects::{PhotoSlot, SlotPosition};
use crate::infrastructure::database::{ConnectionPool, SqliteRepository};
use crate::shared::error::AppError;

use super::{ExerciseSync, ProgressSync, ReadMarkerSync, SyncOutcome, SyncParticipant, SyncService};

const ACCOUNT: &str = "acct-1";

async fn setup_repo() -> Arc<SqliteRepository> {
    let pool = ConnectionPool::from_memory().await.unwrap();
    pool.migrate().await.unwrap();
    let repo = SqliteRepository::new(pool);
    repo.create_account(&Account::new(ACCOUNT.to_string(), "Test User".to_string()))
        .await
        .unwrap();
    Arc::new(repo)
}

fn transport_err() -> RemoteError {
    RemoteError::Transport("connection reset".to_string())
}

/// In-memory exercise server with scriptable failures and a call log.
#[derive(Default)]
struct FakeExerciseRemote {
    snapshots: RwLock<HashMap<String, ExerciseSnapshot>>,
    fail_list: RwLock<bool>,
    fail_ids: RwLock<HashSet<String>>,
    calls: RwLock<Vec<String>>,
}

impl FakeExerciseRemote {
    async fn seed(&self, snapshot: ExerciseSnapshot) {
        self.snapshots
            .write()
            .await
            .insert(snapshot.id.clone(), snapshot);
    }

    async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    async fn apply(&self, id: &str, payload: ExercisePayload) -> RemoteResult<ExerciseSnapshot> {
        if self.fail_ids.read().await.contains(id) {
            return Err(transport_err());
        }
        let now = Utc::now();
        let mut snapshots = self.snapshots.write().await;
        let create_date = snapshots.get(id).map(|s| s.create_date).unwrap_or(now);
        let snapshot = ExerciseSnapshot {
            id: id.to_string(),
            name: payload.name,
            category: payload.category,
            notes: payload.notes,
            create_date,
            modify_date: now,
        };
        snapshots.insert(id.to_string(), snapshot.clone());
        Ok(snapshot)
    }
}

#[async_trait]
impl ExerciseRemote for FakeExerciseRemote {
    async fn list(&self) -> RemoteResult<Vec<ExerciseSnapshot>> {
        if *self.fail_list.read().await {
            return Err(transport_err());
        }
        Ok(self.snapshots.read().await.values().cloned().collect())
    }

    async fn create(&self, id: &str, payload: ExercisePayload) -> RemoteResult<ExerciseSnapshot> {
        self.calls.write().await.push(format!("create:{id}"));
        self.apply(id, payload).await
    }

    async fn update(&self, id: &str, payload: ExercisePayload) -> RemoteResult<ExerciseSnapshot> {
        self.calls.write().await.push(format!("update:{id}"));
        self.apply(id, payload).await
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        self.calls.write().await.push(format!("delete:{id}"));
        if self.fail_ids.read().await.contains(id) {
            return Err(transport_err());
        }
        self.snapshots.write().await.remove(id);
        Ok(())
    }
}

/// In-memory progress server; uploads get a CDN-style URL per slot.
#[derive(Default)]
struct FakeProgressRemote {
    snapshots: RwLock<HashMap<u32, ProgressSnapshot>>,
    fail_list: RwLock<bool>,
    fail_days: RwLock<HashSet<u32>>,
    fail_photo_deletes: RwLock<HashSet<(u32, SlotPosition)>>,
    photo_deletes: RwLock<Vec<(u32, SlotPosition)>>,
    calls: RwLock<Vec<String>>,
}

fn photo_url(day: u32, position: SlotPosition) -> String {
    format!("https://cdn.formtrack.test/{day}/{position}.jpg")
}

impl FakeProgressRemote {
    async fn seed(&self, snapshot: ProgressSnapshot) {
        self.snapshots.write().await.insert(snapshot.day, snapshot);
    }

    async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    async fn photo_deletes(&self) -> Vec<(u32, SlotPosition)> {
        self.photo_deletes.read().await.clone()
    }

    async fn apply(&self, day: u32, payload: ProgressPayload) -> RemoteResult<ProgressSnapshot> {
        if self.fail_days.read().await.contains(&day) {
            return Err(transport_err());
        }
        let now = Utc::now();
        let mut snapshots = self.snapshots.write().await;
        let previous = snapshots.get(&day);
        let mut snapshot = ProgressSnapshot {
            day,
            weight: payload.weight,
            pull_ups: payload.pull_ups,
            push_ups: payload.push_ups,
            squats: payload.squats,
            front_photo_url: previous.and_then(|s| s.front_photo_url.clone()),
            back_photo_url: previous.and_then(|s| s.back_photo_url.clone()),
            side_photo_url: previous.and_then(|s| s.side_photo_url.clone()),
            create_date: previous.map(|s| s.create_date).unwrap_or(now),
            modify_date: now,
        };
        for upload in &payload.photos {
            let url = Some(photo_url(day, upload.position));
            match upload.position {
                SlotPosition::Front => snapshot.front_photo_url = url,
                SlotPosition::Back => snapshot.back_photo_url = url,
                SlotPosition::Side => snapshot.side_photo_url = url,
            }
        }
        snapshots.insert(day, snapshot.clone());
        Ok(snapshot)
    }
}

#[async_trait]
impl ProgressRemote for FakeProgressRemote {
    async fn list(&self) -> RemoteResult<Vec<ProgressSnapshot>> {
        if *self.fail_list.read().await {
            return Err(transport_err());
        }
        Ok(self.snapshots.read().await.values().cloned().collect())
    }

    async fn create(&self, day: u32, payload: ProgressPayload) -> RemoteResult<ProgressSnapshot> {
        self.calls.write().await.push(format!("create:{day}"));
        self.apply(day, payload).await
    }

    async fn update(&self, day: u32, payload: ProgressPayload) -> RemoteResult<ProgressSnapshot> {
        self.calls.write().await.push(format!("update:{day}"));
        self.apply(day, payload).await
    }

    async fn delete(&self, day: u32) -> RemoteResult<()> {
        self.calls.write().await.push(format!("delete:{day}"));
        if self.fail_days.read().await.contains(&day) {
            return Err(transport_err());
        }
        self.snapshots.write().await.remove(&day);
        Ok(())
    }

    async fn delete_photo(&self, day: u32, slot: SlotPosition) -> RemoteResult<()> {
        self.photo_deletes.write().await.push((day, slot));
        if self.fail_photo_deletes.read().await.contains(&(day, slot)) {
            return Err(transport_err());
        }
        if let Some(snapshot) = self.snapshots.write().await.get_mut(&day) {
            match slot {
                SlotPosition::Front => snapshot.front_photo_url = None,
                SlotPosition::Back => snapshot.back_photo_url = None,
                SlotPosition::Side => snapshot.side_photo_url = None,
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct FakeReadMarkerRemote {
    days: RwLock<BTreeSet<u32>>,
    fail_list: RwLock<bool>,
    fail_days: RwLock<HashSet<u32>>,
}

#[async_trait]
impl ReadMarkerRemote for FakeReadMarkerRemote {
    async fn list(&self) -> RemoteResult<Vec<u32>> {
        if *self.fail_list.read().await {
            return Err(transport_err());
        }
        Ok(self.days.read().await.iter().copied().collect())
    }

    async fn set_read(&self, day: u32) -> RemoteResult<()> {
        if self.fail_days.read().await.contains(&day) {
            return Err(transport_err());
        }
        self.days.write().await.insert(day);
        Ok(())
    }

    async fn delete_all(&self) -> RemoteResult<()> {
        self.days.write().await.clear();
        Ok(())
    }
}

fn synced_exercise(name: &str, last_modified: DateTime<Utc>) -> CustomExercise {
    let mut exercise = CustomExercise::new(
        ACCOUNT.to_string(),
        name.to_string(),
        "strength".to_string(),
        String::new(),
    );
    exercise.is_synced = true;
    exercise.last_modified = last_modified;
    exercise
}

fn snapshot_for(exercise: &CustomExercise, modify_date: DateTime<Utc>) -> ExerciseSnapshot {
    ExerciseSnapshot {
        id: exercise.id.to_string(),
        name: exercise.name.clone(),
        category: exercise.category.clone(),
        notes: exercise.notes.clone(),
        create_date: exercise.created_at,
        modify_date,
    }
}

fn progress_snapshot(day: u32, pull_ups: u32, modify_date: DateTime<Utc>) -> ProgressSnapshot {
    ProgressSnapshot {
        day,
        weight: None,
        pull_ups: Some(pull_ups),
        push_ups: None,
        squats: None,
        front_photo_url: None,
        back_photo_url: None,
        side_photo_url: None,
        create_date: modify_date,
        modify_date,
    }
}

#[tokio::test]
async fn successful_push_marks_record_synced_with_server_fields() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeExerciseRemote::default());

    let exercise = CustomExercise::new(
        ACCOUNT.to_string(),
        "Weighted Dip".to_string(),
        "strength".to_string(),
        "Use the belt".to_string(),
    );
    repo.create_exercise(&exercise).await.unwrap();

    let sync = ExerciseSync::new(repo.clone(), remote.clone());
    let outcome = sync.sync_account(ACCOUNT).await.unwrap();

    assert_eq!(outcome.pushed, 1);
    assert_eq!(remote.calls().await, vec![format!("create:{}", exercise.id)]);

    let stored = repo.get_exercise(ACCOUNT, &exercise.id).await.unwrap().unwrap();
    assert!(stored.is_synced);
    assert_eq!(stored.name, "Weighted Dip");
    let server = remote.snapshots.read().await.get(exercise.id.as_str()).cloned().unwrap();
    // The store keeps millisecond precision.
    assert_eq!(
        stored.last_modified.timestamp_millis(),
        server.modify_date.timestamp_millis()
    );
}

#[tokio::test]
async fn tombstoned_record_is_removed_after_remote_delete() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeExerciseRemote::default());

    let mut exercise = synced_exercise("Burpee", Utc::now());
    remote.seed(snapshot_for(&exercise, exercise.last_modified)).await;
    exercise.mark_deleted();
    repo.create_exercise(&exercise).await.unwrap();

    let sync = ExerciseSync::new(repo.clone(), remote.clone());
    let outcome = sync.sync_account(ACCOUNT).await.unwrap();

    assert_eq!(outcome.deleted, 1);
    assert_eq!(remote.calls().await, vec![format!("delete:{}", exercise.id)]);
    assert!(repo.get_exercise(ACCOUNT, &exercise.id).await.unwrap().is_none());
}

#[tokio::test]
async fn failed_delete_keeps_tombstone_and_does_not_block_siblings() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeExerciseRemote::default());

    let mut doomed = synced_exercise("Burpee", Utc::now());
    remote.seed(snapshot_for(&doomed, doomed.last_modified)).await;
    doomed.mark_deleted();
    repo.create_exercise(&doomed).await.unwrap();
    remote.fail_ids.write().await.insert(doomed.id.to_string());

    let sibling = CustomExercise::new(
        ACCOUNT.to_string(),
        "Pistol Squat".to_string(),
        "legs".to_string(),
        String::new(),
    );
    repo.create_exercise(&sibling).await.unwrap();

    let sync = ExerciseSync::new(repo.clone(), remote.clone());
    let outcome = sync.sync_account(ACCOUNT).await.unwrap();

    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.pushed, 1);

    // The tombstone survives for the next pass.
    let stored = repo.get_exercise(ACCOUNT, &doomed.id).await.unwrap().unwrap();
    assert!(stored.should_delete);
    assert!(!stored.is_synced);

    // The sibling push went through regardless.
    let stored = repo.get_exercise(ACCOUNT, &sibling.id).await.unwrap().unwrap();
    assert!(stored.is_synced);
}

#[tokio::test]
async fn newer_remote_snapshot_overwrites_synced_local() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeProgressRemote::default());

    let mut entry = ProgressEntry::new(
        ACCOUNT.to_string(),
        12,
        Measurements {
            pull_ups: Some(10),
            ..Measurements::default()
        },
    );
    entry.is_synced = true;
    entry.last_modified = Utc::now() - Duration::hours(1);
    repo.upsert_entry(&entry).await.unwrap();

    remote.seed(progress_snapshot(12, 15, Utc::now())).await;

    let sync = ProgressSync::new(repo.clone(), remote.clone());
    let outcome = sync.sync_account(ACCOUNT).await.unwrap();

    assert_eq!(outcome.pulled, 1);
    assert!(remote.calls().await.is_empty());
    let stored = repo.get_entry(ACCOUNT, 12).await.unwrap().unwrap();
    assert_eq!(stored.measurements.pull_ups, Some(15));
    assert!(stored.is_synced);
}

#[tokio::test]
async fn older_remote_snapshot_leaves_synced_local_untouched() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeProgressRemote::default());

    let mut entry = ProgressEntry::new(
        ACCOUNT.to_string(),
        12,
        Measurements {
            pull_ups: Some(10),
            ..Measurements::default()
        },
    );
    entry.is_synced = true;
    repo.upsert_entry(&entry).await.unwrap();

    remote
        .seed(progress_snapshot(12, 15, entry.last_modified - Duration::hours(1)))
        .await;

    let sync = ProgressSync::new(repo.clone(), remote.clone());
    sync.sync_account(ACCOUNT).await.unwrap();

    let stored = repo.get_entry(ACCOUNT, 12).await.unwrap().unwrap();
    assert_eq!(stored.measurements.pull_ups, Some(10));
    assert_eq!(
        stored.last_modified.timestamp_millis(),
        entry.last_modified.timestamp_millis()
    );
}

#[tokio::test]
async fn unsynced_edits_push_instead_of_adopting_older_remote() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeProgressRemote::default());

    remote
        .seed(progress_snapshot(3, 8, Utc::now() - Duration::hours(2)))
        .await;

    let entry = ProgressEntry::new(
        ACCOUNT.to_string(),
        3,
        Measurements {
            pull_ups: Some(11),
            ..Measurements::default()
        },
    );
    repo.upsert_entry(&entry).await.unwrap();

    let sync = ProgressSync::new(repo.clone(), remote.clone());
    let outcome = sync.sync_account(ACCOUNT).await.unwrap();

    assert_eq!(outcome.pushed, 1);
    assert_eq!(remote.calls().await, vec!["update:3".to_string()]);
    let stored = repo.get_entry(ACCOUNT, 3).await.unwrap().unwrap();
    assert_eq!(stored.measurements.pull_ups, Some(11));
    assert!(stored.is_synced);
}

#[tokio::test]
async fn previously_synced_record_missing_remotely_is_tombstoned() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeExerciseRemote::default());

    let exercise = synced_exercise("Burpee", Utc::now());
    repo.create_exercise(&exercise).await.unwrap();

    let sync = ExerciseSync::new(repo.clone(), remote.clone());
    sync.sync_account(ACCOUNT).await.unwrap();

    let stored = repo.get_exercise(ACCOUNT, &exercise.id).await.unwrap().unwrap();
    assert!(stored.should_delete);
    assert!(!stored.is_synced);
    // Not physically deleted this pass.
    assert_eq!(repo.get_all_exercises(ACCOUNT).await.unwrap().len(), 1);
}

#[tokio::test]
async fn remote_only_record_is_materialized_locally() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeExerciseRemote::default());

    remote
        .seed(ExerciseSnapshot {
            id: "srv-1".to_string(),
            name: "Ring Row".to_string(),
            category: "pull".to_string(),
            notes: String::new(),
            create_date: Utc::now(),
            modify_date: Utc::now(),
        })
        .await;

    let sync = ExerciseSync::new(repo.clone(), remote.clone());
    let outcome = sync.sync_account(ACCOUNT).await.unwrap();

    assert_eq!(outcome.pulled, 1);
    let all = repo.get_all_exercises(ACCOUNT).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Ring Row");
    assert!(all[0].is_synced);
}

#[tokio::test]
async fn failed_list_aborts_the_pass_without_local_mutation() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeExerciseRemote::default());
    *remote.fail_list.write().await = true;

    let exercise = CustomExercise::new(
        ACCOUNT.to_string(),
        "Burpee".to_string(),
        String::new(),
        String::new(),
    );
    repo.create_exercise(&exercise).await.unwrap();

    let sync = ExerciseSync::new(repo.clone(), remote.clone());
    let result = sync.sync_account(ACCOUNT).await;

    assert!(matches!(result, Err(AppError::Network(_))));
    assert!(remote.calls().await.is_empty());
    let stored = repo.get_exercise(ACCOUNT, &exercise.id).await.unwrap().unwrap();
    assert!(!stored.is_synced);
    assert_eq!(
        stored.last_modified.timestamp_millis(),
        exercise.last_modified.timestamp_millis()
    );
}

#[tokio::test]
async fn photo_upload_rides_the_update_payload() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeProgressRemote::default());

    remote.seed(progress_snapshot(5, 10, Utc::now())).await;
    let mut entry = ProgressEntry::new(
        ACCOUNT.to_string(),
        5,
        Measurements {
            pull_ups: Some(10),
            ..Measurements::default()
        },
    );
    entry.set_photo_data(SlotPosition::Front, vec![0xFF, 0xD8]);
    repo.upsert_entry(&entry).await.unwrap();

    let sync = ProgressSync::new(repo.clone(), remote.clone());
    sync.sync_account(ACCOUNT).await.unwrap();

    assert_eq!(remote.calls().await, vec!["update:5".to_string()]);
    assert!(remote.photo_deletes().await.is_empty());
    let stored = repo.get_entry(ACCOUNT, 5).await.unwrap().unwrap();
    assert_eq!(
        stored.photos.front.url(),
        Some(photo_url(5, SlotPosition::Front).as_str())
    );
    assert!(stored.is_synced);
}

#[tokio::test]
async fn pending_delete_on_one_slot_does_not_suppress_the_update() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeProgressRemote::default());

    let mut snapshot = progress_snapshot(5, 10, Utc::now());
    snapshot.back_photo_url = Some(photo_url(5, SlotPosition::Back));
    remote.seed(snapshot).await;

    let mut entry = ProgressEntry::new(
        ACCOUNT.to_string(),
        5,
        Measurements {
            pull_ups: Some(10),
            ..Measurements::default()
        },
    );
    entry.photos.back = PhotoSlot::Remote {
        url: photo_url(5, SlotPosition::Back),
    };
    entry.delete_photo_data(SlotPosition::Back);
    entry.set_photo_data(SlotPosition::Front, vec![1, 2, 3]);
    repo.upsert_entry(&entry).await.unwrap();

    let sync = ProgressSync::new(repo.clone(), remote.clone());
    sync.sync_account(ACCOUNT).await.unwrap();

    // Delete for the back slot, then the update still carried the front upload.
    assert_eq!(remote.photo_deletes().await, vec![(5, SlotPosition::Back)]);
    assert_eq!(remote.calls().await, vec!["update:5".to_string()]);

    let stored = repo.get_entry(ACCOUNT, 5).await.unwrap().unwrap();
    assert_eq!(stored.photos.back, PhotoSlot::Empty);
    assert_eq!(
        stored.photos.front.url(),
        Some(photo_url(5, SlotPosition::Front).as_str())
    );
    assert!(stored.is_synced);
}

#[tokio::test]
async fn same_slot_replace_coalesces_into_one_upload() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeProgressRemote::default());

    let mut snapshot = progress_snapshot(5, 10, Utc::now());
    snapshot.front_photo_url = Some(photo_url(5, SlotPosition::Front));
    remote.seed(snapshot).await;

    let mut entry = ProgressEntry::new(
        ACCOUNT.to_string(),
        5,
        Measurements {
            pull_ups: Some(10),
            ..Measurements::default()
        },
    );
    entry.photos.front = PhotoSlot::Remote {
        url: photo_url(5, SlotPosition::Front),
    };
    // Delete then replace on the same slot within one pass.
    entry.delete_photo_data(SlotPosition::Front);
    entry.set_photo_data(SlotPosition::Front, vec![9, 9, 9]);
    repo.upsert_entry(&entry).await.unwrap();

    let sync = ProgressSync::new(repo.clone(), remote.clone());
    sync.sync_account(ACCOUNT).await.unwrap();

    // No delete call for the slot: the replace became a single upload.
    assert!(remote.photo_deletes().await.is_empty());
    assert_eq!(remote.calls().await, vec!["update:5".to_string()]);
    let stored = repo.get_entry(ACCOUNT, 5).await.unwrap().unwrap();
    assert!(stored.photos.front.url().is_some());
    assert!(stored.is_synced);
}

#[tokio::test]
async fn replaced_then_deleted_photo_still_deletes_remotely() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeProgressRemote::default());

    let mut snapshot = progress_snapshot(5, 10, Utc::now());
    snapshot.front_photo_url = Some(photo_url(5, SlotPosition::Front));
    remote.seed(snapshot).await;

    let mut entry = ProgressEntry::new(
        ACCOUNT.to_string(),
        5,
        Measurements {
            pull_ups: Some(10),
            ..Measurements::default()
        },
    );
    entry.photos.front = PhotoSlot::Remote {
        url: photo_url(5, SlotPosition::Front),
    };
    // Replace the remote photo, then delete it again before sync.
    entry.set_photo_data(SlotPosition::Front, vec![9, 9]);
    entry.delete_photo_data(SlotPosition::Front);
    repo.upsert_entry(&entry).await.unwrap();

    let sync = ProgressSync::new(repo.clone(), remote.clone());
    sync.sync_account(ACCOUNT).await.unwrap();

    // The server still held the old object, so a delete went out and the
    // slot did not pick the stale URL back up from the snapshot.
    assert_eq!(remote.photo_deletes().await, vec![(5, SlotPosition::Front)]);
    assert_eq!(remote.calls().await, vec!["update:5".to_string()]);
    let stored = repo.get_entry(ACCOUNT, 5).await.unwrap().unwrap();
    assert_eq!(stored.photos.front, PhotoSlot::Empty);
    assert!(stored.is_synced);
    let server = remote.snapshots.read().await.get(&5).cloned().unwrap();
    assert_eq!(server.front_photo_url, None);
}

#[tokio::test]
async fn failed_photo_delete_keeps_entry_unsynced_for_retry() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeProgressRemote::default());

    let mut snapshot = progress_snapshot(5, 10, Utc::now());
    snapshot.back_photo_url = Some(photo_url(5, SlotPosition::Back));
    remote.seed(snapshot).await;
    remote
        .fail_photo_deletes
        .write()
        .await
        .insert((5, SlotPosition::Back));

    let mut entry = ProgressEntry::new(
        ACCOUNT.to_string(),
        5,
        Measurements {
            pull_ups: Some(10),
            ..Measurements::default()
        },
    );
    entry.photos.back = PhotoSlot::Remote {
        url: photo_url(5, SlotPosition::Back),
    };
    entry.delete_photo_data(SlotPosition::Back);
    repo.upsert_entry(&entry).await.unwrap();

    let sync = ProgressSync::new(repo.clone(), remote.clone());
    let outcome = sync.sync_account(ACCOUNT).await.unwrap();

    assert_eq!(outcome.failed, 1);
    // The update still went out; only the photo delete is retried.
    assert_eq!(remote.calls().await, vec!["update:5".to_string()]);
    let stored = repo.get_entry(ACCOUNT, 5).await.unwrap().unwrap();
    assert!(stored.photos.back.is_pending_delete());
    assert!(!stored.is_synced);
}

#[tokio::test]
async fn read_marker_sync_unions_remote_and_pushed_days() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeReadMarkerRemote::default());

    repo.apply_read_marker_sync(
        ACCOUNT,
        &crate::domain::entities::ReadMarkers::new(
            [1].into_iter().collect(),
            [5, 7].into_iter().collect(),
        ),
    )
    .await
    .unwrap();
    remote.days.write().await.extend([1, 2]);
    remote.fail_days.write().await.insert(7);

    let sync = ReadMarkerSync::new(repo.clone(), remote.clone());
    let outcome = sync.sync_account(ACCOUNT).await.unwrap();

    assert_eq!(outcome.failed, 1);
    let markers = repo.get_read_markers(ACCOUNT).await.unwrap();
    assert_eq!(markers.confirmed, [1, 2, 5].into_iter().collect());
    assert_eq!(markers.pending, [7].into_iter().collect());
    assert!(markers.is_read(7));
}

#[tokio::test]
async fn read_marker_list_failure_leaves_pending_untouched() {
    let repo = setup_repo().await;
    let remote = Arc::new(FakeReadMarkerRemote::default());
    *remote.fail_list.write().await = true;

    repo.add_pending_read_marker(ACCOUNT, 5).await.unwrap();

    let sync = ReadMarkerSync::new(repo.clone(), remote.clone());
    let result = sync.sync_account(ACCOUNT).await;

    assert!(matches!(result, Err(AppError::Network(_))));
    let markers = repo.get_read_markers(ACCOUNT).await.unwrap();
    assert!(markers.pending.contains(&5));
    assert!(markers.confirmed.is_empty());
}

struct FailingParticipant;

#[async_trait]
impl SyncParticipant for FailingParticipant {
    fn family(&self) -> &'static str {
        "failing"
    }

    async fn sync_account(&self, _account_id: &str) -> Result<SyncOutcome, AppError> {
        Err(AppError::Network("listing failed".to_string()))
    }
}

#[tokio::test]
async fn orchestrator_rejects_missing_account_before_any_sync() {
    let repo = setup_repo().await;
    let service = SyncService::new(repo.clone(), vec![Arc::new(FailingParticipant)]);

    let result = service.sync_account("nobody").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    // Nothing ran, so no error was counted either.
    assert_eq!(service.get_status().await.sync_errors, 0);
}

#[tokio::test]
async fn orchestrator_swallows_participant_failures() {
    let repo = setup_repo().await;
    let service = SyncService::new(repo.clone(), vec![Arc::new(FailingParticipant)]);

    let report = service.sync_account(ACCOUNT).await.unwrap();

    assert_eq!(report.failed_families, 1);
    let status = service.get_status().await;
    assert_eq!(status.sync_errors, 1);
    assert!(!status.is_syncing);
    assert!(status.last_sync.is_some());
}

#[tokio::test]
async fn orchestrator_runs_all_families() {
    let repo = setup_repo().await;
    let exercise_remote = Arc::new(FakeExerciseRemote::default());
    let progress_remote = Arc::new(FakeProgressRemote::default());
    let marker_remote = Arc::new(FakeReadMarkerRemote::default());

    let service = SyncService::new(
        repo.clone(),
        vec![
            Arc::new(ExerciseSync::new(repo.clone(), exercise_remote)),
            Arc::new(ProgressSync::new(repo.clone(), progress_remote)),
            Arc::new(ReadMarkerSync::new(repo.clone(), marker_remote)),
        ],
    );

    let report = service.sync_account(ACCOUNT).await.unwrap();
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.failed_families, 0);
}
