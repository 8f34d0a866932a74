use chrono::{DateTime, Utc};

/// Sync-relevant flags of a local record, independent of entity family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalState {
    pub is_synced: bool,
    pub should_delete: bool,
    pub last_modified: DateTime<Utc>,
}

impl LocalState {
    pub fn of(is_synced: bool, should_delete: bool, last_modified: DateTime<Utc>) -> Self {
        Self {
            is_synced,
            should_delete,
            last_modified,
        }
    }
}

/// Sync-relevant part of a remote snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteState {
    pub modify_date: DateTime<Utc>,
}

impl RemoteState {
    pub fn of(modify_date: DateTime<Utc>) -> Self {
        Self { modify_date }
    }
}

/// What a sync pass does for one id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Local delete intent wins over any remote state: delete remotely,
    /// then remove the local record.
    DeleteRemoteAndLocal,
    /// Remote record with no local counterpart: materialize it locally.
    CreateFromRemote,
    /// A previously-synced record vanished from the server: tombstone it
    /// locally; physical removal happens on a later pass.
    TombstoneLocal,
    /// Pending local edits: create or update remotely, then adopt the
    /// server-confirmed state.
    PushLocal,
    /// Remote is newer: overwrite local fields.
    KeepRemote,
    /// Local is current or newer (ties favor local): nothing to do.
    KeepLocal,
    /// Neither side has the record.
    NoOp,
}

/// Last-write-wins resolution for one id. Rules apply in order:
///
/// 1. A local tombstone always deletes, even against a newer remote update
///    (no resurrect-on-conflict).
/// 2. Remote-only records are pulled down.
/// 3. Local-only records split on sync history: a confirmed-synced record
///    was deleted server-side and is tombstoned; a never-confirmed record
///    is a pending local creation and is pushed, not discarded.
/// 4. Unsynced local edits are pushed before any remote state is read.
/// 5. Otherwise compare clocks; the later modification wins and ties keep
///    local.
pub fn resolve(local: Option<LocalState>, remote: Option<RemoteState>) -> Decision {
    match (local, remote) {
        (Some(local), _) if local.should_delete => Decision::DeleteRemoteAndLocal,
        (None, Some(_)) => Decision::CreateFromRemote,
        (Some(local), None) => {
            if local.is_synced {
                Decision::TombstoneLocal
            } else {
                Decision::PushLocal
            }
        }
        (Some(local), Some(_)) if !local.is_synced => Decision::PushLocal,
        (Some(local), Some(remote)) => {
            if remote.modify_date > local.last_modified {
                Decision::KeepRemote
            } else {
                Decision::KeepLocal
            }
        }
        (None, None) => Decision::NoOp,
    }
}
