use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ExerciseId;

/// A user-defined exercise, synced against the remote exercise list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomExercise {
    pub id: ExerciseId,
    pub account_id: String,
    pub name: String,
    pub category: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub is_synced: bool,
    pub should_delete: bool,
}

impl CustomExercise {
    pub fn new(account_id: String, name: String, category: String, notes: String) -> Self {
        let now = Utc::now();
        Self {
            id: ExerciseId::generate(),
            account_id,
            name,
            category,
            notes,
            created_at: now,
            last_modified: now,
            is_synced: false,
            should_delete: false,
        }
    }

    /// Materialize a record first seen in a remote snapshot. Born synced.
    #[allow(clippy::too_many_arguments)]
    pub fn materialize(
        id: ExerciseId,
        account_id: String,
        name: String,
        category: String,
        notes: String,
        create_date: DateTime<Utc>,
        modify_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            account_id,
            name,
            category,
            notes,
            created_at: create_date,
            last_modified: modify_date,
            is_synced: true,
            should_delete: false,
        }
    }

    /// Bump the local clock and drop the synced flag. Every local field
    /// mutation goes through this.
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
        self.is_synced = false;
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.touch();
    }

    pub fn update_details(&mut self, category: String, notes: String) {
        self.category = category;
        self.notes = notes;
        self.touch();
    }

    /// Local delete intent. The record stays in the store as a tombstone
    /// until a sync pass confirms the remote deletion.
    pub fn mark_deleted(&mut self) {
        self.should_delete = true;
        self.is_synced = false;
        self.last_modified = Utc::now();
    }

    /// The server no longer has this record; tombstone it locally.
    pub fn mark_server_deleted(&mut self) {
        self.should_delete = true;
        self.is_synced = false;
    }

    /// Overwrite local fields from a remote snapshot. The clock takes the
    /// max of the two sides so a stale remote date can never rewind it.
    pub fn apply_remote(
        &mut self,
        name: String,
        category: String,
        notes: String,
        modify_date: DateTime<Utc>,
    ) {
        self.name = name;
        self.category = category;
        self.notes = notes;
        self.last_modified = self.last_modified.max(modify_date);
        self.is_synced = true;
        self.should_delete = false;
    }
}
