use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{PhotoSlots, SlotPosition};

/// Numeric measurements a user can record for a program day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurements {
    pub weight: Option<f64>,
    pub pull_ups: Option<u32>,
    pub push_ups: Option<u32>,
    pub squats: Option<u32>,
}

impl Measurements {
    pub fn is_empty(&self) -> bool {
        self.weight.is_none()
            && self.pull_ups.is_none()
            && self.push_ups.is_none()
            && self.squats.is_none()
    }
}

/// One progress record per account and program day, carrying measurements
/// and the three photo slots. Photo mutations share the record's LWW clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub account_id: String,
    pub day: u32,
    pub measurements: Measurements,
    pub photos: PhotoSlots,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub is_synced: bool,
    pub should_delete: bool,
}

impl ProgressEntry {
    pub fn new(account_id: String, day: u32, measurements: Measurements) -> Self {
        let now = Utc::now();
        Self {
            account_id,
            day,
            measurements,
            photos: PhotoSlots::default(),
            created_at: now,
            last_modified: now,
            is_synced: false,
            should_delete: false,
        }
    }

    /// Materialize an entry first seen in a remote snapshot. Born synced.
    pub fn materialize(
        account_id: String,
        day: u32,
        measurements: Measurements,
        photo_urls: [Option<String>; 3],
        create_date: DateTime<Utc>,
        modify_date: DateTime<Utc>,
    ) -> Self {
        let mut photos = PhotoSlots::default();
        let [front, back, side] = photo_urls;
        photos.front.apply_remote_url(front);
        photos.back.apply_remote_url(back);
        photos.side.apply_remote_url(side);
        Self {
            account_id,
            day,
            measurements,
            photos,
            created_at: create_date,
            last_modified: modify_date,
            is_synced: true,
            should_delete: false,
        }
    }

    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
        self.is_synced = false;
    }

    pub fn set_measurements(&mut self, measurements: Measurements) {
        self.measurements = measurements;
        self.touch();
    }

    pub fn set_photo_data(&mut self, position: SlotPosition, data: Vec<u8>) {
        self.photos.slot_mut(position).set_photo_data(data);
        self.touch();
    }

    pub fn delete_photo_data(&mut self, position: SlotPosition) {
        self.photos.slot_mut(position).delete_photo_data();
        self.touch();
    }

    pub fn mark_deleted(&mut self) {
        self.should_delete = true;
        self.is_synced = false;
        self.last_modified = Utc::now();
    }

    pub fn mark_server_deleted(&mut self) {
        self.should_delete = true;
        self.is_synced = false;
    }

    /// Overwrite local state from a remote snapshot, photo URLs included.
    pub fn apply_remote(
        &mut self,
        measurements: Measurements,
        photo_urls: [Option<String>; 3],
        modify_date: DateTime<Utc>,
    ) {
        self.measurements = measurements;
        let [front, back, side] = photo_urls;
        self.photos.front.apply_remote_url(front);
        self.photos.back.apply_remote_url(back);
        self.photos.side.apply_remote_url(side);
        self.last_modified = self.last_modified.max(modify_date);
        self.is_synced = true;
        self.should_delete = false;
    }
}
