use serde::{Deserialize, Serialize};

use super::slot::SlotPosition;

/// Attachment state of a single photo slot.
///
/// Exactly one variant holds at any time, so "has a URL", "has bytes waiting
/// for upload" and "waiting for remote delete" are mutually exclusive by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PhotoSlot {
    #[default]
    Empty,
    Remote {
        url: String,
    },
    PendingUpload {
        data: Vec<u8>,
        /// True when these bytes replace a photo the server still holds;
        /// deleting such a slot must still queue a remote delete.
        replaces_remote: bool,
    },
    PendingDelete,
}

impl PhotoSlot {
    /// Local user action: attach new photo bytes.
    ///
    /// A pending delete is superseded by the new upload intent, so a
    /// delete-then-replace on the same slot collapses into a single upload.
    /// The slot remembers whether a remote object is being replaced.
    pub fn set_photo_data(&mut self, data: Vec<u8>) {
        let replaces_remote = match self {
            PhotoSlot::Remote { .. } | PhotoSlot::PendingDelete => true,
            PhotoSlot::PendingUpload { replaces_remote, .. } => *replaces_remote,
            PhotoSlot::Empty => false,
        };
        *self = PhotoSlot::PendingUpload {
            data,
            replaces_remote,
        };
    }

    /// Local user action: remove the photo.
    ///
    /// Only bytes that never had a remote counterpart revert straight to
    /// `Empty`; anything the server still holds queues a delete, including
    /// a pending upload that replaced a remote photo.
    pub fn delete_photo_data(&mut self) {
        *self = match self {
            PhotoSlot::Remote { .. } | PhotoSlot::PendingDelete => PhotoSlot::PendingDelete,
            PhotoSlot::PendingUpload {
                replaces_remote: true,
                ..
            } => PhotoSlot::PendingDelete,
            PhotoSlot::PendingUpload {
                replaces_remote: false,
                ..
            }
            | PhotoSlot::Empty => PhotoSlot::Empty,
        };
    }

    /// Sync outcome: the upload was accepted and the server returned a URL.
    pub fn confirm_upload(&mut self, url: String) {
        *self = PhotoSlot::Remote { url };
    }

    /// Sync outcome: the remote delete succeeded.
    pub fn confirm_delete(&mut self) {
        *self = PhotoSlot::Empty;
    }

    /// Overwrite from a remote snapshot (absent URL means no photo).
    pub fn apply_remote_url(&mut self, url: Option<String>) {
        *self = match url {
            Some(url) => PhotoSlot::Remote { url },
            None => PhotoSlot::Empty,
        };
    }

    pub fn is_pending_upload(&self) -> bool {
        matches!(self, PhotoSlot::PendingUpload { .. })
    }

    pub fn is_pending_delete(&self) -> bool {
        matches!(self, PhotoSlot::PendingDelete)
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            PhotoSlot::Remote { url } => Some(url),
            _ => None,
        }
    }
}

/// The three fixed slots of a progress entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhotoSlots {
    pub front: PhotoSlot,
    pub back: PhotoSlot,
    pub side: PhotoSlot,
}

impl PhotoSlots {
    pub fn slot(&self, position: SlotPosition) -> &PhotoSlot {
        match position {
            SlotPosition::Front => &self.front,
            SlotPosition::Back => &self.back,
            SlotPosition::Side => &self.side,
        }
    }

    pub fn slot_mut(&mut self, position: SlotPosition) -> &mut PhotoSlot {
        match position {
            SlotPosition::Front => &mut self.front,
            SlotPosition::Back => &mut self.back,
            SlotPosition::Side => &mut self.side,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotPosition, &PhotoSlot)> {
        SlotPosition::ALL.into_iter().map(|p| (p, self.slot(p)))
    }

    /// Slots whose bytes ride the next create/update payload.
    pub fn pending_uploads(&self) -> Vec<(SlotPosition, Vec<u8>)> {
        self.iter()
            .filter_map(|(p, slot)| match slot {
                PhotoSlot::PendingUpload { data, .. } => Some((p, data.clone())),
                _ => None,
            })
            .collect()
    }

    /// Slots that need a remote delete call before the next update.
    pub fn pending_deletes(&self) -> Vec<SlotPosition> {
        self.iter()
            .filter(|(_, slot)| slot.is_pending_delete())
            .map(|(p, _)| p)
            .collect()
    }
}
