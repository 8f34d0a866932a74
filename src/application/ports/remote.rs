use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::SlotPosition;
use crate::shared::error::AppError;

/// Transport-level failure of a remote call. Sync treats these as
/// retry-next-pass; they are never conflated with validation errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server rejected the request: {0}")]
    Server(String),

    #[error("Malformed server response: {0}")]
    Decode(String),
}

impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        AppError::Network(err.to_string())
    }
}

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Point-in-time server state of a custom exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSnapshot {
    pub id: String,
    pub name: String,
    pub category: String,
    pub notes: String,
    pub create_date: DateTime<Utc>,
    pub modify_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePayload {
    pub name: String,
    pub category: String,
    pub notes: String,
}

/// Point-in-time server state of a progress entry. An absent URL means the
/// slot holds no photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub day: u32,
    pub weight: Option<f64>,
    pub pull_ups: Option<u32>,
    pub push_ups: Option<u32>,
    pub squats: Option<u32>,
    pub front_photo_url: Option<String>,
    pub back_photo_url: Option<String>,
    pub side_photo_url: Option<String>,
    pub create_date: DateTime<Utc>,
    pub modify_date: DateTime<Utc>,
}

impl ProgressSnapshot {
    pub fn photo_urls(&self) -> [Option<String>; 3] {
        [
            self.front_photo_url.clone(),
            self.back_photo_url.clone(),
            self.side_photo_url.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoUpload {
    pub position: SlotPosition,
    pub data: Vec<u8>,
}

/// Scalar fields plus the photo bytes queued for upload. Slots pending
/// delete are never part of this payload; they go through `delete_photo`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressPayload {
    pub weight: Option<f64>,
    pub pull_ups: Option<u32>,
    pub push_ups: Option<u32>,
    pub squats: Option<u32>,
    pub photos: Vec<PhotoUpload>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseRemote: Send + Sync {
    async fn list(&self) -> RemoteResult<Vec<ExerciseSnapshot>>;
    async fn create(&self, id: &str, payload: ExercisePayload) -> RemoteResult<ExerciseSnapshot>;
    async fn update(&self, id: &str, payload: ExercisePayload) -> RemoteResult<ExerciseSnapshot>;
    async fn delete(&self, id: &str) -> RemoteResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRemote: Send + Sync {
    async fn list(&self) -> RemoteResult<Vec<ProgressSnapshot>>;
    async fn create(&self, day: u32, payload: ProgressPayload) -> RemoteResult<ProgressSnapshot>;
    async fn update(&self, day: u32, payload: ProgressPayload) -> RemoteResult<ProgressSnapshot>;
    async fn delete(&self, day: u32) -> RemoteResult<()>;
    async fn delete_photo(&self, day: u32, slot: SlotPosition) -> RemoteResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadMarkerRemote: Send + Sync {
    async fn list(&self) -> RemoteResult<Vec<u32>>;
    async fn set_read(&self, day: u32) -> RemoteResult<()>;
    async fn delete_all(&self) -> RemoteResult<()>;
}
