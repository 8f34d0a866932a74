use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::entities::{Account, CustomExercise, Measurements, ProgressEntry};
use crate::domain::value_objects::{ExerciseId, PhotoSlot, PhotoSlots, SlotPosition};
use crate::shared::error::AppError;

fn timestamp(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now)
}

pub(super) fn map_account_row(row: &SqliteRow) -> Result<Account, AppError> {
    Ok(Account {
        id: row.try_get("id")?,
        display_name: row.try_get("display_name").unwrap_or_default(),
        created_at: timestamp(row.try_get("created_at")?),
    })
}

pub(super) fn map_exercise_row(row: &SqliteRow) -> Result<CustomExercise, AppError> {
    let id: String = row.try_get("id")?;
    let id = ExerciseId::new(id).map_err(AppError::Database)?;
    Ok(CustomExercise {
        id,
        account_id: row.try_get("account_id")?,
        name: row.try_get("name")?,
        category: row.try_get("category").unwrap_or_default(),
        notes: row.try_get("notes").unwrap_or_default(),
        created_at: timestamp(row.try_get("created_at")?),
        last_modified: timestamp(row.try_get("last_modified")?),
        is_synced: row.try_get::<i64, _>("is_synced")? != 0,
        should_delete: row.try_get::<i64, _>("should_delete")? != 0,
    })
}

/// Entry row only; photo slots are joined in afterwards.
pub(super) fn map_progress_row(row: &SqliteRow) -> Result<ProgressEntry, AppError> {
    let day = row.try_get::<i64, _>("day")? as u32;
    Ok(ProgressEntry {
        account_id: row.try_get("account_id")?,
        day,
        measurements: Measurements {
            weight: row.try_get("weight")?,
            pull_ups: row.try_get::<Option<i64>, _>("pull_ups")?.map(|v| v as u32),
            push_ups: row.try_get::<Option<i64>, _>("push_ups")?.map(|v| v as u32),
            squats: row.try_get::<Option<i64>, _>("squats")?.map(|v| v as u32),
        },
        photos: PhotoSlots::default(),
        created_at: timestamp(row.try_get("created_at")?),
        last_modified: timestamp(row.try_get("last_modified")?),
        is_synced: row.try_get::<i64, _>("is_synced")? != 0,
        should_delete: row.try_get::<i64, _>("should_delete")? != 0,
    })
}

pub(super) fn map_photo_row(row: &SqliteRow) -> Result<(SlotPosition, PhotoSlot), AppError> {
    let slot: String = row.try_get("slot")?;
    let position = SlotPosition::parse(&slot)
        .ok_or_else(|| AppError::Database(format!("Unknown photo slot '{slot}'")))?;
    let state: String = row.try_get("state")?;
    let photo = match state.as_str() {
        "remote" => PhotoSlot::Remote {
            url: row.try_get("url")?,
        },
        "pending_upload" => PhotoSlot::PendingUpload {
            data: row.try_get("data")?,
            replaces_remote: row.try_get::<i64, _>("replaces_remote")? != 0,
        },
        "pending_delete" => PhotoSlot::PendingDelete,
        other => {
            return Err(AppError::Database(format!(
                "Unknown photo slot state '{other}'"
            )))
        }
    };
    Ok((position, photo))
}

/// Column values for one non-empty slot: (state, url, data,
/// replaces_remote). `Empty` slots have no row at all.
pub(super) fn photo_columns(
    slot: &PhotoSlot,
) -> Option<(&'static str, Option<&str>, Option<&[u8]>, bool)> {
    match slot {
        PhotoSlot::Empty => None,
        PhotoSlot::Remote { url } => Some(("remote", Some(url.as_str()), None, false)),
        PhotoSlot::PendingUpload {
            data,
            replaces_remote,
        } => Some(("pending_upload", None, Some(data.as_slice()), *replaces_remote)),
        PhotoSlot::PendingDelete => Some(("pending_delete", None, None, false)),
    }
}
