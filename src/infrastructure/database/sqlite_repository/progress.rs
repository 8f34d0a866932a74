use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};
use std::collections::HashMap;

use super::mapper::{map_photo_row, map_progress_row, photo_columns};
use super::queries::{
    DELETE_PHOTOS_FOR_DAY, DELETE_PROGRESS_ENTRY, INSERT_PHOTO, SELECT_ACTIVE_PROGRESS,
    SELECT_ALL_PROGRESS, SELECT_PHOTOS_BY_ACCOUNT, SELECT_PHOTOS_BY_DAY, SELECT_PROGRESS_BY_DAY,
    UPSERT_PROGRESS_ENTRY,
};
use super::SqliteRepository;
use crate::application::ports::repositories::{ProgressRepository, ProgressSyncApply};
use crate::domain::entities::ProgressEntry;
use crate::domain::value_objects::PhotoSlots;
use crate::shared::error::AppError;

async fn upsert_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    entry: &ProgressEntry,
) -> Result<(), AppError> {
    sqlx::query(UPSERT_PROGRESS_ENTRY)
        .bind(&entry.account_id)
        .bind(entry.day as i64)
        .bind(entry.measurements.weight)
        .bind(entry.measurements.pull_ups.map(|v| v as i64))
        .bind(entry.measurements.push_ups.map(|v| v as i64))
        .bind(entry.measurements.squats.map(|v| v as i64))
        .bind(entry.created_at.timestamp_millis())
        .bind(entry.last_modified.timestamp_millis())
        .bind(entry.is_synced as i64)
        .bind(entry.should_delete as i64)
        .execute(&mut **tx)
        .await?;

    // Rewrite the slot rows wholesale; Empty slots have no row.
    sqlx::query(DELETE_PHOTOS_FOR_DAY)
        .bind(&entry.account_id)
        .bind(entry.day as i64)
        .execute(&mut **tx)
        .await?;
    for (position, slot) in entry.photos.iter() {
        if let Some((state, url, data, replaces_remote)) = photo_columns(slot) {
            sqlx::query(INSERT_PHOTO)
                .bind(&entry.account_id)
                .bind(entry.day as i64)
                .bind(position.as_str())
                .bind(state)
                .bind(url)
                .bind(data)
                .bind(replaces_remote as i64)
                .execute(&mut **tx)
                .await?;
        }
    }
    Ok(())
}

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn upsert_entry(&self, entry: &ProgressEntry) -> Result<(), AppError> {
        let mut tx = self.pool.get_pool().begin().await?;
        upsert_in_tx(&mut tx, entry).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn get_entry(&self, account_id: &str, day: u32) -> Result<Option<ProgressEntry>, AppError> {
        let row = sqlx::query(SELECT_PROGRESS_BY_DAY)
            .bind(account_id)
            .bind(day as i64)
            .fetch_optional(self.pool.get_pool())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut entry = map_progress_row(&row)?;

        let photo_rows = sqlx::query(SELECT_PHOTOS_BY_DAY)
            .bind(account_id)
            .bind(day as i64)
            .fetch_all(self.pool.get_pool())
            .await?;
        for photo_row in &photo_rows {
            let (position, slot) = map_photo_row(photo_row)?;
            *entry.photos.slot_mut(position) = slot;
        }
        Ok(Some(entry))
    }

    async fn get_active_entries(&self, account_id: &str) -> Result<Vec<ProgressEntry>, AppError> {
        self.list_with_query(account_id, SELECT_ACTIVE_PROGRESS).await
    }

    async fn get_all_entries(&self, account_id: &str) -> Result<Vec<ProgressEntry>, AppError> {
        self.list_with_query(account_id, SELECT_ALL_PROGRESS).await
    }

    async fn apply_progress_sync(
        &self,
        account_id: &str,
        apply: ProgressSyncApply,
    ) -> Result<(), AppError> {
        if apply.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.get_pool().begin().await?;
        for entry in &apply.upserts {
            upsert_in_tx(&mut tx, entry).await?;
        }
        for day in &apply.deletes {
            sqlx::query(DELETE_PHOTOS_FOR_DAY)
                .bind(account_id)
                .bind(*day as i64)
                .execute(&mut *tx)
                .await?;
            sqlx::query(DELETE_PROGRESS_ENTRY)
                .bind(account_id)
                .bind(*day as i64)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

impl SqliteRepository {
    async fn list_with_query(
        &self,
        account_id: &str,
        query: &str,
    ) -> Result<Vec<ProgressEntry>, AppError> {
        let rows = sqlx::query(query)
            .bind(account_id)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut photos_by_day: HashMap<u32, PhotoSlots> = HashMap::new();
        let photo_rows = sqlx::query(SELECT_PHOTOS_BY_ACCOUNT)
            .bind(account_id)
            .fetch_all(self.pool.get_pool())
            .await?;
        for photo_row in &photo_rows {
            let day = sqlx::Row::try_get::<i64, _>(photo_row, "day")? as u32;
            let (position, slot) = map_photo_row(photo_row)?;
            *photos_by_day.entry(day).or_default().slot_mut(position) = slot;
        }

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut entry = map_progress_row(row)?;
            if let Some(photos) = photos_by_day.remove(&entry.day) {
                entry.photos = photos;
            }
            entries.push(entry);
        }
        Ok(entries)
    }
}
