use async_trait::async_trait;
use sqlx::Row;

use super::queries::{
    DELETE_READ_MARKERS, INSERT_PENDING_READ_MARKER, INSERT_READ_MARKER, SELECT_READ_MARKERS,
};
use super::SqliteRepository;
use crate::application::ports::repositories::ReadMarkerRepository;
use crate::domain::entities::ReadMarkers;
use crate::shared::error::AppError;

#[async_trait]
impl ReadMarkerRepository for SqliteRepository {
    async fn get_read_markers(&self, account_id: &str) -> Result<ReadMarkers, AppError> {
        let rows = sqlx::query(SELECT_READ_MARKERS)
            .bind(account_id)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut markers = ReadMarkers::default();
        for row in &rows {
            let day = row.try_get::<i64, _>("day")? as u32;
            if row.try_get::<i64, _>("confirmed")? != 0 {
                markers.confirmed.insert(day);
            } else {
                markers.pending.insert(day);
            }
        }
        Ok(markers)
    }

    async fn add_pending_read_marker(&self, account_id: &str, day: u32) -> Result<(), AppError> {
        sqlx::query(INSERT_PENDING_READ_MARKER)
            .bind(account_id)
            .bind(day as i64)
            .execute(self.pool.get_pool())
            .await?;
        Ok(())
    }

    async fn apply_read_marker_sync(&self, account_id: &str, markers: &ReadMarkers) -> Result<(), AppError> {
        let mut tx = self.pool.get_pool().begin().await?;
        sqlx::query(DELETE_READ_MARKERS)
            .bind(account_id)
            .execute(&mut *tx)
            .await?;
        for day in &markers.confirmed {
            sqlx::query(INSERT_READ_MARKER)
                .bind(account_id)
                .bind(*day as i64)
                .bind(1i64)
                .execute(&mut *tx)
                .await?;
        }
        for day in &markers.pending {
            sqlx::query(INSERT_READ_MARKER)
                .bind(account_id)
                .bind(*day as i64)
                .bind(0i64)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn clear_read_markers(&self, account_id: &str) -> Result<(), AppError> {
        sqlx::query(DELETE_READ_MARKERS)
            .bind(account_id)
            .execute(self.pool.get_pool())
            .await?;
        Ok(())
    }
}
