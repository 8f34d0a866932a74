use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};

use super::mapper::map_exercise_row;
use super::queries::{
    DELETE_EXERCISE, SELECT_ACTIVE_EXERCISES, SELECT_ALL_EXERCISES, SELECT_EXERCISE_BY_ID,
    UPSERT_EXERCISE,
};
use super::SqliteRepository;
use crate::application::ports::repositories::{ExerciseRepository, ExerciseSyncApply};
use crate::domain::entities::CustomExercise;
use crate::domain::value_objects::ExerciseId;
use crate::shared::error::AppError;

async fn upsert_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    exercise: &CustomExercise,
) -> Result<(), AppError> {
    sqlx::query(UPSERT_EXERCISE)
        .bind(exercise.id.as_str())
        .bind(&exercise.account_id)
        .bind(&exercise.name)
        .bind(&exercise.category)
        .bind(&exercise.notes)
        .bind(exercise.created_at.timestamp_millis())
        .bind(exercise.last_modified.timestamp_millis())
        .bind(exercise.is_synced as i64)
        .bind(exercise.should_delete as i64)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

#[async_trait]
impl ExerciseRepository for SqliteRepository {
    async fn create_exercise(&self, exercise: &CustomExercise) -> Result<(), AppError> {
        let mut tx = self.pool.get_pool().begin().await?;
        upsert_in_tx(&mut tx, exercise).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update_exercise(&self, exercise: &CustomExercise) -> Result<(), AppError> {
        self.create_exercise(exercise).await
    }

    async fn get_exercise(
        &self,
        account_id: &str,
        id: &ExerciseId,
    ) -> Result<Option<CustomExercise>, AppError> {
        let row = sqlx::query(SELECT_EXERCISE_BY_ID)
            .bind(account_id)
            .bind(id.as_str())
            .fetch_optional(self.pool.get_pool())
            .await?;

        match row {
            Some(row) => Ok(Some(map_exercise_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_active_exercises(&self, account_id: &str) -> Result<Vec<CustomExercise>, AppError> {
        let rows = sqlx::query(SELECT_ACTIVE_EXERCISES)
            .bind(account_id)
            .fetch_all(self.pool.get_pool())
            .await?;
        rows.iter().map(map_exercise_row).collect()
    }

    async fn get_all_exercises(&self, account_id: &str) -> Result<Vec<CustomExercise>, AppError> {
        let rows = sqlx::query(SELECT_ALL_EXERCISES)
            .bind(account_id)
            .fetch_all(self.pool.get_pool())
            .await?;
        rows.iter().map(map_exercise_row).collect()
    }

    async fn apply_exercise_sync(
        &self,
        account_id: &str,
        apply: ExerciseSyncApply,
    ) -> Result<(), AppError> {
        if apply.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.get_pool().begin().await?;
        for exercise in &apply.upserts {
            upsert_in_tx(&mut tx, exercise).await?;
        }
        for id in &apply.deletes {
            sqlx::query(DELETE_EXERCISE)
                .bind(account_id)
                .bind(id.as_str())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
