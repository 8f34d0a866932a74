use std::sync::Arc;

use crate::application::ports::repositories::ExerciseRepository;
use crate::domain::entities::CustomExercise;
use crate::domain::value_objects::ExerciseId;
use crate::shared::error::AppError;

/// Pick a unique name for a new entity colliding with existing names: the
/// new entity gets a counter suffix, the existing one is never touched.
/// The original name stays a prefix of the result, and repeated collisions
/// each produce a distinct name.
pub fn dedupe_name(name: &str, existing: &[String]) -> String {
    if !existing.iter().any(|n| n == name) {
        return name.to_string();
    }
    let mut counter = 2;
    loop {
        let candidate = format!("{name} ({counter})");
        if !existing.iter().any(|n| *n == candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// User-facing custom-exercise actions. Mutations only mark local state;
/// the sync pass moves it to the server.
pub struct ExerciseService {
    repo: Arc<dyn ExerciseRepository>,
}

impl ExerciseService {
    pub fn new(repo: Arc<dyn ExerciseRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_exercise(
        &self,
        account_id: &str,
        name: &str,
        category: &str,
        notes: &str,
    ) -> Result<CustomExercise, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Exercise name must not be empty".to_string(),
            ));
        }

        let existing: Vec<String> = self
            .repo
            .get_active_exercises(account_id)
            .await?
            .into_iter()
            .map(|e| e.name)
            .collect();
        let unique_name = dedupe_name(name, &existing);

        let exercise = CustomExercise::new(
            account_id.to_string(),
            unique_name,
            category.to_string(),
            notes.to_string(),
        );
        self.repo.create_exercise(&exercise).await?;
        Ok(exercise)
    }

    pub async fn update_exercise(
        &self,
        account_id: &str,
        id: &ExerciseId,
        category: &str,
        notes: &str,
    ) -> Result<CustomExercise, AppError> {
        let mut exercise = self
            .repo
            .get_exercise(account_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No exercise {id}")))?;
        exercise.update_details(category.to_string(), notes.to_string());
        self.repo.update_exercise(&exercise).await?;
        Ok(exercise)
    }

    /// Tombstone the exercise. It disappears from `list_exercises` right
    /// away but stays in the store until sync confirms the remote delete.
    pub async fn delete_exercise(&self, account_id: &str, id: &ExerciseId) -> Result<(), AppError> {
        let mut exercise = self
            .repo
            .get_exercise(account_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No exercise {id}")))?;
        exercise.mark_deleted();
        self.repo.update_exercise(&exercise).await
    }

    pub async fn list_exercises(&self, account_id: &str) -> Result<Vec<CustomExercise>, AppError> {
        self.repo.get_active_exercises(account_id).await
    }
}
