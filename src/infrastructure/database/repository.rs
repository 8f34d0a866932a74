use async_trait::async_trait;

use crate::shared::error::AppError;

#[async_trait]
pub trait Repository: Send + Sync {
    async fn initialize(&self) -> Result<(), AppError>;
    async fn health_check(&self) -> Result<bool, AppError>;
}
