use async_trait::async_trait;

use super::mapper::map_account_row;
use super::queries::{INSERT_ACCOUNT, SELECT_ACCOUNT_BY_ID};
use super::SqliteRepository;
use crate::application::ports::repositories::AccountRepository;
use crate::domain::entities::Account;
use crate::shared::error::AppError;

#[async_trait]
impl AccountRepository for SqliteRepository {
    async fn create_account(&self, account: &Account) -> Result<(), AppError> {
        sqlx::query(INSERT_ACCOUNT)
            .bind(&account.id)
            .bind(&account.display_name)
            .bind(account.created_at.timestamp_millis())
            .execute(self.pool.get_pool())
            .await?;
        Ok(())
    }

    async fn get_account(&self, id: &str) -> Result<Option<Account>, AppError> {
        let row = sqlx::query(SELECT_ACCOUNT_BY_ID)
            .bind(id)
            .fetch_optional(self.pool.get_pool())
            .await?;

        match row {
            Some(row) => Ok(Some(map_account_row(&row)?)),
            None => Ok(None),
        }
    }
}
