use async_trait::async_trait;
use database::with_timeout;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{NewUser, User},
    repository::UserRepository,
};

pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, input: NewUser) -> UserResult<User> {
        let active_model: entity::ActiveModel = input.into();
        let model = with_timeout(active_model.insert(&self.db))
            .await
            .map_err(UserError::from_storage)?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model.into())
    }

    async fn get(&self, id: i64) -> UserResult<Option<User>> {
        let model = with_timeout(entity::Entity::find_by_id(id).one(&self.db)).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = with_timeout(
            entity::Entity::find()
                .filter(entity::Column::Email.eq(email))
                .one(&self.db),
        )
        .await?;
        Ok(model.map(Into::into))
    }
}
