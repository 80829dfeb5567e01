use async_trait::async_trait;
use database::with_timeout;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    entity,
    error::{CartError, CartResult},
    models::{CartItem, CartLine},
    repository::CartRepository,
};

pub struct PgCartRepository {
    db: DatabaseConnection,
}

impl PgCartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn list(&self, user_id: i64) -> CartResult<Vec<CartItem>> {
        let models = with_timeout(
            entity::Entity::find()
                .filter(entity::Column::UserId.eq(user_id))
                .order_by_asc(entity::Column::Id)
                .all(&self.db),
        )
        .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn upsert(&self, line: CartLine) -> CartResult<CartItem> {
        let active_model: entity::ActiveModel = line.into();

        let model = with_timeout(
            entity::Entity::insert(active_model)
                .on_conflict(
                    OnConflict::columns([entity::Column::UserId, entity::Column::ProductId])
                        .update_column(entity::Column::Quantity)
                        .to_owned(),
                )
                .exec_with_returning(&self.db),
        )
        .await
        .map_err(CartError::from_storage)?;

        tracing::info!(
            user_id = line.user_id,
            product_id = line.product_id,
            quantity = line.quantity,
            "Updated cart"
        );
        Ok(model.into())
    }

    async fn remove(&self, user_id: i64, product_id: i64) -> CartResult<bool> {
        let result = with_timeout(
            entity::Entity::delete_many()
                .filter(entity::Column::UserId.eq(user_id))
                .filter(entity::Column::ProductId.eq(product_id))
                .exec(&self.db),
        )
        .await?;

        Ok(result.rows_affected > 0)
    }
}
