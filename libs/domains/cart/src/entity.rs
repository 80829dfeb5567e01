use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the cart_items table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::CartItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            quantity: model.quantity,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::CartLine> for ActiveModel {
    fn from(line: crate::models::CartLine) -> Self {
        ActiveModel {
            user_id: Set(line.user_id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
    }
}
