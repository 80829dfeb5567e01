use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub product_name: String,
    pub product_price: i64,
    pub product_rating: i32,
    #[sea_orm(column_type = "Text")]
    pub image: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            product_name: model.product_name,
            product_price: model.product_price,
            product_rating: model.product_rating,
            image: model.image,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::NewProduct> for ActiveModel {
    fn from(input: crate::models::NewProduct) -> Self {
        ActiveModel {
            product_name: Set(input.product_name),
            product_price: Set(input.product_price),
            product_rating: Set(input.product_rating),
            image: Set(input.image),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
    }
}

/// Maps a validated sort key to its column.
///
/// Returns `None` for names outside the product sort list.
pub fn sort_column(name: &str) -> Option<Column> {
    match name {
        "id" => Some(Column::Id),
        "name" => Some(Column::ProductName),
        "price" => Some(Column::ProductPrice),
        "rating" => Some(Column::ProductRating),
        _ => None,
    }
}
