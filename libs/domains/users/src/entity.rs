use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Text", nullable)]
    pub first_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub last_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable, unique)]
    pub email: Option<String>,
    #[sea_orm(column_type = "Text", nullable, unique)]
    pub phone: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub password_hash: String,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at.into(),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            password_hash: model.password_hash,
            version: model.version,
        }
    }
}

impl From<crate::models::NewUser> for ActiveModel {
    fn from(input: crate::models::NewUser) -> Self {
        ActiveModel {
            created_at: Set(chrono::Utc::now().into()),
            first_name: Set(Some(input.first_name)),
            last_name: Set(Some(input.last_name)),
            email: Set(Some(input.email)),
            phone: Set(Some(input.phone)),
            password_hash: Set(input.password_hash),
            version: Set(1),
            ..Default::default()
        }
    }
}
