use async_trait::async_trait;
use database::with_timeout;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    filters::SortDirection,
    models::{NewProduct, Product, ProductQuery},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `%needle%` with LIKE wildcards in the needle escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, input: NewProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = with_timeout(active_model.insert(&self.db)).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = with_timeout(entity::Entity::find_by_id(id).one(&self.db)).await?;
        Ok(model.map(Into::into))
    }

    async fn search(&self, query: ProductQuery) -> ProductResult<(Vec<Product>, i64)> {
        let mut select =
            entity::Entity::find().filter(entity::Column::ProductPrice.lte(query.max_price));

        if !query.name.is_empty() {
            select = select.filter(Expr::cust_with_values(
                "product_name ILIKE ? ESCAPE '\\'",
                [contains_pattern(&query.name)],
            ));
        }

        let total = with_timeout(select.clone().count(&self.db)).await?;

        let filters = &query.filters;
        let column = entity::sort_column(filters.sort_column()).ok_or_else(|| {
            ProductError::Internal(format!("no column for sort key {}", filters.sort))
        })?;
        let order = match filters.sort_direction() {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };

        let models = with_timeout(
            select
                .order_by(column, order)
                .limit(filters.limit().max(0) as u64)
                .offset(filters.offset().max(0) as u64)
                .all(&self.db),
        )
        .await?;

        Ok((models.into_iter().map(Into::into).collect(), total as i64))
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = with_timeout(entity::Entity::delete_by_id(id).exec(&self.db)).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
