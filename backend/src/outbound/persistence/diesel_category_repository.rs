//! PostgreSQL-backed category repository.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::Page;
use uuid::Uuid;

use crate::domain::ports::{CategoryRepository, RepositoryError};
use crate::domain::search::SearchQuery;
use crate::domain::{Category, CategorySort};

use super::diesel_helpers::{
    contains_pattern, element_total, map_diesel_error, map_pool_error, order_by_direction,
    page_window,
};
use super::models::{CategoryRow, CategoryWrite};
use super::pool::DbPool;
use super::schema::categories;

/// Diesel-backed implementation of [`CategoryRepository`].
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Categories whose name or description contains `keyword`.
fn matching(keyword: Option<&str>) -> categories::BoxedQuery<'static, Pg> {
    let mut query = categories::table.into_boxed();
    if let Some(keyword) = keyword {
        let pattern = contains_pattern(keyword);
        query = query.filter(
            categories::name
                .ilike(pattern.clone())
                .or(categories::description.ilike(pattern)),
        );
    }
    query
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn search(
        &self,
        query: &SearchQuery<CategorySort>,
    ) -> Result<Page<Category>, RepositoryError> {
        let (limit, offset) = page_window(query.page())?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = matching(query.keyword())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "count categories"))?;

        let base = matching(query.keyword());
        let sorted = match query.sort() {
            CategorySort::Id => order_by_direction!(base, categories::id, query.direction()),
            CategorySort::Name => order_by_direction!(base, categories::name, query.direction()),
            CategorySort::Description => {
                order_by_direction!(base, categories::description, query.direction())
            }
        };
        let rows: Vec<CategoryRow> = sorted
            .then_order_by(categories::id.asc())
            .select(CategoryRow::as_select())
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "search categories"))?;

        Ok(Page::new(
            rows.into_iter().map(Category::from).collect(),
            query.page(),
            element_total(total),
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = categories::table
            .find(id)
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find category"))?;
        Ok(row.map(Category::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = categories::table
            .filter(categories::name.eq(name))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find category by name"))?;
        Ok(row.map(Category::from))
    }

    async fn insert(&self, category: &Category) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(categories::table)
            .values(&CategoryWrite::from(category))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| map_diesel_error(error, "insert category"))
    }

    async fn update(&self, category: &Category) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(categories::table.find(category.id))
            .set((
                categories::name.eq(&category.name),
                categories::description.eq(&category.description),
            ))
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "update category"))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(categories::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "delete category"))?;
        Ok(deleted > 0)
    }
}
