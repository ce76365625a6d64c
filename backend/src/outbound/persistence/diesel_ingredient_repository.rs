//! PostgreSQL-backed ingredient repository.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::Page;
use uuid::Uuid;

use crate::domain::ports::{IngredientRepository, RepositoryError};
use crate::domain::search::SearchQuery;
use crate::domain::{Ingredient, IngredientSort};

use super::diesel_helpers::{
    contains_pattern, element_total, map_diesel_error, map_pool_error, order_by_direction,
    page_window,
};
use super::models::{IngredientRow, IngredientWrite};
use super::pool::DbPool;
use super::schema::ingredients;

/// Diesel-backed implementation of [`IngredientRepository`].
#[derive(Clone)]
pub struct DieselIngredientRepository {
    pool: DbPool,
}

impl DieselIngredientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn matching(keyword: Option<&str>) -> ingredients::BoxedQuery<'static, Pg> {
    let mut query = ingredients::table.into_boxed();
    if let Some(keyword) = keyword {
        query = query.filter(ingredients::name.ilike(contains_pattern(keyword)));
    }
    query
}

#[async_trait]
impl IngredientRepository for DieselIngredientRepository {
    async fn search(
        &self,
        query: &SearchQuery<IngredientSort>,
    ) -> Result<Page<Ingredient>, RepositoryError> {
        let (limit, offset) = page_window(query.page())?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = matching(query.keyword())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "count ingredients"))?;

        let base = matching(query.keyword());
        let sorted = match query.sort() {
            IngredientSort::Id => order_by_direction!(base, ingredients::id, query.direction()),
            IngredientSort::Name => order_by_direction!(base, ingredients::name, query.direction()),
        };
        let rows: Vec<IngredientRow> = sorted
            .then_order_by(ingredients::id.asc())
            .select(IngredientRow::as_select())
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "search ingredients"))?;

        Ok(Page::new(
            rows.into_iter().map(Ingredient::from).collect(),
            query.page(),
            element_total(total),
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ingredient>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = ingredients::table
            .find(id)
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find ingredient"))?;
        Ok(row.map(Ingredient::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Ingredient>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = ingredients::table
            .filter(ingredients::name.eq(name))
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find ingredient by name"))?;
        Ok(row.map(Ingredient::from))
    }

    async fn insert(&self, ingredient: &Ingredient) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(ingredients::table)
            .values(&IngredientWrite::from(ingredient))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| map_diesel_error(error, "insert ingredient"))
    }

    async fn insert_many(&self, batch: &[Ingredient]) -> Result<(), RepositoryError> {
        // A multi-row INSERT is a single statement, so it applies atomically.
        let rows: Vec<IngredientWrite<'_>> = batch.iter().map(IngredientWrite::from).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(ingredients::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| map_diesel_error(error, "insert ingredient batch"))
    }

    async fn update(&self, ingredient: &Ingredient) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(ingredients::table.find(ingredient.id))
            .set(ingredients::name.eq(&ingredient.name))
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "update ingredient"))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(ingredients::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "delete ingredient"))?;
        Ok(deleted > 0)
    }
}
