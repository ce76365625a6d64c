//! PostgreSQL-backed recipe repository.
//!
//! Recipe rows are loaded first and then hydrated with their category and
//! ingredient associations in two batched queries, so a page costs three
//! SELECTs regardless of its size. Writes touching `recipe_ingredients`
//! run inside one transaction together with the recipe row.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use pagination::Page;
use uuid::Uuid;

use crate::domain::ports::{RecipeRepository, RepositoryError};
use crate::domain::{
    CategorySummary, IngredientAmount, Recipe, RecipeIngredient, RecipeRecord, RecipeSearch,
    RecipeSort,
};

use super::diesel_helpers::{
    contains_pattern, element_total, escape_like, map_diesel_error, map_pool_error,
    order_by_direction, page_window,
};
use super::models::{
    CategoryRow, RecipeIngredientRow, RecipeIngredientWrite, RecipeRow, RecipeWrite,
};
use super::pool::DbPool;
use super::schema::{categories, ingredients, recipe_ingredients, recipes};

/// Diesel-backed implementation of [`RecipeRepository`].
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Recipes matching the keyword and category filters of `search`.
///
/// The category filter compares names with `ILIKE` on an escaped pattern
/// without wildcards, which is an exact case-insensitive match.
fn matching(search: &RecipeSearch) -> recipes::BoxedQuery<'static, Pg> {
    let mut query = recipes::table.into_boxed();
    if let Some(keyword) = search.query.keyword() {
        let pattern = contains_pattern(keyword);
        query = query.filter(
            recipes::title
                .ilike(pattern.clone())
                .or(recipes::description.ilike(pattern)),
        );
    }
    if let Some(name) = &search.category_name {
        let in_category = categories::table
            .filter(categories::name.ilike(escape_like(name)))
            .select(categories::id.nullable());
        query = query.filter(recipes::category_id.eq_any(in_category));
    }
    query
}

/// Associations for `recipe_ids`, ordered by ingredient name.
async fn load_associations(
    conn: &mut AsyncPgConnection,
    recipe_ids: Vec<Uuid>,
) -> Result<Vec<RecipeIngredientRow>, DieselError> {
    if recipe_ids.is_empty() {
        return Ok(Vec::new());
    }
    recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(recipe_ids))
        .select((
            recipe_ingredients::recipe_id,
            ingredients::id,
            ingredients::name,
            recipe_ingredients::amount,
        ))
        .order((ingredients::name.asc(), ingredients::id.asc()))
        .load::<RecipeIngredientRow>(conn)
        .await
}

/// Attach categories and ingredients to recipe rows, keeping row order.
async fn hydrate(
    conn: &mut AsyncPgConnection,
    rows: Vec<RecipeRow>,
) -> Result<Vec<Recipe>, DieselError> {
    let category_ids: Vec<Uuid> = rows.iter().filter_map(|row| row.category_id).collect();
    let summaries: HashMap<Uuid, CategorySummary> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        categories::table
            .filter(categories::id.eq_any(category_ids))
            .select(CategoryRow::as_select())
            .load::<CategoryRow>(conn)
            .await?
            .into_iter()
            .map(|row| {
                (
                    row.id,
                    CategorySummary {
                        id: row.id,
                        name: row.name,
                    },
                )
            })
            .collect()
    };

    let recipe_ids = rows.iter().map(|row| row.id).collect();
    let mut associations: HashMap<Uuid, Vec<RecipeIngredient>> = HashMap::new();
    for row in load_associations(conn, recipe_ids).await? {
        associations
            .entry(row.recipe_id)
            .or_default()
            .push(RecipeIngredient {
                ingredient_id: row.ingredient_id,
                name: row.name,
                amount: row.amount,
            });
    }

    Ok(rows
        .into_iter()
        .map(|row| Recipe {
            category: row
                .category_id
                .and_then(|id| summaries.get(&id).cloned()),
            ingredients: associations.remove(&row.id).unwrap_or_default(),
            id: row.id,
            title: row.title,
            description: row.description,
            image: row.image,
            prep_time: row.prep_time,
            cook_time: row.cook_time,
            servings: row.servings,
        })
        .collect())
}

async fn load_recipe(
    conn: &mut AsyncPgConnection,
    id: Uuid,
) -> Result<Option<Recipe>, DieselError> {
    let row = recipes::table
        .find(id)
        .select(RecipeRow::as_select())
        .first::<RecipeRow>(conn)
        .await
        .optional()?;
    match row {
        Some(row) => Ok(hydrate(conn, vec![row]).await?.into_iter().next()),
        None => Ok(None),
    }
}

async fn insert_associations(
    conn: &mut AsyncPgConnection,
    links: &[RecipeIngredientWrite<'_>],
) -> Result<(), DieselError> {
    if links.is_empty() {
        return Ok(());
    }
    diesel::insert_into(recipe_ingredients::table)
        .values(links)
        .execute(conn)
        .await
        .map(|_| ())
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn search(&self, search: &RecipeSearch) -> Result<Page<Recipe>, RepositoryError> {
        let request = search.query.page();
        let (limit, offset) = page_window(request)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = matching(search)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "count recipes"))?;

        let base = matching(search);
        let direction = search.query.direction();
        let sorted = match search.query.sort() {
            RecipeSort::Id => order_by_direction!(base, recipes::id, direction),
            RecipeSort::Title => order_by_direction!(base, recipes::title, direction),
            RecipeSort::Description => {
                order_by_direction!(base, recipes::description, direction)
            }
            RecipeSort::PrepTime => order_by_direction!(base, recipes::prep_time, direction),
            RecipeSort::CookTime => order_by_direction!(base, recipes::cook_time, direction),
            RecipeSort::Servings => order_by_direction!(base, recipes::servings, direction),
        };
        let rows: Vec<RecipeRow> = sorted
            .then_order_by(recipes::id.asc())
            .select(RecipeRow::as_select())
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "search recipes"))?;

        let items = hydrate(&mut conn, rows)
            .await
            .map_err(|error| map_diesel_error(error, "hydrate recipes"))?;
        Ok(Page::new(items, request, element_total(total)))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_recipe(&mut conn, id)
            .await
            .map_err(|error| map_diesel_error(error, "find recipe"))
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Recipe>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = recipes::table
            .filter(recipes::title.eq(title))
            .select(recipes::id)
            .first::<Uuid>(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find recipe by title"))?;
        match id {
            Some(id) => load_recipe(&mut conn, id)
                .await
                .map_err(|error| map_diesel_error(error, "find recipe by title")),
            None => Ok(None),
        }
    }

    async fn insert(&self, record: &RecipeRecord) -> Result<Recipe, RepositoryError> {
        let row = RecipeWrite::from(record);
        let links = RecipeIngredientWrite::for_recipe(record.id, &record.ingredients);
        let id = record.id;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, DieselError, _>(|conn| {
            async move {
                diesel::insert_into(recipes::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                insert_associations(conn, &links).await?;
                load_recipe(conn, id).await?.ok_or(DieselError::NotFound)
            }
            .scope_boxed()
        })
        .await
        .map_err(|error| map_diesel_error(error, "insert recipe"))
    }

    async fn replace(&self, record: &RecipeRecord) -> Result<Option<Recipe>, RepositoryError> {
        let row = RecipeWrite::from(record);
        let links = RecipeIngredientWrite::for_recipe(record.id, &record.ingredients);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, DieselError, _>(|conn| {
            async move {
                let updated = diesel::update(recipes::table.find(row.id))
                    .set((
                        recipes::title.eq(row.title),
                        recipes::description.eq(row.description),
                        recipes::image.eq(row.image),
                        recipes::prep_time.eq(row.prep_time),
                        recipes::cook_time.eq(row.cook_time),
                        recipes::servings.eq(row.servings),
                        recipes::category_id.eq(row.category_id),
                    ))
                    .execute(conn)
                    .await?;
                if updated == 0 {
                    return Ok(None);
                }

                diesel::delete(
                    recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(row.id)),
                )
                .execute(conn)
                .await?;
                insert_associations(conn, &links).await?;
                load_recipe(conn, row.id).await
            }
            .scope_boxed()
        })
        .await
        .map_err(|error| map_diesel_error(error, "replace recipe"))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(recipes::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "delete recipe"))?;
        Ok(deleted > 0)
    }

    async fn ingredients(&self, recipe_id: Uuid) -> Result<Vec<RecipeIngredient>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = load_associations(&mut conn, vec![recipe_id])
            .await
            .map_err(|error| map_diesel_error(error, "list recipe ingredients"))?;
        Ok(rows
            .into_iter()
            .map(|row| RecipeIngredient {
                ingredient_id: row.ingredient_id,
                name: row.name,
                amount: row.amount,
            })
            .collect())
    }

    async fn attach_ingredients(
        &self,
        recipe_id: Uuid,
        items: &[IngredientAmount],
    ) -> Result<Vec<RecipeIngredient>, RepositoryError> {
        let links = RecipeIngredientWrite::for_recipe(recipe_id, items);
        let ingredient_ids: Vec<Uuid> = items.iter().map(|item| item.ingredient_id).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let names: HashMap<Uuid, String> = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    insert_associations(conn, &links).await?;
                    ingredients::table
                        .filter(ingredients::id.eq_any(ingredient_ids))
                        .select((ingredients::id, ingredients::name))
                        .load::<(Uuid, String)>(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(|error| map_diesel_error(error, "attach recipe ingredients"))?
            .into_iter()
            .collect();

        Ok(items
            .iter()
            .map(|item| RecipeIngredient {
                ingredient_id: item.ingredient_id,
                name: names.get(&item.ingredient_id).cloned().unwrap_or_default(),
                amount: item.amount.clone(),
            })
            .collect())
    }
}
