//! PostgreSQL-backed role repository.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::Page;
use uuid::Uuid;

use crate::domain::ports::{RepositoryError, RoleRepository};
use crate::domain::search::SearchQuery;
use crate::domain::{Role, RoleSort};

use super::diesel_helpers::{
    contains_pattern, element_total, map_diesel_error, map_pool_error, order_by_direction,
    page_window,
};
use super::models::{RoleRow, RoleWrite};
use super::pool::DbPool;
use super::schema::roles;

#[derive(Clone)]
pub struct DieselRoleRepository {
    pool: DbPool,
}

impl DieselRoleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn matching(keyword: Option<&str>) -> roles::BoxedQuery<'static, Pg> {
    let mut query = roles::table.into_boxed();
    if let Some(keyword) = keyword {
        let pattern = contains_pattern(keyword);
        query = query.filter(
            roles::name
                .ilike(pattern.clone())
                .or(roles::description.ilike(pattern)),
        );
    }
    query
}

#[async_trait]
impl RoleRepository for DieselRoleRepository {
    async fn search(&self, query: &SearchQuery<RoleSort>) -> Result<Page<Role>, RepositoryError> {
        let (limit, offset) = page_window(query.page())?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = matching(query.keyword())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "count roles"))?;

        let base = matching(query.keyword());
        let sorted = match query.sort() {
            RoleSort::Id => order_by_direction!(base, roles::id, query.direction()),
            RoleSort::Name => order_by_direction!(base, roles::name, query.direction()),
            RoleSort::Description => {
                order_by_direction!(base, roles::description, query.direction())
            }
        };
        let rows: Vec<RoleRow> = sorted
            .then_order_by(roles::id.asc())
            .select(RoleRow::as_select())
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "search roles"))?;

        Ok(Page::new(
            rows.into_iter().map(Role::from).collect(),
            query.page(),
            element_total(total),
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = roles::table
            .find(id)
            .select(RoleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find role"))?;
        Ok(row.map(Role::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = roles::table
            .filter(roles::name.eq(name))
            .select(RoleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find role by name"))?;
        Ok(row.map(Role::from))
    }

    async fn insert(&self, role: &Role) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(roles::table)
            .values(&RoleWrite::from(role))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| map_diesel_error(error, "insert role"))
    }

    async fn update(&self, role: &Role) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(roles::table.find(role.id))
            .set((
                roles::name.eq(&role.name),
                roles::description.eq(&role.description),
            ))
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "update role"))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(roles::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "delete role"))?;
        Ok(deleted > 0)
    }
}
