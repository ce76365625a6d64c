//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::Page;
use uuid::Uuid;

use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::search::SearchQuery;
use crate::domain::{User, UserSort};

use super::diesel_helpers::{
    contains_pattern, element_total, map_diesel_error, map_pool_error, order_by_direction,
    page_window,
};
use super::models::{UserRow, UserWrite};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        query: users::BoxedQuery<'_, Pg>,
        operation: &'static str,
    ) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = query
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, operation))?;
        Ok(row.map(User::from))
    }
}

/// Users whose names, username, or email contain `keyword`.
fn matching(keyword: Option<&str>) -> users::BoxedQuery<'static, Pg> {
    let mut query = users::table.into_boxed();
    if let Some(keyword) = keyword {
        let pattern = contains_pattern(keyword);
        query = query.filter(
            users::first_name
                .ilike(pattern.clone())
                .or(users::last_name.ilike(pattern.clone()))
                .or(users::username.ilike(pattern.clone()))
                .or(users::email.ilike(pattern)),
        );
    }
    query
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn search(&self, query: &SearchQuery<UserSort>) -> Result<Page<User>, RepositoryError> {
        let (limit, offset) = page_window(query.page())?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = matching(query.keyword())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "count users"))?;

        let base = matching(query.keyword());
        let direction = query.direction();
        let sorted = match query.sort() {
            UserSort::Id => order_by_direction!(base, users::id, direction),
            UserSort::FirstName => order_by_direction!(base, users::first_name, direction),
            UserSort::LastName => order_by_direction!(base, users::last_name, direction),
            UserSort::Username => order_by_direction!(base, users::username, direction),
            UserSort::Email => order_by_direction!(base, users::email, direction),
        };
        let rows: Vec<UserRow> = sorted
            .then_order_by(users::id.asc())
            .select(UserRow::as_select())
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "search users"))?;

        Ok(Page::new(
            rows.into_iter().map(User::from).collect(),
            query.page(),
            element_total(total),
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        self.find_one(users::table.filter(users::id.eq(id)).into_boxed(), "find user")
            .await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one(
            users::table
                .filter(users::username.eq(username.to_owned()))
                .into_boxed(),
            "find user by username",
        )
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one(
            users::table
                .filter(users::email.eq(email.to_owned()))
                .into_boxed(),
            "find user by email",
        )
        .await
    }

    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(&UserWrite::from(user))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| map_diesel_error(error, "insert user"))
    }

    async fn update(&self, user: &User) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(users::table.find(user.id))
            .set((
                users::first_name.eq(&user.first_name),
                users::last_name.eq(&user.last_name),
                users::username.eq(&user.username),
                users::email.eq(&user.email),
                users::password_hash.eq(&user.password_hash),
            ))
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "update user"))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(users::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "delete user"))?;
        Ok(deleted > 0)
    }
}
