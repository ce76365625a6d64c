//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Rows borrow from domain values on the way
//! in and are converted into owned domain values on the way out.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Category, Ingredient, IngredientAmount, RecipeRecord, Role, User};

use super::schema::{categories, ingredients, recipe_ingredients, recipes, roles, users};

// ---------------------------------------------------------------------------
// Categories and roles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct CategoryWrite<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
}

impl<'a> From<&'a Category> for CategoryWrite<'a> {
    fn from(category: &'a Category) -> Self {
        Self {
            id: category.id,
            name: &category.name,
            description: &category.description,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoleRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = roles)]
pub(crate) struct RoleWrite<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
}

impl<'a> From<&'a Role> for RoleWrite<'a> {
    fn from(role: &'a Role) -> Self {
        Self {
            id: role.id,
            name: &role.name,
            description: &role.description,
        }
    }
}

// ---------------------------------------------------------------------------
// Ingredients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub id: Uuid,
    pub name: String,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ingredients)]
pub(crate) struct IngredientWrite<'a> {
    pub id: Uuid,
    pub name: &'a str,
}

impl<'a> From<&'a Ingredient> for IngredientWrite<'a> {
    fn from(ingredient: &'a Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: &ingredient.name,
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct UserWrite<'a> {
    pub id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

impl<'a> From<&'a User> for UserWrite<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id,
            first_name: &user.first_name,
            last_name: &user.last_name,
            username: &user.username,
            email: &user.email,
            password_hash: &user.password_hash,
        }
    }
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeWrite<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub image: Option<&'a str>,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub category_id: Option<Uuid>,
}

impl<'a> From<&'a RecipeRecord> for RecipeWrite<'a> {
    fn from(record: &'a RecipeRecord) -> Self {
        Self {
            id: record.id,
            title: &record.title,
            description: &record.description,
            image: record.image.as_deref(),
            prep_time: record.prep_time,
            cook_time: record.cook_time,
            servings: record.servings,
            category_id: record.category_id,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipe_ingredients)]
pub(crate) struct RecipeIngredientWrite<'a> {
    pub recipe_id: Uuid,
    pub ingredient_id: Uuid,
    pub amount: &'a str,
}

impl<'a> RecipeIngredientWrite<'a> {
    pub(crate) fn for_recipe(recipe_id: Uuid, items: &'a [IngredientAmount]) -> Vec<Self> {
        items
            .iter()
            .map(|item| Self {
                recipe_id,
                ingredient_id: item.ingredient_id,
                amount: &item.amount,
            })
            .collect()
    }
}

/// Association joined with its ingredient name.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct RecipeIngredientRow {
    pub recipe_id: Uuid,
    pub ingredient_id: Uuid,
    pub name: String,
    pub amount: String,
}
