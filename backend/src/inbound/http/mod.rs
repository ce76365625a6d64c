//! HTTP inbound adapter exposing REST endpoints.
//!
//! Each resource module owns its request and response DTOs and its
//! handlers. [`configure`] mounts every resource route; callers place it
//! under the `/api/v1` scope.

use actix_web::web;

pub mod categories;
pub mod deletion;
pub mod error;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod roles;
pub mod schemas;
pub mod search;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use crate::domain::ApiResult;

/// Register the resource routes together with the JSON and query
/// extractor error handlers.
///
/// Literal sub-paths such as `/search` and `/batch` are registered before
/// the `{id}` routes that would otherwise capture them.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .service(categories::search_categories)
        .service(categories::list_categories)
        .service(categories::create_category)
        .service(categories::get_category)
        .service(categories::update_category)
        .service(categories::delete_category)
        .service(roles::search_roles)
        .service(roles::list_roles)
        .service(roles::create_role)
        .service(roles::get_role)
        .service(roles::update_role)
        .service(roles::delete_role)
        .service(ingredients::create_ingredients)
        .service(ingredients::search_ingredients)
        .service(ingredients::list_ingredients)
        .service(ingredients::create_ingredient)
        .service(ingredients::get_ingredient)
        .service(ingredients::update_ingredient)
        .service(ingredients::delete_ingredient)
        .service(users::search_users)
        .service(users::list_users)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(recipes::search_recipes)
        .service(recipes::list_recipes)
        .service(recipes::create_recipe)
        .service(recipes::add_recipe_ingredient)
        .service(recipes::list_recipe_ingredients)
        .service(recipes::add_recipe_ingredients)
        .service(recipes::get_recipe)
        .service(recipes::update_recipe)
        .service(recipes::delete_recipe);
}
