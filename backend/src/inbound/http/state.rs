//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CategoryService, IngredientService, RecipeService, RoleService, UserService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub categories: Arc<dyn CategoryService>,
    pub roles: Arc<dyn RoleService>,
    pub ingredients: Arc<dyn IngredientService>,
    pub users: Arc<dyn UserService>,
    pub recipes: Arc<dyn RecipeService>,
}
