//! PostgreSQL adapters for the repository ports.
//!
//! Row structs and table definitions stay private to this module; the
//! repositories translate them to domain entities and map every Diesel or
//! pool failure to [`RepositoryError`](crate::domain::ports::RepositoryError).
//!
//! ```ignore
//! use recipe_api::outbound::persistence::{DbPool, DieselCategoryRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/recipes")).await?;
//! let categories = DieselCategoryRepository::new(pool.clone());
//! ```

mod diesel_category_repository;
pub(crate) mod diesel_helpers;
mod diesel_ingredient_repository;
mod diesel_recipe_repository;
mod diesel_role_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_ingredient_repository::DieselIngredientRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_role_repository::DieselRoleRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_blocking,
};
pub use pool::{DbPool, PoolConfig, PoolError};
