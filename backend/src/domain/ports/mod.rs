//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by the
//! outbound adapters. Driving ports (`*Service`) are implemented by the
//! domain services and consumed by the HTTP handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod category_repository;
mod category_service;
mod ingredient_repository;
mod ingredient_service;
mod password_hasher;
mod recipe_repository;
mod recipe_service;
mod repository_error;
mod role_repository;
mod role_service;
mod user_repository;
mod user_service;

pub use category_repository::CategoryRepository;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_service::CategoryService;
pub use ingredient_repository::IngredientRepository;
#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
pub use ingredient_service::IngredientService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::RecipeRepository;
pub use recipe_service::RecipeService;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use role_repository::MockRoleRepository;
pub use role_repository::RoleRepository;
pub use role_service::RoleService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
pub use user_service::UserService;
