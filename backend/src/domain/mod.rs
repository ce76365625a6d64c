//! Domain primitives, services, and ports.
//!
//! Purpose: define the recipe catalogue entities, their validation rules,
//! and the use cases that operate on them, independent of HTTP and storage.
//! Adapters depend on this module; it depends on neither.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: request correlation identifier carried in a task-local.
//! - Entities and drafts: `Category`, `Role`, `Ingredient`, `User`, `Recipe`.
//! - `search`: keyword, sort, and paging parameters.
//! - `ports`: driven (repositories, hasher) and driving (services) traits.
//! - `*ServiceImpl`: the driving port implementations.

pub mod category;
mod category_service;
mod deletion;
pub mod error;
pub mod ingredient;
mod ingredient_service;
pub mod ports;
pub mod recipe;
mod recipe_service;
pub mod role;
mod role_service;
pub mod search;
mod service_support;
pub mod trace_id;
pub mod user;
mod user_service;
pub mod validation;

pub use self::category::{Category, CategoryDraft, CategorySort};
pub use self::category_service::CategoryServiceImpl;
pub use self::deletion::DeletionReceipt;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ingredient::{Ingredient, IngredientDraft, IngredientSort};
pub use self::ingredient_service::IngredientServiceImpl;
pub use self::recipe::{
    CategorySummary, IngredientAmount, Recipe, RecipeDraft, RecipeFields, RecipeIngredient,
    RecipeRecord, RecipeSearch, RecipeSort,
};
pub use self::recipe_service::RecipeServiceImpl;
pub use self::role::{Role, RoleDraft, RoleSort};
pub use self::role_service::RoleServiceImpl;
pub use self::search::{SearchParams, SearchQuery, SortDirection, SortField};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserDraft, UserFields, UserSort};
pub use self::user_service::UserServiceImpl;
pub use self::validation::{DraftValidationError, FieldViolation, ViolationCode};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use recipe_api::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("recipe not found"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
