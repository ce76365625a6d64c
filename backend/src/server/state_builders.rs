//! Builders for HTTP state from configured repository adapters.

use std::sync::Arc;

use actix_web::web;

use recipe_api::domain::ports::{
    CategoryRepository, IngredientRepository, RecipeRepository, RoleRepository, UserRepository,
};
use recipe_api::domain::{
    CategoryServiceImpl, IngredientServiceImpl, RecipeServiceImpl, RoleServiceImpl,
    UserServiceImpl,
};
use recipe_api::inbound::http::state::HttpState;
use recipe_api::outbound::crypto::BcryptPasswordHasher;
use recipe_api::outbound::memory::MemoryStore;
use recipe_api::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselIngredientRepository, DieselRecipeRepository,
    DieselRoleRepository, DieselUserRepository,
};
use tracing::info;

use super::ServerConfig;

/// One adapter per repository port.
struct Repositories<C, Ro, I, U, Re> {
    categories: C,
    roles: Ro,
    ingredients: I,
    users: U,
    recipes: Re,
}

fn diesel_repositories(
    pool: &DbPool,
) -> Repositories<
    DieselCategoryRepository,
    DieselRoleRepository,
    DieselIngredientRepository,
    DieselUserRepository,
    DieselRecipeRepository,
> {
    Repositories {
        categories: DieselCategoryRepository::new(pool.clone()),
        roles: DieselRoleRepository::new(pool.clone()),
        ingredients: DieselIngredientRepository::new(pool.clone()),
        users: DieselUserRepository::new(pool.clone()),
        recipes: DieselRecipeRepository::new(pool.clone()),
    }
}

/// Wire the domain services over `repos`.
///
/// Categories and ingredients are shared with the recipe service, which
/// resolves references through them.
fn assemble<C, Ro, I, U, Re>(repos: Repositories<C, Ro, I, U, Re>, bcrypt_cost: u32) -> HttpState
where
    C: CategoryRepository + 'static,
    Ro: RoleRepository + 'static,
    I: IngredientRepository + 'static,
    U: UserRepository + 'static,
    Re: RecipeRepository + 'static,
{
    let categories = Arc::new(repos.categories);
    let ingredients = Arc::new(repos.ingredients);
    HttpState {
        categories: Arc::new(CategoryServiceImpl::new(categories.clone())),
        roles: Arc::new(RoleServiceImpl::new(Arc::new(repos.roles))),
        ingredients: Arc::new(IngredientServiceImpl::new(ingredients.clone())),
        users: Arc::new(UserServiceImpl::new(
            Arc::new(repos.users),
            Arc::new(BcryptPasswordHasher::new(bcrypt_cost)),
        )),
        recipes: Arc::new(RecipeServiceImpl::new(
            Arc::new(repos.recipes),
            categories,
            ingredients,
        )),
    }
}

/// Build the shared HTTP state, using Diesel adapters when a pool is
/// configured and in-memory adapters otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("serving from PostgreSQL repositories");
            assemble(diesel_repositories(pool), config.bcrypt_cost)
        }
        None => {
            info!("no database configured; serving from in-memory repositories");
            let store = MemoryStore::new();
            let repos = Repositories {
                categories: store.categories(),
                roles: store.roles(),
                ingredients: store.ingredients(),
                users: store.users(),
                recipes: store.recipes(),
            };
            assemble(repos, config.bcrypt_cost)
        }
    };
    web::Data::new(state)
}
