//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::{
    CategoryServiceImpl, IngredientServiceImpl, RecipeServiceImpl, RoleServiceImpl,
    UserServiceImpl,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::crypto::BcryptPasswordHasher;
use crate::outbound::memory::MemoryStore;

/// Lowest cost bcrypt accepts; keeps hashing fast in tests.
const TEST_BCRYPT_COST: u32 = 4;

/// Handler state backed by a fresh in-memory store.
pub fn memory_state() -> HttpState {
    let store = MemoryStore::new();
    let categories = Arc::new(store.categories());
    let ingredients = Arc::new(store.ingredients());
    HttpState {
        categories: Arc::new(CategoryServiceImpl::new(categories.clone())),
        roles: Arc::new(RoleServiceImpl::new(Arc::new(store.roles()))),
        ingredients: Arc::new(IngredientServiceImpl::new(ingredients.clone())),
        users: Arc::new(UserServiceImpl::new(
            Arc::new(store.users()),
            Arc::new(BcryptPasswordHasher::new(TEST_BCRYPT_COST)),
        )),
        recipes: Arc::new(RecipeServiceImpl::new(
            Arc::new(store.recipes()),
            categories,
            ingredients,
        )),
    }
}

/// Application with every API route mounted over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(super::configure))
}
