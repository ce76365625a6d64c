//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every handler in the inbound HTTP layer, plus the health probes
//! - **Schemas**: request and response DTOs, and wrappers ([`ErrorSchema`],
//!   [`ErrorCodeSchema`], the page envelopes) that describe domain and
//!   pagination types without coupling them to utoipa
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::categories::{CategoryRequest, CategoryView};
use crate::inbound::http::deletion::DeletedResponse;
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::ingredients::{
    IngredientBatchRequest, IngredientRequest, IngredientView,
};
use crate::inbound::http::recipes::{
    AmountRequest, CategorySummaryView, IngredientAmountRequest, RecipeIngredientView,
    RecipeIngredientsRequest, RecipeIngredientsView, RecipeRequest, RecipeView,
};
use crate::inbound::http::roles::{RoleRequest, RoleView};
use crate::inbound::http::schemas::{
    CategoryPage, ErrorCodeSchema, ErrorSchema, IngredientPage, PageLinksSchema,
    PageMetadataSchema, RecipePage, RolePage, UserPage,
};
use crate::inbound::http::search::{RecipeSearchRequest, SearchRequest};
use crate::inbound::http::users::{UserRequest, UserView};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe API",
        description = "Manage recipes, their ingredients and categories, user accounts, and roles.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::search_categories,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::roles::list_roles,
        crate::inbound::http::roles::search_roles,
        crate::inbound::http::roles::get_role,
        crate::inbound::http::roles::create_role,
        crate::inbound::http::roles::update_role,
        crate::inbound::http::roles::delete_role,
        crate::inbound::http::ingredients::list_ingredients,
        crate::inbound::http::ingredients::search_ingredients,
        crate::inbound::http::ingredients::get_ingredient,
        crate::inbound::http::ingredients::create_ingredient,
        crate::inbound::http::ingredients::create_ingredients,
        crate::inbound::http::ingredients::update_ingredient,
        crate::inbound::http::ingredients::delete_ingredient,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::search_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::search_recipes,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::recipes::list_recipe_ingredients,
        crate::inbound::http::recipes::add_recipe_ingredients,
        crate::inbound::http::recipes::add_recipe_ingredient,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        PageMetadataSchema,
        PageLinksSchema,
        SearchRequest,
        RecipeSearchRequest,
        DeletedResponse,
        ProbeStatus,
        CategoryRequest,
        CategoryView,
        CategoryPage,
        RoleRequest,
        RoleView,
        RolePage,
        IngredientRequest,
        IngredientBatchRequest,
        IngredientView,
        IngredientPage,
        UserRequest,
        UserView,
        UserPage,
        RecipeRequest,
        IngredientAmountRequest,
        RecipeIngredientsRequest,
        AmountRequest,
        CategorySummaryView,
        RecipeIngredientView,
        RecipeIngredientsView,
        RecipeView,
        RecipePage,
    )),
    tags(
        (name = "categories", description = "Recipe categories"),
        (name = "roles", description = "User roles"),
        (name = "ingredients", description = "Ingredient catalogue"),
        (name = "users", description = "User accounts"),
        (name = "recipes", description = "Recipes and their ingredient amounts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's paths and schema fields.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn openapi_user_view_omits_credentials() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user_view = schemas.get("UserView").expect("UserView schema");

        assert_object_schema_has_field(user_view, "firstName");
        match user_view {
            RefOr::T(Schema::Object(obj)) => {
                assert!(!obj.properties.contains_key("password"));
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1/categories")]
    #[case("/api/v1/roles/search")]
    #[case("/api/v1/ingredients/batch")]
    #[case("/api/v1/users/{id}")]
    #[case("/api/v1/recipes/{id}/ingredients/{ingredient_id}")]
    #[case("/health/ready")]
    fn openapi_documents_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(
            doc.paths.paths.contains_key(path),
            "missing path {path}"
        );
    }
}
