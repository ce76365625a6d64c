//! OpenAPI schema definitions for types that do not derive `ToSchema`.
//!
//! Domain types stay framework-agnostic, and the `pagination` crate has no
//! utoipa dependency. The wrappers here mirror their wire shape so the
//! generated document describes the real payloads.

use utoipa::ToSchema;

use crate::inbound::http::categories::CategoryView;
use crate::inbound::http::ingredients::IngredientView;
use crate::inbound::http::recipes::RecipeView;
use crate::inbound::http::roles::RoleView;
use crate::inbound::http::users::UserView;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed, fails validation, or conflicts with stored data.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The database is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "request validation failed")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, e.g. `{"fieldErrors":[...]}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`pagination::PageMetadata`].
#[derive(ToSchema)]
#[schema(as = pagination::PageMetadata)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PageMetadataSchema {
    #[schema(example = 2)]
    size: u32,
    /// Zero-based page index.
    #[schema(example = 0)]
    number: u32,
    #[schema(example = 3)]
    total_elements: u64,
    #[schema(example = 2)]
    total_pages: u64,
}

/// OpenAPI schema for [`pagination::PageLinks`].
#[derive(ToSchema)]
#[schema(as = pagination::PageLinks)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PageLinksSchema {
    #[schema(rename = "self")]
    self_: String,
    first: String,
    prev: Option<String>,
    next: Option<String>,
    last: String,
}

/// Page envelope schema for one collection.
macro_rules! page_schema {
    ($name:ident, $view:ty, $doc:literal) => {
        #[doc = $doc]
        #[derive(ToSchema)]
        #[expect(
            dead_code,
            reason = "Used only for OpenAPI schema generation via utoipa"
        )]
        pub struct $name {
            content: Vec<$view>,
            page: PageMetadataSchema,
            links: PageLinksSchema,
        }
    };
}

page_schema!(CategoryPage, CategoryView, "A page of categories.");
page_schema!(RolePage, RoleView, "A page of roles.");
page_schema!(IngredientPage, IngredientView, "A page of ingredients.");
page_schema!(UserPage, UserView, "A page of users.");
page_schema!(RecipePage, RecipeView, "A page of recipes.");
