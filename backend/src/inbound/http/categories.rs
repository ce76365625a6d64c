//! Category API handlers.
//!
//! ```text
//! GET    /api/v1/categories?keyword=soup&sortBy=name&order=asc&page=0&size=2
//! POST   /api/v1/categories/search {"keyword":"soup"}
//! GET    /api/v1/categories/{id}
//! POST   /api/v1/categories {"name":"Soups","description":"Warm bowls"}
//! PUT    /api/v1/categories/{id} {"name":"Soups"}
//! DELETE /api/v1/categories/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::PagedResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ApiResult, Category, CategoryDraft, CategorySort, SearchQuery};
use crate::inbound::http::deletion::DeletedResponse;
use crate::inbound::http::schemas::{CategoryPage, ErrorSchema};
use crate::inbound::http::search::{SearchRequest, paged};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;

const COLLECTION: &str = "/api/v1/categories";

/// Body of `POST /categories` and `PUT /categories/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[serde(default)]
    #[schema(example = "Soups")]
    pub name: String,
    #[schema(example = "Warm bowls for cold days")]
    pub description: Option<String>,
}

impl TryFrom<CategoryRequest> for CategoryDraft {
    type Error = crate::domain::DraftValidationError;

    fn try_from(value: CategoryRequest) -> Result<Self, Self::Error> {
        Self::new(&value.name, value.description.as_deref())
    }
}

/// Category as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<Category> for CategoryView {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}

async fn search(
    state: &HttpState,
    request: &HttpRequest,
    input: SearchRequest,
) -> ApiResult<web::Json<PagedResponse<CategoryView>>> {
    let query = SearchQuery::<CategorySort>::parse(input.into())?;
    let page = state.categories.search(query.clone()).await?;
    Ok(web::Json(paged(request, COLLECTION, &query, &[], page)?))
}

/// List categories matching the query string.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(SearchRequest),
    responses(
        (status = 200, description = "Page of categories", body = CategoryPage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    request: HttpRequest,
    query: web::Query<SearchRequest>,
) -> ApiResult<web::Json<PagedResponse<CategoryView>>> {
    search(&state, &request, query.into_inner()).await
}

/// Search categories with parameters in the request body.
#[utoipa::path(
    post,
    path = "/api/v1/categories/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Page of categories", body = CategoryPage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "searchCategories"
)]
#[post("/categories/search")]
pub async fn search_categories(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<SearchRequest>,
) -> ApiResult<web::Json<PagedResponse<CategoryView>>> {
    search(&state, &request, payload.into_inner()).await
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category", body = CategoryView),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "getCategory"
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CategoryView>> {
    let id = parse_uuid(&path, "id")?;
    let category = state.categories.find_by_id(id).await?;
    Ok(web::Json(category.into()))
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryView),
        (status = 400, description = "Invalid request or duplicate name", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    payload: web::Json<CategoryRequest>,
) -> ApiResult<HttpResponse> {
    let draft = CategoryDraft::try_from(payload.into_inner())?;
    let category = state.categories.create(draft).await?;
    Ok(HttpResponse::Created().json(CategoryView::from(category)))
}

/// Replace a category.
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category identifier")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryView),
        (status = 400, description = "Invalid request or duplicate name", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[put("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CategoryRequest>,
) -> ApiResult<web::Json<CategoryView>> {
    let id = parse_uuid(&path, "id")?;
    let draft = CategoryDraft::try_from(payload.into_inner())?;
    let category = state.categories.update(id, draft).await?;
    Ok(web::Json(category.into()))
}

/// Delete a category. Recipes in it become uncategorised.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category deleted", body = DeletedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = parse_uuid(&path, "id")?;
    let receipt = state.categories.delete(id).await?;
    Ok(web::Json(receipt.into()))
}
