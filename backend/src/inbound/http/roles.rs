//! Role API handlers.
//!
//! ```text
//! GET    /api/v1/roles?keyword=admin&sortBy=name&order=desc&page=0&size=10
//! POST   /api/v1/roles/search {"keyword":"editor"}
//! GET    /api/v1/roles/{id}
//! POST   /api/v1/roles {"name":"Editor","description":"Curates recipes"}
//! PUT    /api/v1/roles/{id} {"name":"Reviewer"}
//! DELETE /api/v1/roles/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::PagedResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ApiResult, Role, RoleDraft, RoleSort, SearchQuery};
use crate::inbound::http::deletion::DeletedResponse;
use crate::inbound::http::schemas::{RolePage, ErrorSchema};
use crate::inbound::http::search::{SearchRequest, paged};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;

const COLLECTION: &str = "/api/v1/roles";

/// Body of `POST /roles` and `PUT /roles/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    #[serde(default)]
    #[schema(example = "Editor")]
    pub name: String,
    #[schema(example = "Curates and publishes recipes")]
    pub description: Option<String>,
}

impl TryFrom<RoleRequest> for RoleDraft {
    type Error = crate::domain::DraftValidationError;

    fn try_from(value: RoleRequest) -> Result<Self, Self::Error> {
        Self::new(&value.name, value.description.as_deref())
    }
}

/// Role as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<Role> for RoleView {
    fn from(value: Role) -> Self {
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
) -> ApiResult<web::Json<PagedResponse<RoleView>>> {
    let query = SearchQuery::<RoleSort>::parse(input.into())?;
    let page = state.roles.search(query.clone()).await?;
    Ok(web::Json(paged(request, COLLECTION, &query, &[], page)?))
}

/// List roles matching the query string.
#[utoipa::path(
    get,
    path = "/api/v1/roles",
    params(SearchRequest),
    responses(
        (status = 200, description = "Page of roles", body = RolePage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["roles"],
    operation_id = "listRoles"
)]
#[get("/roles")]
pub async fn list_roles(
    state: web::Data<HttpState>,
    request: HttpRequest,
    query: web::Query<SearchRequest>,
) -> ApiResult<web::Json<PagedResponse<RoleView>>> {
    search(&state, &request, query.into_inner()).await
}

/// Search roles with parameters in the request body.
#[utoipa::path(
    post,
    path = "/api/v1/roles/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Page of roles", body = RolePage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["roles"],
    operation_id = "searchRoles"
)]
#[post("/roles/search")]
pub async fn search_roles(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<SearchRequest>,
) -> ApiResult<web::Json<PagedResponse<RoleView>>> {
    search(&state, &request, payload.into_inner()).await
}

/// Fetch one role.
#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}",
    params(("id" = Uuid, Path, description = "Role identifier")),
    responses(
        (status = 200, description = "Role", body = RoleView),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["roles"],
    operation_id = "getRole"
)]
#[get("/roles/{id}")]
pub async fn get_role(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RoleView>> {
    let id = parse_uuid(&path, "id")?;
    let role = state.roles.find_by_id(id).await?;
    Ok(web::Json(role.into()))
}

/// Create a role.
#[utoipa::path(
    post,
    path = "/api/v1/roles",
    request_body = RoleRequest,
    responses(
        (status = 201, description = "Role created", body = RoleView),
        (status = 400, description = "Invalid request or duplicate name", body = ErrorSchema)
    ),
    tags = ["roles"],
    operation_id = "createRole"
)]
#[post("/roles")]
pub async fn create_role(
    state: web::Data<HttpState>,
    payload: web::Json<RoleRequest>,
) -> ApiResult<HttpResponse> {
    let draft = RoleDraft::try_from(payload.into_inner())?;
    let role = state.roles.create(draft).await?;
    Ok(HttpResponse::Created().json(RoleView::from(role)))
}

/// Replace a role.
#[utoipa::path(
    put,
    path = "/api/v1/roles/{id}",
    params(("id" = Uuid, Path, description = "Role identifier")),
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Role updated", body = RoleView),
        (status = 400, description = "Invalid request or duplicate name", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["roles"],
    operation_id = "updateRole"
)]
#[put("/roles/{id}")]
pub async fn update_role(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RoleRequest>,
) -> ApiResult<web::Json<RoleView>> {
    let id = parse_uuid(&path, "id")?;
    let draft = RoleDraft::try_from(payload.into_inner())?;
    let role = state.roles.update(id, draft).await?;
    Ok(web::Json(role.into()))
}

/// Delete a role.
#[utoipa::path(
    delete,
    path = "/api/v1/roles/{id}",
    params(("id" = Uuid, Path, description = "Role identifier")),
    responses(
        (status = 200, description = "Role deleted", body = DeletedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["roles"],
    operation_id = "deleteRole"
)]
#[delete("/roles/{id}")]
pub async fn delete_role(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = parse_uuid(&path, "id")?;
    let receipt = state.roles.delete(id).await?;
    Ok(web::Json(receipt.into()))
}
