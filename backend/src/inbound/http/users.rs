//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users?keyword=ada&sortBy=lastName
//! POST   /api/v1/users/search {"keyword":"ada"}
//! GET    /api/v1/users/{id}
//! POST   /api/v1/users {"firstName":"Ada","lastName":"Lovelace","username":"ada","email":"ada@example.com","password":"analytical"}
//! PUT    /api/v1/users/{id} {"firstName":"Ada","lastName":"King","username":"ada","email":"ada@example.com"}
//! DELETE /api/v1/users/{id}
//! ```
//!
//! Passwords are accepted on create and update but never returned.

use std::fmt;

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::PagedResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ApiResult, SearchQuery, User, UserDraft, UserFields, UserSort};
use crate::inbound::http::deletion::DeletedResponse;
use crate::inbound::http::schemas::{ErrorSchema, UserPage};
use crate::inbound::http::search::{SearchRequest, paged};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;

const COLLECTION: &str = "/api/v1/users";

/// Body of `POST /users` and `PUT /users/{id}`.
///
/// `password` is required when creating; omitting it on update keeps the
/// current one.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[serde(default)]
    #[schema(example = "Ada")]
    pub first_name: String,
    #[serde(default)]
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[serde(default)]
    #[schema(example = "ada")]
    pub username: String,
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "analytical-engine", format = Password)]
    pub password: Option<String>,
}

impl fmt::Debug for UserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<UserRequest> for UserFields {
    fn from(value: UserRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            username: value.username,
            email: value.email,
            password: value.password,
        }
    }
}

/// User as returned to clients; never includes credentials.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

impl From<User> for UserView {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            username: value.username,
            email: value.email,
        }
    }
}

async fn search(
    state: &HttpState,
    request: &HttpRequest,
    input: SearchRequest,
) -> ApiResult<web::Json<PagedResponse<UserView>>> {
    let query = SearchQuery::<UserSort>::parse(input.into())?;
    let page = state.users.search(query.clone()).await?;
    Ok(web::Json(paged(request, COLLECTION, &query, &[], page)?))
}

/// List users matching the query string.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(SearchRequest),
    responses(
        (status = 200, description = "Page of users", body = UserPage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    request: HttpRequest,
    query: web::Query<SearchRequest>,
) -> ApiResult<web::Json<PagedResponse<UserView>>> {
    search(&state, &request, query.into_inner()).await
}

/// Search users with parameters in the request body.
#[utoipa::path(
    post,
    path = "/api/v1/users/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Page of users", body = UserPage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "searchUsers"
)]
#[post("/users/search")]
pub async fn search_users(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<SearchRequest>,
) -> ApiResult<web::Json<PagedResponse<UserView>>> {
    search(&state, &request, payload.into_inner()).await
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserView),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserView>> {
    let id = parse_uuid(&path, "id")?;
    Ok(web::Json(state.users.find_by_id(id).await?.into()))
}

/// Register a user. The password is stored as a bcrypt hash.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserView),
        (status = 400, description = "Invalid request, duplicate username or email", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::for_create(payload.into_inner().into())?;
    let user = state.users.create(draft).await?;
    Ok(HttpResponse::Created().json(UserView::from(user)))
}

/// Replace a user's profile, and their password when one is supplied.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserView),
        (status = 400, description = "Invalid request, duplicate username or email", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserView>> {
    let id = parse_uuid(&path, "id")?;
    let draft = UserDraft::for_update(payload.into_inner().into())?;
    Ok(web::Json(state.users.update(id, draft).await?.into()))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = DeletedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = parse_uuid(&path, "id")?;
    Ok(web::Json(state.users.delete(id).await?.into()))
}

#[cfg(test)]
mod tests;
