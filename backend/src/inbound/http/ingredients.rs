//! Ingredient API handlers.
//!
//! ```text
//! GET    /api/v1/ingredients?keyword=flo
//! POST   /api/v1/ingredients/search {"keyword":"flo","order":"desc"}
//! GET    /api/v1/ingredients/{id}
//! POST   /api/v1/ingredients {"name":"Flour"}
//! POST   /api/v1/ingredients/batch {"ingredients":[{"name":"Flour"},{"name":"Sugar"}]}
//! PUT    /api/v1/ingredients/{id} {"name":"Rye flour"}
//! DELETE /api/v1/ingredients/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::PagedResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    ApiResult, DraftValidationError, Ingredient, IngredientDraft, IngredientSort, SearchQuery,
};
use crate::inbound::http::deletion::DeletedResponse;
use crate::inbound::http::schemas::{ErrorSchema, IngredientPage};
use crate::inbound::http::search::{SearchRequest, paged};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;

const COLLECTION: &str = "/api/v1/ingredients";

/// Body of `POST /ingredients` and `PUT /ingredients/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct IngredientRequest {
    #[serde(default)]
    #[schema(example = "Flour")]
    pub name: String,
}

impl TryFrom<IngredientRequest> for IngredientDraft {
    type Error = DraftValidationError;

    fn try_from(value: IngredientRequest) -> Result<Self, Self::Error> {
        Self::new(&value.name)
    }
}

/// Body of `POST /ingredients/batch`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct IngredientBatchRequest {
    #[serde(default)]
    pub ingredients: Vec<IngredientRequest>,
}

/// Ingredient as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct IngredientView {
    pub id: Uuid,
    pub name: String,
}

impl From<Ingredient> for IngredientView {
    fn from(value: Ingredient) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

async fn search(
    state: &HttpState,
    request: &HttpRequest,
    input: SearchRequest,
) -> ApiResult<web::Json<PagedResponse<IngredientView>>> {
    let query = SearchQuery::<IngredientSort>::parse(input.into())?;
    let page = state.ingredients.search(query.clone()).await?;
    Ok(web::Json(paged(request, COLLECTION, &query, &[], page)?))
}

/// List ingredients matching the query string.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients",
    params(SearchRequest),
    responses(
        (status = 200, description = "Page of ingredients", body = IngredientPage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "listIngredients"
)]
#[get("/ingredients")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    request: HttpRequest,
    query: web::Query<SearchRequest>,
) -> ApiResult<web::Json<PagedResponse<IngredientView>>> {
    search(&state, &request, query.into_inner()).await
}

/// Search ingredients with parameters in the request body.
#[utoipa::path(
    post,
    path = "/api/v1/ingredients/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Page of ingredients", body = IngredientPage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "searchIngredients"
)]
#[post("/ingredients/search")]
pub async fn search_ingredients(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<SearchRequest>,
) -> ApiResult<web::Json<PagedResponse<IngredientView>>> {
    search(&state, &request, payload.into_inner()).await
}

/// Fetch one ingredient.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients/{id}",
    params(("id" = Uuid, Path, description = "Ingredient identifier")),
    responses(
        (status = 200, description = "Ingredient", body = IngredientView),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "getIngredient"
)]
#[get("/ingredients/{id}")]
pub async fn get_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<IngredientView>> {
    let id = parse_uuid(&path, "id")?;
    Ok(web::Json(state.ingredients.find_by_id(id).await?.into()))
}

/// Create an ingredient.
#[utoipa::path(
    post,
    path = "/api/v1/ingredients",
    request_body = IngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientView),
        (status = 400, description = "Invalid request or duplicate name", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "createIngredient"
)]
#[post("/ingredients")]
pub async fn create_ingredient(
    state: web::Data<HttpState>,
    payload: web::Json<IngredientRequest>,
) -> ApiResult<HttpResponse> {
    let draft = IngredientDraft::try_from(payload.into_inner())?;
    let ingredient = state.ingredients.create(draft).await?;
    Ok(HttpResponse::Created().json(IngredientView::from(ingredient)))
}

/// Create several ingredients at once; either all are stored or none.
#[utoipa::path(
    post,
    path = "/api/v1/ingredients/batch",
    request_body = IngredientBatchRequest,
    responses(
        (status = 201, description = "Ingredients created", body = [IngredientView]),
        (status = 400, description = "Invalid request or duplicate name", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "createIngredients"
)]
#[post("/ingredients/batch")]
pub async fn create_ingredients(
    state: web::Data<HttpState>,
    payload: web::Json<IngredientBatchRequest>,
) -> ApiResult<HttpResponse> {
    let drafts = payload
        .into_inner()
        .ingredients
        .into_iter()
        .map(IngredientDraft::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let created = state.ingredients.create_batch(drafts).await?;
    let views: Vec<IngredientView> = created.into_iter().map(IngredientView::from).collect();
    Ok(HttpResponse::Created().json(views))
}

/// Rename an ingredient.
#[utoipa::path(
    put,
    path = "/api/v1/ingredients/{id}",
    params(("id" = Uuid, Path, description = "Ingredient identifier")),
    request_body = IngredientRequest,
    responses(
        (status = 200, description = "Ingredient updated", body = IngredientView),
        (status = 400, description = "Invalid request or duplicate name", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "updateIngredient"
)]
#[put("/ingredients/{id}")]
pub async fn update_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<IngredientRequest>,
) -> ApiResult<web::Json<IngredientView>> {
    let id = parse_uuid(&path, "id")?;
    let draft = IngredientDraft::try_from(payload.into_inner())?;
    Ok(web::Json(state.ingredients.update(id, draft).await?.into()))
}

/// Delete an ingredient, detaching it from every recipe.
#[utoipa::path(
    delete,
    path = "/api/v1/ingredients/{id}",
    params(("id" = Uuid, Path, description = "Ingredient identifier")),
    responses(
        (status = 200, description = "Ingredient deleted", body = DeletedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "deleteIngredient"
)]
#[delete("/ingredients/{id}")]
pub async fn delete_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = parse_uuid(&path, "id")?;
    Ok(web::Json(state.ingredients.delete(id).await?.into()))
}

#[cfg(test)]
mod tests {
    use crate::inbound::http::test_utils::{memory_state, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn batch(names: &[&str]) -> Value {
        json!({ "ingredients": names.iter().map(|name| json!({ "name": name })).collect::<Vec<_>>() })
    }

    #[actix_web::test]
    async fn batch_create_returns_every_ingredient() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/ingredients/batch")
                .set_json(batch(&["Flour", "Sugar", "Eggs"]))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Value = actix_test::read_body_json(response).await;
        assert_eq!(created.as_array().map(Vec::len), Some(3));
        assert_eq!(created[1]["name"], "Sugar");
    }

    #[rstest]
    #[case(&[])]
    #[case(&["Flour", "Flour"])]
    #[case(&["Flour", "x"])]
    #[actix_web::test]
    async fn rejected_batches_store_nothing(#[case] names: &[&str]) {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/ingredients/batch")
                .set_json(batch(names))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let page: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/ingredients")
                .to_request(),
        )
        .await;
        assert_eq!(page["page"]["totalElements"], 0);
    }

    #[actix_web::test]
    async fn keyword_matches_case_insensitively() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/ingredients/batch")
                .set_json(batch(&["Plain flour", "Sugar", "Rye FLOUR"]))
                .to_request(),
        )
        .await;

        let page: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/ingredients?keyword=Flour&order=desc")
                .to_request(),
        )
        .await;

        assert_eq!(page["page"]["totalElements"], 2);
        assert_eq!(page["content"][0]["name"], "Rye FLOUR");
    }

    #[actix_web::test]
    async fn unknown_sort_field_is_rejected() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/ingredients?sortBy=calories")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["details"]["fieldErrors"][0]["field"], "sortBy");
    }
}
