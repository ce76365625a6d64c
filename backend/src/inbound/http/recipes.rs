//! Recipe API handlers, including ingredient associations.
//!
//! ```text
//! GET    /api/v1/recipes?keyword=pie&categoryName=dessert&sortBy=prepTime
//! POST   /api/v1/recipes/search {"keyword":"pie","categoryName":"Dessert"}
//! GET    /api/v1/recipes/{id}
//! POST   /api/v1/recipes {"title":"Apple pie","categoryId":"...","ingredients":[{"ingredientId":"...","amount":"3"}]}
//! PUT    /api/v1/recipes/{id} {...same shape, replaces everything...}
//! DELETE /api/v1/recipes/{id}
//! GET    /api/v1/recipes/{id}/ingredients
//! POST   /api/v1/recipes/{id}/ingredients {"ingredients":[{"ingredientId":"...","amount":"200 g"}]}
//! POST   /api/v1/recipes/{id}/ingredients/{ingredientId} {"amount":"1 tsp"}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::PagedResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    ApiResult, CategorySummary, Error, IngredientAmount, Recipe, RecipeDraft, RecipeFields,
    RecipeIngredient, RecipeSearch,
};
use crate::inbound::http::deletion::DeletedResponse;
use crate::inbound::http::schemas::{ErrorSchema, RecipePage};
use crate::inbound::http::search::{RecipeSearchRequest, paged};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;

const COLLECTION: &str = "/api/v1/recipes";

/// One ingredient reference in a request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientAmountRequest {
    #[schema(value_type = Uuid)]
    pub ingredient_id: String,
    #[serde(default)]
    #[schema(example = "200 g")]
    pub amount: String,
}

impl TryFrom<IngredientAmountRequest> for IngredientAmount {
    type Error = Error;

    fn try_from(value: IngredientAmountRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            ingredient_id: parse_uuid(&value.ingredient_id, "ingredientId")?,
            amount: value.amount,
        })
    }
}

fn parse_items(items: Vec<IngredientAmountRequest>) -> Result<Vec<IngredientAmount>, Error> {
    items.into_iter().map(IngredientAmount::try_from).collect()
}

/// Body of `POST /recipes` and `PUT /recipes/{id}`.
///
/// Numbers default to zero. On update every field is replaced: an absent
/// `categoryId` detaches the category and an absent `ingredients` list
/// removes every association.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[serde(default)]
    #[schema(example = "Apple pie")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "https://images.example.com/apple-pie.jpg")]
    pub image: Option<String>,
    #[schema(example = 20)]
    pub prep_time: Option<i32>,
    #[schema(example = 45)]
    pub cook_time: Option<i32>,
    #[schema(example = 8)]
    pub servings: Option<i32>,
    #[schema(value_type = Option<Uuid>)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientAmountRequest>,
}

impl TryFrom<RecipeRequest> for RecipeDraft {
    type Error = Error;

    fn try_from(value: RecipeRequest) -> Result<Self, Self::Error> {
        let category_id = value
            .category_id
            .as_deref()
            .map(|raw| parse_uuid(raw, "categoryId"))
            .transpose()?;
        let ingredients = parse_items(value.ingredients)?;
        Ok(Self::new(RecipeFields {
            title: value.title,
            description: value.description,
            image: value.image,
            prep_time: value.prep_time,
            cook_time: value.cook_time,
            servings: value.servings,
            category_id,
            ingredients,
        })?)
    }
}

/// Body of `POST /recipes/{id}/ingredients`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RecipeIngredientsRequest {
    #[serde(default)]
    pub ingredients: Vec<IngredientAmountRequest>,
}

/// Body of `POST /recipes/{id}/ingredients/{ingredientId}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AmountRequest {
    #[serde(default)]
    #[schema(example = "1 tsp")]
    pub amount: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategorySummaryView {
    pub id: Uuid,
    pub name: String,
}

impl From<CategorySummary> for CategorySummaryView {
    fn from(value: CategorySummary) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

/// An ingredient attached to a recipe.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientView {
    pub ingredient_id: Uuid,
    pub name: String,
    pub amount: String,
}

impl From<RecipeIngredient> for RecipeIngredientView {
    fn from(value: RecipeIngredient) -> Self {
        Self {
            ingredient_id: value.ingredient_id,
            name: value.name,
            amount: value.amount,
        }
    }
}

/// Recipe as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub category: Option<CategorySummaryView>,
    pub ingredients: Vec<RecipeIngredientView>,
}

impl From<Recipe> for RecipeView {
    fn from(value: Recipe) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            image: value.image,
            prep_time: value.prep_time,
            cook_time: value.cook_time,
            servings: value.servings,
            category: value.category.map(CategorySummaryView::from),
            ingredients: value
                .ingredients
                .into_iter()
                .map(RecipeIngredientView::from)
                .collect(),
        }
    }
}

/// Associations of one recipe.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientsView {
    pub recipe_id: Uuid,
    pub ingredients: Vec<RecipeIngredientView>,
}

impl RecipeIngredientsView {
    fn new(recipe_id: Uuid, ingredients: Vec<RecipeIngredient>) -> Self {
        Self {
            recipe_id,
            ingredients: ingredients
                .into_iter()
                .map(RecipeIngredientView::from)
                .collect(),
        }
    }
}

async fn search(
    state: &HttpState,
    request: &HttpRequest,
    input: RecipeSearchRequest,
) -> ApiResult<web::Json<PagedResponse<RecipeView>>> {
    let search = RecipeSearch::try_from(input)?;
    let page = state.recipes.search(search.clone()).await?;
    let filters = [("categoryName", search.category_name.as_deref())];
    Ok(web::Json(paged(
        request,
        COLLECTION,
        &search.query,
        &filters,
        page,
    )?))
}

/// List recipes matching the query string.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    params(RecipeSearchRequest),
    responses(
        (status = 200, description = "Page of recipes", body = RecipePage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    request: HttpRequest,
    query: web::Query<RecipeSearchRequest>,
) -> ApiResult<web::Json<PagedResponse<RecipeView>>> {
    search(&state, &request, query.into_inner()).await
}

/// Search recipes with parameters in the request body.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/search",
    request_body = RecipeSearchRequest,
    responses(
        (status = 200, description = "Page of recipes", body = RecipePage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "searchRecipes"
)]
#[post("/recipes/search")]
pub async fn search_recipes(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<RecipeSearchRequest>,
) -> ApiResult<web::Json<PagedResponse<RecipeView>>> {
    search(&state, &request, payload.into_inner()).await
}

/// Fetch one recipe with its category and ingredients.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = Uuid, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe", body = RecipeView),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecipeView>> {
    let id = parse_uuid(&path, "id")?;
    Ok(web::Json(state.recipes.find_by_id(id).await?.into()))
}

/// Create a recipe together with its ingredient associations.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeView),
        (status = 400, description = "Invalid request, duplicate title, or unknown category", body = ErrorSchema),
        (status = 404, description = "Referenced ingredient not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let draft = RecipeDraft::try_from(payload.into_inner())?;
    let recipe = state.recipes.create(draft).await?;
    Ok(HttpResponse::Created().json(RecipeView::from(recipe)))
}

/// Replace a recipe and its whole ingredient list.
#[utoipa::path(
    put,
    path = "/api/v1/recipes/{id}",
    params(("id" = Uuid, Path, description = "Recipe identifier")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeView),
        (status = 400, description = "Invalid request, duplicate title, or unknown category", body = ErrorSchema),
        (status = 404, description = "Recipe or referenced ingredient not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[put("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeView>> {
    let id = parse_uuid(&path, "id")?;
    let draft = RecipeDraft::try_from(payload.into_inner())?;
    Ok(web::Json(state.recipes.update(id, draft).await?.into()))
}

/// Delete a recipe and its associations.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = Uuid, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe deleted", body = DeletedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = parse_uuid(&path, "id")?;
    Ok(web::Json(state.recipes.delete(id).await?.into()))
}

/// List a recipe's ingredients ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}/ingredients",
    params(("id" = Uuid, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe ingredients", body = RecipeIngredientsView),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipeIngredients"
)]
#[get("/recipes/{id}/ingredients")]
pub async fn list_recipe_ingredients(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecipeIngredientsView>> {
    let id = parse_uuid(&path, "id")?;
    let ingredients = state.recipes.ingredients(id).await?;
    Ok(web::Json(RecipeIngredientsView::new(id, ingredients)))
}

/// Attach several ingredients to a recipe; all are attached or none.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/ingredients",
    params(("id" = Uuid, Path, description = "Recipe identifier")),
    request_body = RecipeIngredientsRequest,
    responses(
        (status = 201, description = "Ingredients attached", body = RecipeIngredientsView),
        (status = 400, description = "Invalid request or already attached", body = ErrorSchema),
        (status = 404, description = "Recipe or ingredient not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "addRecipeIngredients"
)]
#[post("/recipes/{id}/ingredients")]
pub async fn add_recipe_ingredients(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RecipeIngredientsRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_uuid(&path, "id")?;
    let items = parse_items(payload.into_inner().ingredients)?;
    let attached = state.recipes.add_ingredients(id, items).await?;
    Ok(HttpResponse::Created().json(RecipeIngredientsView::new(id, attached)))
}

/// Attach one ingredient to a recipe.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/ingredients/{ingredient_id}",
    params(
        ("id" = Uuid, Path, description = "Recipe identifier"),
        ("ingredient_id" = Uuid, Path, description = "Ingredient identifier")
    ),
    request_body = AmountRequest,
    responses(
        (status = 201, description = "Ingredient attached", body = RecipeIngredientView),
        (status = 400, description = "Invalid request or already attached", body = ErrorSchema),
        (status = 404, description = "Recipe or ingredient not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "addRecipeIngredient"
)]
#[post("/recipes/{id}/ingredients/{ingredient_id}")]
pub async fn add_recipe_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<AmountRequest>,
) -> ApiResult<HttpResponse> {
    let (recipe, ingredient) = path.into_inner();
    let recipe_id = parse_uuid(&recipe, "id")?;
    let item = IngredientAmount {
        ingredient_id: parse_uuid(&ingredient, "ingredientId")?,
        amount: payload.into_inner().amount,
    };
    let attached = state.recipes.add_ingredient(recipe_id, item).await?;
    Ok(HttpResponse::Created().json(RecipeIngredientView::from(attached)))
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
