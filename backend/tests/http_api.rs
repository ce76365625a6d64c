//! End-to-end HTTP tests over the in-memory adapters.
//!
//! The app is assembled from the public library surface the same way the
//! server does it, so routing, extractor error handling, the trace
//! middleware, and the page envelope are covered together.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use recipe_api::Trace;
use recipe_api::domain::{
    CategoryServiceImpl, IngredientServiceImpl, RecipeServiceImpl, RoleServiceImpl,
    UserServiceImpl,
};
use recipe_api::inbound::http::{self, state::HttpState};
use recipe_api::outbound::crypto::BcryptPasswordHasher;
use recipe_api::outbound::memory::MemoryStore;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use uuid::Uuid;

#[fixture]
fn state() -> HttpState {
    let store = MemoryStore::new();
    let categories = Arc::new(store.categories());
    let ingredients = Arc::new(store.ingredients());
    HttpState {
        categories: Arc::new(CategoryServiceImpl::new(categories.clone())),
        roles: Arc::new(RoleServiceImpl::new(Arc::new(store.roles()))),
        ingredients: Arc::new(IngredientServiceImpl::new(ingredients.clone())),
        users: Arc::new(UserServiceImpl::new(
            Arc::new(store.users()),
            Arc::new(BcryptPasswordHasher::new(4)),
        )),
        recipes: Arc::new(RecipeServiceImpl::new(
            Arc::new(store.recipes()),
            categories,
            ingredients,
        )),
    }
}

async fn call(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body_json(response).await;
    (status, body)
}

async fn seed_roles(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
) {
    for name in ["Admin", "Cook", "Taster"] {
        let (status, _) = call(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/roles")
                .set_json(json!({ "name": name })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "seed {name}");
    }
}

#[rstest]
#[case(0, 2, &["Admin", "Cook"])]
#[case(1, 2, &["Taster"])]
#[case(5, 2, &[])]
#[actix_web::test]
async fn pages_slice_the_sorted_collection(
    state: HttpState,
    #[case] page: u32,
    #[case] size: u32,
    #[case] expected: &[&str],
) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(http::configure)),
    )
    .await;
    seed_roles(&app).await;

    let (status, body) = call(
        &app,
        actix_test::TestRequest::get().uri(&format!("/api/v1/roles?page={page}&size={size}")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["content"]
        .as_array()
        .expect("content")
        .iter()
        .filter_map(|role| role["name"].as_str())
        .collect();
    assert_eq!(names, expected);
    assert_eq!(body["page"]["totalElements"], 3);
    assert_eq!(body["page"]["totalPages"], 2);
    assert_eq!(body["page"]["number"], page);
}

#[rstest]
#[actix_web::test]
async fn links_point_at_neighbouring_pages(state: HttpState) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").configure(http::configure)),
    )
    .await;
    seed_roles(&app).await;

    let (_, body) = call(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/roles?size=2&sortBy=name"),
    )
    .await;

    let links = &body["links"];
    let next = links["next"].as_str().expect("next link");
    assert!(next.contains("page=1") && next.contains("sortBy=name"), "{next}");
    assert!(links["prev"].is_null());
    assert!(links["last"].as_str().expect("last link").contains("page=1"));
}

#[rstest]
#[case("/api/v1/categories")]
#[case("/api/v1/roles")]
#[case("/api/v1/ingredients")]
#[case("/api/v1/users")]
#[case("/api/v1/recipes")]
#[actix_web::test]
async fn unknown_ids_are_not_found(state: HttpState, #[case] collection: &str) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(http::configure)),
    )
    .await;
    let uri = format!("{collection}/{}", Uuid::new_v4());

    let (fetched, _) = call(&app, actix_test::TestRequest::get().uri(&uri)).await;
    let (deleted, body) = call(&app, actix_test::TestRequest::delete().uri(&uri)).await;

    assert_eq!(fetched, StatusCode::NOT_FOUND);
    assert_eq!(deleted, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[case("sortBy=calories")]
#[case("order=sideways")]
#[case("size=0")]
#[actix_web::test]
async fn invalid_search_parameters_are_rejected(state: HttpState, #[case] query: &str) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(http::configure)),
    )
    .await;

    let (status, body) = call(
        &app,
        actix_test::TestRequest::get().uri(&format!("/api/v1/recipes?{query}")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn error_bodies_echo_the_trace_header(state: HttpState) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(http::configure)),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/categories")
        .set_json(json!({ "name": "" }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let header = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace-id header");
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["traceId"], header.as_str());
}

#[rstest]
#[actix_web::test]
async fn deleting_returns_a_receipt(state: HttpState) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").configure(http::configure)),
    )
    .await;
    let (_, created) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/ingredients")
            .set_json(json!({ "name": "Thyme" })),
    )
    .await;
    let id = created["id"].as_str().expect("id");

    let (status, receipt) = call(
        &app,
        actix_test::TestRequest::delete().uri(&format!("/api/v1/ingredients/{id}")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt, json!({ "id": id, "deleted": true }));
}

/// Minimal valid create body for `collection` whose searchable text is `label`.
fn create_body(collection: &str, label: &str, index: usize) -> Value {
    match collection {
        "users" => json!({
            "firstName": label,
            "lastName": "Cook",
            "username": format!("cook{index}"),
            "email": format!("cook{index}@example.com"),
            "password": "long-enough-secret",
        }),
        "recipes" => json!({ "title": label }),
        _ => json!({ "name": label }),
    }
}

#[rstest]
#[case("categories", "name")]
#[case("roles", "name")]
#[case("ingredients", "name")]
#[case("users", "firstName")]
#[case("recipes", "title")]
#[actix_web::test]
async fn search_bodies_filter_sort_and_page(
    state: HttpState,
    #[case] collection: &str,
    #[case] sort_by: &str,
) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(http::configure)),
    )
    .await;
    let labels = ["Salted nuts", "Plain rice", "Salted caramel", "Salted fish"];
    for (index, label) in labels.iter().enumerate() {
        let (status, _) = call(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/{collection}"))
                .set_json(create_body(collection, label, index)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "seed {label}");
    }

    let (status, body) = call(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/{collection}/search"))
            .set_json(json!({
                "keyword": "SALTED",
                "sortBy": sort_by,
                "page": 1,
                "size": 2,
            })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let content = body["content"].as_array().expect("content");
    assert_eq!(content.len(), 1);
    assert_eq!(content[0][sort_by], "Salted nuts");
    assert_eq!(body["page"]["totalElements"], 3);
    assert_eq!(body["page"]["number"], 1);

    let links = &body["links"];
    assert!(links["next"].is_null());
    let prev = links["prev"].as_str().expect("prev link");
    assert!(
        prev.contains(&format!("/api/v1/{collection}?"))
            && prev.contains("keyword=SALTED")
            && prev.contains("page=0"),
        "{prev}"
    );
}
