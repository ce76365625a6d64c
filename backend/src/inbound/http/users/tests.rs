//! Tests for users API handlers.

use crate::inbound::http::test_utils::{memory_state, test_app};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

fn ada() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "username": "ada",
        "email": "ada@example.com",
        "password": "analytical-engine"
    })
}

async fn post_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    >,
    body: Value,
) -> ServiceResponse {
    actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(body)
            .to_request(),
    )
    .await
}

#[actix_web::test]
async fn created_users_never_expose_credentials() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let response = post_user(&app, ada()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["email"], "ada@example.com");
    let fields = body.as_object().expect("object");
    assert!(!fields.contains_key("password"));
    assert!(!fields.contains_key("passwordHash"));
    assert!(!fields.contains_key("password_hash"));
}

#[rstest]
#[case("username", json!("ada"), json!("other@example.com"))]
#[case("email", json!("grace"), json!("ada@example.com"))]
#[actix_web::test]
async fn duplicate_identity_fields_are_rejected(
    #[case] field: &str,
    #[case] username: Value,
    #[case] email: Value,
) {
    let app = actix_test::init_service(test_app(memory_state())).await;
    assert_eq!(post_user(&app, ada()).await.status(), StatusCode::CREATED);
    let mut clash = ada();
    clash["username"] = username;
    clash["email"] = email;

    let response = post_user(&app, clash).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[case("password", json!(null), "required")]
#[case("password", json!("short"), "length")]
#[case("email", json!("not-an-email"), "format")]
#[actix_web::test]
async fn create_reports_field_errors(
    #[case] field: &str,
    #[case] value: Value,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let mut body = ada();
    body[field] = value;

    let response = post_user(&app, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = actix_test::read_body_json(response).await;
    let violations = error["details"]["fieldErrors"].as_array().expect("violations");
    assert!(
        violations
            .iter()
            .any(|violation| violation["field"] == field && violation["code"] == code),
        "expected {field}/{code} in {violations:?}"
    );
}

#[actix_web::test]
async fn update_without_password_keeps_account() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let created: Value = actix_test::read_body_json(post_user(&app, ada()).await).await;
    let id = created["id"].as_str().expect("id");

    let updated: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/users/{id}"))
            .set_json(json!({
                "firstName": "Ada",
                "lastName": "King",
                "username": "ada",
                "email": "ada@example.com"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(updated["lastName"], "King");
    assert_eq!(updated["id"], created["id"]);
}

#[actix_web::test]
async fn search_matches_any_name_field() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    assert_eq!(post_user(&app, ada()).await.status(), StatusCode::CREATED);
    let grace = json!({
        "firstName": "Grace",
        "lastName": "Hopper",
        "username": "amazing",
        "email": "grace@example.com",
        "password": "cobol-compiler"
    });
    assert_eq!(post_user(&app, grace).await.status(), StatusCode::CREATED);

    let page: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users?keyword=HOPPER")
            .to_request(),
    )
    .await;

    assert_eq!(page["page"]["totalElements"], 1);
    assert_eq!(page["content"][0]["username"], "amazing");
}
